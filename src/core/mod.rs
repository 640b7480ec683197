pub mod etl;
pub mod pipeline;
pub mod schema;
pub mod transformer;

pub use crate::domain::model::{RefinedPreferencesRecord, TransformResult};
pub use crate::domain::ports::{ArtifactStore, ConfigProvider, DataTransformer, Pipeline, Storage};
pub use crate::utils::error::Result;
