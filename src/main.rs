use clap::Parser;
use prefs_refiner::config::toml_config::RefinerConfig;
use prefs_refiner::utils::error::ErrorSeverity;
use prefs_refiner::utils::{logger, validation::Validate};
use prefs_refiner::{
    CliConfig, IpfsUploader, LocalStorage, PreferencesTransformer, RefinePipeline, RefinerEngine,
    RefinerError, UploadSettings,
};

fn exit_with(e: &RefinerError) -> ! {
    tracing::error!(
        "❌ Refinement failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting prefs-refiner");
    tracing::debug!("CLI config: {:?}", cli);

    let file_config = match cli.config.as_deref().map(RefinerConfig::from_file) {
        Some(Ok(config)) => {
            if let Err(e) = config.validate() {
                exit_with(&e);
            }
            Some(config)
        }
        Some(Err(e)) => exit_with(&e),
        None => None,
    };

    let run_config = cli.resolve(file_config.as_ref());
    if let Err(e) = run_config.validate() {
        exit_with(&e);
    }

    // 上傳設定只建立一次，以參照傳入
    let mut upload_settings = UploadSettings::from_env();
    if let Some(upload) = file_config.as_ref().and_then(|c| c.upload.as_ref()) {
        upload_settings = upload_settings.merged_with(upload);
    }
    if cli.upload {
        if let Err(e) = upload_settings.validate() {
            exit_with(&e);
        }
    }

    // 輸入路徑相對於工作目錄，輸出寫入 output_path
    let source = LocalStorage::new(".".to_string());
    let storage = LocalStorage::new(run_config.output_path.clone());
    let pipeline = RefinePipeline::new(source, storage, run_config, PreferencesTransformer::new());
    let engine = RefinerEngine::new(pipeline);

    let summary = match engine.run().await {
        Ok(summary) => summary,
        Err(e) => exit_with(&e),
    };
    println!("✅ Refinement completed successfully!");
    println!("📁 Output saved to: {}", summary.output_path);

    if cli.upload {
        let uploader = IpfsUploader::new(&upload_settings);
        match engine.publish(&summary, &uploader).await {
            Ok(receipt) => {
                println!(
                    "📌 JSON uploaded to IPFS: {}",
                    upload_settings.gateway_link(&receipt.json_cid)
                );
                println!(
                    "📌 File uploaded to IPFS: {}",
                    upload_settings.gateway_link(&receipt.file_cid)
                );
            }
            Err(e) => exit_with(&e),
        }
    }

    Ok(())
}
