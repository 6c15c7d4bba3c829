use clap::Parser;
use color_annotator::utils::{logger, validation::Validate};
use color_annotator::{
    AnnotateError, ApiCredential, CliConfig, ColorPipeline, EtlEngine, HttpReachability,
    LocalStorage, OpenAiClassifier,
};

fn fail(e: &AnnotateError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    let Some(input) = config.input.clone() else {
        println!("Usage: color-annotator <input.csv>");
        std::process::exit(1);
    };

    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting color-annotator");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 憑證必須在讀取輸入檔之前確認
    let credential = ApiCredential::from_env().unwrap_or_else(|e| fail(&e));

    let settings = config.resolve(input).unwrap_or_else(|e| fail(&e));
    if let Err(e) = settings.validate() {
        fail(&e);
    }

    if config.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    let reachability = HttpReachability::new(settings.head_timeout()).unwrap_or_else(|e| fail(&e));
    let classifier =
        OpenAiClassifier::new(&settings, credential).unwrap_or_else(|e| fail(&e));
    let storage = LocalStorage::new(settings.base_dir.clone());
    let pipeline = ColorPipeline::new(storage, settings, reachability, classifier);

    let engine = EtlEngine::new_with_monitoring(pipeline, config.monitor);

    match engine.run().await {
        Ok(output_path) => {
            println!("✅ Color detection complete!");
            println!("📁 Output saved to: {}", output_path);
            Ok(())
        }
        Err(e) => fail(&e),
    }
}
