use anyhow::Context;
use clap::Parser;
use phonenumber_utility::utils::{logger, validation::Validate};
use phonenumber_utility::{CliConfig, ConfigProvider, PhoneNumberUtility};
use tokio::io::BufReader;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 解析並驗證配置
    let settings = match cli.resolve().and_then(|s| s.validate().map(|_| s)) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ {}", e);
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    // 初始化日誌
    logger::init_file_logger(settings.log_path(), cli.verbose, settings.json_logs)
        .with_context(|| format!("failed to open log file {}", settings.log_path()))?;

    tracing::info!("Starting phonenumber-utility");
    tracing::debug!("Resolved settings: {:?}", settings);

    let mut utility = match PhoneNumberUtility::from_config(&settings) {
        Ok(utility) => utility,
        Err(e) => {
            tracing::error!("❌ Failed to load phone number metadata: {}", e);
            eprintln!("❌ {}", e);
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    let mut stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    utility.run(&mut stdin, &mut stdout).await?;

    Ok(())
}
