use anyhow::Context;
use clap::Parser;
use forecast_relay::utils::error::ErrorSeverity;
use forecast_relay::utils::{logger, validation::Validate};
use forecast_relay::{
    handle_invocation, CliConfig, ForecastRelay, LocalSink, TomorrowClient,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting forecast-relay CLI");
    let config = cli.relay_config();
    if cli.verbose {
        tracing::debug!(
            "Relay config: stream={}, policy={}, api_key_set={}",
            config.stream_name,
            config.publish_policy,
            config.has_api_key()
        );
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let sink = LocalSink::new(cli.output_path.clone());
    let stream_file = sink.stream_file(&config.stream_name);
    let source = TomorrowClient::new(reqwest::Client::new(), &config);
    let relay = ForecastRelay::new(source, sink, &config);

    // 本地執行沒有觸發事件
    match handle_invocation(&relay, &serde_json::Value::Null).await {
        Ok(response) => {
            tracing::info!("✅ Forecast relayed");
            tracing::info!("📁 Stream file: {}", stream_file.display());
            let rendered =
                serde_json::to_string(&response).context("failed to render invocation response")?;
            println!("{}", rendered);
        }
        Err(e) => {
            tracing::error!(
                "❌ Forecast relay failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Medium => 2, // 可重試
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            std::process::exit(exit_code);
        }
    }

    Ok(())
}
