#[cfg(feature = "lambda")]
use aws_config::BehaviorVersion;
#[cfg(feature = "lambda")]
use aws_sdk_kinesis::config::Region;
#[cfg(feature = "lambda")]
use aws_sdk_kinesis::Client as KinesisClient;
#[cfg(feature = "lambda")]
use forecast_relay::utils::{logger, validation::Validate};
#[cfg(feature = "lambda")]
use forecast_relay::{
    handle_invocation, ForecastRelay, InvocationResponse, KinesisSink, RelayConfig,
    TomorrowClient,
};
#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};

#[cfg(feature = "lambda")]
type Relay = ForecastRelay<TomorrowClient, KinesisSink>;

#[cfg(feature = "lambda")]
async fn function_handler(
    relay: &Relay,
    event: LambdaEvent<serde_json::Value>,
) -> Result<InvocationResponse, Error> {
    tracing::info!(request_id = %event.context.request_id, "Starting forecast relay invocation");

    let response = handle_invocation(relay, &event.payload)
        .await
        .map_err(|e| {
            tracing::error!(
                "❌ Forecast relay failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            Box::new(e) as Box<dyn std::error::Error + Send + Sync>
        })?;

    tracing::info!("Forecast relay invocation completed");
    Ok(response)
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    // 冷啟動時建立一次，之後每次調用共用
    let relay_config = RelayConfig::from_env()?;
    relay_config.validate()?;

    let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let region = Region::new(relay_config.stream_region.clone());
    let config = aws_sdk_kinesis::config::Builder::from(&config)
        .region(region)
        .build();
    let kinesis_client = KinesisClient::from_conf(config);

    let source = TomorrowClient::new(reqwest::Client::new(), &relay_config);
    let relay = ForecastRelay::new(source, KinesisSink::new(kinesis_client), &relay_config);

    let relay = &relay;
    run(service_fn(move |event: LambdaEvent<serde_json::Value>| async move {
        function_handler(relay, event).await
    }))
    .await
}
