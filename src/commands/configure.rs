//! Broker administration: set the schema validation mode at runtime.
//!
//! This is run as part of the demo's compose setup to flip the broker
//! between enforcing validation (invalid records go to the DLQ) and
//! pass-through (invalid records reach consumers).

#[derive(clap::Args, Debug)]
pub struct Args {
    #[command(flatten)]
    pub kafka: shopstream_kafka::Config,

    /// Validation mode to set on the broker.
    #[arg(long = "validate-mode", default_value = "enforce")]
    pub validate_mode: String,

    /// Broker id to configure.
    #[arg(long = "broker-id", default_value_t = 0)]
    pub broker_id: i32,
}

pub async fn run(args: Args) -> anyhow::Result<()> {
    tracing::info!("configuring broker");
    let admin = shopstream_kafka::new_admin(&args.kafka)?;
    shopstream_kafka::configure_broker(&admin, args.broker_id, &args.validate_mode).await?;
    tracing::info!(validate_mode = args.validate_mode, "configured broker");
    Ok(())
}
