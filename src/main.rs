//! Command-line interface for the shopstream demo
//!
//! # Usage Examples
//!
//! ## Cart load generation
//! ```bash
//! # Produce carts until interrupted (about 1% are semantically invalid)
//! shopstream produce --bootstrap localhost:9092 --topic carts
//!
//! # Produce a bounded number of records through a schema registry
//! shopstream produce --topic carts --max-records 10000 \
//!   --csr-url http://localhost:8081
//! ```
//!
//! ## Consumption
//! ```bash
//! # Consume carts and flag zero-quantity line items
//! shopstream consume --topic carts
//!
//! # Explain dead-lettered carts
//! shopstream consume-dlq --topic dlq
//! ```
//!
//! ## Broker administration
//! ```bash
//! # Switch the broker's schema validation mode
//! shopstream configure --validate-mode enforce
//! ```
//!
//! ## Email verification demo
//! ```bash
//! shopstream verify-emails --topic email-updated --group email-verifier
//! ```

use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;

mod commands;

#[derive(Parser)]
#[command(name = "shopstream")]
#[command(about = "Demo producers and consumers for a schema-validating streaming broker")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Produce synthetic carts with a pool of concurrent workers
    Produce {
        #[command(flatten)]
        args: commands::produce::Args,
    },

    /// Produce browsing events round-robin across three topics
    ProduceBrowsing {
        #[command(flatten)]
        args: commands::produce_browsing::Args,
    },

    /// Produce checkout-funnel events derived from generated carts
    ProduceOrders {
        #[command(flatten)]
        args: commands::produce_orders::Args,
    },

    /// Consume carts and flag zero-quantity line items
    Consume {
        #[command(flatten)]
        args: commands::consume::Args,
    },

    /// Consume dead-lettered records and explain why each cart was rejected
    ConsumeDlq {
        #[command(flatten)]
        args: commands::consume_dlq::Args,
    },

    /// Consume checkout and order events concurrently
    ConsumeOrders {
        #[command(flatten)]
        args: commands::consume_orders::Args,
    },

    /// Set the broker's schema validation mode
    Configure {
        #[command(flatten)]
        args: commands::configure::Args,
    },

    /// Run the email verification demo loop
    VerifyEmails {
        #[command(flatten)]
        args: commands::verify_emails::Args,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    // One process-wide cancellation signal, triggered by ctrl-c.
    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("shutdown signal received");
                cancel.cancel();
            }
        });
    }

    match cli.command {
        Commands::Produce { args } => commands::produce::run(args, cancel).await,
        Commands::ProduceBrowsing { args } => commands::produce_browsing::run(args, cancel).await,
        Commands::ProduceOrders { args } => commands::produce_orders::run(args, cancel).await,
        Commands::Consume { args } => commands::consume::run(args, cancel).await,
        Commands::ConsumeDlq { args } => commands::consume_dlq::run(args, cancel).await,
        Commands::ConsumeOrders { args } => commands::consume_orders::run(args, cancel).await,
        Commands::Configure { args } => commands::configure::run(args).await,
        Commands::VerifyEmails { args } => commands::verify_emails::run(args, cancel).await,
    }
}
