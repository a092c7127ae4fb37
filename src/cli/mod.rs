// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// This is the entry point for all user interaction.
// It uses the `clap` crate to parse command line arguments.
// All business logic is delegated to Layer 2 (application).
//
// Two commands are supported:
//   1. `train` — fits the pipeline on a CSV and saves the bundle
//   2. `serve` — loads the bundle and serves the prediction form
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

// Declare the commands submodule
pub mod commands;

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;
use commands::{Commands, ServeArgs, TrainArgs};

/// The main CLI struct — clap reads the fields and generates
/// argument parsing code automatically via the Parser derive macro.
#[derive(Parser, Debug)]
#[command(
    name = "tip-predictor",
    version = "0.1.0",
    about = "Train a scale+OLS regression on a tips CSV, then serve predictions over a web form."
)]
pub struct Cli {
    /// The subcommand to run (train or serve)
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    /// This keeps the CLI layer thin — it only routes, never computes.
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args) => Self::run_train(args),
            Commands::Serve(args) => Self::run_serve(args).await,
        }
    }

    /// Handles the `train` subcommand.
    /// Converts CLI args into a TrainConfig and hands off to Layer 2.
    fn run_train(args: TrainArgs) -> Result<()> {
        use crate::application::train_use_case::TrainUseCase;

        tracing::info!("Starting training on '{}'", args.csv);

        // Convert CLI args → application config (separates presentation from domain)
        let use_case = TrainUseCase::new(args.into());
        let metrics = use_case.execute()?;

        println!(
            "Training complete. Held-out R²={:.4}, {}-fold CV R²={:.4} ± {:.4}",
            metrics.r2_holdout, metrics.folds, metrics.cv_r2_mean, metrics.cv_r2_std,
        );
        Ok(())
    }

    /// Handles the `serve` subcommand.
    /// Loads the bundle once, then hands off to the web layer.
    async fn run_serve(args: ServeArgs) -> Result<()> {
        use crate::infra::bundle_store::BundleStore;
        use crate::web::server;

        let bundle = BundleStore::new(&args.bundle).load()?;

        let addr: SocketAddr = format!("{}:{}", args.host, args.port)
            .parse()
            .with_context(|| format!("invalid bind address '{}:{}'", args.host, args.port))?;

        server::run(addr, bundle).await
    }
}
