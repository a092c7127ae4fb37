// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands: `train` and `serve`
// and all their configurable flags.
//
// clap's derive macros automatically generate:
//   - help text (--help)
//   - error messages for missing args
//   - type conversion (string → usize, f64, etc.)
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};

use crate::application::train_use_case::TrainConfig;

/// The two top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the regression pipeline on a CSV and save the bundle
    Train(TrainArgs),

    /// Serve the prediction form using a trained bundle
    Serve(ServeArgs),
}

/// All arguments for the `train` command.
/// Each field becomes a --flag on the command line.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// CSV file with the feature columns and the target column
    #[arg(long, default_value = "data/tips.csv")]
    pub csv: String,

    /// Where to write the trained model bundle
    #[arg(long, default_value = "models/bundle.json")]
    pub bundle: String,

    /// Fraction of rows held out for the test split
    #[arg(long, default_value_t = 0.2)]
    pub test_fraction: f64,

    /// RNG seed — fixing it makes the split and all metrics
    /// reproducible across runs
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Number of cross-validation folds
    #[arg(long, default_value_t = 5)]
    pub folds: usize,
}

/// Convert CLI TrainArgs into the application-layer TrainConfig.
/// This is the boundary between Layer 1 and Layer 2 —
/// the application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            csv_path:      a.csv,
            bundle_path:   a.bundle,
            test_fraction: a.test_fraction,
            seed:          a.seed,
            folds:         a.folds,
        }
    }
}

/// All arguments for the `serve` command
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Path to the bundle written by `train`
    #[arg(long, default_value = "models/bundle.json")]
    pub bundle: String,

    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    pub port: u16,
}
