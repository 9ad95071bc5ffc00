//! CLI module for Iris MLOps
//!
//! Provides subcommands for each process of the pipeline:
//! - `serve`: prediction server
//! - `train`: training job
//! - `promote`: move a model version to a registry stage

pub mod promote;
pub mod serve;
pub mod train;

use clap::{Parser, Subcommand};

/// Iris MLOps - train, promote and serve an iris classifier
#[derive(Parser)]
#[command(name = "iris-mlops")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Load the model at MODEL_STAGE and serve POST /predict
    Serve,

    /// Fit, score and register a new model version
    Train,

    /// Move a registered model version to a stage
    Promote(promote::PromoteArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Stage;

    #[test]
    fn test_parse_promote() {
        let cli = Cli::try_parse_from([
            "iris-mlops",
            "promote",
            "IrisLogisticRegressionModel",
            "2",
            "production",
        ])
        .unwrap();

        match cli.command {
            Command::Promote(args) => {
                assert_eq!(args.name, "IrisLogisticRegressionModel");
                assert_eq!(args.version, 2);
                assert_eq!(args.stage, Stage::Production);
            }
            _ => panic!("expected promote"),
        }
    }

    #[test]
    fn test_promote_rejects_unknown_stage() {
        let result = Cli::try_parse_from(["iris-mlops", "promote", "iris", "1", "live"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_train_and_serve() {
        assert!(matches!(
            Cli::try_parse_from(["iris-mlops", "train"]).unwrap().command,
            Command::Train
        ));
        assert!(matches!(
            Cli::try_parse_from(["iris-mlops", "serve"]).unwrap().command,
            Command::Serve
        ));
    }
}
