use clap::Parser;
use iris_mlops::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve => cli::serve::run().await,
        Command::Train => cli::train::run().await,
        Command::Promote(args) => cli::promote::run(args).await,
    }
}
