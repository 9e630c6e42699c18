use clap::Parser;
use team_provisioner::cli::{self, Cli, Command};
use team_provisioner::domain::ProvisioningIntent;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Create(args) => cli::provision::run(args, ProvisioningIntent::Create).await,
        Command::Update(args) => cli::provision::run(args, ProvisioningIntent::Update).await,
        Command::Parse(args) => cli::provision::parse(args).await,
        Command::Teams(args) => cli::teams::run(args).await,
    }
}
