//! Teams command - list and archive existing teams

use clap::{Args, Subcommand};
use tracing::info;

use super::{bootstrap, TokenArgs};

#[derive(Args, Clone)]
pub struct TeamsArgs {
    #[command(subcommand)]
    pub command: TeamsCommand,
}

#[derive(Subcommand, Clone)]
pub enum TeamsCommand {
    /// List teams
    List {
        /// Hide archived teams
        #[arg(long)]
        active_only: bool,

        #[command(flatten)]
        auth: TokenArgs,
    },

    /// Archive the team with this exact display name
    Archive {
        name: String,

        #[command(flatten)]
        auth: TokenArgs,
    },
}

pub async fn run(args: TeamsArgs) -> anyhow::Result<()> {
    let config = bootstrap();
    let catalog = crate::create_team_catalog(&config)?;

    match args.command {
        TeamsCommand::List { active_only, auth } => {
            let token = auth.access_token(&config)?;
            let teams = catalog.list(&token, active_only).await?;

            for team in &teams {
                println!("{}\t{}", team.id, team.display_name);
            }
            info!(count = teams.len(), active_only, "Listed teams");
        }
        TeamsCommand::Archive { name, auth } => {
            let token = auth.access_token(&config)?;
            catalog.archive_by_name(&token, &name).await?;

            println!("'{}' team archived.", name);
        }
    }

    Ok(())
}
