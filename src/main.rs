use clap::Parser;
use users_api::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => cli::serve::run().await,
        Command::Routes => cli::docs::print_routes(),
        Command::Openapi => cli::docs::print_openapi(),
    }
}
