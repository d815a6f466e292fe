//! CLI module for the Users API
//!
//! Subcommands:
//! - `serve`: run the HTTP server (default)
//! - `routes`: print the route table
//! - `openapi`: print the OpenAPI document

pub mod docs;
pub mod serve;

use clap::{Parser, Subcommand};

/// Users API - CRUD service over user documents
#[derive(Parser)]
#[command(name = "users-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Run the HTTP server (default)
    Serve,

    /// Print the route table
    Routes,

    /// Print the OpenAPI document as JSON
    Openapi,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_is_none() {
        let cli = Cli::parse_from(["users-api"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_subcommands() {
        assert_eq!(Cli::parse_from(["users-api", "serve"]).command, Some(Command::Serve));
        assert_eq!(Cli::parse_from(["users-api", "routes"]).command, Some(Command::Routes));
        assert_eq!(Cli::parse_from(["users-api", "openapi"]).command, Some(Command::Openapi));
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
