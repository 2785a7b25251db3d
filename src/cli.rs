use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::selection::SelectionAction;
use crate::types::{CatalogYear, ServiceKind};

/// Bundle Quote - price photo and video service bundles
#[derive(Parser, Debug)]
#[command(name = "bundle-quote")]
#[command(about = "Quote service bundles with year-specific prices and combination discounts")]
#[command(version)]
pub struct Cli {
    /// Pricing tables file (JSON) to use instead of the built-in tables
    #[arg(long, global = true)]
    pub tables: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Price a selection of services for a catalog year
    Quote {
        /// Catalog year (e.g., 2021)
        #[arg(short, long)]
        year: CatalogYear,
        /// Selected services (e.g., Photography VideoRecording)
        services: Vec<ServiceKind>,
    },
    /// Apply one select/deselect action to a selection and print the result
    Update {
        /// Current selection, comma separated or repeated
        #[arg(short, long, value_delimiter = ',')]
        selected: Vec<ServiceKind>,
        #[command(flatten)]
        action: ActionArgs,
    },
    /// Print the active pricing tables or export them to a file
    Tables {
        /// Write the tables to this path instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a pricing tables file
    Validate {
        /// Path to the tables file
        path: PathBuf,
    },
}

/// Exactly one way of describing the action to apply
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct ActionArgs {
    /// Select a service
    #[arg(long)]
    pub select: Option<ServiceKind>,
    /// Deselect a service
    #[arg(long)]
    pub deselect: Option<ServiceKind>,
    /// Raw action as JSON, e.g. {"type":"Select","service":"Photography"}
    #[arg(long, value_parser = parse_action_json)]
    pub action: Option<SelectionAction>,
}

impl ActionArgs {
    pub fn to_action(&self) -> SelectionAction {
        match (self.select, self.deselect, self.action) {
            (Some(service), _, _) => SelectionAction::select(service),
            (_, Some(service), _) => SelectionAction::deselect(service),
            (_, _, Some(action)) => action,
            (None, None, None) => SelectionAction::Unrecognized,
        }
    }
}

fn parse_action_json(raw: &str) -> Result<SelectionAction, String> {
    serde_json::from_str(raw).map_err(|e| format!("invalid action JSON: {e}"))
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as clap::Parser>::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_requires_command() {
        assert!(Cli::try_parse_from(["bundle-quote"]).is_err());
    }

    #[test]
    fn test_cli_quote_command() {
        let cli = Cli::try_parse_from([
            "bundle-quote",
            "quote",
            "--year",
            "2021",
            "Photography",
            "videorecording",
        ])
        .unwrap();
        match cli.command {
            Commands::Quote { year, services } => {
                assert_eq!(year, CatalogYear::Y2021);
                assert_eq!(
                    services,
                    vec![ServiceKind::Photography, ServiceKind::VideoRecording]
                );
            }
            _ => panic!("Expected Quote command"),
        }
    }

    #[test]
    fn test_cli_quote_rejects_unsupported_year() {
        let result = Cli::try_parse_from(["bundle-quote", "quote", "--year", "2019"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_update_select() {
        let cli = Cli::try_parse_from([
            "bundle-quote",
            "update",
            "--selected",
            "Photography,VideoRecording",
            "--select",
            "BlurayPackage",
        ])
        .unwrap();
        match cli.command {
            Commands::Update { selected, action } => {
                assert_eq!(selected.len(), 2);
                assert_eq!(
                    action.to_action(),
                    SelectionAction::select(ServiceKind::BlurayPackage)
                );
            }
            _ => panic!("Expected Update command"),
        }
    }

    #[test]
    fn test_cli_update_raw_action() {
        let cli = Cli::try_parse_from([
            "bundle-quote",
            "update",
            "--action",
            r#"{"type":"Reset"}"#,
        ])
        .unwrap();
        match cli.command {
            Commands::Update { action, .. } => {
                assert_eq!(action.to_action(), SelectionAction::Unrecognized);
            }
            _ => panic!("Expected Update command"),
        }
    }

    #[test]
    fn test_cli_update_requires_exactly_one_action() {
        assert!(Cli::try_parse_from(["bundle-quote", "update"]).is_err());
        assert!(Cli::try_parse_from([
            "bundle-quote",
            "update",
            "--select",
            "Photography",
            "--deselect",
            "Photography",
        ])
        .is_err());
    }

    #[test]
    fn test_cli_global_flags() {
        let cli = Cli::try_parse_from([
            "bundle-quote",
            "tables",
            "--json",
            "--tables",
            "/tmp/tables.json",
        ])
        .unwrap();
        assert!(cli.json);
        assert_eq!(cli.tables.unwrap().to_str().unwrap(), "/tmp/tables.json");
        assert!(matches!(cli.command, Commands::Tables { output: None }));
    }

    #[test]
    fn test_cli_validate_command() {
        let cli = Cli::try_parse_from(["bundle-quote", "validate", "/path/to/tables.json"]).unwrap();
        match cli.command {
            Commands::Validate { path } => {
                assert_eq!(path.to_str().unwrap(), "/path/to/tables.json");
            }
            _ => panic!("Expected Validate command"),
        }
    }
}
