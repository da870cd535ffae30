//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - call: invoke one tool on a server
//! - list: list registered servers and tools
//! - show: print the generated help for one tool
//!
//! Global options go before the subcommand. Everything after
//! `call <server> <tool>` belongs to the tool, `--help` and `--verbose` included.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Toolbridge - call remote tools through an MCP REST gateway
#[derive(Parser, Debug)]
#[command(name = "toolbridge")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Gateway base URL (overrides MCP_REST_URL and the config file)
    #[arg(long, value_name = "URL")]
    pub gateway: Option<String>,

    /// Request timeout in milliseconds
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Invoke a tool; remaining flags are parsed against the tool's schema
    #[command(disable_help_flag = true)]
    Call {
        /// Server namespace (e.g. chrome-devtools)
        server: String,

        /// Tool name (e.g. click)
        tool: String,

        /// Tool flags, e.g. --uid 42 (--help lists them)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "TOOL_FLAGS")]
        args: Vec<String>,
    },

    /// List registered servers and their tools
    List {
        /// Only list tools of this server
        #[arg(short, long)]
        server: Option<String>,
    },

    /// Show the flags accepted by one tool
    Show {
        /// Server namespace
        server: String,

        /// Tool name
        tool: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::parse_tool_args;
    use crate::schema::ToolCatalog;
    use clap::CommandFactory;
    use clap::error::ErrorKind;

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["toolbridge"]).is_err());
    }

    #[test]
    fn test_cli_verbose_flag() {
        let cli = Cli::try_parse_from(["toolbridge", "-v", "list"]).unwrap();
        assert!(cli.is_verbose());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_cli_config_option() {
        let cli = Cli::try_parse_from(["toolbridge", "-c", "/path/to/config.yml", "list"]).unwrap();
        assert_eq!(cli.config.as_ref(), Some(&PathBuf::from("/path/to/config.yml")));
    }

    #[test]
    fn test_gateway_overrides() {
        let cli = Cli::try_parse_from([
            "toolbridge",
            "--gateway",
            "http://gw:9000",
            "--timeout-ms",
            "5000",
            "list",
        ])
        .unwrap();
        assert_eq!(cli.gateway.as_deref(), Some("http://gw:9000"));
        assert_eq!(cli.timeout_ms, Some(5000));
    }

    #[test]
    fn test_call_collects_tool_flags() {
        let cli = Cli::try_parse_from(["toolbridge", "call", "chrome-devtools", "click", "--uid", "42", "--dblClick"])
            .unwrap();
        match cli.command {
            Commands::Call { server, tool, args } => {
                assert_eq!(server, "chrome-devtools");
                assert_eq!(tool, "click");
                assert_eq!(args, vec!["--uid", "42", "--dblClick"]);
            }
            _ => panic!("Expected Call command"),
        }
    }

    #[test]
    fn test_call_keeps_flags_named_like_globals() {
        let cli = Cli::try_parse_from(["toolbridge", "call", "chrome-devtools", "take_snapshot", "--verbose"]).unwrap();
        assert!(!cli.verbose);
        match cli.command {
            Commands::Call { args, .. } => assert_eq!(args, vec!["--verbose"]),
            _ => panic!("Expected Call command"),
        }
    }

    #[test]
    fn test_globals_before_call() {
        let cli = Cli::try_parse_from([
            "toolbridge",
            "-v",
            "--gateway",
            "http://gw:9000",
            "call",
            "chrome-devtools",
            "take_snapshot",
            "--verbose",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.gateway.as_deref(), Some("http://gw:9000"));
        match cli.command {
            Commands::Call { args, .. } => assert_eq!(args, vec!["--verbose"]),
            _ => panic!("Expected Call command"),
        }
    }

    #[test]
    fn test_call_help_reaches_tool_parser() {
        let cli = Cli::try_parse_from(["toolbridge", "call", "chrome-devtools", "click", "--help"]).unwrap();
        let Commands::Call { server, tool, args } = cli.command else {
            panic!("Expected Call command");
        };
        assert_eq!(args, vec!["--help"]);

        let catalog = ToolCatalog::builtin().unwrap();
        let bound = catalog.bind(&server, &tool).unwrap();
        let err = parse_tool_args(&server, bound.schema, &args).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        let help = err.render().to_string();
        assert!(help.contains("--uid"));
        assert!(help.contains("--dblClick"));
    }

    #[test]
    fn test_call_without_tool_flags() {
        let cli = Cli::try_parse_from(["toolbridge", "call", "chrome-devtools", "list_pages"]).unwrap();
        match cli.command {
            Commands::Call { args, .. } => assert!(args.is_empty()),
            _ => panic!("Expected Call command"),
        }
    }

    #[test]
    fn test_call_requires_tool() {
        assert!(Cli::try_parse_from(["toolbridge", "call", "chrome-devtools"]).is_err());
    }

    #[test]
    fn test_list_command() {
        let cli = Cli::try_parse_from(["toolbridge", "list"]).unwrap();
        assert!(matches!(cli.command, Commands::List { server: None }));
    }

    #[test]
    fn test_list_with_server_filter() {
        let cli = Cli::try_parse_from(["toolbridge", "list", "--server", "figma-desktop"]).unwrap();
        match cli.command {
            Commands::List { server } => assert_eq!(server.as_deref(), Some("figma-desktop")),
            _ => panic!("Expected List command"),
        }
    }

    #[test]
    fn test_show_command() {
        let cli = Cli::try_parse_from(["toolbridge", "show", "figma-desktop", "get_metadata"]).unwrap();
        match cli.command {
            Commands::Show { server, tool } => {
                assert_eq!(server, "figma-desktop");
                assert_eq!(tool, "get_metadata");
            }
            _ => panic!("Expected Show command"),
        }
    }

    #[test]
    fn test_cli_debug_assert() {
        Cli::command().debug_assert();
    }
}
