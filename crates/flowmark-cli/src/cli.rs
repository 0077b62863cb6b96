use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "flowmark",
    about = "Flowmark: workflow state chains for plain-text notes",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Config file (defaults to ./flowmark.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Workflow store, overriding the config
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum Switch {
    On,
    Off,
}

impl Switch {
    pub fn enabled(self) -> bool {
        matches!(self, Self::On)
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// List every workflow
    List,
    /// Show one workflow state by state
    Show(HeadArgs),
    /// Start a new workflow
    Create(CreateArgs),
    /// Append a state to a workflow
    Append(AppendArgs),
    /// Make a workflow loop back to its first state, or stop looping
    Circular(CircularArgs),
    /// Enable, restyle, or disable a workflow's checkbox state
    Checkbox(CheckboxArgs),
    /// Rename or recolor a state
    Update(UpdateArgs),
    /// Delete a state (deleting the first state deletes the workflow)
    DeleteState(StateArgs),
    /// Delete a workflow
    DeleteChain(HeadArgs),
    /// List every distinct state label
    Labels,
    /// Show the marker inserted for each workflow
    Markers,
    /// Put a workflow marker at the start of a line
    Insert(InsertArgs),
    /// Move the marker on a line to its next state
    Advance(LineArgs),
    /// Check or uncheck the marker on a line
    Check(LineArgs),
    /// Resolve a token or label to a state
    Resolve(ResolveArgs),
    /// Print a query block finding text marked with the given labels
    Query(QueryArgs),
}

#[derive(Args)]
pub struct HeadArgs {
    /// Token of the workflow's first state
    pub head: String,
}

#[derive(Args)]
pub struct CreateArgs {
    pub label: String,
    #[arg(long)]
    pub color: Option<String>,
}

#[derive(Args)]
pub struct AppendArgs {
    pub head: String,
    pub label: String,
    #[arg(long)]
    pub color: Option<String>,
}

#[derive(Args)]
pub struct CircularArgs {
    pub head: String,
    pub switch: Switch,
}

#[derive(Args)]
pub struct CheckboxArgs {
    pub head: String,
    pub switch: Switch,
    #[arg(long)]
    pub label: Option<String>,
    #[arg(long)]
    pub color: Option<String>,
}

#[derive(Args)]
pub struct UpdateArgs {
    pub head: String,
    pub state: String,
    #[arg(long)]
    pub label: Option<String>,
    #[arg(long)]
    pub color: Option<String>,
}

#[derive(Args)]
pub struct StateArgs {
    pub head: String,
    pub state: String,
}

#[derive(Args)]
pub struct InsertArgs {
    pub file: PathBuf,
    /// Line number, starting at 1
    pub line: usize,
    pub head: String,
}

#[derive(Args)]
pub struct LineArgs {
    pub file: PathBuf,
    /// Line number, starting at 1
    pub line: usize,
}

#[derive(Args)]
pub struct ResolveArgs {
    pub query: String,
}

#[derive(Args)]
pub struct QueryArgs {
    /// Labels to match (every known label when none are given)
    pub labels: Vec<String>,
    #[arg(long)]
    pub title: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_list() {
        let cli = Cli::try_parse_from(["flowmark", "list"]).unwrap();
        assert!(matches!(cli.command, Command::List));
        assert!(!cli.verbose);
        assert!(matches!(cli.format, OutputFormat::Text));
    }

    #[test]
    fn parse_create_with_color() {
        let cli = Cli::try_parse_from(["flowmark", "create", "REVIEW", "--color", "#805AD5"]).unwrap();
        if let Command::Create(args) = cli.command {
            assert_eq!(args.label, "REVIEW");
            assert_eq!(args.color, Some("#805AD5".into()));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_append() {
        let cli = Cli::try_parse_from(["flowmark", "append", "1", "QA"]).unwrap();
        if let Command::Append(args) = cli.command {
            assert_eq!(args.head, "1");
            assert_eq!(args.label, "QA");
            assert!(args.color.is_none());
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_circular_switch() {
        let cli = Cli::try_parse_from(["flowmark", "circular", "1", "on"]).unwrap();
        if let Command::Circular(args) = cli.command {
            assert!(args.switch.enabled());
        } else { panic!("wrong command"); }
        assert!(Cli::try_parse_from(["flowmark", "circular", "1", "maybe"]).is_err());
    }

    #[test]
    fn parse_checkbox_with_style() {
        let cli = Cli::try_parse_from([
            "flowmark", "checkbox", "1", "on", "--label", "BLOCKED", "--color", "#bf3232",
        ])
        .unwrap();
        if let Command::Checkbox(args) = cli.command {
            assert!(args.switch.enabled());
            assert_eq!(args.label, Some("BLOCKED".into()));
            assert_eq!(args.color, Some("#bf3232".into()));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_checkbox_off() {
        let cli = Cli::try_parse_from(["flowmark", "checkbox", "1", "off"]).unwrap();
        if let Command::Checkbox(args) = cli.command {
            assert!(!args.switch.enabled());
            assert!(args.label.is_none());
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_update_label() {
        let cli = Cli::try_parse_from(["flowmark", "update", "1", "2", "--label", "WIP"]).unwrap();
        if let Command::Update(args) = cli.command {
            assert_eq!(args.state, "2");
            assert_eq!(args.label, Some("WIP".into()));
            assert!(args.color.is_none());
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_delete_state_and_chain() {
        let cli = Cli::try_parse_from(["flowmark", "delete-state", "1", "3"]).unwrap();
        assert!(matches!(cli.command, Command::DeleteState(_)));
        let cli = Cli::try_parse_from(["flowmark", "delete-chain", "4"]).unwrap();
        assert!(matches!(cli.command, Command::DeleteChain(_)));
    }

    #[test]
    fn parse_insert() {
        let cli = Cli::try_parse_from(["flowmark", "insert", "notes.md", "3", "1"]).unwrap();
        if let Command::Insert(args) = cli.command {
            assert_eq!(args.file, PathBuf::from("notes.md"));
            assert_eq!(args.line, 3);
            assert_eq!(args.head, "1");
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_advance_and_check() {
        let cli = Cli::try_parse_from(["flowmark", "advance", "notes.md", "7"]).unwrap();
        if let Command::Advance(args) = cli.command {
            assert_eq!(args.line, 7);
        } else { panic!("wrong command"); }
        let cli = Cli::try_parse_from(["flowmark", "check", "notes.md", "2"]).unwrap();
        assert!(matches!(cli.command, Command::Check(_)));
        assert!(Cli::try_parse_from(["flowmark", "advance", "notes.md", "two"]).is_err());
    }

    #[test]
    fn parse_query() {
        let cli = Cli::try_parse_from(["flowmark", "query", "TODO", "DOING", "--title", "Open"]).unwrap();
        if let Command::Query(args) = cli.command {
            assert_eq!(args.labels, vec!["TODO", "DOING"]);
            assert_eq!(args.title, Some("Open".into()));
        } else { panic!("wrong command"); }
        let cli = Cli::try_parse_from(["flowmark", "query"]).unwrap();
        if let Command::Query(args) = cli.command {
            assert!(args.labels.is_empty());
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::try_parse_from(["flowmark", "--verbose", "labels"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn parse_json_format_and_store() {
        let cli = Cli::try_parse_from(["flowmark", "show", "1", "--format", "json", "--store", "w.json"]).unwrap();
        assert!(matches!(cli.format, OutputFormat::Json));
        assert_eq!(cli.store, Some(PathBuf::from("w.json")));
        assert!(cli.config.is_none());
    }

    #[test]
    fn missing_subcommand_is_an_error() {
        assert!(Cli::try_parse_from(["flowmark"]).is_err());
    }
}
