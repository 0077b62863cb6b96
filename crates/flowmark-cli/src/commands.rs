use std::path::Path;

use anyhow::{bail, Context};
use colored::Colorize;

use flowmark_chain::materialize;
use flowmark_refs::{FileMarkerHost, MarkerRef};
use flowmark_sdk::{resolve_marker, DeleteOutcome, Resolved, Session, SessionConfig, StatePatch};
use flowmark_store::{serialize, FileForestStore, ForestDocument};
use flowmark_types::{Color, StateId};

use crate::cli::*;
use crate::render;

type CliSession = Session<FileForestStore>;

const DEFAULT_CONFIG: &str = "flowmark.toml";

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let mut session = open_session(&cli)?;
    let json = matches!(cli.format, OutputFormat::Json);
    match cli.command {
        Command::List => cmd_list(&session, json),
        Command::Show(args) => cmd_show(&session, args, json),
        Command::Create(args) => cmd_create(&mut session, args),
        Command::Append(args) => cmd_append(&mut session, args),
        Command::Circular(args) => cmd_circular(&mut session, args),
        Command::Checkbox(args) => cmd_checkbox(&mut session, args),
        Command::Update(args) => cmd_update(&mut session, args),
        Command::DeleteState(args) => cmd_delete_state(&mut session, args),
        Command::DeleteChain(args) => cmd_delete_chain(&mut session, args),
        Command::Labels => cmd_labels(&session),
        Command::Markers => cmd_markers(&session),
        Command::Insert(args) => cmd_insert(&session, args),
        Command::Advance(args) => cmd_advance(&session, args),
        Command::Check(args) => cmd_check(&session, args),
        Command::Resolve(args) => cmd_resolve(&session, args),
        Command::Query(args) => cmd_query(&session, args),
    }
}

fn open_session(cli: &Cli) -> anyhow::Result<CliSession> {
    let mut config = match &cli.config {
        Some(path) => SessionConfig::from_file(path)?,
        None if Path::new(DEFAULT_CONFIG).exists() => {
            SessionConfig::from_file(Path::new(DEFAULT_CONFIG))?
        }
        None => SessionConfig::default(),
    };
    if let Some(store) = &cli.store {
        config.store_path = store.clone();
    }
    let path = config.store_path.clone();
    Session::open(FileForestStore::new(path.clone()), config)
        .with_context(|| format!("failed to open workflows in {}", path.display()))
}

fn parse_id(token: &str) -> anyhow::Result<StateId> {
    StateId::parse_token(token).with_context(|| format!("'{token}' is not a state token"))
}

fn parse_color(color: Option<String>) -> Option<Color> {
    color.map(Color::new)
}

fn cmd_list(session: &CliSession, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", ForestDocument::from_forest(session.forest()).to_json()?);
        return Ok(());
    }
    if session.forest().is_empty() {
        println!("No workflows.");
    }
    for chain in session.forest().chains() {
        println!("{}", render::chain_line(chain));
    }
    Ok(())
}

fn cmd_show(session: &CliSession, args: HeadArgs, json: bool) -> anyhow::Result<()> {
    let head = parse_id(&args.head)?;
    let Some(chain) = session.forest().chain(head) else {
        bail!("no workflow starts at {}", args.head);
    };
    if json {
        println!("{}", serde_json::to_string_pretty(&serialize(chain))?);
        return Ok(());
    }
    println!(
        "Workflow {}  circular: {}  checkbox: {}",
        chain.head().token().yellow().bold(),
        yes_no(chain.is_circular()),
        yes_no(chain.checkbox_branch().is_some()),
    );
    for entry in materialize(chain) {
        let node = entry.node();
        println!("  {}  {}", format!("{:>6}", node.token()).dimmed(), render::entry(&entry));
    }
    Ok(())
}

fn yes_no(flag: bool) -> colored::ColoredString {
    if flag {
        "yes".green()
    } else {
        "no".dimmed()
    }
}

fn cmd_create(session: &mut CliSession, args: CreateArgs) -> anyhow::Result<()> {
    let head = session.create_chain(&args.label, parse_color(args.color))?;
    println!("{} Created workflow {} ({})", "✓".green().bold(), args.label.bold(), head.to_token().yellow());
    Ok(())
}

fn cmd_append(session: &mut CliSession, args: AppendArgs) -> anyhow::Result<()> {
    let head = parse_id(&args.head)?;
    let state = session.append_state(head, &args.label, parse_color(args.color))?;
    println!("{} Appended {} ({})", "✓".green().bold(), args.label.bold(), state.to_token().yellow());
    Ok(())
}

fn cmd_circular(session: &mut CliSession, args: CircularArgs) -> anyhow::Result<()> {
    let head = parse_id(&args.head)?;
    session.set_circular(head, args.switch.enabled())?;
    let mode = if args.switch.enabled() { "circular" } else { "linear" };
    println!("{} Workflow {} is now {}", "✓".green().bold(), args.head.yellow(), mode.bold());
    Ok(())
}

fn cmd_checkbox(session: &mut CliSession, args: CheckboxArgs) -> anyhow::Result<()> {
    let head = parse_id(&args.head)?;
    let branch = session.set_checkbox_branch(
        head,
        args.switch.enabled(),
        args.label.as_deref(),
        parse_color(args.color),
    )?;
    match branch {
        Some(id) => println!("{} Checkbox state {} enabled", "✓".green().bold(), id.to_token().yellow()),
        None => println!("{} Checkbox state disabled", "✓".green().bold()),
    }
    Ok(())
}

fn cmd_update(session: &mut CliSession, args: UpdateArgs) -> anyhow::Result<()> {
    let head = parse_id(&args.head)?;
    let state = parse_id(&args.state)?;
    if args.label.is_none() && args.color.is_none() {
        bail!("nothing to update: pass --label and/or --color");
    }
    let mut patch = StatePatch::new(state);
    patch.label = args.label;
    patch.color = parse_color(args.color);
    session.update_state(head, &patch)?;
    println!("{} Updated {}", "✓".green().bold(), args.state.yellow());
    Ok(())
}

fn cmd_delete_state(session: &mut CliSession, args: StateArgs) -> anyhow::Result<()> {
    let head = parse_id(&args.head)?;
    let state = parse_id(&args.state)?;
    match session.delete_state(head, state)? {
        DeleteOutcome::ChainRemoved(_) => {
            println!("{} Deleted workflow {}", "✓".green().bold(), args.head.yellow())
        }
        DeleteOutcome::StateRemoved { .. } => {
            println!("{} Deleted state {}", "✓".green().bold(), args.state.yellow())
        }
    }
    Ok(())
}

fn cmd_delete_chain(session: &mut CliSession, args: HeadArgs) -> anyhow::Result<()> {
    let head = parse_id(&args.head)?;
    if session.delete_chain(head)? {
        println!("{} Deleted workflow {}", "✓".green().bold(), args.head.yellow());
    } else {
        println!("No workflow starts at {}", args.head.yellow());
    }
    Ok(())
}

fn cmd_labels(session: &CliSession) -> anyhow::Result<()> {
    for label in session.forest().distinct_labels() {
        println!("{label}");
    }
    Ok(())
}

fn cmd_markers(session: &CliSession) -> anyhow::Result<()> {
    for marker in session.quick_insert_markers() {
        println!("{marker}");
    }
    Ok(())
}

fn cmd_insert(session: &CliSession, args: InsertArgs) -> anyhow::Result<()> {
    let head = parse_id(&args.head)?;
    let host = FileMarkerHost::new(&args.file);
    let marker = session.insert_marker(&host, &args.line, head)?;
    println!("{} {}:{} {}", "✓".green().bold(), args.file.display(), args.line, marker);
    Ok(())
}

fn cmd_advance(session: &CliSession, args: LineArgs) -> anyhow::Result<()> {
    let host = FileMarkerHost::new(&args.file);
    report_move(session.advance_marker(&host, &args.line)?, "no next state")
}

fn cmd_check(session: &CliSession, args: LineArgs) -> anyhow::Result<()> {
    let host = FileMarkerHost::new(&args.file);
    report_move(session.toggle_marker_checkbox(&host, &args.line)?, "no checkbox state")
}

fn report_move(moved: Option<MarkerRef>, reason: &str) -> anyhow::Result<()> {
    match moved {
        Some(marker) => println!("{} {}", "→".green().bold(), marker),
        None => println!("Unchanged: {reason}."),
    }
    Ok(())
}

fn cmd_resolve(session: &CliSession, args: ResolveArgs) -> anyhow::Result<()> {
    let query = args.query.trim();
    let marker = MarkerRef::new(query, Some(query.to_string()));
    let how = match resolve_marker(session.forest(), &marker) {
        Resolved::ById(_) => "by token",
        Resolved::ByLabel(_) => "by label",
        Resolved::Unknown => "unresolved",
    };
    let node = session.resolve_marker(&marker);
    println!("{}  {}  ({})", node.token().yellow(), render::chip(&node), how.dimmed());
    Ok(())
}

fn cmd_query(session: &CliSession, args: QueryArgs) -> anyhow::Result<()> {
    println!("{}", session.state_query(&args.labels, args.title.as_deref())?);
    Ok(())
}
