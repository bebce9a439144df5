//! # CLI Layer
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Reads the wall clock (the library takes `today` as an argument)
//! - Installs the tracing subscriber
//! - Formats output for human consumption
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: `setup::Cli` via clap
//! 2. **Context Setup**: resolve the data dir, load config, open and seed the store
//! 3. **Dispatch**: one API call per subcommand
//! 4. **Output Formatting**: `render` for term or JSON
//!
//! ## Log Level
//!
//! `RUST_LOG` wins when set. Otherwise `-v` picks info/debug/trace, and with no
//! flag the configured `log_level` applies. Logs go to stderr so JSON output on
//! stdout stays parseable.

use super::render::{render, render_categories};
use super::setup::{
    Cli, Commands, ConfigCommands, GlossaryCommands, ImprovementsCommands, MagazineCommands,
    OutputMode, ScheduleCommands,
};
use chrono::{Local, NaiveDate};
use clap::Parser;
use reunionapp::api::{CmdResult, ReunionApi};
use reunionapp::config::{ReunionConfig, CONFIG_FILE};
use reunionapp::error::{ReunionError, Result};
use reunionapp::init::{self, resolve_data_dir};
use reunionapp::model::glossary::GlossaryTerm;
use reunionapp::model::parse_date;
use reunionapp::model::schedule::ScheduleEvent;
use reunionapp::store::FileStore;
use std::path::Path;
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let data_dir = resolve_data_dir(cli.data.clone())?;
    let config = ReunionConfig::load(&data_dir);
    init_logging(cli.verbose, &config.log_level);
    debug!(dir = %data_dir.display(), "using data directory");

    // Config does not need the store (and must not seed it)
    if let Some(Commands::Config { action }) = &cli.command {
        return handle_config_command(action.as_ref(), &config, &data_dir);
    }

    let mut ctx = init::open(data_dir, config);
    let today = Local::now().date_naive();
    let output = dispatch(&mut ctx.api, cli.command, cli.output, today)?;
    print!("{}", output);
    Ok(())
}

fn init_logging(verbose: u8, configured: &str) {
    let fallback = match verbose {
        0 => configured,
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Run one command and render its result.
fn dispatch(
    api: &mut ReunionApi<FileStore>,
    command: Option<Commands>,
    mode: OutputMode,
    today: NaiveDate,
) -> Result<String> {
    let result: CmdResult = match command {
        None => api.magazine()?,
        Some(Commands::Schedule { action }) => match action.unwrap_or(ScheduleCommands::List) {
            ScheduleCommands::List => api.schedule(today)?,
            ScheduleCommands::Note(args) => api.schedule_note(&args.selector, &args.text(), today)?,
            ScheduleCommands::Add {
                date,
                title,
                description,
                location,
                details,
                highlight,
            } => {
                let event = ScheduleEvent {
                    date: parse_date(&date)?,
                    title: title.join(" "),
                    description,
                    location,
                    details,
                    notes: String::new(),
                    is_highlight: highlight,
                    order: 0,
                };
                api.add_event(event, today)?
            }
            ScheduleCommands::Remove { selector } => api.remove_event(&selector, today)?,
        },
        Some(Commands::Improvements { action }) => {
            match action.unwrap_or(ImprovementsCommands::List) {
                ImprovementsCommands::List => api.improvements()?,
                ImprovementsCommands::Status { selector, status } => {
                    api.set_improvement_status(&selector, &status)?
                }
                ImprovementsCommands::Target { selector, date } => {
                    api.set_improvement_target(&selector, &date)?
                }
                ImprovementsCommands::Note(args) => {
                    api.improvement_note(&args.selector, &args.text())?
                }
            }
        }
        Some(Commands::Glossary { action }) => match action.unwrap_or(GlossaryCommands::List {
            search: String::new(),
            category: None,
        }) {
            GlossaryCommands::List { search, category } => {
                api.glossary(&search, category.as_deref())?
            }
            GlossaryCommands::Categories => {
                let result = api.glossary("", None)?;
                return render_categories(&result, mode);
            }
            GlossaryCommands::Add {
                term,
                category,
                description,
                reading,
                related,
            } => api.add_term(GlossaryTerm {
                term,
                reading,
                description,
                category,
                related_terms: related,
            })?,
            GlossaryCommands::Remove { selector } => api.remove_term(&selector)?,
        },
        Some(Commands::Magazine { action }) => match action.unwrap_or(MagazineCommands::Show) {
            MagazineCommands::Show => api.magazine()?,
            MagazineCommands::Move { selector, target } => api.move_section(&selector, &target)?,
            MagazineCommands::Pages { selector, delta } => api.change_pages(&selector, delta)?,
            MagazineCommands::Status { selector, status } => {
                api.set_section_status(&selector, &status)?
            }
            MagazineCommands::Note(args) => api.section_note(&args.selector, &args.text())?,
            MagazineCommands::Task { selector, task } => api.toggle_task(&selector, &task)?,
        },
        Some(Commands::Seed) => api.seed()?,
        Some(Commands::Config { .. }) => {
            return Err(ReunionError::Api("config is handled before dispatch".into()))
        }
    };
    render(&result, mode)
}

/// Handle the `reunion config` subcommand.
fn handle_config_command(
    action: Option<&ConfigCommands>,
    config: &ReunionConfig,
    data_dir: &Path,
) -> Result<()> {
    match action.unwrap_or(&ConfigCommands::Show) {
        ConfigCommands::Show => {
            let table =
                toml::Value::try_from(config).map_err(|e| ReunionError::Api(e.to_string()))?;
            if let toml::Value::Table(t) = table {
                for (k, v) in &t {
                    println!("{} = {}", k, format_toml_value(v));
                }
            }
        }
        ConfigCommands::Path => {
            println!("config: {}", data_dir.join(CONFIG_FILE).display());
            println!("data:   {}", data_dir.display());
        }
    }
    Ok(())
}

/// Format a TOML value for display.
fn format_toml_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => format!("\"{}\"", s),
        toml::Value::Array(a) => toml::to_string(a).unwrap_or_else(|_| format!("{a:?}")),
        other => other.to_string(),
    }
}
