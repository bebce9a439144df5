use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format for releases: "v0.3.0"
/// Format for dev builds: "v0.3.0\ndev: abc1234 2026-01-15 14:30"
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            format!("v{}", VERSION)
        } else {
            format!("v{}\ndev: {} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Styled tables for the terminal
    #[default]
    Term,
    /// The structured result as JSON
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "reunion",
    bin_name = "reunion",
    version = get_version(),
    disable_help_subcommand = true,
    after_help = "Rows are picked by the number printed in front of them, or by document id."
)]
#[command(about = "Planning board for the alumni association", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (defaults to $REUNION_DATA, then the OS data dir)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data: Option<PathBuf>,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count, help_heading = "Options")]
    pub verbose: u8,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputMode::Term, help_heading = "Options")]
    pub output: OutputMode,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Yearly event schedule
    #[command(alias = "s", display_order = 1)]
    Schedule {
        #[command(subcommand)]
        action: Option<ScheduleCommands>,
    },

    /// Improvements checklist
    #[command(alias = "i", display_order = 2)]
    Improvements {
        #[command(subcommand)]
        action: Option<ImprovementsCommands>,
    },

    /// Glossary of association terms
    #[command(alias = "g", display_order = 3)]
    Glossary {
        #[command(subcommand)]
        action: Option<GlossaryCommands>,
    },

    /// Magazine production board
    #[command(alias = "m", display_order = 4)]
    Magazine {
        #[command(subcommand)]
        action: Option<MagazineCommands>,
    },

    /// Fill empty collections with the default content
    #[command(display_order = 10)]
    Seed,

    /// Show configuration
    #[command(display_order = 11)]
    Config {
        #[command(subcommand)]
        action: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ScheduleCommands {
    /// List events (the default)
    #[command(alias = "ls")]
    List,

    /// Replace the notes of an event
    Note(NoteArgs),

    /// Add an event
    Add {
        /// Date as YYYY-MM-DD
        date: String,

        /// Title words
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,

        #[arg(long, short = 'd', default_value = "")]
        description: String,

        #[arg(long, short = 'l')]
        location: Option<String>,

        /// Detail line (repeatable)
        #[arg(long = "detail")]
        details: Vec<String>,

        /// Mark as a highlight of the year
        #[arg(long)]
        highlight: bool,
    },

    /// Delete an event
    #[command(alias = "rm")]
    Remove { selector: String },
}

#[derive(Subcommand, Debug)]
pub enum ImprovementsCommands {
    /// List the checklist (the default)
    #[command(alias = "ls")]
    List,

    /// Set the status: pending, in-progress or done
    Status { selector: String, status: String },

    /// Set the target date (YYYY-MM-DD)
    Target { selector: String, date: String },

    /// Replace the notes of an item
    Note(NoteArgs),
}

#[derive(Subcommand, Debug)]
pub enum GlossaryCommands {
    /// List terms (the default)
    #[command(alias = "ls")]
    List {
        /// Match term, reading or description
        #[arg(short, long, default_value = "")]
        search: String,

        /// Only terms in this category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// List the categories in use
    Categories,

    /// Add a term
    Add {
        term: String,

        #[arg(long, short = 'c')]
        category: String,

        #[arg(long, short = 'd', default_value = "")]
        description: String,

        #[arg(long, short = 'r')]
        reading: Option<String>,

        /// Related term (repeatable)
        #[arg(long = "related")]
        related: Vec<String>,
    },

    /// Delete a term (numbers refer to the unfiltered list)
    #[command(alias = "rm")]
    Remove { selector: String },
}

#[derive(Subcommand, Debug)]
pub enum MagazineCommands {
    /// Show the board with page layout (the default)
    Show,

    /// Move a section onto the position of another
    #[command(alias = "mv")]
    Move { selector: String, target: String },

    /// Change a page budget by a delta, e.g. 0.2 or -0.2
    Pages {
        selector: String,
        #[arg(allow_negative_numbers = true)]
        delta: f64,
    },

    /// Set the status: not-started, requesting, in-progress, review or done
    Status { selector: String, status: String },

    /// Replace the notes of a section
    Note(NoteArgs),

    /// Toggle a task of a section (by task number or id)
    Task { selector: String, task: String },
}

#[derive(Args, Debug)]
pub struct NoteArgs {
    pub selector: String,

    /// Note text; leave empty to clear
    #[arg(trailing_var_arg = true)]
    pub text: Vec<String>,
}

impl NoteArgs {
    pub fn text(&self) -> String {
        self.text.join(" ")
    }
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print every resolved value (the default)
    Show,

    /// Print the config file and data directory
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("reunion").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn naked_has_no_command() {
        let cli = parse(&[]);
        assert!(cli.command.is_none());
        assert_eq!(cli.output, OutputMode::Term);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn negative_page_delta() {
        let cli = parse(&["magazine", "pages", "3", "-0.2"]);
        match cli.command {
            Some(Commands::Magazine {
                action: Some(MagazineCommands::Pages { selector, delta }),
            }) => {
                assert_eq!(selector, "3");
                assert_eq!(delta, -0.2);
            }
            other => panic!("unexpected parse: {:?}", other),
        }
    }

    #[test]
    fn note_joins_words() {
        let cli = parse(&["improvements", "note", "2", "ask", "the", "printer"]);
        match cli.command {
            Some(Commands::Improvements {
                action: Some(ImprovementsCommands::Note(args)),
            }) => assert_eq!(args.text(), "ask the printer"),
            other => panic!("unexpected parse: {:?}", other),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = parse(&["glossary", "list", "--output", "json", "-vv", "--data", "/tmp/x"]);
        assert_eq!(cli.output, OutputMode::Json);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.data, Some(PathBuf::from("/tmp/x")));
    }
}
