use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::core::Priority;
use crate::tasks::StatusFilter;

#[derive(Parser)]
#[command(name = "todo")]
#[command(about = "A command-line todo list that understands plain-language task entry")]
#[command(long_about = "todo - a smart command-line todo list

Type tasks the way you would say them. Tags, priorities, due dates,
times, assignees and durations are picked out of the text and the rest
becomes the description.

QUICK START:
  todo add \"Call mom due:tomorrow at 3pm @family\"  Add a task
  todo list                                       Show tasks
  todo complete 3f2a                              Complete by id prefix
  todo                                            Start the interactive session

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

For more information on a specific command, run:
  todo <command> --help")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Use 'pretty' for human-readable colored output (default),
    /// or 'json' for machine-readable output suitable for scripting.
    /// When omitted, `general.default_output` from the config file applies.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Task file to read and write
    #[arg(long, env = "SMART_TODO_DATA", global = true, value_name = "PATH")]
    pub data_file: Option<PathBuf>,

    /// Config file to load instead of ~/.smart-todo/config.yaml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Command to run; the interactive session starts when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a task written in plain language
    ///
    /// Markers anywhere in the text become structured fields and are
    /// removed from the description.
    ///
    /// # Examples
    ///
    ///   todo add "Buy milk @shopping #high due:tomorrow"
    ///   todo add "Team meeting at 3pm @work"
    ///   todo add "Review PR assigned:bob@example.com 1h30m"
    ///   todo add "Dentist due:2025-12-01 at 9:30am"
    ///
    /// # Supported Markers
    ///
    ///   Tags:       @tag
    ///   Priority:   #high, #medium, #low
    ///   Due date:   due:YYYY-MM-DD, due:today, due:tomorrow, due:next week, due:3 days
    ///   Time:       at 3pm, at 9:30am, by 15:00
    ///   Assignee:   assigned:user@example.com
    ///   Duration:   2h, 45m, 1h30m
    #[command(alias = "a")]
    Add(AddArgs),

    /// List tasks
    ///
    /// # Examples
    ///
    ///   todo list
    ///   todo list --status complete
    ///   todo list --tag work --priority high
    ///   todo list --overdue
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show every field of one task
    Show {
        /// Task id or unique id prefix
        id: String,
    },

    /// Search task descriptions (case-insensitive)
    Search {
        /// Keyword to look for
        #[arg(required = true, num_args = 1..)]
        keyword: Vec<String>,
    },

    /// Mark a task complete
    #[command(alias = "done")]
    Complete {
        /// Task id or unique id prefix
        id: String,
    },

    /// Mark a task incomplete again
    #[command(alias = "undo")]
    Incomplete {
        /// Task id or unique id prefix
        id: String,
    },

    /// Delete a task
    #[command(alias = "rm")]
    Delete {
        /// Task id or unique id prefix
        id: String,
    },

    /// Change fields of an existing task
    ///
    /// # Examples
    ///
    ///   todo update 3f2a --priority low
    ///   todo update 3f2a --add-tag home --remove-tag work
    ///   todo update 3f2a --due "next week"
    Update(UpdateArgs),

    /// Remove completed tasks (or every task with --all)
    Clear {
        /// Remove every task, not only completed ones
        #[arg(long)]
        all: bool,
    },

    /// Show task statistics
    Stats,

    /// Copy the task file to a backup
    Backup {
        /// Destination (defaults to a timestamped file in the backups directory)
        path: Option<PathBuf>,
    },

    /// Replace the task list with the contents of a backup
    Restore {
        /// Backup file to restore
        path: PathBuf,
    },

    /// Generate shell completion scripts
    ///
    /// # Examples
    ///
    ///   todo completions bash > ~/.local/share/bash-completion/completions/todo
    ///   todo completions zsh --install
    Completions {
        /// Shell: bash, zsh, fish, powershell, elvish
        shell: String,

        /// Print install instructions instead of the script
        #[arg(long)]
        install: bool,
    },

    /// Start the interactive session
    Repl,
}

#[derive(Args)]
pub struct AddArgs {
    /// The task in plain language (words are joined with spaces)
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,

    /// Only parse and show the result, don't store a task
    #[arg(long)]
    pub parse_only: bool,

    /// Reference date for relative dates (YYYY-MM-DD, defaults to today)
    #[arg(long, value_name = "DATE")]
    pub today: Option<NaiveDate>,
}

impl AddArgs {
    /// The words of the task joined back into one line.
    #[must_use]
    pub fn joined(&self) -> String {
        self.text.join(" ")
    }
}

#[derive(Args, Default)]
pub struct ListArgs {
    /// Which tasks to show
    #[arg(long, value_enum, default_value = "all")]
    pub status: StatusFilter,

    /// Only tasks carrying this tag
    #[arg(long)]
    pub tag: Option<String>,

    /// Only tasks with this priority
    #[arg(long, value_enum)]
    pub priority: Option<Priority>,

    /// Only incomplete tasks whose due date has passed
    #[arg(long)]
    pub overdue: bool,
}

#[derive(Args)]
pub struct UpdateArgs {
    /// Task id or unique id prefix
    pub id: String,

    /// New description
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// New priority
    #[arg(long, short = 'p', value_enum)]
    pub priority: Option<Priority>,

    /// Tag to add (repeatable)
    #[arg(long = "add-tag", value_name = "TAG")]
    pub add_tags: Vec<String>,

    /// Tag to remove (repeatable)
    #[arg(long = "remove-tag", value_name = "TAG")]
    pub remove_tags: Vec<String>,

    /// New due date (YYYY-MM-DD, today, tomorrow, next week, next month, <n> days)
    #[arg(long, value_name = "EXPR")]
    pub due: Option<String>,

    /// New assignee email
    #[arg(long, value_name = "EMAIL")]
    pub assign: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_no_command_is_repl() {
        let cli = Cli::try_parse_from(["todo"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.output.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_cli_output_format_json() {
        let cli = Cli::try_parse_from(["todo", "--output", "json", "list"]).unwrap();
        assert_eq!(cli.output, Some(OutputFormat::Json));
    }

    #[test]
    fn test_cli_output_format_short_after_subcommand() {
        let cli = Cli::try_parse_from(["todo", "list", "-o", "json"]).unwrap();
        assert_eq!(cli.output, Some(OutputFormat::Json));
    }

    #[test]
    fn test_cli_verbose_count() {
        let cli = Cli::try_parse_from(["todo", "-vv", "stats"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_cli_data_file() {
        let cli = Cli::try_parse_from(["todo", "--data-file", "/tmp/t.json", "list"]).unwrap();
        assert_eq!(cli.data_file, Some(PathBuf::from("/tmp/t.json")));
    }

    #[test]
    fn test_cli_add_joins_words() {
        let cli = Cli::try_parse_from(["todo", "add", "Buy", "milk", "@shopping"]).unwrap();
        match cli.command {
            Some(Commands::Add(args)) => {
                assert_eq!(args.joined(), "Buy milk @shopping");
                assert!(!args.parse_only);
                assert!(args.today.is_none());
            }
            _ => panic!("Expected Add command"),
        }
    }

    #[test]
    fn test_cli_add_parse_only_with_today() {
        let cli = Cli::try_parse_from([
            "todo",
            "add",
            "--parse-only",
            "--today",
            "2025-10-17",
            "Call mom tomorrow",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Add(args)) => {
                assert!(args.parse_only);
                assert_eq!(args.today, NaiveDate::from_ymd_opt(2025, 10, 17));
            }
            _ => panic!("Expected Add command"),
        }
    }

    #[test]
    fn test_cli_add_requires_text() {
        assert!(Cli::try_parse_from(["todo", "add"]).is_err());
    }

    #[test]
    fn test_cli_add_rejects_bad_today() {
        assert!(Cli::try_parse_from(["todo", "add", "--today", "tomorrow", "x"]).is_err());
    }

    #[test]
    fn test_cli_list_filters() {
        let cli = Cli::try_parse_from([
            "todo",
            "list",
            "--status",
            "incomplete",
            "--tag",
            "work",
            "--priority",
            "high",
            "--overdue",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::List(args)) => {
                assert_eq!(args.status, StatusFilter::Incomplete);
                assert_eq!(args.tag.as_deref(), Some("work"));
                assert_eq!(args.priority, Some(Priority::High));
                assert!(args.overdue);
            }
            _ => panic!("Expected List command"),
        }
    }

    #[test]
    fn test_cli_list_defaults_to_all() {
        let cli = Cli::try_parse_from(["todo", "ls"]).unwrap();
        match cli.command {
            Some(Commands::List(args)) => assert_eq!(args.status, StatusFilter::All),
            _ => panic!("Expected List command"),
        }
    }

    #[test]
    fn test_cli_complete_alias() {
        let cli = Cli::try_parse_from(["todo", "done", "abc"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Complete { id }) if id == "abc"));
    }

    #[test]
    fn test_cli_update_repeated_tags() {
        let cli = Cli::try_parse_from([
            "todo",
            "update",
            "abc",
            "--add-tag",
            "home",
            "--add-tag",
            "errands",
            "--remove-tag",
            "work",
            "--due",
            "next week",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Update(args)) => {
                assert_eq!(args.id, "abc");
                assert_eq!(args.add_tags, vec!["home", "errands"]);
                assert_eq!(args.remove_tags, vec!["work"]);
                assert_eq!(args.due.as_deref(), Some("next week"));
            }
            _ => panic!("Expected Update command"),
        }
    }

    #[test]
    fn test_cli_clear_all() {
        let cli = Cli::try_parse_from(["todo", "clear", "--all"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Clear { all: true })));
    }

    #[test]
    fn test_cli_backup_optional_path() {
        let cli = Cli::try_parse_from(["todo", "backup"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Backup { path: None })));
    }

    #[test]
    fn test_cli_completions() {
        let cli = Cli::try_parse_from(["todo", "completions", "zsh", "--install"]).unwrap();
        match cli.command {
            Some(Commands::Completions { shell, install }) => {
                assert_eq!(shell, "zsh");
                assert!(install);
            }
            _ => panic!("Expected Completions command"),
        }
    }
}
