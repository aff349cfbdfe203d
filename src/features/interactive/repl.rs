//! Line-oriented interactive session over a [`TaskService`].

use std::io::{BufRead, Write};
use std::str::FromStr;

use colored::Colorize;
use tracing::debug;

use crate::core::{Clock, Priority};
use crate::error::TodoError;
use crate::output::{
    format_parse_error_pretty, format_stats_pretty, format_task_line, format_task_pretty,
    format_tasks_pretty,
};
use crate::features::stats::TaskStats;
use crate::tasks::{StatusFilter, TaskFilter, TaskService, TaskUpdate};

const HELP: &str = "Commands:
  add <text>                 Add a task (e.g. add Buy milk @shopping #high due:tomorrow)
  list [incomplete|complete] List tasks
  list --tag <tag>           List tasks with a tag
  list --priority <level>    List tasks with a priority
  search <keyword>           Search task descriptions
  complete <id>              Mark a task complete
  incomplete <id>            Mark a task incomplete
  delete <id>                Delete a task (asks for confirmation)
  update <id>                Change description and priority
  clear complete             Remove completed tasks (asks for confirmation)
  stats                      Show statistics
  help                       Show this help
  exit, quit                 Leave the session

Task ids can be shortened to any unique prefix.";

/// What `list` should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListScope {
    Status(StatusFilter),
    Tag(String),
    Priority(Priority),
}

impl ListScope {
    fn filter(&self) -> TaskFilter {
        match self {
            Self::Status(status) => TaskFilter::default().with_status(*status),
            Self::Tag(tag) => TaskFilter::default().with_tag(tag.clone()),
            Self::Priority(priority) => TaskFilter::default().with_priority(*priority),
        }
    }

    fn title(&self) -> String {
        match self {
            Self::Status(StatusFilter::All) => "Tasks".to_string(),
            Self::Status(StatusFilter::Incomplete) => "Incomplete tasks".to_string(),
            Self::Status(StatusFilter::Complete) => "Completed tasks".to_string(),
            Self::Tag(tag) => format!("Tasks @{}", tag.to_lowercase()),
            Self::Priority(priority) => format!("Tasks #{priority}"),
        }
    }
}

/// One line of session input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Blank line.
    Empty,
    Add(String),
    List(ListScope),
    Search(String),
    Complete(String),
    Incomplete(String),
    Delete(String),
    Update(String),
    ClearComplete,
    Stats,
    Help,
    Exit,
}

fn required<'a>(arg: Option<&'a str>, what: &str) -> Result<&'a str, String> {
    arg.filter(|a| !a.is_empty())
        .ok_or_else(|| format!("{what} required."))
}

impl FromStr for ReplCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Self::Empty);
        }

        let (command, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(c, r)| (c, r.trim()));
        let first_arg = rest.split_whitespace().next();

        match command.to_lowercase().as_str() {
            "add" => required(Some(rest), "Task description").map(|t| Self::Add(t.to_string())),
            "list" => parse_list_scope(rest).map(Self::List),
            "search" => required(Some(rest), "Search keyword").map(|k| Self::Search(k.to_string())),
            "complete" => required(first_arg, "Task ID").map(|id| Self::Complete(id.to_string())),
            "incomplete" => {
                required(first_arg, "Task ID").map(|id| Self::Incomplete(id.to_string()))
            }
            "delete" => required(first_arg, "Task ID").map(|id| Self::Delete(id.to_string())),
            "update" => required(first_arg, "Task ID").map(|id| Self::Update(id.to_string())),
            "clear" if first_arg.is_some_and(|a| a.eq_ignore_ascii_case("complete")) => {
                Ok(Self::ClearComplete)
            }
            "clear" => Err("Use 'clear complete' to clear completed tasks.".to_string()),
            "stats" => Ok(Self::Stats),
            "help" => Ok(Self::Help),
            "exit" | "quit" => Ok(Self::Exit),
            other => Err(format!(
                "Unknown command: '{other}'. Type 'help' for available commands."
            )),
        }
    }
}

fn parse_list_scope(rest: &str) -> Result<ListScope, String> {
    let mut words = rest.split_whitespace();
    match (words.next(), words.next()) {
        (None, _) | (Some("all"), None) => Ok(ListScope::Status(StatusFilter::All)),
        (Some("incomplete"), None) => Ok(ListScope::Status(StatusFilter::Incomplete)),
        (Some("complete"), None) => Ok(ListScope::Status(StatusFilter::Complete)),
        (Some("--tag"), Some(tag)) => Ok(ListScope::Tag(tag.trim_start_matches('@').to_string())),
        (Some("--priority"), Some(level)) => Priority::parse(level)
            .map(ListScope::Priority)
            .ok_or_else(|| format!("Unknown priority '{level}'. Use high, medium or low.")),
        _ => Err(
            "Usage: list [incomplete|complete] | list --tag <tag> | list --priority <level>"
                .to_string(),
        ),
    }
}

/// Interactive session reading commands from `input` and writing to
/// `output`. Every change goes through the service and is saved at once.
pub struct Repl<'a, R, W, C: Clock> {
    input: R,
    output: W,
    service: &'a mut TaskService<C>,
    running: bool,
}

impl<'a, R: BufRead, W: Write, C: Clock> Repl<'a, R, W, C> {
    pub fn new(input: R, output: W, service: &'a mut TaskService<C>) -> Self {
        Self {
            input,
            output,
            service,
            running: true,
        }
    }

    /// Run until `exit`, `quit` or end of input.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the terminal cannot be read or written.
    /// Command failures are printed and the session continues.
    pub fn run(&mut self) -> Result<(), TodoError> {
        self.banner()?;

        while self.running {
            write!(self.output, "> ")?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                writeln!(self.output)?;
                self.exit()?;
                break;
            };

            match line.parse::<ReplCommand>() {
                Ok(command) => {
                    debug!(?command, "repl command");
                    if let Err(err) = self.execute(command) {
                        self.report(&err)?;
                    }
                }
                Err(message) => writeln!(self.output, "{message}")?,
            }
        }

        Ok(())
    }

    /// Apply one command.
    ///
    /// # Errors
    ///
    /// Returns the failure of the underlying task operation.
    pub fn execute(&mut self, command: ReplCommand) -> Result<(), TodoError> {
        let today = self.service.today();
        match command {
            ReplCommand::Empty => {}
            ReplCommand::Add(text) => {
                let task = self.service.add_from_text(&text)?;
                writeln!(self.output, "{} {}", "✓ Added:".green(), format_task_line(&task, today))?;
            }
            ReplCommand::List(scope) => {
                let tasks = self.service.list().list(&scope.filter(), today);
                writeln!(self.output, "{}", format_tasks_pretty(&tasks, &scope.title(), today))?;
            }
            ReplCommand::Search(keyword) => {
                let tasks = self.service.list().search(&keyword);
                let title = format!("Search: {keyword}");
                writeln!(self.output, "{}", format_tasks_pretty(&tasks, &title, today))?;
            }
            ReplCommand::Complete(id) => {
                let task = self.service.complete(&id)?;
                writeln!(self.output, "{} {}", "✓ Completed:".green(), task.description)?;
            }
            ReplCommand::Incomplete(id) => {
                let task = self.service.incomplete(&id)?;
                writeln!(self.output, "{} {}", "✓ Reopened:".green(), task.description)?;
            }
            ReplCommand::Delete(id) => self.delete(&id)?,
            ReplCommand::Update(id) => self.update(&id)?,
            ReplCommand::ClearComplete => self.clear_complete()?,
            ReplCommand::Stats => {
                let stats = TaskStats::calculate(self.service.list(), today);
                writeln!(self.output, "{}", format_stats_pretty(&stats))?;
            }
            ReplCommand::Help => writeln!(self.output, "{HELP}")?,
            ReplCommand::Exit => self.exit()?,
        }
        Ok(())
    }

    fn delete(&mut self, id: &str) -> Result<(), TodoError> {
        let task = self.service.find(id)?;
        let line = format_task_line(task, self.service.today());
        let full_id = task.id.clone();

        writeln!(self.output, "Delete this task?\n  {line}")?;
        if self.confirm("Type 'yes' to confirm: ")? {
            let task = self.service.delete(&full_id)?;
            writeln!(self.output, "{} {}", "✓ Deleted:".green(), task.description)?;
        } else {
            writeln!(self.output, "Deletion cancelled.")?;
        }
        Ok(())
    }

    fn update(&mut self, id: &str) -> Result<(), TodoError> {
        let task = self.service.find(id)?;
        let full_id = task.id.clone();
        let description = task.description.clone();
        let priority = task
            .priority
            .map_or_else(|| "none".to_string(), |p| p.to_string());

        writeln!(self.output, "Current task:")?;
        write!(self.output, "{}", format_task_pretty(task, self.service.today()))?;
        writeln!(self.output, "Enter new values (press Enter to keep current):")?;

        let new_description = self
            .prompt(&format!("Description [{description}]: "))?
            .unwrap_or_default();
        let new_priority = self
            .prompt(&format!("Priority [{priority}] (high/medium/low): "))?
            .unwrap_or_default();

        let mut update = TaskUpdate::default();
        if !new_description.is_empty() {
            update.description = Some(new_description);
        }
        if !new_priority.is_empty() {
            let level = Priority::parse(&new_priority).ok_or_else(|| {
                TodoError::InvalidInput(format!(
                    "unknown priority '{new_priority}'; use high, medium or low"
                ))
            })?;
            update.priority = Some(level);
        }

        if update.is_empty() {
            writeln!(self.output, "No changes made.")?;
            return Ok(());
        }

        let task = self.service.update(&full_id, update)?;
        writeln!(
            self.output,
            "{} {}",
            "✓ Updated:".green(),
            format_task_line(&task, self.service.today())
        )?;
        Ok(())
    }

    fn clear_complete(&mut self) -> Result<(), TodoError> {
        let count = self.service.list().count_complete();
        if count == 0 {
            writeln!(self.output, "No completed tasks to clear.")?;
            return Ok(());
        }

        if self.confirm(&format!("Clear {count} completed task(s)? (yes/no): "))? {
            let removed = self.service.clear_complete()?;
            writeln!(self.output, "{} {removed} completed task(s)", "✓ Cleared".green())?;
        } else {
            writeln!(self.output, "Cancelled.")?;
        }
        Ok(())
    }

    fn banner(&mut self) -> Result<(), TodoError> {
        let list = self.service.list();
        writeln!(
            self.output,
            "{} {} task(s): {} incomplete, {} complete",
            "smart-todo".bold(),
            list.len(),
            list.count_incomplete(),
            list.count_complete()
        )?;
        writeln!(self.output, "Type 'help' for available commands.")?;
        Ok(())
    }

    fn exit(&mut self) -> Result<(), TodoError> {
        writeln!(self.output, "Goodbye!")?;
        self.running = false;
        Ok(())
    }

    fn report(&mut self, err: &TodoError) -> Result<(), TodoError> {
        let message = match err {
            TodoError::Parse(parse) => format_parse_error_pretty(parse),
            other => other.to_string(),
        };
        writeln!(self.output, "{} {message}", "Error:".red().bold())?;
        Ok(())
    }

    fn read_line(&mut self) -> Result<Option<String>, TodoError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn prompt(&mut self, question: &str) -> Result<Option<String>, TodoError> {
        write!(self.output, "{question}")?;
        self.output.flush()?;
        self.read_line()
    }

    fn confirm(&mut self, question: &str) -> Result<bool, TodoError> {
        Ok(self
            .prompt(question)?
            .is_some_and(|answer| answer.eq_ignore_ascii_case("yes")))
    }
}
