use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use smart_todo::cli::args::{Cli, OutputFormat};
use smart_todo::cli::commands;
use smart_todo::config::{Config, Paths};
use smart_todo::core::SystemClock;
use smart_todo::error::TodoError;
use smart_todo::logging;
use smart_todo::storage::JsonStore;
use smart_todo::tasks::TaskService;

fn main() {
    let cli = Cli::parse();
    let requested = cli.output;

    if let Err(e) = run(cli) {
        let format = requested.unwrap_or_default();
        let message = e.downcast_ref::<TodoError>().map_or_else(
            || commands::render_error(&TodoError::InvalidInput(format!("{e:#}")), format),
            |err| commands::render_error(err, format),
        );
        eprintln!("{message}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let paths = Paths::default();
    let config_file = cli.config.clone().unwrap_or_else(|| paths.config_file.clone());
    let config = Config::load_from_path(&config_file)?;

    config.general.color.apply();
    logging::init(cli.verbose, &config.logging.level);

    let format: OutputFormat = cli.output.unwrap_or(config.general.default_output);
    let data_file = config.data_file(cli.data_file.as_deref(), &paths);
    debug!(config = %config_file.display(), data = %data_file.display(), "resolved paths");

    paths
        .ensure_dirs()
        .context("preparing the smart-todo directory")?;
    let store = JsonStore::new(&data_file).with_backup_dir(&paths.backups);
    let mut service = TaskService::open(store, SystemClock)?
        .with_backup_on_clear(config.storage.backup_on_clear);

    let output = commands::execute(&mut service, cli.command, format)?;
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
