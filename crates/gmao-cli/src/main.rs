//! GMAO command-line tool.

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

use gmao_cli::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use gmao_cli::commands::{
    run_dashboard, run_export, run_import, run_intervention, run_machine, run_part, run_reset,
    run_supplier,
};
use gmao_cli::logging::{LogConfig, LogFormat, init_logging};
use gmao_cli::settings::{DATA_DIR_ENV, Settings};
use gmao_store::{FileBackend, Store, StoreError};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(&cli) {
        Ok(()) => 0,
        Err(error) => {
            report(&error);
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let settings = Settings::load(cli.config.as_deref());
    let data_dir = settings.resolve_data_dir(
        cli.data_dir.as_deref(),
        std::env::var_os(DATA_DIR_ENV).map(PathBuf::from),
    );
    tracing::debug!(data_dir = %data_dir.display(), "opening store");
    let mut store = Store::open(FileBackend::new(data_dir));

    match &cli.command {
        Command::Supplier(command) => run_supplier(&mut store, command),
        Command::Machine(command) => run_machine(&mut store, command),
        Command::Part(command) => run_part(&mut store, command),
        Command::Intervention(command) => run_intervention(&mut store, command),
        Command::Dashboard(args) => run_dashboard(&store, args, &settings.dashboard),
        Command::Export(args) => run_export(&store, args).map(|_| ()),
        Command::Import(args) => run_import(&mut store, args),
        Command::Reset(args) => run_reset(&mut store, args),
    }
}

fn report(error: &anyhow::Error) {
    match error.downcast_ref::<StoreError>() {
        Some(store_error) => {
            eprintln!("error: {}", store_error.user_message());
            if let Some(suggestion) = store_error.suggestion() {
                eprintln!("hint: {suggestion}");
            }
        }
        None => eprintln!("error: {error:#}"),
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
