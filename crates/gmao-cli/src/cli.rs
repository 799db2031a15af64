//! CLI argument definitions for the GMAO tool.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "gmao",
    version,
    about = "GMAO - Local maintenance management (machines, parts, interventions, suppliers)",
    long_about = "Manage machines, spare parts, interventions and suppliers.\n\n\
                  All data is kept in a single JSON document in the data directory,\n\
                  rewritten after every change. Use export/import to move it around."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Settings file (default: platform config directory).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the data document (overrides GMAO_DATA_DIR and settings).
    #[arg(long = "data-dir", value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Manage suppliers.
    #[command(subcommand)]
    Supplier(SupplierCommand),

    /// Manage machines.
    #[command(subcommand)]
    Machine(MachineCommand),

    /// Manage spare parts.
    #[command(subcommand)]
    Part(PartCommand),

    /// Manage interventions (work orders).
    #[command(subcommand)]
    Intervention(InterventionCommand),

    /// Show counts, upcoming interventions and stock alerts.
    Dashboard(DashboardArgs),

    /// Export the whole document as pretty-printed JSON.
    Export(ExportArgs),

    /// Replace all data with an exported JSON file.
    Import(ImportArgs),

    /// Erase all stored data.
    Reset(ResetArgs),
}

#[derive(Subcommand)]
pub enum SupplierCommand {
    /// Create a supplier.
    Add(SupplierFields),
    /// Change fields of an existing supplier.
    Edit {
        #[arg(value_name = "ID")]
        id: String,
        #[command(flatten)]
        fields: SupplierFields,
    },
    /// List suppliers sorted by name.
    List(ListArgs),
    /// Print supplier ids and names, for use with `--supplier`.
    Choices,
    /// Delete a supplier not used by any machine or part.
    Delete(DeleteArgs),
}

#[derive(Args, Default)]
pub struct SupplierFields {
    /// Supplier name (required).
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub contact: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub website: Option<String>,
}

#[derive(Subcommand)]
pub enum MachineCommand {
    /// Create a machine.
    Add(MachineFields),
    /// Change fields of an existing machine.
    Edit {
        #[arg(value_name = "ID")]
        id: String,
        #[command(flatten)]
        fields: MachineFields,
    },
    /// List machines sorted by name.
    List(ListArgs),
    /// Print machine ids and labels, for use with `--machine`.
    Choices,
    /// Delete a machine without interventions.
    Delete(DeleteArgs),
}

#[derive(Args, Default)]
pub struct MachineFields {
    /// Machine name (required).
    #[arg(long)]
    pub name: Option<String>,
    /// Asset tag or serial number (required).
    #[arg(long)]
    pub ident: Option<String>,
    /// Purchase cost in euros.
    #[arg(long)]
    pub cost: Option<f64>,
    /// Supplier id ("" clears it).
    #[arg(long, value_name = "SUPPLIER_ID")]
    pub supplier: Option<String>,
    /// State: OK, Maintenance, "En panne" (down), "Hors service" (retired), or any label.
    #[arg(long)]
    pub state: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Subcommand)]
pub enum PartCommand {
    /// Create a part.
    Add(PartFields),
    /// Change fields of an existing part.
    Edit {
        #[arg(value_name = "ID")]
        id: String,
        #[command(flatten)]
        fields: PartFields,
    },
    /// List parts sorted by name.
    List(ListArgs),
    /// Delete a part.
    Delete(DeleteArgs),
}

#[derive(Args, Default)]
pub struct PartFields {
    /// Part name (required).
    #[arg(long)]
    pub name: Option<String>,
    /// Quantity in stock.
    #[arg(long, allow_negative_numbers = true)]
    pub qty: Option<f64>,
    /// Unit cost in euros.
    #[arg(long, allow_negative_numbers = true)]
    pub cost: Option<f64>,
    /// Supplier id ("" clears it).
    #[arg(long, value_name = "SUPPLIER_ID")]
    pub supplier: Option<String>,
    /// Storage location.
    #[arg(long)]
    pub location: Option<String>,
}

#[derive(Subcommand)]
pub enum InterventionCommand {
    /// Create an intervention.
    Add(InterventionFields),
    /// Change fields of an existing intervention.
    Edit {
        #[arg(value_name = "ID")]
        id: String,
        #[command(flatten)]
        fields: InterventionFields,
    },
    /// List interventions sorted by date.
    List(ListArgs),
    /// Delete an intervention.
    Delete(DeleteArgs),
}

#[derive(Args, Default)]
pub struct InterventionFields {
    /// Date, YYYY-MM-DD (required).
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub date: Option<NaiveDate>,
    /// Machine id ("" clears it).
    #[arg(long, value_name = "MACHINE_ID")]
    pub machine: Option<String>,
    /// Status: "Planifiée" (planned), "En cours", "Terminée" (done), "Annulée", or any label.
    #[arg(long)]
    pub status: Option<String>,
    /// Reason for the intervention (required).
    #[arg(long)]
    pub motif: Option<String>,
    /// Technician in charge.
    #[arg(long)]
    pub tech: Option<String>,
    /// Duration in minutes.
    #[arg(long = "duration", value_name = "MINUTES")]
    pub duration_min: Option<f64>,
}

#[derive(Args, Default)]
pub struct ListArgs {
    /// Case-insensitive text filter.
    #[arg(long, short = 's', default_value = "")]
    pub search: String,
}

#[derive(Args)]
pub struct DeleteArgs {
    #[arg(value_name = "ID")]
    pub id: String,
}

#[derive(Args, Default)]
pub struct DashboardArgs {
    /// Stock alert threshold (default from settings).
    #[arg(long, allow_negative_numbers = true)]
    pub threshold: Option<f64>,

    /// Reference day for upcoming interventions (default: today).
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub today: Option<NaiveDate>,
}

#[derive(Args, Default)]
pub struct ExportArgs {
    /// Output file or directory (default: gmao_export_<date>.json in the current directory).
    #[arg(long = "output", short = 'o', value_name = "PATH", conflicts_with = "stdout")]
    pub output: Option<PathBuf>,

    /// Print the document to stdout instead of writing a file.
    #[arg(long)]
    pub stdout: bool,
}

#[derive(Args)]
pub struct ImportArgs {
    /// JSON file produced by `gmao export`.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

#[derive(Args, Default)]
pub struct ResetArgs {
    /// Confirm that all local data should be erased.
    #[arg(long)]
    pub yes: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
