use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about = "Clean sales records and summarize them for analysts", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show headline metrics and rollups, optionally for selected products
    Summary(SummaryArgs),
    /// Search product labels and list the transactions of the selection
    Detail(DetailArgs),
    /// Write the cleaned table as CSV
    Clean(CleanArgs),
    /// Write the default column and rule configuration to a YAML file
    InitConfig(InitConfigArgs),
}

#[derive(Debug, Args)]
pub struct InputArgs {
    /// Sales record file to load
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// YAML file overriding column names and label rules
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Field delimiter (supports ',', 'tab', ';', '|'); disables the ';' fallback
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

#[derive(Debug, Args)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Restrict the dashboard to this product label (repeatable; none = all)
    #[arg(short = 'p', long = "product", action = clap::ArgAction::Append)]
    pub products: Vec<String>,
    /// Emit JSON instead of text tables
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct DetailArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Case-insensitive substring matched against product labels
    #[arg(short, long)]
    pub search: Option<String>,
    /// Product labels to list (repeatable); defaults depend on --search
    #[arg(long = "select", action = clap::ArgAction::Append)]
    pub select: Vec<String>,
    /// Emit JSON instead of text tables
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct CleanArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Output CSV file (stdout if omitted or '-')
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// Delimiter to use for output
    #[arg(long = "output-delimiter", value_parser = parse_delimiter, default_value = ",")]
    pub output_delimiter: u8,
}

#[derive(Debug, Args)]
pub struct InitConfigArgs {
    /// Destination YAML file
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}
