pub mod aggregate;
pub mod cache;
pub mod clean;
pub mod cli;
pub mod config;
pub mod data;
pub mod derive;
pub mod detail;
pub mod error;
pub mod filter;
pub mod format;
pub mod io_utils;
pub mod loader;
pub mod normalize;
pub mod pipeline;
pub mod records;
pub mod schema;
pub mod summary;
pub mod table;
pub mod transform;

use std::{env, sync::Arc, sync::OnceLock};

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, info};

use crate::{
    cache::CleanedTableCache,
    cli::{Cli, Commands, InputArgs},
    config::DashboardConfig,
    loader::LoadOptions,
    pipeline::{CleanedDataset, CleaningPipeline},
};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("sales_dashboard", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Summary(args) => summary::execute(&args),
        Commands::Detail(args) => detail::execute(&args),
        Commands::Clean(args) => clean::execute(&args),
        Commands::InitConfig(args) => handle_init_config(&args),
    }
}

fn handle_init_config(args: &cli::InitConfigArgs) -> Result<()> {
    let config = DashboardConfig::default();
    config
        .save(&args.output)
        .with_context(|| format!("Writing configuration to {:?}", args.output))?;
    info!(
        "Default configuration with {} label rule(s) written to {:?}",
        config.label_rules.len(),
        args.output
    );
    Ok(())
}

pub(crate) fn load_dataset(args: &InputArgs) -> Result<Arc<CleanedDataset>> {
    let config = DashboardConfig::load_or_default(args.config.as_deref())?;
    let options = LoadOptions {
        delimiter: args.delimiter,
        encoding: io_utils::resolve_encoding(args.input_encoding.as_deref())?,
    };
    let pipeline = CleaningPipeline::new(&config, options)?;
    let mut cache = CleanedTableCache::new(pipeline);
    let dataset = cache
        .get_or_load(&args.input)
        .with_context(|| format!("Loading sales records from {:?}", args.input))?;
    Ok(dataset)
}
