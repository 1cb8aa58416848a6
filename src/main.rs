use std::path::Path;

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use log::info;

use clash_converter::interfaces::{converter, ConverterConfigBuilder};
use clash_converter::models::{GroupCategory, Preset};
use clash_converter::parser::NativeFidelity;
use clash_converter::settings::Settings;
use clash_converter::utils::file_write;

/// Convert a proxy subscription into a rule based Clash configuration
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Subscription URL
    #[arg(required_unless_present_any = ["info", "list_groups"])]
    url: Option<String>,

    /// Output file path
    #[arg(short, long, value_name = "FILE", default_value = "clash_config.yaml")]
    output: String,

    /// Include every policy group category
    #[arg(long)]
    all: bool,

    /// Categories to include, comma separated
    #[arg(long, value_enum, value_delimiter = ',', value_name = "GROUP")]
    include: Vec<GroupCategory>,

    /// Start from a predefined set of categories
    #[arg(long, value_enum)]
    preset: Option<Preset>,

    /// Show ruleset information and exit
    #[arg(long)]
    info: bool,

    /// List the available categories and exit
    #[arg(long)]
    list_groups: bool,

    /// Ignore the ruleset cache and fetch everything again
    #[arg(long)]
    no_cache: bool,

    /// Reject links whose optional fields fail to decode
    #[arg(long)]
    strict: bool,

    /// Reference rulesets through rule-providers instead of inlining them
    #[arg(long)]
    rule_providers: bool,

    /// How much of a native Clash subscription to import
    #[arg(long, value_enum)]
    native_fidelity: Option<NativeFidelity>,

    /// Path to the settings file (.yaml, .yml or .toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn categories(&self) -> Vec<GroupCategory> {
        if self.all {
            return GroupCategory::ALL.to_vec();
        }
        let mut categories: Vec<GroupCategory> = self
            .preset
            .map(|preset| preset.categories().to_vec())
            .unwrap_or_default();
        for &category in &self.include {
            if !categories.contains(&category) {
                categories.push(category);
            }
        }
        categories
    }
}

fn show_ruleset_info(settings: &Settings) {
    let total: usize = GroupCategory::ALL.iter().map(|c| c.rulesets().len()).sum();
    println!("Ruleset source: {}", settings.ruleset_base_url);
    println!("Total rulesets: {}", total);
    println!("Cache expiry: {} hours", settings.cache_expiry / 3600);
    println!();
    println!("Rulesets per category:");
    for category in GroupCategory::ALL {
        println!("  {:12} {}", category.as_str(), category.rulesets().len());
    }
}

fn show_available_groups() {
    println!("Available categories:");
    for category in GroupCategory::ALL {
        println!(
            "  {:12} {} - {}",
            category.as_str(),
            category.group_name(),
            category.description()
        );
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "info" };
    env_logger::init_from_env(Env::default().default_filter_or(default_filter));

    let mut settings = match &args.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("Failed to load settings from {}", path))?,
        None => Settings::default(),
    };
    settings.strict_parse |= args.strict;
    settings.rule_providers |= args.rule_providers;
    if let Some(fidelity) = args.native_fidelity {
        settings.native_fidelity = fidelity;
    }

    if args.list_groups {
        show_available_groups();
        return Ok(());
    }
    if args.info {
        show_ruleset_info(&settings);
        return Ok(());
    }

    let url = args
        .url
        .as_deref()
        .context("A subscription URL is required")?;
    info!("Subscription: {}", url);
    info!("Output file: {}", args.output);

    let config = ConverterConfigBuilder::new()
        .url(url)
        .categories(args.categories())
        .use_cache(!args.no_cache)
        .settings(settings)
        .build()?;
    let result = converter(config).await?;

    file_write(Path::new(&args.output), &result.content)
        .with_context(|| format!("Failed to write {}", args.output))?;

    info!("Configuration saved to {}", args.output);
    info!(
        "{} proxies, {} groups, {} rule providers, {} rules",
        result.stats.proxies,
        result.stats.proxy_groups,
        result.stats.rule_providers,
        result.stats.rules
    );
    Ok(())
}
