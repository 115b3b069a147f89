use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use exchange_config::ConfigLoader;
use exchange_core::ExchangeServiceBuilder;
use exchange_types::{AssetId, Balance, Direction, QuoteArgs};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod provider;

#[derive(Parser)]
#[command(name = "exchange")]
#[command(about = "Multi-venue asset exchange router", long_about = None)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	/// Routing configuration file; defaults apply when absent
	#[arg(short, long, value_name = "FILE")]
	config: Option<PathBuf>,

	/// Venue fixture file with the static rate tables
	#[arg(long, value_name = "FILE", default_value = "config/venues.toml")]
	venues: PathBuf,

	#[arg(long, env = "EXCHANGE_LOG_LEVEL", default_value = "info")]
	log_level: String,
}

#[derive(Subcommand)]
enum Commands {
	/// Quote a conversion between two assets
	Quote {
		/// Input asset as chain:asset
		#[arg(long)]
		from: AssetId,

		/// Output asset as chain:asset
		#[arg(long)]
		to: AssetId,

		/// Amount in minor units (input for sell, desired output for buy)
		#[arg(long)]
		amount: Balance,

		/// sell or buy
		#[arg(long, default_value = "sell")]
		direction: Direction,
	},
	/// Validate the configuration and venue files
	Validate,
}

#[tokio::main]
async fn main() -> Result<()> {
	let cli = Cli::parse();

	setup_tracing(&cli.log_level)?;

	match cli.command {
		Commands::Quote {
			ref from,
			ref to,
			ref amount,
			direction,
		} => {
			let args = QuoteArgs {
				asset_in: from.clone(),
				asset_out: to.clone(),
				amount: amount.clone(),
				direction,
			};
			run_quote(&cli, args).await
		}
		Commands::Validate => validate(&cli),
	}
}

async fn run_quote(cli: &Cli, args: QuoteArgs) -> Result<()> {
	let config = ConfigLoader::from_env_and_file(cli.config.as_deref())
		.context("failed to load configuration")?;

	let providers = provider::load_providers(&cli.venues)?;

	let mut builder = ExchangeServiceBuilder::new().with_config(config);
	for p in providers {
		builder = builder.with_provider(p);
	}
	let service = builder.build();

	// One-shot command: a single sync instead of the resync loop.
	service.sync_now().await;

	let quote = service
		.quote(args.clone())
		.await
		.with_context(|| format!("no quote for {} -> {}", args.asset_in, args.asset_out))?;

	match args.direction {
		Direction::Sell => println!(
			"sell {} {} -> {} {}",
			args.amount, args.asset_in, quote.amount, args.asset_out
		),
		Direction::Buy => println!(
			"buy {} {} for {} {}",
			args.amount, args.asset_out, quote.amount, args.asset_in
		),
	}

	if let Some(route) = &quote.route {
		println!("route ({} hops):", route.hops());
		for item in &route.items {
			println!(
				"  {} -> {} via {} [{}]: {} -> {}",
				item.edge.asset_in,
				item.edge.asset_out,
				item.edge.provider.name(),
				item.edge.kind,
				item.amount_in,
				item.amount_out
			);
		}
	} else {
		println!("route: identity (no conversion needed)");
	}

	if service.can_pay_fee(&args.asset_in) {
		println!("fees payable in {}", args.asset_in);
	}

	Ok(())
}

fn validate(cli: &Cli) -> Result<()> {
	let config = ConfigLoader::from_env_and_file(cli.config.as_deref())
		.context("failed to load configuration")?;

	info!("Configuration is valid");
	info!("Max quote paths: {}", config.routing.max_quote_paths);
	info!("Max path hops: {}", config.routing.max_path_hops);
	info!(
		"Max concurrent quotes: {}",
		config.routing.max_concurrent_quotes
	);
	info!(
		"Refresh interval: {}s",
		config.sync.refresh_interval_secs
	);

	let providers = provider::load_providers(&cli.venues)?;
	info!("Venue fixture is valid");
	for p in &providers {
		info!("  Venue: {}", p.name());
	}

	Ok(())
}

fn setup_tracing(log_level: &str) -> Result<()> {
	let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

	tracing_subscriber::registry()
		.with(env_filter)
		.with(tracing_subscriber::fmt::layer())
		.init();

	Ok(())
}
