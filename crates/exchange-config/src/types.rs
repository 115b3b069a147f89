//! Configuration types for the exchange router.

use exchange_types::EdgeKind;
use serde::{Deserialize, Serialize};

/// Complete exchange configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ExchangeConfig {
	/// Routing and path-search settings
	#[serde(default)]
	pub routing: RoutingConfig,
	/// Heuristic cost weights for pre-quote ranking
	#[serde(default)]
	pub cost: CostConfig,
	/// Graph synchronization settings
	#[serde(default)]
	pub sync: SyncConfig,
}

/// Routing and path-search settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RoutingConfig {
	/// Maximum number of candidate paths considered per query
	#[serde(default = "default_max_quote_paths")]
	pub max_quote_paths: usize,
	/// Maximum number of hops in a candidate path
	#[serde(default = "default_max_path_hops")]
	pub max_path_hops: usize,
	/// Maximum number of candidate paths quoting concurrently
	#[serde(default = "default_max_concurrent_quotes")]
	pub max_concurrent_quotes: usize,
	/// Tie-break precedence between equally quoted routes
	#[serde(default)]
	pub tie_break: TieBreak,
}

impl Default for RoutingConfig {
	fn default() -> Self {
		Self {
			max_quote_paths: default_max_quote_paths(),
			max_path_hops: default_max_path_hops(),
			max_concurrent_quotes: default_max_concurrent_quotes(),
			tie_break: TieBreak::default(),
		}
	}
}

/// Which criterion wins when two completed routes quote the same amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
	/// Fewer hops first, then provider registration order
	#[default]
	FewerHopsFirst,
	/// Provider registration order first, then fewer hops
	ProviderPriorityFirst,
}

/// Per-venue-family cost weights. Higher weight means a less attractive
/// edge during pre-quote ranking; the values are unitless.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CostConfig {
	#[serde(default = "default_cross_chain_weight")]
	pub cross_chain_transfer: u64,
	#[serde(default = "default_amm_spot_weight")]
	pub amm_spot: u64,
	#[serde(default = "default_amm_stable_weight")]
	pub amm_stable: u64,
}

impl CostConfig {
	pub fn weight(&self, kind: EdgeKind) -> u64 {
		match kind {
			EdgeKind::CrossChainTransfer => self.cross_chain_transfer,
			EdgeKind::AmmSpot => self.amm_spot,
			EdgeKind::AmmStable => self.amm_stable,
		}
	}
}

impl Default for CostConfig {
	fn default() -> Self {
		Self {
			cross_chain_transfer: default_cross_chain_weight(),
			amm_spot: default_amm_spot_weight(),
			amm_stable: default_amm_stable_weight(),
		}
	}
}

/// Graph synchronization settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SyncConfig {
	/// Interval between periodic full rebuilds, in seconds. Change
	/// notifications trigger rebuilds in between.
	#[serde(default = "default_refresh_interval_secs")]
	pub refresh_interval_secs: u64,
}

impl Default for SyncConfig {
	fn default() -> Self {
		Self {
			refresh_interval_secs: default_refresh_interval_secs(),
		}
	}
}

fn default_max_quote_paths() -> usize {
	4
}

fn default_max_path_hops() -> usize {
	4
}

fn default_max_concurrent_quotes() -> usize {
	8
}

fn default_cross_chain_weight() -> u64 {
	20
}

fn default_amm_spot_weight() -> u64 {
	10
}

fn default_amm_stable_weight() -> u64 {
	8
}

fn default_refresh_interval_secs() -> u64 {
	300
}
