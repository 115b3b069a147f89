//! Aggregated fee-payment support across providers.

use arc_swap::ArcSwap;
use exchange_types::AssetId;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Merges the per-provider "can this asset pay fees" predicates into one.
///
/// The aggregate is the logical OR across all registered providers,
/// recomputed on every provider sync and swapped in atomically: readers
/// never observe a partially updated set.
pub struct FeeSupportAggregator {
	assets: ArcSwap<HashSet<AssetId>>,
}

impl FeeSupportAggregator {
	pub fn new() -> Self {
		Self {
			assets: ArcSwap::from_pointee(HashSet::new()),
		}
	}

	/// Replaces the aggregate with the union of the given per-provider sets.
	pub fn install(&self, provider_sets: Vec<HashSet<AssetId>>) {
		let merged: HashSet<AssetId> = provider_sets.into_iter().flatten().collect();
		debug!(assets = merged.len(), "Recomputed fee support aggregate");
		self.assets.store(Arc::new(merged));
	}

	/// Whether at least one provider supports paying fees in this asset.
	pub fn can_pay_fee(&self, asset: &AssetId) -> bool {
		self.assets.load().contains(asset)
	}
}

impl Default for FeeSupportAggregator {
	fn default() -> Self {
		Self::new()
	}
}
