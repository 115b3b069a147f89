//! Heuristic path-cost estimation for pre-quote ranking.

use exchange_config::CostConfig;
use exchange_types::{Path, PathCost};

/// Assigns a cheap, non-exact scalar cost to a candidate path without
/// invoking real quoting. Used purely to spend the path budget on the most
/// promising candidates; never used for final route selection.
pub trait PathCostEstimating: Send + Sync {
	fn estimate(&self, path: &Path) -> PathCost;
}

/// Default estimator: the sum of per-venue-family weights over the path's
/// edges. Monotonic in both path length and per-edge weight, so swapping an
/// edge for a strictly worse one of the same family never lowers the cost.
pub struct EdgeKindCostEstimator {
	cost: CostConfig,
}

impl EdgeKindCostEstimator {
	pub fn new(cost: CostConfig) -> Self {
		Self { cost }
	}
}

impl PathCostEstimating for EdgeKindCostEstimator {
	fn estimate(&self, path: &Path) -> PathCost {
		path.iter().fold(PathCost::default(), |acc, edge| {
			acc.saturating_add(PathCost(self.cost.weight(edge.kind)))
		})
	}
}

/// Stable sort of candidate paths by (estimated cost, hop count). Paths the
/// estimator cannot tell apart keep their enumeration order, so the final
/// vector's index doubles as the pre-quote rank.
pub fn rank_paths(paths: &mut [Path], estimator: &dyn PathCostEstimating) {
	paths.sort_by_key(|path| (estimator.estimate(path), path.len()));
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::test_support::MockProvider;
	use exchange_types::{AssetId, Edge, EdgeCapability, EdgeKind};

	fn edge_of_kind(from: &str, to: &str, kind: EdgeKind) -> Edge {
		Edge::new(
			EdgeCapability {
				asset_in: AssetId::new(from, 0),
				asset_out: AssetId::new(to, 0),
				kind,
			},
			MockProvider::shared("mock"),
			0,
		)
	}

	#[test]
	fn test_cost_grows_with_length() {
		let estimator = EdgeKindCostEstimator::new(CostConfig::default());

		let short = vec![edge_of_kind("a", "b", EdgeKind::AmmSpot)];
		let long = vec![
			edge_of_kind("a", "b", EdgeKind::AmmSpot),
			edge_of_kind("b", "c", EdgeKind::AmmSpot),
		];

		assert!(estimator.estimate(&short) < estimator.estimate(&long));
	}

	#[test]
	fn test_cross_chain_ranked_worse_than_amm() {
		let estimator = EdgeKindCostEstimator::new(CostConfig::default());

		let amm = vec![edge_of_kind("a", "b", EdgeKind::AmmStable)];
		let transfer = vec![edge_of_kind("a", "b", EdgeKind::CrossChainTransfer)];

		assert!(estimator.estimate(&amm) < estimator.estimate(&transfer));
	}

	#[test]
	fn test_rank_paths_prefers_cheaper() {
		let estimator = EdgeKindCostEstimator::new(CostConfig::default());

		let mut paths = vec![
			vec![
				edge_of_kind("a", "b", EdgeKind::CrossChainTransfer),
				edge_of_kind("b", "c", EdgeKind::AmmSpot),
			],
			vec![edge_of_kind("a", "c", EdgeKind::AmmStable)],
		];

		rank_paths(&mut paths, &estimator);

		assert_eq!(paths[0].len(), 1);
		assert_eq!(paths[0][0].kind, EdgeKind::AmmStable);
	}

	#[test]
	fn test_rank_is_stable_on_ties() {
		let estimator = EdgeKindCostEstimator::new(CostConfig::default());

		let first = vec![edge_of_kind("a", "b", EdgeKind::AmmSpot)];
		let second = vec![edge_of_kind("a", "c", EdgeKind::AmmSpot)];
		let mut paths = vec![first.clone(), second];

		rank_paths(&mut paths, &estimator);

		assert_eq!(paths[0][0].asset_out, first[0].asset_out);
	}
}
