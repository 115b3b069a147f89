//! Directed exchange edges and paths.

use crate::common::AssetId;
use crate::provider::EdgeProvider;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Venue family servicing an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
	/// Transfer of the same asset between chains
	CrossChainTransfer,
	/// Constant-product style AMM pool
	AmmSpot,
	/// Stable-curve AMM pool
	AmmStable,
}

impl fmt::Display for EdgeKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			EdgeKind::CrossChainTransfer => write!(f, "cross_chain_transfer"),
			EdgeKind::AmmSpot => write!(f, "amm_spot"),
			EdgeKind::AmmStable => write!(f, "amm_stable"),
		}
	}
}

/// A directed conversion capability advertised by a provider, before it is
/// bound to the provider handle in a graph generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeCapability {
	pub asset_in: AssetId,
	pub asset_out: AssetId,
	pub kind: EdgeKind,
}

/// A directed, immutable conversion capability bound to the provider that
/// services it. Edges belong to exactly one graph generation and are never
/// mutated after creation.
#[derive(Clone)]
pub struct Edge {
	pub asset_in: AssetId,
	pub asset_out: AssetId,
	pub kind: EdgeKind,
	/// Provider that advertised and quotes this edge
	pub provider: Arc<dyn EdgeProvider>,
	/// Registration index of the provider; used only for tie-breaking
	pub provider_priority: usize,
}

impl Edge {
	pub fn new(
		capability: EdgeCapability,
		provider: Arc<dyn EdgeProvider>,
		provider_priority: usize,
	) -> Self {
		Self {
			asset_in: capability.asset_in,
			asset_out: capability.asset_out,
			kind: capability.kind,
			provider,
			provider_priority,
		}
	}
}

impl fmt::Debug for Edge {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Edge")
			.field("asset_in", &self.asset_in)
			.field("asset_out", &self.asset_out)
			.field("kind", &self.kind)
			.field("provider", &self.provider.name())
			.field("provider_priority", &self.provider_priority)
			.finish()
	}
}

/// An ordered, non-empty chain of edges where every edge's output asset is
/// the next edge's input asset. Computed fresh per query, never persisted.
pub type Path = Vec<Edge>;
