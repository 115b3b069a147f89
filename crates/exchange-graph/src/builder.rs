//! Assembles immutable graph generations from provider edge sets.

use crate::graph::ExchangeGraph;
use exchange_types::{AssetId, Edge, EdgeCapability, EdgeProvider};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::info;

/// Builds a new [`ExchangeGraph`] generation out of the edge capabilities
/// reported by the registered providers.
///
/// The builder owns the generation counter; every build produces a strictly
/// newer generation regardless of whether the edge set actually changed.
pub struct GraphBuilder {
	next_generation: AtomicU64,
}

impl GraphBuilder {
	pub fn new() -> Self {
		Self {
			next_generation: AtomicU64::new(1),
		}
	}

	/// Builds a snapshot from `(provider, capabilities)` pairs in provider
	/// registration order. The position in the list becomes the edge's
	/// provider priority.
	pub fn build(
		&self,
		provider_edges: Vec<(Arc<dyn EdgeProvider>, Vec<EdgeCapability>)>,
	) -> Arc<ExchangeGraph> {
		let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);

		let mut adjacency: HashMap<AssetId, Vec<Edge>> = HashMap::new();

		for (priority, (provider, capabilities)) in provider_edges.into_iter().enumerate() {
			for capability in capabilities {
				let edge = Edge::new(capability, provider.clone(), priority);
				adjacency
					.entry(edge.asset_in.clone())
					.or_default()
					.push(edge);
			}
		}

		// Deterministic sibling order: earlier registered providers first.
		// The per-provider capability order is preserved within a priority.
		for edges in adjacency.values_mut() {
			edges.sort_by_key(|edge| edge.provider_priority);
		}

		let graph = ExchangeGraph::new(generation, adjacency);

		info!(
			generation,
			edges = graph.edge_count(),
			assets = graph.asset_count(),
			"Built exchange graph"
		);

		Arc::new(graph)
	}
}

impl Default for GraphBuilder {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::test_support::{capability, MockProvider};
	use exchange_types::AssetId;

	#[test]
	fn test_generations_increase() {
		let builder = GraphBuilder::new();
		let first = builder.build(Vec::new());
		let second = builder.build(Vec::new());
		assert!(second.generation() > first.generation());
	}

	#[test]
	fn test_priority_follows_registration_order() {
		let builder = GraphBuilder::new();
		let alpha = MockProvider::shared("alpha");
		let beta = MockProvider::shared("beta");

		let graph = builder.build(vec![
			(alpha, vec![capability("a", "b")]),
			(beta, vec![capability("a", "b")]),
		]);

		let edges = graph.edges_from(&AssetId::new("a", 0));
		assert_eq!(edges.len(), 2);
		assert_eq!(edges[0].provider.name(), "alpha");
		assert_eq!(edges[0].provider_priority, 0);
		assert_eq!(edges[1].provider.name(), "beta");
		assert_eq!(edges[1].provider_priority, 1);
	}

	#[test]
	fn test_adjacency_keyed_by_asset_in() {
		let builder = GraphBuilder::new();
		let provider = MockProvider::shared("alpha");

		let graph = builder.build(vec![(
			provider,
			vec![capability("a", "b"), capability("b", "c")],
		)]);

		assert_eq!(graph.edge_count(), 2);
		assert_eq!(graph.edges_from(&AssetId::new("a", 0)).len(), 1);
		assert_eq!(graph.edges_from(&AssetId::new("b", 0)).len(), 1);
		assert!(graph.edges_from(&AssetId::new("c", 0)).is_empty());
	}
}
