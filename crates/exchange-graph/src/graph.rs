//! Immutable graph snapshot and bounded path enumeration.

use exchange_types::{AssetId, Edge, Path};
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::debug;

/// One immutable generation of the full edge set, with an adjacency index
/// keyed by input asset.
///
/// A new generation is built and installed wholesale whenever any provider's
/// advertised edge set changes; readers that captured an older generation
/// keep using it unaffected, so no locking is needed on the read side.
pub struct ExchangeGraph {
	generation: u64,
	adjacency: HashMap<AssetId, Vec<Edge>>,
	edge_count: usize,
}

impl ExchangeGraph {
	pub(crate) fn new(generation: u64, adjacency: HashMap<AssetId, Vec<Edge>>) -> Self {
		let edge_count = adjacency.values().map(Vec::len).sum();
		Self {
			generation,
			adjacency,
			edge_count,
		}
	}

	pub fn generation(&self) -> u64 {
		self.generation
	}

	pub fn edge_count(&self) -> usize {
		self.edge_count
	}

	pub fn asset_count(&self) -> usize {
		self.adjacency.len()
	}

	/// Edges leaving the given asset, in provider priority order.
	pub fn edges_from(&self, asset: &AssetId) -> &[Edge] {
		self.adjacency
			.get(asset)
			.map(Vec::as_slice)
			.unwrap_or_default()
	}

	/// Enumerates up to `max_top_paths` simple paths from `from` to `to`,
	/// visiting candidates in increasing hop order and never exceeding
	/// `max_path_hops` hops.
	///
	/// Guarantees:
	/// - no returned path repeats an asset, for any graph topology;
	/// - a direct edge is always among the candidates when one exists;
	/// - `from == to` and disconnected pairs both yield an empty list,
	///   which is a legitimate outcome, not an error.
	pub fn fetch_paths(
		&self,
		from: &AssetId,
		to: &AssetId,
		max_top_paths: usize,
		max_path_hops: usize,
	) -> Vec<Path> {
		if from == to || max_top_paths == 0 || max_path_hops == 0 {
			return Vec::new();
		}

		let mut found: Vec<Path> = Vec::new();

		// Breadth-first over partial paths: shorter candidates surface
		// before longer ones, and sibling expansion follows the adjacency
		// order, which is provider priority order.
		let mut queue: VecDeque<(AssetId, Path)> = VecDeque::new();
		queue.push_back((from.clone(), Vec::new()));

		while let Some((cursor, path)) = queue.pop_front() {
			if found.len() >= max_top_paths {
				break;
			}

			for edge in self.edges_from(&cursor) {
				if found.len() >= max_top_paths {
					break;
				}

				if Self::visits(&path, from, &edge.asset_out) {
					continue;
				}

				let mut extended = path.clone();
				extended.push(edge.clone());

				if edge.asset_out == *to {
					found.push(extended);
				} else if extended.len() < max_path_hops {
					queue.push_back((edge.asset_out.clone(), extended));
				}
			}
		}

		debug!(
			generation = self.generation,
			candidates = found.len(),
			%from,
			%to,
			"Path enumeration finished"
		);

		found
	}

	/// Whether the partial path starting at `origin` already visits `asset`.
	fn visits(path: &Path, origin: &AssetId, asset: &AssetId) -> bool {
		if asset == origin {
			return true;
		}
		path.iter().any(|edge| edge.asset_out == *asset)
	}

	/// All assets reachable as an input of at least one edge. Exposed for
	/// diagnostics.
	pub fn assets(&self) -> HashSet<&AssetId> {
		self.adjacency.keys().collect()
	}
}
