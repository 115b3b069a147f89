//! Route manager: concurrent exact-quote fan-out and best-route selection.

use exchange_config::{RoutingConfig, TieBreak};
use exchange_types::{Balance, Direction, Path, Route, RouteItem};
use futures::stream::{self, StreamExt};
use std::cmp::Ordering;
use tracing::{debug, info};

/// A candidate route together with the pre-quote rank of the path it was
/// quoted along (the index in the ranked candidate list).
struct Candidate {
	rank: usize,
	route: Route,
}

/// Executes exact quoting over ranked candidate paths and selects the best
/// completed route.
///
/// The manager never fast-fails: venues fail independently, so a failure on
/// one path must not abort its siblings, and a later, less-favoured path may
/// still be the only viable one. Selection runs only after every candidate
/// has either completed or permanently failed.
pub struct RouteManager {
	config: RoutingConfig,
}

impl RouteManager {
	pub fn new(config: RoutingConfig) -> Self {
		Self { config }
	}

	/// Quotes all candidate paths and returns the best completed route, or
	/// `None` when no candidate completes end-to-end.
	///
	/// Candidates race with bounded concurrency. Dropping the returned
	/// future cancels every still-outstanding edge quote.
	pub async fn fetch_route(
		&self,
		paths: Vec<Path>,
		amount: &Balance,
		direction: Direction,
	) -> Option<Route> {
		if paths.is_empty() {
			return None;
		}

		let total = paths.len();

		let candidates: Vec<Candidate> = stream::iter(paths.into_iter().enumerate())
			.map(|(rank, path)| async move {
				quote_path(&path, amount, direction)
					.await
					.map(|route| Candidate { rank, route })
			})
			.buffer_unordered(self.config.max_concurrent_quotes)
			.filter_map(|candidate| async move { candidate })
			.collect()
			.await;

		info!(
			completed = candidates.len(),
			total, %direction,
			"Exact quoting finished"
		);

		candidates
			.into_iter()
			.reduce(|best, other| self.pick_better(best, other))
			.map(|candidate| candidate.route)
	}

	/// Returns the better of two completed candidates: strictly better
	/// quoted amount first, then the configured tie-break.
	fn pick_better(&self, best: Candidate, other: Candidate) -> Candidate {
		match compare_amounts(&other.route, &best.route) {
			Ordering::Greater => other,
			Ordering::Less => best,
			Ordering::Equal => {
				if self.tie_break_key(&other) < self.tie_break_key(&best) {
					other
				} else {
					best
				}
			}
		}
	}

	fn tie_break_key(&self, candidate: &Candidate) -> (usize, usize, usize) {
		let hops = candidate.route.hops();
		let priority = candidate
			.route
			.items
			.iter()
			.map(|item| item.edge.provider_priority)
			.max()
			.unwrap_or(0);

		match self.config.tie_break {
			TieBreak::FewerHopsFirst => (hops, candidate.rank, priority),
			TieBreak::ProviderPriorityFirst => (priority, hops, candidate.rank),
		}
	}
}

/// Orders routes so that `Less` means "worse for the caller": for exact-in
/// selling a bigger output wins, for exact-out buying a smaller required
/// input wins.
fn compare_amounts(a: &Route, b: &Route) -> Ordering {
	match a.direction {
		Direction::Sell => a.amount_out().cmp(&b.amount_out()),
		Direction::Buy => b.amount_in().cmp(&a.amount_in()),
	}
}

/// Quotes one path hop by hop. Hop N is only issued after hop N-1 succeeds;
/// any failure drops the whole path.
async fn quote_path(path: &Path, amount: &Balance, direction: Direction) -> Option<Route> {
	match direction {
		Direction::Sell => quote_path_forward(path, amount).await,
		Direction::Buy => quote_path_backward(path, amount).await,
	}
}

/// Exact-in: walk from the source, feeding each hop's output into the next.
async fn quote_path_forward(path: &Path, amount: &Balance) -> Option<Route> {
	let mut items = Vec::with_capacity(path.len());
	let mut current = amount.clone();

	for edge in path {
		let quoted = edge
			.provider
			.quote_edge(edge, &current, Direction::Sell)
			.await;

		let amount_out = match quoted {
			Ok(amount_out) => amount_out,
			Err(error) => {
				debug!(
					provider = edge.provider.name(),
					asset_in = %edge.asset_in,
					asset_out = %edge.asset_out,
					%error,
					"Edge quote failed, dropping path"
				);
				return None;
			}
		};

		items.push(RouteItem {
			edge: edge.clone(),
			amount_in: current.clone(),
			amount_out: amount_out.clone(),
		});
		current = amount_out;
	}

	Some(Route::new(items, Direction::Sell))
}

/// Exact-out: walk from the destination, asking each hop for the input it
/// needs to produce the amount the hop after it requires.
async fn quote_path_backward(path: &Path, amount: &Balance) -> Option<Route> {
	let mut items = Vec::with_capacity(path.len());
	let mut current = amount.clone();

	for edge in path.iter().rev() {
		let quoted = edge
			.provider
			.quote_edge(edge, &current, Direction::Buy)
			.await;

		let amount_in = match quoted {
			Ok(amount_in) => amount_in,
			Err(error) => {
				debug!(
					provider = edge.provider.name(),
					asset_in = %edge.asset_in,
					asset_out = %edge.asset_out,
					%error,
					"Edge quote failed, dropping path"
				);
				return None;
			}
		};

		items.push(RouteItem {
			edge: edge.clone(),
			amount_in: amount_in.clone(),
			amount_out: current.clone(),
		});
		current = amount_in;
	}

	items.reverse();
	Some(Route::new(items, Direction::Buy))
}
