//! Stable quoting façade over the current graph generation.

use arc_swap::ArcSwapOption;
use exchange_config::ExchangeConfig;
use exchange_graph::{rank_paths, EdgeKindCostEstimator, ExchangeGraph, PathCostEstimating};
use exchange_routing::RouteManager;
use exchange_types::{ExchangeError, ExchangeResult, Quote, QuoteArgs};
use std::sync::Arc;
use tracing::debug;

/// Callers depend on the proxy, not on any particular graph generation.
///
/// The proxy holds the latest installed snapshot behind an atomic swap; it
/// never owns graph lifetime beyond that. Every query captures its own
/// snapshot reference up front, so the graph can be rebuilt or torn down
/// concurrently with in-flight queries without affecting them.
pub struct GraphProxy {
	graph: ArcSwapOption<ExchangeGraph>,
	route_manager: RouteManager,
	estimator: Box<dyn PathCostEstimating>,
	max_quote_paths: usize,
	max_path_hops: usize,
}

impl GraphProxy {
	pub fn new(config: &ExchangeConfig) -> Self {
		Self {
			graph: ArcSwapOption::empty(),
			route_manager: RouteManager::new(config.routing.clone()),
			estimator: Box::new(EdgeKindCostEstimator::new(config.cost.clone())),
			max_quote_paths: config.routing.max_quote_paths,
			max_path_hops: config.routing.max_path_hops,
		}
	}

	/// Atomically installs a freshly built generation. Readers that already
	/// captured the previous one keep it until their query completes.
	pub fn install(&self, graph: Arc<ExchangeGraph>) {
		debug!(generation = graph.generation(), "Installing graph generation");
		self.graph.store(Some(graph));
	}

	/// The latest installed generation, or `None` before the first sync.
	pub fn current(&self) -> Option<Arc<ExchangeGraph>> {
		self.graph.load_full()
	}

	/// Quotes a conversion end to end.
	///
	/// Identity queries succeed without touching the graph. Otherwise the
	/// proxy enumerates candidate paths on the captured snapshot, ranks
	/// them by estimated cost, and delegates exact quoting to the route
	/// manager. "No graph yet" and "no route" surface as distinct errors:
	/// the former is a retryable startup race, the latter is terminal for
	/// these arguments.
	pub async fn quote(&self, args: QuoteArgs) -> ExchangeResult<Quote> {
		if args.asset_in == args.asset_out {
			return Ok(Quote::identity(args));
		}

		let graph = self.current().ok_or(ExchangeError::NoGraph)?;

		let mut paths = graph.fetch_paths(
			&args.asset_in,
			&args.asset_out,
			self.max_quote_paths,
			self.max_path_hops,
		);

		if paths.is_empty() {
			return Err(ExchangeError::no_route(args.asset_in, args.asset_out));
		}

		rank_paths(&mut paths, self.estimator.as_ref());

		let route = self
			.route_manager
			.fetch_route(paths, &args.amount, args.direction)
			.await
			.ok_or_else(|| {
				ExchangeError::no_route(args.asset_in.clone(), args.asset_out.clone())
			})?;

		let amount = route
			.quoted_amount()
			.cloned()
			.ok_or_else(|| ExchangeError::no_route(args.asset_in.clone(), args.asset_out.clone()))?;

		Ok(Quote {
			args,
			amount,
			route: Some(route),
		})
	}
}
