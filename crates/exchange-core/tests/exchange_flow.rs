//! End-to-end routing scenarios against in-memory providers.

use async_trait::async_trait;
use exchange_config::ExchangeConfig;
use exchange_core::ExchangeServiceBuilder;
use exchange_types::{
	AssetId, Balance, Direction, Edge, EdgeCapability, EdgeKind, EdgeProvider, ExchangeError,
	ExchangeResult, QuoteArgs,
};
use num_bigint::BigUint;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// In-memory venue quoting from fixed numerator/denominator rates.
struct TestVenue {
	name: String,
	kind: EdgeKind,
	rates: HashMap<(AssetId, AssetId), (u64, u64)>,
	fee_assets: HashSet<AssetId>,
	quote_calls: AtomicUsize,
	fail_listing: bool,
	fail_quotes: bool,
}

impl TestVenue {
	fn new(name: &str, kind: EdgeKind) -> Self {
		Self {
			name: name.to_string(),
			kind,
			rates: HashMap::new(),
			fee_assets: HashSet::new(),
			quote_calls: AtomicUsize::new(0),
			fail_listing: false,
			fail_quotes: false,
		}
	}

	fn with_rate(mut self, from: &AssetId, to: &AssetId, num: u64, den: u64) -> Self {
		self.rates.insert((from.clone(), to.clone()), (num, den));
		self
	}

	fn with_fee_asset(mut self, asset: &AssetId) -> Self {
		self.fee_assets.insert(asset.clone());
		self
	}

	fn with_failing_listing(mut self) -> Self {
		self.fail_listing = true;
		self
	}

	fn with_failing_quotes(mut self) -> Self {
		self.fail_quotes = true;
		self
	}

	fn quote_calls(&self) -> usize {
		self.quote_calls.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl EdgeProvider for TestVenue {
	fn name(&self) -> &str {
		&self.name
	}

	async fn available_edges(&self) -> ExchangeResult<Vec<EdgeCapability>> {
		if self.fail_listing {
			return Err(ExchangeError::Provider("listing unavailable".to_string()));
		}

		Ok(self
			.rates
			.keys()
			.map(|(asset_in, asset_out)| EdgeCapability {
				asset_in: asset_in.clone(),
				asset_out: asset_out.clone(),
				kind: self.kind,
			})
			.collect())
	}

	async fn quote_edge(
		&self,
		edge: &Edge,
		amount: &Balance,
		direction: Direction,
	) -> ExchangeResult<Balance> {
		self.quote_calls.fetch_add(1, Ordering::SeqCst);

		if self.fail_quotes {
			return Err(ExchangeError::Provider("venue unavailable".to_string()));
		}

		let (num, den) = self
			.rates
			.get(&(edge.asset_in.clone(), edge.asset_out.clone()))
			.ok_or_else(|| ExchangeError::Provider("unknown edge".to_string()))?;

		match direction {
			Direction::Sell => Ok(amount * *num / BigUint::from(*den)),
			Direction::Buy => {
				let scaled = amount * *den;
				let num = BigUint::from(*num);
				Ok((&scaled + &num - BigUint::from(1u8)) / num)
			}
		}
	}

	async fn fee_paying_assets(&self) -> ExchangeResult<HashSet<AssetId>> {
		Ok(self.fee_assets.clone())
	}
}

fn asset(chain: &str, id: u32) -> AssetId {
	AssetId::new(chain, id)
}

fn amount(value: u64) -> Balance {
	BigUint::from(value)
}

fn sell(from: &AssetId, to: &AssetId, value: u64) -> QuoteArgs {
	QuoteArgs {
		asset_in: from.clone(),
		asset_out: to.clone(),
		amount: amount(value),
		direction: Direction::Sell,
	}
}

#[tokio::test]
async fn test_quote_before_first_sync_is_no_graph() {
	let a = asset("alpha", 0);
	let b = asset("beta", 0);

	let service = ExchangeServiceBuilder::new().build();

	let result = service.quote(sell(&a, &b, 100)).await;
	assert_eq!(result.unwrap_err(), ExchangeError::NoGraph);
}

#[tokio::test]
async fn test_identity_quote_needs_no_graph() {
	let a = asset("alpha", 0);

	let service = ExchangeServiceBuilder::new().build();

	let quote = service.quote(sell(&a, &a, 100)).await.unwrap();
	assert_eq!(quote.amount, amount(100));
	assert!(quote.route.is_none());
}

#[tokio::test]
async fn test_two_hop_route_through_intermediate_asset() {
	let a = asset("alpha", 1);
	let b = asset("beta", 1);
	let c = asset("gamma", 1);

	// a -> b on an AMM at 1:0.99, b -> c over a cross-chain transfer at 1:1
	// after its own fee; no direct a -> c edge exists.
	let amm = Arc::new(TestVenue::new("amm", EdgeKind::AmmSpot).with_rate(&a, &b, 99, 100));
	let bridge = Arc::new(
		TestVenue::new("bridge", EdgeKind::CrossChainTransfer).with_rate(&b, &c, 999, 1000),
	);

	let service = ExchangeServiceBuilder::new()
		.with_provider(amm.clone())
		.with_provider(bridge.clone())
		.build();
	service.sync_now().await;

	let quote = service.quote(sell(&a, &c, 100)).await.unwrap();

	let route = quote.route.expect("multi-hop quote carries a route");
	assert_eq!(route.hops(), 2);
	assert_eq!(route.items[0].edge.asset_out, b);
	// 100 -> 99 on the AMM, then the bridge fee shaves the rest
	assert_eq!(quote.amount, amount(98));
}

#[tokio::test]
async fn test_parallel_routes_pick_higher_output() {
	let a = asset("alpha", 1);
	let d = asset("delta", 1);
	let x = asset("chi", 1);
	let y = asset("ypsilon", 1);

	let venue = Arc::new(
		TestVenue::new("venue", EdgeKind::AmmSpot)
			.with_rate(&a, &x, 1, 1)
			.with_rate(&x, &d, 95, 100)
			.with_rate(&a, &y, 1, 1)
			.with_rate(&y, &d, 98, 100),
	);

	let service = ExchangeServiceBuilder::new().with_provider(venue).build();
	service.sync_now().await;

	let quote = service.quote(sell(&a, &d, 1000)).await.unwrap();
	assert_eq!(quote.amount, amount(980));

	let route = quote.route.unwrap();
	assert_eq!(route.items[0].edge.asset_out, y);
}

#[tokio::test]
async fn test_disconnected_assets_fail_without_quoting() {
	let a = asset("alpha", 1);
	let b = asset("beta", 1);
	let x = asset("x", 7);
	let y = asset("y", 7);

	let venue = Arc::new(TestVenue::new("venue", EdgeKind::AmmSpot).with_rate(&a, &b, 1, 1));

	let service = ExchangeServiceBuilder::new()
		.with_provider(venue.clone())
		.build();
	service.sync_now().await;

	let result = service.quote(sell(&x, &y, 100)).await;
	assert_eq!(
		result.unwrap_err(),
		ExchangeError::no_route(x.clone(), y.clone())
	);
	// the failure was decided on the graph alone
	assert_eq!(venue.quote_calls(), 0);
}

#[tokio::test]
async fn test_all_quotes_failing_yields_no_route() {
	let a = asset("alpha", 1);
	let b = asset("beta", 1);

	// the venue advertises the edge but every exact quote fails
	let venue = Arc::new(
		TestVenue::new("venue", EdgeKind::AmmSpot)
			.with_rate(&a, &b, 1, 1)
			.with_failing_quotes(),
	);

	let service = ExchangeServiceBuilder::new()
		.with_provider(venue.clone())
		.build();
	service.sync_now().await;

	let result = service.quote(sell(&a, &b, 100)).await;
	assert_eq!(
		result.unwrap_err(),
		ExchangeError::no_route(a.clone(), b.clone())
	);
	// the candidate path was actually attempted before being given up on
	assert!(venue.quote_calls() > 0);
}

#[tokio::test]
async fn test_buy_direction_reports_required_input() {
	let a = asset("alpha", 1);
	let b = asset("beta", 1);

	let venue = Arc::new(TestVenue::new("venue", EdgeKind::AmmSpot).with_rate(&a, &b, 99, 100));

	let service = ExchangeServiceBuilder::new().with_provider(venue).build();
	service.sync_now().await;

	let args = QuoteArgs {
		asset_in: a.clone(),
		asset_out: b.clone(),
		amount: amount(99),
		direction: Direction::Buy,
	};

	let quote = service.quote(args).await.unwrap();
	assert_eq!(quote.amount, amount(100));
}

#[tokio::test]
async fn test_snapshot_survives_rebuild() {
	let a = asset("alpha", 1);
	let b = asset("beta", 1);

	let venue = Arc::new(TestVenue::new("venue", EdgeKind::AmmSpot).with_rate(&a, &b, 1, 1));

	let service = ExchangeServiceBuilder::new().with_provider(venue).build();
	service.sync_now().await;

	let captured = service.proxy().current().expect("graph installed");
	let generation = captured.generation();
	let edge_count = captured.edge_count();

	service.sync_now().await;

	// the newly installed generation is newer, the captured one unchanged
	assert!(service.current_generation().unwrap() > generation);
	assert_eq!(captured.generation(), generation);
	assert_eq!(captured.edge_count(), edge_count);
}

#[tokio::test]
async fn test_failing_provider_excluded_but_others_survive() {
	let a = asset("alpha", 1);
	let b = asset("beta", 1);

	let broken = Arc::new(
		TestVenue::new("broken", EdgeKind::AmmStable)
			.with_rate(&a, &b, 1, 1)
			.with_failing_listing(),
	);
	let healthy = Arc::new(TestVenue::new("healthy", EdgeKind::AmmSpot).with_rate(&a, &b, 97, 100));

	let service = ExchangeServiceBuilder::new()
		.with_provider(broken)
		.with_provider(healthy)
		.build();
	service.sync_now().await;

	let quote = service.quote(sell(&a, &b, 100)).await.unwrap();
	assert_eq!(quote.amount, amount(97));
	assert_eq!(
		quote.route.unwrap().items[0].edge.provider.name(),
		"healthy"
	);
}

#[tokio::test]
async fn test_fee_support_is_or_across_providers() {
	let a = asset("alpha", 1);
	let b = asset("beta", 1);
	let c = asset("gamma", 1);

	let first = Arc::new(
		TestVenue::new("first", EdgeKind::AmmSpot)
			.with_rate(&a, &b, 1, 1)
			.with_fee_asset(&a),
	);
	let second = Arc::new(
		TestVenue::new("second", EdgeKind::AmmStable)
			.with_rate(&b, &c, 1, 1)
			.with_fee_asset(&b),
	);

	let service = ExchangeServiceBuilder::new()
		.with_provider(first)
		.with_provider(second)
		.build();
	service.sync_now().await;

	assert!(service.can_pay_fee(&a));
	assert!(service.can_pay_fee(&b));
	assert!(!service.can_pay_fee(&c));
}

#[tokio::test]
async fn test_change_notification_triggers_rebuild() {
	let a = asset("alpha", 1);
	let b = asset("beta", 1);

	let venue = Arc::new(TestVenue::new("venue", EdgeKind::AmmSpot).with_rate(&a, &b, 1, 1));

	let service = ExchangeServiceBuilder::new().with_provider(venue).build();
	service.start().await;

	let first_generation = service.current_generation().unwrap();

	service.change_sink().notify("venue").unwrap();

	// the resync task picks the notification up asynchronously
	let mut rebuilt = false;
	for _ in 0..50 {
		tokio::time::sleep(std::time::Duration::from_millis(10)).await;
		if service.current_generation().unwrap() > first_generation {
			rebuilt = true;
			break;
		}
	}

	service.shutdown().await;
	assert!(rebuilt, "change notification should trigger a rebuild");
}

#[tokio::test]
async fn test_path_budget_bounds_quoting_effort() {
	let a = asset("alpha", 1);
	let d = asset("delta", 1);

	// six parallel two-hop routes; budget of two candidates
	let mut venue = TestVenue::new("venue", EdgeKind::AmmSpot);
	for i in 0..6u32 {
		let mid = asset("mid", i);
		venue = venue.with_rate(&a, &mid, 1, 1).with_rate(&mid, &d, 1, 1);
	}
	let venue = Arc::new(venue);

	let mut config = ExchangeConfig::default();
	config.routing.max_quote_paths = 2;

	let service = ExchangeServiceBuilder::new()
		.with_config(config)
		.with_provider(venue.clone())
		.build();
	service.sync_now().await;

	let quote = service.quote(sell(&a, &d, 100)).await.unwrap();
	assert_eq!(quote.amount, amount(100));
	// two candidates, two hops each
	assert_eq!(venue.quote_calls(), 4);
}
