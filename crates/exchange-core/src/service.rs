//! Exchange service: owns the provider list and keeps the graph fresh.

use crate::fee::FeeSupportAggregator;
use crate::proxy::GraphProxy;
use exchange_config::ExchangeConfig;
use exchange_graph::GraphBuilder;
use exchange_types::{
	AssetId, EdgeProvider, ExchangeResult, ProviderChange, ProviderChangeSink, Quote, QuoteArgs,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc, Mutex};
use tokio::task::JoinSet;
use tracing::{info, warn};

/// Composition root of the routing subsystem.
///
/// Providers are injected once, as an ordered list; their registration index
/// becomes the edge priority used for tie-breaking. The service performs an
/// initial sync on [`start`](ExchangeService::start) and afterwards rebuilds
/// the graph wholesale whenever a provider signals a change or the periodic
/// refresh fires. Queries go through the [`GraphProxy`] and are never
/// blocked by a rebuild.
pub struct ExchangeService {
	providers: Vec<Arc<dyn EdgeProvider>>,
	graph_builder: GraphBuilder,
	proxy: Arc<GraphProxy>,
	fee_support: Arc<FeeSupportAggregator>,
	config: ExchangeConfig,
	change_sink: ProviderChangeSink,
	change_rx: Mutex<Option<mpsc::UnboundedReceiver<ProviderChange>>>,
	shutdown_tx: broadcast::Sender<()>,
	tasks: Mutex<JoinSet<()>>,
}

impl ExchangeService {
	/// Performs the initial provider sync and spawns the resync task.
	pub async fn start(self: &Arc<Self>) {
		info!(providers = self.providers.len(), "Starting exchange service");

		self.sync_now().await;

		let change_rx = self.change_rx.lock().await.take();
		let Some(change_rx) = change_rx else {
			warn!("Exchange service already started");
			return;
		};

		let service = self.clone();
		let shutdown_rx = self.shutdown_tx.subscribe();

		self.tasks
			.lock()
			.await
			.spawn(async move { service.run_resync_loop(change_rx, shutdown_rx).await });

		info!("Exchange service started");
	}

	/// Rebuilds the graph generation and the fee-support aggregate from the
	/// current provider state.
	///
	/// Providers fail independently: a provider that cannot report its edge
	/// set contributes no edges to this generation but keeps its slot, so
	/// the priorities of the remaining providers stay aligned with the
	/// registration order.
	pub async fn sync_now(&self) {
		let reports = futures::future::join_all(self.providers.iter().map(|provider| async move {
			let edges = provider.available_edges().await;
			let fee_assets = provider.fee_paying_assets().await;
			(provider.clone(), edges, fee_assets)
		}))
		.await;

		let mut provider_edges = Vec::with_capacity(reports.len());
		let mut fee_sets = Vec::with_capacity(reports.len());

		for (provider, edges, fee_assets) in reports {
			match edges {
				Ok(edges) => provider_edges.push((provider.clone(), edges)),
				Err(error) => {
					warn!(
						provider = provider.name(),
						%error,
						"Edge listing failed, provider excluded from this generation"
					);
					provider_edges.push((provider.clone(), Vec::new()));
				}
			}

			match fee_assets {
				Ok(assets) => fee_sets.push(assets),
				Err(error) => {
					warn!(
						provider = provider.name(),
						%error,
						"Fee support listing failed"
					);
				}
			}
		}

		let graph = self.graph_builder.build(provider_edges);
		self.proxy.install(graph);
		self.fee_support.install(fee_sets);
	}

	async fn run_resync_loop(
		&self,
		mut change_rx: mpsc::UnboundedReceiver<ProviderChange>,
		mut shutdown_rx: broadcast::Receiver<()>,
	) {
		let period = Duration::from_secs(self.config.sync.refresh_interval_secs);
		let mut refresh = tokio::time::interval_at(tokio::time::Instant::now() + period, period);

		loop {
			tokio::select! {
				Some(change) = change_rx.recv() => {
					info!(provider = %change.provider, "Provider change notification, rebuilding graph");
					self.sync_now().await;
				}
				_ = refresh.tick() => {
					self.sync_now().await;
				}
				_ = shutdown_rx.recv() => {
					info!("Resync task received shutdown signal");
					break;
				}
			}
		}
	}

	/// Quotes a conversion through the graph proxy.
	pub async fn quote(&self, args: QuoteArgs) -> ExchangeResult<Quote> {
		self.proxy.quote(args).await
	}

	/// Whether any provider supports paying network fees in this asset.
	pub fn can_pay_fee(&self, asset: &AssetId) -> bool {
		self.fee_support.can_pay_fee(asset)
	}

	/// The proxy façade, for callers that only quote.
	pub fn proxy(&self) -> Arc<GraphProxy> {
		self.proxy.clone()
	}

	/// Generation number of the currently installed graph.
	pub fn current_generation(&self) -> Option<u64> {
		self.proxy.current().map(|graph| graph.generation())
	}

	/// Sink providers use to signal edge-set changes.
	pub fn change_sink(&self) -> ProviderChangeSink {
		self.change_sink.clone()
	}

	/// Stops the resync task. In-flight queries run to completion against
	/// the snapshots they captured.
	pub async fn shutdown(&self) {
		info!("Shutting down exchange service");
		let _ = self.shutdown_tx.send(());
		self.tasks.lock().await.shutdown().await;
		info!("Exchange service shutdown complete");
	}
}

/// Builder for [`ExchangeService`].
pub struct ExchangeServiceBuilder {
	config: ExchangeConfig,
	providers: Vec<Arc<dyn EdgeProvider>>,
}

impl ExchangeServiceBuilder {
	pub fn new() -> Self {
		Self {
			config: ExchangeConfig::default(),
			providers: Vec::new(),
		}
	}

	pub fn with_config(mut self, config: ExchangeConfig) -> Self {
		self.config = config;
		self
	}

	/// Registers a provider. Order matters: earlier providers win priority
	/// tie-breaks.
	pub fn with_provider(mut self, provider: Arc<dyn EdgeProvider>) -> Self {
		self.providers.push(provider);
		self
	}

	pub fn build(self) -> Arc<ExchangeService> {
		let (change_tx, change_rx) = mpsc::unbounded_channel();
		let (shutdown_tx, _) = broadcast::channel(4);

		let proxy = Arc::new(GraphProxy::new(&self.config));

		Arc::new(ExchangeService {
			providers: self.providers,
			graph_builder: GraphBuilder::new(),
			proxy,
			fee_support: Arc::new(FeeSupportAggregator::new()),
			config: self.config,
			change_sink: ProviderChangeSink::new(change_tx),
			change_rx: Mutex::new(Some(change_rx)),
			shutdown_tx,
			tasks: Mutex::new(JoinSet::new()),
		})
	}
}

impl Default for ExchangeServiceBuilder {
	fn default() -> Self {
		Self::new()
	}
}
