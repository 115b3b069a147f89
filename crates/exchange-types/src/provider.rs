//! # Edge Provider Trait
//!
//! Defines the interface every venue integration implements to take part in
//! routing. A provider advertises the directed edges it can service, quotes
//! a single edge on demand, and optionally reports which assets it can pay
//! network fees in.
//!
//! Providers are injected at construction time as an ordered list; the
//! registration order influences tie-breaking between otherwise equal
//! candidate paths but never correctness.

use crate::common::{AssetId, Balance, Direction};
use crate::edge::{Edge, EdgeCapability};
use crate::errors::{ExchangeError, ExchangeResult};
use async_trait::async_trait;
use std::collections::HashSet;
use tokio::sync::mpsc;

/// Interface for a single exchange venue.
///
/// Implementations exist per venue family: cross-chain transfers and the
/// two AMM families. Every method may fail independently of the others;
/// a failing quote eliminates one candidate path, never the whole query.
#[async_trait]
pub trait EdgeProvider: Send + Sync {
	/// Stable name used in logs and change notifications.
	fn name(&self) -> &str;

	/// The set of directed conversions this provider can currently service.
	///
	/// Called on every graph rebuild; the result is snapshotted into the new
	/// graph generation and never re-read for its lifetime.
	async fn available_edges(&self) -> ExchangeResult<Vec<EdgeCapability>>;

	/// Exact quote for one edge.
	///
	/// For [`Direction::Sell`] the amount is the input and the returned
	/// balance is the resulting output; for [`Direction::Buy`] the amount is
	/// the desired output and the returned balance is the required input.
	/// The result is valid only for the instant it was produced.
	async fn quote_edge(
		&self,
		edge: &Edge,
		amount: &Balance,
		direction: Direction,
	) -> ExchangeResult<Balance>;

	/// Assets this provider can pay network fees in.
	///
	/// Merged across providers by the fee-support aggregator. The default
	/// is no non-native fee payment support.
	async fn fee_paying_assets(&self) -> ExchangeResult<HashSet<AssetId>> {
		Ok(HashSet::new())
	}
}

/// Notification that a provider's advertised edge set changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderChange {
	/// Name of the provider whose edge set changed
	pub provider: String,
}

/// Sink handed to providers for signalling edge-set changes.
///
/// Each change triggers a wholesale rebuild of the graph; in-flight queries
/// keep the generation they captured.
#[derive(Debug, Clone)]
pub struct ProviderChangeSink {
	sender: mpsc::UnboundedSender<ProviderChange>,
}

impl ProviderChangeSink {
	pub fn new(sender: mpsc::UnboundedSender<ProviderChange>) -> Self {
		Self { sender }
	}

	/// Signals that the named provider's edge set changed.
	///
	/// Returns an error if the exchange service has shut down.
	pub fn notify(&self, provider: impl Into<String>) -> ExchangeResult<()> {
		self.sender
			.send(ProviderChange {
				provider: provider.into(),
			})
			.map_err(|_| ExchangeError::Provider("change sink closed".to_string()))
	}
}
