//! Shared fixtures for graph tests.

use crate::builder::GraphBuilder;
use crate::graph::ExchangeGraph;
use async_trait::async_trait;
use exchange_types::{
	AssetId, Balance, Direction, Edge, EdgeCapability, EdgeKind, EdgeProvider, ExchangeResult,
};
use std::sync::Arc;

pub struct MockProvider {
	name: String,
}

impl MockProvider {
	pub fn shared(name: &str) -> Arc<dyn EdgeProvider> {
		Arc::new(Self {
			name: name.to_string(),
		})
	}
}

#[async_trait]
impl EdgeProvider for MockProvider {
	fn name(&self) -> &str {
		&self.name
	}

	async fn available_edges(&self) -> ExchangeResult<Vec<EdgeCapability>> {
		Ok(Vec::new())
	}

	async fn quote_edge(
		&self,
		_edge: &Edge,
		amount: &Balance,
		_direction: Direction,
	) -> ExchangeResult<Balance> {
		Ok(amount.clone())
	}
}

pub fn capability(from: &str, to: &str) -> EdgeCapability {
	EdgeCapability {
		asset_in: AssetId::new(from, 0),
		asset_out: AssetId::new(to, 0),
		kind: EdgeKind::AmmSpot,
	}
}

pub fn edge(from: &str, to: &str) -> EdgeCapability {
	capability(from, to)
}

pub fn graph_of(capabilities: Vec<EdgeCapability>) -> Arc<ExchangeGraph> {
	let provider = MockProvider::shared("mock");
	GraphBuilder::new().build(vec![(provider, capabilities)])
}
