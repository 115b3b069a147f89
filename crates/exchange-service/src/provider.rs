//! Static edge provider backed by a fixture file.
//!
//! Quotes from fixed rational rates, one provider instance per venue family.
//! Useful for offline runs and as a reference implementation of the
//! [`EdgeProvider`] contract.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use exchange_types::{
	AssetId, Balance, Direction, Edge, EdgeCapability, EdgeKind, EdgeProvider, ExchangeError,
	ExchangeResult,
};
use num_bigint::BigUint;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Top-level structure of the venues fixture file.
#[derive(Debug, Deserialize)]
pub struct VenueFixture {
	pub venues: Vec<StaticVenueConfig>,
}

/// One venue family in the fixture file.
#[derive(Debug, Deserialize)]
pub struct StaticVenueConfig {
	pub name: String,
	pub kind: EdgeKind,
	#[serde(default)]
	pub fee_assets: Vec<AssetId>,
	pub edges: Vec<StaticEdgeConfig>,
}

/// One directed conversion with a fixed rational rate.
///
/// A sell of `x` units yields `x * rate_num / rate_den` (floor); a buy of
/// `y` units requires `ceil(y * rate_den / rate_num)`.
#[derive(Debug, Deserialize)]
pub struct StaticEdgeConfig {
	pub asset_in: AssetId,
	pub asset_out: AssetId,
	pub rate_num: u64,
	pub rate_den: u64,
}

/// Provider serving quotes from the fixed rates of one venue family.
pub struct StaticEdgeProvider {
	name: String,
	kind: EdgeKind,
	rates: HashMap<(AssetId, AssetId), (u64, u64)>,
	fee_assets: HashSet<AssetId>,
}

impl StaticEdgeProvider {
	pub fn from_config(config: StaticVenueConfig) -> Result<Self> {
		let mut rates = HashMap::new();

		for edge in config.edges {
			if edge.rate_num == 0 || edge.rate_den == 0 {
				bail!(
					"venue {}: rate for {} -> {} must be a positive rational",
					config.name,
					edge.asset_in,
					edge.asset_out
				);
			}
			if edge.asset_in == edge.asset_out {
				bail!(
					"venue {}: self-referential edge on {}",
					config.name,
					edge.asset_in
				);
			}
			if rates
				.insert(
					(edge.asset_in.clone(), edge.asset_out.clone()),
					(edge.rate_num, edge.rate_den),
				)
				.is_some()
			{
				bail!(
					"venue {}: duplicate edge {} -> {}",
					config.name,
					edge.asset_in,
					edge.asset_out
				);
			}
		}

		Ok(Self {
			name: config.name,
			kind: config.kind,
			rates,
			fee_assets: config.fee_assets.into_iter().collect(),
		})
	}
}

#[async_trait]
impl EdgeProvider for StaticEdgeProvider {
	fn name(&self) -> &str {
		&self.name
	}

	async fn available_edges(&self) -> ExchangeResult<Vec<EdgeCapability>> {
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
		let (num, den) = self
			.rates
			.get(&(edge.asset_in.clone(), edge.asset_out.clone()))
			.ok_or_else(|| {
				ExchangeError::Provider(format!(
					"{}: no rate for {} -> {}",
					self.name, edge.asset_in, edge.asset_out
				))
			})?;

		let quoted = match direction {
			Direction::Sell => amount * *num / BigUint::from(*den),
			Direction::Buy => {
				let num = BigUint::from(*num);
				(amount * *den + &num - BigUint::from(1u8)) / num
			}
		};

		Ok(quoted)
	}

	async fn fee_paying_assets(&self) -> ExchangeResult<HashSet<AssetId>> {
		Ok(self.fee_assets.clone())
	}
}

/// Loads the venues fixture and builds one provider per venue family.
pub fn load_providers<P: AsRef<Path>>(path: P) -> Result<Vec<Arc<dyn EdgeProvider>>> {
	let path = path.as_ref();
	let contents = std::fs::read_to_string(path)
		.with_context(|| format!("failed to read venues file {:?}", path))?;

	let fixture: VenueFixture = toml::from_str(&contents)
		.with_context(|| format!("failed to parse venues file {:?}", path))?;

	if fixture.venues.is_empty() {
		bail!("venues file {:?} declares no venues", path);
	}

	info!(venues = fixture.venues.len(), "Loaded venue fixture");

	fixture
		.venues
		.into_iter()
		.map(|venue| {
			StaticEdgeProvider::from_config(venue).map(|p| Arc::new(p) as Arc<dyn EdgeProvider>)
		})
		.collect()
}
