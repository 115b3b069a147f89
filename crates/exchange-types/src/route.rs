//! Routes and quotes: the query-scoped results of routing.

use crate::common::{Balance, Direction, QuoteArgs};
use crate::edge::Edge;
use std::fmt;

/// Cheap scalar estimate attached to a candidate path for pre-quote ranking.
/// Not a monetary amount; lower is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct PathCost(pub u64);

impl PathCost {
	pub fn saturating_add(self, other: PathCost) -> PathCost {
		PathCost(self.0.saturating_add(other.0))
	}
}

impl fmt::Display for PathCost {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// One quoted hop of a route.
#[derive(Debug, Clone)]
pub struct RouteItem {
	pub edge: Edge,
	pub amount_in: Balance,
	pub amount_out: Balance,
}

/// A fully quoted multi-hop route. Ephemeral: returned to the caller and
/// never cached.
#[derive(Debug, Clone)]
pub struct Route {
	/// Quoted hops in execution order
	pub items: Vec<RouteItem>,
	pub direction: Direction,
}

impl Route {
	pub fn new(items: Vec<RouteItem>, direction: Direction) -> Self {
		Self { items, direction }
	}

	pub fn hops(&self) -> usize {
		self.items.len()
	}

	/// Input amount of the first hop.
	pub fn amount_in(&self) -> Option<&Balance> {
		self.items.first().map(|item| &item.amount_in)
	}

	/// Output amount of the last hop.
	pub fn amount_out(&self) -> Option<&Balance> {
		self.items.last().map(|item| &item.amount_out)
	}

	/// The amount the query asked for: the end-to-end output when selling
	/// an exact input, the required input when buying an exact output.
	pub fn quoted_amount(&self) -> Option<&Balance> {
		match self.direction {
			Direction::Sell => self.amount_out(),
			Direction::Buy => self.amount_in(),
		}
	}
}

/// The exchange's answer to a quote query. An identity query (same asset in
/// and out) succeeds with the unchanged amount and no route.
#[derive(Debug, Clone)]
pub struct Quote {
	pub args: QuoteArgs,
	/// End-to-end quoted amount, momentarily valid
	pub amount: Balance,
	/// The chosen route; `None` for identity quotes
	pub route: Option<Route>,
}

impl Quote {
	/// A zero-hop quote for queries where no conversion is needed.
	pub fn identity(args: QuoteArgs) -> Self {
		let amount = args.amount.clone();
		Self {
			args,
			amount,
			route: None,
		}
	}
}
