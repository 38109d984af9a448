//! Turns canvas clicks and form input into graph edits and path queries.

use std::fmt;

use log::{debug, info, warn};
use thiserror::Error;

use crate::graph::{Cost, EdgeId, Graph, InvalidEdge, NodeId, Position, shortest_path};

/// Radius of a drawn node; clicks closer than this to its centre hit it.
pub const NODE_RADIUS: f64 = 20.0;

/// What the next canvas click means.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
	/// Clicks do nothing.
	#[default]
	Idle,
	/// The next click places a node.
	PlacingNode,
	/// Picking the two endpoints of a new edge.
	Connecting {
		/// Endpoint picked by the first click, if any.
		first: Option<NodeId>,
	},
	/// Both endpoints picked; waiting for the weight.
	AwaitingWeight {
		/// First endpoint.
		from: NodeId,
		/// Second endpoint.
		to: NodeId,
	},
}

/// Result of handing a click to the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
	/// A node was created at the click.
	NodePlaced(NodeId),
	/// The first endpoint of an edge was picked.
	EndpointSelected(NodeId),
	/// The caller should ask for a weight and pass it to
	/// [`Session::complete_edge`], or call [`Session::cancel`].
	WeightRequested {
		/// First endpoint.
		from: NodeId,
		/// Second endpoint.
		to: NodeId,
	},
	/// Nothing happened.
	Ignored,
}

/// Which query field a bad value came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueryField {
	/// Start node field.
	Source,
	/// End node field.
	Target,
}

impl fmt::Display for QueryField {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Source => f.write_str("start"),
			Self::Target => f.write_str("end"),
		}
	}
}

/// A path query rejected before the search runs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidQueryInput {
	/// The field is not an integer.
	#[error("{field} node {input:?} is not a number")]
	NotANumber {
		/// Field holding the bad value.
		field: QueryField,
		/// The trimmed text.
		input: String,
	},

	/// The id names no node.
	#[error("{field} node {id} is outside 0..{node_count}")]
	OutOfRange {
		/// Field holding the bad value.
		field: QueryField,
		/// The parsed id.
		id: i64,
		/// Nodes in the graph when the query ran.
		node_count: usize,
	},
}

/// Why a pending edge could not be completed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
	/// The weight or the endpoints were rejected.
	#[error(transparent)]
	InvalidEdge(#[from] InvalidEdge),

	/// No two endpoints have been picked.
	#[error("no edge is waiting for a weight")]
	NoPendingEdge,
}

/// Answer to a path query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueryOutcome {
	/// A route from source to target and its cost.
	Found {
		/// Nodes from source to target.
		path: Vec<NodeId>,
		/// Sum of edge weights along `path`.
		total_cost: Cost,
	},
	/// The target cannot be reached from the source.
	NoPath {
		/// Start node of the query.
		source: NodeId,
		/// End node of the query.
		target: NodeId,
	},
}

impl QueryOutcome {
	/// Message shown to the user once the query has been answered.
	pub fn describe(&self) -> String {
		match self {
			Self::Found { path, total_cost } => {
				let route = path
					.iter()
					.map(NodeId::to_string)
					.collect::<Vec<_>>()
					.join(" -> ");
				format!("Shortest path: {route}\nTotal cost: {total_cost}")
			}
			Self::NoPath { .. } => "No path exists between the selected nodes.".to_string(),
		}
	}
}

/// Message shown for a rejected query, whatever the reason.
pub const INVALID_QUERY_MESSAGE: &str = "The start or end node is not valid.";

/// Owns the graph and the transient interaction state around it.
#[derive(Clone, Debug, Default)]
pub struct Session {
	graph: Graph,
	mode: Mode,
}

impl Session {
	/// Start with an empty graph.
	pub fn new() -> Self {
		Self::default()
	}

	/// The graph built so far.
	pub fn graph(&self) -> &Graph {
		&self.graph
	}

	/// Current interaction mode.
	pub fn mode(&self) -> Mode {
		self.mode
	}

	/// Arm the next click to place a node.
	pub fn begin_place_node(&mut self) {
		self.mode = Mode::PlacingNode;
	}

	/// Start picking edge endpoints, dropping any earlier selection.
	pub fn begin_connect(&mut self) {
		self.mode = Mode::Connecting { first: None };
	}

	/// Abandon whatever interaction is in progress.
	pub fn cancel(&mut self) {
		if self.mode != Mode::Idle {
			debug!("cancelled {:?}", self.mode);
		}
		self.mode = Mode::Idle;
	}

	/// Node currently highlighted as the first endpoint of a new edge.
	pub fn selected(&self) -> Option<NodeId> {
		match self.mode {
			Mode::Connecting { first } => first,
			Mode::AwaitingWeight { from, .. } => Some(from),
			_ => None,
		}
	}

	/// Earliest node whose disc contains `position`.
	pub fn node_at(&self, position: Position) -> Option<NodeId> {
		self.graph
			.nodes()
			.iter()
			.find(|node| node.position.distance_to(&position) < NODE_RADIUS)
			.map(|node| node.id)
	}

	/// Handle a canvas click according to the current mode.
	pub fn click(&mut self, position: Position) -> ClickOutcome {
		match self.mode {
			Mode::Idle | Mode::AwaitingWeight { .. } => ClickOutcome::Ignored,
			Mode::PlacingNode => {
				let id = self.graph.add_node(position);
				self.mode = Mode::Idle;
				ClickOutcome::NodePlaced(id)
			}
			Mode::Connecting { first } => {
				let Some(hit) = self.node_at(position) else {
					return ClickOutcome::Ignored;
				};
				match first {
					None => {
						self.mode = Mode::Connecting { first: Some(hit) };
						ClickOutcome::EndpointSelected(hit)
					}
					Some(from) => {
						self.mode = Mode::AwaitingWeight { from, to: hit };
						ClickOutcome::WeightRequested { from, to: hit }
					}
				}
			}
		}
	}

	/// Finish the pending edge with a user-typed weight.
	///
	/// The pending edge is dropped whether or not the weight is accepted.
	pub fn complete_edge(&mut self, weight: &str) -> Result<EdgeId, SessionError> {
		let Mode::AwaitingWeight { from, to } = self.mode else {
			return Err(SessionError::NoPendingEdge);
		};
		self.mode = Mode::Idle;
		match self.graph.connect(from, to, weight) {
			Ok(edge) => Ok(edge),
			Err(err) => {
				warn!("rejected edge {from} - {to}: {err}");
				Err(err.into())
			}
		}
	}

	/// Parse the two query fields and run the search.
	pub fn run_query(&self, source: &str, target: &str) -> Result<QueryOutcome, InvalidQueryInput> {
		let source = self.parse_node(QueryField::Source, source)?;
		let target = self.parse_node(QueryField::Target, target)?;

		let result = shortest_path(&self.graph, source, target);
		let outcome = match result.total_cost() {
			Some(total_cost) if result.starts_at(source) => QueryOutcome::Found {
				path: result.into_path(),
				total_cost,
			},
			_ => QueryOutcome::NoPath { source, target },
		};
		info!("query {source} -> {target}: {outcome:?}");
		Ok(outcome)
	}

	/// Clear the graph and any interaction in progress.
	pub fn reset(&mut self) {
		self.graph.reset();
		self.mode = Mode::Idle;
	}

	fn parse_node(&self, field: QueryField, input: &str) -> Result<NodeId, InvalidQueryInput> {
		let trimmed = input.trim();
		let id: i64 = trimmed.parse().map_err(|_| InvalidQueryInput::NotANumber {
			field,
			input: trimmed.to_string(),
		})?;
		let out_of_range = InvalidQueryInput::OutOfRange {
			field,
			id,
			node_count: self.graph.node_count(),
		};
		match usize::try_from(id) {
			Ok(index) if index < self.graph.node_count() => Ok(NodeId(index)),
			_ => Err(out_of_range),
		}
	}
}
