use std::fmt;

use log::debug;

use super::error::InvalidEdge;
use super::weight::parse_weight;

/// Weight carried by a single edge.
pub type Weight = u32;

/// Accumulated weight along a path.
pub type Cost = u64;

/// Handle to a node. Ids are assigned in creation order starting at 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
	/// Position of the node in the graph's node arena.
	pub fn index(self) -> usize {
		self.0
	}
}

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// Handle to an edge in insertion order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeId(pub usize);

impl EdgeId {
	/// Position of the edge in the graph's edge arena.
	pub fn index(self) -> usize {
		self.0
	}
}

/// Canvas position of a node. Only the rendering layer reads it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
	/// Horizontal offset from the canvas' left edge.
	pub x: f64,
	/// Vertical offset from the canvas' top edge.
	pub y: f64,
}

impl Position {
	/// Create a position from canvas coordinates.
	pub fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	/// Euclidean distance to another position.
	pub fn distance_to(&self, other: &Position) -> f64 {
		(self.x - other.x).hypot(self.y - other.y)
	}
}

/// One entry of a node's adjacency list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Adjacent {
	/// Node on the other side of the edge.
	pub neighbor: NodeId,
	/// Weight of the edge.
	pub weight: Weight,
}

/// A graph vertex.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	/// Sequential id, equal to the node's index.
	pub id: NodeId,
	/// Where the user placed the node.
	pub position: Position,
	adjacency: Vec<Adjacent>,
}

impl Node {
	/// Neighbors in the order their edges were inserted.
	pub fn adjacency(&self) -> &[Adjacent] {
		&self.adjacency
	}
}

/// An undirected weighted edge between two distinct nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
	/// Sequential id, equal to the edge's index.
	pub id: EdgeId,
	/// Endpoint picked first.
	pub a: NodeId,
	/// Endpoint picked second.
	pub b: NodeId,
	/// Cost of traversing the edge in either direction.
	pub weight: Weight,
}

impl Edge {
	/// True when this edge joins `x` and `y`, in either order.
	pub fn connects(&self, x: NodeId, y: NodeId) -> bool {
		self.other(x) == Some(y)
	}

	/// The endpoint opposite `end`, if `end` is an endpoint at all.
	pub fn other(&self, end: NodeId) -> Option<NodeId> {
		if self.a == end {
			Some(self.b)
		} else if self.b == end {
			Some(self.a)
		} else {
			None
		}
	}
}

/// Undirected weighted graph built one node and one edge at a time.
///
/// Nodes and edges live in insertion-ordered arenas and refer to each other
/// through [`NodeId`] and [`EdgeId`] handles. Every edge is mirrored in the
/// adjacency lists of both endpoints.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Graph {
	nodes: Vec<Node>,
	edges: Vec<Edge>,
}

impl Graph {
	/// Create an empty graph.
	pub fn new() -> Self {
		Self::default()
	}

	/// Add a node at `position`; its id is the number of nodes before it.
	pub fn add_node(&mut self, position: Position) -> NodeId {
		let id = NodeId(self.nodes.len());
		self.nodes.push(Node {
			id,
			position,
			adjacency: Vec::new(),
		});
		debug!("added node {id} at ({}, {})", position.x, position.y);
		id
	}

	/// Connect two distinct existing nodes with an undirected edge.
	pub fn add_edge(&mut self, a: NodeId, b: NodeId, weight: Weight) -> Result<EdgeId, InvalidEdge> {
		for end in [a, b] {
			if !self.contains(end) {
				return Err(InvalidEdge::UnknownNode(end));
			}
		}
		if a == b {
			return Err(InvalidEdge::SelfLoop(a));
		}

		let id = EdgeId(self.edges.len());
		if let Some(node) = self.nodes.get_mut(a.index()) {
			node.adjacency.push(Adjacent { neighbor: b, weight });
		}
		if let Some(node) = self.nodes.get_mut(b.index()) {
			node.adjacency.push(Adjacent { neighbor: a, weight });
		}
		self.edges.push(Edge { id, a, b, weight });
		debug!("added edge {a} - {b} with weight {weight}");
		Ok(id)
	}

	/// Parse `weight` as user input and connect `a` and `b` with it.
	pub fn connect(&mut self, a: NodeId, b: NodeId, weight: &str) -> Result<EdgeId, InvalidEdge> {
		let weight = parse_weight(weight)?;
		self.add_edge(a, b, weight)
	}

	/// Drop every node and edge. The next node gets id 0 again.
	pub fn reset(&mut self) {
		self.nodes.clear();
		self.edges.clear();
		debug!("graph reset");
	}

	/// First edge, in insertion order, joining `a` and `b` in either direction.
	pub fn find_edge(&self, a: NodeId, b: NodeId) -> Option<&Edge> {
		self.edges.iter().find(|edge| edge.connects(a, b))
	}

	/// Look up a node by id.
	pub fn node(&self, id: NodeId) -> Option<&Node> {
		self.nodes.get(id.index())
	}

	/// Look up an edge by id.
	pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
		self.edges.get(id.index())
	}

	/// All nodes in id order.
	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	/// All edges in insertion order.
	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	/// Adjacency list of `id`; empty for unknown nodes.
	pub fn neighbors(&self, id: NodeId) -> &[Adjacent] {
		self.node(id).map(Node::adjacency).unwrap_or_default()
	}

	/// Number of nodes.
	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	/// Number of edges.
	pub fn edge_count(&self) -> usize {
		self.edges.len()
	}

	/// True when the graph has no nodes.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// True when `id` names a node of this graph.
	pub fn contains(&self, id: NodeId) -> bool {
		id.index() < self.nodes.len()
	}
}
