//! Weighted undirected graph and the shortest-path search over it.

mod dijkstra;
mod error;
mod model;
mod weight;

pub use dijkstra::{ShortestPath, shortest_path};
pub use error::InvalidEdge;
pub use model::{Adjacent, Cost, Edge, EdgeId, Graph, Node, NodeId, Position, Weight};
pub use weight::parse_weight;
