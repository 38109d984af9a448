use thiserror::Error;

use super::model::NodeId;

/// Why an edge could not be added.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidEdge {
	/// An endpoint does not name an existing node.
	#[error("node {0} does not exist")]
	UnknownNode(NodeId),

	/// Both endpoints are the same node.
	#[error("node {0} cannot be connected to itself")]
	SelfLoop(NodeId),

	/// The weight parsed as a number below zero.
	#[error("edge weight must not be negative, got {0}")]
	NegativeWeight(String),

	/// The weight text is not a finite number in range.
	#[error("edge weight {0:?} is not a valid number")]
	InvalidWeight(String),
}
