use thiserror::Error;

use super::types::{EdgeId, NodeId};

/// Misuse of the graph API: references this graph never issued or can no longer honour.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
	/// The id is beyond anything this graph handed out.
	#[error("node {0} was never issued by this graph")]
	UnknownNode(NodeId),
	/// The node existed once but was deleted.
	#[error("node {0} has been removed")]
	RemovedNode(NodeId),
	/// The id is beyond anything this graph handed out.
	#[error("edge {0} was never issued by this graph")]
	UnknownEdge(EdgeId),
	/// Both ends of a requested edge are the same node.
	#[error("edge from {0} to itself")]
	SelfLoop(NodeId),
}

/// Result of a graph operation.
pub type Result<T> = std::result::Result<T, GraphError>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn messages_name_the_handle() {
		assert_eq!(
			GraphError::UnknownNode(NodeId(7)).to_string(),
			"node n7 was never issued by this graph"
		);
		assert_eq!(GraphError::SelfLoop(NodeId(2)).to_string(), "edge from n2 to itself");
		assert_eq!(GraphError::UnknownEdge(EdgeId(3)).to_string(), "edge e3 was never issued by this graph");
	}
}
