use thiserror::Error;

use super::node::NodeId;

/// Failures of editor operations that target a specific node.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EditorError {
	/// The node does not exist or its creation has been undone.
	#[error("node {0} not found")]
	NodeNotFound(NodeId),
}
