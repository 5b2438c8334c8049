use crate::editor::{NodeId, Position};

/// A node to create when the canvas mounts.
///
/// Seeds are created in order, so the n-th seed becomes `node_n` and later
/// seeds can name earlier ones as their parent.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeSeed {
	pub label: String,
	pub parent: Option<NodeId>,
	pub position: Position,
	pub depth: u32,
}

impl NodeSeed {
	pub fn root(label: impl Into<String>, x: f64, y: f64) -> Self {
		Self {
			label: label.into(),
			parent: None,
			position: Position::new(x, y),
			depth: 0,
		}
	}

	pub fn child(label: impl Into<String>, parent: u32, x: f64, y: f64, depth: u32) -> Self {
		Self {
			label: label.into(),
			parent: Some(NodeId(parent)),
			position: Position::new(x, y),
			depth,
		}
	}
}
