use std::fmt;

/// Width of a node box in canvas pixels.
pub const NODE_WIDTH: f64 = 120.0;
/// Height of a node box in canvas pixels.
pub const NODE_HEIGHT: f64 = 40.0;

/// Stable identifier of a node record. Allocated in increasing order, never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "node_{}", self.0)
	}
}

/// A point on the canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
	/// Horizontal offset from the canvas origin.
	pub x: f64,
	/// Vertical offset from the canvas origin.
	pub y: f64,
}

impl Position {
	/// Shorthand constructor.
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

/// A labeled box in the tree.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	/// Identifier of this record.
	pub id: NodeId,
	/// Parent node, `None` for roots. May dangle.
	pub parent: Option<NodeId>,
	/// Top-left corner of the box.
	pub position: Position,
	/// Distance from a root; selects the fill color.
	pub depth: u32,
	/// Text drawn inside the box.
	pub label: String,
}

impl Node {
	/// Center of the node box, where connectors attach.
	pub fn center(&self) -> Position {
		Position::new(
			self.position.x + NODE_WIDTH / 2.0,
			self.position.y + NODE_HEIGHT / 2.0,
		)
	}

	/// Whether `point` falls inside the node box.
	pub fn contains(&self, point: Position) -> bool {
		let (dx, dy) = (point.x - self.position.x, point.y - self.position.y);
		(0.0..=NODE_WIDTH).contains(&dx) && (0.0..=NODE_HEIGHT).contains(&dy)
	}
}
