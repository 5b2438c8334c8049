use log::{debug, warn};

use crate::editor::{EditorConfig, EditorState, NodeId, Position};

use super::types::NodeSeed;

/// Pointer travel (in pixels) before a press on a node turns into a drag.
pub const DRAG_THRESHOLD: f64 = 3.0;

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node: Option<NodeId>,
	pub moved: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub origin: Position,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<NodeId>,
}

/// Everything the canvas needs between events: the editing session plus
/// pointer bookkeeping.
pub struct MindMapState {
	pub editor: EditorState,
	pub drag: DragState,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
}

impl MindMapState {
	pub fn new(seeds: &[NodeSeed], config: &EditorConfig, width: f64, height: f64) -> Self {
		let mut editor = EditorState::new(config);
		for seed in seeds {
			editor.create_node(seed.label.clone(), seed.parent, seed.position, seed.depth);
		}

		Self {
			editor,
			drag: DragState::default(),
			hover: HoverState::default(),
			width,
			height,
		}
	}

	pub fn node_at_position(&self, x: f64, y: f64) -> Option<NodeId> {
		self.editor.node_at(Position::new(x, y))
	}

	pub fn set_hover(&mut self, node: Option<NodeId>) {
		self.hover.node = node;
	}

	pub fn is_hovered(&self, id: NodeId) -> bool {
		self.hover.node == Some(id)
	}

	/// The node currently following the pointer, once it has actually moved.
	pub fn dragged(&self) -> Option<NodeId> {
		self.drag.node.filter(|_| self.drag.active && self.drag.moved)
	}

	pub fn is_dragging(&self, id: NodeId) -> bool {
		self.dragged() == Some(id)
	}

	/// Undo (or redo) one step. Refused while a drag is held, since the
	/// drag's origin was captured against the current history.
	pub fn step_history(&mut self, redo: bool) -> bool {
		if self.drag.active {
			debug!("ignoring {} during a drag", if redo { "redo" } else { "undo" });
			return false;
		}
		if redo { self.editor.redo() } else { self.editor.undo() }
	}

	/// Arm a drag if the press landed on a node.
	pub fn begin_drag(&mut self, x: f64, y: f64) -> bool {
		let Some(id) = self.node_at_position(x, y) else {
			return false;
		};
		let Some(node) = self.editor.node(id) else {
			return false;
		};
		self.drag = DragState {
			active: true,
			node: Some(id),
			moved: false,
			start_x: x,
			start_y: y,
			origin: node.position,
		};
		true
	}

	pub fn drag_to(&mut self, x: f64, y: f64) {
		let Some(id) = self.drag.node.filter(|_| self.drag.active) else {
			return;
		};
		let (dx, dy) = (x - self.drag.start_x, y - self.drag.start_y);
		if !self.drag.moved && dx.hypot(dy) < DRAG_THRESHOLD {
			return;
		}
		self.drag.moved = true;
		let to = Position::new(self.drag.origin.x + dx, self.drag.origin.y + dy);
		if let Err(err) = self.editor.drag_node(id, to) {
			warn!("drag aborted: {err}");
			self.drag = DragState::default();
		}
	}

	/// Release the pointer. Returns true if a move was recorded.
	pub fn end_drag(&mut self) -> bool {
		let drag = std::mem::take(&mut self.drag);
		let Some(id) = drag.node.filter(|_| drag.active && drag.moved) else {
			return false;
		};
		match self.editor.finish_drag(id, drag.origin) {
			Ok(recorded) => recorded,
			Err(err) => {
				warn!("could not record move: {err}");
				false
			}
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}
