//! Browser-independent editing core: node records, the undo/redo log and
//! connector derivation.
//!
//! Every mutation goes through [`EditorState`], which records an [`Action`]
//! and rebuilds the connector list from scratch. Undo and redo replay the
//! recorded snapshots; they never consult the view.

mod connector;
mod error;
mod history;
mod node;
mod store;

use std::fmt;

use log::{debug, warn};

pub use connector::{CURVE_LIFT, Connector, compute_connectors};
pub use error::EditorError;
pub use history::{Action, DEFAULT_HISTORY_LIMIT, History};
pub use node::{NODE_HEIGHT, NODE_WIDTH, Node, NodeId, Position};
pub use store::{GraphStore, PALETTE, get_color};

/// Session settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditorConfig {
	/// Number of actions kept for undo.
	pub history_limit: usize,
}

impl Default for EditorConfig {
	fn default() -> Self {
		Self {
			history_limit: DEFAULT_HISTORY_LIMIT,
		}
	}
}

/// Read-only projection of the history cursor for display.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Status {
	/// Number of applied actions (cursor + 1).
	pub step: usize,
	/// Number of recorded actions.
	pub total: usize,
}

impl fmt::Display for Status {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Steps: {}/{}", self.step, self.total)
	}
}

/// Handed to the shell when the user asks to rename a node.
#[derive(Clone, Debug, PartialEq)]
pub struct EditRequest {
	/// Node being renamed.
	pub node: NodeId,
	/// Its label when the request was made.
	pub current: String,
	/// Where the shell should place its input.
	pub anchor: Position,
}

/// The shell's answer to an [`EditRequest`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditResponse {
	/// Node being renamed.
	pub node: NodeId,
	/// Text entered by the user.
	pub text: String,
}

/// One editing session: node records, their history and derived connectors.
#[derive(Debug)]
pub struct EditorState {
	store: GraphStore,
	history: History,
	connectors: Vec<Connector>,
	revision: u64,
}

impl Default for EditorState {
	fn default() -> Self {
		Self::new(&EditorConfig::default())
	}
}

impl EditorState {
	/// An empty session.
	pub fn new(config: &EditorConfig) -> Self {
		Self {
			store: GraphStore::new(),
			history: History::with_limit(config.history_limit),
			connectors: Vec::new(),
			revision: 0,
		}
	}

	/// Add a node and record its creation. `parent` may name a node that
	/// does not exist; such a node simply gets no connector.
	pub fn create_node(
		&mut self,
		label: impl Into<String>,
		parent: Option<NodeId>,
		position: Position,
		depth: u32,
	) -> NodeId {
		let id = self.store.insert(label, parent, position, depth);
		self.commit(Action::Create { node: id });
		id
	}

	/// Add a root named after its id.
	pub fn create_root(&mut self, position: Position) -> NodeId {
		let label = self.default_label();
		self.create_node(label, None, position, 0)
	}

	/// Add a child one level below `parent`, named after its id.
	pub fn create_child(
		&mut self,
		parent: NodeId,
		position: Position,
	) -> Result<NodeId, EditorError> {
		let depth = self
			.store
			.get(parent)
			.ok_or(EditorError::NodeNotFound(parent))?
			.depth + 1;
		let label = self.default_label();
		Ok(self.create_node(label, Some(parent), position, depth))
	}

	/// Reposition a node and record the move. Returns false if it was already there.
	pub fn move_node(&mut self, id: NodeId, to: Position) -> Result<bool, EditorError> {
		let node = self.store.get_mut(id).ok_or(EditorError::NodeNotFound(id))?;
		let from = node.position;
		if from == to {
			return Ok(false);
		}
		node.position = to;
		self.commit(Action::Move { node: id, from, to });
		Ok(true)
	}

	/// Reposition a node without recording anything. Used while a drag is in
	/// progress; [`EditorState::finish_drag`] records the whole gesture.
	pub fn drag_node(&mut self, id: NodeId, to: Position) -> Result<(), EditorError> {
		let node = self.store.get_mut(id).ok_or(EditorError::NodeNotFound(id))?;
		node.position = to;
		self.redraw();
		Ok(())
	}

	/// Record a drag that started at `origin`. Returns false if the node
	/// ended up where it started.
	pub fn finish_drag(&mut self, id: NodeId, origin: Position) -> Result<bool, EditorError> {
		let to = self
			.store
			.get(id)
			.ok_or(EditorError::NodeNotFound(id))?
			.position;
		if to == origin {
			return Ok(false);
		}
		self.commit(Action::Move {
			node: id,
			from: origin,
			to,
		});
		Ok(true)
	}

	/// Change a node's label. Empty or unchanged text is ignored.
	pub fn rename_node(
		&mut self,
		id: NodeId,
		text: impl Into<String>,
	) -> Result<bool, EditorError> {
		let text = text.into();
		let node = self.store.get_mut(id).ok_or(EditorError::NodeNotFound(id))?;
		if text.is_empty() || node.label == text {
			return Ok(false);
		}
		let old_text = std::mem::replace(&mut node.label, text.clone());
		self.commit(Action::Edit {
			node: id,
			old_text,
			new_text: text,
		});
		Ok(true)
	}

	/// Start renaming a node. The shell collects the text and answers with
	/// [`EditorState::apply_edit`].
	pub fn request_edit(&self, id: NodeId) -> Result<EditRequest, EditorError> {
		let node = self.store.get(id).ok_or(EditorError::NodeNotFound(id))?;
		Ok(EditRequest {
			node: id,
			current: node.label.clone(),
			anchor: node.position,
		})
	}

	/// Finish a rename started with [`EditorState::request_edit`].
	pub fn apply_edit(&mut self, response: EditResponse) -> Result<bool, EditorError> {
		self.rename_node(response.node, response.text)
	}

	/// Revert the action at the cursor. Returns false at the start of history.
	pub fn undo(&mut self) -> bool {
		let Some(action) = self.history.step_back() else {
			return false;
		};
		debug!("undo {} on {}", action.kind(), action.node());
		match action {
			Action::Create { node } => {
				self.store.hide(*node);
			}
			Action::Move { node, from, .. } => set_position(&mut self.store, *node, *from),
			Action::Edit { node, old_text, .. } => set_label(&mut self.store, *node, old_text),
		}
		self.redraw();
		true
	}

	/// Reapply the action after the cursor. Returns false at the end of history.
	pub fn redo(&mut self) -> bool {
		let Some(action) = self.history.step_forward() else {
			return false;
		};
		debug!("redo {} on {}", action.kind(), action.node());
		match action {
			Action::Create { node } => {
				self.store.show(*node);
			}
			Action::Move { node, to, .. } => set_position(&mut self.store, *node, *to),
			Action::Edit { node, new_text, .. } => set_label(&mut self.store, *node, new_text),
		}
		self.redraw();
		true
	}

	/// Current cursor position for display.
	pub fn status(&self) -> Status {
		Status {
			step: self.history.applied(),
			total: self.history.total(),
		}
	}

	/// Connectors as of the last redraw.
	pub fn connectors(&self) -> &[Connector] {
		&self.connectors
	}

	/// Incremented by every redraw.
	pub fn revision(&self) -> u64 {
		self.revision
	}

	/// A visible node.
	pub fn node(&self, id: NodeId) -> Option<&Node> {
		self.store.get(id)
	}

	/// Number of visible nodes.
	pub fn node_count(&self) -> usize {
		self.store.visible_count()
	}

	/// Visible nodes in drawing order.
	pub fn nodes(&self) -> impl Iterator<Item = &Node> {
		self.store.visible()
	}

	/// Topmost visible node under `point`.
	pub fn node_at(&self, point: Position) -> Option<NodeId> {
		self.store.node_at(point)
	}

	/// The action log.
	pub fn history(&self) -> &History {
		&self.history
	}

	fn default_label(&self) -> String {
		format!("Node {}", self.store.peek_id().0)
	}

	fn commit(&mut self, action: Action) {
		debug!("record {} on {}", action.kind(), action.node());
		for dropped in self.history.record(action) {
			if let Action::Create { node } = dropped {
				if self.store.forget(node) {
					debug!("forgot {node}, its creation can no longer be redone");
				}
			}
		}
		self.redraw();
	}

	fn redraw(&mut self) {
		self.connectors = compute_connectors(&self.store);
		self.revision += 1;
	}
}

fn set_position(store: &mut GraphStore, id: NodeId, position: Position) {
	match store.record_mut(id) {
		Some(node) => node.position = position,
		None => warn!("history refers to unknown node {id}"),
	}
}

fn set_label(store: &mut GraphStore, id: NodeId, label: &str) {
	match store.record_mut(id) {
		Some(node) => label.clone_into(&mut node.label),
		None => warn!("history refers to unknown node {id}"),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn snapshot(editor: &EditorState) -> Vec<Node> {
		editor.nodes().cloned().collect()
	}

	fn label_of(editor: &EditorState, id: NodeId) -> Option<&str> {
		editor.node(id).map(|node| node.label.as_str())
	}

	#[test]
	fn rename_undo_redo_scenario() {
		let mut editor = EditorState::default();
		let root = editor.create_node("Root", None, Position::new(400.0, 100.0), 0);
		let child = editor.create_node("Child 1", Some(root), Position::new(200.0, 200.0), 1);
		assert!(editor.rename_node(child, "X").unwrap());

		assert!(editor.undo());
		assert_eq!(label_of(&editor, child), Some("Child 1"));
		assert!(editor.redo());
		assert_eq!(label_of(&editor, child), Some("X"));
		assert_eq!(editor.status().to_string(), "Steps: 3/3");
	}

	#[test]
	fn boundary_undo_and_redo_change_nothing() {
		let mut editor = EditorState::default();
		assert!(!editor.undo());
		assert_eq!(editor.revision(), 0);
		assert_eq!(editor.status(), Status::default());

		editor.create_root(Position::new(1.0, 1.0));
		let (revision, status, nodes) = (editor.revision(), editor.status(), snapshot(&editor));
		assert!(!editor.redo());
		assert_eq!(editor.revision(), revision);
		assert_eq!(editor.status(), status);
		assert_eq!(snapshot(&editor), nodes);

		assert!(editor.undo());
		let revision = editor.revision();
		assert!(!editor.undo());
		assert_eq!(editor.revision(), revision);
		assert_eq!(editor.status(), Status { step: 0, total: 1 });
	}

	#[test]
	fn full_undo_empties_and_full_redo_restores() {
		let mut editor = EditorState::default();
		let root = editor.create_root(Position::new(400.0, 100.0));
		let child = editor.create_child(root, Position::new(200.0, 200.0)).unwrap();
		editor.move_node(child, Position::new(250.0, 260.0)).unwrap();
		editor.rename_node(root, "Topic").unwrap();
		let leaf = editor.create_child(child, Position::new(300.0, 300.0)).unwrap();
		editor.move_node(root, Position::new(10.0, 10.0)).unwrap();
		editor.rename_node(leaf, "Leaf").unwrap();

		let steps = editor.status().total;
		let final_nodes = snapshot(&editor);
		let final_connectors = editor.connectors().to_vec();

		for _ in 0..steps {
			assert!(editor.undo());
		}
		assert_eq!(editor.node_count(), 0);
		assert!(editor.connectors().is_empty());

		for _ in 0..steps {
			assert!(editor.redo());
		}
		assert_eq!(snapshot(&editor), final_nodes);
		assert_eq!(editor.connectors(), final_connectors.as_slice());
	}

	#[test]
	fn undo_of_move_restores_the_prior_position() {
		let mut editor = EditorState::default();
		let id = editor.create_root(Position::new(400.0, 100.0));
		editor.move_node(id, Position::new(50.0, 60.0)).unwrap();

		editor.undo();
		assert_eq!(editor.node(id).map(|n| n.position), Some(Position::new(400.0, 100.0)));
		editor.redo();
		assert_eq!(editor.node(id).map(|n| n.position), Some(Position::new(50.0, 60.0)));
	}

	#[test]
	fn move_to_same_position_is_not_recorded() {
		let mut editor = EditorState::default();
		let id = editor.create_root(Position::new(5.0, 5.0));
		assert_eq!(editor.move_node(id, Position::new(5.0, 5.0)), Ok(false));
		assert_eq!(editor.status().total, 1);
	}

	#[test]
	fn drag_records_a_single_move() {
		let mut editor = EditorState::default();
		let root = editor.create_root(Position::new(0.0, 0.0));
		let child = editor.create_child(root, Position::new(0.0, 100.0)).unwrap();
		let origin = Position::new(0.0, 100.0);

		editor.drag_node(child, Position::new(20.0, 110.0)).unwrap();
		editor.drag_node(child, Position::new(40.0, 120.0)).unwrap();
		assert_eq!(editor.connectors()[0].to, Position::new(100.0, 140.0));
		assert_eq!(editor.status().total, 2);

		assert_eq!(editor.finish_drag(child, origin), Ok(true));
		assert_eq!(editor.status().total, 3);
		editor.undo();
		assert_eq!(editor.node(child).map(|n| n.position), Some(origin));
	}

	#[test]
	fn drag_back_to_origin_records_nothing() {
		let mut editor = EditorState::default();
		let id = editor.create_root(Position::new(0.0, 0.0));
		editor.drag_node(id, Position::new(9.0, 9.0)).unwrap();
		editor.drag_node(id, Position::new(0.0, 0.0)).unwrap();
		assert_eq!(editor.finish_drag(id, Position::new(0.0, 0.0)), Ok(false));
		assert_eq!(editor.status().total, 1);
	}

	#[test]
	fn child_under_missing_parent_has_no_connector() {
		let mut editor = EditorState::default();
		let id = editor.create_node("stray", Some(NodeId(7)), Position::default(), 1);
		assert!(editor.node(id).is_some());
		assert!(editor.connectors().is_empty());
	}

	#[test]
	fn generated_labels_and_depths() {
		let mut editor = EditorState::default();
		let root = editor.create_root(Position::default());
		let child = editor.create_child(root, Position::default()).unwrap();
		assert_eq!(label_of(&editor, root), Some("Node 0"));
		assert_eq!(label_of(&editor, child), Some("Node 1"));
		assert_eq!(editor.node(child).map(|n| n.depth), Some(1));
		assert_eq!(
			editor.create_child(NodeId(9), Position::default()),
			Err(EditorError::NodeNotFound(NodeId(9)))
		);
	}

	#[test]
	fn undone_create_hides_node_and_its_connectors() {
		let mut editor = EditorState::default();
		let root = editor.create_root(Position::default());
		let child = editor.create_child(root, Position::new(0.0, 100.0)).unwrap();
		editor.undo();
		editor.undo();
		assert!(editor.node(root).is_none());
		assert_eq!(
			editor.move_node(child, Position::default()),
			Err(EditorError::NodeNotFound(child))
		);

		editor.redo();
		assert!(editor.node(root).is_some());
		assert!(editor.connectors().is_empty());
		editor.redo();
		assert_eq!(editor.connectors().len(), 1);
	}

	#[test]
	fn new_action_after_undo_discards_redo_branch() {
		let mut editor = EditorState::default();
		let root = editor.create_root(Position::default());
		let undone = editor.create_child(root, Position::default()).unwrap();
		editor.undo();

		let fresh = editor.create_root(Position::new(300.0, 0.0));
		assert_ne!(fresh, undone);
		assert_eq!(editor.status(), Status { step: 2, total: 2 });
		assert!(!editor.redo());
		assert!(editor.node(undone).is_none());
	}

	#[test]
	fn edit_request_round_trip() {
		let mut editor = EditorState::default();
		let id = editor.create_node("Root", None, Position::new(400.0, 100.0), 0);
		let request = editor.request_edit(id).unwrap();
		assert_eq!(request.current, "Root");
		assert_eq!(request.anchor, Position::new(400.0, 100.0));

		let applied = editor.apply_edit(EditResponse {
			node: request.node,
			text: "Plans".into(),
		});
		assert_eq!(applied, Ok(true));
		assert_eq!(label_of(&editor, id), Some("Plans"));
	}

	#[test]
	fn empty_or_unchanged_text_is_ignored() {
		let mut editor = EditorState::default();
		let id = editor.create_node("Root", None, Position::default(), 0);
		assert_eq!(editor.rename_node(id, ""), Ok(false));
		assert_eq!(editor.rename_node(id, "Root"), Ok(false));
		assert_eq!(editor.status().total, 1);
	}

	#[test]
	fn history_limit_comes_from_config() {
		let mut editor = EditorState::new(&EditorConfig { history_limit: 3 });
		for x in 0..5 {
			editor.create_root(Position::new(f64::from(x) * 150.0, 0.0));
		}
		assert_eq!(editor.status(), Status { step: 3, total: 3 });
		while editor.undo() {}
		// the two oldest creations fell out of history and stay
		assert_eq!(editor.node_count(), 2);
	}
}
