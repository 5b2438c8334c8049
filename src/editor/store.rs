use std::collections::{BTreeMap, BTreeSet};

use super::node::{Node, NodeId, Position};

/// Fill colors by depth; the last entry covers every deeper level.
pub const PALETTE: &[&str] = &[
	"#4CAF50", "#2196F3", "#FF9800", "#E91E63", "#9C27B0", "#00BCD4", "#FFEB3B", "#795548",
];

/// Color for a node (or a connector leading to it) at `depth`.
pub fn get_color(depth: u32) -> &'static str {
	let idx = usize::try_from(depth).unwrap_or(usize::MAX);
	PALETTE[idx.min(PALETTE.len() - 1)]
}

/// Authoritative node records.
///
/// Records are never dropped while history can still reach them. Undoing a
/// create only hides the record, so redo can bring back the same node.
#[derive(Debug, Default)]
pub struct GraphStore {
	nodes: BTreeMap<NodeId, Node>,
	hidden: BTreeSet<NodeId>,
	next_id: u32,
}

impl GraphStore {
	/// An empty store whose first node will be `node_0`.
	pub fn new() -> Self {
		Self::default()
	}

	/// The id the next [`GraphStore::insert`] will hand out.
	pub fn peek_id(&self) -> NodeId {
		NodeId(self.next_id)
	}

	/// Store a new visible node. `parent` is not checked.
	pub fn insert(
		&mut self,
		label: impl Into<String>,
		parent: Option<NodeId>,
		position: Position,
		depth: u32,
	) -> NodeId {
		let id = NodeId(self.next_id);
		self.next_id += 1;
		self.nodes.insert(
			id,
			Node {
				id,
				parent,
				position,
				depth,
				label: label.into(),
			},
		);
		id
	}

	/// A visible node.
	pub fn get(&self, id: NodeId) -> Option<&Node> {
		self.nodes.get(&id).filter(|_| !self.hidden.contains(&id))
	}

	/// A visible node, mutably.
	pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
		if self.hidden.contains(&id) {
			return None;
		}
		self.nodes.get_mut(&id)
	}

	/// Any record, hidden or not. History replay goes through here.
	pub(crate) fn record_mut(&mut self, id: NodeId) -> Option<&mut Node> {
		self.nodes.get_mut(&id)
	}

	/// Take a node out of the visible graph. Returns false if it was not visible.
	pub fn hide(&mut self, id: NodeId) -> bool {
		self.nodes.contains_key(&id) && self.hidden.insert(id)
	}

	/// Put a hidden node back. Returns false if it was not hidden.
	pub fn show(&mut self, id: NodeId) -> bool {
		self.hidden.remove(&id)
	}

	/// Drop a hidden record for good. Visible nodes are left alone.
	pub fn forget(&mut self, id: NodeId) -> bool {
		if !self.hidden.remove(&id) {
			return false;
		}
		self.nodes.remove(&id).is_some()
	}

	/// Visible nodes in creation order.
	pub fn visible(&self) -> impl DoubleEndedIterator<Item = &Node> {
		self.nodes
			.values()
			.filter(|node| !self.hidden.contains(&node.id))
	}

	/// Number of visible nodes.
	pub(crate) fn visible_count(&self) -> usize {
		self.nodes.len() - self.hidden.len()
	}

	/// Topmost visible node under `point`. Later nodes are drawn over earlier ones.
	pub fn node_at(&self, point: Position) -> Option<NodeId> {
		self.visible()
			.rev()
			.find(|node| node.contains(point))
			.map(|node| node.id)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn color_is_clamped_to_last_entry() {
		assert_eq!(get_color(0), "#4CAF50");
		assert_eq!(get_color(1), "#2196F3");
		assert_eq!(get_color(7), "#795548");
		assert_eq!(get_color(8), "#795548");
		assert_eq!(get_color(u32::MAX), "#795548");
		assert_eq!(get_color(3), get_color(3));
	}

	#[test]
	fn ids_are_sequential() {
		let mut store = GraphStore::new();
		assert_eq!(store.peek_id(), NodeId(0));
		let a = store.insert("a", None, Position::default(), 0);
		let b = store.insert("b", Some(a), Position::default(), 1);
		assert_eq!((a, b), (NodeId(0), NodeId(1)));
		assert_eq!(store.peek_id(), NodeId(2));
	}

	#[test]
	fn missing_parent_is_accepted() {
		let mut store = GraphStore::new();
		let id = store.insert("orphan", Some(NodeId(99)), Position::default(), 1);
		assert_eq!(store.get(id).map(|n| n.parent), Some(Some(NodeId(99))));
	}

	#[test]
	fn hidden_nodes_are_not_visible_but_keep_their_record() {
		let mut store = GraphStore::new();
		let id = store.insert("a", None, Position::new(1.0, 2.0), 0);
		assert!(store.hide(id));
		assert!(!store.hide(id));
		assert!(store.get(id).is_none());
		assert!(store.get_mut(id).is_none());
		assert!(store.record_mut(id).is_some());
		assert_eq!(store.visible_count(), 0);

		assert!(store.show(id));
		assert_eq!(store.get(id).map(|n| n.position), Some(Position::new(1.0, 2.0)));
		assert_eq!(store.visible_count(), 1);
	}

	#[test]
	fn forget_only_drops_hidden_records() {
		let mut store = GraphStore::new();
		let id = store.insert("a", None, Position::default(), 0);
		assert!(!store.forget(id));
		store.hide(id);
		assert!(store.forget(id));
		assert!(store.record_mut(id).is_none());
		// ids keep counting past forgotten records
		assert_eq!(store.insert("b", None, Position::default(), 0), NodeId(1));
	}

	#[test]
	fn node_at_prefers_the_newest_overlapping_node() {
		let mut store = GraphStore::new();
		let under = store.insert("under", None, Position::new(0.0, 0.0), 0);
		let over = store.insert("over", None, Position::new(50.0, 10.0), 0);
		assert_eq!(store.node_at(Position::new(60.0, 20.0)), Some(over));
		assert_eq!(store.node_at(Position::new(10.0, 10.0)), Some(under));
		assert_eq!(store.node_at(Position::new(500.0, 500.0)), None);

		store.hide(over);
		assert_eq!(store.node_at(Position::new(60.0, 20.0)), Some(under));
	}
}
