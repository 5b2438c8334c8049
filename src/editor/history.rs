//! Bounded, linear undo/redo log.
//!
//! Entries live in a `VecDeque` so evicting the oldest one is O(1). The
//! cursor is kept as the number of applied entries: `0` means nothing is
//! applied (cursor -1), `total` means fully forward.
//!
//! ```text
//! record(a) record(b) record(c)    [a b c]   applied = 3
//! undo() undo()                    [a b c]   applied = 1
//! record(d)                        [a d]     applied = 2   (b, c dropped)
//! ```

use std::collections::VecDeque;

use super::node::{NodeId, Position};

/// Default number of actions kept in the log.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// A recorded mutation, with enough state to play it in either direction.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
	/// The node was added.
	Create {
		/// The new node.
		node: NodeId,
	},
	/// The node was repositioned.
	Move {
		/// The moved node.
		node: NodeId,
		/// Position before the move.
		from: Position,
		/// Position after the move.
		to: Position,
	},
	/// The node's label changed.
	Edit {
		/// The renamed node.
		node: NodeId,
		/// Label before the edit.
		old_text: String,
		/// Label after the edit.
		new_text: String,
	},
}

impl Action {
	/// The node this action touches.
	pub fn node(&self) -> NodeId {
		match self {
			Action::Create { node } | Action::Move { node, .. } | Action::Edit { node, .. } => {
				*node
			}
		}
	}

	/// Short name for logs.
	pub fn kind(&self) -> &'static str {
		match self {
			Action::Create { .. } => "create",
			Action::Move { .. } => "move",
			Action::Edit { .. } => "edit",
		}
	}
}

/// The action log and its cursor.
#[derive(Clone, Debug)]
pub struct History {
	entries: VecDeque<Action>,
	applied: usize,
	limit: usize,
}

impl Default for History {
	fn default() -> Self {
		Self::with_limit(DEFAULT_HISTORY_LIMIT)
	}
}

impl History {
	/// An empty log keeping at most `limit` entries (at least one).
	pub fn with_limit(limit: usize) -> Self {
		let limit = limit.max(1);
		Self {
			entries: VecDeque::with_capacity(limit + 1),
			applied: 0,
			limit,
		}
	}

	/// Append an applied action and move the cursor onto it.
	///
	/// Entries past the cursor (the redo branch) are dropped first and
	/// returned, so the caller can release anything only they referenced.
	/// Undone entries are never kept behind a new one: walking back over
	/// them would revert changes that are no longer applied.
	/// The oldest entry is evicted once the log grows past its limit.
	pub fn record(&mut self, action: Action) -> Vec<Action> {
		let dropped: Vec<Action> = self.entries.drain(self.applied..).collect();
		self.entries.push_back(action);
		if self.entries.len() > self.limit {
			self.entries.pop_front();
		}
		self.applied = self.entries.len();
		dropped
	}

	/// Move the cursor back one step, returning the action to revert.
	pub fn step_back(&mut self) -> Option<&Action> {
		if self.applied == 0 {
			return None;
		}
		self.applied -= 1;
		self.entries.get(self.applied)
	}

	/// Move the cursor forward one step, returning the action to reapply.
	pub fn step_forward(&mut self) -> Option<&Action> {
		if self.applied == self.entries.len() {
			return None;
		}
		self.applied += 1;
		self.entries.get(self.applied - 1)
	}

	/// Index of the last applied action, `None` when nothing is applied.
	pub fn cursor(&self) -> Option<usize> {
		self.applied.checked_sub(1)
	}

	/// Number of applied actions.
	pub fn applied(&self) -> usize {
		self.applied
	}

	/// Number of entries in the log, applied or not.
	pub fn total(&self) -> usize {
		self.entries.len()
	}

	/// Maximum number of entries kept.
	pub fn limit(&self) -> usize {
		self.limit
	}

	/// Entries from oldest to newest.
	pub fn iter(&self) -> impl Iterator<Item = &Action> {
		self.entries.iter()
	}
}
