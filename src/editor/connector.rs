use log::debug;

use super::node::{NodeId, Position};
use super::store::{GraphStore, get_color};

/// How far above the higher endpoint a connector's control point sits.
pub const CURVE_LIFT: f64 = 100.0;

/// A curve from a parent's center to its child's center.
#[derive(Clone, Debug, PartialEq)]
pub struct Connector {
	/// Node the curve starts at.
	pub parent: NodeId,
	/// Node the curve ends at; its depth picks the color.
	pub child: NodeId,
	/// Parent center.
	pub from: Position,
	/// Child center.
	pub to: Position,
	/// Stroke color.
	pub color: &'static str,
}

impl Connector {
	/// Control point of the quadratic curve.
	pub fn control_point(&self) -> Position {
		Position::new(
			(self.from.x + self.to.x) / 2.0,
			self.from.y.min(self.to.y) - CURVE_LIFT,
		)
	}

	/// The curve as SVG path data.
	pub fn svg_path(&self) -> String {
		let c = self.control_point();
		format!(
			"M {} {} Q {} {}, {} {}",
			self.from.x, self.from.y, c.x, c.y, self.to.x, self.to.y
		)
	}

	/// Whether either end of the curve is `id`.
	pub fn touches(&self, id: NodeId) -> bool {
		self.parent == id || self.child == id
	}
}

/// Derive every connector from the visible nodes' parent references.
///
/// A parent that is missing or hidden yields no connector.
pub fn compute_connectors(store: &GraphStore) -> Vec<Connector> {
	store
		.visible()
		.filter_map(|child| {
			let parent_id = child.parent?;
			let Some(parent) = store.get(parent_id) else {
				debug!("skipping connector for {}: parent {} not drawn", child.id, parent_id);
				return None;
			};
			Some(Connector {
				parent: parent.id,
				child: child.id,
				from: parent.center(),
				to: child.center(),
				color: get_color(child.depth),
			})
		})
		.collect()
}
