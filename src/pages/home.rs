use leptos::prelude::*;

use crate::components::mind_map::{MindMapCanvas, NodeSeed};

/// The tree shown on first load.
fn initial_nodes() -> Vec<NodeSeed> {
	vec![
		NodeSeed::root("Root", 400.0, 100.0),
		NodeSeed::child("Child 1", 0, 200.0, 200.0, 1),
		NodeSeed::child("Child 2", 0, 600.0, 200.0, 1),
		NodeSeed::child("Grandchild", 1, 300.0, 300.0, 2),
	]
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let seed = Signal::derive(initial_nodes);

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="fullscreen-map">
				<MindMapCanvas seed=seed fullscreen=true />
				<div class="map-overlay">
					<h1>"Mind Map"</h1>
					<p class="subtitle">
						"Right-click to add a node (on a node for a child). Drag to move. "
						"Double-click to rename. Ctrl+Z / Ctrl+Y to undo and redo."
					</p>
				</div>
			</div>
		</ErrorBoundary>
	}
}
