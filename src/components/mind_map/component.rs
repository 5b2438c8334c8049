use std::cell::RefCell;
use std::rc::Rc;

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use log::{error, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent, Window};

use super::render;
use super::state::MindMapState;
use super::types::NodeSeed;
use crate::editor::{EditRequest, EditResponse, EditorConfig, EditorState, Position, Status};

type SharedState = Rc<RefCell<Option<MindMapState>>>;

fn window_size(window: &Window) -> (f64, f64) {
	let dim = |value: Result<JsValue, JsValue>, fallback: f64| {
		value.ok().and_then(|v| v.as_f64()).unwrap_or(fallback)
	};
	(
		dim(window.inner_width(), 800.0),
		dim(window.inner_height(), 600.0),
	)
}

fn local_point(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get_untracked()?;
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

fn publish_status(status: RwSignal<Status>, editor: &EditorState) {
	let next = editor.status();
	if status.get_untracked() != next {
		status.set(next);
	}
}

/// Undo/redo shortcut carried by a key press, if any.
fn shortcut(ev: &KeyboardEvent) -> Option<bool> {
	if !(ev.ctrl_key() || ev.meta_key()) {
		return None;
	}
	match ev.key().to_lowercase().as_str() {
		"z" if ev.shift_key() => Some(true),
		"z" => Some(false),
		"y" => Some(true),
		_ => None,
	}
}

#[component]
pub fn MindMapCanvas(
	#[prop(into)] seed: Signal<Vec<NodeSeed>>,
	#[prop(optional)] config: EditorConfig,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let input_ref = NodeRef::<leptos::html::Input>::new();
	let status = RwSignal::new(Status::default());
	let editing = RwSignal::new(None::<EditRequest>);
	let draft = RwSignal::new(String::new());

	let state: SharedState = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let keydown_cb: Rc<RefCell<Option<Closure<dyn FnMut(KeyboardEvent)>>>> =
		Rc::new(RefCell::new(None));
	let (state_init, animate_init, resize_cb_init, keydown_cb_init) = (
		state.clone(),
		animate.clone(),
		resize_cb.clone(),
		keydown_cb.clone(),
	);

	Effect::new(move |_| {
		let Some(canvas): Option<HtmlCanvasElement> = canvas_ref.get() else {
			return;
		};
		let Some(window) = web_sys::window() else {
			error!("mind map needs a browser window");
			return;
		};

		let (w, h) = if fullscreen {
			window_size(&window)
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = match canvas.get_context("2d") {
			Ok(Some(ctx)) => match ctx.dyn_into() {
				Ok(ctx) => ctx,
				Err(_) => {
					error!("2d context has an unexpected type");
					return;
				}
			},
			_ => {
				error!("canvas has no 2d context");
				return;
			}
		};

		let session = MindMapState::new(&seed.get(), &config, w, h);
		info!("mind map ready with {} nodes", session.editor.node_count());
		publish_status(status, &session.editor);
		*state_init.borrow_mut() = Some(session);

		if fullscreen && resize_cb_init.borrow().is_none() {
			let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some(win) = web_sys::window() else {
					return;
				};
				let (nw, nh) = window_size(&win);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut s) = *state_resize.borrow_mut() {
					s.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				if window
					.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref())
					.is_err()
				{
					error!("could not listen for window resizes");
				}
			}
		}

		if keydown_cb_init.borrow().is_none() {
			let state_key = state_init.clone();
			*keydown_cb_init.borrow_mut() = Some(Closure::new(move |ev: KeyboardEvent| {
				if editing.with_untracked(Option::is_some) {
					return;
				}
				let Some(redo) = shortcut(&ev) else {
					return;
				};
				ev.prevent_default();
				if let Some(ref mut s) = *state_key.borrow_mut() {
					if s.step_history(redo) {
						publish_status(status, &s.editor);
					}
				}
			}));
			if let Some(ref cb) = *keydown_cb_init.borrow() {
				if window
					.add_event_listener_with_callback("keydown", cb.as_ref().unchecked_ref())
					.is_err()
				{
					error!("could not listen for undo/redo shortcuts");
				}
			}
		}

		if animate_init.borrow().is_none() {
			let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
			*animate_init.borrow_mut() = Some(Closure::new(move || {
				if let Some(ref s) = *state_anim.borrow() {
					render::render(s, &ctx);
				}
				if let (Some(win), Some(cb)) = (web_sys::window(), &*animate_inner.borrow()) {
					let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
				}
			}));
			if let Some(ref cb) = *animate_init.borrow() {
				let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		if ev.button() != 0 {
			return;
		}
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_md.borrow_mut() {
			s.begin_drag(x, y);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			if s.drag.active {
				s.drag_to(x, y);
			} else {
				let hovered = s.node_at_position(x, y);
				s.set_hover(hovered);
			}
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_mu.borrow_mut() {
			if s.end_drag() {
				publish_status(status, &s.editor);
			}
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			if s.end_drag() {
				publish_status(status, &s.editor);
			}
			s.set_hover(None);
		}
	};

	let state_cm = state.clone();
	let on_contextmenu = move |ev: MouseEvent| {
		ev.prevent_default();
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_cm.borrow_mut() {
			let at = Position::new(x, y);
			match s.node_at_position(x, y) {
				Some(parent) => {
					if let Err(err) = s.editor.create_child(parent, at) {
						warn!("could not add child: {err}");
					}
				}
				None => {
					s.editor.create_root(at);
				}
			}
			publish_status(status, &s.editor);
		}
	};

	let state_dc = state.clone();
	let on_dblclick = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		let guard = state_dc.borrow();
		let Some(s) = guard.as_ref() else {
			return;
		};
		let Some(id) = s.node_at_position(x, y) else {
			return;
		};
		match s.editor.request_edit(id) {
			Ok(request) => {
				draft.set(request.current.clone());
				editing.set(Some(request));
				request_animation_frame(move || {
					if let Some(input) = input_ref.get_untracked() {
						let _ = input.focus();
						input.select();
					}
				});
			}
			Err(err) => warn!("cannot rename: {err}"),
		}
	};

	let state_edit = state.clone();
	let on_edit_submit = move |ev: SubmitEvent| {
		ev.prevent_default();
		let Some(request) = editing.get_untracked() else {
			return;
		};
		editing.set(None);
		if let Some(ref mut s) = *state_edit.borrow_mut() {
			let response = EditResponse {
				node: request.node,
				text: draft.get_untracked(),
			};
			match s.editor.apply_edit(response) {
				Ok(_) => publish_status(status, &s.editor),
				Err(err) => warn!("rename dropped: {err}"),
			}
		}
	};

	let on_edit_keydown = move |ev: KeyboardEvent| {
		if ev.key() == "Escape" {
			editing.set(None);
		}
	};

	let anchor_px = move |pick: fn(&Position) -> f64| {
		editing.with(|request| format!("{}px", request.as_ref().map_or(0.0, |r| pick(&r.anchor))))
	};

	view! {
		<div class="mind-map">
			<canvas
				node_ref=canvas_ref
				class="mind-map-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:contextmenu=on_contextmenu
				on:dblclick=on_dblclick
				style="display: block; cursor: default;"
			/>
			<div class="mind-map-status">{move || status.get().to_string()}</div>
			<form
				class="mind-map-edit"
				style:position="absolute"
				style:display=move || {
					if editing.with(Option::is_some) { "block" } else { "none" }
				}
				style:left=move || anchor_px(|p| p.x)
				style:top=move || anchor_px(|p| p.y)
				on:submit=on_edit_submit
			>
				<input
					node_ref=input_ref
					type="text"
					prop:value=move || draft.get()
					on:input=move |ev| draft.set(event_target_value(&ev))
					on:keydown=on_edit_keydown
				/>
			</form>
		</div>
	}
}

