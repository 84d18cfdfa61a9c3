use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, TouchEvent, Window};

use super::render;
use super::state::CanvasState;
use crate::graph::{Editor, EditorMode, EditorSettings, TraversalKind};

type SharedState = Rc<RefCell<Option<CanvasState>>>;

/// Canvas-local coordinates of a client-space point.
fn local_point(canvas_ref: NodeRef<leptos::html::Canvas>, cx: f64, cy: f64) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((cx - rect.left(), cy - rect.top()))
}

fn touch_point(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &TouchEvent) -> Option<(f64, f64)> {
	let touch = ev.changed_touches().get(0)?;
	local_point(canvas_ref, touch.client_x() as f64, touch.client_y() as f64)
}

#[component]
pub fn GraphCanvas(
	#[prop(optional)] settings: EditorSettings,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: SharedState = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (state_init, animate_init) = (state.clone(), animate.clone());

	let mode = RwSignal::new(settings.initial_mode);
	let directed = RwSignal::new(settings.directed);
	let weighted = RwSignal::new(settings.weighted);
	let dfs = RwSignal::new(false);
	let bfs = RwSignal::new(false);

	let initial = settings;
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window): Option<Window> = web_sys::window() else {
			return;
		};
		let parent = canvas.parent_element();
		let w = width.unwrap_or_else(|| parent.as_ref().map(|p| p.client_width() as f64).unwrap_or(800.0));
		let h = height.unwrap_or_else(|| parent.as_ref().map(|p| p.client_height() as f64).unwrap_or(600.0));
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			log::error!("canvas has no 2d context");
			return;
		};
		*state_init.borrow_mut() = Some(CanvasState::new(initial.clone(), w, h));

		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.tick(0.016);
				render::render(s, &ctx);
			}
			if let (Some(cb), Some(win)) = (&*animate_inner.borrow(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	// Runs an editor action and mirrors the editor's flags into the toolbar signals.
	let with_editor = {
		let state = state.clone();
		move |action: &dyn Fn(&mut Editor)| {
			if let Some(ref mut s) = *state.borrow_mut() {
				action(&mut s.editor);
				mode.set(s.editor.mode());
				directed.set(s.editor.is_directed());
				weighted.set(s.editor.is_weighted());
				dfs.set(s.editor.traversal_active(TraversalKind::Dfs));
				bfs.set(s.editor.traversal_active(TraversalKind::Bfs));
			}
		}
	};

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, ev.client_x() as f64, ev.client_y() as f64) else {
			return;
		};
		if let Some(ref mut s) = *state_md.borrow_mut() {
			s.pointer_down(x, y);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, ev.client_x() as f64, ev.client_y() as f64) else {
			return;
		};
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			s.pointer_move(x, y);
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, ev.client_x() as f64, ev.client_y() as f64) else {
			return;
		};
		if let Some(ref mut s) = *state_mu.borrow_mut() {
			s.pointer_up(x, y);
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.pointer_cancel();
		}
	};

	// Touch handlers swallow the event so the browser does not synthesise mouse events too.
	let state_ts = state.clone();
	let on_touchstart = move |ev: TouchEvent| {
		ev.prevent_default();
		let Some((x, y)) = touch_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_ts.borrow_mut() {
			s.pointer_down(x, y);
		}
	};

	let state_tm = state.clone();
	let on_touchmove = move |ev: TouchEvent| {
		ev.prevent_default();
		let Some((x, y)) = touch_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_tm.borrow_mut() {
			s.pointer_move(x, y);
		}
	};

	let state_te = state.clone();
	let on_touchend = move |ev: TouchEvent| {
		ev.prevent_default();
		let Some((x, y)) = touch_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_te.borrow_mut() {
			s.pointer_up(x, y);
		}
	};

	let state_tc = state.clone();
	let on_touchcancel = move |_: TouchEvent| {
		if let Some(ref mut s) = *state_tc.borrow_mut() {
			s.pointer_cancel();
		}
	};

	let act = {
		let with_editor = with_editor.clone();
		move |action: fn(&mut Editor)| {
			let with_editor = with_editor.clone();
			move |_: MouseEvent| with_editor(&action)
		}
	};
	let toggle = {
		let with_editor = with_editor.clone();
		move |set: fn(&mut Editor, bool)| {
			let with_editor = with_editor.clone();
			move |ev: web_sys::Event| {
				let on = event_target_checked(&ev);
				with_editor(&|e: &mut Editor| set(e, on));
			}
		}
	};

	view! {
		<div class="graph-editor">
			<div class="toolbar">
				<button
					disabled={move || mode.get() == EditorMode::AddNodes}
					on:click={act(|e| e.set_mode(EditorMode::AddNodes))}
				>
					"Nodes"
				</button>
				<button
					disabled={move || mode.get() == EditorMode::AddEdges}
					on:click={act(|e| e.set_mode(EditorMode::AddEdges))}
				>
					"Edges"
				</button>
				<button on:click={act(Editor::toggle_select_mode)}>
					{move || if mode.get() == EditorMode::Select { "Done" } else { "Select" }}
				</button>
				<button on:click={act(|e| e.set_mode(EditorMode::ViewOnly))}>"View"</button>
				<button on:click={act(Editor::delete_selected_nodes)}>"Delete nodes"</button>
				<button on:click={act(Editor::delete_selected_edge)}>"Delete edge"</button>
				<button on:click={act(Editor::delete_all_edges)}>"Delete edges"</button>
				<button
					disabled={move || !weighted.get()}
					on:click={act(|e| {
						e.change_weight(1);
					})}
				>
					"+"
				</button>
				<button
					disabled={move || !weighted.get()}
					on:click={act(|e| {
						e.change_weight(-1);
					})}
				>
					"-"
				</button>
				<button on:click={act(Editor::clear_graph)}>"Clear"</button>
				<label>
					<input
						type="checkbox"
						prop:checked={move || directed.get()}
						on:change={toggle(Editor::set_directed)}
					/>
					"Directed"
				</label>
				<label>
					<input
						type="checkbox"
						prop:checked={move || weighted.get()}
						on:change={toggle(Editor::set_weighted)}
					/>
					"Weighted"
				</label>
				<label>
					<input
						type="checkbox"
						prop:checked={move || dfs.get()}
						on:change={toggle(|e, on| {
							e.set_traversal(TraversalKind::Dfs, on);
						})}
					/>
					"DFS"
				</label>
				<label>
					<input
						type="checkbox"
						prop:checked={move || bfs.get()}
						on:change={toggle(|e, on| {
							e.set_traversal(TraversalKind::Bfs, on);
						})}
					/>
					"BFS"
				</label>
				<span class="mode">{move || format!("{:?}", mode.get())}</span>
			</div>
			<canvas
				node_ref=canvas_ref
				class="graph-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:touchstart=on_touchstart
				on:touchmove=on_touchmove
				on:touchend=on_touchend
				on:touchcancel=on_touchcancel
				style="display: block; touch-action: none;"
			/>
		</div>
	}
}
