use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{error, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use super::render;
use super::state::{GraphCanvasState, STEP_DELAY_MS};
use crate::graph::Position;
use crate::session::{ClickOutcome, INVALID_QUERY_MESSAGE, QueryOutcome};

/// Shared handle to the canvas state and its drawing context.
#[derive(Clone)]
struct Surface {
	state: Rc<RefCell<GraphCanvasState>>,
	ctx: Rc<RefCell<Option<CanvasRenderingContext2d>>>,
}

impl Surface {
	fn redraw(&self) {
		if let Some(ref ctx) = *self.ctx.borrow() {
			render::render(&self.state.borrow(), ctx);
		}
	}
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas
		.get_context("2d")
		.ok()
		.flatten()
		.and_then(|ctx| ctx.dyn_into().ok())
}

fn alert(message: &str) {
	if let Some(window) = web_sys::window() {
		let _ = window.alert_with_message(message);
	}
}

fn prompt(message: &str) -> Option<String> {
	web_sys::window().and_then(|window| window.prompt_with_message(message).ok().flatten())
}

/// Reveal `generation`'s path one segment per step, then report it.
async fn animate(surface: Surface, generation: u64, message: String, set_status: WriteSignal<String>) {
	let steps = match surface.state.borrow().animation {
		Some(ref animation) => animation.step_count(),
		None => return,
	};
	for _ in 0..steps {
		{
			let mut state = surface.state.borrow_mut();
			if !state.is_current(generation) {
				return;
			}
			if let Some(animation) = state.animation.as_mut() {
				animation.advance();
			}
		}
		surface.redraw();
		TimeoutFuture::new(STEP_DELAY_MS).await;
	}
	if surface.state.borrow().is_current(generation) {
		set_status.set(message.clone());
		alert(&message);
	}
}

#[component]
pub fn GraphCanvas(
	#[prop(default = 800.0)] width: f64,
	#[prop(default = 600.0)] height: f64,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let surface = Surface {
		state: Rc::new(RefCell::new(GraphCanvasState::new(width, height))),
		ctx: Rc::new(RefCell::new(None)),
	};
	let (status, set_status) = signal(String::from(
		"Add nodes, connect them, then pick a start and an end node.",
	));
	let (source_input, set_source_input) = signal(String::new());
	let (target_input, set_target_input) = signal(String::new());

	let surface_init = surface.clone();
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		canvas.set_width(width as u32);
		canvas.set_height(height as u32);

		let Some(ctx) = context_2d(&canvas) else {
			error!("canvas has no 2d context");
			return;
		};
		*surface_init.ctx.borrow_mut() = Some(ctx);
		surface_init.redraw();
	});

	let surface_click = surface.clone();
	let on_click = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let rect = canvas.get_bounding_client_rect();
		let position = Position::new(
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		let outcome = surface_click.state.borrow_mut().session.click(position);
		match outcome {
			ClickOutcome::NodePlaced(id) => {
				surface_click.state.borrow_mut().clear_animation();
				set_status.set(format!("Placed node {id}."));
			}
			ClickOutcome::EndpointSelected(id) => {
				set_status.set(format!("Node {id} selected, now click the other end."));
			}
			ClickOutcome::WeightRequested { from, to } => {
				let answer = prompt("Enter the edge weight:");
				let mut state = surface_click.state.borrow_mut();
				match answer {
					Some(text) => match state.session.complete_edge(&text) {
						Ok(_) => {
							state.clear_animation();
							set_status.set(format!("Connected {from} and {to}."));
						}
						Err(err) => set_status.set(format!("Edge not added: {err}.")),
					},
					None => {
						state.session.cancel();
						set_status.set("Edge cancelled.".to_string());
					}
				}
			}
			ClickOutcome::Ignored => return,
		}
		surface_click.redraw();
	};

	let surface_node = surface.clone();
	let on_add_node = move |_: MouseEvent| {
		surface_node.state.borrow_mut().session.begin_place_node();
		surface_node.redraw();
		set_status.set("Click on the canvas to place a node.".to_string());
	};

	let surface_edge = surface.clone();
	let on_add_edge = move |_: MouseEvent| {
		surface_edge.state.borrow_mut().session.begin_connect();
		surface_edge.redraw();
		set_status.set("Click the two nodes to connect.".to_string());
	};

	let surface_run = surface.clone();
	let on_run = move |_: MouseEvent| {
		let query = surface_run
			.state
			.borrow()
			.session
			.run_query(&source_input.get_untracked(), &target_input.get_untracked());
		match query {
			Ok(outcome) => {
				let message = outcome.describe();
				match outcome {
					QueryOutcome::Found { path, .. } => {
						let generation = surface_run.state.borrow_mut().start_animation(path);
						surface_run.redraw();
						spawn_local(animate(surface_run.clone(), generation, message, set_status));
					}
					QueryOutcome::NoPath { .. } => {
						surface_run.state.borrow_mut().clear_animation();
						surface_run.redraw();
						set_status.set(message.clone());
						alert(&message);
					}
				}
			}
			Err(err) => {
				warn!("rejected query: {err}");
				set_status.set(INVALID_QUERY_MESSAGE.to_string());
				alert(INVALID_QUERY_MESSAGE);
			}
		}
	};

	let surface_reset = surface.clone();
	let on_reset = move |_: MouseEvent| {
		{
			let mut state = surface_reset.state.borrow_mut();
			state.session.reset();
			state.clear_animation();
		}
		surface_reset.redraw();
		info!("graph reset by user");
		set_status.set("Graph cleared.".to_string());
	};

	view! {
		<div class="graph-toolbar">
			<button on:click=on_add_node>"Add node"</button>
			<button on:click=on_add_edge>"Add edge"</button>
			<input
				type="number"
				min="0"
				placeholder="Start node"
				prop:value=move || source_input.get()
				on:input=move |ev| set_source_input.set(event_target_value(&ev))
			/>
			<input
				type="number"
				min="0"
				placeholder="End node"
				prop:value=move || target_input.get()
				on:input=move |ev| set_target_input.set(event_target_value(&ev))
			/>
			<button on:click=on_run>"Run Dijkstra"</button>
			<button on:click=on_reset>"Reset graph"</button>
		</div>
		<canvas
			node_ref=canvas_ref
			class="graph-canvas"
			on:click=on_click
			style="display: block; cursor: crosshair;"
		/>
		<p class="graph-status">{move || status.get()}</p>
	}
}
