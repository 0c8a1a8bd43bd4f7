//! Leptos component wiring the collaboration graph together.
//!
//! The component owns its data fetch, processes the document into a graph,
//! runs the layout simulation on a canvas via `requestAnimationFrame`, and
//! paints the info panel from the current hover/selection. Browser resources
//! are held in [`MountResources`] and released when the component unmounts.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{debug, warn};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::highlight::{FocusDetails, Highlight};
use super::interaction::{Interaction, PointerEvent};
use super::lifecycle::{EventSubscription, FrameLoop, MountResources};
use super::loader::{LoadState, load};
use super::panel::{DetailsPanel, ReviewLegend};
use super::process::{ProcessOptions, ProcessedGraph, process};
use super::render;
use super::scale::ScaleConfig;
use super::state::{Click, ForceGraphState};
use super::theme::Theme;

/// Simulation step for the first frame, in seconds.
const FRAME_DT: f32 = 0.016;
/// Upper bound on one step, so a backgrounded tab does not jump the layout.
const MAX_FRAME_DT: f32 = 0.05;

/// Side of the canvas the info panel is placed on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Align {
	/// Panel on the left of the canvas.
	#[default]
	Left,
	/// Panel on the right of the canvas.
	Right,
}

/// Behaviour knobs for [`DeveloperUniverse`].
#[derive(Clone, Debug)]
pub struct UniverseConfig {
	/// Static path of the `{ nodes, links }` document.
	pub data_url: String,
	/// Filtering and sizing applied to the loaded document.
	pub process: ProcessOptions,
	/// Wait before the first fit so the simulation can spread the nodes out.
	pub settle_delay: Duration,
	/// Duration of the fit animation after settling.
	pub initial_fit: Duration,
	/// Duration of the fit animation triggered by the reset control.
	pub reset_fit: Duration,
	/// Related companies listed in the info panel before "+N more".
	pub neighbor_limit: usize,
	/// Canvas height outside fullscreen, in pixels.
	pub panel_height: f64,
}

impl Default for UniverseConfig {
	fn default() -> Self {
		Self {
			data_url: "/processed_data/developer_universe.json".into(),
			process: ProcessOptions::default(),
			settle_delay: Duration::from_millis(500),
			initial_fit: Duration::from_millis(1200),
			reset_fit: Duration::from_millis(100),
			neighbor_limit: 10,
			panel_height: 550.0,
		}
	}
}

/// Simulation plus the visuals it is drawn with.
struct CanvasContext {
	state: ForceGraphState,
	graph: ProcessedGraph,
	highlight: Highlight,
	scale: ScaleConfig,
	theme: Theme,
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok()??.dyn_into().ok()
}

/// Canvas size: parent width, and either the fixed height or the viewport
/// height while fullscreen.
fn canvas_size(canvas: &HtmlCanvasElement, fullscreen: bool, height: f64) -> (f64, f64) {
	let width = canvas
		.parent_element()
		.map(|p| p.client_width() as f64)
		.filter(|w| *w > 0.0)
		.unwrap_or(800.0);
	if !fullscreen {
		return (width, height);
	}
	let viewport = window()
		.inner_height()
		.ok()
		.and_then(|h| h.as_f64())
		.unwrap_or(height);
	(width, viewport)
}

fn pointer_position(ev: &MouseEvent) -> (f64, f64) {
	(ev.offset_x() as f64, ev.offset_y() as f64)
}

/// Interactive developer/publisher collaboration graph with its info panel.
///
/// Fetches its own data on mount; the only input is which side the info
/// panel sits on.
#[component]
pub fn DeveloperUniverse(
	/// Side the info panel sits on.
	#[prop(optional)]
	align: Align,
	/// Overrides for data location, filtering and timing.
	#[prop(optional)]
	config: Option<UniverseConfig>,
) -> impl IntoView {
	let config = config.unwrap_or_default();
	let theme = Theme::default();

	let (load_state, set_load) = signal(LoadState::default());
	let (show_isolated, set_show_isolated) = signal(config.process.show_isolated);
	let (interaction, set_interaction) = signal(Interaction::Idle);
	let (fullscreen, set_fullscreen) = signal(false);

	let url = config.data_url.clone();
	spawn_local(async move {
		let settled = load(&url).await;
		// Dropped silently if the view has unmounted in the meantime.
		let _ = set_load.try_set(settled);
	});

	let options = config.process.clone();
	let graph = Memo::new(move |_| {
		let options = ProcessOptions {
			show_isolated: show_isolated.get(),
			..options.clone()
		};
		load_state.with(|state| process(&state.graph, &options))
	});
	let highlight = Memo::new(move |_| graph.with(|g| interaction.with(|i| Highlight::new(g, i))));
	let neighbor_limit = config.neighbor_limit;
	let details = Signal::derive(move || {
		graph.with(|g| interaction.with(|i| FocusDetails::new(g, i, neighbor_limit)))
	});

	let dispatch = move |event: PointerEvent| {
		set_interaction.maybe_update(|state| state.apply(event));
	};

	// Membership changed: a focus on a node that is gone no longer applies.
	Effect::new(move |_| {
		graph.with(|g| {
			let stale = interaction.with_untracked(|i| i.focus().is_some_and(|id| !g.contains(id)));
			if stale {
				set_interaction.update(|i| {
					i.retain_in(g);
				});
			}
		});
	});

	let resources = StoredValue::new_local(MountResources::default());
	on_cleanup(move || resources.dispose());

	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let container_ref = NodeRef::<leptos::html::Div>::new();
	let context: Rc<RefCell<Option<CanvasContext>>> = Rc::new(RefCell::new(None));
	let panel_height = config.panel_height;

	let (context_init, theme_init) = (context.clone(), theme.clone());
	let settle_delay = config.settle_delay;
	let initial_fit = config.initial_fit.as_secs_f64();
	Effect::new(move |_| {
		let processed = graph.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (w, h) = canvas_size(&canvas, fullscreen.get_untracked(), panel_height);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		debug!(
			"developer-universe: laying out {} nodes, {} links",
			processed.nodes.len(),
			processed.links.len()
		);
		let ready = !processed.is_empty();
		*context_init.borrow_mut() = Some(CanvasContext {
			state: ForceGraphState::new(&processed, w, h),
			graph: processed,
			highlight: highlight.get_untracked(),
			scale: ScaleConfig::default(),
			theme: theme_init.clone(),
		});

		if !resources.with_value(MountResources::has_frame_loop) {
			let Some(ctx) = context_2d(&canvas) else {
				warn!("developer-universe: canvas has no 2d context");
				return;
			};
			let context_anim = context_init.clone();
			let mut last_frame: Option<f64> = None;
			let frame_loop = FrameLoop::start(move || {
				let now = js_sys::Date::now();
				let dt = last_frame
					.map(|t| ((now - t) / 1000.0) as f32)
					.unwrap_or(FRAME_DT)
					.clamp(0.0, MAX_FRAME_DT);
				last_frame = Some(now);
				if let Some(c) = context_anim.borrow_mut().as_mut() {
					c.state.tick(dt);
					render::render(&c.state, &ctx, &c.graph, &c.highlight, &c.scale, &c.theme);
				}
			});
			resources.update_value(|r| r.set_frame_loop(frame_loop));
		}

		// Let the simulation spread the nodes before framing them.
		let timer = ready
			.then(|| {
				let context_fit = context_init.clone();
				set_timeout_with_handle(
					move || {
						if let Some(c) = context_fit.borrow_mut().as_mut() {
							c.state.reheat();
							c.state.fit_to_view(initial_fit, &c.scale);
						}
					},
					settle_delay,
				)
				.ok()
			})
			.flatten();
		resources.update_value(|r| r.set_settle_timer(timer));
	});

	let context_hl = context.clone();
	Effect::new(move |_| {
		let current = highlight.get();
		if let Some(c) = context_hl.borrow_mut().as_mut() {
			c.highlight = current;
		}
	});

	let context_resize = context.clone();
	let reset_fit = config.reset_fit.as_secs_f64();
	// `refit` reframes the nodes for the new size as well.
	let resize = Rc::new(move |refit: bool| {
		let Some(canvas) = canvas_ref.get_untracked() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (w, h) = canvas_size(&canvas, fullscreen.get_untracked(), panel_height);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);
		if let Some(c) = context_resize.borrow_mut().as_mut() {
			if refit {
				c.state.resize_and_fit(w, h, reset_fit, &c.scale);
			} else {
				c.state.resize(w, h);
			}
		}
	});

	let resize_fs = resize.clone();
	Effect::new(move |previous: Option<bool>| {
		let current = fullscreen.get();
		// The first run happens on mount; the settle timer frames that one.
		resize_fs(previous.is_some_and(|was| was != current));
		current
	});

	let resize_window = resize.clone();
	resources.update_value(|r| {
		r.subscribe(EventSubscription::listen(document(), "fullscreenchange", move |_| {
			set_fullscreen.set(document().fullscreen_element().is_some());
		}));
		r.subscribe(EventSubscription::listen(window(), "resize", move |_| resize_window(false)));
	});

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let (x, y) = pointer_position(&ev);
		if let Some(c) = context_md.borrow_mut().as_mut() {
			c.state.press(x, y, &c.scale);
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let (x, y) = pointer_position(&ev);
		let hovered = {
			let mut slot = context_mm.borrow_mut();
			let Some(c) = slot.as_mut() else {
				return;
			};
			// Hover is frozen while a node is dragged or the view is panned.
			if c.state.drag_to(x, y) {
				return;
			}
			c.state
				.node_at_position(x, y, &c.scale)
				.map(|i| c.graph.nodes[i].id.clone())
		};
		dispatch(match hovered {
			Some(id) => PointerEvent::Enter(id),
			None => PointerEvent::Leave,
		});
	};

	let context_mu = context.clone();
	let on_mouseup = move |_: MouseEvent| {
		let click = context_mu.borrow_mut().as_mut().and_then(|c| {
			Some(match c.state.release()? {
				Click::Node(i) => PointerEvent::ClickNode(c.graph.nodes[i].id.clone()),
				Click::Canvas => PointerEvent::ClickCanvas,
			})
		});
		if let Some(event) = click {
			dispatch(event);
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(c) = context_ml.borrow_mut().as_mut() {
			c.state.cancel_press();
		}
		dispatch(PointerEvent::Leave);
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let (x, y) = pointer_position(&ev);
		if let Some(c) = context_wh.borrow_mut().as_mut() {
			c.state.zoom_at(x, y, ev.delta_y() < 0.0, &c.scale);
		}
	};

	let context_reset = context.clone();
	let on_reset = move |_: MouseEvent| {
		if let Some(c) = context_reset.borrow_mut().as_mut() {
			c.state.reheat();
			c.state.fit_to_view(reset_fit, &c.scale);
		}
	};

	let on_fullscreen = move |_: MouseEvent| {
		let document = document();
		if document.fullscreen_element().is_some() {
			document.exit_fullscreen();
		} else if let Some(container) = container_ref.get_untracked() {
			if let Err(e) = container.request_fullscreen() {
				warn!("developer-universe: fullscreen request refused: {:?}", e);
			}
		}
	};

	let direction = match align {
		Align::Left => "row",
		Align::Right => "row-reverse",
	};
	let backdrop = theme.fullscreen_backdrop.to_css();
	let container_style = move || {
		if fullscreen.get() {
			format!(
				"display: flex; flex-direction: {direction}; position: fixed; inset: 0; \
				 z-index: 9999; height: 100vh; background: {backdrop};"
			)
		} else {
			format!(
				"display: flex; flex-direction: {direction}; position: relative; height: {panel_height}px;"
			)
		}
	};

	let status = move || {
		if load_state.with(|s| s.loading) {
			Some("Loading Developer Universe...")
		} else if graph.with(ProcessedGraph::is_empty) {
			Some("No developers found")
		} else {
			None
		}
	};

	view! {
		<section class="developer-universe">
			<h1>"Developers & Publishers"</h1>
			<p class="universe-description">
				"Each node is a developer or publisher on Steam, sized by how many games it is \
				 associated with and colored by the average review score of those games. \
				 Links join companies that collaborated on at least one game."
			</p>
			<label class="universe-toggle">
				<input
					type="checkbox"
					prop:checked=move || show_isolated.get()
					on:change=move |ev| set_show_isolated.set(event_target_checked(&ev))
				/>
				"Show companies without collaborations"
			</label>
			<div node_ref=container_ref class="universe-interactive" style=container_style>
				<DetailsPanel details=details related_color=theme.related_pill.to_css() />
				<div class="universe-canvas-wrap" style="flex: 1; position: relative; overflow: hidden;">
					<div class="universe-controls">
						<button class="universe-reset" title="Reset" on:click=on_reset>
							"Reset"
						</button>
						<button class="universe-fullscreen" on:click=on_fullscreen>
							{move || if fullscreen.get() { "Exit fullscreen" } else { "Fullscreen" }}
						</button>
					</div>
					{move || status().map(|text| view! { <div class="universe-status">{text}</div> })}
					<canvas
						node_ref=canvas_ref
						class="universe-canvas"
						on:mousedown=on_mousedown
						on:mousemove=on_mousemove
						on:mouseup=on_mouseup
						on:mouseleave=on_mouseleave
						on:wheel=on_wheel
						style="display: block; cursor: grab;"
					/>
				</div>
			</div>
			<ReviewLegend />
		</section>
	}
}
