//! Browser resources owned by one mounted view.
//!
//! Everything the component registers with the browser (the animation frame
//! loop, DOM event listeners, the settle timer) lives in [`MountResources`].
//! Dropping it cancels the frame, removes every listener and clears the timer,
//! so a remount never inherits handlers from a previous one.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::TimeoutHandle;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget};

fn request_frame(cb: &Closure<dyn FnMut()>) -> Option<i32> {
	web_sys::window()?
		.request_animation_frame(cb.as_ref().unchecked_ref())
		.ok()
}

/// A `requestAnimationFrame` loop that runs until dropped.
pub struct FrameLoop {
	handle: Rc<Cell<Option<i32>>>,
	callback: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
}

impl FrameLoop {
	/// Calls `frame` once per animation frame.
	pub fn start(mut frame: impl FnMut() + 'static) -> Self {
		let handle = Rc::new(Cell::new(None));
		let callback: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
		let (handle_inner, callback_inner) = (handle.clone(), callback.clone());
		*callback.borrow_mut() = Some(Closure::new(move || {
			frame();
			if let Some(ref cb) = *callback_inner.borrow() {
				handle_inner.set(request_frame(cb));
			}
		}));
		if let Some(ref cb) = *callback.borrow() {
			handle.set(request_frame(cb));
		}
		Self { handle, callback }
	}
}

impl Drop for FrameLoop {
	fn drop(&mut self) {
		if let (Some(id), Some(window)) = (self.handle.take(), web_sys::window()) {
			let _ = window.cancel_animation_frame(id);
		}
		// Breaks the closure's reference to itself.
		self.callback.borrow_mut().take();
	}
}

/// A DOM event listener removed when dropped.
pub struct EventSubscription {
	target: EventTarget,
	event: &'static str,
	callback: Closure<dyn FnMut(Event)>,
}

impl EventSubscription {
	/// Adds `handler` for `event` on `target`; `None` if the browser refuses.
	pub fn listen(
		target: impl Into<EventTarget>,
		event: &'static str,
		handler: impl FnMut(Event) + 'static,
	) -> Option<Self> {
		let target = target.into();
		let callback = Closure::<dyn FnMut(Event)>::new(handler);
		if let Err(e) = target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref()) {
			warn!("developer-universe: could not listen for {}: {:?}", event, e);
			return None;
		}
		Some(Self {
			target,
			event,
			callback,
		})
	}
}

impl Drop for EventSubscription {
	fn drop(&mut self) {
		let _ = self
			.target
			.remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
	}
}

/// Everything registered with the browser on mount.
#[derive(Default)]
pub struct MountResources {
	frame_loop: Option<FrameLoop>,
	subscriptions: Vec<EventSubscription>,
	settle_timer: Option<TimeoutHandle>,
}

impl MountResources {
	/// Whether the frame loop has been started.
	pub fn has_frame_loop(&self) -> bool {
		self.frame_loop.is_some()
	}

	/// Replaces (and stops) any previous frame loop.
	pub fn set_frame_loop(&mut self, frame_loop: FrameLoop) {
		self.frame_loop = Some(frame_loop);
	}

	/// Keeps `subscription` alive until the view unmounts.
	pub fn subscribe(&mut self, subscription: Option<EventSubscription>) {
		self.subscriptions.extend(subscription);
	}

	/// Replaces the pending settle timer, clearing the previous one.
	pub fn set_settle_timer(&mut self, timer: Option<TimeoutHandle>) {
		if let Some(old) = std::mem::replace(&mut self.settle_timer, timer) {
			old.clear();
		}
	}
}

impl Drop for MountResources {
	fn drop(&mut self) {
		self.set_settle_timer(None);
		self.subscriptions.clear();
		self.frame_loop.take();
	}
}
