//! Mouse input arbitration between the host application and the overlay
//!
//! Hook events arrive on the platform's hook thread before the host polls
//! them. The core decides per event whether the native event is swallowed,
//! keeps the last qualifying event for the next frame, and once per frame
//! turns that event plus the polled mouse into a fresh [`MouseState`],
//! hit-tests the widget tree and publishes typed events.
//!
//! # Architecture
//!
//! ```text
//! platform hook ──► MouseHook::handle_input ──► consume? (to the hook)
//!                         │
//!                   buffered event slot
//!                         │
//! frame loop ──► MouseHandler::update ──► MouseState
//!                         │
//!              subscribers ──► HitTestTarget::trigger_input
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use hud_overlay::app::input::{HeadlessPlatform, MouseChannel, MouseHandler, RectUi};
//!
//! let platform = Arc::new(HeadlessPlatform::new());
//! let mut mouse = MouseHandler::new(platform, RectUi::new());
//! mouse.subscribe(MouseChannel::LeftButtonPressed, |event, _state| {
//!     println!("clicked at {:?}", event.point);
//! });
//!
//! let hook = mouse.hook(); // hand to the hook thread
//! mouse.on_enable();
//! // each frame:
//! mouse.update();
//! # drop(hook);
//! ```

mod delegate;
mod events;
mod handler;
mod headless;
mod hook;
mod mouse;
mod platform;
mod service;
mod state;
mod ui;

pub use delegate::{MouseCallback, MouseChannel, MouseEvents, SubscriptionId};
pub use events::{HookPayload, MouseEventKind, RawMouseEvent};
pub use handler::InputHandler;
pub use headless::{HeadlessPlatform, RectUi};
pub use hook::{MouseHook, camera_drag_transition};
pub use mouse::MouseHandler;
pub use platform::{CursorVisibility, HostStatus, Platform, Rect};
pub use service::InputService;
pub use state::{ButtonState, MouseButton, MouseButtons, MouseState, PolledMouse};
pub use ui::{CaptureFlags, ControlId, HitTarget, HitTestTarget};
