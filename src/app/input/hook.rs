//! Hook-thread side of the mouse core
//!
//! The platform hook calls into [`MouseHook`] from its own thread, ahead of
//! the frame loop. Everything the two sides share lives in [`SharedMouse`]:
//! plain atomics for the mode flags plus one locked slot for the event
//! waiting on the next frame.

use std::sync::atomic::{AtomicBool, AtomicU8, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, trace};

use super::events::{HookPayload, MouseEventKind, RawMouseEvent};
use super::platform::Platform;
use super::ui::HitTarget;

/// Pointer focus as far as the hook needs to know it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub(crate) enum Focus {
    None = 0,
    Blocking = 1,
    PassThrough = 2,
}

impl Focus {
    fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::Blocking,
            2 => Self::PassThrough,
            _ => Self::None,
        }
    }
}

impl From<Option<HitTarget>> for Focus {
    fn from(target: Option<HitTarget>) -> Self {
        match target {
            Some(target) if target.blocks_input() => Self::Blocking,
            Some(_) => Self::PassThrough,
            None => Self::None,
        }
    }
}

/// Camera drag transition for a hook event observed while nothing has focus
pub fn camera_drag_transition(dragging: bool, kind: MouseEventKind) -> bool {
    match kind {
        MouseEventKind::RightButtonPressed => true,
        MouseEventKind::RightButtonReleased => false,
        _ => dragging,
    }
}

fn pack(point: [i32; 2]) -> u64 {
    ((point[0] as u32 as u64) << 32) | point[1] as u32 as u64
}

fn unpack(packed: u64) -> [i32; 2] {
    [(packed >> 32) as u32 as i32, packed as u32 as i32]
}

/// State shared between the hook thread and the frame thread
pub(crate) struct SharedMouse {
    position_raw: AtomicU64,
    camera_dragging: AtomicBool,
    cursor_visible: AtomicBool,
    focus: AtomicU8,
    recently_enabled: AtomicBool,
    attached: AtomicBool,
    pending: Mutex<Option<RawMouseEvent>>,
}

impl SharedMouse {
    pub(crate) fn new() -> Self {
        Self {
            position_raw: AtomicU64::new(0),
            camera_dragging: AtomicBool::new(false),
            cursor_visible: AtomicBool::new(true),
            focus: AtomicU8::new(Focus::None as u8),
            recently_enabled: AtomicBool::new(false),
            attached: AtomicBool::new(false),
            pending: Mutex::new(None),
        }
    }

    pub(crate) fn position_raw(&self) -> [i32; 2] {
        unpack(self.position_raw.load(Ordering::Acquire))
    }

    fn set_position_raw(&self, point: [i32; 2]) {
        self.position_raw.store(pack(point), Ordering::Release);
    }

    pub(crate) fn camera_dragging(&self) -> bool {
        self.camera_dragging.load(Ordering::Acquire)
    }

    pub(crate) fn cursor_visible(&self) -> bool {
        self.cursor_visible.load(Ordering::Acquire)
    }

    pub(crate) fn set_cursor_visible(&self, visible: bool) {
        self.cursor_visible.store(visible, Ordering::Release);
    }

    pub(crate) fn focus(&self) -> Focus {
        Focus::from_u8(self.focus.load(Ordering::Acquire))
    }

    pub(crate) fn set_focus(&self, focus: Focus) {
        self.focus.store(focus as u8, Ordering::Release);
    }

    pub(crate) fn arm_recently_enabled(&self) {
        self.recently_enabled.store(true, Ordering::Release);
    }

    pub(crate) fn clear_recently_enabled(&self) {
        self.recently_enabled.store(false, Ordering::Release);
    }

    /// Consumes the re-enable marker
    pub(crate) fn take_recently_enabled(&self) -> bool {
        self.recently_enabled.swap(false, Ordering::AcqRel)
    }

    pub(crate) fn recently_enabled(&self) -> bool {
        self.recently_enabled.load(Ordering::Acquire)
    }

    pub(crate) fn set_attached(&self, attached: bool) {
        self.attached.store(attached, Ordering::Release);
    }

    pub(crate) fn attached(&self) -> bool {
        self.attached.load(Ordering::Acquire)
    }

    /// Overwrites the slot; the last event before a frame wins
    fn buffer(&self, event: RawMouseEvent) {
        let mut slot = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(dropped) = slot.replace(event) {
            trace!(kind = ?dropped.kind, "Coalesced buffered mouse event");
        }
    }

    pub(crate) fn take_pending(&self) -> Option<RawMouseEvent> {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    pub(crate) fn has_pending(&self) -> bool {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

/// Cloneable handle the platform hook dispatcher calls into
#[derive(Clone)]
pub struct MouseHook {
    shared: Arc<SharedMouse>,
    platform: Arc<dyn Platform>,
}

impl MouseHook {
    pub(crate) fn new(shared: Arc<SharedMouse>, platform: Arc<dyn Platform>) -> Self {
        Self { shared, platform }
    }

    /// Decides whether the native event should be swallowed
    ///
    /// Returns `true` to consume the event, `false` to let the host see it.
    /// Never blocks beyond the buffered-slot lock.
    pub fn handle_input(&self, event: &RawMouseEvent) -> bool {
        if event.kind == MouseEventKind::Moved {
            self.shared.set_position_raw(event.point);
            return false;
        }

        if let Some(window) = self.platform.foreign_window()
            && window.contains(event.point)
        {
            return false;
        }

        let focus = self.shared.focus();
        if focus == Focus::None {
            let dragging = self.shared.camera_dragging();
            let next = camera_drag_transition(dragging, event.kind);
            if next != dragging {
                trace!(dragging = next, "Camera drag changed");
                self.shared.camera_dragging.store(next, Ordering::Release);
            }
        }

        if self.shared.camera_dragging() || !self.shared.cursor_visible() {
            return false;
        }

        self.shared.buffer(*event);

        !event.kind.is_release() && focus == Focus::Blocking
    }

    /// Entry point for native hook messages
    ///
    /// Unknown message codes and messages arriving while the hook is
    /// detached pass through to the host.
    pub fn dispatch_raw(
        &self,
        message: u32,
        point: [i32; 2],
        wheel_delta: i32,
        payload: HookPayload,
    ) -> bool {
        if !self.shared.attached() {
            return false;
        }

        match MouseEventKind::try_from(message) {
            Ok(kind) => {
                let event = RawMouseEvent {
                    kind,
                    point,
                    wheel_delta,
                    payload,
                };
                self.handle_input(&event)
            }
            Err(e) => {
                debug!(error = %e, "Ignoring mouse hook message");
                false
            }
        }
    }

    pub fn camera_dragging(&self) -> bool {
        self.shared.camera_dragging()
    }
}
