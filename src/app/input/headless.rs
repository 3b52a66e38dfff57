//! In-process stand-ins for the platform and the widget tree
//!
//! Used by the demo session, the self-test and the tests.

use std::sync::{Mutex, MutexGuard, PoisonError};

use super::events::MouseEventKind;
use super::platform::{CursorVisibility, HostStatus, Platform, Rect};
use super::state::{ButtonState, MouseButton, MouseState, PolledMouse};
use super::ui::{CaptureFlags, ControlId, HitTarget, HitTestTarget};

#[derive(Debug, Clone, Copy)]
struct HeadlessSignals {
    polled: PolledMouse,
    visibility: CursorVisibility,
    status: HostStatus,
    ui_scale: f32,
    foreign_window: Option<Rect>,
}

/// Scriptable [`Platform`]
pub struct HeadlessPlatform {
    signals: Mutex<HeadlessSignals>,
}

impl HeadlessPlatform {
    /// Focused host, visible cursor, scale 1.0
    pub fn new() -> Self {
        Self::with_ui_scale(1.0)
    }

    pub fn with_ui_scale(ui_scale: f32) -> Self {
        Self {
            signals: Mutex::new(HeadlessSignals {
                polled: PolledMouse::default(),
                visibility: CursorVisibility::Showing,
                status: HostStatus::active(),
                ui_scale,
                foreign_window: None,
            }),
        }
    }

    fn signals(&self) -> MutexGuard<'_, HeadlessSignals> {
        self.signals.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Sets the unscaled polled position
    pub fn set_position(&self, position: [i32; 2]) {
        self.signals().polled.position = position;
    }

    pub fn set_button(&self, button: MouseButton, state: ButtonState) {
        let mut signals = self.signals();
        signals.polled.buttons = signals.polled.buttons.with(button, state);
    }

    pub fn set_cursor_visibility(&self, visibility: CursorVisibility) {
        self.signals().visibility = visibility;
    }

    pub fn set_host_status(&self, status: HostStatus) {
        self.signals().status = status;
    }

    pub fn set_ui_scale(&self, ui_scale: f32) {
        self.signals().ui_scale = ui_scale;
    }

    pub fn set_foreign_window(&self, window: Option<Rect>) {
        self.signals().foreign_window = window;
    }
}

impl Default for HeadlessPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for HeadlessPlatform {
    fn poll_mouse(&self) -> PolledMouse {
        self.signals().polled
    }

    fn cursor_visibility(&self) -> CursorVisibility {
        self.signals().visibility
    }

    fn host_status(&self) -> HostStatus {
        self.signals().status
    }

    fn ui_scale(&self) -> f32 {
        self.signals().ui_scale
    }

    fn foreign_window(&self) -> Option<Rect> {
        self.signals().foreign_window
    }
}

#[derive(Debug, Clone)]
struct UiControl {
    target: HitTarget,
    /// Bounds in UI coordinates
    rect: Rect,
}

/// Flat widget tree of rectangles; later controls sit on top
#[derive(Debug, Clone, Default)]
pub struct RectUi {
    controls: Vec<UiControl>,
    triggered: Vec<(MouseEventKind, [i32; 2])>,
}

impl RectUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_control(&mut self, id: ControlId, rect: Rect, captures: CaptureFlags) {
        self.controls.push(UiControl {
            target: HitTarget::new(id, captures),
            rect,
        });
    }

    pub fn remove_control(&mut self, id: ControlId) {
        self.controls.retain(|control| control.target.id != id);
    }

    /// Topmost control containing `position`
    pub fn control_at(&self, position: [i32; 2]) -> Option<HitTarget> {
        self.controls
            .iter()
            .rev()
            .find(|control| control.rect.contains(position))
            .map(|control| control.target)
    }

    /// Every `trigger_input` call received, oldest first
    pub fn triggered(&self) -> &[(MouseEventKind, [i32; 2])] {
        &self.triggered
    }

    pub fn clear_triggered(&mut self) {
        self.triggered.clear();
    }
}

impl HitTestTarget for RectUi {
    fn trigger_input(&mut self, kind: MouseEventKind, state: &MouseState) -> Option<HitTarget> {
        self.triggered.push((kind, state.position));
        self.control_at(state.position)
    }
}
