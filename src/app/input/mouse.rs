//! Frame-thread side of the mouse core

use std::any::Any;
use std::sync::Arc;

use tracing::{debug, info, trace};

use super::delegate::{MouseChannel, MouseEvents, SubscriptionId};
use super::events::{MouseEventKind, RawMouseEvent};
use super::handler::InputHandler;
use super::hook::{Focus, MouseHook, SharedMouse};
use super::platform::Platform;
use super::state::{ButtonState, MouseButton, MouseState};
use super::ui::{HitTarget, HitTestTarget};

/// Arbitrates mouse input between the host application and the overlay UI
///
/// Hook events go through [`MouseHandler::handle_input`] (or a [`MouseHook`]
/// handle on another thread) and are reconciled with the polled mouse once
/// per frame in [`MouseHandler::update`].
pub struct MouseHandler<U> {
    shared: Arc<SharedMouse>,
    platform: Arc<dyn Platform>,
    ui: U,
    state: MouseState,
    active_control: Option<HitTarget>,
    events: MouseEvents,
}

impl<U: HitTestTarget> MouseHandler<U> {
    pub fn new(platform: Arc<dyn Platform>, ui: U) -> Self {
        Self {
            shared: Arc::new(SharedMouse::new()),
            platform,
            ui,
            state: MouseState::default(),
            active_control: None,
            events: MouseEvents::new(),
        }
    }

    /// Handle for the hook thread
    pub fn hook(&self) -> MouseHook {
        MouseHook::new(self.shared.clone(), self.platform.clone())
    }

    /// See [`MouseHook::handle_input`]
    pub fn handle_input(&self, event: &RawMouseEvent) -> bool {
        self.hook().handle_input(event)
    }

    /// Reconciles the buffered hook event with the polled mouse
    ///
    /// Call exactly once per frame on the frame thread.
    pub fn update(&mut self) {
        let visibility = self.platform.cursor_visibility();
        self.set_cursor_visible(visibility.is_visible());

        let status = self.platform.host_status();
        if !status.accepts_input() {
            trace!(?status, "Host not accepting overlay input");
            self.shared.set_focus(Focus::None);
            return;
        }

        // Frozen while the host owns the mouse
        if self.shared.camera_dragging() {
            return;
        }

        let previous = self.state;
        let pending = self.shared.take_pending();

        self.state = MouseState::from_polled(
            self.platform.poll_mouse(),
            self.platform.ui_scale(),
            self.shared.position_raw(),
            pending.map_or(0, |event| event.wheel_delta),
        );

        if previous.position != self.state.position {
            if self.cursor_is_visible() {
                let target = self.ui.trigger_input(MouseEventKind::Moved, &self.state);
                self.set_active_control(target);
            }

            let moved = RawMouseEvent::new(MouseEventKind::Moved, self.state.position_raw);
            self.events.fire(&moved, &self.state);
        }

        if let Some(event) = pending {
            if self.shared.take_recently_enabled() {
                self.simulate_missing_press(&event);
            }
            self.dispatch(&event);
        }
    }

    /// Offers an event to subscribers, then to the UI tree while the cursor shows
    fn dispatch(&mut self, event: &RawMouseEvent) {
        if !self.events.fire(event, &self.state) {
            debug!(kind = ?event.kind, "Got unsupported mouse input");
            return;
        }

        if self.cursor_is_visible() {
            self.ui.trigger_input(event.kind, &self.state);
        }
    }

    /// Completes a release that arrived without its press
    ///
    /// After the hook is re-enabled the first event seen can be the release
    /// half of a click that started while detached. Consumers tracking
    /// capture expect a press first, so one is dispatched at the release's
    /// coordinates with the button marked down, and the real state is
    /// restored before the release goes out.
    fn simulate_missing_press(&mut self, release: &RawMouseEvent) {
        let Some(press) = release.kind.paired_press() else {
            return;
        };
        let button = match press {
            MouseEventKind::LeftButtonPressed => MouseButton::Left,
            _ => MouseButton::Right,
        };

        debug!(kind = ?press, point = ?release.point, "Simulating missing press");

        let saved = self.state;
        self.state = saved.with_button(button, ButtonState::Pressed);
        self.dispatch(&release.with_kind(press));
        self.state = saved;
    }

    fn set_active_control(&mut self, target: Option<HitTarget>) {
        self.active_control = target;
        self.shared.set_focus(Focus::from(target));
    }

    /// Clears pointer focus
    pub fn unset_active_control(&mut self) {
        self.set_active_control(None);
    }

    /// Hiding the cursor also drops pointer focus
    pub fn set_cursor_visible(&mut self, visible: bool) {
        if self.shared.cursor_visible() == visible {
            return;
        }
        if !visible {
            self.set_active_control(None);
        }
        self.shared.set_cursor_visible(visible);
    }

    /// Arms missing-press repair for the next buffered event
    pub fn on_enable(&mut self) {
        info!("Mouse hook enabled");
        self.shared.set_attached(true);
        self.shared.arm_recently_enabled();
    }

    pub fn on_disable(&mut self) {
        info!("Mouse hook disabled");
        self.shared.set_attached(false);
        self.shared.clear_recently_enabled();
    }

    pub fn subscribe<F>(&mut self, channel: MouseChannel, callback: F) -> SubscriptionId
    where
        F: FnMut(&RawMouseEvent, &MouseState) + Send + 'static,
    {
        self.events.subscribe(channel, callback)
    }

    pub fn unsubscribe(&mut self, subscription: SubscriptionId) -> bool {
        self.events.unsubscribe(subscription)
    }

    pub fn state(&self) -> &MouseState {
        &self.state
    }

    /// Position in UI coordinates
    pub fn position(&self) -> [i32; 2] {
        self.state.position
    }

    /// Last hook-reported coordinates
    pub fn position_raw(&self) -> [i32; 2] {
        self.shared.position_raw()
    }

    pub fn camera_dragging(&self) -> bool {
        self.shared.camera_dragging()
    }

    pub fn cursor_is_visible(&self) -> bool {
        self.shared.cursor_visible()
    }

    /// Element the cursor last moved over
    pub fn active_control(&self) -> Option<HitTarget> {
        self.active_control
    }

    /// Whether any element currently has pointer focus
    pub fn hud_focused(&self) -> bool {
        self.shared.focus() != Focus::None
    }

    pub fn recently_enabled(&self) -> bool {
        self.shared.recently_enabled()
    }

    pub fn has_pending_event(&self) -> bool {
        self.shared.has_pending()
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut U {
        &mut self.ui
    }
}

impl<U: HitTestTarget + 'static> InputHandler for MouseHandler<U> {
    fn name(&self) -> &str {
        "mouse"
    }

    fn update(&mut self) {
        MouseHandler::update(self);
    }

    fn on_enable(&mut self) {
        MouseHandler::on_enable(self);
    }

    fn on_disable(&mut self) {
        MouseHandler::on_disable(self);
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
