//! Integration tests for the mouse arbitration core

use std::sync::{Arc, Mutex};

use hud_overlay::app::input::{
    ButtonState, CaptureFlags, ControlId, CursorVisibility, HeadlessPlatform, HookPayload,
    HostStatus, InputService, MouseButton, MouseChannel, MouseEventKind, MouseHandler,
    RawMouseEvent, Rect, RectUi,
};

const PANEL: ControlId = ControlId(1);
const PASSIVE: ControlId = ControlId(2);

/// Events seen by subscribers, with the state's left/right buttons at dispatch
type Log = Arc<Mutex<Vec<(MouseEventKind, [i32; 2], bool, bool)>>>;

struct Fixture {
    platform: Arc<HeadlessPlatform>,
    mouse: MouseHandler<RectUi>,
    log: Log,
}

impl Fixture {
    /// Blocking panel at (0,0)-(100,100), pass-through bar at (0,200)-(300,220)
    fn new() -> Self {
        let platform = Arc::new(HeadlessPlatform::new());
        let mut ui = RectUi::new();
        ui.add_control(PANEL, Rect::new(0, 0, 100, 100), CaptureFlags::MOUSE);
        ui.add_control(
            PASSIVE,
            Rect::new(0, 200, 300, 20),
            CaptureFlags::MOUSE | CaptureFlags::DO_NOT_BLOCK,
        );

        let mut mouse = MouseHandler::new(platform.clone(), ui);
        let log: Log = Arc::default();
        for channel in MouseChannel::ALL {
            let log = log.clone();
            mouse.subscribe(channel, move |event, state| {
                log.lock().unwrap().push((
                    event.kind,
                    event.point,
                    state.is_down(MouseButton::Left),
                    state.is_down(MouseButton::Right),
                ));
            });
        }

        Self {
            platform,
            mouse,
            log,
        }
    }

    /// Moves the cursor for both the hook and the poller, then runs a frame
    fn move_to(&mut self, point: [i32; 2]) {
        self.platform.set_position(point);
        self.mouse.handle_input(&RawMouseEvent::new(MouseEventKind::Moved, point));
        self.mouse.update();
    }

    fn input(&self, kind: MouseEventKind, point: [i32; 2]) -> bool {
        self.mouse.handle_input(&RawMouseEvent::new(kind, point))
    }

    /// Logged non-move events
    fn buttons(&self) -> Vec<(MouseEventKind, [i32; 2], bool, bool)> {
        self.log
            .lock()
            .unwrap()
            .iter()
            .copied()
            .filter(|(kind, ..)| *kind != MouseEventKind::Moved)
            .collect()
    }

    fn clear_log(&self) {
        self.log.lock().unwrap().clear();
    }
}

#[test]
fn test_moves_are_never_consumed() {
    let mut fx = Fixture::new();
    fx.move_to([50, 50]);
    assert!(!fx.input(MouseEventKind::Moved, [60, 60]));
    assert_eq!(fx.mouse.position_raw(), [60, 60]);
    assert!(!fx.mouse.has_pending_event());
}

#[test]
fn test_press_over_blocking_control_is_consumed() {
    let mut fx = Fixture::new();
    fx.move_to([50, 50]);
    assert_eq!(fx.mouse.active_control().map(|t| t.id), Some(PANEL));
    assert!(fx.input(MouseEventKind::LeftButtonPressed, [50, 50]));
    assert!(fx.input(MouseEventKind::WheelScrolled, [50, 50]));
}

#[test]
fn test_press_over_do_not_block_control_passes_through() {
    let mut fx = Fixture::new();
    fx.move_to([10, 210]);
    assert_eq!(fx.mouse.active_control().map(|t| t.id), Some(PASSIVE));
    assert!(!fx.input(MouseEventKind::LeftButtonPressed, [10, 210]));

    // Still delivered to the overlay on the next frame
    fx.mouse.update();
    assert_eq!(
        fx.buttons(),
        vec![(MouseEventKind::LeftButtonPressed, [10, 210], false, false)]
    );
}

#[test]
fn test_releases_are_never_consumed() {
    let mut fx = Fixture::new();
    fx.move_to([50, 50]);
    assert!(!fx.input(MouseEventKind::LeftButtonReleased, [50, 50]));
    assert!(!fx.input(MouseEventKind::RightButtonReleased, [50, 50]));
}

#[test]
fn test_nothing_consumed_without_focus() {
    let mut fx = Fixture::new();
    fx.move_to([500, 500]);
    assert!(!fx.mouse.hud_focused());
    assert!(!fx.input(MouseEventKind::LeftButtonPressed, [500, 500]));
    assert!(fx.mouse.has_pending_event());
}

#[test]
fn test_camera_drag_passes_everything_through() {
    let mut fx = Fixture::new();
    fx.move_to([500, 500]);

    assert!(!fx.input(MouseEventKind::RightButtonPressed, [500, 500]));
    assert!(fx.mouse.camera_dragging());

    for point in [[520, 500], [40, 40], [60, 60]] {
        assert!(!fx.input(MouseEventKind::Moved, point));
    }
    assert!(!fx.input(MouseEventKind::LeftButtonPressed, [60, 60]));
    assert!(!fx.input(MouseEventKind::WheelScrolled, [60, 60]));

    assert!(!fx.input(MouseEventKind::RightButtonReleased, [60, 60]));
    assert!(!fx.mouse.camera_dragging());
}

#[test]
fn test_camera_drag_freezes_state() {
    let mut fx = Fixture::new();
    fx.move_to([500, 500]);
    fx.input(MouseEventKind::RightButtonPressed, [500, 500]);
    let frozen = *fx.mouse.state();
    fx.clear_log();

    fx.move_to([50, 50]);
    assert_eq!(*fx.mouse.state(), frozen);
    assert_eq!(fx.mouse.active_control(), None);
    assert!(fx.log.lock().unwrap().is_empty());
}

#[test]
fn test_right_press_over_ui_does_not_start_drag() {
    let mut fx = Fixture::new();
    fx.move_to([50, 50]);
    assert!(fx.input(MouseEventKind::RightButtonPressed, [50, 50]));
    assert!(!fx.mouse.camera_dragging());
}

#[test]
fn test_hidden_cursor_passes_everything_through() {
    let mut fx = Fixture::new();
    fx.move_to([50, 50]);
    fx.platform.set_cursor_visibility(CursorVisibility::Hiding);
    fx.mouse.update();

    assert!(!fx.mouse.cursor_is_visible());
    assert_eq!(fx.mouse.active_control(), None);
    assert!(!fx.input(MouseEventKind::LeftButtonPressed, [50, 50]));
    assert!(!fx.mouse.has_pending_event());
}

#[test]
fn test_suppressed_cursor_still_counts_as_visible() {
    let mut fx = Fixture::new();
    fx.platform.set_cursor_visibility(CursorVisibility::Suppressed);
    fx.move_to([50, 50]);
    assert!(fx.mouse.cursor_is_visible());
    assert!(fx.input(MouseEventKind::LeftButtonPressed, [50, 50]));
}

#[test]
fn test_foreign_window_is_never_intercepted() {
    let mut fx = Fixture::new();
    fx.move_to([50, 50]);
    fx.platform.set_foreign_window(Some(Rect::new(40, 40, 200, 200)));

    assert!(!fx.input(MouseEventKind::LeftButtonPressed, [50, 50]));
    assert!(!fx.mouse.has_pending_event());

    // Outside the foreign window the panel still captures
    assert!(fx.input(MouseEventKind::LeftButtonPressed, [10, 10]));
}

#[test]
fn test_ui_scale_applies_to_position_only() {
    let mut fx = Fixture::new();
    fx.platform.set_ui_scale(2.0);
    fx.move_to([400, 300]);

    assert_eq!(fx.mouse.position(), [200, 150]);
    assert_eq!(fx.mouse.state().position_raw, [400, 300]);
}

#[test]
fn test_unfocused_host_freezes_state_and_events() {
    let mut fx = Fixture::new();
    fx.move_to([50, 50]);
    let before = *fx.mouse.state();
    fx.clear_log();

    fx.platform.set_host_status(HostStatus {
        focused: false,
        ..HostStatus::active()
    });
    fx.platform.set_position([70, 70]);
    fx.input(MouseEventKind::Moved, [70, 70]);
    fx.input(MouseEventKind::LeftButtonPressed, [70, 70]);
    fx.mouse.update();

    assert_eq!(*fx.mouse.state(), before);
    assert!(fx.log.lock().unwrap().is_empty());
    assert!(!fx.mouse.hud_focused());
}

#[test]
fn test_hidden_interface_short_circuits_update() {
    let mut fx = Fixture::new();
    fx.platform.set_host_status(HostStatus {
        interface_hidden: true,
        ..HostStatus::active()
    });
    fx.move_to([50, 50]);
    assert_eq!(fx.mouse.position(), [0, 0]);
    assert!(fx.log.lock().unwrap().is_empty());
}

#[test]
fn test_moved_fires_even_with_hidden_cursor() {
    let mut fx = Fixture::new();
    fx.platform.set_cursor_visibility(CursorVisibility::Hiding);
    fx.move_to([50, 50]);

    let log = fx.log.lock().unwrap().clone();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].0, MouseEventKind::Moved);
    assert!(fx.mouse.ui().triggered().is_empty());
    assert_eq!(fx.mouse.active_control(), None);
}

#[test]
fn test_only_last_buffered_event_is_dispatched() {
    let mut fx = Fixture::new();
    fx.move_to([50, 50]);
    fx.clear_log();

    fx.input(MouseEventKind::LeftButtonPressed, [50, 50]);
    fx.input(MouseEventKind::LeftButtonReleased, [50, 50]);
    fx.input(MouseEventKind::RightButtonPressed, [51, 50]);
    fx.mouse.update();

    assert_eq!(
        fx.buttons(),
        vec![(MouseEventKind::RightButtonPressed, [51, 50], false, false)]
    );
}

#[test]
fn test_visible_cursor_forwards_to_ui() {
    let mut fx = Fixture::new();
    fx.move_to([50, 50]);
    fx.mouse.ui_mut().clear_triggered();

    fx.input(MouseEventKind::LeftButtonPressed, [50, 50]);
    fx.mouse.update();
    assert_eq!(
        fx.mouse.ui().triggered(),
        &[(MouseEventKind::LeftButtonPressed, [50, 50])]
    );
}

#[test]
fn test_reenable_synthesizes_missing_press() {
    let mut fx = Fixture::new();
    fx.move_to([50, 50]);
    fx.mouse.on_disable();
    fx.mouse.on_enable();
    fx.clear_log();

    assert!(!fx.input(MouseEventKind::LeftButtonReleased, [50, 50]));
    fx.mouse.update();

    assert_eq!(
        fx.buttons(),
        vec![
            (MouseEventKind::LeftButtonPressed, [50, 50], true, false),
            (MouseEventKind::LeftButtonReleased, [50, 50], false, false),
        ]
    );
    assert!(!fx.mouse.state().is_down(MouseButton::Left));
}

#[test]
fn test_reenable_synthesizes_missing_right_press() {
    let mut fx = Fixture::new();
    fx.move_to([50, 50]);
    fx.mouse.on_enable();
    fx.clear_log();

    fx.input(MouseEventKind::RightButtonReleased, [42, 43]);
    fx.mouse.update();

    assert_eq!(
        fx.buttons(),
        vec![
            (MouseEventKind::RightButtonPressed, [42, 43], false, true),
            (MouseEventKind::RightButtonReleased, [42, 43], false, false),
        ]
    );
}

#[test]
fn test_synthesized_press_keeps_payload() {
    let mut fx = Fixture::new();
    let points = Arc::new(Mutex::new(Vec::new()));
    let seen = points.clone();
    fx.mouse.subscribe(MouseChannel::LeftButtonPressed, move |event, _| {
            seen.lock().unwrap().push(event.payload);
        });
    fx.move_to([50, 50]);
    fx.mouse.on_enable();

    let payload = HookPayload {
        mouse_data: 0,
        flags: 0x10,
        time: 1234,
        extra: 0,
    };
    fx.mouse.handle_input(
        &RawMouseEvent::new(MouseEventKind::LeftButtonReleased, [50, 50]).with_payload(payload),
    );
    fx.mouse.update();

    assert_eq!(*points.lock().unwrap(), vec![payload]);
}

#[test]
fn test_reenable_flag_consumed_by_first_buffered_event() {
    let mut fx = Fixture::new();
    fx.move_to([50, 50]);
    fx.mouse.on_enable();

    // A press first disarms repair without synthesizing anything
    fx.input(MouseEventKind::LeftButtonPressed, [50, 50]);
    fx.mouse.update();
    assert!(!fx.mouse.recently_enabled());
    fx.clear_log();

    fx.input(MouseEventKind::LeftButtonReleased, [50, 50]);
    fx.mouse.update();
    assert_eq!(
        fx.buttons(),
        vec![(MouseEventKind::LeftButtonReleased, [50, 50], false, false)]
    );
}

#[test]
fn test_enable_without_buffered_event_keeps_flag_armed() {
    let mut fx = Fixture::new();
    fx.mouse.on_enable();
    fx.move_to([50, 50]);
    fx.mouse.update();
    assert!(fx.mouse.recently_enabled());
}

#[test]
fn test_disable_twice_is_same_as_once() {
    let mut fx = Fixture::new();
    fx.mouse.on_enable();
    fx.mouse.on_disable();
    assert!(!fx.mouse.recently_enabled());
    fx.mouse.on_disable();
    assert!(!fx.mouse.recently_enabled());

    fx.move_to([50, 50]);
    fx.input(MouseEventKind::LeftButtonReleased, [50, 50]);
    fx.mouse.update();
    assert_eq!(fx.buttons().len(), 1);
}

#[test]
fn test_unset_active_control() {
    let mut fx = Fixture::new();
    fx.move_to([50, 50]);
    fx.mouse.unset_active_control();
    assert_eq!(fx.mouse.active_control(), None);
    assert!(!fx.input(MouseEventKind::LeftButtonPressed, [50, 50]));

    // Always legal, even with nothing focused
    fx.mouse.unset_active_control();
}

#[test]
fn test_polled_buttons_reach_state() {
    let mut fx = Fixture::new();
    fx.platform.set_button(MouseButton::Middle, ButtonState::Pressed);
    fx.move_to([50, 50]);
    assert!(fx.mouse.state().is_down(MouseButton::Middle));
}

#[test]
fn test_unsubscribed_listener_stops_receiving() {
    let mut fx = Fixture::new();
    let hits = Arc::new(Mutex::new(0));
    let counter = hits.clone();
    let id = fx.mouse.subscribe(MouseChannel::WheelScrolled, move |_, _| {
        *counter.lock().unwrap() += 1;
    });
    fx.move_to([50, 50]);

    fx.mouse.handle_input(&RawMouseEvent::wheel([50, 50], 120));
    fx.mouse.update();
    assert!(fx.mouse.unsubscribe(id));
    fx.mouse.handle_input(&RawMouseEvent::wheel([50, 50], 120));
    fx.mouse.update();

    assert_eq!(*hits.lock().unwrap(), 1);
}

#[test]
fn test_hook_handle_from_another_thread() {
    let mut fx = Fixture::new();
    fx.move_to([50, 50]);
    let hook = fx.mouse.hook();

    let consumed = std::thread::spawn(move || {
        hook.handle_input(&RawMouseEvent::new(
            MouseEventKind::LeftButtonPressed,
            [50, 50],
        ))
    })
    .join()
    .unwrap();

    assert!(consumed);
    fx.mouse.update();
    assert_eq!(fx.buttons().len(), 1);
}

#[test]
fn test_dispatch_raw_follows_hook_lifecycle() {
    let platform = Arc::new(HeadlessPlatform::new());
    let mut ui = RectUi::new();
    ui.add_control(PANEL, Rect::new(0, 0, 100, 100), CaptureFlags::MOUSE);
    let mut mouse = MouseHandler::new(platform.clone(), ui);
    let hook = mouse.hook();
    platform.set_position([50, 50]);
    mouse.update();

    let press = MouseEventKind::LeftButtonPressed.message();
    let mut service = InputService::new();
    service.register_handler(Box::new(mouse));

    assert!(!hook.dispatch_raw(press, [50, 50], 0, HookPayload::default()));
    service.enable_hook();
    assert!(hook.dispatch_raw(press, [50, 50], 0, HookPayload::default()));
    assert!(!hook.dispatch_raw(0x0207, [50, 50], 0, HookPayload::default()));
    service.disable_hook();
    assert!(!hook.dispatch_raw(press, [50, 50], 0, HookPayload::default()));
}
