//! Mouse arbitration health check

use std::sync::{Arc, Mutex, PoisonError};

use crate::app::input::{
    CaptureFlags, ControlId, HeadlessPlatform, MouseChannel, MouseEventKind, MouseHandler,
    RawMouseEvent, Rect, RectUi,
};
use crate::health::check::{CheckResult, SystemCheck};

/// Drives the mouse core through scaling, camera drag and release repair
#[derive(Default)]
pub struct MouseCoreCheck;

impl MouseCoreCheck {
    pub fn new() -> Self {
        Self
    }
}

type Scenario = fn() -> Result<String, String>;

fn scaling() -> Result<String, String> {
    let platform = Arc::new(HeadlessPlatform::with_ui_scale(2.0));
    let mut mouse = MouseHandler::new(platform.clone(), RectUi::new());
    platform.set_position([400, 300]);
    mouse.update();

    match mouse.position() {
        [200, 150] => Ok("(400, 300) at scale 2.0 -> (200, 150)".to_string()),
        other => Err(format!("expected (200, 150), got {other:?}")),
    }
}

fn camera_drag() -> Result<String, String> {
    let platform = Arc::new(HeadlessPlatform::new());
    let mut mouse = MouseHandler::new(platform, RectUi::new());
    mouse.update();

    let consumed = [
        RawMouseEvent::new(MouseEventKind::RightButtonPressed, [10, 10]),
        RawMouseEvent::new(MouseEventKind::LeftButtonPressed, [10, 10]),
        RawMouseEvent::new(MouseEventKind::Moved, [50, 10]),
    ]
    .iter()
    .any(|event| mouse.handle_input(event));
    if consumed || !mouse.camera_dragging() {
        return Err("right-drag over empty space was intercepted".to_string());
    }

    mouse.handle_input(&RawMouseEvent::new(
        MouseEventKind::RightButtonReleased,
        [50, 10],
    ));
    if mouse.camera_dragging() {
        return Err("camera drag did not end on right release".to_string());
    }
    Ok("right-drag passes through to the host".to_string())
}

fn release_repair() -> Result<String, String> {
    let platform = Arc::new(HeadlessPlatform::new());
    let mut ui = RectUi::new();
    ui.add_control(ControlId(1), Rect::new(0, 0, 100, 100), CaptureFlags::MOUSE);
    let mut mouse = MouseHandler::new(platform.clone(), ui);

    let seen = Arc::new(Mutex::new(Vec::new()));
    for channel in [
        MouseChannel::LeftButtonPressed,
        MouseChannel::LeftButtonReleased,
    ] {
        let seen = seen.clone();
        mouse.subscribe(channel, move |event, _| {
            seen.lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push((event.kind, event.point));
        });
    }

    platform.set_position([20, 20]);
    mouse.update();
    mouse.on_disable();
    mouse.on_enable();
    mouse.handle_input(&RawMouseEvent::new(
        MouseEventKind::LeftButtonReleased,
        [20, 20],
    ));
    mouse.update();

    let seen = seen.lock().unwrap_or_else(PoisonError::into_inner).clone();
    let expected = vec![
        (MouseEventKind::LeftButtonPressed, [20, 20]),
        (MouseEventKind::LeftButtonReleased, [20, 20]),
    ];
    if seen == expected {
        Ok("orphaned release completed with a synthesized press".to_string())
    } else {
        Err(format!("expected press then release, got {seen:?}"))
    }
}

impl SystemCheck for MouseCoreCheck {
    fn name(&self) -> &'static str {
        "Mouse Core"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Runs the mouse arbitration core against a headless platform")
    }

    fn check(&self) -> CheckResult {
        let scenarios: [(&str, Scenario); 3] = [
            ("scaling", scaling),
            ("camera drag", camera_drag),
            ("release repair", release_repair),
        ];

        let mut details = Vec::new();
        let mut failed = Vec::new();
        for (name, scenario) in scenarios {
            match scenario() {
                Ok(message) => details.push(format!("  ✓ {name}: {message}")),
                Err(message) => {
                    details.push(format!("  ✗ {name}: {message}"));
                    failed.push(name);
                }
            }
        }

        let details = details.join("\n");
        if failed.is_empty() {
            CheckResult::pass("Arbitration scenarios behave").with_details(details)
        } else {
            CheckResult::fail(format!("Failed: {}", failed.join(", "))).with_details(details)
        }
    }
}
