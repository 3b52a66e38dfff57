//! Frame loop hosting the mouse core

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::config::AppConfig;
use super::input::{
    ButtonState, CaptureFlags, ControlId, HeadlessPlatform, HookPayload, InputService,
    MouseButton, MouseChannel, MouseEventKind, MouseHandler, MouseHook, Rect, RectUi,
};

/// Name the mouse handler is registered under
pub const MOUSE_HANDLER: &str = "mouse";

/// Lifecycle requests from the hook thread, applied at the next frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HookCommand {
    Detach,
    Attach,
}

/// One step of the scripted demo session, in UI coordinates
#[derive(Debug, Clone, Copy)]
enum DemoStep {
    Native {
        kind: MouseEventKind,
        point: [i32; 2],
        wheel_delta: i32,
    },
    Command(HookCommand),
}

/// Counters collected over a demo session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DemoSummary {
    pub frames: u64,
    pub consumed: u64,
    pub passed_through: u64,
    pub dispatched: u64,
}

/// Overlay host: owns the input service and ticks it once per frame
pub struct OverlayApp {
    config: AppConfig,
    platform: Arc<HeadlessPlatform>,
    input: InputService,
    hook: MouseHook,
    frame: u64,
    dispatched: Arc<AtomicU64>,
}

impl OverlayApp {
    /// Creates the overlay with the provided configuration
    pub fn new(config: AppConfig) -> Self {
        info!(profile = %config.profile, "Starting overlay");
        info!(?config.input, "Input configuration");

        let platform = Arc::new(HeadlessPlatform::with_ui_scale(config.input.ui_scale));
        let mut mouse = MouseHandler::new(platform.clone(), Self::demo_ui(&config));

        let dispatched = Arc::new(AtomicU64::new(0));
        for channel in MouseChannel::ALL {
            let counter = dispatched.clone();
            mouse.subscribe(channel, move |event, state| {
                counter.fetch_add(1, Ordering::Relaxed);
                if channel == MouseChannel::Moved {
                    debug!(position = ?state.position, "Mouse moved");
                } else {
                    info!(
                        ?channel,
                        point = ?event.point,
                        position = ?state.position,
                        "Mouse event"
                    );
                }
            });
        }

        let hook = mouse.hook();
        let mut input = InputService::new();
        input.register_handler(Box::new(mouse));

        Self {
            config,
            platform,
            input,
            hook,
            frame: 0,
            dispatched,
        }
    }

    /// Creates the overlay with configuration loaded from environment
    pub fn from_env() -> Self {
        let config = AppConfig::load_from_env().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load config, using default configuration");
            AppConfig::default()
        });
        Self::new(config)
    }

    /// Menu bar that lets input through and a settings window that captures it
    fn demo_ui(config: &AppConfig) -> RectUi {
        let scale = config.input.ui_scale;
        let width = (config.window.width as f32 / scale) as i32;
        let height = (config.window.height as f32 / scale) as i32;

        let mut ui = RectUi::new();
        ui.add_control(
            ControlId(1),
            Rect::new(0, 0, width, 32),
            CaptureFlags::MOUSE | CaptureFlags::DO_NOT_BLOCK,
        );
        ui.add_control(
            ControlId(2),
            Rect::new(width / 4, height / 4, width / 2, height / 2),
            CaptureFlags::MOUSE | CaptureFlags::MOUSE_WHEEL,
        );
        ui
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn platform(&self) -> &Arc<HeadlessPlatform> {
        &self.platform
    }

    /// Handle for the hook thread
    pub fn hook(&self) -> MouseHook {
        self.hook.clone()
    }

    pub fn mouse(&mut self) -> Option<&mut MouseHandler<RectUi>> {
        self.input.handler_mut::<MouseHandler<RectUi>>(MOUSE_HANDLER)
    }

    pub fn input(&mut self) -> &mut InputService {
        &mut self.input
    }

    /// Advances one frame
    pub fn frame(&mut self) {
        self.input.update();
        self.frame += 1;
    }

    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Runs the scripted session with a hook thread feeding native messages
    pub fn run_demo(&mut self) -> DemoSummary {
        let frame_time = Duration::from_secs_f64(1.0 / f64::from(self.config.input.frame_rate));
        let consumed = Arc::new(AtomicU64::new(0));
        let passed = Arc::new(AtomicU64::new(0));
        let (commands, pending_commands) = mpsc::channel();

        self.input.enable_hook();

        let script = self.demo_script();
        let worker = {
            let hook = self.hook.clone();
            let platform = self.platform.clone();
            let scale = self.config.input.ui_scale;
            let (consumed, passed) = (consumed.clone(), passed.clone());
            thread::spawn(move || {
                play_script(&script, &hook, &platform, scale, frame_time, &commands, |eaten| {
                    let counter = if eaten { &consumed } else { &passed };
                    counter.fetch_add(1, Ordering::Relaxed);
                });
            })
        };

        let start_frame = self.frame;
        for _ in 0..self.config.input.demo_frames {
            self.apply_commands(&pending_commands);
            self.frame();
            thread::sleep(frame_time);
        }

        if worker.join().is_err() {
            warn!("Hook thread panicked");
        }
        self.input.disable_hook();

        let summary = DemoSummary {
            frames: self.frame - start_frame,
            consumed: consumed.load(Ordering::Relaxed),
            passed_through: passed.load(Ordering::Relaxed),
            dispatched: self.dispatched.load(Ordering::Relaxed),
        };
        info!(?summary, "Demo session finished");
        summary
    }

    fn apply_commands(&mut self, commands: &Receiver<HookCommand>) {
        loop {
            match commands.try_recv() {
                Ok(HookCommand::Detach) => self.input.disable_hook(),
                Ok(HookCommand::Attach) => self.input.enable_hook(),
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
    }

    fn demo_script(&self) -> Vec<DemoStep> {
        let width = (self.config.window.width as f32 / self.config.input.ui_scale) as i32;
        let height = (self.config.window.height as f32 / self.config.input.ui_scale) as i32;
        let menu = [width / 2, 16];
        let panel = [width / 2, height / 2];
        let world = [width - 40, height - 40];

        let native = |kind, point| DemoStep::Native {
            kind,
            point,
            wheel_delta: 0,
        };

        vec![
            native(MouseEventKind::Moved, menu),
            native(MouseEventKind::LeftButtonPressed, menu),
            native(MouseEventKind::LeftButtonReleased, menu),
            native(MouseEventKind::Moved, panel),
            native(MouseEventKind::LeftButtonPressed, panel),
            native(MouseEventKind::LeftButtonReleased, panel),
            DemoStep::Native {
                kind: MouseEventKind::WheelScrolled,
                point: panel,
                wheel_delta: 120,
            },
            native(MouseEventKind::Moved, world),
            native(MouseEventKind::RightButtonPressed, world),
            native(MouseEventKind::Moved, [world[0] - 200, world[1]]),
            native(MouseEventKind::RightButtonReleased, [world[0] - 200, world[1]]),
            native(MouseEventKind::Moved, panel),
            native(MouseEventKind::LeftButtonPressed, panel),
            DemoStep::Command(HookCommand::Detach),
            DemoStep::Command(HookCommand::Attach),
            native(MouseEventKind::LeftButtonReleased, panel),
        ]
    }
}

impl Default for OverlayApp {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Feeds the script to the hook the way the platform would
fn play_script(
    script: &[DemoStep],
    hook: &MouseHook,
    platform: &HeadlessPlatform,
    scale: f32,
    step_time: Duration,
    commands: &Sender<HookCommand>,
    mut record: impl FnMut(bool),
) {
    for step in script {
        thread::sleep(step_time * 2);
        match *step {
            DemoStep::Command(command) => {
                if commands.send(command).is_err() {
                    return;
                }
                // Give the frame loop a chance to apply it
                thread::sleep(step_time * 2);
            }
            DemoStep::Native {
                kind,
                point,
                wheel_delta,
            } => {
                let raw = [
                    (point[0] as f32 * scale) as i32,
                    (point[1] as f32 * scale) as i32,
                ];
                match kind {
                    MouseEventKind::Moved => platform.set_position(raw),
                    MouseEventKind::LeftButtonPressed => {
                        platform.set_button(MouseButton::Left, ButtonState::Pressed)
                    }
                    MouseEventKind::LeftButtonReleased => {
                        platform.set_button(MouseButton::Left, ButtonState::Released)
                    }
                    MouseEventKind::RightButtonPressed => {
                        platform.set_button(MouseButton::Right, ButtonState::Pressed)
                    }
                    MouseEventKind::RightButtonReleased => {
                        platform.set_button(MouseButton::Right, ButtonState::Released)
                    }
                    _ => {}
                }

                let eaten =
                    hook.dispatch_raw(kind.message(), raw, wheel_delta, HookPayload::default());
                debug!(?kind, ?raw, consumed = eaten, "Hook message");
                record(eaten);
            }
        }
    }
}
