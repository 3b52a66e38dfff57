//! Signals read from the platform and host application

use super::state::PolledMouse;

/// Integer screen rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Half-open containment: the right and bottom edges are outside
    pub fn contains(&self, point: [i32; 2]) -> bool {
        point[0] >= self.x
            && point[0] < self.x + self.width
            && point[1] >= self.y
            && point[1] < self.y + self.height
    }
}

/// Hardware cursor visibility as reported by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorVisibility {
    #[default]
    Showing,
    /// Suppressed for touch or pen input; the overlay still acts normally
    Suppressed,
    /// Hidden by the host for camera look or action camera
    Hiding,
}

impl CursorVisibility {
    pub fn is_visible(self) -> bool {
        !matches!(self, Self::Hiding)
    }
}

/// What the overlay knows about the host application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostStatus {
    pub running: bool,
    pub focused: bool,
    pub interface_hidden: bool,
}

impl HostStatus {
    /// Host running and focused with the overlay shown
    pub fn active() -> Self {
        Self {
            running: true,
            focused: true,
            interface_hidden: false,
        }
    }

    pub fn accepts_input(&self) -> bool {
        self.running && self.focused && !self.interface_hidden
    }
}

impl Default for HostStatus {
    fn default() -> Self {
        Self::active()
    }
}

/// Platform services the mouse core depends on
///
/// Called from both the hook thread and the frame thread.
pub trait Platform: Send + Sync {
    /// Frame-synchronized button and position snapshot
    fn poll_mouse(&self) -> PolledMouse;

    fn cursor_visibility(&self) -> CursorVisibility;

    fn host_status(&self) -> HostStatus;

    /// Current UI scale multiplier from the graphics service
    fn ui_scale(&self) -> f32;

    /// Client area of another active top-level window of this process
    /// (debug console, editors), if any
    fn foreign_window(&self) -> Option<Rect> {
        None
    }
}
