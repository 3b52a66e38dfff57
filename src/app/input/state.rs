//! Per-frame mouse state

/// Press state of a single mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonState {
    #[default]
    Released,
    Pressed,
}

impl ButtonState {
    pub fn is_down(self) -> bool {
        matches!(self, Self::Pressed)
    }
}

/// Mouse button identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    X1,
    X2,
}

/// State of all mouse buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MouseButtons {
    pub left: ButtonState,
    pub middle: ButtonState,
    pub right: ButtonState,
    pub x1: ButtonState,
    pub x2: ButtonState,
}

impl MouseButtons {
    pub fn get(&self, button: MouseButton) -> ButtonState {
        match button {
            MouseButton::Left => self.left,
            MouseButton::Middle => self.middle,
            MouseButton::Right => self.right,
            MouseButton::X1 => self.x1,
            MouseButton::X2 => self.x2,
        }
    }

    /// Copy with one button replaced
    pub fn with(mut self, button: MouseButton, state: ButtonState) -> Self {
        match button {
            MouseButton::Left => self.left = state,
            MouseButton::Middle => self.middle = state,
            MouseButton::Right => self.right = state,
            MouseButton::X1 => self.x1 = state,
            MouseButton::X2 => self.x2 = state,
        }
        self
    }
}

/// Snapshot returned by the frame-synchronized poller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PolledMouse {
    /// Unscaled window position
    pub position: [i32; 2],
    pub buttons: MouseButtons,
}

/// Mouse state for a single frame
///
/// A new value is built every frame; nothing mutates one in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MouseState {
    /// Position in UI coordinates (polled position divided by the UI scale)
    pub position: [i32; 2],
    /// Last coordinates reported by the hook, never scaled
    pub position_raw: [i32; 2],
    /// Wheel delta carried by this frame's buffered event
    pub wheel_delta: i32,
    pub buttons: MouseButtons,
}

impl MouseState {
    /// Builds the frame state from a polled snapshot
    ///
    /// The scaled position truncates toward zero.
    pub fn from_polled(
        polled: PolledMouse,
        ui_scale: f32,
        position_raw: [i32; 2],
        wheel_delta: i32,
    ) -> Self {
        Self {
            position: [
                (polled.position[0] as f32 / ui_scale) as i32,
                (polled.position[1] as f32 / ui_scale) as i32,
            ],
            position_raw,
            wheel_delta,
            buttons: polled.buttons,
        }
    }

    /// Copy with one button replaced
    pub fn with_button(self, button: MouseButton, state: ButtonState) -> Self {
        Self {
            buttons: self.buttons.with(button, state),
            ..self
        }
    }

    pub fn is_down(&self, button: MouseButton) -> bool {
        self.buttons.get(button).is_down()
    }
}
