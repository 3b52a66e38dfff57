//! Hook-reported mouse events

use crate::error::OverlayError;

/// Kind of a low-level mouse hook event
///
/// Discriminants are the native hook message codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum MouseEventKind {
    Moved = 0x0200,
    LeftButtonPressed = 0x0201,
    LeftButtonReleased = 0x0202,
    RightButtonPressed = 0x0204,
    RightButtonReleased = 0x0205,
    WheelScrolled = 0x020A,
    HorizontalWheelScrolled = 0x020E,
}

impl MouseEventKind {
    /// Native message code for this kind
    pub fn message(self) -> u32 {
        self as u32
    }

    pub fn is_release(self) -> bool {
        matches!(self, Self::LeftButtonReleased | Self::RightButtonReleased)
    }

    /// The press that pairs with this release, if this is a tracked release
    pub fn paired_press(self) -> Option<Self> {
        match self {
            Self::LeftButtonReleased => Some(Self::LeftButtonPressed),
            Self::RightButtonReleased => Some(Self::RightButtonPressed),
            _ => None,
        }
    }
}

impl TryFrom<u32> for MouseEventKind {
    type Error = OverlayError;

    fn try_from(message: u32) -> Result<Self, Self::Error> {
        Ok(match message {
            0x0200 => Self::Moved,
            0x0201 => Self::LeftButtonPressed,
            0x0202 => Self::LeftButtonReleased,
            0x0204 => Self::RightButtonPressed,
            0x0205 => Self::RightButtonReleased,
            0x020A => Self::WheelScrolled,
            0x020E => Self::HorizontalWheelScrolled,
            other => return Err(OverlayError::UnknownMessage(other)),
        })
    }
}

/// Opaque low-level fields carried through from the hook unchanged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HookPayload {
    pub mouse_data: u32,
    pub flags: u32,
    pub time: u32,
    pub extra: usize,
}

/// One hook-reported mouse occurrence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawMouseEvent {
    pub kind: MouseEventKind,
    /// Raw screen coordinates, never scaled
    pub point: [i32; 2],
    pub wheel_delta: i32,
    pub payload: HookPayload,
}

impl RawMouseEvent {
    pub fn new(kind: MouseEventKind, point: [i32; 2]) -> Self {
        Self {
            kind,
            point,
            wheel_delta: 0,
            payload: HookPayload::default(),
        }
    }

    /// A wheel event with the given delta
    pub fn wheel(point: [i32; 2], wheel_delta: i32) -> Self {
        Self {
            wheel_delta,
            ..Self::new(MouseEventKind::WheelScrolled, point)
        }
    }

    pub fn with_payload(mut self, payload: HookPayload) -> Self {
        self.payload = payload;
        self
    }

    /// Same coordinates and payload under a different kind
    pub fn with_kind(self, kind: MouseEventKind) -> Self {
        Self { kind, ..self }
    }
}
