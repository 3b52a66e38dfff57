//! Seam to the overlay's widget tree

use bitflags::bitflags;

use super::events::MouseEventKind;
use super::state::MouseState;

bitflags! {
    /// A UI element's input capture policy
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CaptureFlags: u8 {
        const MOUSE = 1 << 0;
        const MOUSE_WHEEL = 1 << 1;
        const FILTER = 1 << 2;
        const FORCE_NONE = 1 << 3;
        /// Input reaches the host even while this element has focus
        const DO_NOT_BLOCK = 1 << 4;
    }
}

/// Identifier of an element owned by the UI tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ControlId(pub u32);

/// Topmost interactive element found by hit testing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitTarget {
    pub id: ControlId,
    pub captures: CaptureFlags,
}

impl HitTarget {
    pub fn new(id: ControlId, captures: CaptureFlags) -> Self {
        Self { id, captures }
    }

    pub fn blocks_input(&self) -> bool {
        !self.captures.contains(CaptureFlags::DO_NOT_BLOCK)
    }
}

/// The widget tree as seen by the mouse core
pub trait HitTestTarget {
    /// Delivers `kind` at `state.position` and returns the element under it
    fn trigger_input(&mut self, kind: MouseEventKind, state: &MouseState) -> Option<HitTarget>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_do_not_block() {
        let blocking = HitTarget::new(ControlId(1), CaptureFlags::MOUSE);
        let passive = HitTarget::new(
            ControlId(2),
            CaptureFlags::MOUSE | CaptureFlags::DO_NOT_BLOCK,
        );
        assert!(blocking.blocks_input());
        assert!(!passive.blocks_input());
    }
}
