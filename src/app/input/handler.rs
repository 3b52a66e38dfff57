//! Lifecycle trait for hook-driven input handlers

use std::any::Any;

/// An input handler attached to a platform hook
///
/// The input service forwards hook attach/detach and the frame tick to
/// every registered handler. Hook events themselves reach the handler
/// through its own thread-safe hook handle, not through this trait.
pub trait InputHandler {
    /// Name of this handler for lookup and logging
    fn name(&self) -> &str;

    /// Called once per frame on the frame thread
    fn update(&mut self);

    /// The hook was attached
    fn on_enable(&mut self);

    /// The hook was detached; must be idempotent
    fn on_disable(&mut self);

    /// Downcast to the concrete handler type
    fn as_any_mut(&mut self) -> &mut dyn Any;
}
