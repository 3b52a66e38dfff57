//! Owner of the input handlers and the hook lifecycle

use tracing::{debug, info};

use super::handler::InputHandler;

/// Drives registered handlers through hook attach/detach and frame ticks
pub struct InputService {
    handlers: Vec<Box<dyn InputHandler>>,
    hook_enabled: bool,
}

impl InputService {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
            hook_enabled: false,
        }
    }

    /// Registers a handler; it is enabled right away if the hook is attached
    pub fn register_handler(&mut self, mut handler: Box<dyn InputHandler>) {
        debug!(handler = handler.name(), "Registering input handler");
        if self.hook_enabled {
            handler.on_enable();
        }
        self.handlers.push(handler);
    }

    /// Attaches the hook; does nothing if it is already attached
    pub fn enable_hook(&mut self) {
        if self.hook_enabled {
            return;
        }
        info!(handlers = self.handlers.len(), "Attaching input hooks");
        self.hook_enabled = true;
        for handler in &mut self.handlers {
            handler.on_enable();
        }
    }

    /// Detaches the hook; does nothing if it is already detached
    pub fn disable_hook(&mut self) {
        if !self.hook_enabled {
            return;
        }
        info!("Detaching input hooks");
        self.hook_enabled = false;
        for handler in &mut self.handlers {
            handler.on_disable();
        }
    }

    pub fn is_hook_enabled(&self) -> bool {
        self.hook_enabled
    }

    /// Forwards one frame tick to every handler
    pub fn update(&mut self) {
        for handler in &mut self.handlers {
            handler.update();
        }
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Looks up a handler by name
    pub fn get_handler_mut(&mut self, name: &str) -> Option<&mut (dyn InputHandler + '_)> {
        if let Some(boxed) = self.handlers.iter_mut().find(|h| h.name() == name) {
            Some(boxed.as_mut())
        } else {
            None
        }
    }

    /// Looks up a handler by name and concrete type
    pub fn handler_mut<T: 'static>(&mut self, name: &str) -> Option<&mut T> {
        self.get_handler_mut(name)?.as_any_mut().downcast_mut::<T>()
    }
}

impl Default for InputService {
    fn default() -> Self {
        Self::new()
    }
}
