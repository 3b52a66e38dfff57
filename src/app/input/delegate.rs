//! Multi-subscriber mouse event channels

use super::events::{MouseEventKind, RawMouseEvent};
use super::state::MouseState;

/// Callback invoked with the event and the frame state at dispatch time
pub type MouseCallback = Box<dyn FnMut(&RawMouseEvent, &MouseState) + Send>;

/// The six broadcast channels a mouse handler publishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseChannel {
    Moved,
    LeftButtonPressed,
    LeftButtonReleased,
    RightButtonPressed,
    RightButtonReleased,
    WheelScrolled,
}

impl MouseChannel {
    pub const ALL: [MouseChannel; 6] = [
        Self::Moved,
        Self::LeftButtonPressed,
        Self::LeftButtonReleased,
        Self::RightButtonPressed,
        Self::RightButtonReleased,
        Self::WheelScrolled,
    ];

    /// Channel for an event kind; `None` for kinds nobody can subscribe to
    pub fn for_kind(kind: MouseEventKind) -> Option<Self> {
        match kind {
            MouseEventKind::Moved => Some(Self::Moved),
            MouseEventKind::LeftButtonPressed => Some(Self::LeftButtonPressed),
            MouseEventKind::LeftButtonReleased => Some(Self::LeftButtonReleased),
            MouseEventKind::RightButtonPressed => Some(Self::RightButtonPressed),
            MouseEventKind::RightButtonReleased => Some(Self::RightButtonReleased),
            MouseEventKind::WheelScrolled => Some(Self::WheelScrolled),
            MouseEventKind::HorizontalWheelScrolled => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Handle returned by a subscription, used to remove it again
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId {
    channel: MouseChannel,
    id: u64,
}

impl SubscriptionId {
    pub fn channel(&self) -> MouseChannel {
        self.channel
    }
}

/// One broadcast channel
///
/// Subscribers fire synchronously in registration order.
#[derive(Default)]
struct Delegate {
    subscribers: Vec<(u64, MouseCallback)>,
}

impl Delegate {
    fn fire(&mut self, event: &RawMouseEvent, state: &MouseState) {
        for (_, callback) in &mut self.subscribers {
            callback(event, state);
        }
    }
}

/// All six channels of a mouse handler
#[derive(Default)]
pub struct MouseEvents {
    delegates: [Delegate; 6],
    next_id: u64,
}

impl MouseEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, channel: MouseChannel, callback: F) -> SubscriptionId
    where
        F: FnMut(&RawMouseEvent, &MouseState) + Send + 'static,
    {
        let id = self.next_id;
        self.next_id += 1;
        self.delegates[channel.index()]
            .subscribers
            .push((id, Box::new(callback)));
        SubscriptionId { channel, id }
    }

    /// Removes a subscription; returns false if it was already gone
    pub fn unsubscribe(&mut self, subscription: SubscriptionId) -> bool {
        let subscribers = &mut self.delegates[subscription.channel.index()].subscribers;
        let before = subscribers.len();
        subscribers.retain(|(id, _)| *id != subscription.id);
        subscribers.len() != before
    }

    pub fn subscriber_count(&self, channel: MouseChannel) -> usize {
        self.delegates[channel.index()].subscribers.len()
    }

    /// Fires the channel matching `event.kind`
    ///
    /// Returns false when the kind has no channel. A channel with no
    /// subscribers still counts as handled.
    pub fn fire(&mut self, event: &RawMouseEvent, state: &MouseState) -> bool {
        match MouseChannel::for_kind(event.kind) {
            Some(channel) => {
                self.delegates[channel.index()].fire(event, state);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    fn press() -> RawMouseEvent {
        RawMouseEvent::new(MouseEventKind::LeftButtonPressed, [1, 2])
    }

    #[test]
    fn test_fires_in_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut events = MouseEvents::new();
        for n in 0..3 {
            let log = log.clone();
            events.subscribe(MouseChannel::LeftButtonPressed, move |_, _| {
                log.lock().unwrap().push(n);
            });
        }

        assert!(events.fire(&press(), &MouseState::default()));
        assert_eq!(*log.lock().unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_unsubscribe() {
        let hits = Arc::new(Mutex::new(0));
        let mut events = MouseEvents::new();
        let counter = hits.clone();
        let id = events.subscribe(MouseChannel::LeftButtonPressed, move |_, _| {
            *counter.lock().unwrap() += 1;
        });

        assert!(events.unsubscribe(id));
        assert!(!events.unsubscribe(id));
        events.fire(&press(), &MouseState::default());
        assert_eq!(*hits.lock().unwrap(), 0);
        assert_eq!(events.subscriber_count(MouseChannel::LeftButtonPressed), 0);
    }

    #[test]
    fn test_channels_are_independent() {
        let hits = Arc::new(Mutex::new(0));
        let mut events = MouseEvents::new();
        let counter = hits.clone();
        events.subscribe(MouseChannel::RightButtonPressed, move |_, _| {
            *counter.lock().unwrap() += 1;
        });

        events.fire(&press(), &MouseState::default());
        assert_eq!(*hits.lock().unwrap(), 0);
    }

    #[test]
    fn test_horizontal_wheel_is_not_handled() {
        let mut events = MouseEvents::new();
        let event = RawMouseEvent::new(MouseEventKind::HorizontalWheelScrolled, [0, 0]);
        assert!(!events.fire(&event, &MouseState::default()));
    }
}
