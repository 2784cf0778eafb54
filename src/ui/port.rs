//! The host environment port.
//!
//! Interactive components never touch window size, timers, global listeners or
//! document scrolling directly. They go through an [`Environment`] handed to
//! them by whoever mounts them, and every acquisition returns a handle that the
//! component gives back on teardown.
//!
//! ## Acquire / Release Pairs
//!
//! | Acquire | Release |
//! |---------|---------|
//! | [`Environment::add_listener`] | [`Environment::remove_listener`] |
//! | [`Environment::set_interval`] | [`Environment::clear_interval`] |
//! | `set_scroll_locked(true)` | `set_scroll_locked(false)` |
//!
//! The host delivers the consequences of those acquisitions back to the
//! component tree as [`HostEvent`]s: a resize event only reaches a screen that
//! holds a resize listener, a tick carries the [`TimerId`] it was armed with.
//!
//! Two hosts ship with the crate: the browser runtime embedded by
//! [`crate::generate`] (JavaScript, outside this module) and [`RenderHost`], a
//! frozen environment used at build time to compute the state every widget
//! starts in.

use std::collections::BTreeMap;
use std::time::Duration;

/// Handle returned by [`Environment::add_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(pub u64);

/// Handle returned by [`Environment::set_interval`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(pub u64);

/// Global event sources a component can listen to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventKind {
    Resize,
    KeyDown,
}

/// Keys the interaction model reacts to. Everything else collapses to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_dom(name: &str) -> Self {
        match name {
            "Escape" | "Esc" => Key::Escape,
            "ArrowLeft" | "Left" => Key::ArrowLeft,
            "ArrowRight" | "Right" => Key::ArrowRight,
            _ => Key::Other,
        }
    }
}

/// Something the host reports back to a mounted screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    Resize { width: u32 },
    Tick(TimerId),
    KeyDown(Key),
}

/// Ambient browser state, made explicit.
pub trait Environment {
    /// Current viewport width in CSS pixels.
    fn viewport_width(&self) -> u32;

    fn add_listener(&mut self, kind: EventKind) -> ListenerId;

    /// Removing an unknown or already removed listener is a no-op.
    fn remove_listener(&mut self, id: ListenerId);

    fn set_interval(&mut self, period: Duration) -> TimerId;

    /// Clearing an unknown or already cleared timer is a no-op.
    fn clear_interval(&mut self, id: TimerId);

    /// Enable or disable document-level scrolling.
    fn set_scroll_locked(&mut self, locked: bool);
}

// ============================================================================
// RenderHost
// ============================================================================

/// A frozen environment: fixed width, no event loop.
///
/// Mounting a screen on a `RenderHost` yields exactly the state the first paint
/// shows before any timer fires or any resize is observed. It still keeps the
/// books on what was acquired so the generator can assert a clean teardown.
#[derive(Debug, Clone)]
pub struct RenderHost {
    width: u32,
    next_handle: u64,
    listeners: BTreeMap<ListenerId, EventKind>,
    timers: BTreeMap<TimerId, Duration>,
    scroll_locked: bool,
}

impl RenderHost {
    pub fn new(width: u32) -> Self {
        Self {
            width,
            next_handle: 1,
            listeners: BTreeMap::new(),
            timers: BTreeMap::new(),
            scroll_locked: false,
        }
    }

    /// Number of listeners and timers still held.
    pub fn live_resources(&self) -> usize {
        self.listeners.len() + self.timers.len()
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    fn handle(&mut self) -> u64 {
        let id = self.next_handle;
        self.next_handle += 1;
        id
    }
}

impl Environment for RenderHost {
    fn viewport_width(&self) -> u32 {
        self.width
    }

    fn add_listener(&mut self, kind: EventKind) -> ListenerId {
        let id = ListenerId(self.handle());
        self.listeners.insert(id, kind);
        id
    }

    fn remove_listener(&mut self, id: ListenerId) {
        self.listeners.remove(&id);
    }

    fn set_interval(&mut self, period: Duration) -> TimerId {
        let id = TimerId(self.handle());
        self.timers.insert(id, period);
        id
    }

    fn clear_interval(&mut self, id: TimerId) {
        self.timers.remove(&id);
    }

    fn set_scroll_locked(&mut self, locked: bool) {
        self.scroll_locked = locked;
    }
}
