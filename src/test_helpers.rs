//! Shared test utilities for the pinzoro-site test suite.
//!
//! Provides [`FakeHost`], an [`Environment`] with a manual clock that records
//! every resource a component acquires or releases, and fixtures built from
//! the stock content and configuration.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let mut host = FakeHost::new(375);
//! let mut screen = home_screen();
//! screen.mount(&mut host);
//!
//! for event in host.advance(Duration::from_millis(3000)) {
//!     screen.handle(event, &mut host);
//! }
//! screen.unmount(&mut host);
//! assert_eq!(host.live_listeners() + host.live_timers(), 0);
//! ```

use std::collections::BTreeMap;
use std::time::Duration;

use crate::config::SiteConfig;
use crate::content::{SiteContent, parse_content, stock_content_toml};
use crate::ui::home::HomeScreen;
use crate::ui::port::{Environment, EventKind, HostEvent, Key, ListenerId, TimerId};

// =========================================================================
// Fixtures
// =========================================================================

/// The compiled-in content. Panics if it fails to parse or validate.
pub fn stock_content() -> SiteContent {
    parse_content(stock_content_toml()).unwrap()
}

/// An unmounted home screen over the stock content and default settings.
pub fn home_screen() -> HomeScreen {
    stock_content()
        .home_screen(SiteConfig::default().home_settings())
        .unwrap()
}

// =========================================================================
// FakeHost
// =========================================================================

/// A host resource, as it appears in the acquisition and release logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Listener(ListenerId),
    Timer(TimerId),
}

#[derive(Debug, Clone, Copy)]
struct Interval {
    period: Duration,
    next_due: Duration,
}

/// Deterministic environment with a clock that only moves when told to.
#[derive(Debug)]
pub struct FakeHost {
    width: u32,
    now: Duration,
    next_handle: u64,
    listeners: BTreeMap<ListenerId, EventKind>,
    timers: BTreeMap<TimerId, Interval>,
    removed_listeners: usize,
    scroll_locked: bool,
    scroll_locks: usize,
    scroll_unlocks: usize,
    acquired: Vec<Resource>,
    released: Vec<Resource>,
}

impl FakeHost {
    pub fn new(width: u32) -> Self {
        Self {
            width,
            now: Duration::ZERO,
            next_handle: 1,
            listeners: BTreeMap::new(),
            timers: BTreeMap::new(),
            removed_listeners: 0,
            scroll_locked: false,
            scroll_locks: 0,
            scroll_unlocks: 0,
            acquired: Vec::new(),
            released: Vec::new(),
        }
    }

    /// Move the clock forward and return the ids of every interval that fired,
    /// in firing order. Intervals due at the same instant fire in handle order.
    pub fn advance_ticks(&mut self, by: Duration) -> Vec<TimerId> {
        let target = self.now + by;
        let mut fired = Vec::new();
        loop {
            let due = self
                .timers
                .iter()
                .filter(|(_, t)| !t.period.is_zero() && t.next_due <= target)
                .min_by_key(|(id, t)| (t.next_due, **id))
                .map(|(id, _)| *id);
            let Some(id) = due else { break };
            if let Some(timer) = self.timers.get_mut(&id) {
                self.now = timer.next_due;
                timer.next_due += timer.period;
            }
            fired.push(id);
        }
        self.now = target;
        fired
    }

    /// Like [`advance_ticks`](Self::advance_ticks), wrapped as host events.
    pub fn advance(&mut self, by: Duration) -> Vec<HostEvent> {
        self.advance_ticks(by)
            .into_iter()
            .map(HostEvent::Tick)
            .collect()
    }

    /// Change the viewport width. Produces an event only if someone listens.
    pub fn resize(&mut self, width: u32) -> Vec<HostEvent> {
        self.width = width;
        if self.listener_count(EventKind::Resize) > 0 {
            vec![HostEvent::Resize { width }]
        } else {
            Vec::new()
        }
    }

    /// Press a key. Produces an event only if someone listens.
    pub fn key(&mut self, key: Key) -> Vec<HostEvent> {
        if self.listener_count(EventKind::KeyDown) > 0 {
            vec![HostEvent::KeyDown(key)]
        } else {
            Vec::new()
        }
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners.values().filter(|k| **k == kind).count()
    }

    pub fn live_listeners(&self) -> usize {
        self.listeners.len()
    }

    /// Listeners actually removed; removing an unknown id does not count.
    pub fn removed_listeners(&self) -> usize {
        self.removed_listeners
    }

    pub fn live_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn timer_ids(&self) -> Vec<TimerId> {
        self.timers.keys().copied().collect()
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    /// Unlocked → locked transitions.
    pub fn scroll_locks(&self) -> usize {
        self.scroll_locks
    }

    /// Locked → unlocked transitions.
    pub fn scroll_unlocks(&self) -> usize {
        self.scroll_unlocks
    }

    pub fn acquisition_log(&self) -> Vec<Resource> {
        self.acquired.clone()
    }

    pub fn release_log(&self) -> Vec<Resource> {
        self.released.clone()
    }

    fn handle(&mut self) -> u64 {
        let id = self.next_handle;
        self.next_handle += 1;
        id
    }
}

impl Environment for FakeHost {
    fn viewport_width(&self) -> u32 {
        self.width
    }

    fn add_listener(&mut self, kind: EventKind) -> ListenerId {
        let id = ListenerId(self.handle());
        self.listeners.insert(id, kind);
        self.acquired.push(Resource::Listener(id));
        id
    }

    fn remove_listener(&mut self, id: ListenerId) {
        if self.listeners.remove(&id).is_some() {
            self.removed_listeners += 1;
            self.released.push(Resource::Listener(id));
        }
    }

    fn set_interval(&mut self, period: Duration) -> TimerId {
        let id = TimerId(self.handle());
        self.timers.insert(
            id,
            Interval {
                period,
                next_due: self.now + period,
            },
        );
        self.acquired.push(Resource::Timer(id));
        id
    }

    fn clear_interval(&mut self, id: TimerId) {
        if self.timers.remove(&id).is_some() {
            self.released.push(Resource::Timer(id));
        }
    }

    fn set_scroll_locked(&mut self, locked: bool) {
        match (self.scroll_locked, locked) {
            (false, true) => self.scroll_locks += 1,
            (true, false) => self.scroll_unlocks += 1,
            _ => {}
        }
        self.scroll_locked = locked;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intervals_fire_in_due_order() {
        let mut host = FakeHost::new(1280);
        let slow = host.set_interval(Duration::from_millis(300));
        let fast = host.set_interval(Duration::from_millis(200));

        let fired = host.advance_ticks(Duration::from_millis(600));
        assert_eq!(fired, vec![fast, slow, fast, slow, fast]);
    }

    #[test]
    fn interval_armed_mid_stream_starts_from_now() {
        let mut host = FakeHost::new(1280);
        host.advance_ticks(Duration::from_millis(250));
        let t = host.set_interval(Duration::from_millis(100));
        assert!(host.advance_ticks(Duration::from_millis(99)).is_empty());
        assert_eq!(host.advance_ticks(Duration::from_millis(1)), vec![t]);
    }

    #[test]
    fn events_need_listeners() {
        let mut host = FakeHost::new(1280);
        assert!(host.resize(375).is_empty());
        assert_eq!(host.viewport_width(), 375);
        assert!(host.key(Key::Escape).is_empty());

        host.add_listener(EventKind::KeyDown);
        assert_eq!(host.key(Key::Escape), vec![HostEvent::KeyDown(Key::Escape)]);
    }

    #[test]
    fn scroll_counters_track_transitions() {
        let mut host = FakeHost::new(1280);
        host.set_scroll_locked(true);
        host.set_scroll_locked(true);
        host.set_scroll_locked(false);
        host.set_scroll_locked(false);
        assert_eq!(host.scroll_locks(), 1);
        assert_eq!(host.scroll_unlocks(), 1);
    }
}
