//! Autoplay carousel.
//!
//! ```text
//!            open viewer (click)
//!   Playing ─────────────────────▶ Paused
//!      ▲                              │
//!      └──────────────────────────────┘
//!               viewer closed
//! ```
//!
//! While playing, an interval timer advances the visible image by one,
//! wrapping at the end. The timer only exists while playing: pausing clears
//! it, resuming arms a fresh one. A single-image carousel never arms a timer.

use super::modal::ModalRequest;
use super::port::{Environment, TimerId};
use crate::assets::ImageSet;
use std::time::Duration;

pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Playback {
    Playing,
    Paused,
}

#[derive(Debug, Clone)]
pub struct Carousel {
    images: ImageSet,
    current: usize,
    playback: Playback,
    interval: Duration,
    timer: Option<TimerId>,
}

impl Carousel {
    pub fn new(images: ImageSet, interval: Duration) -> Self {
        Self {
            images,
            current: 0,
            playback: Playback::Playing,
            interval,
            timer: None,
        }
    }

    pub fn mount(&mut self, env: &mut dyn Environment) {
        self.arm(env);
    }

    pub fn unmount(&mut self, env: &mut dyn Environment) {
        self.disarm(env);
    }

    /// Advance on a tick from this carousel's own timer. Ticks from a timer
    /// that has since been cleared are ignored. Returns `true` if the visible
    /// image changed.
    pub fn on_tick(&mut self, timer: TimerId) -> bool {
        if self.playback != Playback::Playing || self.timer != Some(timer) {
            return false;
        }
        self.advance()
    }

    /// Whether `timer` is the one this carousel is currently driven by.
    pub fn owns_timer(&self, timer: TimerId) -> bool {
        self.timer == Some(timer)
    }

    pub fn pause(&mut self, env: &mut dyn Environment) {
        self.playback = Playback::Paused;
        self.disarm(env);
    }

    pub fn resume(&mut self, env: &mut dyn Environment) {
        self.playback = Playback::Playing;
        self.arm(env);
    }

    /// A click on the visible image: pause and ask for the viewer to open on it.
    pub fn click(&mut self, env: &mut dyn Environment) -> ModalRequest {
        self.pause(env);
        ModalRequest {
            images: self.images.clone(),
            initial_index: self.current,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_id(&self) -> u32 {
        self.images.id_at(self.current)
    }

    pub fn images(&self) -> &ImageSet {
        &self.images
    }

    pub fn playback(&self) -> Playback {
        self.playback
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    fn advance(&mut self) -> bool {
        let len = self.images.len();
        if len <= 1 {
            return false;
        }
        self.current = (self.current + 1) % len;
        true
    }

    fn arm(&mut self, env: &mut dyn Environment) {
        if self.playback == Playback::Playing && self.timer.is_none() && self.images.len() > 1 {
            self.timer = Some(env.set_interval(self.interval));
        }
    }

    fn disarm(&mut self, env: &mut dyn Environment) {
        if let Some(id) = self.timer.take() {
            env.clear_interval(id);
        }
    }
}
