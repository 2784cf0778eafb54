//! Modal image viewer.
//!
//! One overlay component serves both the carousel galleries and the shop QR
//! popup; the QR popup is simply a viewer over a one-image set, where prev and
//! next are identities and no arrows are drawn.
//!
//! ## Input
//!
//! | Input | Effect |
//! |-------|--------|
//! | `Escape` | close |
//! | `ArrowLeft` / prev button | `i = (i - 1 + n) % n` |
//! | `ArrowRight` / next button | `i = (i + 1) % n` |
//! | click on backdrop | close |
//! | click inside panel | nothing |
//!
//! ## Resources
//!
//! Opening acquires a keydown listener and the document scroll lock. Every
//! close path (button, Escape, backdrop, unmount) funnels into
//! [`ModalViewer::close`], which releases both exactly once; closing a closed
//! viewer does nothing.
//!
//! When several viewers can be stacked, their owner builds them with
//! [`ModalViewer::stacked`] and holds the scroll lock itself; a stacked viewer
//! only manages its keydown listener.

use super::port::{Environment, EventKind, Key, ListenerId};
use super::viewport::LayoutClass;
use crate::assets::{ImageFamily, ImageSet};
use serde::Serialize;

/// Everything needed to open a viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalRequest {
    pub images: ImageSet,
    pub initial_index: usize,
}

/// Where a click inside the overlay landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Backdrop,
    Panel,
    CloseButton,
    PrevButton,
    NextButton,
}

/// What the owner of the viewer should do after an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalOutcome {
    Ignored,
    Navigated,
    Closed,
}

#[derive(Debug, Clone)]
struct OpenState {
    images: ImageSet,
    current: usize,
    key_listener: ListenerId,
}

#[derive(Debug, Clone)]
pub struct ModalViewer {
    open: Option<OpenState>,
    locks_scroll: bool,
}

impl Default for ModalViewer {
    fn default() -> Self {
        Self::new()
    }
}

impl ModalViewer {
    pub fn new() -> Self {
        Self {
            open: None,
            locks_scroll: true,
        }
    }

    /// A viewer that leaves the document scroll lock to its owner.
    pub fn stacked() -> Self {
        Self {
            open: None,
            locks_scroll: false,
        }
    }

    /// Show `request.images[initial_index]`. An index past the end wraps.
    ///
    /// Opening an already open viewer swaps its contents and keeps the
    /// resources it holds.
    pub fn open(&mut self, request: ModalRequest, env: &mut dyn Environment) {
        let current = request.initial_index % request.images.len();
        match &mut self.open {
            Some(state) => {
                state.images = request.images;
                state.current = current;
            }
            None => {
                let key_listener = env.add_listener(EventKind::KeyDown);
                if self.locks_scroll {
                    env.set_scroll_locked(true);
                }
                self.open = Some(OpenState {
                    images: request.images,
                    current,
                    key_listener,
                });
            }
        }
    }

    /// Returns `true` if this call actually closed the viewer.
    pub fn close(&mut self, env: &mut dyn Environment) -> bool {
        match self.open.take() {
            Some(state) => {
                env.remove_listener(state.key_listener);
                if self.locks_scroll {
                    env.set_scroll_locked(false);
                }
                true
            }
            None => false,
        }
    }

    pub fn next(&mut self) {
        if let Some(state) = &mut self.open {
            state.current = (state.current + 1) % state.images.len();
        }
    }

    pub fn prev(&mut self) {
        if let Some(state) = &mut self.open {
            let n = state.images.len();
            state.current = (state.current + n - 1) % n;
        }
    }

    pub fn on_key(&mut self, key: Key, env: &mut dyn Environment) -> ModalOutcome {
        if !self.is_open() {
            return ModalOutcome::Ignored;
        }
        match key {
            Key::Escape => self.close_outcome(env),
            Key::ArrowLeft => {
                self.prev();
                ModalOutcome::Navigated
            }
            Key::ArrowRight => {
                self.next();
                ModalOutcome::Navigated
            }
            Key::Other => ModalOutcome::Ignored,
        }
    }

    pub fn on_click(&mut self, target: ClickTarget, env: &mut dyn Environment) -> ModalOutcome {
        if !self.is_open() {
            return ModalOutcome::Ignored;
        }
        match target {
            ClickTarget::Backdrop | ClickTarget::CloseButton => self.close_outcome(env),
            ClickTarget::Panel => ModalOutcome::Ignored,
            ClickTarget::PrevButton => {
                self.prev();
                ModalOutcome::Navigated
            }
            ClickTarget::NextButton => {
                self.next();
                ModalOutcome::Navigated
            }
        }
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.open.as_ref().map(|s| s.current)
    }

    pub fn current_id(&self) -> Option<u32> {
        self.open.as_ref().map(|s| s.images.id_at(s.current))
    }

    pub fn images(&self) -> Option<&ImageSet> {
        self.open.as_ref().map(|s| &s.images)
    }

    /// Presentation for the open viewer on the given layout.
    pub fn layout(&self, class: LayoutClass) -> Option<ModalLayout> {
        self.open
            .as_ref()
            .map(|s| ModalLayout::for_view(s.images.family(), s.images.len(), class))
    }

    fn close_outcome(&mut self, env: &mut dyn Environment) -> ModalOutcome {
        if self.close(env) {
            ModalOutcome::Closed
        } else {
            ModalOutcome::Ignored
        }
    }
}

// ============================================================================
// Presentation
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NavPlacement {
    /// Arrows vertically centred on the panel edges.
    Side,
    /// Arrows in a strip under the image.
    Bottom,
    /// Single image, no arrows.
    Hidden,
}

/// Sizing of the overlay panel and image, in CSS terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModalLayout {
    pub panel_width_pct: u32,
    pub panel_height_pct: u32,
    pub panel_max_width_px: Option<u32>,
    pub panel_max_height_px: u32,
    /// Share of the image area the picture box takes.
    pub image_box_pct: u32,
    /// Intrinsic size hint for the `<img>` element.
    pub image_width: u32,
    pub image_height: u32,
    pub nav: NavPlacement,
}

impl ModalLayout {
    pub fn for_view(family: ImageFamily, len: usize, class: LayoutClass) -> Self {
        let mobile = class.is_mobile();
        let nav = if len <= 1 {
            NavPlacement::Hidden
        } else if mobile {
            NavPlacement::Bottom
        } else {
            NavPlacement::Side
        };
        if mobile {
            return Self {
                panel_width_pct: 95,
                panel_height_pct: 70,
                panel_max_width_px: None,
                panel_max_height_px: 600,
                image_box_pct: 90,
                image_width: 900,
                image_height: 650,
                nav,
            };
        }
        let (image_box_pct, image_width, image_height) = match family {
            ImageFamily::Staff => (60, 600, 400),
            _ => (75, 800, 550),
        };
        Self {
            panel_width_pct: 80,
            panel_height_pct: 80,
            panel_max_width_px: Some(1000),
            panel_max_height_px: 800,
            image_box_pct,
            image_width,
            image_height,
            nav,
        }
    }
}
