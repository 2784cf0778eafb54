//! Responsive breakpoint detection.
//!
//! Two breakpoints split the width axis into three layout classes:
//!
//! ```text
//!   0 ─── Phone ─── 640 ─── Tablet ─── 768 ─── Desktop ───▶
//!         compact            mobile
//! ```
//!
//! The shop pager only cares about *compact* (phone), the modal and the staff
//! carousel only about *mobile* (phone or tablet).

use super::port::{Environment, EventKind, ListenerId};
use serde::{Deserialize, Serialize};

/// Breakpoint widths in CSS pixels. A width strictly below a breakpoint falls
/// into the narrower class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Breakpoints {
    pub compact_below: u32,
    pub mobile_below: u32,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            compact_below: 640,
            mobile_below: 768,
        }
    }
}

impl Breakpoints {
    pub fn classify(&self, width: u32) -> LayoutClass {
        if width < self.compact_below {
            LayoutClass::Phone
        } else if width < self.mobile_below {
            LayoutClass::Tablet
        } else {
            LayoutClass::Desktop
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutClass {
    Phone,
    Tablet,
    #[default]
    Desktop,
}

impl LayoutClass {
    pub fn is_compact(self) -> bool {
        self == LayoutClass::Phone
    }

    pub fn is_mobile(self) -> bool {
        self != LayoutClass::Desktop
    }
}

/// Tracks the layout class of the current viewport while mounted.
///
/// Before [`mount`](Self::mount) the class is [`LayoutClass::Desktop`]; the
/// first real measurement happens on mount.
#[derive(Debug, Clone)]
pub struct ViewportClassifier {
    breakpoints: Breakpoints,
    class: LayoutClass,
    listener: Option<ListenerId>,
}

impl ViewportClassifier {
    pub fn new(breakpoints: Breakpoints) -> Self {
        Self {
            breakpoints,
            class: LayoutClass::default(),
            listener: None,
        }
    }

    /// Attach the resize listener and take the initial measurement.
    /// Mounting twice keeps the first listener.
    pub fn mount(&mut self, env: &mut dyn Environment) {
        if self.listener.is_none() {
            self.listener = Some(env.add_listener(EventKind::Resize));
        }
        self.class = self.breakpoints.classify(env.viewport_width());
    }

    pub fn unmount(&mut self, env: &mut dyn Environment) {
        if let Some(id) = self.listener.take() {
            env.remove_listener(id);
        }
    }

    /// Re-classify after a resize. Returns `true` if the class changed.
    pub fn on_resize(&mut self, width: u32) -> bool {
        let class = self.breakpoints.classify(width);
        let changed = class != self.class;
        self.class = class;
        changed
    }

    pub fn class(&self) -> LayoutClass {
        self.class
    }

    pub fn is_mounted(&self) -> bool {
        self.listener.is_some()
    }
}
