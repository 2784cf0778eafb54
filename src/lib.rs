//! # PINZORO Site
//!
//! Static site generator for the PINZORO restaurant group's marketing site:
//! a home page with autoplay photo carousels, a paged shop list with QR codes,
//! and a modal image viewer, plus a company profile page.
//!
//! # Architecture: Headless Core, Thin Shells
//!
//! The interactive parts of the site are modelled as plain state machines in
//! [`ui`], independent of any browser. Everything they need from the outside
//! world (viewport width, timers, global key listeners, document scrolling)
//! goes through an injected [`ui::port::Environment`]:
//!
//! ```text
//! content.toml ─┐
//!               ├─→ ui::home::HomeScreen ─┬─→ RenderHost (build time) → generate → dist/
//! config.toml ──┘                         └─→ FakeHost (tests, manual clock)
//! ```
//!
//! The browser runtime shipped with the pages implements the same transitions
//! against the real DOM.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`ui`] | Headless interaction model: viewport classifier, carousel, pager, modal viewer, layout shell, home screen |
//! | [`content`] | `content.toml`: page copy and the shop table, validated |
//! | [`config`] | `config.toml` loading, stock defaults, merging, validation, theme CSS |
//! | [`assets`] | Image naming convention, image sets, `public/` copy and probing |
//! | [`generate`] | Renders the home and company pages with Maud |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Resources Are Handles
//!
//! Every listener and interval a component acquires comes back as a handle
//! that the component stores and hands back on teardown. Closing a modal twice,
//! unmounting a screen with overlays open, or resizing while a viewer is open
//! all funnel through the same release paths, so a host can count what is
//! still held and tests can assert that nothing leaks.
//!
//! ## Content as Data
//!
//! The site's copy, navigation and shop table live in `content.toml` rather
//! than in templates. Templates only decide structure; the same page renders
//! any shop list that passes validation.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/): malformed markup is
//! a compile error, interpolation is auto-escaped, and there is no template
//! directory to ship.

pub mod assets;
pub mod config;
pub mod content;
pub mod generate;
pub mod output;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_helpers;
