//! Headless interaction model for the site's widgets.
//!
//! Everything here is plain state plus transitions; nothing renders and
//! nothing reads browser globals. Components take an
//! [`Environment`](port::Environment) on every call that acquires or releases
//! a host resource, which makes them testable with a fake clock and lets the
//! generator compute first-paint state at build time.
//!
//! | Module | Role |
//! |--------|------|
//! | [`port`] | Environment port, host events, the build-time [`RenderHost`](port::RenderHost) |
//! | [`viewport`] | Breakpoint classifier |
//! | [`carousel`] | Autoplay carousel |
//! | [`pager`] | Paged collection view |
//! | [`modal`] | Modal image viewer and its presentation geometry |
//! | [`layout`] | Navigation links and mobile menu |
//! | [`home`] | The home screen, composing all of the above |

pub mod carousel;
pub mod home;
pub mod layout;
pub mod modal;
pub mod pager;
pub mod port;
pub mod viewport;
