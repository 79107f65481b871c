//! vitrine: a retro desktop shell engine.
//!
//! A headless core for a desktop-metaphor UI: the window stack with its
//! z-ordering and lifecycle, interactive drag/resize sessions, seeded
//! collision-avoiding icon placement, taskbar reflow, and the album manifest
//! that feeds the content windows. A host (web view, native shell, test
//! harness) renders the projected state and feeds pointer events back in.
//!
//! Everything is synchronous and single-threaded; the host's event loop
//! linearizes operations, so the engine needs no locks.

pub mod desktop;
pub mod geometry;
pub mod icons;
pub mod manifest;
pub mod taskbar;
pub mod utils;
pub mod viewport;
