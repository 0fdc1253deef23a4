//! Host platform facts used by the updater and the UI.

pub mod platform;

pub use platform::{is_ci, Platform};
