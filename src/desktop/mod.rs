//! Desktop entry files.
//!
//! Template directories describe templates with `.desktop` files: key/value
//! groups in the freedesktop.org desktop-entry format. Only the
//! `[Desktop Entry]` group is consulted.

pub mod entry;

pub use entry::{current_locales, DesktopEntry, DESKTOP_GROUP, DESKTOP_SUFFIX};
