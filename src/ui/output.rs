//! Output verbosity.

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    #[default]
    Normal,
    /// Only results, no status lines.
    Quiet,
}

impl OutputMode {
    /// Check if this mode shows success and warning lines.
    pub fn shows_status(&self) -> bool {
        matches!(self, Self::Normal)
    }
}
