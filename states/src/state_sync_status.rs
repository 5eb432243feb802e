/// Freshness of a compute's cached value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StateSyncStatus {
    /// Recorded but never computed.
    #[default]
    BeforeInit,
    /// A dependency changed since the last run.
    Dirty,
    /// Cached value reflects current dependencies.
    Clean,
}

impl StateSyncStatus {
    pub fn needs_run(self) -> bool {
        matches!(self, Self::BeforeInit | Self::Dirty)
    }
}
