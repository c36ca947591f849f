//! Stable identifiers for tab containers.

use std::time::{SystemTime, UNIX_EPOCH};

/// Resolves the identifier every button and panel id is derived from.
///
/// Declared ids win. Containers without one get `tabs-{millis}-{index}`,
/// where the timestamp is taken once per page load and `index` is the
/// container's discovery position, so synthesized ids never collide with each
/// other within a load.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ContainerIds {
    stamp: u128,
}

impl ContainerIds {
    pub(crate) fn new() -> Self {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_millis());
        Self::with_stamp(stamp)
    }

    pub(crate) fn with_stamp(stamp: u128) -> Self {
        Self { stamp }
    }

    /// Identifier for the container discovered at `index`.
    ///
    /// An empty declared id counts as absent.
    pub(crate) fn resolve(&self, declared: Option<&str>, index: usize) -> String {
        match declared.filter(|id| !id.is_empty()) {
            Some(id) => id.to_owned(),
            None => {
                let id = format!("tabs-{}-{index}", self.stamp);
                tracing::debug!(container = %id, "Synthesized tabs container id");
                id
            }
        }
    }
}
