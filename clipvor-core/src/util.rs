//! Timing helpers.

// std has no clock on wasm32-unknown-unknown; `Instant::now` panics there.
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

/// RAII timer that logs elapsed time on drop.
///
/// On wasm32 only the name is logged.
///
/// ```ignore
/// let _t = Timed::debug("Voronoi diagram");
/// // logs "Voronoi diagram: 1.234ms" when _t is dropped
/// ```
pub(crate) struct Timed {
    name: &'static str,
    #[cfg(not(target_arch = "wasm32"))]
    start: Instant,
    level: log::Level,
}

impl Timed {
    /// Timer that logs at DEBUG level
    pub(crate) fn debug(name: &'static str) -> Self {
        log::trace!("{}...", name);
        Self {
            name,
            #[cfg(not(target_arch = "wasm32"))]
            start: Instant::now(),
            level: log::Level::Debug,
        }
    }
}

impl Drop for Timed {
    fn drop(&mut self) {
        #[cfg(not(target_arch = "wasm32"))]
        log::log!(self.level, "{}: {:.3?}", self.name, self.start.elapsed());
        #[cfg(target_arch = "wasm32")]
        log::log!(self.level, "{}: done", self.name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timed_scope() {
        let t = Timed::debug("scope");
        assert_eq!(t.name, "scope");
        assert_eq!(t.level, log::Level::Debug);
        drop(t);
    }
}
