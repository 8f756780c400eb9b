use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

/// Shared staleness marker for the file listing.
///
/// Cloning yields a handle onto the same counter. Bumping it marks every
/// cached listing stale; a cache entry is fresh only while its recorded
/// generation matches the current one. In-flight fetches that started before
/// a bump store a stale generation and are superseded by the next query.
#[derive(Clone, Debug, Default)]
pub struct InvalidationSignal {
    generation: Arc<AtomicU64>,
}

impl InvalidationSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notify(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    pub fn current(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_same_counter() {
        let signal = InvalidationSignal::new();
        let handle = signal.clone();
        assert_eq!(signal.current(), 0);
        handle.notify();
        assert_eq!(signal.current(), 1);
        signal.notify();
        assert_eq!(handle.current(), 2);
    }
}
