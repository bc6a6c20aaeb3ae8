//! Aggregate load progress shared between the loader and its readers
//!
//! The loader is the only writer. Readers (the progress indicator, render gates)
//! take cheap snapshots each frame and never block on the load itself.

use std::sync::Arc;

use parking_lot::RwLock;

use super::AssetLoadError;

/// Partial byte progress never reports a request as fully settled
const PARTIAL_CAP: f32 = 0.99;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPhase {
    /// No bundle requested yet
    #[default]
    Idle,
    Loading,
    /// Every request settled successfully; terminal
    Ready,
    /// A request failed; terminal, percent frozen
    Failed,
}

/// Snapshot of the loader's progress
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoadProgress {
    pub phase: LoadPhase,
    pub active: bool,
    /// `floor(100 × settled fraction)`, non-decreasing while active
    pub percent: u8,
    pub error: Option<String>,
    /// Requests settled so far
    pub loaded: usize,
    pub total: usize,
    /// Url of the most recently settled request
    pub item: Option<String>,
}

#[derive(Debug, Default)]
struct Shared {
    generation: u64,
    progress: LoadProgress,
    fractions: Vec<f32>,
}

impl Shared {
    /// Settled requests count exactly; byte fractions only refine above that floor
    fn recompute_percent(&mut self) {
        let total = self.fractions.len().max(1);
        let settled = self.fractions.iter().filter(|&&f| f >= 1.0).count();
        let floor = 100 * settled / total;

        let sum: f32 = self.fractions.iter().sum();
        let mut estimate = ((sum / total as f32) * 100.0).floor().clamp(0.0, 100.0) as usize;
        if settled < total {
            estimate = estimate.min(99);
        }

        let percent = floor.max(estimate) as u8;
        self.progress.percent = self.progress.percent.max(percent);
    }
}

/// Read-only handle on the loader's progress
#[derive(Debug, Clone)]
pub struct ProgressView {
    shared: Arc<RwLock<Shared>>,
}

impl ProgressView {
    pub fn snapshot(&self) -> LoadProgress {
        self.shared.read().progress.clone()
    }

    pub fn is_active(&self) -> bool {
        self.shared.read().progress.active
    }

    pub fn phase(&self) -> LoadPhase {
        self.shared.read().progress.phase
    }
}

/// Writer side, owned by the loader
#[derive(Debug, Clone, Default)]
pub(crate) struct ProgressState {
    shared: Arc<RwLock<Shared>>,
}

impl ProgressState {
    pub(crate) fn view(&self) -> ProgressView {
        ProgressView {
            shared: self.shared.clone(),
        }
    }

    /// Starts a fresh cycle, superseding any bundle still reporting
    pub(crate) fn begin(&self, total: usize) -> u64 {
        let mut shared = self.shared.write();
        shared.generation += 1;
        shared.fractions = vec![0.0; total];
        shared.progress = LoadProgress {
            phase: LoadPhase::Loading,
            active: true,
            total,
            ..LoadProgress::default()
        };
        shared.generation
    }

    pub(crate) fn reporter(&self, generation: u64, index: usize) -> ByteProgress {
        ByteProgress {
            shared: self.shared.clone(),
            generation,
            index,
        }
    }

    pub(crate) fn settle(&self, generation: u64, index: usize, url: &str) {
        let mut shared = self.shared.write();
        if shared.generation != generation || shared.progress.phase != LoadPhase::Loading {
            return;
        }
        if let Some(fraction) = shared.fractions.get_mut(index) {
            *fraction = 1.0;
        }
        shared.progress.loaded += 1;
        shared.progress.item = Some(url.to_string());
        shared.recompute_percent();
    }

    pub(crate) fn complete(&self, generation: u64) {
        let mut shared = self.shared.write();
        if shared.generation != generation || shared.progress.phase != LoadPhase::Loading {
            return;
        }
        shared.progress.percent = 100;
        shared.progress.active = false;
        shared.progress.phase = LoadPhase::Ready;
    }

    pub(crate) fn fail(&self, generation: u64, error: &AssetLoadError) {
        let mut shared = self.shared.write();
        if shared.generation != generation || shared.progress.phase != LoadPhase::Loading {
            return;
        }
        shared.progress.active = false;
        shared.progress.phase = LoadPhase::Failed;
        shared.progress.error = Some(error.to_string());
    }
}

/// Byte-level progress reporter handed to a [`TextureSource`](super::TextureSource)
/// for one request
#[derive(Debug, Clone)]
pub struct ByteProgress {
    shared: Arc<RwLock<Shared>>,
    generation: u64,
    index: usize,
}

impl ByteProgress {
    /// Reports `loaded` of `total` bytes received; ignored when `total` is zero
    pub fn report(&self, loaded: u64, total: u64) {
        if total == 0 {
            return;
        }
        let mut shared = self.shared.write();
        if shared.generation != self.generation || shared.progress.phase != LoadPhase::Loading {
            return;
        }
        let partial = (loaded as f32 / total as f32).min(PARTIAL_CAP);
        if let Some(fraction) = shared.fractions.get_mut(self.index) {
            *fraction = fraction.max(partial);
        }
        shared.recompute_percent();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_until_begin() {
        let state = ProgressState::default();
        let view = state.view();
        assert_eq!(view.phase(), LoadPhase::Idle);
        assert!(!view.is_active());
    }

    #[test]
    fn test_settle_floors_percent() {
        let state = ProgressState::default();
        let view = state.view();
        let generation = state.begin(3);

        state.settle(generation, 0, "a");
        assert_eq!(view.snapshot().percent, 33);
        state.settle(generation, 1, "b");
        assert_eq!(view.snapshot().percent, 66);
        state.settle(generation, 2, "c");

        let snapshot = view.snapshot();
        assert_eq!(snapshot.percent, 100);
        assert!(snapshot.active);
        assert_eq!(snapshot.loaded, 3);
        assert_eq!(snapshot.item.as_deref(), Some("c"));

        state.complete(generation);
        let snapshot = view.snapshot();
        assert_eq!(snapshot.phase, LoadPhase::Ready);
        assert!(!snapshot.active);
    }

    #[test]
    fn test_settled_percent_matches_integer_floor() {
        let state = ProgressState::default();
        let view = state.view();
        for total in 1..=300usize {
            let generation = state.begin(total);
            for settled in 1..=total {
                state.settle(generation, settled - 1, "t");
                assert_eq!(
                    view.snapshot().percent as usize,
                    100 * settled / total,
                    "{} of {}",
                    settled,
                    total
                );
            }
        }
    }

    #[test]
    fn test_partial_bytes_refine_percent() {
        let state = ProgressState::default();
        let view = state.view();
        let generation = state.begin(2);
        let reporter = state.reporter(generation, 1);

        reporter.report(50, 100);
        assert_eq!(view.snapshot().percent, 25);
        // A late, smaller report never moves progress backwards
        reporter.report(10, 100);
        assert_eq!(view.snapshot().percent, 25);
        // Full bytes are not a settled request
        reporter.report(100, 100);
        assert_eq!(view.snapshot().percent, 49);
    }

    #[test]
    fn test_failure_freezes_percent() {
        let state = ProgressState::default();
        let view = state.view();
        let generation = state.begin(4);
        state.settle(generation, 0, "a");
        state.settle(generation, 1, "b");

        state.fail(
            generation,
            &AssetLoadError::Fetch {
                url: "c".into(),
                reason: "missing".into(),
            },
        );
        state.settle(generation, 3, "d");
        state.complete(generation);

        let snapshot = view.snapshot();
        assert_eq!(snapshot.phase, LoadPhase::Failed);
        assert_eq!(snapshot.percent, 50);
        assert!(!snapshot.active);
        assert!(snapshot.error.unwrap().contains("missing"));
    }

    #[test]
    fn test_stale_generation_is_ignored() {
        let state = ProgressState::default();
        let view = state.view();
        let stale = state.begin(2);
        let current = state.begin(2);

        state.settle(stale, 0, "old");
        state.complete(stale);
        assert_eq!(view.snapshot().percent, 0);
        assert_eq!(view.phase(), LoadPhase::Loading);

        state.settle(current, 0, "new");
        assert_eq!(view.snapshot().percent, 50);
    }
}
