use crate::foundation::core::TimeMs;

/// An independently fetched input of a visualization.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// Tabular CSV data.
    Table,
    /// Boundary GeoJSON.
    Geometry,
}

/// Why loading ended without data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadFailure {
    Fetch { source: SourceKind, reason: String },
    TimedOut { after_ms: u64 },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadStatus {
    Loading,
    Ready,
    Failed(LoadFailure),
}

impl LoadStatus {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Tracks the required sources of one visualization until all resolve, one fails, or the
/// deadline passes.
///
/// The first terminal status sticks: a late resolution never revives a failed load and a
/// late failure never breaks a ready one.
#[derive(Clone, Debug)]
pub struct LoadTracker {
    pending: Vec<SourceKind>,
    started: TimeMs,
    timeout_ms: u64,
    status: LoadStatus,
}

impl LoadTracker {
    pub fn new(required: &[SourceKind], started: TimeMs, timeout_ms: u64) -> Self {
        let mut pending = required.to_vec();
        pending.dedup();
        let status = if pending.is_empty() {
            LoadStatus::Ready
        } else {
            LoadStatus::Loading
        };
        Self {
            pending,
            started,
            timeout_ms,
            status,
        }
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    /// Record a resolved source. Returns `true` when this completes the load.
    pub fn resolve(&mut self, source: SourceKind) -> bool {
        if !self.status.is_loading() {
            return false;
        }
        self.pending.retain(|s| *s != source);
        if self.pending.is_empty() {
            self.status = LoadStatus::Ready;
            return true;
        }
        false
    }

    pub fn fail(&mut self, source: SourceKind, reason: impl Into<String>) {
        if !self.status.is_loading() {
            return;
        }
        let reason = reason.into();
        tracing::warn!(?source, %reason, "source failed to load");
        self.status = LoadStatus::Failed(LoadFailure::Fetch { source, reason });
    }

    /// Instant at which [`poll`](Self::poll) turns a pending load into a timeout; `None` once
    /// the load has settled.
    pub fn deadline(&self) -> Option<TimeMs> {
        self.status
            .is_loading()
            .then(|| self.started.after(self.timeout_ms))
    }

    /// Apply the deadline at `now`.
    pub fn poll(&mut self, now: TimeMs) -> &LoadStatus {
        if self.status.is_loading() && now.since(self.started) >= self.timeout_ms {
            tracing::warn!(
                timeout_ms = self.timeout_ms,
                pending = ?self.pending,
                "load timed out"
            );
            self.status = LoadStatus::Failed(LoadFailure::TimedOut {
                after_ms: self.timeout_ms,
            });
        }
        &self.status
    }
}
