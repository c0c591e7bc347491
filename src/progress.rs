use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Events emitted while building the home page, for progress reporting
#[derive(Debug, Clone)]
pub enum BuildEvent {
    /// Episodes are being requested from the API
    FetchingEpisodes { url: String },

    /// A fetch attempt failed and will be retried after `delay`
    FetchRetrying {
        /// The attempt that just failed (1-based)
        attempt: u32,
        max_attempts: u32,
        delay: Duration,
        error: String,
    },

    /// The API answered with a decodable episode list
    EpisodesFetched { count: usize },

    /// Episodes were normalized and split into the two page sections
    PageBuilt {
        latest_count: usize,
        all_count: usize,
    },

    /// Page props were written to disk
    PropsWritten { path: PathBuf },
}

/// Trait for reporting progress events during a page build.
///
/// Implementations can use this to display spinners, log messages,
/// or collect statistics.
pub trait ProgressReporter: Send + Sync {
    /// Report a progress event
    fn report(&self, event: BuildEvent);
}

/// A shared reference to a progress reporter
pub type SharedProgressReporter = Arc<dyn ProgressReporter>;

/// A no-op progress reporter that silently ignores all events.
/// Useful for tests or quiet mode.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn report(&self, _event: BuildEvent) {}
}

impl NoopReporter {
    /// Create a new NoopReporter wrapped in an Arc
    pub fn shared() -> SharedProgressReporter {
        Arc::new(Self)
    }
}
