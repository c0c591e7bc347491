pub mod api;
pub mod episode;
pub mod error;
pub mod http;
pub mod listing;
pub mod page;
pub mod player;
pub mod progress;

// Re-export main types for convenience
pub use api::{
    EpisodeQuery, RawDuration, RawEpisodeFile, RawEpisodeRecord, RetryPolicy, fetch_episodes,
};
pub use episode::{DateFormatter, Episode, format_duration, normalize, normalize_all};
pub use error::{BuildError, FetchError, NormalizeError};
pub use http::{HttpClient, HttpResponse, ReqwestClient};
pub use listing::{EpisodeListing, PlaybackSelection, Section, select_queue};
pub use page::{PageOptions, REVALIDATE_INTERVAL, StaticPage, build_home_page};
pub use player::Player;
pub use progress::{BuildEvent, NoopReporter, ProgressReporter, SharedProgressReporter};
