mod fetch;
mod record;

pub use fetch::{EpisodeQuery, RetryPolicy, SortOrder, episodes_url, fetch_episodes};
pub use record::{RawDuration, RawEpisodeFile, RawEpisodeRecord};

#[cfg(test)]
pub(crate) use fetch::tests::{Scripted, ScriptedClient};
