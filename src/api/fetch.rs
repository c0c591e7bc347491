// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::fmt;
use std::time::Duration;

use log::{debug, warn};
use url::Url;

use crate::error::FetchError;
use crate::http::HttpClient;
use crate::progress::{BuildEvent, SharedProgressReporter};

use super::record::RawEpisodeRecord;

const EPISODES_RESOURCE: &str = "episodes";

/// Sort direction understood by the episodes API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Asc => f.write_str("asc"),
            SortOrder::Desc => f.write_str("desc"),
        }
    }
}

/// Query parameters sent with the episodes request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeQuery {
    /// Maximum number of episodes the API should return
    pub limit: usize,
    /// Field the API sorts by
    pub sort: String,
    pub order: SortOrder,
}

impl Default for EpisodeQuery {
    fn default() -> Self {
        Self {
            limit: 12,
            sort: "published_at".to_string(),
            order: SortOrder::Desc,
        }
    }
}

/// Bounded retry with exponential backoff around the episodes request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first one
    pub attempts: u32,
    /// Delay before the second attempt; doubled for every further one
    pub initial_delay: Duration,
}

impl RetryPolicy {
    /// A policy that tries exactly once
    pub fn none() -> Self {
        Self {
            attempts: 1,
            initial_delay: Duration::ZERO,
        }
    }

    /// Delay to wait after the given failed attempt (1-based)
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        self.initial_delay.saturating_mul(1 << exponent)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            initial_delay: Duration::from_millis(500),
        }
    }
}

fn should_retry_status(status: u16) -> bool {
    status == 408 || status == 429 || (500..=599).contains(&status)
}

/// Build the full episodes URL for an API base URL and query
pub fn episodes_url(base: &str, query: &EpisodeQuery) -> Result<Url, FetchError> {
    let mut base = Url::parse(base)?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }

    let mut url = base.join(EPISODES_RESOURCE)?;
    url.query_pairs_mut()
        .append_pair("_limit", &query.limit.to_string())
        .append_pair("_sort", &query.sort)
        .append_pair("_order", &query.order.to_string());

    Ok(url)
}

/// Fetch raw episode records from the API, in the order the API returns them
pub async fn fetch_episodes<C: HttpClient>(
    client: &C,
    base: &str,
    query: &EpisodeQuery,
    retry: &RetryPolicy,
    reporter: &SharedProgressReporter,
) -> Result<Vec<RawEpisodeRecord>, FetchError> {
    let url = episodes_url(base, query)?;
    let url = url.as_str();
    let max_attempts = retry.attempts.max(1);

    reporter.report(BuildEvent::FetchingEpisodes {
        url: url.to_string(),
    });

    let mut attempt = 1;
    let body = loop {
        debug!("GET {url} (attempt {attempt}/{max_attempts})");

        let failure = match client.get(url).await {
            Ok(response) if response.is_success() => break response.body,
            Ok(response) if !should_retry_status(response.status) || attempt >= max_attempts => {
                return Err(FetchError::HttpStatus {
                    url: url.to_string(),
                    status: response.status,
                    attempts: attempt,
                });
            }
            Ok(response) => format!("HTTP status {}", response.status),
            Err(e) if attempt >= max_attempts => {
                return Err(FetchError::RequestFailed {
                    url: url.to_string(),
                    attempts: attempt,
                    source: e,
                });
            }
            Err(e) => format!("transport error: {e}"),
        };

        let delay = retry.delay_after(attempt);
        warn!("episodes request failed ({failure}), retrying in {delay:?}");
        reporter.report(BuildEvent::FetchRetrying {
            attempt,
            max_attempts,
            delay,
            error: failure,
        });
        tokio::time::sleep(delay).await;
        attempt += 1;
    };

    let records: Vec<RawEpisodeRecord> =
        serde_json::from_slice(&body).map_err(|e| FetchError::DecodeFailed {
            url: url.to_string(),
            source: e,
        })?;

    debug!("decoded {} episode records", records.len());
    reporter.report(BuildEvent::EpisodesFetched {
        count: records.len(),
    });

    Ok(records)
}
