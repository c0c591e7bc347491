// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::fmt::Write as _;
use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, Utc};
use log::info;
use serde::Serialize;

use crate::api::{EpisodeQuery, RetryPolicy, fetch_episodes};
use crate::episode::{DateFormatter, normalize_all};
use crate::error::BuildError;
use crate::http::HttpClient;
use crate::listing::{EpisodeListing, LATEST_EPISODE_COUNT};
use crate::progress::{BuildEvent, SharedProgressReporter};

/// How long a generated home page stays fresh before it is rebuilt
pub const REVALIDATE_INTERVAL: Duration = Duration::from_secs(60 * 60 * 8);

const LATEST_HEADING: &str = "Últimos lançamentos";
const ALL_HEADING: &str = "Todos os episódios";
const TABLE_HEADERS: [&str; 4] = ["Podcast", "Integrantes", "Data", "Duração"];

/// Options for building the home page
#[derive(Debug, Clone)]
pub struct PageOptions {
    /// Query sent to the episodes API
    pub query: EpisodeQuery,
    /// Number of episodes shown in the "latest" section
    pub latest_count: usize,
    pub formatter: DateFormatter,
    pub retry: RetryPolicy,
    /// Interval after which the page should be regenerated
    pub revalidate: Duration,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            query: EpisodeQuery::default(),
            latest_count: LATEST_EPISODE_COUNT,
            formatter: DateFormatter::default(),
            retry: RetryPolicy::default(),
            revalidate: REVALIDATE_INTERVAL,
        }
    }
}

/// A generated home page: its props plus when they were produced
#[derive(Debug, Clone)]
pub struct StaticPage {
    pub props: EpisodeListing,
    pub generated_at: DateTime<Utc>,
    pub revalidate: Duration,
}

/// On-disk shape of a generated page's props
#[derive(Serialize)]
struct StaticPropsFile<'a> {
    props: &'a EpisodeListing,
    /// Seconds until the props should be regenerated
    revalidate: u64,
    generated_at: String,
}

impl StaticPage {
    /// Whether the revalidation interval has passed at `now`
    pub fn is_stale(&self, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.generated_at)
            .to_std()
            .is_ok_and(|elapsed| elapsed >= self.revalidate)
    }

    /// When the page should be regenerated
    pub fn next_revalidation(&self) -> Option<DateTime<Utc>> {
        chrono::Duration::from_std(self.revalidate)
            .ok()
            .and_then(|interval| self.generated_at.checked_add_signed(interval))
    }

    /// Serialize the page props as pretty-printed JSON
    pub fn props_json(&self) -> Result<String, BuildError> {
        let file = StaticPropsFile {
            props: &self.props,
            revalidate: self.revalidate.as_secs(),
            generated_at: self.generated_at.to_rfc3339(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    /// Write the page props to a JSON file
    pub fn write_props(
        &self,
        path: &Path,
        reporter: &SharedProgressReporter,
    ) -> Result<(), BuildError> {
        let json = self.props_json()?;
        std::fs::write(path, json).map_err(|e| BuildError::WriteFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

        reporter.report(BuildEvent::PropsWritten {
            path: path.to_path_buf(),
        });
        Ok(())
    }

    /// Render the page's two sections as plain text
    pub fn render_text(&self) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "{LATEST_HEADING}");
        for episode in &self.props.latest_episodes {
            let _ = writeln!(out, "  {}", episode.title);
            let _ = writeln!(out, "    {}", episode.members);
            let _ = writeln!(
                out,
                "    {} · {}",
                episode.published_at, episode.duration_as_string
            );
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "{ALL_HEADING}");

        let rows: Vec<[&str; 4]> = self
            .props
            .all_episodes
            .iter()
            .map(|e| {
                [
                    e.title.as_str(),
                    e.members.as_str(),
                    e.published_at.as_str(),
                    e.duration_as_string.as_str(),
                ]
            })
            .collect();

        let mut widths = TABLE_HEADERS.map(|h| h.chars().count());
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        write_row(&mut out, &TABLE_HEADERS, &widths);
        for row in &rows {
            write_row(&mut out, row, &widths);
        }

        out
    }
}

fn write_row(out: &mut String, cells: &[&str; 4], widths: &[usize; 4]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    let _ = writeln!(out, "  {}", line.trim_end());
}

/// Build the home page from the episodes API
///
/// This is the page's build step. It:
/// 1. Fetches the newest episodes from the API
/// 2. Normalizes every record into a display-ready episode
/// 3. Splits them into the "latest" and "all" sections
pub async fn build_home_page<C: HttpClient>(
    client: &C,
    api_base: &str,
    options: &PageOptions,
    reporter: &SharedProgressReporter,
) -> Result<StaticPage, BuildError> {
    let records = fetch_episodes(client, api_base, &options.query, &options.retry, reporter).await?;
    let episodes = normalize_all(records, &options.formatter)?;
    let props = EpisodeListing::split(episodes, options.latest_count);

    info!(
        "built home page with {} latest and {} other episodes",
        props.latest_episodes.len(),
        props.all_episodes.len()
    );
    reporter.report(BuildEvent::PageBuilt {
        latest_count: props.latest_episodes.len(),
        all_count: props.all_episodes.len(),
    });

    Ok(StaticPage {
        props,
        generated_at: Utc::now(),
        revalidate: options.revalidate,
    })
}
