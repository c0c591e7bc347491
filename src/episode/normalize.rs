// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use serde::Serialize;

use crate::api::RawEpisodeRecord;
use crate::error::NormalizeError;

use super::date::DateFormatter;
use super::duration::{coerce_duration, format_duration};

/// A display-ready podcast episode
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    pub id: String,
    pub title: String,
    pub members: String,
    /// Short localized publish date, e.g. `12 mar 21`
    pub published_at: String,
    pub thumbnail: String,
    pub description: String,
    /// Audio file URL
    pub url: String,
    /// Length in whole seconds
    pub duration: u64,
    /// `duration` rendered as `HH:MM:SS`
    pub duration_as_string: String,
}

/// Turn one raw API record into a display-ready episode
pub fn normalize(
    raw: RawEpisodeRecord,
    formatter: &DateFormatter,
) -> Result<Episode, NormalizeError> {
    let published_at =
        formatter
            .format(&raw.published_at)
            .map_err(|e| NormalizeError::InvalidDate {
                id: raw.id.clone(),
                date_str: raw.published_at.clone(),
                source: e,
            })?;

    let duration = coerce_duration(&raw.file.duration);

    Ok(Episode {
        id: raw.id,
        title: raw.title,
        members: raw.members,
        published_at,
        thumbnail: raw.thumbnail,
        description: raw.description,
        url: raw.file.url,
        duration,
        duration_as_string: format_duration(duration),
    })
}

/// Normalize a batch of records, keeping their order.
///
/// The first record with an unparseable date fails the whole batch.
pub fn normalize_all(
    records: Vec<RawEpisodeRecord>,
    formatter: &DateFormatter,
) -> Result<Vec<Episode>, NormalizeError> {
    records
        .into_iter()
        .map(|raw| normalize(raw, formatter))
        .collect()
}
