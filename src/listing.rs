// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use serde::Serialize;

use crate::episode::Episode;

/// Number of episodes highlighted in the "latest" section of the home page
pub const LATEST_EPISODE_COUNT: usize = 2;

/// The two visual lists an episode can be selected from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Latest,
    All,
}

/// A playback queue together with the position to start at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackSelection {
    pub queue: Vec<Episode>,
    pub start_index: usize,
}

impl PlaybackSelection {
    /// The episode playback starts with
    pub fn selected(&self) -> &Episode {
        &self.queue[self.start_index]
    }
}

/// Build the unified queue for an episode picked from one of the two lists.
///
/// `queue` is always `latest` followed by `all`, so an index local to the
/// `all` list is shifted by the length of `latest`.
///
/// # Panics
///
/// Panics if `local_index` is out of range for the chosen section. Callers
/// only pass indices obtained while iterating that same list.
pub fn select_queue(
    latest: &[Episode],
    all: &[Episode],
    section: Section,
    local_index: usize,
) -> PlaybackSelection {
    let (section_len, offset) = match section {
        Section::Latest => (latest.len(), 0),
        Section::All => (all.len(), latest.len()),
    };
    assert!(
        local_index < section_len,
        "episode index {local_index} out of range for {section:?} section of length {section_len}"
    );

    let mut queue = Vec::with_capacity(latest.len() + all.len());
    queue.extend_from_slice(latest);
    queue.extend_from_slice(all);

    PlaybackSelection {
        queue,
        start_index: local_index + offset,
    }
}

/// Episodes split into the home page's "latest" and "all" sections
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeListing {
    pub latest_episodes: Vec<Episode>,
    pub all_episodes: Vec<Episode>,
}

impl EpisodeListing {
    /// Split an ordered episode list after the first `latest_count` entries
    pub fn split(mut episodes: Vec<Episode>, latest_count: usize) -> Self {
        let all_episodes = episodes.split_off(latest_count.min(episodes.len()));

        Self {
            latest_episodes: episodes,
            all_episodes,
        }
    }

    /// All episodes in their original order
    pub fn episodes(&self) -> Vec<Episode> {
        self.latest_episodes
            .iter()
            .chain(&self.all_episodes)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.latest_episodes.len() + self.all_episodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Build the playback queue for an episode picked from one section
    pub fn select(&self, section: Section, local_index: usize) -> PlaybackSelection {
        select_queue(
            &self.latest_episodes,
            &self.all_episodes,
            section,
            local_index,
        )
    }
}
