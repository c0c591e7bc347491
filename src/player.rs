use log::debug;

use crate::episode::Episode;
use crate::listing::PlaybackSelection;

/// Owns the playback queue and transport state.
///
/// Selections are handed over explicitly through [`Player::play_list`];
/// nothing reads shared state behind the player's back.
#[derive(Debug, Clone, Default)]
pub struct Player {
    queue: Vec<Episode>,
    current_index: usize,
    is_playing: bool,
    is_looping: bool,
}

impl Player {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the queue with a single episode and start playing it
    pub fn play(&mut self, episode: Episode) {
        debug!("playing single episode {}", episode.id);
        self.queue = vec![episode];
        self.current_index = 0;
        self.is_playing = true;
    }

    /// Replace the queue with a selection and start at its start index
    pub fn play_list(&mut self, selection: PlaybackSelection) {
        debug!(
            "playing queue of {} episodes from index {}",
            selection.queue.len(),
            selection.start_index
        );
        self.queue = selection.queue;
        self.current_index = selection.start_index;
        self.is_playing = !self.queue.is_empty();
    }

    pub fn queue(&self) -> &[Episode] {
        &self.queue
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The episode under the play head, if the queue is not empty
    pub fn current(&self) -> Option<&Episode> {
        self.queue.get(self.current_index)
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn is_looping(&self) -> bool {
        self.is_looping
    }

    pub fn toggle_play(&mut self) {
        self.set_playing(!self.is_playing);
    }

    /// Sync the playing flag with the audio element; ignored with no episode loaded
    pub fn set_playing(&mut self, playing: bool) {
        self.is_playing = playing && self.current().is_some();
    }

    pub fn toggle_loop(&mut self) {
        self.is_looping = !self.is_looping;
    }

    pub fn has_next(&self) -> bool {
        self.current_index + 1 < self.queue.len()
    }

    pub fn has_previous(&self) -> bool {
        self.current_index > 0 && !self.queue.is_empty()
    }

    /// Advance to the next episode. At the end of the queue this wraps
    /// around when looping and stops otherwise.
    pub fn play_next(&mut self) {
        if self.has_next() {
            self.current_index += 1;
        } else if self.is_looping && !self.queue.is_empty() {
            self.current_index = 0;
        } else {
            self.is_playing = false;
        }
    }

    pub fn play_previous(&mut self) {
        if self.has_previous() {
            self.current_index -= 1;
        }
    }

    /// Drop the queue and reset the play head
    pub fn clear(&mut self) {
        self.queue.clear();
        self.current_index = 0;
        self.is_playing = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::tests::make_episode;
    use crate::listing::{EpisodeListing, LATEST_EPISODE_COUNT, Section};

    fn listing(count: usize) -> EpisodeListing {
        let episodes = (0..count).map(|i| make_episode(&format!("ep-{i}"))).collect();
        EpisodeListing::split(episodes, LATEST_EPISODE_COUNT)
    }

    #[test]
    fn new_player_is_idle() {
        let player = Player::new();
        assert!(player.current().is_none());
        assert!(!player.is_playing());
        assert!(!player.has_next());
        assert!(!player.has_previous());
    }

    #[test]
    fn play_list_starts_at_selected_episode() {
        let listing = listing(5);
        let mut player = Player::new();

        player.play_list(listing.select(Section::All, 2));

        assert_eq!(player.current_index(), 4);
        assert_eq!(player.current().unwrap().id, "ep-4");
        assert_eq!(player.queue().len(), 5);
        assert!(player.is_playing());
    }

    #[test]
    fn play_replaces_queue_with_one_episode() {
        let mut player = Player::new();
        player.play_list(listing(5).select(Section::Latest, 1));

        player.play(make_episode("solo"));

        assert_eq!(player.queue().len(), 1);
        assert_eq!(player.current().unwrap().id, "solo");
        assert!(!player.has_next());
    }

    #[test]
    fn next_and_previous_walk_the_queue() {
        let mut player = Player::new();
        player.play_list(listing(3).select(Section::Latest, 0));

        player.play_next();
        assert_eq!(player.current().unwrap().id, "ep-1");
        player.play_next();
        assert_eq!(player.current().unwrap().id, "ep-2");
        assert!(!player.has_next());

        player.play_previous();
        assert_eq!(player.current().unwrap().id, "ep-1");
        player.play_previous();
        player.play_previous();
        assert_eq!(player.current_index(), 0);
    }

    #[test]
    fn end_of_queue_stops_without_loop() {
        let mut player = Player::new();
        player.play_list(listing(3).select(Section::All, 0));

        player.play_next();

        assert_eq!(player.current_index(), 2);
        assert!(!player.is_playing());
    }

    #[test]
    fn end_of_queue_wraps_when_looping() {
        let mut player = Player::new();
        player.play_list(listing(3).select(Section::All, 0));
        player.toggle_loop();

        player.play_next();

        assert_eq!(player.current_index(), 0);
        assert!(player.is_playing());
    }

    #[test]
    fn toggle_play_needs_an_episode() {
        let mut player = Player::new();
        player.toggle_play();
        assert!(!player.is_playing());

        player.play(make_episode("a"));
        player.toggle_play();
        assert!(!player.is_playing());
        player.toggle_play();
        assert!(player.is_playing());
    }

    #[test]
    fn clear_resets_everything() {
        let mut player = Player::new();
        player.play_list(listing(4).select(Section::All, 1));

        player.clear();

        assert!(player.queue().is_empty());
        assert!(player.current().is_none());
        assert!(!player.is_playing());
    }
}
