//! The playback engine: one per listener.
//!
//! The engine is a pure state machine over the loaded source. Mutations that
//! matter to the rest of the system (listen attribution, ad-break revenue)
//! are reported as ordered [`PlaybackEvent`]s and folded into the ledgers by
//! the command runner, so the engine never reaches into shared state.

use super::source::{Bookmark, PlaybackSource, QueueItem, SourceKind};
use super::RepeatMode;
use crate::catalog::AudioId;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackEvent {
    /// A new audio item became current and counts as one listen.
    TrackStarted(AudioId),
    /// The ad boundary became current; the pending free bucket pays out.
    AdBreakCrossed,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlayerError {
    #[error("nothing is loaded")]
    NothingLoaded,
    #[error("the loaded source is not a playlist or an album")]
    NotACollection,
    #[error("the loaded source is not a podcast")]
    NotAPodcast,
}

/// Snapshot of the player for the `status` command. The item is `None` when
/// nothing is loaded.
#[derive(Debug, Clone, Copy)]
pub struct PlayerStatus {
    pub item: Option<QueueItem>,
    pub remained_time: u32,
    pub repeat: RepeatMode,
    pub shuffle: bool,
    pub paused: bool,
}

#[derive(Debug)]
pub struct PlaybackEngine {
    repeat: RepeatMode,
    shuffle: bool,
    paused: bool,
    source: Option<PlaybackSource>,
    /// Podcast resume positions, keyed by podcast name. One bookmark per
    /// podcast survives across loads.
    bookmarks: HashMap<String, Bookmark>,
    /// Seconds moved by the podcast forward/backward commands.
    seek_seconds: u32,
}

impl PlaybackEngine {
    pub fn new(seek_seconds: u32) -> Self {
        PlaybackEngine {
            repeat: RepeatMode::NoRepeat,
            shuffle: false,
            paused: true,
            source: None,
            bookmarks: HashMap::new(),
            seek_seconds,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.source.is_some()
    }

    pub fn source_kind(&self) -> Option<SourceKind> {
        self.source.as_ref().map(PlaybackSource::kind)
    }

    pub fn source_name(&self) -> Option<&str> {
        self.source.as_ref().map(PlaybackSource::name)
    }

    pub fn current_audio(&self) -> Option<AudioId> {
        self.source.as_ref().and_then(PlaybackSource::current_audio)
    }

    pub fn repeat_mode(&self) -> RepeatMode {
        self.repeat
    }

    pub fn shuffle_enabled(&self) -> bool {
        self.shuffle
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Replaces the source and starts playing from its first (or, for a
    /// bookmarked podcast, resumed) entry. The entry that becomes current
    /// counts as a listen, so it is reported as `TrackStarted`.
    pub fn load(&mut self, mut source: PlaybackSource, events: &mut Vec<PlaybackEvent>) {
        self.save_podcast_bookmark();
        if source.kind() == SourceKind::Podcast {
            if let Some(bookmark) = self.bookmarks.get(source.name()) {
                source.restore(*bookmark);
            }
        }
        self.repeat = RepeatMode::NoRepeat;
        self.shuffle = false;
        self.paused = false;
        if let Some(id) = source.current_audio() {
            events.push(PlaybackEvent::TrackStarted(id));
        }
        self.source = Some(source);
    }

    /// Tears the source down: a playing podcast keeps its resume position.
    /// Leaves the engine in the empty-source state (paused, no elapsed time).
    pub fn stop(&mut self) {
        self.save_podcast_bookmark();
        self.source = None;
        self.repeat = RepeatMode::NoRepeat;
        self.shuffle = false;
        self.paused = true;
    }

    fn save_podcast_bookmark(&mut self) {
        if let Some(source) = &self.source {
            if source.kind() == SourceKind::Podcast {
                self.bookmarks
                    .insert(source.name().to_owned(), source.bookmark());
            }
        }
    }

    /// Flips pause; returns the new paused state.
    pub fn play_pause(&mut self) -> Result<bool, PlayerError> {
        if self.source.is_none() {
            return Err(PlayerError::NothingLoaded);
        }
        self.paused = !self.paused;
        Ok(self.paused)
    }

    /// Steps the repeat cycle; the first transition depends on the source
    /// kind. Returns the mode that is now active.
    pub fn cycle_repeat(&mut self) -> Result<RepeatMode, PlayerError> {
        let kind = self.source_kind().ok_or(PlayerError::NothingLoaded)?;
        self.repeat = match (self.repeat, kind) {
            (RepeatMode::NoRepeat, SourceKind::Song) => RepeatMode::RepeatOnce,
            (RepeatMode::NoRepeat, _) => RepeatMode::RepeatAll,
            (RepeatMode::RepeatOnce, _) => RepeatMode::RepeatInfinite,
            (RepeatMode::RepeatAll, _) => RepeatMode::RepeatCurrent,
            (RepeatMode::RepeatInfinite, _) | (RepeatMode::RepeatCurrent, _) => {
                RepeatMode::NoRepeat
            }
        };
        Ok(self.repeat)
    }

    /// Toggles shuffle on a playlist or album source. A provided seed
    /// regenerates the permutation before the toggle. Returns the new state.
    pub fn toggle_shuffle(&mut self, seed: Option<u64>) -> Result<bool, PlayerError> {
        let source = self.source.as_mut().ok_or(PlayerError::NothingLoaded)?;
        if !source.kind().is_collection() {
            return Err(PlayerError::NotACollection);
        }
        if let Some(seed) = seed {
            source.generate_shuffle_order(seed);
        }
        self.shuffle = !self.shuffle;
        Ok(self.shuffle)
    }

    pub fn skip_forward(&mut self) -> Result<(), PlayerError> {
        self.podcast_seek(i64::from(self.seek_seconds))
    }

    pub fn skip_backward(&mut self) -> Result<(), PlayerError> {
        self.podcast_seek(-i64::from(self.seek_seconds))
    }

    fn podcast_seek(&mut self, delta: i64) -> Result<(), PlayerError> {
        let source = self.source.as_mut().ok_or(PlayerError::NothingLoaded)?;
        if source.kind() != SourceKind::Podcast {
            return Err(PlayerError::NotAPodcast);
        }
        source.seek(delta);
        self.paused = false;
        Ok(())
    }

    /// Arms an ad break right after the current entry.
    pub fn insert_ad_break(&mut self) -> Result<(), PlayerError> {
        let source = self.source.as_mut().ok_or(PlayerError::NothingLoaded)?;
        source.queue_ad();
        Ok(())
    }

    /// Manual skip to the next entry. Resumes playback on success; an
    /// exhausted source is torn down and the engine ends up paused and empty.
    pub fn next(&mut self) -> Result<Vec<PlaybackEvent>, PlayerError> {
        if self.source.is_none() {
            return Err(PlayerError::NothingLoaded);
        }
        let mut events = Vec::new();
        self.advance_once(&mut events);
        if self.source.is_some() {
            self.paused = false;
        }
        Ok(events)
    }

    /// Manual step to the previous entry (or restart of the current one).
    /// Never exhausts; resumes playback.
    pub fn prev(&mut self) -> Result<(), PlayerError> {
        let shuffle = self.shuffle;
        let source = self.source.as_mut().ok_or(PlayerError::NothingLoaded)?;
        source.retreat(shuffle);
        self.paused = false;
        Ok(())
    }

    /// Advances simulated time. Crosses as many entry boundaries as the
    /// elapsed time covers, reporting each crossing in order; whatever time
    /// is left becomes progress inside the final current entry.
    pub fn tick(&mut self, elapsed: u32) -> Vec<PlaybackEvent> {
        let mut events = Vec::new();
        if self.paused || self.source.is_none() || elapsed == 0 {
            return events;
        }
        let mut left = u64::from(elapsed);
        loop {
            let Some(source) = self.source.as_mut() else {
                break;
            };
            let remaining = u64::from(source.remaining());
            if left < remaining {
                source.consume(left as u32);
                break;
            }
            left -= remaining;
            self.advance_once(&mut events);
            if self.paused {
                break;
            }
        }
        events
    }

    fn advance_once(&mut self, events: &mut Vec<PlaybackEvent>) {
        let Some(source) = self.source.as_mut() else {
            return;
        };
        let exhausted = source.advance(self.repeat, self.shuffle);
        if self.repeat == RepeatMode::RepeatOnce {
            self.repeat = RepeatMode::NoRepeat;
        }
        if exhausted {
            self.stop();
            return;
        }
        match self.source.as_ref().map(PlaybackSource::current_item) {
            Some(QueueItem::AdBreak) => events.push(PlaybackEvent::AdBreakCrossed),
            Some(QueueItem::Audio(id)) => events.push(PlaybackEvent::TrackStarted(id)),
            None => {}
        }
    }

    pub fn status(&self) -> PlayerStatus {
        match &self.source {
            Some(source) => PlayerStatus {
                item: Some(source.current_item()),
                remained_time: source.remaining(),
                repeat: self.repeat,
                shuffle: self.shuffle,
                paused: self.paused,
            },
            None => PlayerStatus {
                item: None,
                remained_time: 0,
                repeat: RepeatMode::NoRepeat,
                shuffle: false,
                paused: true,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SongId;
    use crate::player::QueueEntry;

    fn entries(durations: &[u32]) -> Vec<QueueEntry> {
        durations
            .iter()
            .enumerate()
            .map(|(i, &duration)| QueueEntry {
                item: AudioId::Song(SongId(i)),
                duration,
            })
            .collect()
    }

    fn load_playlist(engine: &mut PlaybackEngine, durations: &[u32]) -> Vec<PlaybackEvent> {
        let mut events = Vec::new();
        engine.load(
            PlaybackSource::new(SourceKind::Playlist, "p", entries(durations)),
            &mut events,
        );
        events
    }

    #[test]
    fn load_reports_the_first_entry_as_a_listen() {
        let mut engine = PlaybackEngine::new(90);
        let events = load_playlist(&mut engine, &[100, 100]);
        assert_eq!(
            events,
            vec![PlaybackEvent::TrackStarted(AudioId::Song(SongId(0)))]
        );
        assert!(!engine.is_paused());
    }

    #[test]
    fn tick_crosses_multiple_boundaries_and_keeps_the_rest() {
        let mut engine = PlaybackEngine::new(90);
        load_playlist(&mut engine, &[200, 200, 200]);
        let events = engine.tick(450);
        assert_eq!(
            events,
            vec![
                PlaybackEvent::TrackStarted(AudioId::Song(SongId(1))),
                PlaybackEvent::TrackStarted(AudioId::Song(SongId(2))),
            ]
        );
        assert!(!engine.is_paused());
        assert_eq!(engine.current_audio(), Some(AudioId::Song(SongId(2))));
        // 50 seconds into the third track.
        assert_eq!(engine.status().remained_time, 150);
    }

    #[test]
    fn exhausting_the_source_pauses_and_clears_the_engine() {
        let mut engine = PlaybackEngine::new(90);
        load_playlist(&mut engine, &[100]);
        let events = engine.tick(100);
        assert!(events.is_empty());
        assert!(engine.is_paused());
        assert!(!engine.is_loaded());
        assert_eq!(engine.status().remained_time, 0);
    }

    #[test]
    fn repeat_once_exhausts_a_single_song_and_reverts_to_no_repeat() {
        let mut engine = PlaybackEngine::new(90);
        let mut events = Vec::new();
        engine.load(
            PlaybackSource::new(SourceKind::Song, "s", entries(&[100])),
            &mut events,
        );
        assert_eq!(engine.cycle_repeat(), Ok(RepeatMode::RepeatOnce));
        engine.tick(100);
        assert!(engine.is_paused());
        assert!(!engine.is_loaded());
        assert_eq!(engine.repeat_mode(), RepeatMode::NoRepeat);
    }

    #[test]
    fn repeat_cycle_depends_on_source_kind() {
        let mut engine = PlaybackEngine::new(90);
        let mut events = Vec::new();
        engine.load(
            PlaybackSource::new(SourceKind::Song, "s", entries(&[100])),
            &mut events,
        );
        assert_eq!(engine.cycle_repeat(), Ok(RepeatMode::RepeatOnce));
        assert_eq!(engine.cycle_repeat(), Ok(RepeatMode::RepeatInfinite));
        assert_eq!(engine.cycle_repeat(), Ok(RepeatMode::NoRepeat));

        load_playlist(&mut engine, &[100, 100]);
        assert_eq!(engine.cycle_repeat(), Ok(RepeatMode::RepeatAll));
        assert_eq!(engine.cycle_repeat(), Ok(RepeatMode::RepeatCurrent));
        assert_eq!(engine.cycle_repeat(), Ok(RepeatMode::NoRepeat));
    }

    #[test]
    fn repeat_infinite_loops_a_playlist_through_many_boundaries() {
        let mut engine = PlaybackEngine::new(90);
        load_playlist(&mut engine, &[100, 100]);
        engine.cycle_repeat().unwrap(); // repeat all
        engine.cycle_repeat().unwrap(); // repeat current
        engine.cycle_repeat().unwrap(); // no repeat
        engine.cycle_repeat().unwrap(); // repeat all again
        let events = engine.tick(500);
        assert_eq!(events.len(), 5);
        assert!(engine.is_loaded());
        assert!(!engine.is_paused());
    }

    #[test]
    fn ad_crossing_is_reported_before_the_following_track() {
        let mut engine = PlaybackEngine::new(90);
        load_playlist(&mut engine, &[100, 100]);
        engine.insert_ad_break().unwrap();
        let events = engine.tick(100);
        assert_eq!(
            events,
            vec![
                PlaybackEvent::AdBreakCrossed,
                PlaybackEvent::TrackStarted(AudioId::Song(SongId(1))),
            ]
        );
        assert_eq!(engine.current_audio(), Some(AudioId::Song(SongId(1))));
    }

    #[test]
    fn paused_engine_ignores_time() {
        let mut engine = PlaybackEngine::new(90);
        load_playlist(&mut engine, &[100]);
        engine.play_pause().unwrap();
        assert!(engine.tick(1000).is_empty());
        assert_eq!(engine.status().remained_time, 100);
    }

    #[test]
    fn podcast_bookmark_survives_source_replacement() {
        let mut engine = PlaybackEngine::new(90);
        let mut events = Vec::new();
        let podcast = |name: &str| {
            PlaybackSource::new(SourceKind::Podcast, name.to_owned(), entries(&[300, 300]))
        };
        engine.load(podcast("Talks"), &mut events);
        engine.tick(420); // 120s into the second episode
        engine.load(
            PlaybackSource::new(SourceKind::Song, "s", entries(&[100])),
            &mut events,
        );
        engine.load(podcast("Talks"), &mut events);
        assert_eq!(engine.current_audio(), Some(AudioId::Song(SongId(1))));
        assert_eq!(engine.status().remained_time, 180);
    }

    #[test]
    fn operations_without_a_source_report_nothing_loaded() {
        let mut engine = PlaybackEngine::new(90);
        assert_eq!(engine.play_pause(), Err(PlayerError::NothingLoaded));
        assert_eq!(engine.cycle_repeat(), Err(PlayerError::NothingLoaded));
        assert_eq!(engine.toggle_shuffle(Some(1)), Err(PlayerError::NothingLoaded));
        assert_eq!(engine.skip_forward(), Err(PlayerError::NothingLoaded));
        assert!(engine.next().is_err());
        assert!(engine.prev().is_err());
    }

    #[test]
    fn shuffle_requires_a_collection() {
        let mut engine = PlaybackEngine::new(90);
        let mut events = Vec::new();
        engine.load(
            PlaybackSource::new(SourceKind::Song, "s", entries(&[100])),
            &mut events,
        );
        assert_eq!(engine.toggle_shuffle(Some(1)), Err(PlayerError::NotACollection));
        load_playlist(&mut engine, &[100, 100]);
        assert_eq!(engine.toggle_shuffle(Some(1)), Ok(true));
        assert_eq!(engine.toggle_shuffle(None), Ok(false));
    }

    #[test]
    fn seek_gates_on_podcast_sources() {
        let mut engine = PlaybackEngine::new(90);
        load_playlist(&mut engine, &[100, 100]);
        assert_eq!(engine.skip_forward(), Err(PlayerError::NotAPodcast));

        let mut events = Vec::new();
        engine.load(
            PlaybackSource::new(SourceKind::Podcast, "p", entries(&[500])),
            &mut events,
        );
        engine.skip_forward().unwrap();
        assert_eq!(engine.status().remained_time, 410);
        engine.skip_backward().unwrap();
        assert_eq!(engine.status().remained_time, 500);
    }
}
