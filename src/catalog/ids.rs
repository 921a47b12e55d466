//! Arena indices into the catalog.
//!
//! The catalog is loaded once and never shrinks during a run, so everything
//! downstream (playback queues, ledgers, search results) refers to audio
//! items by index instead of holding references into the catalog.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SongId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EpisodeId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct AlbumId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PodcastId(pub usize);

/// A playable audio item: a song or a podcast episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum AudioId {
    Song(SongId),
    Episode(EpisodeId),
}

impl From<SongId> for AudioId {
    fn from(id: SongId) -> Self {
        AudioId::Song(id)
    }
}

impl From<EpisodeId> for AudioId {
    fn from(id: EpisodeId) -> Self {
        AudioId::Episode(id)
    }
}
