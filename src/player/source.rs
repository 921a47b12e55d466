//! The loaded playable unit: queue, cursor and shuffle state.

use super::RepeatMode;
use crate::catalog::AudioId;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Song,
    Playlist,
    Album,
    Podcast,
}

impl SourceKind {
    /// Collections are the only shuffleable sources.
    pub fn is_collection(&self) -> bool {
        matches!(self, SourceKind::Playlist | SourceKind::Album)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueItem {
    Audio(AudioId),
    /// Synthetic zero-duration boundary; triggers free-tier revenue
    /// distribution when crossed and never counts as a listen.
    AdBreak,
}

#[derive(Debug, Clone, Copy)]
pub struct QueueEntry {
    pub item: AudioId,
    pub duration: u32,
}

/// Resume position of a podcast, persisted across loads by the engine.
#[derive(Debug, Clone, Copy)]
pub struct Bookmark {
    pub index: usize,
    pub remaining: u32,
}

#[derive(Debug)]
pub struct PlaybackSource {
    kind: SourceKind,
    /// Name of the loaded unit (song, collection or podcast name).
    name: String,
    queue: Vec<QueueEntry>,
    index: usize,
    /// Seconds left in the current entry.
    remaining: u32,
    /// Permutation over queue indices; identity until a seed regenerates it.
    shuffle_order: Vec<usize>,
    /// An ad break armed to play right after the current entry.
    pending_ad: bool,
    /// The zero-duration ad boundary is the current item.
    on_ad: bool,
}

impl PlaybackSource {
    /// Creates a source positioned at the first entry. `queue` must be
    /// non-empty; loading an empty collection is rejected upstream.
    pub fn new(kind: SourceKind, name: impl Into<String>, queue: Vec<QueueEntry>) -> Self {
        debug_assert!(!queue.is_empty());
        let remaining = queue[0].duration;
        let shuffle_order = (0..queue.len()).collect();
        PlaybackSource {
            kind,
            name: name.into(),
            queue,
            index: 0,
            remaining,
            shuffle_order,
            pending_ad: false,
            on_ad: false,
        }
    }

    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entry_count(&self) -> usize {
        self.queue.len()
    }

    pub fn current_item(&self) -> QueueItem {
        if self.on_ad {
            QueueItem::AdBreak
        } else {
            QueueItem::Audio(self.queue[self.index].item)
        }
    }

    /// The current audio item, unless the ad boundary is playing.
    pub fn current_audio(&self) -> Option<AudioId> {
        match self.current_item() {
            QueueItem::Audio(id) => Some(id),
            QueueItem::AdBreak => None,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    fn current_duration(&self) -> u32 {
        if self.on_ad {
            0
        } else {
            self.queue[self.index].duration
        }
    }

    pub fn bookmark(&self) -> Bookmark {
        Bookmark {
            index: self.index,
            remaining: self.remaining,
        }
    }

    /// Repositions the cursor from a saved bookmark.
    pub fn restore(&mut self, bookmark: Bookmark) {
        if bookmark.index < self.queue.len() {
            self.index = bookmark.index;
            self.remaining = bookmark.remaining.min(self.queue[self.index].duration);
        }
    }

    /// Regenerates the shuffle permutation. The order is a pure function of
    /// the seed and the queue length, so two sources with the same queue and
    /// seed walk their entries in the same order.
    pub fn generate_shuffle_order(&mut self, seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        self.shuffle_order = (0..self.queue.len()).collect();
        self.shuffle_order.shuffle(&mut rng);
    }

    pub fn shuffle_order(&self) -> &[usize] {
        &self.shuffle_order
    }

    /// Arms an ad break to play immediately after the current entry.
    pub fn queue_ad(&mut self) {
        self.pending_ad = true;
    }

    /// Consumes playback time inside the current entry. Callers only consume
    /// strictly less than the remaining time; boundary crossings go through
    /// `advance`.
    pub fn consume(&mut self, seconds: u32) {
        self.remaining = self.remaining.saturating_sub(seconds);
    }

    /// Podcast seek: positive moves toward the end of the episode, negative
    /// rewinds. Clamped to the episode bounds.
    pub fn seek(&mut self, delta: i64) {
        let duration = i64::from(self.current_duration());
        let remaining = (i64::from(self.remaining) - delta).clamp(0, duration);
        self.remaining = remaining as u32;
    }

    /// Moves to the successor entry according to the repeat mode and shuffle
    /// flag. Returns `true` when the source is exhausted (the caller tears it
    /// down); otherwise the cursor now sits at the start of the next entry.
    pub fn advance(&mut self, repeat: RepeatMode, shuffle_enabled: bool) -> bool {
        if self.on_ad {
            // Leaving the ad boundary resumes the regular successor walk
            // from the entry the ad interrupted.
            self.on_ad = false;
        } else if repeat == RepeatMode::RepeatCurrent {
            self.remaining = self.queue[self.index].duration;
            return false;
        } else if self.pending_ad {
            self.pending_ad = false;
            self.on_ad = true;
            self.remaining = 0;
            return false;
        }

        let wraps = matches!(repeat, RepeatMode::RepeatAll | RepeatMode::RepeatInfinite);
        let next = if shuffle_enabled && self.kind.is_collection() {
            let position = self
                .shuffle_order
                .iter()
                .position(|&i| i == self.index)
                .unwrap_or(0);
            if position + 1 < self.shuffle_order.len() {
                Some(self.shuffle_order[position + 1])
            } else if wraps {
                Some(self.shuffle_order[0])
            } else {
                None
            }
        } else if self.index + 1 < self.queue.len() {
            Some(self.index + 1)
        } else if wraps {
            Some(0)
        } else {
            None
        };

        match next {
            Some(index) => {
                self.index = index;
                self.remaining = self.queue[index].duration;
                false
            }
            None => true,
        }
    }

    /// Predecessor operation: restarts the current entry if it has progressed,
    /// otherwise steps back one entry. Clamps at the first entry and never
    /// exhausts the source.
    pub fn retreat(&mut self, shuffle_enabled: bool) {
        if self.on_ad {
            self.on_ad = false;
            self.remaining = self.queue[self.index].duration;
            return;
        }
        if self.remaining < self.queue[self.index].duration {
            self.remaining = self.queue[self.index].duration;
            return;
        }
        let previous = if shuffle_enabled && self.kind.is_collection() {
            let position = self
                .shuffle_order
                .iter()
                .position(|&i| i == self.index)
                .unwrap_or(0);
            self.shuffle_order[position.saturating_sub(1)]
        } else {
            self.index.saturating_sub(1)
        };
        self.index = previous;
        self.remaining = self.queue[previous].duration;
    }
}
