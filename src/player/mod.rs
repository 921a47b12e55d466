mod engine;
mod source;

pub use engine::{PlaybackEngine, PlaybackEvent, PlayerError, PlayerStatus};
pub use source::{Bookmark, PlaybackSource, QueueEntry, QueueItem, SourceKind};

/// Repeat behavior of the player, cycled by the `repeat` command.
///
/// The cycle depends on the loaded source kind: a single song goes
/// `NoRepeat -> RepeatOnce -> RepeatInfinite -> NoRepeat`, a collection goes
/// `NoRepeat -> RepeatAll -> RepeatCurrent -> NoRepeat`. `RepeatAll` and
/// `RepeatInfinite` both wrap a finite collection; they differ only in label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepeatMode {
    #[default]
    NoRepeat,
    RepeatOnce,
    RepeatAll,
    RepeatInfinite,
    RepeatCurrent,
}

impl RepeatMode {
    /// Display label used in the player status snapshot.
    pub fn label(&self) -> &'static str {
        match self {
            RepeatMode::NoRepeat => "No Repeat",
            RepeatMode::RepeatOnce => "Repeat Once",
            RepeatMode::RepeatAll => "Repeat All",
            RepeatMode::RepeatInfinite => "Repeat Infinite",
            RepeatMode::RepeatCurrent => "Repeat Current Song",
        }
    }

    /// Lowercase form used in the `repeat` command confirmation message.
    pub fn message_label(&self) -> &'static str {
        match self {
            RepeatMode::NoRepeat => "no repeat",
            RepeatMode::RepeatOnce => "repeat once",
            RepeatMode::RepeatAll => "repeat all",
            RepeatMode::RepeatInfinite => "repeat infinite",
            RepeatMode::RepeatCurrent => "repeat current song",
        }
    }
}
