mod album;
#[allow(clippy::module_inception)]
mod catalog;
mod ids;
mod load;
mod podcast;
mod song;

pub use album::Album;
pub use catalog::Catalog;
pub use ids::{AlbumId, AudioId, EpisodeId, PodcastId, SongId};
pub use load::{Library, PodcastEntry, UserEntry, UserKind};
pub use podcast::Podcast;
pub use song::{Episode, Song};
