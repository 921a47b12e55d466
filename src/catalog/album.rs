use super::SongId;

/// An artist's album, grouped from the library's songs by (artist, album).
///
/// Songs keep their library order inside the album.
#[derive(Clone, Debug)]
pub struct Album {
    pub name: String,
    pub artist: String,
    pub songs: Vec<SongId>,
    pub release_year: i32,
    pub description: Option<String>,
}

impl Album {
    pub fn track_count(&self) -> usize {
        self.songs.len()
    }
}
