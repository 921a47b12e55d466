//! User-owned song collections.
//!
//! Playlists live in one arena owned by the simulation; listeners refer to
//! them by [`PlaylistId`]. Playlists are never deleted during a run.

use crate::catalog::SongId;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PlaylistId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Private,
}

impl Visibility {
    pub fn label(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
        }
    }
}

#[derive(Debug)]
pub struct Playlist {
    pub name: String,
    pub owner: String,
    pub songs: Vec<SongId>,
    pub visibility: Visibility,
    pub followers: u32,
}

impl Playlist {
    pub fn new(name: impl Into<String>, owner: impl Into<String>) -> Self {
        Playlist {
            name: name.into(),
            owner: owner.into(),
            songs: Vec::new(),
            visibility: Visibility::Public,
            followers: 0,
        }
    }

    /// Adds the song if absent, removes it if present. Returns `true` when
    /// the song was added.
    pub fn toggle_song(&mut self, song: SongId) -> bool {
        match self.songs.iter().position(|&s| s == song) {
            Some(index) => {
                self.songs.remove(index);
                false
            }
            None => {
                self.songs.push(song);
                true
            }
        }
    }

    pub fn switch_visibility(&mut self) -> Visibility {
        self.visibility = match self.visibility {
            Visibility::Public => Visibility::Private,
            Visibility::Private => Visibility::Public,
        };
        self.visibility
    }

    /// A playlist is reachable in search by its owner always, by everyone
    /// else only while public.
    pub fn visible_to(&self, username: &str) -> bool {
        self.visibility == Visibility::Public || self.owner == username
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_song_adds_then_removes() {
        let mut playlist = Playlist::new("mix", "ana");
        assert!(playlist.toggle_song(SongId(3)));
        assert_eq!(playlist.songs, vec![SongId(3)]);
        assert!(!playlist.toggle_song(SongId(3)));
        assert!(playlist.songs.is_empty());
    }

    #[test]
    fn visibility_gates_other_users_only() {
        let mut playlist = Playlist::new("mix", "ana");
        assert!(playlist.visible_to("bob"));
        assert_eq!(playlist.switch_visibility(), Visibility::Private);
        assert!(!playlist.visible_to("bob"));
        assert!(playlist.visible_to("ana"));
    }
}
