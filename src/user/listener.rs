use crate::catalog::SongId;
use crate::notifications::Notification;
use crate::player::PlaybackEngine;
use crate::playlists::PlaylistId;
use crate::search::SearchBar;

/// A normal (listening) user and all of their per-run state.
///
/// The monetization buckets collect the songs heard since the last
/// distribution: premium plays pay out when the subscription is cancelled
/// (or at end of run), free plays pay out when an ad break is crossed.
#[derive(Debug)]
pub struct Listener {
    pub username: String,
    pub age: u32,
    pub city: String,
    pub online: bool,
    pub premium: bool,
    pub engine: PlaybackEngine,
    pub search: SearchBar,
    pub liked_songs: Vec<SongId>,
    pub playlists: Vec<PlaylistId>,
    pub followed: Vec<PlaylistId>,
    pub pending_premium: Vec<SongId>,
    pub pending_free: Vec<SongId>,
    /// Price armed by the most recent `adBreak`, paid out on crossing.
    pub armed_ad_price: f64,
    pub purchased_merch: Vec<String>,
    pub inbox: Vec<Notification>,
}

impl Listener {
    pub fn new(username: impl Into<String>, age: u32, city: impl Into<String>, skip_secs: u32) -> Self {
        Listener {
            username: username.into(),
            age,
            city: city.into(),
            online: true,
            premium: false,
            engine: PlaybackEngine::new(skip_secs),
            search: SearchBar::default(),
            liked_songs: Vec::new(),
            playlists: Vec::new(),
            followed: Vec::new(),
            pending_premium: Vec::new(),
            pending_free: Vec::new(),
            armed_ad_price: 0.0,
            purchased_merch: Vec::new(),
            inbox: Vec::new(),
        }
    }

    /// Likes the song if not yet liked, unlikes otherwise. Returns `true`
    /// when the song is now liked.
    pub fn toggle_like(&mut self, song: SongId) -> bool {
        match self.liked_songs.iter().position(|&s| s == song) {
            Some(index) => {
                self.liked_songs.remove(index);
                false
            }
            None => {
                self.liked_songs.push(song);
                true
            }
        }
    }

    pub fn follows(&self, playlist: PlaylistId) -> bool {
        self.followed.contains(&playlist)
    }

    pub fn toggle_follow(&mut self, playlist: PlaylistId) -> bool {
        match self.followed.iter().position(|&p| p == playlist) {
            Some(index) => {
                self.followed.remove(index);
                false
            }
            None => {
                self.followed.push(playlist);
                true
            }
        }
    }

    /// Empties the notification inbox, returning its contents in arrival
    /// order.
    pub fn drain_inbox(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.inbox)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_toggles_and_preserves_order() {
        let mut listener = Listener::new("ana", 25, "Paris", 90);
        assert!(listener.toggle_like(SongId(2)));
        assert!(listener.toggle_like(SongId(5)));
        assert!(!listener.toggle_like(SongId(2)));
        assert_eq!(listener.liked_songs, vec![SongId(5)]);
    }

    #[test]
    fn drain_inbox_empties_in_arrival_order() {
        let mut listener = Listener::new("ana", 25, "Paris", 90);
        listener.inbox.push(Notification::new_merchandise("A"));
        listener.inbox.push(Notification::new_merchandise("B"));
        let drained = listener.drain_inbox();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].description, "New Merchandise from A.");
        assert!(listener.inbox.is_empty());
    }
}
