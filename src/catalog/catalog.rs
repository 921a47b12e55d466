use super::ids::{AlbumId, AudioId, EpisodeId, PodcastId, SongId};
use super::load::Library;
use super::{Album, Episode, Podcast, Song};

/// The immutable audio catalog for one run.
///
/// Songs and episodes live in flat arenas; albums and podcasts reference them
/// by index. The catalog is built once from the library file and only read
/// afterwards — all mutable playback state lives in the ledgers.
#[derive(Debug, Default)]
pub struct Catalog {
    songs: Vec<Song>,
    episodes: Vec<Episode>,
    albums: Vec<Album>,
    podcasts: Vec<Podcast>,
}

impl Catalog {
    pub fn from_library(library: &Library) -> Catalog {
        let songs = library.songs.clone();

        // Group songs into albums by (artist, album), keeping library order.
        let mut albums: Vec<Album> = Vec::new();
        for (position, song) in songs.iter().enumerate() {
            let id = SongId(position);
            match albums
                .iter_mut()
                .find(|a| a.name == song.album && a.artist == song.artist)
            {
                Some(album) => album.songs.push(id),
                None => albums.push(Album {
                    name: song.album.clone(),
                    artist: song.artist.clone(),
                    songs: vec![id],
                    release_year: song.release_year,
                    description: None,
                }),
            }
        }

        let mut episodes = Vec::new();
        let mut podcasts = Vec::new();
        for entry in &library.podcasts {
            let mut episode_ids = Vec::with_capacity(entry.episodes.len());
            for episode in &entry.episodes {
                episode_ids.push(EpisodeId(episodes.len()));
                episodes.push(episode.clone());
            }
            podcasts.push(Podcast {
                name: entry.name.clone(),
                host: entry.owner.clone(),
                episodes: episode_ids,
            });
        }

        Catalog {
            songs,
            episodes,
            albums,
            podcasts,
        }
    }

    pub fn song(&self, id: SongId) -> &Song {
        &self.songs[id.0]
    }

    pub fn episode(&self, id: EpisodeId) -> &Episode {
        &self.episodes[id.0]
    }

    pub fn album(&self, id: AlbumId) -> &Album {
        &self.albums[id.0]
    }

    pub fn podcast(&self, id: PodcastId) -> &Podcast {
        &self.podcasts[id.0]
    }

    pub fn songs(&self) -> impl Iterator<Item = (SongId, &Song)> {
        self.songs.iter().enumerate().map(|(i, s)| (SongId(i), s))
    }

    pub fn albums(&self) -> impl Iterator<Item = (AlbumId, &Album)> {
        self.albums.iter().enumerate().map(|(i, a)| (AlbumId(i), a))
    }

    pub fn podcasts(&self) -> impl Iterator<Item = (PodcastId, &Podcast)> {
        self.podcasts
            .iter()
            .enumerate()
            .map(|(i, p)| (PodcastId(i), p))
    }

    pub fn audio_name(&self, id: AudioId) -> &str {
        match id {
            AudioId::Song(id) => &self.song(id).name,
            AudioId::Episode(id) => &self.episode(id).name,
        }
    }

    pub fn audio_duration(&self, id: AudioId) -> u32 {
        match id {
            AudioId::Song(id) => self.song(id).duration,
            AudioId::Episode(id) => self.episode(id).duration,
        }
    }

    pub fn artist_of(&self, id: SongId) -> &str {
        &self.song(id).artist
    }

    pub fn songs_by_genre(&self, genre: &str) -> Vec<SongId> {
        self.songs()
            .filter(|(_, s)| s.genre.eq_ignore_ascii_case(genre))
            .map(|(id, _)| id)
            .collect()
    }

    pub fn songs_of_artist(&self, artist: &str) -> Vec<SongId> {
        self.songs()
            .filter(|(_, s)| s.artist == artist)
            .map(|(id, _)| id)
            .collect()
    }

    pub fn podcast_by_name(&self, name: &str) -> Option<PodcastId> {
        self.podcasts().find(|(_, p)| p.name == name).map(|(id, _)| id)
    }

    pub fn podcasts_of_host(&self, host: &str) -> Vec<PodcastId> {
        self.podcasts()
            .filter(|(_, p)| p.host == host)
            .map(|(id, _)| id)
            .collect()
    }

    /// Every distinct song artist, in order of first appearance.
    pub fn artist_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for song in &self.songs {
            if !names.contains(&song.artist.as_str()) {
                names.push(&song.artist);
            }
        }
        names
    }

    /// Every distinct podcast host, in order of first appearance.
    pub fn host_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for podcast in &self.podcasts {
            if !names.contains(&podcast.host.as_str()) {
                names.push(&podcast.host);
            }
        }
        names
    }
}
