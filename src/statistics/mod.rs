//! The `wrapped` statistics, computed on demand from the listen ledger.
//!
//! All top lists are limited to five entries, ordered by count descending
//! with ties broken by name ascending.

use crate::catalog::{AudioId, Catalog};
use crate::ledger::ListenLedger;
use serde_json::{json, Map, Value};
use std::collections::{HashMap, HashSet};

fn sorted_counts(counts: HashMap<String, u64>, limit: usize) -> Vec<(String, u64)> {
    let mut entries: Vec<(String, u64)> = counts.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries.truncate(limit);
    entries
}

fn top_map(counts: HashMap<String, u64>, limit: usize) -> Value {
    let mut map = Map::new();
    for (name, count) in sorted_counts(counts, limit) {
        map.insert(name, Value::from(count));
    }
    Value::Object(map)
}

fn top_names(counts: HashMap<String, u64>, limit: usize) -> Value {
    let names: Vec<Value> = sorted_counts(counts, limit)
        .into_iter()
        .map(|(name, _)| Value::from(name))
        .collect();
    Value::Array(names)
}

/// What one listener heard, grouped five ways. `None` when they have not
/// listened to anything yet.
pub fn listener_wrapped(
    username: &str,
    catalog: &Catalog,
    ledger: &ListenLedger,
    limit: usize,
) -> Option<Value> {
    let mut artists: HashMap<String, u64> = HashMap::new();
    let mut genres: HashMap<String, u64> = HashMap::new();
    let mut songs: HashMap<String, u64> = HashMap::new();
    let mut albums: HashMap<String, u64> = HashMap::new();
    let mut episodes: HashMap<String, u64> = HashMap::new();

    for (id, counts) in ledger.iter() {
        let plays = counts.user_plays(username);
        if plays == 0 {
            continue;
        }
        match id {
            AudioId::Song(id) => {
                let song = catalog.song(id);
                *artists.entry(song.artist.clone()).or_insert(0) += plays;
                *genres.entry(song.genre.clone()).or_insert(0) += plays;
                *songs.entry(song.name.clone()).or_insert(0) += plays;
                *albums.entry(song.album.clone()).or_insert(0) += plays;
            }
            AudioId::Episode(id) => {
                *episodes.entry(catalog.episode(id).name.clone()).or_insert(0) += plays;
            }
        }
    }

    if artists.is_empty() && episodes.is_empty() {
        return None;
    }
    Some(json!({
        "topArtists": top_map(artists, limit),
        "topGenres": top_map(genres, limit),
        "topSongs": top_map(songs, limit),
        "topAlbums": top_map(albums, limit),
        "topEpisodes": top_map(episodes, limit),
    }))
}

/// How one artist was heard: their top albums and songs by play count, the
/// five listeners that played them the most, and the distinct listener count.
pub fn artist_wrapped(
    artist: &str,
    catalog: &Catalog,
    ledger: &ListenLedger,
    limit: usize,
) -> Option<Value> {
    let mut albums: HashMap<String, u64> = HashMap::new();
    let mut songs: HashMap<String, u64> = HashMap::new();
    let mut fans: HashMap<String, u64> = HashMap::new();
    let mut listeners: HashSet<String> = HashSet::new();

    for song_id in catalog.songs_of_artist(artist) {
        let Some(counts) = ledger.counts(AudioId::Song(song_id)) else {
            continue;
        };
        let song = catalog.song(song_id);
        *albums.entry(song.album.clone()).or_insert(0) += counts.total();
        *songs.entry(song.name.clone()).or_insert(0) += counts.total();
        for (user, plays) in counts.per_user() {
            *fans.entry(user.to_owned()).or_insert(0) += plays;
        }
        listeners.extend(counts.listeners().map(str::to_owned));
    }

    if songs.is_empty() {
        return None;
    }
    Some(json!({
        "topAlbums": top_map(albums, limit),
        "topSongs": top_map(songs, limit),
        "topFans": top_names(fans, limit),
        "listeners": listeners.len(),
    }))
}

/// How one host was heard: their top episodes and distinct listener count.
pub fn host_wrapped(
    host: &str,
    catalog: &Catalog,
    ledger: &ListenLedger,
    limit: usize,
) -> Option<Value> {
    let mut episodes: HashMap<String, u64> = HashMap::new();
    let mut listeners: HashSet<String> = HashSet::new();

    for podcast_id in catalog.podcasts_of_host(host) {
        for &episode_id in &catalog.podcast(podcast_id).episodes {
            let Some(counts) = ledger.counts(AudioId::Episode(episode_id)) else {
                continue;
            };
            *episodes
                .entry(catalog.episode(episode_id).name.clone())
                .or_insert(0) += counts.total();
            listeners.extend(counts.listeners().map(str::to_owned));
        }
    }

    if episodes.is_empty() {
        return None;
    }
    Some(json!({
        "topEpisodes": top_map(episodes, limit),
        "listeners": listeners.len(),
    }))
}
