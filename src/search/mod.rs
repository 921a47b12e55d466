//! The per-listener search bar.
//!
//! A search fills the bar with at most five results; `select` picks one by
//! 1-based position and `load` consumes the selection. Searching again (or
//! loading) discards the previous state.

use crate::catalog::{AlbumId, Catalog, PodcastId, SongId};
use crate::playlists::{Playlist, PlaylistId};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Filters {
    pub name: Option<String>,
    pub album: Option<String>,
    pub tags: Vec<String>,
    pub lyrics: Option<String>,
    pub genre: Option<String>,
    /// Comparison string, e.g. `">2000"` or `"<1990"`.
    #[serde(rename = "releaseYear")]
    pub release_year: Option<String>,
    pub artist: Option<String>,
    pub owner: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Song,
    Album,
    Podcast,
    Playlist,
    Artist,
    Host,
}

impl SearchKind {
    pub fn parse(value: &str) -> Option<SearchKind> {
        match value {
            "song" => Some(SearchKind::Song),
            "album" => Some(SearchKind::Album),
            "podcast" => Some(SearchKind::Podcast),
            "playlist" => Some(SearchKind::Playlist),
            "artist" => Some(SearchKind::Artist),
            "host" => Some(SearchKind::Host),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResult {
    Song(SongId),
    Album(AlbumId),
    Podcast(PodcastId),
    Playlist(PlaylistId),
    Creator(String),
}

impl SearchResult {
    pub fn display_name<'a>(&'a self, catalog: &'a Catalog, playlists: &'a [Playlist]) -> &'a str {
        match self {
            SearchResult::Song(id) => &catalog.song(*id).name,
            SearchResult::Album(id) => &catalog.album(*id).name,
            SearchResult::Podcast(id) => &catalog.podcast(*id).name,
            SearchResult::Playlist(id) => &playlists[id.0].name,
            SearchResult::Creator(name) => name,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectError {
    #[error("no search results available")]
    NoSearch,
    #[error("the selected id exceeds the result count")]
    IdTooHigh,
}

/// Search state of one listener. `searched` stays false until the first
/// search so that a bare `select` can be told apart from a spent one.
#[derive(Debug, Default)]
pub struct SearchBar {
    searched: bool,
    results: Vec<SearchResult>,
    selected: Option<SearchResult>,
}

impl SearchBar {
    pub fn set_results(&mut self, results: Vec<SearchResult>) {
        self.searched = true;
        self.results = results;
        self.selected = None;
    }

    pub fn select(&mut self, item_number: usize) -> Result<&SearchResult, SelectError> {
        if !self.searched {
            return Err(SelectError::NoSearch);
        }
        if item_number == 0 || item_number > self.results.len() {
            return Err(SelectError::IdTooHigh);
        }
        let result = self.results[item_number - 1].clone();
        self.searched = false;
        self.results.clear();
        self.selected = Some(result);
        Ok(self.selected.as_ref().unwrap())
    }

    pub fn selection(&self) -> Option<&SearchResult> {
        self.selected.as_ref()
    }

    /// Consumes the selection (the `load` command uses it exactly once).
    pub fn take_selection(&mut self) -> Option<SearchResult> {
        self.selected.take()
    }
}

fn name_matches(name: &str, filter: Option<&String>) -> bool {
    match filter {
        Some(prefix) => name.to_lowercase().starts_with(&prefix.to_lowercase()),
        None => true,
    }
}

fn equals(value: &str, filter: Option<&String>) -> bool {
    match filter {
        Some(wanted) => value == wanted,
        None => true,
    }
}

fn contains(value: &str, filter: Option<&String>) -> bool {
    match filter {
        Some(needle) => value.to_lowercase().contains(&needle.to_lowercase()),
        None => true,
    }
}

/// Release-year filter: a `<` or `>` prefix compares, anything else is an
/// exact match.
fn year_matches(year: i32, filter: Option<&String>) -> bool {
    let Some(filter) = filter else {
        return true;
    };
    if let Some(rest) = filter.strip_prefix('<') {
        rest.parse::<i32>().map(|y| year < y).unwrap_or(false)
    } else if let Some(rest) = filter.strip_prefix('>') {
        rest.parse::<i32>().map(|y| year > y).unwrap_or(false)
    } else {
        filter.parse::<i32>().map(|y| year == y).unwrap_or(false)
    }
}

pub fn run_search(
    kind: SearchKind,
    filters: &Filters,
    catalog: &Catalog,
    playlists: &[Playlist],
    username: &str,
    cap: usize,
) -> Vec<SearchResult> {
    let mut results = match kind {
        SearchKind::Song => catalog
            .songs()
            .filter(|(_, song)| {
                name_matches(&song.name, filters.name.as_ref())
                    && equals(&song.album, filters.album.as_ref())
                    && filters.tags.iter().all(|tag| {
                        song.tags
                            .iter()
                            .any(|t| t.eq_ignore_ascii_case(tag))
                    })
                    && contains(&song.lyrics, filters.lyrics.as_ref())
                    && filters
                        .genre
                        .as_ref()
                        .map(|g| song.genre.eq_ignore_ascii_case(g))
                        .unwrap_or(true)
                    && year_matches(song.release_year, filters.release_year.as_ref())
                    && equals(&song.artist, filters.artist.as_ref())
            })
            .map(|(id, _)| SearchResult::Song(id))
            .collect::<Vec<_>>(),
        SearchKind::Album => catalog
            .albums()
            .filter(|(_, album)| {
                name_matches(&album.name, filters.name.as_ref())
                    && equals(&album.artist, filters.owner.as_ref())
                    && contains(
                        album.description.as_deref().unwrap_or(""),
                        filters.description.as_ref(),
                    )
            })
            .map(|(id, _)| SearchResult::Album(id))
            .collect(),
        SearchKind::Podcast => catalog
            .podcasts()
            .filter(|(_, podcast)| {
                name_matches(&podcast.name, filters.name.as_ref())
                    && equals(&podcast.host, filters.owner.as_ref())
            })
            .map(|(id, _)| SearchResult::Podcast(id))
            .collect(),
        SearchKind::Playlist => playlists
            .iter()
            .enumerate()
            .filter(|(_, playlist)| {
                playlist.visible_to(username)
                    && name_matches(&playlist.name, filters.name.as_ref())
                    && equals(&playlist.owner, filters.owner.as_ref())
            })
            .map(|(i, _)| SearchResult::Playlist(PlaylistId(i)))
            .collect(),
        SearchKind::Artist => catalog
            .artist_names()
            .into_iter()
            .filter(|name| name_matches(name, filters.name.as_ref()))
            .map(|name| SearchResult::Creator(name.to_owned()))
            .collect(),
        SearchKind::Host => catalog
            .host_names()
            .into_iter()
            .filter(|name| name_matches(name, filters.name.as_ref()))
            .map(|name| SearchResult::Creator(name.to_owned()))
            .collect(),
    };
    results.truncate(cap);
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_support::{catalog_with_podcast, catalog_with_songs};

    fn filters(name: Option<&str>) -> Filters {
        Filters {
            name: name.map(str::to_owned),
            ..Filters::default()
        }
    }

    #[test]
    fn song_search_matches_name_prefix_case_insensitively() {
        let catalog = catalog_with_songs(&[
            ("Silent Echo", "A", "X", "Pop", 100),
            ("Silver Lining", "A", "X", "Pop", 100),
            ("Echoes", "B", "Y", "Rock", 100),
        ]);
        let results = run_search(
            SearchKind::Song,
            &filters(Some("sil")),
            &catalog,
            &[],
            "ana",
            5,
        );
        assert_eq!(
            results,
            vec![SearchResult::Song(SongId(0)), SearchResult::Song(SongId(1))]
        );
    }

    #[test]
    fn song_search_caps_the_result_count() {
        let songs: Vec<(String, &str, &str, &str, u32)> = (0..8)
            .map(|i| (format!("Song {}", i), "A", "X", "Pop", 100))
            .collect();
        let borrowed: Vec<(&str, &str, &str, &str, u32)> = songs
            .iter()
            .map(|(n, a, al, g, d)| (n.as_str(), *a, *al, *g, *d))
            .collect();
        let catalog = catalog_with_songs(&borrowed);
        let results = run_search(SearchKind::Song, &filters(None), &catalog, &[], "ana", 5);
        assert_eq!(results.len(), 5);
    }

    #[test]
    fn release_year_comparisons() {
        assert!(year_matches(1999, Some(&"<2000".to_owned())));
        assert!(!year_matches(2000, Some(&"<2000".to_owned())));
        assert!(year_matches(2001, Some(&">2000".to_owned())));
        assert!(year_matches(2000, Some(&"2000".to_owned())));
    }

    #[test]
    fn private_playlists_are_hidden_from_other_users() {
        let catalog = Catalog::default();
        let mut playlist = Playlist::new("mix", "ana");
        playlist.switch_visibility();
        let playlists = vec![playlist];
        assert!(run_search(
            SearchKind::Playlist,
            &filters(None),
            &catalog,
            &playlists,
            "bob",
            5
        )
        .is_empty());
        assert_eq!(
            run_search(
                SearchKind::Playlist,
                &filters(None),
                &catalog,
                &playlists,
                "ana",
                5
            )
            .len(),
            1
        );
    }

    #[test]
    fn host_search_walks_podcast_hosts() {
        let catalog = catalog_with_podcast("Tech Talks", "Dan Host", &[("E1", 300)]);
        let results = run_search(
            SearchKind::Host,
            &filters(Some("dan")),
            &catalog,
            &[],
            "ana",
            5,
        );
        assert_eq!(results, vec![SearchResult::Creator("Dan Host".to_owned())]);
    }

    #[test]
    fn select_is_one_based_and_single_use() {
        let mut bar = SearchBar::default();
        assert_eq!(bar.select(1), Err(SelectError::NoSearch));
        bar.set_results(vec![
            SearchResult::Creator("A".to_owned()),
            SearchResult::Creator("B".to_owned()),
        ]);
        assert_eq!(bar.select(3), Err(SelectError::IdTooHigh));
        assert_eq!(
            bar.select(2),
            Ok(&SearchResult::Creator("B".to_owned()))
        );
        assert_eq!(
            bar.take_selection(),
            Some(SearchResult::Creator("B".to_owned()))
        );
        assert_eq!(bar.take_selection(), None);
        // The bar is spent until the next search.
        assert_eq!(bar.select(1), Err(SelectError::NoSearch));
    }
}
