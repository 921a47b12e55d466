//! Library file parsing.
//!
//! The library is a single JSON document describing the fixed catalog (songs
//! and podcasts) and the users known at the start of the run.

use super::song::{Episode, Song};
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Clone, Deserialize, Debug)]
pub struct PodcastEntry {
    pub name: String,
    pub owner: String,
    pub episodes: Vec<Episode>,
}

#[derive(Clone, Copy, Deserialize, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserKind {
    #[default]
    User,
    Artist,
    Host,
}

#[derive(Clone, Deserialize, Debug)]
pub struct UserEntry {
    pub username: String,
    #[serde(default)]
    pub age: u32,
    #[serde(default)]
    pub city: String,
    #[serde(rename = "type", default)]
    pub kind: UserKind,
}

#[derive(Clone, Deserialize, Debug, Default)]
#[serde(default)]
pub struct Library {
    pub songs: Vec<Song>,
    pub podcasts: Vec<PodcastEntry>,
    pub users: Vec<UserEntry>,
}

impl Library {
    pub fn from_file(path: &Path) -> Result<Library> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read library file {}", path.display()))?;
        let library: Library = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse library file {}", path.display()))?;
        library.validate()?;
        Ok(library)
    }

    /// Zero-length audio would stall the playback simulation loop, so it is
    /// rejected up front as a malformed library.
    pub fn validate(&self) -> Result<()> {
        for song in &self.songs {
            if song.duration == 0 {
                bail!("Song \"{}\" has a zero duration", song.name);
            }
        }
        for podcast in &self.podcasts {
            for episode in &podcast.episodes {
                if episode.duration == 0 {
                    bail!(
                        "Episode \"{}\" of podcast \"{}\" has a zero duration",
                        episode.name,
                        podcast.name
                    );
                }
            }
        }
        Ok(())
    }
}
