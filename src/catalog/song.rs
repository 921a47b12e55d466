use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Song {
    pub name: String,
    /// Duration in seconds.
    pub duration: u32,
    pub album: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub lyrics: String,
    pub genre: String,
    #[serde(rename = "releaseYear")]
    pub release_year: i32,
    pub artist: String,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Episode {
    pub name: String,
    /// Duration in seconds.
    pub duration: u32,
    #[serde(default)]
    pub description: String,
}
