use crate::search::Filters;
use serde::Deserialize;

/// One scenario entry. Commands share a flat shape; every field beyond the
/// command name and timestamp is optional and only read by the commands that
/// use it.
#[derive(Debug, Clone, Deserialize)]
pub struct CommandInput {
    pub command: String,
    #[serde(default)]
    pub username: Option<String>,
    pub timestamp: u64,
    /// Search target kind (`song`, `album`, `podcast`, `playlist`, `artist`,
    /// `host`).
    #[serde(default, rename = "type")]
    pub search_type: Option<String>,
    #[serde(default)]
    pub filters: Option<Filters>,
    #[serde(default, rename = "itemNumber")]
    pub item_number: Option<usize>,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default, rename = "playlistName")]
    pub playlist_name: Option<String>,
    #[serde(default, rename = "playlistId")]
    pub playlist_id: Option<usize>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Artist or host the command targets (subscribe, buyMerch).
    #[serde(default)]
    pub creator: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_search_command() {
        let s = r#"
        {
            "command": "search",
            "username": "alice",
            "timestamp": 10,
            "type": "song",
            "filters": { "name": "Lo", "releaseYear": ">2000" }
        }
        "#;
        let input: CommandInput = serde_json::from_str(s).unwrap();
        assert_eq!(input.command, "search");
        assert_eq!(input.username.as_deref(), Some("alice"));
        assert_eq!(input.timestamp, 10);
        assert_eq!(input.search_type.as_deref(), Some("song"));
        let filters = input.filters.unwrap();
        assert_eq!(filters.name.as_deref(), Some("Lo"));
        assert_eq!(filters.release_year.as_deref(), Some(">2000"));
    }

    #[test]
    fn unused_fields_default_to_none() {
        let s = r#"{ "command": "status", "username": "alice", "timestamp": 30 }"#;
        let input: CommandInput = serde_json::from_str(s).unwrap();
        assert!(input.filters.is_none());
        assert!(input.item_number.is_none());
        assert!(input.playlist_id.is_none());
    }
}
