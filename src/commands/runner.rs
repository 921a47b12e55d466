//! The scenario runner.
//!
//! The runner owns every piece of mutable state for one run and is the only
//! place where playback events touch the ledgers. Before dispatching a
//! command it advances the virtual clock, ticking every online listener's
//! engine by the elapsed seconds and folding the emitted events into the
//! listen ledger, the monetization buckets and the free-tier distributions.

use super::CommandInput;
use crate::catalog::{AudioId, Catalog, Library, SongId, UserKind};
use crate::config::SimConfig;
use crate::ledger::{ListenLedger, RevenueLedger};
use crate::notifications::{self, Notification};
use crate::player::{PlaybackEvent, PlaybackSource, PlayerError, QueueEntry, QueueItem, SourceKind};
use crate::playlists::{Playlist, PlaylistId};
use crate::search::{run_search, SearchKind, SearchResult, SelectError};
use crate::statistics;
use crate::user::{Creator, CreatorKind, Listener};
use serde_json::{json, Map, Value};
use tracing::{debug, warn};

const AD_BREAK_NAME: &str = "Ad Break";

pub struct Simulation {
    catalog: Catalog,
    listeners: Vec<Listener>,
    creators: Vec<Creator>,
    playlists: Vec<Playlist>,
    listens: ListenLedger,
    revenue: RevenueLedger,
    clock: u64,
    config: SimConfig,
}

fn message_output(input: &CommandInput, message: impl Into<String>) -> Value {
    json!({
        "command": input.command,
        "user": input.username,
        "timestamp": input.timestamp,
        "message": message.into(),
    })
}

impl Simulation {
    pub fn new(library: &Library, config: SimConfig) -> Self {
        let catalog = Catalog::from_library(library);
        let mut listeners = Vec::new();
        let mut creators = Vec::new();
        for user in &library.users {
            match user.kind {
                UserKind::User => listeners.push(Listener::new(
                    user.username.as_str(),
                    user.age,
                    user.city.as_str(),
                    config.podcast_skip_secs,
                )),
                UserKind::Artist => {
                    creators.push(Creator::new(user.username.as_str(), CreatorKind::Artist))
                }
                UserKind::Host => {
                    creators.push(Creator::new(user.username.as_str(), CreatorKind::Host))
                }
            }
        }
        Simulation {
            catalog,
            listeners,
            creators,
            playlists: Vec::new(),
            listens: ListenLedger::default(),
            revenue: RevenueLedger::default(),
            clock: 0,
            config,
        }
    }

    pub fn execute(&mut self, input: &CommandInput) -> Value {
        self.advance_time_to(input.timestamp);
        debug!(command = %input.command, user = ?input.username, "executing command");
        match input.command.as_str() {
            "search" => self.search(input),
            "select" => self.select(input),
            "load" => self.load(input),
            "playPause" => self.play_pause(input),
            "repeat" => self.repeat(input),
            "shuffle" => self.shuffle(input),
            "forward" => self.forward(input),
            "backward" => self.backward(input),
            "next" => self.next(input),
            "prev" => self.prev(input),
            "like" => self.like(input),
            "status" => self.status(input),
            "createPlaylist" => self.create_playlist(input),
            "addRemoveInPlaylist" => self.add_remove_in_playlist(input),
            "switchVisibility" => self.switch_visibility(input),
            "showPlaylists" => self.show_playlists(input),
            "follow" => self.follow(input),
            "showPreferredSongs" => self.show_preferred_songs(input),
            "switchConnectionStatus" => self.switch_connection_status(input),
            "buyPremium" => self.buy_premium(input),
            "cancelPremium" => self.cancel_premium(input),
            "adBreak" => self.ad_break(input),
            "subscribe" => self.subscribe(input),
            "getNotifications" => self.get_notifications(input),
            "addMerch" => self.add_merch(input),
            "buyMerch" => self.buy_merch(input),
            "seeMerch" => self.see_merch(input),
            "wrapped" => self.wrapped(input),
            other => {
                warn!(command = %other, "unknown command");
                message_output(input, format!("Unknown command {}.", other))
            }
        }
    }

    /// Final monetization report. Premium buckets that never went through a
    /// cancellation pay out here, then every monetized artist is ranked.
    pub fn end_program(&mut self) -> Value {
        for index in 0..self.listeners.len() {
            if self.listeners[index].premium {
                self.flush_premium(index);
            }
        }
        let mut result = Map::new();
        for (name, report) in self.revenue.report() {
            result.insert(name, serde_json::to_value(report).unwrap_or(Value::Null));
        }
        json!({ "command": "endProgram", "result": Value::Object(result) })
    }

    fn advance_time_to(&mut self, timestamp: u64) {
        let delta = timestamp.saturating_sub(self.clock);
        self.clock = timestamp;
        // A jump beyond u32::MAX seconds exhausts any finite source anyway.
        let delta = u32::try_from(delta).unwrap_or(u32::MAX);
        if delta == 0 {
            return;
        }
        for index in 0..self.listeners.len() {
            if !self.listeners[index].online {
                continue;
            }
            let events = self.listeners[index].engine.tick(delta);
            self.apply_events(index, &events);
        }
    }

    /// Folds playback events into the ledgers and monetization buckets, in
    /// the order the engine emitted them.
    fn apply_events(&mut self, listener_index: usize, events: &[PlaybackEvent]) {
        for &event in events {
            match event {
                PlaybackEvent::TrackStarted(id) => {
                    let username = self.listeners[listener_index].username.clone();
                    self.listens.record_play(id, &username);
                    if let AudioId::Song(song) = id {
                        let listener = &mut self.listeners[listener_index];
                        if listener.premium {
                            listener.pending_premium.push(song);
                        } else {
                            listener.pending_free.push(song);
                        }
                    }
                }
                PlaybackEvent::AdBreakCrossed => {
                    let price = self.listeners[listener_index].armed_ad_price;
                    let pending = std::mem::take(&mut self.listeners[listener_index].pending_free);
                    let pairs = self.song_pairs(&pending);
                    self.revenue.distribute(&pairs, price);
                }
            }
        }
    }

    fn song_pairs(&self, songs: &[SongId]) -> Vec<(String, String)> {
        songs
            .iter()
            .map(|&id| {
                (
                    self.catalog.artist_of(id).to_owned(),
                    self.catalog.song(id).name.clone(),
                )
            })
            .collect()
    }

    fn flush_premium(&mut self, index: usize) {
        let pending = std::mem::take(&mut self.listeners[index].pending_premium);
        if pending.is_empty() {
            return;
        }
        let pairs = self.song_pairs(&pending);
        self.revenue.distribute(&pairs, self.config.premium_pool);
    }

    fn listener_index(&self, username: &str) -> Option<usize> {
        self.listeners.iter().position(|l| l.username == username)
    }

    fn creator_index(&self, username: &str) -> Option<usize> {
        self.creators.iter().position(|c| c.username == username)
    }

    /// Resolves the issuing listener, or the error output to return as-is.
    fn require_listener(&self, input: &CommandInput) -> Result<usize, Value> {
        let username = input.username.as_deref().unwrap_or_default();
        self.listener_index(username).ok_or_else(|| {
            message_output(input, format!("The username {} doesn't exist.", username))
        })
    }

    fn require_online_listener(&self, input: &CommandInput) -> Result<usize, Value> {
        let index = self.require_listener(input)?;
        if !self.listeners[index].online {
            return Err(message_output(
                input,
                format!("{} is offline.", self.listeners[index].username),
            ));
        }
        Ok(index)
    }

    fn current_item_name(&self, listener_index: usize) -> Option<String> {
        match self.listeners[listener_index].engine.status().item? {
            QueueItem::Audio(id) => Some(self.catalog.audio_name(id).to_owned()),
            QueueItem::AdBreak => Some(AD_BREAK_NAME.to_owned()),
        }
    }

    fn song_entry(&self, id: SongId) -> QueueEntry {
        QueueEntry {
            item: AudioId::Song(id),
            duration: self.catalog.song(id).duration,
        }
    }

    fn search(&mut self, input: &CommandInput) -> Value {
        let index = match self.require_listener(input) {
            Ok(index) => index,
            Err(output) => return output,
        };
        let username = self.listeners[index].username.clone();
        if !self.listeners[index].online {
            return json!({
                "command": input.command,
                "user": input.username,
                "timestamp": input.timestamp,
                "message": format!("{} is offline.", username),
                "results": [],
            });
        }

        // Searching tears the player down; a playing podcast keeps its
        // bookmark through the stop.
        self.listeners[index].engine.stop();

        let default_filters = Default::default();
        let filters = input.filters.as_ref().unwrap_or(&default_filters);
        let results = match input.search_type.as_deref().and_then(SearchKind::parse) {
            Some(kind) => run_search(
                kind,
                filters,
                &self.catalog,
                &self.playlists,
                &username,
                self.config.search_result_cap,
            ),
            None => Vec::new(),
        };
        let names: Vec<String> = results
            .iter()
            .map(|r| r.display_name(&self.catalog, &self.playlists).to_owned())
            .collect();
        self.listeners[index].search.set_results(results);

        json!({
            "command": input.command,
            "user": input.username,
            "timestamp": input.timestamp,
            "message": format!("Search returned {} results", names.len()),
            "results": names,
        })
    }

    fn select(&mut self, input: &CommandInput) -> Value {
        let index = match self.require_online_listener(input) {
            Ok(index) => index,
            Err(output) => return output,
        };
        let item_number = input.item_number.unwrap_or(0);
        let message = match self.listeners[index].search.select(item_number) {
            Ok(SearchResult::Creator(name)) => {
                format!("Successfully selected {}'s page.", name)
            }
            Ok(result) => format!(
                "Successfully selected {}.",
                result.display_name(&self.catalog, &self.playlists)
            ),
            Err(SelectError::NoSearch) => {
                "Please conduct a search before making a selection.".to_owned()
            }
            Err(SelectError::IdTooHigh) => "The selected ID is too high.".to_owned(),
        };
        message_output(input, message)
    }

    fn load(&mut self, input: &CommandInput) -> Value {
        let index = match self.require_online_listener(input) {
            Ok(index) => index,
            Err(output) => return output,
        };
        let source = match self.listeners[index].search.selection() {
            None | Some(SearchResult::Creator(_)) => {
                return message_output(
                    input,
                    "Please select a source before attempting to load.",
                )
            }
            Some(SearchResult::Song(id)) => {
                let id = *id;
                PlaybackSource::new(
                    SourceKind::Song,
                    self.catalog.song(id).name.clone(),
                    vec![self.song_entry(id)],
                )
            }
            Some(SearchResult::Album(id)) => {
                let album = self.catalog.album(*id);
                let entries: Vec<QueueEntry> =
                    album.songs.iter().map(|&s| self.song_entry(s)).collect();
                PlaybackSource::new(SourceKind::Album, album.name.clone(), entries)
            }
            Some(SearchResult::Playlist(id)) => {
                let playlist = &self.playlists[id.0];
                if playlist.songs.is_empty() {
                    return message_output(input, "You can't load an empty audio collection!");
                }
                let entries: Vec<QueueEntry> =
                    playlist.songs.iter().map(|&s| self.song_entry(s)).collect();
                PlaybackSource::new(SourceKind::Playlist, playlist.name.clone(), entries)
            }
            Some(SearchResult::Podcast(id)) => {
                let podcast = self.catalog.podcast(*id);
                if podcast.episodes.is_empty() {
                    return message_output(input, "You can't load an empty audio collection!");
                }
                let entries: Vec<QueueEntry> = podcast
                    .episodes
                    .iter()
                    .map(|&e| QueueEntry {
                        item: AudioId::Episode(e),
                        duration: self.catalog.episode(e).duration,
                    })
                    .collect();
                PlaybackSource::new(SourceKind::Podcast, podcast.name.clone(), entries)
            }
        };
        self.listeners[index].search.take_selection();
        let mut events = Vec::new();
        self.listeners[index].engine.load(source, &mut events);
        self.apply_events(index, &events);
        message_output(input, "Playback loaded successfully.")
    }

    fn play_pause(&mut self, input: &CommandInput) -> Value {
        let index = match self.require_online_listener(input) {
            Ok(index) => index,
            Err(output) => return output,
        };
        let message = match self.listeners[index].engine.play_pause() {
            Ok(true) => "Playback paused successfully.",
            Ok(false) => "Playback resumed successfully.",
            Err(_) => "Please load a source before attempting to pause or resume playback.",
        };
        message_output(input, message)
    }

    fn repeat(&mut self, input: &CommandInput) -> Value {
        let index = match self.require_online_listener(input) {
            Ok(index) => index,
            Err(output) => return output,
        };
        let message = match self.listeners[index].engine.cycle_repeat() {
            Ok(mode) => format!("Repeat mode changed to {}.", mode.message_label()),
            Err(_) => "Please load a source before setting the repeat status.".to_owned(),
        };
        message_output(input, message)
    }

    fn shuffle(&mut self, input: &CommandInput) -> Value {
        let index = match self.require_online_listener(input) {
            Ok(index) => index,
            Err(output) => return output,
        };
        let message = match self.listeners[index].engine.toggle_shuffle(input.seed) {
            Ok(true) => "Shuffle function activated successfully.",
            Ok(false) => "Shuffle function deactivated successfully.",
            Err(PlayerError::NothingLoaded) => {
                "Please load a source before using the shuffle function."
            }
            Err(_) => "The loaded source is not a playlist or an album.",
        };
        message_output(input, message)
    }

    fn forward(&mut self, input: &CommandInput) -> Value {
        let index = match self.require_online_listener(input) {
            Ok(index) => index,
            Err(output) => return output,
        };
        let message = match self.listeners[index].engine.skip_forward() {
            Ok(()) => "Skipped forward successfully.",
            Err(PlayerError::NothingLoaded) => "Please load a source before attempting to forward.",
            Err(_) => "The loaded source is not a podcast.",
        };
        message_output(input, message)
    }

    fn backward(&mut self, input: &CommandInput) -> Value {
        let index = match self.require_online_listener(input) {
            Ok(index) => index,
            Err(output) => return output,
        };
        let message = match self.listeners[index].engine.skip_backward() {
            Ok(()) => "Rewound successfully.",
            Err(PlayerError::NothingLoaded) => "Please select a source before rewinding.",
            Err(_) => "The loaded source is not a podcast.",
        };
        message_output(input, message)
    }

    fn next(&mut self, input: &CommandInput) -> Value {
        let index = match self.require_online_listener(input) {
            Ok(index) => index,
            Err(output) => return output,
        };
        let message = match self.listeners[index].engine.next() {
            Ok(events) => {
                self.apply_events(index, &events);
                match self.current_item_name(index) {
                    Some(name) => format!(
                        "Skipped to next track successfully. The current track is {}.",
                        name
                    ),
                    // The skip exhausted the source.
                    None => "Please load a source before skipping to the next track.".to_owned(),
                }
            }
            Err(_) => "Please load a source before skipping to the next track.".to_owned(),
        };
        message_output(input, message)
    }

    fn prev(&mut self, input: &CommandInput) -> Value {
        let index = match self.require_online_listener(input) {
            Ok(index) => index,
            Err(output) => return output,
        };
        let message = match self.listeners[index].engine.prev() {
            Ok(()) => match self.current_item_name(index) {
                Some(name) => format!(
                    "Returned to previous track successfully. The current track is {}.",
                    name
                ),
                None => "Please load a source before returning to the previous track.".to_owned(),
            },
            Err(_) => "Please load a source before returning to the previous track.".to_owned(),
        };
        message_output(input, message)
    }

    fn like(&mut self, input: &CommandInput) -> Value {
        let index = match self.require_online_listener(input) {
            Ok(index) => index,
            Err(output) => return output,
        };
        if !self.listeners[index].engine.is_loaded() {
            return message_output(input, "Please load a source before liking or unliking.");
        }
        let message = match self.listeners[index].engine.current_audio() {
            Some(AudioId::Song(song)) => {
                if self.listeners[index].toggle_like(song) {
                    "Like registered successfully."
                } else {
                    "Unlike registered successfully."
                }
            }
            _ => "Loaded source is not a song.",
        };
        message_output(input, message)
    }

    fn status(&mut self, input: &CommandInput) -> Value {
        let index = match self.require_listener(input) {
            Ok(index) => index,
            Err(output) => return output,
        };
        let snapshot = self.listeners[index].engine.status();
        let name = self.current_item_name(index).unwrap_or_default();
        json!({
            "command": input.command,
            "user": input.username,
            "timestamp": input.timestamp,
            "stats": {
                "name": name,
                "remainedTime": snapshot.remained_time,
                "repeat": snapshot.repeat.label(),
                "shuffle": snapshot.shuffle,
                "paused": snapshot.paused,
            },
        })
    }

    fn create_playlist(&mut self, input: &CommandInput) -> Value {
        let index = match self.require_online_listener(input) {
            Ok(index) => index,
            Err(output) => return output,
        };
        let name = input.playlist_name.clone().unwrap_or_default();
        let username = self.listeners[index].username.clone();
        let duplicate = self.listeners[index]
            .playlists
            .iter()
            .any(|&id| self.playlists[id.0].name == name);
        if duplicate {
            return message_output(input, "A playlist with the same name already exists.");
        }
        let id = PlaylistId(self.playlists.len());
        self.playlists.push(Playlist::new(name, username));
        self.listeners[index].playlists.push(id);
        message_output(input, "Playlist created successfully.")
    }

    fn add_remove_in_playlist(&mut self, input: &CommandInput) -> Value {
        let index = match self.require_online_listener(input) {
            Ok(index) => index,
            Err(output) => return output,
        };
        if !self.listeners[index].engine.is_loaded() {
            return message_output(
                input,
                "Please load a source before adding to or removing from the playlist.",
            );
        }
        let song = match self.listeners[index].engine.current_audio() {
            Some(AudioId::Song(song)) => song,
            _ => return message_output(input, "The loaded source is not a song."),
        };
        let playlist_number = input.playlist_id.unwrap_or(0);
        let Some(&playlist_id) = playlist_number
            .checked_sub(1)
            .and_then(|n| self.listeners[index].playlists.get(n))
        else {
            return message_output(input, "The specified playlist does not exist.");
        };
        let message = if self.playlists[playlist_id.0].toggle_song(song) {
            "Successfully added to playlist."
        } else {
            "Successfully removed from playlist."
        };
        message_output(input, message)
    }

    fn switch_visibility(&mut self, input: &CommandInput) -> Value {
        let index = match self.require_online_listener(input) {
            Ok(index) => index,
            Err(output) => return output,
        };
        let playlist_number = input.playlist_id.unwrap_or(0);
        let Some(&playlist_id) = playlist_number
            .checked_sub(1)
            .and_then(|n| self.listeners[index].playlists.get(n))
        else {
            return message_output(input, "The specified playlist ID is too high.");
        };
        let visibility = self.playlists[playlist_id.0].switch_visibility();
        message_output(
            input,
            format!(
                "Visibility status updated successfully to {}.",
                visibility.label()
            ),
        )
    }

    fn show_playlists(&mut self, input: &CommandInput) -> Value {
        let index = match self.require_listener(input) {
            Ok(index) => index,
            Err(output) => return output,
        };
        let result: Vec<Value> = self.listeners[index]
            .playlists
            .iter()
            .map(|&id| {
                let playlist = &self.playlists[id.0];
                let songs: Vec<&str> = playlist
                    .songs
                    .iter()
                    .map(|&s| self.catalog.song(s).name.as_str())
                    .collect();
                json!({
                    "name": playlist.name,
                    "songs": songs,
                    "visibility": playlist.visibility.label(),
                    "followers": playlist.followers,
                })
            })
            .collect();
        json!({
            "command": input.command,
            "user": input.username,
            "timestamp": input.timestamp,
            "result": result,
        })
    }

    fn follow(&mut self, input: &CommandInput) -> Value {
        let index = match self.require_online_listener(input) {
            Ok(index) => index,
            Err(output) => return output,
        };
        let playlist_id = match self.listeners[index].search.selection() {
            None => {
                return message_output(
                    input,
                    "Please select a source before following or unfollowing.",
                )
            }
            Some(SearchResult::Playlist(id)) => *id,
            Some(_) => return message_output(input, "The selected source is not a playlist."),
        };
        if self.playlists[playlist_id.0].owner == self.listeners[index].username {
            return message_output(input, "You cannot follow or unfollow your own playlist.");
        }
        let message = if self.listeners[index].toggle_follow(playlist_id) {
            self.playlists[playlist_id.0].followers += 1;
            "Playlist followed successfully."
        } else {
            let playlist = &mut self.playlists[playlist_id.0];
            playlist.followers = playlist.followers.saturating_sub(1);
            "Playlist unfollowed successfully."
        };
        message_output(input, message)
    }

    fn show_preferred_songs(&mut self, input: &CommandInput) -> Value {
        let index = match self.require_listener(input) {
            Ok(index) => index,
            Err(output) => return output,
        };
        let result: Vec<&str> = self.listeners[index]
            .liked_songs
            .iter()
            .map(|&s| self.catalog.song(s).name.as_str())
            .collect();
        json!({
            "command": input.command,
            "user": input.username,
            "timestamp": input.timestamp,
            "result": result,
        })
    }

    fn switch_connection_status(&mut self, input: &CommandInput) -> Value {
        let username = input.username.as_deref().unwrap_or_default();
        if let Some(index) = self.listener_index(username) {
            let listener = &mut self.listeners[index];
            listener.online = !listener.online;
            return message_output(
                input,
                format!("{} has changed status successfully.", listener.username),
            );
        }
        if self.creator_index(username).is_some() {
            return message_output(input, format!("{} is not a normal user.", username));
        }
        message_output(input, format!("The username {} doesn't exist.", username))
    }

    fn buy_premium(&mut self, input: &CommandInput) -> Value {
        let index = match self.require_online_listener(input) {
            Ok(index) => index,
            Err(output) => return output,
        };
        let listener = &mut self.listeners[index];
        let message = if listener.premium {
            format!("{} is already a premium user.", listener.username)
        } else {
            listener.premium = true;
            format!("{} bought the subscription successfully.", listener.username)
        };
        message_output(input, message)
    }

    fn cancel_premium(&mut self, input: &CommandInput) -> Value {
        let index = match self.require_online_listener(input) {
            Ok(index) => index,
            Err(output) => return output,
        };
        if !self.listeners[index].premium {
            return message_output(
                input,
                format!("{} is not a premium user.", self.listeners[index].username),
            );
        }
        self.flush_premium(index);
        self.listeners[index].premium = false;
        message_output(
            input,
            format!(
                "{} cancelled the subscription successfully.",
                self.listeners[index].username
            ),
        )
    }

    fn ad_break(&mut self, input: &CommandInput) -> Value {
        let index = match self.require_online_listener(input) {
            Ok(index) => index,
            Err(output) => return output,
        };
        let playing_music = matches!(
            self.listeners[index].engine.source_kind(),
            Some(SourceKind::Song | SourceKind::Playlist | SourceKind::Album)
        );
        if !playing_music {
            return message_output(
                input,
                format!("{} is not playing any music.", self.listeners[index].username),
            );
        }
        self.listeners[index].armed_ad_price = input.price.unwrap_or(0.0);
        match self.listeners[index].engine.insert_ad_break() {
            Ok(()) => message_output(input, "Ad inserted successfully."),
            Err(_) => message_output(
                input,
                format!("{} is not playing any music.", self.listeners[index].username),
            ),
        }
    }

    fn subscribe(&mut self, input: &CommandInput) -> Value {
        let index = match self.require_online_listener(input) {
            Ok(index) => index,
            Err(output) => return output,
        };
        let creator_name = input.creator.clone().unwrap_or_default();
        let Some(creator_index) = self.creator_index(&creator_name) else {
            return message_output(
                input,
                format!("The username {} doesn't exist.", creator_name),
            );
        };
        let username = self.listeners[index].username.clone();
        let subscribed = self.creators[creator_index].toggle_subscriber(&username);
        let message = if subscribed {
            format!("{} subscribed to {} successfully.", username, creator_name)
        } else {
            format!("{} unsubscribed from {} successfully.", username, creator_name)
        };
        message_output(input, message)
    }

    fn get_notifications(&mut self, input: &CommandInput) -> Value {
        let index = match self.require_listener(input) {
            Ok(index) => index,
            Err(output) => return output,
        };
        let notifications = self.listeners[index].drain_inbox();
        json!({
            "command": input.command,
            "user": input.username,
            "timestamp": input.timestamp,
            "notifications": notifications,
        })
    }

    fn add_merch(&mut self, input: &CommandInput) -> Value {
        let username = input.username.as_deref().unwrap_or_default();
        let Some(creator_index) = self
            .creator_index(username)
            .filter(|&i| self.creators[i].kind == CreatorKind::Artist)
        else {
            return message_output(input, format!("{} is not an artist.", username));
        };
        let price = input.price.unwrap_or(0.0);
        if price < 0.0 {
            return message_output(input, "The price of merchandise cannot be negative.");
        }
        let name = input.name.clone().unwrap_or_default();
        if self.creators[creator_index].merch_by_name(&name).is_some() {
            return message_output(
                input,
                format!("{} has merchandise with the same name.", username),
            );
        }
        self.creators[creator_index].merch.push(crate::user::Merchandise {
            name,
            description: input.description.clone().unwrap_or_default(),
            price,
        });

        let notification = Notification::new_merchandise(username);
        let receivers: Vec<String> =
            notifications::publish(&self.creators[creator_index].subscribers, &notification)
                .into_iter()
                .map(str::to_owned)
                .collect();
        for receiver in receivers {
            if let Some(listener_index) = self.listener_index(&receiver) {
                self.listeners[listener_index].inbox.push(notification.clone());
            }
        }
        message_output(input, format!("{} has added new merch successfully.", username))
    }

    fn buy_merch(&mut self, input: &CommandInput) -> Value {
        let index = match self.require_online_listener(input) {
            Ok(index) => index,
            Err(output) => return output,
        };
        let creator_name = input.creator.clone().unwrap_or_default();
        let Some(creator_index) = self
            .creator_index(&creator_name)
            .filter(|&i| self.creators[i].kind == CreatorKind::Artist)
        else {
            return message_output(
                input,
                format!("The username {} doesn't exist.", creator_name),
            );
        };
        let merch_name = input.name.clone().unwrap_or_default();
        let Some(merch) = self.creators[creator_index].merch_by_name(&merch_name) else {
            return message_output(input, format!("The merch {} doesn't exist.", merch_name));
        };
        let price = merch.price;
        self.revenue.record_merch_sale(&creator_name, price);
        self.listeners[index].purchased_merch.push(merch_name);
        message_output(
            input,
            format!(
                "{} has bought the merch successfully.",
                self.listeners[index].username
            ),
        )
    }

    fn see_merch(&mut self, input: &CommandInput) -> Value {
        let index = match self.require_listener(input) {
            Ok(index) => index,
            Err(output) => return output,
        };
        json!({
            "command": input.command,
            "user": input.username,
            "timestamp": input.timestamp,
            "result": self.listeners[index].purchased_merch,
        })
    }

    fn wrapped(&mut self, input: &CommandInput) -> Value {
        let username = input.username.as_deref().unwrap_or_default();
        let limit = self.config.top_list_limit;
        let result = if self.listener_index(username).is_some() {
            statistics::listener_wrapped(username, &self.catalog, &self.listens, limit)
        } else {
            match self.creator_index(username).map(|i| self.creators[i].kind) {
                Some(CreatorKind::Artist) => {
                    statistics::artist_wrapped(username, &self.catalog, &self.listens, limit)
                }
                Some(CreatorKind::Host) => {
                    statistics::host_wrapped(username, &self.catalog, &self.listens, limit)
                }
                None => {
                    return message_output(
                        input,
                        format!("The username {} doesn't exist.", username),
                    )
                }
            }
        };
        match result {
            Some(result) => json!({
                "command": input.command,
                "user": input.username,
                "timestamp": input.timestamp,
                "result": result,
            }),
            None => message_output(input, format!("No data to show for user {}.", username)),
        }
    }
}
