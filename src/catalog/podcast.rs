use super::EpisodeId;

/// A podcast: an ordered collection of episodes owned by a host.
#[derive(Clone, Debug)]
pub struct Podcast {
    pub name: String,
    pub host: String,
    pub episodes: Vec<EpisodeId>,
}

impl Podcast {
    pub fn episode_count(&self) -> usize {
        self.episodes.len()
    }
}
