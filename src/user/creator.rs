use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreatorKind {
    Artist,
    Host,
}

#[derive(Debug, Clone, Serialize)]
pub struct Merchandise {
    pub name: String,
    pub description: String,
    pub price: f64,
}

/// A content creator (artist or podcast host). Artists carry merchandise;
/// both kinds carry a subscriber list for notification fan-out.
#[derive(Debug)]
pub struct Creator {
    pub username: String,
    pub kind: CreatorKind,
    pub merch: Vec<Merchandise>,
    pub subscribers: Vec<String>,
}

impl Creator {
    pub fn new(username: impl Into<String>, kind: CreatorKind) -> Self {
        Creator {
            username: username.into(),
            kind,
            merch: Vec::new(),
            subscribers: Vec::new(),
        }
    }

    pub fn merch_by_name(&self, name: &str) -> Option<&Merchandise> {
        self.merch.iter().find(|m| m.name == name)
    }

    /// Adds or removes the subscriber; returns `true` when they are now
    /// subscribed.
    pub fn toggle_subscriber(&mut self, username: &str) -> bool {
        match self.subscribers.iter().position(|s| s == username) {
            Some(index) => {
                self.subscribers.remove(index);
                false
            }
            None => {
                self.subscribers.push(username.to_owned());
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscription_toggles_membership() {
        let mut creator = Creator::new("The Band", CreatorKind::Artist);
        assert!(creator.toggle_subscriber("ana"));
        assert_eq!(creator.subscribers, vec!["ana".to_owned()]);
        assert!(!creator.toggle_subscriber("ana"));
        assert!(creator.subscribers.is_empty());
    }
}
