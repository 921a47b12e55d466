//! Subscriber fan-out for creator events.
//!
//! Publishing does not deliver anywhere by itself; it returns the affected
//! subscriber names and the dispatch layer appends the notification to each
//! listener's inbox.

use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Notification {
    pub name: String,
    pub description: String,
}

impl Notification {
    pub fn new_merchandise(creator: &str) -> Self {
        Notification {
            name: "New Merchandise".to_owned(),
            description: format!("New Merchandise from {}.", creator),
        }
    }
}

/// Returns the names of the subscribers that should receive `notification`.
pub fn publish<'a>(subscribers: &'a [String], _notification: &Notification) -> Vec<&'a str> {
    subscribers.iter().map(String::as_str).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publish_returns_every_subscriber() {
        let subscribers = vec!["ana".to_owned(), "bob".to_owned()];
        let notification = Notification::new_merchandise("The Band");
        assert_eq!(publish(&subscribers, &notification), vec!["ana", "bob"]);
        assert_eq!(notification.name, "New Merchandise");
        assert_eq!(notification.description, "New Merchandise from The Band.");
    }
}
