mod creator;
mod listener;

pub use creator::{Creator, CreatorKind, Merchandise};
pub use listener::Listener;
