mod listen;
mod revenue;

pub use listen::{ListenCounts, ListenLedger};
pub use revenue::{ArtistRevenueReport, RevenueLedger};
