//! The structures sent over Discord's gateway (the websocket), and the bookkeeping a session needs.

pub use intents::Intents;
pub use session::{Session, SessionConfig};

pub mod intents;
pub mod model;
pub mod session;

/// The gateway and REST API version these structures are written against.
pub const API_VERSION: u8 = 10;

/// The url to open a websocket to, given the bare url Discord reports (with or without a
/// trailing `/`).
pub fn gateway_url(url: &str) -> String {
    let url = url.trim_end_matches('/');
    format!("{url}/?v={API_VERSION}&encoding=json")
}
