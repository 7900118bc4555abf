//! Rust structures representing the information sent by Discord's API.

#[macro_use]
pub mod ids;
pub mod audit_log;
pub mod channel;
pub mod emoji;
pub mod guild;
pub mod permissions;
pub mod user;
pub mod voice;
pub mod webhook;

pub trait ImageFormat {
    const EXTENSION: &'static str;

    const ANIMATED: bool;
}

pub trait StillImage: ImageFormat {}

pub struct Jpeg;

impl ImageFormat for Jpeg {
    const EXTENSION: &'static str = "jpeg";
    const ANIMATED: bool = false;
}

impl StillImage for Jpeg {}

pub struct Png;

impl ImageFormat for Png {
    const EXTENSION: &'static str = "png";
    const ANIMATED: bool = false;
}

impl StillImage for Png {}

pub struct WebP;

impl ImageFormat for WebP {
    const EXTENSION: &'static str = "webp";
    const ANIMATED: bool = false;
}

impl StillImage for WebP {}

pub struct Gif;

impl ImageFormat for Gif {
    const EXTENSION: &'static str = "gif";
    const ANIMATED: bool = true;
}

/// Image hashes starting with `a_` are animated, and are available as a gif.
pub(crate) fn is_animated(hash: &str) -> bool {
    hash.starts_with("a_")
}
