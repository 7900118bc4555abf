//! Typed Rust structures for Discord's REST and gateway JSON, with the permission and intent
//! bitflags, the rate limit and rich presence decoders, and mention formatting.

#![warn(clippy::pedantic, clippy::nursery)]
// @formatter:off
#![allow(
    clippy::module_name_repetitions,
    clippy::struct_excessive_bools,
    clippy::wildcard_imports,
    clippy::enum_glob_use,
    clippy::default_trait_access,
    clippy::option_option,
    clippy::match_same_arms,
    clippy::must_use_candidate,
    clippy::option_if_let_else,
    // pedantic
    clippy::map_unwrap_or,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    // todo
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    // nursery
    clippy::missing_const_for_fn,
)]
// @formatter:on

#[macro_use]
extern crate bitflags;

pub use errors::Error;
pub use id_map::IdMap;

#[macro_use]
mod macros;
#[macro_use]
pub mod model;
mod id_map;

pub mod errors;
pub mod gateway;
pub mod http;
pub mod lossy;
pub mod mention;
pub mod serde_utils;

#[cfg(test)]
mod tests {
    #[test]
    fn test_compilation() {}
}
