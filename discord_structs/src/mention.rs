//! Markup for mentioning channels, roles, and users in message content.
//!
//! Each trait is implemented for anything with the right kind of [`Id`], so the raw id types work
//! just as well as the full objects:
//!
//! ```rust
//! use discord_structs::mention::{ChannelMarkup, RoleMarkup, UserMarkup};
//! use discord_structs::model::ids::{ChannelId, RoleId, UserId};
//!
//! assert_eq!(ChannelId(123).mention(), "<#123>");
//! assert_eq!(RoleId(456).mention(), "<@&456>");
//! assert_eq!(UserId(789).ping_nick(), "<@!789>");
//! ```

use crate::model::ids::*;

pub trait ChannelMarkup: Id<Id=ChannelId> {
    fn mention(&self) -> String {
        format!("<#{}>", self.id())
    }
}

impl<I: Id<Id=ChannelId>> ChannelMarkup for I {}

pub trait RoleMarkup: Id<Id=RoleId> {
    fn mention(&self) -> String {
        format!("<@&{}>", self.id())
    }
}

impl<I: Id<Id=RoleId>> RoleMarkup for I {}

pub trait UserMarkup: Id<Id=UserId> {
    fn ping(&self) -> String {
        format!("<@{}>", self.id())
    }

    /// Mention as a guild member, which the client shows using their nickname
    fn ping_nick(&self) -> String {
        format!("<@!{}>", self.id())
    }
}

impl<I: Id<Id=UserId>> UserMarkup for I {}

#[cfg(test)]
mod tests {
    use crate::model::guild::GuildMember;
    use crate::model::permissions::Role;

    use super::*;

    #[test]
    fn raw_ids() {
        assert_eq!(ChannelId(123).mention(), "<#123>");
        assert_eq!(RoleId(456).mention(), "<@&456>");
        assert_eq!(UserId(789).ping_nick(), "<@!789>");
        assert_eq!(UserId(789).ping(), "<@789>");
    }

    #[test]
    fn objects() {
        let role: Role = serde_json::from_str(r#"{
            "id": "456",
            "name": "mods",
            "color": 3447003,
            "hoist": true,
            "position": 4,
            "permissions": "8",
            "managed": false,
            "mentionable": true
        }"#).unwrap();
        assert_eq!(role.mention(), "<@&456>");
        assert_eq!((&role).mention(), "<@&456>");

        let member: GuildMember = serde_json::from_str(r#"{
            "user": {
                "id": "789",
                "username": "someone",
                "discriminator": "0420",
                "avatar": null
            },
            "roles": ["456"],
            "joined_at": "2020-01-01T00:00:00.000000+00:00",
            "deaf": false,
            "mute": false
        }"#).unwrap();
        assert_eq!(member.ping_nick(), "<@!789>");
    }
}
