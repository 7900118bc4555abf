use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::model::{Gif, ImageFormat, Png};
use crate::model::ids::*;
pub use crate::model::ids::EmojiId;
use crate::model::user::User;
use crate::serde_utils::{BoolExt, null_as_t};

/// Matches custom emoji (`<:name:id>` or `<a:name:id>`) in message content.
pub static EMOJI_REGEX: Lazy<Regex> = Lazy::new(||
    Regex::new("<(a|):[A-z0-9_~]+:[0-9]{18}>").unwrap()
);

/// Every custom emoji in `content`, as it's written there.
pub fn find_custom_emojis(content: &str) -> impl Iterator<Item=&str> {
    EMOJI_REGEX.find_iter(content).map(|m| m.as_str())
}

/// Either a guild's custom emoji, which has an [`id`](Self::id), or a unicode emoji, which only
/// has a [`name`](Self::name).
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct Emoji {
    /// emoji id
    #[serde(default)]
    pub id: Option<EmojiId>,
    /// emoji name
    ///
    /// (can be null only in reaction emoji objects)
    #[serde(default)]
    pub name: Option<String>,
    /// roles this emoji is whitelisted to
    #[serde(default, deserialize_with = "null_as_t", skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<RoleId>,
    /// user that created this emoji
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    /// whether this emoji must be wrapped in colons
    #[serde(default, skip_serializing_if = "bool::is_false")]
    pub require_colons: bool,
    /// whether this emoji is managed
    #[serde(default, skip_serializing_if = "bool::is_false")]
    pub managed: bool,
    /// whether this emoji is animated
    #[serde(default, skip_serializing_if = "bool::is_false")]
    pub animated: bool,
    /// whether this emoji can be used, may be false due to loss of Server Boosts
    #[serde(default, skip_serializing_if = "bool::is_false")]
    pub available: bool,
}

impl Emoji {
    pub fn custom(id: EmojiId, name: impl Into<String>) -> Self {
        Self { id: Some(id), name: Some(name.into()), ..Default::default() }
    }

    pub fn unicode(name: impl Into<String>) -> Self {
        Self { name: Some(name.into()), ..Default::default() }
    }

    /// How this emoji is named in the reaction endpoints: `name:id` for custom emoji, or just the
    /// name (or id, if there is no name).
    pub fn api_name(&self) -> String {
        match (&self.name, self.id) {
            (Some(name), Some(id)) if !name.is_empty() => format!("{name}:{id}"),
            (Some(name), _) if !name.is_empty() => name.clone(),
            (_, Some(id)) => id.to_string(),
            (_, None) => String::new(),
        }
    }

    /// How to write this emoji in message content or embeds: `<:name:id>` (or `<a:name:id>` when
    /// animated) for custom emoji, otherwise the same as [`api_name`](Self::api_name).
    pub fn message_format(&self) -> String {
        match (&self.name, self.id) {
            (Some(name), Some(_)) if !name.is_empty() => {
                let animated = if self.animated { "a" } else { "" };
                format!("<{}:{}>", animated, self.api_name())
            }
            _ => self.api_name(),
        }
    }

    /// The url where this image can be retrieved from Discord, if this is a custom emoji. Will
    /// either be a `.png` or a `.gif`, depending on whether this emoji is
    /// [animated](Self::animated).
    ///
    /// The returned image size can be changed by appending a querystring of `?size=desired_size` to
    /// the URL. Image size can be any power of two between 16 and 4096.
    pub fn url(&self) -> Option<String> {
        let ext = if self.animated {
            Gif::EXTENSION
        } else {
            Png::EXTENSION
        };
        self.id.map(|id| cdn!("emojis/{}.{}", id, ext))
    }
}

impl fmt::Display for Emoji {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.message_format())
    }
}

impl From<char> for Emoji {
    fn from(name: char) -> Self {
        Self::unicode(name.to_string())
    }
}

/// A reaction added to or removed from a message.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct MessageReaction {
    pub user_id: UserId,
    pub message_id: MessageId,
    pub emoji: Emoji,
    pub channel_id: ChannelId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<GuildId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom() {
        let emoji: Emoji = serde_json::from_str(r#"{
            "id": "41771983429993937",
            "name": "LUL",
            "roles": ["41771983429993000", "41771983429993111"],
            "user": {
                "username": "Luigi",
                "discriminator": "0002",
                "id": "96008815106887111",
                "avatar": "5500909a3274e1812beb4e8de6631111"
            },
            "require_colons": true,
            "managed": false,
            "animated": false
        }"#).unwrap();
        assert_eq!(emoji.api_name(), "LUL:41771983429993937");
        assert_eq!(emoji.message_format(), "<:LUL:41771983429993937>");
        assert_eq!(emoji.to_string(), "<:LUL:41771983429993937>");
        assert_eq!(emoji.url().unwrap(), "https://cdn.discordapp.com/emojis/41771983429993937.png");
        assert_eq!(emoji.roles.len(), 2);
    }

    #[test]
    fn animated() {
        let mut emoji = Emoji::custom(EmojiId(41_771_983_429_993_937), "dance");
        emoji.animated = true;
        assert_eq!(emoji.message_format(), "<a:dance:41771983429993937>");
        assert_eq!(emoji.url().unwrap(), "https://cdn.discordapp.com/emojis/41771983429993937.gif");
    }

    #[test]
    fn unicode() {
        let emoji: Emoji = serde_json::from_str(r#"{"id": null, "name": "🔥"}"#).unwrap();
        assert_eq!(emoji.api_name(), "🔥");
        assert_eq!(emoji.message_format(), "🔥");
        assert_eq!(emoji.url(), None);
        assert_eq!(emoji, Emoji::from('🔥'));
    }

    #[test]
    fn id_only() {
        // reaction emoji whose custom emoji was deleted
        let emoji: Emoji = serde_json::from_str(r#"{"id": "41771983429993937", "name": null}"#).unwrap();
        assert_eq!(emoji.api_name(), "41771983429993937");
        assert_eq!(emoji.message_format(), "41771983429993937");
    }

    #[test]
    fn regex() {
        let content = "hi <:LUL:411719834299939370> and <a:dance:411719834299939371>, not <:short:123>";
        let found: Vec<_> = find_custom_emojis(content).collect();
        assert_eq!(found, ["<:LUL:411719834299939370>", "<a:dance:411719834299939371>"]);
    }
}
