use serde::{Deserialize, Serialize};

use crate::model::ids::*;
use crate::model::user::User;

serde_repr! {
    pub enum WebhookType: u8 {
        /// Incoming Webhooks can post messages to channels with a generated token
        Incoming = 1,
        /// Channel Follower Webhooks are internal webhooks used with Channel Following to post new
        /// messages into channels
        ChannelFollower = 2,
        /// Application webhooks are webhooks used with Interactions
        Application = 3,
    }
}

/// Webhooks are a low-effort way to post messages to channels in Discord. They do not require a
/// bot user or authentication to use.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Webhook {
    pub id: WebhookId,
    #[serde(rename = "type")]
    pub kind: WebhookType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<GuildId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<ChannelId>,
    /// the user this webhook was created by (not returned when getting a webhook with its token)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    /// the secure token of the webhook (returned for Incoming Webhooks)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default)]
    pub application_id: Option<ApplicationId>,
}

id_impl!(Webhook => WebhookId);

impl Webhook {
    /// The url to execute this webhook at, if its token is known.
    pub fn url(&self) -> Option<String> {
        self.token.as_ref()
            .map(|token| format!("https://discord.com/api/webhooks/{}/{}", self.id, token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incoming() {
        let webhook: Webhook = serde_json::from_str(r#"{
            "name": "test webhook",
            "type": 1,
            "channel_id": "199737254929760256",
            "token": "3d89bb7572e0fb30d8128367b3b1b44fecd1726de135cbe28a41f8b2f777c372ba2939e72279b94526ff5d1bd4358d65cf11",
            "avatar": null,
            "guild_id": "199737254929760256",
            "id": "223704706495545344",
            "application_id": null,
            "user": {
                "username": "test",
                "discriminator": "7479",
                "id": "190320984123768832",
                "avatar": "b004ec1740a63ca06ae2e14c5cee11f3"
            }
        }"#).unwrap();
        assert_eq!(webhook.kind, WebhookType::Incoming);
        assert_eq!(
            webhook.url().unwrap(),
            "https://discord.com/api/webhooks/223704706495545344/3d89bb7572e0fb30d8128367b3b1b44fecd1726de135cbe28a41f8b2f777c372ba2939e72279b94526ff5d1bd4358d65cf11"
        );
        assert_eq!(webhook.user.unwrap().tag(), "test#7479");
    }

    #[test]
    fn follower_has_no_url() {
        let webhook: Webhook = serde_json::from_str(r#"{
            "id": "223704706495545344",
            "type": 2,
            "name": "news"
        }"#).unwrap();
        assert_eq!(webhook.kind, WebhookType::ChannelFollower);
        assert_eq!(webhook.url(), None);
    }
}
