//! The shapes of Discord's REST error responses and rate limit information.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use rate_limit::{RateLimitHeaders, TooManyRequests};

pub mod rate_limit;

/// The JSON body of a failed request.
#[derive(Deserialize, Serialize, Debug, Clone, Error)]
pub struct ApiErrorMessage {
    pub code: ErrorCode,
    pub message: String,
    /// per-field details, for [`InvalidFormBodyOrContentType`](ErrorCode::InvalidFormBodyOrContentType)
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub errors: serde_json::Value,
}

impl Display for ApiErrorMessage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} (code {})", self.message, self.code.value())?;
        if !self.errors.is_null() {
            write!(f, ": {}", self.errors)?;
        }
        Ok(())
    }
}

serde_repr! {
    /// <https://discord.com/developers/docs/topics/opcodes-and-status-codes#json-json-error-codes>
    #[allow(clippy::upper_case_acronyms)]
    pub enum ErrorCode: u32 {
        /// General error (such as a malformed request body, amongst other things)
        General = 0,
        UnknownAccount = 10001,
        UnknownApplication = 10002,
        UnknownChannel = 10003,
        UnknownGuild = 10004,
        UnknownIntegration = 10005,
        UnknownInvite = 10006,
        UnknownMember = 10007,
        UnknownMessage = 10008,
        UnknownPermissionOverwrite = 10009,
        UnknownProvider = 10010,
        UnknownRole = 10011,
        UnknownToken = 10012,
        UnknownUser = 10013,
        UnknownEmoji = 10014,
        UnknownWebhook = 10015,
        UnknownBan = 10026,
        UnknownGuildTemplate = 10057,
        UnknownGuildScheduledEvent = 10070,
        /// Bots cannot use this endpoint
        BotForbidden = 20001,
        /// Only bots can use this endpoint
        OnlyBots = 20002,
        /// This message cannot be edited due to announcement rate limits
        AnnouncementEditRateLimit = 20022,
        /// The channel you are writing has hit the write rate limit
        ChannelWriteRateLimit = 20028,
        MaxGuilds = 30001,
        MaxFriends = 30002,
        MaxPins = 30003,
        MaxGuildRoles = 30005,
        MaxWebhooks = 30007,
        MaxReactions = 30010,
        MaxGuildChannels = 30013,
        MaxInvites = 30016,
        /// Unauthorized. Provide a valid token and try again
        Unauthorized = 40001,
        /// You need to verify your account in order to perform this action
        Unverified = 40002,
        /// Request entity too large. Try sending something smaller in size
        RequestTooLarge = 40005,
        /// The user is banned from this guild
        UserBanned = 40007,
        MissingAccess = 50001,
        InvalidAccountType = 50002,
        /// Cannot execute action on a DM channel
        CannotExecuteActionDm = 50003,
        /// Guild widget (embed) disabled
        GuildWidgetDisabled = 50004,
        /// Cannot edit a message authored by another user
        EditOtherUserMessage = 50005,
        EmptyMessage = 50006,
        /// Cannot send messages to this user
        CannotSendToUser = 50007,
        /// Cannot send messages in a voice channel
        CannotSendInVoiceChannel = 50008,
        /// Channel verification level is too high for you to gain access
        NotChannelVerified = 50009,
        /// OAuth2 application does not have a bot
        OAuth2NoBot = 50010,
        OAuth2ApplicationLimit = 50011,
        InvalidOAuth2State = 50012,
        /// You lack permissions to perform that action
        Permissions = 50013,
        InvalidToken = 50014,
        NoteTooLong = 50015,
        /// Provided too few or too many messages to delete. Must provide at least 2 and fewer than 100 messages to delete
        MessageDeleteNumber = 50016,
        /// A message can only be pinned to the channel it was sent in
        MessagePinInWrongChannel = 50019,
        /// Invite code was either invalid or taken
        InviteCode = 50020,
        CannotExecuteActionSystemMessage = 50021,
        /// Cannot execute action on this channel type
        CannotExecuteActionChannelType = 50024,
        InvalidOAuth2Token = 50025,
        /// A message provided was too old to bulk delete
        BulkDeleteTooOld = 50034,
        /// Invalid form body (returned for both application/json and multipart/form-data bodies), or invalid Content-Type provided
        InvalidFormBodyOrContentType = 50035,
        /// An invite was accepted to a guild the application's bot is not in
        InviteAccepted = 50036,
        InvalidAPIVersion = 50041,
        ReactionBlocked = 90001,
        /// API resource is currently overloaded. Try again a little later
        ApiResourceOverloaded = 130_000,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_body_errors() {
        let error: ApiErrorMessage = serde_json::from_str(r#"{
            "code": 50035,
            "errors": {
                "access_token": {"_errors": [{"code": "BASE_TYPE_REQUIRED", "message": "This field is required"}]}
            },
            "message": "Invalid Form Body"
        }"#).unwrap();
        assert_eq!(error.code, ErrorCode::InvalidFormBodyOrContentType);
        assert_eq!(error.errors["access_token"]["_errors"][0]["code"], "BASE_TYPE_REQUIRED");
        assert!(error.to_string().starts_with("Invalid Form Body (code 50035): {"));
    }

    #[test]
    fn no_details() {
        let error: ApiErrorMessage = serde_json::from_str(r#"{"message": "Missing Permissions", "code": 50013}"#).unwrap();
        assert_eq!(error.code, ErrorCode::Permissions);
        assert_eq!(error.to_string(), "Missing Permissions (code 50013)");
        assert_eq!(
            serde_json::to_string(&error).unwrap(),
            r#"{"code":50013,"message":"Missing Permissions"}"#,
        );
    }

    #[test]
    fn code_values() {
        assert_eq!(ErrorCode::from(130_000), ErrorCode::ApiResourceOverloaded);
        assert_eq!(u32::from(ErrorCode::UnknownChannel), 10003);
        assert!(!ErrorCode::from(12345).is_known());
    }
}
