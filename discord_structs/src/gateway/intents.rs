bitflags! {
    /// Discord's Gateway Intents, which allow bots to opt in or out of receiving certain events.
    /// [`SessionConfig`](crate::gateway::session::SessionConfig) sends all non-privileged intents
    /// unless told otherwise.
    ///
    /// See [Discord's documentation](https://discord.com/developers/docs/topics/gateway#gateway-intents) for more details.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct Intents: u32 {
        const GUILDS = 1 << 0;
        /// privileged
        const GUILD_MEMBERS = 1 << 1;
        const GUILD_BANS = 1 << 2;
        const GUILD_EMOJIS = 1 << 3;
        const GUILD_INTEGRATIONS = 1 << 4;
        const GUILD_WEBHOOKS = 1 << 5;
        const GUILD_INVITES = 1 << 6;
        const GUILD_VOICE_STATES = 1 << 7;
        /// privileged
        const GUILD_PRESENCES = 1 << 8;
        const GUILD_MESSAGES = 1 << 9;
        const GUILD_MESSAGE_REACTIONS = 1 << 10;
        const GUILD_MESSAGE_TYPING = 1 << 11;
        const DIRECT_MESSAGES = 1 << 12;
        const DIRECT_MESSAGE_REACTIONS = 1 << 13;
        const DIRECT_MESSAGE_TYPING = 1 << 14;
        const GUILD_SCHEDULED_EVENTS = 1 << 16;
    }
}
serde_bitflag!(Intents: u32);

// composites
impl Intents {
    pub const ALL_WITHOUT_PRIVILEGED_MEMBERS: &'static [Self] = &[
        Self::GUILDS,
        Self::GUILD_BANS,
        Self::GUILD_EMOJIS,
        Self::GUILD_INTEGRATIONS,
        Self::GUILD_WEBHOOKS,
        Self::GUILD_INVITES,
        Self::GUILD_VOICE_STATES,
        Self::GUILD_MESSAGES,
        Self::GUILD_MESSAGE_REACTIONS,
        Self::GUILD_MESSAGE_TYPING,
        Self::DIRECT_MESSAGES,
        Self::DIRECT_MESSAGE_REACTIONS,
        Self::DIRECT_MESSAGE_TYPING,
        Self::GUILD_SCHEDULED_EVENTS,
    ];
    /// Every intent that doesn't have to be enabled in the developer portal first
    pub const ALL_WITHOUT_PRIVILEGED: Self = Self::compose(Self::ALL_WITHOUT_PRIVILEGED_MEMBERS);

    /// The intents that have to be enabled in the developer portal
    pub const PRIVILEGED: Self = Self::compose(&[Self::GUILD_MEMBERS, Self::GUILD_PRESENCES]);

    pub const ALL: Self = Self::compose(&[Self::ALL_WITHOUT_PRIVILEGED, Self::PRIVILEGED]);

    pub const NONE: Self = Self::empty();

    /// The union of `members`.
    pub const fn compose(members: &[Self]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < members.len() {
            bits |= members[i].bits();
            i += 1;
        }
        Self::from_bits_retain(bits)
    }

    pub const fn is_privileged(self) -> bool {
        self.intersects(Self::PRIVILEGED)
    }
}

impl Default for Intents {
    fn default() -> Self {
        Self::ALL_WITHOUT_PRIVILEGED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn privileged_not_in_default() {
        assert!(!Intents::ALL_WITHOUT_PRIVILEGED.contains(Intents::GUILD_MEMBERS));
        assert!(!Intents::ALL_WITHOUT_PRIVILEGED.contains(Intents::GUILD_PRESENCES));
        assert!(!Intents::ALL_WITHOUT_PRIVILEGED.is_privileged());
        assert!(Intents::ALL_WITHOUT_PRIVILEGED_MEMBERS.iter().all(|i| !i.is_privileged()));
        assert_eq!(Intents::default(), Intents::ALL_WITHOUT_PRIVILEGED);
    }

    #[test]
    fn all() {
        assert!(Intents::ALL.contains(Intents::GUILD_MEMBERS));
        assert!(Intents::ALL.contains(Intents::GUILD_PRESENCES));
        assert_eq!(Intents::ALL, Intents::ALL_WITHOUT_PRIVILEGED | Intents::PRIVILEGED);
        assert_eq!(Intents::ALL, Intents::all());
        assert_eq!(Intents::ALL_WITHOUT_PRIVILEGED.bits(), 0x1_7EFD);
        assert_eq!(Intents::ALL.bits(), 0x1_FFFF ^ (1 << 15));
        assert_eq!(Intents::NONE.bits(), 0);
    }

    #[test]
    fn wire_form() {
        let json = serde_json::to_string(&(Intents::GUILDS | Intents::GUILD_MESSAGES)).unwrap();
        assert_eq!(json, "513");

        // bit 15 (message content) isn't named here, but it's kept
        let intents: Intents = serde_json::from_str("33281").unwrap();
        assert_eq!(intents.bits(), 33281);
        assert!(intents.contains(Intents::GUILDS | Intents::GUILD_MESSAGES));
        assert_eq!(serde_json::to_string(&intents).unwrap(), "33281");
    }
}
