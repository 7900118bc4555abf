//! Configuration for a gateway session, and the handful of values a session has to remember
//! between connections.
//!
//! Nothing here connects, heartbeats, or reconnects on its own: [`Session`] only records what it's
//! told, so that whatever owns the websocket can ask it for the next [`Identify`] or [`Resume`].

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};

use log::{info, warn, LevelFilter};

use crate::errors::ConfigError;
use crate::gateway::gateway_url;
use crate::gateway::intents::Intents;
use crate::gateway::model::{GatewayStatusUpdate, Identify, Resume};

/// How to connect to the gateway. Uses the builder pattern; everything but the token has a
/// default.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    token: String,
    /// defaults to [`Intents::ALL_WITHOUT_PRIVILEGED`]
    pub intents: Intents,
    /// `(shard_id, num_shards)`
    pub shard: Option<(u32, u32)>,
    pub compress: bool,
    pub large_threshold: Option<u8>,
    pub presence: Option<GatewayStatusUpdate>,
    /// whether the connection should be re-established after an error
    pub reconnect_on_error: bool,
    /// how many times a REST request is retried before giving up
    pub max_rest_retries: u32,
    pub user_agent: String,
    /// whether to keep a cache of the objects received over the gateway
    pub state_tracking: bool,
    /// whether events are handled one at a time, in order
    pub sync_events: bool,
    pub log_level: LevelFilter,
}

impl SessionConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            intents: Intents::ALL_WITHOUT_PRIVILEGED,
            shard: None,
            compress: false,
            large_threshold: None,
            presence: None,
            reconnect_on_error: true,
            max_rest_retries: 3,
            user_agent: format!(
                "DiscordBot ({}, {})",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
            ),
            state_tracking: true,
            sync_events: false,
            log_level: LevelFilter::Info,
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub const fn intents(mut self, intents: Intents) -> Self {
        self.intents = intents;
        self
    }

    pub const fn shard(mut self, id: u32, count: u32) -> Self {
        self.shard = Some((id, count));
        self
    }

    pub const fn compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    pub const fn large_threshold(mut self, large_threshold: u8) -> Self {
        self.large_threshold = Some(large_threshold);
        self
    }

    pub fn presence(mut self, presence: GatewayStatusUpdate) -> Self {
        self.presence = Some(presence);
        self
    }

    pub const fn reconnect_on_error(mut self, reconnect_on_error: bool) -> Self {
        self.reconnect_on_error = reconnect_on_error;
        self
    }

    pub const fn max_rest_retries(mut self, max_rest_retries: u32) -> Self {
        self.max_rest_retries = max_rest_retries;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub const fn state_tracking(mut self, state_tracking: bool) -> Self {
        self.state_tracking = state_tracking;
        self
    }

    pub const fn sync_events(mut self, sync_events: bool) -> Self {
        self.sync_events = sync_events;
        self
    }

    pub const fn log_level(mut self, log_level: LevelFilter) -> Self {
        self.log_level = log_level;
        self
    }

    /// Check that this config could be used to connect.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.token.trim().is_empty() {
            return Err(ConfigError::MissingToken);
        }
        match self.shard {
            Some((_, 0)) => Err(ConfigError::NoShards),
            Some((id, count)) if id >= count => Err(ConfigError::ShardOutOfRange { id, count }),
            _ => Ok(()),
        }
    }

    /// The `Identify` payload to start a new session with.
    pub fn identify(&self) -> Result<Identify, ConfigError> {
        self.validate()?;
        let mut identify = Identify::new(self.token.clone())
            .intents(self.intents);
        if let Some((id, count)) = self.shard {
            identify = identify.shard(id, count);
        }
        if self.compress {
            identify = identify.compress(true);
        }
        if let Some(large_threshold) = self.large_threshold {
            identify = identify.large_threshold(large_threshold);
        }
        if let Some(presence) = &self.presence {
            identify = identify.presence(presence.clone());
        }
        if self.intents.is_privileged() {
            info!("identifying with privileged intents {:?}", self.intents & Intents::PRIVILEGED);
        }
        Ok(identify)
    }

    /// Install an `env_logger` logger at [`log_level`](Self::log_level). `RUST_LOG` still
    /// overrides it per module.
    ///
    /// Returns `false` if a logger was already installed.
    pub fn init_logger(&self) -> bool {
        env_logger::Builder::new()
            .filter_level(self.log_level)
            .parse_default_env()
            .try_init()
            .is_ok()
    }
}

/// The parts of a gateway connection that outlive the connection itself.
#[derive(Debug, Default, Clone)]
pub struct GatewayState {
    pub seq: Option<u64>,
    pub session_id: Option<String>,
    pub resume_gateway: Option<String>,
    pub heartbeat: Option<Instant>,
    pub ack: Option<Instant>,
}

/// A [`SessionConfig`] plus the [`GatewayState`] of the current session. Can be shared between
/// threads; every method takes `&self`.
#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    state: RwLock<GatewayState>,
}

impl Session {
    pub fn new(config: SessionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, state: Default::default() })
    }

    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    // a poisoned lock still holds usable state
    fn read(&self) -> RwLockReadGuard<GatewayState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<GatewayState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// A copy of the current state.
    pub fn state(&self) -> GatewayState {
        self.read().clone()
    }

    pub fn seq(&self) -> Option<u64> {
        self.read().seq
    }

    /// Record the sequence number of a dispatch. Sequence numbers only go up: a lower one is
    /// ignored and `false` is returned.
    pub fn update_seq(&self, seq_num: u64) -> bool {
        let mut state = self.write();
        match state.seq {
            Some(curr) if seq_num < curr => {
                warn!("ignoring seq num {}, already at {}", seq_num, curr);
                false
            }
            Some(curr) => {
                let missed = (seq_num - curr).saturating_sub(1);
                if missed > 0 {
                    warn!("received seq num {}, expected {} ({} were missed)",
                          seq_num, curr.saturating_add(1), missed
                    );
                }
                state.seq = Some(seq_num);
                true
            }
            None => {
                state.seq = Some(seq_num);
                true
            }
        }
    }

    pub fn session_id(&self) -> Option<String> {
        self.read().session_id.clone()
    }

    pub fn resume_gateway(&self) -> Option<String> {
        self.read().resume_gateway.clone()
    }

    /// Record the session from a `READY` event.
    pub fn ready(&self, session_id: impl Into<String>, resume_gateway_url: &str) {
        let session_id = session_id.into();
        let mut state = self.write();
        if let Some(old) = &state.session_id {
            if *old != session_id {
                info!("new session {} (was {})", session_id, old);
            }
        }
        state.session_id = Some(session_id);
        state.resume_gateway = Some(gateway_url(resume_gateway_url));
    }

    pub fn heartbeat_sent(&self) {
        self.write().heartbeat = Some(Instant::now());
    }

    pub fn heartbeat_acked(&self) {
        self.write().ack = Some(Instant::now());
    }

    /// Time between the last heartbeat and its ack, if the last heartbeat has been acked.
    pub fn heartbeat_latency(&self) -> Option<Duration> {
        let state = self.read();
        match (state.heartbeat, state.ack) {
            (Some(heartbeat), Some(ack)) => ack.checked_duration_since(heartbeat),
            _ => None,
        }
    }

    /// The `Resume` payload for the current session, if there is one to resume.
    pub fn resume(&self) -> Option<Resume> {
        let state = self.read();
        match (&state.session_id, state.seq) {
            (Some(session_id), Some(seq)) => Some(Resume {
                token: self.config.token.clone(),
                session_id: session_id.clone(),
                seq,
            }),
            _ => None,
        }
    }

    /// Forget the session, after Discord says it can't be resumed.
    pub fn reset(&self) {
        *self.write() = GatewayState::default();
    }
}
