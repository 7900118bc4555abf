//! The `snowflake` types Discord uses to identify different objects.

use std::fmt::{self, Display};
use std::num::ParseIntError;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde::de::Error;

use crate::model::ids::sealed::IsId;

/// Milliseconds since the unix epoch of the first second of 2015, which snowflakes count from.
pub const DISCORD_EPOCH: u64 = 1_420_070_400_000;

macro_rules! snowflake {
    ($($id:tt),+ $(,)?) => {
        $(
            #[derive(Debug, Copy, Clone, Eq, PartialEq, PartialOrd, Ord, Hash)]
            pub struct $id(pub u64);

            impl $id {
                /// When this id was generated, taken from its top 42 bits
                pub fn timestamp(&self) -> DateTime<Utc> {
                    let millis = (self.0 >> 22) + DISCORD_EPOCH;
                    DateTime::from_timestamp_millis(millis as i64).unwrap_or_default()
                }
            }

            impl Display for $id {
                fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                    write!(f, "{}", self.0)
                }
            }

            impl From<u64> for $id {
                fn from(id: u64) -> Self {
                    Self(id)
                }
            }

            impl From<DateTime<Utc>> for $id {
                fn from(ts: DateTime<Utc>) -> Self {
                    Self((ts.timestamp_millis() as u64).saturating_sub(DISCORD_EPOCH) << 22)
                }
            }

            impl FromStr for $id {
                type Err = ParseIntError;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    Ok(Self(s.parse()?))
                }
            }

            impl<'de> Deserialize<'de> for $id {
                fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
                    struct IdVisitor;

                    impl<'de> ::serde::de::Visitor<'de> for IdVisitor {
                        type Value = $id;

                        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                            write!(f, "a string ({})", stringify!($id))
                        }

                        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E> where E: Error {
                            v.parse().map_err(E::custom)
                        }

                        fn visit_borrowed_str<E>(self, v: &'de str) -> Result<Self::Value, E> where E: Error {
                            v.parse().map_err(E::custom)
                        }

                        fn visit_string<E>(self, v: String) -> Result<Self::Value, E> where E: Error {
                            v.parse().map_err(E::custom)
                        }

                        // some older payloads (and hand written test data) use plain numbers
                        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E> where E: Error {
                            Ok($id(v))
                        }
                    }

                    d.deserialize_any(IdVisitor)
                }
            }

            impl Serialize for $id {
                fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
                    let str = self.0.to_string();
                    s.serialize_str(&str)
                }
            }

            impl sealed::IsId for $id {}

            impl Id for $id {
                type Id = Self;

                fn id(&self) -> Self { *self }
            }
        )+
    };
}

snowflake!(
    GuildId,
    ChannelId,
    UserId,
    MessageId,
    ApplicationId,
    WebhookId,
    EmojiId,
    RoleId,
    IntegrationId,
    AuditLogEntryId,
    ScheduledEventId,
    // a role or a user, depending on the overwrite's type
    OverwriteId,
);

mod sealed {
    use std::fmt::Debug;

    pub trait IsId: Copy + std::hash::Hash + Eq + Debug {}
}

/// Anything that is, or is identified by, a snowflake.
pub trait Id: PartialEq {
    type Id: IsId;

    fn id(&self) -> Self::Id;
}

/// Impl [Id](Id) for a type, using its `id` field to get the id
/// ```ignore
/// struct Message {
///     id: MessageId,
///     ...
/// }
/// id_impl!(Message => id: MessageId);
/// ```
/// If the `id` field is named `id`, the macro invocation can be abbreviated to
/// ```ignore
/// id_impl!(Message => MessageId);
/// ```
///
/// Also impl's `PartialEq` by calling [id_eq](id_eq)
macro_rules! id_impl {
    ($ty:ty => $id:ident: $id_ty:ty) => {
        impl $crate::model::ids::Id for $ty {
            type Id = $id_ty;

            fn id(&self) -> Self::Id {
                self.$id
            }
        }

        id_eq!($ty);
    };
    ($ty:ty => $id_ty:ty) => {
        id_impl!($ty => id: $id_ty);
    };
}

/// impl `PartialEq` for a type that has an id
macro_rules! id_eq {
    ($id:ty) => {
        impl PartialEq for $id {
            fn eq(&self, other: &Self) -> bool {
                use $crate::model::ids::Id;
                self.id() == other.id()
            }
        }
    };
}

impl<'a, I: Id> Id for &'a I {
    type Id = I::Id;

    fn id(&self) -> Self::Id { (*self).id() }
}

impl<'a, I: Id> Id for &'a mut I {
    type Id = I::Id;

    fn id(&self) -> Self::Id { (**self).id() }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn snowflake_timestamp() {
        let id = UserId(175_928_847_299_117_063);
        let expected = Utc.timestamp_millis_opt(1_462_015_105_796).unwrap();
        assert_eq!(id.timestamp(), expected);
    }

    #[test]
    fn from_timestamp_round_trips_millis() {
        let ts = Utc.timestamp_millis_opt(1_609_459_200_123).unwrap();
        assert_eq!(MessageId::from(ts).timestamp(), ts);
    }

    #[test]
    fn strings_on_the_wire() {
        let id: ChannelId = serde_json::from_str(r#""41771983423143937""#).unwrap();
        assert_eq!(id, ChannelId(41_771_983_423_143_937));
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""41771983423143937""#);

        let id: RoleId = serde_json::from_str("456").unwrap();
        assert_eq!(id, RoleId(456));

        assert!(serde_json::from_str::<GuildId>(r#""not a number""#).is_err());
    }
}
