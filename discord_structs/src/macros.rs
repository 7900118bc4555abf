/// Like format but for cdn urls.
macro_rules! cdn {
    ($fmt:literal, $($args:tt)+) => {
        format!(concat!("https://cdn.discordapp.com/", $fmt), $($args)+)
    };
}

/// Derive `Serialize`, `Deserialize` for bitflags, (de)serializing as if this were an integer.
///
/// Bits this crate doesn't have a name for are kept, since Discord adds flags over time.
/// ```ignore
/// use bitflags::bitflags;
/// bitflags! {
///     #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
///     struct Flags: u8 {
///         const A = 1;
///         const B = 2;
///         const C = 4;
///     }
/// }
/// serde_bitflag!(Flags: u8);
/// ```
macro_rules! serde_bitflag {
    ($bitflag:ty: $repr:ty) => {
        impl serde::ser::Serialize for $bitflag {
            fn serialize<S: serde::ser::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
                serde::Serialize::serialize(&self.bits(), s)
            }
        }

        impl<'de> serde::de::Deserialize<'de> for $bitflag {
            fn deserialize<D: serde::de::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
                let bits = <$repr as serde::Deserialize>::deserialize(d)?;
                let flags = Self::from_bits_retain(bits);
                let unknown = bits & !Self::all().bits();
                if unknown != 0 {
                    log::debug!("unknown {} bits {:#x}", stringify!($bitflag), unknown);
                }
                Ok(flags)
            }
        }
    };
}

/// Same idea as the `serde_repr` crate, but every enum also gets an `Unknown(repr)` variant
/// holding any value Discord sends that isn't listed, so new values pass through instead of
/// failing to parse.
///
/// Derives `Debug, Clone, Copy, PartialEq, Eq, Hash`, plus `From` conversions to and from the
/// integer representation.
///
/// Only handles pub enums because that's all I need.
///
/// ```ignore
/// serde_repr! {
///     pub enum Type: u8 {
///         TheTuple = 1,
///         TheUnit = 2,
///         TheStruct = 3,
///     }
/// }
/// ```
macro_rules! serde_repr {
    (
        $(#[$outer:meta])*
        pub enum $enum_name:ident: $repr:ty {
            $(
                $(#[$inner:meta])*
                $variant:ident = $num:literal
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $enum_name {
            $(
                $(#[$inner])*
                $variant,
            )*
            /// A value not (yet) known to this crate, preserved exactly as it was received
            Unknown($repr),
        }

        impl $enum_name {
            /// The integer Discord uses for this value
            pub const fn value(self) -> $repr {
                match self {
                    $(
                        Self::$variant => $num,
                    )*
                    Self::Unknown(other) => other,
                }
            }

            /// Whether this is a value this crate has a name for
            pub const fn is_known(self) -> bool {
                !matches!(self, Self::Unknown(_))
            }
        }

        impl ::std::convert::From<$repr> for $enum_name {
            fn from(value: $repr) -> Self {
                match value {
                    $(
                        $num => Self::$variant,
                    )*
                    other => Self::Unknown(other),
                }
            }
        }

        impl ::std::convert::From<$enum_name> for $repr {
            fn from(value: $enum_name) -> Self {
                value.value()
            }
        }

        impl ::serde::Serialize for $enum_name {
            fn serialize<S: ::serde::ser::Serializer>(&self, s: S) -> ::std::result::Result<S::Ok, S::Error> {
                ::serde::Serialize::serialize(&self.value(), s)
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $enum_name {
            fn deserialize<D: ::serde::de::Deserializer<'de>>(d: D) -> ::std::result::Result<Self, D::Error> {
                let this = Self::from(<$repr as ::serde::Deserialize>::deserialize(d)?);
                if let Self::Unknown(other) = this {
                    log::debug!("unknown {} value {}", stringify!($enum_name), other);
                }
                ::std::result::Result::Ok(this)
            }
        }
    };
}

/// The string equivalent of [`serde_repr!`]: an enum (de)serialized as one of a set of known
/// strings, with an `Unknown(String)` variant for anything else.
///
/// Derives `Debug, Clone, PartialEq, Eq, Hash`, and `Display` as the wire string.
///
/// ```ignore
/// serde_str_enum! {
///     pub enum Status {
///         Online = "online",
///         Idle = "idle",
///     }
/// }
/// ```
macro_rules! serde_str_enum {
    (
        $(#[$outer:meta])*
        pub enum $enum_name:ident {
            $(
                $(#[$inner:meta])*
                $variant:ident = $str:literal
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $enum_name {
            $(
                $(#[$inner])*
                $variant,
            )*
            /// A value not (yet) known to this crate, preserved exactly as it was received
            Unknown(String),
        }

        impl $enum_name {
            /// The string Discord uses for this value
            pub fn as_str(&self) -> &str {
                match self {
                    $(
                        Self::$variant => $str,
                    )*
                    Self::Unknown(other) => other,
                }
            }

            /// Whether this is a value this crate has a name for
            pub const fn is_known(&self) -> bool {
                !matches!(self, Self::Unknown(_))
            }
        }

        impl ::std::convert::From<String> for $enum_name {
            fn from(value: String) -> Self {
                let known = match value.as_str() {
                    $(
                        $str => Some(Self::$variant),
                    )*
                    _ => None,
                };
                known.unwrap_or_else(|| Self::Unknown(value))
            }
        }

        impl ::std::convert::From<&str> for $enum_name {
            fn from(value: &str) -> Self {
                Self::from(value.to_string())
            }
        }

        impl ::std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::serde::Serialize for $enum_name {
            fn serialize<S: ::serde::ser::Serializer>(&self, s: S) -> ::std::result::Result<S::Ok, S::Error> {
                s.serialize_str(self.as_str())
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $enum_name {
            fn deserialize<D: ::serde::de::Deserializer<'de>>(d: D) -> ::std::result::Result<Self, D::Error> {
                let this = Self::from(<String as ::serde::Deserialize>::deserialize(d)?);
                if let Self::Unknown(other) = &this {
                    log::debug!("unknown {} value {:?}", stringify!($enum_name), other);
                }
                ::std::result::Result::Ok(this)
            }
        }
    };
}
