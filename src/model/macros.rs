/// Generate `ALL`, `as_str`, `Display`, `FromStr`, `From<T> for String`, and
/// `TryFrom<String> for T` for a closed enum (unknown strings return an error).
///
/// `ALL` lists the variants in declaration order; several lookups depend on
/// that order for tie-breaking, so declare variants in canonical order.
/// Add `#[serde(into = "String", try_from = "String")]` to the enum to get
/// Serialize/Deserialize through these impls.
macro_rules! string_enum {
    ($name:ident { $($variant:ident => $str:literal),+ $(,)? }) => {
        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $str,)+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($str => Ok($name::$variant),)+
                    other => Err(format!("unknown {}: {other}", stringify!($name))),
                }
            }
        }

        impl From<$name> for String {
            fn from(v: $name) -> Self {
                v.as_str().to_string()
            }
        }

        impl TryFrom<String> for $name {
            type Error = String;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                s.parse()
            }
        }
    };
}

/// Like [`string_enum!`] but for an open enum with a `Custom(String)` fallback.
///
/// Unknown strings map to `Custom(s)`; the empty string maps to `$empty`
/// (the enum's neutral variant) so absent upstream fields stay harmless.
macro_rules! string_enum_open {
    ($name:ident, $empty:ident, { $($variant:ident => $str:literal),+ $(,)? }) => {
        impl $name {
            pub fn as_str(&self) -> &str {
                match self {
                    $($name::$variant => $str,)+
                    $name::Custom(s) => s,
                }
            }

            pub fn parse_tag(s: &str) -> Self {
                match s {
                    $($str => $name::$variant,)+
                    "" => $name::$empty,
                    other => $name::Custom(other.to_string()),
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl From<$name> for String {
            fn from(v: $name) -> Self {
                match v {
                    $name::Custom(s) => s,
                    other => other.as_str().to_string(),
                }
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                $name::parse_tag(&s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                $name::parse_tag(s)
            }
        }
    };
}
