//! Helper macro for closed enumerations with a fixed wire spelling.
//!
//! Priorities, statuses, and roles are stored and transmitted as lowercase
//! strings. The macro keeps the variant list, the serde names, and the
//! [`std::str::FromStr`] table in one place so they cannot drift apart.

macro_rules! define_wire_enum {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $wire:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// Every accepted wire spelling, in declaration order.
            pub const VALUES: &'static [&'static str] = &[$($wire),+];

            /// Wire spelling of this value.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::domain::validation::ValidationFailure;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                let matched = $crate::domain::validation::validate_enum(value, Self::VALUES)?;
                match matched {
                    $($wire => Ok(Self::$variant),)+
                    other => Err($crate::domain::validation::ValidationFailure::NotAllowed {
                        value: other.to_owned(),
                    }),
                }
            }
        }
    };
}

pub(crate) use define_wire_enum;
