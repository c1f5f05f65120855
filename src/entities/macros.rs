//! Macros for closed wire enumerations
//!
//! Statuses and payment methods travel as SCREAMING_SNAKE_CASE strings. The
//! [`closed_enum!`] macro generates the enum together with its wire names,
//! display labels and parsing, so that every consumption site matches
//! exhaustively on the variants.

/// Error returned when a wire name does not belong to a closed enumeration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{value}' is not a valid {kind}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// Generate a closed enumeration serialized by wire name
///
/// # Example
///
/// ```rust,ignore
/// closed_enum!(
///     /// Lifecycle of an order
///     OrderStatus, "order status" {
///         Pending => "PENDING", "Pending",
///         Shipped => "SHIPPED", "Shipped",
///     }
/// );
///
/// assert_eq!(OrderStatus::Pending.as_str(), "PENDING");
/// assert_eq!("SHIPPED".parse::<OrderStatus>()?, OrderStatus::Shipped);
/// ```
#[macro_export]
macro_rules! closed_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($variant:ident => $wire:literal, $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            ::serde::Serialize, ::serde::Deserialize,
        )]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Every wire name, in declaration order
            pub const NAMES: &'static [&'static str] = &[$($wire),+];

            /// Wire name of this variant
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }

            /// Human-readable label
            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::entities::macros::UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $($wire => Ok($name::$variant),)+
                    other => Err($crate::entities::macros::UnknownVariant {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}
