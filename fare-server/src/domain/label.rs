//! Free-text identifiers taken verbatim from fare tables.
//!
//! Payment means, ticket types, passenger categories and bus routes are
//! opaque labels defined by the data. They are matched exactly and only
//! rejected when empty.

use std::fmt;

/// Error returned when a label is empty.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind}: must not be empty")]
pub struct InvalidLabel {
    kind: &'static str,
}

macro_rules! label_type {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(String);

        impl $name {
            #[doc = concat!("Parse a ", $kind, ". Only the empty string is rejected.")]
            pub fn parse(s: &str) -> Result<Self, InvalidLabel> {
                if s.is_empty() {
                    return Err(InvalidLabel { kind: $kind });
                }
                Ok($name(s.to_string()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({:?})"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

label_type!(
    /// How a fare is paid, e.g. `Leap` or `Cash`. Each payment means has
    /// its own price schedule.
    PaymentMeans,
    "payment means"
);

label_type!(
    /// A ticket product, e.g. `Adult Single` or `Annual`.
    TicketType,
    "ticket type"
);

label_type!(
    /// A coarse rider class (`Adult`, `Young Adult`, `Child`) that maps to
    /// a set of eligible ticket types.
    PassengerCategory,
    "passenger category"
);

label_type!(
    /// A bus route serving an OD pair.
    RouteId,
    "route"
);
