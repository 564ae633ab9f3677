use serde::{de::DeserializeOwned, Serialize};
use std::hash::Hash;

/// Identifier of an aggregate.
///
/// Every aggregate in this system is keyed by an integer assigned by the
/// database, wrapped in its own newtype so ids of different tables cannot be
/// mixed up.
pub trait AggregateId:
    Clone + Copy + PartialEq + Eq + Hash + Serialize + DeserializeOwned + std::fmt::Debug
{
    /// Raw database value
    fn value(&self) -> i32;

    fn as_string(&self) -> String {
        self.value().to_string()
    }

    fn from_string(s: &str) -> Result<Self, String>;
}

/// Declares an integer id newtype and its [`AggregateId`] impl.
#[macro_export]
macro_rules! aggregate_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i32);

        impl $name {
            pub fn new(value: i32) -> Self {
                Self(value)
            }

            /// Placeholder id of an aggregate that was not stored yet
            pub fn unsaved() -> Self {
                Self(0)
            }

            pub fn is_unsaved(&self) -> bool {
                self.0 == 0
            }
        }

        impl $crate::domain::common::AggregateId for $name {
            fn value(&self) -> i32 {
                self.0
            }

            fn from_string(s: &str) -> Result<Self, String> {
                s.trim()
                    .parse::<i32>()
                    .map($name)
                    .map_err(|e| format!("Invalid id '{}': {}", s, e))
            }
        }

        impl From<i32> for $name {
            fn from(value: i32) -> Self {
                Self(value)
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::AggregateId;

    crate::aggregate_id!(SampleId);

    #[test]
    fn parses_and_prints_ids() {
        let id = SampleId::from_string(" 42 ").unwrap();
        assert_eq!(id, SampleId(42));
        assert_eq!(id.as_string(), "42");
        assert!(SampleId::from_string("abc").is_err());
        assert!(SampleId::unsaved().is_unsaved());
    }

    #[test]
    fn serializes_as_plain_number() {
        let json = serde_json::to_string(&SampleId(7)).unwrap();
        assert_eq!(json, "7");
    }
}
