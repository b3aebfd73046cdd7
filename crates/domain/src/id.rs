//! Typed identifier newtypes backed by store-generated integers.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[doc = $doc:expr])* $name:ident) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw store identifier.
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Access the raw store identifier.
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse().map(Self)
            }
        }
    };
}

define_id!(
    /// Unique identifier for a [`Student`](crate::student::Student).
    StudentId
);

define_id!(
    /// Unique identifier for a [`Department`](crate::department::Department).
    DepartmentId
);

define_id!(
    /// Unique identifier for a [`Team`](crate::team::Team).
    TeamId
);

define_id!(
    /// Unique identifier for a [`Contract`](crate::contract::Contract).
    ContractId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_roundtrip_through_display_and_from_str() {
        let id = StudentId::new(42);
        let parsed: StudentId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn should_serialize_as_plain_integer() {
        let json = serde_json::to_string(&TeamId::new(20)).unwrap();
        assert_eq!(json, "20");
        let parsed: TeamId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.get(), 20);
    }

    #[test]
    fn should_return_error_when_parsing_non_numeric_id() {
        assert!(ContractId::from_str("ten").is_err());
    }

    #[test]
    fn should_order_ids_numerically() {
        assert!(DepartmentId::from(2) < DepartmentId::from(10));
    }
}
