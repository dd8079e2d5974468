//! Catalog identity types
//!
//! Every catalog row carries a store-assigned integer id. Ids of different
//! entity kinds are distinct types so a `ModuleId` can never be passed where
//! a `PartId` is expected.

use rusqlite::types::{FromSql, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

macro_rules! catalog_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Raw integer value as stored in the catalog
            pub fn get(self) -> i64 {
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
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<i64>().map(Self)
            }
        }

        impl ToSql for $name {
            fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
                Ok(ToSqlOutput::from(self.0))
            }
        }

        impl FromSql for $name {
            fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
                i64::column_result(value).map(Self)
            }
        }
    };
}

catalog_id!(
    /// Identifier of a [`Category`](crate::entities::Category)
    CategoryId
);
catalog_id!(
    /// Identifier of a [`ConfigOption`](crate::entities::ConfigOption)
    OptionId
);
catalog_id!(
    /// Identifier of a [`Module`](crate::entities::Module)
    ModuleId
);
catalog_id!(
    /// Identifier of a [`Part`](crate::entities::Part)
    PartId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_parsing() {
        let id: ModuleId = "42".parse().unwrap();
        assert_eq!(id, ModuleId(42));
        assert_eq!(id.get(), 42);

        let padded: PartId = " 7 ".parse().unwrap();
        assert_eq!(padded, PartId(7));
    }

    #[test]
    fn test_id_parse_rejects_garbage() {
        assert!("abc".parse::<OptionId>().is_err());
        assert!("".parse::<OptionId>().is_err());
    }

    #[test]
    fn test_negative_ids_parse() {
        // Negative ids are representable; they just never resolve in a store.
        let id: OptionId = "-3".parse().unwrap();
        assert_eq!(id, OptionId(-3));
    }

    #[test]
    fn test_id_ordering_follows_integer() {
        let mut ids = vec![ModuleId(10), ModuleId(2), ModuleId(7)];
        ids.sort();
        assert_eq!(ids, vec![ModuleId(2), ModuleId(7), ModuleId(10)]);
    }

    #[test]
    fn test_id_serializes_transparently() {
        let json = serde_json::to_string(&CategoryId(5)).unwrap();
        assert_eq!(json, "5");
        let parsed: CategoryId = serde_json::from_str("5").unwrap();
        assert_eq!(parsed, CategoryId(5));
    }
}
