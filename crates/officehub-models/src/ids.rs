//! Document-style identifiers.
//!
//! An [`ObjectId`] is 12 bytes rendered as 24 lowercase hex characters:
//! a 4-byte big-endian Unix timestamp, 5 random bytes and a 3-byte counter.
//! Ids sort roughly by creation time and are stored as `TEXT`.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicU32, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, de::Error as _};
use utoipa::ToSchema;

pub const OBJECT_ID_LEN: usize = 24;

static COUNTER: LazyLock<AtomicU32> = LazyLock::new(|| AtomicU32::new(rand::random::<u32>()));

#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, sqlx::Type, ToSchema)]
#[sqlx(transparent)]
#[schema(value_type = String, example = "65f1c0ffee0000000000abcd")]
pub struct ObjectId(String);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidObjectId(pub String);

impl fmt::Display for InvalidObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}` is not a 24-character hexadecimal id", self.0)
    }
}

impl std::error::Error for InvalidObjectId {}

/// True for exactly 24 ASCII hex digits.
pub fn is_object_id(value: &str) -> bool {
    value.len() == OBJECT_ID_LEN && value.bytes().all(|b| b.is_ascii_hexdigit())
}

impl ObjectId {
    pub fn new() -> Self {
        let seconds = Utc::now().timestamp().clamp(0, u32::MAX as i64) as u32;
        let random: [u8; 5] = rand::random();
        let count = COUNTER.fetch_add(1, Ordering::Relaxed);

        let mut bytes = [0u8; 12];
        bytes[..4].copy_from_slice(&seconds.to_be_bytes());
        bytes[4..9].copy_from_slice(&random);
        bytes[9..].copy_from_slice(&count.to_be_bytes()[1..]);

        Self(hex::encode(bytes))
    }

    /// Parses a 24-hex string, normalizing to lowercase.
    pub fn parse(value: &str) -> Result<Self, InvalidObjectId> {
        let trimmed = value.trim();
        if is_object_id(trimmed) {
            Ok(Self(trimmed.to_ascii_lowercase()))
        } else {
            Err(InvalidObjectId(value.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Creation second embedded in the first four bytes.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        let seconds = u32::from_str_radix(&self.0[..8], 16).ok()?;
        DateTime::<Utc>::from_timestamp(seconds as i64, 0)
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", self.0)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ObjectId {
    type Err = InvalidObjectId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(|_| D::Error::custom("must be a 24-character hexadecimal id"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_text_in_postgres() {
        use sqlx::postgres::{PgHasArrayType, Postgres};
        use sqlx::Type;

        assert_eq!(
            <ObjectId as Type<Postgres>>::type_info(),
            <String as Type<Postgres>>::type_info()
        );
        assert_eq!(
            <ObjectId as PgHasArrayType>::array_type_info(),
            <String as PgHasArrayType>::array_type_info()
        );
    }

    #[test]
    fn test_new_ids_are_valid_and_unique() {
        let ids: HashSet<ObjectId> = (0..1000).map(|_| ObjectId::new()).collect();
        assert_eq!(ids.len(), 1000);
        for id in &ids {
            assert!(is_object_id(id.as_str()));
            assert_eq!(id.as_str(), id.as_str().to_ascii_lowercase());
        }
    }

    #[test]
    fn test_timestamp_prefix() {
        let before = Utc::now().timestamp();
        let id = ObjectId::new();
        let ts = id.timestamp().unwrap().timestamp();
        assert!(ts >= before - 1 && ts <= Utc::now().timestamp());
    }

    #[test]
    fn test_parse() {
        let id = ObjectId::parse("65F1C0FFEE0000000000ABCD").unwrap();
        assert_eq!(id.as_str(), "65f1c0ffee0000000000abcd");

        assert!(ObjectId::parse("65f1c0ffee0000000000abc").is_err());
        assert!(ObjectId::parse("65f1c0ffee0000000000abcde").is_err());
        assert!(ObjectId::parse("65f1c0ffee0000000000abcg").is_err());
        assert!(ObjectId::parse("").is_err());
    }

    #[test]
    fn test_serde() {
        let id: ObjectId = serde_json::from_str(r#""65f1c0ffee0000000000abcd""#).unwrap();
        assert_eq!(
            serde_json::to_string(&id).unwrap(),
            r#""65f1c0ffee0000000000abcd""#
        );

        let err = serde_json::from_str::<ObjectId>(r#""42""#).unwrap_err();
        assert!(err.to_string().contains("24-character"));
    }
}
