//! Strongly-typed ID newtypes for domain entities.
//!
//! Users and courses are both keyed by UUIDs. Wrapping them keeps a course id
//! from being passed where a user id is expected, which matters most in the
//! ownership and rating checks where both appear side by side.

use serde::{Deserialize, Serialize};
use sqlx::{
    Database, Decode, Encode, Type,
    postgres::{PgHasArrayType, PgTypeInfo},
};
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

/// Generates a `Uuid` newtype with the sqlx, serde and utoipa impls the
/// persistence and HTTP layers need.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
        #[schema(value_type = String, format = "uuid")]
        pub struct $name(pub Uuid);

        impl $name {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            #[inline]
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }

        impl Type<sqlx::Postgres> for $name {
            fn type_info() -> PgTypeInfo {
                <Uuid as Type<sqlx::Postgres>>::type_info()
            }

            fn compatible(ty: &PgTypeInfo) -> bool {
                <Uuid as Type<sqlx::Postgres>>::compatible(ty)
            }
        }

        impl<'q> Encode<'q, sqlx::Postgres> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut <sqlx::Postgres as Database>::ArgumentBuffer<'q>,
            ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
                <Uuid as Encode<'q, sqlx::Postgres>>::encode_by_ref(&self.0, buf)
            }
        }

        impl<'r> Decode<'r, sqlx::Postgres> for $name {
            fn decode(
                value: <sqlx::Postgres as Database>::ValueRef<'r>,
            ) -> Result<Self, sqlx::error::BoxDynError> {
                <Uuid as Decode<'r, sqlx::Postgres>>::decode(value).map(Self)
            }
        }

        // course_ids is a uuid[] column
        impl PgHasArrayType for $name {
            fn array_type_info() -> PgTypeInfo {
                <Uuid as PgHasArrayType>::array_type_info()
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                Uuid::deserialize(deserializer).map(Self)
            }
        }
    };
}

define_id!(
    /// Identifies a registered user, professor or student.
    UserId
);

define_id!(
    /// Identifies a course document.
    CourseId
);

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "5f0c5a6e-8d1b-4b4e-9a51-1f7d0f3b2c10";

    #[test]
    fn test_new_ids_are_distinct() {
        let a = CourseId::new();
        let b = CourseId::new();
        assert_ne!(a, b);
        assert!(!a.into_inner().is_nil());
    }

    #[test]
    fn test_debug_names_the_type() {
        let id: UserId = SAMPLE.parse().unwrap();
        assert_eq!(format!("{:?}", id), format!("UserId({})", SAMPLE));
        assert_eq!(id.to_string(), SAMPLE);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("not-an-id".parse::<CourseId>().is_err());
        assert!("".parse::<UserId>().is_err());
    }

    #[test]
    fn test_serde_is_transparent() {
        let id: CourseId = SAMPLE.parse().unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", SAMPLE));

        let back: CourseId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_deserialize_rejects_non_uuid() {
        assert!(serde_json::from_str::<UserId>("\"abc\"").is_err());
        assert!(serde_json::from_str::<UserId>("42").is_err());
    }

    #[test]
    fn test_uuid_round_trips_through_id() {
        let uuid = Uuid::new_v4();
        assert_eq!(UserId::from(uuid).into_inner(), uuid);
        assert_eq!(UserId::from(uuid), UserId(uuid));
    }
}
