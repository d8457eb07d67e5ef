//! # Tagged Users
//!
//! A [`User`] is one of two record shapes plus a `type` discriminant. The
//! discriminant is never decoded from input: the constructor the caller
//! picks decides it.

use serde::{Deserialize, Serialize};
use vouch_core::{tag, Tagged};

use crate::records::{UntaggedUnverifiedUser, UntaggedVerifiedUser, UserLikePartiallyValid};

/// Discriminant of a verified user.
pub const VERIFIED_USER: &str = "VerifiedUser";
/// Discriminant of an unverified user.
pub const UNVERIFIED_USER: &str = "UnverifiedUser";

/// A validated user, serialized with an internal `"type"` tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum User {
    VerifiedUser(UntaggedVerifiedUser),
    UnverifiedUser(UntaggedUnverifiedUser),
}

/// Borrowed view of a user's fields without the discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum UserFields<'a> {
    Verified(&'a UntaggedVerifiedUser),
    Unverified(&'a UntaggedUnverifiedUser),
}

impl User {
    /// Tag a decoded verified record.
    pub fn verified(fields: UntaggedVerifiedUser) -> Self {
        Self::VerifiedUser(fields)
    }

    /// Tag a decoded unverified record.
    pub fn unverified(fields: UntaggedUnverifiedUser) -> Self {
        Self::UnverifiedUser(fields)
    }

    /// The `type` discriminant.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::VerifiedUser(_) => VERIFIED_USER,
            Self::UnverifiedUser(_) => UNVERIFIED_USER,
        }
    }

    pub fn is_verified(&self) -> bool {
        matches!(self, Self::VerifiedUser(_))
    }

    /// Identity fields shared by both variants.
    pub fn identity(&self) -> &UserLikePartiallyValid {
        match self {
            Self::VerifiedUser(user) => &user.identity,
            Self::UnverifiedUser(user) => &user.identity,
        }
    }

    /// The user as a generic [`Tagged`] record.
    pub fn tagged(&self) -> Tagged<UserFields<'_>> {
        let fields = match self {
            Self::VerifiedUser(user) => UserFields::Verified(user),
            Self::UnverifiedUser(user) => UserFields::Unverified(user),
        };
        tag(self.kind(), fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use vouch_core::Branded;

    fn identity() -> UserLikePartiallyValid {
        UserLikePartiallyValid {
            first_name: Branded::new("Ada".to_string()).unwrap(),
            last_name: Branded::new("Lovelace".to_string()).unwrap(),
            email_address: Branded::new("ada@example.com".to_string()).unwrap(),
            middle_name_initial: None,
        }
    }

    fn verified() -> User {
        User::verified(UntaggedVerifiedUser {
            identity: identity(),
            verified_date: Branded::new(0).unwrap(),
        })
    }

    #[test]
    fn constructors_set_kind() {
        assert_eq!(verified().kind(), "VerifiedUser");
        let unverified = User::unverified(UntaggedUnverifiedUser {
            identity: identity(),
            remaining_readings: Branded::new(3).unwrap(),
        });
        assert_eq!(unverified.kind(), "UnverifiedUser");
        assert!(!unverified.is_verified());
        assert_eq!(unverified.identity(), &identity());
    }

    #[test]
    fn serializes_with_type_field() {
        assert_eq!(
            serde_json::to_value(verified()).unwrap(),
            json!({
                "type": "VerifiedUser",
                "firstName": "Ada",
                "lastName": "Lovelace",
                "emailAddress": "ada@example.com",
                "verifiedDate": 0
            })
        );
    }

    #[test]
    fn tagged_view_matches_enum_serialization() {
        let user = verified();
        let tagged = user.tagged();
        assert_eq!(tagged.kind(), "VerifiedUser");
        assert_eq!(
            serde_json::to_value(&tagged).unwrap(),
            serde_json::to_value(&user).unwrap()
        );
    }

    #[test]
    fn deserializes_by_type_field() {
        let user: User = serde_json::from_value(json!({
            "type": "UnverifiedUser",
            "firstName": "Ada",
            "lastName": "Lovelace",
            "emailAddress": "ada@example.com",
            "remainingReadings": 7
        }))
        .unwrap();
        assert_eq!(user.kind(), "UnverifiedUser");
    }
}
