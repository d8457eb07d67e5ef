//! # User Schema
//!
//! [`UserSchema`] holds the compiled record decoders for every user shape
//! and routes a document to the right variant.
//!
//! ## Routing
//!
//! 1. Decode the input as `UserLike`. This only fails for non-objects.
//! 2. A present `verifiedDate` selects `UntaggedVerifiedUser`, tagged
//!    `VerifiedUser`. Anything else selects `UntaggedUnverifiedUser`,
//!    tagged `UnverifiedUser`.
//! 3. The selected shape is decoded exactly; every failure is returned.
//!
//! `UserLike` treats a `null` optional field as absent, so
//! `"verifiedDate": null` routes to the unverified shape. That shape is
//! exact, and the document is then rejected with
//! `unexpected key: verifiedDate` rather than a timestamp message.

use serde_json::Value;
use vouch_core::{ConfigurationError, DecodeResult, Decoder, RecordDecoder, VouchError};

use crate::records::{
    partially_valid_spec, unverified_spec, user_like_spec, verified_spec, UntaggedUnverifiedUser,
    UntaggedVerifiedUser, UserLike, UserLikePartiallyValid,
};
use crate::user::User;

/// Compiled decoders for all user record shapes.
///
/// Build once with [`UserSchema::new`] and share; decoding never mutates
/// the schema.
#[derive(Debug, Clone)]
pub struct UserSchema {
    user_like: RecordDecoder<UserLike>,
    partially_valid: RecordDecoder<UserLikePartiallyValid>,
    unverified: RecordDecoder<UntaggedUnverifiedUser>,
    verified: RecordDecoder<UntaggedVerifiedUser>,
}

impl UserSchema {
    /// Build every user spec.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] if two merged specs declare the same
    /// field.
    pub fn new() -> Result<Self, ConfigurationError> {
        Ok(Self {
            user_like: RecordDecoder::new(user_like_spec()?),
            partially_valid: RecordDecoder::new(partially_valid_spec()?),
            unverified: RecordDecoder::new(unverified_spec()?),
            verified: RecordDecoder::new(verified_spec()?),
        })
    }

    pub fn user_like(&self) -> &RecordDecoder<UserLike> {
        &self.user_like
    }

    pub fn partially_valid(&self) -> &RecordDecoder<UserLikePartiallyValid> {
        &self.partially_valid
    }

    pub fn unverified(&self) -> &RecordDecoder<UntaggedUnverifiedUser> {
        &self.unverified
    }

    pub fn verified(&self) -> &RecordDecoder<UntaggedVerifiedUser> {
        &self.verified
    }

    /// Decode and tag a user document. See the module docs for routing.
    pub fn decode_user(&self, input: &Value) -> DecodeResult<User> {
        self.route(Some(input))
    }

    /// Parse `json` and decode it as a user.
    ///
    /// # Errors
    ///
    /// [`VouchError::Json`] if `json` is not JSON, [`VouchError::Decode`]
    /// with every failure otherwise.
    pub fn decode_user_str(&self, json: &str) -> Result<User, VouchError> {
        let value: Value = serde_json::from_str(json)?;
        Ok(self.decode_user(&value)?)
    }

    fn route(&self, input: Option<&Value>) -> DecodeResult<User> {
        let like = self.user_like.validate(input)?;
        if like.is_verified() {
            tracing::debug!("routing user to verified shape");
            self.verified.validate(input).map(User::verified)
        } else {
            tracing::debug!("routing user to unverified shape");
            self.unverified.validate(input).map(User::unverified)
        }
    }
}

impl Decoder for UserSchema {
    type Output = User;

    fn name(&self) -> String {
        "User".to_string()
    }

    fn validate(&self, input: Option<&Value>) -> DecodeResult<User> {
        self.route(input)
    }
}
