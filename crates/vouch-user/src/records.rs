//! # User Record Shapes
//!
//! The four record specs a user document passes through, and the typed
//! structs they build.
//!
//! - `UserLike`: loose shape used for routing. Requires nothing but an
//!   object; the three identity keys are declared, the three optional keys
//!   are partial, and any other key is ignored.
//! - `UserLikePartiallyValid`: exact record of the validated identity
//!   fields shared by both user variants.
//! - `UntaggedUnverifiedUser`: identity plus `remainingReadings`.
//! - `UntaggedVerifiedUser`: identity plus `verifiedDate`.
//!
//! The two untagged shapes are distinct types even though they share the
//! identity fields.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use vouch_core::{
    unknown, Branded, Char, ConfigurationError, EmailAddress, FromRecord, NonEmptyString50,
    PositiveInt, Record, RecordAccessError, RecordSpec, Timestamp,
};

use crate::fields::{
    self, EMAIL_ADDRESS, FIRST_NAME, LAST_NAME, MIDDLE_NAME_INITIAL, REMAINING_READINGS,
    VERIFIED_DATE,
};

/// An object with any subset of the user keys, none of them validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserLike {
    pub first_name: Option<Value>,
    pub last_name: Option<Value>,
    pub email_address: Option<Value>,
    pub middle_name_initial: Option<Value>,
    pub verified_date: Option<Value>,
    pub remaining_readings: Option<Value>,
}

impl UserLike {
    /// Whether the input carries a verification date, which routes it to
    /// the verified variant.
    pub fn is_verified(&self) -> bool {
        self.verified_date.is_some()
    }
}

/// The validated identity fields common to every user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserLikePartiallyValid {
    pub first_name: Branded<NonEmptyString50>,
    pub last_name: Branded<NonEmptyString50>,
    pub email_address: Branded<EmailAddress>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name_initial: Option<Branded<Char>>,
}

/// A user still consuming free meter readings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UntaggedUnverifiedUser {
    #[serde(flatten)]
    pub identity: UserLikePartiallyValid,
    pub remaining_readings: Branded<PositiveInt>,
}

/// A user whose identity was verified at `verified_date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UntaggedVerifiedUser {
    #[serde(flatten)]
    pub identity: UserLikePartiallyValid,
    pub verified_date: Branded<Timestamp>,
}

/// `UserLike`: identity keys declared, optional keys partial, others ignored.
pub fn user_like_spec() -> Result<RecordSpec, ConfigurationError> {
    let required = RecordSpec::open("UserLikeRequired")
        .field(FIRST_NAME, unknown())?
        .field(LAST_NAME, unknown())?
        .field(EMAIL_ADDRESS, unknown())?;
    let optional = RecordSpec::partial("UserLikeOptional")
        .field(MIDDLE_NAME_INITIAL, unknown())?
        .field(VERIFIED_DATE, unknown())?
        .field(REMAINING_READINGS, unknown())?;
    required.merge(&optional, "UserLike")
}

/// `UserLikePartiallyValid`: the four identity fields, nothing else.
pub fn partially_valid_spec() -> Result<RecordSpec, ConfigurationError> {
    RecordSpec::exact("UserLikePartiallyValid")
        .field(FIRST_NAME, fields::first_name())?
        .field(LAST_NAME, fields::last_name())?
        .field(EMAIL_ADDRESS, fields::email_address())?
        .field(MIDDLE_NAME_INITIAL, fields::middle_name_initial())
}

/// `UntaggedUnverifiedUser`: identity plus remaining readings.
pub fn unverified_spec() -> Result<RecordSpec, ConfigurationError> {
    let readings =
        RecordSpec::exact("RemainingReadings").field(REMAINING_READINGS, fields::remaining_readings())?;
    partially_valid_spec()?.merge(&readings, "UntaggedUnverifiedUser")
}

/// `UntaggedVerifiedUser`: identity plus verification date.
pub fn verified_spec() -> Result<RecordSpec, ConfigurationError> {
    let date = RecordSpec::exact("VerifiedDate").field(VERIFIED_DATE, fields::verified_date())?;
    partially_valid_spec()?.merge(&date, "UntaggedVerifiedUser")
}

fn take_raw(record: &mut Record, field: &str) -> Result<Option<Value>, RecordAccessError> {
    Ok(record.take_optional::<Option<Value>>(field)?.flatten())
}

impl FromRecord for UserLike {
    fn from_record(mut record: Record) -> Result<Self, RecordAccessError> {
        Ok(Self {
            first_name: take_raw(&mut record, FIRST_NAME)?,
            last_name: take_raw(&mut record, LAST_NAME)?,
            email_address: take_raw(&mut record, EMAIL_ADDRESS)?,
            middle_name_initial: take_raw(&mut record, MIDDLE_NAME_INITIAL)?,
            verified_date: take_raw(&mut record, VERIFIED_DATE)?,
            remaining_readings: take_raw(&mut record, REMAINING_READINGS)?,
        })
    }
}

impl UserLikePartiallyValid {
    fn take_from(record: &mut Record) -> Result<Self, RecordAccessError> {
        Ok(Self {
            first_name: record.take(FIRST_NAME)?,
            last_name: record.take(LAST_NAME)?,
            email_address: record.take(EMAIL_ADDRESS)?,
            middle_name_initial: record.take(MIDDLE_NAME_INITIAL)?,
        })
    }
}

impl FromRecord for UserLikePartiallyValid {
    fn from_record(mut record: Record) -> Result<Self, RecordAccessError> {
        Self::take_from(&mut record)
    }
}

impl FromRecord for UntaggedUnverifiedUser {
    fn from_record(mut record: Record) -> Result<Self, RecordAccessError> {
        Ok(Self {
            identity: UserLikePartiallyValid::take_from(&mut record)?,
            remaining_readings: record.take(REMAINING_READINGS)?,
        })
    }
}

impl FromRecord for UntaggedVerifiedUser {
    fn from_record(mut record: Record) -> Result<Self, RecordAccessError> {
        Ok(Self {
            identity: UserLikePartiallyValid::take_from(&mut record)?,
            verified_date: record.take(VERIFIED_DATE)?,
        })
    }
}
