//! # User Field Decoders
//!
//! One annotated decoder per user attribute. Each wraps a standard brand
//! with a message written for the person filling in the form, echoing the
//! raw value they supplied.
//!
//! | Field               | Decoder                    |
//! |---------------------|----------------------------|
//! | `firstName`         | `NonEmptyString50`         |
//! | `lastName`          | `NonEmptyString50`         |
//! | `emailAddress`      | `EmailAddress`             |
//! | `middleNameInitial` | optional `Char`            |
//! | `remainingReadings` | `PositiveInt`              |
//! | `verifiedDate`      | `Timestamp`                |

use vouch_core::{
    brand, Branded, Char, Decoder, DecoderExt, EmailAddress, NonEmptyString50, PositiveInt,
    Timestamp,
};

/// Input key for the first name.
pub const FIRST_NAME: &str = "firstName";
/// Input key for the last name.
pub const LAST_NAME: &str = "lastName";
/// Input key for the email address.
pub const EMAIL_ADDRESS: &str = "emailAddress";
/// Input key for the middle name initial.
pub const MIDDLE_NAME_INITIAL: &str = "middleNameInitial";
/// Input key for the remaining meter readings of an unverified user.
pub const REMAINING_READINGS: &str = "remainingReadings";
/// Input key for the verification instant of a verified user.
pub const VERIFIED_DATE: &str = "verifiedDate";

pub fn first_name() -> impl Decoder<Output = Branded<NonEmptyString50>> + Clone {
    brand::<NonEmptyString50>()
        .with_message(|input| format!("First name value must be a string(length 1 ~ 50). Got {input}"))
}

pub fn last_name() -> impl Decoder<Output = Branded<NonEmptyString50>> + Clone {
    brand::<NonEmptyString50>()
        .with_message(|input| format!("Last name value must be a string(length 1 ~ 50). Got {input}"))
}

pub fn email_address() -> impl Decoder<Output = Branded<EmailAddress>> + Clone {
    brand::<EmailAddress>().with_message(|input| {
        format!("Email Address value must be a valid email address, got: {input}.")
    })
}

/// Missing and `null` are accepted as no initial.
pub fn middle_name_initial() -> impl Decoder<Output = Option<Branded<Char>>> + Clone {
    brand::<Char>().optional().with_message(|input| {
        format!("Middle name initial value must be a single character, got: {input}.")
    })
}

pub fn remaining_readings() -> impl Decoder<Output = Branded<PositiveInt>> + Clone {
    brand::<PositiveInt>().with_message(|input| {
        format!("Remaining readings value must be a positive integer, got: {input}")
    })
}

pub fn verified_date() -> impl Decoder<Output = Branded<Timestamp>> + Clone {
    brand::<Timestamp>().with_message(|input| {
        format!(
            "Timestamp value must be a valid timestamp \
             (integer between -8640000000000000 and 8640000000000000), got: {input}"
        )
    })
}
