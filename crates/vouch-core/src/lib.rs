//! # vouch-core: Branded Types and Accumulating Decoders
//!
//! This crate is the foundation of the Vouch workspace. It turns untrusted
//! JSON-shaped input into strongly typed values, reporting *every* failure
//! found in one pass rather than stopping at the first. Every other crate
//! in the workspace depends on `vouch-core`; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Brands are distinct types.** A [`Branded<B>`] can only be obtained by
//!    running `B`'s predicate. An `EmailAddress` is not interchangeable with
//!    a `NonEmptyString50`, even though both wrap a `String`.
//!
//! 2. **Decoders accumulate.** [`DecodeErrors`] is never empty, and a record
//!    with three bad fields reports three failures, each carrying the path
//!    to the offending field.
//!
//! 3. **Undefined is not null.** A missing key is `None`; an explicit JSON
//!    `null` is `Some(Value::Null)`. [`optional`] treats both as absent,
//!    every other decoder rejects both.
//!
//! 4. **Records compose.** [`RecordSpec`] values merge into intersections,
//!    and a conflicting field declaration is a [`ConfigurationError`] at
//!    construction time, never a decode-time surprise.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `vouch-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests. A panicking brand predicate
//!   is contained and reported as [`ErrorKind::InvalidInput`].

pub mod brand;
pub mod brands;
pub mod decoder;
pub mod error;
pub mod input;
pub mod message;
pub mod optional;
pub mod record;
pub mod report;
pub mod tag;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use brand::{brand, Brand, BrandDecoder, Branded};
pub use brands::{Char, EmailAddress, NonEmptyString50, PositiveInt};
pub use decoder::{
    array, int, string, unknown, ArrayDecoder, BaseDecoder, BaseMismatch, BaseType, Decoder,
    DecoderExt, UnknownDecoder,
};
pub use error::{
    ConfigurationError, DecodeError, DecodeErrors, DecodeResult, ErrorKind, PathSegment,
    RecordAccessError, VouchError,
};
pub use input::{kind_of, RawInput};
pub use message::{with_message, WithMessage};
pub use optional::{optional, OptionalDecoder};
pub use record::{
    decode_record, FromRecord, Presence, Record, RecordDecoder, RecordSpec, UnknownKeys,
};
pub use report::{report, report_json, report_line, NO_ERRORS};
pub use tag::{tag, Tagged};
pub use temporal::{Timestamp, MAX_TIMESTAMP_MS, MIN_TIMESTAMP_MS};
