//! # vouch-user: The User Domain
//!
//! Builds the user schema on top of `vouch-core`: annotated field
//! decoders, the record shapes a user document is checked against, and
//! the tagged [`User`] union.
//!
//! ## Decoding (`schema`)
//!
//! [`UserSchema::decode_user`] routes a document on the presence of
//! `verifiedDate` and returns either a `VerifiedUser` or an
//! `UnverifiedUser`, or every failure found along the way.
//!
//! ## Documents (`document`)
//!
//! [`load_document`] reads JSON or YAML files into the JSON value model
//! the decoders consume.
//!
//! ## Crate Policy
//!
//! - Depends only on `vouch-core` internally.
//! - Field messages are user-facing text; change them deliberately.
//! - Specs are built at runtime by [`UserSchema::new`], which reports a
//!   misdeclared spec as a [`vouch_core::ConfigurationError`].

pub mod document;
pub mod fields;
pub mod records;
pub mod schema;
pub mod user;

pub use document::{load_document, parse_document, yaml_to_json_value, DocumentError, DocumentFormat};
pub use records::{UntaggedUnverifiedUser, UntaggedVerifiedUser, UserLike, UserLikePartiallyValid};
pub use schema::UserSchema;
pub use user::{User, UserFields, UNVERIFIED_USER, VERIFIED_USER};
