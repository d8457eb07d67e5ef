//! # Brands: Predicate-Refined Base Types
//!
//! A brand names a subtype of a base kind: a base type plus a pure
//! predicate. [`Branded<B>`] holds a value that satisfied `B`'s predicate
//! when it was built; the inner field is private and there is no unchecked
//! constructor, so the invariant holds for the value's whole lifetime.
//!
//! ## Construction
//!
//! - [`Branded::new()`]: from an already-typed base value.
//! - [`Branded::decoder()`] / [`brand()`]: from untyped input, running the
//!   base-shape check first and the predicate second.
//! - `Deserialize`: reads a JSON value and runs the brand's decoder, so
//!   invalid values are rejected at deserialization time.
//!
//! Declare a brand with [`define_brand!`](crate::define_brand).

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::ops::Deref;
use std::panic::{catch_unwind, AssertUnwindSafe};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::decoder::{base_value, BaseMismatch, BaseType, Decoder};
use crate::error::{DecodeError, DecodeResult};

/// A named refinement of a base type.
///
/// Implementors are zero-sized tag types. `predicate` must be pure and
/// total; if it panics anyway, decoding reports
/// [`ErrorKind::InvalidInput`](crate::ErrorKind::InvalidInput) for the
/// value instead of unwinding into the caller.
pub trait Brand: Send + Sync + 'static {
    /// The base kind being refined.
    type Base: BaseType;

    /// Diagnostic name. Should be unique among the brands in use.
    const NAME: &'static str;

    /// Whether `value` belongs to the branded subtype.
    fn predicate(value: &Self::Base) -> bool;
}

/// Declare a brand tag type.
///
/// ```
/// use vouch_core::{define_brand, Branded};
///
/// define_brand! {
///     /// Even integers.
///     pub Even: i64 = |n| n % 2 == 0
/// }
///
/// assert!(Branded::<Even>::new(4).is_ok());
/// assert!(Branded::<Even>::new(3).is_err());
/// ```
#[macro_export]
macro_rules! define_brand {
    ($(#[$meta:meta])* $vis:vis $name:ident : $base:ty = |$arg:ident| $predicate:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis struct $name;

        impl $crate::Brand for $name {
            type Base = $base;
            const NAME: &'static str = stringify!($name);

            fn predicate($arg: &$base) -> bool {
                $predicate
            }
        }
    };
}

/// A base value proven to satisfy brand `B`.
pub struct Branded<B: Brand> {
    value: B::Base,
    _brand: PhantomData<fn() -> B>,
}

impl<B: Brand> Branded<B> {
    /// Validate a typed base value against `B`'s predicate.
    ///
    /// # Errors
    ///
    /// Returns a single [`ErrorKind::PredicateFailure`](crate::ErrorKind::PredicateFailure)
    /// (or `InvalidInput` if the predicate panics).
    pub fn new(value: B::Base) -> DecodeResult<Self> {
        let raw = value.to_value();
        refine(value, Some(&raw))
    }

    /// Decoder producing this brand from untyped input.
    pub fn decoder() -> BrandDecoder<B> {
        BrandDecoder {
            _brand: PhantomData,
        }
    }

    /// Access the underlying base value.
    pub fn get(&self) -> &B::Base {
        &self.value
    }

    /// Consume the brand, returning the base value.
    pub fn into_inner(self) -> B::Base {
        self.value
    }

    /// The brand's diagnostic name.
    pub fn brand_name(&self) -> &'static str {
        B::NAME
    }
}

/// Decoder producing [`Branded<B>`].
pub fn brand<B: Brand>() -> BrandDecoder<B> {
    Branded::<B>::decoder()
}

/// Apply `B`'s predicate to an already shape-checked value.
fn refine<B: Brand>(value: B::Base, input: Option<&Value>) -> DecodeResult<Branded<B>> {
    match catch_unwind(AssertUnwindSafe(|| B::predicate(&value))) {
        Ok(true) => Ok(Branded {
            value,
            _brand: PhantomData,
        }),
        Ok(false) => Err(DecodeError::predicate_failure(B::NAME, input).into()),
        Err(_) => {
            tracing::warn!(brand = B::NAME, "brand predicate panicked; reporting invalid input");
            Err(DecodeError::invalid_input(B::NAME, input, "predicate faulted").into())
        }
    }
}

/// Decoder for a brand: base-shape check, then predicate.
pub struct BrandDecoder<B> {
    _brand: PhantomData<fn() -> B>,
}

impl<B> Clone for BrandDecoder<B> {
    fn clone(&self) -> Self {
        Self {
            _brand: PhantomData,
        }
    }
}

impl<B> Copy for BrandDecoder<B> {}

impl<B: Brand> fmt::Debug for BrandDecoder<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BrandDecoder").field(&B::NAME).finish()
    }
}

impl<B: Brand> Decoder for BrandDecoder<B> {
    type Output = Branded<B>;

    fn name(&self) -> String {
        B::NAME.to_string()
    }

    fn validate(&self, input: Option<&Value>) -> DecodeResult<Branded<B>> {
        match base_value::<B::Base>(input) {
            Ok(base) => refine(base, input),
            // Of the right kind but outside what the base can hold, so
            // the predicate cannot have accepted it.
            Err(BaseMismatch::Range) => Err(DecodeError::predicate_failure(B::NAME, input).into()),
            Err(BaseMismatch::Kind) => {
                Err(DecodeError::shape_mismatch(B::NAME, B::Base::KIND, input).into())
            }
        }
    }
}

impl<B: Brand> Clone for Branded<B> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            _brand: PhantomData,
        }
    }
}

impl<B: Brand> fmt::Debug for Branded<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Branded")
            .field("brand", &B::NAME)
            .field("value", &self.value)
            .finish()
    }
}

impl<B: Brand> fmt::Display for Branded<B>
where
    B::Base: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}

impl<B: Brand> PartialEq for Branded<B>
where
    B::Base: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<B: Brand> Eq for Branded<B> where B::Base: Eq {}

impl<B: Brand> PartialOrd for Branded<B>
where
    B::Base: PartialOrd,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.value.partial_cmp(&other.value)
    }
}

impl<B: Brand> Ord for Branded<B>
where
    B::Base: Ord,
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl<B: Brand> Hash for Branded<B>
where
    B::Base: Hash,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<B: Brand> Deref for Branded<B> {
    type Target = B::Base;

    fn deref(&self) -> &B::Base {
        &self.value
    }
}

impl<B: Brand> AsRef<B::Base> for Branded<B> {
    fn as_ref(&self) -> &B::Base {
        &self.value
    }
}

impl<B: Brand> Serialize for Branded<B> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value.to_value().serialize(serializer)
    }
}

impl<'de, B: Brand> Deserialize<'de> for Branded<B> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        Self::decoder().decode(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    define_brand! {
        /// Short strings, for tests.
        Short: String = |s| s.chars().count() <= 3
    }

    define_brand! {
        Fragile: i64 = |n| {
            assert!(*n != 13, "unlucky");
            *n > 0
        }
    }

    #[test]
    fn name_comes_from_tag_type() {
        assert_eq!(Short::NAME, "Short");
        assert_eq!(brand::<Short>().name(), "Short");
    }

    #[test]
    fn decode_runs_shape_then_predicate() {
        let ok = brand::<Short>().decode(&json!("abc")).unwrap();
        assert_eq!(ok.get(), "abc");

        let shape = brand::<Short>().decode(&json!(1)).unwrap_err();
        assert_eq!(shape.errors()[0].kind(), ErrorKind::ShapeMismatch);

        let predicate = brand::<Short>().decode(&json!("abcd")).unwrap_err();
        assert_eq!(predicate.errors()[0].kind(), ErrorKind::PredicateFailure);
        assert_eq!(predicate.errors()[0].message(), "Invalid value for Short: abcd");
        assert!(predicate.errors()[0].path().is_empty());
    }

    #[test]
    fn new_validates_typed_input() {
        assert!(Branded::<Short>::new("ab".to_string()).is_ok());
        let err = Branded::<Short>::new("abcd".to_string()).unwrap_err();
        assert_eq!(err.errors()[0].actual(), r#""abcd""#);
    }

    #[test]
    fn panicking_predicate_reports_invalid_input() {
        let errors = brand::<Fragile>().decode(&json!(13)).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.errors()[0].kind(), ErrorKind::InvalidInput);
        assert!(brand::<Fragile>().decode(&json!(14)).is_ok());
    }

    #[test]
    fn serde_roundtrip_validates() {
        let value = Branded::<Short>::new("ab".to_string()).unwrap();
        let text = serde_json::to_string(&value).unwrap();
        assert_eq!(text, r#""ab""#);
        let back: Branded<Short> = serde_json::from_str(&text).unwrap();
        assert_eq!(back, value);
        assert!(serde_json::from_str::<Branded<Short>>(r#""abcd""#).is_err());
    }

    #[test]
    fn integer_beyond_base_is_predicate_failure() {
        let errors = brand::<Fragile>()
            .decode(&json!(10_000_000_000_000_000_000u64))
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.errors()[0].kind(), ErrorKind::PredicateFailure);
        assert_eq!(
            errors.errors()[0].message(),
            "Invalid value for Fragile: 10000000000000000000"
        );
    }

    #[test]
    fn deref_and_display() {
        let value = Branded::<Short>::new("ab".to_string()).unwrap();
        assert_eq!(value.len(), 2);
        assert_eq!(value.to_string(), "ab");
        assert_eq!(value.brand_name(), "Short");
    }
}
