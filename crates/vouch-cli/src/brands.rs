//! # Brands Subcommand
//!
//! Lists the standard brands with their base kind and the rule a value
//! must satisfy.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use vouch_core::{
    BaseType, Brand, Char, EmailAddress, NonEmptyString50, PositiveInt, Timestamp,
};

use crate::OutputFormat;

/// Arguments for the `vouch brands` subcommand.
#[derive(Args, Debug)]
pub struct BrandsArgs {
    /// Listing format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// One row of the brand listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrandInfo {
    pub name: &'static str,
    pub base: &'static str,
    pub rule: &'static str,
}

fn describe<B: Brand>(rule: &'static str) -> BrandInfo {
    BrandInfo {
        name: B::NAME,
        base: <B::Base as BaseType>::KIND,
        rule,
    }
}

/// The standard brands, in the order they are documented.
pub fn standard_brands() -> Vec<BrandInfo> {
    vec![
        describe::<NonEmptyString50>("1 to 50 characters"),
        describe::<EmailAddress>("contains an email address"),
        describe::<Char>("exactly one character"),
        describe::<PositiveInt>("greater than or equal to 0"),
        describe::<Timestamp>("between -8640000000000000 and 8640000000000000"),
    ]
}

/// Execute the brands subcommand against stdout.
pub fn run_brands(args: &BrandsArgs) -> Result<u8> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    list_brands(args, &mut out)?;
    Ok(0)
}

/// Write the brand listing to `out`.
pub fn list_brands(args: &BrandsArgs, out: &mut impl Write) -> Result<()> {
    let brands = standard_brands();
    match args.format {
        OutputFormat::Text => {
            let width = brands.iter().map(|b| b.name.len()).max().unwrap_or(0);
            for b in &brands {
                writeln!(out, "{:<width$}  {:<7}  {}", b.name, b.base, b.rule)?;
            }
        }
        OutputFormat::Json => {
            let rendered =
                serde_json::to_string_pretty(&brands).context("failed to render brand list")?;
            writeln!(out, "{rendered}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_standard_brand() {
        let names: Vec<_> = standard_brands().iter().map(|b| b.name).collect();
        assert_eq!(
            names,
            vec!["NonEmptyString50", "EmailAddress", "Char", "PositiveInt", "Timestamp"]
        );
    }

    #[test]
    fn base_kinds_come_from_the_brand() {
        let brands = standard_brands();
        assert_eq!(brands[0].base, "string");
        assert_eq!(brands[3].base, "integer");
    }

    #[test]
    fn text_listing_is_aligned() {
        let mut out = Vec::new();
        list_brands(&BrandsArgs { format: OutputFormat::Text }, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("NonEmptyString50  string   1 to 50 characters\n"));
        assert!(text.contains("\nChar              string   exactly one character\n"));
    }

    #[test]
    fn json_listing_parses() {
        let mut out = Vec::new();
        list_brands(&BrandsArgs { format: OutputFormat::Json }, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value[4]["name"], "Timestamp");
        assert_eq!(value[4]["base"], "integer");
    }
}
