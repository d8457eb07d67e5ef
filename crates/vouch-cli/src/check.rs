//! # Check Subcommand
//!
//! Decodes user documents and prints one report per document.
//!
//! Text output is a header line per document followed by its report, one
//! line per failure (or `No errors!`), indented by two spaces. JSON output
//! is a single array with one entry per document.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use serde_json::{json, Value};

use vouch_core::{report, report_json};
use vouch_user::{load_document, parse_document, DocumentFormat, UserSchema};

use crate::OutputFormat;

/// Arguments for the `vouch check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Documents to check. `-` reads JSON from stdin.
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,

    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Execute the check subcommand against stdout.
///
/// Returns exit code: 0 when every document decodes, 1 otherwise.
pub fn run_check(args: &CheckArgs) -> Result<u8> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    check_documents(args, &mut std::io::stdin(), &mut out)
}

/// Decode every document named in `args`, writing reports to `out`.
///
/// # Errors
///
/// Fails without partial output on the first document that cannot be read
/// or parsed, or when `-` is named more than once.
pub fn check_documents(
    args: &CheckArgs,
    stdin: &mut impl Read,
    out: &mut impl Write,
) -> Result<u8> {
    let schema = UserSchema::new().context("failed to build user schema")?;

    if args.files.iter().filter(|path| path.as_os_str() == "-").count() > 1 {
        bail!("stdin ('-') can only be checked once per run");
    }

    let mut documents = Vec::with_capacity(args.files.len());
    for path in &args.files {
        documents.push(read_document(path, stdin)?);
    }

    let mut failed = 0usize;
    let mut entries = Vec::with_capacity(documents.len());
    for (origin, value) in &documents {
        let result = schema.decode_user(value);
        match &result {
            Ok(user) => tracing::info!(document = %origin, kind = user.kind(), "document accepted"),
            Err(errors) => {
                failed += 1;
                tracing::info!(document = %origin, errors = errors.len(), "document rejected");
            }
        }

        match args.format {
            OutputFormat::Text => {
                let header = match &result {
                    Ok(user) => user.kind(),
                    Err(_) => "invalid",
                };
                writeln!(out, "{origin}: {header}")?;
                for line in report(&result) {
                    writeln!(out, "  {line}")?;
                }
            }
            OutputFormat::Json => entries.push(json!({
                "file": origin,
                "ok": result.is_ok(),
                "type": result.as_ref().ok().map(|user| user.kind()),
                "errors": report_json(&result),
            })),
        }
    }

    if args.format == OutputFormat::Json {
        let rendered = serde_json::to_string_pretty(&Value::Array(entries))
            .context("failed to render JSON report")?;
        writeln!(out, "{rendered}")?;
    }

    tracing::debug!(documents = documents.len(), failed, "check finished");
    Ok(if failed > 0 { 1 } else { 0 })
}

fn read_document(path: &Path, stdin: &mut impl Read) -> Result<(String, Value)> {
    if path.as_os_str() == "-" {
        let mut content = String::new();
        stdin
            .read_to_string(&mut content)
            .context("failed to read stdin")?;
        let value = parse_document(&content, DocumentFormat::Json, "-")?;
        return Ok(("-".to_string(), value));
    }

    let value = load_document(path)?;
    Ok((path.display().to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn args(files: &[&str], format: OutputFormat) -> CheckArgs {
        CheckArgs {
            files: files.iter().map(PathBuf::from).collect(),
            format,
        }
    }

    fn run(args: &CheckArgs, stdin: &str) -> (u8, String) {
        let mut out = Vec::new();
        let code = check_documents(args, &mut stdin.as_bytes(), &mut out).unwrap();
        (code, String::from_utf8(out).unwrap())
    }

    const VALID: &str = r#"{"firstName":"Ada","lastName":"Lovelace","emailAddress":"ada@example.com","remainingReadings":7}"#;

    #[test]
    fn valid_stdin_document() {
        let (code, out) = run(&args(&["-"], OutputFormat::Text), VALID);
        assert_eq!(code, 0);
        assert_eq!(out, "-: UnverifiedUser\n  No errors!\n");
    }

    #[test]
    fn invalid_document_lists_failures() {
        let (code, out) = run(
            &args(&["-"], OutputFormat::Text),
            r#"{"firstName":42,"lastName":"Lovelace","emailAddress":"ada@example.com","remainingReadings":7}"#,
        );
        assert_eq!(code, 1);
        assert_eq!(
            out,
            "-: invalid\n  First name value must be a string(length 1 ~ 50). Got 42\n"
        );
    }

    #[test]
    fn json_format_reports_each_file() {
        let mut file = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
        writeln!(file, "firstName: Ada\nlastName: Lovelace\nemailAddress: nope\nverifiedDate: 0").unwrap();
        let path = file.path().display().to_string();

        let (code, out) = run(&args(&[&path, "-"], OutputFormat::Json), VALID);
        assert_eq!(code, 1);
        let value: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["file"], json!(path));
        assert_eq!(value[0]["ok"], json!(false));
        assert_eq!(value[0]["type"], Value::Null);
        assert_eq!(value[0]["errors"][0]["path"], json!(["emailAddress"]));
        assert_eq!(value[1]["type"], json!("UnverifiedUser"));
        assert_eq!(value[1]["errors"], json!([]));
    }

    #[test]
    fn unreadable_file_is_an_error() {
        let mut out = Vec::new();
        let result = check_documents(
            &args(&["/nonexistent/user.json"], OutputFormat::Text),
            &mut "".as_bytes(),
            &mut out,
        );
        assert!(result.is_err());
        assert!(out.is_empty());
    }

    #[test]
    fn repeated_stdin_is_rejected_before_reading() {
        let mut out = Vec::new();
        let mut stdin = VALID.as_bytes();
        let error = check_documents(&args(&["-", "-"], OutputFormat::Text), &mut stdin, &mut out)
            .unwrap_err();
        assert!(error.to_string().contains("stdin ('-') can only be checked once"));
        assert!(out.is_empty());
        assert_eq!(stdin, VALID.as_bytes());
    }
}
