//! # Validate Module
//!
//! The security boundary of the hook: checks the shape of the stdin payload and
//! neutralizes hostile transcript paths before anything touches the file system.
//!
//! The path check is a deny-list applied to the raw string. `..`, `~`, `$` and
//! backticks are rejected outright, even inside otherwise harmless file names,
//! so no home or variable expansion ever runs on caller-controlled text.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ValidationError;
use crate::models::HookRequest;

static FORBIDDEN_PATH_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.\.|~|\$|`").unwrap());

/// Absolute transcript location that passed [`sanitize_transcript_path`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedPath(PathBuf);

impl SanitizedPath {
    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Decode raw stdin bytes and validate them as a hook payload.
pub fn parse_hook_input(raw: &[u8]) -> Result<HookRequest, ValidationError> {
    let value: Value = serde_json::from_slice(raw)
        .map_err(|e| ValidationError::MalformedJson(e.to_string()))?;
    validate_hook_input(&value)
}

pub fn validate_hook_input(input: &Value) -> Result<HookRequest, ValidationError> {
    let obj = input
        .as_object()
        .ok_or_else(|| ValidationError::NotAnObject(json_kind(input)))?;
    let path = obj
        .get("transcript_path")
        .ok_or(ValidationError::MissingTranscriptPath)?;
    let path = path
        .as_str()
        .ok_or_else(|| ValidationError::TranscriptPathNotString(json_kind(path)))?;
    if path.is_empty() {
        return Err(ValidationError::EmptyTranscriptPath);
    }
    Ok(HookRequest {
        transcript_path: path.to_owned(),
    })
}

pub fn sanitize_transcript_path(path: &str) -> Result<SanitizedPath, ValidationError> {
    if let Some(m) = FORBIDDEN_PATH_RE.find(path) {
        return Err(ValidationError::ForbiddenPattern {
            pattern: m.as_str().to_owned(),
        });
    }
    if path.is_empty() {
        return Err(ValidationError::EmptyTranscriptPath);
    }

    // `~` cannot get past the deny-list, so there is no home expansion step.
    let raw = Path::new(path);
    let resolved = match fs::canonicalize(raw) {
        Ok(p) => p,
        // Missing targets are fine here; the reader reports them as "no transcript".
        Err(_) => std::path::absolute(raw)
            .map_err(|e| ValidationError::Unresolvable(e.to_string()))?,
    };

    match fs::metadata(&resolved) {
        Ok(meta) if !meta.is_file() => Err(ValidationError::NotARegularFile(
            resolved.display().to_string(),
        )),
        _ => Ok(SanitizedPath(resolved)),
    }
}
