//! # Pipeline Module
//!
//! Runs one hook invocation end to end: validate the payload, sanitize the
//! path, read the transcript, isolate the latest turn, aggregate and price it.
//!
//! Only validation fails loudly. Everything after the path check resolves to
//! an [`Outcome`]; internal faults become [`SilentReason::Fault`] so the user
//! never sees an error popup for a transcript the hook could not make sense of.

use anyhow::Result;
use tracing::debug;

use crate::display::DisplayFields;
use crate::error::ValidationError;
use crate::models::{HookRequest, TokenTotals};
use crate::pricing::{pricing_for_model, ModelTier};
use crate::transcript::{extract_turn, open_transcript};
use crate::usage::{aggregate_turn, UNKNOWN_MODEL};
use crate::validate::{parse_hook_input, sanitize_transcript_path, SanitizedPath};

#[derive(Debug, Clone, PartialEq)]
pub struct CostReport {
    pub totals: TokenTotals,
    pub tier: ModelTier,
    pub cost: f64,
    pub fields: DisplayFields,
}

impl CostReport {
    pub fn new(totals: TokenTotals, cost: f64) -> Self {
        let tier = ModelTier::for_billing(totals.model.as_deref().unwrap_or(UNKNOWN_MODEL));
        let fields = DisplayFields::new(&totals, cost);
        Self {
            totals,
            tier,
            cost,
            fields,
        }
    }
}

/// Why a run produced nothing to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SilentReason {
    /// No file at the transcript path yet
    NoTranscript,
    /// No assistant records after the last user record
    EmptyTurn,
    /// The turn used no tokens in any category
    ZeroUsage,
    /// The transcript exists but could not be read
    Fault,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Report(CostReport),
    Silent(SilentReason),
}

impl Outcome {
    pub fn report(&self) -> Option<&CostReport> {
        match self {
            Self::Report(r) => Some(r),
            Self::Silent(_) => None,
        }
    }
}

/// Entry point for raw stdin bytes.
pub fn run_hook(raw: &[u8]) -> Result<Outcome, ValidationError> {
    let request = parse_hook_input(raw)?;
    run_request(&request)
}

pub fn run_request(request: &HookRequest) -> Result<Outcome, ValidationError> {
    let path = sanitize_transcript_path(&request.transcript_path)?;
    match summarize_transcript(&path) {
        Ok(outcome) => Ok(outcome),
        Err(e) => {
            debug!(error = %e, "transcript could not be summarized");
            Ok(Outcome::Silent(SilentReason::Fault))
        }
    }
}

pub fn summarize_transcript(path: &SanitizedPath) -> Result<Outcome> {
    let Some(mut reader) = open_transcript(path)? else {
        debug!(path = %path.as_path().display(), "no transcript");
        return Ok(Outcome::Silent(SilentReason::NoTranscript));
    };
    let turn = extract_turn(reader.by_ref());
    debug!(
        records = turn.len(),
        skipped_lines = reader.skipped(),
        "extracted latest turn"
    );
    if turn.is_empty() {
        return Ok(Outcome::Silent(SilentReason::EmptyTurn));
    }

    let totals = aggregate_turn(&turn);
    if totals.is_empty() {
        return Ok(Outcome::Silent(SilentReason::ZeroUsage));
    }

    let model = totals.model.as_deref().unwrap_or(UNKNOWN_MODEL);
    let cost = pricing_for_model(model).cost(&totals);
    debug!(
        model,
        input = totals.input,
        output = totals.output,
        cache_read = totals.cache_read,
        cache_write = totals.cache_write,
        cost,
        "priced turn"
    );
    Ok(Outcome::Report(CostReport::new(totals, cost)))
}
