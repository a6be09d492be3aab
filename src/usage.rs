//! # Usage Module
//!
//! Aggregates token usage over the assistant records of a turn.
//!
//! Claude Code writes degenerate `output_tokens` values into transcripts (often
//! 1 or 2 for replies that were hundreds of tokens long), so output is estimated
//! from message content and the recorded counter is never used for cost.

use tracing::trace;

use crate::models::{ContentBlock, TokenTotals};
use crate::transcript::Turn;

/// Characters per token for mixed prose and code.
pub const CHARS_PER_TOKEN: f64 = 3.0;

/// Fixed structural cost of a `tool_use` block (id, name, wrapper).
pub const TOOL_USE_OVERHEAD_TOKENS: f64 = 20.0;

pub const UNKNOWN_MODEL: &str = "unknown";

/// Default output-token estimator: content length divided by [`CHARS_PER_TOKEN`].
///
/// Text and thinking blocks count their characters; tool calls count their
/// compact JSON parameters plus [`TOOL_USE_OVERHEAD_TOKENS`]. The sum is
/// truncated once per message.
pub fn estimate_output_tokens(blocks: &[ContentBlock]) -> u64 {
    let mut estimate = 0.0f64;
    for block in blocks {
        match block {
            ContentBlock::Text { text } => {
                estimate += text.chars().count() as f64 / CHARS_PER_TOKEN;
            }
            ContentBlock::Thinking { thinking } => {
                estimate += thinking.chars().count() as f64 / CHARS_PER_TOKEN;
            }
            ContentBlock::ToolUse { input } => {
                let params = input
                    .as_ref()
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "{}".to_string());
                estimate +=
                    TOOL_USE_OVERHEAD_TOKENS + params.chars().count() as f64 / CHARS_PER_TOKEN;
            }
            ContentBlock::Other => {}
        }
    }
    estimate as u64
}

pub fn aggregate_turn(turn: &Turn) -> TokenTotals {
    aggregate_turn_with(turn, estimate_output_tokens)
}

/// Sum usage over `turn` with a caller-supplied output estimator.
///
/// Records are visited most recent first; the first assistant message seen
/// fixes the model.
pub fn aggregate_turn_with<F>(turn: &Turn, estimate: F) -> TokenTotals
where
    F: Fn(&[ContentBlock]) -> u64,
{
    let mut totals = TokenTotals::default();
    for record in turn.records() {
        let Some(msg) = record.message.as_ref().filter(|m| m.is_assistant()) else {
            continue;
        };
        if totals.model.is_none() {
            totals.model = Some(
                msg.model
                    .clone()
                    .unwrap_or_else(|| UNKNOWN_MODEL.to_string()),
            );
        }
        if let Some(usage) = msg.usage.as_ref() {
            totals.input = totals.input.saturating_add(usage.input_tokens.unwrap_or(0));
            totals.cache_read = totals
                .cache_read
                .saturating_add(usage.cache_read_input_tokens.unwrap_or(0));
            totals.cache_write = totals
                .cache_write
                .saturating_add(usage.cache_creation_input_tokens.unwrap_or(0));
        }
        let out = estimate(&msg.content);
        trace!(
            recorded = ?msg.usage.as_ref().and_then(|u| u.output_tokens),
            estimated = out,
            "output tokens"
        );
        totals.output = totals.output.saturating_add(out);
    }
    totals
}
