//! # Display Module
//!
//! Encodes a [`CostReport`] for the notifier.
//!
//! The default encoding is a single line of four fields joined by the ASCII
//! Unit Separator (0x1F). A printable delimiter such as `|` can show up in
//! transcript-derived text and would shift fields in the consumer.

use serde_json::{json, Value};

use crate::cli::OutputFormat;
use crate::models::TokenTotals;
use crate::pipeline::CostReport;
use crate::pricing::model_label;
use crate::utils::{format_currency, format_tokens};

pub const FIELD_DELIMITER: char = '\u{1f}';

/// Strip characters a shell-based notifier could interpret.
///
/// Newlines and carriage returns become spaces, backticks and `$` are removed,
/// `|` becomes `/`, and a stray field delimiter becomes a space.
pub fn sanitize_output(text: &str) -> String {
    text.chars()
        .filter_map(|c| match c {
            '\n' | '\r' | FIELD_DELIMITER => Some(' '),
            '`' | '$' => None,
            '|' => Some('/'),
            c => Some(c),
        })
        .collect()
}

// Numeric fields keep `$` (currency) but must stay on one line and one field.
fn neutralize_field(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\n' | '\r' | FIELD_DELIMITER => ' ',
            c => c,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayFields {
    pub input: String,
    pub output: String,
    pub cost: String,
    pub model: String,
}

impl DisplayFields {
    pub fn new(totals: &TokenTotals, cost: f64) -> Self {
        let model = totals.model.as_deref().unwrap_or_default();
        Self {
            input: format_tokens(totals.display_input()),
            output: format_tokens(totals.output),
            cost: format_currency(cost),
            model: model_label(model).to_string(),
        }
    }

    /// Copy with every field made safe for the wire.
    pub fn sanitized(&self) -> Self {
        Self {
            input: neutralize_field(&self.input),
            output: neutralize_field(&self.output),
            cost: neutralize_field(&self.cost),
            model: sanitize_output(&self.model),
        }
    }

    pub fn encode(&self) -> String {
        let safe = self.sanitized();
        let mut line = String::new();
        for (i, field) in [&safe.input, &safe.output, &safe.cost, &safe.model]
            .into_iter()
            .enumerate()
        {
            if i > 0 {
                line.push(FIELD_DELIMITER);
            }
            line.push_str(field);
        }
        line
    }
}

/// Split an encoded line back into its four fields.
pub fn decode_fields(line: &str) -> Option<DisplayFields> {
    let line = line.trim_end_matches(['\n', '\r']);
    let mut parts = line.split(FIELD_DELIMITER);
    let fields = DisplayFields {
        input: parts.next()?.to_string(),
        output: parts.next()?.to_string(),
        cost: parts.next()?.to_string(),
        model: parts.next()?.to_string(),
    };
    if parts.next().is_some() {
        return None;
    }
    Some(fields)
}

/// Title and body as the desktop notifier renders them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn from_fields(fields: &DisplayFields) -> Self {
        Self {
            title: format!("{} Claude Usage", fields.model),
            message: format!(
                "In: {} | Out: {} | Cost: {}",
                fields.input, fields.output, fields.cost
            ),
        }
    }
}

pub fn build_json_output(report: &CostReport) -> Value {
    let fields = report.fields.sanitized();
    json!({
        "model": {
            "id": sanitize_output(report.totals.model.as_deref().unwrap_or_default()),
            "label": fields.model,
        },
        "tokens": {
            "input": report.totals.input,
            "output": report.totals.output,
            "cache_read": report.totals.cache_read,
            "cache_write": report.totals.cache_write,
        },
        "cost_usd": report.cost,
        "display": {
            "input": fields.input,
            "output": fields.output,
            "cost": fields.cost,
        },
    })
}

/// Render `report` in the requested format, without a trailing newline.
pub fn render(report: &CostReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Fields => report.fields.encode(),
        OutputFormat::Json => build_json_output(report).to_string(),
        OutputFormat::Notification => {
            let note = Notification::from_fields(&report.fields.sanitized());
            format!("{}\n{}", note.title, note.message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::SONNET_PRICING;

    fn fields(model: &str) -> DisplayFields {
        DisplayFields {
            input: "1,800".to_string(),
            output: "500".to_string(),
            cost: "$0.0128".to_string(),
            model: model.to_string(),
        }
    }

    #[test]
    fn test_remove_pipes() {
        let result = sanitize_output("In: 100 | Out: 50");
        assert!(!result.contains('|'));
        assert!(result.contains('/'));
    }

    #[test]
    fn test_remove_backticks_and_dollars() {
        assert!(!sanitize_output("Test `command` injection").contains('`'));
        assert_eq!(sanitize_output("Cost: $10.50").matches('$').count(), 0);
        assert_eq!(sanitize_output("$(rm -rf ~)"), "(rm -rf ~)");
    }

    #[test]
    fn test_replace_line_breaks() {
        assert_eq!(sanitize_output("Line 1\nLine 2"), "Line 1 Line 2");
        assert_eq!(sanitize_output("Line 1\rLine 2"), "Line 1 Line 2");
    }

    #[test]
    fn test_empty_and_safe_text() {
        assert_eq!(sanitize_output(""), "");
        assert_eq!(sanitize_output("Normal text 123 abc"), "Normal text 123 abc");
    }

    #[test]
    fn encode_uses_unit_separator() {
        let line = fields("Sonnet 4.5").encode();
        assert_eq!(line, "1,800\u{1f}500\u{1f}$0.0128\u{1f}Sonnet 4.5");
        assert!(!line.contains('\n'));
    }

    #[test]
    fn round_trip_recovers_sanitized_fields() {
        for model in [
            "Sonnet 4.5",
            "evil\u{1f}extra",
            "`whoami`",
            "$HOME | cat",
            "multi\nline\r",
        ] {
            let original = fields(model);
            let decoded = decode_fields(&original.encode()).unwrap();
            assert_eq!(decoded, original.sanitized(), "model {model:?}");
        }
    }

    #[test]
    fn cost_keeps_currency_sign() {
        let decoded = decode_fields(&fields("Opus 4.5").encode()).unwrap();
        assert_eq!(decoded.cost, "$0.0128");
    }

    #[test]
    fn decode_rejects_wrong_arity() {
        assert!(decode_fields("a\u{1f}b\u{1f}c").is_none());
        assert!(decode_fields("a\u{1f}b\u{1f}c\u{1f}d\u{1f}e").is_none());
        assert!(decode_fields("").is_none());
    }

    #[test]
    fn notification_text() {
        let note = Notification::from_fields(&fields("Haiku 4.5"));
        assert_eq!(note.title, "Haiku 4.5 Claude Usage");
        assert_eq!(note.message, "In: 1,800 | Out: 500 | Cost: $0.0128");
    }

    #[test]
    fn json_output_shape() {
        let totals = TokenTotals {
            input: 1500,
            output: 500,
            cache_read: 100,
            cache_write: 200,
            model: Some("claude-sonnet-4-5".to_string()),
        };
        let cost = SONNET_PRICING.cost(&totals);
        let report = CostReport::new(totals, cost);
        let json = build_json_output(&report);
        assert_eq!(json["model"]["label"], "Sonnet 4.5");
        assert_eq!(json["model"]["id"], "claude-sonnet-4-5");
        assert_eq!(json["tokens"]["cache_write"], 200);
        assert_eq!(json["display"]["input"], "1,800");
        assert!(json["cost_usd"].is_number());

        let rendered = render(&report, OutputFormat::Notification);
        assert_eq!(
            rendered,
            "Sonnet 4.5 Claude Usage\nIn: 1,800 | Out: 500 | Cost: $0.0128"
        );
    }
}
