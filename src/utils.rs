use std::io::{IsTerminal, Read};
use tracing_subscriber::EnvFilter;

pub fn read_stdin() -> anyhow::Result<Vec<u8>> {
    let mut buf = Vec::new();
    std::io::stdin().read_to_end(&mut buf)?;
    Ok(buf)
}

/// Diagnostics go to stderr; stdout is reserved for the result line.
///
/// `RUST_LOG` wins when set, otherwise `--debug` selects `debug` and the
/// default only lets validation failures through.
pub fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "error" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .compact()
        .try_init();
}

/// Group digits in threes: `1234567` -> `1,234,567`.
pub fn format_tokens(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Sub-cent turns need six decimals to show anything at all.
pub fn format_currency(v: f64) -> String {
    if v < 0.0001 {
        format!("${v:.6}")
    } else {
        format!("${v:.4}")
    }
}
