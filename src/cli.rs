#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Four fields joined by the ASCII Unit Separator (for the notifier)
    #[default]
    Fields,
    /// One JSON object with display fields, raw counters and cost
    Json,
    /// Notification title and message on two lines
    Notification,
}

/// Reads a Claude Code Stop-hook payload on stdin and reports what the last
/// turn cost.
#[derive(clap::Parser, Debug)]
#[command(name = "worthit", version)]
pub struct Args {
    /// Output encoding: fields|json|notification
    #[arg(long, value_enum, default_value_t = OutputFormat::Fields)]
    pub format: OutputFormat,

    /// Debug mode: log pipeline decisions to stderr
    #[arg(long, env = "WORTHIT_DEBUG")]
    pub debug: bool,
}

impl Args {
    pub fn parse() -> Self {
        <Args as clap::Parser>::parse()
    }
}
