use serde::Deserialize;

/// Payload Claude Code hands to the Stop hook on stdin.
///
/// Only `transcript_path` is consumed; other members (session id, cwd, hook
/// event name) are ignored.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct HookRequest {
    pub transcript_path: String,
}
