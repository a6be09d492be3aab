pub mod hook;
pub mod message;
pub mod totals;

pub use hook::HookRequest;
pub use message::{ContentBlock, Message, MessageUsage, TranscriptRecord};
pub use totals::TokenTotals;
