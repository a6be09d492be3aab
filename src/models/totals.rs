#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct TokenTotals {
    pub input: u64,
    pub output: u64,
    pub cache_read: u64,
    pub cache_write: u64,
    /// Model of the most recent assistant message in the turn
    pub model: Option<String>,
}

impl TokenTotals {
    pub fn sum(&self) -> u64 {
        self.input
            .saturating_add(self.output)
            .saturating_add(self.cache_read)
            .saturating_add(self.cache_write)
    }

    /// Tokens shown on the "In" side: fresh input plus both cache categories.
    pub fn display_input(&self) -> u64 {
        self.input
            .saturating_add(self.cache_read)
            .saturating_add(self.cache_write)
    }

    pub fn is_empty(&self) -> bool {
        self.sum() == 0
    }
}
