use serde::{Serialize, Deserialize};

/// Logical clock of the pipeline: one turn per transcript that reaches dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Turn {
    pub index: u64,
}

impl Turn {
    pub fn new() -> Self {
        Turn { index: 0 }
    }

    pub fn next(&self) -> Self {
        Turn { index: self.index + 1 }
    }
}
