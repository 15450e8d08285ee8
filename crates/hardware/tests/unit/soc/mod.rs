

/// Performance counter block.
pub mod perf;
