
/// Forwarding selectors for Execute and Decode.
pub mod forwarding;


/// Memory and writeback stage behavior.
pub mod memory;
