//! Pipeline stage implementations.
//!
//! Every stage is a pure function of the committed pipeline state: it reads the latch in
//! front of it (plus whatever bypass or memory inputs it needs) and returns what it would
//! latch, without mutating anything. The [`Cpu`](crate::core::Cpu) applies all results
//! together in the commit phase.
//! 1. **Fetch:** Reads the instruction at the PC and consults the branch predictor.
//! 2. **Decode:** Generates control signals, reads operands, resolves branches and jumps.
//! 3. **Execute:** Selects forwarded operands and runs the ALU.
//! 4. **Memory:** Plans and performs loads, computes stores.
//! 5. **Writeback:** Selects the result and raises the commit signals.

/// Instruction decode stage implementation.
pub mod decode;

/// Instruction execute stage implementation.
pub mod execute;

/// Instruction fetch stage implementation.
pub mod fetch;

/// Memory access stage implementation.
pub mod memory;

/// Writeback stage implementation.
pub mod writeback;

/// Decode stage entry point (ID stage).
pub use decode::{DecodeResult, PredictorUpdate, decode_stage};
/// Execute stage entry point (EX stage).
pub use execute::{ExecuteResult, execute_stage};
/// Fetch stage entry point (IF stage).
pub use fetch::{FetchResult, fetch_stage};
/// Memory stage entry point (MEM stage).
pub use memory::{MemoryResult, StoreOp, mem_stage};
/// Writeback stage entry point (WB stage).
pub use writeback::{WritebackResult, wb_stage};
