//! Device trait for memory-mapped I/O.
//!
//! This module defines the `Device` trait implemented by all bus-attached components. It provides:
//! 1. **Identification:** `name` and `address_range` for bus routing.
//! 2. **Access:** Word reads and byte-enabled word writes at device-relative offsets.
//! 3. **Lifecycle:** An optional per-cycle `tick`.
//!
//! Reads take `&self`: the Memory stage evaluates loads before anything commits, so a
//! read must not change device state.

/// Trait for memory-mapped I/O devices attached to the IO bus.
pub trait Device: Send + Sync {
    /// Returns a short name for this device (e.g., `"LEDS"`).
    fn name(&self) -> &str;

    /// Returns `(base_address, size_in_bytes)` for this device's MMIO region.
    fn address_range(&self) -> (u32, u32);

    /// Reads the aligned word at the given device-relative offset.
    fn read_u32(&self, offset: u32) -> u32;

    /// Writes the byte lanes of `val` selected by `enable` at the aligned word `offset`.
    ///
    /// Read-only registers ignore writes.
    fn write_u32(&mut self, offset: u32, val: u32, enable: u8);

    /// Advances the device by one clock cycle.
    fn tick(&mut self) {}
}
