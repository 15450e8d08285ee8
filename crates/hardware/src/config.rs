//! Configuration system for the pipeline simulator.
//!
//! This module defines all configuration structures and enums used to parameterize
//! the simulator. It provides:
//! 1. **Defaults:** Baseline memory map, predictor table sizes, and run limits.
//! 2. **Structures:** Hierarchical config for general, pipeline, and memory settings.
//! 3. **Enums:** Microarchitecture variant and LSU alignment policy.
//!
//! Configuration is supplied as JSON (`Config::from_json` / `Config::from_file`) or taken
//! from `Config::default()`. Every field is optional in JSON.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::common::error::{Result, SimError};

/// Default configuration constants for the simulator.
mod defaults {
    /// Base address of RAM. Instructions and data share this window.
    pub const RAM_BASE: u32 = 0x0000_0000;

    /// Size of RAM (64 KiB).
    pub const RAM_SIZE: u32 = 64 * 1024;

    /// Base of the memory-mapped IO window.
    pub const IO_BASE: u32 = 0xFFFF_0000;

    /// Size of the memory-mapped IO window.
    pub const IO_SIZE: u32 = 0x0001_0000;

    /// LED bank output register.
    pub const LED_ADDR: u32 = 0xFFFF_0000;

    /// Seven-segment display output register.
    pub const SEVEN_SEG_ADDR: u32 = 0xFFFF_0004;

    /// Switch input register (read-only).
    pub const SWITCH_ADDR: u32 = 0xFFFF_0010;

    /// Base of the performance counter block.
    pub const PERF_BASE: u32 = 0xFFFF_0100;

    /// A store to this address halts the core.
    pub const HALT_ADDR: u32 = 0xFFFF_FFF0;

    /// Reset PC.
    pub const START_PC: u32 = RAM_BASE;

    /// Default cycle budget before a run is abandoned.
    pub const MAX_CYCLES: u64 = 10_000_000;

    /// Branch Target Buffer entries.
    pub const BTB_SIZE: usize = 16;

    /// log2 of the counter table size for the counter and gshare predictors.
    pub const PHT_BITS: u32 = 8;
}

/// Microarchitecture variant, fixed for the lifetime of a simulator.
///
/// Deserializes from either the numeric id (`0`-`4`) or a name such as
/// `"ForwardGshare"` / `"gshare"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "VariantRepr")]
pub enum Variant {
    /// No forwarding paths; RAW hazards interlock until the producer writes back.
    NoForward = 0,
    /// EX/MEM and MEM/WB forwarding, no branch prediction.
    #[default]
    Forward = 1,
    /// Forwarding plus a taken-on-hit BTB.
    ForwardBtb = 2,
    /// Forwarding plus per-branch 2-bit counters.
    ForwardCounter = 3,
    /// Forwarding plus gshare.
    ForwardGshare = 4,
}

impl Variant {
    /// All variants in id order.
    pub const ALL: [Self; 5] = [
        Self::NoForward,
        Self::Forward,
        Self::ForwardBtb,
        Self::ForwardCounter,
        Self::ForwardGshare,
    ];

    /// Small integer exposed on the debug outputs.
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Canonical lower-case name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::NoForward => "no-forward",
            Self::Forward => "forward",
            Self::ForwardBtb => "forward-btb",
            Self::ForwardCounter => "forward-counter",
            Self::ForwardGshare => "forward-gshare",
        }
    }
}

impl TryFrom<u8> for Variant {
    type Error = SimError;

    fn try_from(id: u8) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|v| v.id() == id)
            .ok_or(SimError::UnsupportedVariant(id))
    }
}

impl FromStr for Variant {
    type Err = SimError;

    /// Accepts ids, canonical names, PascalCase names, and short aliases.
    fn from_str(s: &str) -> Result<Self> {
        if let Ok(id) = s.parse::<u8>() {
            return Self::try_from(id);
        }
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "noforward" | "nofwd" | "baseline" => Ok(Self::NoForward),
            "forward" | "fwd" => Ok(Self::Forward),
            "forwardbtb" | "btb" => Ok(Self::ForwardBtb),
            "forwardcounter" | "counter" | "bimodal" | "2bit" => Ok(Self::ForwardCounter),
            "forwardgshare" | "gshare" => Ok(Self::ForwardGshare),
            _ => Err(SimError::UnknownVariantName(s.to_string())),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.id())
    }
}

/// Wire form of [`Variant`]: a number or a string.
#[derive(Deserialize)]
#[serde(untagged)]
enum VariantRepr {
    Id(u8),
    Name(String),
}

impl TryFrom<VariantRepr> for Variant {
    type Error = SimError;

    fn try_from(repr: VariantRepr) -> Result<Self> {
        match repr {
            VariantRepr::Id(id) => Self::try_from(id),
            VariantRepr::Name(name) => name.parse(),
        }
    }
}

/// How the LSU treats misaligned halfword and word accesses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum AlignmentPolicy {
    /// Misaligned accesses are illegal: no partial access, the instruction is flushed.
    #[default]
    #[serde(alias = "strict")]
    Strict,
    /// Misaligned RAM accesses become two aligned accesses and cost one stall cycle.
    #[serde(alias = "split")]
    Split,
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General simulation settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Pipeline microarchitecture settings.
    #[serde(default)]
    pub pipeline: PipelineConfig,
    /// Memory map.
    #[serde(default)]
    pub memory: MemoryConfig,
}

impl Config {
    /// Parses and validates a JSON configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use rvpipe_core::config::{AlignmentPolicy, Config, Variant};
    ///
    /// let json = r#"{ "pipeline": { "variant": "gshare", "alignment": "Split" } }"#;
    /// let config = Config::from_json(json).unwrap();
    /// assert_eq!(config.pipeline.variant, Variant::ForwardGshare);
    /// assert_eq!(config.pipeline.alignment, AlignmentPolicy::Split);
    /// assert_eq!(config.memory.ram_size, 64 * 1024);
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses, and validates a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SimError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Returns a copy with a different variant.
    #[must_use]
    pub const fn with_variant(mut self, variant: Variant) -> Self {
        self.pipeline.variant = variant;
        self
    }

    /// Checks that the configuration describes a buildable machine.
    ///
    /// Table sizes must be powers of two, RAM and IO windows must not overlap, and every
    /// IO register must be word aligned and inside the IO window.
    pub fn validate(&self) -> Result<()> {
        let p = &self.pipeline;
        if !p.btb_size.is_power_of_two() {
            return Err(SimError::InvalidConfig(format!(
                "btb_size {} is not a power of two",
                p.btb_size
            )));
        }
        if !(1..=20).contains(&p.pht_bits) {
            return Err(SimError::InvalidConfig(format!(
                "pht_bits {} is outside 1..=20",
                p.pht_bits
            )));
        }

        let m = &self.memory;
        if m.ram_size == 0 || m.ram_size % 4 != 0 {
            return Err(SimError::InvalidConfig(
                "ram_size must be a non-zero multiple of 4".into(),
            ));
        }
        let ram_end = u64::from(m.ram_base) + u64::from(m.ram_size);
        let io_end = u64::from(m.io_base) + u64::from(m.io_size);
        if ram_end > 1 << 32 || io_end > 1 << 32 {
            return Err(SimError::InvalidConfig(
                "memory windows exceed the 32-bit address space".into(),
            ));
        }
        if u64::from(m.ram_base) < io_end && u64::from(m.io_base) < ram_end {
            return Err(SimError::InvalidConfig(
                "RAM and IO windows overlap".into(),
            ));
        }

        let in_io = |addr: u32, len: u32| {
            u64::from(addr) >= u64::from(m.io_base)
                && u64::from(addr) + u64::from(len) <= io_end
        };
        let windows = [
            ("led_addr", m.led_addr, 4),
            ("seven_seg_addr", m.seven_seg_addr, 4),
            ("switch_addr", m.switch_addr, 4),
            ("perf_base", m.perf_base, crate::soc::devices::perf::PERF_WINDOW),
            ("halt_addr", m.halt_addr, 4),
        ];
        for (name, addr, len) in windows {
            if addr % 4 != 0 {
                return Err(SimError::InvalidConfig(format!(
                    "{name} {addr:#010x} is not word aligned"
                )));
            }
            if !in_io(addr, len) {
                return Err(SimError::InvalidConfig(format!(
                    "{name} {addr:#010x} is outside the IO window"
                )));
            }
        }
        for (i, &(a_name, a, a_len)) in windows.iter().enumerate() {
            for &(b_name, b, b_len) in &windows[i + 1..] {
                let (a, b) = (u64::from(a), u64::from(b));
                if a < b + u64::from(b_len) && b < a + u64::from(a_len) {
                    return Err(SimError::InvalidConfig(format!(
                        "{a_name} and {b_name} overlap"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// General simulation settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Emit per-stage `trace` events.
    #[serde(default)]
    pub trace_instructions: bool,

    /// Program counter at reset.
    #[serde(default = "GeneralConfig::default_start_pc")]
    pub start_pc: u32,

    /// Cycle budget for `Simulator::run`.
    #[serde(default = "GeneralConfig::default_max_cycles")]
    pub max_cycles: u64,
}

impl GeneralConfig {
    const fn default_start_pc() -> u32 {
        defaults::START_PC
    }

    const fn default_max_cycles() -> u64 {
        defaults::MAX_CYCLES
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace_instructions: false,
            start_pc: defaults::START_PC,
            max_cycles: defaults::MAX_CYCLES,
        }
    }
}

/// Pipeline microarchitecture settings.
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Active variant.
    #[serde(default)]
    pub variant: Variant,

    /// BTB entries (power of two).
    #[serde(default = "PipelineConfig::default_btb_size")]
    pub btb_size: usize,

    /// log2 of the counter table size; also the gshare history length.
    #[serde(default = "PipelineConfig::default_pht_bits")]
    pub pht_bits: u32,

    /// LSU alignment policy.
    #[serde(default)]
    pub alignment: AlignmentPolicy,
}

impl PipelineConfig {
    const fn default_btb_size() -> usize {
        defaults::BTB_SIZE
    }

    const fn default_pht_bits() -> u32 {
        defaults::PHT_BITS
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            btb_size: defaults::BTB_SIZE,
            pht_bits: defaults::PHT_BITS,
            alignment: AlignmentPolicy::default(),
        }
    }
}

/// Memory map.
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryConfig {
    /// Base of RAM.
    #[serde(default = "MemoryConfig::default_ram_base")]
    pub ram_base: u32,

    /// Size of RAM in bytes.
    #[serde(default = "MemoryConfig::default_ram_size")]
    pub ram_size: u32,

    /// Base of the IO window.
    #[serde(default = "MemoryConfig::default_io_base")]
    pub io_base: u32,

    /// Size of the IO window in bytes.
    #[serde(default = "MemoryConfig::default_io_size")]
    pub io_size: u32,

    /// LED output register.
    #[serde(default = "MemoryConfig::default_led_addr")]
    pub led_addr: u32,

    /// Seven-segment output register.
    #[serde(default = "MemoryConfig::default_seven_seg_addr")]
    pub seven_seg_addr: u32,

    /// Switch input register.
    #[serde(default = "MemoryConfig::default_switch_addr")]
    pub switch_addr: u32,

    /// Performance counter block.
    #[serde(default = "MemoryConfig::default_perf_base")]
    pub perf_base: u32,

    /// Halt sentinel.
    #[serde(default = "MemoryConfig::default_halt_addr")]
    pub halt_addr: u32,
}

impl MemoryConfig {
    const fn default_ram_base() -> u32 {
        defaults::RAM_BASE
    }

    const fn default_ram_size() -> u32 {
        defaults::RAM_SIZE
    }

    const fn default_io_base() -> u32 {
        defaults::IO_BASE
    }

    const fn default_io_size() -> u32 {
        defaults::IO_SIZE
    }

    const fn default_led_addr() -> u32 {
        defaults::LED_ADDR
    }

    const fn default_seven_seg_addr() -> u32 {
        defaults::SEVEN_SEG_ADDR
    }

    const fn default_switch_addr() -> u32 {
        defaults::SWITCH_ADDR
    }

    const fn default_perf_base() -> u32 {
        defaults::PERF_BASE
    }

    const fn default_halt_addr() -> u32 {
        defaults::HALT_ADDR
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            ram_base: defaults::RAM_BASE,
            ram_size: defaults::RAM_SIZE,
            io_base: defaults::IO_BASE,
            io_size: defaults::IO_SIZE,
            led_addr: defaults::LED_ADDR,
            seven_seg_addr: defaults::SEVEN_SEG_ADDR,
            switch_addr: defaults::SWITCH_ADDR,
            perf_base: defaults::PERF_BASE,
            halt_addr: defaults::HALT_ADDR,
        }
    }
}
