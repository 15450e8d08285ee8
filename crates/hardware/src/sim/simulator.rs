//! Simulator: owns the CPU (and through it the memory system) and drives the clock.

use std::path::Path;

use crate::common::error::Result;
use crate::config::{Config, Variant};
use crate::core::{Cpu, TickReport};
use crate::sim::loader::{self, ImageFormat, LoadedImage};
use crate::soc::System;
use crate::stats::SimStats;

/// How a bounded run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// A store to the halt sentinel committed.
    Halted {
        /// Cycles simulated in total.
        cycles: u64,
    },
    /// The cycle budget ran out first.
    CycleLimit {
        /// Cycles simulated in total.
        cycles: u64,
    },
}

/// Top-level simulator.
#[derive(Debug)]
pub struct Simulator {
    /// CPU architectural and pipeline state, including the memory system.
    pub cpu: Cpu,
    max_cycles: u64,
}

impl Simulator {
    /// Creates a simulator for `config`.
    ///
    /// # Errors
    ///
    /// Fails if the configuration is invalid.
    pub fn new(config: &Config) -> Result<Self> {
        let system = System::new(config)?;
        Ok(Self {
            cpu: Cpu::new(system, config),
            max_cycles: config.general.max_cycles,
        })
    }

    /// Creates a simulator for `config` with the variant given by numeric id.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::UnsupportedVariant`](crate::common::SimError::UnsupportedVariant)
    /// for ids outside `0..=4`.
    pub fn with_variant_id(config: &Config, id: u8) -> Result<Self> {
        Self::new(&config.clone().with_variant(Variant::try_from(id)?))
    }

    /// Copies instruction words into RAM starting at `addr`.
    pub fn load_program(&mut self, addr: u32, words: &[u32]) -> Result<()> {
        self.cpu.bus.ram_mut().load_words(addr, words)
    }

    /// Loads an image file. Raw and hex images land at the current PC; an ELF entry
    /// point replaces the PC.
    pub fn load_image(&mut self, path: &Path, format: Option<ImageFormat>) -> Result<LoadedImage> {
        let data = loader::read_file(path)?;
        let format = format.unwrap_or_else(|| ImageFormat::detect(path, &data));
        let image = loader::load_image(self.cpu.bus.ram_mut(), self.cpu.pc, &data, format)?;
        if let Some(entry) = image.entry {
            self.cpu.pc = entry;
        }
        tracing::info!(
            path = %path.display(),
            ?format,
            bytes = image.bytes,
            entry = format_args!("{:#010x}", self.cpu.pc),
            "image loaded"
        );
        Ok(image)
    }

    /// Advances the simulator by one clock cycle.
    pub fn tick(&mut self) -> TickReport {
        self.cpu.tick()
    }

    /// Runs until halt or until `max_cycles` total cycles have elapsed.
    pub fn run(&mut self, max_cycles: u64) -> RunOutcome {
        self.run_with(max_cycles, |_| {})
    }

    /// Runs with the configured cycle limit.
    pub fn run_to_completion(&mut self) -> RunOutcome {
        self.run(self.max_cycles)
    }

    /// Like [`run`](Self::run), calling `on_tick` after every cycle.
    pub fn run_with(&mut self, max_cycles: u64, mut on_tick: impl FnMut(&TickReport)) -> RunOutcome {
        while !self.cpu.halted && self.cpu.stats.cycles < max_cycles {
            let report = self.cpu.tick();
            on_tick(&report);
        }
        if self.cpu.halted {
            RunOutcome::Halted {
                cycles: self.cpu.stats.cycles,
            }
        } else {
            RunOutcome::CycleLimit {
                cycles: self.cpu.stats.cycles,
            }
        }
    }

    /// Reads an architectural register.
    pub fn reg(&self, idx: usize) -> u32 {
        self.cpu.regs.read(idx)
    }

    /// Current fetch PC.
    pub const fn pc(&self) -> u32 {
        self.cpu.pc
    }

    /// Whether the core has halted.
    pub const fn is_halted(&self) -> bool {
        self.cpu.halted
    }

    /// Active variant.
    pub const fn variant(&self) -> Variant {
        self.cpu.microarch.variant
    }

    /// Collected statistics.
    pub const fn stats(&self) -> &SimStats {
        &self.cpu.stats
    }

    /// Memory system.
    pub const fn system(&self) -> &System {
        &self.cpu.bus
    }

    /// Drives the switch inputs.
    pub fn set_switches(&self, value: u32) {
        self.cpu.bus.set_switches(value);
    }
}
