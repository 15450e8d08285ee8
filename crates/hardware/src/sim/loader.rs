//! Program image loading.
//!
//! This module copies programs into RAM before the first tick. It supports:
//! 1. **Raw binaries:** Bytes copied verbatim to a load address.
//! 2. **Hex images:** One little-endian word per line in `$readmemh` style, with `@index`
//!    directives selecting the word index of the next word; `//` and `#` start comments.
//! 3. **ELF32 executables:** Little-endian RISC-V images; every loadable segment is copied
//!    to its physical address and the entry point is returned.

use std::fs;
use std::path::Path;

use object::read::elf::ElfFile32;
use object::{Architecture, Endianness, Object, ObjectSegment};

use crate::common::error::{Result, SimError};
use crate::soc::memory::Ram;

/// On-disk program formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageFormat {
    /// Raw little-endian bytes.
    Bin,
    /// Word-per-line hexadecimal text.
    Hex,
    /// ELF32 RISC-V executable.
    Elf,
}

impl ImageFormat {
    /// Guesses the format from the file contents and extension.
    pub fn detect(path: &Path, data: &[u8]) -> Self {
        if data.starts_with(b"\x7fELF") {
            return Self::Elf;
        }
        match path.extension().and_then(|e| e.to_str()) {
            Some("hex" | "mem" | "txt") => Self::Hex,
            _ => Self::Bin,
        }
    }
}

/// Summary of a completed load.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadedImage {
    /// Entry point recorded in the image, if the format has one.
    pub entry: Option<u32>,
    /// Number of bytes copied into RAM.
    pub bytes: usize,
}

/// Reads a whole file.
pub fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|source| SimError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Copies raw bytes into RAM at `addr`.
pub fn load_binary(ram: &mut Ram, addr: u32, data: &[u8]) -> Result<LoadedImage> {
    ram.load(addr, data)?;
    Ok(LoadedImage {
        entry: None,
        bytes: data.len(),
    })
}

/// Parses a hex image into `(word_index, word)` pairs.
///
/// # Examples
///
/// ```
/// use rvpipe_core::sim::loader::parse_hex;
///
/// let words = parse_hex("00a00513 // li a0, 10\n@4\n0x00000013\n").unwrap();
/// assert_eq!(words, vec![(0, 0x00a0_0513), (4, 0x0000_0013)]);
/// ```
pub fn parse_hex(text: &str) -> Result<Vec<(u32, u32)>> {
    let mut words = Vec::new();
    let mut index: u32 = 0;
    for (lineno, raw) in text.lines().enumerate() {
        let line = raw
            .split("//")
            .next()
            .unwrap_or_default()
            .split('#')
            .next()
            .unwrap_or_default();
        for token in line.split_whitespace() {
            let bad = |reason: &str| SimError::Hex {
                line: lineno + 1,
                reason: format!("{reason}: '{token}'"),
            };
            if let Some(addr) = token.strip_prefix('@') {
                index = u32::from_str_radix(addr, 16).map_err(|_| bad("bad address"))?;
                continue;
            }
            let digits = token
                .strip_prefix("0x")
                .or_else(|| token.strip_prefix("0X"))
                .unwrap_or(token)
                .replace('_', "");
            let word = u32::from_str_radix(&digits, 16).map_err(|_| bad("bad word"))?;
            words.push((index, word));
            index = index.wrapping_add(1);
        }
    }
    Ok(words)
}

/// Loads a hex image; word index `i` lands at `base + 4 * i`.
pub fn load_hex(ram: &mut Ram, base: u32, text: &str) -> Result<LoadedImage> {
    let words = parse_hex(text)?;
    for &(index, word) in &words {
        let addr = base.wrapping_add(index.wrapping_mul(4));
        ram.load(addr, &word.to_le_bytes())?;
    }
    Ok(LoadedImage {
        entry: None,
        bytes: words.len() * 4,
    })
}

/// Loads an ELF32 RISC-V executable.
pub fn load_elf(ram: &mut Ram, data: &[u8]) -> Result<LoadedImage> {
    let elf = ElfFile32::<Endianness>::parse(data).map_err(|e| SimError::Elf(e.to_string()))?;
    if elf.architecture() != Architecture::Riscv32 {
        return Err(SimError::Elf(format!(
            "expected a RISC-V 32-bit image, found {:?}",
            elf.architecture()
        )));
    }
    if !elf.is_little_endian() {
        return Err(SimError::Elf("big-endian images are not supported".into()));
    }

    let mut bytes = 0;
    for segment in elf.segments() {
        let contents = segment.data().map_err(|e| SimError::Elf(e.to_string()))?;
        if contents.is_empty() {
            continue;
        }
        let addr = u32::try_from(segment.address())
            .map_err(|_| SimError::Elf(format!("segment address {:#x}", segment.address())))?;
        ram.load(addr, contents)?;
        bytes += contents.len();
    }

    let entry = u32::try_from(elf.entry())
        .map_err(|_| SimError::Elf(format!("entry point {:#x}", elf.entry())))?;
    Ok(LoadedImage {
        entry: Some(entry),
        bytes,
    })
}

/// Loads `data` in the given format. Raw and hex images land at `base`.
pub fn load_image(
    ram: &mut Ram,
    base: u32,
    data: &[u8],
    format: ImageFormat,
) -> Result<LoadedImage> {
    match format {
        ImageFormat::Bin => load_binary(ram, base, data),
        ImageFormat::Hex => {
            let text = std::str::from_utf8(data).map_err(|e| SimError::Hex {
                line: 0,
                reason: e.to_string(),
            })?;
            load_hex(ram, base, text)
        }
        ImageFormat::Elf => load_elf(ram, data),
    }
}
