//! Program image loading.

use std::io::Write;
use std::path::Path;

use pretty_assertions::assert_eq;
use rstest::rstest;
use tempfile::NamedTempFile;

use crate::common::harness::TestContext;
use rvpipe_core::common::SimError;
use rvpipe_core::config::Variant;
use rvpipe_core::sim::loader::{self, ImageFormat, parse_hex};
use rvpipe_core::soc::memory::Ram;

fn temp_with(suffix: &str, contents: &[u8]) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("create temp file");
    file.write_all(contents).expect("write temp file");
    file
}

#[test]
fn hex_words_with_comments_and_address_directive() {
    let text = "\
        // header comment\n\
        00a00513  # li a0, 10\n\
        0x0000_0013\n\
        \n\
        @10\n\
        deadbeef\n";
    let words = parse_hex(text).expect("valid hex");
    assert_eq!(words, vec![(0, 0x00A0_0513), (1, 0x13), (0x10, 0xDEAD_BEEF)]);
}

#[test]
fn multiple_words_per_line() {
    let words = parse_hex("00000013 00000013\n00000073").expect("valid hex");
    assert_eq!(words.len(), 3);
    assert_eq!(words[2], (2, 0x73));
}

#[rstest]
#[case("00000013\nxyz\n", 2)]
#[case("@zz\n", 1)]
#[case("\n\n123456789\n", 3)]
fn malformed_hex_reports_the_line(#[case] text: &str, #[case] line: usize) {
    match parse_hex(text) {
        Err(SimError::Hex { line: got, .. }) => assert_eq!(got, line),
        other => panic!("expected a hex error, got {other:?}"),
    }
}

#[test]
fn hex_index_is_relative_to_base() {
    let mut ram = Ram::new(0, 0x100);
    let image = loader::load_hex(&mut ram, 0x40, "11111111\n@2\n22222222\n").expect("fits");
    assert_eq!(image.bytes, 8);
    assert_eq!(ram.read_word(0x40), Some(0x1111_1111));
    assert_eq!(ram.read_word(0x48), Some(0x2222_2222));
}

#[test]
fn binary_beyond_ram_is_rejected() {
    let mut ram = Ram::new(0, 0x10);
    let err = loader::load_binary(&mut ram, 0xC, &[0; 8]).unwrap_err();
    assert!(matches!(err, SimError::ImageOutOfRange { addr: 0xC, len: 8 }));
}

#[test]
fn garbage_elf_is_rejected() {
    let mut ram = Ram::new(0, 0x100);
    let mut data = b"\x7fELF".to_vec();
    data.extend([0xFF; 12]);
    let err = loader::load_elf(&mut ram, &data).unwrap_err();
    assert!(matches!(err, SimError::Elf(_)));
}

#[rstest]
#[case("prog.hex", b"00000013".as_slice(), ImageFormat::Hex)]
#[case("prog.mem", b"00000013".as_slice(), ImageFormat::Hex)]
#[case("prog.bin", b"\x13\x00\x00\x00".as_slice(), ImageFormat::Bin)]
#[case("prog", b"\x7fELF\x01\x01\x01".as_slice(), ImageFormat::Elf)]
#[case("prog.hex", b"\x7fELF\x01\x01\x01".as_slice(), ImageFormat::Elf)]
fn format_detection(#[case] name: &str, #[case] data: &[u8], #[case] format: ImageFormat) {
    assert_eq!(ImageFormat::detect(Path::new(name), data), format);
}

#[test]
fn simulator_runs_a_hex_file() {
    // addi x5, x0, 9; sw x0, -16(x0); nops
    let file = temp_with(
        ".hex",
        b"00900293\nfe002823\n00000013\n00000013\n00000013\n00000013\n",
    );
    let mut ctx = TestContext::new(Variant::Forward);
    let image = ctx.sim.load_image(file.path(), None).expect("load hex");
    assert_eq!(image.entry, None);

    let _ = ctx.run_until_halt();
    assert_eq!(ctx.get_reg(5), 9);
}

#[test]
fn simulator_runs_a_raw_binary() {
    let words: [u32; 6] = [0x0090_0293, 0xFE00_2823, 0x13, 0x13, 0x13, 0x13];
    let bytes: Vec<u8> = words.iter().flat_map(|w| w.to_le_bytes()).collect();
    let file = temp_with(".bin", &bytes);

    let mut ctx = TestContext::new(Variant::NoForward);
    let image = ctx
        .sim
        .load_image(file.path(), Some(ImageFormat::Bin))
        .expect("load bin");
    assert_eq!(image.bytes, 24);

    let _ = ctx.run_until_halt();
    assert_eq!(ctx.get_reg(5), 9);
}

#[test]
fn missing_file_is_an_io_error() {
    let mut ctx = TestContext::new(Variant::Forward);
    let err = ctx
        .sim
        .load_image(Path::new("/nonexistent/prog.hex"), None)
        .unwrap_err();
    assert!(matches!(err, SimError::Io { .. }));
}
