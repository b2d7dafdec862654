//! String literal packing: word counts, byte order, padding and decoding.

use spirv_emit::codegen::string_codec::{
    decode_bytes, decode_prefix, decode_string, decode_words, encode_string, string_operands, word_count,
};
use spirv_emit::ir::{Operand, RegId};

// ---------------------------------------------------------------------------
// 1. Encoding
// ---------------------------------------------------------------------------

#[test]
fn test_empty_string_is_one_zero_word() {
    assert_eq!(encode_string(b""), vec![0]);
}

#[test]
fn test_two_bytes_pack_little_endian() {
    assert_eq!(encode_string(b"ab"), vec![0x0000_6261]);
}

#[test]
fn test_four_bytes_need_a_terminator_word() {
    assert_eq!(encode_string(b"abcd"), vec![0x6463_6261, 0]);
}

#[test]
fn test_five_bytes_pad_second_word() {
    assert_eq!(encode_string(b"hello"), vec![0x6c6c_6568, 0x0000_006f]);
}

#[test]
fn test_word_count_includes_terminator() {
    assert_eq!(word_count(0), 1);
    assert_eq!(word_count(3), 1);
    assert_eq!(word_count(4), 2);
    assert_eq!(word_count(7), 2);
    assert_eq!(word_count(8), 3);
}

#[test]
fn test_string_operands_are_immediates() {
    let ops = string_operands("main");
    assert_eq!(ops, vec![Operand::Imm(0x6e69_616d), Operand::Imm(0)]);
}

// ---------------------------------------------------------------------------
// 2. Decoding
// ---------------------------------------------------------------------------

#[test]
fn test_decode_stops_at_nul() {
    let ops = vec![Operand::Imm(0x0000_6261), Operand::Imm(0x6463_6261)];
    assert_eq!(decode_bytes(&ops, 0), b"ab");
}

#[test]
fn test_decode_stops_at_register_operand() {
    // "abcd" with its terminator word replaced by a register.
    let ops = vec![Operand::Imm(0x6463_6261), Operand::Reg(RegId(4))];
    assert_eq!(decode_bytes(&ops, 0), b"abcd");
}

#[test]
fn test_prefix_counts_words_read() {
    let mut ops = string_operands("abcd");
    ops.push(Operand::Reg(RegId(1)));
    assert_eq!(decode_prefix(&ops, 0), (b"abcd".to_vec(), 2));

    let ops = vec![Operand::Imm(0x6463_6261), Operand::Reg(RegId(4))];
    assert_eq!(decode_prefix(&ops, 0), (b"abcd".to_vec(), 1));

    let ops = vec![Operand::Reg(RegId(4))];
    assert_eq!(decode_prefix(&ops, 0), (Vec::new(), 0));
}

#[test]
fn test_decode_from_offset() {
    let mut ops = vec![Operand::Reg(RegId(0))];
    ops.extend(string_operands("OpenCL.std"));
    assert_eq!(decode_string(&ops, 1), "OpenCL.std");
}

#[test]
fn test_decode_past_end_is_empty() {
    let ops = vec![Operand::Reg(RegId(0))];
    assert!(decode_bytes(&ops, 3).is_empty());
}

#[test]
fn test_decode_words_round_trip() {
    let text = "GLSL.std.450";
    assert_eq!(decode_words(&encode_string(text.as_bytes())), text.as_bytes());
}

#[test]
fn test_decode_utf8() {
    let text = "héllo wörld";
    assert_eq!(decode_string(&string_operands(text), 0), text);
}
