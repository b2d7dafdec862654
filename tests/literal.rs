//! Constant literal construction and bit-width validation.

use spirv_emit::codegen::literal::{f32_to_f16_bits, float_constant, int_constant, literal_words};
use spirv_emit::error::EncodeError;
use spirv_emit::ir::{LiteralHint, Operand, RegId};
use spirv_emit::isa::Opcode;

#[test]
fn test_supported_widths() {
    assert_eq!(literal_words(3, 1).unwrap(), vec![1]);
    assert_eq!(literal_words(0x1ff, 8).unwrap(), vec![0xff]);
    assert_eq!(literal_words(0x1_2345, 16).unwrap(), vec![0x2345]);
    assert_eq!(literal_words(0xdead_beef, 32).unwrap(), vec![0xdead_beef]);
    assert_eq!(
        literal_words(0x0123_4567_89ab_cdef, 64).unwrap(),
        vec![0x89ab_cdef, 0x0123_4567]
    );
}

#[test]
fn test_unsupported_widths() {
    for width in [0, 2, 7, 24, 33, 48, 128] {
        assert_eq!(
            literal_words(0, width),
            Err(EncodeError::UnsupportedLiteralWidth { width }),
            "width {}",
            width
        );
    }
}

#[test]
fn test_negative_int_is_twos_complement() {
    let c = int_constant(RegId(0), RegId(1), (-1i64) as u64, 32).unwrap();
    assert_eq!(c.operands[2], Operand::Imm(u32::MAX));
    let c = int_constant(RegId(0), RegId(1), (-2i64) as u64, 64).unwrap();
    assert_eq!(c.operands[2..], [Operand::Imm(0xffff_fffe), Operand::Imm(u32::MAX)]);
}

#[test]
fn test_int_constant_shape() {
    let c = int_constant(RegId(3), RegId(9), 7, 16).unwrap();
    assert_eq!(c.opcode, Opcode::Constant);
    assert_eq!(c.reg(0), Some(RegId(3)));
    assert_eq!(c.reg(1), Some(RegId(9)));
    assert_eq!(c.hint, LiteralHint::Width16);
    assert_eq!(int_constant(RegId(3), RegId(9), 7, 32).unwrap().hint, LiteralHint::None);
}

#[test]
fn test_int_constant_rejects_width() {
    assert_eq!(
        int_constant(RegId(0), RegId(1), 0, 12),
        Err(EncodeError::UnsupportedLiteralWidth { width: 12 })
    );
}

#[test]
fn test_float_constant_bits() {
    let c = float_constant(RegId(0), RegId(1), 1.0, 32).unwrap();
    assert_eq!(c.operands[2], Operand::Imm(0x3f80_0000));
    assert_eq!(c.hint, LiteralHint::Float);
    let c = float_constant(RegId(0), RegId(1), 2.0, 64).unwrap();
    assert_eq!(c.operands[2..], [Operand::Imm(0), Operand::Imm(0x4000_0000)]);
}

#[test]
fn test_float_constant_rejects_width() {
    assert_eq!(
        float_constant(RegId(0), RegId(1), 1.0, 8),
        Err(EncodeError::UnsupportedLiteralWidth { width: 8 })
    );
}

#[test]
fn test_half_conversion() {
    assert_eq!(f32_to_f16_bits(0.0), 0x0000);
    assert_eq!(f32_to_f16_bits(-0.0), 0x8000);
    assert_eq!(f32_to_f16_bits(1.0), 0x3c00);
    assert_eq!(f32_to_f16_bits(-2.0), 0xc000);
    assert_eq!(f32_to_f16_bits(65504.0), 0x7bff);
    assert_eq!(f32_to_f16_bits(1.0e6), 0x7c00);
    assert_eq!(f32_to_f16_bits(f32::INFINITY), 0x7c00);
    assert_eq!(f32_to_f16_bits(f32::NAN) & 0x7c00, 0x7c00);
    // Smallest subnormal half.
    assert_eq!(f32_to_f16_bits(5.960_464_5e-8), 0x0001);
}
