//! Numeric literal words for constant definitions.

use crate::error::EncodeError;
use crate::ir::{Instruction, LiteralHint, Operand, RegId};
use crate::isa::Opcode;

/// Splits a constant of `width` bits into literal words.
///
/// Widths up to 32 bits take one word (masked to the width); 64-bit values
/// take two words, low half first.
pub fn literal_words(bits: u64, width: u32) -> Result<Vec<u32>, EncodeError> {
    match width {
        1 => Ok(vec![(bits & 1) as u32]),
        8 => Ok(vec![(bits & 0xff) as u32]),
        16 => Ok(vec![(bits & 0xffff) as u32]),
        32 => Ok(vec![bits as u32]),
        64 => Ok(vec![bits as u32, (bits >> 32) as u32]),
        _ => Err(EncodeError::UnsupportedLiteralWidth { width }),
    }
}

/// Builds `OpConstant %ty %result <literal>` for an integer constant.
pub fn int_constant(ty: RegId, result: RegId, bits: u64, width: u32) -> Result<Instruction, EncodeError> {
    let hint = if width == 16 {
        LiteralHint::Width16
    } else {
        LiteralHint::None
    };
    constant(ty, result, literal_words(bits, width)?, hint)
}

/// Builds `OpConstant` for a float constant of `width` bits. Half floats are
/// carried as their raw bits and print as integers.
pub fn float_constant(ty: RegId, result: RegId, value: f64, width: u32) -> Result<Instruction, EncodeError> {
    let (bits, hint) = match width {
        16 => (u64::from(f32_to_f16_bits(value as f32)), LiteralHint::Width16),
        32 => (u64::from((value as f32).to_bits()), LiteralHint::Float),
        64 => (value.to_bits(), LiteralHint::Float),
        _ => return Err(EncodeError::UnsupportedLiteralWidth { width }),
    };
    constant(ty, result, literal_words(bits, width)?, hint)
}

fn constant(ty: RegId, result: RegId, words: Vec<u32>, hint: LiteralHint) -> Result<Instruction, EncodeError> {
    let mut operands = vec![Operand::Reg(ty), Operand::Reg(result)];
    operands.extend(words.into_iter().map(Operand::Imm));
    Ok(Instruction::new(Opcode::Constant, operands).with_hint(hint))
}

/// Converts an `f32` to IEEE half-precision bits (round to nearest even).
pub fn f32_to_f16_bits(value: f32) -> u16 {
    let x = value.to_bits();
    let sign = ((x >> 16) & 0x8000) as u16;
    let exp = ((x >> 23) & 0xff) as i32;
    let mant = x & 0x7f_ffff;

    if exp == 0xff {
        let nan = if mant != 0 { 0x200 } else { 0 };
        return sign | 0x7c00 | nan;
    }
    let e = exp - 127 + 15;
    if e >= 0x1f {
        return sign | 0x7c00;
    }
    if e <= 0 {
        if e < -10 {
            return sign;
        }
        let m = mant | 0x80_0000;
        let shift = (14 - e) as u32;
        let half = 1u32 << (shift - 1);
        let mut h = m >> shift;
        let rem = m & ((1 << shift) - 1);
        if rem > half || (rem == half && h & 1 != 0) {
            h += 1;
        }
        return sign | h as u16;
    }
    let mut h = ((e as u32) << 10) | (mant >> 13);
    let rem = mant & 0x1fff;
    if rem > 0x1000 || (rem == 0x1000 && h & 1 != 0) {
        h += 1;
    }
    sign | h as u16
}
