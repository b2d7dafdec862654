use crate::ir::value::{Operand, RegId};
use crate::isa::Opcode;

/// How the literal tail of a constant-definition instruction is printed.
///
/// Set by whoever builds the constant (the literal builder or the text
/// reader); the printer has no type table of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LiteralHint {
    /// Plain unsigned integer.
    #[default]
    None,
    /// IEEE float: one word is `f32`, two words are `f64`.
    Float,
    /// A 16-bit value (integer or half float); printed as its integer bits.
    Width16,
}

/// A single instruction: an opcode plus its ordered operand words.
///
/// Operands are stored exactly as they appear in the word stream, so a string
/// literal occupies several consecutive `Operand::Imm` entries and a 64-bit
/// constant occupies two.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub opcode: Opcode,
    pub operands: Vec<Operand>,
    pub hint: LiteralHint,
}

impl Instruction {
    pub fn new(opcode: Opcode, operands: Vec<Operand>) -> Self {
        Self {
            opcode,
            operands,
            hint: LiteralHint::None,
        }
    }

    pub fn with_hint(mut self, hint: LiteralHint) -> Self {
        self.hint = hint;
        self
    }

    pub fn is_terminator(&self) -> bool {
        self.opcode.is_terminator()
    }

    /// Returns the labels this instruction may transfer control to.
    ///
    /// Only block terminators have successors. `OpSwitch` case literals are
    /// immediates, so every register after the selector is a target.
    pub fn successors(&self) -> Vec<RegId> {
        match self.opcode {
            Opcode::Branch => self.operands.iter().take(1).filter_map(Operand::as_reg).collect(),
            Opcode::BranchConditional => self
                .operands
                .iter()
                .skip(1)
                .take(2)
                .filter_map(Operand::as_reg)
                .collect(),
            Opcode::Switch => self.operands.iter().skip(1).filter_map(Operand::as_reg).collect(),
            _ => Vec::new(),
        }
    }

    /// Returns the register operand at `index`, if there is one.
    pub fn reg(&self, index: usize) -> Option<RegId> {
        self.operands.get(index).and_then(Operand::as_reg)
    }
}
