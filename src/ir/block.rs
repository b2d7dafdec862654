use crate::ir::instr::Instruction;
use crate::ir::value::RegId;

/// A basic block.
///
/// The block's `OpLabel` is implied by `label` and is not stored in `instrs`;
/// the printer emits it in front of the body.
///
/// Invariants checked by `ValidatePass`:
/// 1. `instrs` ends with exactly one terminator.
/// 2. Every branch target names a block of the same function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicBlock {
    pub label: RegId,
    pub instrs: Vec<Instruction>,
}

impl BasicBlock {
    pub fn new(label: RegId) -> Self {
        Self {
            label,
            instrs: Vec::new(),
        }
    }

    pub fn with_instrs(label: RegId, instrs: Vec<Instruction>) -> Self {
        Self { label, instrs }
    }

    /// Returns the terminator instruction if the block is sealed.
    pub fn terminator(&self) -> Option<&Instruction> {
        self.instrs.last().filter(|i| i.is_terminator())
    }

    /// A block is sealed when it ends with a terminator.
    pub fn is_sealed(&self) -> bool {
        self.terminator().is_some()
    }

    /// CFG successors implied by the terminator.
    pub fn successors(&self) -> Vec<RegId> {
        self.terminator().map(Instruction::successors).unwrap_or_default()
    }
}
