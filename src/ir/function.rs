use crate::ir::block::BasicBlock;
use crate::ir::instr::Instruction;
use crate::ir::value::RegId;

/// A function: its `OpFunction` header, parameters and body.
///
/// The entry block is always `blocks[0]`; the block linearizer never moves it
/// because nothing else dominates it. A function without blocks is a
/// declaration. `OpFunctionEnd` is implied and emitted by the printer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    /// The `OpFunction` instruction.
    pub def: Instruction,
    /// `OpFunctionParameter` instructions in order.
    pub params: Vec<Instruction>,
    /// Debug name taken from an `OpName` targeting the function result.
    pub name: Option<String>,
    pub blocks: Vec<BasicBlock>,
}

impl Function {
    pub fn new(def: Instruction) -> Self {
        Self {
            def,
            params: Vec::new(),
            name: None,
            blocks: Vec::new(),
        }
    }

    /// The function's result id (`OpFunction` operand 1).
    pub fn result(&self) -> Option<RegId> {
        self.def.reg(1)
    }

    pub fn is_declaration(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn entry_block(&self) -> Option<&BasicBlock> {
        self.blocks.first()
    }

    pub fn block(&self, label: RegId) -> Option<&BasicBlock> {
        self.blocks.iter().find(|b| b.label == label)
    }

    /// Labels of all blocks in current order.
    pub fn block_order(&self) -> Vec<RegId> {
        self.blocks.iter().map(|b| b.label).collect()
    }

    /// Human-readable identifier used in diagnostics.
    pub fn display_name(&self) -> String {
        match (&self.name, self.result()) {
            (Some(name), _) => name.clone(),
            (None, Some(r)) => r.to_string(),
            (None, None) => "<anonymous>".to_owned(),
        }
    }
}
