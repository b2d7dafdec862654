use crate::ir::block::BasicBlock;
use crate::ir::function::Function;
use crate::ir::instr::Instruction;
use crate::ir::value::{Operand, RegId};
use crate::isa::Opcode;

/// The top-level container: one translation unit.
///
/// `globals` holds everything that precedes the first `OpFunction`
/// (capabilities, imports, debug names, decorations, types, constants,
/// global variables) in emission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Module {
    pub name: String,
    pub globals: Vec<Instruction>,
    pub(crate) functions: Vec<Function>,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            globals: Vec::new(),
            functions: Vec::new(),
        }
    }

    pub fn push_global(&mut self, instr: Instruction) {
        self.globals.push(instr);
    }

    pub fn add_function(&mut self, func: Function) {
        self.functions.push(func);
    }

    pub fn functions(&self) -> &[Function] {
        &self.functions
    }

    pub fn functions_mut(&mut self) -> &mut [Function] {
        &mut self.functions
    }

    pub fn function_by_name(&self, name: &str) -> Option<&Function> {
        self.functions.iter().find(|f| f.name.as_deref() == Some(name))
    }
}

/// Builder for constructing a `Function` incrementally.
///
/// Call order:
/// 1. `add_param()` for each `OpFunctionParameter`
/// 2. `create_block()` to open a block; it becomes the current block
/// 3. `push_instr()` to append to the current block
/// 4. `build()` to take the finished `Function`
pub struct FunctionBuilder {
    func: Function,
    current_block: Option<usize>,
}

impl FunctionBuilder {
    /// Starts a function `%result` of type `%fn_type` returning `%return_type`.
    pub fn new(return_type: RegId, result: RegId, fn_type: RegId) -> Self {
        let def = Instruction::new(
            Opcode::Function,
            vec![
                Operand::Reg(return_type),
                Operand::Reg(result),
                Operand::Imm(0),
                Operand::Reg(fn_type),
            ],
        );
        Self {
            func: Function::new(def),
            current_block: None,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.func.name = Some(name.into());
        self
    }

    pub fn add_param(&mut self, ty: RegId, result: RegId) {
        self.func.params.push(Instruction::new(
            Opcode::FunctionParameter,
            vec![Operand::Reg(ty), Operand::Reg(result)],
        ));
    }

    /// Opens a new block labelled `label` and makes it current.
    pub fn create_block(&mut self, label: RegId) {
        self.func.blocks.push(BasicBlock::new(label));
        self.current_block = Some(self.func.blocks.len() - 1);
    }

    /// Appends to the current block. Instructions pushed before any block is
    /// created are dropped with a warning.
    pub fn push_instr(&mut self, instr: Instruction) {
        match self.current_block {
            Some(idx) => self.func.blocks[idx].instrs.push(instr),
            None => log::warn!(
                "FunctionBuilder: {} pushed before any block was created",
                instr.opcode.mnemonic()
            ),
        }
    }

    pub fn build(self) -> Function {
        self.func
    }
}
