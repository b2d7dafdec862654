pub mod block;
pub mod function;
pub mod instr;
pub mod module;
pub mod value;

pub use block::BasicBlock;
pub use function::Function;
pub use instr::{Instruction, LiteralHint};
pub use module::{FunctionBuilder, Module};
pub use value::{Operand, RegId, SymbolicExpr};
