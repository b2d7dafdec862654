//! Static knowledge about the target instruction set: opcodes, operand
//! shapes, symbolic operand names and extended instruction sets.

pub mod category;
pub mod ext_inst;
pub mod opcode;
pub mod shape;

pub use category::{DecorationKind, OperandCategory, MEMORY_OPERAND_ALIGNED};
pub use ext_inst::SetKind;
pub use opcode::Opcode;
pub use shape::{OperandKind, OperandShape, StringTail, TailShape};
