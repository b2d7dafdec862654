pub mod asm_info;
pub mod dispatch;
pub mod literal;
pub mod printer;
pub mod registry;
pub mod string_codec;

pub use asm_info::{AsmInfo, SPIRV_ASM_INFO};
pub use dispatch::{walk_instruction, OperandWalker};
pub use literal::{float_constant, int_constant, literal_words};
pub use printer::{emit_block_order, emit_instruction, emit_module, instruction_text};
pub use registry::ExtInstRegistry;
pub use string_codec::{decode_bytes, decode_prefix, decode_string, decode_words, encode_string, string_operands, word_count};
