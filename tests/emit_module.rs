//! Module emission: globals, function layout, comments and error locations.
//! Builds modules via the IR builder API.

use spirv_emit::codegen::printer::{emit_block_order, emit_module};
use spirv_emit::codegen::string_codec::string_operands;
use spirv_emit::error::{CodegenError, EncodeError};
use spirv_emit::ir::{FunctionBuilder, Instruction, Module, Operand, RegId};
use spirv_emit::isa::Opcode;
use spirv_emit::EmitOptions;

fn r(n: u32) -> Operand {
    Operand::Reg(RegId(n))
}

fn with_string(opcode: Opcode, mut prefix: Vec<Operand>, text: &str) -> Instruction {
    prefix.extend(string_operands(text));
    Instruction::new(opcode, prefix)
}

/// `void main(int* p) { *p = sqrt(*p); }`, roughly.
fn build_kernel_module() -> Module {
    let mut module = Module::new("kernel");
    module.push_global(Instruction::new(Opcode::Capability, vec![Operand::Imm(6)]));
    module.push_global(with_string(Opcode::ExtInstImport, vec![r(0)], "OpenCL.std"));
    module.push_global(Instruction::new(Opcode::MemoryModel, vec![Operand::Imm(2), Operand::Imm(2)]));
    module.push_global(with_string(Opcode::Name, vec![r(1)], "main"));
    module.push_global(Instruction::new(Opcode::TypeVoid, vec![r(2)]));
    module.push_global(Instruction::new(Opcode::TypeFloat, vec![r(3), Operand::Imm(32)]));
    module.push_global(Instruction::new(Opcode::TypePointer, vec![r(4), Operand::Imm(5), r(3)]));
    module.push_global(Instruction::new(Opcode::TypeFunction, vec![r(5), r(2), r(4)]));

    let mut fb = FunctionBuilder::new(RegId(2), RegId(1), RegId(5)).name("main");
    fb.add_param(RegId(4), RegId(6));
    fb.create_block(RegId(7));
    fb.push_instr(Instruction::new(
        Opcode::Load,
        vec![r(3), r(8), r(6), Operand::Imm(2), Operand::Imm(4)],
    ));
    fb.push_instr(Instruction::new(
        Opcode::ExtInst,
        vec![r(3), r(9), r(0), Operand::Imm(61), r(8)],
    ));
    fb.push_instr(Instruction::new(Opcode::Store, vec![r(6), r(9)]));
    fb.push_instr(Instruction::new(Opcode::Return, vec![]));
    module.add_function(fb.build());
    module
}

const KERNEL_TEXT: &str = "\
OpCapability Kernel
OpExtInstImport %1 \"OpenCL.std\"
OpMemoryModel Physical64 OpenCL
OpName %2 \"main\"
OpTypeVoid %3
OpTypeFloat %4 32
OpTypePointer %5 CrossWorkgroup %4
OpTypeFunction %6 %3 %5
OpFunction %3 %2 None %6
OpFunctionParameter %5 %7
OpLabel %8
OpLoad %4 %9 %7 Aligned 4
OpExtInst %4 %10 %1 sqrt %9
OpStore %7 %10
OpReturn
OpFunctionEnd
";

fn no_comments() -> EmitOptions {
    EmitOptions {
        comments: false,
        ..EmitOptions::default()
    }
}

// ---------------------------------------------------------------------------
// 1. Layout
// ---------------------------------------------------------------------------

#[test]
fn test_emit_kernel_without_comments() {
    let text = emit_module(&build_kernel_module(), &no_comments()).unwrap();
    assert_eq!(text, KERNEL_TEXT);
}

#[test]
fn test_emit_kernel_with_comments() {
    let text = emit_module(&build_kernel_module(), &EmitOptions::default()).unwrap();
    assert!(text.starts_with("; SPIR-V\n; Module: kernel\nOpCapability Kernel\n"), "{}", text);
    assert!(text.contains("; -- Begin function main\nOpFunction %3 %2 None %6\n"), "{}", text);
    assert!(text.ends_with("OpFunctionEnd\n; -- End function\n"), "{}", text);
}

#[test]
fn test_emit_is_deterministic() {
    let module = build_kernel_module();
    let a = emit_module(&module, &EmitOptions::default()).unwrap();
    let b = emit_module(&module, &EmitOptions::default()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_emit_declaration_has_no_labels() {
    let mut module = Module::new("decl");
    module.add_function(FunctionBuilder::new(RegId(0), RegId(1), RegId(2)).build());
    let text = emit_module(&module, &no_comments()).unwrap();
    assert_eq!(text, "OpFunction %1 %2 None %3\nOpFunctionEnd\n");
}

#[test]
fn test_emit_empty_module() {
    assert_eq!(emit_module(&Module::new("empty"), &no_comments()).unwrap(), "");
}

// ---------------------------------------------------------------------------
// 2. Errors carry a location
// ---------------------------------------------------------------------------

#[test]
fn test_error_in_global_reports_index() {
    let mut module = Module::new("bad");
    module.push_global(Instruction::new(Opcode::Capability, vec![Operand::Imm(6)]));
    module.push_global(Instruction::new(Opcode::TypeInt, vec![r(0)]));
    let err = emit_module(&module, &no_comments()).unwrap_err();
    match err {
        CodegenError::Encode { location, source } => {
            assert!(location.contains("global instruction 1"), "{}", location);
            assert!(matches!(source, EncodeError::MalformedOperandShape { opcode: "OpTypeInt", .. }));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_error_in_body_names_function_and_block() {
    let mut module = Module::new("bad");
    let mut fb = FunctionBuilder::new(RegId(0), RegId(1), RegId(2)).name("f");
    fb.create_block(RegId(3));
    fb.push_instr(Instruction::new(
        Opcode::Load,
        vec![r(4), r(5), r(6), Operand::Imm(2)],
    ));
    fb.push_instr(Instruction::new(Opcode::Return, vec![]));
    module.add_function(fb.build());

    let err = emit_module(&module, &no_comments()).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("function 'f'"), "{}", msg);
    assert!(msg.contains("block %4"), "{}", msg);
    assert!(msg.contains("Aligned memory operand is missing its alignment literal"), "{}", msg);
}

#[test]
fn test_ext_inst_before_import_fails() {
    let mut module = Module::new("bad");
    module.push_global(Instruction::new(
        Opcode::ExtInst,
        vec![r(3), r(9), r(0), Operand::Imm(61), r(8)],
    ));
    let err = emit_module(&module, &no_comments()).unwrap_err();
    assert!(matches!(
        err,
        CodegenError::Encode {
            source: EncodeError::UnboundExtInstSet { handle: RegId(0) },
            ..
        }
    ));
}

// ---------------------------------------------------------------------------
// 3. Block order listing
// ---------------------------------------------------------------------------

#[test]
fn test_block_order_listing() {
    let mut module = Module::new("m");
    let mut fb = FunctionBuilder::new(RegId(0), RegId(1), RegId(2)).name("f");
    for label in [10, 12, 11] {
        fb.create_block(RegId(label));
        fb.push_instr(Instruction::new(Opcode::Return, vec![]));
    }
    module.add_function(fb.build());
    module.add_function(FunctionBuilder::new(RegId(0), RegId(20), RegId(2)).build());
    assert_eq!(emit_block_order(&module).unwrap(), "f: %11 %13 %12\n%21:\n");
}
