//! Text reader: lexing, module structure, operand parsing and round trips.

use spirv_emit::codegen::printer::emit_module;
use spirv_emit::error::{EncodeError, ParseError};
use spirv_emit::ir::{LiteralHint, Operand, RegId, SymbolicExpr};
use spirv_emit::isa::Opcode;
use spirv_emit::parser::{parse_module, Lexer, Token};
use spirv_emit::EmitOptions;

const KERNEL: &str = "\
OpCapability Addresses
OpCapability Kernel
OpCapability Int64
OpExtInstImport %1 \"OpenCL.std\"
OpMemoryModel Physical64 OpenCL
OpEntryPoint Kernel %2 \"main\" %3
OpName %2 \"main\"
OpDecorate %3 BuiltIn GlobalInvocationId
OpTypeVoid %4
OpTypeInt %5 32 0
OpTypeInt %6 64 0
OpTypeFloat %7 32
OpConstant %5 %8 42
OpConstant %6 %9 4294967298
OpConstant %7 %10 1.5
OpTypePointer %11 CrossWorkgroup %5
OpTypeFunction %12 %4 %11
OpFunction %4 %2 None %12
OpFunctionParameter %11 %13
OpLabel %14
OpLoad %5 %15 %13 Aligned 4
OpIAdd %5 %16 %15 %8
OpExtInst %7 %17 %1 sqrt %10
OpStore %13 %16 Volatile|Aligned 4
OpReturn
OpFunctionEnd
";

fn no_comments() -> EmitOptions {
    EmitOptions {
        comments: false,
        ..EmitOptions::default()
    }
}

fn parse_err(src: &str) -> ParseError {
    match parse_module(src, "t") {
        Ok(m) => panic!("expected a parse error, got {:?}", m),
        Err(e) => e,
    }
}

// ---------------------------------------------------------------------------
// 1. Lexer
// ---------------------------------------------------------------------------

#[test]
fn test_lex_operands() {
    let tokens = Lexer::new("OpFoo %12 -7 0x1F 1.5e3 \"a\\\"b\" 2D Volatile|Aligned ; trailing").tokenize().unwrap();
    let nodes: Vec<Token> = tokens.into_iter().map(|t| t.node).collect();
    assert_eq!(
        nodes,
        vec![
            Token::Ident("OpFoo".into()),
            Token::Id(12),
            Token::Int(-7),
            Token::Int(31),
            Token::Float(1500.0),
            Token::Str("a\"b".into()),
            Token::Ident("2D".into()),
            Token::Ident("Volatile|Aligned".into()),
            Token::Eof,
        ]
    );
}

#[test]
fn test_lex_tracks_lines() {
    let tokens = Lexer::new("; header\nOpNop\n\nOpReturn").tokenize().unwrap();
    let ret = tokens
        .iter()
        .find(|t| t.node == Token::Ident("OpReturn".into()))
        .unwrap();
    assert_eq!(ret.line, 4);
}

#[test]
fn test_lex_backslash_is_literal() {
    let tokens = Lexer::new("\"C:\\dir\\file\"").tokenize().unwrap();
    assert_eq!(tokens[0].node, Token::Str("C:\\dir\\file".into()));
}

#[test]
fn test_lex_errors() {
    assert!(matches!(
        Lexer::new("OpNop\n\"open").tokenize(),
        Err(ParseError::UnterminatedString { line: 2 })
    ));
    assert!(matches!(
        Lexer::new("OpNop #").tokenize(),
        Err(ParseError::UnexpectedChar { ch: '#', line: 1 })
    ));
}

// ---------------------------------------------------------------------------
// 2. Module structure
// ---------------------------------------------------------------------------

#[test]
fn test_parse_kernel_structure() {
    let m = parse_module(KERNEL, "kernel").unwrap();
    assert_eq!(m.name, "kernel");
    assert_eq!(m.globals.len(), 17);
    assert_eq!(m.functions().len(), 1);

    let f = &m.functions()[0];
    assert_eq!(f.name.as_deref(), Some("main"));
    assert_eq!(f.result(), Some(RegId(1)));
    assert_eq!(f.params.len(), 1);
    assert_eq!(f.block_order(), vec![RegId(13)]);
    assert_eq!(f.blocks[0].instrs.len(), 5);
    assert!(f.blocks[0].is_sealed());
}

#[test]
fn test_parse_operands() {
    let m = parse_module(KERNEL, "kernel").unwrap();
    let load = &m.functions()[0].blocks[0].instrs[0];
    assert_eq!(load.opcode, Opcode::Load);
    assert_eq!(
        load.operands,
        vec![
            Operand::Reg(RegId(4)),
            Operand::Reg(RegId(14)),
            Operand::Reg(RegId(12)),
            Operand::Imm(2),
            Operand::Imm(4),
        ]
    );
}

#[test]
fn test_parse_constants_by_type() {
    let m = parse_module(KERNEL, "kernel").unwrap();
    let consts: Vec<_> = m.globals.iter().filter(|i| i.opcode == Opcode::Constant).collect();
    assert_eq!(consts[0].operands[2..], [Operand::Imm(42)]);
    assert_eq!(consts[0].hint, LiteralHint::None);
    assert_eq!(consts[1].operands[2..], [Operand::Imm(2), Operand::Imm(1)]);
    assert_eq!(consts[2].operands[2..], [Operand::Imm(0x3fc0_0000)]);
    assert_eq!(consts[2].hint, LiteralHint::Float);
}

#[test]
fn test_parse_negative_constant() {
    let src = "OpTypeInt %1 16 1\nOpConstant %1 %2 -2\n";
    let m = parse_module(src, "t").unwrap();
    assert_eq!(m.globals[1].operands[2], Operand::Imm(0xfffe));
    assert_eq!(m.globals[1].hint, LiteralHint::Width16);
}

#[test]
fn test_parse_symbolic_expr() {
    let m = parse_module("OpTypeStruct %1 %2 some_symbol\n", "t").unwrap();
    assert_eq!(
        m.globals[0].operands[2],
        Operand::Expr(SymbolicExpr("some_symbol".into()))
    );
}

#[test]
fn test_comments_and_blank_lines_are_ignored() {
    let src = "; SPIR-V\n\n   OpCapability Kernel ; why not\n\n";
    let m = parse_module(src, "t").unwrap();
    assert_eq!(m.globals.len(), 1);
}

// ---------------------------------------------------------------------------
// 3. Round trip
// ---------------------------------------------------------------------------

#[test]
fn test_round_trip_kernel() {
    let m = parse_module(KERNEL, "kernel").unwrap();
    assert_eq!(emit_module(&m, &no_comments()).unwrap(), KERNEL);
}

#[test]
fn test_round_trip_with_comments() {
    let m = parse_module(KERNEL, "kernel").unwrap();
    let text = emit_module(&m, &EmitOptions::default()).unwrap();
    let again = parse_module(&text, "kernel").unwrap();
    assert_eq!(again, m);
}

#[test]
fn test_round_trip_decorations_and_images() {
    let src = "\
OpCapability Kernel
OpExtInstImport %1 \"OpenCL.std\"
OpDecorate %2 LinkageAttributes \"ext_fn\" Import
OpDecorate %3 FPFastMathMode NotNaN|Fast
OpDecorate %3 UniformId Workgroup
OpDecorate %4 Alignment 16
OpDecorate %5 Restrict
OpMemberDecorate %6 1 Offset 8
OpName %7 \"with \\\"quotes\\\"\"
OpTypeFloat %8 16
OpTypeFloat %9 64
OpConstant %8 %10 15360
OpConstant %9 %11 0.1
OpTypeImage %12 %8 2D 0 0 0 0 Unknown ReadOnly
OpExtInst %8 %13 %1 vstore_half_r %14 %15 %16 RTE
OpImageSampleExplicitLod %8 %17 %18 %19 Lod %20
OpSwitch %21 %22 1 %23 -5 %24
";
    let m = parse_module(src, "t").unwrap();
    assert_eq!(emit_module(&m, &no_comments()).unwrap(), src);
}

#[test]
fn test_round_trip_negative_constants() {
    let src = "OpTypeInt %1 32 1\nOpTypeInt %2 16 1\nOpConstant %1 %3 -1\nOpConstant %1 %4 -2147483648\nOpConstant %2 %5 65534\n";
    let m = parse_module(src, "t").unwrap();
    assert_eq!(m.globals[2].operands[2], Operand::Imm(u32::MAX));
    assert_eq!(emit_module(&m, &no_comments()).unwrap(), src);
}

#[test]
fn test_round_trip_non_finite_float() {
    let src = "OpTypeFloat %1 32\nOpConstant %1 %2 0x7f800000\n";
    let m = parse_module(src, "t").unwrap();
    assert_eq!(m.globals[1].operands[2], Operand::Imm(0x7f80_0000));
    assert_eq!(emit_module(&m, &no_comments()).unwrap(), src);
}

// ---------------------------------------------------------------------------
// 4. Errors
// ---------------------------------------------------------------------------

#[test]
fn test_unknown_mnemonic() {
    match parse_err("OpCapability Kernel\nOpFrobnicate %1\n") {
        ParseError::UnknownMnemonic { mnemonic, line } => {
            assert_eq!(mnemonic, "OpFrobnicate");
            assert_eq!(line, 2);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_unknown_symbol() {
    assert!(matches!(
        parse_err("OpCapability Kernal\n"),
        ParseError::UnknownSymbol { line: 1, .. }
    ));
}

#[test]
fn test_trailing_tokens_are_rejected() {
    assert!(matches!(
        parse_err("OpTypeInt %1 32 0 7\n"),
        ParseError::UnexpectedToken { line: 1, .. }
    ));
}

#[test]
fn test_missing_operand_is_malformed() {
    match parse_err("OpCapability Kernel\nOpIAdd %1 %2\n") {
        ParseError::Encode { source, line } => {
            assert_eq!(line, 2);
            assert!(matches!(source, EncodeError::MalformedOperandShape { opcode: "OpIAdd", .. }));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_aligned_without_literal() {
    assert!(matches!(
        parse_err("OpLoad %1 %2 %3 Aligned\n"),
        ParseError::Encode {
            source: EncodeError::MalformedOperandShape { .. },
            ..
        }
    ));
}

#[test]
fn test_ext_inst_before_import() {
    assert!(matches!(
        parse_err("OpExtInst %1 %2 %3 sqrt %4\n"),
        ParseError::Encode {
            source: EncodeError::UnboundExtInstSet { handle: RegId(2) },
            line: 1,
        }
    ));
}

#[test]
fn test_constant_needs_declared_type() {
    assert!(matches!(
        parse_err("OpConstant %1 %2 7\n"),
        ParseError::UnknownConstantType { ty: RegId(0), line: 1 }
    ));
}

#[test]
fn test_constant_out_of_range() {
    assert!(matches!(
        parse_err("OpTypeInt %1 8 0\nOpConstant %1 %2 256\n"),
        ParseError::InvalidLiteral { line: 2, .. }
    ));
}

#[test]
fn test_constant_unsupported_width() {
    assert!(matches!(
        parse_err("OpTypeInt %1 24 0\nOpConstant %1 %2 1\n"),
        ParseError::Encode {
            source: EncodeError::UnsupportedLiteralWidth { width: 24 },
            line: 2,
        }
    ));
}

#[test]
fn test_raw_float_bits_must_fit() {
    assert!(matches!(
        parse_err("OpTypeFloat %1 32\nOpConstant %1 %2 0x1FFFFFFFF\n"),
        ParseError::InvalidLiteral { line: 2, .. }
    ));
    assert!(matches!(
        parse_err("OpTypeFloat %1 16\nOpConstant %1 %2 65536\n"),
        ParseError::InvalidLiteral { line: 2, .. }
    ));
    assert!(parse_module("OpTypeFloat %1 16\nOpConstant %1 %2 65535\n", "t").is_ok());
}

#[test]
fn test_register_zero_is_invalid() {
    assert!(matches!(parse_err("OpTypeVoid %0\n"), ParseError::InvalidLiteral { .. }));
}

#[test]
fn test_misplaced_instructions() {
    assert!(matches!(
        parse_err("OpLabel %1\n"),
        ParseError::MisplacedInstruction { mnemonic: "OpLabel", .. }
    ));
    assert!(matches!(
        parse_err("OpFunction %1 %2 None %3\nOpReturn\nOpFunctionEnd\n"),
        ParseError::MisplacedInstruction { mnemonic: "OpReturn", line: 2, .. }
    ));
    assert!(matches!(
        parse_err("OpFunction %1 %2 None %3\nOpFunction %1 %4 None %3\n"),
        ParseError::MisplacedInstruction { mnemonic: "OpFunction", .. }
    ));
    assert!(matches!(
        parse_err("OpFunction %1 %2 None %3\nOpLabel %4\nOpFunctionParameter %5 %6\n"),
        ParseError::MisplacedInstruction { mnemonic: "OpFunctionParameter", .. }
    ));
}

#[test]
fn test_unterminated_function() {
    assert!(matches!(
        parse_err("OpFunction %1 %2 None %3\nOpLabel %4\nOpReturn\n"),
        ParseError::UnexpectedToken { .. }
    ));
}
