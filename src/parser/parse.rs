//! Text reader: parses the emitter's textual format back into a `Module`.
//!
//! The reader is line oriented: one instruction per line, mnemonic first.
//! Operands are consumed by the same dispatcher that prints them, so every
//! shape the emitter can produce is accepted and nothing else is.
//!
//! Layout (informal):
//! ```text
//! module   := global* function*
//! function := OpFunction param* block* OpFunctionEnd
//! param    := OpFunctionParameter
//! block    := OpLabel instr*
//! ```
//! `OpName` targeting a function result also sets that function's name.

use std::collections::HashMap;

use crate::codegen::dispatch::{walk_instruction, OperandWalker};
use crate::codegen::literal::{f32_to_f16_bits, literal_words};
use crate::codegen::registry::ExtInstRegistry;
use crate::codegen::string_codec::{decode_string, string_operands};
use crate::error::{EncodeError, ParseError};
use crate::ir::{BasicBlock, Function, Instruction, LiteralHint, Module, Operand, RegId, SymbolicExpr};
use crate::isa::{OperandCategory, Opcode, SetKind};
use crate::parser::lexer::{Lexer, Spanned, Token};

/// Lexes and parses `source` into a module called `name`.
pub fn parse_module(source: &str, name: &str) -> Result<Module, ParseError> {
    let tokens = Lexer::new(source).tokenize()?;
    Parser::new(&tokens).parse_module(name)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumericKind {
    Int,
    Float,
}

/// A declared scalar type that `OpConstant` may refer to.
#[derive(Debug, Clone, Copy)]
struct ScalarType {
    kind: NumericKind,
    width: u32,
}

pub struct Parser<'t> {
    tokens: &'t [Spanned<Token>],
    pos: usize,
    registry: ExtInstRegistry,
    types: HashMap<RegId, ScalarType>,
}

impl<'t> Parser<'t> {
    pub fn new(tokens: &'t [Spanned<Token>]) -> Self {
        Self {
            tokens,
            pos: 0,
            registry: ExtInstRegistry::new(),
            types: HashMap::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Token stream helpers
    // -----------------------------------------------------------------------

    fn peek_tok(&self) -> &Token {
        self.tokens.get(self.pos).map_or(&Token::Eof, |t| &t.node)
    }

    fn current_line(&self) -> u32 {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map_or(1, |t| t.line)
    }

    fn skip_newlines(&mut self) {
        while matches!(self.peek_tok(), Token::Newline) {
            self.pos += 1;
        }
    }

    // -----------------------------------------------------------------------
    // Module structure
    // -----------------------------------------------------------------------

    pub fn parse_module(mut self, name: &str) -> Result<Module, ParseError> {
        let mut module = Module::new(name);
        let mut func: Option<Function> = None;

        loop {
            self.skip_newlines();
            if matches!(self.peek_tok(), Token::Eof) {
                break;
            }
            let line = self.current_line();
            let instr = self.parse_instruction()?;

            match instr.opcode {
                Opcode::Function => {
                    if func.is_some() {
                        return Err(misplaced(Opcode::Function, "the previous function is still open", line));
                    }
                    func = Some(Function::new(instr));
                }
                Opcode::FunctionEnd => match func.take() {
                    Some(done) => module.add_function(done),
                    None => return Err(misplaced(Opcode::FunctionEnd, "outside of a function", line)),
                },
                Opcode::FunctionParameter => match func.as_mut() {
                    Some(f) if f.blocks.is_empty() => f.params.push(instr),
                    Some(_) => {
                        return Err(misplaced(
                            Opcode::FunctionParameter,
                            "parameters must precede the first block",
                            line,
                        ))
                    }
                    None => return Err(misplaced(Opcode::FunctionParameter, "outside of a function", line)),
                },
                Opcode::Label => {
                    let f = func
                        .as_mut()
                        .ok_or_else(|| misplaced(Opcode::Label, "outside of a function", line))?;
                    let label = instr
                        .reg(0)
                        .ok_or_else(|| misplaced(Opcode::Label, "a label needs a result id", line))?;
                    f.blocks.push(BasicBlock::new(label));
                }
                opcode => match func.as_mut() {
                    Some(f) => match f.blocks.last_mut() {
                        Some(block) => block.instrs.push(instr),
                        None => return Err(misplaced(opcode, "function body must start with OpLabel", line)),
                    },
                    None => module.push_global(instr),
                },
            }
        }

        if func.is_some() {
            return Err(ParseError::UnexpectedToken {
                expected: "OpFunctionEnd".to_owned(),
                found: Token::Eof.to_string(),
                line: self.current_line(),
            });
        }

        apply_function_names(&mut module);
        log::debug!(
            "parsed module '{}': {} global(s), {} function(s)",
            module.name,
            module.globals.len(),
            module.functions().len()
        );
        Ok(module)
    }

    fn parse_instruction(&mut self) -> Result<Instruction, ParseError> {
        let line = self.current_line();
        let opcode = match self.peek_tok() {
            Token::Ident(text) => Opcode::from_mnemonic(text).ok_or_else(|| ParseError::UnknownMnemonic {
                mnemonic: text.clone(),
                line,
            })?,
            other => {
                return Err(ParseError::UnexpectedToken {
                    expected: "an opcode mnemonic".to_owned(),
                    found: other.to_string(),
                    line,
                })
            }
        };
        self.pos += 1;

        let mut reader = TextReader {
            tokens: self.tokens,
            pos: self.pos,
            types: &self.types,
            operands: Vec::new(),
            hint: LiteralHint::None,
        };
        walk_instruction(opcode, &mut reader, &mut self.registry).map_err(|e| {
            if e.line() == 0 {
                e.at_line(line)
            } else {
                e
            }
        })?;
        self.pos = reader.pos;
        let instr = Instruction::new(opcode, reader.operands).with_hint(reader.hint);

        self.record_type(&instr);
        Ok(instr)
    }

    fn record_type(&mut self, instr: &Instruction) {
        let kind = match instr.opcode {
            Opcode::TypeInt => NumericKind::Int,
            Opcode::TypeFloat => NumericKind::Float,
            _ => return,
        };
        if let (Some(result), Some(width)) = (instr.reg(0), instr.operands.get(1).and_then(Operand::as_imm)) {
            self.types.insert(result, ScalarType { kind, width });
        }
    }
}

fn misplaced(opcode: Opcode, detail: &str, line: u32) -> ParseError {
    ParseError::MisplacedInstruction {
        mnemonic: opcode.mnemonic(),
        detail: detail.to_owned(),
        line,
    }
}

fn apply_function_names(module: &mut Module) {
    let names: HashMap<RegId, String> = module
        .globals
        .iter()
        .filter(|i| i.opcode == Opcode::Name)
        .filter_map(|i| Some((i.reg(0)?, decode_string(&i.operands, 1))))
        .collect();
    for func in module.functions_mut() {
        if let Some(name) = func.result().and_then(|r| names.get(&r)) {
            func.name = Some(name.clone());
        }
    }
}

// ---------------------------------------------------------------------------
// Operand reader
// ---------------------------------------------------------------------------

/// Consumes the tokens of one line and builds the instruction's operands.
struct TextReader<'p, 't> {
    tokens: &'t [Spanned<Token>],
    pos: usize,
    types: &'p HashMap<RegId, ScalarType>,
    operands: Vec<Operand>,
    hint: LiteralHint,
}

impl TextReader<'_, '_> {
    fn peek(&self) -> Option<&Spanned<Token>> {
        self.tokens
            .get(self.pos)
            .filter(|t| !matches!(t.node, Token::Newline | Token::Eof))
    }

    fn line(&self) -> u32 {
        self.tokens.get(self.pos).map_or(0, |t| t.line)
    }

    /// Takes the next token of this line, or reports `expected`.
    fn take(&mut self, expected: &str) -> Result<Spanned<Token>, ParseError> {
        match self.peek() {
            Some(tok) => {
                let tok = tok.clone();
                self.pos += 1;
                Ok(tok)
            }
            None => Err(self.unexpected(expected)),
        }
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        let found = self
            .tokens
            .get(self.pos)
            .map_or_else(|| Token::Eof.to_string(), |t| t.node.to_string());
        ParseError::UnexpectedToken {
            expected: expected.to_owned(),
            found,
            line: self.line(),
        }
    }

    fn word(value: i128, text: &Token, line: u32) -> Result<u32, ParseError> {
        if (i128::from(i32::MIN)..=i128::from(u32::MAX)).contains(&value) {
            Ok(value as u32)
        } else {
            Err(ParseError::InvalidLiteral {
                text: text.to_string(),
                line,
            })
        }
    }

    fn reg(n: u32, line: u32) -> Result<RegId, ParseError> {
        RegId::from_text_index(n).ok_or_else(|| ParseError::InvalidLiteral {
            text: format!("%{}", n),
            line,
        })
    }

    fn push_literal_words(&mut self, bits: u64, width: u32, line: u32) -> Result<(), ParseError> {
        let words = literal_words(bits, width).map_err(|e| ParseError::from(e).at_line(line))?;
        self.operands.extend(words.into_iter().map(Operand::Imm));
        Ok(())
    }
}

impl OperandWalker for TextReader<'_, '_> {
    type Error = ParseError;

    fn remaining(&self) -> usize {
        self.tokens[self.pos.min(self.tokens.len())..]
            .iter()
            .take_while(|t| !matches!(t.node, Token::Newline | Token::Eof))
            .count()
    }

    fn next_is_immediate(&self) -> bool {
        self.peek().map_or(false, |t| !matches!(t.node, Token::Id(_)))
    }

    fn id(&mut self) -> Result<RegId, ParseError> {
        let tok = self.take("a register")?;
        match tok.node {
            Token::Id(n) => {
                let reg = Self::reg(n, tok.line)?;
                self.operands.push(Operand::Reg(reg));
                Ok(reg)
            }
            other => Err(ParseError::UnexpectedToken {
                expected: "a register".to_owned(),
                found: other.to_string(),
                line: tok.line,
            }),
        }
    }

    fn literal(&mut self) -> Result<u32, ParseError> {
        let tok = self.take("an integer literal")?;
        match &tok.node {
            Token::Int(v) => {
                let word = Self::word(*v, &tok.node, tok.line)?;
                self.operands.push(Operand::Imm(word));
                Ok(word)
            }
            other => Err(ParseError::UnexpectedToken {
                expected: "an integer literal".to_owned(),
                found: other.to_string(),
                line: tok.line,
            }),
        }
    }

    fn symbolic(&mut self, category: OperandCategory) -> Result<u32, ParseError> {
        let expected = format!("a {:?} operand", category);
        let tok = self.take(&expected)?;
        let value = match &tok.node {
            Token::Ident(text) => category.parse(text),
            Token::Int(v) => u32::try_from(*v).ok(),
            other => {
                return Err(ParseError::UnexpectedToken {
                    expected,
                    found: other.to_string(),
                    line: tok.line,
                })
            }
        };
        let value = value.ok_or_else(|| ParseError::UnknownSymbol {
            text: tok.node.to_string(),
            category: format!("{:?}", category),
            line: tok.line,
        })?;
        self.operands.push(Operand::Imm(value));
        Ok(value)
    }

    fn ext_inst_number(&mut self, set: SetKind) -> Result<u32, ParseError> {
        let tok = self.take("an extended instruction")?;
        let number = match &tok.node {
            Token::Ident(text) => set.parse_instruction(text),
            Token::Int(v) => u32::try_from(*v).ok(),
            _ => None,
        };
        let number = number.ok_or_else(|| ParseError::UnknownSymbol {
            text: tok.node.to_string(),
            category: format!("{:?} instruction", set),
            line: tok.line,
        })?;
        self.operands.push(Operand::Imm(number));
        Ok(number)
    }

    fn string(&mut self) -> Result<String, ParseError> {
        let tok = self.take("a string literal")?;
        match tok.node {
            Token::Str(text) if text.contains('\0') => Err(ParseError::InvalidLiteral {
                text: format!("{:?}", text),
                line: tok.line,
            }),
            Token::Str(text) => {
                self.operands.extend(string_operands(&text));
                Ok(text)
            }
            other => Err(ParseError::UnexpectedToken {
                expected: "a string literal".to_owned(),
                found: other.to_string(),
                line: tok.line,
            }),
        }
    }

    fn constant_literal(&mut self, result_type: RegId) -> Result<(), ParseError> {
        let line = self.line();
        let ty = *self
            .types
            .get(&result_type)
            .ok_or(ParseError::UnknownConstantType { ty: result_type, line })?;
        let tok = self.take("a constant value")?;

        let invalid = || ParseError::InvalidLiteral {
            text: tok.node.to_string(),
            line: tok.line,
        };

        match (ty.kind, &tok.node) {
            (NumericKind::Int, Token::Int(v)) => {
                let fits = match ty.width {
                    64 => (i128::from(i64::MIN)..=i128::from(u64::MAX)).contains(v),
                    w if w < 64 => {
                        let lo = -(1i128 << (w.max(1) - 1));
                        let hi = (1i128 << w) - 1;
                        (lo..=hi).contains(v)
                    }
                    _ => true,
                };
                if !fits {
                    return Err(invalid());
                }
                self.hint = if ty.width == 16 {
                    LiteralHint::Width16
                } else {
                    LiteralHint::None
                };
                self.push_literal_words(*v as i64 as u64, ty.width, tok.line)
            }
            (NumericKind::Float, Token::Float(f)) => {
                let (bits, hint) = match ty.width {
                    16 => (u64::from(f32_to_f16_bits(*f as f32)), LiteralHint::Width16),
                    32 => (u64::from((*f as f32).to_bits()), LiteralHint::Float),
                    64 => (f.to_bits(), LiteralHint::Float),
                    width => {
                        return Err(ParseError::from(EncodeError::UnsupportedLiteralWidth { width }).at_line(tok.line))
                    }
                };
                self.hint = hint;
                self.push_literal_words(bits, ty.width, tok.line)
            }
            // Raw bit patterns: half floats and non-finite values print this way.
            (NumericKind::Float, Token::Int(v)) => {
                let bits = u64::try_from(*v).map_err(|_| invalid())?;
                if ty.width < 64 && bits >> ty.width != 0 {
                    return Err(invalid());
                }
                self.hint = if ty.width == 16 {
                    LiteralHint::Width16
                } else {
                    LiteralHint::Float
                };
                self.push_literal_words(bits, ty.width, tok.line)
            }
            _ => Err(invalid()),
        }
    }

    fn any(&mut self) -> Result<(), ParseError> {
        let tok = self.take("an operand")?;
        let operand = match &tok.node {
            Token::Id(n) => Operand::Reg(Self::reg(*n, tok.line)?),
            Token::Int(v) => Operand::Imm(Self::word(*v, &tok.node, tok.line)?),
            Token::Ident(text) => Operand::Expr(SymbolicExpr(text.clone())),
            other => {
                return Err(ParseError::UnexpectedToken {
                    expected: "a register, integer or symbol".to_owned(),
                    found: other.to_string(),
                    line: tok.line,
                })
            }
        };
        self.operands.push(operand);
        Ok(())
    }

    fn skip(&mut self) -> Result<(), ParseError> {
        Err(self.unexpected("an interface id"))
    }

    fn finish(&mut self, _opcode: Opcode) -> Result<(), ParseError> {
        if self.remaining() > 0 {
            return Err(self.unexpected("end of line"));
        }
        Ok(())
    }
}
