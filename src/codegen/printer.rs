//! SPIR-V text emitter.
//!
//! Emits the textual form of a `Module`: one instruction per line, the
//! mnemonic followed by its operands separated by single spaces. Output is
//! deterministic: globals in order, then functions in order, blocks in their
//! current order, instructions in program order.

use std::fmt::Write;

use crate::codegen::asm_info::SPIRV_ASM_INFO;
use crate::codegen::dispatch::{walk_instruction, OperandWalker};
use crate::codegen::registry::ExtInstRegistry;
use crate::codegen::string_codec::decode_prefix;
use crate::error::{CodegenError, EncodeError};
use crate::ir::{Function, Instruction, LiteralHint, Module, Operand, RegId};
use crate::isa::{OperandCategory, Opcode, SetKind};
use crate::EmitOptions;

/// Renders one instruction (without a trailing newline) into `out`.
///
/// `registry` must already hold every set this instruction refers to; an
/// `OpExtInstImport` binds its own handle as a side effect.
pub fn emit_instruction(
    out: &mut String,
    instr: &Instruction,
    registry: &mut ExtInstRegistry,
) -> Result<(), EncodeError> {
    out.push_str(instr.opcode.mnemonic());
    let mut writer = TextWriter {
        instr,
        pos: 0,
        out,
    };
    walk_instruction(instr.opcode, &mut writer, registry)
}

/// Renders one instruction to a fresh `String`.
pub fn instruction_text(instr: &Instruction, registry: &mut ExtInstRegistry) -> Result<String, EncodeError> {
    let mut out = String::new();
    emit_instruction(&mut out, instr, registry)?;
    Ok(out)
}

/// Emits a full text dump of the module.
pub fn emit_module(module: &Module, options: &EmitOptions) -> Result<String, CodegenError> {
    let comment = SPIRV_ASM_INFO.comment_prefix;
    let mut registry = ExtInstRegistry::new();
    let mut out = String::new();

    if options.comments {
        writeln!(out, "{} SPIR-V", comment)?;
        writeln!(out, "{} Module: {}", comment, module.name)?;
    }

    for (i, instr) in module.globals.iter().enumerate() {
        emit_line(&mut out, instr, &mut registry, || {
            format!("global instruction {} ({})", i, instr.opcode)
        })?;
    }

    for func in module.functions() {
        emit_function(&mut out, func, &mut registry, options)?;
    }

    log::debug!(
        "emitted module '{}': {} global(s), {} function(s), {} extended set(s)",
        module.name,
        module.globals.len(),
        module.functions().len(),
        registry.len()
    );
    Ok(out)
}

fn emit_function(
    out: &mut String,
    func: &Function,
    registry: &mut ExtInstRegistry,
    options: &EmitOptions,
) -> Result<(), CodegenError> {
    let comment = SPIRV_ASM_INFO.comment_prefix;
    let name = func.display_name();
    if options.comments {
        writeln!(out, "{} -- Begin function {}", comment, name)?;
    }

    emit_line(out, &func.def, registry, || format!("function '{}' header", name))?;
    for (i, param) in func.params.iter().enumerate() {
        emit_line(out, param, registry, || format!("function '{}' parameter {}", name, i))?;
    }

    for block in &func.blocks {
        let label = Instruction::new(Opcode::Label, vec![Operand::Reg(block.label)]);
        emit_line(out, &label, registry, || format!("function '{}' block {}", name, block.label))?;
        for (i, instr) in block.instrs.iter().enumerate() {
            emit_line(out, instr, registry, || {
                format!(
                    "function '{}', block {}, instruction {} ({})",
                    name, block.label, i, instr.opcode
                )
            })?;
        }
    }

    let end = Instruction::new(Opcode::FunctionEnd, Vec::new());
    emit_line(out, &end, registry, || format!("function '{}' end", name))?;
    if options.comments {
        writeln!(out, "{} -- End function", comment)?;
    }
    Ok(())
}

fn emit_line(
    out: &mut String,
    instr: &Instruction,
    registry: &mut ExtInstRegistry,
    location: impl FnOnce() -> String,
) -> Result<(), CodegenError> {
    emit_instruction(out, instr, registry).map_err(|source| CodegenError::Encode {
        location: location(),
        source,
    })?;
    out.push('\n');
    Ok(())
}

/// Emits one line per function listing its block labels in order.
pub fn emit_block_order(module: &Module) -> Result<String, CodegenError> {
    let mut out = String::new();
    for func in module.functions() {
        write!(out, "{}:", func.display_name())?;
        for label in func.block_order() {
            write!(out, " {}", label)?;
        }
        writeln!(out)?;
    }
    Ok(out)
}

/// Renders the operands of an existing instruction as text.
struct TextWriter<'a> {
    instr: &'a Instruction,
    pos: usize,
    out: &'a mut String,
}

impl TextWriter<'_> {
    fn operands(&self) -> &[Operand] {
        &self.instr.operands
    }

    fn next(&self) -> Option<&Operand> {
        self.instr.operands.get(self.pos)
    }

    fn push(&mut self, text: &str) {
        self.out.push(' ');
        self.out.push_str(text);
    }

    fn expect_imm(&mut self, what: &str) -> Result<u32, EncodeError> {
        match self.next() {
            Some(Operand::Imm(v)) => {
                let v = *v;
                self.pos += 1;
                Ok(v)
            }
            other => Err(EncodeError::malformed(
                self.instr.opcode,
                format!("expected {} at operand {}, found {:?}", what, self.pos, other),
            )),
        }
    }
}

impl OperandWalker for TextWriter<'_> {
    type Error = EncodeError;

    fn remaining(&self) -> usize {
        self.operands().len().saturating_sub(self.pos)
    }

    fn next_is_immediate(&self) -> bool {
        self.next().map_or(false, Operand::is_imm)
    }

    fn id(&mut self) -> Result<RegId, EncodeError> {
        match self.next() {
            Some(Operand::Reg(r)) => {
                let r = *r;
                self.pos += 1;
                self.push(&r.to_string());
                Ok(r)
            }
            other => Err(EncodeError::malformed(
                self.instr.opcode,
                format!("expected a register at operand {}, found {:?}", self.pos, other),
            )),
        }
    }

    fn literal(&mut self) -> Result<u32, EncodeError> {
        let v = self.expect_imm("a literal")?;
        self.push(&(v as i32).to_string());
        Ok(v)
    }

    fn symbolic(&mut self, category: OperandCategory) -> Result<u32, EncodeError> {
        let v = self.expect_imm(&format!("a {:?} operand", category))?;
        self.push(&category.render(v));
        Ok(v)
    }

    fn ext_inst_number(&mut self, set: SetKind) -> Result<u32, EncodeError> {
        let v = self.expect_imm("an extended instruction number")?;
        self.push(&set.instruction_name(v));
        Ok(v)
    }

    fn string(&mut self) -> Result<String, EncodeError> {
        if !self.next_is_immediate() {
            return Err(EncodeError::malformed(
                self.instr.opcode,
                format!("expected a string literal at operand {}", self.pos),
            ));
        }
        let (bytes, words) = decode_prefix(self.operands(), self.pos);
        let text = String::from_utf8_lossy(&bytes).into_owned();

        let mut quoted = String::with_capacity(text.len() + 2);
        quoted.push('"');
        for c in text.chars() {
            if c == '"' {
                quoted.push('\\');
            }
            quoted.push(c);
        }
        quoted.push('"');
        self.push(&quoted);

        self.pos += words;
        Ok(text)
    }

    fn constant_literal(&mut self, _result_type: RegId) -> Result<(), EncodeError> {
        let opcode = self.instr.opcode;
        let words: Vec<u32> = self.operands()[self.pos..]
            .iter()
            .map(Operand::as_imm)
            .collect::<Option<_>>()
            .ok_or_else(|| EncodeError::malformed(opcode, "constant literal words must be immediates"))?;

        let text = match (words.as_slice(), self.instr.hint) {
            ([lo], LiteralHint::Float) => format_float(f64::from(f32::from_bits(*lo)), u64::from(*lo)),
            ([lo, hi], LiteralHint::Float) => {
                let bits = u64::from(*lo) | (u64::from(*hi) << 32);
                format_float(f64::from_bits(bits), bits)
            }
            // Half-width values stay unsigned: the type's signedness is not known here.
            ([lo], LiteralHint::Width16) => lo.to_string(),
            ([lo], _) => (*lo as i32).to_string(),
            ([lo, hi], _) => (u64::from(*lo) | (u64::from(*hi) << 32)).to_string(),
            _ => {
                return Err(EncodeError::malformed(
                    opcode,
                    format!("constant literal has {} words (expected 1 or 2)", words.len()),
                ))
            }
        };
        self.pos += words.len();
        self.push(&text);
        Ok(())
    }

    fn any(&mut self) -> Result<(), EncodeError> {
        if let Some(op) = self.next() {
            let text = op.to_string();
            self.pos += 1;
            self.push(&text);
        }
        Ok(())
    }

    fn skip(&mut self) -> Result<(), EncodeError> {
        self.pos += 1;
        Ok(())
    }

    fn finish(&mut self, opcode: Opcode) -> Result<(), EncodeError> {
        if self.remaining() > 0 {
            log::debug!(
                "{}: {} trailing operand(s) have no printed form for this shape",
                opcode,
                self.remaining()
            );
        }
        Ok(())
    }
}

/// Finite floats print in shortest round-trip form; NaN and infinities print
/// as their raw bits in hex.
fn format_float(value: f64, bits: u64) -> String {
    if value.is_finite() {
        format!("{:?}", value)
    } else {
        format!("{:#x}", bits)
    }
}
