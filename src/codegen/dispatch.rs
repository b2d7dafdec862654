//! Variadic operand dispatch.
//!
//! `walk_instruction` is the single decision procedure for an instruction's
//! operand layout. It walks the fixed prefix from the opcode's
//! `OperandShape`, then switches once on the `TailShape` tag; a few tails
//! switch again on a value already walked (the decoration kind, the extended
//! set and instruction number, a memory-operand mask).
//!
//! The procedure does not know whether operands are being printed or parsed.
//! It drives an `OperandWalker`: the text printer renders the operands of an
//! existing `Instruction`, the text reader consumes tokens and builds one.

use crate::codegen::registry::ExtInstRegistry;
use crate::error::EncodeError;
use crate::ir::RegId;
use crate::isa::{
    DecorationKind, OperandCategory, OperandKind, Opcode, SetKind, StringTail, TailShape,
    MEMORY_OPERAND_ALIGNED,
};

/// One direction of operand traversal.
///
/// Each method consumes exactly one operand (a string literal counts as one,
/// whatever its word length) and reports the value the dispatcher needs for
/// later decisions.
pub trait OperandWalker {
    type Error: From<EncodeError>;

    /// Operands left to walk.
    fn remaining(&self) -> usize;

    /// Whether the next operand is an immediate (literal, enum or mask).
    fn next_is_immediate(&self) -> bool;

    fn id(&mut self) -> Result<RegId, Self::Error>;

    fn literal(&mut self) -> Result<u32, Self::Error>;

    fn symbolic(&mut self, category: OperandCategory) -> Result<u32, Self::Error>;

    fn ext_inst_number(&mut self, set: SetKind) -> Result<u32, Self::Error>;

    fn string(&mut self) -> Result<String, Self::Error>;

    /// The literal value of an `OpConstant` whose result type is `result_type`.
    fn constant_literal(&mut self, result_type: RegId) -> Result<(), Self::Error>;

    /// An operand of a plain list, handled according to its own kind.
    fn any(&mut self) -> Result<(), Self::Error>;

    /// Passes over the next operand without handling it.
    fn skip(&mut self) -> Result<(), Self::Error>;

    /// Called once the dispatcher is done; `remaining()` may be non-zero.
    fn finish(&mut self, opcode: Opcode) -> Result<(), Self::Error>;
}

/// Values from the fixed prefix that later tail decisions depend on.
#[derive(Debug, Default)]
struct FixedValues {
    ids: Vec<RegId>,
    /// The last fixed immediate: the selector operand.
    selector: Option<u32>,
    set: Option<SetKind>,
}

/// Walks all operands of one `opcode` instruction.
///
/// `registry` is read to resolve `OpExtInst` sets and written when an
/// `OpExtInstImport` is walked.
pub fn walk_instruction<W: OperandWalker>(
    opcode: Opcode,
    walker: &mut W,
    registry: &mut ExtInstRegistry,
) -> Result<(), W::Error> {
    let shape = opcode.shape();
    let mut fixed = FixedValues::default();

    for (index, kind) in shape.fixed.iter().enumerate() {
        if walker.remaining() == 0 {
            return Err(EncodeError::malformed(
                opcode,
                format!("missing fixed operand {} ({:?})", index, kind),
            )
            .into());
        }
        match *kind {
            OperandKind::Id => fixed.ids.push(walker.id()?),
            OperandKind::Literal => fixed.selector = Some(walker.literal()?),
            OperandKind::Symbolic(category) => fixed.selector = Some(walker.symbolic(category)?),
            OperandKind::ExtInstNumber => {
                let handle = fixed.ids.last().copied().ok_or_else(|| {
                    EncodeError::malformed(opcode, "extended instruction without a set operand")
                })?;
                let set = registry.lookup(handle)?;
                fixed.set = Some(set);
                fixed.selector = Some(walker.ext_inst_number(set)?);
            }
        }
    }

    log::trace!("{}: tail {:?}, {} operand(s) left", opcode, shape.tail, walker.remaining());

    match shape.tail {
        TailShape::Fixed => {}
        TailShape::Plain => walk_plain(walker)?,
        TailShape::ConstantLiteral => {
            let ty = fixed
                .ids
                .first()
                .copied()
                .ok_or_else(|| EncodeError::malformed(opcode, "constant without a result type"))?;
            walker.constant_literal(ty)?;
        }
        TailShape::StringFirst(rest) => walk_string_first(opcode, rest, &fixed, walker, registry)?,
        TailShape::Decoration => walk_decoration(opcode, fixed.selector, walker)?,
        TailShape::ExtInst => walk_ext_inst(opcode, &fixed, walker)?,
        TailShape::MemoryAccess => walk_memory_access(opcode, walker)?,
        TailShape::ImageOperands => walk_image_operands(opcode, walker)?,
        TailShape::OptionalSymbolic(category) => {
            if walker.remaining() > 0 {
                walker.symbolic(category)?;
            }
        }
    }

    walker.finish(opcode)
}

fn walk_plain<W: OperandWalker>(walker: &mut W) -> Result<(), W::Error> {
    while walker.remaining() > 0 {
        walker.any()?;
    }
    Ok(())
}

fn walk_string_first<W: OperandWalker>(
    opcode: Opcode,
    rest: StringTail,
    fixed: &FixedValues,
    walker: &mut W,
    registry: &mut ExtInstRegistry,
) -> Result<(), W::Error> {
    if walker.remaining() == 0 {
        return Err(EncodeError::malformed(opcode, "missing string literal").into());
    }
    let text = walker.string()?;

    if opcode == Opcode::ExtInstImport {
        if let Some(&handle) = fixed.ids.first() {
            registry.bind(handle, &text);
        }
    }

    match rest {
        StringTail::Nothing => Ok(()),
        StringTail::Plain => walk_plain(walker),
        StringTail::Interface => {
            // Interface ids only; immediates belong to the literal.
            while walker.remaining() > 0 {
                if walker.next_is_immediate() {
                    walker.skip()?;
                } else {
                    walker.any()?;
                }
            }
            Ok(())
        }
    }
}

fn walk_decoration<W: OperandWalker>(
    opcode: Opcode,
    selector: Option<u32>,
    walker: &mut W,
) -> Result<(), W::Error> {
    let selector = selector.ok_or_else(|| EncodeError::malformed(opcode, "missing decoration kind"))?;
    if walker.remaining() == 0 {
        return Ok(());
    }

    match DecorationKind::from_value(selector) {
        DecorationKind::BuiltIn => {
            walker.symbolic(OperandCategory::BuiltIn)?;
        }
        DecorationKind::UniformId => {
            if walker.next_is_immediate() {
                walker.symbolic(OperandCategory::Scope)?;
            } else {
                walker.any()?;
            }
        }
        DecorationKind::FuncParamAttr => {
            walker.symbolic(OperandCategory::FunctionParameterAttribute)?;
        }
        DecorationKind::FPRoundingMode => {
            walker.symbolic(OperandCategory::FPRoundingMode)?;
        }
        DecorationKind::FPFastMathMode => {
            walker.symbolic(OperandCategory::FPFastMathMode)?;
        }
        DecorationKind::LinkageAttributes => {
            walker.string()?;
            if walker.remaining() == 0 {
                return Err(EncodeError::malformed(
                    opcode,
                    "LinkageAttributes decoration is missing its linkage type",
                )
                .into());
            }
            walker.symbolic(OperandCategory::LinkageType)?;
        }
        DecorationKind::UserSemantic => {
            walker.string()?;
        }
        DecorationKind::Other => walk_plain(walker)?,
    }
    Ok(())
}

fn walk_ext_inst<W: OperandWalker>(
    opcode: Opcode,
    fixed: &FixedValues,
    walker: &mut W,
) -> Result<(), W::Error> {
    let (Some(set), Some(number)) = (fixed.set, fixed.selector) else {
        return Err(EncodeError::malformed(opcode, "missing extended instruction number").into());
    };

    if !set.ends_with_rounding_mode(number) {
        return walk_plain(walker);
    }

    let count = walker.remaining();
    if count == 0 {
        return Err(EncodeError::malformed(
            opcode,
            format!("{} requires a trailing rounding mode", set.instruction_name(number)),
        )
        .into());
    }
    for _ in 1..count {
        walker.any()?;
    }
    walker.symbolic(OperandCategory::FPRoundingMode)?;
    Ok(())
}

fn walk_memory_access<W: OperandWalker>(opcode: Opcode, walker: &mut W) -> Result<(), W::Error> {
    while walker.remaining() > 0 {
        if !walker.next_is_immediate() {
            return Err(EncodeError::malformed(opcode, "expected a memory operand mask").into());
        }
        let mask = walker.symbolic(OperandCategory::MemoryOperand)?;
        if mask & MEMORY_OPERAND_ALIGNED != 0 {
            if walker.remaining() == 0 || !walker.next_is_immediate() {
                return Err(EncodeError::malformed(
                    opcode,
                    "Aligned memory operand is missing its alignment literal",
                )
                .into());
            }
            walker.literal()?;
        }
    }
    Ok(())
}

fn walk_image_operands<W: OperandWalker>(opcode: Opcode, walker: &mut W) -> Result<(), W::Error> {
    if walker.remaining() == 0 {
        return Ok(());
    }
    if !walker.next_is_immediate() {
        return Err(EncodeError::malformed(opcode, "expected an image operand mask").into());
    }
    walker.symbolic(OperandCategory::ImageOperand)?;
    walk_plain(walker)
}
