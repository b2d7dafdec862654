//! Per-opcode operand shapes.
//!
//! Every opcode has a fixed prefix of typed operands followed by a tail. The
//! tail tag tells the dispatcher how to walk whatever follows the prefix; it
//! is matched exactly once per instruction in `codegen::dispatch`.

use crate::isa::category::OperandCategory;
use crate::isa::category::OperandCategory as Cat;
use crate::isa::opcode::Opcode;

/// The kind of one fixed operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandKind {
    /// A register (`%N`).
    Id,
    /// A 32-bit literal number.
    Literal,
    /// An enumerated or bitmask operand printed by name.
    Symbolic(OperandCategory),
    /// The instruction number inside an extended set, printed by name when
    /// the set is known.
    ExtInstNumber,
}

/// What follows a leading string literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringTail {
    /// Nothing: the string is the whole tail.
    Nothing,
    /// Interface ids; immediates are skipped.
    Interface,
    /// A plain operand list.
    Plain,
}

/// The shape of the operands following the fixed prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TailShape {
    /// Not variadic.
    Fixed,
    /// Each remaining operand printed by its own kind.
    Plain,
    /// One or two literal words forming a single 32- or 64-bit value.
    ConstantLiteral,
    /// A string literal, then `StringTail`.
    StringFirst(StringTail),
    /// Shape selected by the decoration kind in the last fixed operand.
    Decoration,
    /// Shape selected by the imported set and the extended opcode number.
    ExtInst,
    /// Repeated memory-operand masks, each optionally followed by alignment.
    MemoryAccess,
    /// An image-operand mask followed by a plain list.
    ImageOperands,
    /// At most one enumerated operand.
    OptionalSymbolic(OperandCategory),
}

/// The static operand shape of one opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperandShape {
    pub fixed: &'static [OperandKind],
    pub tail: TailShape,
}

impl OperandShape {
    const fn new(fixed: &'static [OperandKind], tail: TailShape) -> Self {
        Self { fixed, tail }
    }

    pub fn is_variadic(&self) -> bool {
        self.tail != TailShape::Fixed
    }
}

use OperandKind::{ExtInstNumber, Id, Literal, Symbolic};

const NONE: &[OperandKind] = &[];
const ID: &[OperandKind] = &[Id];
const ID_ID: &[OperandKind] = &[Id, Id];
const ID_ID_ID: &[OperandKind] = &[Id, Id, Id];
const ID_ID_ID_ID: &[OperandKind] = &[Id, Id, Id, Id];
const ID_ID_ID_ID_ID: &[OperandKind] = &[Id, Id, Id, Id, Id];

impl Opcode {
    /// The operand shape of this opcode.
    pub fn shape(self) -> OperandShape {
        use TailShape::*;
        match self {
            Opcode::Nop
            | Opcode::FunctionEnd
            | Opcode::Kill
            | Opcode::Return
            | Opcode::Unreachable
            | Opcode::NoLine => OperandShape::new(NONE, Fixed),

            // Debug and module-level declarations.
            Opcode::SourceContinued => OperandShape::new(NONE, StringFirst(StringTail::Nothing)),
            Opcode::Source => OperandShape::new(&[Symbolic(Cat::SourceLanguage), Literal], Plain),
            Opcode::SourceExtension | Opcode::Extension | Opcode::ModuleProcessed => {
                OperandShape::new(NONE, StringFirst(StringTail::Nothing))
            }
            Opcode::Name | Opcode::String | Opcode::ExtInstImport => {
                OperandShape::new(ID, StringFirst(StringTail::Nothing))
            }
            Opcode::MemberName => OperandShape::new(&[Id, Literal], StringFirst(StringTail::Nothing)),
            Opcode::Line => OperandShape::new(&[Id, Literal, Literal], Fixed),
            Opcode::ExtInst => OperandShape::new(&[Id, Id, Id, ExtInstNumber], ExtInst),
            Opcode::MemoryModel => OperandShape::new(
                &[Symbolic(Cat::AddressingModel), Symbolic(Cat::MemoryModel)],
                Fixed,
            ),
            Opcode::EntryPoint => OperandShape::new(
                &[Symbolic(Cat::ExecutionModel), Id],
                StringFirst(StringTail::Interface),
            ),
            Opcode::ExecutionMode => OperandShape::new(&[Id, Symbolic(Cat::ExecutionMode)], Plain),
            Opcode::ExecutionModeId => OperandShape::new(&[Id, Symbolic(Cat::ExecutionMode)], Plain),
            Opcode::Capability => OperandShape::new(&[Symbolic(Cat::Capability)], Fixed),

            // Types.
            Opcode::TypeVoid | Opcode::TypeBool | Opcode::TypeSampler => {
                OperandShape::new(ID, Fixed)
            }
            Opcode::TypeInt => OperandShape::new(&[Id, Literal, Literal], Fixed),
            Opcode::TypeFloat => OperandShape::new(&[Id, Literal], Fixed),
            Opcode::TypeVector | Opcode::TypeMatrix => {
                OperandShape::new(&[Id, Id, Literal], Fixed)
            }
            Opcode::TypeImage => OperandShape::new(
                &[
                    Id,
                    Id,
                    Symbolic(Cat::Dim),
                    Literal,
                    Literal,
                    Literal,
                    Literal,
                    Symbolic(Cat::ImageFormat),
                ],
                OptionalSymbolic(Cat::AccessQualifier),
            ),
            Opcode::TypeSampledImage | Opcode::TypeRuntimeArray => OperandShape::new(ID_ID, Fixed),
            Opcode::TypeArray => OperandShape::new(ID_ID_ID, Fixed),
            Opcode::TypeStruct => OperandShape::new(ID, Plain),
            Opcode::TypeOpaque => OperandShape::new(ID, StringFirst(StringTail::Nothing)),
            Opcode::TypePointer => {
                OperandShape::new(&[Id, Symbolic(Cat::StorageClass), Id], Fixed)
            }
            Opcode::TypeFunction => OperandShape::new(ID_ID, Plain),

            // Constants.
            Opcode::ConstantTrue | Opcode::ConstantFalse | Opcode::ConstantNull | Opcode::Undef => {
                OperandShape::new(ID_ID, Fixed)
            }
            Opcode::Constant => OperandShape::new(ID_ID, ConstantLiteral),
            Opcode::ConstantComposite => OperandShape::new(ID_ID, Plain),

            // Functions.
            Opcode::Function => OperandShape::new(
                &[Id, Id, Symbolic(Cat::FunctionControl), Id],
                Fixed,
            ),
            Opcode::FunctionParameter => OperandShape::new(ID_ID, Fixed),
            Opcode::FunctionCall => OperandShape::new(ID_ID_ID, Plain),

            // Memory.
            Opcode::Variable => OperandShape::new(&[Id, Id, Symbolic(Cat::StorageClass)], Plain),
            Opcode::Load => OperandShape::new(ID_ID_ID, MemoryAccess),
            Opcode::Store | Opcode::CopyMemory => OperandShape::new(ID_ID, MemoryAccess),
            Opcode::CopyMemorySized => OperandShape::new(ID_ID_ID, MemoryAccess),
            Opcode::AccessChain | Opcode::InBoundsAccessChain => {
                OperandShape::new(ID_ID_ID, Plain)
            }
            Opcode::PtrAccessChain => OperandShape::new(ID_ID_ID_ID, Plain),

            // Annotations.
            Opcode::Decorate => OperandShape::new(&[Id, Symbolic(Cat::Decoration)], Decoration),
            Opcode::MemberDecorate => {
                OperandShape::new(&[Id, Literal, Symbolic(Cat::Decoration)], Decoration)
            }

            // Composites.
            Opcode::VectorShuffle => OperandShape::new(ID_ID_ID_ID, Plain),
            Opcode::CompositeConstruct => OperandShape::new(ID_ID, Plain),
            Opcode::CompositeExtract => OperandShape::new(ID_ID_ID, Plain),
            Opcode::CompositeInsert => OperandShape::new(ID_ID_ID_ID, Plain),

            // Images.
            Opcode::SampledImage => OperandShape::new(ID_ID_ID_ID, Fixed),
            Opcode::ImageSampleImplicitLod
            | Opcode::ImageSampleExplicitLod
            | Opcode::ImageFetch
            | Opcode::ImageRead
            | Opcode::ImageSparseSampleImplicitLod => OperandShape::new(ID_ID_ID_ID, ImageOperands),
            Opcode::ImageSampleDrefImplicitLod | Opcode::ImageGather => {
                OperandShape::new(ID_ID_ID_ID_ID, ImageOperands)
            }
            Opcode::ImageWrite => OperandShape::new(ID_ID_ID, ImageOperands),

            // Conversions and unary arithmetic.
            Opcode::ConvertFToU
            | Opcode::ConvertFToS
            | Opcode::ConvertSToF
            | Opcode::ConvertUToF
            | Opcode::UConvert
            | Opcode::SConvert
            | Opcode::FConvert
            | Opcode::Bitcast
            | Opcode::SNegate
            | Opcode::FNegate
            | Opcode::LogicalNot
            | Opcode::Not => OperandShape::new(ID_ID_ID, Fixed),

            // Binary arithmetic, logic and comparison.
            Opcode::IAdd
            | Opcode::FAdd
            | Opcode::ISub
            | Opcode::FSub
            | Opcode::IMul
            | Opcode::FMul
            | Opcode::UDiv
            | Opcode::SDiv
            | Opcode::FDiv
            | Opcode::UMod
            | Opcode::SRem
            | Opcode::SMod
            | Opcode::FRem
            | Opcode::LogicalOr
            | Opcode::LogicalAnd
            | Opcode::IEqual
            | Opcode::INotEqual
            | Opcode::UGreaterThan
            | Opcode::SGreaterThan
            | Opcode::ULessThan
            | Opcode::SLessThan
            | Opcode::FOrdEqual
            | Opcode::FOrdLessThan
            | Opcode::FOrdGreaterThan
            | Opcode::ShiftRightLogical
            | Opcode::ShiftRightArithmetic
            | Opcode::ShiftLeftLogical
            | Opcode::BitwiseOr
            | Opcode::BitwiseXor
            | Opcode::BitwiseAnd => OperandShape::new(ID_ID_ID_ID, Fixed),
            Opcode::Select => OperandShape::new(ID_ID_ID_ID_ID, Fixed),

            // Barriers.
            Opcode::ControlBarrier => OperandShape::new(ID_ID_ID, Fixed),
            Opcode::MemoryBarrier => OperandShape::new(ID_ID, Fixed),

            // Control flow.
            Opcode::Phi => OperandShape::new(ID_ID, Plain),
            Opcode::LoopMerge => {
                OperandShape::new(&[Id, Id, Symbolic(Cat::LoopControl)], Plain)
            }
            Opcode::SelectionMerge => {
                OperandShape::new(&[Id, Symbolic(Cat::SelectionControl)], Fixed)
            }
            Opcode::Label | Opcode::Branch | Opcode::ReturnValue => OperandShape::new(ID, Fixed),
            Opcode::BranchConditional => OperandShape::new(ID_ID_ID, Plain),
            Opcode::Switch => OperandShape::new(ID_ID, Plain),
        }
    }
}
