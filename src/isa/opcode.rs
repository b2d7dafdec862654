//! SPIR-V opcodes known to the encoder.
//!
//! Only the opcodes this backend emits are listed. Numeric values follow the
//! SPIR-V core grammar.

/// An instruction opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Opcode {
    Nop,
    Undef,
    SourceContinued,
    Source,
    SourceExtension,
    Name,
    MemberName,
    String,
    Line,
    Extension,
    ExtInstImport,
    ExtInst,
    MemoryModel,
    EntryPoint,
    ExecutionMode,
    Capability,
    TypeVoid,
    TypeBool,
    TypeInt,
    TypeFloat,
    TypeVector,
    TypeMatrix,
    TypeImage,
    TypeSampler,
    TypeSampledImage,
    TypeArray,
    TypeRuntimeArray,
    TypeStruct,
    TypeOpaque,
    TypePointer,
    TypeFunction,
    ConstantTrue,
    ConstantFalse,
    Constant,
    ConstantComposite,
    ConstantNull,
    Function,
    FunctionParameter,
    FunctionEnd,
    FunctionCall,
    Variable,
    Load,
    Store,
    CopyMemory,
    CopyMemorySized,
    AccessChain,
    InBoundsAccessChain,
    PtrAccessChain,
    Decorate,
    MemberDecorate,
    VectorShuffle,
    CompositeConstruct,
    CompositeExtract,
    CompositeInsert,
    SampledImage,
    ImageSampleImplicitLod,
    ImageSampleExplicitLod,
    ImageSampleDrefImplicitLod,
    ImageFetch,
    ImageGather,
    ImageRead,
    ImageWrite,
    ConvertFToU,
    ConvertFToS,
    ConvertSToF,
    ConvertUToF,
    UConvert,
    SConvert,
    FConvert,
    Bitcast,
    SNegate,
    FNegate,
    IAdd,
    FAdd,
    ISub,
    FSub,
    IMul,
    FMul,
    UDiv,
    SDiv,
    FDiv,
    UMod,
    SRem,
    SMod,
    FRem,
    LogicalOr,
    LogicalAnd,
    LogicalNot,
    Select,
    IEqual,
    INotEqual,
    UGreaterThan,
    SGreaterThan,
    ULessThan,
    SLessThan,
    FOrdEqual,
    FOrdLessThan,
    FOrdGreaterThan,
    ShiftRightLogical,
    ShiftRightArithmetic,
    ShiftLeftLogical,
    BitwiseOr,
    BitwiseXor,
    BitwiseAnd,
    Not,
    ControlBarrier,
    MemoryBarrier,
    Phi,
    LoopMerge,
    SelectionMerge,
    Label,
    Branch,
    BranchConditional,
    Switch,
    Kill,
    Return,
    ReturnValue,
    Unreachable,
    ImageSparseSampleImplicitLod,
    NoLine,
    ModuleProcessed,
    ExecutionModeId,
}

impl Opcode {
    /// Every opcode, in numeric order.
    pub const ALL: &'static [Opcode] = &[
        Opcode::Nop,
        Opcode::Undef,
        Opcode::SourceContinued,
        Opcode::Source,
        Opcode::SourceExtension,
        Opcode::Name,
        Opcode::MemberName,
        Opcode::String,
        Opcode::Line,
        Opcode::Extension,
        Opcode::ExtInstImport,
        Opcode::ExtInst,
        Opcode::MemoryModel,
        Opcode::EntryPoint,
        Opcode::ExecutionMode,
        Opcode::Capability,
        Opcode::TypeVoid,
        Opcode::TypeBool,
        Opcode::TypeInt,
        Opcode::TypeFloat,
        Opcode::TypeVector,
        Opcode::TypeMatrix,
        Opcode::TypeImage,
        Opcode::TypeSampler,
        Opcode::TypeSampledImage,
        Opcode::TypeArray,
        Opcode::TypeRuntimeArray,
        Opcode::TypeStruct,
        Opcode::TypeOpaque,
        Opcode::TypePointer,
        Opcode::TypeFunction,
        Opcode::ConstantTrue,
        Opcode::ConstantFalse,
        Opcode::Constant,
        Opcode::ConstantComposite,
        Opcode::ConstantNull,
        Opcode::Function,
        Opcode::FunctionParameter,
        Opcode::FunctionEnd,
        Opcode::FunctionCall,
        Opcode::Variable,
        Opcode::Load,
        Opcode::Store,
        Opcode::CopyMemory,
        Opcode::CopyMemorySized,
        Opcode::AccessChain,
        Opcode::InBoundsAccessChain,
        Opcode::PtrAccessChain,
        Opcode::Decorate,
        Opcode::MemberDecorate,
        Opcode::VectorShuffle,
        Opcode::CompositeConstruct,
        Opcode::CompositeExtract,
        Opcode::CompositeInsert,
        Opcode::SampledImage,
        Opcode::ImageSampleImplicitLod,
        Opcode::ImageSampleExplicitLod,
        Opcode::ImageSampleDrefImplicitLod,
        Opcode::ImageFetch,
        Opcode::ImageGather,
        Opcode::ImageRead,
        Opcode::ImageWrite,
        Opcode::ConvertFToU,
        Opcode::ConvertFToS,
        Opcode::ConvertSToF,
        Opcode::ConvertUToF,
        Opcode::UConvert,
        Opcode::SConvert,
        Opcode::FConvert,
        Opcode::Bitcast,
        Opcode::SNegate,
        Opcode::FNegate,
        Opcode::IAdd,
        Opcode::FAdd,
        Opcode::ISub,
        Opcode::FSub,
        Opcode::IMul,
        Opcode::FMul,
        Opcode::UDiv,
        Opcode::SDiv,
        Opcode::FDiv,
        Opcode::UMod,
        Opcode::SRem,
        Opcode::SMod,
        Opcode::FRem,
        Opcode::LogicalOr,
        Opcode::LogicalAnd,
        Opcode::LogicalNot,
        Opcode::Select,
        Opcode::IEqual,
        Opcode::INotEqual,
        Opcode::UGreaterThan,
        Opcode::SGreaterThan,
        Opcode::ULessThan,
        Opcode::SLessThan,
        Opcode::FOrdEqual,
        Opcode::FOrdLessThan,
        Opcode::FOrdGreaterThan,
        Opcode::ShiftRightLogical,
        Opcode::ShiftRightArithmetic,
        Opcode::ShiftLeftLogical,
        Opcode::BitwiseOr,
        Opcode::BitwiseXor,
        Opcode::BitwiseAnd,
        Opcode::Not,
        Opcode::ControlBarrier,
        Opcode::MemoryBarrier,
        Opcode::Phi,
        Opcode::LoopMerge,
        Opcode::SelectionMerge,
        Opcode::Label,
        Opcode::Branch,
        Opcode::BranchConditional,
        Opcode::Switch,
        Opcode::Kill,
        Opcode::Return,
        Opcode::ReturnValue,
        Opcode::Unreachable,
        Opcode::ImageSparseSampleImplicitLod,
        Opcode::NoLine,
        Opcode::ModuleProcessed,
        Opcode::ExecutionModeId,
    ];

    /// The numeric opcode value used in the binary word stream.
    pub fn value(self) -> u16 {
        match self {
            Opcode::Nop => 0,
            Opcode::Undef => 1,
            Opcode::SourceContinued => 2,
            Opcode::Source => 3,
            Opcode::SourceExtension => 4,
            Opcode::Name => 5,
            Opcode::MemberName => 6,
            Opcode::String => 7,
            Opcode::Line => 8,
            Opcode::Extension => 10,
            Opcode::ExtInstImport => 11,
            Opcode::ExtInst => 12,
            Opcode::MemoryModel => 14,
            Opcode::EntryPoint => 15,
            Opcode::ExecutionMode => 16,
            Opcode::Capability => 17,
            Opcode::TypeVoid => 19,
            Opcode::TypeBool => 20,
            Opcode::TypeInt => 21,
            Opcode::TypeFloat => 22,
            Opcode::TypeVector => 23,
            Opcode::TypeMatrix => 24,
            Opcode::TypeImage => 25,
            Opcode::TypeSampler => 26,
            Opcode::TypeSampledImage => 27,
            Opcode::TypeArray => 28,
            Opcode::TypeRuntimeArray => 29,
            Opcode::TypeStruct => 30,
            Opcode::TypeOpaque => 31,
            Opcode::TypePointer => 32,
            Opcode::TypeFunction => 33,
            Opcode::ConstantTrue => 41,
            Opcode::ConstantFalse => 42,
            Opcode::Constant => 43,
            Opcode::ConstantComposite => 44,
            Opcode::ConstantNull => 46,
            Opcode::Function => 54,
            Opcode::FunctionParameter => 55,
            Opcode::FunctionEnd => 56,
            Opcode::FunctionCall => 57,
            Opcode::Variable => 59,
            Opcode::Load => 61,
            Opcode::Store => 62,
            Opcode::CopyMemory => 63,
            Opcode::CopyMemorySized => 64,
            Opcode::AccessChain => 65,
            Opcode::InBoundsAccessChain => 66,
            Opcode::PtrAccessChain => 67,
            Opcode::Decorate => 71,
            Opcode::MemberDecorate => 72,
            Opcode::VectorShuffle => 79,
            Opcode::CompositeConstruct => 80,
            Opcode::CompositeExtract => 81,
            Opcode::CompositeInsert => 82,
            Opcode::SampledImage => 86,
            Opcode::ImageSampleImplicitLod => 87,
            Opcode::ImageSampleExplicitLod => 88,
            Opcode::ImageSampleDrefImplicitLod => 89,
            Opcode::ImageFetch => 95,
            Opcode::ImageGather => 96,
            Opcode::ImageRead => 98,
            Opcode::ImageWrite => 99,
            Opcode::ConvertFToU => 109,
            Opcode::ConvertFToS => 110,
            Opcode::ConvertSToF => 111,
            Opcode::ConvertUToF => 112,
            Opcode::UConvert => 113,
            Opcode::SConvert => 114,
            Opcode::FConvert => 115,
            Opcode::Bitcast => 124,
            Opcode::SNegate => 126,
            Opcode::FNegate => 127,
            Opcode::IAdd => 128,
            Opcode::FAdd => 129,
            Opcode::ISub => 130,
            Opcode::FSub => 131,
            Opcode::IMul => 132,
            Opcode::FMul => 133,
            Opcode::UDiv => 134,
            Opcode::SDiv => 135,
            Opcode::FDiv => 136,
            Opcode::UMod => 137,
            Opcode::SRem => 138,
            Opcode::SMod => 139,
            Opcode::FRem => 140,
            Opcode::LogicalOr => 166,
            Opcode::LogicalAnd => 167,
            Opcode::LogicalNot => 168,
            Opcode::Select => 169,
            Opcode::IEqual => 170,
            Opcode::INotEqual => 171,
            Opcode::UGreaterThan => 172,
            Opcode::SGreaterThan => 173,
            Opcode::ULessThan => 176,
            Opcode::SLessThan => 177,
            Opcode::FOrdEqual => 180,
            Opcode::FOrdLessThan => 184,
            Opcode::FOrdGreaterThan => 186,
            Opcode::ShiftRightLogical => 194,
            Opcode::ShiftRightArithmetic => 195,
            Opcode::ShiftLeftLogical => 196,
            Opcode::BitwiseOr => 197,
            Opcode::BitwiseXor => 198,
            Opcode::BitwiseAnd => 199,
            Opcode::Not => 200,
            Opcode::ControlBarrier => 224,
            Opcode::MemoryBarrier => 225,
            Opcode::Phi => 245,
            Opcode::LoopMerge => 246,
            Opcode::SelectionMerge => 247,
            Opcode::Label => 248,
            Opcode::Branch => 249,
            Opcode::BranchConditional => 250,
            Opcode::Switch => 251,
            Opcode::Kill => 252,
            Opcode::Return => 253,
            Opcode::ReturnValue => 254,
            Opcode::Unreachable => 255,
            Opcode::ImageSparseSampleImplicitLod => 305,
            Opcode::NoLine => 317,
            Opcode::ModuleProcessed => 330,
            Opcode::ExecutionModeId => 331,
        }
    }

    /// The assembly mnemonic, e.g. `OpTypeInt`.
    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Nop => "OpNop",
            Opcode::Undef => "OpUndef",
            Opcode::SourceContinued => "OpSourceContinued",
            Opcode::Source => "OpSource",
            Opcode::SourceExtension => "OpSourceExtension",
            Opcode::Name => "OpName",
            Opcode::MemberName => "OpMemberName",
            Opcode::String => "OpString",
            Opcode::Line => "OpLine",
            Opcode::Extension => "OpExtension",
            Opcode::ExtInstImport => "OpExtInstImport",
            Opcode::ExtInst => "OpExtInst",
            Opcode::MemoryModel => "OpMemoryModel",
            Opcode::EntryPoint => "OpEntryPoint",
            Opcode::ExecutionMode => "OpExecutionMode",
            Opcode::Capability => "OpCapability",
            Opcode::TypeVoid => "OpTypeVoid",
            Opcode::TypeBool => "OpTypeBool",
            Opcode::TypeInt => "OpTypeInt",
            Opcode::TypeFloat => "OpTypeFloat",
            Opcode::TypeVector => "OpTypeVector",
            Opcode::TypeMatrix => "OpTypeMatrix",
            Opcode::TypeImage => "OpTypeImage",
            Opcode::TypeSampler => "OpTypeSampler",
            Opcode::TypeSampledImage => "OpTypeSampledImage",
            Opcode::TypeArray => "OpTypeArray",
            Opcode::TypeRuntimeArray => "OpTypeRuntimeArray",
            Opcode::TypeStruct => "OpTypeStruct",
            Opcode::TypeOpaque => "OpTypeOpaque",
            Opcode::TypePointer => "OpTypePointer",
            Opcode::TypeFunction => "OpTypeFunction",
            Opcode::ConstantTrue => "OpConstantTrue",
            Opcode::ConstantFalse => "OpConstantFalse",
            Opcode::Constant => "OpConstant",
            Opcode::ConstantComposite => "OpConstantComposite",
            Opcode::ConstantNull => "OpConstantNull",
            Opcode::Function => "OpFunction",
            Opcode::FunctionParameter => "OpFunctionParameter",
            Opcode::FunctionEnd => "OpFunctionEnd",
            Opcode::FunctionCall => "OpFunctionCall",
            Opcode::Variable => "OpVariable",
            Opcode::Load => "OpLoad",
            Opcode::Store => "OpStore",
            Opcode::CopyMemory => "OpCopyMemory",
            Opcode::CopyMemorySized => "OpCopyMemorySized",
            Opcode::AccessChain => "OpAccessChain",
            Opcode::InBoundsAccessChain => "OpInBoundsAccessChain",
            Opcode::PtrAccessChain => "OpPtrAccessChain",
            Opcode::Decorate => "OpDecorate",
            Opcode::MemberDecorate => "OpMemberDecorate",
            Opcode::VectorShuffle => "OpVectorShuffle",
            Opcode::CompositeConstruct => "OpCompositeConstruct",
            Opcode::CompositeExtract => "OpCompositeExtract",
            Opcode::CompositeInsert => "OpCompositeInsert",
            Opcode::SampledImage => "OpSampledImage",
            Opcode::ImageSampleImplicitLod => "OpImageSampleImplicitLod",
            Opcode::ImageSampleExplicitLod => "OpImageSampleExplicitLod",
            Opcode::ImageSampleDrefImplicitLod => "OpImageSampleDrefImplicitLod",
            Opcode::ImageFetch => "OpImageFetch",
            Opcode::ImageGather => "OpImageGather",
            Opcode::ImageRead => "OpImageRead",
            Opcode::ImageWrite => "OpImageWrite",
            Opcode::ConvertFToU => "OpConvertFToU",
            Opcode::ConvertFToS => "OpConvertFToS",
            Opcode::ConvertSToF => "OpConvertSToF",
            Opcode::ConvertUToF => "OpConvertUToF",
            Opcode::UConvert => "OpUConvert",
            Opcode::SConvert => "OpSConvert",
            Opcode::FConvert => "OpFConvert",
            Opcode::Bitcast => "OpBitcast",
            Opcode::SNegate => "OpSNegate",
            Opcode::FNegate => "OpFNegate",
            Opcode::IAdd => "OpIAdd",
            Opcode::FAdd => "OpFAdd",
            Opcode::ISub => "OpISub",
            Opcode::FSub => "OpFSub",
            Opcode::IMul => "OpIMul",
            Opcode::FMul => "OpFMul",
            Opcode::UDiv => "OpUDiv",
            Opcode::SDiv => "OpSDiv",
            Opcode::FDiv => "OpFDiv",
            Opcode::UMod => "OpUMod",
            Opcode::SRem => "OpSRem",
            Opcode::SMod => "OpSMod",
            Opcode::FRem => "OpFRem",
            Opcode::LogicalOr => "OpLogicalOr",
            Opcode::LogicalAnd => "OpLogicalAnd",
            Opcode::LogicalNot => "OpLogicalNot",
            Opcode::Select => "OpSelect",
            Opcode::IEqual => "OpIEqual",
            Opcode::INotEqual => "OpINotEqual",
            Opcode::UGreaterThan => "OpUGreaterThan",
            Opcode::SGreaterThan => "OpSGreaterThan",
            Opcode::ULessThan => "OpULessThan",
            Opcode::SLessThan => "OpSLessThan",
            Opcode::FOrdEqual => "OpFOrdEqual",
            Opcode::FOrdLessThan => "OpFOrdLessThan",
            Opcode::FOrdGreaterThan => "OpFOrdGreaterThan",
            Opcode::ShiftRightLogical => "OpShiftRightLogical",
            Opcode::ShiftRightArithmetic => "OpShiftRightArithmetic",
            Opcode::ShiftLeftLogical => "OpShiftLeftLogical",
            Opcode::BitwiseOr => "OpBitwiseOr",
            Opcode::BitwiseXor => "OpBitwiseXor",
            Opcode::BitwiseAnd => "OpBitwiseAnd",
            Opcode::Not => "OpNot",
            Opcode::ControlBarrier => "OpControlBarrier",
            Opcode::MemoryBarrier => "OpMemoryBarrier",
            Opcode::Phi => "OpPhi",
            Opcode::LoopMerge => "OpLoopMerge",
            Opcode::SelectionMerge => "OpSelectionMerge",
            Opcode::Label => "OpLabel",
            Opcode::Branch => "OpBranch",
            Opcode::BranchConditional => "OpBranchConditional",
            Opcode::Switch => "OpSwitch",
            Opcode::Kill => "OpKill",
            Opcode::Return => "OpReturn",
            Opcode::ReturnValue => "OpReturnValue",
            Opcode::Unreachable => "OpUnreachable",
            Opcode::ImageSparseSampleImplicitLod => "OpImageSparseSampleImplicitLod",
            Opcode::NoLine => "OpNoLine",
            Opcode::ModuleProcessed => "OpModuleProcessed",
            Opcode::ExecutionModeId => "OpExecutionModeId",
        }
    }

    /// Looks an opcode up by its mnemonic (exact match, including the `Op` prefix).
    pub fn from_mnemonic(text: &str) -> Option<Opcode> {
        Opcode::ALL.iter().copied().find(|op| op.mnemonic() == text)
    }

    /// Looks an opcode up by its numeric value.
    pub fn from_value(value: u16) -> Option<Opcode> {
        Opcode::ALL.iter().copied().find(|op| op.value() == value)
    }

    /// Block terminators: the last instruction of every basic block.
    pub fn is_terminator(self) -> bool {
        matches!(
            self,
            Opcode::Branch
                | Opcode::BranchConditional
                | Opcode::Switch
                | Opcode::Kill
                | Opcode::Return
                | Opcode::ReturnValue
                | Opcode::Unreachable
        )
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.mnemonic())
    }
}
