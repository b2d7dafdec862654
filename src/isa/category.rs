//! Symbolic operand categories.
//!
//! Enumerated operands print by name (`Export`, `RTE`) and bitmask operands
//! print as `|`-joined names (`Volatile|Aligned`), with `None` for zero. Values
//! missing from a table fall back to decimal (enums) or a trailing hex
//! remainder (masks) so that unlisted values still survive a round trip.

use std::fmt::Write;

/// The kind of enumerated or bitmask operand in a given position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperandCategory {
    Capability,
    SourceLanguage,
    AddressingModel,
    MemoryModel,
    ExecutionModel,
    ExecutionMode,
    StorageClass,
    Dim,
    ImageFormat,
    AccessQualifier,
    Decoration,
    BuiltIn,
    Scope,
    FunctionParameterAttribute,
    FPRoundingMode,
    FPFastMathMode,
    LinkageType,
    FunctionControl,
    SelectionControl,
    LoopControl,
    MemoryOperand,
    ImageOperand,
}

/// Bit of the memory-operand mask that requires a trailing alignment literal.
pub const MEMORY_OPERAND_ALIGNED: u32 = 0x2;

const CAPABILITY: &[(u32, &str)] = &[
    (0, "Matrix"),
    (1, "Shader"),
    (2, "Geometry"),
    (3, "Tessellation"),
    (4, "Addresses"),
    (5, "Linkage"),
    (6, "Kernel"),
    (7, "Vector16"),
    (8, "Float16Buffer"),
    (9, "Float16"),
    (10, "Float64"),
    (11, "Int64"),
    (12, "Int64Atomics"),
    (13, "ImageBasic"),
    (14, "ImageReadWrite"),
    (15, "ImageMipmap"),
    (17, "Pipes"),
    (18, "Groups"),
    (19, "DeviceEnqueue"),
    (20, "LiteralSampler"),
    (21, "AtomicStorage"),
    (22, "Int16"),
    (38, "GenericPointer"),
    (39, "Int8"),
];

const SOURCE_LANGUAGE: &[(u32, &str)] = &[
    (0, "Unknown"),
    (1, "ESSL"),
    (2, "GLSL"),
    (3, "OpenCL_C"),
    (4, "OpenCL_CPP"),
    (5, "HLSL"),
    (6, "CPP_for_OpenCL"),
];

const ADDRESSING_MODEL: &[(u32, &str)] = &[
    (0, "Logical"),
    (1, "Physical32"),
    (2, "Physical64"),
    (5348, "PhysicalStorageBuffer64"),
];

const MEMORY_MODEL: &[(u32, &str)] = &[
    (0, "Simple"),
    (1, "GLSL450"),
    (2, "OpenCL"),
    (3, "Vulkan"),
];

const EXECUTION_MODEL: &[(u32, &str)] = &[
    (0, "Vertex"),
    (1, "TessellationControl"),
    (2, "TessellationEvaluation"),
    (3, "Geometry"),
    (4, "Fragment"),
    (5, "GLCompute"),
    (6, "Kernel"),
];

const EXECUTION_MODE: &[(u32, &str)] = &[
    (0, "Invocations"),
    (1, "SpacingEqual"),
    (2, "SpacingFractionalEven"),
    (3, "SpacingFractionalOdd"),
    (4, "VertexOrderCw"),
    (5, "VertexOrderCcw"),
    (6, "PixelCenterInteger"),
    (7, "OriginUpperLeft"),
    (8, "OriginLowerLeft"),
    (9, "EarlyFragmentTests"),
    (10, "PointMode"),
    (11, "Xfb"),
    (12, "DepthReplacing"),
    (14, "DepthGreater"),
    (15, "DepthLess"),
    (16, "DepthUnchanged"),
    (17, "LocalSize"),
    (18, "LocalSizeHint"),
    (30, "VecTypeHint"),
    (31, "ContractionOff"),
    (33, "Initializer"),
    (34, "Finalizer"),
    (35, "SubgroupSize"),
    (36, "SubgroupsPerWorkgroup"),
    (38, "LocalSizeId"),
];

const STORAGE_CLASS: &[(u32, &str)] = &[
    (0, "UniformConstant"),
    (1, "Input"),
    (2, "Uniform"),
    (3, "Output"),
    (4, "Workgroup"),
    (5, "CrossWorkgroup"),
    (6, "Private"),
    (7, "Function"),
    (8, "Generic"),
    (9, "PushConstant"),
    (10, "AtomicCounter"),
    (11, "Image"),
    (12, "StorageBuffer"),
];

const DIM: &[(u32, &str)] = &[
    (0, "1D"),
    (1, "2D"),
    (2, "3D"),
    (3, "Cube"),
    (4, "Rect"),
    (5, "Buffer"),
    (6, "SubpassData"),
];

const IMAGE_FORMAT: &[(u32, &str)] = &[
    (0, "Unknown"),
    (1, "Rgba32f"),
    (2, "Rgba16f"),
    (3, "R32f"),
    (4, "Rgba8"),
    (5, "Rgba8Snorm"),
    (21, "Rgba32i"),
    (22, "Rgba16i"),
    (23, "Rgba8i"),
    (24, "R32i"),
    (30, "Rgba32ui"),
    (31, "Rgba16ui"),
    (32, "Rgba8ui"),
    (33, "R32ui"),
];

const ACCESS_QUALIFIER: &[(u32, &str)] = &[(0, "ReadOnly"), (1, "WriteOnly"), (2, "ReadWrite")];

const DECORATION: &[(u32, &str)] = &[
    (0, "RelaxedPrecision"),
    (1, "SpecId"),
    (2, "Block"),
    (3, "BufferBlock"),
    (4, "RowMajor"),
    (5, "ColMajor"),
    (6, "ArrayStride"),
    (7, "MatrixStride"),
    (8, "GLSLShared"),
    (9, "GLSLPacked"),
    (10, "CPacked"),
    (11, "BuiltIn"),
    (13, "NoPerspective"),
    (14, "Flat"),
    (15, "Patch"),
    (16, "Centroid"),
    (17, "Sample"),
    (18, "Invariant"),
    (19, "Restrict"),
    (20, "Aliased"),
    (21, "Volatile"),
    (22, "Constant"),
    (23, "Coherent"),
    (24, "NonWritable"),
    (25, "NonReadable"),
    (26, "Uniform"),
    (27, "UniformId"),
    (28, "SaturatedConversion"),
    (29, "Stream"),
    (30, "Location"),
    (31, "Component"),
    (32, "Index"),
    (33, "Binding"),
    (34, "DescriptorSet"),
    (35, "Offset"),
    (36, "XfbBuffer"),
    (37, "XfbStride"),
    (38, "FuncParamAttr"),
    (39, "FPRoundingMode"),
    (40, "FPFastMathMode"),
    (41, "LinkageAttributes"),
    (42, "NoContraction"),
    (43, "InputAttachmentIndex"),
    (44, "Alignment"),
    (45, "MaxByteOffset"),
    (46, "AlignmentId"),
    (47, "MaxByteOffsetId"),
    (5635, "UserSemantic"),
];

const BUILT_IN: &[(u32, &str)] = &[
    (0, "Position"),
    (1, "PointSize"),
    (3, "ClipDistance"),
    (4, "CullDistance"),
    (5, "VertexId"),
    (6, "InstanceId"),
    (7, "PrimitiveId"),
    (8, "InvocationId"),
    (9, "Layer"),
    (10, "ViewportIndex"),
    (11, "TessLevelOuter"),
    (12, "TessLevelInner"),
    (13, "TessCoord"),
    (14, "PatchVertices"),
    (15, "FragCoord"),
    (16, "PointCoord"),
    (17, "FrontFacing"),
    (18, "SampleId"),
    (19, "SamplePosition"),
    (20, "SampleMask"),
    (22, "FragDepth"),
    (23, "HelperInvocation"),
    (24, "NumWorkgroups"),
    (25, "WorkgroupSize"),
    (26, "WorkgroupId"),
    (27, "LocalInvocationId"),
    (28, "GlobalInvocationId"),
    (29, "LocalInvocationIndex"),
    (30, "WorkDim"),
    (31, "GlobalSize"),
    (32, "EnqueuedWorkgroupSize"),
    (33, "GlobalOffset"),
    (34, "GlobalLinearId"),
    (36, "SubgroupSize"),
    (37, "SubgroupMaxSize"),
    (38, "NumSubgroups"),
    (39, "NumEnqueuedSubgroups"),
    (40, "SubgroupId"),
    (41, "SubgroupLocalInvocationId"),
    (42, "VertexIndex"),
    (43, "InstanceIndex"),
];

const SCOPE: &[(u32, &str)] = &[
    (0, "CrossDevice"),
    (1, "Device"),
    (2, "Workgroup"),
    (3, "Subgroup"),
    (4, "Invocation"),
    (5, "QueueFamily"),
    (6, "ShaderCallKHR"),
];

const FUNCTION_PARAMETER_ATTRIBUTE: &[(u32, &str)] = &[
    (0, "Zext"),
    (1, "Sext"),
    (2, "ByVal"),
    (3, "Sret"),
    (4, "NoAlias"),
    (5, "NoCapture"),
    (6, "NoWrite"),
    (7, "NoReadWrite"),
];

const FP_ROUNDING_MODE: &[(u32, &str)] = &[(0, "RTE"), (1, "RTZ"), (2, "RTP"), (3, "RTN")];

const FP_FAST_MATH_MODE: &[(u32, &str)] = &[
    (0x1, "NotNaN"),
    (0x2, "NotInf"),
    (0x4, "NSZ"),
    (0x8, "AllowRecip"),
    (0x10, "Fast"),
];

const LINKAGE_TYPE: &[(u32, &str)] = &[(0, "Export"), (1, "Import"), (2, "LinkOnceODR")];

const FUNCTION_CONTROL: &[(u32, &str)] = &[
    (0x1, "Inline"),
    (0x2, "DontInline"),
    (0x4, "Pure"),
    (0x8, "Const"),
];

const SELECTION_CONTROL: &[(u32, &str)] = &[(0x1, "Flatten"), (0x2, "DontFlatten")];

const LOOP_CONTROL: &[(u32, &str)] = &[
    (0x1, "Unroll"),
    (0x2, "DontUnroll"),
    (0x4, "DependencyInfinite"),
    (0x8, "DependencyLength"),
];

const MEMORY_OPERAND: &[(u32, &str)] = &[
    (0x1, "Volatile"),
    (MEMORY_OPERAND_ALIGNED, "Aligned"),
    (0x4, "Nontemporal"),
    (0x8, "MakePointerAvailable"),
    (0x10, "MakePointerVisible"),
    (0x20, "NonPrivatePointer"),
];

const IMAGE_OPERAND: &[(u32, &str)] = &[
    (0x1, "Bias"),
    (0x2, "Lod"),
    (0x4, "Grad"),
    (0x8, "ConstOffset"),
    (0x10, "Offset"),
    (0x20, "ConstOffsets"),
    (0x40, "Sample"),
    (0x80, "MinLod"),
    (0x100, "MakeTexelAvailable"),
    (0x200, "MakeTexelVisible"),
    (0x400, "NonPrivateTexel"),
    (0x800, "VolatileTexel"),
    (0x1000, "SignExtend"),
    (0x2000, "ZeroExtend"),
    (0x4000, "Nontemporal"),
    (0x10000, "Offsets"),
];

impl OperandCategory {
    fn table(self) -> &'static [(u32, &'static str)] {
        match self {
            OperandCategory::Capability => CAPABILITY,
            OperandCategory::SourceLanguage => SOURCE_LANGUAGE,
            OperandCategory::AddressingModel => ADDRESSING_MODEL,
            OperandCategory::MemoryModel => MEMORY_MODEL,
            OperandCategory::ExecutionModel => EXECUTION_MODEL,
            OperandCategory::ExecutionMode => EXECUTION_MODE,
            OperandCategory::StorageClass => STORAGE_CLASS,
            OperandCategory::Dim => DIM,
            OperandCategory::ImageFormat => IMAGE_FORMAT,
            OperandCategory::AccessQualifier => ACCESS_QUALIFIER,
            OperandCategory::Decoration => DECORATION,
            OperandCategory::BuiltIn => BUILT_IN,
            OperandCategory::Scope => SCOPE,
            OperandCategory::FunctionParameterAttribute => FUNCTION_PARAMETER_ATTRIBUTE,
            OperandCategory::FPRoundingMode => FP_ROUNDING_MODE,
            OperandCategory::FPFastMathMode => FP_FAST_MATH_MODE,
            OperandCategory::LinkageType => LINKAGE_TYPE,
            OperandCategory::FunctionControl => FUNCTION_CONTROL,
            OperandCategory::SelectionControl => SELECTION_CONTROL,
            OperandCategory::LoopControl => LOOP_CONTROL,
            OperandCategory::MemoryOperand => MEMORY_OPERAND,
            OperandCategory::ImageOperand => IMAGE_OPERAND,
        }
    }

    /// Bitmask categories combine several named bits in one word.
    pub fn is_mask(self) -> bool {
        matches!(
            self,
            OperandCategory::FPFastMathMode
                | OperandCategory::FunctionControl
                | OperandCategory::SelectionControl
                | OperandCategory::LoopControl
                | OperandCategory::MemoryOperand
                | OperandCategory::ImageOperand
        )
    }

    /// Renders `value` symbolically.
    pub fn render(self, value: u32) -> String {
        let table = self.table();
        if !self.is_mask() {
            return match table.iter().find(|(v, _)| *v == value) {
                Some((_, name)) => (*name).to_owned(),
                None => value.to_string(),
            };
        }

        if value == 0 {
            return "None".to_owned();
        }
        let mut out = String::new();
        let mut rest = value;
        for &(bit, name) in table {
            if value & bit != 0 {
                if !out.is_empty() {
                    out.push('|');
                }
                out.push_str(name);
                rest &= !bit;
            }
        }
        if rest != 0 {
            if !out.is_empty() {
                out.push('|');
            }
            let _ = write!(out, "{:#x}", rest);
        }
        out
    }

    /// Parses a symbolic rendering back to its value.
    ///
    /// Accepts exactly what `render` produces, plus plain decimal or `0x` hex
    /// numbers in any position.
    pub fn parse(self, text: &str) -> Option<u32> {
        if !self.is_mask() {
            return self
                .table()
                .iter()
                .find(|(_, name)| *name == text)
                .map(|(v, _)| *v)
                .or_else(|| parse_number(text));
        }

        if text == "None" {
            return Some(0);
        }
        let mut value = 0u32;
        for part in text.split('|') {
            let bits = self
                .table()
                .iter()
                .find(|(_, name)| *name == part)
                .map(|(v, _)| *v)
                .or_else(|| parse_number(part))?;
            value |= bits;
        }
        Some(value)
    }
}

fn parse_number(text: &str) -> Option<u32> {
    match text.strip_prefix("0x") {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => text.parse().ok(),
    }
}

/// Decoration kinds whose tail is not a plain operand list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecorationKind {
    BuiltIn,
    UniformId,
    FuncParamAttr,
    FPRoundingMode,
    FPFastMathMode,
    LinkageAttributes,
    UserSemantic,
    Other,
}

impl DecorationKind {
    pub fn from_value(value: u32) -> Self {
        match value {
            11 => DecorationKind::BuiltIn,
            27 => DecorationKind::UniformId,
            38 => DecorationKind::FuncParamAttr,
            39 => DecorationKind::FPRoundingMode,
            40 => DecorationKind::FPFastMathMode,
            41 => DecorationKind::LinkageAttributes,
            5635 => DecorationKind::UserSemantic,
            _ => DecorationKind::Other,
        }
    }
}
