//! Extended instruction sets and their instruction-name tables.

/// A semantic extended-instruction-set identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetKind {
    OpenClStd,
    GlslStd450,
    DebugInfo100,
    OpenClDebugInfo100,
    AmdTrinaryMinMax,
    /// A set whose name is not in the table. Instruction numbers print as
    /// decimals.
    Unknown,
}

const SET_NAMES: &[(&str, SetKind)] = &[
    ("OpenCL.std", SetKind::OpenClStd),
    ("GLSL.std.450", SetKind::GlslStd450),
    ("NonSemantic.Shader.DebugInfo.100", SetKind::DebugInfo100),
    ("OpenCL.DebugInfo.100", SetKind::OpenClDebugInfo100),
    ("SPV_AMD_shader_trinary_minmax", SetKind::AmdTrinaryMinMax),
];

/// OpenCL.std instructions whose last operand is an `FPRoundingMode`.
pub const OPENCL_VSTORE_HALF_R: u32 = 176;
pub const OPENCL_VSTORE_HALFN_R: u32 = 178;
pub const OPENCL_VSTOREA_HALFN_R: u32 = 181;

const OPENCL_STD: &[(u32, &str)] = &[
    (0, "acos"),
    (1, "acosh"),
    (2, "acospi"),
    (3, "asin"),
    (4, "asinh"),
    (5, "asinpi"),
    (6, "atan"),
    (7, "atan2"),
    (8, "atanh"),
    (9, "atanpi"),
    (10, "atan2pi"),
    (11, "cbrt"),
    (12, "ceil"),
    (13, "copysign"),
    (14, "cos"),
    (15, "cosh"),
    (16, "cospi"),
    (17, "erfc"),
    (18, "erf"),
    (19, "exp"),
    (20, "exp2"),
    (21, "exp10"),
    (22, "expm1"),
    (23, "fabs"),
    (24, "fdim"),
    (25, "floor"),
    (26, "fma"),
    (27, "fmax"),
    (28, "fmin"),
    (29, "fmod"),
    (30, "fract"),
    (31, "frexp"),
    (32, "hypot"),
    (33, "ilogb"),
    (34, "ldexp"),
    (35, "lgamma"),
    (36, "lgamma_r"),
    (37, "log"),
    (38, "log2"),
    (39, "log10"),
    (40, "log1p"),
    (41, "logb"),
    (42, "mad"),
    (43, "maxmag"),
    (44, "minmag"),
    (45, "modf"),
    (46, "nan"),
    (47, "nextafter"),
    (48, "pow"),
    (49, "pown"),
    (50, "powr"),
    (51, "remainder"),
    (52, "remquo"),
    (53, "rint"),
    (54, "rootn"),
    (55, "round"),
    (56, "rsqrt"),
    (57, "sin"),
    (58, "sincos"),
    (59, "sinh"),
    (60, "sinpi"),
    (61, "sqrt"),
    (62, "tan"),
    (63, "tanh"),
    (64, "tanpi"),
    (65, "tgamma"),
    (66, "trunc"),
    (171, "vloadn"),
    (172, "vstoren"),
    (173, "vload_half"),
    (174, "vload_halfn"),
    (175, "vstore_half"),
    (OPENCL_VSTORE_HALF_R, "vstore_half_r"),
    (177, "vstore_halfn"),
    (OPENCL_VSTORE_HALFN_R, "vstore_halfn_r"),
    (179, "vloada_halfn"),
    (180, "vstorea_halfn"),
    (OPENCL_VSTOREA_HALFN_R, "vstorea_halfn_r"),
    (182, "shuffle"),
    (183, "shuffle2"),
    (184, "printf"),
    (185, "prefetch"),
];

const GLSL_STD_450: &[(u32, &str)] = &[
    (1, "Round"),
    (2, "RoundEven"),
    (3, "Trunc"),
    (4, "FAbs"),
    (5, "SAbs"),
    (6, "FSign"),
    (7, "SSign"),
    (8, "Floor"),
    (9, "Ceil"),
    (10, "Fract"),
    (11, "Radians"),
    (12, "Degrees"),
    (13, "Sin"),
    (14, "Cos"),
    (15, "Tan"),
    (16, "Asin"),
    (17, "Acos"),
    (18, "Atan"),
    (19, "Sinh"),
    (20, "Cosh"),
    (21, "Tanh"),
    (22, "Asinh"),
    (23, "Acosh"),
    (24, "Atanh"),
    (25, "Atan2"),
    (26, "Pow"),
    (27, "Exp"),
    (28, "Log"),
    (29, "Exp2"),
    (30, "Log2"),
    (31, "Sqrt"),
    (32, "InverseSqrt"),
    (33, "Determinant"),
    (34, "MatrixInverse"),
    (35, "Modf"),
    (36, "ModfStruct"),
    (37, "FMin"),
    (38, "UMin"),
    (39, "SMin"),
    (40, "FMax"),
    (41, "UMax"),
    (42, "SMax"),
    (43, "FClamp"),
    (44, "UClamp"),
    (45, "SClamp"),
    (46, "FMix"),
    (47, "IMix"),
    (48, "Step"),
    (49, "SmoothStep"),
    (50, "Fma"),
    (51, "Frexp"),
    (52, "FrexpStruct"),
    (53, "Ldexp"),
    (66, "Length"),
    (67, "Distance"),
    (68, "Cross"),
    (69, "Normalize"),
    (70, "FaceForward"),
    (71, "Reflect"),
    (72, "Refract"),
    (73, "FindILsb"),
    (74, "FindSMsb"),
    (75, "FindUMsb"),
    (76, "InterpolateAtCentroid"),
    (77, "InterpolateAtSample"),
    (78, "InterpolateAtOffset"),
    (79, "NMin"),
    (80, "NMax"),
    (81, "NClamp"),
];

const DEBUG_INFO: &[(u32, &str)] = &[
    (0, "DebugInfoNone"),
    (1, "DebugCompilationUnit"),
    (2, "DebugTypeBasic"),
    (3, "DebugTypePointer"),
    (4, "DebugTypeQualifier"),
    (5, "DebugTypeArray"),
    (6, "DebugTypeVector"),
    (7, "DebugTypedef"),
    (8, "DebugTypeFunction"),
    (9, "DebugTypeEnum"),
    (10, "DebugTypeComposite"),
    (11, "DebugTypeMember"),
    (12, "DebugTypeInheritance"),
    (13, "DebugTypePtrToMember"),
    (14, "DebugTypeTemplate"),
    (15, "DebugTypeTemplateParameter"),
    (16, "DebugTypeTemplateTemplateParameter"),
    (17, "DebugTypeTemplateParameterPack"),
    (18, "DebugGlobalVariable"),
    (19, "DebugFunctionDeclaration"),
    (20, "DebugFunction"),
    (21, "DebugLexicalBlock"),
    (22, "DebugLexicalBlockDiscriminator"),
    (23, "DebugScope"),
    (24, "DebugNoScope"),
    (25, "DebugInlinedAt"),
    (26, "DebugLocalVariable"),
    (27, "DebugInlinedVariable"),
    (28, "DebugDeclare"),
    (29, "DebugValue"),
    (30, "DebugOperation"),
    (31, "DebugExpression"),
    (32, "DebugMacroDef"),
    (33, "DebugMacroUndef"),
    (34, "DebugImportedEntity"),
    (35, "DebugSource"),
    (101, "DebugFunctionDefinition"),
    (102, "DebugSourceContinued"),
    (103, "DebugLine"),
    (104, "DebugNoLine"),
    (105, "DebugBuildIdentifier"),
    (106, "DebugStoragePath"),
    (107, "DebugEntryPoint"),
    (108, "DebugTypeMatrix"),
];

const AMD_TRINARY_MINMAX: &[(u32, &str)] = &[
    (1, "FMin3AMD"),
    (2, "UMin3AMD"),
    (3, "SMin3AMD"),
    (4, "FMax3AMD"),
    (5, "UMax3AMD"),
    (6, "SMax3AMD"),
    (7, "FMid3AMD"),
    (8, "UMid3AMD"),
    (9, "SMid3AMD"),
];

impl SetKind {
    /// Resolves an import name. Unlisted names are `Unknown`, never an error.
    pub fn from_name(name: &str) -> SetKind {
        SET_NAMES
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, kind)| *kind)
            .unwrap_or(SetKind::Unknown)
    }

    /// The canonical import name, if the set is known.
    pub fn name(self) -> Option<&'static str> {
        SET_NAMES.iter().find(|(_, k)| *k == self).map(|(n, _)| *n)
    }

    fn instructions(self) -> &'static [(u32, &'static str)] {
        match self {
            SetKind::OpenClStd => OPENCL_STD,
            SetKind::GlslStd450 => GLSL_STD_450,
            // OpenCL.DebugInfo.100 shares its numbering with the shader
            // flavour for everything up to DebugSource.
            SetKind::DebugInfo100 => DEBUG_INFO,
            SetKind::OpenClDebugInfo100 => &DEBUG_INFO[..36],
            SetKind::AmdTrinaryMinMax => AMD_TRINARY_MINMAX,
            SetKind::Unknown => &[],
        }
    }

    /// The mnemonic of extended instruction `number`, or its decimal value.
    pub fn instruction_name(self, number: u32) -> String {
        self.instructions()
            .iter()
            .find(|(v, _)| *v == number)
            .map(|(_, name)| (*name).to_owned())
            .unwrap_or_else(|| number.to_string())
    }

    /// Parses an extended instruction name or decimal number.
    pub fn parse_instruction(self, text: &str) -> Option<u32> {
        self.instructions()
            .iter()
            .find(|(_, name)| *name == text)
            .map(|(v, _)| *v)
            .or_else(|| text.parse().ok())
    }

    /// OpenCL.std stores that end with an explicit rounding mode.
    pub fn ends_with_rounding_mode(self, number: u32) -> bool {
        self == SetKind::OpenClStd
            && matches!(
                number,
                OPENCL_VSTORE_HALF_R | OPENCL_VSTORE_HALFN_R | OPENCL_VSTOREA_HALFN_R
            )
    }
}
