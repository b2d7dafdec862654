use thiserror::Error;

use crate::ir::RegId;

/// Top-level error type for the spirv-emit pipeline.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{}", format_error_pretty("syntax error", &format!("{}", _0)))]
    Parse(#[from] ParseError),

    #[error("{}", format_error_pretty("pass error", &format!("{}", _0)))]
    Pass(#[from] PassError),

    #[error("{}", format_error_pretty("codegen error", &format!("{}", _0)))]
    Codegen(#[from] CodegenError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn format_error_pretty(category: &str, msg: &str) -> String {
    format!("[{}] {}", category, msg)
}

// ---------------------------------------------------------------------------
// Encoding errors
// ---------------------------------------------------------------------------

/// Contract violations detected while walking an instruction's operands.
///
/// None of these are recoverable: they abort the whole translation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("malformed operands for {opcode}: {detail}")]
    MalformedOperandShape { opcode: &'static str, detail: String },

    #[error("unsupported constant bit width {width} (supported: 1, 8, 16, 32, 64)")]
    UnsupportedLiteralWidth { width: u32 },

    #[error("internal error: extended instruction set handle {handle} was used before its OpExtInstImport")]
    UnboundExtInstSet { handle: RegId },
}

impl EncodeError {
    pub(crate) fn malformed(opcode: crate::isa::Opcode, detail: impl Into<String>) -> Self {
        EncodeError::MalformedOperandShape {
            opcode: opcode.mnemonic(),
            detail: detail.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Parse errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("line {line}: unexpected character '{ch}'")]
    UnexpectedChar { ch: char, line: u32 },

    #[error("line {line}: unterminated string literal")]
    UnterminatedString { line: u32 },

    #[error("line {line}: invalid literal '{text}'")]
    InvalidLiteral { text: String, line: u32 },

    #[error("line {line}: unknown opcode '{mnemonic}'")]
    UnknownMnemonic { mnemonic: String, line: u32 },

    #[error("line {line}: expected {expected}, found '{found}'")]
    UnexpectedToken {
        expected: String,
        found: String,
        line: u32,
    },

    #[error("line {line}: '{text}' is not a valid {category} operand")]
    UnknownSymbol {
        text: String,
        category: String,
        line: u32,
    },

    #[error("line {line}: {mnemonic} is not allowed here: {detail}")]
    MisplacedInstruction {
        mnemonic: &'static str,
        detail: String,
        line: u32,
    },

    #[error("line {line}: OpConstant result type {ty} is not a declared integer or float type")]
    UnknownConstantType { ty: RegId, line: u32 },

    #[error("line {line}: {source}")]
    Encode {
        #[source]
        source: EncodeError,
        line: u32,
    },
}

impl From<EncodeError> for ParseError {
    fn from(source: EncodeError) -> Self {
        ParseError::Encode { source, line: 0 }
    }
}

impl ParseError {
    /// Returns the error with its line number replaced by `line`.
    pub(crate) fn at_line(mut self, at: u32) -> Self {
        match &mut self {
            ParseError::UnexpectedChar { line, .. }
            | ParseError::UnterminatedString { line }
            | ParseError::InvalidLiteral { line, .. }
            | ParseError::UnknownMnemonic { line, .. }
            | ParseError::UnexpectedToken { line, .. }
            | ParseError::UnknownSymbol { line, .. }
            | ParseError::MisplacedInstruction { line, .. }
            | ParseError::UnknownConstantType { line, .. }
            | ParseError::Encode { line, .. } => *line = at,
        }
        self
    }

    pub fn line(&self) -> u32 {
        match self {
            ParseError::UnexpectedChar { line, .. }
            | ParseError::UnterminatedString { line }
            | ParseError::InvalidLiteral { line, .. }
            | ParseError::UnknownMnemonic { line, .. }
            | ParseError::UnexpectedToken { line, .. }
            | ParseError::UnknownSymbol { line, .. }
            | ParseError::MisplacedInstruction { line, .. }
            | ParseError::UnknownConstantType { line, .. }
            | ParseError::Encode { line, .. } => *line,
        }
    }
}

// ---------------------------------------------------------------------------
// Pass errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum PassError {
    #[error("in function '{func}': block {block} does not end with a single terminator")]
    MissingTerminator { func: String, block: String },

    #[error("in function '{func}': block {block} branches to {target}, which is not a block of this function")]
    UnknownBranchTarget {
        func: String,
        block: String,
        target: String,
    },

    #[error("{location}: extended instruction set {handle} is used before it is imported")]
    UseBeforeImport { location: String, handle: String },
}

// ---------------------------------------------------------------------------
// Codegen errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum CodegenError {
    #[error("{location}: {source}")]
    Encode {
        location: String,
        #[source]
        source: EncodeError,
    },

    #[error("formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),
}

impl Error {
    /// Returns a diagnostic code string for this error.
    pub fn diagnostic_code(&self) -> &'static str {
        match self {
            Error::Parse(p) => match p {
                ParseError::UnexpectedChar { .. } => "E0001",
                ParseError::UnterminatedString { .. } => "E0002",
                ParseError::InvalidLiteral { .. } => "E0004",
                ParseError::UnknownMnemonic { .. } => "E0005",
                ParseError::UnexpectedToken { .. } => "E0006",
                ParseError::UnknownSymbol { .. } => "E0007",
                ParseError::MisplacedInstruction { .. } => "E0008",
                ParseError::UnknownConstantType { .. } => "E0009",
                ParseError::Encode { source, .. } => encode_code(source),
            },
            Error::Pass(p) => match p {
                PassError::MissingTerminator { .. } => "E0200",
                PassError::UnknownBranchTarget { .. } => "E0201",
                PassError::UseBeforeImport { .. } => "E0202",
            },
            Error::Codegen(c) => match c {
                CodegenError::Encode { source, .. } => encode_code(source),
                CodegenError::Fmt(_) => "E0399",
            },
            Error::Io(_) => "E0500",
        }
    }
}

fn encode_code(e: &EncodeError) -> &'static str {
    match e {
        EncodeError::MalformedOperandShape { .. } => "E0300",
        EncodeError::UnsupportedLiteralWidth { .. } => "E0301",
        EncodeError::UnboundExtInstSet { .. } => "E0302",
    }
}
