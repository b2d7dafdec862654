/// Properties of the textual output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AsmInfo {
    /// Prefix that introduces a comment line.
    pub comment_prefix: &'static str,
    /// Minimum instruction alignment in bytes.
    pub min_instruction_alignment: u32,
    /// Literal words are little-endian in both text and binary forms.
    pub little_endian: bool,
}

pub const SPIRV_ASM_INFO: AsmInfo = AsmInfo {
    comment_prefix: ";",
    min_instruction_alignment: 4,
    little_endian: true,
};
