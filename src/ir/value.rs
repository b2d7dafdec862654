/// An opaque, index-based virtual register.
///
/// `RegId(n)` is the n-th virtual register of the module (0-based). The text
/// form is 1-based: `RegId(0)` prints as `%1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RegId(pub u32);

impl RegId {
    /// Builds a register from its 1-based textual index. Returns `None` for `%0`.
    pub fn from_text_index(n: u32) -> Option<Self> {
        n.checked_sub(1).map(RegId)
    }
}

impl std::fmt::Display for RegId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "%{}", u64::from(self.0) + 1)
    }
}

/// A symbolic expression operand, e.g. a reference to a global symbol that is
/// only resolved by a later stage. Printed verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SymbolicExpr(pub String);

impl std::fmt::Display for SymbolicExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One operand of an instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Reg(RegId),
    /// A 32-bit literal word. Prints as a signed decimal.
    Imm(u32),
    Expr(SymbolicExpr),
}

impl Operand {
    pub fn is_imm(&self) -> bool {
        matches!(self, Operand::Imm(_))
    }

    pub fn as_reg(&self) -> Option<RegId> {
        match self {
            Operand::Reg(r) => Some(*r),
            _ => None,
        }
    }

    pub fn as_imm(&self) -> Option<u32> {
        match self {
            Operand::Imm(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<RegId> for Operand {
    fn from(r: RegId) -> Self {
        Operand::Reg(r)
    }
}

impl From<u32> for Operand {
    fn from(v: u32) -> Self {
        Operand::Imm(v)
    }
}

impl std::fmt::Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operand::Reg(r) => write!(f, "{}", r),
            Operand::Imm(v) => write!(f, "{}", *v as i32),
            Operand::Expr(e) => write!(f, "{}", e),
        }
    }
}
