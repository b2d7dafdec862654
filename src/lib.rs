//! spirv-emit: the encoding layer of a SPIR-V backend.
//!
//! Pipeline:
//!
//! ```text
//! text (.spvasm) → Lexer → [Tokens] → Parser → [Module]
//!   → PassManager → Emitter → text
//! ```
//!
//! Passes (in order):
//! 1. `ValidatePass`    terminators, branch targets, import-before-use
//! 2. `BlockOrderPass`  dominance-respecting block order
//!
//! The emitter and the text reader share one operand dispatcher
//! (`codegen::dispatch`), so whatever one prints the other accepts.

pub mod cli;
pub mod codegen;
pub mod error;
pub mod ir;
pub mod isa;
pub mod parser;
pub mod pass;

use std::path::Path;

pub use error::Error;

use crate::ir::Module;

/// Controls what `normalize()` emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitKind {
    /// Full SPIR-V assembly text.
    Asm,
    /// One line per function listing its block labels in order.
    Blocks,
}

/// Knobs for the normalize pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmitOptions {
    /// Emit `;` header and per-function comments.
    pub comments: bool,
    /// Run the block linearizer before emitting.
    pub sort_blocks: bool,
    /// Run structural validation before anything else.
    pub validate: bool,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            comments: true,
            sort_blocks: true,
            validate: true,
        }
    }
}

/// Runs the configured passes over `module`. Returns whether any pass
/// changed it.
pub fn run_passes(module: &mut Module, options: &EmitOptions, dump_after: Option<&str>) -> Result<bool, Error> {
    use crate::pass::{BlockOrderPass, PassManager, ValidatePass};

    let mut pm = PassManager::new();
    if options.validate {
        pm.add_pass(ValidatePass);
    }
    if options.sort_blocks {
        pm.add_pass(BlockOrderPass);
    }
    if let Some(name) = dump_after {
        pm.set_dump_after(name);
    }
    pm.run(module).map_err(|(_, e)| Error::Pass(e))
}

/// Emits `module` as SPIR-V text.
pub fn emit_text(module: &Module, options: &EmitOptions) -> Result<String, Error> {
    Ok(codegen::emit_module(module, options)?)
}

/// Parses SPIR-V text, runs the pass pipeline and re-emits it.
///
/// The pipeline aborts at the first error.
pub fn normalize(source: &str, module_name: &str, emit: EmitKind, options: &EmitOptions) -> Result<String, Error> {
    normalize_with_dump(source, module_name, emit, options, None)
}

/// Like `normalize`, dumping the module to stderr after the pass named
/// `dump_after`.
pub fn normalize_with_dump(
    source: &str,
    module_name: &str,
    emit: EmitKind,
    options: &EmitOptions,
    dump_after: Option<&str>,
) -> Result<String, Error> {
    // 1. Lex + parse
    let mut module = parser::parse_module(source, module_name)?;

    // 2. Passes
    run_passes(&mut module, options, dump_after)?;

    // 3. Emit
    match emit {
        EmitKind::Asm => emit_text(&module, options),
        EmitKind::Blocks => Ok(codegen::emit_block_order(&module)?),
    }
}

/// Reads `path` (or stdin for `-`) and normalizes it. The module is named
/// after the file stem.
pub fn normalize_file(
    path: &Path,
    emit: EmitKind,
    options: &EmitOptions,
    dump_after: Option<&str>,
) -> Result<String, Error> {
    let (source, name) = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::Read::read_to_string(&mut std::io::stdin(), &mut buf)?;
        (buf, "stdin".to_owned())
    } else {
        let source = std::fs::read_to_string(path)?;
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("module")
            .to_owned();
        (source, name)
    };
    log::debug!("normalizing '{}' ({} bytes)", name, source.len());
    normalize_with_dump(&source, &name, emit, options, dump_after)
}
