//! CLI argument parsing, exported from the library so integration tests can exercise it.

use std::path::PathBuf;

use crate::{EmitKind, EmitOptions};

/// Fully-parsed CLI arguments for one run.
#[derive(Debug)]
pub struct CliArgs {
    pub path: PathBuf,
    pub emit: EmitKind,
    /// Write output to this file instead of stdout.
    pub output: Option<PathBuf>,
    /// Dump the module to stderr immediately after this pass completes.
    pub dump_after: Option<String>,
    pub options: EmitOptions,
}

/// Result of `parse_args`.
#[derive(Debug)]
pub enum ParseArgsResult {
    Args(CliArgs),
    /// `--help` was present; caller should print usage and exit 0.
    Help,
    /// `--version` was present; caller should print the version and exit 0.
    Version,
}

/// Parses command-line arguments (the full `std::env::args()` slice including `argv[0]`).
pub fn parse_args(args: &[String]) -> Result<ParseArgsResult, String> {
    let mut emit = EmitKind::Asm;
    let mut path: Option<PathBuf> = None;
    let mut output: Option<PathBuf> = None;
    let mut dump_after: Option<String> = None;
    let mut options = EmitOptions::default();
    let mut i = 1usize;

    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => return Ok(ParseArgsResult::Help),
            "--version" | "-V" => return Ok(ParseArgsResult::Version),
            "--emit" => {
                i += 1;
                let kind = args
                    .get(i)
                    .ok_or_else(|| "--emit requires an argument".to_owned())?;
                emit = match kind.as_str() {
                    "asm" => EmitKind::Asm,
                    "blocks" => EmitKind::Blocks,
                    other => return Err(format!("unknown emit kind: '{}' (valid: asm, blocks)", other)),
                };
            }
            "-o" => {
                i += 1;
                let file = args
                    .get(i)
                    .ok_or_else(|| "-o requires an argument".to_owned())?;
                output = Some(PathBuf::from(file));
            }
            "--dump-after" => {
                i += 1;
                let name = args
                    .get(i)
                    .ok_or_else(|| "--dump-after requires an argument".to_owned())?;
                dump_after = Some(name.clone());
            }
            "--no-comments" => options.comments = false,
            "--no-sort" => options.sort_blocks = false,
            "--no-validate" => options.validate = false,
            arg if !arg.starts_with('-') || arg == "-" => {
                if let Some(prev) = &path {
                    return Err(format!(
                        "more than one input file: '{}' and '{}'",
                        prev.display(),
                        arg
                    ));
                }
                path = Some(PathBuf::from(arg));
            }
            other => return Err(format!("unknown argument: '{}'", other)),
        }
        i += 1;
    }

    let path = path.ok_or_else(|| "no input file specified".to_owned())?;
    Ok(ParseArgsResult::Args(CliArgs { path, emit, output, dump_after, options }))
}

/// Returns the usage/help text for the CLI.
pub fn help_text() -> &'static str {
    "spirv-emit: SPIR-V text normalizer\n\
     Usage: spirv-emit [options] <file.spvasm | ->\n\
     \n\
     Options:\n\
       --emit <kind>         Output kind: asm (default), blocks\n\
       -o <file>             Write output to <file> instead of stdout\n\
       --dump-after <p>      Dump the module to stderr after pass <p> (validate, block-order)\n\
       --no-comments         Omit header and function comments\n\
       --no-sort             Keep blocks in input order\n\
       --no-validate         Skip structural validation\n\
       --version, -V         Print the version and exit\n\
       --help, -h            Print this help and exit\n\
     \n\
     Set RUST_LOG=debug for diagnostics.\n"
}

pub fn version_text() -> String {
    format!("spirv-emit {}\n", env!("CARGO_PKG_VERSION"))
}
