//! Structural validation pass.
//!
//! Checks the invariants the emitter relies on before anything is printed.
//! It rejects the first violation it finds.

use std::collections::HashSet;

use crate::error::PassError;
use crate::ir::{Module, Operand, RegId};
use crate::isa::Opcode;
use crate::pass::Pass;

/// Validates module structure.
///
/// Checks:
/// 1. Every block ends with exactly one terminator as its last instruction.
/// 2. Every branch target names a block of the same function.
/// 3. Every `OpExtInst` set operand is the result of an `OpExtInstImport`
///    that appears earlier in the module.
pub struct ValidatePass;

impl Pass for ValidatePass {
    fn name(&self) -> &'static str {
        "validate"
    }

    fn run(&mut self, module: &mut Module) -> Result<bool, PassError> {
        let mut imported: HashSet<RegId> = HashSet::new();

        for (i, instr) in module.globals.iter().enumerate() {
            check_import(&mut imported, instr, || format!("global instruction {}", i))?;
        }

        for func in module.functions() {
            let func_name = func.display_name();
            let labels: HashSet<RegId> = func.block_order().into_iter().collect();

            for block in &func.blocks {
                let block_label = block.label.to_string();
                let n = block.instrs.len();
                for (i, instr) in block.instrs.iter().enumerate() {
                    // Terminator must be the last instruction.
                    if instr.is_terminator() && i != n - 1 {
                        return Err(PassError::MissingTerminator {
                            func: func_name.clone(),
                            block: block_label.clone(),
                        });
                    }
                    check_import(&mut imported, instr, || {
                        format!("function '{}', block {}", func_name, block_label)
                    })?;
                }

                if !block.is_sealed() {
                    return Err(PassError::MissingTerminator {
                        func: func_name.clone(),
                        block: block_label,
                    });
                }

                for target in block.successors() {
                    if !labels.contains(&target) {
                        return Err(PassError::UnknownBranchTarget {
                            func: func_name.clone(),
                            block: block_label.clone(),
                            target: target.to_string(),
                        });
                    }
                }
            }
        }
        Ok(false)
    }
}

fn check_import(
    imported: &mut HashSet<RegId>,
    instr: &crate::ir::Instruction,
    location: impl FnOnce() -> String,
) -> Result<(), PassError> {
    match instr.opcode {
        Opcode::ExtInstImport => {
            if let Some(handle) = instr.reg(0) {
                imported.insert(handle);
            }
        }
        Opcode::ExtInst => {
            if let Some(Operand::Reg(handle)) = instr.operands.get(2) {
                if !imported.contains(handle) {
                    return Err(PassError::UseBeforeImport {
                        location: location(),
                        handle: handle.to_string(),
                    });
                }
            }
        }
        _ => {}
    }
    Ok(())
}
