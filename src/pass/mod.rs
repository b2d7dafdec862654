pub mod block_order;
pub mod dominators;
pub mod validate;

pub use block_order::{linear_order, linearize, BlockOrderPass};
pub use dominators::{Dominance, DominatorTree};
pub use validate::ValidatePass;

use crate::error::PassError;
use crate::ir::Module;

/// A pass that operates on a `Module` in place.
///
/// Passes must be deterministic: given the same `Module`, the transformed
/// output must be identical across runs (no global mutable state, no randomness).
pub trait Pass {
    /// Human-readable name, used in error messages and `--dump-after`.
    fn name(&self) -> &'static str;

    /// Run the pass on the module. Returns whether the module changed.
    ///
    /// On error, the module state is unspecified and the pipeline aborts.
    fn run(&mut self, module: &mut Module) -> Result<bool, PassError>;
}

/// Manages and executes an ordered sequence of passes.
///
/// Passes run in the order they were registered. The pipeline aborts at the
/// first error.
pub struct PassManager {
    passes: Vec<Box<dyn Pass>>,
    /// If set, dumps module text to stderr after the pass with this name completes.
    dump_after: Option<String>,
}

impl PassManager {
    pub fn new() -> Self {
        Self { passes: Vec::new(), dump_after: None }
    }

    /// Appends a pass to the end of the pipeline.
    pub fn add_pass(&mut self, pass: impl Pass + 'static) {
        self.passes.push(Box::new(pass));
    }

    /// Configures the manager to dump module text to stderr after the named pass completes.
    pub fn set_dump_after(&mut self, pass_name: impl Into<String>) {
        self.dump_after = Some(pass_name.into());
    }

    /// Runs all passes in registration order on `module`.
    ///
    /// Returns whether any pass changed the module, or
    /// `Err((pass_name, error))` at the first failure.
    pub fn run(&mut self, module: &mut Module) -> Result<bool, (String, PassError)> {
        let mut changed = false;
        for pass in &mut self.passes {
            let pass_changed = pass.run(module).map_err(|e| (pass.name().to_owned(), e))?;
            log::debug!("pass '{}' finished (changed: {})", pass.name(), pass_changed);
            changed |= pass_changed;
            if let Some(ref target) = self.dump_after {
                if pass.name() == target.as_str() {
                    use crate::codegen::printer::emit_module;
                    match emit_module(module, &crate::EmitOptions::default()) {
                        Ok(text) => eprintln!("--- module after {} ---\n{}", pass.name(), text),
                        Err(e) => log::warn!("cannot dump module after {}: {}", pass.name(), e),
                    }
                }
            }
        }
        Ok(changed)
    }

    /// Returns the names of all registered passes in pipeline order.
    pub fn pass_names(&self) -> Vec<&'static str> {
        self.passes.iter().map(|p| p.name()).collect()
    }
}

impl Default for PassManager {
    fn default() -> Self {
        Self::new()
    }
}
