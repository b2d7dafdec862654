//! Per-module extended-instruction-set registry.

use std::collections::HashMap;

use crate::error::EncodeError;
use crate::ir::RegId;
use crate::isa::SetKind;

/// Maps the result id of each `OpExtInstImport` to the set it names.
///
/// One registry lives for exactly one module emission: it starts empty, is
/// filled as imports are walked, and is dropped afterwards. It is passed
/// explicitly to whoever walks instructions; there is no global instance.
#[derive(Debug, Default, Clone)]
pub struct ExtInstRegistry {
    sets: HashMap<RegId, SetKind>,
}

impl ExtInstRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `handle` to the set called `name`. Unknown names bind
    /// `SetKind::Unknown`. Rebinding a handle overwrites the earlier kind.
    pub fn bind(&mut self, handle: RegId, name: &str) -> SetKind {
        let kind = SetKind::from_name(name);
        log::trace!("bind extended set {} -> {:?} ({:?})", handle, kind, name);
        if let Some(previous) = self.sets.insert(handle, kind) {
            log::debug!("extended set handle {} rebound ({:?} -> {:?})", handle, previous, kind);
        }
        kind
    }

    /// Returns the kind bound to `handle`.
    ///
    /// An unbound handle means the instruction stream used a set before
    /// importing it, which upstream must never produce.
    pub fn lookup(&self, handle: RegId) -> Result<SetKind, EncodeError> {
        self.sets
            .get(&handle)
            .copied()
            .ok_or(EncodeError::UnboundExtInstSet { handle })
    }

    pub fn is_bound(&self, handle: RegId) -> bool {
        self.sets.contains_key(&handle)
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}
