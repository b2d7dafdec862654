//! Block linearization.
//!
//! Reorders a function's blocks so that every block precedes the blocks it
//! dominates, moving as little as possible. Blocks are inserted one at a
//! time in their original order: a block goes in front of the first placed
//! block it dominates, or at the end if it dominates none of them.
//!
//! The scan is quadratic in the number of blocks.

use crate::error::PassError;
use crate::ir::{BasicBlock, Function, Module};
use crate::pass::dominators::{Dominance, DominatorTree};
use crate::pass::Pass;

/// Computes the linearized order as indices into `func.blocks`.
pub fn linear_order(func: &Function, dom: &impl Dominance) -> Vec<usize> {
    let blocks = &func.blocks;
    let mut order: Vec<usize> = Vec::with_capacity(blocks.len());
    for (index, block) in blocks.iter().enumerate() {
        let at = order
            .iter()
            .position(|&placed| dom.dominates(block.label, blocks[placed].label));
        match at {
            Some(pos) => order.insert(pos, index),
            None => order.push(index),
        }
    }
    order
}

/// Rewrites `func.blocks` into linearized order. Returns whether the order
/// changed. Never fails: every block is placed exactly once.
pub fn linearize(func: &mut Function, dom: &impl Dominance) -> bool {
    let order = linear_order(func, dom);
    if order.iter().copied().eq(0..order.len()) {
        return false;
    }

    let mut slots: Vec<Option<BasicBlock>> = std::mem::take(&mut func.blocks).into_iter().map(Some).collect();
    func.blocks = order.iter().filter_map(|&i| slots[i].take()).collect();
    true
}

/// Linearizes the blocks of every defined function, using the dominator
/// tree computed from the function's own branches.
pub struct BlockOrderPass;

impl Pass for BlockOrderPass {
    fn name(&self) -> &'static str {
        "block-order"
    }

    fn run(&mut self, module: &mut Module) -> Result<bool, PassError> {
        let mut changed = false;
        for func in module.functions_mut() {
            if func.is_declaration() {
                continue;
            }
            let dom = DominatorTree::compute(func);
            if linearize(func, &dom) {
                log::debug!("block-order: reordered {} -> {:?}", func.display_name(), func.block_order());
                changed = true;
            }
        }
        Ok(changed)
    }
}
