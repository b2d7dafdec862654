//! Dominator tree computation.
//!
//! Uses "A simple, fast dominance algorithm" by Cooper, Harvey and Kennedy:
//! iterate over blocks in reverse postorder, intersecting the dominators of
//! already-processed predecessors until nothing changes.
//!
//! The entry block is `blocks[0]`. Unreachable blocks get no immediate
//! dominator: they dominate nothing but themselves and are dominated only by
//! themselves.

use std::collections::{HashMap, HashSet};

use crate::ir::{Function, RegId};

/// Answers `a dominates b` queries for the blocks of one function.
///
/// Dominance is reflexive: every block dominates itself.
pub trait Dominance {
    fn dominates(&self, a: RegId, b: RegId) -> bool;
}

/// Immediate dominators of one function's blocks.
#[derive(Debug, Clone, Default)]
pub struct DominatorTree {
    entry: Option<RegId>,
    /// Immediate dominator per reachable non-entry block.
    idom: HashMap<RegId, RegId>,
    /// Depth in the tree; the entry is at 0. Only reachable blocks appear.
    level: HashMap<RegId, u32>,
}

impl DominatorTree {
    /// Builds the tree from the function's branch terminators. Branch
    /// targets that are not blocks of the function are ignored.
    pub fn compute(func: &Function) -> Self {
        let Some(entry) = func.entry_block().map(|b| b.label) else {
            return Self::default();
        };

        let labels: HashSet<RegId> = func.block_order().into_iter().collect();
        let succs: HashMap<RegId, Vec<RegId>> = func
            .blocks
            .iter()
            .map(|b| {
                let targets = b.successors().into_iter().filter(|t| labels.contains(t)).collect();
                (b.label, targets)
            })
            .collect();

        let rpo = reverse_postorder(entry, &succs);
        // Postorder number: the entry gets the highest.
        let size = rpo.len();
        let nr: HashMap<RegId, usize> = rpo.iter().enumerate().map(|(i, &b)| (b, size - 1 - i)).collect();

        let mut preds: HashMap<RegId, Vec<RegId>> = HashMap::new();
        for &b in &rpo {
            for &s in &succs[&b] {
                preds.entry(s).or_default().push(b);
            }
        }

        // doms[postorder nr] = postorder nr of the immediate dominator
        let mut doms: Vec<Option<usize>> = vec![None; size];
        doms[size - 1] = Some(size - 1);

        let intersect = |doms: &[Option<usize>], mut b1: usize, mut b2: usize| -> usize {
            while b1 != b2 {
                while b1 < b2 {
                    match doms[b1] {
                        Some(d) => b1 = d,
                        None => break,
                    }
                }
                while b2 < b1 {
                    match doms[b2] {
                        Some(d) => b2 = d,
                        None => break,
                    }
                }
            }
            b1
        };

        let mut changed = true;
        while changed {
            changed = false;
            for &b in rpo.iter().skip(1) {
                let b_nr = nr[&b];
                let mut new_idom: Option<usize> = None;
                for p in preds.get(&b).into_iter().flatten() {
                    let p_nr = nr[p];
                    if doms[p_nr].is_none() {
                        continue;
                    }
                    new_idom = Some(match new_idom {
                        None => p_nr,
                        Some(current) => intersect(&doms, p_nr, current),
                    });
                }
                if let Some(idom) = new_idom {
                    if doms[b_nr] != Some(idom) {
                        doms[b_nr] = Some(idom);
                        changed = true;
                    }
                }
            }
        }

        let mut idom = HashMap::new();
        let mut level = HashMap::new();
        level.insert(entry, 0);
        // Reverse postorder visits every idom before the blocks it dominates.
        for &b in rpo.iter().skip(1) {
            if let Some(d) = doms[nr[&b]] {
                let parent = rpo[size - 1 - d];
                idom.insert(b, parent);
                let depth = level.get(&parent).copied().unwrap_or(0) + 1;
                level.insert(b, depth);
            }
        }

        log::trace!(
            "dominator tree for {}: {} reachable of {} block(s)",
            func.display_name(),
            size,
            func.blocks.len()
        );
        Self {
            entry: Some(entry),
            idom,
            level,
        }
    }

    pub fn entry(&self) -> Option<RegId> {
        self.entry
    }

    /// The immediate dominator of `block`; `None` for the entry and for
    /// unreachable blocks.
    pub fn idom(&self, block: RegId) -> Option<RegId> {
        self.idom.get(&block).copied()
    }

    pub fn is_reachable(&self, block: RegId) -> bool {
        self.level.contains_key(&block)
    }
}

impl Dominance for DominatorTree {
    fn dominates(&self, a: RegId, b: RegId) -> bool {
        if a == b {
            return true;
        }
        let (Some(&la), Some(&lb)) = (self.level.get(&a), self.level.get(&b)) else {
            return false;
        };
        if la >= lb {
            return false;
        }
        let mut cur = b;
        for _ in la..lb {
            match self.idom.get(&cur) {
                Some(&d) => cur = d,
                None => return false,
            }
        }
        cur == a
    }
}

fn reverse_postorder(entry: RegId, succs: &HashMap<RegId, Vec<RegId>>) -> Vec<RegId> {
    let mut visited = HashSet::new();
    let mut postorder = Vec::new();
    // Iterative DFS: (block, index of the next successor to visit)
    let mut stack = vec![(entry, 0usize)];
    visited.insert(entry);
    while let Some(top) = stack.last_mut() {
        let (block, next) = *top;
        top.1 += 1;
        let children = succs.get(&block).map(Vec::as_slice).unwrap_or(&[]);
        match children.get(next) {
            Some(&child) => {
                if visited.insert(child) {
                    stack.push((child, 0));
                }
            }
            None => {
                postorder.push(block);
                stack.pop();
            }
        }
    }
    postorder.reverse();
    postorder
}
