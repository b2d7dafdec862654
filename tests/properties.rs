//! Property tests for the string codec and the block linearizer.

use proptest::prelude::*;

use spirv_emit::codegen::string_codec::{decode_string, decode_words, encode_string, string_operands, word_count};
use spirv_emit::ir::{BasicBlock, Function, FunctionBuilder, Instruction, Operand, RegId};
use spirv_emit::isa::Opcode;
use spirv_emit::pass::{linearize, Dominance, DominatorTree};

const LABEL_BASE: u32 = 100;

fn terminator(succs: &[usize]) -> Instruction {
    let target = |i: usize| Operand::Reg(RegId(LABEL_BASE + i as u32));
    match succs {
        [] => Instruction::new(Opcode::Return, vec![]),
        [t] => Instruction::new(Opcode::Branch, vec![target(*t)]),
        [t, f, ..] => Instruction::new(
            Opcode::BranchConditional,
            vec![Operand::Reg(RegId(0)), target(*t), target(*f)],
        ),
    }
}

/// Block `i` is labelled `LABEL_BASE + i`; `order` gives the layout.
fn build(succs: &[Vec<usize>], order: &[usize]) -> Function {
    let mut f = FunctionBuilder::new(RegId(1), RegId(2), RegId(3)).build();
    f.blocks = order
        .iter()
        .map(|&i| BasicBlock::with_instrs(RegId(LABEL_BASE + i as u32), vec![terminator(&succs[i])]))
        .collect();
    f
}

/// A random CFG of 1 to 9 blocks, plus a random layout of them.
fn cfg_and_order() -> impl Strategy<Value = (Vec<Vec<usize>>, Vec<usize>)> {
    (1usize..10).prop_flat_map(|n| {
        (
            prop::collection::vec(prop::collection::vec(0..n, 0..=2), n),
            Just((0..n).collect::<Vec<_>>()).prop_shuffle(),
        )
    })
}

proptest! {
    #[test]
    fn string_words_are_padded(bytes in prop::collection::vec(1u8..=255, 0..64)) {
        let words = encode_string(&bytes);
        prop_assert_eq!(words.len(), word_count(bytes.len()));
        prop_assert_eq!(words.len(), bytes.len() / 4 + 1);
        // The terminator always lands in the last word.
        let last = words[words.len() - 1];
        prop_assert_eq!(last >> ((bytes.len() % 4) * 8), 0);
        prop_assert_eq!(decode_words(&words), bytes);
    }

    #[test]
    fn string_operands_decode(text in "[^\\x00]{0,24}") {
        let ops = string_operands(&text);
        prop_assert_eq!(decode_string(&ops, 0), text);
    }

    #[test]
    fn linearized_order_respects_dominance((succs, order) in cfg_and_order()) {
        let mut f = build(&succs, &order);
        let dom = DominatorTree::compute(&f);
        linearize(&mut f, &dom);

        let labels = f.block_order();
        for (i, a) in labels.iter().enumerate() {
            for b in &labels[..i] {
                prop_assert!(!dom.dominates(*a, *b), "{} dominates earlier block {}", a, b);
            }
        }
    }

    #[test]
    fn linearize_is_a_permutation((succs, order) in cfg_and_order()) {
        let mut f = build(&succs, &order);
        let before = f.clone();
        let dom = DominatorTree::compute(&f);
        let changed = linearize(&mut f, &dom);

        let mut got = f.blocks.clone();
        let mut want = before.blocks.clone();
        got.sort_by_key(|b| b.label);
        want.sort_by_key(|b| b.label);
        prop_assert_eq!(got, want);
        prop_assert_eq!(changed, f.block_order() != before.block_order());
    }

    #[test]
    fn linearize_is_idempotent((succs, order) in cfg_and_order()) {
        let mut f = build(&succs, &order);
        let dom = DominatorTree::compute(&f);
        linearize(&mut f, &dom);
        let once = f.block_order();
        // The entry block stays first, so the tree is unchanged.
        let dom = DominatorTree::compute(&f);
        prop_assert!(!linearize(&mut f, &dom));
        prop_assert_eq!(f.block_order(), once);
    }

    #[test]
    fn entry_block_stays_first((succs, order) in cfg_and_order()) {
        let mut f = build(&succs, &order);
        let entry = f.blocks[0].label;
        let dom = DominatorTree::compute(&f);
        linearize(&mut f, &dom);
        prop_assert_eq!(f.blocks[0].label, entry);
    }
}
