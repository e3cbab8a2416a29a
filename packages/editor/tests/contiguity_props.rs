//! Property tests: block order stays contiguous and undo is an exact inverse

use pagecraft_editor::{BlockData, BlockType, EditSession, Page};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Add { index: Option<usize> },
    Move { from: usize, to: usize },
    Duplicate { pick: usize },
    Delete { pick: usize },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        proptest::option::of(0usize..12).prop_map(|index| Op::Add { index }),
        (0usize..12, 0usize..12).prop_map(|(from, to)| Op::Move { from, to }),
        (0usize..12).prop_map(|pick| Op::Duplicate { pick }),
        (0usize..12).prop_map(|pick| Op::Delete { pick }),
    ]
}

fn pick_id(session: &EditSession, pick: usize) -> Option<String> {
    let blocks = session.blocks();
    if blocks.is_empty() {
        None
    } else {
        Some(blocks[pick % blocks.len()].id.clone())
    }
}

fn run(session: &mut EditSession, op: &Op) {
    match op {
        Op::Add { index } => {
            session.add_block(BlockData::empty(BlockType::Card), *index, None);
        }
        Op::Move { from, to } => {
            session.move_block(*from, *to);
        }
        Op::Duplicate { pick } => {
            if let Some(id) = pick_id(session, *pick) {
                session.duplicate_block(&id);
            }
        }
        Op::Delete { pick } => {
            if let Some(id) = pick_id(session, *pick) {
                session.delete_block(&id);
            }
        }
    }
}

proptest! {
    #[test]
    fn orders_are_always_contiguous(ops in proptest::collection::vec(op_strategy(), 0..60)) {
        let mut session = EditSession::default();
        session.load(Page::placeholder());

        for op in &ops {
            run(&mut session, op);
            let orders: Vec<usize> = session.blocks().iter().map(|b| b.order).collect();
            let expected: Vec<usize> = (0..orders.len()).collect();
            prop_assert_eq!(orders, expected);
        }
    }

    #[test]
    fn undo_inverts_last_mutation(
        setup in proptest::collection::vec(op_strategy(), 0..20),
        last in op_strategy(),
    ) {
        let mut session = EditSession::default();
        session.load(Page::placeholder());
        for op in &setup {
            run(&mut session, op);
        }

        let before = session.page().cloned().unwrap();
        let len_before = session.history().len();
        run(&mut session, &last);

        // setup stays well under the history limit, so an applied edit grows it
        if session.history().len() > len_before {
            prop_assert!(session.undo());
            prop_assert_eq!(&session.page().unwrap().blocks, &before.blocks);
            prop_assert!(session.is_dirty());
        } else {
            prop_assert_eq!(&session.page().unwrap().blocks, &before.blocks);
        }
    }
}
