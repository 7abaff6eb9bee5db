//! Property-based invariant tests over random sequence trees.
//!
//! 1. Flattened order and frame indices agree
//! 2. Reconstruction is deterministic
//! 3. Returned boards never alias each other or the tree
//! 4. Out-of-range targets return the end-of-timeline board
//! 5. `board_timeline` agrees with single-frame reconstruction
//! 6. Moving a sequence under itself is rejected and changes nothing
//! 7. Deleting a node removes its whole subtree
//! 8. Insert clamps its index

use proptest::prelude::*;
use proptest::sample::Index;

use tilecast_timeline::{
    Timeline, TimelineError, board_timeline, compute_board_at_frame, delete_node, find_frame_index,
    flatten_frames, frame_count, insert_frame,
};
use tilecast_types::{
    AdditivityType, ChronologyType, Effect, FrameNode, Game, Node, NodeId, NodeRef, SequenceNode,
    Square, TilePlacement, TileState,
};

const SIZE: usize = 6;

// ── Strategies ──────────────────────────────────────────────────────────

fn placement_strategy() -> impl Strategy<Value = TilePlacement> {
    (0..SIZE, 0..SIZE, proptest::char::range('A', 'Z'))
        .prop_map(|(x, y, c)| TilePlacement::new(x, y, c))
}

fn effect_strategy() -> impl Strategy<Value = Effect> {
    prop_oneof![
        prop::collection::vec(placement_strategy(), 0..4).prop_map(Effect::play),
        prop::collection::vec((0..SIZE, 0..SIZE).prop_map(|(x, y)| Square::new(x, y)), 0..3)
            .prop_map(Effect::highlight),
        prop::collection::vec(placement_strategy(), 0..3).prop_map(Effect::show_potential_play),
        Just(Effect::none()),
    ]
}

fn policy_strategy() -> impl Strategy<Value = (ChronologyType, AdditivityType)> {
    (
        prop::sample::select(ChronologyType::ALL.to_vec()),
        prop::sample::select(AdditivityType::ALL.to_vec()),
    )
}

fn node_strategy() -> impl Strategy<Value = Node> {
    let leaf = effect_strategy().prop_map(|e| Node::from(FrameNode::new(e)));
    leaf.prop_recursive(4, 40, 5, |inner| {
        (policy_strategy(), prop::collection::vec(inner, 0..5)).prop_map(|((c, a), children)| {
            let mut seq = SequenceNode::new(c, a);
            seq.children = children;
            Node::from(seq)
        })
    })
}

fn tree_strategy() -> impl Strategy<Value = SequenceNode> {
    (policy_strategy(), prop::collection::vec(node_strategy(), 0..6)).prop_map(
        |((c, a), children)| {
            let mut root = SequenceNode::new(c, a);
            root.children = children;
            root
        },
    )
}

// ── Helpers ─────────────────────────────────────────────────────────────

fn all_ids(root: &SequenceNode) -> Vec<NodeId> {
    let mut ids = Vec::new();
    root.collect_ids(&mut ids);
    ids
}

fn sequence_ids(root: &SequenceNode) -> Vec<NodeId> {
    all_ids(root)
        .into_iter()
        .filter(|id| matches!(root.find(*id), Some(NodeRef::Sequence(_))))
        .collect()
}

fn subtree_ids(root: &SequenceNode, id: NodeId) -> Vec<NodeId> {
    match root.find(id) {
        Some(NodeRef::Sequence(s)) => {
            let mut ids = Vec::new();
            s.collect_ids(&mut ids);
            ids
        }
        Some(NodeRef::Frame(f)) => vec![f.id],
        None => Vec::new(),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Reconstruction
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn flatten_and_index_agree(root in tree_strategy()) {
        let frames = flatten_frames(&root);
        prop_assert_eq!(frames.len(), frame_count(&root));
        for (i, f) in frames.iter().enumerate() {
            prop_assert_eq!(find_frame_index(f.id, &root), Some(i));
        }
        for id in sequence_ids(&root) {
            prop_assert_eq!(find_frame_index(id, &root), None);
        }
        prop_assert_eq!(find_frame_index(NodeId::new(), &root), None);
    }

    #[test]
    fn reconstruction_is_deterministic(root in tree_strategy(), target in 0usize..50) {
        let a = compute_board_at_frame(&root, target, SIZE).unwrap();
        let b = compute_board_at_frame(&root, target, SIZE).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn returned_boards_do_not_alias(root in tree_strategy(), target in 0usize..50) {
        let original_root = root.clone();
        let mut first = compute_board_at_frame(&root, target, SIZE).unwrap();
        let snapshot = first.clone();
        for (x, y) in [(0, 0), (SIZE - 1, SIZE - 1)] {
            let tile = first.get_mut(x, y).unwrap();
            tile.letter = Some('#');
            tile.state = TileState::Locked;
        }
        let second = compute_board_at_frame(&root, target, SIZE).unwrap();
        prop_assert_eq!(&second, &snapshot);
        prop_assert_eq!(&root, &original_root);
    }

    #[test]
    fn out_of_range_returns_final_board(root in tree_strategy(), past in 0usize..1000) {
        let n = frame_count(&root);
        let end = compute_board_at_frame(&root, n, SIZE).unwrap();
        prop_assert_eq!(compute_board_at_frame(&root, n + past, SIZE).unwrap(), end);
    }

    #[test]
    fn board_timeline_matches_single_frames(root in tree_strategy()) {
        let boards = board_timeline(&root, SIZE).unwrap();
        prop_assert_eq!(boards.len(), frame_count(&root));
        for (i, board) in boards.iter().enumerate() {
            prop_assert_eq!(board, &compute_board_at_frame(&root, i, SIZE).unwrap());
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Mutation
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn move_into_own_subtree_rejected(
        root in tree_strategy(),
        pick in any::<Index>(),
        under in any::<Index>()
    ) {
        let candidates: Vec<NodeId> =
            sequence_ids(&root).into_iter().filter(|id| *id != root.id).collect();
        prop_assume!(!candidates.is_empty());
        let moving = *pick.get(&candidates);
        let targets: Vec<NodeId> = subtree_ids(&root, moving)
            .into_iter()
            .filter(|id| matches!(root.find(*id), Some(NodeRef::Sequence(_))))
            .collect();
        let target = *under.get(&targets);

        let mut timeline = Timeline::new(Game {
            root_sequence: root.clone(),
            ..Game::new("prop", SIZE)
        });
        let err = timeline.move_node(moving, target, 0).unwrap_err();
        prop_assert_eq!(err, TimelineError::MoveIntoOwnSubtree { node: moving, target });
        prop_assert_eq!(timeline.root(), &root);
        prop_assert_eq!(timeline.generation(), 0);
    }

    #[test]
    fn delete_removes_whole_subtree(root in tree_strategy(), pick in any::<Index>()) {
        let candidates: Vec<NodeId> =
            all_ids(&root).into_iter().filter(|id| *id != root.id).collect();
        prop_assume!(!candidates.is_empty());
        let victim = *pick.get(&candidates);
        let (parent, _) = root.find_parent(victim).unwrap();
        let gone = subtree_ids(&root, victim);
        let gone_frames = gone
            .iter()
            .filter(|id| matches!(root.find(**id), Some(NodeRef::Frame(_))))
            .count();

        let next = delete_node(&root, parent, victim).unwrap();
        for id in &gone {
            prop_assert!(next.find(*id).is_none());
        }
        prop_assert_eq!(frame_count(&next), frame_count(&root) - gone_frames);
        prop_assert_eq!(all_ids(&next).len(), all_ids(&root).len() - gone.len());
    }

    #[test]
    fn insert_clamps_index(
        root in tree_strategy(),
        pick in any::<Index>(),
        index in any::<usize>()
    ) {
        let parents = sequence_ids(&root);
        let parent = *pick.get(&parents);
        let len = root.find(parent).and_then(|n| n.as_sequence()).unwrap().children.len();

        let (next, id) = insert_frame(&root, parent, index, Effect::none()).unwrap();
        prop_assert_eq!(next.find_parent(id), Some((parent, index.min(len))));
        prop_assert_eq!(frame_count(&next), frame_count(&root) + 1);
    }
}
