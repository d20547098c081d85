//! Property-based tests for the play queue
//!
//! Uses proptest to verify queue invariants across many random edit
//! sequences.

use meloman_playback::{Queue, RepeatMode, Track};
use proptest::prelude::*;
use std::collections::HashSet;
use std::time::Duration;

// ===== Helpers =====

fn arbitrary_track() -> impl Strategy<Value = Track> {
    (
        "[a-e]{1,2}",      // id (small alphabet so duplicates happen)
        "[A-Za-z ]{1,20}", // title
        "[A-C]",           // artist
        1u64..600,         // duration (1-600 seconds)
    )
        .prop_map(|(id, title, artist, duration_secs)| Track {
            id,
            title,
            artist,
            album: "Album".to_string(),
            duration: Duration::from_secs(duration_secs),
            cover_art: None,
        })
}

fn arbitrary_tracks() -> impl Strategy<Value = Vec<Track>> {
    prop::collection::vec(arbitrary_track(), 1..30)
}

#[derive(Debug, Clone)]
enum Op {
    Append(Track),
    InsertAfterCurrent(Track),
    Remove(usize),
    Move(usize, usize),
    Jump(usize),
    Next,
    Previous,
    ToggleShuffle,
    Repeat(RepeatMode),
    Replace(Vec<Track>, usize),
    Clear,
}

fn arbitrary_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        arbitrary_track().prop_map(Op::Append),
        arbitrary_track().prop_map(Op::InsertAfterCurrent),
        (0usize..40).prop_map(Op::Remove),
        (0usize..40, 0usize..40).prop_map(|(a, b)| Op::Move(a, b)),
        (0usize..40).prop_map(Op::Jump),
        Just(Op::Next),
        Just(Op::Previous),
        Just(Op::ToggleShuffle),
        prop_oneof![
            Just(RepeatMode::Off),
            Just(RepeatMode::All),
            Just(RepeatMode::One)
        ]
        .prop_map(Op::Repeat),
        (prop::collection::vec(arbitrary_track(), 0..10), 0usize..12)
            .prop_map(|(t, i)| Op::Replace(t, i)),
        Just(Op::Clear),
    ]
}

fn apply(queue: &mut Queue, op: Op) {
    match op {
        Op::Append(t) => {
            queue.append(t);
        }
        Op::InsertAfterCurrent(t) => {
            queue.insert_after_current(t);
        }
        Op::Remove(i) => {
            queue.remove_at(i);
        }
        Op::Move(a, b) => queue.move_item(a, b),
        Op::Jump(i) => {
            queue.jump_to(i);
        }
        Op::Next => {
            queue.advance_to_next();
        }
        Op::Previous => {
            queue.advance_to_previous();
        }
        Op::ToggleShuffle => {
            queue.toggle_shuffle();
        }
        Op::Repeat(mode) => queue.set_repeat(mode),
        Op::Replace(t, i) => queue.replace(t, i),
        Op::Clear => queue.clear(),
    }
}

// ===== Property Tests =====

proptest! {
    /// Property: the selection is always in range, and empty means no selection
    #[test]
    fn current_index_always_valid(
        tracks in arbitrary_tracks(),
        start in 0usize..40,
        ops in prop::collection::vec(arbitrary_op(), 1..40)
    ) {
        let mut queue = Queue::new();
        queue.replace(tracks, start);

        for op in ops {
            apply(&mut queue, op);
            if let Some(index) = queue.current_index() {
                prop_assert!(index < queue.len());
            }
            if queue.is_empty() {
                prop_assert_eq!(queue.current_index(), None);
            }
        }
    }

    /// Property: live and original order always hold the same slots
    #[test]
    fn original_order_holds_same_slots(
        tracks in arbitrary_tracks(),
        ops in prop::collection::vec(arbitrary_op(), 1..40)
    ) {
        let mut queue = Queue::new();
        queue.replace(tracks, 0);

        for op in ops {
            apply(&mut queue, op);
            let live: HashSet<_> = queue.entries().iter().map(|e| e.slot).collect();
            let original: HashSet<_> = queue.original_order().iter().map(|e| e.slot).collect();
            prop_assert_eq!(live.len(), queue.len());
            prop_assert_eq!(live, original);
            if !queue.is_shuffled() {
                prop_assert_eq!(queue.entries(), queue.original_order());
            }
        }
    }

    /// Property: toggling shuffle never changes the selected slot
    #[test]
    fn shuffle_preserves_current_slot(
        tracks in arbitrary_tracks(),
        start in 0usize..30,
        ops in prop::collection::vec(arbitrary_op(), 0..20)
    ) {
        let mut queue = Queue::new();
        queue.replace(tracks, start);
        for op in ops {
            apply(&mut queue, op);
        }

        let before = queue.current_slot();
        queue.toggle_shuffle();
        prop_assert_eq!(queue.current_slot(), before);
        queue.toggle_shuffle();
        prop_assert_eq!(queue.current_slot(), before);
    }

    /// Property: shuffle on then off restores the exact order
    #[test]
    fn shuffle_round_trip_restores_order(
        tracks in arbitrary_tracks(),
        start in 0usize..30
    ) {
        let mut queue = Queue::new();
        queue.replace(tracks, start);
        let before: Vec<_> = queue.entries().to_vec();
        let index = queue.current_index();

        queue.toggle_shuffle();
        queue.toggle_shuffle();

        prop_assert_eq!(queue.entries(), before.as_slice());
        prop_assert_eq!(queue.current_index(), index);
    }

    /// Property: with repeat all, `len` advances visit every slot once and return home
    #[test]
    fn repeat_all_cycles_through_every_slot(
        tracks in arbitrary_tracks(),
        start in 0usize..30
    ) {
        let mut queue = Queue::new();
        queue.replace(tracks, start);
        queue.set_repeat(RepeatMode::All);

        let home = queue.current_index();
        let mut visited = HashSet::new();
        for _ in 0..queue.len() {
            prop_assert!(queue.advance_to_next());
            prop_assert!(visited.insert(queue.current_index()));
        }

        prop_assert_eq!(visited.len(), queue.len());
        prop_assert_eq!(queue.current_index(), home);
    }

    /// Property: removing the current slot never changes the numeric index,
    /// except when it was the last slot
    #[test]
    fn removing_current_keeps_index(
        tracks in prop::collection::vec(arbitrary_track(), 2..30),
        start in 0usize..30
    ) {
        let mut queue = Queue::new();
        queue.replace(tracks, start);
        let index = queue.current_index().unwrap();
        let last = queue.len() - 1;

        queue.remove_at(index);

        if index < last {
            prop_assert_eq!(queue.current_index(), Some(index));
        } else {
            prop_assert_eq!(queue.current_index(), Some(index - 1));
        }
    }

    /// Property: the end of the queue is a hard stop without repeat
    #[test]
    fn next_at_end_without_repeat_is_noop(tracks in arbitrary_tracks()) {
        let mut queue = Queue::new();
        let last = tracks.len() - 1;
        queue.replace(tracks, last);

        prop_assert!(!queue.advance_to_next());
        prop_assert_eq!(queue.current_index(), Some(last));
    }
}
