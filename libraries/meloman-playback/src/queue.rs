//! Play queue with a movable selection
//!
//! The queue is an ordered list of slots. Each slot carries a track plus a
//! queue-unique [`SlotId`], so the same track may be queued several times and
//! the selection can follow "its" slot through inserts, removals and moves.
//!
//! ```text
//! live:      [ s3 s1 *s4* s2 ]   current_index = Some(2)
//! original:  [ s1 s2  s3  s4 ]   restored when shuffle is turned off
//! ```
//!
//! The queue is pure state: it never touches audio or the network.

use crate::shuffle::shuffle_entries;
use crate::types::{RepeatMode, ShuffleAlgorithm, SlotId, Track};

/// One slot of the queue
#[derive(Debug, Clone, PartialEq)]
pub struct QueueEntry {
    /// Slot identity, unique within the queue
    pub slot: SlotId,

    /// Track occupying the slot
    pub track: Track,
}

/// Ordered play queue with selection, shuffle and repeat
#[derive(Debug, Clone)]
pub struct Queue {
    /// Live playback order
    entries: Vec<QueueEntry>,

    /// Unshuffled order (equals `entries` while shuffle is off)
    original_order: Vec<QueueEntry>,

    /// Selected position in `entries`
    current: Option<usize>,

    shuffle_enabled: bool,
    algorithm: ShuffleAlgorithm,
    repeat: RepeatMode,

    /// Next slot id to hand out
    next_slot: u64,
}

impl Queue {
    /// Create new empty queue
    pub fn new() -> Self {
        Self::with_settings(ShuffleAlgorithm::default(), RepeatMode::default())
    }

    /// Create an empty queue with a shuffle algorithm and initial repeat mode
    pub fn with_settings(algorithm: ShuffleAlgorithm, repeat: RepeatMode) -> Self {
        Self {
            entries: Vec::new(),
            original_order: Vec::new(),
            current: None,
            shuffle_enabled: false,
            algorithm,
            repeat,
            next_slot: 0,
        }
    }

    fn allocate(&mut self, track: Track) -> QueueEntry {
        let slot = SlotId(self.next_slot);
        self.next_slot += 1;
        QueueEntry { slot, track }
    }

    // ===== Mutations =====

    /// Replace the whole queue and select `start_index`
    ///
    /// Every track gets a fresh slot. The start index is clamped to the last
    /// slot; an empty list leaves nothing selected. When shuffle is on, the
    /// new list is shuffled with the selected slot pinned in place.
    pub fn replace(&mut self, tracks: Vec<Track>, start_index: usize) {
        let entries: Vec<QueueEntry> = tracks.into_iter().map(|t| self.allocate(t)).collect();

        self.current = if entries.is_empty() {
            None
        } else {
            Some(start_index.min(entries.len() - 1))
        };
        self.original_order.clone_from(&entries);
        self.entries = entries;

        if self.shuffle_enabled {
            self.shuffle_around_current();
        }
    }

    /// Append a track at the end of the queue
    pub fn append(&mut self, track: Track) -> SlotId {
        let entry = self.allocate(track);
        let slot = entry.slot;
        self.original_order.push(entry.clone());
        self.entries.push(entry);
        slot
    }

    /// Insert a track right after the current slot (at the front if nothing is selected)
    pub fn insert_after_current(&mut self, track: Track) -> SlotId {
        let entry = self.allocate(track);
        let slot = entry.slot;

        let live_at = self.current.map_or(0, |c| c + 1);
        let shadow_at = self
            .current_slot()
            .and_then(|s| self.original_order.iter().position(|e| e.slot == s))
            .map_or(0, |p| p + 1);

        self.original_order.insert(shadow_at, entry.clone());
        self.entries.insert(live_at, entry);
        slot
    }

    /// Remove the slot at `index`
    ///
    /// Removing the current slot keeps the numeric index, which now points at
    /// the slot that slid into place (or the new last slot).
    pub fn remove_at(&mut self, index: usize) -> Option<Track> {
        if index >= self.entries.len() {
            return None;
        }

        let removed = self.entries.remove(index);
        self.original_order.retain(|e| e.slot != removed.slot);

        self.current = match self.current {
            _ if self.entries.is_empty() => None,
            Some(c) if index < c => Some(c - 1),
            Some(c) if index == c => Some(c.min(self.entries.len() - 1)),
            other => other,
        };

        Some(removed.track)
    }

    /// Move the slot at `from` to `to`; both indices are clamped into range
    pub fn move_item(&mut self, from: usize, to: usize) {
        if self.entries.is_empty() {
            return;
        }
        let last = self.entries.len() - 1;
        let (from, to) = (from.min(last), to.min(last));
        if from == to {
            return;
        }

        let entry = self.entries.remove(from);
        self.entries.insert(to, entry);

        self.current = self.current.map(|c| {
            if c == from {
                to
            } else if from < c && c <= to {
                c - 1
            } else if to <= c && c < from {
                c + 1
            } else {
                c
            }
        });

        if !self.shuffle_enabled {
            self.original_order.clone_from(&self.entries);
        }
    }

    /// Move the slot at `index` one position towards the front
    pub fn move_up(&mut self, index: usize) {
        if index == 0 {
            return;
        }
        self.move_item(index, index - 1);
    }

    /// Move the slot at `index` one position towards the back
    pub fn move_down(&mut self, index: usize) {
        self.move_item(index, index + 1);
    }

    /// Select the slot at `index`
    ///
    /// Returns `false` (and changes nothing) when out of range.
    pub fn jump_to(&mut self, index: usize) -> bool {
        if index >= self.entries.len() {
            return false;
        }
        self.current = Some(index);
        true
    }

    /// Advance the selection to the next slot
    ///
    /// Repeat-one keeps the current slot. Past the end the selection wraps
    /// under repeat-all, otherwise nothing changes and `false` is returned.
    pub fn advance_to_next(&mut self) -> bool {
        match self.next_index() {
            Some(next) => {
                self.current = Some(next);
                true
            }
            None => false,
        }
    }

    /// Move the selection to the previous slot
    ///
    /// Before the first slot the selection wraps under repeat-all, otherwise
    /// it stays on the first slot. Only an empty queue returns `false`.
    pub fn advance_to_previous(&mut self) -> bool {
        if self.entries.is_empty() {
            return false;
        }

        self.current = Some(match self.current {
            Some(c) if c > 0 => c - 1,
            _ if self.repeat == RepeatMode::All => self.entries.len() - 1,
            _ => 0,
        });
        true
    }

    /// Turn shuffle on or off
    ///
    /// Turning it on remembers the current order and shuffles every other
    /// slot around the selected one. Turning it off restores that order and
    /// relocates the selection to the same slot.
    pub fn set_shuffle(&mut self, enabled: bool) {
        if enabled == self.shuffle_enabled {
            return;
        }
        self.shuffle_enabled = enabled;

        if enabled {
            self.original_order.clone_from(&self.entries);
            self.shuffle_around_current();
        } else {
            let selected = self.current_slot();
            self.entries.clone_from(&self.original_order);
            let relocated = selected.and_then(|s| self.entries.iter().position(|e| e.slot == s));
            self.current = match relocated {
                Some(index) => Some(index),
                None if self.entries.is_empty() => None,
                None => self.current.map(|c| c.min(self.entries.len() - 1)),
            };
        }
    }

    /// Flip shuffle; returns the new state
    pub fn toggle_shuffle(&mut self) -> bool {
        self.set_shuffle(!self.shuffle_enabled);
        self.shuffle_enabled
    }

    pub fn set_repeat(&mut self, mode: RepeatMode) {
        self.repeat = mode;
    }

    pub fn set_shuffle_algorithm(&mut self, algorithm: ShuffleAlgorithm) {
        self.algorithm = algorithm;
    }

    /// Remove every slot and clear the selection
    pub fn clear(&mut self) {
        self.entries.clear();
        self.original_order.clear();
        self.current = None;
    }

    fn shuffle_around_current(&mut self) {
        match self.current {
            Some(c) => {
                let pinned = self.entries.remove(c);
                shuffle_entries(&mut self.entries, self.algorithm);
                self.entries.insert(c, pinned);
            }
            None => shuffle_entries(&mut self.entries, self.algorithm),
        }
    }

    /// Index `advance_to_next` would select, if any
    fn next_index(&self) -> Option<usize> {
        if self.entries.is_empty() {
            return None;
        }
        if let (RepeatMode::One, Some(c)) = (self.repeat, self.current) {
            return Some(c);
        }

        let next = self.current.map_or(0, |c| c + 1);
        if next < self.entries.len() {
            Some(next)
        } else if self.repeat == RepeatMode::All {
            Some(0)
        } else {
            None
        }
    }

    // ===== Queries =====

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All slots in playback order
    pub fn entries(&self) -> &[QueueEntry] {
        &self.entries
    }

    /// Tracks in playback order
    pub fn tracks(&self) -> impl Iterator<Item = &Track> {
        self.entries.iter().map(|e| &e.track)
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.entries.get(index).map(|e| &e.track)
    }

    /// Currently selected track
    pub fn current(&self) -> Option<&Track> {
        self.current_entry().map(|e| &e.track)
    }

    pub fn current_entry(&self) -> Option<&QueueEntry> {
        self.current.and_then(|c| self.entries.get(c))
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_slot(&self) -> Option<SlotId> {
        self.current_entry().map(|e| e.slot)
    }

    /// Slot that `advance_to_next` would select, honouring repeat
    pub fn peek_next(&self) -> Option<&QueueEntry> {
        self.next_index().and_then(|i| self.entries.get(i))
    }

    pub fn is_shuffled(&self) -> bool {
        self.shuffle_enabled
    }

    pub fn repeat(&self) -> RepeatMode {
        self.repeat
    }

    pub fn shuffle_algorithm(&self) -> ShuffleAlgorithm {
        self.algorithm
    }

    /// Unshuffled order, as restored when shuffle is turned off
    pub fn original_order(&self) -> &[QueueEntry] {
        &self.original_order
    }
}

impl Default for Queue {
    fn default() -> Self {
        Self::new()
    }
}
