//! Shuffle algorithms for queue randomization
//!
//! Implements both pure random (Fisher-Yates) and smart shuffle algorithms.
//! Both operate on queue entries so slot identity travels with each track.

use crate::queue::QueueEntry;
use crate::types::ShuffleAlgorithm;
use rand::seq::SliceRandom;
use rand::thread_rng;
use std::collections::HashMap;

/// Shuffle a run of queue entries with the given algorithm
pub fn shuffle_entries(entries: &mut [QueueEntry], algorithm: ShuffleAlgorithm) {
    match algorithm {
        ShuffleAlgorithm::Random => shuffle_random(entries),
        ShuffleAlgorithm::Smart => shuffle_smart(entries),
    }
}

/// Pure random shuffle using Fisher-Yates algorithm
///
/// Each entry has equal probability of appearing at any position.
fn shuffle_random(entries: &mut [QueueEntry]) {
    entries.shuffle(&mut thread_rng());
}

/// Smart shuffle algorithm
///
/// Groups entries by artist, randomizes inside each group and the order of
/// the groups, then takes one entry per artist in round-robin so the same
/// artist rarely plays twice in a row.
fn shuffle_smart(entries: &mut [QueueEntry]) {
    if entries.len() <= 2 {
        shuffle_random(entries);
        return;
    }

    let mut rng = thread_rng();

    let mut by_artist: HashMap<String, Vec<QueueEntry>> = HashMap::new();
    for entry in entries.iter() {
        by_artist
            .entry(entry.track.artist.clone())
            .or_default()
            .push(entry.clone());
    }

    let mut groups: Vec<Vec<QueueEntry>> = by_artist.into_values().collect();
    for group in &mut groups {
        group.shuffle(&mut rng);
        // Popping from the back keeps the shuffled order intact
        group.reverse();
    }
    groups.shuffle(&mut rng);

    let mut result = Vec::with_capacity(entries.len());
    while result.len() < entries.len() {
        for group in &mut groups {
            if let Some(entry) = group.pop() {
                result.push(entry);
            }
        }
    }

    for (slot, entry) in entries.iter_mut().zip(result) {
        *slot = entry;
    }
}
