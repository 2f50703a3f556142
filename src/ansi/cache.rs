//! Sequence cache: memoized byte sequences the diff regenerates constantly.
//!
//! Cursor moves, style prefixes and blank runs repeat frame after frame
//! at the same parameters. The cache is a plain value owned by whoever
//! renders (the engine); there is no process-wide state. Each table is
//! bounded: when a miss would grow a table past `capacity`, that table is
//! flushed first.

use super::encode;
use crate::buffer::Style;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::hash::Hash;

/// Memoized control sequences keyed by their parameters.
#[derive(Debug, Clone)]
pub struct SequenceCache {
    cursor: HashMap<(u16, u16), Box<[u8]>>,
    styles: HashMap<Style, Box<[u8]>>,
    blanks: HashMap<u16, Box<[u8]>>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl SequenceCache {
    /// Create a cache holding at most `capacity` entries per table.
    pub fn new(capacity: usize) -> Self {
        Self {
            cursor: HashMap::new(),
            styles: HashMap::new(),
            blanks: HashMap::new(),
            capacity,
            hits: 0,
            misses: 0,
        }
    }

    /// Cursor move to `(x, y)`, see [`encode::cursor_to`].
    pub fn cursor_to(&mut self, x: u16, y: u16) -> &[u8] {
        lookup(
            &mut self.cursor,
            (x, y),
            self.capacity,
            (&mut self.hits, &mut self.misses),
            |out| encode::cursor_to(out, x, y),
        )
    }

    /// Full SGR prefix for `style`, see [`encode::style`].
    pub fn style(&mut self, style: Style) -> &[u8] {
        lookup(
            &mut self.styles,
            style,
            self.capacity,
            (&mut self.hits, &mut self.misses),
            |out| encode::style(out, style),
        )
    }

    /// A run of `count` spaces.
    pub fn spaces(&mut self, count: u16) -> &[u8] {
        lookup(
            &mut self.blanks,
            count,
            self.capacity,
            (&mut self.hits, &mut self.misses),
            |out| out.resize(count as usize, b' '),
        )
    }

    /// The reset sequence. Constant, so never stored.
    #[inline]
    pub const fn reset() -> &'static [u8] {
        encode::RESET
    }

    /// Drop every cached sequence and zero the counters.
    pub fn clear(&mut self) {
        self.cursor.clear();
        self.styles.clear();
        self.blanks.clear();
        self.hits = 0;
        self.misses = 0;
    }

    /// Total entries across all tables.
    pub fn len(&self) -> usize {
        self.cursor.len() + self.styles.len() + self.blanks.len()
    }

    /// Check whether nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Lookups answered from the cache.
    pub const fn hits(&self) -> u64 {
        self.hits
    }

    /// Lookups that had to encode.
    pub const fn misses(&self) -> u64 {
        self.misses
    }
}

impl Default for SequenceCache {
    fn default() -> Self {
        Self::new(4096)
    }
}

fn lookup<'a, K: Hash + Eq>(
    table: &'a mut HashMap<K, Box<[u8]>>,
    key: K,
    capacity: usize,
    (hits, misses): (&mut u64, &mut u64),
    build: impl FnOnce(&mut Vec<u8>),
) -> &'a [u8] {
    if table.len() >= capacity && !table.contains_key(&key) {
        table.clear();
    }
    let stored = match table.entry(key) {
        Entry::Occupied(entry) => {
            *hits += 1;
            entry.into_mut()
        }
        Entry::Vacant(entry) => {
            *misses += 1;
            let mut bytes = Vec::new();
            build(&mut bytes);
            entry.insert(bytes.into_boxed_slice())
        }
    };
    stored
}
