//! Year cache (§4.6 / §5): memoizes `(zone, year) -> transitions` so repeated
//! queries against the same zone/year don't re-run the era selector and rule
//! expander.
//!
//! The teacher's own zone cache (`tz::store::Cache`) is explicitly
//! documented as relying on the interpreter's GIL for its safety; its
//! `UnsafeCell`-based refcounting is only sound because callers hold the GIL
//! for the whole operation. This crate has no such guarantee: callers may
//! genuinely hand the same registry to multiple threads concurrently (§5),
//! so this cache needs real synchronization rather than the GIL-backed
//! shortcut. It keeps the shape the teacher's `free_threaded` build variant
//! settles on (one lock guarding a hash map, first writer wins, a lost race
//! just discards its otherwise valid work), expressed with `std::sync`
//! primitives plus the corpus's `ahash` hasher rather than reimplementing
//! `free_threaded`'s hand-rolled atomic cells, which exist there only to
//! avoid locking overhead on the GIL-enabled build's counterpart; with only
//! one concurrency mode here, a plain `RwLock` already gives the guarantee
//! this cache needs. Eviction is not required (§4.6) so entries accumulate
//! for the registry's lifetime.

use std::sync::{Arc, RwLock};

use ahash::AHashMap;

use crate::calendar::Year;
use crate::error::Result;
use crate::model::ActiveTransition;

#[derive(Default)]
pub struct TransitionCache {
    entries: RwLock<AHashMap<(String, i32), Arc<Vec<ActiveTransition>>>>,
}

impl TransitionCache {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(AHashMap::default()),
        }
    }

    /// Return the cached transition list for `(zone_name, year)`, building it
    /// with `build` on a miss. If two threads race on the same key, both may
    /// run `build`, but only the first to publish wins; the other discards
    /// its result and returns the winner's.
    pub fn get_or_build<F>(
        &self,
        zone_name: &str,
        year: Year,
        build: F,
    ) -> Result<Arc<Vec<ActiveTransition>>>
    where
        F: FnOnce() -> Result<Vec<ActiveTransition>>,
    {
        let key = (zone_name.to_string(), year.get() as i32);

        if let Some(hit) = self.entries.read().unwrap().get(&key) {
            return Ok(Arc::clone(hit));
        }

        let built = Arc::new(build()?);

        let mut entries = self.entries.write().unwrap();
        let winner = entries.entry(key).or_insert_with(|| Arc::clone(&built));
        Ok(Arc::clone(winner))
    }
}
