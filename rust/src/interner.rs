//! Dense integer ids for the tasks of one batch.
//!
//! Indices follow input order, which is what makes the scheduler's traversal
//! order reproducible for a fixed input.

use rustc_hash::FxHashMap;

/// Interned task id.
pub type TaskIdx = u32;

/// Maps task id strings to their input position and back.
#[derive(Debug, Clone, Default)]
pub struct TaskIdInterner<'a> {
    to_idx: FxHashMap<&'a str, TaskIdx>,
    from_idx: Vec<&'a str>,
}

impl<'a> TaskIdInterner<'a> {
    /// Intern every id in order, failing on the first id seen twice.
    pub fn from_unique<I>(ids: I) -> Result<Self, &'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let ids = ids.into_iter();
        let (lower, _) = ids.size_hint();
        let mut interner = Self {
            to_idx: FxHashMap::with_capacity_and_hasher(lower, Default::default()),
            from_idx: Vec::with_capacity(lower),
        };
        for id in ids {
            if interner.to_idx.contains_key(id) {
                return Err(id);
            }
            interner.to_idx.insert(id, interner.from_idx.len() as TaskIdx);
            interner.from_idx.push(id);
        }
        Ok(interner)
    }

    #[inline]
    pub fn get(&self, id: &str) -> Option<TaskIdx> {
        self.to_idx.get(id).copied()
    }

    #[inline]
    pub fn resolve(&self, idx: TaskIdx) -> Option<&'a str> {
        self.from_idx.get(idx as usize).copied()
    }

    pub fn len(&self) -> usize {
        self.from_idx.len()
    }
}
