//! Course id interning.
//!
//! The search marks courses as taken on every placement and clears the mark
//! on backtrack, so course ids are mapped to dense integers once per call.

use rustc_hash::FxHashMap;

/// Interned course id, dense from 0 in first-seen order.
pub type CourseKey = u32;

#[derive(Debug, Clone, Default)]
pub struct CourseInterner {
    keys: FxHashMap<String, CourseKey>,
    course_ids: Vec<String>,
}

impl CourseInterner {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            keys: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            course_ids: Vec::with_capacity(capacity),
        }
    }

    /// Key for `course_id`, assigning the next free one on first sight.
    /// The same course listed under two tiers gets the same key.
    pub fn intern(&mut self, course_id: &str) -> CourseKey {
        if let Some(&key) = self.keys.get(course_id) {
            return key;
        }
        let key = self.course_ids.len() as CourseKey;
        self.course_ids.push(course_id.to_owned());
        self.keys.insert(course_id.to_owned(), key);
        key
    }

    pub fn len(&self) -> usize {
        self.course_ids.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_assigns_dense_keys() {
        let mut interner = CourseInterner::with_capacity(4);

        let math = interner.intern("MTH1001");
        let phys = interner.intern("PHY1001");
        let again = interner.intern("MTH1001");

        assert_eq!(math, again);
        assert_eq!((math, phys), (0, 1));
        assert_eq!(interner.len(), 2);

        assert_eq!(interner.course_ids, vec!["MTH1001", "PHY1001"]);
    }

    #[test]
    fn test_default_is_empty() {
        let interner = CourseInterner::default();
        assert_eq!(interner.len(), 0);
    }
}
