//! Arena allocation for syntax trees.
//!
//! Every node produced by a parse is allocated from a bump arena so a whole
//! tree is released at once when the arena goes away.

use bumpalo::Bump;

/// The parse arena wraps a bump allocator for all tree allocations.
///
/// A tree borrows from the arena it was parsed into, so the arena must
/// outlive every node handed out by the parser.
pub struct ParseArena {
    bump: Bump,
}

impl ParseArena {
    /// Create a new parse arena with default capacity.
    pub fn new() -> Self {
        Self { bump: Bump::new() }
    }

    /// Create a new parse arena with the specified initial capacity in bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bump: Bump::with_capacity(capacity),
        }
    }

    /// Get a reference to the underlying bump allocator.
    #[inline]
    pub fn bump(&self) -> &Bump {
        &self.bump
    }

    /// Returns the total bytes allocated in this arena.
    pub fn allocated_bytes(&self) -> usize {
        self.bump.allocated_bytes()
    }

    /// Reset the arena, deallocating all trees but keeping the memory.
    pub fn reset(&mut self) {
        self.bump.reset();
    }
}

impl Default for ParseArena {
    fn default() -> Self {
        Self::new()
    }
}

/// Move the contents of a `Vec` into the arena as a slice.
pub fn alloc_vec_in<T>(bump: &Bump, vec: Vec<T>) -> &[T] {
    if vec.is_empty() {
        return &[];
    }
    bump.alloc_slice_fill_iter(vec)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_vec_in_keeps_order() {
        let arena = ParseArena::new();
        let slice = alloc_vec_in(arena.bump(), vec![3, 1, 2]);
        assert_eq!(slice, &[3, 1, 2]);
    }

    #[test]
    fn test_alloc_empty_vec() {
        let arena = ParseArena::new();
        let slice: &[u32] = alloc_vec_in(arena.bump(), Vec::new());
        assert!(slice.is_empty());
    }
}
