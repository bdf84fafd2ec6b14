//! Chunked typed arena that stores the nodes of the trees in this crate.

use std::cmp;
use std::mem;
use std::ops::{Index, IndexMut};

/// A copyable reference to a slot of a `TypedArena<T>`.
///
/// A handle also records the generation of its slot when it was handed out. Freeing a slot bumps
/// its generation, so a handle to a freed object never resolves again, even after the slot is
/// reused.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Handle {
    chunk_index: usize,
    block_index: usize,
    generation: usize,
}

enum Block<T> {
    Occupied(T),
    Vacant(Option<Handle>),
}

struct Slot<T> {
    generation: usize,
    block: Block<T>,
}

/// An arena that only allocates a single type of object.
///
/// Objects are stored in fixed size chunks so a growing arena never moves existing objects.
/// Freed slots are threaded onto a free list and reused by later allocations. Dropping or
/// clearing the arena drops its chunks one after another, so releasing a whole tree never
/// recurses over its nodes.
pub struct TypedArena<T> {
    head: Option<Handle>,
    chunks: Vec<Vec<Slot<T>>>,
    chunk_size: usize,
    len: usize,
    capacity: usize,
}

impl<T> TypedArena<T> {
    /// Constructs a new, empty `TypedArena<T>` holding `chunk_size` objects per chunk. A chunk
    /// size of zero is rounded up to one.
    pub fn new(chunk_size: usize) -> Self {
        TypedArena {
            head: None,
            chunks: Vec::new(),
            chunk_size: cmp::max(chunk_size, 1),
            len: 0,
            capacity: 0,
        }
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn len(&self) -> usize {
        self.len
    }

    // Returns the block at `handle` if the slot exists and is still on the handle's generation.
    fn block(&self, handle: Handle) -> Option<&Block<T>> {
        self.chunks
            .get(handle.chunk_index)
            .and_then(|chunk| chunk.get(handle.block_index))
            .filter(|slot| slot.generation == handle.generation)
            .map(|slot| &slot.block)
    }

    fn block_mut(&mut self, handle: Handle) -> Option<&mut Block<T>> {
        self.chunks
            .get_mut(handle.chunk_index)
            .and_then(|chunk| chunk.get_mut(handle.block_index))
            .filter(|slot| slot.generation == handle.generation)
            .map(|slot| &mut slot.block)
    }

    /// Moves `value` into the arena and returns its handle.
    pub fn allocate(&mut self, value: T) -> Handle {
        if self.len == self.capacity {
            self.chunks.push(Vec::with_capacity(self.chunk_size));
            self.capacity += self.chunk_size;
        }
        self.len += 1;

        match self.head.take() {
            None => {
                let chunk_index = self.chunks.len() - 1;
                let chunk = &mut self.chunks[chunk_index];
                chunk.push(Slot {
                    generation: 0,
                    block: Block::Occupied(value),
                });
                Handle {
                    chunk_index,
                    block_index: chunk.len() - 1,
                    generation: 0,
                }
            },
            Some(head) => {
                let slot = &mut self.chunks[head.chunk_index][head.block_index];
                match mem::replace(&mut slot.block, Block::Occupied(value)) {
                    Block::Vacant(next) => {
                        self.head = next;
                        Handle {
                            generation: slot.generation,
                            ..head
                        }
                    },
                    Block::Occupied(_) => unreachable!("free list points at an occupied block"),
                }
            },
        }
    }

    /// Removes the object at `handle` and returns it. Returns `None` if `handle` does not refer
    /// to a live object.
    pub fn free(&mut self, handle: Handle) -> Option<T> {
        if !self.contains(handle) {
            return None;
        }
        let slot = &mut self.chunks[handle.chunk_index][handle.block_index];
        slot.generation = slot.generation.wrapping_add(1);
        match mem::replace(&mut slot.block, Block::Vacant(self.head.take())) {
            Block::Occupied(value) => {
                self.len -= 1;
                self.head = Some(Handle {
                    generation: slot.generation,
                    ..handle
                });
                Some(value)
            },
            Block::Vacant(_) => unreachable!(),
        }
    }

    /// Returns `true` if `handle` refers to a live object.
    pub fn contains(&self, handle: Handle) -> bool {
        match self.block(handle) {
            Some(Block::Occupied(_)) => true,
            _ => false,
        }
    }

    pub fn get(&self, handle: Handle) -> Option<&T> {
        match self.block(handle) {
            Some(Block::Occupied(ref value)) => Some(value),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        match self.block_mut(handle) {
            Some(Block::Occupied(ref mut value)) => Some(value),
            _ => None,
        }
    }

    /// Drops every object and releases all chunks. Generations restart, so handles from before
    /// the clear may resolve again once their slots are refilled.
    pub fn clear(&mut self) {
        self.chunks = Vec::new();
        self.head = None;
        self.len = 0;
        self.capacity = 0;
    }
}

impl<T> Index<Handle> for TypedArena<T> {
    type Output = T;

    fn index(&self, handle: Handle) -> &Self::Output {
        self.get(handle).expect("Error: handle does not refer to a live node.")
    }
}

impl<T> IndexMut<Handle> for TypedArena<T> {
    fn index_mut(&mut self, handle: Handle) -> &mut Self::Output {
        self.get_mut(handle)
            .expect("Error: handle does not refer to a live node.")
    }
}

#[cfg(test)]
mod tests {
    use super::{Handle, TypedArena};

    #[test]
    fn test_allocate() {
        let mut arena = TypedArena::new(1024);
        assert_eq!(
            arena.allocate(0),
            Handle {
                chunk_index: 0,
                block_index: 0,
                generation: 0,
            },
        );
        assert_eq!(
            arena.allocate(0),
            Handle {
                chunk_index: 0,
                block_index: 1,
                generation: 0,
            },
        );
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn test_allocate_multiple_chunks() {
        let mut arena = TypedArena::new(2);
        arena.allocate(0);
        arena.allocate(1);
        assert_eq!(
            arena.allocate(2),
            Handle {
                chunk_index: 1,
                block_index: 0,
                generation: 0,
            },
        );
    }

    #[test]
    fn test_zero_chunk_size() {
        let mut arena = TypedArena::new(0);
        assert_eq!(arena.chunk_size(), 1);
        let handle = arena.allocate(7);
        assert_eq!(arena[handle], 7);
    }

    #[test]
    fn test_free_reuses_slot() {
        let mut arena = TypedArena::new(1024);
        let handle = arena.allocate(0);
        assert_eq!(arena.free(handle), Some(0));
        assert!(!arena.contains(handle));
        assert_eq!(arena.len(), 0);

        let reused = arena.allocate(1);
        assert_eq!(
            reused,
            Handle {
                generation: 1,
                ..handle
            },
        );
        assert_eq!(arena[reused], 1);
    }

    #[test]
    fn test_stale_handle_after_reuse() {
        let mut arena = TypedArena::new(1024);
        let stale = arena.allocate(0);
        arena.free(stale);
        let reused = arena.allocate(1);

        assert_ne!(stale, reused);
        assert!(!arena.contains(stale));
        assert_eq!(arena.get(stale), None);
        assert_eq!(arena.get_mut(stale), None);
        assert_eq!(arena.free(stale), None);
        assert_eq!(arena.get(reused), Some(&1));
    }

    #[test]
    fn test_free_full_chunk_then_allocate() {
        let mut arena = TypedArena::new(2);
        let first = arena.allocate(0);
        arena.allocate(1);
        arena.allocate(2);
        arena.free(first);
        let reused = arena.allocate(3);
        assert_eq!(arena[reused], 3);
        assert!(!arena.contains(first));
        let fresh = arena.allocate(4);
        assert_eq!(arena[fresh], 4);
        assert_eq!(arena.len(), 4);
    }

    #[test]
    fn test_free_invalid_and_vacant() {
        let mut arena = TypedArena::new(1024);
        let handle = arena.allocate(0);
        assert_eq!(
            arena.free(Handle {
                chunk_index: 3,
                block_index: 0,
                generation: 0,
            }),
            None,
        );
        arena.free(handle);
        assert_eq!(arena.free(handle), None);
    }

    #[test]
    fn test_get_mut() {
        let mut arena = TypedArena::new(1024);
        let handle = arena.allocate(0);
        *arena.get_mut(handle).unwrap() = 5;
        assert_eq!(arena.get(handle), Some(&5));
        arena[handle] += 1;
        assert_eq!(arena[handle], 6);
    }

    #[test]
    fn test_clear() {
        let mut arena = TypedArena::new(4);
        let handle = arena.allocate(0);
        arena.allocate(1);
        arena.clear();
        assert_eq!(arena.len(), 0);
        assert_eq!(arena.get(handle), None);
        assert_eq!(arena.allocate(2), handle);
    }
}
