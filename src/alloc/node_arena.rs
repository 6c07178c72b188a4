//! `NodeArena` - an append-only, address-stable typed arena.
//!
//! Elements are pushed into chunks whose capacity is fixed once allocated, so a
//! chunk's heap buffer never reallocates and every `&T` handed out by
//! [`NodeArena::alloc`] stays valid until the arena is dropped. When the current
//! chunk fills up it is retired (the `Vec` header moves, its buffer does not) and
//! a chunk of twice the capacity takes its place.
//!
//! # Performance
//! - `alloc`: O(1) amortized, one heap allocation per chunk
//! - `len`: O(chunks)
//!
//! The arena has no `Drop` impl of its own. That keeps the drop check happy for
//! self-referential element types such as `GraphNode<'arena, ..>`, whose
//! neighbor lists borrow the very arena that stores them.

use core::cell::RefCell;
use core::mem;

const MIN_CHUNK: usize = 64;

struct Chunks<T> {
    current: Vec<T>,
    retired: Vec<Vec<T>>,
}

/// An append-only arena returning shared references with the arena's lifetime.
pub struct NodeArena<T> {
    chunks: RefCell<Chunks<T>>,
}

impl<T> NodeArena<T> {
    /// Creates an empty arena. The first chunk is allocated lazily.
    pub fn new() -> Self {
        Self {
            chunks: RefCell::new(Chunks {
                current: Vec::new(),
                retired: Vec::new(),
            }),
        }
    }

    /// Creates an arena whose first chunk holds at least `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            chunks: RefCell::new(Chunks {
                current: Vec::with_capacity(capacity.max(MIN_CHUNK)),
                retired: Vec::new(),
            }),
        }
    }

    /// Moves `value` into the arena and returns a reference to it.
    pub fn alloc(&self, value: T) -> &T {
        let mut chunks = self.chunks.borrow_mut();

        if chunks.current.len() == chunks.current.capacity() {
            let next = (chunks.current.capacity() * 2).max(MIN_CHUNK);
            let full = mem::replace(&mut chunks.current, Vec::with_capacity(next));
            if !full.is_empty() {
                chunks.retired.push(full);
            }
        }

        let slot = chunks.current.len();
        chunks.current.push(value);
        let base = chunks.current.as_ptr();

        // SAFETY:
        // - `slot < len`, so the pointer is in bounds and initialized.
        // - The push above stayed within capacity, and later pushes into this
        //   chunk do too, so its buffer is never reallocated. Retiring a chunk
        //   moves only the `Vec` header.
        // - Elements are never removed or handed out mutably, and are dropped
        //   only with the arena, which `&self` outlives the returned borrow of.
        unsafe { &*base.add(slot) }
    }

    /// Number of elements allocated so far.
    pub fn len(&self) -> usize {
        let chunks = self.chunks.borrow();
        chunks.retired.iter().map(Vec::len).sum::<usize>() + chunks.current.len()
    }

    /// Returns `true` if nothing has been allocated.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of chunks currently backing the arena.
    pub fn chunk_count(&self) -> usize {
        let chunks = self.chunks.borrow();
        chunks.retired.len() + usize::from(chunks.current.capacity() > 0)
    }
}

impl<T> Default for NodeArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> core::fmt::Debug for NodeArena<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NodeArena")
            .field("len", &self.len())
            .field("chunks", &self.chunk_count())
            .finish()
    }
}
