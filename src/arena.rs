use alloc::vec::Vec;
use core::ops::{
    Index,
    IndexMut,
};
use core::panic;

#[cold]
#[inline(never)]
fn assert_occupied() -> ! {
    panic!("Attempted to access data of free slot");
}

/// Handle to a slot in the arena. `Ptr::null()` is the "no element" sentinel
/// used to terminate the linked list in both directions.
#[derive(Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub(crate) struct Ptr(usize);

impl core::fmt::Debug for Ptr {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.is_null() {
            write!(f, "Ptr(null)")
        } else {
            write!(f, "Ptr({})", self.0)
        }
    }
}

impl Default for Ptr {
    fn default() -> Self {
        Ptr::null()
    }
}

impl Ptr {
    pub(crate) fn null() -> Self {
        Ptr(usize::MAX)
    }

    pub(crate) fn is_null(self) -> bool {
        self == Ptr::null()
    }

    pub(crate) fn unchecked_from(index: usize) -> Self {
        debug_assert_ne!(index, usize::MAX, "Index must not be usize::MAX");
        Ptr(index)
    }

    pub(crate) fn unchecked_get(self) -> usize {
        self.0
    }

    pub(crate) fn optional(self) -> Option<Ptr> {
        if self.is_null() { None } else { Some(self) }
    }
}

/// One stored entry, doubling as a linked-list node. The hash is cached so
/// the table can rehash on growth without touching the key.
#[derive(Debug)]
pub(crate) struct Node<K, T> {
    pub(crate) key: K,
    pub(crate) value: T,
    pub(crate) hash: u64,
    pub(crate) prev: Ptr,
    pub(crate) next: Ptr,
}

#[derive(Debug)]
enum Slot<K, T> {
    Free { next_free: Ptr },
    Occupied(Node<K, T>),
}

/// Slot storage for every live node. Freed slots form an intrusive free list
/// and are reused by later allocations, so a `Ptr` may be recycled after its
/// node is removed.
#[derive(Debug)]
pub(crate) struct Arena<K, T> {
    slots: Vec<Slot<K, T>>,
    free_head: Ptr,
}

impl<K, T> Arena<K, T> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Arena {
            slots: Vec::with_capacity(capacity),
            free_head: Ptr::null(),
        }
    }

    pub(crate) fn alloc(&mut self, key: K, value: T, hash: u64, prev: Ptr, next: Ptr) -> Ptr {
        let node = Node {
            key,
            value,
            hash,
            prev,
            next,
        };
        if let Some(ptr) = self.free_head.optional() {
            let next_free = match &self.slots[ptr.unchecked_get()] {
                Slot::Free { next_free } => *next_free,
                Slot::Occupied(_) => unreachable!("free list points at an occupied slot"),
            };
            self.slots[ptr.unchecked_get()] = Slot::Occupied(node);
            self.free_head = next_free;
            ptr
        } else {
            let ptr = Ptr::unchecked_from(self.slots.len());
            self.slots.push(Slot::Occupied(node));
            ptr
        }
    }

    pub(crate) fn free(&mut self, ptr: Ptr) -> Node<K, T> {
        assert!(self.is_occupied(ptr), "Pointer to free must be occupied");
        let slot = core::mem::replace(
            &mut self.slots[ptr.unchecked_get()],
            Slot::Free {
                next_free: self.free_head,
            },
        );
        self.free_head = ptr;
        match slot {
            Slot::Occupied(node) => node,
            Slot::Free { .. } => assert_occupied(),
        }
    }

    pub(crate) fn is_occupied(&self, ptr: Ptr) -> bool {
        matches!(
            ptr.optional()
                .and_then(|p| self.slots.get(p.unchecked_get())),
            Some(Slot::Occupied(_))
        )
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free_head = Ptr::null();
    }

    pub(crate) fn shrink_to_fit(&mut self) {
        // This may not shrink anything if the arena has interior free slots.
        // Occupied slots cannot be moved to compact the storage, since live
        // Ptrs identify nodes by position.
        self.slots.shrink_to_fit();
    }
}

impl<K, T> Index<Ptr> for Arena<K, T> {
    type Output = Node<K, T>;

    fn index(&self, index: Ptr) -> &Self::Output {
        match &self.slots[index.unchecked_get()] {
            Slot::Occupied(node) => node,
            Slot::Free { .. } => assert_occupied(),
        }
    }
}

impl<K, T> IndexMut<Ptr> for Arena<K, T> {
    fn index_mut(&mut self, index: Ptr) -> &mut Self::Output {
        match &mut self.slots[index.unchecked_get()] {
            Slot::Occupied(node) => node,
            Slot::Free { .. } => assert_occupied(),
        }
    }
}
