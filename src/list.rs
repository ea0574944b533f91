use crate::arena::{
    Arena,
    Ptr,
};

/// Root pointers of the intrusive doubly-linked list that owns insertion
/// order. The nodes themselves live in the [`Arena`]; this struct performs
/// the O(1) link surgery.
///
/// Invariant: `head` is null iff `tail` is null iff the list is empty, and
/// following `next` from `head` visits every live node exactly once, ending
/// at `tail` (symmetrically for `prev`).
#[derive(Debug, Clone, Copy)]
pub(crate) struct OrderList {
    head: Ptr,
    tail: Ptr,
}

impl OrderList {
    pub(crate) fn new() -> Self {
        OrderList {
            head: Ptr::null(),
            tail: Ptr::null(),
        }
    }

    pub(crate) fn front(&self) -> Ptr {
        self.head
    }

    pub(crate) fn back(&self) -> Ptr {
        self.tail
    }

    /// Allocates a node for `key`/`value` and links it after the current
    /// tail. Returns the handle of the new node.
    pub(crate) fn push_back<K, T>(
        &mut self,
        nodes: &mut Arena<K, T>,
        key: K,
        value: T,
        hash: u64,
    ) -> Ptr {
        let old_tail = self.tail;
        let ptr = nodes.alloc(key, value, hash, old_tail, Ptr::null());
        if old_tail.is_null() {
            self.head = ptr;
        } else {
            nodes[old_tail].next = ptr;
        }
        self.tail = ptr;
        ptr
    }

    /// Unlinks the node at `ptr` from its neighbors. The slot itself is not
    /// freed; the caller does that after removing the index entry.
    ///
    /// `ptr` must identify a node currently linked in this list.
    pub(crate) fn remove<K, T>(&mut self, nodes: &mut Arena<K, T>, ptr: Ptr) {
        let (prev, next) = {
            let node = &nodes[ptr];
            (node.prev, node.next)
        };
        if prev.is_null() {
            self.head = next;
        } else {
            nodes[prev].next = next;
        }
        if next.is_null() {
            self.tail = prev;
        } else {
            nodes[next].prev = prev;
        }
    }

    pub(crate) fn clear(&mut self) {
        self.head = Ptr::null();
        self.tail = Ptr::null();
    }
}
