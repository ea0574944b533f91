use crate::arena::{
    Arena,
    Ptr,
};

/// A read-only view of one stored entry, doubling as a position in the
/// insertion-order list.
///
/// Elements are handed out by [`front`], [`back`], and [`get_element`] and
/// can be walked in either direction with [`next_element`] and
/// [`prev_element`] in O(1) per step, without going back through the hash
/// index. A view borrows the map immutably, so the underlying entry cannot
/// be mutated or removed while any view is alive; mutation goes through the
/// map's own operations ([`set`] for values).
///
/// Two elements compare equal when they are views of the same entry of the
/// same map.
///
/// [`front`]: super::OrderedMap::front
/// [`back`]: super::OrderedMap::back
/// [`get_element`]: super::OrderedMap::get_element
/// [`next_element`]: Element::next_element
/// [`prev_element`]: Element::prev_element
/// [`set`]: super::OrderedMap::set
///
/// # Examples
///
/// ```
/// use braid_map::OrderedMap;
///
/// let mut map = OrderedMap::new();
/// map.set("a", 1).set("b", 2).set("c", 3);
///
/// let element = map.get_element(&"b").unwrap();
/// assert_eq!(element.key(), &"b");
/// assert_eq!(element.next_element().unwrap().key(), &"c");
/// assert_eq!(element.prev_element().unwrap().key(), &"a");
/// ```
pub struct Element<'a, K, T> {
    nodes: &'a Arena<K, T>,
    ptr: Ptr,
}

impl<K, T> Clone for Element<'_, K, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, T> Copy for Element<'_, K, T> {}

impl<K, T> PartialEq for Element<'_, K, T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr == other.ptr && core::ptr::eq(self.nodes, other.nodes)
    }
}

impl<K, T> Eq for Element<'_, K, T> {}

impl<K: core::fmt::Debug, T: core::fmt::Debug> core::fmt::Debug for Element<'_, K, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Element")
            .field("key", self.key())
            .field("value", self.value())
            .finish()
    }
}

impl<'a, K, T> Element<'a, K, T> {
    pub(crate) fn new(nodes: &'a Arena<K, T>, ptr: Ptr) -> Self {
        Element { nodes, ptr }
    }

    /// Returns the entry's key.
    pub fn key(&self) -> &'a K {
        &self.nodes[self.ptr].key
    }

    /// Returns the entry's value.
    pub fn value(&self) -> &'a T {
        &self.nodes[self.ptr].value
    }

    /// Returns the element inserted immediately after this one, or `None` if
    /// this element is at the back.
    pub fn next_element(&self) -> Option<Element<'a, K, T>> {
        self.nodes[self.ptr]
            .next
            .optional()
            .map(|ptr| Element::new(self.nodes, ptr))
    }

    /// Returns the element inserted immediately before this one, or `None`
    /// if this element is at the front.
    pub fn prev_element(&self) -> Option<Element<'a, K, T>> {
        self.nodes[self.ptr]
            .prev
            .optional()
            .map(|ptr| Element::new(self.nodes, ptr))
    }
}
