use crate::arena::{
    Arena,
    Ptr,
};

/// An iterator over the entries of an `OrderedMap`, front to back.
///
/// This struct is created by the [`iter`] method on [`OrderedMap`]. See its
/// documentation for more.
///
/// [`iter`]: super::OrderedMap::iter
/// [`OrderedMap`]: super::OrderedMap
///
/// # Examples
///
/// ```
/// use braid_map::OrderedMap;
///
/// let mut map = OrderedMap::new();
/// map.set("a", 1);
/// map.set("b", 2);
///
/// for (key, value) in map.iter() {
///     println!("{key}: {value}");
/// }
/// ```
#[derive(Debug)]
pub struct Iter<'a, K, T> {
    pub(crate) forward: Option<Ptr>,
    pub(crate) reverse: Option<Ptr>,
    pub(crate) len: usize,
    pub(crate) nodes: &'a Arena<K, T>,
}

impl<K, T> Clone for Iter<'_, K, T> {
    fn clone(&self) -> Self {
        Iter {
            forward: self.forward,
            reverse: self.reverse,
            len: self.len,
            nodes: self.nodes,
        }
    }
}

impl<'a, K, T> Iterator for Iter<'a, K, T> {
    type Item = (&'a K, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let ptr = self.forward?;
        if self.forward == self.reverse {
            self.forward = None;
            self.reverse = None;
        } else {
            self.forward = self.nodes[ptr].next.optional();
        }
        self.len -= 1;

        let node = &self.nodes[ptr];
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<K, T> DoubleEndedIterator for Iter<'_, K, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let ptr = self.reverse?;
        if self.reverse == self.forward {
            self.reverse = None;
            self.forward = None;
        } else {
            self.reverse = self.nodes[ptr].prev.optional();
        }
        self.len -= 1;

        let node = &self.nodes[ptr];
        Some((&node.key, &node.value))
    }
}

impl<K, T> ExactSizeIterator for Iter<'_, K, T> {
    fn len(&self) -> usize {
        self.len
    }
}

impl<K, T> core::iter::FusedIterator for Iter<'_, K, T> {}

/// An owning iterator over the entries of an `OrderedMap`, front to back.
///
/// This struct is created by the [`into_iter`] method on
/// [`OrderedMap`] (provided by the [`IntoIterator`] trait).
///
/// [`into_iter`]: IntoIterator::into_iter
/// [`OrderedMap`]: super::OrderedMap
///
/// # Examples
///
/// ```
/// use braid_map::OrderedMap;
///
/// let mut map = OrderedMap::new();
/// map.set("a", 1);
/// map.set("b", 2);
///
/// for (key, value) in map {
///     println!("{key}: {value}");
/// }
/// ```
#[derive(Debug)]
pub struct IntoIter<K, T> {
    pub(crate) nodes: Arena<K, T>,
    pub(crate) forward: Option<Ptr>,
    pub(crate) reverse: Option<Ptr>,
    pub(crate) len: usize,
}

impl<K, T> Iterator for IntoIter<K, T> {
    type Item = (K, T);

    fn next(&mut self) -> Option<Self::Item> {
        let ptr = self.forward?;
        if self.forward == self.reverse {
            self.forward = None;
            self.reverse = None;
        } else {
            self.forward = self.nodes[ptr].next.optional();
        }
        self.len -= 1;

        let node = self.nodes.free(ptr);
        Some((node.key, node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<K, T> DoubleEndedIterator for IntoIter<K, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let ptr = self.reverse?;
        if self.reverse == self.forward {
            self.reverse = None;
            self.forward = None;
        } else {
            self.reverse = self.nodes[ptr].prev.optional();
        }
        self.len -= 1;

        let node = self.nodes.free(ptr);
        Some((node.key, node.value))
    }
}

impl<K, T> ExactSizeIterator for IntoIter<K, T> {
    fn len(&self) -> usize {
        self.len
    }
}

impl<K, T> core::iter::FusedIterator for IntoIter<K, T> {}
