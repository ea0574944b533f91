#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]

mod arena;
mod list;
pub mod ordered_map;

extern crate alloc;

#[cfg(feature = "std")]
type RandomState = std::hash::RandomState;
#[cfg(not(feature = "std"))]
type RandomState = hashbrown::DefaultHashBuilder;

/// An insertion-ordered hash map using the default hasher.
///
/// This is the main type alias. For custom hashers, use
/// [`ordered_map::OrderedMap`] directly.
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
/// let entries: Vec<_> = map.iter().collect();
/// assert_eq!(entries, [(&"a", &1), (&"b", &2)]);
/// ```
pub type OrderedMap<K, V> = crate::ordered_map::OrderedMap<K, V, RandomState>;

pub use ordered_map::Element;
pub use ordered_map::IntoIter;
pub use ordered_map::Iter;
pub use ordered_map::TryFromRowsError;
