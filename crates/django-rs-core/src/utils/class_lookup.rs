//! Lookup tables keyed by class, resolved through inheritance.
//!
//! Field descriptors in django-rs are plain enums, but they still model a
//! class hierarchy: an `EmailField` is a `CharField`, a `DateTimeField` is a
//! `DateField`. [`ClassKey`] exposes that hierarchy as a method resolution
//! order (MRO), and [`ClassLookup`] finds the value registered for the most
//! specific ancestor of a class.
//!
//! # Examples
//!
//! ```
//! use django_rs_core::utils::class_lookup::{ClassKey, ClassLookup};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Shape { Base, Rect, Square }
//!
//! impl ClassKey for Shape {
//!     fn mro(self) -> &'static [Self] {
//!         match self {
//!             Self::Base => &[Self::Base],
//!             Self::Rect => &[Self::Rect, Self::Base],
//!             Self::Square => &[Self::Square, Self::Rect, Self::Base],
//!         }
//!     }
//!     fn name(self) -> &'static str {
//!         match self { Self::Base => "Base", Self::Rect => "Rect", Self::Square => "Square" }
//!     }
//! }
//!
//! let lookup = ClassLookup::new([(Shape::Rect, "four sides")]);
//! assert_eq!(*lookup.get_class(Shape::Square).unwrap(), "four sides");
//! assert!(lookup.get_class(Shape::Base).is_err());
//! ```

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use crate::error::{DjangoError, DjangoResult};

/// A class identifier with a known method resolution order.
pub trait ClassKey: Copy + Eq + Hash + fmt::Debug + 'static {
    /// The class itself followed by its ancestors, most specific first.
    fn mro(self) -> &'static [Self];

    /// The class name, used in error messages.
    fn name(self) -> &'static str;

    /// Returns `true` if `self` is `other` or inherits from it.
    fn is_subclass_of(self, other: Self) -> bool {
        self.mro().contains(&other)
    }
}

/// A value that can be dispatched on by class.
///
/// Proxies return the class of the value they stand in for rather than their
/// own.
pub trait Dispatch {
    /// The class hierarchy this value belongs to.
    type Key: ClassKey;

    /// The class to dispatch on.
    fn lookup_class(&self) -> Self::Key;
}

/// A mapping keyed by class whose lookups walk the key's MRO.
#[derive(Clone)]
pub struct ClassLookup<K: ClassKey, V> {
    mapping: HashMap<K, V>,
}

impl<K: ClassKey, V> Default for ClassLookup<K, V> {
    fn default() -> Self {
        Self {
            mapping: HashMap::new(),
        }
    }
}

impl<K: ClassKey, V: fmt::Debug> fmt::Debug for ClassLookup<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassLookup")
            .field("mapping", &self.mapping)
            .finish()
    }
}

impl<K: ClassKey, V> ClassLookup<K, V> {
    /// Creates a lookup from `(class, value)` pairs.
    pub fn new(mapping: impl IntoIterator<Item = (K, V)>) -> Self {
        Self {
            mapping: mapping.into_iter().collect(),
        }
    }

    /// Registers `value` for `class`, returning the value it replaces.
    pub fn insert(&mut self, class: K, value: V) -> Option<V> {
        self.mapping.insert(class, value)
    }

    /// Returns the number of registered classes.
    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    /// Returns `true` if no class is registered.
    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }

    /// Looks up the value for `obj`'s dispatch class.
    pub fn get<D>(&self, obj: &D) -> DjangoResult<&V>
    where
        D: Dispatch<Key = K> + ?Sized,
    {
        self.get_class(obj.lookup_class())
    }

    /// Looks up the value registered for `class` or its nearest ancestor.
    ///
    /// Fails with [`DjangoError::LookupError`] when no class in the MRO is
    /// registered.
    pub fn get_class(&self, class: K) -> DjangoResult<&V> {
        class
            .mro()
            .iter()
            .find_map(|ancestor| self.mapping.get(ancestor))
            .ok_or_else(|| {
                DjangoError::LookupError(format!("Class {} not found in lookup.", class.name()))
            })
    }
}
