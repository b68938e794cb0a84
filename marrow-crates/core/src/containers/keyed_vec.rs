use std::marker::PhantomData;
use std::ops::Index;
use std::ops::IndexMut;

/// A vector whose elements of type `Value` can only be indexed by keys of type `Key`.
///
/// This is how the arenas of a [`crate::Space`] are stored: domains are keyed by
/// [`crate::variables::DomainId`] and propagators by [`crate::propagation::PropagatorId`], so that
/// cloning an arena keeps every handle valid in the copy.
#[derive(Debug, Hash, PartialEq, Eq)]
pub struct KeyedVec<Key, Value> {
    key: PhantomData<Key>,
    elements: Vec<Value>,
}

impl<Key, Value: Clone> Clone for KeyedVec<Key, Value> {
    fn clone(&self) -> Self {
        Self {
            key: PhantomData,
            elements: self.elements.clone(),
        }
    }
}

impl<Key, Value> Default for KeyedVec<Key, Value> {
    fn default() -> Self {
        Self {
            key: PhantomData,
            elements: Vec::default(),
        }
    }
}

impl<Key: StorageKey, Value> KeyedVec<Key, Value> {
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Add a new value to the vector.
    ///
    /// Returns the key for the inserted value.
    pub fn push(&mut self, value: Value) -> Key {
        self.elements.push(value);

        Key::create_from_index(self.elements.len() - 1)
    }

    /// Remove the last element, returning it together with its key.
    pub(crate) fn pop(&mut self) -> Option<(Key, Value)> {
        self.elements.pop().map(|value| {
            let key = Key::create_from_index(self.elements.len());
            (key, value)
        })
    }

    /// Create a new slot for a value, and populate it using [`Slot::populate()`].
    ///
    /// This allows initializing the value with the key it will have in this vector.
    pub fn new_slot(&mut self) -> Slot<'_, Key, Value> {
        Slot { vec: self }
    }

    pub fn get(&self, key: Key) -> Option<&Value> {
        self.elements.get(key.index())
    }

    /// Iterate over the values in the vector.
    pub fn iter(&self) -> impl Iterator<Item = &'_ Value> {
        self.elements.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &'_ mut Value> {
        self.elements.iter_mut()
    }

    pub fn keys(&self) -> impl Iterator<Item = Key> {
        (0..self.elements.len()).map(Key::create_from_index)
    }
}

impl<Key: StorageKey, Value: Clone> KeyedVec<Key, Value> {
    /// Make sure `key` is a valid index, filling new positions with `default_value`.
    pub(crate) fn accomodate(&mut self, key: Key, default_value: Value) {
        if key.index() >= self.elements.len() {
            self.elements.resize(key.index() + 1, default_value);
        }
    }
}

impl<Key: StorageKey, Value> Index<Key> for KeyedVec<Key, Value> {
    type Output = Value;

    fn index(&self, index: Key) -> &Self::Output {
        &self.elements[index.index()]
    }
}

impl<Key: StorageKey, Value> Index<&Key> for KeyedVec<Key, Value> {
    type Output = Value;

    fn index(&self, index: &Key) -> &Self::Output {
        &self.elements[index.index()]
    }
}

impl<Key: StorageKey, Value> IndexMut<Key> for KeyedVec<Key, Value> {
    fn index_mut(&mut self, index: Key) -> &mut Self::Output {
        &mut self.elements[index.index()]
    }
}

impl StorageKey for usize {
    fn index(&self) -> usize {
        *self
    }

    fn create_from_index(index: usize) -> Self {
        index
    }
}

/// A simple trait which requires that the structures implementing this trait can generate an index.
pub trait StorageKey: Clone {
    fn index(&self) -> usize;

    fn create_from_index(index: usize) -> Self;
}

/// A reserved slot for a new value in a [`KeyedVec`].
#[derive(Debug)]
pub struct Slot<'a, Key, Value> {
    vec: &'a mut KeyedVec<Key, Value>,
}

impl<Key: StorageKey, Value> Slot<'_, Key, Value> {
    /// The key this slot has.
    pub fn key(&self) -> Key {
        Key::create_from_index(self.vec.len())
    }

    /// Populate the slot with a value.
    pub fn populate(self, value: Value) -> Key {
        self.vec.push(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_key_matches_populated_key() {
        let mut keyed_vec: KeyedVec<usize, &str> = KeyedVec::default();
        let _ = keyed_vec.push("first");

        let slot = keyed_vec.new_slot();
        let reserved = slot.key();
        let populated = slot.populate("second");

        assert_eq!(reserved, populated);
        assert_eq!("second", keyed_vec[populated]);
    }

    #[test]
    fn accomodate_only_grows() {
        let mut keyed_vec: KeyedVec<usize, bool> = KeyedVec::default();
        keyed_vec.accomodate(3, false);
        keyed_vec[3] = true;
        keyed_vec.accomodate(1, false);

        assert_eq!(4, keyed_vec.len());
        assert!(keyed_vec[3]);
    }
}
