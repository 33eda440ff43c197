use std::marker::PhantomData;

/// Vec wrapper that uses typed indexes.
///
/// Processes and signals are addressed by position in the workflow document,
/// so this lets us keep the two index spaces from being mixed up.
#[derive(Debug, Default, Hash, PartialEq, Eq, Clone)]
pub struct IdVec<K, V> {
    vec: Vec<V>,
    _phantom: PhantomData<K>,
}

impl<K, V> IdVec<K, V> {
    /// Create a new `IdVec` backed by the given vec.
    pub fn new(vec: Vec<V>) -> Self {
        Self {
            vec,
            _phantom: PhantomData,
        }
    }

    /// Create a new `IdVec` with the given capacity.
    pub fn with_capacity(cap: usize) -> Self {
        Self::new(Vec::with_capacity(cap))
    }

    /// Get the current length
    #[inline]
    pub fn len(&self) -> usize {
        self.vec.len()
    }

    /// True if len == 0
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vec.is_empty()
    }

    /// Iterate through immutable references to values
    pub fn iter(&self) -> std::slice::Iter<'_, V> {
        self.vec.iter()
    }

    /// Iterate through mutable references to values
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, V> {
        self.vec.iter_mut()
    }

    /// Consume this `IdVec` and return the underlying vec.
    pub fn into_inner(self) -> Vec<V> {
        self.vec
    }
}

impl<K: From<usize>, V> IdVec<K, V> {
    /// Iterate through (id, value) pairs in index order.
    pub fn iter_enumerated(&self) -> impl Iterator<Item = (K, &V)> + '_ {
        self.vec.iter().enumerate().map(|(i, v)| (i.into(), v))
    }

    /// Iterate through all ids in index order.
    pub fn ids(&self) -> impl Iterator<Item = K> {
        (0..self.vec.len()).map(K::from)
    }
}

impl<K, V: Clone> IdVec<K, V> {
    /// Create a new `IdVec`, filled with `len` copies of `val`.
    pub fn fill(val: V, len: usize) -> Self {
        Self::new(vec![val; len])
    }
}

impl<K: Into<usize>, V> IdVec<K, V> {
    /// Get the value with id `k`.
    #[inline]
    pub fn get(&self, k: K) -> &V {
        &self.vec[k.into()]
    }

    /// Get a mutable reference to value with id `k`.
    #[inline]
    pub fn get_mut(&mut self, k: K) -> &mut V {
        &mut self.vec[k.into()]
    }
}

impl<K: From<usize>, V> IdVec<K, V> {
    /// Push `v` into the underlying vec, and return an id that can be used to retrieve it later.
    #[inline]
    pub fn push(&mut self, v: V) -> K {
        let id = self.vec.len().into();
        self.vec.push(v);
        id
    }
}

impl<K, V> From<Vec<V>> for IdVec<K, V> {
    fn from(vec: Vec<V>) -> Self {
        Self::new(vec)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Key(usize);

    impl From<usize> for Key {
        fn from(val: usize) -> Self {
            Self(val)
        }
    }

    impl From<Key> for usize {
        fn from(k: Key) -> usize {
            k.0
        }
    }

    #[test]
    fn test_push_returns_sequential_ids() {
        let mut v: IdVec<Key, &str> = IdVec::with_capacity(2);
        assert_eq!(Key(0), v.push("a"));
        assert_eq!(Key(1), v.push("b"));
        assert_eq!("b", *v.get(Key(1)));
    }

    #[test]
    fn test_iter_enumerated() {
        let v: IdVec<Key, u32> = vec![10, 20, 30].into();
        let pairs: Vec<_> = v.iter_enumerated().map(|(k, x)| (k.0, *x)).collect();
        assert_eq!(vec![(0, 10), (1, 20), (2, 30)], pairs);
        let ids: Vec<_> = v.ids().collect();
        assert_eq!(vec![Key(0), Key(1), Key(2)], ids);
    }

    #[test]
    fn test_fill_and_get_mut() {
        let mut v: IdVec<Key, u32> = IdVec::fill(1, 3);
        *v.get_mut(Key(2)) += 4;
        assert_eq!(vec![1, 1, 5], v.into_inner());
    }
}
