//! A vector guaranteed to contain at least one element.
//!
//! Useful wherever "zero items" is not a state worth modeling: error
//! accumulation, aggregation inputs, retry schedules. Operations like
//! [`head`](NonEmptyVec::head) and [`last`](NonEmptyVec::last) return
//! values directly instead of `Option`.
//!
//! ```
//! use millrace::NonEmptyVec;
//!
//! let items = NonEmptyVec::new(1, vec![2, 3, 4]);
//! assert_eq!(items.head(), &1);
//! assert_eq!(items.last(), &4);
//! assert_eq!(items.len(), 4);
//! ```

/// A non-empty vector: one mandatory head element plus a possibly-empty
/// tail.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NonEmptyVec<T> {
    head: T,
    tail: Vec<T>,
}

impl<T> NonEmptyVec<T> {
    /// Build from a head element and a tail.
    pub fn new(head: T, tail: Vec<T>) -> Self {
        Self { head, tail }
    }

    /// Build from a single element.
    pub fn singleton(value: T) -> Self {
        Self::new(value, Vec::new())
    }

    /// Convert from a `Vec`, returning `None` when it is empty.
    ///
    /// ```
    /// use millrace::NonEmptyVec;
    ///
    /// assert!(NonEmptyVec::from_vec(vec![1, 2]).is_some());
    /// assert!(NonEmptyVec::from_vec(Vec::<i32>::new()).is_none());
    /// ```
    pub fn from_vec(mut vec: Vec<T>) -> Option<Self> {
        if vec.is_empty() {
            None
        } else {
            let head = vec.remove(0);
            Some(Self::new(head, vec))
        }
    }

    /// The first element.
    pub fn head(&self) -> &T {
        &self.head
    }

    /// Everything after the first element.
    pub fn tail(&self) -> &[T] {
        &self.tail
    }

    /// The final element.
    pub fn last(&self) -> &T {
        self.tail.last().unwrap_or(&self.head)
    }

    /// Total element count; always at least 1.
    pub fn len(&self) -> usize {
        1 + self.tail.len()
    }

    /// Always `false`; present for interface symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Append one element.
    pub fn push(&mut self, value: T) {
        self.tail.push(value);
    }

    /// Concatenate another non-empty vector onto this one.
    pub fn append(mut self, other: NonEmptyVec<T>) -> Self {
        self.tail.push(other.head);
        self.tail.extend(other.tail);
        self
    }

    /// Transform every element, preserving non-emptiness.
    pub fn map<U, F>(self, mut f: F) -> NonEmptyVec<U>
    where
        F: FnMut(T) -> U,
    {
        NonEmptyVec {
            head: f(self.head),
            tail: self.tail.into_iter().map(f).collect(),
        }
    }

    /// Iterate over all elements, head first.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        std::iter::once(&self.head).chain(self.tail.iter())
    }

    /// Flatten into an ordinary `Vec`.
    pub fn into_vec(self) -> Vec<T> {
        let mut vec = Vec::with_capacity(1 + self.tail.len());
        vec.push(self.head);
        vec.extend(self.tail);
        vec
    }
}

impl<T> From<NonEmptyVec<T>> for Vec<T> {
    fn from(nev: NonEmptyVec<T>) -> Self {
        nev.into_vec()
    }
}

impl<T> IntoIterator for NonEmptyVec<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_vec().into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn head_and_tail_are_preserved() {
        let items = NonEmptyVec::new(1, vec![2, 3]);
        assert_eq!(items.head(), &1);
        assert_eq!(items.tail(), &[2, 3]);
        assert_eq!(items.len(), 3);
    }

    #[test]
    fn never_empty() {
        assert!(!NonEmptyVec::singleton(1).is_empty());
        assert_eq!(NonEmptyVec::singleton(1).len(), 1);
    }

    #[test]
    fn last_falls_back_to_head() {
        assert_eq!(NonEmptyVec::singleton(9).last(), &9);
        assert_eq!(NonEmptyVec::new(1, vec![2, 3]).last(), &3);
    }

    #[test]
    fn from_vec_rejects_empty_input() {
        assert_eq!(NonEmptyVec::from_vec(vec![7]), Some(NonEmptyVec::singleton(7)));
        assert_eq!(NonEmptyVec::<i32>::from_vec(Vec::new()), None);
    }

    #[test]
    fn append_keeps_order() {
        let left = NonEmptyVec::new(1, vec![2]);
        let right = NonEmptyVec::new(3, vec![4]);
        assert_eq!(left.append(right).into_vec(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn map_touches_every_element() {
        let items = NonEmptyVec::new(1, vec![2, 3]).map(|x| x * 10);
        assert_eq!(items.into_vec(), vec![10, 20, 30]);
    }

    #[test]
    fn iter_yields_head_first() {
        let items = NonEmptyVec::new("a", vec!["b"]);
        let collected: Vec<&&str> = items.iter().collect();
        assert_eq!(collected, [&"a", &"b"]);
    }
}
