use core::cmp::PartialOrd;

/// A pair of elements sorted in increasing order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct SortedPair<T: PartialOrd>([T; 2]);

impl<T: PartialOrd> SortedPair<T> {
    /// Sorts two elements in increasing order into a new pair.
    pub fn new(element1: T, element2: T) -> Self {
        if element1 > element2 {
            SortedPair([element2, element1])
        } else {
            SortedPair([element1, element2])
        }
    }

    /// The smallest element of this pair.
    #[inline]
    pub fn first(&self) -> &T {
        &self.0[0]
    }

    /// The largest element of this pair.
    #[inline]
    pub fn second(&self) -> &T {
        &self.0[1]
    }
}

impl<T: PartialOrd + Copy> SortedPair<T> {
    /// The two elements of this pair, smallest first.
    #[inline]
    pub fn as_tuple(&self) -> (T, T) {
        (self.0[0], self.0[1])
    }
}

impl<T: PartialOrd + Copy> From<SortedPair<T>> for (T, T) {
    fn from(pair: SortedPair<T>) -> (T, T) {
        pair.as_tuple()
    }
}

#[cfg(test)]
mod test {
    use super::SortedPair;

    #[test]
    fn sorted_pair_orders_its_elements() {
        let a = SortedPair::new(7u32, 3);
        let b = SortedPair::new(3u32, 7);
        assert_eq!(a, b);
        assert_eq!(a.as_tuple(), (3, 7));
        assert_eq!(*a.first(), 3);
        assert_eq!(*a.second(), 7);
    }
}
