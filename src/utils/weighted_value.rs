use crate::math::Real;
use core::cmp::Ordering;

/// A heap entry: a value ordered by its cost only.
///
/// `BinaryHeap` pops the largest cost first, so a min-heap stores negated costs.
#[derive(Copy, Clone, Debug)]
pub struct WeightedValue<T> {
    /// The value carried by this entry.
    pub value: T,
    /// The priority of this entry.
    pub cost: Real,
}

impl<T> WeightedValue<T> {
    #[inline]
    pub fn new(value: T, cost: Real) -> Self {
        Self { value, cost }
    }
}

// Costs are compared with `total_cmp` so a NaN never breaks the heap invariant.
impl<T> Ord for WeightedValue<T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.cost.total_cmp(&other.cost)
    }
}

impl<T> PartialOrd for WeightedValue<T> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> PartialEq for WeightedValue<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for WeightedValue<T> {}
