use std::ops::Index;

use crate::utils::MyHash;

/// Growable hash-consing table.
///
/// Every distinct value is stored once and addressed by a stable index. Index 0 is a
/// sentinel: it holds `T::default()` and never takes part in lookups. Collisions are chained
/// through `next`, and the bucket array doubles once the load factor exceeds one.
pub struct Table<T> {
    data: Vec<T>,
    next: Vec<usize>,
    buckets: Vec<usize>,
    bitmask: u64,
}

impl<T> Table<T>
where
    T: Default,
{
    /// Create a new table with `2^bits` initial buckets.
    pub fn new(bits: usize) -> Self {
        assert!(bits <= 31, "Table bits should be in the range 0..=31");

        let size = 1 << bits;
        Self {
            data: vec![T::default()],
            next: vec![0],
            buckets: vec![0; size],
            bitmask: (size - 1) as u64,
        }
    }
}

impl<T> Table<T> {
    /// Number of stored values (the sentinel excluded).
    pub fn size(&self) -> usize {
        self.data.len() - 1
    }

    /// Number of buckets.
    pub fn num_buckets(&self) -> usize {
        self.buckets.len()
    }

    /// Get the reference to the value at the given index.
    pub fn value(&self, index: usize) -> &T {
        assert_ne!(index, 0, "Index is 0");
        &self.data[index]
    }

    /// Get the index of the next value in the same bucket.
    pub fn next(&self, index: usize) -> usize {
        assert_ne!(index, 0, "Index is 0");
        self.next[index]
    }
}

impl<T> Table<T>
where
    T: MyHash + Eq,
{
    fn bucket_index(&self, value: &T) -> usize {
        (value.hash() & self.bitmask) as usize
    }

    /// Find the index of an already stored value.
    pub fn find(&self, value: &T) -> Option<usize> {
        let mut index = self.buckets[self.bucket_index(value)];
        while index != 0 {
            if &self.data[index] == value {
                return Some(index);
            }
            index = self.next[index];
        }
        None
    }

    /// Put a value into the table and return its index, reusing an equal stored value.
    pub fn put(&mut self, value: T) -> usize {
        if let Some(index) = self.find(&value) {
            return index;
        }

        if self.size() >= self.buckets.len() {
            self.grow();
        }

        let bucket = self.bucket_index(&value);
        let index = self.data.len();
        self.data.push(value);
        self.next.push(self.buckets[bucket]);
        self.buckets[bucket] = index;
        index
    }

    fn grow(&mut self) {
        let size = self.buckets.len() * 2;
        self.buckets = vec![0; size];
        self.bitmask = (size - 1) as u64;

        for index in 1..self.data.len() {
            let bucket = self.bucket_index(&self.data[index]);
            self.next[index] = self.buckets[bucket];
            self.buckets[bucket] = index;
        }
    }
}

impl<T> Index<usize> for Table<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        self.value(index)
    }
}
