use alloc::{boxed::Box, vec::Vec};

use crate::SeriesError;

/// A fixed-size, circular buffer (ring buffer) for storing a sliding window of elements.
///
/// Holds the `capacity` most recently pushed values in insertion order. Once full,
/// every push overwrites the oldest value. Relative index `0` is the oldest retained
/// value and `len() - 1` the newest.
#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    /// The underlying buffer holding the elements.
    /// The buffer has a fixed capacity and is allocated on the heap.
    data: Box<[T]>,
    /// The index of the oldest element in the buffer (the "head").
    /// This is where the next element will be overwritten when the buffer is full.
    index: usize,
    /// The current number of elements stored in the buffer.
    /// Always less than or equal to `data.len()`.
    len: usize,
}

impl<T: Default + Copy> RingBuffer<T> {
    /// Creates an empty buffer holding at most `capacity` values
    ///
    /// # Arguments
    ///
    /// * `capacity` - Maximum number of retained values
    ///
    /// # Returns
    ///
    /// * `Result<Self, SeriesError>` - The buffer, or `InvalidCapacity` when `capacity` is zero
    pub fn new(capacity: usize) -> Result<Self, SeriesError> {
        if capacity == 0 {
            return Err(SeriesError::InvalidCapacity(capacity));
        }
        let mut vec = Vec::with_capacity(capacity);
        vec.resize_with(capacity, T::default);
        Ok(Self {
            data: vec.into_boxed_slice(),
            index: 0,
            len: 0,
        })
    }

    /// Maximum number of retained values
    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Number of values currently held
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if nothing has been pushed yet
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` once the buffer holds `capacity` values
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    /// Appends a value, overwriting the oldest one when the buffer is full
    ///
    /// # Arguments
    ///
    /// * `value` - The value to append
    ///
    /// # Returns
    ///
    /// * `Option<T>` - The overwritten value, or `None` while the buffer was not yet full
    pub fn push(&mut self, value: T) -> Option<T> {
        let cap = self.capacity();

        if self.is_full() {
            let overwritten = core::mem::replace(&mut self.data[self.index], value);
            self.index = (self.index + 1) % cap; // move head forward
            Some(overwritten)
        } else {
            let insert_at = (self.index + self.len) % cap;
            self.data[insert_at] = value;
            self.len += 1;
            None
        }
    }

    /// Returns the value at a relative position, `0` being the oldest
    ///
    /// # Arguments
    ///
    /// * `rel_index` - Position relative to the oldest held value
    ///
    /// # Returns
    ///
    /// * `Result<T, SeriesError>` - The value, or `OutOfRange` when `rel_index >= len()`
    pub fn get(&self, rel_index: usize) -> Result<T, SeriesError> {
        if rel_index >= self.len {
            return Err(SeriesError::OutOfRange {
                index: rel_index,
                len: self.len,
            });
        }
        Ok(self.data[(self.index + rel_index) % self.capacity()])
    }

    /// Oldest held value, `OutOfRange` when empty
    #[inline]
    pub fn first(&self) -> Result<T, SeriesError> {
        self.get(0)
    }

    /// Newest held value, `OutOfRange` when empty
    #[inline]
    pub fn last(&self) -> Result<T, SeriesError> {
        match self.len {
            0 => Err(SeriesError::OutOfRange { index: 0, len: 0 }),
            len => self.get(len - 1),
        }
    }

    /// Iterates over the held values from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        (0..self.len).map(move |i| &self.data[(self.index + i) % self.capacity()])
    }

    /// Copies the held values, oldest first
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().copied().collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::RingBuffer;
    use crate::SeriesError;

    #[test]
    fn test_new_and_capacity() {
        let buf: RingBuffer<f64> = RingBuffer::new(4).unwrap();
        assert_eq!(buf.capacity(), 4);
        assert_eq!(buf.len(), 0);
        assert!(buf.is_empty());
        assert!(!buf.is_full());
    }

    #[test]
    fn test_invalid_capacity() {
        assert_eq!(
            RingBuffer::<f64>::new(0).unwrap_err(),
            SeriesError::InvalidCapacity(0)
        );
    }

    #[test]
    fn test_empty_accessors_fail() {
        let buf: RingBuffer<f64> = RingBuffer::new(3).unwrap();
        assert_eq!(
            buf.first(),
            Err(SeriesError::OutOfRange { index: 0, len: 0 })
        );
        assert_eq!(buf.last(), Err(SeriesError::OutOfRange { index: 0, len: 0 }));
        assert!(buf.get(0).is_err());
        assert!(buf.to_vec().is_empty());
    }

    #[test]
    fn test_push_and_len() {
        let mut buf = RingBuffer::<f64>::new(3).unwrap();

        assert_eq!(buf.push(1.0), None);
        assert_eq!(buf.to_vec(), vec![1.0]);
        assert_eq!(buf.push(2.0), None);
        assert_eq!(buf.to_vec(), vec![1.0, 2.0]);
        assert_eq!(buf.push(3.0), None);
        assert_eq!(buf.to_vec(), vec![1.0, 2.0, 3.0]);
        assert!(buf.is_full());

        assert_eq!(buf.push(4.0), Some(1.0));
        assert_eq!(buf.len(), 3);
        assert_eq!(buf.to_vec(), vec![2.0, 3.0, 4.0]);

        buf.push(5.0);
        buf.push(6.0);
        buf.push(7.0);
        assert_eq!(buf.len(), 3);
        assert_eq!(buf.to_vec(), vec![5.0, 6.0, 7.0]);
    }

    #[test]
    fn test_relative_accessors() {
        let mut buf = RingBuffer::<f64>::new(3).unwrap();
        buf.push(1.0);
        buf.push(2.0);

        assert_eq!(buf.first(), Ok(1.0));
        assert_eq!(buf.last(), Ok(2.0));
        assert_eq!(buf.get(0), Ok(1.0));
        assert_eq!(buf.get(1), Ok(2.0));
        assert_eq!(buf.get(2), Err(SeriesError::OutOfRange { index: 2, len: 2 }));

        buf.push(3.0);
        buf.push(4.0);
        assert_eq!(buf.first(), Ok(2.0));
        assert_eq!(buf.get(1), Ok(3.0));
        assert_eq!(buf.last(), Ok(4.0));
    }

    #[test]
    fn test_capacity_one() {
        let mut buf = RingBuffer::<f64>::new(1).unwrap();
        buf.push(1.0);
        assert_eq!(buf.to_vec(), vec![1.0]);
        assert_eq!(buf.push(2.0), Some(1.0));
        assert_eq!(buf.to_vec(), vec![2.0]);
        assert_eq!(buf.first(), buf.last());
    }

    #[test]
    fn test_overflow_keeps_most_recent() {
        let capacity = 4;
        for extra in 1..10 {
            let mut buf = RingBuffer::<f64>::new(capacity).unwrap();
            for v in 1..=(capacity + extra) {
                buf.push(v as f64);
            }
            assert_eq!(buf.len(), capacity);
            assert_eq!(buf.first(), Ok((extra + 1) as f64));
            assert_eq!(buf.last(), Ok((capacity + extra) as f64));
        }
    }
}
