//! Boolean flags over the indices of a collection, used to track which points of a point set have
//! been kept or dropped.

use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexMask {
    mask: Vec<bool>,
}

impl IndexMask {
    /// Create a new IndexMask with the specified length and initial value.
    ///
    /// # Arguments
    ///
    /// * `len`: the length of the mask
    /// * `value`: the initial value for each index in the mask
    ///
    /// returns: IndexMask
    pub fn new(len: usize, value: bool) -> Self {
        IndexMask {
            mask: vec![value; len],
        }
    }

    /// Get the index values stored in the mask as a vector of usize.
    pub fn to_indices(&self) -> Vec<usize> {
        self.iter_true().collect()
    }

    /// Iterate over the indices whose value is `true`, in ascending order.
    pub fn iter_true(&self) -> impl Iterator<Item = usize> + '_ {
        self.mask
            .iter()
            .enumerate()
            .filter_map(|(i, &v)| if v { Some(i) } else { None })
    }

    /// Count the indices whose value is `true`.
    pub fn count_true(&self) -> usize {
        self.mask.iter().filter(|v| **v).count()
    }

    /// Set the value at the specified index. Indices past the end of the mask are ignored.
    pub fn set(&mut self, index: usize, value: bool) {
        if index < self.mask.len() {
            self.mask[index] = value;
        }
    }

    /// Get the value at the specified index.
    pub fn get(&self, index: usize) -> bool {
        self.mask[index]
    }

    /// Get the length of the mask.
    pub fn len(&self) -> usize {
        self.mask.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mask.is_empty()
    }

    /// Clone the items of `items` whose index is set in the mask, preserving their order. The
    /// slice must be exactly as long as the mask.
    ///
    /// # Arguments
    ///
    /// * `items`: the collection the mask was built over
    ///
    /// returns: Result<Vec<T, Global>, Box<dyn Error, Global>>
    pub fn clone_indices_of<T: Clone>(&self, items: &[T]) -> Result<Vec<T>> {
        if items.len() != self.mask.len() {
            return Err("Mask length does not match the length of the items".into());
        }

        Ok(self.iter_true().map(|i| items[i].clone()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_out_of_range_is_ignored() {
        let mut mask = IndexMask::new(3, false);
        mask.set(5, true);
        assert_eq!(mask.count_true(), 0);
        assert_eq!(mask.len(), 3);
    }

    #[test]
    fn indices_are_ascending() {
        let mut mask = IndexMask::new(6, false);
        mask.set(4, true);
        mask.set(1, true);
        assert_eq!(mask.to_indices(), vec![1, 4]);
    }

    #[test]
    fn clone_selected_items() -> Result<()> {
        let mut mask = IndexMask::new(4, true);
        mask.set(2, false);
        let kept = mask.clone_indices_of(&["a", "b", "c", "d"])?;
        assert_eq!(kept, vec!["a", "b", "d"]);
        Ok(())
    }

    #[test]
    fn clone_rejects_length_mismatch() {
        let mask = IndexMask::new(2, true);
        assert!(mask.clone_indices_of(&[1, 2, 3]).is_err());
    }
}
