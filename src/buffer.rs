use std::marker::PhantomData;

use ndarray::{ArrayView3, ShapeError};

#[derive(Debug, Clone, PartialEq)]
pub struct Buffer<T, const ND: usize> {
    // Row-major
    data: Box<[T]>,
    shape: [usize; ND],
    _t: PhantomData<T>,
}

impl<T: Copy, const ND: usize> Buffer<T, ND> {
    /// Allocate a buffer where every slot along the last axis repeats `pattern`.
    ///
    /// Returns `None` when the element count overflows or the allocation is refused.
    pub fn try_new_filled(shape: [usize; ND], pattern: &[T]) -> Option<Self> {
        let len = shape
            .iter()
            .try_fold(1usize, |acc, dim| acc.checked_mul(*dim))?;
        len.checked_mul(size_of::<T>())
            .filter(|bytes| *bytes <= isize::MAX as usize)?;
        let mut data = Vec::new();
        data.try_reserve_exact(len).ok()?;
        data.extend(pattern.iter().copied().cycle().take(len));
        if data.len() != len {
            return None;
        }
        Some(Self {
            data: data.into_boxed_slice(),
            shape,
            _t: PhantomData,
        })
    }
}

impl<T, const ND: usize> Buffer<T, ND> {
    pub fn to_owned_parts(self) -> (Box<[T]>, [usize; ND]) {
        (self.data, self.shape)
    }

    pub fn as_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn shape(&self) -> [usize; ND] {
        self.shape
    }
}

impl<T> Buffer<T, 3> {
    pub fn view(&self) -> std::result::Result<ArrayView3<'_, T>, ShapeError> {
        ArrayView3::from_shape(self.shape, &self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case([2, 2, 1], &[7u8], vec![7, 7, 7, 7])]
    #[case([1, 2, 4], &[0u8, 0, 0, 255], vec![0, 0, 0, 255, 0, 0, 0, 255])]
    fn filled_repeats_pattern(
        #[case] shape: [usize; 3],
        #[case] pattern: &[u8],
        #[case] expected: Vec<u8>,
    ) {
        let buffer = Buffer::try_new_filled(shape, pattern).unwrap();
        assert_eq!(buffer.as_slice(), expected.as_slice());
        assert_eq!(buffer.shape(), shape);
    }

    #[rstest]
    fn overflowing_shape_is_refused() {
        assert!(Buffer::<u16, 3>::try_new_filled([usize::MAX, 2, 1], &[0]).is_none());
    }

    #[rstest]
    fn view_follows_row_major_shape() {
        let buffer = Buffer::try_new_filled([2, 3, 2], &[1.0f32, 2.0]).unwrap();
        let view = buffer.view().unwrap();
        assert_eq!(view.shape(), &[2, 3, 2]);
        assert_eq!(view[[1, 2, 1]], 2.0);
    }
}
