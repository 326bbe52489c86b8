//! # Shape - Dimension Sizes of an N-Dimensional Array
//!
//! A `Shape` is the ordered list of dimension sizes for an array. Rank is the
//! number of dimensions; the element count is the product of the sizes (zero
//! if any dimension is zero). Shapes of rank four or less live inline and do
//! not allocate.

use smallvec::SmallVec;

pub(crate) type Dims = SmallVec<[usize; 4]>;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    dims: Dims,
}

impl Shape {
    pub fn new(dims: &[usize]) -> Self {
        Self {
            dims: Dims::from_slice(dims),
        }
    }

    /// Rank-0 shape: a single element and no dimensions.
    pub fn scalar() -> Self {
        Self { dims: Dims::new() }
    }

    /// Rank-1 shape of the given length.
    pub fn vector(len: usize) -> Self {
        Self::new(&[len])
    }

    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    /// Total element count. A shape with any zero dimension holds no elements.
    pub fn size(&self) -> usize {
        self.dims.iter().product()
    }

    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    pub fn dim(&self, d: usize) -> usize {
        self.dims[d]
    }

    pub fn is_scalar(&self) -> bool {
        self.dims.is_empty()
    }
}

impl From<&[usize]> for Shape {
    fn from(dims: &[usize]) -> Self {
        Shape::new(dims)
    }
}

impl<const N: usize> From<[usize; N]> for Shape {
    fn from(dims: [usize; N]) -> Self {
        Shape::new(&dims)
    }
}

/// Row-major strides for the given dimension sizes: the last dimension is
/// contiguous and each earlier stride is the product of the sizes after it.
pub(crate) fn row_major_strides(dims: &[usize]) -> Dims {
    let mut strides = Dims::from_slice(dims);
    let _ = strides.iter_mut().rev().fold(1, |acc, s| {
        let next = *s * acc;
        *s = acc;
        next
    });
    strides
}
