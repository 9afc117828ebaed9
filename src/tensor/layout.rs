//! Layout: shape and row-major strides of a contiguous array

use super::Shape;
use crate::error::{Error, Result};
use smallvec::SmallVec;
use std::ops::Range;

use super::shape::STACK_DIMS;

/// Strides type: element offsets between consecutive elements along each dimension
/// NOTE: Strides are in ELEMENTS, not bytes
pub type Strides = SmallVec<[usize; STACK_DIMS]>;

/// Layout describes how a flat buffer maps onto an n-dimensional shape
///
/// Arrays in prngkey are always contiguous and row-major, so the layout is
/// fully determined by the shape.
///
/// Flat index of element at indices [i0, i1, ..., in]:
///   i0 * strides[0] + i1 * strides[1] + ... + in * strides[n]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    /// Shape: size along each dimension
    shape: Shape,
    /// Strides: offset (in elements) between consecutive elements along each dimension
    strides: Strides,
}

impl Layout {
    /// Create a new contiguous (row-major/C-order) layout from a shape
    ///
    /// # Example
    /// ```
    /// use prngkey::tensor::Layout;
    /// let layout = Layout::contiguous(&[2, 3, 4]);
    /// assert_eq!(layout.shape(), &[2, 3, 4]);
    /// assert_eq!(layout.strides(), &[12, 4, 1]);
    /// ```
    pub fn contiguous(shape: &[usize]) -> Self {
        let shape = Shape::from(shape);
        let strides = Self::compute_contiguous_strides(&shape);
        Self { shape, strides }
    }

    /// Compute contiguous strides for a given shape (row-major order)
    fn compute_contiguous_strides(shape: &[usize]) -> Strides {
        let mut strides: Strides = SmallVec::with_capacity(shape.len());
        let mut stride = 1usize;

        // Compute strides from last dimension to first
        for &dim in shape.iter().rev() {
            strides.push(stride);
            stride = stride.saturating_mul(dim);
        }

        strides.reverse();
        strides
    }

    /// Get the shape
    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Get the strides
    #[inline]
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// Number of dimensions (rank)
    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.ndim()
    }

    /// Total number of elements
    #[inline]
    pub fn elem_count(&self) -> usize {
        self.shape.numel()
    }

    /// Flat index of the element at `indices`, or `None` when out of bounds
    pub fn index(&self, indices: &[usize]) -> Option<usize> {
        if indices.len() != self.ndim() {
            return None;
        }
        let mut linear = 0usize;
        for ((&idx, &dim), &stride) in indices.iter().zip(self.shape.iter()).zip(&self.strides) {
            if idx >= dim {
                return None;
            }
            linear += idx * stride;
        }
        Some(linear)
    }

    /// Validate per-axis ranges against this layout and return their extents
    pub fn check_ranges(&self, ranges: &[Range<usize>]) -> Result<Shape> {
        if ranges.len() != self.ndim() {
            return Err(Error::invalid_argument(
                "ranges",
                format!(
                    "expected {} ranges for shape {:?}, got {}",
                    self.ndim(),
                    self.shape(),
                    ranges.len()
                ),
            ));
        }
        ranges
            .iter()
            .zip(self.shape.iter())
            .map(|(r, &dim)| {
                if r.start > r.end || r.end > dim {
                    Err(Error::invalid_argument(
                        "ranges",
                        format!("range {r:?} does not fit dimension of size {dim}"),
                    ))
                } else {
                    Ok(r.end - r.start)
                }
            })
            .collect()
    }

    /// Visit the contiguous runs of a rectangular sub-block
    ///
    /// Calls `f(flat_start, len)` once per run along the last axis, in row-major
    /// order of the sub-block. `ranges` must already be validated.
    pub fn for_each_run(&self, ranges: &[Range<usize>], mut f: impl FnMut(usize, usize)) {
        if ranges.iter().any(|r| r.is_empty()) {
            return;
        }
        let Some((last, outer)) = ranges.split_last() else {
            // Scalar layout: a single run of one element
            f(0, 1);
            return;
        };
        let run_len = last.end - last.start;
        let mut cursor: SmallVec<[usize; STACK_DIMS]> = outer.iter().map(|r| r.start).collect();

        loop {
            let mut start = last.start * self.strides[outer.len()];
            for (axis, &i) in cursor.iter().enumerate() {
                start += i * self.strides[axis];
            }
            f(start, run_len);

            // Advance the outer multi-index like an odometer
            let mut axis = outer.len();
            loop {
                if axis == 0 {
                    return;
                }
                axis -= 1;
                cursor[axis] += 1;
                if cursor[axis] < outer[axis].end {
                    break;
                }
                cursor[axis] = outer[axis].start;
            }
        }
    }
}
