//! # Index - Strided Cursor over an N-Dimensional Shape
//!
//! An `Index` maps an N-dimensional coordinate to a linear storage offset and
//! doubles as a mutable cursor for row-major traversal. The governing
//! invariant for every variant:
//!
//! ```text
//! offset(coord) = base + sum(coord[d] * stride[d])
//! ```
//!
//! ## Rank Specialization
//!
//! `Index` is a closed enum over small fixed ranks plus a general fallback:
//!
//! | Variant | Rank | Coordinate storage |
//! |---------|------|--------------------|
//! | `D0`    | 0    | none               |
//! | `D1`    | 1    | one cached field   |
//! | `D2`    | 2    | `[usize; 2]`       |
//! | `D3`    | 3    | `[usize; 3]`       |
//! | `Dn`    | any  | small-vector       |
//!
//! The specialized variants avoid the general per-dimension loop on the hot
//! offset path. All variants honor the same contract, with one deliberate
//! divergence: **rank-1 `increment` wraps back to the first element** instead
//! of reporting exhaustion, so a rank-1 cursor can be driven in a modular
//! fashion by scan loops that track their own trip count. Every other rank
//! reports exhaustion by returning `None` once the cursor passes the final
//! element.
//!
//! ## Ownership
//!
//! A cursor carries mutable per-call state and belongs to one traversal at a
//! time. Clone it to get an independent cursor over the same shape.

mod shape;

pub use shape::Shape;
pub(crate) use shape::{row_major_strides, Dims};

use eyre::{ensure, Result};

#[derive(Debug, Clone)]
pub enum Index {
    D0(Index0),
    D1(Index1),
    D2(Index2),
    D3(Index3),
    Dn(IndexN),
}

impl Index {
    /// Row-major cursor over `shape`, positioned at the origin with base
    /// offset zero. Picks the rank specialization.
    pub fn new(shape: &Shape) -> Self {
        Self::with_layout(shape, &row_major_strides(shape.dims()), 0)
            .expect("row-major strides match shape rank")
    }

    /// Cursor with explicit strides and base offset, for views whose storage
    /// layout is not row-major-contiguous (sections, transposes).
    pub fn with_layout(shape: &Shape, strides: &[usize], base: usize) -> Result<Self> {
        ensure!(
            shape.rank() == strides.len(),
            "stride count {} does not match shape rank {}",
            strides.len(),
            shape.rank()
        );
        let d = shape.dims();
        Ok(match shape.rank() {
            0 => Index::D0(Index0 { base, done: false }),
            1 => Index::D1(Index1 {
                len: d[0],
                stride: strides[0],
                cur: 0,
                base,
            }),
            2 => Index::D2(Index2 {
                sizes: [d[0], d[1]],
                strides: [strides[0], strides[1]],
                cur: [0, 0],
                base,
                done: false,
            }),
            3 => Index::D3(Index3 {
                sizes: [d[0], d[1], d[2]],
                strides: [strides[0], strides[1], strides[2]],
                cur: [0, 0, 0],
                base,
                done: false,
            }),
            _ => Index::Dn(IndexN::with_layout(shape, strides, base)),
        })
    }

    /// General-rank cursor regardless of rank. The specialized and general
    /// paths compute identical offsets; this constructor exists for callers
    /// that want one code path for every rank.
    pub fn general(shape: &Shape) -> Self {
        Index::Dn(IndexN::with_layout(
            shape,
            &row_major_strides(shape.dims()),
            0,
        ))
    }

    pub fn rank(&self) -> usize {
        match self {
            Index::D0(_) => 0,
            Index::D1(_) => 1,
            Index::D2(_) => 2,
            Index::D3(_) => 3,
            Index::Dn(ix) => ix.sizes.len(),
        }
    }

    pub fn shape(&self) -> Shape {
        match self {
            Index::D0(_) => Shape::scalar(),
            Index::D1(ix) => Shape::vector(ix.len),
            Index::D2(ix) => Shape::new(&ix.sizes),
            Index::D3(ix) => Shape::new(&ix.sizes),
            Index::Dn(ix) => Shape::new(&ix.sizes),
        }
    }

    /// Linear offset of the cursor's current coordinate.
    pub fn current_offset(&self) -> usize {
        match self {
            Index::D0(ix) => ix.base,
            Index::D1(ix) => ix.base + ix.cur * ix.stride,
            Index::D2(ix) => ix.base + ix.cur[0] * ix.strides[0] + ix.cur[1] * ix.strides[1],
            Index::D3(ix) => {
                ix.base
                    + ix.cur[0] * ix.strides[0]
                    + ix.cur[1] * ix.strides[1]
                    + ix.cur[2] * ix.strides[2]
            }
            Index::Dn(ix) => ix.offset(),
        }
    }

    pub fn coords(&self) -> Dims {
        match self {
            Index::D0(_) => Dims::new(),
            Index::D1(ix) => Dims::from_slice(&[ix.cur]),
            Index::D2(ix) => Dims::from_slice(&ix.cur),
            Index::D3(ix) => Dims::from_slice(&ix.cur),
            Index::Dn(ix) => ix.cur.clone(),
        }
    }

    /// Linear offset of `coords` without moving the cursor.
    pub fn offset_of(&self, coords: &[usize]) -> Result<usize> {
        ensure!(
            coords.len() == self.rank(),
            "coordinate rank {} does not match index rank {}",
            coords.len(),
            self.rank()
        );
        let shape = self.shape();
        let mut offset = self.base();
        for (d, (&c, &stride)) in coords.iter().zip(self.strides().iter()).enumerate() {
            ensure!(
                c < shape.dim(d),
                "coordinate {} out of range for dimension {} of size {}",
                c,
                d,
                shape.dim(d)
            );
            offset += c * stride;
        }
        Ok(offset)
    }

    /// Set the coordinate of one dimension. Repositioning a finished cursor
    /// makes it live again.
    pub fn set(&mut self, dim: usize, value: usize) -> Result<()> {
        let rank = self.rank();
        ensure!(
            dim < rank,
            "dimension {} out of range for rank {}",
            dim,
            rank
        );
        let size = self.shape().dim(dim);
        ensure!(
            value < size,
            "coordinate {} out of range for dimension {} of size {}",
            value,
            dim,
            size
        );
        match self {
            Index::D0(_) => unreachable!("rank 0 has no dimensions"),
            Index::D1(ix) => ix.cur = value,
            Index::D2(ix) => {
                ix.cur[dim] = value;
                ix.done = false;
            }
            Index::D3(ix) => {
                ix.cur[dim] = value;
                ix.done = false;
            }
            Index::Dn(ix) => {
                ix.cur[dim] = value;
                ix.done = false;
            }
        }
        Ok(())
    }

    /// Set every coordinate at once.
    pub fn set_coords(&mut self, coords: &[usize]) -> Result<()> {
        ensure!(
            coords.len() == self.rank(),
            "coordinate rank {} does not match index rank {}",
            coords.len(),
            self.rank()
        );
        for (d, &c) in coords.iter().enumerate() {
            self.set(d, c)?;
        }
        Ok(())
    }

    /// Advance one element in row-major order and return the new offset, or
    /// `None` once the cursor has passed the final element. Rank 1 wraps to
    /// the first element instead (see the module docs).
    pub fn increment(&mut self) -> Option<usize> {
        match self {
            Index::D0(ix) => {
                // One element only: the origin. Any advance is exhaustion.
                ix.done = true;
                None
            }
            Index::D1(ix) => {
                if ix.len == 0 {
                    return None;
                }
                ix.cur += 1;
                if ix.cur == ix.len {
                    ix.cur = 0;
                }
                Some(ix.base + ix.cur * ix.stride)
            }
            Index::D2(ix) => {
                if ix.done || ix.sizes[0] == 0 || ix.sizes[1] == 0 {
                    return None;
                }
                ix.cur[1] += 1;
                if ix.cur[1] == ix.sizes[1] {
                    ix.cur[1] = 0;
                    ix.cur[0] += 1;
                    if ix.cur[0] == ix.sizes[0] {
                        ix.cur[0] = 0;
                        ix.done = true;
                        return None;
                    }
                }
                Some(ix.base + ix.cur[0] * ix.strides[0] + ix.cur[1] * ix.strides[1])
            }
            Index::D3(ix) => {
                if ix.done || ix.sizes.contains(&0) {
                    return None;
                }
                let mut d = 3;
                loop {
                    if d == 0 {
                        ix.done = true;
                        return None;
                    }
                    d -= 1;
                    ix.cur[d] += 1;
                    if ix.cur[d] < ix.sizes[d] {
                        break;
                    }
                    ix.cur[d] = 0;
                }
                Some(
                    ix.base
                        + ix.cur[0] * ix.strides[0]
                        + ix.cur[1] * ix.strides[1]
                        + ix.cur[2] * ix.strides[2],
                )
            }
            Index::Dn(ix) => ix.increment(),
        }
    }

    /// Rewind to the origin and make the cursor live again.
    pub fn reset(&mut self) {
        match self {
            Index::D0(ix) => ix.done = false,
            Index::D1(ix) => ix.cur = 0,
            Index::D2(ix) => {
                ix.cur = [0, 0];
                ix.done = false;
            }
            Index::D3(ix) => {
                ix.cur = [0, 0, 0];
                ix.done = false;
            }
            Index::Dn(ix) => {
                ix.cur.iter_mut().for_each(|c| *c = 0);
                ix.done = false;
            }
        }
    }

    fn base(&self) -> usize {
        match self {
            Index::D0(ix) => ix.base,
            Index::D1(ix) => ix.base,
            Index::D2(ix) => ix.base,
            Index::D3(ix) => ix.base,
            Index::Dn(ix) => ix.base,
        }
    }

    fn strides(&self) -> Dims {
        match self {
            Index::D0(_) => Dims::new(),
            Index::D1(ix) => Dims::from_slice(&[ix.stride]),
            Index::D2(ix) => Dims::from_slice(&ix.strides),
            Index::D3(ix) => Dims::from_slice(&ix.strides),
            Index::Dn(ix) => ix.strides.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Index0 {
    base: usize,
    done: bool,
}

#[derive(Debug, Clone)]
pub struct Index1 {
    len: usize,
    stride: usize,
    cur: usize,
    base: usize,
}

#[derive(Debug, Clone)]
pub struct Index2 {
    sizes: [usize; 2],
    strides: [usize; 2],
    cur: [usize; 2],
    base: usize,
    done: bool,
}

#[derive(Debug, Clone)]
pub struct Index3 {
    sizes: [usize; 3],
    strides: [usize; 3],
    cur: [usize; 3],
    base: usize,
    done: bool,
}

/// General-rank cursor: the per-dimension loop the specializations unroll.
#[derive(Debug, Clone)]
pub struct IndexN {
    sizes: Dims,
    strides: Dims,
    cur: Dims,
    base: usize,
    done: bool,
}

impl IndexN {
    fn with_layout(shape: &Shape, strides: &[usize], base: usize) -> Self {
        Self {
            sizes: Dims::from_slice(shape.dims()),
            strides: Dims::from_slice(strides),
            cur: shape.dims().iter().map(|_| 0).collect(),
            base,
            done: false,
        }
    }

    fn offset(&self) -> usize {
        self.base
            + self
                .cur
                .iter()
                .zip(self.strides.iter())
                .map(|(c, s)| c * s)
                .sum::<usize>()
    }

    fn increment(&mut self) -> Option<usize> {
        if self.done || self.sizes.iter().any(|&s| s == 0) {
            return None;
        }
        // Row-major carry: bump the last dimension, carry left on overflow.
        let mut d = self.sizes.len();
        loop {
            if d == 0 {
                self.done = true;
                return None;
            }
            d -= 1;
            self.cur[d] += 1;
            if self.cur[d] < self.sizes[d] {
                break;
            }
            self.cur[d] = 0;
        }
        Some(self.offset())
    }
}

#[cfg(test)]
mod tests;
