//! N-dimensional histogram with generic bin content.
//!
//! Bins live in one contiguous buffer of `∏(nbins_k + 2)` slots (each axis
//! contributes its underflow and overflow pseudo-bins). Per-axis indices are
//! flattened row-major in axis order, the last axis varying fastest:
//!
//! `flat = Σ_k idx_k · stride_k`, with `stride_{N-1} = 1` and
//! `stride_k = stride_{k+1} · (nbins_{k+1} + 2)`.
//!
//! Filling resolves one coordinate per axis, joins the indices and
//! accumulates into exactly one bin; on any error nothing is modified.

use hg_core::{Accumulate, Error, Materialize, Merge, Result};

use crate::args::AxisArgs;
use crate::axis::Axis;
use crate::spec::AxisSpec;

/// Histogram over one or more [`Axis`] with bins of type `B`.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram<B = f64> {
    axes: Vec<Axis>,
    strides: Vec<usize>,
    bins: Vec<B>,
}

/// Strides of the flat layout and the total number of bins.
fn layout(axes: &[Axis]) -> Result<(Vec<usize>, usize)> {
    if axes.is_empty() {
        return Err(Error::InvalidSpec("a histogram needs at least one axis".into()));
    }
    let mut strides = vec![0; axes.len()];
    let mut size = 1usize;
    for (k, axis) in axes.iter().enumerate().rev() {
        strides[k] = size;
        size = size.checked_mul(axis.nbins() + 2).ok_or_else(|| {
            Error::InvalidSpec(format!("total number of bins overflows at axis {k}"))
        })?;
    }
    Ok((strides, size))
}

impl<B> Histogram<B> {
    /// Histogram with default-constructed bins.
    pub fn new(axes: impl Into<Vec<Axis>>) -> Result<Self>
    where
        B: Default,
    {
        Self::new_with(axes, |_| B::default())
    }

    /// Histogram whose bin at flat index `i` starts as `init(i)`.
    pub fn new_with(axes: impl Into<Vec<Axis>>, init: impl FnMut(usize) -> B) -> Result<Self> {
        let axes = axes.into();
        let (strides, size) = layout(&axes)?;
        let mut bins: Vec<B> = Vec::new();
        bins.try_reserve_exact(size)
            .map_err(|e| Error::InvalidSpec(format!("cannot allocate {size} bins: {e}")))?;
        bins.extend((0..size).map(init));
        log::debug!("histogram allocated: {} axes, {} bins", axes.len(), size);
        Ok(Self { axes, strides, bins })
    }

    /// Histogram with default bins, one axis per spec.
    pub fn from_specs(specs: &[AxisSpec]) -> Result<Self>
    where
        B: Default,
    {
        let axes = specs.iter().map(AxisSpec::build).collect::<Result<Vec<_>>>()?;
        Self::new(axes)
    }

    /// Copy of `other` with every bin converted to `B`; see [`Histogram::convert`].
    pub fn from_histogram<S>(other: &Histogram<S>) -> Self
    where
        S: Materialize,
        B: Default + Accumulate<S::Value>,
    {
        other.convert()
    }

    // ── Introspection ──────────────────────────────────────────

    /// Number of axes.
    pub fn naxes(&self) -> usize {
        self.axes.len()
    }

    /// Alias of [`Histogram::naxes`].
    pub fn ndim(&self) -> usize {
        self.axes.len()
    }

    /// All axes in declaration order.
    pub fn axes(&self) -> &[Axis] {
        &self.axes
    }

    /// Axis `k`; negative `k` counts from the last axis (`-1` is the last one).
    pub fn axis(&self, k: isize) -> Result<&Axis> {
        let n = self.axes.len();
        let i = if k < 0 { k.checked_add_unsigned(n) } else { Some(k) };
        match i {
            Some(i) if i >= 0 && (i as usize) < n => Ok(&self.axes[i as usize]),
            _ => Err(Error::IndexOutOfRange { what: "axis", index: k as i64, len: n }),
        }
    }

    /// Total number of bins, pseudo-bins included.
    pub fn size(&self) -> usize {
        self.bins.len()
    }

    /// Alias of [`Histogram::size`].
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    /// Always false: every axis contributes at least three bins.
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Bins in flat-index order.
    pub fn bins(&self) -> &[B] {
        &self.bins
    }

    /// Iterate over the bins in flat-index order.
    pub fn iter(&self) -> std::slice::Iter<'_, B> {
        self.bins.iter()
    }

    // ── Index arithmetic ───────────────────────────────────────

    fn check_arity(&self, got: usize) -> Result<()> {
        if got != self.axes.len() {
            return Err(Error::DimensionMismatch { expected: self.axes.len(), got });
        }
        Ok(())
    }

    fn join_slice(&self, indices: &[usize]) -> Result<usize> {
        self.check_arity(indices.len())?;
        let mut flat = 0;
        for ((&i, axis), &stride) in indices.iter().zip(&self.axes).zip(&self.strides) {
            let len = axis.nbins() + 2;
            if i >= len {
                return Err(Error::out_of_range("bin", i, len));
            }
            flat += i * stride;
        }
        Ok(flat)
    }

    fn locate(&self, coords: &[f64]) -> Result<usize> {
        self.check_arity(coords.len())?;
        Ok(coords
            .iter()
            .zip(&self.axes)
            .zip(&self.strides)
            .map(|((&x, axis), &stride)| axis.find_bin_index(x) * stride)
            .sum())
    }

    /// Flat index of the bin with the given per-axis indices.
    pub fn join_index(&self, indices: impl AxisArgs<usize>) -> Result<usize> {
        indices.with_slice(|ii| self.join_slice(ii))
    }

    /// [`Histogram::join_index`] for indices coming from any iterator.
    pub fn join_index_iter(&self, indices: impl IntoIterator<Item = usize>) -> Result<usize> {
        let indices: Vec<usize> = indices.into_iter().collect();
        self.join_slice(&indices)
    }

    /// Per-axis indices of flat index `flat`; inverse of [`Histogram::join_index`].
    pub fn split_index(&self, flat: usize) -> Result<Vec<usize>> {
        if flat >= self.bins.len() {
            return Err(Error::out_of_range("bin", flat, self.bins.len()));
        }
        Ok(self
            .axes
            .iter()
            .zip(&self.strides)
            .map(|(axis, &stride)| (flat / stride) % (axis.nbins() + 2))
            .collect())
    }

    /// Per-axis bin indices of a coordinate tuple.
    pub fn find_bin_indices(&self, coords: impl AxisArgs<f64>) -> Result<Vec<usize>> {
        coords.with_slice(|xs| {
            self.check_arity(xs.len())?;
            Ok(xs.iter().zip(&self.axes).map(|(&x, axis)| axis.find_bin_index(x)).collect())
        })
    }

    /// Flat index of the bin containing a coordinate tuple.
    pub fn find_bin_index(&self, coords: impl AxisArgs<f64>) -> Result<usize> {
        coords.with_slice(|xs| self.locate(xs))
    }

    // ── Bin access ─────────────────────────────────────────────

    /// Bin at flat index `flat`.
    pub fn at(&self, flat: usize) -> Result<&B> {
        self.bins.get(flat).ok_or_else(|| Error::out_of_range("bin", flat, self.bins.len()))
    }

    /// Bin at the given per-axis indices.
    pub fn at_indices(&self, indices: impl AxisArgs<usize>) -> Result<&B> {
        let flat = self.join_index(indices)?;
        Ok(&self.bins[flat])
    }

    /// Bin containing a coordinate tuple.
    pub fn find_bin(&self, coords: impl AxisArgs<f64>) -> Result<&B> {
        let flat = self.find_bin_index(coords)?;
        Ok(&self.bins[flat])
    }

    // ── Filling ────────────────────────────────────────────────

    /// Count one occurrence at `coords` and return the updated bin.
    pub fn fill(&mut self, coords: impl AxisArgs<f64>) -> Result<&B>
    where
        B: Accumulate,
    {
        self.fill_with(coords, ())
    }

    /// Accumulate `args` into the bin at `coords` and return the updated bin.
    pub fn fill_with<A>(&mut self, coords: impl AxisArgs<f64>, args: A) -> Result<&B>
    where
        B: Accumulate<A>,
    {
        let flat = self.find_bin_index(coords)?;
        let bin = &mut self.bins[flat];
        bin.accumulate(args);
        Ok(bin)
    }

    /// Accumulate `args` into the bin at the given per-axis indices.
    pub fn fill_at<A>(&mut self, indices: impl AxisArgs<usize>, args: A) -> Result<&B>
    where
        B: Accumulate<A>,
    {
        let flat = self.join_index(indices)?;
        let bin = &mut self.bins[flat];
        bin.accumulate(args);
        Ok(bin)
    }

    // ── Conversion and combination ─────────────────────────────

    /// Same axes, bins mapped through `f`.
    pub fn map_bins<C>(&self, f: impl FnMut(&B) -> C) -> Histogram<C> {
        Histogram {
            axes: self.axes.clone(),
            strides: self.strides.clone(),
            bins: self.bins.iter().map(f).collect(),
        }
    }

    /// Same axes, every bin rebuilt as `C::default()` accumulating the
    /// materialized value of the source bin.
    ///
    /// Not lossless in general: a collection becomes its entry count in a
    /// counter, a `WeightBin` read into another `WeightBin` loses its `w2`.
    pub fn convert<C>(&self) -> Histogram<C>
    where
        B: Materialize,
        C: Default + Accumulate<B::Value>,
    {
        log::debug!(
            "converting histogram bins {} -> {}",
            std::any::type_name::<B>(),
            std::any::type_name::<C>()
        );
        self.map_bins(|bin| {
            let mut out = C::default();
            out.accumulate(bin.materialize());
            out
        })
    }

    /// Fold the bins of `other` into `self`, e.g. to combine per-thread shards.
    pub fn merge(&mut self, other: &Self) -> Result<()>
    where
        B: Merge,
    {
        if self.axes.len() != other.axes.len() {
            return Err(Error::DimensionMismatch {
                expected: self.axes.len(),
                got: other.axes.len(),
            });
        }
        if let Some(k) = self.axes.iter().zip(&other.axes).position(|(a, b)| a != b) {
            return Err(Error::AxisMismatch(format!("axis {k} differs between merged histograms")));
        }
        for (bin, o) in self.bins.iter_mut().zip(&other.bins) {
            bin.merge(o);
        }
        Ok(())
    }
}

impl<'a, B> IntoIterator for &'a Histogram<B> {
    type Item = &'a B;
    type IntoIter = std::slice::Iter<'a, B>;

    fn into_iter(self) -> Self::IntoIter {
        self.bins.iter()
    }
}
