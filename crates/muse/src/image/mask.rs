//! Boolean raster with lazily recomputed statistics.
//!
//! Purpose
//! - `Mask<S>` is an `Image<bool, S>` plus the number of true pixels ("surface") and
//!   the bounding box of the true pixels.
//! - Every mutating call marks the statistics dirty; the next read rescans the pixels
//!   once and caches the result. Calls that set every pixel at once (`new`, `fill`,
//!   `resize`) store the statistics directly.
//!
//! Bounding box: `lower = (min_x, min_y, 0, 0)`, `upper = (max_x, max_y, 0, 0)` in pixel
//! coordinates. A mask without true pixels reports the empty `BoundingBox::default()`.

use std::cell::Cell;
use std::ops::Not;

use super::raster::Image;
use crate::algebra::vector::Point4;
use crate::error::GeomResult;
use crate::geometry::BoundingBox;

#[derive(Clone, Debug)]
pub struct Mask<S = Vec<bool>> {
    image: Image<bool, S>,
    dirty: Cell<bool>,
    surface: Cell<usize>,
    bbox: Cell<BoundingBox>,
}

/// Read-only mask over memory owned elsewhere.
pub type MaskView<'a> = Mask<&'a [bool]>;
/// Mutable mask over memory owned elsewhere.
pub type MaskViewMut<'a> = Mask<&'a mut [bool]>;

fn full_box(width: usize, height: usize) -> BoundingBox {
    BoundingBox::new(
        Point4::zeros(),
        Point4::new(width.saturating_sub(1) as f64, height.saturating_sub(1) as f64, 0.0, 0.0),
    )
}

impl Mask<Vec<bool>> {
    /// `width × height` mask with every pixel at `value`.
    pub fn new(width: usize, height: usize, value: bool) -> Self {
        let mask = Self::wrap(Image::filled(width, height, value));
        mask.store_uniform(value);
        mask
    }

    /// Reallocates to a new shape filled with `value`; same shape is a no-op.
    pub fn resize(&mut self, width: usize, height: usize, value: bool) {
        if width == self.width() && height == self.height() {
            return;
        }
        *self = Self::new(width, height, value);
    }
}

impl<S: AsRef<[bool]>> Mask<S> {
    /// Wraps an existing buffer; its length must be `width * height`.
    pub fn from_buffer(width: usize, height: usize, pixels: S) -> GeomResult<Self> {
        Ok(Self::wrap(Image::from_buffer(width, height, pixels)?))
    }

    pub fn from_image(image: Image<bool, S>) -> Self {
        Self::wrap(image)
    }

    fn wrap(image: Image<bool, S>) -> Self {
        Self {
            image,
            dirty: Cell::new(true),
            surface: Cell::new(0),
            bbox: Cell::new(BoundingBox::default()),
        }
    }

    fn store_uniform(&self, value: bool) {
        let (w, h) = (self.width(), self.height());
        if value && w * h > 0 {
            self.surface.set(w * h);
            self.bbox.set(full_box(w, h));
        } else {
            self.surface.set(0);
            self.bbox.set(BoundingBox::default());
        }
        self.dirty.set(false);
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.image.width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.image.height()
    }

    /// The underlying boolean image.
    #[inline]
    pub fn image(&self) -> &Image<bool, S> {
        &self.image
    }

    #[inline]
    pub fn as_slice(&self) -> &[bool] {
        self.image.as_slice()
    }

    pub fn get(&self, k: usize) -> GeomResult<bool> {
        self.image.get(k)
    }

    pub fn at(&self, x: usize, y: usize) -> GeomResult<bool> {
        self.image.at(x, y)
    }

    /// Borrowed view over the same pixels (statistics recomputed on demand).
    pub fn view(&self) -> MaskView<'_> {
        let view = Mask::wrap(self.image.view());
        if !self.dirty.get() {
            view.surface.set(self.surface.get());
            view.bbox.set(self.bbox.get());
            view.dirty.set(false);
        }
        view
    }

    /// Owned deep copy.
    pub fn to_owned_mask(&self) -> Mask {
        let copy = Mask::wrap(self.image.to_owned_image());
        copy.surface.set(self.surface.get());
        copy.bbox.set(self.bbox.get());
        copy.dirty.set(self.dirty.get());
        copy
    }

    fn refresh(&self) {
        if !self.dirty.get() {
            return;
        }
        let (w, h) = (self.width(), self.height());
        let px = self.as_slice();
        let surface = px.iter().filter(|&&p| p).count();
        self.surface.set(surface);
        self.dirty.set(false);
        if surface == 0 {
            self.bbox.set(BoundingBox::default());
            return;
        }

        let column_set = |i: usize| (0..h).any(|j| px[j * w + i]);
        let row_set = |j: usize| self.image.row(j).iter().any(|&p| p);
        let min_x = (0..w).find(|&i| column_set(i)).unwrap_or(0);
        let max_x = (0..w).rev().find(|&i| column_set(i)).unwrap_or(0);
        let min_y = (0..h).find(|&j| row_set(j)).unwrap_or(0);
        let max_y = (0..h).rev().find(|&j| row_set(j)).unwrap_or(0);
        self.bbox.set(BoundingBox::new(
            Point4::new(min_x as f64, min_y as f64, 0.0, 0.0),
            Point4::new(max_x as f64, max_y as f64, 0.0, 0.0),
        ));
    }

    /// Number of true pixels.
    pub fn surface(&self) -> usize {
        self.refresh();
        self.surface.get()
    }

    /// No pixel is true.
    pub fn is_blank(&self) -> bool {
        self.surface() == 0
    }

    /// Every pixel is true.
    pub fn is_full(&self) -> bool {
        self.surface() == self.image.len()
    }

    /// Box of the true pixels, in pixel coordinates.
    pub fn bounding_box(&self) -> BoundingBox {
        self.refresh();
        self.bbox.get()
    }

    /// Fraction of true pixels.
    pub fn mean(&self) -> f64 {
        if self.image.is_empty() {
            return 0.0;
        }
        self.surface() as f64 / self.image.len() as f64
    }

    /// Fraction of true pixels among those selected by `roi`, 0 when it selects none.
    pub fn mean_in<M: AsRef<[bool]>>(&self, roi: &Mask<M>) -> GeomResult<f64> {
        if !self.image.same_shape(roi.image()) {
            return Err(self.image.shape_error("Mask::mean_in", roi.image()));
        }
        let (selected, set) = self
            .as_slice()
            .iter()
            .zip(roi.as_slice())
            .filter(|(_, keep)| **keep)
            .fold((0usize, 0usize), |(n, s), (p, _)| (n + 1, s + usize::from(*p)));
        Ok(if selected > 0 { set as f64 / selected as f64 } else { 0.0 })
    }

    /// Half-size copy; a pixel is true when at least two of its 2×2 block are.
    pub fn half_copy(&self) -> Mask {
        let (w, h) = (self.width() / 2, self.height() / 2);
        let sw = self.width();
        let src = self.as_slice();
        let pixels = (0..h)
            .flat_map(|j| (0..w).map(move |i| (i, j)))
            .map(|(i, j)| {
                let k = 2 * j * sw + 2 * i;
                [src[k], src[k + 1], src[k + sw], src[k + sw + 1]]
                    .iter()
                    .filter(|&&p| p)
                    .count()
                    >= 2
            })
            .collect();
        Mask::wrap(Image::from_parts(w, h, pixels))
    }

    fn binary<R: AsRef<[bool]>>(
        &self,
        other: &Mask<R>,
        caller: &'static str,
        op: impl Fn(bool, bool) -> bool,
    ) -> GeomResult<Mask> {
        let mut out = self.to_owned_mask();
        out.zip_assign(other, caller, op)?;
        Ok(out)
    }

    /// `self & other` as a new mask.
    pub fn and(&self, other: &Mask<impl AsRef<[bool]>>) -> GeomResult<Mask> {
        self.binary(other, "Mask::and", |a, b| a && b)
    }

    /// `self | other` as a new mask.
    pub fn or(&self, other: &Mask<impl AsRef<[bool]>>) -> GeomResult<Mask> {
        self.binary(other, "Mask::or", |a, b| a || b)
    }

    /// `self ^ other` as a new mask.
    pub fn xor(&self, other: &Mask<impl AsRef<[bool]>>) -> GeomResult<Mask> {
        self.binary(other, "Mask::xor", |a, b| a != b)
    }
}

impl<S: AsRef<[bool]> + AsMut<[bool]>> Mask<S> {
    #[inline]
    fn touch(&mut self) -> &mut Image<bool, S> {
        self.dirty.set(true);
        &mut self.image
    }

    /// Mutable pixel access; statistics are recomputed on the next read.
    pub fn pixels_mut(&mut self) -> &mut [bool] {
        self.touch().as_mut_slice()
    }

    pub fn set(&mut self, k: usize, value: bool) -> GeomResult<()> {
        self.touch().set(k, value)
    }

    pub fn set_at(&mut self, x: usize, y: usize, value: bool) -> GeomResult<()> {
        self.touch().set_at(x, y, value)
    }

    pub fn fill(&mut self, value: bool) {
        self.image.fill(value);
        self.store_uniform(value);
    }

    pub fn fill_row(&mut self, row: usize, value: bool) -> GeomResult<()> {
        self.touch().fill_row(row, value)
    }

    pub fn fill_column(&mut self, col: usize, value: bool) -> GeomResult<()> {
        self.touch().fill_column(col, value)
    }

    pub fn fill_from(&mut self, values: &[bool]) -> GeomResult<()> {
        self.touch().fill_from(values)
    }

    pub fn copy_pixels<R: AsRef<[bool]>>(&mut self, other: &Mask<R>) -> GeomResult<()> {
        self.touch().copy_pixels(other.image())
    }

    pub fn shift_rows(&mut self, shift: i64) {
        self.touch().shift_rows(shift);
    }

    pub fn shift_columns(&mut self, shift: i64) {
        self.touch().shift_columns(shift);
    }

    pub fn mirror(&mut self, left_right: bool, up_down: bool) {
        self.touch().mirror(left_right, up_down);
    }

    pub fn swap_quarters(&mut self) -> bool {
        self.touch().swap_quarters()
    }

    /// Complements every pixel in place.
    pub fn invert(&mut self) -> &mut Self {
        for p in self.touch().as_mut_slice() {
            *p = !*p;
        }
        self
    }

    fn zip_assign<R: AsRef<[bool]>>(
        &mut self,
        other: &Mask<R>,
        caller: &'static str,
        op: impl Fn(bool, bool) -> bool,
    ) -> GeomResult<()> {
        if !self.image.same_shape(other.image()) {
            return Err(self.image.shape_error(caller, other.image()));
        }
        for (a, &b) in self.touch().as_mut_slice().iter_mut().zip(other.as_slice()) {
            *a = op(*a, b);
        }
        Ok(())
    }

    /// `self &= other`.
    pub fn and_assign<R: AsRef<[bool]>>(&mut self, other: &Mask<R>) -> GeomResult<&mut Self> {
        self.zip_assign(other, "Mask::and_assign", |a, b| a && b)?;
        Ok(self)
    }

    /// `self |= other`.
    pub fn or_assign<R: AsRef<[bool]>>(&mut self, other: &Mask<R>) -> GeomResult<&mut Self> {
        self.zip_assign(other, "Mask::or_assign", |a, b| a || b)?;
        Ok(self)
    }

    /// `self ^= other`.
    pub fn xor_assign<R: AsRef<[bool]>>(&mut self, other: &Mask<R>) -> GeomResult<&mut Self> {
        self.zip_assign(other, "Mask::xor_assign", |a, b| a != b)?;
        Ok(self)
    }
}

impl Not for Mask {
    type Output = Mask;

    fn not(mut self) -> Mask {
        self.invert();
        self
    }
}

impl<S: AsRef<[bool]>> Not for &Mask<S> {
    type Output = Mask;

    fn not(self) -> Mask {
        !self.to_owned_mask()
    }
}

impl<S: AsRef<[bool]>, R: AsRef<[bool]>> PartialEq<Mask<R>> for Mask<S> {
    fn eq(&self, other: &Mask<R>) -> bool {
        self.image.same_shape(other.image()) && self.as_slice() == other.as_slice()
    }
}
