//! Generic 2D raster over a flat row-major pixel buffer.
//!
//! Purpose
//! - `Image<T, S>` stores `width × height` pixels of kind `T` in storage `S`. Owned images
//!   use `Vec<T>`; `ImageView`/`ImageViewMut` wrap memory owned elsewhere and never free
//!   it. Cloning an owned image copies its pixels, cloning a view aliases them.
//! - Pixel `(x, y)` (column, row) lives at flat index `y * width + x`.
//!
//! Numeric queries (min/max, mean, sampling, resampling) need `T: Pixel`; layout
//! operations (fills, shifts, mirrors) only need `T: Copy`.

use std::marker::PhantomData;

use super::mask::Mask;
use crate::algebra::{max_of, min_of};
use crate::error::{GeomError, GeomResult};

/// Numeric pixel kinds.
pub trait Pixel: Copy + Default + PartialOrd + Send + Sync {
    fn to_f64(self) -> f64;
    /// Conversion back from a computed value (truncating for integer kinds).
    fn from_f64(v: f64) -> Self;
}

macro_rules! impl_pixel {
    ($($t:ty),*) => {
        $(
            impl Pixel for $t {
                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }

                #[inline]
                fn from_f64(v: f64) -> Self {
                    v as $t
                }
            }
        )*
    };
}

impl_pixel!(u8, u16, i16, i32, u32, f32, f64);

#[derive(Clone, Debug, PartialEq)]
pub struct Image<T, S = Vec<T>> {
    width: usize,
    height: usize,
    pixels: S,
    _pixel: PhantomData<T>,
}

/// Read-only image over memory owned elsewhere.
pub type ImageView<'a, T> = Image<T, &'a [T]>;
/// Mutable image over memory owned elsewhere.
pub type ImageViewMut<'a, T> = Image<T, &'a mut [T]>;

impl<T: Copy + Default> Image<T, Vec<T>> {
    /// `width × height` image with every pixel at `T::default()`.
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, T::default())
    }
}

impl<T: Copy> Image<T, Vec<T>> {
    pub fn filled(width: usize, height: usize, value: T) -> Self {
        Self {
            width,
            height,
            pixels: vec![value; width * height],
            _pixel: PhantomData,
        }
    }

    /// Caller guarantees `pixels.len() == width * height`.
    pub(crate) fn from_parts(width: usize, height: usize, pixels: Vec<T>) -> Self {
        debug_assert_eq!(pixels.len(), width * height);
        Self {
            width,
            height,
            pixels,
            _pixel: PhantomData,
        }
    }
}

impl<T: Copy, S: AsRef<[T]>> Image<T, S> {
    /// Wraps an existing buffer; its length must be `width * height`.
    pub fn from_buffer(width: usize, height: usize, pixels: S) -> GeomResult<Self> {
        let len = pixels.as_ref().len();
        if len != width * height {
            return Err(GeomError::SizeMismatch {
                caller: "Image::from_buffer",
                expected: (width, height),
                found: (len, 1),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
            _pixel: PhantomData,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of pixels.
    #[inline]
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.pixels.as_ref()
    }

    /// Borrowed view over the same pixels.
    pub fn view(&self) -> ImageView<'_, T> {
        Image {
            width: self.width,
            height: self.height,
            pixels: self.pixels.as_ref(),
            _pixel: PhantomData,
        }
    }

    /// Owned deep copy (whatever the storage).
    pub fn to_owned_image(&self) -> Image<T> {
        Image {
            width: self.width,
            height: self.height,
            pixels: self.as_slice().to_vec(),
            _pixel: PhantomData,
        }
    }

    /// Pixel at flat index `k`.
    pub fn get(&self, k: usize) -> GeomResult<T> {
        self.as_slice()
            .get(k)
            .copied()
            .ok_or_else(|| self.out_of_bounds("Image::get", k))
    }

    /// Pixel at column `x`, row `y`.
    pub fn at(&self, x: usize, y: usize) -> GeomResult<T> {
        if x >= self.width || y >= self.height {
            return Err(self.out_of_bounds("Image::at", x + y * self.width));
        }
        Ok(self.as_slice()[y * self.width + x])
    }

    #[inline]
    pub(crate) fn row(&self, y: usize) -> &[T] {
        &self.as_slice()[y * self.width..(y + 1) * self.width]
    }

    pub(crate) fn same_shape<U, R>(&self, other: &Image<U, R>) -> bool {
        self.width == other.width && self.height == other.height
    }

    pub(crate) fn shape_error<U, R>(
        &self,
        caller: &'static str,
        other: &Image<U, R>,
    ) -> GeomError {
        GeomError::SizeMismatch {
            caller,
            expected: (self.width, self.height),
            found: (other.width, other.height),
        }
    }

    pub(crate) fn out_of_bounds(&self, caller: &'static str, index: usize) -> GeomError {
        GeomError::PixelOutOfBounds {
            caller,
            index,
            width: self.width,
            height: self.height,
        }
    }
}

impl<T: Pixel, S: AsRef<[T]>> Image<T, S> {
    /// Smallest pixel; an empty image has none.
    pub fn min(&self) -> GeomResult<T> {
        min_of(self.as_slice()).ok_or_else(|| self.out_of_bounds("Image::min", 0))
    }

    /// Largest pixel; an empty image has none.
    pub fn max(&self) -> GeomResult<T> {
        max_of(self.as_slice()).ok_or_else(|| self.out_of_bounds("Image::max", 0))
    }

    /// Average pixel value, 0 for an empty image.
    pub fn mean(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        self.as_slice().iter().map(|p| p.to_f64()).sum::<f64>() / self.len() as f64
    }

    /// Average over the pixels selected by `roi`, 0 when it selects none.
    pub fn mean_in<M: AsRef<[bool]>>(&self, roi: &Mask<M>) -> GeomResult<f64> {
        if !self.same_shape(roi.image()) {
            return Err(self.shape_error("Image::mean_in", roi.image()));
        }
        let (count, sum) = self
            .as_slice()
            .iter()
            .zip(roi.as_slice())
            .filter(|(_, keep)| **keep)
            .fold((0usize, 0.0f64), |(n, s), (p, _)| (n + 1, s + p.to_f64()));
        Ok(if count > 0 { sum / count as f64 } else { 0.0 })
    }

    /// Bilinear interpolation at `(x, y)`; 0 outside the image.
    ///
    /// Neighbours past the last row or column repeat the edge pixel.
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let (xi, yi) = (x.floor(), y.floor());
        let (last_x, last_y) = (self.width as f64 - 1.0, self.height as f64 - 1.0);
        if xi < 0.0 || yi < 0.0 || xi > last_x || yi > last_y {
            return 0.0;
        }
        let (xi, yi) = (xi as usize, yi as usize);
        let (xf, yf) = (x - xi as f64, y - yi as f64);
        let x1 = (xi + 1).min(self.width - 1);
        let y1 = (yi + 1).min(self.height - 1);
        let px = |i: usize, j: usize| self.as_slice()[j * self.width + i].to_f64();
        (1.0 - yf) * ((1.0 - xf) * px(xi, yi) + xf * px(x1, yi))
            + yf * ((1.0 - xf) * px(xi, y1) + xf * px(x1, y1))
    }

    /// Half-size copy, each pixel the average of a 2×2 block.
    pub fn half_copy(&self) -> Image<T> {
        let (w, h) = (self.width / 2, self.height / 2);
        let src = self.as_slice();
        let sw = self.width;
        let mut pixels = Vec::with_capacity(w * h);
        for j in 0..h {
            for i in 0..w {
                let k = 2 * j * sw + 2 * i;
                let sum: f64 = [k, k + 1, k + sw, k + sw + 1]
                    .iter()
                    .map(|&q| src[q].to_f64())
                    .sum();
                pixels.push(T::from_f64(sum / 4.0));
            }
        }
        Image::from_parts(w, h, pixels)
    }

    /// Resampled copy: bilinear when enlarging, nearest pixel when shrinking.
    pub fn scaled_copy(&self, width: usize, height: usize) -> GeomResult<Image<T>> {
        if width == self.width && height == self.height {
            return Ok(self.to_owned_image());
        }
        if self.is_empty() {
            return Err(GeomError::invalid("Image::scaled_copy", "null data"));
        }
        let xfact = width as f64 / self.width as f64;
        let yfact = height as f64 / self.height as f64;
        let mut pixels = Vec::with_capacity(width * height);
        for j in 0..height {
            for i in 0..width {
                let (xo, yo) = (i as f64 / xfact, j as f64 / yfact);
                let v = if width > self.width {
                    T::from_f64(self.sample(xo, yo))
                } else {
                    let io = (xo.floor() as usize).min(self.width - 1);
                    let jo = (yo.floor() as usize).min(self.height - 1);
                    self.as_slice()[jo * self.width + io]
                };
                pixels.push(v);
            }
        }
        Ok(Image::from_parts(width, height, pixels))
    }
}

impl<T: Copy, S: AsRef<[T]> + AsMut<[T]>> Image<T, S> {
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.pixels.as_mut()
    }

    pub fn set(&mut self, k: usize, value: T) -> GeomResult<()> {
        let err = self.out_of_bounds("Image::set", k);
        let slot = self.pixels.as_mut().get_mut(k).ok_or(err)?;
        *slot = value;
        Ok(())
    }

    pub fn set_at(&mut self, x: usize, y: usize, value: T) -> GeomResult<()> {
        if x >= self.width || y >= self.height {
            return Err(self.out_of_bounds("Image::set_at", x + y * self.width));
        }
        let w = self.width;
        self.pixels.as_mut()[y * w + x] = value;
        Ok(())
    }

    pub fn fill(&mut self, value: T) {
        self.pixels.as_mut().fill(value);
    }

    pub fn fill_row(&mut self, row: usize, value: T) -> GeomResult<()> {
        if row >= self.height {
            return Err(GeomError::out_of_bounds("Image::fill_row", row, self.height));
        }
        let w = self.width;
        self.pixels.as_mut()[row * w..(row + 1) * w].fill(value);
        Ok(())
    }

    pub fn fill_column(&mut self, col: usize, value: T) -> GeomResult<()> {
        if col >= self.width {
            return Err(GeomError::out_of_bounds("Image::fill_column", col, self.width));
        }
        let w = self.width;
        for p in self.pixels.as_mut().iter_mut().skip(col).step_by(w) {
            *p = value;
        }
        Ok(())
    }

    /// Copies `values` (row-major, exactly `width * height` of them) into the image.
    pub fn fill_from(&mut self, values: &[T]) -> GeomResult<()> {
        if values.len() != self.len() {
            return Err(GeomError::SizeMismatch {
                caller: "Image::fill_from",
                expected: (self.width, self.height),
                found: (values.len(), 1),
            });
        }
        self.pixels.as_mut().copy_from_slice(values);
        Ok(())
    }

    /// Copies the pixels of a same-shape image.
    pub fn copy_pixels<R: AsRef<[T]>>(&mut self, other: &Image<T, R>) -> GeomResult<()> {
        if !self.same_shape(other) {
            return Err(self.shape_error("Image::copy_pixels", other));
        }
        self.pixels.as_mut().copy_from_slice(other.as_slice());
        Ok(())
    }

    /// Cyclic shift of the rows; positive moves content down.
    pub fn shift_rows(&mut self, shift: i64) {
        if self.is_empty() {
            return;
        }
        let offset = shift.rem_euclid(self.height as i64) as usize;
        let w = self.width;
        self.pixels.as_mut().rotate_right(offset * w);
    }

    /// Cyclic shift of the columns; positive moves content right.
    pub fn shift_columns(&mut self, shift: i64) {
        if self.is_empty() {
            return;
        }
        let offset = shift.rem_euclid(self.width as i64) as usize;
        if offset == 0 {
            return;
        }
        let w = self.width;
        for row in self.pixels.as_mut().chunks_exact_mut(w) {
            row.rotate_right(offset);
        }
    }

    /// Flips left/right and/or up/down around the centre.
    pub fn mirror(&mut self, left_right: bool, up_down: bool) {
        if self.is_empty() {
            return;
        }
        let (w, h) = (self.width, self.height);
        let px = self.pixels.as_mut();
        if left_right {
            for row in px.chunks_exact_mut(w) {
                row.reverse();
            }
        }
        if up_down {
            for j in 0..h / 2 {
                let (top, bottom) = px.split_at_mut((h - 1 - j) * w);
                top[j * w..(j + 1) * w].swap_with_slice(&mut bottom[..w]);
            }
        }
    }

    /// Swaps quarters diagonally (`Q1 Q2 / Q3 Q4` becomes `Q4 Q3 / Q2 Q1`).
    ///
    /// Returns `false` and leaves the image untouched when a side is odd or zero.
    pub fn swap_quarters(&mut self) -> bool {
        let (w, h) = (self.width, self.height);
        if w == 0 || h == 0 || w % 2 != 0 || h % 2 != 0 {
            return false;
        }
        let (w2, h2) = (w / 2, h / 2);
        let (top, bottom) = self.pixels.as_mut().split_at_mut(h2 * w);
        for (up, down) in top.chunks_exact_mut(w).zip(bottom.chunks_exact_mut(w)) {
            let (q1, q2) = up.split_at_mut(w2);
            let (q3, q4) = down.split_at_mut(w2);
            q1.swap_with_slice(q4);
            q2.swap_with_slice(q3);
        }
        true
    }
}
