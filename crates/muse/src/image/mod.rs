//! Rasters: generic pixel images and boolean masks.
//!
//! - `Image<T, S>`: row-major pixels with fills, shifts, mirroring and resampling.
//! - `Mask<S>`: boolean image with boolean algebra and cached surface/bounding box.
//!
//! Both are generic over their storage: `Vec` owns the pixels, slices borrow them.

mod mask;
mod raster;

pub use mask::{Mask, MaskView, MaskViewMut};
pub use raster::{Image, ImageView, ImageViewMut, Pixel};

#[cfg(test)]
mod tests;
