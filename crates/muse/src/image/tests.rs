use super::*;
use crate::algebra::vector::Point4;
use crate::error::GeomError;
use crate::geometry::BoundingBox;
use proptest::prelude::*;

fn grid(width: usize, height: usize, values: &[f64]) -> Image<f64> {
    Image::from_buffer(width, height, values.to_vec()).unwrap()
}

fn mask_box(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> BoundingBox {
    BoundingBox::new(Point4::new(min_x, min_y, 0.0, 0.0), Point4::new(max_x, max_y, 0.0, 0.0))
}

fn arb_mask_pair() -> impl Strategy<Value = (Mask, Mask)> {
    (1usize..12, 1usize..12).prop_flat_map(|(w, h)| {
        (
            prop::collection::vec(any::<bool>(), w * h),
            prop::collection::vec(any::<bool>(), w * h),
        )
            .prop_map(move |(a, b)| {
                (Mask::from_buffer(w, h, a).unwrap(), Mask::from_buffer(w, h, b).unwrap())
            })
    })
}

proptest! {
    #[test]
    fn mask_algebra_identities((a, b) in arb_mask_pair()) {
        let kept = a.and(&b).unwrap();
        let dropped = a.and(&!&b).unwrap();
        prop_assert_eq!(kept.or(&dropped).unwrap(), a.clone());

        let union = a.or(&b).unwrap();
        let inter = a.and(&b).unwrap();
        prop_assert!(union.surface() >= a.surface().max(b.surface()));
        prop_assert!(inter.surface() <= a.surface().min(b.surface()));
        prop_assert_eq!(union.surface() + inter.surface(), a.surface() + b.surface());
        prop_assert_eq!(a.xor(&b).unwrap().surface(), union.surface() - inter.surface());
    }

    #[test]
    fn cached_statistics_match_a_fresh_scan((a, b) in arb_mask_pair()) {
        let mut m = a.clone();
        let _ = m.surface();
        m.xor_assign(&b).unwrap();
        let fresh = Mask::from_buffer(m.width(), m.height(), m.as_slice().to_vec()).unwrap();
        prop_assert_eq!(m.surface(), fresh.surface());
        prop_assert_eq!(m.bounding_box(), fresh.bounding_box());
    }
}

#[test]
fn pixel_access_and_bounds() {
    let mut im: Image<i32> = Image::new(3, 2);
    assert_eq!(im.len(), 6);
    im.set_at(2, 1, 7).unwrap();
    assert_eq!(im.get(5).unwrap(), 7);
    assert_eq!(im.at(2, 1).unwrap(), 7);
    assert!(matches!(
        im.at(3, 0),
        Err(GeomError::PixelOutOfBounds { index: 3, width: 3, height: 2, .. })
    ));
    assert!(im.set(6, 1).is_err());
    assert!(matches!(
        Image::<f64>::from_buffer(2, 2, vec![0.0; 3]),
        Err(GeomError::SizeMismatch { .. })
    ));
}

#[test]
fn fills() {
    let mut im: Image<u8> = Image::new(3, 3);
    im.fill_row(1, 4).unwrap();
    im.fill_column(2, 9).unwrap();
    assert_eq!(im.as_slice(), &[0, 0, 9, 4, 4, 9, 0, 0, 9]);
    assert!(matches!(
        im.fill_row(3, 1),
        Err(GeomError::IndexOutOfBounds { index: 3, size: 3, .. })
    ));
    assert!(im.fill_column(3, 1).is_err());
    im.fill(2);
    assert!(im.as_slice().iter().all(|&p| p == 2));
    im.fill_from(&[1, 2, 3, 4, 5, 6, 7, 8, 9]).unwrap();
    assert_eq!(im.at(0, 2).unwrap(), 7);
    assert!(im.fill_from(&[1, 2]).is_err());

    let mut other: Image<u8> = Image::new(3, 3);
    other.copy_pixels(&im).unwrap();
    assert_eq!(other, im);
    assert!(other.copy_pixels(&Image::<u8>::new(2, 3)).is_err());
}

#[test]
fn statistics() {
    let im = grid(2, 2, &[3.0, -1.0, 4.0, 2.0]);
    assert_eq!(im.min().unwrap(), -1.0);
    assert_eq!(im.max().unwrap(), 4.0);
    assert_eq!(im.mean(), 2.0);
    let roi = Mask::from_buffer(2, 2, vec![true, false, true, false]).unwrap();
    assert_eq!(im.mean_in(&roi).unwrap(), 3.5);
    assert_eq!(im.mean_in(&Mask::new(2, 2, false)).unwrap(), 0.0);
    assert!(im.mean_in(&Mask::new(3, 2, true)).is_err());
    let empty: Image<f64> = Image::new(0, 0);
    assert!(matches!(empty.min(), Err(GeomError::PixelOutOfBounds { .. })));
    assert_eq!(empty.mean(), 0.0);
}

#[test]
fn bilinear_sampling() {
    let im = grid(2, 2, &[0.0, 1.0, 2.0, 3.0]);
    assert_eq!(im.sample(0.0, 0.0), 0.0);
    assert_eq!(im.sample(0.5, 0.5), 1.5);
    assert_eq!(im.sample(0.5, 0.0), 0.5);
    assert_eq!(im.sample(1.0, 1.0), 3.0);
    assert_eq!(im.sample(-0.5, 0.0), 0.0);
    assert_eq!(im.sample(0.0, 2.0), 0.0);
}

#[test]
fn half_and_scaled_copies() {
    let im = grid(4, 2, &[1.0, 3.0, 0.0, 0.0, 5.0, 7.0, 4.0, 8.0]);
    let half = im.half_copy();
    assert_eq!((half.width(), half.height()), (2, 1));
    assert_eq!(half.as_slice(), &[4.0, 3.0]);

    let row = grid(2, 1, &[2.0, 4.0]);
    let up = row.scaled_copy(4, 1).unwrap();
    assert_eq!(up.as_slice(), &[2.0, 3.0, 4.0, 4.0]);

    let square = grid(4, 4, &(0..16).map(f64::from).collect::<Vec<_>>());
    let down = square.scaled_copy(2, 2).unwrap();
    assert_eq!(down.as_slice(), &[0.0, 2.0, 8.0, 10.0]);
    assert_eq!(square.scaled_copy(4, 4).unwrap(), square);
    assert!(Image::<f64>::new(0, 0).scaled_copy(2, 2).is_err());
}

#[test]
fn cyclic_shifts() {
    let mut col = grid(1, 3, &[1.0, 2.0, 3.0]);
    col.shift_rows(1);
    assert_eq!(col.as_slice(), &[3.0, 1.0, 2.0]);
    col.shift_rows(-2);
    assert_eq!(col.as_slice(), &[2.0, 3.0, 1.0]);
    col.shift_rows(3);
    assert_eq!(col.as_slice(), &[2.0, 3.0, 1.0]);

    let mut im = grid(3, 2, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    im.shift_columns(1);
    assert_eq!(im.as_slice(), &[3.0, 1.0, 2.0, 6.0, 4.0, 5.0]);
    im.shift_columns(-1);
    assert_eq!(im.as_slice(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
}

#[test]
fn mirror_and_swap_quarters() {
    let mut im = grid(3, 2, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    im.mirror(true, false);
    assert_eq!(im.as_slice(), &[3.0, 2.0, 1.0, 6.0, 5.0, 4.0]);
    im.mirror(false, true);
    assert_eq!(im.as_slice(), &[6.0, 5.0, 4.0, 3.0, 2.0, 1.0]);
    im.mirror(true, true);
    assert_eq!(im.as_slice(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);

    let mut tall = grid(1, 3, &[1.0, 2.0, 3.0]);
    tall.mirror(false, true);
    assert_eq!(tall.as_slice(), &[3.0, 2.0, 1.0]);

    let mut q = grid(4, 2, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
    assert!(q.swap_quarters());
    assert_eq!(q.as_slice(), &[7.0, 8.0, 5.0, 6.0, 3.0, 4.0, 1.0, 2.0]);
    assert!(!im.swap_quarters());
    assert_eq!(im.as_slice(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
}

#[test]
fn views_write_through_to_foreign_memory() {
    let mut buffer = vec![0.0f32; 4];
    {
        let mut view = ImageViewMut::from_buffer(2, 2, buffer.as_mut_slice()).unwrap();
        view.set_at(1, 1, 5.0).unwrap();
        view.fill_row(0, 1.0).unwrap();
    }
    assert_eq!(buffer, vec![1.0, 1.0, 0.0, 5.0]);

    let view = ImageView::from_buffer(2, 2, buffer.as_slice()).unwrap();
    let alias = view.clone();
    assert!(std::ptr::eq(view.as_slice(), alias.as_slice()));
    let owned = view.to_owned_image();
    assert!(!std::ptr::eq(view.as_slice(), owned.as_slice()));
    assert_eq!(owned.max().unwrap(), 5.0);
}

#[test]
fn uniform_masks_know_their_statistics() {
    let full = Mask::new(4, 3, true);
    assert_eq!(full.surface(), 12);
    assert!(full.is_full());
    assert_eq!(full.bounding_box(), mask_box(0.0, 0.0, 3.0, 2.0));

    let mut blank = Mask::new(4, 3, false);
    assert!(blank.is_blank());
    assert!(blank.bounding_box().is_empty());
    assert_eq!(blank.bounding_box(), BoundingBox::default());
    blank.fill(true);
    assert!(blank.is_full());
    assert_eq!(blank.mean(), 1.0);
    blank.fill(false);
    assert!(blank.bounding_box().is_empty());
}

#[test]
fn blank_box_differs_from_a_single_corner_pixel() {
    let mut m = Mask::new(4, 4, false);
    let blank = m.bounding_box();
    m.set_at(0, 0, true).unwrap();
    let corner = m.bounding_box();
    assert!(!corner.is_empty());
    assert_eq!(corner, mask_box(0.0, 0.0, 0.0, 0.0));
    assert_ne!(blank, corner);

    m.set_at(0, 0, false).unwrap();
    assert_eq!(m.surface(), 0);
    assert!(m.bounding_box().is_empty());

    let wrapped = Mask::from_buffer(2, 2, vec![false; 4]).unwrap();
    assert!(wrapped.bounding_box().is_empty());
}

#[test]
fn mutations_invalidate_cached_statistics() {
    let mut m = Mask::new(5, 4, false);
    assert_eq!(m.surface(), 0);
    m.set_at(1, 2, true).unwrap();
    m.set_at(3, 1, true).unwrap();
    assert_eq!(m.surface(), 2);
    assert_eq!(m.bounding_box(), mask_box(1.0, 1.0, 3.0, 2.0));

    m.fill_row(3, true).unwrap();
    assert_eq!(m.surface(), 7);
    assert_eq!(m.bounding_box(), mask_box(0.0, 1.0, 4.0, 3.0));

    m.fill_column(0, false).unwrap();
    assert_eq!(m.surface(), 6);
    assert_eq!(m.bounding_box().lower.x, 1.0);

    m.pixels_mut()[0] = true;
    assert_eq!(m.surface(), 7);
    assert_eq!(m.bounding_box(), mask_box(0.0, 0.0, 4.0, 3.0));

    m.invert();
    assert_eq!(m.surface(), 13);
    assert!(matches!(m.set(20, true), Err(GeomError::PixelOutOfBounds { .. })));
}

#[test]
fn boolean_operators_require_equal_shapes() {
    let mut a = Mask::from_buffer(2, 2, vec![true, true, false, false]).unwrap();
    let b = Mask::from_buffer(2, 2, vec![true, false, true, false]).unwrap();
    assert_eq!(a.and(&b).unwrap().as_slice(), &[true, false, false, false]);
    assert_eq!(a.or(&b).unwrap().as_slice(), &[true, true, true, false]);
    assert_eq!(a.xor(&b).unwrap().as_slice(), &[false, true, true, false]);
    assert_eq!((!&a).as_slice(), &[false, false, true, true]);

    a.or_assign(&b).unwrap().and_assign(&b).unwrap();
    assert_eq!(a, b);

    let other = Mask::new(2, 3, true);
    assert!(matches!(
        a.and_assign(&other),
        Err(GeomError::SizeMismatch { expected: (2, 2), found: (2, 3), .. })
    ));
    assert!(a.xor(&other).is_err());
}

#[test]
fn mask_half_copy_votes_by_majority() {
    #[rustfmt::skip]
    let m = Mask::from_buffer(4, 2, vec![
        true, false, true, false,
        true, false, false, false,
    ])
    .unwrap();
    let half = m.half_copy();
    assert_eq!((half.width(), half.height()), (2, 1));
    assert_eq!(half.as_slice(), &[true, false]);
    assert_eq!(half.surface(), 1);
}

#[test]
fn mask_resize_and_views() {
    let mut m = Mask::new(2, 2, false);
    m.set(0, true).unwrap();
    m.resize(2, 2, true);
    assert_eq!(m.surface(), 1);
    m.resize(3, 1, true);
    assert_eq!((m.width(), m.height()), (3, 1));
    assert!(m.is_full());

    let mut pixels = vec![false; 6];
    {
        let mut view = MaskViewMut::from_buffer(3, 2, pixels.as_mut_slice()).unwrap();
        view.fill_row(1, true).unwrap();
        assert_eq!(view.surface(), 3);
        view.mirror(false, true);
        assert_eq!(view.bounding_box(), mask_box(0.0, 0.0, 2.0, 0.0));
    }
    assert_eq!(pixels, vec![true, true, true, false, false, false]);

    let view = MaskView::from_buffer(3, 2, pixels.as_slice()).unwrap();
    assert_eq!(view.mean(), 0.5);
    let roi = Mask::from_buffer(3, 2, vec![true, false, false, true, false, false]).unwrap();
    assert_eq!(view.mean_in(&roi).unwrap(), 0.5);
    assert_eq!(view.to_owned_mask(), view.view());
}
