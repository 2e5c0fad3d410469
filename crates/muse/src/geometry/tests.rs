use super::rand::{draw_star_polygon, embed, ReplayToken, StarCfg, VertexCount};
use super::*;
use crate::algebra::fixed::rotation3;
use crate::algebra::vector::{Point3, Point4, Vec3, Vec3Ext, VectorExt};
use crate::cfg::EPSILON;
use crate::error::GeomError;
use crate::trihedron::Trihedron;

fn p(x: f64, y: f64, z: f64) -> Point3 {
    Point3::new(x, y, z)
}

fn unit_square() -> Polygon {
    Polygon::new(vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(1.0, 1.0, 0.0), p(0.0, 1.0, 0.0)])
}

fn close(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() < tol
}

#[test]
fn unit_square_measures() {
    let sq = unit_square();
    assert!(close(sq.area(), 1.0, 1e-12));
    assert!(close(sq.perimeter(), 4.0, 1e-12));
    assert_eq!(sq.len(), 4);
    assert!(matches!(sq.vertex(4), Err(GeomError::IndexOutOfBounds { .. })));
    let g = sq.gravity_center().unwrap();
    assert!(g.is_close(&p(0.5, 0.5, 0.0), 1e-12));
    assert!(sq.bounding_box_center().is_close(&p(0.5, 0.5, 0.0), 1e-12));
}

#[test]
fn fewer_than_three_vertices_measure_nothing() {
    let seg = Polygon::new(vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0)]);
    assert_eq!(seg.area(), 0.0);
    assert_eq!(seg.perimeter(), 0.0);
    assert!(!seg.contains(&p(0.5, 0.0, 0.0)));
    assert!(seg.triangulate().is_empty());
}

#[test]
fn square_containment_includes_the_boundary() {
    let sq = unit_square();
    assert!(sq.contains(&p(0.5, 0.5, 0.0)));
    assert!(!sq.contains(&p(1.5, 0.5, 0.0)));
    assert!(sq.contains(&p(1.0, 0.5, 0.0)));
    assert!(sq.contains(&p(0.0, 0.0, 0.0)));
    // off the supporting plane
    assert!(!sq.contains(&p(0.5, 0.5, 0.1)));
}

#[test]
fn segment_containment_samples_along_the_segment() {
    let sq = unit_square();
    assert!(sq.contains_segment(&Segment::new(p(0.1, 0.1, 0.0), p(0.9, 0.9, 0.0))));
    assert!(!sq.contains_segment(&Segment::new(p(0.5, 0.5, 0.0), p(1.5, 0.5, 0.0))));
}

#[test]
fn concave_polygon_containment() {
    // U shape opening upwards
    let u = Polygon::new(vec![
        p(0.0, 0.0, 0.0),
        p(3.0, 0.0, 0.0),
        p(3.0, 3.0, 0.0),
        p(2.0, 3.0, 0.0),
        p(2.0, 1.0, 0.0),
        p(1.0, 1.0, 0.0),
        p(1.0, 3.0, 0.0),
        p(0.0, 3.0, 0.0),
    ]);
    assert!(close(u.area(), 7.0, 1e-12));
    assert!(u.contains(&p(0.5, 2.5, 0.0)));
    assert!(u.contains(&p(2.5, 2.5, 0.0)));
    assert!(!u.contains(&p(1.5, 2.0, 0.0)));
    assert!(!u.contains_segment(&Segment::new(p(0.5, 2.5, 0.0), p(2.5, 2.5, 0.0))));

    let tris = u.triangulate();
    assert_eq!(tris.len(), 6);
    let sum: f64 = tris.iter().map(|t| t.area()).sum();
    assert!(close(sum, 7.0, 1e-9));
    let g = u.gravity_center().unwrap();
    assert!(g.is_close(&p(1.5, 9.5 / 7.0, 0.0), 1e-9));
}

#[test]
fn square_triangulates_into_two_triangles() {
    let tris = unit_square().triangulate();
    assert_eq!(tris.len(), 2);
    let sum: f64 = tris.iter().map(|t| t.area()).sum();
    assert!(close(sum, 1.0, 1e-12));
}

#[test]
fn closing_duplicate_is_ignored_by_triangulation() {
    let mut sq = unit_square();
    sq.push(p(0.0, 0.0, 0.0));
    assert_eq!(sq.triangulate().len(), 2);
}

#[test]
fn self_crossing_outline_stops_without_ears() {
    let bowtie = [p(0.0, 0.0, 0.0), p(2.0, 2.0, 0.0), p(2.0, 0.0, 0.0), p(0.0, 2.0, 0.0)];
    assert!(polygon::area_vector(&bowtie).is_null(EPSILON));
    assert!(triangulate(&bowtie).is_empty());
}

#[test]
fn star_polygons_triangulate_into_n_minus_two_triangles() {
    let cfg = StarCfg {
        vertex_count: VertexCount::Uniform { min: 5, max: 24 },
        ..StarCfg::default()
    };
    for index in 0..12 {
        let poly = draw_star_polygon(cfg, ReplayToken::new(42, index));
        let tris = poly.triangulate();
        assert_eq!(tris.len(), poly.len() - 2, "draw {index}");
        let sum: f64 = tris.iter().map(|t| t.area()).sum();
        assert!(close(sum, poly.area(), 1e-9), "draw {index}: {sum} vs {}", poly.area());
        for t in &tris {
            assert!(poly.contains(&t.centroid()), "draw {index}");
        }
    }
}

#[test]
fn star_draws_are_reproducible_and_counter_clockwise() {
    let cfg = StarCfg::default();
    let a = draw_star_polygon(cfg, ReplayToken::new(3, 9));
    let b = draw_star_polygon(cfg, ReplayToken::new(3, 9));
    assert_eq!(a.vertices(), b.vertices());
    assert_eq!(a.len(), 12);
    assert!(polygon::area_vector(a.vertices()).z > 0.0);
    let c = draw_star_polygon(cfg, ReplayToken::new(3, 10));
    assert_ne!(a.vertices(), c.vertices());
}

#[test]
fn tilted_polygon_containment() {
    let r = rotation3(0.7, &Vec3::new(1.0, 2.0, -0.5).normalize());
    let frame = Trihedron::new(
        p(3.0, -1.0, 2.0),
        r.column(0).into_owned(),
        r.column(1).into_owned(),
        r.column(2).into_owned(),
    )
    .unwrap();
    let local = draw_star_polygon(StarCfg::default(), ReplayToken::new(11, 0));
    let world = embed(&local, &frame).unwrap();
    let to_world = |q: Point3| frame.xform_to(&Trihedron::IDENTITY, &q).unwrap();

    assert!(close(world.area(), local.area(), 1e-9));
    assert!(world.contains(&to_world(p(0.0, 0.0, 0.0))));
    assert!(!world.contains(&to_world(p(0.0, 0.0, 0.5))));
    assert!(!world.contains(&to_world(p(10.0, 0.0, 0.0))));
    let n = world.normal().unwrap();
    assert!(n.is_collinear(&frame.z_axis(), 1e-9));
}

#[test]
fn polygon_equality_ignores_start_direction_and_pass_through_vertices() {
    let sq = unit_square();
    let rotated = Polygon::new(vec![
        p(1.0, 1.0, 0.0),
        p(0.0, 1.0, 0.0),
        p(0.0, 0.0, 0.0),
        p(1.0, 0.0, 0.0),
    ]);
    assert_eq!(sq, rotated);
    let mut reversed = sq.clone();
    reversed.reverse();
    assert_eq!(sq, reversed);
    let mut with_midpoint = sq.clone();
    with_midpoint.add_vertex(p(1.0, 0.5, 0.0), 2);
    assert_eq!(with_midpoint.len(), 5);
    assert_eq!(sq, with_midpoint);
    assert!(sq.is_close_to(&with_midpoint, 1e-9));

    let bigger = Polygon::new(vec![
        p(0.0, 0.0, 0.0),
        p(2.0, 0.0, 0.0),
        p(2.0, 2.0, 0.0),
        p(0.0, 2.0, 0.0),
    ]);
    assert_ne!(sq, bigger);
    let tri = Polygon::new(vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(1.0, 1.0, 0.0)]);
    assert_ne!(sq, tri);
    let expected = Triangle::new(p(1.0, 1.0, 0.0), p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0));
    assert_eq!(tri, Polygon::from(expected));
}

#[test]
fn vertex_editing() {
    let mut poly = unit_square();
    poly.add_vertex(p(9.0, 9.0, 0.0), 100);
    assert_eq!(poly.vertex(4).unwrap(), p(9.0, 9.0, 0.0));
    assert!(poly.replace_vertex(&p(9.0, 9.0, 0.0), p(8.0, 8.0, 0.0), EPSILON));
    assert!(!poly.replace_vertex(&p(9.0, 9.0, 0.0), p(7.0, 7.0, 0.0), EPSILON));
    assert!(poly.delete_point(&p(8.0, 8.0, 0.0), EPSILON));
    assert!(!poly.delete_point(&p(8.0, 8.0, 0.0), EPSILON));
    assert_eq!(poly.delete_vertex(0), Some(p(0.0, 0.0, 0.0)));
    assert_eq!(poly.delete_vertex(10), None);
    *poly.vertex_mut(0).unwrap() = p(5.0, 0.0, 0.0);
    assert!(poly.vertex_mut(3).is_err());
    assert_eq!(poly.index_of(&p(5.0, 0.0, 0.0), EPSILON), Some(0));
    poly.resize(5);
    assert_eq!(poly.vertex(4).unwrap(), Point3::zeros());
    poly.clear();
    assert!(poly.is_empty());
    assert_eq!(Polygon::with_len(3).len(), 3);
}

#[test]
fn polygon_plane_cut_and_normals() {
    let sq = unit_square();
    let cut = sq.plane_intersection(&Plane::new(&Vec3::x(), &p(0.5, 0.0, 0.0)).unwrap());
    assert_eq!(cut.len(), 2);
    assert!(cut[0].is_close(&p(0.5, 0.0, 0.0), 1e-12));
    assert!(cut[1].is_close(&p(0.5, 1.0, 0.0), 1e-12));
    // an edge lying in the plane contributes its endpoints once each
    let along = sq.plane_intersection(&Plane::new(&Vec3::x(), &p(0.0, 0.0, 0.0)).unwrap());
    assert_eq!(along.len(), 2);

    assert!(sq.lies_in(&Plane::new(&Vec3::z(), &Point3::zeros()).unwrap(), EPSILON));
    assert_eq!(sq.normal().unwrap(), Vec3::z());
    assert_eq!(sq.oriented_normal().unwrap(), Vec3::z());
    let mut rev = sq.clone();
    rev.reverse();
    assert_eq!(rev.normal().unwrap(), Vec3::z());
    assert_eq!(rev.oriented_normal().unwrap(), -Vec3::z());

    let warped = Polygon::new(vec![
        p(0.0, 0.0, 0.0),
        p(1.0, 0.0, 0.0),
        p(1.0, 1.0, 1.0),
        p(0.0, 1.0, 0.0),
    ]);
    assert!(warped.normal().is_none());
    let flat = Polygon::new(vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(2.0, 0.0, 0.0)]);
    assert!(flat.normal().is_none());
    assert!(matches!(flat.gravity_center(), Err(GeomError::DivideByZero { .. })));
}

#[test]
fn bounding_rectangle_follows_the_first_edge() {
    let rect = Polygon::new(vec![
        p(0.0, 0.0, 0.0),
        p(2.0, 0.0, 0.0),
        p(2.0, 1.0, 0.0),
        p(0.0, 1.0, 0.0),
    ]);
    let br = rect.bounding_rectangle().unwrap();
    assert_eq!(br.u, Vec3::x());
    assert_eq!(br.v, Vec3::y());
    assert_eq!(br.bbox, BoundingBox::from_corners(&p(0.0, 0.0, 0.0), &p(2.0, 1.0, 0.0)));
    assert!(rect.gravity_center().unwrap().is_close(&p(1.0, 0.5, 0.0), 1e-12));
    assert!(Polygon::new(vec![p(0.0, 0.0, 0.0)]).bounding_rectangle().is_none());
}

#[test]
fn ellipse_vertices_lie_on_the_inscribed_ellipse() {
    let bounds = EllipseBox {
        upper_left: p(-2.0, 1.0, 0.0),
        upper_right: p(2.0, 1.0, 0.0),
        lower_left: p(-2.0, -1.0, 0.0),
        lower_right: p(2.0, -1.0, 0.0),
    };
    let e = Polygon::ellipse(&bounds, 64).unwrap();
    assert_eq!(e.len(), 64);
    for v in e.vertices() {
        assert!(close(v.x * v.x / 4.0 + v.y * v.y, 1.0, 1e-9));
        assert!(close(v.z, 0.0, 1e-12));
    }
    let expected = std::f64::consts::PI * 2.0;
    assert!((e.area() - expected).abs() / expected < 0.01);

    let flat = EllipseBox {
        upper_left: p(0.0, 0.0, 0.0),
        upper_right: p(1.0, 0.0, 0.0),
        lower_left: p(0.0, 0.0, 0.0),
        lower_right: p(1.0, 0.0, 0.0),
    };
    assert!(Polygon::ellipse(&flat, 16).unwrap().is_empty());
}

#[test]
fn triangle_queries() {
    let t = Triangle::new(p(0.0, 0.0, 0.0), p(3.0, 0.0, 0.0), p(0.0, 4.0, 0.0));
    assert_eq!(t.area(), 6.0);
    assert!(close(t.perimeter(), 12.0, 1e-12));
    assert_eq!(t.gravity_center().unwrap(), t.centroid());

    let right = Triangle::new(p(0.0, 0.0, 0.0), p(2.0, 0.0, 0.0), p(0.0, 2.0, 0.0));
    assert!(right.circumcenter().unwrap().is_close(&p(1.0, 1.0, 0.0), 1e-12));
    let flat = Triangle::new(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(2.0, 0.0, 0.0));
    assert!(flat.circumcenter().is_none());
    assert!(flat.plane().is_err());
    assert_eq!(right.plane().unwrap(), Plane::new(&Vec3::z(), &Point3::zeros()).unwrap());
}

#[test]
fn triangle_pierced_by_a_line() {
    let t = Triangle::new(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0));
    let inside = Line::new(p(0.25, 0.25, -1.0), Vec3::z()).unwrap();
    assert!(t.line_intersection(&inside, EPSILON).unwrap().is_close(&p(0.25, 0.25, 0.0), 1e-12));
    let outside = Line::new(p(1.0, 1.0, -1.0), Vec3::z()).unwrap();
    assert!(t.line_intersection(&outside, EPSILON).is_none());
    let grazing = Line::new(p(0.0, 0.0, 1.0), Vec3::x()).unwrap();
    assert!(t.line_intersection(&grazing, EPSILON).is_none());

    // a flat triangle falls back to its edges, all three of them
    let flat = Triangle::new(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(2.0, 0.0, 0.0));
    let cross = Line::new(p(1.5, -1.0, 0.0), Vec3::y()).unwrap();
    assert!(flat.line_intersection(&cross, EPSILON).unwrap().is_close(&p(1.5, 0.0, 0.0), 1e-12));
}

#[test]
fn triangle_plane_cuts() {
    let t = Triangle::new(p(0.0, 0.0, -1.0), p(1.0, 0.0, 1.0), p(-1.0, 0.0, 1.0));
    let z0 = Plane::new(&Vec3::z(), &Point3::zeros()).unwrap();
    assert_eq!(t.plane_cut(&z0, EPSILON), PlaneCut::Segment(p(0.5, 0.0, 0.0), p(-0.5, 0.0, 0.0)));
    let far = Plane::new(&Vec3::z(), &p(0.0, 0.0, 5.0)).unwrap();
    assert_eq!(t.plane_cut(&far, EPSILON), PlaneCut::Touch(vec![]));
    let flat = Triangle::new(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0));
    assert!(matches!(flat.plane_cut(&z0, EPSILON), PlaneCut::Coplanar(_)));
}

#[test]
fn line_intersections_and_distances() {
    let x_axis = Line::default();
    let vertical = Line::new(p(1.0, -1.0, 0.0), Vec3::y()).unwrap();
    assert!(x_axis.intersection(&vertical, EPSILON).unwrap().is_close(&p(1.0, 0.0, 0.0), 1e-12));
    let parallel = Line::new(p(0.0, 1.0, 0.0), Vec3::x()).unwrap();
    assert!(x_axis.intersection(&parallel, EPSILON).is_none());
    assert!(close(x_axis.distance_to_line(&parallel), 1.0, 1e-12));

    let skew = Line::new(p(1.0, -1.0, 2.0), Vec3::y()).unwrap();
    assert!(x_axis.intersection(&skew, EPSILON).is_none());
    let perp = x_axis.perpendicular_segment(&skew);
    assert!(perp.from().is_close(&p(1.0, 0.0, 0.0), 1e-12));
    assert!(perp.to().is_close(&p(1.0, 0.0, 2.0), 1e-12));
    assert!(close(x_axis.distance_to_line(&skew), 2.0, 1e-12));

    assert!(Line::new(Point3::zeros(), Vec3::zeros()).is_err());
    assert!(x_axis.contains(&p(-7.0, 0.0, 0.0), EPSILON));
    let through = Line::through(&p(3.0, 0.0, 0.0), &p(1.0, 0.0, 0.0)).unwrap();
    assert!(x_axis.is_equivalent(&through, EPSILON));
    assert!(close(x_axis.distance_to_point(&p(4.0, 3.0, 4.0)), 5.0, 1e-12));
    let beside = Segment::new(p(5.0, 1.0, 0.0), p(5.0, 3.0, 0.0));
    assert!(close(x_axis.distance_to_segment(&beside), 1.0, 1e-12));
    let above = Segment::new(p(0.0, -1.0, 2.0), p(0.0, 1.0, 2.0));
    assert!(close(x_axis.distance_to_segment(&above), 2.0, 1e-12));
}

#[test]
fn segment_queries() {
    let s = Segment::new(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0));
    assert!(s.includes(&p(0.5, 0.0, 0.0), EPSILON));
    assert!(!s.includes(&p(1.5, 0.0, 0.0), EPSILON));
    assert!(close(s.distance_to_point(&p(2.0, 1.0, 0.0)), 2f64.sqrt(), 1e-12));
    assert!(close(s.distance_to_point_ext(&p(2.0, 1.0, 0.0)), 1.0, 1e-12));
    assert_eq!(Segment::new(p(1.0, 1.0, 1.0), p(1.0, 1.0, 1.0)).index(&p(5.0, 0.0, 0.0)), 0.0);
    assert!(s.is_equivalent(&s.reversed(), EPSILON));
    assert_eq!(s.to_string(), "[0 0 0, 1 0 0]");

    let other = Segment::new(p(3.0, 2.0, 0.0), p(3.0, 5.0, 0.0));
    assert!(close(s.distance_to_segment(&other), 8f64.sqrt(), 1e-12));
    assert!(close(s.distance_to_segment_ext(&other), 0.0, 1e-12));

    let (t1, t2) = Segment::new(p(0.0, 0.0, 0.0), p(2.0, 0.0, 0.0))
        .intersection_idx(&Segment::new(p(1.0, -1.0, 0.0), p(1.0, 1.0, 0.0)))
        .unwrap();
    assert!(close(t1, 0.5, 1e-12) && close(t2, 0.5, 1e-12));
    assert!(s.intersection_idx(&Segment::new(p(0.0, 1.0, 0.0), p(1.0, 1.0, 0.0))).is_err());

    assert!(s.is_parallel(&Segment::new(p(0.0, 1.0, 0.0), p(-3.0, 1.0, 0.0))));
    assert!(s.is_aligned(&Segment::new(p(4.0, 0.0, 0.0), p(-3.0, 0.0, 0.0))));
    assert!(s.is_coplanar(&other));
    assert!(!s.is_coplanar(&Segment::new(p(0.0, 1.0, 1.0), p(0.0, 2.0, 3.0))));

    let on_line = s.line_intersection(&Line::new(p(0.25, 3.0, 0.0), Vec3::y()).unwrap(), EPSILON);
    assert!(on_line.unwrap().is_close(&p(0.25, 0.0, 0.0), 1e-12));
    let off_end = Line::new(p(2.0, 3.0, 0.0), Vec3::y()).unwrap();
    assert!(s.line_intersection(&off_end, EPSILON).is_none());

    let bisector = s.perpendicular_bisector(&Vec3::z()).unwrap();
    assert!(bisector.contains(&p(0.5, 4.0, 0.0), EPSILON));
    assert!(s.perpendicular_bisector(&Vec3::x()).is_err());
}

#[test]
fn segment_meets_plane() {
    let z0 = Plane::new(&Vec3::z(), &Point3::zeros()).unwrap();
    let crossing = Segment::new(p(1.0, 1.0, -1.0), p(1.0, 1.0, 3.0));
    assert!(crossing.intersects(&z0));
    assert!(crossing.plane_intersection(&z0).unwrap().is_close(&p(1.0, 1.0, 0.0), 1e-12));
    assert!(close(crossing.plane_index(&z0).unwrap(), 0.25, 1e-12));

    let above = Segment::new(p(0.0, 0.0, 1.0), p(0.0, 0.0, 2.0));
    assert!(!above.intersects(&z0));
    assert!(above.plane_intersection(&z0).is_none());
    assert!(close(above.plane_index(&z0).unwrap(), -1.0, 1e-12));

    let touching = Segment::new(p(2.0, 0.0, 0.0), p(2.0, 0.0, 1.0));
    assert_eq!(touching.plane_intersection(&z0), Some(p(2.0, 0.0, 0.0)));

    let flat = Segment::new(p(0.0, 0.0, 1.0), p(5.0, 0.0, 1.0));
    assert!(flat.is_parallel_to_plane(&z0));
    assert!(matches!(flat.plane_index(&z0), Err(GeomError::DivideByZero { .. })));
    assert!(Segment::new(p(0.0, 0.0, 0.0), p(5.0, 2.0, 0.0)).lies_in(&z0, EPSILON));
}

#[test]
fn planes_are_canonical() {
    let up = Plane::new(&Vec3::new(0.0, 0.0, -2.0), &p(0.0, 0.0, 1.0)).unwrap();
    assert_eq!(up.normal(), Vec3::z());
    assert_eq!(up.affine_component(), -1.0);
    assert_eq!(
        Plane::new(&Vec3::new(-1.0, 0.0, 0.0), &p(3.0, 0.0, 0.0)).unwrap(),
        Plane::new(&Vec3::x(), &p(3.0, 5.0, 7.0)).unwrap()
    );
    assert_eq!(Plane::new(&Vec3::x(), &p(3.0, 5.0, 7.0)).unwrap().to_string(), "[1, 0, 0, -3]");
    assert!(Plane::new(&Vec3::zeros(), &Point3::zeros()).is_err());
    assert!(Plane::through(&p(0.0, 0.0, 0.0), &p(1.0, 1.0, 1.0), &p(2.0, 2.0, 2.0)).is_err());
    let through = Plane::through(&p(0.0, 0.0, 2.0), &p(1.0, 0.0, 2.0), &p(0.0, 1.0, 2.0)).unwrap();
    assert_eq!(through, Plane::new(&Vec3::z(), &p(9.0, 9.0, 2.0)).unwrap());
    assert!(through.includes(&through.any_point(), EPSILON));
}

#[test]
fn plane_queries() {
    let z0 = Plane::new(&Vec3::z(), &Point3::zeros()).unwrap();
    let x0 = Plane::new(&Vec3::x(), &Point3::zeros()).unwrap();
    assert_eq!(z0.projection(&p(1.0, 2.0, 3.0)), p(1.0, 2.0, 0.0));
    assert!(close(z0.distance_signed(&p(1.0, 2.0, -3.0)), -3.0, 1e-12));
    assert!(close(z0.angle(&x0), std::f64::consts::FRAC_PI_2, 1e-12));
    assert!(close(z0.angle(&z0), 0.0, 1e-12));

    let meet = z0.intersection(&x0).unwrap();
    assert!(meet.direction().is_collinear(&Vec3::y(), 1e-12));
    assert!(meet.contains(&p(0.0, 5.0, 0.0), EPSILON));
    let z1 = Plane::new(&Vec3::z(), &p(0.0, 0.0, 1.0)).unwrap();
    assert!(z0.intersection(&z1).is_none());
    assert!(z0.is_parallel(&z1));

    let diagonal = Line::new(Point3::zeros(), Vec3::new(1.0, 1.0, 1.0)).unwrap();
    assert!(z1.line_intersection(&diagonal).unwrap().is_close(&p(1.0, 1.0, 1.0), 1e-12));
    assert!(z1.line_intersection(&Line::default()).is_none());

    let along = z0.projection_along(&p(1.0, 1.0, 2.0), &Vec3::new(1.0, 0.0, -1.0)).unwrap();
    assert!(along.is_close(&p(3.0, 1.0, 0.0), 1e-12));
    assert!(z0.projection_along(&p(1.0, 1.0, 2.0), &Vec3::x()).is_err());

    let cube = BoundingBox::from_corners(&Point3::zeros(), &p(1.0, 1.0, 1.0));
    assert!(Plane::new(&Vec3::x(), &p(0.5, 0.0, 0.0)).unwrap().intersects_box(&cube));
    assert!(!Plane::new(&Vec3::x(), &p(2.0, 0.0, 0.0)).unwrap().intersects_box(&cube));
    assert!(!z0.separate(&[]));
}

#[test]
fn bounding_boxes() {
    let empty = BoundingBox::default();
    assert!(empty.is_empty());
    let pts = [p(1.0, -2.0, 0.0), p(-1.0, 3.0, 2.0), p(0.0, 0.0, -1.0)];
    let b = BoundingBox::from_points(&pts);
    assert_eq!(b.lower3(), p(-1.0, -2.0, -1.0));
    assert_eq!(b.upper3(), p(1.0, 3.0, 2.0));
    assert_eq!(b.center(), p(0.0, 0.5, 0.5));
    assert!(b.contains(&Point4::new(0.0, 0.0, 0.0, 0.0)));
    assert!(!b.contains(&Point4::new(0.0, 0.0, 0.0, 1.0)));
    assert!(BoundingBox::from_points(&[]).is_empty());

    let other = BoundingBox::from_corners(&p(5.0, 5.0, 5.0), &p(6.0, 6.0, 6.0));
    assert!(b.intersection(&other).is_empty());
    let u = b.union(&other);
    assert_eq!(u.upper3(), p(6.0, 6.0, 6.0));
    assert_eq!(u.lower3(), p(-1.0, -2.0, -1.0));
    assert_eq!(b.intersection(&u), b);
}
