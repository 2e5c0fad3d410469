//! Random simple polygons (radial jitter around the origin) for tests and benches.
//!
//! Model
//! - `n` angles equally spaced on [0, 2π) with bounded angular jitter, sorted, each with
//!   a jittered radius. Sorted angles around the origin give a star-shaped, hence simple,
//!   polygon in the XY plane, counter-clockwise.
//! - Draws are reproducible from a `ReplayToken` `(seed, index)`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::polygon::{Polygon, Polygonal};
use crate::algebra::vector::Point3;
use crate::error::GeomResult;
use crate::trihedron::Trihedron;

/// Vertex count distribution.
#[derive(Clone, Copy, Debug)]
pub enum VertexCount {
    Fixed(usize),
    Uniform { min: usize, max: usize },
}

impl VertexCount {
    fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        match *self {
            VertexCount::Fixed(n) => n.max(3),
            VertexCount::Uniform { min, max } => {
                let lo = min.max(3);
                let hi = max.max(lo);
                rng.gen_range(lo..=hi)
            }
        }
    }
}

/// Star-polygon sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct StarCfg {
    pub vertex_count: VertexCount,
    /// Angular jitter as a fraction of the spacing 2π/n. Clamped to [0, 0.45].
    pub angle_jitter_frac: f64,
    /// Radii are `base_radius * (1 + u)` with `u ∈ [-radial_jitter, radial_jitter]`, clamped to [0, 0.9].
    pub radial_jitter: f64,
    pub base_radius: f64,
}

impl Default for StarCfg {
    fn default() -> Self {
        Self {
            vertex_count: VertexCount::Fixed(12),
            angle_jitter_frac: 0.3,
            radial_jitter: 0.5,
            base_radius: 1.0,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    pub fn new(seed: u64, index: u64) -> Self {
        Self { seed, index }
    }

    fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        StdRng::seed_from_u64(mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15))))
    }
}

/// Draws a star-shaped polygon in the XY plane (z = 0).
pub fn draw_star_polygon(cfg: StarCfg, tok: ReplayToken) -> Polygon {
    let mut rng = tok.to_std_rng();
    let n = cfg.vertex_count.sample(&mut rng);
    let aj = cfg.angle_jitter_frac.clamp(0.0, 0.45);
    let rj = cfg.radial_jitter.clamp(0.0, 0.9);
    let r0 = cfg.base_radius.max(1e-9);
    let delta = std::f64::consts::TAU / n as f64;
    let mut angles: Vec<f64> = (0..n)
        .map(|k| k as f64 * delta + (rng.gen::<f64>() * 2.0 - 1.0) * aj * delta)
        .collect();
    angles.sort_by(|a, b| a.total_cmp(b));
    angles
        .into_iter()
        .map(|th| {
            let r = r0 * (1.0 + (rng.gen::<f64>() * 2.0 - 1.0) * rj);
            Point3::new(th.cos() * r, th.sin() * r, 0.0)
        })
        .collect()
}

/// Maps a polygon given in `frame` coordinates to absolute coordinates.
pub fn embed(poly: &Polygon, frame: &Trihedron) -> GeomResult<Polygon> {
    let world = Trihedron::IDENTITY;
    poly.vertices()
        .iter()
        .map(|p| frame.xform_to(&world, p))
        .collect::<GeomResult<Vec<_>>>()
        .map(Polygon::new)
}
