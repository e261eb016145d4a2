//! Procedural point clouds for each lifecycle stage.
//!
//! Every stage is split by index fraction into a structural part (stem or trunk) and a crown part
//! (leaves or branches). Shapes are fixed, individual points are random within the shape.

use cgmath::{Rad, Vector3};
use rand::Rng;
use std::f32::consts::PI;

use super::point::{Point, PointSet};
use super::stage::Stage;

/// Point count used when nothing else is configured
pub const DEFAULT_POINT_COUNT: usize = 2000;

/// Generates the point set for a stage using the supplied random source
pub fn generate<R: Rng + ?Sized>(stage: Stage, count: usize, rng: &mut R) -> PointSet {
    let mut set = PointSet::with_capacity(count);
    for i in 0..count {
        // position along the index range decides which part of the plant the point belongs to
        let t = i as f32 / count as f32;
        let loc = match stage {
            Stage::Seed => seed_point(rng),
            Stage::Sprout => sprout_point(t, rng),
            Stage::Growth => growth_point(t, rng),
            Stage::Mature => mature_point(t, rng),
        };
        let color = palette(stage, rng);
        set.push(Point::new(loc.into(), color));
    }
    set
}

/// Generates all four stages in order, each with `count` points
pub fn generate_all<R: Rng + ?Sized>(count: usize, rng: &mut R) -> [PointSet; 4] {
    Stage::ALL.map(|stage| generate(stage, count, &mut *rng))
}

/// Point on a horizontal circle of `radius` at height `y`
fn ring(angle: Rad<f32>, radius: f32, y: f32) -> Vector3<f32> {
    Vector3::new(radius * angle.0.cos(), y, radius * angle.0.sin())
}

fn random_angle<R: Rng + ?Sized>(rng: &mut R) -> Rad<f32> {
    Rad(rng.gen::<f32>() * PI * 2.0)
}

/// Value in `[-half_width, half_width)`
fn jitter<R: Rng + ?Sized>(rng: &mut R, half_width: f32) -> f32 {
    (rng.gen::<f32>() - 0.5) * 2.0 * half_width
}

// compact ball
fn seed_point<R: Rng + ?Sized>(rng: &mut R) -> Vector3<f32> {
    let phi = rng.gen::<f32>() * PI * 2.0;
    let theta = rng.gen::<f32>() * PI;
    let radius = rng.gen::<f32>() * 0.3;
    Vector3::new(
        radius * theta.sin() * phi.cos(),
        radius * theta.sin() * phi.sin(),
        radius * theta.cos(),
    )
}

fn sprout_point<R: Rng + ?Sized>(t: f32, rng: &mut R) -> Vector3<f32> {
    if t < 0.6 {
        // stem
        let x = jitter(rng, 0.05);
        let y = rng.gen::<f32>() * 0.8 - 0.2;
        let z = jitter(rng, 0.05);
        Vector3::new(x, y, z)
    } else {
        // small leaves
        let angle = random_angle(rng);
        let radius = rng.gen::<f32>() * 0.3;
        let y = 0.3 + rng.gen::<f32>() * 0.2;
        ring(angle, radius, y)
    }
}

fn growth_point<R: Rng + ?Sized>(t: f32, rng: &mut R) -> Vector3<f32> {
    if t < 0.3 {
        // main stem
        let x = jitter(rng, 0.075);
        let y = rng.gen::<f32>() * 1.2 - 0.3;
        let z = jitter(rng, 0.075);
        Vector3::new(x, y, z)
    } else {
        // leaves and branches
        let angle = random_angle(rng);
        let radius = rng.gen::<f32>() * 0.8;
        let y = rng.gen::<f32>() * 0.6 + 0.2;
        ring(angle, radius, y)
    }
}

fn mature_point<R: Rng + ?Sized>(t: f32, rng: &mut R) -> Vector3<f32> {
    if t < 0.2 {
        // trunk
        let angle = random_angle(rng);
        let radius = rng.gen::<f32>() * 0.2;
        let y = rng.gen::<f32>() * 0.8 - 0.4;
        ring(angle, radius, y)
    } else {
        // crown, pushed outwards by a small sub-branch offset
        let angle = random_angle(rng);
        let branch_radius = rng.gen::<f32>() * 1.2;
        let y = rng.gen::<f32>() * 1.0 + 0.2;
        let sub_branch = rng.gen::<f32>() * 0.3;
        ring(angle, branch_radius + sub_branch, y)
    }
}

/// Per-point color: a stage base plus a bounded random offset on each channel
fn palette<R: Rng + ?Sized>(stage: Stage, rng: &mut R) -> [f32; 3] {
    // (base, spread) per channel
    let channels: [(f32, f32); 3] = match stage {
        Stage::Seed => [(0.5, 0.3), (0.3, 0.2), (0.1, 0.1)],
        Stage::Sprout => [(0.3, 0.3), (0.7, 0.3), (0.3, 0.3)],
        Stage::Growth => [(0.2, 0.3), (0.6, 0.4), (0.2, 0.3)],
        Stage::Mature => [(0.1, 0.4), (0.5, 0.5), (0.1, 0.4)],
    };
    channels.map(|(base, spread)| (base + rng.gen::<f32>() * spread).min(1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::InnerSpace;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn horizontal_radius(p: &Point) -> f32 {
        (p.loc[0] * p.loc[0] + p.loc[2] * p.loc[2]).sqrt()
    }

    #[test]
    fn every_stage_has_exact_count_and_finite_points() {
        let mut rng = StdRng::seed_from_u64(7);
        for stage in Stage::ALL {
            for count in [0, 1, 3, 2000] {
                let set = generate(stage, count, &mut rng);
                assert_eq!(set.len(), count, "{:?} with {}", stage, count);
                for p in &set {
                    assert!(p.is_finite());
                    assert!(p.color.iter().all(|c| (0.0..=1.0).contains(c)));
                }
            }
        }
    }

    #[test]
    fn same_seed_gives_same_clouds() {
        let a = generate_all(500, &mut StdRng::seed_from_u64(42));
        let b = generate_all(500, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);

        let c = generate_all(500, &mut StdRng::seed_from_u64(43));
        assert_ne!(a, c);
    }

    #[test]
    fn seed_fits_in_small_ball() {
        let set = generate(Stage::Seed, 2000, &mut StdRng::seed_from_u64(1));
        for p in &set {
            assert!(p.position().magnitude2() <= 0.3 * 0.3 + 1e-5);
        }
    }

    #[test]
    fn sprout_has_stem_then_leaves() {
        let set = generate(Stage::Sprout, 1000, &mut StdRng::seed_from_u64(2));
        let (stem, leaves) = set.points().split_at(600);
        for p in stem {
            assert!(p.loc[0].abs() <= 0.05 && p.loc[2].abs() <= 0.05);
            assert!(p.loc[1] >= -0.2 && p.loc[1] < 0.6 + 1e-6);
        }
        for p in leaves {
            assert!(horizontal_radius(p) < 0.3 + 1e-5);
            assert!(p.loc[1] >= 0.3 && p.loc[1] <= 0.5 + 1e-6);
        }
    }

    #[test]
    fn growth_canopy_is_wider_than_stem() {
        let set = generate(Stage::Growth, 1000, &mut StdRng::seed_from_u64(3));
        let (stem, canopy) = set.points().split_at(300);
        for p in stem {
            assert!(p.loc[0].abs() <= 0.075 && p.loc[2].abs() <= 0.075);
            assert!(p.loc[1] >= -0.3 && p.loc[1] <= 0.9 + 1e-6);
        }
        for p in canopy {
            assert!(horizontal_radius(p) < 0.8 + 1e-5);
            assert!(p.loc[1] >= 0.2 && p.loc[1] <= 0.8 + 1e-6);
        }
        let widest = canopy.iter().map(horizontal_radius).fold(0.0, f32::max);
        assert!(widest > 0.5);
    }

    #[test]
    fn mature_trunk_and_crown_bounds() {
        let set = generate(Stage::Mature, 1000, &mut StdRng::seed_from_u64(4));
        let (trunk, crown) = set.points().split_at(200);
        for p in trunk {
            assert!(horizontal_radius(p) < 0.2 + 1e-5);
            assert!(p.loc[1] >= -0.4 && p.loc[1] <= 0.4 + 1e-6);
        }
        for p in crown {
            assert!(horizontal_radius(p) < 1.5 + 1e-5);
            assert!(p.loc[1] >= 0.2 && p.loc[1] <= 1.2 + 1e-6);
        }
    }

    #[test]
    fn palettes_stay_in_their_bands() {
        // (lo, hi) per channel, r g b
        let bands: [(Stage, [(f32, f32); 3]); 4] = [
            (Stage::Seed, [(0.5, 0.8), (0.3, 0.5), (0.1, 0.2)]),
            (Stage::Sprout, [(0.3, 0.6), (0.7, 1.0), (0.3, 0.6)]),
            (Stage::Growth, [(0.2, 0.5), (0.6, 1.0), (0.2, 0.5)]),
            (Stage::Mature, [(0.1, 0.5), (0.5, 1.0), (0.1, 0.5)]),
        ];
        let mut rng = StdRng::seed_from_u64(5);
        for (stage, channels) in bands {
            for p in &generate(stage, 500, &mut rng) {
                for (c, &(lo, hi)) in channels.iter().enumerate() {
                    assert!(
                        p.color[c] >= lo - 1e-6 && p.color[c] <= hi + 1e-6,
                        "{:?} channel {} = {} outside [{}, {}]",
                        stage,
                        c,
                        p.color[c],
                        lo,
                        hi
                    );
                }
            }
        }
    }
}
