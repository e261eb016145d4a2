//! Linear morphing between the lifecycle stage clouds.
//!
//! The morph parameter `p` runs from 0 (seed) to [`Stage::LAST_INDEX`] (mature). Its integer part
//! picks the source stage and its fractional part is the blend weight towards the next stage.
//! Only positions are blended. Colors always come from the source stage, so they jump when the
//! source stage changes.

use rand::Rng;

use super::error::{Error, Result};
use super::generate;
use super::point::{Point, PointSet};
use super::stage::Stage;

/// Result of morphing for one value of the stage parameter
#[derive(Clone, Debug, PartialEq)]
pub struct MorphState {
    pub source: Stage,
    pub next: Stage,
    /// Fractional progress from `source` to `next`, in `[0, 1)`
    pub blend: f32,
    /// Blended positions carrying the source stage colors
    pub points: PointSet,
}

/// Owns the four immutable stage clouds and produces blended point sets from them
#[derive(Clone, Debug)]
pub struct LifecycleMorpher {
    stages: [PointSet; 4],
}

impl LifecycleMorpher {
    /// Generates all four stages with `count` points each
    pub fn generate<R: Rng + ?Sized>(count: usize, rng: &mut R) -> LifecycleMorpher {
        LifecycleMorpher {
            stages: generate::generate_all(count, rng),
        }
    }

    /// Builds a morpher from existing clouds, which must all have the same length
    pub fn from_stages(stages: [PointSet; 4]) -> Result<LifecycleMorpher> {
        let expected = stages[0].len();
        for stage in Stage::ALL {
            let found = stages[stage.index()].len();
            if found != expected {
                return Err(Error::PointCountMismatch {
                    stage: stage.name(),
                    expected,
                    found,
                });
            }
        }
        Ok(LifecycleMorpher { stages })
    }

    pub fn stage(&self, stage: Stage) -> &PointSet {
        &self.stages[stage.index()]
    }

    pub fn point_count(&self) -> usize {
        self.stages[0].len()
    }

    /// Computes the blended point set for `p`
    pub fn morph(&self, p: f32) -> MorphState {
        let mut points = PointSet::default();
        let (source, next, blend) = self.morph_into(p, &mut points);
        MorphState {
            source,
            next,
            blend,
            points,
        }
    }

    /// Like [`LifecycleMorpher::morph`], but writes into a caller-owned buffer so the frame loop
    /// can reuse one allocation. Returns the stage pair and blend weight.
    pub fn morph_into(&self, p: f32, out: &mut PointSet) -> (Stage, Stage, f32) {
        let (source, next, blend) = stage_pair(p);
        let src = self.stage(source);
        if out.len() != src.len() {
            *out = src.clone();
        }
        lerp_positions(src.points(), self.stage(next).points(), blend, out.points_mut());
        (source, next, blend)
    }
}

/// Clamps the stage parameter into `[0, LAST_INDEX]`. NaN maps to 0.
pub fn clamp_parameter(p: f32) -> f32 {
    if p.is_nan() {
        return 0.0;
    }
    p.clamp(0.0, Stage::LAST_INDEX as f32)
}

/// Splits `p` into (source stage, next stage, blend weight)
pub fn stage_pair(p: f32) -> (Stage, Stage, f32) {
    let p = clamp_parameter(p);
    let index = (p.floor() as usize).min(Stage::LAST_INDEX);
    let source = Stage::saturating_from_index(index);
    let next = source.successor();
    // nothing to blend towards past the last stage
    let blend = if source == next { 0.0 } else { p - index as f32 };
    (source, next, blend)
}

/// `out[i].loc = src[i].loc + (next[i].loc - src[i].loc) * blend`, `out[i].color = src[i].color`
pub fn lerp_positions(src: &[Point], next: &[Point], blend: f32, out: &mut [Point]) {
    for ((o, s), n) in out.iter_mut().zip(src).zip(next) {
        for axis in 0..3 {
            o.loc[axis] = s.loc[axis] + (n.loc[axis] - s.loc[axis]) * blend;
        }
        o.color = s.color;
    }
}
