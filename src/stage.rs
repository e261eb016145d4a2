/// Resting opacity of a cloud that is not cross-fading
pub const REST_OPACITY: f32 = 0.8;

/// The four lifecycle stages, in growth order
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Seed,
    Sprout,
    Growth,
    Mature,
}

impl Stage {
    pub const ALL: [Stage; 4] = [Stage::Seed, Stage::Sprout, Stage::Growth, Stage::Mature];

    pub const LAST_INDEX: usize = 3;

    pub fn index(self) -> usize {
        match self {
            Stage::Seed => 0,
            Stage::Sprout => 1,
            Stage::Growth => 2,
            Stage::Mature => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Stage> {
        Stage::ALL.get(index).copied()
    }

    /// Stage whose index is `index`, saturating at the last stage
    pub fn saturating_from_index(index: usize) -> Stage {
        Stage::from_index(index).unwrap_or(Stage::Mature)
    }

    /// The stage after this one, or this one if it is the last
    pub fn successor(self) -> Stage {
        Stage::saturating_from_index(self.index() + 1)
    }

    pub fn name(self) -> &'static str {
        match self {
            Stage::Seed => "Stage 1: Seed",
            Stage::Sprout => "Stage 2: Sprout",
            Stage::Growth => "Stage 3: Growth",
            Stage::Mature => "Stage 4: Mature",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Stage::Seed => "The beginning of life, compact and full of potential",
            Stage::Sprout => "First signs of growth, breaking through the soil",
            Stage::Growth => "Rapid expansion, leaves unfurling towards the light",
            Stage::Mature => "Full bloom, complex structure at peak development",
        }
    }

    /// Lower-case identifier, used for file names
    pub fn slug(self) -> &'static str {
        match self {
            Stage::Seed => "seed",
            Stage::Sprout => "sprout",
            Stage::Growth => "growth",
            Stage::Mature => "mature",
        }
    }

    /// Material tint multiplied into the per-point colors by the renderer
    pub fn base_color(self) -> [f32; 3] {
        let hex: u32 = match self {
            Stage::Seed => 0x8B4513,
            Stage::Sprout => 0x90EE90,
            Stage::Growth => 0x32CD32,
            Stage::Mature => 0x228B22,
        };
        [
            ((hex >> 16) & 0xff) as f32 / 255.0,
            ((hex >> 8) & 0xff) as f32 / 255.0,
            (hex & 0xff) as f32 / 255.0,
        ]
    }

    /// Point size in world units. Later stages use finer points.
    pub fn point_size(self) -> f32 {
        match self {
            Stage::Seed => 0.02,
            Stage::Sprout => 0.015,
            Stage::Growth => 0.012,
            Stage::Mature => 0.01,
        }
    }
}
