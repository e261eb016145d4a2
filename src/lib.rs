//! Point-cloud plant that morphs through four lifecycle stages.
//!
//! [`LifecycleMorpher`] owns one generated cloud per [`Stage`] and blends positions between
//! neighbouring stages for a continuous stage parameter. [`playback::Driver`] is the frame loop
//! around it, and [`render`] draws the result.

pub mod camera;
pub mod error;
pub mod export;
pub mod generate;
pub mod logging;
pub mod morph;
pub mod playback;
pub mod point;
pub mod render;
pub mod settings;
pub mod stage;

pub use error::{Error, Result};
pub use morph::{LifecycleMorpher, MorphState};
pub use point::{Point, PointSet};
pub use stage::Stage;
