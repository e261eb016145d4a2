//! CPU point splatter.
//!
//! Presentation convention: only the source stage cloud is visible, drawn with the morphed
//! positions. While a morph is in progress the next stage cloud is faded in on top of it at its
//! own resting shape, with the two opacities summing to one.

use image::{Rgba, RgbaImage};
use log::debug;
use std::path::Path;

use super::camera::Camera;
use super::error::Result;
use super::morph::{LifecycleMorpher, MorphState};
use super::point::Point;
use super::stage::{Stage, REST_OPACITY};

/// One cloud to draw
#[derive(Clone, Copy, Debug)]
pub struct Layer<'a> {
    pub stage: Stage,
    pub points: &'a [Point],
    pub opacity: f32,
}

/// Picks the clouds and opacities for a morph state
pub fn layers<'a>(morpher: &'a LifecycleMorpher, state: &'a MorphState) -> Vec<Layer<'a>> {
    let source = Layer {
        stage: state.source,
        points: state.points.points(),
        opacity: REST_OPACITY,
    };
    if state.blend > 0.0 && state.next != state.source {
        vec![
            Layer {
                opacity: 1.0 - state.blend,
                ..source
            },
            Layer {
                stage: state.next,
                points: morpher.stage(state.next).points(),
                opacity: state.blend,
            },
        ]
    } else {
        vec![source]
    }
}

/// Largest frame side, in pixels
pub const MAX_FRAME_SIDE: u32 = 8192;

/// Accumulates premultiplied RGBA in floating point and hands out 8 bit frames
pub struct Renderer {
    width: u32,
    height: u32,
    buffer: Vec<[f32; 4]>,
}

impl Renderer {
    pub fn new(width: u32, height: u32) -> Renderer {
        let width = width.clamp(1, MAX_FRAME_SIDE);
        let height = height.clamp(1, MAX_FRAME_SIDE);
        Renderer {
            width,
            height,
            buffer: vec![[0.0; 4]; width as usize * height as usize],
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        *self = Renderer::new(width, height);
    }

    /// Clears to fully transparent black
    pub fn clear(&mut self) {
        self.buffer.iter_mut().for_each(|px| *px = [0.0; 4]);
    }

    pub fn draw(&mut self, camera: &Camera, layers: &[Layer]) {
        for layer in layers {
            let tint = layer.stage.base_color();
            let alpha = layer.opacity.clamp(0.0, 1.0);
            if alpha == 0.0 {
                continue;
            }
            let mut drawn = 0usize;
            for point in layer.points {
                if let Some((x, y, depth)) = camera.project(point.loc) {
                    let half = (camera.pixels_at(layer.stage.point_size(), depth) / 2.0).max(0.5);
                    let color = [
                        point.color[0] * tint[0],
                        point.color[1] * tint[1],
                        point.color[2] * tint[2],
                    ];
                    self.splat(x, y, half, color, alpha);
                    drawn += 1;
                }
            }
            debug!(
                "drew {} of {} points for {:?} at opacity {:.3}",
                drawn,
                layer.points.len(),
                layer.stage,
                alpha
            );
        }
    }

    fn splat(&mut self, x: f32, y: f32, half: f32, color: [f32; 3], alpha: f32) {
        let width = self.width as usize;
        let x0 = (x - half).floor().max(0.0) as usize;
        let y0 = (y - half).floor().max(0.0) as usize;
        let x1 = ((x + half).ceil().max(0.0) as usize).min(width);
        let y1 = ((y + half).ceil().max(0.0) as usize).min(self.height as usize);
        for py in y0..y1 {
            for px in x0..x1 {
                let dst = &mut self.buffer[py * width + px];
                for c in 0..3 {
                    dst[c] = color[c] * alpha + dst[c] * (1.0 - alpha);
                }
                dst[3] = alpha + dst[3] * (1.0 - alpha);
            }
        }
    }

    pub fn frame(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            let [r, g, b, a] = self.buffer[y as usize * self.width as usize + x as usize];
            if a <= 0.0 {
                return Rgba([0, 0, 0, 0]);
            }
            let to8 = |v: f32| ((v / a).clamp(0.0, 1.0) * 255.0).round() as u8;
            Rgba([to8(r), to8(g), to8(b), (a.clamp(0.0, 1.0) * 255.0).round() as u8])
        })
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.frame().save(path)?;
        Ok(())
    }
}
