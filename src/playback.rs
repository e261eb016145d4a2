//! The frame driver. Owns the stage parameter, applies user input, advances autoplay and keeps
//! the working point set and camera in step with it.

use cgmath::{Point3, Rad};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::camera::{Camera, SPIN_PER_TICK};
use super::morph::{clamp_parameter, LifecycleMorpher, MorphState};
use super::render::{self, Renderer, MAX_FRAME_SIDE};
use super::stage::Stage;

pub const DEFAULT_SPEED: f32 = 2.0;
/// Stage parameter advance per tick at speed 1
pub const DEFAULT_AUTOPLAY_RATE: f32 = 0.01;

/// Discrete user actions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Input {
    /// Continuous slider, any value in `[0, 3]`
    Slider(f32),
    /// One of the four stage buttons
    SelectStage(usize),
    Reset,
    ToggleAutoplay,
    SetSpeed(f32),
    Resize { width: u32, height: u32 },
}

/// Text shown next to the view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageInfo {
    pub name: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    parameter: f32,
    autoplay: bool,
    speed: f32,
    rate: f32,
}

impl PlaybackState {
    pub fn new(rate: f32, speed: f32) -> PlaybackState {
        PlaybackState {
            parameter: 0.0,
            autoplay: false,
            speed: sanitize_speed(speed),
            rate: sanitize_speed(rate),
        }
    }

    pub fn parameter(&self) -> f32 {
        self.parameter
    }

    pub fn autoplay(&self) -> bool {
        self.autoplay
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn set_parameter(&mut self, p: f32) {
        self.parameter = clamp_parameter(p);
    }

    pub fn set_autoplay(&mut self, on: bool) {
        self.autoplay = on;
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = sanitize_speed(speed);
    }

    /// Autoplay step. Running past the last stage starts over at the seed.
    pub fn advance(&mut self) {
        if !self.autoplay {
            return;
        }
        self.parameter += self.rate * self.speed;
        if self.parameter > Stage::LAST_INDEX as f32 {
            self.parameter = 0.0;
        }
    }

    /// The stage whose text and button are shown
    pub fn active_stage(&self) -> Stage {
        Stage::saturating_from_index(self.parameter.floor() as usize)
    }

    pub fn stage_info(&self) -> StageInfo {
        let stage = self.active_stage();
        StageInfo {
            name: stage.name(),
            description: stage.description(),
        }
    }

    pub fn autoplay_label(&self) -> &'static str {
        if self.autoplay {
            "Stop Auto"
        } else {
            "Auto Play"
        }
    }
}

fn sanitize_speed(speed: f32) -> f32 {
    if speed.is_finite() {
        speed.max(0.0)
    } else {
        0.0
    }
}

/// Everything the frame loop owns
pub struct Driver {
    morpher: LifecycleMorpher,
    playback: PlaybackState,
    working: MorphState,
    camera: Camera,
    renderer: Renderer,
    ticks: u64,
    announced: Option<Stage>,
}

impl Driver {
    pub fn new(
        morpher: LifecycleMorpher,
        playback: PlaybackState,
        width: u32,
        height: u32,
    ) -> Driver {
        let working = morpher.morph(playback.parameter());
        let mut driver = Driver {
            morpher,
            playback,
            working,
            camera: Camera::new(Point3::new(0.0, 0.0, 5.0), width, height),
            renderer: Renderer::new(width, height),
            ticks: 0,
            announced: None,
        };
        driver.refresh();
        driver
    }

    pub fn morpher(&self) -> &LifecycleMorpher {
        &self.morpher
    }

    pub fn playback(&self) -> &PlaybackState {
        &self.playback
    }

    pub fn state(&self) -> &MorphState {
        &self.working
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn apply(&mut self, input: &Input) {
        debug!("input {:?}", input);
        match *input {
            Input::Slider(p) => self.playback.set_parameter(p),
            Input::SelectStage(index) => {
                self.playback.set_parameter(Stage::saturating_from_index(index).index() as f32)
            }
            Input::Reset => self.playback.set_parameter(0.0),
            Input::ToggleAutoplay => {
                let on = !self.playback.autoplay();
                self.playback.set_autoplay(on);
                info!("{}", if on { "autoplay on" } else { "autoplay off" });
                return;
            }
            Input::SetSpeed(speed) => {
                self.playback.set_speed(speed);
                return;
            }
            Input::Resize { width, height } => {
                let width = width.clamp(1, MAX_FRAME_SIDE);
                let height = height.clamp(1, MAX_FRAME_SIDE);
                self.camera.setscreen(width, height);
                self.renderer.resize(width, height);
                return;
            }
        }
        self.refresh();
    }

    /// One frame: advance autoplay, re-morph, turn the view a little
    pub fn tick(&mut self) -> &MorphState {
        self.playback.advance();
        self.refresh();
        self.camera.spin(Rad(SPIN_PER_TICK));
        self.ticks += 1;
        &self.working
    }

    /// Draws the current working set into the frame buffer
    pub fn render(&mut self) -> &Renderer {
        self.renderer.clear();
        let layers = render::layers(&self.morpher, &self.working);
        self.renderer.draw(&self.camera, &layers);
        &self.renderer
    }

    fn refresh(&mut self) {
        let (source, next, blend) = self
            .morpher
            .morph_into(self.playback.parameter(), &mut self.working.points);
        self.working.source = source;
        self.working.next = next;
        self.working.blend = blend;

        let active = self.playback.active_stage();
        if self.announced != Some(active) {
            let info = self.playback.stage_info();
            info!("{}: {}", info.name, info.description);
            self.announced = Some(active);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn driver() -> Driver {
        let morpher = LifecycleMorpher::generate(64, &mut StdRng::seed_from_u64(21));
        Driver::new(
            morpher,
            PlaybackState::new(DEFAULT_AUTOPLAY_RATE, DEFAULT_SPEED),
            80,
            60,
        )
    }

    #[test]
    fn autoplay_wraps_to_seed() {
        let mut state = PlaybackState::new(0.5, 1.0);
        state.set_autoplay(true);
        state.set_parameter(2.75);
        state.advance();
        assert_eq!(state.parameter(), 0.0);
        state.advance();
        assert_eq!(state.parameter(), 0.5);
    }

    #[test]
    fn exact_last_stage_is_not_wrapped() {
        let mut state = PlaybackState::new(0.5, 1.0);
        state.set_autoplay(true);
        state.set_parameter(2.5);
        state.advance();
        assert_eq!(state.parameter(), 3.0);
    }

    #[test]
    fn parameter_stays_in_range_every_tick() {
        let mut d = driver();
        d.apply(&Input::SetSpeed(7.3));
        d.apply(&Input::ToggleAutoplay);
        for _ in 0..2000 {
            let p = d.playback().parameter();
            assert!((0.0..=3.0).contains(&p), "p = {}", p);
            d.tick();
        }
        assert_eq!(d.ticks(), 2000);
    }

    #[test]
    fn paused_tick_keeps_parameter() {
        let mut d = driver();
        d.apply(&Input::Slider(1.4));
        d.tick();
        d.tick();
        assert_eq!(d.playback().parameter(), 1.4);
        assert_eq!(d.state().source, Stage::Sprout);
    }

    #[test]
    fn autoplay_advances_by_rate_times_speed() {
        let mut d = driver();
        d.apply(&Input::ToggleAutoplay);
        d.tick();
        assert!((d.playback().parameter() - 0.02).abs() < 1e-6);
        d.apply(&Input::SetSpeed(0.5));
        d.tick();
        assert!((d.playback().parameter() - 0.025).abs() < 1e-6);
    }

    #[test]
    fn inputs_update_working_set_immediately() {
        let mut d = driver();
        d.apply(&Input::SelectStage(2));
        assert_eq!(d.playback().parameter(), 2.0);
        assert_eq!(&d.state().points, d.morpher().stage(Stage::Growth));

        d.apply(&Input::Slider(2.5));
        assert_eq!(d.state().source, Stage::Growth);
        assert_eq!(d.state().next, Stage::Mature);
        assert_eq!(d.state().blend, 0.5);
        assert_eq!(d.state(), &d.morpher().morph(2.5));

        d.apply(&Input::Reset);
        assert_eq!(d.playback().parameter(), 0.0);
        assert_eq!(&d.state().points, d.morpher().stage(Stage::Seed));
    }

    #[test]
    fn out_of_range_inputs_clamp() {
        let mut d = driver();
        d.apply(&Input::Slider(12.0));
        assert_eq!(d.playback().parameter(), 3.0);
        d.apply(&Input::Slider(-1.0));
        assert_eq!(d.playback().parameter(), 0.0);
        d.apply(&Input::SelectStage(8));
        assert_eq!(d.playback().parameter(), 3.0);
        d.apply(&Input::SetSpeed(-2.0));
        assert_eq!(d.playback().speed(), 0.0);
        d.apply(&Input::SetSpeed(f32::NAN));
        assert_eq!(d.playback().speed(), 0.0);
    }

    #[test]
    fn stage_text_follows_floor_of_parameter() {
        let mut state = PlaybackState::new(DEFAULT_AUTOPLAY_RATE, DEFAULT_SPEED);
        state.set_parameter(2.7);
        assert_eq!(state.active_stage(), Stage::Growth);
        assert_eq!(state.stage_info().name, "Stage 3: Growth");
        state.set_parameter(3.0);
        assert_eq!(
            state.stage_info().description,
            "Full bloom, complex structure at peak development"
        );
    }

    #[test]
    fn autoplay_label_toggles() {
        let mut d = driver();
        assert_eq!(d.playback().autoplay_label(), "Auto Play");
        d.apply(&Input::ToggleAutoplay);
        assert_eq!(d.playback().autoplay_label(), "Stop Auto");
        d.apply(&Input::ToggleAutoplay);
        assert!(!d.playback().autoplay());
    }

    #[test]
    fn resize_only_touches_projection() {
        let mut d = driver();
        d.apply(&Input::Slider(1.25));
        let before = d.state().clone();
        d.apply(&Input::Resize {
            width: 200,
            height: 100,
        });
        assert_eq!(d.camera().screen(), (200, 100));
        assert_eq!(d.state(), &before);
        assert_eq!(d.playback().parameter(), 1.25);
        assert_eq!(d.render().size(), (200, 100));
    }

    #[test]
    fn oversized_resize_is_clamped_and_renders() {
        let mut d = driver();
        d.apply(&Input::Resize {
            width: 65537,
            height: 65537,
        });
        assert_eq!(d.camera().screen(), (MAX_FRAME_SIDE, MAX_FRAME_SIDE));
        d.apply(&Input::Resize {
            width: 100_000,
            height: 0,
        });
        assert_eq!(d.camera().screen(), (MAX_FRAME_SIDE, 1));
        assert_eq!(d.render().size(), (MAX_FRAME_SIDE, 1));
    }

    #[test]
    fn ticks_spin_the_view() {
        let mut d = driver();
        d.tick();
        d.tick();
        assert!((d.camera().spin_angle().0 - 2.0 * SPIN_PER_TICK).abs() < 1e-6);
    }
}
