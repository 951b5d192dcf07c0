//! Sprite sheet animation component

use crate::ecs::{Component, ComponentKind};
use serde::{Serialize, Deserialize};

/// Frame-based animation over a horizontal sprite sheet
///
/// Frames are 1-based. The runtime copies `current_frame` and `frames` into the
/// [`SpriteComponent`](super::SpriteComponent) of the same object each frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationComponent {
    /// Frames per second
    pub fps: f32,

    /// Number of frames in the sheet
    pub frames: u32,

    /// Frame shown, always in `1..=frames`
    pub current_frame: u32,

    /// Time accumulated toward the next frame
    #[serde(skip)]
    pub timer: f32,

    /// Whether the animation advances
    pub play: bool,

    /// Value `play` takes when the scene starts
    pub play_on_awake: bool,

    /// Wrap to the first frame instead of stopping
    pub looping: bool,
}

impl Component for AnimationComponent {
    const KIND: ComponentKind = ComponentKind::Animation;
}

impl Default for AnimationComponent {
    fn default() -> Self {
        Self {
            fps: 12.0,
            frames: 1,
            current_frame: 1,
            timer: 0.0,
            play: false,
            play_on_awake: true,
            looping: true,
        }
    }
}

impl AnimationComponent {
    /// Create an animation that starts playing with the scene
    pub fn new(fps: f32, frames: u32, looping: bool) -> Self {
        Self {
            fps,
            frames,
            looping,
            ..Default::default()
        }
    }

    /// Prepare for a play session
    pub fn reset_for_play(&mut self) {
        self.play = self.play_on_awake;
        self.timer = 0.0;
        self.current_frame = 1;
    }

    /// Accumulate `dt` and step frames
    ///
    /// Once the timer exceeds `1/fps` it resets and the animation moves one
    /// frame, however long the elapsed time was. Past the last frame the
    /// animation wraps to 1, or stops on 1 when not looping.
    pub fn advance(&mut self, dt: f32) {
        if !self.play || self.fps <= 0.0 || self.frames == 0 {
            return;
        }
        self.timer += dt;
        if self.timer > 1.0 / self.fps {
            self.timer = 0.0;
            self.current_frame += 1;
            if self.current_frame > self.frames {
                self.current_frame = 1;
                if !self.looping {
                    self.play = false;
                }
            }
        }
    }
}
