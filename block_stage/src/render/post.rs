//! Post-processing chain: a fixed, ordered list of stages resolved once onto
//! the stage camera's Bevy components.

use std::f32::consts::PI;

use bevy::core_pipeline::bloom::{Bloom, BloomPrefilter};
use bevy::core_pipeline::smaa::{Smaa, SmaaPreset};
use bevy::ecs::system::EntityCommands;
use bevy::prelude::*;
use bevy::render::view::{ColorGrading, ColorGradingGlobal, ColorGradingSection};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PostStage {
    /// Both in `[-1, 1]`, zero is neutral.
    BrightnessContrast { brightness: f32, contrast: f32 },
    /// Hue as a fraction of a half turn, saturation offset; zero is neutral.
    HueSaturation { hue: f32, saturation: f32 },
    Bloom {
        strength: f32,
        radius: f32,
        threshold: f32,
    },
    Vignette { offset: f32, darkness: f32 },
    FilmGrain { intensity: f32 },
    Smaa,
}

impl PostStage {
    pub fn name(&self) -> &'static str {
        match self {
            PostStage::BrightnessContrast { .. } => "brightness-contrast",
            PostStage::HueSaturation { .. } => "hue-saturation",
            PostStage::Bloom { .. } => "bloom",
            PostStage::Vignette { .. } => "vignette",
            PostStage::FilmGrain { .. } => "film-grain",
            PostStage::Smaa => "smaa",
        }
    }
}

/// The stage's post-processing chain. Built once, never reconfigured.
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct PostChain {
    stages: Vec<PostStage>,
}

impl Default for PostChain {
    fn default() -> Self {
        Self::new(vec![
            PostStage::BrightnessContrast {
                brightness: 0.0,
                contrast: 0.1,
            },
            PostStage::HueSaturation {
                hue: 0.0,
                saturation: -0.1,
            },
            PostStage::Bloom {
                strength: 0.2,
                radius: 0.3,
                threshold: 0.4,
            },
            PostStage::Vignette {
                offset: 1.0,
                darkness: 1.0,
            },
            PostStage::FilmGrain { intensity: 0.35 },
            PostStage::Smaa,
        ])
    }
}

/// Camera components produced by a chain, plus stages Bevy has no pass for.
pub struct ResolvedPost {
    pub color_grading: Option<ColorGrading>,
    pub bloom: Option<Bloom>,
    pub smaa: Option<Smaa>,
    pub skipped: Vec<&'static str>,
}

impl PostChain {
    pub fn new(stages: Vec<PostStage>) -> Self {
        Self { stages }
    }

    pub fn stages(&self) -> &[PostStage] {
        &self.stages
    }

    pub fn resolve(&self) -> ResolvedPost {
        let mut global = ColorGradingGlobal::default();
        let mut section = ColorGradingSection::default();
        let mut graded = false;
        let mut resolved = ResolvedPost {
            color_grading: None,
            bloom: None,
            smaa: None,
            skipped: Vec::new(),
        };

        for stage in &self.stages {
            match *stage {
                PostStage::BrightnessContrast {
                    brightness,
                    contrast,
                } => {
                    global.exposure += brightness;
                    section.contrast = 1.0 + contrast;
                    graded = true;
                }
                PostStage::HueSaturation { hue, saturation } => {
                    global.hue = hue * PI;
                    global.post_saturation = 1.0 + saturation;
                    graded = true;
                }
                PostStage::Bloom {
                    strength,
                    radius,
                    threshold,
                } => {
                    resolved.bloom = Some(Bloom {
                        intensity: strength,
                        low_frequency_boost: radius,
                        prefilter: BloomPrefilter {
                            threshold,
                            threshold_softness: 0.0,
                        },
                        ..Bloom::NATURAL
                    });
                }
                PostStage::Smaa => {
                    resolved.smaa = Some(Smaa {
                        preset: SmaaPreset::High,
                    });
                }
                PostStage::Vignette { .. } | PostStage::FilmGrain { .. } => {
                    resolved.skipped.push(stage.name());
                }
            }
        }

        if graded {
            resolved.color_grading = Some(ColorGrading::with_identical_sections(global, section));
        }
        resolved
    }
}

impl ResolvedPost {
    pub fn insert_into(self, camera: &mut EntityCommands) {
        if let Some(grading) = self.color_grading {
            camera.insert(grading);
        }
        if let Some(bloom) = self.bloom {
            camera.insert(bloom);
        }
        if let Some(smaa) = self.smaa {
            camera.insert((smaa, Msaa::Off));
        }
    }
}
