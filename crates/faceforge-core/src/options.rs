// crates/faceforge-core/src/options.rs
//
// Generation options sent with every job submission. The backend receives
// them as flat multipart form fields (one text field per option, booleans as
// "true"/"false"), which is what form_fields() produces.

use serde::{Deserialize, Serialize};

/// Pose-style seeds range from 0 to 45 on the backend.
pub const POSE_STYLE_MAX: u8 = 45;
/// Expression intensity multiplier bounds.
pub const EXPRESSION_SCALE_MIN: f32 = 0.1;
pub const EXPRESSION_SCALE_MAX: f32 = 2.0;
/// Backend parallelism hint bounds.
pub const BATCH_SIZE_MIN: u8 = 1;
pub const BATCH_SIZE_MAX: u8 = 4;

/// Output resolution of the generated video (square, pixels per side).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputSize {
    S128,
    S256,
    S512,
}

impl OutputSize {
    pub const ALL: [OutputSize; 3] = [OutputSize::S128, OutputSize::S256, OutputSize::S512];

    pub fn pixels(self) -> u32 {
        match self {
            OutputSize::S128 => 128,
            OutputSize::S256 => 256,
            OutputSize::S512 => 512,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OutputSize::S128 => "128 px (fast)",
            OutputSize::S256 => "256 px",
            OutputSize::S512 => "512 px (slow)",
        }
    }
}

/// Face-framing strategy applied to the source image before synthesis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Preprocess {
    Crop,
    ExtCrop,
    Resize,
    Full,
    ExtFull,
}

impl Preprocess {
    pub const ALL: [Preprocess; 5] = [
        Preprocess::Crop,
        Preprocess::ExtCrop,
        Preprocess::Resize,
        Preprocess::Full,
        Preprocess::ExtFull,
    ];

    /// The string the backend's form parser expects.
    pub fn wire_name(self) -> &'static str {
        match self {
            Preprocess::Crop => "crop",
            Preprocess::ExtCrop => "extcrop",
            Preprocess::Resize => "resize",
            Preprocess::Full => "full",
            Preprocess::ExtFull => "extfull",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Preprocess::Crop => "Crop (recommended)",
            Preprocess::ExtCrop => "Extended crop",
            Preprocess::Resize => "Resize to target",
            Preprocess::Full => "Full image",
            Preprocess::ExtFull => "Extended full",
        }
    }
}

/// Face-restoration model applied to the generated frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Enhancer {
    Gfpgan,
    RestoreFormer,
    None,
}

impl Enhancer {
    pub const ALL: [Enhancer; 3] = [Enhancer::Gfpgan, Enhancer::RestoreFormer, Enhancer::None];

    pub fn wire_name(self) -> &'static str {
        match self {
            Enhancer::Gfpgan => "gfpgan",
            Enhancer::RestoreFormer => "RestoreFormer",
            Enhancer::None => "none",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Enhancer::Gfpgan => "GFPGAN",
            Enhancer::RestoreFormer => "RestoreFormer",
            Enhancer::None => "None",
        }
    }
}

/// Background upscaling model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BackgroundEnhancer {
    RealEsrgan,
    None,
}

impl BackgroundEnhancer {
    pub const ALL: [BackgroundEnhancer; 2] =
        [BackgroundEnhancer::RealEsrgan, BackgroundEnhancer::None];

    pub fn wire_name(self) -> &'static str {
        match self {
            BackgroundEnhancer::RealEsrgan => "realesrgan",
            BackgroundEnhancer::None => "none",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BackgroundEnhancer::RealEsrgan => "Real-ESRGAN",
            BackgroundEnhancer::None => "None",
        }
    }
}

/// The flat option set for one generation job. Constructed fresh per
/// submission and never mutated after it is handed to the session worker.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationOptions {
    pub size: OutputSize,
    pub preprocess: Preprocess,
    /// Head-pose variation seed, 0..=45.
    pub pose_style: u8,
    /// Expression intensity multiplier, 0.1..=2.0.
    pub expression_scale: f32,
    /// Backend parallelism hint, 1..=4.
    pub batch_size: u8,
    pub enhancer: Enhancer,
    pub background_enhancer: BackgroundEnhancer,
    /// Suppress body motion.
    pub still_mode: bool,
    /// Emit the 3D visualization artifact alongside the video.
    pub face3dvis: bool,
    /// Keep intermediate artifacts on the backend.
    pub verbose: bool,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            size: OutputSize::S256,
            preprocess: Preprocess::Crop,
            pose_style: 0,
            expression_scale: 1.0,
            batch_size: 2,
            enhancer: Enhancer::None,
            background_enhancer: BackgroundEnhancer::None,
            still_mode: false,
            face3dvis: false,
            verbose: false,
        }
    }
}

impl GenerationOptions {
    /// Serialize to the multipart text fields the job-creation endpoint
    /// expects, alongside the `image` and `audio` binary parts.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("size", self.size.pixels().to_string()),
            ("preprocess", self.preprocess.wire_name().to_string()),
            ("pose_style", self.pose_style.to_string()),
            ("expression_scale", format!("{:.2}", self.expression_scale)),
            ("batch_size", self.batch_size.to_string()),
            ("enhancer", self.enhancer.wire_name().to_string()),
            (
                "background_enhancer",
                self.background_enhancer.wire_name().to_string(),
            ),
            ("still_mode", self.still_mode.to_string()),
            ("face3dvis", self.face3dvis.to_string()),
            ("verbose", self.verbose.to_string()),
        ]
    }
}
