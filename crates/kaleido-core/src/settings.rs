//! Immutable per-regeneration settings snapshot and its JSON import/export.
//!
//! Everything the control panel can change lives here. Front-ends build one
//! snapshot per regeneration request (from form controls or a settings file),
//! pass it through [`KaleidoSettings::sanitized`] and hand it to the core by
//! value; no core component reads ambient UI state.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_REFLECTIONS, MAX_ATTEMPTS, MAX_ITEMS, MAX_REFLECTIONS, MAX_TEXT_CHARS,
    PLACEMENT_ATTEMPTS, SHAPE_OBJECT_COUNT, WORD_COPIES,
};
use crate::effect::EffectParams;
use crate::error::Result;
use crate::payload::ShapeKind;
use crate::placement::{ExhaustionPolicy, PlacementConfig};
use crate::transform::StepParams;

/// What populates the master slice.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum SceneContent {
    /// `count` random shapes drawn from `shapes`.
    Shapes {
        #[serde(default = "all_shapes")]
        shapes: Vec<ShapeKind>,
        #[serde(default = "default_shape_count")]
        count: usize,
    },
    /// One item per visible character of `text`.
    Glyphs { text: String },
    /// `copies` items, each the whole `text`.
    Word {
        text: String,
        #[serde(default = "default_word_copies")]
        copies: usize,
    },
}

fn all_shapes() -> Vec<ShapeKind> {
    ShapeKind::ALL.to_vec()
}

fn default_shape_count() -> usize {
    SHAPE_OBJECT_COUNT
}

fn default_word_copies() -> usize {
    WORD_COPIES
}

impl Default for SceneContent {
    fn default() -> Self {
        SceneContent::Shapes {
            shapes: all_shapes(),
            count: SHAPE_OBJECT_COUNT,
        }
    }
}

impl SceneContent {
    /// Shapes and word copies may come up short; glyphs never drop a letter.
    pub fn default_policy(&self) -> ExhaustionPolicy {
        match self {
            SceneContent::Shapes { .. } | SceneContent::Word { .. } => ExhaustionPolicy::Drop,
            SceneContent::Glyphs { .. } => ExhaustionPolicy::AcceptLast,
        }
    }

    fn sanitized(self) -> Self {
        match self {
            SceneContent::Shapes { shapes, count } => SceneContent::Shapes {
                shapes,
                count: count.min(MAX_ITEMS),
            },
            SceneContent::Glyphs { text } => SceneContent::Glyphs {
                text: text.chars().take(MAX_TEXT_CHARS).collect(),
            },
            SceneContent::Word { text, copies } => SceneContent::Word {
                text: text.chars().take(MAX_TEXT_CHARS).collect(),
                copies: copies.min(MAX_ITEMS),
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KaleidoSettings {
    /// Number of slices in the composition, master included.
    pub reflections: u32,
    pub effect: EffectParams,
    pub content: SceneContent,
    pub step: StepParams,
    pub max_attempts: usize,
    /// Overrides the content's default exhaustion policy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_exhaustion: Option<ExhaustionPolicy>,
    /// Fixed seed for reproducible scenes; `None` draws a fresh one per run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for KaleidoSettings {
    fn default() -> Self {
        Self {
            reflections: DEFAULT_REFLECTIONS,
            effect: EffectParams::default(),
            content: SceneContent::default(),
            step: StepParams::default(),
            max_attempts: PLACEMENT_ATTEMPTS,
            on_exhaustion: None,
            seed: None,
        }
    }
}

impl KaleidoSettings {
    /// Parse an exported settings file and clamp it into range.
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: KaleidoSettings = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Clamp every field into the range the core assumes.
    pub fn sanitized(self) -> Self {
        Self {
            reflections: self.reflections.clamp(1, MAX_REFLECTIONS),
            effect: self.effect.sanitized(),
            content: self.content.sanitized(),
            step: self.step.sanitized(),
            max_attempts: self.max_attempts.clamp(1, MAX_ATTEMPTS),
            on_exhaustion: self.on_exhaustion,
            seed: self.seed,
        }
    }

    pub fn exhaustion_policy(&self) -> ExhaustionPolicy {
        self.on_exhaustion
            .unwrap_or_else(|| self.content.default_policy())
    }

    pub fn placement_config(&self, target_count: usize) -> PlacementConfig {
        PlacementConfig::new(target_count, self.exhaustion_policy())
            .with_max_attempts(self.max_attempts)
    }
}
