use std::cell::{Cell, RefCell};
use std::rc::Rc;

use kaleido_core::{
    EffectKind, EffectParams, GlyphMetrics, KaleidoSettings, Regenerator, SceneContent, ShapeKind,
    StepParams, SHAPE_OBJECT_COUNT, WORD_COPIES,
};
use web_sys as web;

use crate::dom;

// Control ids of the kaleidoscope panel
const REFLECTIONS_INPUT: &str = "reflectionsInput";
const EFFECT_SELECT: &str = "effectSelect";
const TEXT_INPUT: &str = "textInput";
const TEXT_MODE_SELECT: &str = "textModeSelect";
const SHAPE_CHECKBOXES: &str = ".shape-checkbox";
const GENERATE_BUTTON: &str = "generateButton";
const TEXT_GENERATE_BUTTON: &str = "textGenerateButton";
const SEED_INPUT: &str = "seedInput";
const COUNT_INPUT: &str = "countInput";
const COPIES_INPUT: &str = "copiesInput";

// Optional layout and step controls; missing ones keep their defaults
const TUNNEL_RADIUS_MIN_INPUT: &str = "tunnelRadiusMin";
const TUNNEL_RADIUS_MAX_INPUT: &str = "tunnelRadiusMax";
const TUNNEL_DEPTH_INPUT: &str = "tunnelDepth";
const SPIRAL_ARMS_INPUT: &str = "spiralArms";
const SPIRAL_TURNS_INPUT: &str = "spiralTurns";
const SPIRAL_RADIUS_START_INPUT: &str = "spiralRadiusStart";
const SPIRAL_RADIUS_END_INPUT: &str = "spiralRadiusEnd";
const SPIRAL_DEPTH_INPUT: &str = "spiralDepth";
const SPIRAL_JITTER_INPUT: &str = "spiralJitter";
const ZOOM_STEP_INPUT: &str = "zoomStep";
const SPHERE_RADIUS_INPUT: &str = "sphereRadius";
const STATIC_SPREAD_INPUT: &str = "staticSpread";
const ROTATE_STEP_X_INPUT: &str = "rotateStepX";
const ROTATE_STEP_Y_INPUT: &str = "rotateStepY";
const ROTATE_STEP_Z_INPUT: &str = "rotateStepZ";
const SCALE_STEP_INPUT: &str = "scaleStep";

/// Which generate button the current composition came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trigger {
    Shapes,
    Text,
}

pub type SharedRegen = Rc<RefCell<Regenerator<Box<dyn GlyphMetrics>>>>;

/// Read the whole panel into one immutable snapshot.
pub fn snapshot(document: &web::Document, trigger: Trigger) -> KaleidoSettings {
    let mut settings = KaleidoSettings::default();
    if let Some(n) = dom::parse_control::<i64>(document, REFLECTIONS_INPUT) {
        settings.reflections = n.clamp(1, u32::MAX as i64) as u32;
    }
    if let Some(name) = dom::control_value(document, EFFECT_SELECT) {
        settings.effect = effect_from_panel(document, EffectKind::from_name(&name));
    }
    settings.step = step_from_panel(document);
    settings.seed = dom::parse_control(document, SEED_INPUT);
    settings.content = match trigger {
        Trigger::Shapes => SceneContent::Shapes {
            shapes: dom::checked_values(document, SHAPE_CHECKBOXES)
                .iter()
                .filter_map(|v| ShapeKind::from_name(v))
                .collect(),
            count: dom::parse_control(document, COUNT_INPUT).unwrap_or(SHAPE_OBJECT_COUNT),
        },
        Trigger::Text => {
            let text = dom::control_value(document, TEXT_INPUT).unwrap_or_default();
            match dom::control_value(document, TEXT_MODE_SELECT).as_deref() {
                Some("word") => SceneContent::Word {
                    text,
                    copies: dom::parse_control(document, COPIES_INPUT).unwrap_or(WORD_COPIES),
                },
                _ => SceneContent::Glyphs { text },
            }
        }
    };
    settings.sanitized()
}

#[inline]
fn override_from(document: &web::Document, element_id: &str, field: &mut f32) {
    if let Some(v) = dom::parse_control(document, element_id) {
        *field = v;
    }
}

fn effect_from_panel(document: &web::Document, kind: EffectKind) -> EffectParams {
    let mut params = EffectParams::for_kind(kind);
    match &mut params {
        EffectParams::Tunnel(p) => {
            override_from(document, TUNNEL_RADIUS_MIN_INPUT, &mut p.radius_min);
            override_from(document, TUNNEL_RADIUS_MAX_INPUT, &mut p.radius_max);
            override_from(document, TUNNEL_DEPTH_INPUT, &mut p.depth);
        }
        EffectParams::Spiral(p) => {
            if let Some(arms) = dom::parse_control(document, SPIRAL_ARMS_INPUT) {
                p.arms = arms;
            }
            override_from(document, SPIRAL_TURNS_INPUT, &mut p.turns);
            override_from(document, SPIRAL_RADIUS_START_INPUT, &mut p.radius_start);
            override_from(document, SPIRAL_RADIUS_END_INPUT, &mut p.radius_end);
            override_from(document, SPIRAL_DEPTH_INPUT, &mut p.depth);
            override_from(document, SPIRAL_JITTER_INPUT, &mut p.jitter);
        }
        EffectParams::Zoom(p) => override_from(document, ZOOM_STEP_INPUT, &mut p.z_step),
        EffectParams::Sphere(p) => override_from(document, SPHERE_RADIUS_INPUT, &mut p.radius),
        EffectParams::Static(p) => override_from(document, STATIC_SPREAD_INPUT, &mut p.spread),
    }
    params
}

fn step_from_panel(document: &web::Document) -> StepParams {
    let mut step = StepParams::default();
    override_from(document, ROTATE_STEP_X_INPUT, &mut step.rotate_step.x);
    override_from(document, ROTATE_STEP_Y_INPUT, &mut step.rotate_step.y);
    override_from(document, ROTATE_STEP_Z_INPUT, &mut step.rotate_step.z);
    override_from(document, SCALE_STEP_INPUT, &mut step.scale_step);
    step
}

/// Queue a fresh snapshot on every generate click or layout change.
///
/// Requests only replace the pending snapshot; the render loop realizes the
/// newest one with `flush`, so bursts of input collapse into one regeneration.
pub fn wire(document: &web::Document, regen: &SharedRegen) {
    let last_trigger = Rc::new(Cell::new(Trigger::Shapes));

    let bind = |element_id: &str, event: &str, fixed: Option<Trigger>| {
        let doc = document.clone();
        let regen = regen.clone();
        let last_trigger = last_trigger.clone();
        dom::add_listener(document, element_id, event, move || {
            let trigger = fixed.unwrap_or_else(|| last_trigger.get());
            last_trigger.set(trigger);
            regen.borrow_mut().request(snapshot(&doc, trigger));
        });
    };

    bind(GENERATE_BUTTON, "click", Some(Trigger::Shapes));
    bind(TEXT_GENERATE_BUTTON, "click", Some(Trigger::Text));
    bind(REFLECTIONS_INPUT, "change", None);
    bind(EFFECT_SELECT, "change", None);
}
