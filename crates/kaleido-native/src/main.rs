use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;

use kaleido_core::{
    Composition, EffectKind, EffectParams, KaleidoSettings, MonospaceMetrics, PlacementReport,
    Regenerator, SceneContent, Visual,
};

#[derive(Parser)]
#[command(name = "kaleido", version, about = "Generate a kaleidoscope composition")]
struct Cli {
    /// Settings file previously exported from the control panel.
    #[arg(short, long)]
    settings: Option<PathBuf>,
    /// Layout name (tunnel, spiral, zoom, sphere, static); resets its parameters.
    #[arg(short, long)]
    effect: Option<String>,
    #[arg(short, long)]
    reflections: Option<u32>,
    /// Place one item per character of this text.
    #[arg(long, conflicts_with = "word")]
    text: Option<String>,
    /// Place whole copies of this text.
    #[arg(long)]
    word: Option<String>,
    #[arg(long)]
    seed: Option<u64>,
    /// Write the composition as JSON.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Export<'a> {
    seed: u64,
    settings: &'a KaleidoSettings,
    report: &'a PlacementReport,
    composition: &'a Composition<Visual>,
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    let settings = build_settings(&cli)?;

    let mut regen = Regenerator::new(MonospaceMetrics::default(), rand::random());
    regen.request(settings);
    regen.flush()?;
    let scene = regen
        .scene()
        .context("regeneration produced no scene")?;

    let r = &scene.report;
    println!(
        "seed={} effect={} slices={} items={} (requested={} accepted={} forced={} dropped={} skipped={} attempts={})",
        scene.seed,
        scene.settings.effect.kind().name(),
        scene.composition.slices().len(),
        scene.composition.item_count(),
        r.requested,
        r.accepted,
        r.forced,
        r.dropped,
        r.skipped,
        r.attempts
    );

    if let Some(path) = &cli.output {
        let export = Export {
            seed: scene.seed,
            settings: &scene.settings,
            report: &scene.report,
            composition: &scene.composition,
        };
        let json = serde_json::to_string_pretty(&export)?;
        fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        log::info!("[export] wrote {}", path.display());
    }
    Ok(())
}

fn build_settings(cli: &Cli) -> anyhow::Result<KaleidoSettings> {
    let mut settings = match &cli.settings {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            KaleidoSettings::from_json(&json)
                .with_context(|| format!("rejected settings file {}", path.display()))?
        }
        None => KaleidoSettings::default(),
    };
    if let Some(name) = &cli.effect {
        settings.effect = EffectParams::for_kind(EffectKind::from_name(name));
    }
    if let Some(n) = cli.reflections {
        settings.reflections = n;
    }
    if let Some(text) = &cli.text {
        settings.content = SceneContent::Glyphs { text: text.clone() };
    }
    if let Some(text) = &cli.word {
        settings.content = SceneContent::Word {
            text: text.clone(),
            copies: kaleido_core::WORD_COPIES,
        };
    }
    if cli.seed.is_some() {
        settings.seed = cli.seed;
    }
    Ok(settings.sanitized())
}
