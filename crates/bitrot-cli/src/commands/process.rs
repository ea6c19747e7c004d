//! File-based rendering command.

use crate::preset::Preset;
use anyhow::Context;
use bitrot_io::{BlockRenderer, WavSpec, read_wav_stereo, write_wav_stereo};
use bitrot_registry::EffectRegistry;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Engine to apply (crush, repeat, reverser, tapestop)
    #[arg(short, long, conflicts_with = "preset")]
    effect: Option<String>,

    /// Preset file (TOML)
    #[arg(short, long)]
    preset: Option<PathBuf>,

    /// Engine parameters by name or symbol (e.g., "bpm=120", "active=on")
    #[arg(long, value_parser = parse_key_val)]
    param: Vec<(String, String)>,

    /// Processing block size
    #[arg(long, default_value = "512")]
    block_size: usize,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32", value_parser = parse_bit_depth)]
    bit_depth: u16,
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("Invalid parameter format: '{s}' (expected key=value)"))?;
    Ok((key.trim().to_string(), value.trim().to_string()))
}

fn parse_bit_depth(s: &str) -> Result<u16, String> {
    match s.parse::<u16>() {
        Ok(bits @ (16 | 24 | 32)) => Ok(bits),
        _ => Err(format!("Unsupported bit depth: '{s}' (expected 16, 24, or 32)")),
    }
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    println!("Reading {}...", args.input.display());
    let (samples, spec) = read_wav_stereo(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let sample_rate = spec.sample_rate as f32;

    println!(
        "  {} frames, {} channel(s), {} Hz, {:.2}s",
        samples.len(),
        spec.channels,
        spec.sample_rate,
        samples.len() as f32 / sample_rate
    );

    // Preset values first, command-line --param on top.
    let (effect_id, mut params) = if let Some(preset_path) = &args.preset {
        let preset = Preset::load(preset_path)?;
        println!(
            "Loading preset: {}",
            preset.name.as_deref().unwrap_or(&preset.effect)
        );
        let params = preset.param_pairs();
        (preset.effect, params)
    } else if let Some(effect) = &args.effect {
        (effect.to_lowercase(), Vec::new())
    } else {
        anyhow::bail!("No effect specified. Use --effect or --preset");
    };
    params.extend(args.param);

    let registry = EffectRegistry::new();
    let mut renderer =
        BlockRenderer::from_registry(&registry, &effect_id, sample_rate, args.block_size)?;
    for (name, value) in &params {
        let index = renderer.set_param_text(name, value)?;
        if let Some(desc) = renderer.effect().effect_param_info(index) {
            let applied = renderer.effect().effect_get_param(index);
            println!("  {} = {}", desc.name, desc.format_value(applied));
        }
    }

    tracing::info!(
        effect = %effect_id,
        block_size = renderer.block_size(),
        "rendering"
    );
    println!("Processing with {effect_id}...");

    let pb = ProgressBar::new(samples.len() as u64);
    let style = ProgressStyle::with_template(
        "[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
    )?
    .progress_chars("##-");
    pb.set_style(style);
    let output = renderer.render_with_progress(&samples, |frames| pb.inc(frames as u64));
    pb.finish_with_message("done");

    println!("\nStats:");
    println!("  Input:  Peak {:.1} dB", linear_to_db(samples.peak()));
    println!("  Output: Peak {:.1} dB", linear_to_db(output.peak()));

    let out_spec = WavSpec {
        channels: 2,
        sample_rate: spec.sample_rate,
        bits_per_sample: args.bit_depth,
    };

    println!("\nWriting {}...", args.output.display());
    write_wav_stereo(&args.output, &output, out_spec)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    println!("Done!");

    Ok(())
}

fn linear_to_db(linear: f32) -> f32 {
    if linear <= 0.0 {
        -120.0
    } else {
        20.0 * linear.log10()
    }
}
