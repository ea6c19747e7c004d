//! Engine listing and parameter table command.

#![allow(clippy::print_literal)] // Table headers use literal strings intentionally

use bitrot_core::{ParamDescriptor, ParamFlags};
use bitrot_registry::EffectRegistry;
use clap::Args;

#[derive(Args)]
pub struct EffectsArgs {
    /// Show the parameter table for a specific engine
    #[arg(value_name = "EFFECT")]
    effect: Option<String>,
}

pub fn run(args: EffectsArgs) -> anyhow::Result<()> {
    let registry = EffectRegistry::new();

    let Some(effect_id) = &args.effect else {
        println!("Available Effects");
        println!("=================");
        println!();
        for effect in registry.all_effects() {
            println!("  {:10} - {}", effect.id, effect.description);
        }
        println!();
        println!("Use 'bitrot effects <name>' for the parameter table.");
        return Ok(());
    };

    let id = effect_id.to_lowercase();
    let descriptor = registry
        .get(&id)
        .ok_or_else(|| anyhow::anyhow!("Unknown effect: {}", effect_id))?;
    let effect = registry
        .create(&id, 48000.0)
        .ok_or_else(|| anyhow::anyhow!("Unknown effect: {}", effect_id))?;

    println!("{}", descriptor.name);
    println!("{}", "=".repeat(descriptor.name.len()));
    println!();
    println!("{}", descriptor.description);
    println!();
    println!("Parameters:");
    println!();
    println!(
        "  {:3}  {:12}  {:18}  {:12}  {:8}  {}",
        "#", "Symbol", "Name", "Range", "Default", "Hints"
    );
    println!(
        "  {:3}  {:12}  {:18}  {:12}  {:8}  {}",
        "-", "------", "----", "-----", "-------", "-----"
    );

    let params: Vec<ParamDescriptor> = (0..effect.effect_param_count())
        .filter_map(|i| effect.effect_param_info(i))
        .collect();
    for (index, desc) in params.iter().enumerate() {
        println!(
            "  {:3}  {:12}  {:18}  {:12}  {:8}  {}",
            index,
            desc.symbol,
            desc.name,
            format_range(desc),
            desc.format_value(desc.default),
            format_hints(desc.flags)
        );
    }

    println!();
    println!("Example usage:");
    println!();
    let example: Vec<String> = params
        .iter()
        .take(2)
        .map(|p| format!("{}={}", p.symbol, p.format_value(p.max)))
        .collect();
    println!(
        "  bitrot process input.wav output.wav --effect {} --param {}",
        descriptor.id,
        example.join(" --param ")
    );

    Ok(())
}

fn format_range(desc: &ParamDescriptor) -> String {
    if desc.flags.contains(ParamFlags::TOGGLE) {
        "off/on".to_string()
    } else if desc.flags.contains(ParamFlags::INTEGER) {
        format!("{}..{}", desc.min as i64, desc.max as i64)
    } else {
        format!("{}..{}", desc.min, desc.max)
    }
}

fn format_hints(flags: ParamFlags) -> String {
    let hints = [
        (ParamFlags::INTEGER, "integer"),
        (ParamFlags::TOGGLE, "toggle"),
        (ParamFlags::TRIGGER, "trigger"),
        (ParamFlags::LOGARITHMIC, "log"),
    ];
    let names: Vec<&str> = hints
        .iter()
        .filter(|(flag, _)| flags.contains(*flag))
        .map(|(_, name)| *name)
        .collect();
    if names.is_empty() {
        "-".to_string()
    } else {
        names.join(", ")
    }
}
