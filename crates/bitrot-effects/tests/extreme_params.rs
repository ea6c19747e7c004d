//! Extreme parameter tests for all bitrot engines.
//!
//! Verifies that every engine produces finite (non-NaN, non-Inf) output when
//! parameters are set to their minimum and maximum values, and when running
//! at extreme sample rates (8 kHz and 192 kHz).

use bitrot_core::{Effect, ParameterInfo};
use bitrot_effects::{Crush, Repeat, Reverser, Tapestop};

const DEFAULT_SAMPLE_RATE: f32 = 48000.0;
const LOW_SAMPLE_RATE: f32 = 8000.0;
const HIGH_SAMPLE_RATE: f32 = 192000.0;
const NUM_BLOCKS: usize = 16;
const BLOCK: usize = 256;

/// Process `NUM_BLOCKS` blocks through an engine and assert all outputs are finite.
fn assert_finite_output(effect: &mut dyn Effect, label: &str) {
    let mut out_l = [0.0f32; BLOCK];
    let mut out_r = [0.0f32; BLOCK];
    for block in 0..NUM_BLOCKS {
        let in_l: Vec<f32> = (0..BLOCK)
            .map(|i| match (block * BLOCK + i) % 3 {
                0 => 0.5,
                1 => -0.5,
                _ => 0.0,
            })
            .collect();
        let in_r: Vec<f32> = in_l.iter().map(|s| -s).collect();
        effect.process([&in_l, &in_r], [&mut out_l, &mut out_r]);
        for (i, (l, r)) in out_l.iter().zip(&out_r).enumerate() {
            assert!(
                l.is_finite() && r.is_finite(),
                "{}: non-finite output in block {} frame {}: ({}, {})",
                label,
                block,
                i,
                l,
                r
            );
        }
    }
}

/// Set all parameters to their minimum values using ParameterInfo.
fn set_all_params_min(effect: &mut (impl Effect + ParameterInfo)) {
    for i in 0..effect.param_count() {
        if let Some(desc) = effect.param_info(i) {
            effect.set_param(i, desc.min);
        }
    }
}

/// Set all parameters to their maximum values using ParameterInfo.
fn set_all_params_max(effect: &mut (impl Effect + ParameterInfo)) {
    for i in 0..effect.param_count() {
        if let Some(desc) = effect.param_info(i) {
            effect.set_param(i, desc.max);
        }
    }
}

/// Run the full extreme parameter suite for a single engine.
fn run_extreme_test<E: Effect + ParameterInfo>(name: &str, mut create: impl FnMut(f32) -> E) {
    // All params at minimum
    let mut effect = create(DEFAULT_SAMPLE_RATE);
    set_all_params_min(&mut effect);
    assert_finite_output(&mut effect, &format!("{name} (min params)"));

    // All params at maximum (every toggle on)
    let mut effect = create(DEFAULT_SAMPLE_RATE);
    set_all_params_max(&mut effect);
    assert_finite_output(&mut effect, &format!("{name} (max params)"));

    // Low sample rate, max params
    let mut effect = create(LOW_SAMPLE_RATE);
    set_all_params_max(&mut effect);
    assert_finite_output(&mut effect, &format!("{name} @ 8kHz"));

    // High sample rate, max params
    let mut effect = create(HIGH_SAMPLE_RATE);
    set_all_params_max(&mut effect);
    assert_finite_output(&mut effect, &format!("{name} @ 192kHz"));

    // Sample rate change while active
    let mut effect = create(LOW_SAMPLE_RATE);
    set_all_params_max(&mut effect);
    assert_finite_output(&mut effect, &format!("{name} before rate change"));
    effect.set_sample_rate(HIGH_SAMPLE_RATE);
    assert_finite_output(&mut effect, &format!("{name} after rate change"));
}

#[test]
fn test_crush_extreme() {
    run_extreme_test("Crush", |sr| {
        let mut crush = Crush::new();
        crush.set_sample_rate(sr);
        crush
    });
}

#[test]
fn test_repeat_extreme() {
    run_extreme_test("Repeat", Repeat::new);
}

#[test]
fn test_reverser_extreme() {
    run_extreme_test("Reverser", Reverser::new);
}

#[test]
fn test_tapestop_extreme() {
    run_extreme_test("Tapestop", |sr| {
        let mut tapestop = Tapestop::new();
        tapestop.set_sample_rate(sr);
        tapestop
    });
}

#[test]
fn test_zero_length_block() {
    let mut engines: Vec<Box<dyn Effect>> = vec![
        Box::new(Crush::new()),
        Box::new(Repeat::new(DEFAULT_SAMPLE_RATE)),
        Box::new(Reverser::new(DEFAULT_SAMPLE_RATE)),
        Box::new(Tapestop::new()),
    ];
    for engine in &mut engines {
        engine.process([&[], &[]], [&mut [], &mut []]);
    }
}

#[test]
fn test_out_of_range_params_stay_finite() {
    let mut repeat = Repeat::new(DEFAULT_SAMPLE_RATE);
    repeat.set_param(Repeat::ACTIVE, 1.0);
    repeat.set_param(Repeat::BPM, 0.0);
    repeat.set_param(Repeat::DIVISION, -3.0);
    assert!(repeat.loop_length() > 0.0);
    assert_finite_output(&mut repeat, "Repeat (out of range)");

    let mut crush = Crush::new();
    crush.set_param(Crush::DOWNSAMPLE, -5.0);
    assert_finite_output(&mut crush, "Crush (negative downsample)");
}
