//! Render a footswitch script against an input file.
//!
//! The input WAV plays the role of the live instrument signal; the script
//! plays the role of the player's feet. Presses go through the same
//! [`PedalSurface`] debouncing a hardware build would use, so double-press
//! gestures behave identically.

use crate::script::{ScriptEvent, load_script};
use crate::wav::{StereoBuffer, read_wav_stereo, write_wav_stereo};
use clap::Args;
use ostinato_control::{CommandQueue, PedalSurface, SwitchFrame};
use ostinato_core::{Looper, LooperConfig, linear_to_db};
use std::path::PathBuf;

/// Minimum time a scripted press is held before release.
const PRESS_HOLD_SECS: f64 = 0.05;

/// Render a footswitch script against an input file.
#[derive(Args)]
pub struct RenderArgs {
    /// Input WAV file (the live signal)
    pub input: PathBuf,

    /// Footswitch script (SECONDS:SWITCH lines)
    pub script: PathBuf,

    /// Output WAV file (32-bit float stereo)
    pub output: PathBuf,

    /// Audio block size in frames
    #[arg(long, default_value_t = 512)]
    pub block_size: usize,

    /// Record threshold in dB; -90 disables gating
    #[arg(long, default_value_t = -90.0, allow_negative_numbers = true)]
    pub threshold: f32,

    /// Dry (live input) level, 0.0 to 1.0
    #[arg(long, default_value_t = 1.0)]
    pub dry: f32,

    /// Extra seconds of silence rendered after the input ends
    #[arg(long, default_value_t = 0.0)]
    pub tail: f64,

    /// Maximum total record time in seconds
    #[arg(long, default_value_t = 60.0)]
    pub max_record_secs: f32,

    /// Maximum number of layers
    #[arg(long, default_value_t = 128)]
    pub max_dubs: usize,
}

/// Switch levels at one instant: a scripted press holds its switch down
/// for `hold_secs` after its scheduled time.
///
/// When the next press of the same switch lands inside the hold, the
/// hold ends at the midpoint of the gap instead, so the two presses keep
/// a released level between them and produce distinct press edges.
fn switch_frame_at(events: &[ScriptEvent], now_secs: f64, hold_secs: f64) -> SwitchFrame {
    let mut frame = SwitchFrame::new();
    for event in events {
        let mut release_secs = event.at_secs + hold_secs;
        for other in events {
            if other.switch == event.switch && other.at_secs > event.at_secs {
                release_secs = release_secs.min((event.at_secs + other.at_secs) / 2.0);
            }
        }
        if now_secs >= event.at_secs && now_secs < release_secs {
            frame.set(event.switch, true);
        }
    }
    frame
}

/// Run the render command.
pub fn run(args: RenderArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.block_size > 0, "block size must be > 0");

    let input = read_wav_stereo(&args.input)?;
    let events = load_script(&args.script)?;
    let sample_rate = input.sample_rate;

    let config = LooperConfig {
        max_dubs: args.max_dubs,
        max_record_secs: args.max_record_secs,
        ..LooperConfig::default()
    };
    let mut looper = Looper::with_config(sample_rate as f32, config);
    looper.set_threshold_db(args.threshold);
    looper.set_dry_level(args.dry);

    let tail_frames = (args.tail * f64::from(sample_rate)) as usize;
    let total_frames = input.len() + tail_frames;
    let mut output = StereoBuffer::silence(total_frames, sample_rate);

    // Input padded with the tail so every block slices cleanly.
    let mut in_left = input.left;
    let mut in_right = input.right;
    in_left.resize(total_frames, 0.0);
    in_right.resize(total_frames, 0.0);

    let block_secs = args.block_size as f64 / f64::from(sample_rate);
    // Presses must span at least one poll even with large blocks.
    let hold_secs = PRESS_HOLD_SECS.max(1.5 * block_secs);

    let mut surface = PedalSurface::new();
    let mut queue = CommandQueue::<8>::new();

    let mut frame_index = 0;
    while frame_index < total_frames {
        let now_secs = frame_index as f64 / f64::from(sample_rate);
        let block = args.block_size.min(total_frames - frame_index);
        let end = frame_index + block;

        let switch_frame = switch_frame_at(&events, now_secs, hold_secs);
        surface.poll(&switch_frame, now_secs, &mut queue);
        for command in queue.iter() {
            tracing::debug!(?command, at_secs = now_secs, "applying command");
            looper.apply(command);
        }
        queue.clear();

        looper.process_block(
            &in_left[frame_index..end],
            &in_right[frame_index..end],
            &mut output.left[frame_index..end],
            &mut output.right[frame_index..end],
        );
        frame_index = end;
    }

    write_wav_stereo(&args.output, &output)?;

    let peak = output
        .left
        .iter()
        .chain(&output.right)
        .fold(0.0f32, |acc, &s| acc.max(s.abs()));
    println!("Rendered:    {}", args.output.display());
    println!(
        "Duration:    {:.3}s ({total_frames} frames)",
        total_frames as f64 / f64::from(sample_rate)
    );
    println!("Layers:      {}", looper.active_dubs());
    println!(
        "Loop:        {:.3}s ({} frames)",
        looper.loop_length() as f64 / f64::from(sample_rate),
        looper.loop_length()
    );
    println!("Peak:        {:.1} dBFS", linear_to_db(peak));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wav::read_wav_stereo;
    use ostinato_control::Switch;

    #[test]
    fn test_switch_frame_holds_press() {
        let events = [
            ScriptEvent {
                at_secs: 1.0,
                switch: Switch::Activate,
            },
            ScriptEvent {
                at_secs: 2.0,
                switch: Switch::Dub,
            },
        ];
        assert!(!switch_frame_at(&events, 0.99, 0.05).is_pressed(Switch::Activate));
        assert!(switch_frame_at(&events, 1.0, 0.05).is_pressed(Switch::Activate));
        assert!(switch_frame_at(&events, 1.04, 0.05).is_pressed(Switch::Activate));
        assert!(!switch_frame_at(&events, 1.06, 0.05).is_pressed(Switch::Activate));
        assert!(switch_frame_at(&events, 2.01, 0.05).is_pressed(Switch::Dub));
    }

    #[test]
    fn test_close_presses_release_between() {
        let events = [
            ScriptEvent {
                at_secs: 1.0,
                switch: Switch::Activate,
            },
            ScriptEvent {
                at_secs: 1.1,
                switch: Switch::Activate,
            },
        ];
        // A hold long enough to reach the second press ends at the
        // midpoint of the gap instead of swallowing it.
        assert!(switch_frame_at(&events, 1.04, 0.2).is_pressed(Switch::Activate));
        assert!(!switch_frame_at(&events, 1.06, 0.2).is_pressed(Switch::Activate));
        assert!(switch_frame_at(&events, 1.11, 0.2).is_pressed(Switch::Activate));
        // A different switch keeps its full hold.
        let other = [ScriptEvent {
            at_secs: 1.0,
            switch: Switch::Dub,
        }];
        assert!(switch_frame_at(&other, 1.15, 0.2).is_pressed(Switch::Dub));
    }

    #[test]
    fn test_render_records_and_plays_loop() {
        let dir = tempfile::tempdir().unwrap();
        let input_path = dir.path().join("in.wav");
        let script_path = dir.path().join("script.txt");
        let output_path = dir.path().join("out.wav");

        // 2 seconds of constant signal at a small sample rate.
        let rate = 8000;
        let buffer = StereoBuffer {
            left: vec![0.5; 2 * rate as usize],
            right: vec![0.5; 2 * rate as usize],
            sample_rate: rate,
        };
        write_wav_stereo(&input_path, &buffer).unwrap();
        // Presses 1.5s apart so the second is not a double press.
        std::fs::write(&script_path, "0.0:activate\n1.5:activate\n").unwrap();

        run(RenderArgs {
            input: input_path,
            script: script_path,
            output: output_path.clone(),
            block_size: 256,
            threshold: -90.0,
            dry: 0.0,
            tail: 0.0,
            max_record_secs: 10.0,
            max_dubs: 8,
        })
        .unwrap();

        let out = read_wav_stereo(&output_path).unwrap();
        assert_eq!(out.len(), 2 * rate as usize);
        // While recording the output is silent (dry muted, nothing plays).
        assert!(out.left[6000].abs() < 1e-6);
        // After the second press the recorded loop plays back.
        assert!((out.left[15000] - 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_scripted_double_press_resets() {
        let dir = tempfile::tempdir().unwrap();
        let input_path = dir.path().join("in.wav");
        let script_path = dir.path().join("script.txt");
        let output_path = dir.path().join("out.wav");

        let rate = 8000;
        let buffer = StereoBuffer {
            left: vec![0.5; 4 * rate as usize],
            right: vec![0.5; 4 * rate as usize],
            sample_rate: rate,
        };
        write_wav_stereo(&input_path, &buffer).unwrap();
        // Record a loop, then two activate presses 0.2s apart: the
        // second registers as a double press and resets the pedal.
        std::fs::write(
            &script_path,
            "0.0:activate\n1.5:activate\n3.0:activate\n3.2:activate\n",
        )
        .unwrap();

        run(RenderArgs {
            input: input_path,
            script: script_path,
            output: output_path.clone(),
            block_size: 256,
            threshold: -90.0,
            dry: 0.0,
            tail: 0.0,
            max_record_secs: 10.0,
            max_dubs: 8,
        })
        .unwrap();

        let out = read_wav_stereo(&output_path).unwrap();
        // The loop plays between the commit and the reset.
        assert!((out.left[20000] - 0.5).abs() < 1e-3);
        // After the reset nothing plays (dry is muted).
        assert!(out.left[28000].abs() < 1e-6);
        assert!(out.left[31000].abs() < 1e-6);
    }
}
