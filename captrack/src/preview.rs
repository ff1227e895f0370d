//! Preview subcommand - play a clip headlessly and print caption changes.
//!
//! Drives the same player, caption overlay and scrub bar a UI would use,
//! stepping the clock at a fixed frame rate.

use crate::config::LayoutArgs;
use captrack_core::language::LanguageSet;
use captrack_core::layout::TranscriptLayout;
use captrack_core::overlay::CaptionOverlay;
use captrack_core::player::{Player, PlayerEvent};
use captrack_core::progress::TrackGeometry;
use captrack_core::scrub::ScrubBar;
use captrack_core::selector::{language_selector, parse_speed, speed_label, speed_selector};
use color_eyre::Section;
use eyre::{Context, Result, eyre};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::rc::Rc;

/// CLI arguments for headless preview.
#[derive(clap::Args, Debug)]
pub struct Args {
    /// Clip name or path; only its file stem is used
    pub clip: PathBuf,

    #[command(flatten)]
    pub layout: LayoutArgs,

    /// Comma-separated languages available for this clip
    #[arg(long, default_value_t = LanguageSet::default())]
    pub languages: LanguageSet,

    /// Caption language, one of --languages (default: the first)
    #[arg(long)]
    pub language: Option<String>,

    /// Playback speed, e.g. `1.5x`
    #[arg(long, default_value = "1x", value_parser = speed_arg)]
    pub speed: f32,

    /// Simulated frames per second
    #[arg(long, default_value_t = 10)]
    pub fps: u32,

    /// Clip duration in seconds (default: end of the last caption)
    #[arg(long)]
    pub duration: Option<f32>,

    /// Simulated progress bar width in pixels
    #[arg(long, default_value_t = 400.0)]
    pub width: f32,
}

fn speed_arg(s: &str) -> std::result::Result<f32, String> {
    parse_speed(s).ok_or_else(|| format!("invalid speed: {s:?}"))
}

/// Resolved configuration for headless preview.
#[derive(Debug)]
pub struct Config {
    pub clip: PathBuf,
    pub language: String,
    pub overlay: CaptionOverlay,
    pub duration: f32,
    pub speed: f32,
    pub fps: u32,
    pub width: f32,
}

impl TryFrom<Args> for Config {
    type Error = eyre::Error;

    fn try_from(args: Args) -> Result<Self> {
        if args.fps == 0 {
            return Err(eyre!("--fps must be positive"));
        }
        if !(args.width.is_finite() && args.width > 0.0) {
            return Err(eyre!("--width must be positive"));
        }

        let mut selector = language_selector(&args.languages);
        if let Some(name) = args.language.as_deref()
            && selector.select_label(name).is_none()
        {
            return Err(eyre!("unknown caption language: {name:?}")
                .suggestion(format!("choose one of: {}", args.languages)));
        }
        let language = selector.value().clone();

        let layout: TranscriptLayout = args.layout.into();

        let build = layout
            .load_index(&language, &args.clip)
            .wrap_err("failed to load transcript")?;
        let overlay = CaptionOverlay::new(build.map(|b| b.index));

        let caption_end = overlay
            .index()
            .and_then(|index| index.runs().last().map(|&(_, end, _)| end as f32));

        let duration = args.duration.or(caption_end).ok_or_else(|| {
            eyre!("no duration for {:?} in {language}", args.clip.display())
                .suggestion("pass --duration or run `cap transcribe` first")
        })?;

        Ok(Self {
            clip: args.clip,
            language,
            overlay,
            duration,
            speed: args.speed,
            fps: args.fps,
            width: args.width,
        })
    }
}

/// A caption change observed during playback.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub position: f32,
    pub second: u64,
    pub caption: String,
    /// Painted fill inset of the scrub bar
    pub fill: f32,
}

pub fn execute(config: Config) -> Result<()> {
    tracing::info!(
        clip = ?config.clip.display(),
        language = %config.language,
        duration = config.duration,
        speed = %speed_label(config.speed),
        "previewing captions"
    );

    let frames = simulate(
        &config.overlay,
        config.duration,
        config.speed,
        config.fps,
        config.width,
    );

    for frame in frames {
        println!(
            "{:>8.2}s  fill {:>8.1}  {}",
            frame.position, frame.fill, frame.caption
        );
    }

    Ok(())
}

/// Play the clip to the end and collect every caption change.
pub fn simulate(
    overlay: &CaptionOverlay,
    duration: f32,
    speed: f32,
    fps: u32,
    width: f32,
) -> Vec<Frame> {
    let mut speeds = speed_selector();
    if speeds.select_label(&speed_label(speed)).is_none() {
        tracing::warn!(speed, "speed is not a dropdown preset");
    }

    let events = Rc::new(RefCell::new(VecDeque::new()));
    let mut player = Player::new();
    {
        let events = Rc::clone(&events);
        player.on_event(move |event| events.borrow_mut().push_back(*event));
    }

    let mut bar = ScrubBar::new(TrackGeometry::new(0.0, width));
    let mut frames: Vec<Frame> = Vec::new();
    let mut record = |position: f32, second: u64, bar: &ScrubBar| {
        let caption = overlay.caption_at(second).as_display();
        if frames.last().is_none_or(|f| f.caption != caption) {
            frames.push(Frame {
                position,
                second,
                caption: caption.to_string(),
                fill: bar.painted_offset(),
            });
        }
    };

    player.prepare(duration);
    player.set_speed(speed);
    player.play();
    bar.sync(player.fraction());
    record(player.position(), player.current_second(), &bar);

    let dt = 1.0 / fps as f32;
    let max_frames = (duration / (dt * player.speed())).ceil() as usize + 1;

    'playback: for _ in 0..max_frames {
        player.tick(dt);
        bar.tick(dt);

        while let Some(event) = events.borrow_mut().pop_front() {
            match event {
                PlayerEvent::Tick { position, second } => {
                    bar.sync(player.fraction());
                    record(position, second, &bar);
                }
                PlayerEvent::Finished => break 'playback,
                PlayerEvent::Prepared { .. } | PlayerEvent::Seeked { .. } => {}
            }
        }
    }

    frames
}
