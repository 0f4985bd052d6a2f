//! Tumbler CLI - headless wheel picker driver
//!
//! Mounts a picker on an in-memory surface, replays scripted gestures frame
//! by frame and prints the resulting wheel and date.
//!
//! ```text
//! tumbler --date 2023-01-31 --gesture "drag 0 40" --gesture "key 2 down"
//! ```

mod script;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use tumbler_animation::ManualFrames;
use tumbler_core::events::InputEvent;
use tumbler_picker::{Format, MemorySurface, PickerConfig, WheelPicker, WheelPickerBuilder};

use script::Gesture;

/// Container the headless surface answers to when the config names none
const DEFAULT_CONTAINER: &str = "#tumbler";

/// Upper bound on frames per gesture
const MAX_FRAMES: usize = 10_000;

/// Replay gestures against a headless wheel date picker
#[derive(Parser, Debug)]
#[command(name = "tumbler")]
#[command(about = "Replay gestures against a headless wheel date picker")]
#[command(version)]
struct Args {
    /// TOML picker config
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Columns to show: date, datetime or time
    #[arg(short, long)]
    format: Option<Format>,

    /// Initial date (YYYY-MM-DD or YYYY-MM-DDTHH:MM)
    #[arg(short, long)]
    date: Option<String>,

    /// Month-name locale, e.g. fr-FR
    #[arg(short, long)]
    locale: Option<String>,

    /// Gesture to replay; repeatable
    #[arg(short, long = "gesture")]
    gestures: Vec<String>,

    /// Rows shown above and below the selection
    #[arg(long, default_value = "2")]
    rows: usize,
}

fn load_config(args: &Args) -> Result<PickerConfig> {
    let mut config = match &args.config {
        Some(path) => PickerConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => PickerConfig::default(),
    };
    if config.container.is_none() {
        config.container = Some(DEFAULT_CONTAINER.into());
    }
    if let Some(format) = args.format {
        config.format = format;
    }
    if let Some(date) = &args.date {
        config.initial_date = Some(script::parse_datetime(date).context("invalid --date")?);
    }
    if let Some(locale) = &args.locale {
        config.locale = Some(locale.clone());
    }
    Ok(config)
}

/// Drives a picker with a synthetic clock
struct Driver {
    picker: WheelPicker<MemorySurface>,
    frames: ManualFrames,
    /// Milliseconds
    clock: f64,
}

impl Driver {
    fn advance(&mut self, millis: f64) -> f64 {
        self.clock += millis;
        self.clock
    }

    fn drag(&mut self, column: usize, pixels: f32, millis: f64) {
        let start_y = 0.0;
        let t = self.advance(0.0);
        self.picker
            .handle_event(&InputEvent::pointer_down(column, start_y, t));
        let t = self.advance(millis);
        self.picker
            .handle_event(&InputEvent::pointer_move(column, start_y - pixels, t));
        let t = self.advance(16.0);
        self.picker
            .handle_event(&InputEvent::pointer_up(column, start_y - pixels, t));
    }

    fn apply(&mut self, gesture: &Gesture) {
        match *gesture {
            // Spread over a long interval so the release velocity is negligible
            Gesture::Drag { column, pixels } => self.drag(column, pixels, 60_000.0),
            Gesture::Flick {
                column,
                pixels,
                millis,
            } => self.drag(column, pixels, millis),
            Gesture::Wheel { column, delta } => {
                let t = self.advance(16.0);
                self.picker
                    .handle_event(&InputEvent::wheel(column, delta, t));
            }
            Gesture::Key { column, key } => {
                let t = self.advance(16.0);
                self.picker.handle_event(&InputEvent::key(column, key, t));
            }
            Gesture::Set(date) => self.picker.set_date(date),
            Gesture::Select(date) => self.picker.select_date(date),
        }
    }

    /// Fire frames until every column has settled
    fn settle(&mut self) -> Result<usize> {
        let mut frames = 0;
        while self.frames.take_frame() {
            self.advance(16.0);
            self.picker.tick();
            frames += 1;
            if frames > MAX_FRAMES {
                anyhow::bail!("picker still animating after {} frames", MAX_FRAMES);
            }
        }
        Ok(frames)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;
    let gestures = args
        .gestures
        .iter()
        .map(|line| Gesture::parse(line))
        .collect::<Result<Vec<_>>>()?;

    let container = config
        .container
        .clone()
        .unwrap_or_else(|| DEFAULT_CONTAINER.into());
    let frames = ManualFrames::new();
    let picker = WheelPickerBuilder::new(config)
        .on_change(|date| tracing::info!("changed: {}", date))
        .build(MemorySurface::with_container(container), Box::new(frames.clone()))
        .context("failed to mount picker")?;
    tracing::info!(
        "mounted {} picker at {}",
        picker.format(),
        picker.get_date()
    );

    let mut driver = Driver {
        picker,
        frames,
        clock: 0.0,
    };
    for (gesture, line) in gestures.iter().zip(&args.gestures) {
        driver.apply(gesture);
        let frames = driver
            .settle()
            .with_context(|| format!("gesture {:?} did not settle", line))?;
        tracing::debug!("{:?} settled in {} frames", line, frames);
    }

    print!("{}", driver.picker.surface().render_text(args.rows));
    println!("{}", driver.picker.get_date());
    driver.picker.destroy();
    Ok(())
}
