//! Gesture scripts
//!
//! Each `--gesture` argument is one line of a tiny command language:
//!
//! ```text
//! drag <column> <pixels>            slow drag, no momentum
//! flick <column> <pixels> <ms>      fast drag released with momentum
//! wheel <column> <delta>            one wheel notch
//! key <column> up|down|pageup|pagedown|home|end
//! set <date>                        programmatic jump, silent
//! select <date>                     programmatic jump, notifies
//! ```
//!
//! Positive pixel counts scroll towards later values.

use anyhow::{anyhow, bail, Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use tumbler_core::events::KeyCode;

/// One parsed gesture
#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    Drag { column: usize, pixels: f32 },
    Flick { column: usize, pixels: f32, millis: f64 },
    Wheel { column: usize, delta: f32 },
    Key { column: usize, key: KeyCode },
    Set(NaiveDateTime),
    Select(NaiveDateTime),
}

impl Gesture {
    pub fn parse(line: &str) -> Result<Self> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let gesture = match words.as_slice() {
            ["drag", column, pixels] => Gesture::Drag {
                column: parse_column(column)?,
                pixels: parse_number(pixels)?,
            },
            ["flick", column, pixels, millis] => {
                let millis: f64 = parse_number(millis)?;
                if millis <= 0.0 {
                    bail!("flick duration must be positive, got {}", millis);
                }
                Gesture::Flick {
                    column: parse_column(column)?,
                    pixels: parse_number(pixels)?,
                    millis,
                }
            }
            ["wheel", column, delta] => Gesture::Wheel {
                column: parse_column(column)?,
                delta: parse_number(delta)?,
            },
            ["key", column, key] => Gesture::Key {
                column: parse_column(column)?,
                key: parse_key(key)?,
            },
            ["set", rest @ ..] if !rest.is_empty() => Gesture::Set(parse_datetime(&rest.join(" "))?),
            ["select", rest @ ..] if !rest.is_empty() => {
                Gesture::Select(parse_datetime(&rest.join(" "))?)
            }
            _ => bail!("unrecognized gesture {:?}", line),
        };
        Ok(gesture)
    }
}

fn parse_column(word: &str) -> Result<usize> {
    word.parse()
        .with_context(|| format!("invalid column index {:?}", word))
}

fn parse_number<T: std::str::FromStr>(word: &str) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    word.parse()
        .with_context(|| format!("invalid number {:?}", word))
}

fn parse_key(word: &str) -> Result<KeyCode> {
    let key = match word.to_ascii_lowercase().as_str() {
        "up" => KeyCode::UP,
        "down" => KeyCode::DOWN,
        "pageup" => KeyCode::PAGE_UP,
        "pagedown" => KeyCode::PAGE_DOWN,
        "home" => KeyCode::HOME,
        "end" => KeyCode::END,
        other => bail!("unknown key {:?}", other),
    };
    Ok(key)
}

/// Parse `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM[:SS]` or `YYYY-MM-DD HH:MM[:SS]`
pub fn parse_datetime(text: &str) -> Result<NaiveDateTime> {
    let text = text.trim();
    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];
    for format in FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(parsed);
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| anyhow!("invalid date {:?}", text))
}
