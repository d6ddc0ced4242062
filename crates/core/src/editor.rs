//! An editing session driven by explicit commands.
//!
//! Each UI intent is a [`Command`]. [`Editor::dispatch`] applies it
//! synchronously and reports an [`Outcome`]: an optional transient
//! [`Notice`] for the user and whether the history list changed and should
//! be written back with [`save_history`](crate::history::save_history).
//! Rejected edits leave the editor unchanged.

use std::fmt;
use std::time::Duration;

use crate::css::{export, to_css, ExportFormat};
use crate::error::GradientError;
use crate::gradient::{GradientKind, GradientSpec, RadialShape, RadialSize};
use crate::history::{History, SaveOutcome};
use crate::preset::Preset;
use crate::random::Xorshift64;

/// How long a notice stays visible before it dismisses itself.
pub const NOTICE_TIMEOUT: Duration = Duration::from_secs(2);

/// A transient user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    message: String,
}

impl Notice {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Auto-dismiss delay; the same for every notice.
    pub fn timeout(&self) -> Duration {
        NOTICE_TIMEOUT
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Every operation the editor surface can request.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Insert a random-colored stop in the widest gap.
    AddStop,
    RemoveStop(u32),
    /// Raw user input; invalid hex is ignored.
    SetStopColor { id: u32, color: String },
    SetStopOpacity { id: u32, opacity: f64 },
    SetStopPosition { id: u32, position: i32 },
    SetKind(GradientKind),
    SetRepeating(bool),
    ToggleRepeating,
    SetRadialShape(RadialShape),
    SetRadialSize(RadialSize),
    SetAngle(i32),
    SetFormat(ExportFormat),
    Randomize,
    LoadPreset(String),
    /// Snapshot the current gradient into history at `created_at` (unix ms).
    Save { created_at: u64 },
    LoadSaved(usize),
    DeleteSaved(usize),
}

/// What a dispatched command produced besides the state change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outcome {
    pub notice: Option<Notice>,
    pub history_changed: bool,
}

impl Outcome {
    fn quiet() -> Self {
        Self::default()
    }

    fn notice(message: impl Into<String>) -> Self {
        Self {
            notice: Some(Notice::new(message)),
            history_changed: false,
        }
    }

    fn history(message: impl Into<String>) -> Self {
        Self {
            notice: Some(Notice::new(message)),
            history_changed: true,
        }
    }
}

/// Destination for the "copy" action.
pub trait ClipboardSink {
    fn write_text(&mut self, text: &str) -> Result<(), String>;
}

/// The single owned editing session: current gradient, selected export
/// format, saved history, and the PRNG behind random colors.
#[derive(Debug, Clone)]
pub struct Editor {
    spec: GradientSpec,
    format: ExportFormat,
    history: History,
    rng: Xorshift64,
}

impl Editor {
    /// Starts a session on the default gradient.
    pub fn new(history: History, seed: u64) -> Self {
        Self {
            spec: GradientSpec::default(),
            format: ExportFormat::default(),
            history,
            rng: Xorshift64::new(seed),
        }
    }

    pub fn with_spec(mut self, spec: GradientSpec) -> Self {
        self.spec = spec;
        self
    }

    pub fn spec(&self) -> &GradientSpec {
        &self.spec
    }

    pub fn format(&self) -> ExportFormat {
        self.format
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// The preview's CSS gradient string.
    pub fn css(&self) -> String {
        to_css(&self.spec)
    }

    /// The output panel text in the selected format.
    pub fn output(&self) -> String {
        export(&self.css(), self.format)
    }

    /// Consumes the editor and returns the next one plus the outcome.
    pub fn apply(mut self, command: Command) -> (Self, Outcome) {
        let outcome = self.dispatch(command);
        (self, outcome)
    }

    /// Applies `command` in place.
    pub fn dispatch(&mut self, command: Command) -> Outcome {
        tracing::trace!(?command, "dispatch");
        match command {
            Command::AddStop => {
                self.spec.add_random_stop(&mut self.rng);
                Outcome::quiet()
            }
            Command::RemoveStop(id) => match self.spec.remove_stop(id) {
                Ok(_) => Outcome::quiet(),
                Err(GradientError::StopFloor { min }) => {
                    Outcome::notice(format!("You need at least {min} color stops"))
                }
                Err(e) => rejected(&e),
            },
            Command::SetStopColor { id, color } => self
                .spec
                .set_stop_color(id, &color)
                .map_or_else(|e| rejected(&e), |()| Outcome::quiet()),
            Command::SetStopOpacity { id, opacity } => self
                .spec
                .set_stop_opacity(id, opacity)
                .map_or_else(|e| rejected(&e), |()| Outcome::quiet()),
            Command::SetStopPosition { id, position } => self
                .spec
                .set_stop_position(id, position)
                .map_or_else(|e| rejected(&e), |()| Outcome::quiet()),
            Command::SetKind(kind) => {
                self.spec.set_kind(kind);
                Outcome::quiet()
            }
            Command::SetRepeating(repeating) => {
                self.spec.set_repeating(repeating);
                Outcome::quiet()
            }
            Command::ToggleRepeating => {
                self.spec.toggle_repeating();
                Outcome::quiet()
            }
            Command::SetRadialShape(shape) => {
                self.spec.set_radial_shape(shape);
                Outcome::quiet()
            }
            Command::SetRadialSize(size) => {
                self.spec.set_radial_size(size);
                Outcome::quiet()
            }
            Command::SetAngle(angle) => {
                self.spec.set_angle(angle);
                Outcome::quiet()
            }
            Command::SetFormat(format) => {
                self.format = format;
                Outcome::quiet()
            }
            Command::Randomize => {
                self.spec.randomize(&mut self.rng);
                Outcome::quiet()
            }
            Command::LoadPreset(name) => match Preset::find(&name) {
                Ok(preset) => {
                    self.spec = preset.spec();
                    Outcome::notice(format!("Loaded {} gradient", preset.name))
                }
                Err(e) => rejected(&e),
            },
            Command::Save { created_at } => match self.history.save(&self.spec, created_at) {
                SaveOutcome::Duplicate => Outcome::notice("This gradient is already saved"),
                SaveOutcome::Saved { .. } => Outcome::history("Gradient saved to history"),
            },
            Command::LoadSaved(index) => match self.history.get(index) {
                Ok(saved) => {
                    self.spec = saved.spec.clone();
                    Outcome::notice("Gradient loaded")
                }
                Err(e) => rejected(&e),
            },
            Command::DeleteSaved(index) => match self.history.delete(index) {
                Ok(_) => Outcome::history("Gradient deleted"),
                Err(e) => rejected(&e),
            },
        }
    }

    /// Writes the current output text to `sink`. One attempt, no retry.
    pub fn copy_output<C: ClipboardSink + ?Sized>(&self, sink: &mut C) -> Notice {
        match sink.write_text(&self.output()) {
            Ok(()) => Notice::new("Copied to clipboard!"),
            Err(e) => {
                tracing::warn!(error = %e, "clipboard write failed");
                Notice::new("Failed to copy")
            }
        }
    }
}

fn rejected(e: &GradientError) -> Outcome {
    tracing::debug!(error = %e, "command rejected");
    Outcome::quiet()
}
