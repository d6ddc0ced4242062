//! Gradient selection flags shared by every subcommand that needs a gradient.
//!
//! A gradient starts from one source (`--preset`, `--saved`, a list of
//! `--stop`s, or the default) and then has the style flags applied on top,
//! all routed through the editor's command dispatch.

use clap::Args;
use gradient_studio_core::history::unix_millis;
use gradient_studio_core::{
    ColorStop, Command, Editor, GradientKind, GradientSpec, HexColor, History, Preset,
    RadialShape, RadialSize,
};

use crate::error::CliError;

#[derive(Args, Debug, Clone, Default)]
pub struct GradientArgs {
    /// Color stop as HEX[@POS[:OPACITY]], e.g. `#ff5f6d@0` or `#fff@50:0.4`.
    /// Repeat once per stop; stops without a position are spread evenly.
    #[arg(long = "stop", value_name = "HEX@POS[:OPACITY]", conflicts_with_all = ["preset", "saved"])]
    pub stops: Vec<String>,

    /// Start from a preset (case-insensitive name, see `presets`).
    #[arg(long, conflicts_with = "saved")]
    pub preset: Option<String>,

    /// Start from a saved gradient (index as shown by `history list`).
    #[arg(long, value_name = "INDEX")]
    pub saved: Option<usize>,

    /// Gradient type: linear or radial.
    #[arg(long)]
    pub kind: Option<GradientKind>,

    /// Linear angle in degrees.
    #[arg(long, allow_negative_numbers = true)]
    pub angle: Option<i32>,

    /// Use the repeating variant.
    #[arg(long)]
    pub repeating: bool,

    /// Radial shape: circle or ellipse.
    #[arg(long)]
    pub shape: Option<RadialShape>,

    /// Radial size keyword, e.g. farthest-corner.
    #[arg(long)]
    pub size: Option<RadialSize>,

    /// Randomize stop colors, interior positions, and the linear angle.
    #[arg(long)]
    pub random: bool,

    /// PRNG seed for `--random` (defaults to the current time).
    #[arg(long, requires = "random")]
    pub seed: Option<u64>,
}

/// One parsed `--stop` value.
#[derive(Debug, Clone, PartialEq)]
pub struct StopArg {
    pub color: HexColor,
    pub position: Option<i32>,
    pub opacity: f64,
}

/// Parses `HEX[@POS[:OPACITY]]`.
pub fn parse_stop(raw: &str) -> Result<StopArg, CliError> {
    let bad = |why: &str| CliError::Input(format!("invalid --stop {raw:?}: {why}"));

    let (hex, rest) = match raw.split_once('@') {
        Some((hex, rest)) => (hex, Some(rest)),
        None => (raw, None),
    };
    let color = HexColor::parse(hex.trim()).map_err(|e| bad(&e.to_string()))?;

    let (position, opacity) = match rest {
        None => (None, 1.0),
        Some(rest) => {
            let (pos, opacity) = match rest.split_once(':') {
                Some((pos, opacity)) => (pos, Some(opacity)),
                None => (rest, None),
            };
            let pos = pos
                .trim()
                .trim_end_matches('%')
                .parse::<i32>()
                .map_err(|_| bad("position must be an integer"))?;
            let opacity = match opacity {
                Some(o) => o
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|o| o.is_finite())
                    .ok_or_else(|| bad("opacity must be a number"))?,
                None => 1.0,
            };
            (Some(pos), opacity)
        }
    };

    Ok(StopArg {
        color,
        position,
        opacity,
    })
}

/// Builds a gradient from parsed stops, spreading unpositioned stops evenly.
pub fn spec_from_stops(stops: Vec<StopArg>) -> Result<GradientSpec, CliError> {
    let last = i32::try_from(stops.len().saturating_sub(1)).unwrap_or(i32::MAX).max(1);
    let stops = stops
        .into_iter()
        .zip(1_u32..)
        .map(|(stop, id)| {
            let index = i32::try_from(id - 1).unwrap_or(i32::MAX);
            let position = stop.position.unwrap_or_else(|| index.saturating_mul(100) / last);
            ColorStop::new(id, stop.color, position, stop.opacity)
        })
        .collect();
    Ok(GradientSpec::from_stops(stops)?)
}

impl GradientArgs {
    /// Opens an editor on the selected gradient with every style flag applied.
    ///
    /// Unlike the interactive editor, an unknown preset or saved index is an
    /// error here rather than a silent no-op.
    pub fn editor(&self, history: History) -> Result<Editor, CliError> {
        let seed = self.seed.unwrap_or_else(unix_millis);
        let mut editor = Editor::new(history, seed);

        let mut commands = Vec::new();
        if let Some(name) = &self.preset {
            commands.push(Command::LoadPreset(Preset::find(name)?.name.to_string()));
        } else if let Some(index) = self.saved {
            editor.history().get(index)?;
            commands.push(Command::LoadSaved(index));
        } else if !self.stops.is_empty() {
            let stops = self
                .stops
                .iter()
                .map(|raw| parse_stop(raw))
                .collect::<Result<Vec<_>, _>>()?;
            editor = editor.with_spec(spec_from_stops(stops)?);
        }
        commands.extend(self.style_commands());

        for command in commands {
            if let Some(notice) = editor.dispatch(command).notice {
                tracing::debug!(%notice, "gradient selection");
            }
        }
        Ok(editor)
    }

    fn style_commands(&self) -> Vec<Command> {
        let mut commands = Vec::new();
        if let Some(kind) = self.kind {
            commands.push(Command::SetKind(kind));
        }
        if self.random {
            commands.push(Command::Randomize);
        }
        if let Some(angle) = self.angle {
            commands.push(Command::SetAngle(angle));
        }
        if self.repeating {
            commands.push(Command::SetRepeating(true));
        }
        if let Some(shape) = self.shape {
            commands.push(Command::SetRadialShape(shape));
        }
        if let Some(size) = self.size {
            commands.push(Command::SetRadialSize(size));
        }
        commands
    }
}
