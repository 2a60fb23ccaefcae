//! Known renderer settings and their typed view.

use super::document::Configuration;
use crate::constants::settings as defaults;
use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Frame weighting used when blending frames.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BlurWeighting {
    /// All frames weighted equally.
    #[default]
    Equal,
    /// Gaussian curve centred on the last frame.
    Gaussian,
    /// Symmetric gaussian curve.
    GaussianSym,
    /// Linear ramp towards the last frame.
    Pyramid,
    /// Symmetric linear ramp.
    PyramidSym,
}

impl BlurWeighting {
    /// All weightings in menu order.
    pub const ALL: [Self; 5] = [
        Self::Equal,
        Self::Gaussian,
        Self::GaussianSym,
        Self::Pyramid,
        Self::PyramidSym,
    ];

    /// Name as written in the config file.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Equal => "equal",
            Self::Gaussian => "gaussian",
            Self::GaussianSym => "gaussian_sym",
            Self::Pyramid => "pyramid",
            Self::PyramidSym => "pyramid_sym",
        }
    }
}

impl fmt::Display for BlurWeighting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlurWeighting {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|w| w.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                let names: Vec<_> = Self::ALL.iter().map(|w| w.as_str()).collect();
                format!("expected one of: {}", names.join(", "))
            })
    }
}

/// Value type of a setting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettingKind {
    /// `true` / `false`.
    Bool,
    /// Decimal clamped to `0..=max`.
    Decimal {
        /// Inclusive upper bound.
        max: f64,
    },
    /// Integer clamped to `min..=max`.
    Integer {
        /// Inclusive lower bound.
        min: i64,
        /// Inclusive upper bound.
        max: i64,
    },
    /// One of [`BlurWeighting`].
    Weighting,
}

/// A setting the editor knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setting {
    /// `blur.blur`
    Blur,
    /// `blur.blur amount`
    BlurAmount,
    /// `blur.blur weighting`
    BlurWeighting,
    /// `interpolation.interpolate`
    Interpolate,
    /// `interpolation.interpolated fps`
    InterpolatedFps,
    /// `rendering.quality`
    Quality,
    /// `rendering.deduplicate`
    Deduplicate,
    /// `rendering.preview`
    Preview,
}

impl Setting {
    /// Every known setting in file order.
    pub const ALL: [Self; 8] = [
        Self::Blur,
        Self::BlurAmount,
        Self::BlurWeighting,
        Self::Interpolate,
        Self::InterpolatedFps,
        Self::Quality,
        Self::Deduplicate,
        Self::Preview,
    ];

    /// Short command-line identifier.
    pub const fn id(self) -> &'static str {
        match self {
            Self::Blur => "blur",
            Self::BlurAmount => "blur-amount",
            Self::BlurWeighting => "blur-weighting",
            Self::Interpolate => "interpolate",
            Self::InterpolatedFps => "interpolated-fps",
            Self::Quality => "quality",
            Self::Deduplicate => "deduplicate",
            Self::Preview => "preview",
        }
    }

    /// Section the setting lives in.
    pub const fn section(self) -> &'static str {
        match self {
            Self::Blur | Self::BlurAmount | Self::BlurWeighting => "blur",
            Self::Interpolate | Self::InterpolatedFps => "interpolation",
            Self::Quality | Self::Deduplicate | Self::Preview => "rendering",
        }
    }

    /// Key inside the section.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Blur => "blur",
            Self::BlurAmount => "blur amount",
            Self::BlurWeighting => "blur weighting",
            Self::Interpolate => "interpolate",
            Self::InterpolatedFps => "interpolated fps",
            Self::Quality => "quality",
            Self::Deduplicate => "deduplicate",
            Self::Preview => "preview",
        }
    }

    /// Human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Blur => "Enable Blur",
            Self::BlurAmount => "Blur Amount",
            Self::BlurWeighting => "Blur Weighting",
            Self::Interpolate => "Enable Interpolation",
            Self::InterpolatedFps => "Interpolated FPS",
            Self::Quality => "Quality (0=highest)",
            Self::Deduplicate => "Remove Duplicate Frames",
            Self::Preview => "Enable Preview Window",
        }
    }

    /// Value type.
    pub const fn kind(self) -> SettingKind {
        match self {
            Self::Blur | Self::Interpolate | Self::Deduplicate | Self::Preview => SettingKind::Bool,
            Self::BlurAmount => SettingKind::Decimal {
                max: defaults::BLUR_AMOUNT_MAX,
            },
            Self::BlurWeighting => SettingKind::Weighting,
            Self::InterpolatedFps => SettingKind::Integer {
                min: defaults::INTERPOLATED_FPS_RANGE.0,
                max: defaults::INTERPOLATED_FPS_RANGE.1,
            },
            Self::Quality => SettingKind::Integer {
                min: defaults::QUALITY_RANGE.0,
                max: defaults::QUALITY_RANGE.1,
            },
        }
    }

    /// Default value in file form.
    pub fn default_value(self) -> String {
        match self {
            Self::Blur => defaults::BLUR.to_string(),
            Self::BlurAmount => format_decimal(defaults::BLUR_AMOUNT),
            Self::BlurWeighting => BlurWeighting::default().to_string(),
            Self::Interpolate => defaults::INTERPOLATE.to_string(),
            Self::InterpolatedFps => defaults::INTERPOLATED_FPS.to_string(),
            Self::Quality => defaults::QUALITY.to_string(),
            Self::Deduplicate => defaults::DEDUPLICATE.to_string(),
            Self::Preview => defaults::PREVIEW.to_string(),
        }
    }

    /// Resolve a setting from its id (`blur-amount`) or path (`blur.blur amount`).
    pub fn from_name(name: &str) -> Result<Self> {
        let wanted = name.trim();
        Self::ALL
            .into_iter()
            .find(|s| {
                s.id().eq_ignore_ascii_case(wanted)
                    || wanted
                        .split_once('.')
                        .is_some_and(|(sec, key)| sec == s.section() && key == s.key())
            })
            .ok_or_else(|| Error::UnknownSetting {
                name: name.to_string(),
            })
    }

    /// Coerce user input into the canonical file form.
    ///
    /// Numbers are clamped to the setting's range; integers are truncated.
    pub fn coerce(self, value: &str) -> Result<String> {
        let invalid = |reason: String| Error::InvalidSettingValue {
            setting: self.id().to_string(),
            value: value.to_string(),
            reason,
        };

        match self.kind() {
            SettingKind::Bool => parse_bool(value)
                .map(|b| b.to_string())
                .ok_or_else(|| invalid("expected true or false".to_string())),
            SettingKind::Decimal { max } => parse_finite(value)
                .map(|v| format_decimal(v.clamp(0.0, max)))
                .ok_or_else(|| invalid("expected a number".to_string())),
            SettingKind::Integer { min, max } => parse_integer(value)
                .map(|v| v.clamp(min, max).to_string())
                .ok_or_else(|| invalid("expected a whole number".to_string())),
            SettingKind::Weighting => value
                .parse::<BlurWeighting>()
                .map(|w| w.to_string())
                .map_err(invalid),
        }
    }
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.section(), self.key())
    }
}

/// Typed view over the known settings, with defaults filled in.
#[derive(Debug, Clone, PartialEq)]
pub struct BlurSettings {
    /// Blur enabled.
    pub blur: bool,
    /// Blur amount, 0-5.
    pub blur_amount: f64,
    /// Frame weighting.
    pub blur_weighting: BlurWeighting,
    /// Frame interpolation enabled.
    pub interpolate: bool,
    /// Target frame rate of interpolation.
    pub interpolated_fps: i64,
    /// Encoder quality (CRF), 0 is best.
    pub quality: i64,
    /// Drop duplicate frames before blending.
    pub deduplicate: bool,
    /// Show the renderer's preview window.
    pub preview: bool,
}

impl Default for BlurSettings {
    fn default() -> Self {
        Self {
            blur: defaults::BLUR,
            blur_amount: defaults::BLUR_AMOUNT,
            blur_weighting: BlurWeighting::default(),
            interpolate: defaults::INTERPOLATE,
            interpolated_fps: defaults::INTERPOLATED_FPS,
            quality: defaults::QUALITY,
            deduplicate: defaults::DEDUPLICATE,
            preview: defaults::PREVIEW,
        }
    }
}

impl BlurSettings {
    /// Read the known settings. Missing or unreadable values use their default.
    pub fn from_config(config: &Configuration) -> Self {
        let d = Self::default();
        let raw = |s: Setting| config.get(s.section(), s.key());
        // A flag is on only when spelled exactly `true`.
        let flag = |s: Setting, default: bool| raw(s).map_or(default, |v| v == "true");

        Self {
            blur: flag(Setting::Blur, d.blur),
            blur_amount: raw(Setting::BlurAmount)
                .and_then(parse_finite)
                .unwrap_or(d.blur_amount),
            blur_weighting: raw(Setting::BlurWeighting)
                .and_then(|v| v.parse().ok())
                .unwrap_or(d.blur_weighting),
            interpolate: flag(Setting::Interpolate, d.interpolate),
            interpolated_fps: raw(Setting::InterpolatedFps)
                .and_then(parse_integer)
                .unwrap_or(d.interpolated_fps),
            quality: raw(Setting::Quality)
                .and_then(parse_integer)
                .unwrap_or(d.quality),
            deduplicate: flag(Setting::Deduplicate, d.deduplicate),
            preview: flag(Setting::Preview, d.preview),
        }
    }

    /// Value formatted the way the editor displays it.
    pub fn display_value(&self, setting: Setting) -> String {
        match setting {
            Setting::Blur => self.blur.to_string(),
            Setting::BlurAmount => format!("{:.1}", self.blur_amount),
            Setting::BlurWeighting => self.blur_weighting.to_string(),
            Setting::Interpolate => self.interpolate.to_string(),
            Setting::InterpolatedFps => format!("{:03}", self.interpolated_fps),
            Setting::Quality => format!("{:02}", self.quality),
            Setting::Deduplicate => self.deduplicate.to_string(),
            Setting::Preview => self.preview.to_string(),
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_finite(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[allow(clippy::cast_possible_truncation)]
fn parse_integer(value: &str) -> Option<i64> {
    let value = value.trim();
    if let Ok(v) = value.parse::<i64>() {
        return Some(v);
    }
    parse_finite(value).map(|v| v.trunc() as i64)
}

/// Decimals keep at least one fractional digit (`1.0`, `2.5`).
fn format_decimal(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}
