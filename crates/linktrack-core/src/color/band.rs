use serde::{Deserialize, Serialize};

use crate::consts::{
    CHANNEL_MAX, DEFAULT_HUE_TOLERANCE, DEFAULT_SATURATION_TOLERANCE, DEFAULT_VALUE_TOLERANCE,
    HUE_MAX,
};
use crate::error::{LinkTrackError, Result};

/// Calibrated HSV color of a marker plus the tolerance accepted around it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HsvBand {
    pub hue: i32,
    pub saturation: i32,
    pub value: i32,
    #[serde(default = "default_hue_tolerance")]
    pub hue_tolerance: i32,
    #[serde(default = "default_saturation_tolerance")]
    pub saturation_tolerance: i32,
    #[serde(default = "default_value_tolerance")]
    pub value_tolerance: i32,
}

fn default_hue_tolerance() -> i32 {
    DEFAULT_HUE_TOLERANCE
}
fn default_saturation_tolerance() -> i32 {
    DEFAULT_SATURATION_TOLERANCE
}
fn default_value_tolerance() -> i32 {
    DEFAULT_VALUE_TOLERANCE
}

/// Inclusive range on one channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChannelRange {
    pub min: u8,
    pub max: u8,
}

impl ChannelRange {
    pub fn contains(&self, v: u8) -> bool {
        v >= self.min && v <= self.max
    }
}

/// Thresholds derived from an [`HsvBand`], ready for mask evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HsvBounds {
    pub hue: ChannelRange,
    /// Second hue range when the band crosses the hue wrap point.
    pub hue_wrap: Option<ChannelRange>,
    pub saturation: ChannelRange,
    pub value: ChannelRange,
}

impl HsvBounds {
    pub fn contains(&self, h: u8, s: u8, v: u8) -> bool {
        if !self.saturation.contains(s) || !self.value.contains(v) {
            return false;
        }
        self.hue.contains(h) || self.hue_wrap.is_some_and(|wrap| wrap.contains(h))
    }
}

impl HsvBand {
    /// Band with the default tolerances.
    pub fn new(hue: i32, saturation: i32, value: i32) -> Self {
        Self {
            hue,
            saturation,
            value,
            hue_tolerance: DEFAULT_HUE_TOLERANCE,
            saturation_tolerance: DEFAULT_SATURATION_TOLERANCE,
            value_tolerance: DEFAULT_VALUE_TOLERANCE,
        }
    }

    pub fn with_tolerances(mut self, hue: i32, saturation: i32, value: i32) -> Self {
        self.hue_tolerance = hue;
        self.saturation_tolerance = saturation;
        self.value_tolerance = value;
        self
    }

    /// Reject bands whose base lies outside the channel domains or whose
    /// tolerances are negative; either would leave an empty range.
    pub fn validate(&self, name: &str) -> Result<()> {
        // Upper bounds are exclusive: hue lives in [0, 180).
        let checks = [
            ("hue", self.hue, HUE_MAX),
            ("saturation", self.saturation, CHANNEL_MAX + 1),
            ("value", self.value, CHANNEL_MAX + 1),
        ];
        for (channel, base, end) in checks {
            if !(0..end).contains(&base) {
                return Err(LinkTrackError::InvalidConfig(format!(
                    "{name} band: base {channel} {base} outside [0, {end})"
                )));
            }
        }
        let tolerances = [
            ("hue", self.hue_tolerance),
            ("saturation", self.saturation_tolerance),
            ("value", self.value_tolerance),
        ];
        for (channel, tol) in tolerances {
            if tol < 0 {
                return Err(LinkTrackError::InvalidConfig(format!(
                    "{name} band: negative {channel} tolerance {tol}"
                )));
            }
        }
        Ok(())
    }

    /// Compute the clamped channel ranges, including the hue wrap range.
    pub fn bounds(&self) -> HsvBounds {
        let hue_min = self.hue - self.hue_tolerance;
        let hue_max = self.hue + self.hue_tolerance;

        let hue_wrap = if hue_min < 0 {
            Some(clamped(HUE_MAX + hue_min, HUE_MAX, HUE_MAX))
        } else if hue_max > HUE_MAX {
            Some(clamped(0, hue_max - HUE_MAX, HUE_MAX))
        } else {
            None
        };

        HsvBounds {
            hue: clamped(hue_min, hue_max, HUE_MAX),
            hue_wrap,
            saturation: clamped(
                self.saturation - self.saturation_tolerance,
                self.saturation + self.saturation_tolerance,
                CHANNEL_MAX,
            ),
            value: clamped(
                self.value - self.value_tolerance,
                self.value + self.value_tolerance,
                CHANNEL_MAX,
            ),
        }
    }
}

fn clamped(min: i32, max: i32, domain_max: i32) -> ChannelRange {
    ChannelRange {
        min: min.clamp(0, domain_max) as u8,
        max: max.clamp(0, domain_max) as u8,
    }
}
