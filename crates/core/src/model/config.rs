use reel_protocol::{MediaSource, SLOT_COUNT, SlotIndex};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_MEDIA: &str = "assets/video-gallery/test-video.mp4";
const DEFAULT_FRAME: &str = "assets/video-gallery/iphone-16-pro.png";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{name} must be within [0, 1], got {value}")]
    ThresholdRange { name: &'static str, value: f64 },
    #[error("exit threshold ({exit}) must be below enter threshold ({enter})")]
    ThresholdOrder { enter: f64, exit: f64 },
    #[error("scale must be positive, got {0}")]
    Scale(f64),
    #[error("gap must be non-negative, got {0}")]
    Gap(f64),
    #[error("center offset must be finite, got {0}")]
    CenterOffset(f64),
    #[error("strip {name} must be positive, got {value}")]
    StripDimension { name: &'static str, value: f64 },
    #[error("media source for slot {0} is empty")]
    EmptyMedia(SlotIndex),
}

/// Construction-time settings of one carousel. Immutable once the controller
/// is built.
///
/// Every field has a default, so a partial JSON object (or `{}`) is a valid
/// configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CarouselConfig {
    pub media: [MediaSource; SLOT_COUNT],
    /// Horizontal space between spread cards.
    pub gap: f64,
    /// Multiplier applied to every card dimension.
    pub scale: f64,
    /// Horizontal shift of the bunched stack.
    pub center_offset: f64,
    /// Visible fraction at or above which the carousel enters view.
    pub enter_threshold: f64,
    /// Visible fraction below which the carousel leaves view.
    pub exit_threshold: f64,
    /// Device frame drawn over each card. Passed through to card views as is.
    pub frame_asset: Option<MediaSource>,
    pub strip: StripConfig,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            media: std::array::from_fn(|_| MediaSource::from(DEFAULT_MEDIA)),
            gap: 24.0,
            scale: 1.0,
            center_offset: 0.0,
            enter_threshold: 0.8,
            exit_threshold: 0.4,
            frame_asset: Some(MediaSource::from(DEFAULT_FRAME)),
            strip: StripConfig::default(),
        }
    }
}

/// Geometry of the control strip, used for placement and indicator sizing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StripConfig {
    /// Distance between the fixed overlay and the bottom of the viewport.
    pub bottom_offset: f64,
    pub controller_height: f64,
    /// Space between the anchor's top edge and the inline strip.
    pub anchor_padding: f64,
    pub indicator_width: f64,
    pub active_indicator_width: f64,
    pub indicator_gap: f64,
}

impl Default for StripConfig {
    fn default() -> Self {
        Self {
            bottom_offset: 32.0,
            controller_height: 48.0,
            anchor_padding: 16.0,
            indicator_width: 8.0,
            active_indicator_width: 32.0,
            indicator_gap: 8.0,
        }
    }
}

impl CarouselConfig {
    /// Parse a JSON configuration and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("enter threshold", self.enter_threshold),
            ("exit threshold", self.exit_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ThresholdRange { name, value });
            }
        }
        if self.exit_threshold >= self.enter_threshold {
            return Err(ConfigError::ThresholdOrder {
                enter: self.enter_threshold,
                exit: self.exit_threshold,
            });
        }
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(ConfigError::Scale(self.scale));
        }
        if !(self.gap.is_finite() && self.gap >= 0.0) {
            return Err(ConfigError::Gap(self.gap));
        }
        if !self.center_offset.is_finite() {
            return Err(ConfigError::CenterOffset(self.center_offset));
        }
        self.strip.validate()?;
        for slot in SlotIndex::ALL {
            if self.media_for(slot).is_empty() {
                return Err(ConfigError::EmptyMedia(slot));
            }
        }
        Ok(())
    }

    pub fn media_for(&self, slot: SlotIndex) -> &MediaSource {
        &self.media[slot.get()]
    }
}

impl StripConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("controller height", self.controller_height),
            ("indicator width", self.indicator_width),
            ("active indicator width", self.active_indicator_width),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::StripDimension { name, value });
            }
        }
        // Offsets and gaps may be zero.
        for (name, value) in [
            ("bottom offset", self.bottom_offset),
            ("anchor padding", self.anchor_padding),
            ("indicator gap", self.indicator_gap),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::StripDimension { name, value });
            }
        }
        Ok(())
    }
}
