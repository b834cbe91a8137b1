use serde::{Deserialize, Serialize};

use crate::core::{DisplayFormat, GranularityThresholds, Viewport, ZoomLimits};
use crate::error::{GanttError, GanttResult};

use super::GanttTheme;

/// Public engine bootstrap configuration.
///
/// This type is serializable so host applications can persist/load chart
/// setup without inventing their own ad-hoc format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GanttEngineConfig {
    pub viewport: Viewport,
    #[serde(default)]
    pub zoom_limits: ZoomLimits,
    #[serde(default = "default_base_domain_buffer_days")]
    pub base_domain_buffer_days: f64,
    #[serde(default)]
    pub granularity_thresholds: GranularityThresholds,
    #[serde(default = "default_reset_min_overlap_ratio")]
    pub reset_min_overlap_ratio: f64,
    #[serde(default = "default_zoom_anchor_offset_px")]
    pub zoom_anchor_offset_px: f64,
    #[serde(default = "default_reset_animation_ms")]
    pub reset_animation_ms: f64,
    #[serde(default = "default_wheel_zoom_step")]
    pub wheel_zoom_step: f64,
    #[serde(default)]
    pub initial_format: DisplayFormat,
    #[serde(default)]
    pub theme: GanttTheme,
}

impl GanttEngineConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            zoom_limits: ZoomLimits::default(),
            base_domain_buffer_days: default_base_domain_buffer_days(),
            granularity_thresholds: GranularityThresholds::default(),
            reset_min_overlap_ratio: default_reset_min_overlap_ratio(),
            zoom_anchor_offset_px: default_zoom_anchor_offset_px(),
            reset_animation_ms: default_reset_animation_ms(),
            wheel_zoom_step: default_wheel_zoom_step(),
            initial_format: DisplayFormat::default(),
            theme: GanttTheme::default(),
        }
    }

    #[must_use]
    pub fn with_zoom_limits(mut self, min_scale_factor: f64, max_scale_factor: f64) -> Self {
        self.zoom_limits = ZoomLimits {
            min_scale_factor,
            max_scale_factor,
        };
        self
    }

    #[must_use]
    pub fn with_base_domain_buffer_days(mut self, days: f64) -> Self {
        self.base_domain_buffer_days = days;
        self
    }

    #[must_use]
    pub fn with_granularity_thresholds(mut self, thresholds: GranularityThresholds) -> Self {
        self.granularity_thresholds = thresholds;
        self
    }

    #[must_use]
    pub fn with_reset_min_overlap_ratio(mut self, ratio: f64) -> Self {
        self.reset_min_overlap_ratio = ratio;
        self
    }

    #[must_use]
    pub fn with_zoom_anchor_offset_px(mut self, offset_px: f64) -> Self {
        self.zoom_anchor_offset_px = offset_px;
        self
    }

    #[must_use]
    pub fn with_reset_animation_ms(mut self, duration_ms: f64) -> Self {
        self.reset_animation_ms = duration_ms;
        self
    }

    #[must_use]
    pub fn with_wheel_zoom_step(mut self, step: f64) -> Self {
        self.wheel_zoom_step = step;
        self
    }

    #[must_use]
    pub fn with_initial_format(mut self, format: DisplayFormat) -> Self {
        self.initial_format = format;
        self
    }

    #[must_use]
    pub fn with_theme(mut self, theme: GanttTheme) -> Self {
        self.theme = theme;
        self
    }

    /// Checks every numeric field; returns the config unchanged when valid.
    pub fn validate(self) -> GanttResult<Self> {
        if !self.viewport.is_valid() {
            return Err(GanttError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        self.zoom_limits.validate()?;
        self.granularity_thresholds.validate()?;
        if !self.base_domain_buffer_days.is_finite() || self.base_domain_buffer_days < 0.0 {
            return Err(GanttError::InvalidConfig(
                "base domain buffer days must be finite and >= 0".to_owned(),
            ));
        }
        if !self.reset_min_overlap_ratio.is_finite()
            || !(0.0..=1.0).contains(&self.reset_min_overlap_ratio)
        {
            return Err(GanttError::InvalidConfig(
                "reset min overlap ratio must be in [0, 1]".to_owned(),
            ));
        }
        if !self.zoom_anchor_offset_px.is_finite() {
            return Err(GanttError::InvalidConfig(
                "zoom anchor offset must be finite".to_owned(),
            ));
        }
        if !self.reset_animation_ms.is_finite() || self.reset_animation_ms < 0.0 {
            return Err(GanttError::InvalidConfig(
                "reset animation duration must be finite and >= 0".to_owned(),
            ));
        }
        if !self.wheel_zoom_step.is_finite() || self.wheel_zoom_step <= 1.0 {
            return Err(GanttError::InvalidConfig(
                "wheel zoom step must be finite and > 1".to_owned(),
            ));
        }
        let theme = self.theme.validate()?;
        Ok(Self { theme, ..self })
    }

    pub fn to_json_pretty(&self) -> GanttResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| GanttError::InvalidConfig(format!("failed to serialize config: {e}")))
    }

    pub fn from_json_str(input: &str) -> GanttResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| GanttError::InvalidConfig(format!("failed to parse config: {e}")))
    }
}

fn default_base_domain_buffer_days() -> f64 {
    365.0
}

fn default_reset_min_overlap_ratio() -> f64 {
    0.2
}

fn default_zoom_anchor_offset_px() -> f64 {
    20.0
}

fn default_reset_animation_ms() -> f64 {
    500.0
}

fn default_wheel_zoom_step() -> f64 {
    1.2
}
