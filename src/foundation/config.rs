use std::path::Path;

use crate::{
    foundation::core::Millis,
    foundation::error::{ScrollyError, ScrollyResult},
    stage::map::FlyToOptions,
};

/// Engine tuning knobs.
///
/// Every field has a default, so an empty JSON object is a valid configuration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Opacity transition length of the sticky containers and the sticky image.
    pub fade_ms: u64,
    /// Zoom used to create the map when the first Map step carries none.
    pub default_map_zoom: f64,
    /// Camera animation used for map moves after creation.
    pub fly_to: FlyToOptions,
    /// Options handed to the scroll trigger on start-up.
    pub trigger: TriggerConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fade_ms: 500,
            default_map_zoom: 12.0,
            fly_to: FlyToOptions::default(),
            trigger: TriggerConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn fade(&self) -> Millis {
        Millis(self.fade_ms)
    }

    pub fn validate(&self) -> ScrollyResult<()> {
        if !self.default_map_zoom.is_finite() || self.default_map_zoom <= 0.0 {
            return Err(ScrollyError::config(
                "default_map_zoom must be finite and > 0",
            ));
        }
        if !self.fly_to.duration_s.is_finite() || self.fly_to.duration_s < 0.0 {
            return Err(ScrollyError::config(
                "fly_to.duration_s must be finite and >= 0",
            ));
        }
        if !(self.fly_to.ease_linearity > 0.0 && self.fly_to.ease_linearity <= 1.0) {
            return Err(ScrollyError::config(
                "fly_to.ease_linearity must be in (0, 1]",
            ));
        }
        self.trigger.validate()
    }

    /// Read a JSON config file; missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> ScrollyResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            ScrollyError::Other(anyhow::Error::new(e).context(format!(
                "read config '{}'",
                path.display()
            )))
        })?;
        let cfg: Self =
            serde_json::from_slice(&bytes).map_err(|e| ScrollyError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }
}

/// Configuration handed to the scroll trigger's `setup`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TriggerConfig {
    /// Selector matching every step element.
    pub step_selector: String,
    /// Fraction of the viewport height, from the top, where a step counts as entered.
    pub offset: f64,
    /// Ask the trigger to draw its debug overlay.
    pub debug: bool,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            step_selector: ".scrolly-container .step".to_string(),
            offset: 0.5,
            debug: false,
        }
    }
}

impl TriggerConfig {
    pub fn validate(&self) -> ScrollyResult<()> {
        if self.step_selector.trim().is_empty() {
            return Err(ScrollyError::config("trigger.step_selector must be non-empty"));
        }
        if !self.offset.is_finite() || !(0.0..=1.0).contains(&self.offset) {
            return Err(ScrollyError::config("trigger.offset must be in [0, 1]"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
