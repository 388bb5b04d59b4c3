use crate::foundation::{config::TriggerConfig, core::StepIndex, error::ScrollyResult};

/// The step element a trigger event refers to (its `data-step` number).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StepElement {
    pub step: StepIndex,
}

/// Events the host delivers to a running story.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerEvent {
    /// A step crossed into the trigger zone.
    StepEnter { element: StepElement },
    /// The viewport was resized.
    Resize,
}

/// Scroll-position detector that raises step-enter events.
pub trait ScrollTrigger {
    fn setup(&mut self, config: &TriggerConfig) -> ScrollyResult<()>;

    /// Recompute step offsets after a viewport change.
    fn resize(&mut self) -> ScrollyResult<()>;
}

impl<T: ScrollTrigger + ?Sized> ScrollTrigger for &mut T {
    fn setup(&mut self, config: &TriggerConfig) -> ScrollyResult<()> {
        (**self).setup(config)
    }

    fn resize(&mut self) -> ScrollyResult<()> {
        (**self).resize()
    }
}

/// A [`ScrollTrigger`] that only remembers how it was driven.
#[derive(Clone, Debug, Default, serde::Serialize)]
pub struct RecordingTrigger {
    pub setups: Vec<TriggerConfig>,
    pub resizes: usize,
}

impl RecordingTrigger {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScrollTrigger for RecordingTrigger {
    fn setup(&mut self, config: &TriggerConfig) -> ScrollyResult<()> {
        self.setups.push(config.clone());
        Ok(())
    }

    fn resize(&mut self) -> ScrollyResult<()> {
        self.resizes += 1;
        Ok(())
    }
}
