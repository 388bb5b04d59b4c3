use crate::{
    foundation::{
        config::EngineConfig,
        error::{ScrollyError, ScrollyResult},
    },
    stage::{
        backend::{StageBackend, display_then_raise},
        map::MapWidget,
        trigger::{ScrollTrigger, TriggerEvent},
    },
    story::model::{StepRecord, Story, StoryData},
    tracker::step_tracker::StepTracker,
};

/// A started story: validated steps, the scroll trigger, and the step tracker.
pub struct StoryRunner<T, S, M> {
    story: StoryData,
    records: Vec<StepRecord>,
    trigger: T,
    tracker: StepTracker<S, M>,
}

impl<T: ScrollTrigger, S: StageBackend, M: MapWidget> StoryRunner<T, S, M> {
    /// Validate `story` and set up the trigger.
    ///
    /// A data error is shown on `stage` before it is returned.
    #[tracing::instrument(skip_all, fields(title = %story.story.title, steps = story.steps.len()))]
    pub fn start(
        story: &Story,
        config: EngineConfig,
        mut stage: S,
        map: M,
        mut trigger: T,
    ) -> ScrollyResult<Self> {
        config.validate()?;
        let records = story
            .validate()
            .map_err(|e| display_then_raise(&mut stage, e))?;
        trigger.setup(&config.trigger)?;
        tracing::info!(steps = records.len(), "story started");

        Ok(Self {
            story: story.story.clone(),
            records,
            trigger,
            tracker: StepTracker::new(config, stage, map)?,
        })
    }

    pub fn handle(&mut self, event: TriggerEvent) -> ScrollyResult<()> {
        match event {
            TriggerEvent::StepEnter { element } => {
                let record = (element.step.0 as usize)
                    .checked_sub(1)
                    .and_then(|i| self.records.get(i))
                    .filter(|r| r.index() == element.step)
                    .cloned()
                    .ok_or_else(|| {
                        ScrollyError::target_missing(format!("step element {}", element.step))
                    })?;
                self.tracker.on_step_enter(record)
            }
            TriggerEvent::Resize => self.trigger.resize(),
        }
    }

    pub fn advance_to(&mut self, t: crate::foundation::core::Millis) -> ScrollyResult<()> {
        self.tracker.advance_to(t)
    }

    pub fn run_until_idle(&mut self) -> ScrollyResult<()> {
        self.tracker.run_until_idle()
    }

    pub fn story(&self) -> &StoryData {
        &self.story
    }

    pub fn records(&self) -> &[StepRecord] {
        &self.records
    }

    pub fn trigger(&self) -> &T {
        &self.trigger
    }

    pub fn tracker(&self) -> &StepTracker<S, M> {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut StepTracker<S, M> {
        &mut self.tracker
    }

    pub fn into_parts(self) -> (T, StepTracker<S, M>) {
        (self.trigger, self.tracker)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/story/runner.rs"]
mod tests;
