use crate::{
    foundation::{
        config::EngineConfig,
        core::{Medium, Millis, StepIndex},
        error::ScrollyResult,
    },
    stage::{backend::StageBackend, map::MapWidget},
    story::model::StepRecord,
    transition::controller::{
        ContainerState, PendingTransition, TransitionController, TransitionPhase,
    },
};

/// Snapshot of the engine's mutable state.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct EngineState {
    pub now: Millis,
    pub active_step: Option<StepIndex>,
    pub active_content_type: Option<Medium>,
    pub pending_transition: Option<PendingTransition>,
}

/// Tracks the active step and drives transitions as steps enter the trigger zone.
///
/// The tracker owns the virtual clock. Hosts call [`on_step_enter`](Self::on_step_enter) for
/// each trigger event and [`advance_to`](Self::advance_to) as time passes; delayed fade
/// stages run from inside `advance_to`.
pub struct StepTracker<S, M> {
    stage: S,
    controller: TransitionController<M>,
    active: Option<StepRecord>,
    now: Millis,
}

impl<S: StageBackend, M: MapWidget> StepTracker<S, M> {
    pub fn new(config: EngineConfig, stage: S, map: M) -> ScrollyResult<Self> {
        config.validate()?;
        Ok(Self {
            stage,
            controller: TransitionController::new(config, map),
            active: None,
            now: Millis::ZERO,
        })
    }

    /// React to `record` entering the trigger zone at the current time.
    ///
    /// Malformed records are rejected before any side effect. When the stage fails part-way,
    /// the step marks are put back and the previous step stays active.
    #[tracing::instrument(
        skip(self, record),
        fields(step = %record.index(), medium = %record.content_type(), now = %self.now)
    )]
    pub fn on_step_enter(&mut self, record: StepRecord) -> ScrollyResult<()> {
        record.check()?;

        let medium_changed = record.requires_medium_change(self.active.as_ref());
        let reentry = self
            .active
            .as_ref()
            .is_some_and(|prev| record.shows_same_content(prev));
        tracing::info!(medium_changed, reentry, "step entered");

        let previous = self.active.as_ref().map(StepRecord::index);
        if let Err(err) = self
            .mark_steps(previous, record.index())
            .and_then(|()| self.present(&record, medium_changed))
        {
            self.restore_marks(previous, record.index());
            return Err(err);
        }

        self.active = Some(record);
        Ok(())
    }

    fn mark_steps(&mut self, previous: Option<StepIndex>, next: StepIndex) -> ScrollyResult<()> {
        if let Some(prev) = previous
            && prev != next
        {
            self.stage.mark_step(prev, false)?;
        }
        self.stage.mark_step(next, true)
    }

    fn restore_marks(&mut self, previous: Option<StepIndex>, next: StepIndex) {
        if previous == Some(next) {
            return;
        }
        let restored = self
            .stage
            .mark_step(next, false)
            .and_then(|()| match previous {
                Some(prev) => self.stage.mark_step(prev, true),
                None => Ok(()),
            });
        if let Err(err) = restored {
            tracing::warn!(error = %err, "could not restore step marks");
        }
    }

    fn present(&mut self, record: &StepRecord, medium_changed: bool) -> ScrollyResult<()> {
        let from = self.active_content_type();
        if medium_changed {
            self.controller
                .switch_medium(&mut self.stage, self.now, from, record.content_type())?;
        }
        let activated =
            self.controller
                .activate(&mut self.stage, self.now, record, self.active.as_ref());
        if activated.is_err() && medium_changed {
            self.controller
                .abandon_switch(&mut self.stage, self.now, from, record.content_type());
        }
        activated
    }

    /// Move the clock to `t`, running every delayed stage that comes due on the way.
    ///
    /// The clock never moves backwards.
    pub fn advance_to(&mut self, t: Millis) -> ScrollyResult<()> {
        while let Some((at, task)) = self.controller.pop_due(t) {
            self.now = self.now.max(at);
            self.controller.fire(&mut self.stage, at, task)?;
        }
        self.now = self.now.max(t);
        Ok(())
    }

    pub fn advance_by(&mut self, d: Millis) -> ScrollyResult<()> {
        self.advance_to(self.now.saturating_add(d))
    }

    /// Run every scheduled stage, moving the clock to the last deadline.
    pub fn run_until_idle(&mut self) -> ScrollyResult<()> {
        while let Some(next) = self.controller.next_deadline() {
            self.advance_to(next)?;
        }
        Ok(())
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    pub fn active_step(&self) -> Option<&StepRecord> {
        self.active.as_ref()
    }

    pub fn active_content_type(&self) -> Option<Medium> {
        self.active.as_ref().map(StepRecord::content_type)
    }

    pub fn phase(&self) -> TransitionPhase {
        self.controller.phase()
    }

    pub fn container(&self, medium: Medium) -> ContainerState {
        self.controller.container(medium)
    }

    pub fn config(&self) -> &EngineConfig {
        self.controller.config()
    }

    pub fn state(&self) -> EngineState {
        EngineState {
            now: self.now,
            active_step: self.active.as_ref().map(StepRecord::index),
            active_content_type: self.active_content_type(),
            pending_transition: self.controller.pending(),
        }
    }

    pub fn stage(&self) -> &S {
        &self.stage
    }

    pub fn stage_mut(&mut self) -> &mut S {
        &mut self.stage
    }

    pub fn map(&self) -> &M {
        self.controller.map_widget()
    }

    pub fn map_mut(&mut self) -> &mut M {
        self.controller.map_widget_mut()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tracker/step_tracker.rs"]
mod tests;
