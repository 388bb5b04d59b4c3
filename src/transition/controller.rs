use crate::{
    foundation::{
        config::EngineConfig,
        core::{Display, Medium, Millis},
        error::ScrollyResult,
    },
    render::content::{ContentRenderer, RenderCtx, Renderers},
    schedule::timers::{Generation, GenerationCounter, TimerQueue},
    stage::{backend::StageBackend, map::MapWidget},
    story::model::StepRecord,
};

/// Delayed effect, tagged with the generation it was scheduled under.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Deferred {
    /// Show `target`'s container and hide the others.
    RevealContainer {
        generation: Generation,
        target: Medium,
    },
    /// The fade-in of a revealed container has finished.
    SettleContainer { generation: Generation },
    /// Swap the sticky image once it has faded out.
    SwapImage {
        generation: Generation,
        src: String,
        alt: Option<String>,
    },
    /// Fly the visible map to the last camera requested.
    FlyMap { generation: Generation },
}

/// Container-level transition phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionPhase {
    /// No container transition in flight.
    #[default]
    Idle,
    /// All containers are fading to transparent.
    FadingOut,
    /// Displays are being swapped; never observed between calls.
    SwappingVisibility,
    /// The new container is fading in.
    FadingIn,
}

/// The one container transition that may be in flight.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct PendingTransition {
    pub generation: Generation,
    pub from: Option<Medium>,
    pub to: Medium,
    pub phase: TransitionPhase,
    /// When the current phase ends.
    pub due: Millis,
}

/// Mirror of a sticky container's style.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ContainerState {
    pub display: Display,
    pub opacity: f64,
}

impl Default for ContainerState {
    fn default() -> Self {
        Self {
            display: Display::None,
            opacity: 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct Containers([ContainerState; 3]);

impl Containers {
    fn slot(medium: Medium) -> usize {
        match medium {
            Medium::Image => 0,
            Medium::Map => 1,
            Medium::Video => 2,
        }
    }

    fn get(&self, medium: Medium) -> ContainerState {
        self.0[Self::slot(medium)]
    }

    fn get_mut(&mut self, medium: Medium) -> &mut ContainerState {
        &mut self.0[Self::slot(medium)]
    }
}

/// Runs the container cross-fade and routes content to the renderers.
///
/// At most one container transition is live. A new [`switch_medium`](Self::switch_medium)
/// bumps the generation, so the delayed reveal of the one it replaces becomes a no-op.
pub(crate) struct TransitionController<M> {
    config: EngineConfig,
    generation: GenerationCounter,
    pending: Option<PendingTransition>,
    containers: Containers,
    renderers: Renderers<M>,
    timers: TimerQueue<Deferred>,
}

impl<M: MapWidget> TransitionController<M> {
    pub(crate) fn new(config: EngineConfig, map: M) -> Self {
        Self {
            config,
            generation: GenerationCounter::default(),
            pending: None,
            containers: Containers::default(),
            renderers: Renderers::new(map),
            timers: TimerQueue::new(),
        }
    }

    pub(crate) fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub(crate) fn phase(&self) -> TransitionPhase {
        self.pending.map(|p| p.phase).unwrap_or_default()
    }

    pub(crate) fn pending(&self) -> Option<PendingTransition> {
        self.pending
    }

    pub(crate) fn container(&self, medium: Medium) -> ContainerState {
        self.containers.get(medium)
    }

    pub(crate) fn map_widget(&self) -> &M {
        self.renderers.map.widget()
    }

    pub(crate) fn map_widget_mut(&mut self) -> &mut M {
        self.renderers.map.widget_mut()
    }

    pub(crate) fn next_deadline(&self) -> Option<Millis> {
        self.timers.next_deadline()
    }

    pub(crate) fn pop_due(&mut self, now: Millis) -> Option<(Millis, Deferred)> {
        self.timers.pop_due(now)
    }

    /// Start fading every container out, then reveal `to` after the fade.
    ///
    /// Nothing is committed until every stage call has succeeded: on error the transition in
    /// flight, if any, keeps running and the stage opacities are put back.
    pub(crate) fn switch_medium(
        &mut self,
        stage: &mut dyn StageBackend,
        now: Millis,
        from: Option<Medium>,
        to: Medium,
    ) -> ScrollyResult<Generation> {
        if self.renderers.video.is_playing() {
            tracing::debug!("video playing in outgoing container");
        }
        if let Err(err) = self.fade_out_all(stage, now) {
            self.restore_opacities(stage);
            return Err(err);
        }

        let generation = self.generation.bump();
        if let Some(stale) = self.pending {
            tracing::debug!(
                stale = ?stale.generation,
                ?generation,
                "superseding container transition"
            );
        }
        for medium in Medium::ALL {
            self.containers.get_mut(medium).opacity = 0.0;
        }

        let due = now.saturating_add(self.config.fade());
        self.timers.schedule(
            due,
            Deferred::RevealContainer {
                generation,
                target: to,
            },
        );
        self.pending = Some(PendingTransition {
            generation,
            from,
            to,
            phase: TransitionPhase::FadingOut,
            due,
        });
        tracing::debug!(?from, %to, ?generation, %due, "fading out containers");
        Ok(generation)
    }

    /// Undo a committed switch to `to` whose content could not be shown.
    ///
    /// Fades back to `from`, or drops the transition when there was nothing shown before.
    pub(crate) fn abandon_switch(
        &mut self,
        stage: &mut dyn StageBackend,
        now: Millis,
        from: Option<Medium>,
        to: Medium,
    ) {
        let Some(from) = from else {
            let generation = self.generation.bump();
            tracing::debug!(?generation, %to, "dropping container transition");
            self.pending = None;
            return;
        };
        if let Err(err) = self.switch_medium(stage, now, Some(to), from) {
            tracing::warn!(error = %err, %from, %to, "could not fade back to previous container");
        }
    }

    fn fade_out_all(&mut self, stage: &mut dyn StageBackend, now: Millis) -> ScrollyResult<()> {
        // Playback must stop before the outgoing container starts to fade.
        let mut ctx = RenderCtx {
            stage: &mut *stage,
            timers: &mut self.timers,
            now,
            config: &self.config,
            map_container_shown: self.containers.get(Medium::Map).display.is_visible(),
        };
        self.renderers.video.deactivate(&mut ctx)?;

        for medium in Medium::ALL {
            stage.set_container_opacity(medium, 0.0)?;
        }
        Ok(())
    }

    fn restore_opacities(&self, stage: &mut dyn StageBackend) {
        for medium in Medium::ALL {
            let opacity = self.containers.get(medium).opacity;
            if let Err(err) = stage.set_container_opacity(medium, opacity) {
                tracing::warn!(error = %err, %medium, "could not restore container opacity");
            }
        }
    }

    /// Hand `record` to the renderer for its medium.
    pub(crate) fn activate(
        &mut self,
        stage: &mut dyn StageBackend,
        now: Millis,
        record: &StepRecord,
        previous: Option<&StepRecord>,
    ) -> ScrollyResult<()> {
        let mut ctx = RenderCtx {
            stage,
            timers: &mut self.timers,
            now,
            config: &self.config,
            map_container_shown: self.containers.get(Medium::Map).display.is_visible(),
        };
        self.renderers
            .for_medium(record.content_type())
            .activate(&mut ctx, record, previous)
    }

    /// Apply a delayed effect that has come due at `at`.
    pub(crate) fn fire(
        &mut self,
        stage: &mut dyn StageBackend,
        at: Millis,
        task: Deferred,
    ) -> ScrollyResult<()> {
        match task {
            Deferred::RevealContainer { generation, target } => {
                if !self.generation.is_current(generation) {
                    tracing::debug!(?generation, %target, "dropping stale reveal");
                    return Ok(());
                }
                self.reveal(stage, at, generation, target)
            }
            Deferred::SettleContainer { generation } => {
                if self.generation.is_current(generation) {
                    tracing::debug!(?generation, "container transition settled");
                    self.pending = None;
                }
                Ok(())
            }
            Deferred::SwapImage {
                generation,
                src,
                alt,
            } => self
                .renderers
                .image
                .complete_swap(stage, generation, &src, alt.as_deref()),
            Deferred::FlyMap { generation } => self
                .renderers
                .map
                .complete_fly(generation, &self.config.fly_to),
        }
    }

    fn reveal(
        &mut self,
        stage: &mut dyn StageBackend,
        at: Millis,
        generation: Generation,
        target: Medium,
    ) -> ScrollyResult<()> {
        if let Some(p) = self.pending.as_mut() {
            p.phase = TransitionPhase::SwappingVisibility;
        }

        let mut changed = Vec::with_capacity(Medium::ALL.len());
        for medium in Medium::ALL {
            let display = if medium == target {
                medium.visible_display()
            } else {
                Display::None
            };
            stage.set_container_display(medium, display)?;
            let state = self.containers.get_mut(medium);
            if state.display != display {
                state.display = display;
                changed.push((medium, display));
            }
        }
        stage.set_container_opacity(target, 1.0)?;
        self.containers.get_mut(target).opacity = 1.0;

        // Style observers run after the swap has been applied as a whole.
        for (medium, display) in changed {
            self.renderers
                .container_display_changed(medium, display, &self.config)?;
        }

        let due = at.saturating_add(self.config.fade());
        self.timers
            .schedule(due, Deferred::SettleContainer { generation });
        if let Some(p) = self.pending.as_mut() {
            p.phase = TransitionPhase::FadingIn;
            p.due = due;
        }
        tracing::debug!(%target, ?generation, "container revealed");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transition/controller.rs"]
mod tests;
