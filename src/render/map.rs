use crate::{
    foundation::{core::Display, core::Medium, error::ScrollyResult},
    render::content::{ContentRenderer, RenderCtx},
    schedule::timers::{Generation, GenerationCounter},
    stage::map::{FlyToOptions, MapView, MapWidget},
    story::model::StepRecord,
    transition::controller::Deferred,
};

/// Owns the page's single map widget.
///
/// The widget is created on the first Map activation and reused for the rest of the session.
/// Once created, the renderer watches the map container: when it becomes visible the widget
/// is re-measured and any camera move requested while it was hidden is flown to.
///
/// Camera moves on a visible map settle for one fade length before flying, so a burst of
/// Map steps ends in a single fly-to the last one.
pub(crate) struct MapRenderer<M> {
    widget: M,
    created: bool,
    /// Last requested camera, whether applied or pending.
    target: Option<MapView>,
    /// Camera requested but not flown to yet.
    pending: Option<MapView>,
    shown: bool,
    label: Option<String>,
    generation: GenerationCounter,
}

impl<M: MapWidget> MapRenderer<M> {
    pub(crate) fn new(widget: M) -> Self {
        Self {
            widget,
            created: false,
            target: None,
            pending: None,
            shown: false,
            label: None,
            generation: GenerationCounter::default(),
        }
    }

    pub(crate) fn widget(&self) -> &M {
        &self.widget
    }

    pub(crate) fn widget_mut(&mut self) -> &mut M {
        &mut self.widget
    }

    pub(crate) fn container_display_changed(
        &mut self,
        display: Display,
        fly_to: &FlyToOptions,
    ) -> ScrollyResult<()> {
        if !self.created {
            return Ok(());
        }
        let was_shown = self.shown;
        self.shown = display.is_visible();
        if self.shown && !was_shown {
            // Sizes measured while hidden are wrong.
            self.widget.invalidate_size()?;
            if let Some(view) = self.pending.take() {
                tracing::debug!(?view, "flying to camera requested while hidden");
                self.widget.fly_to(view, fly_to)?;
            }
        }
        Ok(())
    }

    /// Fly to the pending camera scheduled under `generation`.
    ///
    /// A newer request supersedes it; a hidden container keeps it for the next reveal.
    pub(crate) fn complete_fly(
        &mut self,
        generation: Generation,
        fly_to: &FlyToOptions,
    ) -> ScrollyResult<()> {
        if !self.generation.is_current(generation) {
            tracing::debug!(?generation, "dropping superseded camera move");
            return Ok(());
        }
        if !self.shown {
            return Ok(());
        }
        match self.pending.take() {
            Some(view) => {
                tracing::debug!(?view, "flying map");
                self.widget.fly_to(view, fly_to)
            }
            None => Ok(()),
        }
    }
}

impl<M: MapWidget> ContentRenderer for MapRenderer<M> {
    fn activate(
        &mut self,
        ctx: &mut RenderCtx<'_>,
        record: &StepRecord,
        _previous: Option<&StepRecord>,
    ) -> ScrollyResult<()> {
        if let Some(alt) = record.alt_text() {
            if self.label.as_deref() != Some(alt) {
                ctx.stage.set_container_label(Medium::Map, alt, None)?;
                self.label = Some(alt.to_string());
            }
        }

        let Some((latitude, longitude)) = record.coordinates() else {
            return Ok(());
        };
        let zoom = record
            .zoom_level()
            .or(self.target.map(|v| v.zoom))
            .unwrap_or(ctx.config.default_map_zoom);
        let view = MapView {
            latitude,
            longitude,
            zoom,
        };
        if self.target == Some(view) {
            return Ok(());
        }

        if !self.created {
            tracing::debug!(?view, "creating map");
            self.widget.create(view)?;
            self.created = true;
            self.shown = ctx.map_container_shown;
            self.target = Some(view);
            return Ok(());
        }

        self.target = Some(view);
        self.pending = Some(view);
        let generation = self.generation.bump();
        if self.shown {
            ctx.timers.schedule(
                ctx.now.saturating_add(ctx.config.fade()),
                Deferred::FlyMap { generation },
            );
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/map.rs"]
mod tests;
