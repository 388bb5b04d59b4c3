use crate::{
    foundation::error::ScrollyResult,
    render::content::{ContentRenderer, RenderCtx},
    schedule::timers::{Generation, GenerationCounter},
    stage::backend::StageBackend,
    story::model::StepRecord,
    transition::controller::Deferred,
};

/// Sticky image: fades out, swaps the file, fades back in. Zoom applies immediately.
#[derive(Debug, Default)]
pub(crate) struct ImageRenderer {
    /// File shown, or about to be shown once the pending swap fires.
    source: Option<String>,
    scale: Option<f64>,
    generation: GenerationCounter,
}

impl ImageRenderer {
    #[cfg(test)]
    pub(crate) fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Apply a swap scheduled by [`ContentRenderer::activate`]; stale swaps are dropped.
    pub(crate) fn complete_swap(
        &mut self,
        stage: &mut dyn StageBackend,
        generation: Generation,
        src: &str,
        alt: Option<&str>,
    ) -> ScrollyResult<()> {
        if !self.generation.is_current(generation) {
            tracing::debug!(?generation, src, "dropping stale image swap");
            return Ok(());
        }
        stage.set_image_source(src, alt)?;
        stage.set_image_opacity(1.0)
    }
}

impl ContentRenderer for ImageRenderer {
    fn activate(
        &mut self,
        ctx: &mut RenderCtx<'_>,
        record: &StepRecord,
        _previous: Option<&StepRecord>,
    ) -> ScrollyResult<()> {
        if let Some(src) = record.file_path() {
            if self.source.as_deref() != Some(src) {
                ctx.stage.set_image_opacity(0.0)?;
                let generation = self.generation.bump();
                ctx.timers.schedule(
                    ctx.now.saturating_add(ctx.config.fade()),
                    Deferred::SwapImage {
                        generation,
                        src: src.to_string(),
                        alt: record.alt_text().map(str::to_string),
                    },
                );
                self.source = Some(src.to_string());
            }
        }

        // Zoom is a continuous adjustment, never a fade.
        if let Some(zoom) = record.zoom_level() {
            if self.scale != Some(zoom) {
                ctx.stage.set_image_scale(zoom)?;
                self.scale = Some(zoom);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/image.rs"]
mod tests;
