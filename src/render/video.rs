use crate::{
    foundation::{core::Medium, error::ScrollyResult},
    render::content::{ContentRenderer, RenderCtx},
    story::model::StepRecord,
};

/// Video embed. Sources are replaced directly, without a fade.
#[derive(Debug, Default)]
pub(crate) struct VideoRenderer {
    source: Option<String>,
    label: Option<String>,
}

impl VideoRenderer {
    pub(crate) fn is_playing(&self) -> bool {
        self.source.is_some()
    }
}

impl ContentRenderer for VideoRenderer {
    fn activate(
        &mut self,
        ctx: &mut RenderCtx<'_>,
        record: &StepRecord,
        _previous: Option<&StepRecord>,
    ) -> ScrollyResult<()> {
        if let Some(src) = record.file_path() {
            if self.source.as_deref() != Some(src) {
                ctx.stage.set_video_source(Some(src))?;
                self.source = Some(src.to_string());
            }
        }
        if let Some(alt) = record.alt_text() {
            if self.label.as_deref() != Some(alt) {
                ctx.stage
                    .set_container_label(Medium::Video, alt, Some("tooltip"))?;
                self.label = Some(alt.to_string());
            }
        }
        Ok(())
    }

    /// Blank the embed so nothing keeps playing once the container is hidden.
    fn deactivate(&mut self, ctx: &mut RenderCtx<'_>) -> ScrollyResult<()> {
        if let Some(src) = &self.source {
            tracing::debug!(src, "stopping video");
            ctx.stage.set_video_source(None)?;
            self.source = None;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/video.rs"]
mod tests;
