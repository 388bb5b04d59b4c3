use crate::{
    foundation::{
        config::EngineConfig,
        core::{Display, Medium, Millis},
        error::ScrollyResult,
    },
    render::{image::ImageRenderer, map::MapRenderer, video::VideoRenderer},
    schedule::timers::TimerQueue,
    stage::{backend::StageBackend, map::MapWidget},
    story::model::StepRecord,
    transition::controller::Deferred,
};

/// Everything a renderer may touch while handling one activation.
pub(crate) struct RenderCtx<'a> {
    pub(crate) stage: &'a mut dyn StageBackend,
    pub(crate) timers: &'a mut TimerQueue<Deferred>,
    pub(crate) now: Millis,
    pub(crate) config: &'a EngineConfig,
    /// Whether the map container is currently displayed.
    pub(crate) map_container_shown: bool,
}

/// Mount/update/unmount strategy for one medium.
pub(crate) trait ContentRenderer {
    /// Show `record` in this renderer's container. Re-activating with unchanged content is a
    /// no-op.
    fn activate(
        &mut self,
        ctx: &mut RenderCtx<'_>,
        record: &StepRecord,
        previous: Option<&StepRecord>,
    ) -> ScrollyResult<()>;

    /// Tear down anything that keeps running while hidden.
    fn deactivate(&mut self, _ctx: &mut RenderCtx<'_>) -> ScrollyResult<()> {
        Ok(())
    }
}

/// The closed set of renderers, one per [`Medium`].
pub(crate) struct Renderers<M> {
    pub(crate) image: ImageRenderer,
    pub(crate) map: MapRenderer<M>,
    pub(crate) video: VideoRenderer,
}

impl<M: MapWidget> Renderers<M> {
    pub(crate) fn new(map: M) -> Self {
        Self {
            image: ImageRenderer::default(),
            map: MapRenderer::new(map),
            video: VideoRenderer::default(),
        }
    }

    pub(crate) fn for_medium(&mut self, medium: Medium) -> &mut dyn ContentRenderer {
        match medium {
            Medium::Image => &mut self.image,
            Medium::Map => &mut self.map,
            Medium::Video => &mut self.video,
        }
    }

    /// Forward a container display change to the renderers that observe their container.
    pub(crate) fn container_display_changed(
        &mut self,
        medium: Medium,
        display: Display,
        config: &EngineConfig,
    ) -> ScrollyResult<()> {
        match medium {
            Medium::Map => self.map.container_display_changed(display, &config.fly_to),
            Medium::Image | Medium::Video => Ok(()),
        }
    }
}
