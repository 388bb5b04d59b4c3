use crate::foundation::{
    core::{Display, Medium, StepIndex},
    error::{ScrollyError, ScrollyResult, ValidationFailure},
};

/// The document side of the engine: every visible side effect goes through here.
///
/// Implementations return [`ScrollyError::RenderTargetMissing`] when the element an
/// operation addresses does not exist.
pub trait StageBackend {
    /// Add or remove the active marker on a step element.
    fn mark_step(&mut self, step: StepIndex, active: bool) -> ScrollyResult<()>;

    fn set_container_opacity(&mut self, medium: Medium, opacity: f64) -> ScrollyResult<()>;

    fn set_container_display(&mut self, medium: Medium, display: Display) -> ScrollyResult<()>;

    /// Accessibility label (and optional role) of a container.
    fn set_container_label(
        &mut self,
        medium: Medium,
        label: &str,
        role: Option<&str>,
    ) -> ScrollyResult<()>;

    fn set_image_opacity(&mut self, opacity: f64) -> ScrollyResult<()>;

    /// Swap the sticky image. `alt` of `None` leaves the current alt text in place.
    fn set_image_source(&mut self, src: &str, alt: Option<&str>) -> ScrollyResult<()>;

    fn set_image_scale(&mut self, scale: f64) -> ScrollyResult<()>;

    /// Point the video embed at `src`, or blank it (stopping playback) with `None`.
    fn set_video_source(&mut self, src: Option<&str>) -> ScrollyResult<()>;

    /// Show the error panel.
    fn show_error(&mut self, failure: &ValidationFailure) -> ScrollyResult<()>;
}

impl<T: StageBackend + ?Sized> StageBackend for &mut T {
    fn mark_step(&mut self, step: StepIndex, active: bool) -> ScrollyResult<()> {
        (**self).mark_step(step, active)
    }

    fn set_container_opacity(&mut self, medium: Medium, opacity: f64) -> ScrollyResult<()> {
        (**self).set_container_opacity(medium, opacity)
    }

    fn set_container_display(&mut self, medium: Medium, display: Display) -> ScrollyResult<()> {
        (**self).set_container_display(medium, display)
    }

    fn set_container_label(
        &mut self,
        medium: Medium,
        label: &str,
        role: Option<&str>,
    ) -> ScrollyResult<()> {
        (**self).set_container_label(medium, label, role)
    }

    fn set_image_opacity(&mut self, opacity: f64) -> ScrollyResult<()> {
        (**self).set_image_opacity(opacity)
    }

    fn set_image_source(&mut self, src: &str, alt: Option<&str>) -> ScrollyResult<()> {
        (**self).set_image_source(src, alt)
    }

    fn set_image_scale(&mut self, scale: f64) -> ScrollyResult<()> {
        (**self).set_image_scale(scale)
    }

    fn set_video_source(&mut self, src: Option<&str>) -> ScrollyResult<()> {
        (**self).set_video_source(src)
    }

    fn show_error(&mut self, failure: &ValidationFailure) -> ScrollyResult<()> {
        (**self).show_error(failure)
    }
}

/// Show a data error on the stage, then hand the error back for propagation.
///
/// Errors that are not data errors are returned untouched. A failure to display is logged
/// and does not replace the original error.
pub fn display_then_raise(stage: &mut dyn StageBackend, err: ScrollyError) -> ScrollyError {
    if let Some(failure) = err.validation_failure() {
        if let Err(display_err) = stage.show_error(failure) {
            tracing::warn!(error = %display_err, "could not display validation error");
        }
    }
    err
}

/// One recorded stage side effect.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum StageOp {
    MarkStep {
        step: StepIndex,
        active: bool,
    },
    ContainerOpacity {
        medium: Medium,
        opacity: f64,
    },
    ContainerDisplay {
        medium: Medium,
        display: Display,
    },
    ContainerLabel {
        medium: Medium,
        label: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        role: Option<String>,
    },
    ImageOpacity {
        opacity: f64,
    },
    ImageSource {
        src: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        alt: Option<String>,
    },
    ImageScale {
        scale: f64,
    },
    VideoSource {
        src: Option<String>,
    },
    ShowError {
        failure: ValidationFailure,
    },
}

/// A [`StageBackend`] that keeps an in-memory log instead of touching a document.
#[derive(Clone, Debug, Default)]
pub struct RecordingStage {
    ops: Vec<StageOp>,
    missing: Vec<Medium>,
}

impl RecordingStage {
    pub fn new() -> Self {
        Self::default()
    }

    /// A stage whose container for `medium` does not exist.
    pub fn without_container(mut self, medium: Medium) -> Self {
        self.missing.push(medium);
        self
    }

    pub fn ops(&self) -> &[StageOp] {
        &self.ops
    }

    pub fn take_ops(&mut self) -> Vec<StageOp> {
        std::mem::take(&mut self.ops)
    }

    fn target(&self, medium: Medium) -> ScrollyResult<()> {
        if self.missing.contains(&medium) {
            return Err(ScrollyError::target_missing(format!(
                "#{}",
                medium.container_id()
            )));
        }
        Ok(())
    }

    fn push(&mut self, medium: Medium, op: StageOp) -> ScrollyResult<()> {
        self.target(medium)?;
        self.ops.push(op);
        Ok(())
    }
}

impl StageBackend for RecordingStage {
    fn mark_step(&mut self, step: StepIndex, active: bool) -> ScrollyResult<()> {
        self.ops.push(StageOp::MarkStep { step, active });
        Ok(())
    }

    fn set_container_opacity(&mut self, medium: Medium, opacity: f64) -> ScrollyResult<()> {
        self.push(medium, StageOp::ContainerOpacity { medium, opacity })
    }

    fn set_container_display(&mut self, medium: Medium, display: Display) -> ScrollyResult<()> {
        self.push(medium, StageOp::ContainerDisplay { medium, display })
    }

    fn set_container_label(
        &mut self,
        medium: Medium,
        label: &str,
        role: Option<&str>,
    ) -> ScrollyResult<()> {
        self.push(
            medium,
            StageOp::ContainerLabel {
                medium,
                label: label.to_string(),
                role: role.map(str::to_string),
            },
        )
    }

    fn set_image_opacity(&mut self, opacity: f64) -> ScrollyResult<()> {
        self.push(Medium::Image, StageOp::ImageOpacity { opacity })
    }

    fn set_image_source(&mut self, src: &str, alt: Option<&str>) -> ScrollyResult<()> {
        self.push(
            Medium::Image,
            StageOp::ImageSource {
                src: src.to_string(),
                alt: alt.map(str::to_string),
            },
        )
    }

    fn set_image_scale(&mut self, scale: f64) -> ScrollyResult<()> {
        self.push(Medium::Image, StageOp::ImageScale { scale })
    }

    fn set_video_source(&mut self, src: Option<&str>) -> ScrollyResult<()> {
        self.push(
            Medium::Video,
            StageOp::VideoSource {
                src: src.map(str::to_string),
            },
        )
    }

    fn show_error(&mut self, failure: &ValidationFailure) -> ScrollyResult<()> {
        self.ops.push(StageOp::ShowError {
            failure: failure.clone(),
        });
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stage/backend.rs"]
mod tests;
