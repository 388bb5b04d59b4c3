use crate::foundation::error::{ScrollyError, ScrollyResult};

/// Camera target of the map widget.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MapView {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: f64,
}

/// Camera animation settings for [`MapWidget::fly_to`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FlyToOptions {
    /// Animation length in seconds.
    pub duration_s: f64,
    /// How linear the fly curve is; smaller is smoother.
    pub ease_linearity: f64,
    /// Suppress the widget's move-start notification.
    pub no_move_start: bool,
}

impl Default for FlyToOptions {
    fn default() -> Self {
        Self {
            duration_s: 1.0,
            ease_linearity: 0.1,
            no_move_start: false,
        }
    }
}

/// The page's single map widget.
///
/// `create` is called at most once per session; every later camera change goes through
/// `fly_to`. `invalidate_size` asks the widget to re-measure its container.
pub trait MapWidget {
    fn create(&mut self, view: MapView) -> ScrollyResult<()>;

    fn fly_to(&mut self, view: MapView, options: &FlyToOptions) -> ScrollyResult<()>;

    fn invalidate_size(&mut self) -> ScrollyResult<()>;
}

impl<T: MapWidget + ?Sized> MapWidget for &mut T {
    fn create(&mut self, view: MapView) -> ScrollyResult<()> {
        (**self).create(view)
    }

    fn fly_to(&mut self, view: MapView, options: &FlyToOptions) -> ScrollyResult<()> {
        (**self).fly_to(view, options)
    }

    fn invalidate_size(&mut self) -> ScrollyResult<()> {
        (**self).invalidate_size()
    }
}

/// One recorded map widget call.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum MapCall {
    Create { view: MapView },
    FlyTo { view: MapView, options: FlyToOptions },
    InvalidateSize,
}

/// A [`MapWidget`] that records calls and enforces the create-once contract.
#[derive(Clone, Debug, Default)]
pub struct RecordingMap {
    calls: Vec<MapCall>,
    created: bool,
}

impl RecordingMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[MapCall] {
        &self.calls
    }

    pub fn create_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, MapCall::Create { .. }))
            .count()
    }

    /// Targets of every `fly_to`, in call order.
    pub fn fly_to_targets(&self) -> Vec<MapView> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                MapCall::FlyTo { view, .. } => Some(*view),
                _ => None,
            })
            .collect()
    }

    fn ensure_created(&self, what: &str) -> ScrollyResult<()> {
        if !self.created {
            return Err(ScrollyError::target_missing(format!(
                "map instance ({what} before create)"
            )));
        }
        Ok(())
    }
}

impl MapWidget for RecordingMap {
    fn create(&mut self, view: MapView) -> ScrollyResult<()> {
        if self.created {
            return Err(ScrollyError::Other(anyhow::anyhow!(
                "map container is already initialized"
            )));
        }
        self.created = true;
        self.calls.push(MapCall::Create { view });
        Ok(())
    }

    fn fly_to(&mut self, view: MapView, options: &FlyToOptions) -> ScrollyResult<()> {
        self.ensure_created("fly_to")?;
        self.calls.push(MapCall::FlyTo {
            view,
            options: options.clone(),
        });
        Ok(())
    }

    fn invalidate_size(&mut self) -> ScrollyResult<()> {
        self.ensure_created("invalidate_size")?;
        self.calls.push(MapCall::InvalidateSize);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stage/map.rs"]
mod tests;
