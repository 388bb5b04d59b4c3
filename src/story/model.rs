use std::path::Path;

use crate::foundation::{
    core::{Medium, StepIndex},
    error::{ScrollyError, ScrollyResult, ValidationFailure},
};

/// A validated, immutable step as consumed by the engine.
///
/// Records are produced by [`validate_steps`] (or built directly with the `with_*` helpers)
/// and never change afterwards.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct StepRecord {
    index: StepIndex,
    content_type: Medium,
    #[serde(skip_serializing_if = "Option::is_none")]
    file_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    zoom_level: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    alt_text: Option<String>,
    text: String,
}

impl StepRecord {
    pub fn new(index: StepIndex, content_type: Medium, text: impl Into<String>) -> Self {
        Self {
            index,
            content_type,
            file_path: None,
            latitude: None,
            longitude: None,
            zoom_level: None,
            alt_text: None,
            text: text.into(),
        }
    }

    pub fn with_file_path(mut self, path: impl Into<String>) -> Self {
        self.file_path = Some(path.into());
        self
    }

    pub fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom_level = Some(zoom);
        self
    }

    pub fn with_alt_text(mut self, alt: impl Into<String>) -> Self {
        self.alt_text = Some(alt.into());
        self
    }

    pub fn index(&self) -> StepIndex {
        self.index
    }

    pub fn content_type(&self) -> Medium {
        self.content_type
    }

    pub fn file_path(&self) -> Option<&str> {
        self.file_path.as_deref()
    }

    pub fn latitude(&self) -> Option<f64> {
        self.latitude
    }

    pub fn longitude(&self) -> Option<f64> {
        self.longitude
    }

    /// Both coordinates, when present.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.latitude?, self.longitude?))
    }

    pub fn zoom_level(&self) -> Option<f64> {
        self.zoom_level
    }

    pub fn alt_text(&self) -> Option<&str> {
        self.alt_text.as_deref()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// True when showing this record needs a different sticky container than `active`.
    pub fn requires_medium_change(&self, active: Option<&StepRecord>) -> bool {
        match active {
            None => true,
            Some(other) => other.content_type != self.content_type,
        }
    }

    /// True when `other` shows the same content: same medium and same file or coordinates.
    ///
    /// Zoom and alt text are not part of the comparison.
    pub fn shows_same_content(&self, other: &StepRecord) -> bool {
        if self.content_type != other.content_type {
            return false;
        }
        match self.content_type {
            Medium::Image | Medium::Video => self.file_path == other.file_path,
            Medium::Map => self.coordinates() == other.coordinates(),
        }
    }

    /// Re-check the fields this record's medium requires.
    pub fn check(&self) -> ScrollyResult<()> {
        check_fields(
            self.index,
            self.content_type,
            self.file_path.as_deref(),
            self.latitude,
            self.longitude,
            self.zoom_level,
            &self.text,
            "Checking step",
        )
        .map_err(ScrollyError::from)
    }
}

/// A raw step row as it arrives from the data source, before validation.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepData {
    #[serde(default)]
    pub content_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom_level: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
    #[serde(default)]
    pub text: String,
}

/// Story-level copy shown around the steps.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryData {
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub end_text: String,
    /// Share of the horizontal space given to the step text, in percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_horizontal_percentage: Option<f64>,
}

impl StoryData {
    pub fn validate(&self, context: &str) -> ScrollyResult<()> {
        if self.title.trim().is_empty() {
            return Err(ValidationFailure::new(
                format!("{context}: the story has no title"),
                "Add a title to the story data",
            )
            .into());
        }
        if let Some(pct) = self.text_horizontal_percentage {
            if !pct.is_finite() {
                return Err(ValidationFailure::new(
                    format!("{context}: textHorizontalPercentage is not a number"),
                    "Set textHorizontalPercentage to a number between 1 and 99, or leave it empty",
                )
                .into());
            }
        }
        Ok(())
    }
}

/// A complete story document: metadata plus ordered steps.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Story {
    pub story: StoryData,
    pub steps: Vec<StepData>,
}

impl Story {
    pub fn from_json_str(s: &str) -> ScrollyResult<Self> {
        serde_json::from_str(s).map_err(|e| ScrollyError::serde(e.to_string()))
    }

    pub fn from_json_file(path: &Path) -> ScrollyResult<Self> {
        let s = std::fs::read_to_string(path).map_err(|e| {
            ScrollyError::Other(
                anyhow::Error::new(e).context(format!("read story '{}'", path.display())),
            )
        })?;
        Self::from_json_str(&s)
    }

    /// Validate metadata and steps, returning the engine-ready records.
    pub fn validate(&self) -> ScrollyResult<Vec<StepRecord>> {
        self.story.validate("Reading story data")?;
        validate_steps(&self.steps, "Reading steps")
    }
}

/// Validate raw rows and assign 1-based indices in input order.
///
/// Stops at the first offending row. `context` prefixes every message so the author knows
/// which part of the source was being read.
pub fn validate_steps(steps: &[StepData], context: &str) -> ScrollyResult<Vec<StepRecord>> {
    if steps.is_empty() {
        return Err(ValidationFailure::new(
            format!("{context}: no steps were found"),
            "Add at least one step to the story",
        )
        .with_hint("Each step needs a content type and some text")
        .into());
    }

    let mut out = Vec::with_capacity(steps.len());
    for (i, row) in steps.iter().enumerate() {
        let number = u32::try_from(i + 1).map_err(|_| {
            ScrollyError::validation(
                format!("{context}: too many steps"),
                "Split the story into smaller parts",
            )
        })?;
        let index = StepIndex::new(number)?;
        let content_type = Medium::parse(&row.content_type).map_err(|_| {
            ScrollyError::DataValidation(
                ValidationFailure::new(
                    format!(
                        "{context}: step {index} has unknown content type '{}'",
                        row.content_type.trim()
                    ),
                    format!("Set the content type of step {index} to image, map or video"),
                )
                .with_hint("Content types are not case sensitive"),
            )
        })?;
        let file_path = non_empty(row.file_path.as_deref());
        let alt_text = non_empty(row.alt_text.as_deref());

        check_fields(
            index,
            content_type,
            file_path.as_deref(),
            row.latitude,
            row.longitude,
            row.zoom_level,
            &row.text,
            context,
        )?;

        out.push(StepRecord {
            index,
            content_type,
            file_path,
            latitude: row.latitude,
            longitude: row.longitude,
            zoom_level: row.zoom_level,
            alt_text,
            text: row.text.clone(),
        });
    }
    Ok(out)
}

fn non_empty(s: Option<&str>) -> Option<String> {
    s.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}

#[allow(clippy::too_many_arguments)]
fn check_fields(
    index: StepIndex,
    content_type: Medium,
    file_path: Option<&str>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    zoom_level: Option<f64>,
    text: &str,
    context: &str,
) -> Result<(), ValidationFailure> {
    if text.trim().is_empty() {
        return Err(ValidationFailure::new(
            format!("{context}: step {index} has no text"),
            format!("Add the narrative text for step {index}"),
        ));
    }

    match content_type {
        Medium::Image | Medium::Video => {
            if file_path.is_none_or(|p| p.trim().is_empty()) {
                let hint = match content_type {
                    Medium::Video => "Video steps need an embed URL in the file path column",
                    _ => "Image steps need a relative path or URL to the image",
                };
                return Err(ValidationFailure::new(
                    format!("{context}: step {index} is a {content_type} step without a file path"),
                    format!("Add a file path to step {index}"),
                )
                .with_hint(hint));
            }
        }
        Medium::Map => {
            check_coordinate(index, "latitude", latitude, 90.0, context)?;
            check_coordinate(index, "longitude", longitude, 180.0, context)?;
        }
    }

    if let Some(zoom) = zoom_level {
        if !zoom.is_finite() || zoom <= 0.0 {
            return Err(ValidationFailure::new(
                format!("{context}: step {index} has an invalid zoom level '{zoom}'"),
                format!("Use a positive number for the zoom level of step {index}, or leave it empty"),
            ));
        }
    }
    Ok(())
}

fn check_coordinate(
    index: StepIndex,
    name: &str,
    value: Option<f64>,
    bound: f64,
    context: &str,
) -> Result<(), ValidationFailure> {
    let Some(v) = value else {
        return Err(ValidationFailure::new(
            format!("{context}: step {index} is a map step without a {name}"),
            format!("Add a {name} to step {index}"),
        ));
    };
    if !v.is_finite() || v.abs() > bound {
        return Err(ValidationFailure::new(
            format!("{context}: step {index} has a malformed {name} '{v}'"),
            format!("Use a {name} between -{bound} and {bound} for step {index}"),
        )
        .with_hint("Coordinates are decimal degrees, e.g. 47.6062, -122.3321"));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/story/model.rs"]
mod tests;
