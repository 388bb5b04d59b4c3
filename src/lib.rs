//! Scrolly drives a scrollytelling story: as a reader scrolls through text steps, a sticky panel
//! beside them shows the image, map, or video that belongs to the active step.
//!
//! The crate is the step-to-content synchronization engine. It decides when the sticky
//! container must change medium, runs the timed cross-fade between containers, updates the
//! content inside a container, and guards against stale or redundant swaps.
//!
//! # Pipeline overview
//!
//! 1. **Validate**: [`Story`] rows → [`StepRecord`]s via [`validate_steps`]
//! 2. **Track**: a step-enter event reaches [`StepTracker::on_step_enter`], which marks the
//!    step active and works out whether the medium changed
//! 3. **Transition**: on a medium change every container fades out; after the fade the new
//!    container is displayed and fades back in
//! 4. **Render**: the Image, Map or Video renderer updates its own content
//!
//! The document, the map widget and the scroll detector are reached only through
//! [`StageBackend`], [`MapWidget`] and [`ScrollTrigger`]. Recording implementations of all
//! three are included for simulation and tests.
//!
//! Time is a virtual millisecond clock ([`Millis`]) advanced by the host. Delayed fade stages
//! carry the generation they were scheduled under and are dropped when a newer transition has
//! replaced them, so rapid scrolling always ends on the last step's content.
#![forbid(unsafe_code)]

mod foundation;
mod render;
mod schedule;
mod stage;
mod story;
mod tracker;
mod transition;

pub use foundation::config::{EngineConfig, TriggerConfig};
pub use foundation::core::{Display, Medium, Millis, StepIndex};
pub use foundation::error::{ScrollyError, ScrollyResult, ValidationFailure};
pub use schedule::timers::{Generation, GenerationCounter, TimerQueue};
pub use stage::backend::{RecordingStage, StageBackend, StageOp, display_then_raise};
pub use stage::map::{FlyToOptions, MapCall, MapView, MapWidget, RecordingMap};
pub use stage::trigger::{RecordingTrigger, ScrollTrigger, StepElement, TriggerEvent};
pub use story::model::{StepData, StepRecord, Story, StoryData, validate_steps};
pub use story::runner::StoryRunner;
pub use tracker::step_tracker::{EngineState, StepTracker};
pub use transition::controller::{ContainerState, PendingTransition, TransitionPhase};
