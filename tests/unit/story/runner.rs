use super::*;
use crate::{
    foundation::core::{Medium, Millis, StepIndex},
    stage::{
        backend::{RecordingStage, StageOp},
        map::RecordingMap,
        trigger::{RecordingTrigger, StepElement},
    },
    story::model::StepData,
};

fn story(steps: Vec<StepData>) -> Story {
    Story {
        story: StoryData {
            title: "A walk".to_string(),
            ..StoryData::default()
        },
        steps,
    }
}

fn image_row(path: &str) -> StepData {
    StepData {
        content_type: "image".to_string(),
        file_path: Some(path.to_string()),
        text: "t".to_string(),
        ..StepData::default()
    }
}

fn enter(step: u32) -> TriggerEvent {
    TriggerEvent::StepEnter {
        element: StepElement {
            step: StepIndex(step),
        },
    }
}

#[test]
fn start_sets_up_trigger_with_configured_options() {
    let mut trigger = RecordingTrigger::new();
    let runner = StoryRunner::start(
        &story(vec![image_row("a.jpg")]),
        EngineConfig::default(),
        RecordingStage::new(),
        RecordingMap::new(),
        &mut trigger,
    )
    .unwrap();
    assert_eq!(runner.records().len(), 1);
    assert_eq!(runner.story().title, "A walk");
    drop(runner);
    assert_eq!(trigger.setups, vec![EngineConfig::default().trigger]);
}

#[test]
fn invalid_story_is_displayed_then_raised() {
    let mut stage = RecordingStage::new();
    let mut trigger = RecordingTrigger::new();
    let result = StoryRunner::start(
        &story(vec![]),
        EngineConfig::default(),
        &mut stage,
        RecordingMap::new(),
        &mut trigger,
    );
    let Err(err) = result else {
        panic!("expected start to fail");
    };
    let shown = match stage.ops() {
        [StageOp::ShowError { failure }] => failure.clone(),
        other => panic!("unexpected ops {other:?}"),
    };
    assert_eq!(err.validation_failure(), Some(&shown));
    assert!(trigger.setups.is_empty());
}

#[test]
fn events_route_to_tracker_and_trigger() {
    let mut runner = StoryRunner::start(
        &story(vec![image_row("a.jpg"), image_row("b.jpg")]),
        EngineConfig::default(),
        RecordingStage::new(),
        RecordingMap::new(),
        RecordingTrigger::new(),
    )
    .unwrap();

    runner.handle(enter(2)).unwrap();
    runner.handle(TriggerEvent::Resize).unwrap();
    runner.advance_to(Millis(500)).unwrap();

    assert_eq!(runner.trigger().resizes, 1);
    assert_eq!(
        runner.tracker().active_step().map(|r| r.index()),
        Some(StepIndex(2))
    );
    assert_eq!(runner.tracker().active_content_type(), Some(Medium::Image));
}

#[test]
fn unknown_step_element_is_a_missing_target() {
    let mut runner = StoryRunner::start(
        &story(vec![image_row("a.jpg")]),
        EngineConfig::default(),
        RecordingStage::new(),
        RecordingMap::new(),
        RecordingTrigger::new(),
    )
    .unwrap();
    assert!(matches!(
        runner.handle(enter(0)),
        Err(ScrollyError::RenderTargetMissing(_))
    ));
    assert!(matches!(
        runner.handle(enter(7)),
        Err(ScrollyError::RenderTargetMissing(_))
    ));
    runner.run_until_idle().unwrap();
    assert!(runner.tracker().stage().ops().is_empty());
}
