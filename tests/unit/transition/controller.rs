use super::*;
use crate::{
    foundation::core::StepIndex,
    stage::{
        backend::{RecordingStage, StageOp},
        map::RecordingMap,
    },
};

fn controller() -> TransitionController<RecordingMap> {
    TransitionController::new(EngineConfig::default(), RecordingMap::new())
}

fn drain(c: &mut TransitionController<RecordingMap>, stage: &mut RecordingStage, until: Millis) {
    while let Some((at, task)) = c.pop_due(until) {
        c.fire(stage, at, task).unwrap();
    }
}

#[test]
fn switch_runs_fade_out_reveal_fade_in_idle() {
    let mut c = controller();
    let mut stage = RecordingStage::new();

    c.switch_medium(&mut stage, Millis(0), None, Medium::Map).unwrap();
    assert_eq!(c.phase(), TransitionPhase::FadingOut);
    assert_eq!(c.pending().unwrap().due, Millis(500));
    let ops = stage.take_ops();
    assert_eq!(ops.len(), 3);
    assert!(ops
        .iter()
        .all(|op| matches!(op, StageOp::ContainerOpacity { opacity, .. } if *opacity == 0.0)));

    drain(&mut c, &mut stage, Millis(499));
    assert_eq!(c.phase(), TransitionPhase::FadingOut);
    assert!(stage.ops().is_empty());

    drain(&mut c, &mut stage, Millis(500));
    assert_eq!(c.phase(), TransitionPhase::FadingIn);
    assert_eq!(
        stage.take_ops(),
        vec![
            StageOp::ContainerDisplay {
                medium: Medium::Image,
                display: Display::None
            },
            StageOp::ContainerDisplay {
                medium: Medium::Map,
                display: Display::Block
            },
            StageOp::ContainerDisplay {
                medium: Medium::Video,
                display: Display::None
            },
            StageOp::ContainerOpacity {
                medium: Medium::Map,
                opacity: 1.0
            },
        ]
    );

    drain(&mut c, &mut stage, Millis(1000));
    assert_eq!(c.phase(), TransitionPhase::Idle);
    assert!(c.pending().is_none());
    assert_eq!(
        c.container(Medium::Map),
        ContainerState {
            display: Display::Block,
            opacity: 1.0
        }
    );
}

#[test]
fn superseded_reveal_never_shows_its_container() {
    let mut c = controller();
    let mut stage = RecordingStage::new();

    c.switch_medium(&mut stage, Millis(0), None, Medium::Map).unwrap();
    c.switch_medium(&mut stage, Millis(200), Some(Medium::Map), Medium::Video)
        .unwrap();
    stage.take_ops();

    drain(&mut c, &mut stage, Millis(2000));
    let shown: Vec<Medium> = stage
        .ops()
        .iter()
        .filter_map(|op| match op {
            StageOp::ContainerDisplay { medium, display } if display.is_visible() => Some(*medium),
            _ => None,
        })
        .collect();
    assert_eq!(shown, vec![Medium::Video]);
    assert_eq!(c.phase(), TransitionPhase::Idle);
}

#[test]
fn switch_stops_video_before_fading() {
    let mut c = controller();
    let mut stage = RecordingStage::new();
    let rec = StepRecord::new(StepIndex(1), Medium::Video, "t").with_file_path("v");
    c.activate(&mut stage, Millis(0), &rec, None).unwrap();
    stage.take_ops();

    c.switch_medium(&mut stage, Millis(10), Some(Medium::Video), Medium::Image)
        .unwrap();
    assert_eq!(stage.ops()[0], StageOp::VideoSource { src: None });
    assert!(matches!(stage.ops()[1], StageOp::ContainerOpacity { .. }));
}

#[test]
fn missing_container_propagates() {
    let mut c = controller();
    let mut stage = RecordingStage::new().without_container(Medium::Map);
    assert!(matches!(
        c.switch_medium(&mut stage, Millis(0), None, Medium::Image),
        Err(crate::ScrollyError::RenderTargetMissing(_))
    ));
}

#[test]
fn failed_switch_leaves_the_running_transition_alone() {
    let mut c = controller();
    let mut stage = RecordingStage::new();
    c.switch_medium(&mut stage, Millis(0), None, Medium::Image).unwrap();
    let running = c.pending();

    let mut broken = RecordingStage::new().without_container(Medium::Video);
    assert!(
        c.switch_medium(&mut broken, Millis(100), Some(Medium::Image), Medium::Map)
            .is_err()
    );
    assert_eq!(c.pending(), running);

    drain(&mut c, &mut stage, Millis(2000));
    assert_eq!(c.phase(), TransitionPhase::Idle);
    assert_eq!(
        c.container(Medium::Image),
        ContainerState {
            display: Display::Flex,
            opacity: 1.0
        }
    );
    assert_eq!(c.container(Medium::Map).display, Display::None);
}

#[test]
fn failed_switch_from_rest_puts_opacity_back() {
    let mut c = controller();
    let mut stage = RecordingStage::new();
    c.switch_medium(&mut stage, Millis(0), None, Medium::Image).unwrap();
    drain(&mut c, &mut stage, Millis(1000));
    assert_eq!(c.phase(), TransitionPhase::Idle);

    let mut broken = RecordingStage::new().without_container(Medium::Video);
    assert!(
        c.switch_medium(&mut broken, Millis(1000), Some(Medium::Image), Medium::Map)
            .is_err()
    );
    assert_eq!(c.phase(), TransitionPhase::Idle);
    assert_eq!(c.next_deadline(), None);
    let last_image_opacity = broken.ops().iter().rev().find_map(|op| match op {
        StageOp::ContainerOpacity {
            medium: Medium::Image,
            opacity,
        } => Some(*opacity),
        _ => None,
    });
    assert_eq!(last_image_opacity, Some(1.0));
    assert_eq!(c.container(Medium::Image).opacity, 1.0);
}

#[test]
fn abandoned_switch_fades_back_to_the_previous_container() {
    let mut c = controller();
    let mut stage = RecordingStage::new();
    c.switch_medium(&mut stage, Millis(0), None, Medium::Image).unwrap();
    drain(&mut c, &mut stage, Millis(1000));

    c.switch_medium(&mut stage, Millis(1000), Some(Medium::Image), Medium::Video)
        .unwrap();
    c.abandon_switch(&mut stage, Millis(1000), Some(Medium::Image), Medium::Video);
    drain(&mut c, &mut stage, Millis(5000));

    assert_eq!(c.phase(), TransitionPhase::Idle);
    assert_eq!(c.container(Medium::Image).display, Display::Flex);
    assert_eq!(c.container(Medium::Video).display, Display::None);
}

#[test]
fn abandoned_first_switch_shows_nothing() {
    let mut c = controller();
    let mut stage = RecordingStage::new();
    c.switch_medium(&mut stage, Millis(0), None, Medium::Map).unwrap();
    c.abandon_switch(&mut stage, Millis(0), None, Medium::Map);
    assert!(c.pending().is_none());

    stage.take_ops();
    drain(&mut c, &mut stage, Millis(5000));
    assert!(stage.ops().is_empty());
    assert_eq!(c.container(Medium::Map).display, Display::None);
}
