use super::*;
use crate::{
    foundation::{
        config::EngineConfig,
        core::{Medium, Millis, StepIndex},
    },
    schedule::timers::TimerQueue,
    stage::backend::{RecordingStage, StageOp},
};

fn image(i: u32, src: &str) -> StepRecord {
    StepRecord::new(StepIndex(i), Medium::Image, "t").with_file_path(src)
}

fn activate(
    r: &mut ImageRenderer,
    stage: &mut RecordingStage,
    timers: &mut TimerQueue<Deferred>,
    now: Millis,
    record: &StepRecord,
) {
    let config = EngineConfig::default();
    let mut ctx = RenderCtx {
        stage,
        timers,
        now,
        config: &config,
        map_container_shown: false,
    };
    r.activate(&mut ctx, record, None).unwrap();
}

#[test]
fn new_file_fades_out_and_schedules_swap() {
    let mut r = ImageRenderer::default();
    let mut stage = RecordingStage::new();
    let mut timers = TimerQueue::new();

    activate(&mut r, &mut stage, &mut timers, Millis(100), &image(1, "a.jpg").with_alt_text("A"));
    assert_eq!(stage.take_ops(), vec![StageOp::ImageOpacity { opacity: 0.0 }]);
    assert_eq!(timers.next_deadline(), Some(Millis(600)));
    assert_eq!(r.source(), Some("a.jpg"));

    let (_, task) = timers.pop_due(Millis(600)).unwrap();
    let Deferred::SwapImage {
        generation,
        src,
        alt,
    } = task
    else {
        panic!("expected image swap");
    };
    r.complete_swap(&mut stage, generation, &src, alt.as_deref()).unwrap();
    assert_eq!(
        stage.take_ops(),
        vec![
            StageOp::ImageSource {
                src: "a.jpg".to_string(),
                alt: Some("A".to_string())
            },
            StageOp::ImageOpacity { opacity: 1.0 },
        ]
    );
}

#[test]
fn zoom_only_change_scales_without_fade() {
    let mut r = ImageRenderer::default();
    let mut stage = RecordingStage::new();
    let mut timers = TimerQueue::new();

    activate(&mut r, &mut stage, &mut timers, Millis(0), &image(1, "a.jpg"));
    stage.take_ops();

    activate(&mut r, &mut stage, &mut timers, Millis(10), &image(2, "a.jpg").with_zoom(2.0));
    assert_eq!(stage.take_ops(), vec![StageOp::ImageScale { scale: 2.0 }]);

    // Same file and zoom again: nothing at all.
    activate(&mut r, &mut stage, &mut timers, Millis(20), &image(2, "a.jpg").with_zoom(2.0));
    assert!(stage.ops().is_empty());

    // Missing zoom keeps the current scale.
    activate(&mut r, &mut stage, &mut timers, Millis(30), &image(3, "a.jpg"));
    assert!(stage.ops().is_empty());

    // Only the first activation scheduled a swap.
    assert_eq!(std::iter::from_fn(|| timers.pop_due(Millis(10_000))).count(), 1);
}

#[test]
fn superseded_swap_is_dropped() {
    let mut r = ImageRenderer::default();
    let mut stage = RecordingStage::new();
    let mut timers = TimerQueue::new();

    activate(&mut r, &mut stage, &mut timers, Millis(0), &image(1, "a.jpg"));
    activate(&mut r, &mut stage, &mut timers, Millis(100), &image(2, "b.jpg"));
    stage.take_ops();

    while let Some((_, Deferred::SwapImage { generation, src, alt })) = timers.pop_due(Millis(1000)) {
        r.complete_swap(&mut stage, generation, &src, alt.as_deref()).unwrap();
    }
    let applied: Vec<&str> = stage
        .ops()
        .iter()
        .filter_map(|op| match op {
            StageOp::ImageSource { src, .. } => Some(src.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(applied, vec!["b.jpg"]);
}
