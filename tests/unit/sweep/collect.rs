use super::*;

fn frame(block_size: i64) -> FrameResult {
    FrameResult {
        image: RgbaImage::new(1, 1),
        block_size,
    }
}

fn order_of(outcome: SweepOutcome) -> Vec<i64> {
    outcome
        .into_result()
        .unwrap()
        .iter()
        .map(|f| f.block_size)
        .collect()
}

#[test]
fn frames_sort_ascending_by_default() {
    let c = ResultCollector::new();
    for bs in [5, 1, 3] {
        c.publish(Ok(frame(bs)));
    }
    assert_eq!(order_of(c.finish(FrameOrder::default())), vec![1, 3, 5]);
}

#[test]
fn frames_sort_descending_when_reversed() {
    let c = ResultCollector::new();
    for bs in [5, 1, 3] {
        c.publish(Ok(frame(bs)));
    }
    assert_eq!(
        order_of(c.finish(FrameOrder::from_reverse(true))),
        vec![5, 3, 1]
    );
}

#[test]
fn any_failure_discards_frames() {
    let c = ResultCollector::new();
    c.publish(Ok(frame(1)));
    c.publish(Err(FailureRecord::new(2, SweepError::transform("bad"))));
    c.publish(Ok(frame(3)));
    assert_eq!(c.published(), 3);

    match c.finish(FrameOrder::Ascending) {
        SweepOutcome::Failure(f) => assert_eq!(f.block_sizes(), vec![2]),
        SweepOutcome::AllFrames(_) => panic!("expected failure"),
    }
}

#[test]
fn failure_outcome_maps_to_sweep_failed() {
    let c = ResultCollector::new();
    c.publish(Err(FailureRecord::new(
        4,
        SweepError::NilTransformResult { block_size: 4 },
    )));
    let outcome = c.finish(FrameOrder::Ascending);
    assert!(!outcome.is_success());
    let err = outcome.into_result().unwrap_err();
    assert!(matches!(err, SweepError::SweepFailed(ref f) if f.len() == 1));
}

#[test]
fn concurrent_publishes_are_not_lost() {
    let c = ResultCollector::new();
    std::thread::scope(|s| {
        for t in 0..8i64 {
            let c = &c;
            s.spawn(move || {
                for i in 0..100i64 {
                    c.publish(Ok(frame(t * 100 + i)));
                }
            });
        }
    });
    let frames = c.finish(FrameOrder::Ascending).into_result().unwrap();
    assert_eq!(frames.len(), 800);
    assert!(frames.windows(2).all(|w| w[0].block_size < w[1].block_size));
}
