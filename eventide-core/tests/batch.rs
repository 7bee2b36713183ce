use std::cell::RefCell;

use eventide_core::{BatchSegmenter, ConfigError, DecayEstimator, DecayState, Event};

const T_DECAY_FIRST: f32 = 10_000.0;

fn ev(t: u64) -> Event {
    Event { t, x: 0, y: 0, p: 0 }
}

/// Drives the estimator pair by hand: decay first, then segmentation against
/// the freshly updated state.
fn drive(
    estimator: &mut DecayEstimator<impl FnMut(DecayState)>,
    segmenter: &mut BatchSegmenter<Event, impl FnMut(Vec<Event>)>,
    events: &[Event],
) {
    for &event in events {
        estimator.process(&event);
        segmenter.process(event, estimator.state());
    }
}

#[test]
fn second_event_splits_the_pair_at_unit_threshold() {
    let emitted: RefCell<Vec<Vec<Event>>> = RefCell::new(Vec::new());

    let mut estimator = DecayEstimator::new(T_DECAY_FIRST, |_| {}).unwrap();
    let mut segmenter =
        BatchSegmenter::new(1.0, |batch| emitted.borrow_mut().push(batch)).unwrap();

    let first = Event { t: 0, x: 120, y: 90, p: 0 };
    estimator.process(&first);
    segmenter.process(first, estimator.state());
    assert!(emitted.borrow().is_empty());
    assert_eq!(segmenter.pending().len(), 1);

    let second = Event { t: 10, x: 240, y: 180, p: 1 };
    estimator.process(&second);
    segmenter.process(second, estimator.state());

    let batches = emitted.borrow();
    assert_eq!(batches.len(), 1);
    let batch = &batches[0];
    assert_eq!(batch.len(), 2);
    assert_eq!(batch.first(), Some(&first));
    assert_eq!(batch.last(), Some(&second));
    assert!(segmenter.pending().is_empty());
}

#[test]
fn emitted_batches_are_contiguous_and_ordered() {
    let emitted: RefCell<Vec<Vec<Event>>> = RefCell::new(Vec::new());

    let mut estimator = DecayEstimator::new(T_DECAY_FIRST, |_| {}).unwrap();
    let mut segmenter =
        BatchSegmenter::new(0.5, |batch| emitted.borrow_mut().push(batch)).unwrap();

    let events: Vec<Event> = (0..150).map(|i| ev(i * 100_000)).collect();
    drive(&mut estimator, &mut segmenter, &events);

    let batches = emitted.borrow();
    assert!(!batches.is_empty());

    let mut replay: Vec<Event> = Vec::new();
    for batch in batches.iter() {
        assert!(!batch.is_empty(), "an emitted batch must never be empty");
        replay.extend_from_slice(batch);
    }
    replay.extend_from_slice(segmenter.pending());
    assert_eq!(replay, events);
}

#[test]
fn simultaneous_run_rides_along_with_the_splitting_event() {
    let emitted: RefCell<Vec<Vec<Event>>> = RefCell::new(Vec::new());

    let mut estimator = DecayEstimator::new(T_DECAY_FIRST, |_| {}).unwrap();
    let mut segmenter =
        BatchSegmenter::new(0.9, |batch| emitted.borrow_mut().push(batch)).unwrap();

    // 50 events share one timestamp; the weight stays at 1 the whole run
    // because the elapsed batch time is zero. The temporally separated event
    // crosses the threshold and the whole run flushes with it.
    let mut events: Vec<Event> = std::iter::repeat(ev(0)).take(50).collect();
    events.push(ev(10_000));
    drive(&mut estimator, &mut segmenter, &events);

    let batches = emitted.borrow();
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].len(), 51);
    assert_eq!(batches[0].first().map(|e| e.t), Some(0));
    assert_eq!(batches[0].last().map(|e| e.t), Some(10_000));
    assert!(segmenter.pending().is_empty());
}

#[test]
fn smaller_threshold_splits_strictly_later() {
    let events: Vec<Event> = (0..150).map(|i| ev(i * 100_000)).collect();

    let first_batch_len = |weight_thresh: f32| -> usize {
        let emitted: RefCell<Vec<Vec<Event>>> = RefCell::new(Vec::new());
        let mut estimator = DecayEstimator::new(T_DECAY_FIRST, |_| {}).unwrap();
        let mut segmenter =
            BatchSegmenter::new(weight_thresh, |batch| emitted.borrow_mut().push(batch))
                .unwrap();
        drive(&mut estimator, &mut segmenter, &events);
        let batches = emitted.borrow();
        assert!(!batches.is_empty(), "threshold {} never split", weight_thresh);
        batches[0].len()
    };

    let loose = first_batch_len(0.5);
    let tight = first_batch_len(0.05);
    assert!(
        tight > loose,
        "expected a smaller threshold to split later: {} <= {}",
        tight,
        loose
    );
}

#[test]
fn reset_discards_without_emitting() {
    let emitted: RefCell<Vec<Vec<Event>>> = RefCell::new(Vec::new());

    let mut estimator = DecayEstimator::new(T_DECAY_FIRST, |_| {}).unwrap();
    let mut segmenter =
        BatchSegmenter::new(0.1, |batch| emitted.borrow_mut().push(batch)).unwrap();

    // Idempotent on an empty segmenter.
    segmenter.reset();
    assert!(segmenter.pending().is_empty());

    drive(&mut estimator, &mut segmenter, &[ev(0), ev(10), ev(20)]);
    assert_eq!(segmenter.pending().len(), 3);

    segmenter.reset();
    assert!(segmenter.pending().is_empty());
    assert!(emitted.borrow().is_empty());
}

#[test]
fn take_pending_recovers_the_trailing_batch() {
    let mut estimator = DecayEstimator::new(T_DECAY_FIRST, |_| {}).unwrap();
    let mut segmenter = BatchSegmenter::new(0.1, |_: Vec<Event>| {}).unwrap();

    let events = [ev(0), ev(5), ev(9)];
    drive(&mut estimator, &mut segmenter, &events);

    let trailing = segmenter.take_pending();
    assert_eq!(trailing, events.to_vec());
    assert!(segmenter.pending().is_empty());
}

#[test]
fn construction_rejects_bad_thresholds() {
    for bad in [0.0f32, -0.5, f32::NAN, f32::INFINITY] {
        let result = BatchSegmenter::new(bad, |_: Vec<Event>| {});
        assert!(matches!(
            result.err(),
            Some(ConfigError::InvalidWeightThreshold(_))
        ));
    }
}
