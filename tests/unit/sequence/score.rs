use super::*;

fn name(index: u64, step: Option<u32>) -> FrameName {
    FrameName {
        index,
        interpolation: None,
        score_step: step,
    }
}

#[test]
fn thresholds_start_at_configured_value() {
    let mut t = ScoreTable::new(5);
    assert_eq!(t.record(&name(1, None)), 5);
    assert_eq!(t.record(&name(2, None)), 6);
    assert_eq!(t.record(&name(3, None)), 7);
    assert_eq!(t.counter(), 7);
}

#[test]
fn step_delays_its_own_frame() {
    let mut t = ScoreTable::new(0);
    t.record(&name(1, Some(3)));
    t.record(&name(2, Some(0)));
    t.record(&name(3, None));
    let thresholds: Vec<_> = t.entries().iter().map(|e| e.threshold).collect();
    assert_eq!(thresholds, vec![2, 3, 4]);
}

#[test]
fn counter_is_monotonic_for_positive_steps() {
    let mut t = ScoreTable::new(-2);
    let mut last = i64::MIN;
    for (i, s) in [2u32, 1, 7, 1, 3].into_iter().enumerate() {
        let th = t.record(&name(i as u64, Some(s)));
        assert!(th >= last);
        last = th;
    }
}

#[test]
fn repeated_frame_index_overwrites_in_place() {
    let mut t = ScoreTable::new(0);
    t.record(&name(1, None));
    t.record(&name(2, None));
    t.record(&name(1, None));
    assert_eq!(
        t.entries(),
        &[
            ScoreEntry {
                frame: 1,
                threshold: 2
            },
            ScoreEntry {
                frame: 2,
                threshold: 1
            }
        ]
    );
}

#[test]
fn dispatcher_lines_follow_insertion_order() {
    let mut t = ScoreTable::new(0);
    t.record(&name(2, None));
    t.record(&name(10, Some(2)));
    let settings = Settings {
        player: "#anim".to_owned(),
        objective: "tick".to_owned(),
        namespace: "pack:walk/".to_owned(),
        ..Settings::default()
    };
    assert_eq!(
        dispatcher_lines(&t, &settings),
        vec![
            "execute if score #anim tick matches 0 run function pack:walk/f2",
            "execute if score #anim tick matches 2 run function pack:walk/f10",
        ]
    );
}

#[test]
fn leading_step_shifts_first_threshold_past_start() {
    let mut t = ScoreTable::new(10);
    t.record(&name(1, Some(4)));
    t.record(&name(2, None));
    t.record(&name(5, Some(2)));
    let rows: Vec<_> = t.entries().iter().map(|e| (e.frame, e.threshold)).collect();
    assert_eq!(rows, vec![(1, 13), (2, 14), (5, 16)]);
}
