use super::*;

const FRAME_NANOS: u64 = 16_666_667;

#[test]
fn zero_travel_does_not_start() {
    let mut settler = OffsetSettler::default();
    assert!(!settler.start(300.0, 300.0, 200));
    assert!(!settler.is_running());
    let frame = settler.step(0);
    assert_eq!(frame.offset, 300.0);
    assert!(!frame.running);
}

#[test]
fn first_frame_reports_start_offset() {
    let mut settler = OffsetSettler::new(Easing::LinearEasing);
    assert!(settler.start(500.0, 100.0, 100));
    let frame = settler.step(5 * FRAME_NANOS);
    assert_eq!(frame.offset, 500.0);
    assert!(frame.running);
}

#[test]
fn linear_settle_reaches_target_exactly() {
    let mut settler = OffsetSettler::new(Easing::LinearEasing);
    settler.start(500.0, 100.0, 100);

    let mut time = 0;
    let mut offsets = Vec::new();
    loop {
        let frame = settler.step(time);
        offsets.push(frame.offset);
        if !frame.running {
            break;
        }
        time += FRAME_NANOS;
        assert!(offsets.len() < 64, "settle never finished");
    }

    assert_eq!(*offsets.last().unwrap(), 100.0);
    assert!(offsets.windows(2).all(|pair| pair[1] <= pair[0]));
    // 100ms at ~60fps: start frame plus six or seven steps.
    assert!((7..=8).contains(&offsets.len()), "{:?}", offsets);
}

#[test]
fn cancel_keeps_current_offset() {
    let mut settler = OffsetSettler::new(Easing::LinearEasing);
    settler.start(0.0, 100.0, 100);
    settler.step(0);
    let mid = settler.step(50_000_000);
    assert!((mid.offset - 50.0).abs() < 0.01);

    settler.cancel();
    assert!(!settler.is_running());
    let after = settler.step(200_000_000);
    assert!((after.offset - 50.0).abs() < 0.01);
    assert_eq!(settler.final_offset(), 100.0);
}

#[test]
fn zero_duration_finishes_on_first_frame() {
    let mut settler = OffsetSettler::default();
    settler.start(0.0, 40.0, 0);
    let frame = settler.step(123);
    assert_eq!(frame.offset, 40.0);
    assert!(!frame.running);
}

#[test]
fn duration_without_velocity_scales_with_range_share() {
    // Full range: (1 + 1) * 256, capped at 600.
    assert_eq!(settle_duration_millis(400.0, 0.0, 400.0, 800.0), 512);
    // Half range.
    assert_eq!(settle_duration_millis(-200.0, 0.0, 400.0, 800.0), 384);
    assert_eq!(settle_duration_millis(0.0, 0.0, 400.0, 800.0), 0);
}

#[test]
fn duration_with_velocity_is_capped() {
    let fast = settle_duration_millis(200.0, 8_000.0, 400.0, 800.0);
    let slow = settle_duration_millis(200.0, 100.0, 400.0, 800.0);
    assert!(fast < slow);
    assert_eq!(slow, MAX_SETTLE_DURATION_MS);
    assert!(fast > 0);
}

#[test]
fn degenerate_geometry_still_yields_a_duration() {
    let duration = settle_duration_millis(120.0, 0.0, 0.0, 0.0);
    assert_eq!(duration, 512);
}
