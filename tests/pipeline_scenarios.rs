use quirodedos::actions::{ActionMapping, GestureAction};
use quirodedos::executor::RecordingExecutor;
use quirodedos::gesture_debouncer::DebounceState;
use quirodedos::provider::{FrameReader, LandmarkProvider, ScaledLandmarkProvider};
use quirodedos::config::FrameConfig;
use quirodedos::session::GestureSession;
use quirodedos::types::HandObservation;

/// Mano derecha con los dedos indicados (índice..meñique) extendidos y el pulgar opcional
fn right_hand(thumb: bool, fingers: [bool; 4]) -> Vec<(f32, f32)> {
    let mut pts = vec![(0.0f32, 0.0f32); 21];
    pts[0] = (320.0, 400.0);
    pts[1] = (290.0, 380.0);
    pts[2] = (270.0, 360.0);
    pts[3] = (260.0, 340.0);
    pts[4] = if thumb { (230.0, 330.0) } else { (275.0, 330.0) };

    for (f, &up) in fingers.iter().enumerate() {
        let mcp = 5 + f * 4;
        let x = 300.0 + 20.0 * f as f32;
        pts[mcp] = (x, 300.0);
        pts[mcp + 1] = (x, 260.0);
        pts[mcp + 2] = (x, if up { 230.0 } else { 270.0 });
        pts[mcp + 3] = (x, if up { 200.0 } else { 280.0 });
    }
    pts
}

fn observation(pts: &[(f32, f32)]) -> HandObservation {
    HandObservation::from_pixels(pts.iter().copied())
}

fn new_session() -> GestureSession<RecordingExecutor> {
    GestureSession::new(ActionMapping::standard(), RecordingExecutor::new())
}

#[test]
fn four_fingers_fire_next_once_while_held() {
    let mut session = new_session();
    let hand = observation(&right_hand(false, [true; 4]));

    let first = session.process(Some(&hand));
    assert_eq!(
        first.states().unwrap().as_array(),
        [false, true, true, true, true]
    );
    assert_eq!(first.gesture.unwrap().value(), 4);
    assert_eq!(first.dispatched, Some(GestureAction::SlideNext));

    for _ in 0..10 {
        let report = session.process(Some(&hand));
        assert_eq!(report.transition, None);
        assert_eq!(report.dispatched, None);
    }

    assert_eq!(session.executor().calls(), &[GestureAction::SlideNext]);
}

#[test]
fn hand_leaving_rearms_the_gesture() {
    let mut session = new_session();
    let hand = observation(&right_hand(false, [true, true, true, false]));

    session.process(Some(&hand));
    session.process(None);
    assert_eq!(session.debounce_state(), DebounceState::NoHand);
    session.process(Some(&hand));

    assert_eq!(
        session.executor().calls(),
        &[GestureAction::SlideBack, GestureAction::SlideBack]
    );
}

#[test]
fn unmapped_gestures_never_reach_executor() {
    let mut session = new_session();
    let fist = observation(&right_hand(false, [false; 4]));
    let open = observation(&right_hand(true, [true; 4]));

    for hand in [&fist, &open, &fist, &open] {
        let report = session.process(Some(hand));
        assert!(report.transition.is_some());
        assert_eq!(report.dispatched, None);
    }

    let (stats, executor) = session.finish();
    assert_eq!(stats.transitions, 4);
    assert!(executor.calls().is_empty());
}

#[test]
fn volume_gestures_switch_back_and_forth() {
    let mut session = new_session();
    let one = observation(&right_hand(false, [true, false, false, false]));
    let thumb_and_index = observation(&right_hand(true, [true, false, false, false]));

    for hand in [&one, &one, &thumb_and_index, &thumb_and_index, &one] {
        session.process(Some(hand));
    }

    assert_eq!(
        session.executor().calls(),
        &[
            GestureAction::VolumeMin,
            GestureAction::VolumeMax,
            GestureAction::VolumeMin
        ]
    );
}

#[test]
fn dropped_landmark_is_treated_as_no_hand() {
    let mut session = new_session();
    let mut pts = right_hand(false, [true; 4]);
    pts.pop();

    let report = session.process(Some(&observation(&pts)));
    assert!(report.rejected.is_some());
    assert_eq!(report.gesture, None);
    assert_eq!(report.dispatched, None);
    assert!(session.executor().calls().is_empty());
}

#[test]
fn json_lines_drive_the_session() {
    let to_json = |pts: &[(f32, f32)]| {
        let coords: Vec<[f32; 2]> = pts
            .iter()
            .map(|&(x, y)| [x / 640.0, y / 480.0])
            .collect();
        serde_json::json!({ "landmarks": coords }).to_string()
    };
    let two = to_json(&right_hand(false, [true, true, false, false]));
    let input = format!("{two}\n{two}\n{{\"landmarks\": null}}\nbasura\n{two}\n");

    let mut provider = ScaledLandmarkProvider::new(&FrameConfig::default());
    let mut session = new_session();
    for item in FrameReader::new(input.as_bytes()) {
        let frame = item.unwrap();
        let observation = frame.and_then(|f| provider.detect(&f));
        session.process(observation.as_ref());
    }

    assert_eq!(session.stats().frames, 5);
    assert_eq!(
        session.executor().calls(),
        &[GestureAction::VolumeMax, GestureAction::VolumeMax]
    );
}
