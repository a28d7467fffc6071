use super::fixture::{result, small_frame, test_config, CountingClassifier, Fixture, FlickerCamera};
use crate::activity::ActivityResult;
use crate::activity_monitor::core::{init, transition, Event};
use crate::activity_monitor::render::{motion_meter, status_badge, Render};
use crate::device_display::impl_fake::DeviceDisplayFake;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

fn render_lines(model: &crate::activity_monitor::core::Model) -> Vec<String> {
    let display = DeviceDisplayFake::new();
    let handle = display.handle();
    let render = Render::new(Arc::new(Mutex::new(display)), test_config());
    render.init().unwrap();
    render.render(model).unwrap();
    handle.lines()
}

#[test]
fn test_motion_meter_scale() {
    assert_eq!(motion_meter(0), format!("[{}]", "-".repeat(40)));
    assert_eq!(motion_meter(1000), format!("[{}{}]", "#".repeat(20), "-".repeat(20)));
    assert_eq!(motion_meter(5000), format!("[{}]", "#".repeat(40)));
}

#[test]
fn test_waiting_for_camera() {
    let config = test_config();
    let (model, _) = init(&config);
    let (model, _) = transition(&config, model, Event::CameraStartDone(Err("denied".into())));

    let text = render_lines(&model).join("\n");
    assert!(text.contains("Waiting for camera permissions..."));
    assert!(text.contains("Detected: Waiting..."));
    assert!(text.contains("Total Detections: 0"));
}

#[test]
fn test_idle_with_motion_shows_motion_detected() {
    let config = test_config();
    let now = Instant::now();
    let (model, _) = init(&config);
    let (model, _) = transition(&config, model, Event::CameraStartDone(Ok(())));
    let (model, _) = transition(
        &config,
        model,
        Event::Tick {
            now,
            frame: Some(small_frame([100, 100, 100])),
        },
    );
    let mut changed = image::RgbImage::from_pixel(64, 48, image::Rgb([100, 100, 100]));
    for x in 0..10 {
        changed.put_pixel(x, 0, image::Rgb([255, 255, 255]));
    }
    let (model, _) = transition(
        &config,
        model,
        Event::Tick {
            now: now + Duration::from_millis(200),
            frame: Some(crate::frame::Frame::new(changed)),
        },
    );

    assert_eq!(model.motion_score, 10);
    assert_eq!(status_badge(&model), "MOTION DETECTED");
    assert!(render_lines(&model)[1].starts_with("MOTION DETECTED · Motion Delta: 10"));
}

#[test]
fn test_current_activity_and_chart() {
    let config = test_config();
    let (mut model, _) = init(&config);
    for label in ["Typing", "Typing", "Waving", "No Activity"] {
        model.history.record(result(label));
    }
    model.current_activity = Some(ActivityResult::failure("1:02:03 PM".to_string()));

    let lines = render_lines(&model);
    let text = lines.join("\n");
    assert!(text.contains("Detected: Error (0%)"));
    assert!(text.contains("Failed to analyze frame."));
    assert!(text.contains("Total Detections: 4 · Model: offline demo"));
    assert!(text.contains("Detection Log"));
    assert!(text.contains("[12:00:00 PM] No Activity: No Activity observed."));

    let typing = lines.iter().position(|l| l.starts_with("Typing")).unwrap();
    let waving = lines.iter().position(|l| l.starts_with("Waving")).unwrap();
    assert!(typing < waving);
    assert!(lines[typing].ends_with(" 2"));
    assert!(!lines.iter().any(|l| l.starts_with("No Activity ")));
}

#[test]
fn test_full_dashboard_fits_with_footer() {
    let config = test_config();
    let (mut model, _) = init(&config);
    for n in 0..12 {
        model.history.record(result(&format!("Activity {}", n)));
    }

    let lines = render_lines(&model);
    assert_eq!(lines.len(), 20);
    assert_eq!(lines[19], "[f] force analysis  [q] quit");
    assert!(lines.iter().filter(|l| l.starts_with("Activity ")).count() == 8);
    assert!(lines.contains(&"Detection Log".to_string()));
}

#[test]
fn test_monitor_snapshot_starts_idle() {
    let fixture = Fixture::new(
        FlickerCamera::default(),
        CountingClassifier::new(Duration::ZERO),
    );
    let snapshot = fixture.activity_monitor.snapshot().unwrap();
    assert!(!snapshot.is_processing());
    assert!(snapshot.history.is_empty());
    assert!(fixture.display.lines().is_empty());
}
