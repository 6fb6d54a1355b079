use approx::assert_abs_diff_eq;
use coaster_core::CoasterError;
use coaster_demo::{
    App, DemoConfig, ImportedMeshes, InputState, Key, ProceduralAssets, CAR_MESH,
    MAX_ARC_SAMPLES_PER_SEGMENT,
};
use coaster_geometry::PathMode;
use coaster_math::{Point2, Point3};
use coaster_render::{DepthFunc, DrawKind};

fn no_skybox() -> DemoConfig {
    let mut config = DemoConfig::default();
    config.assets.skybox = None;
    config
}

#[test]
fn test_frame_plan_order_and_skybox_toggle() {
    let mut app = App::new(DemoConfig::default(), &ProceduralAssets::new()).unwrap();
    let mut input = InputState::new();

    let plan = app.step(1.0 / 60.0, &input).unwrap();
    let names: Vec<_> = plan.draws.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, ["track", "car", "skybox"]);
    assert_eq!(plan.draws[2].depth, DepthFunc::LessEqual);
    assert!(matches!(plan.draws[2].kind, DrawKind::Skybox(_)));

    // Held for several frames, N still flips the skybox only once.
    input.set_key(Key::N, true);
    for _ in 0..5 {
        let plan = app.step(1.0 / 60.0, &input).unwrap();
        assert!(!plan.draws_skybox());
        input.set_key(Key::N, true);
    }
    input.set_key(Key::N, false);
    input.set_key(Key::N, true);
    assert!(app.step(1.0 / 60.0, &input).unwrap().draws_skybox());
}

#[test]
fn test_car_follows_track() {
    let config = no_skybox();
    let mut app = App::new(config, &ProceduralAssets::new()).unwrap();
    let input = InputState::new();

    let car = app.scene().mesh(CAR_MESH).unwrap();
    assert_abs_diff_eq!(car.transform.translation(), Point3::ZERO, epsilon = 1e-9);

    // One unit per second for a second: the car has covered one unit of track.
    for _ in 0..60 {
        app.step(1.0 / 60.0, &input).unwrap();
    }
    assert_abs_diff_eq!(app.ride().distance(), 1.0, epsilon = 1e-9);
    let car_position = app.scene().mesh(CAR_MESH).unwrap().transform.translation();
    assert_abs_diff_eq!(car_position, app.ride().position().unwrap(), epsilon = 1e-9);
    assert!(car_position.x > 0.5 && car_position.y > 0.0);
}

#[test]
fn test_open_ride_ends_at_last_control_point() {
    let mut app = App::new(no_skybox(), &ProceduralAssets::new()).unwrap();
    let input = InputState::new();
    for _ in 0..100 {
        app.step(0.1, &input).unwrap();
    }
    assert!(app.ride().is_finished());
    assert_abs_diff_eq!(
        app.ride().position().unwrap(),
        Point3::new(4.0, 0.0, 0.0),
        epsilon = 1e-9
    );
}

#[test]
fn test_closed_ride_keeps_going() {
    let mut config = no_skybox();
    config.ride.mode = PathMode::Closed;
    let mut app = App::new(config, &ProceduralAssets::new()).unwrap();
    let input = InputState::new();
    let lap = app.ride().lap_time();
    for _ in 0..30 {
        app.step(lap / 7.0, &input).unwrap();
    }
    assert!(!app.ride().is_finished());
    assert!(app.ride().distance() < app.ride().length());
}

#[test]
fn test_camera_moves_with_keys() {
    let mut app = App::new(no_skybox(), &ProceduralAssets::new()).unwrap();
    let mut input = InputState::new();
    input.set_key(Key::W, true);
    app.step(0.0, &input).unwrap();
    assert_abs_diff_eq!(
        app.camera().position,
        Point3::new(0.0, 0.0, 4.9),
        epsilon = 1e-12
    );

    input.set_look_button(true);
    input.set_cursor(Point2::new(500.0, 400.0));
    app.step(0.0, &input).unwrap();
    assert_eq!(app.cursor_request(), Some(Point2::new(400.0, 400.0)));
}

#[test]
fn test_follow_camera() {
    let mut config = no_skybox();
    config.camera.follow_car = true;
    config.camera.follow_height = 0.5;
    let mut app = App::new(config, &ProceduralAssets::new()).unwrap();
    app.step(0.5, &InputState::new()).unwrap();

    let frame = app.ride().frame(coaster_math::Vector3::Y).unwrap();
    assert_abs_diff_eq!(
        app.camera().position,
        frame.position + frame.up * 0.5,
        epsilon = 1e-9
    );
}

#[test]
fn test_follow_camera_on_vertical_track() {
    let mut config = no_skybox();
    config.ride.control_points = vec![Point3::ZERO, Point3::new(0.0, 5.0, 0.0)];
    config.camera.follow_car = true;
    let mut app = App::new(config, &ProceduralAssets::new()).unwrap();
    let plan = app.step(0.5, &InputState::new()).unwrap();

    assert!(app.camera().view_matrix().is_finite());
    assert!(app.camera().matrix().is_finite());
    for draw in &plan.draws {
        if let DrawKind::Mesh(uniforms) = &draw.kind {
            assert!(uniforms.cam_matrix.iter().flatten().all(|v| v.is_finite()));
        }
    }
}

#[test]
fn test_imported_meshes() {
    #[rustfmt::skip]
    let triangle = vec![
        0.0, 0.0, 0.0,  0.0, 0.0, 1.0,  0.0, 0.0,
        1.0, 0.0, 0.0,  0.0, 0.0, 1.0,  1.0, 0.0,
        0.0, 1.0, 0.0,  0.0, 0.0, 1.0,  0.0, 1.0,
    ];
    let loader = ImportedMeshes {
        track_vertices: triangle.clone(),
        track_indices: vec![0, 1, 2],
        car_vertices: triangle,
        car_indices: vec![0, 2, 1],
    };
    let app = App::new(no_skybox(), &loader).unwrap();
    assert_eq!(app.scene().total_triangles(), 2);

    let broken = ImportedMeshes {
        car_indices: vec![0, 1, 7],
        ..loader
    };
    let err = App::new(no_skybox(), &broken).unwrap_err();
    assert!(err.is_invalid_input());
    assert!(err.to_string().contains("rollerCar.obj"));
}

#[test]
fn test_invalid_track_rejected() {
    let mut config = no_skybox();
    config.ride.control_points.truncate(1);
    let err = App::new(config, &ProceduralAssets::new()).unwrap_err();
    assert!(err.is_invalid_input());

    let mut app = App::new(no_skybox(), &ProceduralAssets::new()).unwrap();
    assert!(app.step(f64::NAN, &InputState::new()).is_err());
}

#[test]
fn test_zero_length_track_rejected() {
    let mut config = no_skybox();
    config.ride.control_points = vec![Point3::new(1.0, 2.0, 3.0); 3];
    let err = App::new(config, &ProceduralAssets::new()).unwrap_err();
    assert!(matches!(err, CoasterError::Geometry(_)), "{err}");
}

#[test]
fn test_oversized_arc_table_rejected() {
    let json = format!(
        r#"{{ "ride": {{ "arc_samples_per_segment": {} }} }}"#,
        usize::MAX / 2
    );
    let err = DemoConfig::from_json(&json).unwrap_err();
    assert!(matches!(err, CoasterError::Config(_)));

    // Built in code, the config skips validation; the ride still refuses it.
    let mut config = no_skybox();
    config.ride.arc_samples_per_segment = usize::MAX / 2;
    let err = App::new(config, &ProceduralAssets::new()).unwrap_err();
    assert!(err.is_invalid_input());

    let mut config = no_skybox();
    config.ride.arc_samples_per_segment = MAX_ARC_SAMPLES_PER_SEGMENT;
    assert!(App::new(config, &ProceduralAssets::new()).is_ok());
}

#[test]
fn test_load_config_file() {
    let dir = std::env::temp_dir().join("coaster_demo_config_test");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("ride.json");
    std::fs::write(
        &path,
        r#"{ "ride": { "mode": "closed", "speed": 3.0 }, "assets": { "track_texture": "tex/red.png" } }"#,
    )
    .unwrap();

    let config = DemoConfig::load(&path).unwrap();
    assert_eq!(config.ride.mode, PathMode::Closed);
    assert_eq!(config.assets.track_texture, dir.join("tex/red.png"));
    assert_eq!(config.assets.skybox.as_ref().unwrap().right, dir.join("right.jpg"));

    let missing = DemoConfig::load(&dir.join("missing.json")).unwrap_err();
    assert!(matches!(missing, CoasterError::Io(_)));

    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn test_export_html_animates_car() {
    let app = App::new(DemoConfig::default(), &ProceduralAssets::new()).unwrap();
    let keyframes = app.car_keyframes().unwrap();
    assert_eq!(keyframes.target, CAR_MESH);
    assert_eq!(keyframes.times.len(), keyframes.transforms.len());
    let last = keyframes.transforms.last().unwrap().translation();
    assert_abs_diff_eq!(last, Point3::new(4.0, 0.0, 0.0), epsilon = 1e-9);

    let out = std::env::temp_dir().join("coaster_demo_export_test.html");
    app.export_html(&out).unwrap();
    let html = std::fs::read_to_string(&out).unwrap();
    assert!(html.contains("target: \"car\""));
    assert!(html.contains("right.jpg"));
    let _ = std::fs::remove_file(out);
}
