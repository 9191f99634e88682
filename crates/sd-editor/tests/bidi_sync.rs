//! Integration tests: bidirectional sync (sd-editor ↔ sd-core ↔ sd-render).
//!
//! Drives the `Synchronizer` the way a host would: text commits from the
//! editor pane, gesture streams from the drawing surface.

use pretty_assertions::assert_eq;
use sd_core::{Bounds, Color, EditorConfig, LineRange, Point, ShapeRecord};
use sd_editor::{GestureEvent, GestureState, Synchronizer};

const SCENE: &str = include_str!("fixtures/scene.sd");

fn scene() -> Synchronizer {
    Synchronizer::from_text(SCENE, &EditorConfig::default())
}

fn drag(sync: &mut Synchronizer, path: &[(f64, f64)]) -> Option<String> {
    let (x, y) = path[0];
    sync.handle_gesture(&GestureEvent::begin(x, y));
    for &(x, y) in &path[1..] {
        sync.handle_gesture(&GestureEvent::moved(x, y));
    }
    sync.handle_gesture(&GestureEvent::End).text
}

// ─── Text → Shapes ──────────────────────────────────────────────────────

#[test]
fn text_commit_builds_shapes_in_file_order() {
    let sync = scene();
    assert_eq!(
        sync.shapes().snapshot(),
        vec![
            ShapeRecord::oval(Bounds::new(0.0, 0.0, 100.0, 100.0), 1.0, "black", "white"),
            ShapeRecord::oval(Bounds::new(50.0, 50.0, 150.0, 150.0), 2.0, "red", "#00ff00"),
            ShapeRecord::oval(
                Bounds::new(300.0, 300.0, 310.0, 310.0),
                1.0,
                "nosuchcolor",
                "blue"
            ),
        ]
    );
    assert_eq!(
        sync.invalid_lines(),
        vec![LineRange {
            line: 1,
            start: 0,
            end: 14
        }]
    );
    assert_eq!(sync.text(), SCENE, "a commit never rewrites the text");
}

#[test]
fn unresolvable_color_renders_as_fallback() {
    let items = scene().render_list();
    assert_eq!(items.len(), 3);
    assert_eq!(items[2].outline, Color::BLACK);
    assert_eq!(items[2].fill, Color::rgb(0, 0, 255));
    assert!(scene().invalid_lines().iter().all(|r| r.line != 4));
}

// ─── Shapes → Text ──────────────────────────────────────────────────────

#[test]
fn drag_moves_topmost_shape_and_appends_raw_lines() {
    let mut sync = scene();
    let text = drag(&mut sync, &[(75.0, 75.0), (80.0, 75.0), (85.0, 75.0)]);
    assert_eq!(
        text.as_deref(),
        Some(
            "oval <0 0 100 100> 1 black white\n\
             oval <60 50 160 150> 2 red #00ff00\n\
             oval <300 300 310 310> 1 nosuchcolor blue\n\
             % a stray note"
        )
    );
    assert_eq!(
        sync.invalid_lines(),
        vec![LineRange {
            line: 3,
            start: 0,
            end: 14
        }]
    );
    assert!(sync.is_converged());
}

#[test]
fn gesture_edits_preserve_identity_and_order() {
    let mut sync = scene();
    let before: Vec<_> = sync.shapes().iter().map(|s| s.id).collect();
    drag(&mut sync, &[(10.0, 10.0), (20.0, 30.0)]);
    let after: Vec<_> = sync.shapes().iter().map(|s| s.id).collect();
    assert_eq!(before, after);
    assert_eq!(
        sync.shapes().get(before[0]).unwrap().record.bounds,
        Bounds::new(10.0, 20.0, 110.0, 120.0)
    );
}

#[test]
fn drawing_up_and_left_normalizes_bounds() {
    let mut sync = scene();
    let text = drag(&mut sync, &[(500.0, 500.0), (450.0, 480.0), (400.0, 450.0)]).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[3], "oval <400 450 500 500> 1 black white");
    assert_eq!(lines[4], "% a stray note");
}

#[test]
fn raw_lines_survive_gestures_verbatim() {
    let mut sync = Synchronizer::from_text(
        "  weird line  \noval <0 0 10 10> 1 black white\n<<>>",
        &EditorConfig::default(),
    );
    let text = drag(&mut sync, &[(5.0, 5.0), (6.0, 5.0)]).unwrap();
    assert_eq!(text, "oval <1 0 11 10> 1 black white\n  weird line  \n<<>>");
}

#[test]
fn leaving_the_surface_commits_at_last_position() {
    let mut sync = Synchronizer::default();
    sync.handle_gesture(&GestureEvent::begin(0.0, 0.0));
    sync.handle_gesture(&GestureEvent::moved(40.0, 20.0));
    let update = sync.handle_gesture(&GestureEvent::Leave);
    assert_eq!(update.text.as_deref(), Some("oval <0 0 40 20> 1 black white"));
    assert_eq!(sync.state(), GestureState::Idle);
}

// ─── Round-trip ─────────────────────────────────────────────────────────

#[test]
fn emitted_text_is_a_fixed_point() {
    let mut sync = scene();
    let text = drag(&mut sync, &[(305.0, 305.0), (306.0, 307.0)]).unwrap();
    let snapshot = sync.shapes().snapshot();

    let echo = sync.commit_text(&text);
    assert!(!echo.repaint, "echoing our own text must not rebuild shapes");

    let fresh = Synchronizer::from_text(&text, &EditorConfig::default());
    assert_eq!(fresh.shapes().snapshot(), snapshot);
    assert_eq!(fresh.invalid_lines(), sync.invalid_lines());
}

#[test]
fn overlap_resolves_to_most_recent_shape() {
    let mut sync = Synchronizer::from_text(
        "oval <0 0 10 10> 1 black white\noval <0 0 10 10> 1 red red",
        &EditorConfig::default(),
    );
    let ids: Vec<_> = sync.shapes().iter().map(|s| s.id).collect();
    sync.handle_gesture(&GestureEvent::begin(5.0, 5.0));
    assert_eq!(sync.state().shape(), Some(ids[1]));
    sync.handle_gesture(&GestureEvent::End);
}

// ─── Drawing style ──────────────────────────────────────────────────────

#[test]
fn cancelled_color_pick_keeps_previous_color() {
    let mut sync = Synchronizer::default();
    sync.set_outline_color(Some("purple")).unwrap();
    sync.set_outline_color(None).unwrap();
    sync.set_fill_color(None).unwrap();
    let text = drag(&mut sync, &[(1.0, 1.0), (2.0, 2.0)]).unwrap();
    assert_eq!(text, "oval <1 1 2 2> 1 purple white");
}

#[test]
fn text_commit_mid_gesture_wins() {
    let mut sync = scene();
    sync.handle_gesture(&GestureEvent::begin(75.0, 75.0));
    sync.handle_gesture(&GestureEvent::moved(90.0, 90.0));
    sync.commit_text("oval <1 2 3 4> 1 black white");
    assert_eq!(sync.state(), GestureState::Idle);
    let end = sync.handle_gesture(&GestureEvent::End);
    assert_eq!(end.text, None);
    assert_eq!(sync.text(), "oval <1 2 3 4> 1 black white");
    assert!(sync.shapes().hit_test(Point::new(2.0, 3.0)).is_some());
}
