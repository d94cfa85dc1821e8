//! Tests for the scene model: segment bookkeeping, transform updates,
//! clearing, and the dirty flag.

use tortuga_scene::SceneModel;
use tortuga_types::{Event, Point, TurtleId};

fn create(model: &mut SceneModel, id: u32) {
    model.apply(&Event::CreateTurtle { id: TurtleId(id) });
}

fn mv(model: &mut SceneModel, id: u32, x: f64, y: f64, drawing: bool) {
    model.apply(&Event::MoveTurtle {
        id: TurtleId(id),
        x,
        y,
        drawing,
    });
}

fn segments(model: &SceneModel, id: u32) -> Vec<Vec<Point>> {
    model
        .turtle(TurtleId(id))
        .expect("turtle missing")
        .segments()
        .to_vec()
}

#[test]
fn create_inserts_default_entity() {
    let mut model = SceneModel::new();
    create(&mut model, 0);
    let turtle = model.turtle(TurtleId(0)).unwrap();
    assert_eq!(turtle.position, Point::ORIGIN);
    assert_eq!(turtle.heading, 0.0);
    assert!(turtle.visible);
    assert!(turtle.segments().is_empty());
}

#[test]
fn drawing_moves_build_one_segment() {
    let mut model = SceneModel::new();
    create(&mut model, 0);
    mv(&mut model, 0, 0.0, 0.0, true);
    mv(&mut model, 0, 10.0, 10.0, true);
    assert_eq!(
        segments(&model, 0),
        vec![vec![Point::new(0.0, 0.0), Point::new(10.0, 10.0)]]
    );
}

#[test]
fn one_point_per_drawing_move_plus_start() {
    let mut model = SceneModel::new();
    create(&mut model, 0);
    mv(&mut model, 0, 1.0, 1.0, true);
    mv(&mut model, 0, 2.0, 2.0, true);
    mv(&mut model, 0, 3.0, 3.0, true);
    let segs = segments(&model, 0);
    assert_eq!(segs.len(), 1);
    assert_eq!(segs[0].len(), 4);
    assert_eq!(segs[0][0], Point::ORIGIN);
}

#[test]
fn pen_interruption_starts_a_new_segment() {
    let mut model = SceneModel::new();
    create(&mut model, 0);
    mv(&mut model, 0, 10.0, 0.0, true);
    mv(&mut model, 0, 20.0, 0.0, false);
    mv(&mut model, 0, 30.0, 0.0, true);
    assert_eq!(
        segments(&model, 0),
        vec![
            vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)],
            vec![Point::new(20.0, 0.0), Point::new(30.0, 0.0)],
        ]
    );
}

#[test]
fn closed_segments_are_never_mutated_again() {
    let mut model = SceneModel::new();
    create(&mut model, 0);
    mv(&mut model, 0, 10.0, 0.0, true);
    mv(&mut model, 0, 20.0, 0.0, false);
    let closed = segments(&model, 0)[0].clone();
    mv(&mut model, 0, 30.0, 0.0, true);
    mv(&mut model, 0, 40.0, 0.0, true);
    assert_eq!(segments(&model, 0)[0], closed);
}

#[test]
fn degenerate_move_adds_no_duplicate_point() {
    let mut model = SceneModel::new();
    create(&mut model, 0);
    mv(&mut model, 0, 0.0, 0.0, true);
    mv(&mut model, 0, 0.0, 0.0, true);
    mv(&mut model, 0, 5.0, 5.0, true);
    assert_eq!(
        segments(&model, 0),
        vec![vec![Point::new(0.0, 0.0), Point::new(5.0, 5.0)]]
    );
}

#[test]
fn hidden_turtle_still_extends_its_segments() {
    let mut model = SceneModel::new();
    create(&mut model, 0);
    model.apply(&Event::ShowhideTurtle {
        id: TurtleId(0),
        visible: false,
    });
    mv(&mut model, 0, 15.0, 0.0, true);
    let turtle = model.turtle(TurtleId(0)).unwrap();
    assert!(!turtle.visible);
    assert_eq!(turtle.segments().len(), 1);
}

#[test]
fn rotate_and_showhide_update_the_transform() {
    let mut model = SceneModel::new();
    create(&mut model, 0);
    model.apply(&Event::RotateTurtle {
        id: TurtleId(0),
        angle: 1.25,
    });
    model.apply(&Event::ShowhideTurtle {
        id: TurtleId(0),
        visible: false,
    });
    let turtle = model.turtle(TurtleId(0)).unwrap();
    assert_eq!(turtle.heading, 1.25);
    assert!(!turtle.visible);
}

#[test]
fn clear_discards_all_turtle_state() {
    let mut model = SceneModel::new();
    create(&mut model, 0);
    create(&mut model, 1);
    mv(&mut model, 0, 10.0, 10.0, true);
    model.apply(&Event::Clear);
    assert!(model.is_empty());
    // Ids repeat across runs; the entity after a clear is brand new.
    create(&mut model, 0);
    assert!(model.turtle(TurtleId(0)).unwrap().segments().is_empty());
}

#[test]
fn records_for_unknown_ids_are_ignored() {
    let mut model = SceneModel::new();
    mv(&mut model, 9, 1.0, 1.0, true);
    model.apply(&Event::RotateTurtle {
        id: TurtleId(9),
        angle: 1.0,
    });
    assert!(model.is_empty());
}

#[test]
fn log_records_do_not_touch_the_scene() {
    let mut model = SceneModel::new();
    create(&mut model, 0);
    model.take_dirty();
    model.apply(&Event::Output {
        value: "hi".to_string(),
    });
    model.apply(&Event::Finished);
    assert!(!model.is_dirty());
}

#[test]
fn mutations_set_the_dirty_flag() {
    let mut model = SceneModel::new();
    assert!(!model.is_dirty());
    create(&mut model, 0);
    assert!(model.is_dirty());
    assert!(model.take_dirty());
    assert!(!model.take_dirty());
    mv(&mut model, 0, 1.0, 1.0, true);
    assert!(model.is_dirty());
}
