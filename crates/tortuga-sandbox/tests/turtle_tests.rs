//! Tests for the turtle entity model:
//! - id assignment and run-scoped reset
//! - movement and heading arithmetic
//! - angle unit switching
//! - record emission per operation
//! - orphaning after a new run begins

use std::f64::consts::{FRAC_PI_2, PI};
use std::rc::Rc;

use tortuga_sandbox::{BufferSink, EventSink, TurtleFactory};
use tortuga_types::{Event, Point, TurtleId};

const TOLERANCE: f64 = 1e-9;

fn factory() -> (TurtleFactory, BufferSink) {
    let sink = BufferSink::new();
    let shared: Rc<dyn EventSink> = Rc::new(sink.clone());
    (TurtleFactory::new(shared), sink)
}

// ══════════════════════════════════════════════════════════════════════════════
// Construction & ids
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn ids_are_sequential_within_a_run() {
    let (factory, _sink) = factory();
    factory.begin_run();
    assert_eq!(factory.create().id(), TurtleId(0));
    assert_eq!(factory.create().id(), TurtleId(1));
    assert_eq!(factory.create().id(), TurtleId(2));
}

#[test]
fn ids_restart_at_zero_on_next_run() {
    let (factory, _sink) = factory();
    factory.begin_run();
    for _ in 0..5 {
        factory.create();
    }
    factory.begin_run();
    assert_eq!(factory.create().id(), TurtleId(0));
}

#[test]
fn construction_emits_creation_record_and_defaults() {
    let (factory, sink) = factory();
    factory.begin_run();
    let turtle = factory.create();
    assert_eq!(sink.drain(), vec![Event::CreateTurtle { id: TurtleId(0) }]);
    assert_eq!(turtle.pos(), Point::ORIGIN);
    assert_eq!(turtle.heading(), 0.0);
    assert!(turtle.is_down());
    assert!(turtle.is_visible());
}

// ══════════════════════════════════════════════════════════════════════════════
// Movement arithmetic
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn forward_then_backward_returns_home() {
    let (factory, _sink) = factory();
    factory.begin_run();
    let turtle = factory.create();
    turtle.setheading(37.0);
    turtle.forward(123.45);
    turtle.backward(123.45);
    assert!(turtle.pos().approx_eq(Point::ORIGIN, TOLERANCE));
}

#[test]
fn heading_90_degrees_moves_along_x() {
    let (factory, _sink) = factory();
    factory.begin_run();
    let turtle = factory.create();
    turtle.setheading(90.0);
    turtle.forward(10.0);
    assert!(turtle.pos().approx_eq(Point::new(10.0, 0.0), TOLERANCE));
}

#[test]
fn radian_mode_matches_degree_mode() {
    let (factory, _sink) = factory();
    factory.begin_run();
    let turtle = factory.create();
    turtle.radians();
    turtle.setheading(FRAC_PI_2);
    turtle.forward(10.0);
    assert!(turtle.pos().approx_eq(Point::new(10.0, 0.0), TOLERANCE));
}

#[test]
fn heading_zero_moves_straight_up() {
    let (factory, _sink) = factory();
    factory.begin_run();
    let turtle = factory.create();
    turtle.forward(25.0);
    assert!(turtle.pos().approx_eq(Point::new(0.0, 25.0), TOLERANCE));
}

#[test]
fn left_and_right_are_relative() {
    let (factory, _sink) = factory();
    factory.begin_run();
    let turtle = factory.create();
    turtle.setheading(90.0);
    turtle.left(30.0);
    assert!((turtle.heading() - 60.0).abs() < TOLERANCE);
    turtle.right(45.0);
    assert!((turtle.heading() - 105.0).abs() < TOLERANCE);
}

#[test]
fn heading_wraps_into_one_turn() {
    let (factory, _sink) = factory();
    factory.begin_run();
    let turtle = factory.create();
    turtle.setheading(450.0);
    assert!((turtle.heading() - 90.0).abs() < TOLERANCE);
    turtle.setheading(-90.0);
    assert!((turtle.heading() - 270.0).abs() < TOLERANCE);
}

// ══════════════════════════════════════════════════════════════════════════════
// Record emission
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn rotate_record_carries_absolute_radians() {
    let (factory, sink) = factory();
    factory.begin_run();
    let turtle = factory.create();
    sink.drain();
    turtle.setheading(180.0);
    let events = sink.drain();
    assert_eq!(events.len(), 1);
    match &events[0] {
        Event::RotateTurtle { id, angle } => {
            assert_eq!(*id, TurtleId(0));
            assert!((angle - PI).abs() < TOLERANCE);
        }
        other => panic!("expected rotate record, got {other:?}"),
    }
}

#[test]
fn rotate_record_is_unit_independent() {
    let (factory, sink) = factory();
    factory.begin_run();
    let degrees = factory.create();
    let radians = factory.create();
    radians.radians();
    sink.drain();
    degrees.setheading(90.0);
    radians.setheading(FRAC_PI_2);
    let events = sink.drain();
    let angles: Vec<f64> = events
        .iter()
        .map(|event| match event {
            Event::RotateTurtle { angle, .. } => *angle,
            other => panic!("expected rotate record, got {other:?}"),
        })
        .collect();
    assert!((angles[0] - angles[1]).abs() < TOLERANCE);
}

#[test]
fn home_emits_move_then_rotate() {
    let (factory, sink) = factory();
    factory.begin_run();
    let turtle = factory.create();
    turtle.setpos(30.0, 40.0);
    turtle.setheading(90.0);
    sink.drain();
    turtle.home();
    let events = sink.drain();
    assert_eq!(events.len(), 2);
    assert_eq!(
        events[0],
        Event::MoveTurtle {
            id: TurtleId(0),
            x: 0.0,
            y: 0.0,
            drawing: true,
        }
    );
    match events[1] {
        Event::RotateTurtle { angle, .. } => assert!(angle.abs() < TOLERANCE),
        ref other => panic!("expected rotate record, got {other:?}"),
    }
}

#[test]
fn pen_toggles_emit_nothing_but_flag_later_moves() {
    let (factory, sink) = factory();
    factory.begin_run();
    let turtle = factory.create();
    sink.drain();
    turtle.pen_up();
    turtle.pen_down();
    turtle.pen_up();
    assert!(sink.is_empty());
    turtle.setpos(5.0, 5.0);
    assert_eq!(
        sink.drain(),
        vec![Event::MoveTurtle {
            id: TurtleId(0),
            x: 5.0,
            y: 5.0,
            drawing: false,
        }]
    );
}

#[test]
fn visibility_changes_emit_showhide_records() {
    let (factory, sink) = factory();
    factory.begin_run();
    let turtle = factory.create();
    sink.drain();
    turtle.hide();
    turtle.show();
    assert_eq!(
        sink.drain(),
        vec![
            Event::ShowhideTurtle {
                id: TurtleId(0),
                visible: false,
            },
            Event::ShowhideTurtle {
                id: TurtleId(0),
                visible: true,
            },
        ]
    );
    // Visibility does not touch pen or position state.
    assert!(turtle.is_down());
    assert_eq!(turtle.pos(), Point::ORIGIN);
}

#[test]
fn accessors_emit_nothing() {
    let (factory, sink) = factory();
    factory.begin_run();
    let turtle = factory.create();
    sink.drain();
    let _ = turtle.pos();
    let _ = turtle.xcor();
    let _ = turtle.ycor();
    let _ = turtle.heading();
    let _ = turtle.is_down();
    let _ = turtle.is_visible();
    assert!(sink.is_empty());
}

// ══════════════════════════════════════════════════════════════════════════════
// Angle unit validation
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn degrees_rejects_non_positive_units() {
    let (factory, _sink) = factory();
    factory.begin_run();
    let turtle = factory.create();
    assert!(turtle.degrees(0.0).is_err());
    assert!(turtle.degrees(-360.0).is_err());
    assert!(turtle.degrees(f64::NAN).is_err());
    // The unit is unchanged after a rejected call.
    turtle.setheading(90.0);
    turtle.forward(10.0);
    assert!(turtle.pos().approx_eq(Point::new(10.0, 0.0), TOLERANCE));
}

#[test]
fn degrees_accepts_custom_full_circle() {
    let (factory, _sink) = factory();
    factory.begin_run();
    let turtle = factory.create();
    // Gradians: a quarter turn is 100 units.
    turtle.degrees(400.0).unwrap();
    turtle.setheading(100.0);
    turtle.forward(10.0);
    assert!(turtle.pos().approx_eq(Point::new(10.0, 0.0), TOLERANCE));
}

// ══════════════════════════════════════════════════════════════════════════════
// Orphaning & aliasing
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn orphaned_turtle_is_silent() {
    let (factory, sink) = factory();
    factory.begin_run();
    let turtle = factory.create();
    factory.begin_run();
    sink.drain();
    turtle.forward(10.0);
    turtle.setheading(45.0);
    turtle.hide();
    assert!(sink.is_empty());
}

#[test]
fn clones_alias_the_same_entity() {
    let (factory, _sink) = factory();
    factory.begin_run();
    let turtle = factory.create();
    let alias = turtle.clone();
    alias.forward(10.0);
    assert!((turtle.ycor() - 10.0).abs() < TOLERANCE);
    assert_eq!(turtle.id(), alias.id());
}
