//! Script-facing drawing API: registers the turtle surface on the engine.
//!
//! Every operation has one canonical implementation on [`Turtle`]; the
//! tables below list the script names bound to it. A name in a row is a
//! pure synonym, never a separate behavior.

use std::rc::Rc;

use rhai::{Array, Dynamic, Engine, EvalAltResult};

use crate::turtle::{Turtle, TurtleFactory};

const CONSTRUCT: &[&str] = &["turtle", "Turtle"];
const SETPOS: &[&str] = &["setpos", "goto", "setposition"];
const SETHEADING: &[&str] = &["setheading", "seth"];
const FORWARD: &[&str] = &["forward", "fd"];
const BACKWARD: &[&str] = &["backward", "back", "bk"];
const LEFT: &[&str] = &["left", "lt"];
const RIGHT: &[&str] = &["right", "rt"];
const SHOW: &[&str] = &["show", "showturtle", "st"];
const HIDE: &[&str] = &["hide", "hideturtle", "ht"];
const PENDOWN: &[&str] = &["pendown", "pd", "down"];
const PENUP: &[&str] = &["penup", "pu", "up"];

/// Coerce a script value to a float; scripts pass integers and floats
/// interchangeably.
fn number(value: &Dynamic) -> Result<f64, Box<EvalAltResult>> {
    value
        .as_float()
        .or_else(|_| value.as_int().map(|n| n as f64))
        .map_err(|_| format!("expected a number, got {}", value.type_name()).into())
}

/// Install the injected capability set: the turtle surface and the
/// substituted wait primitive.
pub(crate) fn register(engine: &mut Engine, factory: TurtleFactory, wait: Rc<dyn Fn(f64)>) {
    engine.register_type_with_name::<Turtle>("Turtle");

    // `goto` is a reserved token; freeing it lets the alias parse.
    engine.disable_symbol("goto");

    for &name in CONSTRUCT {
        let factory = factory.clone();
        engine.register_fn(name, move || factory.create());
    }

    for &name in SETPOS {
        engine.register_fn(
            name,
            |t: &mut Turtle, x: Dynamic, y: Dynamic| -> Result<(), Box<EvalAltResult>> {
                t.setpos(number(&x)?, number(&y)?);
                Ok(())
            },
        );
    }

    for &name in SETHEADING {
        engine.register_fn(
            name,
            |t: &mut Turtle, angle: Dynamic| -> Result<(), Box<EvalAltResult>> {
                t.setheading(number(&angle)?);
                Ok(())
            },
        );
    }

    for &name in FORWARD {
        engine.register_fn(
            name,
            |t: &mut Turtle, distance: Dynamic| -> Result<(), Box<EvalAltResult>> {
                t.forward(number(&distance)?);
                Ok(())
            },
        );
    }

    for &name in BACKWARD {
        engine.register_fn(
            name,
            |t: &mut Turtle, distance: Dynamic| -> Result<(), Box<EvalAltResult>> {
                t.backward(number(&distance)?);
                Ok(())
            },
        );
    }

    for &name in LEFT {
        engine.register_fn(
            name,
            |t: &mut Turtle, angle: Dynamic| -> Result<(), Box<EvalAltResult>> {
                t.left(number(&angle)?);
                Ok(())
            },
        );
    }

    for &name in RIGHT {
        engine.register_fn(
            name,
            |t: &mut Turtle, angle: Dynamic| -> Result<(), Box<EvalAltResult>> {
                t.right(number(&angle)?);
                Ok(())
            },
        );
    }

    engine.register_fn("home", |t: &mut Turtle| t.home());

    engine.register_fn(
        "degrees",
        |t: &mut Turtle, full: Dynamic| -> Result<(), Box<EvalAltResult>> {
            t.degrees(number(&full)?)
                .map_err(|err| err.to_string().into())
        },
    );
    engine.register_fn(
        "degrees",
        |t: &mut Turtle| -> Result<(), Box<EvalAltResult>> {
            t.degrees(360.0).map_err(|err| err.to_string().into())
        },
    );
    engine.register_fn("radians", |t: &mut Turtle| t.radians());

    for &name in SHOW {
        engine.register_fn(name, |t: &mut Turtle| t.show());
    }
    for &name in HIDE {
        engine.register_fn(name, |t: &mut Turtle| t.hide());
    }
    engine.register_fn("setvisible", |t: &mut Turtle, visible: bool| {
        t.set_visible(visible)
    });

    for &name in PENDOWN {
        engine.register_fn(name, |t: &mut Turtle| t.pen_down());
    }
    for &name in PENUP {
        engine.register_fn(name, |t: &mut Turtle| t.pen_up());
    }

    // Read accessors: cached local state, no records.
    engine.register_fn("pos", |t: &mut Turtle| -> Array {
        let p = t.pos();
        vec![Dynamic::from(p.x), Dynamic::from(p.y)]
    });
    engine.register_fn("xcor", |t: &mut Turtle| t.xcor());
    engine.register_fn("ycor", |t: &mut Turtle| t.ycor());
    engine.register_fn("heading", |t: &mut Turtle| t.heading());
    engine.register_fn("isdown", |t: &mut Turtle| t.is_down());
    engine.register_fn("isvisible", |t: &mut Turtle| t.is_visible());

    // The substituted wait primitive. Installed once here; the
    // implementation is host-supplied so a sleeping script cannot suspend
    // the surrounding context.
    engine.register_fn(
        "sleep",
        move |seconds: Dynamic| -> Result<(), Box<EvalAltResult>> {
            let seconds = number(&seconds)?;
            if seconds > 0.0 {
                (*wait)(seconds);
            }
            Ok(())
        },
    );
}
