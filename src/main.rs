// Touch gesture demo: opens a window, routes its touch events through the
// recognizer, and logs every classified gesture.
// Run with RUST_LOG=info (or debug for per-transition detail).

use winit::{
    event::{ElementState, Event as WinitEvent, KeyEvent, WindowEvent},
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::Window,
};

use splaykit::gesture::input::{Surface, TouchAdapter};
use splaykit::{FnSink, Gesture, GestureEvent, Phase, Recognizer};

/// One compact line per gesture for the log.
fn describe(event: &GestureEvent<Surface>) -> String {
    let phase = |p: &Phase| match p {
        Phase::Start => "start",
        Phase::Update => "update",
        Phase::End => "end",
        Phase::Cancel => "cancel",
    };
    match &event.gesture {
        Gesture::Tap(t) => format!("tap at ({:.0}, {:.0})", t.last().x(), t.last().y()),
        Gesture::Click(t) => format!("click at ({:.0}, {:.0})", t.last().x(), t.last().y()),
        Gesture::Flick(t) => format!(
            "flick {:.0}px at {:.0}°",
            t.displacement(),
            t.heading_degrees()
        ),
        Gesture::FlickCardinal { direction, .. } => format!("flick {direction:?}"),
        Gesture::Drag { phase: p, touch } => format!(
            "drag {} at ({:.0}, {:.0})",
            phase(p),
            touch.last().x(),
            touch.last().y()
        ),
        Gesture::Pinch { phase: p, vector, .. } => {
            format!("pinch {} span {:.0}px", phase(p), vector.magnitude())
        }
        Gesture::Splay { phase: p, circle, .. } => {
            format!("splay {} radius {:.0}px", phase(p), circle.radius())
        }
    }
}

fn main() {
    env_logger::init();

    let event_loop = EventLoop::new().unwrap();

    let window_attributes = Window::default_attributes()
        .with_title("splaykit touch demo")
        .with_inner_size(winit::dpi::LogicalSize::new(800, 600));

    let window = event_loop.create_window(window_attributes).unwrap();

    let recognizer = Recognizer::new(FnSink(|event: GestureEvent<Surface>| {
        log::info!("{}", describe(&event));
    }));
    let mut adapter = TouchAdapter::new(recognizer);

    event_loop
        .run(move |event, control_flow| match event {
            WinitEvent::WindowEvent {
                ref event,
                window_id,
            } if window_id == window.id() => match event {
                WindowEvent::CloseRequested
                | WindowEvent::KeyboardInput {
                    event:
                        KeyEvent {
                            state: ElementState::Pressed,
                            physical_key: PhysicalKey::Code(KeyCode::Escape),
                            ..
                        },
                    ..
                } => control_flow.exit(),
                WindowEvent::Touch(touch) => {
                    if let Err(err) = adapter.process(touch) {
                        log::error!("dropping malformed touch sample: {err}");
                    }
                }
                _ => {}
            },
            _ => {}
        })
        .unwrap();
}
