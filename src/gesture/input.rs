// Winit boundary adapter.
// Folds winit's one-Touch-per-event stream into the batched
// start/move/end/cancel calls the recognizer consumes, stamping timestamps
// from a fixed epoch (winit touch events carry none).

use std::collections::BTreeMap;
use std::time::Instant;

use winit::event::{Touch, TouchPhase};

use super::GestureError;
use super::classifier::Recognizer;
use super::event::GestureSink;
use super::tracker::{TargetNode, TouchSample};

/// Target node for window surfaces. Winit exposes no widget tree, so every
/// touch shares the one root node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Surface;

impl TargetNode for Surface {
    fn parent(&self) -> Option<Self> {
        None
    }
}

/// Drives a [`Recognizer`] from winit touch events.
pub struct TouchAdapter<S> {
    recognizer: Recognizer<Surface, S>,
    /// Last known position of every finger currently down, by winit id.
    down: BTreeMap<u64, (f64, f64)>,
    epoch: Instant,
}

impl<S: GestureSink<Surface>> TouchAdapter<S> {
    pub fn new(recognizer: Recognizer<Surface, S>) -> Self {
        Self {
            recognizer,
            down: BTreeMap::new(),
            epoch: Instant::now(),
        }
    }

    pub fn recognizer(&self) -> &Recognizer<Surface, S> {
        &self.recognizer
    }

    pub fn recognizer_mut(&mut self) -> &mut Recognizer<Surface, S> {
        &mut self.recognizer
    }

    /// Feed one winit touch event. Call for every `WindowEvent::Touch`.
    pub fn process(&mut self, touch: &Touch) -> Result<(), GestureError> {
        let now_ms = self.epoch.elapsed().as_millis() as u64;
        let position = (touch.location.x, touch.location.y);

        match touch.phase {
            TouchPhase::Started => {
                self.down.insert(touch.id, position);
                let touching = self.batch(now_ms);
                self.recognizer.touch_start(&touching)
            }
            TouchPhase::Moved => {
                self.down.insert(touch.id, position);
                let changed = [make_sample(touch.id, position, now_ms)];
                self.recognizer.touch_move(&changed)
            }
            TouchPhase::Ended => {
                self.down.remove(&touch.id);
                let changed = [make_sample(touch.id, position, now_ms)];
                let remaining = self.batch(now_ms);
                self.recognizer.touch_end(&changed, &remaining)
            }
            TouchPhase::Cancelled => {
                self.down.remove(&touch.id);
                let changed = [make_sample(touch.id, position, now_ms)];
                let remaining = self.batch(now_ms);
                self.recognizer.touch_cancel(&changed, &remaining)
            }
        }
    }

    /// Every finger currently down as one sample batch.
    fn batch(&self, timestamp_ms: u64) -> Vec<TouchSample<Surface>> {
        self.down
            .iter()
            .map(|(&id, &position)| make_sample(id, position, timestamp_ms))
            .collect()
    }
}

fn make_sample(id: u64, (x, y): (f64, f64), timestamp_ms: u64) -> TouchSample<Surface> {
    TouchSample {
        id,
        x,
        y,
        timestamp_ms,
        target: Surface,
    }
}
