// Gesture classification state machine.
//
// The machine's state is implicit: the active-contact count plus each
// contact's dragged flag fully determine which gesture is in flight.
//   1 contact  → tap / flick / drag, resolved on release or on crossing
//                the flick duration window
//   2 contacts → pinch
//   3 or more  → splay
// Every contact arriving or leaving ends the current gesture, resets
// tracking, and opens whatever gesture the surviving set forms. Termination
// events always precede the replacement's start events.

use log::debug;

use super::GestureError;
use super::event::{CardinalDirection, Gesture, GestureEvent, GestureSink, Phase};
use super::tracker::{ContactSet, TargetNode, TouchSample};

// ============================================================================
// THRESHOLDS
// ============================================================================

/// Longest press that still counts as a tap.
pub const MAX_TAP_DURATION_MS: u64 = 50;
/// Farthest a tap may wander, in surface units.
pub const MAX_TAP_DISTANCE: f64 = 5.0;
/// Longest press that still counts as a flick; held longer becomes a drag.
pub const MAX_FLICK_DURATION_MS: u64 = 150;
/// How far off a compass axis a flick may point and still snap to it, in
/// degrees.
pub const MAX_FLICK_VARIANCE_DEG: f64 = 15.0;

// ============================================================================
// RECOGNIZER
// ============================================================================

/// The gesture classifier. Owns a [`ContactSet`] and a sink; feed it the
/// four boundary operations and it emits classified gestures synchronously,
/// in order, during each call.
///
/// Streams with non-monotonic timestamps, or with the same identifier twice
/// in one batch, are outside the classification guarantees: durations
/// saturate at zero and a duplicated identifier last-writes.
pub struct Recognizer<N, S> {
    contacts: ContactSet<N>,
    sink: S,
    synthesize_click: bool,
}

impl<N: TargetNode, S: GestureSink<N>> Recognizer<N, S> {
    pub fn new(sink: S) -> Self {
        Self {
            contacts: ContactSet::new(),
            sink,
            synthesize_click: false,
        }
    }

    /// Emit a synthetic click alongside every tap, for platforms that do
    /// not deliver a native click for touch input.
    pub fn with_click_synthesis(mut self, enabled: bool) -> Self {
        self.synthesize_click = enabled;
        self
    }

    /// The contacts currently being tracked.
    pub fn contacts(&self) -> &ContactSet<N> {
        &self.contacts
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    // ------------------------------------------------------------------
    // Boundary operations
    // ------------------------------------------------------------------

    /// A contact went down. `touches` is every contact now on the surface,
    /// including the new one.
    pub fn touch_start(&mut self, touches: &[TouchSample<N>]) -> Result<(), GestureError> {
        // A new finger ends whatever gesture the previous set was in.
        match self.contacts.len() {
            1 => {
                let dragged = self.contacts.enumerate().next().cloned();
                if let Some(touch) = dragged.filter(|t| t.dragged()) {
                    self.emit_single(Gesture::Drag {
                        phase: Phase::End,
                        touch,
                    });
                }
            }
            2 => self.emit_pinch(Phase::End),
            n if n >= 3 => self.emit_splay(Phase::End),
            _ => {}
        }
        self.restart(touches)
    }

    /// One or more contacts moved.
    pub fn touch_move(&mut self, changed: &[TouchSample<N>]) -> Result<(), GestureError> {
        for sample in changed {
            self.contacts.update(sample)?;
        }

        match self.contacts.len() {
            1 => {
                let Some(id) = changed.first().map(|s| s.id) else {
                    return Ok(());
                };
                let Some(state) = self.contacts.get_mut(id) else {
                    return Ok(());
                };
                // Held past the flick window: this is a drag. Until then the
                // contact stays unclassified — it may still resolve as a tap
                // or flick on release.
                if state.duration_ms() > MAX_FLICK_DURATION_MS {
                    let starting = !state.dragged();
                    state.mark_dragged();
                    let touch = state.clone();
                    if starting {
                        debug!("contact {} held past the flick window, drag begins", touch.id());
                        self.emit_single(Gesture::Drag {
                            phase: Phase::Start,
                            touch: touch.clone(),
                        });
                    }
                    self.emit_single(Gesture::Drag {
                        phase: Phase::Update,
                        touch,
                    });
                }
            }
            2 => self.emit_pinch(Phase::Update),
            n if n >= 3 => self.emit_splay(Phase::Update),
            _ => {}
        }
        Ok(())
    }

    /// One or more contacts lifted. `changed` are the lifted contacts,
    /// `remaining` every contact still on the surface.
    pub fn touch_end(
        &mut self,
        changed: &[TouchSample<N>],
        remaining: &[TouchSample<N>],
    ) -> Result<(), GestureError> {
        // Classification reads the state as it stood before the lift; the
        // lifted sample's own coordinates are not folded in.
        match self.contacts.len() {
            1 => self.classify_single_release(changed),
            2 => self.emit_pinch(Phase::End),
            n if n >= 3 => self.emit_splay(Phase::End),
            _ => {}
        }
        self.restart(remaining)
    }

    /// The platform withdrew one or more contacts. No tap or flick is ever
    /// classified on cancellation; in-flight gestures get their cancel
    /// variant.
    pub fn touch_cancel(
        &mut self,
        changed: &[TouchSample<N>],
        remaining: &[TouchSample<N>],
    ) -> Result<(), GestureError> {
        match self.contacts.len() {
            1 => {
                let state = changed
                    .first()
                    .and_then(|s| self.contacts.get(s.id))
                    .cloned();
                if let Some(touch) = state.filter(|t| t.dragged()) {
                    self.emit_single(Gesture::Drag {
                        phase: Phase::Cancel,
                        touch,
                    });
                }
            }
            2 => self.emit_pinch(Phase::Cancel),
            n if n >= 3 => self.emit_splay(Phase::Cancel),
            _ => {}
        }
        self.restart(remaining)
    }

    // ------------------------------------------------------------------
    // Classification
    // ------------------------------------------------------------------

    /// Lift of the only active contact: tap, flick (possibly cardinal), or
    /// drag end.
    fn classify_single_release(&mut self, changed: &[TouchSample<N>]) {
        let Some(state) = changed
            .first()
            .and_then(|s| self.contacts.get(s.id))
            .cloned()
        else {
            return;
        };

        let duration = state.duration_ms();
        let distance = state.displacement();

        if distance <= MAX_TAP_DISTANCE && duration <= MAX_TAP_DURATION_MS {
            debug!("contact {} classified as tap", state.id());
            if self.synthesize_click {
                self.emit_single(Gesture::Click(state.clone()));
            }
            self.emit_single(Gesture::Tap(state));
        } else if duration <= MAX_FLICK_DURATION_MS {
            let heading = state.heading_degrees();
            debug!("contact {} classified as flick at {heading:.1}°", state.id());
            self.emit_single(Gesture::Flick(state.clone()));
            if let Some(direction) = cardinal_direction(heading) {
                self.emit_single(Gesture::FlickCardinal {
                    direction,
                    touch: state,
                });
            }
        } else if state.dragged() {
            self.emit_single(Gesture::Drag {
                phase: Phase::End,
                touch: state,
            });
        }
    }

    /// Drop all tracking, re-register the contacts still touching, and open
    /// the gesture that set forms.
    fn restart(&mut self, touching: &[TouchSample<N>]) -> Result<(), GestureError> {
        self.contacts.clear();
        for sample in touching {
            self.contacts.register(sample)?;
        }
        match self.contacts.len() {
            2 => self.emit_pinch(Phase::Start),
            n if n >= 3 => self.emit_splay(Phase::Start),
            _ => {}
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Emission
    // ------------------------------------------------------------------

    /// Emit a single-contact gesture, addressed to the touch's own target.
    fn emit_single(&mut self, gesture: Gesture<N>) {
        let target = match &gesture {
            Gesture::Tap(t) | Gesture::Click(t) | Gesture::Flick(t) => Some(t.target().clone()),
            Gesture::FlickCardinal { touch, .. } | Gesture::Drag { touch, .. } => {
                Some(touch.target().clone())
            }
            Gesture::Pinch { .. } | Gesture::Splay { .. } => None,
        };
        self.sink.emit(GestureEvent { target, gesture });
    }

    fn emit_pinch(&mut self, phase: Phase) {
        if let Some(vector) = self.contacts.pinch_vector() {
            debug!("pinch {phase:?}");
            let event = GestureEvent {
                target: self.contacts.common_target(),
                gesture: Gesture::Pinch {
                    phase,
                    vector,
                    touches: self.contacts.snapshot(),
                },
            };
            self.sink.emit(event);
        }
    }

    fn emit_splay(&mut self, phase: Phase) {
        if let Some(circle) = self.contacts.splay_circle() {
            debug!("splay {phase:?}");
            let event = GestureEvent {
                target: self.contacts.common_target(),
                gesture: Gesture::Splay {
                    phase,
                    circle,
                    touches: self.contacts.snapshot(),
                },
            };
            self.sink.emit(event);
        }
    }
}

/// Snap a heading to a compass axis when it points within
/// [`MAX_FLICK_VARIANCE_DEG`] of one. `heading` is degrees on `[0, 360)`.
fn cardinal_direction(heading: f64) -> Option<CardinalDirection> {
    // Offset from the nearest axis, remapped into (-45, 45].
    let mut variance = heading % 90.0;
    if variance > 45.0 {
        variance -= 90.0;
    }
    if variance.abs() > MAX_FLICK_VARIANCE_DEG {
        return None;
    }
    // The snapped heading is 90k up to float dust; round before matching.
    match (heading - variance).rem_euclid(360.0).round() as u32 {
        0 | 360 => Some(CardinalDirection::Right),
        90 => Some(CardinalDirection::Up),
        180 => Some(CardinalDirection::Left),
        270 => Some(CardinalDirection::Down),
        _ => None,
    }
}
