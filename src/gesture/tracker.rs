// Per-contact state tracking.
//
// The ContactSet owns every TouchPoint; the classifier reads them and is
// the sole writer of the `dragged` flag. Contacts are keyed by identifier
// in a BTreeMap, so every enumeration comes out in ascending identifier
// order — the one order all multi-contact computations use, making pinch
// vectors and splay circles independent of finger arrival order.

use std::collections::BTreeMap;

use log::trace;

use crate::geom::{Circle, Point, Vector, min_enclosing_circle};

use super::GestureError;

/// Capability to walk one step up a UI-node tree. The recognizer never
/// assumes anything else about the host's node type.
///
/// `parent` must eventually return `None`; a cyclic node graph will hang the
/// common-ancestor walk.
pub trait TargetNode: Clone + PartialEq {
    /// The node's parent, or `None` at the root.
    fn parent(&self) -> Option<Self>;
}

/// One raw contact sample from the input boundary.
#[derive(Debug, Clone)]
pub struct TouchSample<N> {
    /// Opaque identifier, unique among contacts currently on the surface.
    pub id: u64,
    pub x: f64,
    pub y: f64,
    /// Milliseconds on the input source's clock. All durations are derived
    /// from these; there is no internal timer.
    pub timestamp_ms: u64,
    /// Node the contact went down on.
    pub target: N,
}

// ============================================================================
// TOUCH POINT
// ============================================================================

/// History and state of one contact, from the sample that created it to the
/// one that last moved it.
#[derive(Debug, Clone)]
pub struct TouchPoint<N> {
    id: u64,
    target: N,
    start_ms: u64,
    last_ms: u64,
    start: Point,
    last: Point,
    dragged: bool,
}

impl<N: Clone> TouchPoint<N> {
    fn from_sample(sample: &TouchSample<N>) -> Result<Self, GestureError> {
        let position = Point::new(sample.x, sample.y)?;
        Ok(Self {
            id: sample.id,
            target: sample.target.clone(),
            start_ms: sample.timestamp_ms,
            last_ms: sample.timestamp_ms,
            start: position,
            last: position,
            dragged: false,
        })
    }

    /// Fold a later sample for the same contact into this state.
    ///
    /// Fails with [`GestureError::IdentifierMismatch`] if the sample belongs
    /// to a different contact.
    pub fn apply(&mut self, sample: &TouchSample<N>) -> Result<(), GestureError> {
        if sample.id != self.id {
            return Err(GestureError::IdentifierMismatch);
        }
        self.last_ms = sample.timestamp_ms;
        self.last = Point::new(sample.x, sample.y)?;
        Ok(())
    }

    pub fn id(&self) -> u64 { self.id }
    pub fn target(&self) -> &N { &self.target }

    /// Whether this contact is participating in a drag. Once set it never
    /// reverts within the contact's lifetime.
    pub fn dragged(&self) -> bool { self.dragged }

    pub(crate) fn mark_dragged(&mut self) {
        self.dragged = true;
    }

    /// Where the contact went down.
    pub fn start(&self) -> Point { self.start }

    /// Where the contact was last seen.
    pub fn last(&self) -> Point { self.last }

    /// How long the contact has been down, in milliseconds. Saturates at
    /// zero if the sample stream's timestamps run backwards.
    pub fn duration_ms(&self) -> u64 {
        self.last_ms.saturating_sub(self.start_ms)
    }

    /// Straight-line distance from the start position to the last.
    pub fn displacement(&self) -> f64 {
        self.start.distance_to(self.last)
    }

    /// Horizontal travel since the contact went down.
    pub fn dx(&self) -> f64 {
        self.last.x() - self.start.x()
    }

    /// Vertical travel since the contact went down. Positive is down the
    /// screen.
    pub fn dy(&self) -> f64 {
        self.last.y() - self.start.y()
    }

    /// Direction of travel in degrees on `[0, 360)`: 0 is right, 90 is up.
    /// The y delta is negated because screen coordinates grow downward.
    pub fn heading_degrees(&self) -> f64 {
        (-self.dy()).atan2(self.dx()).to_degrees().rem_euclid(360.0)
    }
}

// ============================================================================
// CONTACT SET
// ============================================================================

/// The set of contacts currently on the surface.
#[derive(Debug)]
pub struct ContactSet<N> {
    contacts: BTreeMap<u64, TouchPoint<N>>,
}

impl<N: TargetNode> ContactSet<N> {
    pub fn new() -> Self {
        Self {
            contacts: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Track a contact from its first sample. An existing contact under the
    /// same identifier is replaced.
    pub fn register(&mut self, sample: &TouchSample<N>) -> Result<(), GestureError> {
        trace!("register contact {} at ({}, {})", sample.id, sample.x, sample.y);
        let state = TouchPoint::from_sample(sample)?;
        self.contacts.insert(sample.id, state);
        Ok(())
    }

    /// Fold a sample into the contact it belongs to, registering the contact
    /// if it is not yet tracked.
    pub fn update(&mut self, sample: &TouchSample<N>) -> Result<(), GestureError> {
        match self.contacts.get_mut(&sample.id) {
            Some(state) => state.apply(sample),
            None => self.register(sample),
        }
    }

    /// Stop tracking one contact, returning its final state.
    pub fn remove(&mut self, id: u64) -> Option<TouchPoint<N>> {
        self.contacts.remove(&id)
    }

    /// Stop tracking everything.
    pub fn clear(&mut self) {
        self.contacts.clear();
    }

    pub fn get(&self, id: u64) -> Option<&TouchPoint<N>> {
        self.contacts.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: u64) -> Option<&mut TouchPoint<N>> {
        self.contacts.get_mut(&id)
    }

    /// Active contacts in ascending identifier order.
    pub fn enumerate(&self) -> impl Iterator<Item = &TouchPoint<N>> {
        self.contacts.values()
    }

    /// Cloned, ordered contact states — the payload shape gesture events
    /// carry.
    pub fn snapshot(&self) -> Vec<TouchPoint<N>> {
        self.contacts.values().cloned().collect()
    }

    /// Deepest node that is an ancestor of (or equal to) every contact's
    /// target. `None` for an empty set or targets in disjoint trees.
    pub fn common_target(&self) -> Option<N> {
        let mut contacts = self.contacts.values();
        let mut chain = ancestor_chain(contacts.next()?.target());
        for contact in contacts {
            let other = ancestor_chain(contact.target());
            let keep_from = chain.iter().position(|node| other.contains(node))?;
            chain.drain(..keep_from);
        }
        chain.into_iter().next()
    }

    /// Vector from the lower-identifier contact's last position to the
    /// higher's. `None` unless exactly two contacts are active.
    pub fn pinch_vector(&self) -> Option<Vector> {
        if self.contacts.len() != 2 {
            return None;
        }
        let mut contacts = self.contacts.values();
        let a = contacts.next()?;
        let b = contacts.next()?;
        Some(a.last().vector_to(b.last()))
    }

    /// Minimum enclosing circle of every contact's last position. `None`
    /// unless three or more contacts are active.
    pub fn splay_circle(&self) -> Option<Circle> {
        if self.contacts.len() < 3 {
            return None;
        }
        let points: Vec<Point> = self.contacts.values().map(|c| c.last()).collect();
        // The set is non-empty, so the hull (and with it the MEC) cannot fail.
        min_enclosing_circle(&points).ok()
    }
}

impl<N: TargetNode> Default for ContactSet<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// The node itself followed by its ancestors, deepest first.
fn ancestor_chain<N: TargetNode>(node: &N) -> Vec<N> {
    let mut chain = vec![node.clone()];
    let mut current = node.clone();
    while let Some(parent) = current.parent() {
        chain.push(parent.clone());
        current = parent;
    }
    chain
}
