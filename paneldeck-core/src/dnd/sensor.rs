//! Drag activation
//!
//! A press does not start a drag right away. Mouse and pen drags start once
//! the pointer has travelled a few pixels, so that clicks on a tab still
//! select it. Touch drags start after the finger rests for a moment, so that
//! a swipe still scrolls the tab strip.
//!
//! [`DragController`] is a toolkit-neutral state machine fed with
//! timestamped input. Timestamps are milliseconds from any monotonic clock.

use crate::geometry::Point;
use crate::settings::LayoutSettings;

/// Kind of input device behind a press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    /// Mouse or pen.
    Pointer,
    /// Finger on a touch screen.
    Touch,
}

/// Condition a press must meet before it becomes a drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActivationConstraint {
    /// Start after moving at least `px` pixels.
    Distance {
        /// Travel threshold in pixels.
        px: f64,
    },
    /// Start after holding for `ms` milliseconds without moving more than
    /// `tolerance_px`.
    Delay {
        /// Hold time in milliseconds.
        ms: u64,
        /// Allowed drift in pixels during the hold.
        tolerance_px: f64,
    },
}

/// Activation constraints per input kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorSettings {
    /// Constraint for mouse and pen.
    pub pointer: ActivationConstraint,
    /// Constraint for touch.
    pub touch: ActivationConstraint,
}

impl Default for SensorSettings {
    fn default() -> Self {
        Self::from_settings(&LayoutSettings::default())
    }
}

impl SensorSettings {
    /// Builds the constraints from layout settings.
    #[must_use]
    pub const fn from_settings(settings: &LayoutSettings) -> Self {
        Self {
            pointer: ActivationConstraint::Distance {
                px: settings.pointer_activation_distance,
            },
            touch: ActivationConstraint::Delay {
                ms: settings.touch_activation_delay_ms,
                tolerance_px: settings.touch_tolerance,
            },
        }
    }

    /// Returns the constraint for an input kind.
    #[must_use]
    pub const fn constraint_for(&self, kind: InputKind) -> ActivationConstraint {
        match kind {
            InputKind::Pointer => self.pointer,
            InputKind::Touch => self.touch,
        }
    }
}

/// Current phase of a [`DragController`].
#[derive(Debug, Clone, PartialEq)]
pub enum DragPhase<T> {
    /// Nothing pressed.
    Idle,
    /// Pressed, activation constraint not met yet.
    Pending {
        /// Pressed item.
        item: T,
        /// Input device.
        kind: InputKind,
        /// Press position.
        origin: Point,
        /// Press time in milliseconds.
        pressed_at: u64,
    },
    /// Dragging.
    Dragging {
        /// Dragged item.
        item: T,
        /// Last known position.
        position: Point,
    },
    /// Released over a position; waiting for [`DragController::complete`].
    Dropped {
        /// Dropped item.
        item: T,
        /// Release position.
        position: Point,
    },
}

/// Notification emitted by a phase change.
#[derive(Debug, Clone, PartialEq)]
pub enum SensorEvent<T> {
    /// The press became a drag.
    Started(T),
    /// The dragged item moved.
    Moved(Point),
    /// The item was released while dragging.
    Dropped {
        /// Dropped item.
        item: T,
        /// Release position.
        position: Point,
    },
    /// The drag was abandoned.
    Cancelled(T),
}

/// Turns raw press, move and release input into drag events.
#[derive(Debug, Clone)]
pub struct DragController<T> {
    settings: SensorSettings,
    phase: DragPhase<T>,
}

impl<T: Clone> DragController<T> {
    /// Creates an idle controller.
    #[must_use]
    pub const fn new(settings: SensorSettings) -> Self {
        Self {
            settings,
            phase: DragPhase::Idle,
        }
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> &DragPhase<T> {
        &self.phase
    }

    /// True while a drag is in progress.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging { .. })
    }

    /// Records a press on `item`. Ignored unless idle.
    pub fn press(&mut self, item: T, kind: InputKind, at: Point, now: u64) {
        if matches!(self.phase, DragPhase::Idle) {
            self.phase = DragPhase::Pending {
                item,
                kind,
                origin: at,
                pressed_at: now,
            };
        }
    }

    /// Records pointer movement.
    ///
    /// A pending pointer press starts dragging once it has travelled far
    /// enough. A pending touch press that drifts past its tolerance is a
    /// scroll and returns to idle without a drag.
    pub fn move_to(&mut self, at: Point, now: u64) -> Option<SensorEvent<T>> {
        match &mut self.phase {
            DragPhase::Dragging { position, .. } => {
                *position = at;
                Some(SensorEvent::Moved(at))
            }
            DragPhase::Pending {
                item,
                kind,
                origin,
                pressed_at,
            } => {
                let travelled = origin.distance_to(at);
                match self.settings.constraint_for(*kind) {
                    ActivationConstraint::Distance { px } if travelled >= px => {
                        let item = item.clone();
                        self.phase = DragPhase::Dragging {
                            item: item.clone(),
                            position: at,
                        };
                        Some(SensorEvent::Started(item))
                    }
                    ActivationConstraint::Delay { tolerance_px, .. } if travelled > tolerance_px => {
                        tracing::trace!(travelled, "touch moved before hold, treating as scroll");
                        self.phase = DragPhase::Idle;
                        None
                    }
                    ActivationConstraint::Delay { ms, .. }
                        if now.saturating_sub(*pressed_at) >= ms =>
                    {
                        let item = item.clone();
                        self.phase = DragPhase::Dragging {
                            item: item.clone(),
                            position: at,
                        };
                        Some(SensorEvent::Started(item))
                    }
                    _ => None,
                }
            }
            DragPhase::Idle | DragPhase::Dropped { .. } => None,
        }
    }

    /// Advances the clock. A held touch starts dragging once its delay has
    /// elapsed.
    pub fn tick(&mut self, now: u64) -> Option<SensorEvent<T>> {
        let DragPhase::Pending {
            item,
            kind,
            origin,
            pressed_at,
        } = &self.phase
        else {
            return None;
        };
        let ActivationConstraint::Delay { ms, .. } = self.settings.constraint_for(*kind) else {
            return None;
        };
        if now.saturating_sub(*pressed_at) < ms {
            return None;
        }
        let (item, position) = (item.clone(), *origin);
        self.phase = DragPhase::Dragging {
            item: item.clone(),
            position,
        };
        Some(SensorEvent::Started(item))
    }

    /// Records the release.
    ///
    /// Releasing a drag moves to [`DragPhase::Dropped`] and emits
    /// [`SensorEvent::Dropped`]. Releasing a pending press is a click and
    /// returns to idle silently.
    pub fn release(&mut self, at: Point) -> Option<SensorEvent<T>> {
        match std::mem::replace(&mut self.phase, DragPhase::Idle) {
            DragPhase::Dragging { item, .. } => {
                self.phase = DragPhase::Dropped {
                    item: item.clone(),
                    position: at,
                };
                Some(SensorEvent::Dropped { item, position: at })
            }
            DragPhase::Idle | DragPhase::Pending { .. } | DragPhase::Dropped { .. } => None,
        }
    }

    /// Abandons any press or drag. Emits [`SensorEvent::Cancelled`] if a
    /// drag was in progress.
    pub fn cancel(&mut self) -> Option<SensorEvent<T>> {
        match std::mem::replace(&mut self.phase, DragPhase::Idle) {
            DragPhase::Dragging { item, .. } => Some(SensorEvent::Cancelled(item)),
            DragPhase::Idle | DragPhase::Pending { .. } | DragPhase::Dropped { .. } => None,
        }
    }

    /// Acknowledges a handled drop and returns to idle.
    pub fn complete(&mut self) {
        if matches!(self.phase, DragPhase::Dropped { .. }) {
            self.phase = DragPhase::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> DragController<&'static str> {
        DragController::new(SensorSettings::default())
    }

    #[test]
    fn defaults_match_settings() {
        let settings = SensorSettings::default();
        assert_eq!(
            settings.constraint_for(InputKind::Pointer),
            ActivationConstraint::Distance { px: 8.0 }
        );
        assert_eq!(
            settings.constraint_for(InputKind::Touch),
            ActivationConstraint::Delay {
                ms: 250,
                tolerance_px: 5.0
            }
        );
    }

    #[test]
    fn pointer_starts_after_distance() {
        let mut sensor = controller();
        sensor.press("chat", InputKind::Pointer, Point::new(0.0, 0.0), 0);
        assert_eq!(sensor.move_to(Point::new(3.0, 4.0), 10), None);
        assert!(!sensor.is_dragging());
        assert_eq!(
            sensor.move_to(Point::new(6.0, 8.0), 20),
            Some(SensorEvent::Started("chat"))
        );
        assert_eq!(
            sensor.move_to(Point::new(50.0, 8.0), 30),
            Some(SensorEvent::Moved(Point::new(50.0, 8.0)))
        );
    }

    #[test]
    fn pointer_click_never_drags() {
        let mut sensor = controller();
        sensor.press("chat", InputKind::Pointer, Point::new(0.0, 0.0), 0);
        assert_eq!(sensor.release(Point::new(1.0, 1.0)), None);
        assert_eq!(sensor.phase(), &DragPhase::Idle);
    }

    #[test]
    fn touch_starts_after_hold() {
        let mut sensor = controller();
        sensor.press("files", InputKind::Touch, Point::new(10.0, 10.0), 1_000);
        assert_eq!(sensor.tick(1_100), None);
        assert_eq!(sensor.move_to(Point::new(12.0, 10.0), 1_200), None);
        assert_eq!(sensor.tick(1_250), Some(SensorEvent::Started("files")));
        assert!(sensor.is_dragging());
    }

    #[test]
    fn touch_swipe_is_a_scroll() {
        let mut sensor = controller();
        sensor.press("files", InputKind::Touch, Point::new(10.0, 10.0), 0);
        assert_eq!(sensor.move_to(Point::new(30.0, 10.0), 50), None);
        assert_eq!(sensor.phase(), &DragPhase::Idle);
        assert_eq!(sensor.tick(500), None);
    }

    #[test]
    fn drop_then_complete_returns_to_idle() {
        let mut sensor = controller();
        sensor.press("chat", InputKind::Pointer, Point::new(0.0, 0.0), 0);
        sensor.move_to(Point::new(20.0, 0.0), 5);
        assert_eq!(
            sensor.release(Point::new(40.0, 0.0)),
            Some(SensorEvent::Dropped {
                item: "chat",
                position: Point::new(40.0, 0.0)
            })
        );
        assert!(matches!(sensor.phase(), DragPhase::Dropped { .. }));
        sensor.press("files", InputKind::Pointer, Point::new(0.0, 0.0), 10);
        assert!(matches!(sensor.phase(), DragPhase::Dropped { .. }));
        sensor.complete();
        assert_eq!(sensor.phase(), &DragPhase::Idle);
    }

    #[test]
    fn cancel_reports_only_active_drags() {
        let mut sensor = controller();
        sensor.press("chat", InputKind::Pointer, Point::new(0.0, 0.0), 0);
        assert_eq!(sensor.cancel(), None);
        sensor.press("chat", InputKind::Pointer, Point::new(0.0, 0.0), 0);
        sensor.move_to(Point::new(0.0, 9.0), 1);
        assert_eq!(sensor.cancel(), Some(SensorEvent::Cancelled("chat")));
        assert_eq!(sensor.phase(), &DragPhase::Idle);
    }
}
