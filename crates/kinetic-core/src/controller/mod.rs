//! Scroll interaction state machine
//!
//! One `ScrollInteractionController` drives one scrollable axis. The host
//! feeds it pointer events, wheel notches, layout changes and one `tick` per
//! display frame, all on the same thread, and applies the rendered offset it
//! publishes.
//!
//! ```text
//!   Idle ──down──▶ Dragging ──up (moved)──▶ Flinging ──animation done──▶ Idle
//!    ▲                │  ▲                      │
//!    └──up (click)────┘  └────────down──────────┘
//! ```
//!
//! Wheel notches and animated scroll requests start the animator directly and
//! also enter `Flinging`.

pub mod destination;
pub mod types;

use std::time::Instant;

use crate::config::{DefaultPage, ScrollConfig, ScrollMode};
use crate::motion::{apply_tension_with, SmoothAnimator, VelocityTracker};
use crate::signal::{Observable, Signal, SubscriptionId};

pub use destination::{Destination, DestinationKind};
pub use types::{Bounds, InteractionState, PageChange, Point, StateChange};

/// Offsets closer than this are treated as the same position
const SAME_POSITION_EPSILON: f64 = 1e-6;

/// A pointer that is currently down
#[derive(Debug, Clone, Copy)]
struct DragGesture {
    origin: Point,
    last: Point,
    /// Set once the pointer travelled past the drag threshold
    moved: bool,
}

/// Kinetic scrolling state machine for one axis
#[derive(Debug)]
pub struct ScrollInteractionController {
    config: ScrollConfig,
    tracker: VelocityTracker,
    animator: SmoothAnimator,

    bounds: Bounds,
    viewport_size: f64,
    content_size: f64,
    layout_applied: bool,

    /// Physics-true offset, may leave the bounds while dragging
    logical_offset: f64,
    /// Offset applied to the content
    rendered_offset: f64,
    /// Last wheel or fling destination, accumulates wheel notches
    wheel_target: f64,
    release_velocity: f64,
    gesture: Option<DragGesture>,

    state: Observable<InteractionState>,
    page: Observable<i64>,
    offset_changed: Signal<f64>,
}

impl Default for ScrollInteractionController {
    fn default() -> Self {
        Self::new(ScrollConfig::default())
    }
}

impl ScrollInteractionController {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            config,
            tracker: VelocityTracker::new(),
            animator: SmoothAnimator::new(),
            bounds: Bounds::default(),
            viewport_size: 0.0,
            content_size: 0.0,
            layout_applied: false,
            logical_offset: 0.0,
            rendered_offset: 0.0,
            wheel_target: 0.0,
            release_velocity: 0.0,
            gesture: None,
            state: Observable::new(InteractionState::Idle),
            page: Observable::new(0),
            offset_changed: Signal::new(),
        }
    }

    // --- Observation ---

    /// Called with the rendered offset every time it is published
    pub fn on_offset_changed(&mut self, listener: impl FnMut(&f64) + 'static) -> SubscriptionId {
        self.offset_changed.subscribe(listener)
    }

    /// Called with old and new state on every transition
    pub fn on_state_changed(
        &mut self,
        listener: impl FnMut(&StateChange) + 'static,
    ) -> SubscriptionId {
        self.state.subscribe(listener)
    }

    /// Called with old and new index whenever the nearest page changes (paging mode)
    pub fn on_page_changed(&mut self, listener: impl FnMut(&PageChange) + 'static) -> SubscriptionId {
        self.page.subscribe(listener)
    }

    /// Remove a listener registered with any of the `on_*` methods
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.offset_changed.unsubscribe(id) || self.state.unsubscribe(id) || self.page.unsubscribe(id)
    }

    #[inline]
    pub fn state(&self) -> InteractionState {
        self.state.get()
    }

    #[inline]
    pub fn rendered_offset(&self) -> f64 {
        self.rendered_offset
    }

    #[inline]
    pub fn logical_offset(&self) -> f64 {
        self.logical_offset
    }

    /// Last reported page index
    #[inline]
    pub fn current_page(&self) -> i64 {
        self.page.get()
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    #[inline]
    pub fn viewport_size(&self) -> f64 {
        self.viewport_size
    }

    #[inline]
    pub fn content_size(&self) -> f64 {
        self.content_size
    }

    /// Page size in effect (configured, else viewport, else 1)
    pub fn page_size(&self) -> f64 {
        self.config.effective_page_size(self.viewport_size)
    }

    /// Number of pages the content spans
    pub fn page_count(&self) -> i64 {
        destination::last_page_index(self.content_size, self.page_size()) + 1
    }

    /// Velocity measured at the last drag release, units per second
    #[inline]
    pub fn velocity(&self) -> f64 {
        self.release_velocity
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animator.is_running()
    }

    /// True once a pressed pointer has moved past the drag threshold
    pub fn is_dragging(&self) -> bool {
        self.gesture.is_some_and(|gesture| gesture.moved)
    }

    /// End value of the running animation
    pub fn animation_target(&self) -> Option<f64> {
        self.animator.target()
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    // --- Configuration and layout ---

    /// Replace the configuration, re-deriving the page index
    pub fn set_config(&mut self, config: ScrollConfig) {
        self.config = config;
        self.update_page_index(self.rendered_offset);
    }

    /// Layout update from viewport and content sizes
    pub fn set_layout(&mut self, viewport_size: f64, content_size: f64) {
        self.bounds = Bounds::from_extent(viewport_size, content_size);
        self.viewport_size = viewport_size;
        self.content_size = content_size;
        self.apply_layout();
    }

    /// Layout update from explicit bounds
    pub fn set_bounds(&mut self, min: f64, max: f64, viewport_size: f64) {
        self.bounds = Bounds::new(min, max);
        self.viewport_size = viewport_size;
        self.content_size = viewport_size.max(0.0) + self.bounds.extent();
        self.apply_layout();
    }

    fn apply_layout(&mut self) {
        if !self.layout_applied {
            // Wait for something to scroll through before choosing a start page
            if self.bounds.extent() > 0.0 || self.config.mode == ScrollMode::Paging {
                self.apply_default_page();
                self.layout_applied = true;
            }
            return;
        }

        if self.gesture.is_none() && !self.bounds.contains(self.logical_offset) {
            let target = self.bounds.clamp(self.logical_offset);
            self.jump_to(target, Instant::now());
        }
    }

    fn apply_default_page(&mut self) {
        let target = match self.config.mode {
            ScrollMode::Paging => {
                let page_size = self.page_size();
                let index = match self.config.default_page {
                    DefaultPage::First => 0,
                    DefaultPage::Last => destination::last_page_index(self.content_size, page_size),
                    DefaultPage::Custom(index) => i64::from(index),
                };
                destination::page_offset(index, page_size)
            }
            ScrollMode::Free => match self.config.default_page {
                DefaultPage::Last => self.bounds.min,
                DefaultPage::First | DefaultPage::Custom(_) => self.bounds.max,
            },
        };

        let target = self.bounds.clamp(target);
        tracing::debug!(target_offset = target, default_page = ?self.config.default_page, "Applying default page");
        self.jump_to(target, Instant::now());
    }

    // --- Pointer input ---

    /// A pointer went down at `position`
    pub fn pointer_down(&mut self, position: Point, now: Instant) {
        if !self.config.drag_enabled {
            return;
        }

        self.animator.interrupt();

        // Continue from what is on screen, a half-finished animation must not teleport
        self.logical_offset = self.rendered_offset;
        self.wheel_target = self.logical_offset;
        self.gesture = Some(DragGesture {
            origin: position,
            last: position,
            moved: false,
        });

        self.tracker.clear();
        self.tracker.add_sample(self.logical_offset, now);

        self.set_state(InteractionState::Dragging);
    }

    /// The pressed pointer moved to `position`
    pub fn pointer_move(&mut self, position: Point, now: Instant) {
        if !self.config.drag_enabled {
            return;
        }

        let orientation = self.config.orientation;
        let threshold = self.config.drag_threshold;

        let delta = {
            let Some(gesture) = self.gesture.as_mut() else {
                return;
            };

            if !gesture.moved {
                if gesture.origin.distance(position) <= threshold {
                    return;
                }
                gesture.moved = true;
                gesture.last = position;
            }

            let delta = position.along(orientation) - gesture.last.along(orientation);
            gesture.last = position;
            delta
        };

        self.logical_offset += delta;
        let rendered = apply_tension_with(
            self.logical_offset,
            self.bounds.min,
            self.bounds.max,
            self.viewport_size,
            self.config.elastic_damping,
        );

        self.publish(rendered);
        self.tracker.add_sample(rendered, now);
    }

    /// The pressed pointer was released
    pub fn pointer_up(&mut self, now: Instant) {
        let Some(gesture) = self.gesture.take() else {
            return;
        };

        if !gesture.moved || !self.config.drag_enabled {
            // A click, or dragging was switched off mid-gesture
            if self.bounds.contains(self.rendered_offset) {
                self.logical_offset = self.rendered_offset;
                self.set_state(InteractionState::Idle);
            } else {
                let target = self.bounds.clamp(self.rendered_offset);
                self.jump_to(target, now);
            }
            return;
        }

        let velocity = self.tracker.compute_velocity_at(now);
        self.release_velocity = velocity;
        self.settle(velocity, now);
    }

    /// The pointer left the surface or the host lost it; ends the gesture
    /// exactly like a release so it cannot stay stuck in `Dragging`
    pub fn pointer_cancel(&mut self, now: Instant) {
        if self.gesture.is_none() {
            return;
        }
        tracing::debug!("Pointer cancelled");
        self.pointer_up(now);
    }

    /// Start the release animation, or go idle if there is nowhere to go
    fn settle(&mut self, velocity: f64, now: Instant) {
        let current = self.rendered_offset;
        let dest = destination::release(current, velocity, self.bounds, self.viewport_size, &self.config);

        tracing::debug!(
            velocity,
            from = current,
            to = dest.target,
            duration_ms = dest.duration_ms,
            kind = ?dest.kind,
            "Release destination"
        );

        self.logical_offset = current;
        self.wheel_target = dest.target;

        if (dest.target - current).abs() < SAME_POSITION_EPSILON {
            self.publish(dest.target);
            self.logical_offset = dest.target;
            self.set_state(InteractionState::Idle);
            return;
        }

        self.set_state(InteractionState::Flinging);
        self.animator
            .start_at(current, dest.target, dest.duration_ms, dest.curve, now);
    }

    // --- Wheel ---

    /// A wheel notch against the wall clock
    pub fn wheel(&mut self, delta: i32) {
        self.wheel_at(delta, Instant::now());
    }

    /// A wheel notch; positive `delta` scrolls towards the start
    pub fn wheel_at(&mut self, delta: i32, now: Instant) {
        if !self.config.wheel_enabled || self.gesture.is_some() || delta == 0 {
            return;
        }

        let target = destination::wheel_target(
            self.wheel_target,
            delta,
            self.bounds,
            self.viewport_size,
            &self.config,
        );
        self.wheel_target = target;

        if !self.animator.is_running() && (target - self.logical_offset).abs() < SAME_POSITION_EPSILON {
            return;
        }

        let (curve, duration_ms) = self.config.wheel_motion();
        tracing::trace!(delta, target, "Wheel step");

        self.set_state(InteractionState::Flinging);
        self.animator
            .start_at(self.logical_offset, target, duration_ms, curve, now);
    }

    // --- Frame ---

    /// Advance the animation to `now`. Call once per frame, after input.
    ///
    /// Returns `true` while an animation is still running.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.animator.is_running() {
            let running = self.animator.update_at(now);
            self.logical_offset = self.animator.current_value();
            self.publish(self.logical_offset);
            if running {
                return true;
            }
        }

        if self.gesture.is_none() && self.state.get() == InteractionState::Flinging {
            self.set_state(InteractionState::Idle);
        }
        false
    }

    // --- Programmatic scrolling ---

    pub fn scroll_to_offset(&mut self, offset: f64, animate: bool) {
        self.scroll_to_offset_at(offset, animate, Instant::now());
    }

    /// Scroll to `offset`, clamped to the bounds
    pub fn scroll_to_offset_at(&mut self, offset: f64, animate: bool, now: Instant) {
        let target = self.bounds.clamp(offset);

        // A programmatic scroll takes over from the finger
        self.gesture = None;

        if animate {
            self.logical_offset = self.rendered_offset;
            self.wheel_target = target;
            self.set_state(InteractionState::Flinging);
            self.animator.start_at(
                self.logical_offset,
                target,
                self.config.scroll_duration_ms,
                self.config.friction,
                now,
            );
        } else {
            self.jump_to(target, now);
        }
    }

    pub fn scroll_to_page(&mut self, index: i64, animate: bool) {
        self.scroll_to_page_at(index, animate, Instant::now());
    }

    /// Scroll to page `index`; negative indices mean the first page
    pub fn scroll_to_page_at(&mut self, index: i64, animate: bool, now: Instant) {
        let index = index.max(0);
        let target = destination::page_offset(index, self.page_size());
        self.scroll_to_offset_at(target, animate, now);
    }

    pub fn scroll_to_first_page(&mut self, animate: bool) {
        self.scroll_to_page(0, animate);
    }

    pub fn scroll_to_last_page(&mut self, animate: bool) {
        let last = destination::last_page_index(self.content_size, self.page_size());
        self.scroll_to_page(last, animate);
    }

    /// Scroll to the start of the content (the max bound)
    pub fn scroll_to_start(&mut self, animate: bool) {
        self.scroll_to_offset(self.bounds.max, animate);
    }

    /// Scroll to the end of the content (the min bound)
    pub fn scroll_to_end(&mut self, animate: bool) {
        self.scroll_to_offset(self.bounds.min, animate);
    }

    // --- Internals ---

    /// Move without animation and forget the velocity history, so the jump
    /// cannot be read back as a fling
    fn jump_to(&mut self, target: f64, now: Instant) {
        self.animator.interrupt();
        self.logical_offset = target;
        self.wheel_target = target;
        self.publish(target);
        self.tracker.clear();
        self.tracker.add_sample(target, now);
        if self.gesture.is_none() {
            self.set_state(InteractionState::Idle);
        }
    }

    fn publish(&mut self, offset: f64) {
        self.rendered_offset = offset;
        self.offset_changed.emit(&offset);
        self.update_page_index(offset);
    }

    fn update_page_index(&mut self, offset: f64) {
        if self.config.mode != ScrollMode::Paging {
            return;
        }
        let index = destination::page_index(offset, self.page_size());
        let old = self.page.get();
        if self.page.set(index) {
            tracing::trace!(old, new = index, "Page changed");
        }
    }

    fn set_state(&mut self, state: InteractionState) {
        let old = self.state.get();
        if self.state.set(state) {
            tracing::debug!(from = old.as_str(), to = state.as_str(), "Interaction state changed");
        }
    }
}
