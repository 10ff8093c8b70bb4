//! Pure reducer for the carousel state machine.
//!
//! `(state, event, context) -> (state, effects)`. No timers, no surfaces,
//! no logging: the controller in `application::services` executes the
//! returned effects and feeds scroll outcomes back in as events.
//!
//! Transitions:
//!
//! ```text
//!   Idle ──drag-start──▶ UserDragging ──drag-end──▶ CoolingDown{deadline}
//!    ▲                                                   │
//!    └──────── tick or expiry with now >= deadline ──────┘
//! ```
//!
//! A tick in `Idle` advances `index = (index + 1) mod len` and issues an
//! index scroll. If the surface rejects it, the reducer waits one settle
//! delay and retries with `index * slide_width`; a second rejection reverts
//! the index.

use std::time::Duration;

use crate::domain::config::CarouselConfig;
use crate::domain::event::{CarouselEvent, Effect, Transition};
use crate::domain::state::{CarouselState, InteractionState, Lifecycle, Motion};
use crate::domain::value_objects::SlideSet;

/// Inputs the reducer needs besides the state itself.
#[derive(Debug, Clone, Copy)]
pub struct ReduceContext<'a> {
    pub now: Duration,
    pub config: &'a CarouselConfig,
}

/// Apply one event.
pub fn reduce(state: &CarouselState, event: &CarouselEvent, ctx: &ReduceContext<'_>) -> Transition {
    if state.lifecycle == Lifecycle::TornDown {
        return Transition::unchanged(state);
    }

    let mut next = state.clone();
    let mut effects = Vec::new();

    match event {
        CarouselEvent::Mounted { slide_width } => {
            next.lifecycle = Lifecycle::Mounted;
            if is_measured(*slide_width) {
                next.slide_width = *slide_width;
            }
        }

        CarouselEvent::LayoutMeasured { slide_width } => {
            if is_measured(*slide_width) {
                next.slide_width = *slide_width;
            }
        }

        CarouselEvent::Unmounted => {
            if next.ticker_armed {
                effects.push(Effect::DisarmTicker);
            }
            effects.push(Effect::CancelSettle);
            effects.push(Effect::CancelCooldownExpiry);
            next.ticker_armed = false;
            next.motion = Motion::Settled;
            next.lifecycle = Lifecycle::TornDown;
            return Transition {
                state: next,
                effects,
            };
        }

        CarouselEvent::SlidesChanged(slides) => replace_slides(&mut next, slides, &mut effects),

        CarouselEvent::DragStarted => {
            if next.lifecycle == Lifecycle::Mounted {
                release_pending(&mut next, &mut effects);
                next.interaction = InteractionState::UserDragging;
            }
        }

        CarouselEvent::Scrolled { offset } => {
            if offset.is_finite() {
                next.last_offset = *offset;
            }
        }

        CarouselEvent::DragEnded { offset } => {
            if next.lifecycle == Lifecycle::Mounted {
                release_pending(&mut next, &mut effects);
                next.interaction = InteractionState::CoolingDown {
                    deadline: ctx.now.saturating_add(ctx.config.cooldown()),
                };
                effects.push(Effect::ScheduleCooldownExpiry);
                sync_to_offset(&mut next, *offset);
            }
        }

        CarouselEvent::MomentumEnded { offset } => match next.motion {
            Motion::Programmatic { .. } => {
                next.motion = Motion::Settled;
                if offset.is_finite() {
                    next.last_offset = *offset;
                }
            }
            Motion::AwaitingFallback { .. } => {}
            Motion::Settled => sync_to_offset(&mut next, *offset),
        },

        CarouselEvent::Tick => tick(&mut next, ctx.now, &mut effects),

        CarouselEvent::SettleElapsed => {
            if let Motion::AwaitingFallback { target, previous } = next.motion {
                if is_measured(next.slide_width) && target < next.slides.len() {
                    effects.push(Effect::ScrollToOffset {
                        target,
                        offset: target as f64 * next.slide_width,
                        animated: true,
                    });
                    next.motion = Motion::Programmatic { target, previous };
                } else {
                    abandon(&mut next, previous);
                }
            }
        }

        CarouselEvent::CooldownExpired => {
            if let InteractionState::CoolingDown { deadline } = next.interaction {
                if ctx.now >= deadline {
                    next.interaction = InteractionState::Idle;
                }
            }
        }

        CarouselEvent::IndexScrollFailed { target, .. } => {
            if let Motion::Programmatic { target: t, previous } = next.motion {
                if t == *target {
                    next.motion = Motion::AwaitingFallback {
                        target: t,
                        previous,
                    };
                    effects.push(Effect::ScheduleSettle);
                }
            }
        }

        CarouselEvent::OffsetScrollFailed { target, .. } => {
            if let Motion::Programmatic { target: t, previous } = next.motion {
                if t == *target {
                    abandon(&mut next, previous);
                }
            }
        }
    }

    reconcile_ticker(&mut next, &mut effects);

    Transition {
        state: next,
        effects,
    }
}

/// Map a settled pixel offset to a slide index.
///
/// Returns `None` when there is nothing to map onto (no slides, unmeasured
/// layout, or a non-finite offset).
pub fn offset_to_index(offset: f64, slide_width: f64, len: usize) -> Option<usize> {
    if len == 0 || !is_measured(slide_width) || !offset.is_finite() {
        return None;
    }
    let raw = (offset / slide_width).round();
    if raw <= 0.0 {
        return Some(0);
    }
    Some((raw as usize).min(len - 1))
}

fn is_measured(width: f64) -> bool {
    width.is_finite() && width > 0.0
}

fn tick(next: &mut CarouselState, now: Duration, effects: &mut Vec<Effect>) {
    if next.lifecycle != Lifecycle::Mounted {
        return;
    }

    // Length is read from the live set, never captured when the timer was armed.
    let len = next.slides.len();
    if len <= 1 {
        return;
    }

    match next.interaction {
        InteractionState::UserDragging => return,
        InteractionState::CoolingDown { deadline } if now < deadline => return,
        InteractionState::CoolingDown { .. } => {
            next.interaction = InteractionState::Idle;
            effects.push(Effect::CancelCooldownExpiry);
        }
        InteractionState::Idle => {}
    }

    if matches!(next.motion, Motion::AwaitingFallback { .. }) {
        return;
    }

    let previous = next.index.min(len - 1);
    let target = (previous + 1) % len;
    next.index = target;
    next.motion = Motion::Programmatic { target, previous };
    effects.push(Effect::ScrollToIndex {
        index: target,
        animated: true,
    });
}

fn replace_slides(next: &mut CarouselState, slides: &SlideSet, effects: &mut Vec<Effect>) {
    if next.slides.id() == slides.id() {
        return;
    }

    // Old timer goes first so the re-arm below never overlaps it.
    if next.ticker_armed {
        effects.push(Effect::DisarmTicker);
        next.ticker_armed = false;
    }
    release_pending(next, effects);

    next.slides = slides.clone();
    next.index = 0;
    if next.interaction != InteractionState::UserDragging {
        next.interaction = InteractionState::Idle;
    }

    if next.lifecycle == Lifecycle::Mounted && !slides.is_empty() && is_measured(next.slide_width) {
        effects.push(Effect::ScrollToOffset {
            target: 0,
            offset: 0.0,
            animated: false,
        });
    }
}

/// Drop in-flight programmatic motion and any pending cooldown expiry.
fn release_pending(next: &mut CarouselState, effects: &mut Vec<Effect>) {
    if matches!(next.motion, Motion::AwaitingFallback { .. }) {
        effects.push(Effect::CancelSettle);
    }
    if matches!(next.interaction, InteractionState::CoolingDown { .. }) {
        effects.push(Effect::CancelCooldownExpiry);
    }
    next.motion = Motion::Settled;
}

fn sync_to_offset(next: &mut CarouselState, offset: f64) {
    if offset.is_finite() {
        next.last_offset = offset;
    }
    if let Some(index) = offset_to_index(offset, next.slide_width, next.slides.len()) {
        next.index = index;
    }
}

fn abandon(next: &mut CarouselState, previous: usize) {
    next.index = previous.min(next.slides.len().saturating_sub(1));
    next.motion = Motion::Settled;
}

fn reconcile_ticker(next: &mut CarouselState, effects: &mut Vec<Effect>) {
    let wants = next.wants_ticker();
    if wants && !next.ticker_armed {
        effects.push(Effect::ArmTicker);
        next.ticker_armed = true;
    } else if !wants && next.ticker_armed {
        effects.push(Effect::DisarmTicker);
        next.ticker_armed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::ScrollRejection;

    const WIDTH: f64 = 320.0;

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    struct Harness {
        state: CarouselState,
        config: CarouselConfig,
        now: Duration,
    }

    impl Harness {
        fn new(slides: &[&str]) -> Self {
            Self {
                state: CarouselState::new(SlideSet::new(slides.iter().copied())),
                config: CarouselConfig::default(),
                now: Duration::ZERO,
            }
        }

        fn mounted(slides: &[&str]) -> Self {
            let mut h = Self::new(slides);
            h.apply(CarouselEvent::Mounted { slide_width: WIDTH });
            h
        }

        fn at(&mut self, now: Duration) -> &mut Self {
            self.now = now;
            self
        }

        fn apply(&mut self, event: CarouselEvent) -> Vec<Effect> {
            let ctx = ReduceContext {
                now: self.now,
                config: &self.config,
            };
            let Transition { state, effects } = reduce(&self.state, &event, &ctx);
            self.state = state;
            effects
        }
    }

    #[test]
    fn mount_with_width_arms_ticker() {
        let mut h = Harness::new(&["a", "b", "c"]);
        let effects = h.apply(CarouselEvent::Mounted { slide_width: WIDTH });
        assert_eq!(effects, vec![Effect::ArmTicker]);
        assert!(h.state.ticker_armed());
    }

    #[test]
    fn unmeasured_mount_waits_for_layout() {
        let mut h = Harness::new(&["a", "b"]);
        assert!(h.apply(CarouselEvent::Mounted { slide_width: 0.0 }).is_empty());
        assert_eq!(
            h.apply(CarouselEvent::LayoutMeasured { slide_width: WIDTH }),
            vec![Effect::ArmTicker]
        );
    }

    #[test]
    fn single_slide_never_arms() {
        for slides in [&[][..], &["only"][..]] {
            let mut h = Harness::new(slides);
            assert!(h.apply(CarouselEvent::Mounted { slide_width: WIDTH }).is_empty());
            assert!(h.apply(CarouselEvent::Tick).is_empty());
            assert_eq!(h.state.current_index(), 0);
        }
    }

    #[test]
    fn ticks_wrap_modulo_length() {
        let mut h = Harness::mounted(&["a", "b", "c"]);
        let mut seen = Vec::new();
        for k in 1..=7u64 {
            h.at(secs(5 * k));
            let effects = h.apply(CarouselEvent::Tick);
            assert_eq!(
                effects,
                vec![Effect::ScrollToIndex {
                    index: (k % 3) as usize,
                    animated: true
                }]
            );
            seen.push(h.state.current_index());
        }
        assert_eq!(seen, vec![1, 2, 0, 1, 2, 0, 1]);
    }

    #[test]
    fn drag_end_starts_cooldown_and_syncs_index() {
        let mut h = Harness::mounted(&["a", "b", "c"]);
        h.apply(CarouselEvent::DragStarted);
        assert_eq!(h.state.interaction(), InteractionState::UserDragging);

        h.at(secs(12));
        let effects = h.apply(CarouselEvent::DragEnded {
            offset: 2.0 * WIDTH + 40.0,
        });
        assert_eq!(effects, vec![Effect::ScheduleCooldownExpiry]);
        assert_eq!(
            h.state.interaction(),
            InteractionState::CoolingDown { deadline: secs(22) }
        );
        assert_eq!(h.state.current_index(), 2);
    }

    #[test]
    fn unbounded_cooldown_saturates_deadline() {
        let mut h = Harness::mounted(&["a", "b"]);
        h.config = CarouselConfig::builder()
            .cooldown(Duration::MAX)
            .build()
            .unwrap();
        h.apply(CarouselEvent::DragStarted);
        h.at(secs(1)).apply(CarouselEvent::DragEnded { offset: 0.0 });
        assert_eq!(
            h.state.interaction(),
            InteractionState::CoolingDown {
                deadline: Duration::MAX
            }
        );
        assert!(h.at(secs(5)).apply(CarouselEvent::Tick).is_empty());
    }

    #[test]
    fn ticks_suppressed_while_dragging() {
        let mut h = Harness::mounted(&["a", "b"]);
        h.apply(CarouselEvent::DragStarted);
        assert!(h.at(secs(5)).apply(CarouselEvent::Tick).is_empty());
        assert_eq!(h.state.current_index(), 0);
    }

    #[test]
    fn cooldown_suppresses_until_deadline() {
        let mut h = Harness::mounted(&["a", "b", "c"]);
        h.apply(CarouselEvent::DragStarted);
        h.at(secs(12)).apply(CarouselEvent::DragEnded { offset: 2.0 * WIDTH });

        assert!(h.at(secs(15)).apply(CarouselEvent::Tick).is_empty());
        assert!(h.at(secs(20)).apply(CarouselEvent::Tick).is_empty());
        assert_eq!(h.state.current_index(), 2);

        let effects = h.at(secs(25)).apply(CarouselEvent::Tick);
        assert_eq!(h.state.current_index(), 0);
        assert_eq!(h.state.interaction(), InteractionState::Idle);
        assert!(effects.contains(&Effect::ScrollToIndex {
            index: 0,
            animated: true
        }));
    }

    #[test]
    fn cooldown_expiry_before_deadline_is_ignored() {
        let mut h = Harness::mounted(&["a", "b"]);
        h.apply(CarouselEvent::DragStarted);
        h.at(secs(1)).apply(CarouselEvent::DragEnded { offset: 0.0 });
        h.at(secs(5)).apply(CarouselEvent::CooldownExpired);
        assert!(matches!(
            h.state.interaction(),
            InteractionState::CoolingDown { .. }
        ));
        h.at(secs(11)).apply(CarouselEvent::CooldownExpired);
        assert_eq!(h.state.interaction(), InteractionState::Idle);
    }

    #[test]
    fn redrag_during_cooldown_cancels_pending_expiry() {
        let mut h = Harness::mounted(&["a", "b"]);
        h.apply(CarouselEvent::DragStarted);
        h.at(secs(1)).apply(CarouselEvent::DragEnded { offset: 0.0 });
        let effects = h.at(secs(3)).apply(CarouselEvent::DragStarted);
        assert_eq!(effects, vec![Effect::CancelCooldownExpiry]);
    }

    #[test]
    fn rejected_index_scroll_schedules_offset_fallback() {
        let mut h = Harness::mounted(&["a", "b", "c"]);
        h.at(secs(5)).apply(CarouselEvent::Tick);
        let effects = h.apply(CarouselEvent::IndexScrollFailed {
            target: 1,
            reason: ScrollRejection::NotMeasured,
        });
        assert_eq!(effects, vec![Effect::ScheduleSettle]);
        assert_eq!(
            h.state.motion(),
            Motion::AwaitingFallback {
                target: 1,
                previous: 0
            }
        );

        let effects = h.apply(CarouselEvent::SettleElapsed);
        assert_eq!(
            effects,
            vec![Effect::ScrollToOffset {
                target: 1,
                offset: WIDTH,
                animated: true
            }]
        );
        assert_eq!(h.state.current_index(), 1);
    }

    #[test]
    fn double_failure_reverts_index() {
        let mut h = Harness::mounted(&["a", "b", "c"]);
        h.at(secs(5)).apply(CarouselEvent::Tick);
        h.apply(CarouselEvent::IndexScrollFailed {
            target: 1,
            reason: ScrollRejection::NotMeasured,
        });
        h.apply(CarouselEvent::SettleElapsed);
        h.apply(CarouselEvent::OffsetScrollFailed {
            target: 1,
            reason: ScrollRejection::Rejected {
                reason: "busy".into(),
            },
        });
        assert_eq!(h.state.current_index(), 0);
        assert_eq!(h.state.motion(), Motion::Settled);
    }

    #[test]
    fn tick_skipped_while_fallback_pending() {
        let mut h = Harness::mounted(&["a", "b", "c"]);
        h.at(secs(5)).apply(CarouselEvent::Tick);
        h.apply(CarouselEvent::IndexScrollFailed {
            target: 1,
            reason: ScrollRejection::NotMeasured,
        });
        assert!(h.at(secs(10)).apply(CarouselEvent::Tick).is_empty());
    }

    #[test]
    fn stale_failure_for_other_target_is_ignored() {
        let mut h = Harness::mounted(&["a", "b", "c"]);
        h.at(secs(5)).apply(CarouselEvent::Tick);
        let effects = h.apply(CarouselEvent::IndexScrollFailed {
            target: 2,
            reason: ScrollRejection::NotMeasured,
        });
        assert!(effects.is_empty());
        assert!(matches!(h.state.motion(), Motion::Programmatic { .. }));
    }

    #[test]
    fn programmatic_momentum_is_not_attributed_to_user() {
        let mut h = Harness::mounted(&["a", "b", "c"]);
        h.at(secs(5)).apply(CarouselEvent::Tick);
        // Animation still in flight: surface reports a half-way offset.
        h.apply(CarouselEvent::Scrolled { offset: 0.4 * WIDTH });
        h.apply(CarouselEvent::MomentumEnded { offset: 0.4 * WIDTH });
        assert_eq!(h.state.current_index(), 1);
        assert_eq!(h.state.motion(), Motion::Settled);
        assert_eq!(h.state.interaction(), InteractionState::Idle);
    }

    #[test]
    fn identity_change_resets_and_rearms() {
        let mut h = Harness::mounted(&["a", "b", "c"]);
        h.at(secs(5)).apply(CarouselEvent::Tick);
        h.apply(CarouselEvent::DragStarted);
        h.at(secs(6)).apply(CarouselEvent::DragEnded { offset: WIDTH });

        let effects = h.apply(CarouselEvent::SlidesChanged(SlideSet::new(["x", "y"])));
        assert_eq!(
            effects,
            vec![
                Effect::DisarmTicker,
                Effect::CancelCooldownExpiry,
                Effect::ScrollToOffset {
                    target: 0,
                    offset: 0.0,
                    animated: false
                },
                Effect::ArmTicker,
            ]
        );
        assert_eq!(h.state.current_index(), 0);
        assert_eq!(h.state.interaction(), InteractionState::Idle);
    }

    #[test]
    fn same_identity_is_a_no_op() {
        let mut h = Harness::mounted(&["a", "b"]);
        let same = h.state.slides().clone();
        assert!(h.apply(CarouselEvent::SlidesChanged(same)).is_empty());
    }

    #[test]
    fn shrinking_to_one_slide_disarms() {
        let mut h = Harness::mounted(&["a", "b"]);
        let effects = h.apply(CarouselEvent::SlidesChanged(SlideSet::new(["solo"])));
        assert!(effects.contains(&Effect::DisarmTicker));
        assert!(!effects.contains(&Effect::ArmTicker));
        assert!(!h.state.ticker_armed());
    }

    #[test]
    fn unmount_is_terminal() {
        let mut h = Harness::mounted(&["a", "b"]);
        let effects = h.apply(CarouselEvent::Unmounted);
        assert_eq!(
            effects,
            vec![
                Effect::DisarmTicker,
                Effect::CancelSettle,
                Effect::CancelCooldownExpiry
            ]
        );
        let before = h.state.clone();
        assert!(h.at(secs(5)).apply(CarouselEvent::Tick).is_empty());
        assert!(
            h.apply(CarouselEvent::Mounted { slide_width: WIDTH })
                .is_empty()
        );
        assert_eq!(h.state, before);
    }

    #[test]
    fn offset_mapping_rounds_and_clamps() {
        assert_eq!(offset_to_index(0.0, WIDTH, 3), Some(0));
        assert_eq!(offset_to_index(159.0, WIDTH, 3), Some(0));
        assert_eq!(offset_to_index(161.0, WIDTH, 3), Some(1));
        assert_eq!(offset_to_index(-50.0, WIDTH, 3), Some(0));
        assert_eq!(offset_to_index(10_000.0, WIDTH, 3), Some(2));
        assert_eq!(offset_to_index(100.0, 0.0, 3), None);
        assert_eq!(offset_to_index(100.0, WIDTH, 0), None);
        assert_eq!(offset_to_index(f64::NAN, WIDTH, 3), None);
    }
}
