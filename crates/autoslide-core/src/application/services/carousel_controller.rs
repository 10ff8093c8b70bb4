//! Carousel Controller - drives one auto-advancing banner carousel.
//!
//! The controller is the imperative shell around [`crate::domain::reduce`]:
//! 1. Reduce the incoming event against the current state
//! 2. Execute the returned effects against the ports
//! 3. Feed scroll-command outcomes back in as events
//!
//! It owns at most one handle per timer slot (ticker, settle, cooldown) and
//! always cancels the old handle before arming a replacement.

use std::collections::VecDeque;
use std::time::Duration;

use tracing::{debug, info, instrument, trace, warn};
use uuid::Uuid;

use crate::{
    application::ports::{Clock, Scheduler, ScrollSurface},
    domain::{
        CarouselConfig, CarouselEvent, CarouselState, Effect, InteractionState, Lifecycle,
        ReduceContext, SlideSet, Snapshot, TimerHandle, Transition, reduce,
    },
    error::AutoslideResult,
};

/// Timer handles currently owned by a controller.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct TimerSlots {
    ticker: Option<TimerHandle>,
    settle: Option<TimerHandle>,
    cooldown: Option<TimerHandle>,
}

/// Role of a timer owned by a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerRole {
    /// Repeating auto-advance timer.
    Ticker,
    /// One-shot delay before the offset fallback.
    Settle,
    /// One-shot expiry of the post-drag cooldown.
    Cooldown,
}

impl TimerRole {
    pub fn name(self) -> &'static str {
        match self {
            Self::Ticker => "tick",
            Self::Settle => "settle",
            Self::Cooldown => "cooldown",
        }
    }
}

impl TimerSlots {
    fn get_mut(&mut self, slot: TimerRole) -> &mut Option<TimerHandle> {
        match slot {
            TimerRole::Ticker => &mut self.ticker,
            TimerRole::Settle => &mut self.settle,
            TimerRole::Cooldown => &mut self.cooldown,
        }
    }

    /// Slot holding `handle`, if any.
    fn owner_of(&self, handle: TimerHandle) -> Option<TimerRole> {
        if self.ticker == Some(handle) {
            Some(TimerRole::Ticker)
        } else if self.settle == Some(handle) {
            Some(TimerRole::Settle)
        } else if self.cooldown == Some(handle) {
            Some(TimerRole::Cooldown)
        } else {
            None
        }
    }
}

/// One controller per host card.
pub struct CarouselController {
    id: Uuid,
    config: CarouselConfig,
    state: CarouselState,
    surface: Box<dyn ScrollSurface>,
    scheduler: Box<dyn Scheduler>,
    clock: Box<dyn Clock>,
    timers: TimerSlots,
}

impl CarouselController {
    /// Create a controller for `slides`. Nothing is armed until the surface
    /// reports it is mounted and measured.
    pub fn new(
        slides: SlideSet,
        config: CarouselConfig,
        surface: Box<dyn ScrollSurface>,
        scheduler: Box<dyn Scheduler>,
        clock: Box<dyn Clock>,
    ) -> AutoslideResult<Self> {
        config.validate()?;
        let id = Uuid::new_v4();
        debug!(controller = %id, slides = slides.len(), "Carousel controller created");
        Ok(Self {
            id,
            config,
            state: CarouselState::new(slides),
            surface,
            scheduler,
            clock,
            timers: TimerSlots::default(),
        })
    }

    /// Surface finished mounting. Reads the measured width from the surface.
    pub fn mount(&mut self) {
        let slide_width = self.surface.measured_slide_width();
        self.dispatch(CarouselEvent::Mounted { slide_width });
    }

    /// Card unmounted: cancels every outstanding timer and freezes state.
    pub fn unmount(&mut self) {
        self.dispatch(CarouselEvent::Unmounted);
    }

    /// Host re-rendered with a slide set.
    pub fn set_slides(&mut self, slides: SlideSet) {
        self.dispatch(CarouselEvent::SlidesChanged(slides));
    }

    /// Single entry point for every state change.
    #[instrument(skip_all, fields(controller = %self.id, event = event.name()))]
    pub fn dispatch(&mut self, event: CarouselEvent) {
        let mut queue = VecDeque::from([event]);

        while let Some(event) = queue.pop_front() {
            let now = self.clock.now();
            let ctx = ReduceContext {
                now,
                config: &self.config,
            };
            let Transition { state, effects } = reduce(&self.state, &event, &ctx);
            self.log_transition(&event, &state, now);
            self.state = state;

            for effect in effects {
                if let Some(feedback) = self.execute(effect) {
                    queue.push_back(feedback);
                }
            }
        }
    }

    /// Deliver a fired timer.
    ///
    /// Returns `None` if the handle is not one this controller currently
    /// owns (stale, cancelled, or fired after unmount); nothing changes then.
    pub fn timer_fired(&mut self, handle: TimerHandle) -> Option<TimerRole> {
        let Some(slot) = self.timers.owner_of(handle) else {
            trace!(controller = %self.id, %handle, "Ignoring timer not owned by controller");
            return None;
        };

        let event = match slot {
            TimerRole::Ticker => CarouselEvent::Tick,
            TimerRole::Settle => CarouselEvent::SettleElapsed,
            TimerRole::Cooldown => CarouselEvent::CooldownExpired,
        };
        // One-shot timers are spent once they fire.
        if slot != TimerRole::Ticker {
            *self.timers.get_mut(slot) = None;
        }
        self.dispatch(event);
        Some(slot)
    }

    // -------------------------------------------------------------------------
    // Host-card accessors
    // -------------------------------------------------------------------------

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index()
    }

    pub fn slide_count(&self) -> usize {
        self.state.slide_count()
    }

    pub fn interaction(&self) -> InteractionState {
        self.state.interaction()
    }

    pub fn state(&self) -> &CarouselState {
        &self.state
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn is_torn_down(&self) -> bool {
        self.state.lifecycle() == Lifecycle::TornDown
    }

    /// Handles currently held, for hosts that route timer expiries.
    pub fn owned_timers(&self) -> Vec<TimerHandle> {
        [self.timers.ticker, self.timers.settle, self.timers.cooldown]
            .into_iter()
            .flatten()
            .collect()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot(self.clock.now())
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Run one effect; scroll rejections come back as events.
    fn execute(&mut self, effect: Effect) -> Option<CarouselEvent> {
        match effect {
            Effect::ArmTicker => {
                let period = self.config.tick_interval();
                self.cancel(TimerRole::Ticker);
                self.timers.ticker = Some(self.scheduler.schedule_repeating(period));
                debug!(controller = %self.id, ?period, "Ticker armed");
                None
            }
            Effect::DisarmTicker => {
                if self.cancel(TimerRole::Ticker) {
                    debug!(controller = %self.id, "Ticker disarmed");
                }
                None
            }
            Effect::ScrollToIndex { index, animated } => {
                match self.surface.scroll_to_index(index, animated) {
                    Ok(()) => None,
                    Err(reason) => {
                        debug!(controller = %self.id, index, %reason, "Index scroll rejected");
                        Some(CarouselEvent::IndexScrollFailed {
                            target: index,
                            reason,
                        })
                    }
                }
            }
            Effect::ScrollToOffset {
                target,
                offset,
                animated,
            } => match self.surface.scroll_to_offset(offset, animated) {
                Ok(()) => None,
                Err(reason) => {
                    debug!(controller = %self.id, target, offset, %reason, "Offset scroll rejected");
                    Some(CarouselEvent::OffsetScrollFailed { target, reason })
                }
            },
            Effect::ScheduleSettle => {
                self.cancel(TimerRole::Settle);
                self.timers.settle = Some(self.scheduler.schedule_once(self.config.settle_delay()));
                None
            }
            Effect::CancelSettle => {
                self.cancel(TimerRole::Settle);
                None
            }
            Effect::ScheduleCooldownExpiry => {
                self.cancel(TimerRole::Cooldown);
                self.timers.cooldown = Some(self.scheduler.schedule_once(self.config.cooldown()));
                None
            }
            Effect::CancelCooldownExpiry => {
                self.cancel(TimerRole::Cooldown);
                None
            }
        }
    }

    /// Cancel whatever `slot` holds. Idempotent.
    fn cancel(&mut self, slot: TimerRole) -> bool {
        match self.timers.get_mut(slot).take() {
            Some(handle) => {
                self.scheduler.cancel(handle);
                true
            }
            None => false,
        }
    }

    fn log_transition(&self, event: &CarouselEvent, next: &CarouselState, now: Duration) {
        let prev = &self.state;

        if prev.current_index() != next.current_index() {
            info!(
                controller = %self.id,
                from = prev.current_index(),
                to = next.current_index(),
                at_ms = now.as_millis() as u64,
                "Index changed"
            );
        }

        if prev.interaction().kind() != next.interaction().kind() {
            debug!(
                controller = %self.id,
                from = %prev.interaction().kind(),
                to = %next.interaction().kind(),
                "Interaction changed"
            );
        }

        match event {
            CarouselEvent::Tick if prev.current_index() == next.current_index() => {
                trace!(controller = %self.id, interaction = %next.interaction().kind(), "Tick suppressed");
            }
            CarouselEvent::OffsetScrollFailed { target, reason } => {
                warn!(controller = %self.id, target, %reason, "Auto-advance abandoned");
            }
            _ => {}
        }
    }
}

impl std::fmt::Debug for CarouselController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CarouselController")
            .field("id", &self.id)
            .field("config", &self.config)
            .field("state", &self.state)
            .field("timers", &self.timers)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::{Arc, Mutex};

    use mockall::predicate::eq;

    use super::*;
    use crate::application::ports::MockScrollSurface;
    use crate::domain::ScrollRejection;

    const WIDTH: f64 = 300.0;

    /// Minimal virtual-time scheduler + clock shared between test and controller.
    #[derive(Clone, Default)]
    struct FakeTimers {
        inner: Arc<Mutex<FakeInner>>,
    }

    #[derive(Default)]
    struct FakeInner {
        now: Duration,
        next: u64,
        live: BTreeMap<TimerHandle, (Duration, Option<Duration>)>,
        arms: usize,
        cancels: usize,
        max_live_repeating: usize,
    }

    impl FakeTimers {
        fn arm(&self, delay: Duration, period: Option<Duration>) -> TimerHandle {
            let mut inner = self.inner.lock().unwrap();
            inner.next += 1;
            let handle = TimerHandle::new(inner.next);
            let due = inner.now + delay;
            inner.live.insert(handle, (due, period));
            inner.arms += 1;
            let repeating = inner.live.values().filter(|(_, p)| p.is_some()).count();
            inner.max_live_repeating = inner.max_live_repeating.max(repeating);
            handle
        }

        fn pop_due(&self, until: Duration) -> Option<TimerHandle> {
            let mut inner = self.inner.lock().unwrap();
            let (handle, due, period) = inner
                .live
                .iter()
                .filter(|(_, (due, _))| *due <= until)
                .min_by_key(|(h, (due, _))| (*due, **h))
                .map(|(h, (due, period))| (*h, *due, *period))?;
            inner.now = due;
            match period {
                Some(p) => {
                    inner.live.insert(handle, (due + p, Some(p)));
                }
                None => {
                    inner.live.remove(&handle);
                }
            }
            Some(handle)
        }

        fn run_until(&self, controller: &mut CarouselController, until: Duration) {
            while let Some(handle) = self.pop_due(until) {
                controller.timer_fired(handle);
            }
            self.inner.lock().unwrap().now = until;
        }

        fn stats(&self) -> (usize, usize, usize) {
            let inner = self.inner.lock().unwrap();
            (inner.arms, inner.cancels, inner.max_live_repeating)
        }
    }

    impl Scheduler for FakeTimers {
        fn schedule_repeating(&self, period: Duration) -> TimerHandle {
            self.arm(period, Some(period))
        }

        fn schedule_once(&self, delay: Duration) -> TimerHandle {
            self.arm(delay, None)
        }

        fn cancel(&self, handle: TimerHandle) {
            let mut inner = self.inner.lock().unwrap();
            if inner.live.remove(&handle).is_some() {
                inner.cancels += 1;
            }
        }
    }

    impl Clock for FakeTimers {
        fn now(&self) -> Duration {
            self.inner.lock().unwrap().now
        }
    }

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    fn accepting_surface() -> MockScrollSurface {
        let mut surface = MockScrollSurface::new();
        surface.expect_measured_slide_width().return_const(WIDTH);
        surface.expect_scroll_to_index().returning(|_, _| Ok(()));
        surface.expect_scroll_to_offset().returning(|_, _| Ok(()));
        surface
    }

    fn controller(slides: &[&str], surface: MockScrollSurface, timers: &FakeTimers) -> CarouselController {
        CarouselController::new(
            SlideSet::new(slides.iter().copied()),
            CarouselConfig::default(),
            Box::new(surface),
            Box::new(timers.clone()),
            Box::new(timers.clone()),
        )
        .unwrap()
    }

    #[test]
    fn advances_on_five_second_grid() {
        let timers = FakeTimers::default();
        let mut c = controller(&["a", "b", "c"], accepting_surface(), &timers);
        c.mount();

        let mut seen = Vec::new();
        for t in [5, 10, 15] {
            timers.run_until(&mut c, secs(t));
            seen.push(c.current_index());
        }
        assert_eq!(seen, vec![1, 2, 0]);
    }

    #[test]
    fn drag_at_twelve_defers_next_advance() {
        let timers = FakeTimers::default();
        let mut c = controller(&["a", "b", "c"], accepting_surface(), &timers);
        c.mount();
        timers.run_until(&mut c, secs(10));
        assert_eq!(c.current_index(), 2);

        timers.run_until(&mut c, secs(12));
        c.dispatch(CarouselEvent::DragStarted);
        c.dispatch(CarouselEvent::DragEnded { offset: 2.0 * WIDTH });

        timers.run_until(&mut c, secs(21));
        assert_eq!(c.current_index(), 2);
        assert!(matches!(c.interaction(), InteractionState::CoolingDown { .. }));

        timers.run_until(&mut c, secs(22));
        assert_eq!(c.interaction(), InteractionState::Idle);
        assert_eq!(c.current_index(), 2);

        timers.run_until(&mut c, secs(25));
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn index_rejection_falls_back_to_offset() {
        let timers = FakeTimers::default();
        let mut surface = MockScrollSurface::new();
        surface.expect_measured_slide_width().return_const(WIDTH);
        surface
            .expect_scroll_to_index()
            .with(eq(1), eq(true))
            .times(1)
            .returning(|_, _| Err(ScrollRejection::NotMeasured));
        surface
            .expect_scroll_to_offset()
            .with(eq(WIDTH), eq(true))
            .times(1)
            .returning(|_, _| Ok(()));

        let mut c = controller(&["a", "b", "c"], surface, &timers);
        c.mount();
        timers.run_until(&mut c, secs(5));
        assert_eq!(c.current_index(), 1);

        // Settle window is 100 ms.
        timers.run_until(&mut c, secs(5) + Duration::from_millis(100));
        assert_eq!(c.current_index(), 1);
    }

    #[test]
    fn double_rejection_leaves_index_unchanged() {
        let timers = FakeTimers::default();
        let mut surface = MockScrollSurface::new();
        surface.expect_measured_slide_width().return_const(WIDTH);
        surface
            .expect_scroll_to_index()
            .returning(|index, _| Err(ScrollRejection::OutOfRange { index, len: 0 }));
        surface
            .expect_scroll_to_offset()
            .returning(|_, _| {
                Err(ScrollRejection::Rejected {
                    reason: "detached".into(),
                })
            });

        let mut c = controller(&["a", "b"], surface, &timers);
        c.mount();
        timers.run_until(&mut c, secs(6));
        assert_eq!(c.current_index(), 0);
        assert!(c.owned_timers().len() == 1, "only the ticker remains");
    }

    #[test]
    fn single_slide_never_arms() {
        let timers = FakeTimers::default();
        let mut c = controller(&["solo"], accepting_surface(), &timers);
        c.mount();
        timers.run_until(&mut c, secs(60));
        assert_eq!(timers.stats().0, 0);
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn rapid_identity_changes_keep_one_ticker() {
        let timers = FakeTimers::default();
        let mut c = controller(&["a", "b", "c"], accepting_surface(), &timers);
        c.mount();
        timers.run_until(&mut c, secs(5));

        c.set_slides(SlideSet::new(["x", "y"]));
        timers.run_until(&mut c, secs(6));
        c.set_slides(SlideSet::new(["p", "q", "r"]));
        c.set_slides(SlideSet::new(["m", "n"]));
        assert_eq!(c.current_index(), 0);

        let (arms, cancels, max_live) = timers.stats();
        assert!(arms <= cancels + 1);
        assert_eq!(max_live, 1);

        // New ticker phase starts at the last reset (t=6).
        timers.run_until(&mut c, secs(11));
        assert_eq!(c.current_index(), 1);
    }

    #[test]
    fn fires_after_unmount_are_ignored() {
        let timers = FakeTimers::default();
        let mut c = controller(&["a", "b", "c"], accepting_surface(), &timers);
        c.mount();
        let ticker = c.owned_timers()[0];
        timers.run_until(&mut c, secs(5));

        c.unmount();
        assert!(c.owned_timers().is_empty());
        assert_eq!(c.timer_fired(ticker), None);
        timers.run_until(&mut c, secs(60));
        assert_eq!(c.current_index(), 1);
        assert!(c.is_torn_down());

        let (arms, cancels, _) = timers.stats();
        assert_eq!(arms, cancels);
    }

    #[test]
    fn unmount_cancels_pending_settle_and_cooldown() {
        let timers = FakeTimers::default();
        let mut surface = MockScrollSurface::new();
        surface.expect_measured_slide_width().return_const(WIDTH);
        surface
            .expect_scroll_to_index()
            .returning(|_, _| Err(ScrollRejection::NotMeasured));
        surface.expect_scroll_to_offset().never();

        let mut c = controller(&["a", "b", "c"], surface, &timers);
        c.mount();
        timers.run_until(&mut c, secs(5));
        assert_eq!(c.owned_timers().len(), 2);

        c.unmount();
        timers.run_until(&mut c, secs(6));
        assert!(c.owned_timers().is_empty());
    }

    #[test]
    fn unmeasured_surface_does_not_arm() {
        let timers = FakeTimers::default();
        let mut surface = MockScrollSurface::new();
        surface.expect_measured_slide_width().return_const(0.0);
        surface.expect_scroll_to_index().never();

        let mut c = controller(&["a", "b"], surface, &timers);
        c.mount();
        timers.run_until(&mut c, secs(20));
        assert_eq!(timers.stats().0, 0);

        c.dispatch(CarouselEvent::LayoutMeasured { slide_width: WIDTH });
        assert_eq!(timers.stats().0, 1);
    }

    #[test]
    fn custom_config_drives_ticker_period() {
        let timers = FakeTimers::default();
        let config = CarouselConfig::builder()
            .tick_interval(Duration::from_secs(1))
            .settle_delay(Duration::from_millis(50))
            .build()
            .unwrap();
        let mut c = CarouselController::new(
            SlideSet::new(["a", "b"]),
            config,
            Box::new(accepting_surface()),
            Box::new(timers.clone()),
            Box::new(timers.clone()),
        )
        .unwrap();
        c.mount();
        timers.run_until(&mut c, secs(3));
        assert_eq!(c.current_index(), 1);
        assert_eq!(c.config().tick_interval(), secs(1));
    }
}
