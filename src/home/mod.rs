pub mod dispatch;
pub mod entity;
pub mod layout;
pub mod transition;

pub use dispatch::{App, DispatchError, LaunchSurface, PluginId, Registry, SlotIndex};
pub use entity::CircleEntity;
pub use transition::{Direction, TRANSITION_DURATION, Transition};

use crate::config::TimingConfig;
use crate::geometry::Point;
use crate::sys::audio::{Cue, CuePlayer};
use std::time::Instant;

pub const HOVER_GROWTH_RATE: f64 = 10.0; // units per second of hover
pub const HOVER_GROWTH_CAP: f64 = 0.5; // relative to base radius

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    Boot,
    Logo { since: Instant },
    Running,
    Exiting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOutcome {
    /// Not running yet, ring hidden, or inside the select cooldown.
    Ignored,
    Missed,
    Toggled { expanded: bool },
    ToggleAbsorbed,
    Launched(SlotIndex),
    Rejected(SlotIndex),
}

pub struct Home {
    phase: Phase,
    entities: Vec<CircleEntity>,
    ring_expanded: bool,
    last_toggle: Option<Instant>,
    last_select: Option<Instant>,
    timing: TimingConfig,
}

impl Home {
    pub fn new(entities: Vec<CircleEntity>, timing: TimingConfig) -> Self {
        Self {
            phase: Phase::Boot,
            entities,
            ring_expanded: false,
            last_toggle: None,
            last_select: None,
            timing,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn ring_expanded(&self) -> bool {
        self.ring_expanded
    }

    pub fn entities(&self) -> &[CircleEntity] {
        &self.entities
    }

    pub fn is_visible(&self, entity: &CircleEntity) -> bool {
        entity.is_main() || self.ring_expanded
    }

    /// Swaps in a freshly built layout, e.g. after a resize or config reload.
    pub fn rebuild(&mut self, entities: Vec<CircleEntity>, timing: TimingConfig) {
        self.entities = entities;
        self.timing = timing;
        self.ring_expanded = false;
        self.last_toggle = None;
        self.last_select = None;
    }

    pub fn quit(&mut self) {
        self.phase = Phase::Exiting;
    }

    pub fn tick(&mut self, now: Instant, cues: &dyn CuePlayer) {
        match self.phase {
            Phase::Boot => self.phase = Phase::Logo { since: now },
            Phase::Logo { since } => {
                if now.saturating_duration_since(since) >= self.timing.logo_delay {
                    log::debug!("Logo done, home screen running");
                    self.phase = Phase::Running;
                    cues.play(Cue::Startup);
                }
            }
            Phase::Running => self.entities.iter_mut().for_each(|e| e.advance(now)),
            Phase::Exiting => {}
        }
    }

    pub fn pointer_moved(&mut self, point: Point, now: Instant) {
        if self.phase != Phase::Running {
            return;
        }
        let ring_expanded = self.ring_expanded;
        for entity in &mut self.entities {
            let visible = entity.is_main() || ring_expanded;
            entity.hover(point, now, visible);
        }
    }

    /// Routes a press to the first entity under `point`. Launching an app
    /// blocks until the app returns.
    pub fn press<S: ?Sized>(
        &mut self,
        point: Point,
        now: Instant,
        cues: &dyn CuePlayer,
        registry: &Registry<S>,
        surface: &S,
    ) -> PressOutcome {
        if self.phase != Phase::Running {
            return PressOutcome::Ignored;
        }

        // main is index 0, so it wins over anything overlapping it
        let Some(hit) = self.entities.iter().position(|e| e.hit_test(point)) else {
            return PressOutcome::Missed;
        };

        self.entities
            .iter_mut()
            .enumerate()
            .filter(|(i, _)| *i != hit)
            .for_each(|(_, e)| e.clear_hover());

        if self.entities[hit].is_main() {
            self.toggle_ring(now, cues)
        } else {
            self.select(hit, now, cues, registry, surface)
        }
    }

    fn toggle_ring(&mut self, now: Instant, cues: &dyn CuePlayer) -> PressOutcome {
        cues.play(Cue::Home);

        let ready = self
            .last_toggle
            .is_none_or(|last| now.saturating_duration_since(last) >= self.timing.toggle_delay);
        if !ready {
            return PressOutcome::ToggleAbsorbed;
        }

        self.ring_expanded = !self.ring_expanded;
        self.last_toggle = Some(now);

        let direction = Direction::from_expanded(self.ring_expanded);
        self.entities
            .iter_mut()
            .filter(|e| !e.is_main())
            .for_each(|e| e.start_transition(now, direction));

        PressOutcome::Toggled {
            expanded: self.ring_expanded,
        }
    }

    fn select<S: ?Sized>(
        &mut self,
        hit: usize,
        now: Instant,
        cues: &dyn CuePlayer,
        registry: &Registry<S>,
        surface: &S,
    ) -> PressOutcome {
        if !self.ring_expanded {
            return PressOutcome::Ignored;
        }

        let cooling_down = self
            .last_select
            .is_some_and(|last| now.saturating_duration_since(last) < self.timing.select_delay);
        if cooling_down {
            return PressOutcome::Ignored;
        }

        let slot = self.entities[hit].slot;
        match registry.resolve(slot) {
            Ok(app) => {
                cues.play(Cue::Confirmation);
                let started = Instant::now();
                app.run(surface);
                self.last_select = Some(now + started.elapsed());
                PressOutcome::Launched(slot)
            }
            Err(e) => {
                log::warn!("{}", e);
                cues.play(Cue::Reject);
                PressOutcome::Rejected(slot)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use std::time::Duration;

    const CENTER: Point = Point { x: 500.0, y: 500.0 };
    const EAST: Point = Point { x: 750.0, y: 500.0 };
    const SOUTH: Point = Point { x: 500.0, y: 750.0 };

    #[derive(Default)]
    struct RecordingCues(RefCell<Vec<Cue>>);

    impl CuePlayer for RecordingCues {
        fn play(&self, cue: Cue) {
            self.0.borrow_mut().push(cue);
        }
    }

    impl RecordingCues {
        fn played(&self) -> Vec<Cue> {
            self.0.borrow().clone()
        }
    }

    fn secs(s: f64) -> Duration {
        Duration::from_secs_f64(s)
    }

    fn running_home(start: Instant, cues: &RecordingCues) -> Home {
        let entities = layout::build(&LayoutConfig::default(), CENTER);
        let mut home = Home::new(entities, TimingConfig::default());
        home.tick(start, cues);
        home.tick(start + secs(1.0), cues);
        assert_eq!(home.phase(), Phase::Running);
        home
    }

    fn counting_registry(slot: usize) -> (Registry<()>, Rc<Cell<u32>>) {
        let runs = Rc::new(Cell::new(0));
        let counter = runs.clone();
        let mut registry = Registry::new();
        registry.register(SlotIndex::new(slot), move |_: &()| {
            counter.set(counter.get() + 1)
        });
        (registry, runs)
    }

    #[test]
    fn test_boot_logo_running_sequence() {
        let start = Instant::now();
        let cues = RecordingCues::default();
        let mut home = Home::new(
            layout::build(&LayoutConfig::default(), CENTER),
            TimingConfig::default(),
        );
        assert_eq!(home.phase(), Phase::Boot);

        home.tick(start, &cues);
        assert_eq!(home.phase(), Phase::Logo { since: start });

        home.tick(start + secs(0.5), &cues);
        assert!(matches!(home.phase(), Phase::Logo { .. }));
        assert!(cues.played().is_empty());

        home.tick(start + secs(1.0), &cues);
        assert_eq!(home.phase(), Phase::Running);
        assert_eq!(cues.played(), vec![Cue::Startup]);

        home.quit();
        assert_eq!(home.phase(), Phase::Exiting);
    }

    #[test]
    fn test_press_before_running_is_ignored() {
        let cues = RecordingCues::default();
        let registry: Registry<()> = Registry::new();
        let mut home = Home::new(
            layout::build(&LayoutConfig::default(), CENTER),
            TimingConfig::default(),
        );
        let outcome = home.press(CENTER, Instant::now(), &cues, &registry, &());
        assert_eq!(outcome, PressOutcome::Ignored);
        assert!(!home.ring_expanded());
        assert!(cues.played().is_empty());
    }

    #[test]
    fn test_press_outside_every_entity_changes_nothing() {
        let start = Instant::now();
        let cues = RecordingCues::default();
        let (registry, runs) = counting_registry(1);
        let mut home = running_home(start, &cues);
        home.pointer_moved(CENTER, start + secs(1.0));

        let outcome = home.press(Point::new(10.0, 10.0), start + secs(2.0), &cues, &registry, &());
        assert_eq!(outcome, PressOutcome::Missed);
        assert!(!home.ring_expanded());
        assert_eq!(runs.get(), 0);
        assert_eq!(cues.played(), vec![Cue::Startup]);
        assert_eq!(home.entities()[0].hover_since(), Some(start + secs(1.0)));

        // the next toggle is still immediately allowed
        let outcome = home.press(CENTER, start + secs(2.1), &cues, &registry, &());
        assert_eq!(outcome, PressOutcome::Toggled { expanded: true });
    }

    #[test]
    fn test_double_press_within_delay_toggles_once() {
        let start = Instant::now();
        let cues = RecordingCues::default();
        let registry: Registry<()> = Registry::new();
        let mut home = running_home(start, &cues);

        let first = home.press(CENTER, start + secs(2.0), &cues, &registry, &());
        let second = home.press(CENTER, start + secs(2.2), &cues, &registry, &());

        assert_eq!(first, PressOutcome::Toggled { expanded: true });
        assert_eq!(second, PressOutcome::ToggleAbsorbed);
        assert!(home.ring_expanded());
        assert_eq!(cues.played(), vec![Cue::Startup, Cue::Home, Cue::Home]);

        let third = home.press(CENTER, start + secs(3.0), &cues, &registry, &());
        assert_eq!(third, PressOutcome::Toggled { expanded: false });
    }

    #[test]
    fn test_toggle_animates_every_satellite_to_rest() {
        let start = Instant::now();
        let cues = RecordingCues::default();
        let registry: Registry<()> = Registry::new();
        let mut home = running_home(start, &cues);

        let t0 = start + secs(2.0);
        home.press(CENTER, t0, &cues, &registry, &());
        assert!(home.entities()[1..].iter().all(|e| e.is_animating()));

        home.tick(t0 + secs(0.25), &cues);
        let mid = home.entities()[1].center;
        assert!((mid.x - 625.0).abs() < 1e-6);

        home.tick(t0 + secs(0.5), &cues);
        for e in &home.entities()[1..] {
            assert!(!e.is_animating());
            assert_eq!(e.center, e.final_position());
        }

        let t1 = t0 + secs(1.5);
        home.press(CENTER, t1, &cues, &registry, &());
        home.tick(t1 + secs(0.6), &cues);
        for e in &home.entities()[1..] {
            assert_eq!(e.center, CENTER);
            assert!(!e.is_drawn(home.ring_expanded()));
        }
    }

    #[test]
    fn test_selecting_satellite_launches_app() {
        let start = Instant::now();
        let cues = RecordingCues::default();
        let (registry, runs) = counting_registry(1);
        let mut home = running_home(start, &cues);

        let t0 = start + secs(2.0);
        home.press(CENTER, t0, &cues, &registry, &());
        home.tick(t0 + secs(0.5), &cues);

        let outcome = home.press(EAST, t0 + secs(1.0), &cues, &registry, &());
        assert_eq!(outcome, PressOutcome::Launched(SlotIndex::new(1)));
        assert_eq!(runs.get(), 1);
        assert_eq!(cues.played().last(), Some(&Cue::Confirmation));
    }

    #[test]
    fn test_select_cooldown_swallows_queued_presses() {
        let start = Instant::now();
        let cues = RecordingCues::default();
        let (registry, runs) = counting_registry(1);
        let mut home = running_home(start, &cues);

        let t0 = start + secs(2.0);
        home.press(CENTER, t0, &cues, &registry, &());
        home.tick(t0 + secs(0.5), &cues);

        home.press(EAST, t0 + secs(1.0), &cues, &registry, &());
        let again = home.press(EAST, t0 + secs(1.5), &cues, &registry, &());
        assert_eq!(again, PressOutcome::Ignored);
        assert_eq!(runs.get(), 1);

        let later = home.press(EAST, t0 + secs(2.5), &cues, &registry, &());
        assert_eq!(later, PressOutcome::Launched(SlotIndex::new(1)));
        assert_eq!(runs.get(), 2);
    }

    #[test]
    fn test_select_cooldown_counts_from_app_return() {
        let start = Instant::now();
        let cues = RecordingCues::default();
        let timing = TimingConfig {
            select_delay: Duration::from_millis(100),
            ..TimingConfig::default()
        };
        let mut home = Home::new(layout::build(&LayoutConfig::default(), CENTER), timing);
        home.tick(start, &cues);
        home.tick(start + secs(1.0), &cues);

        let runs = Rc::new(Cell::new(0));
        let counter = runs.clone();
        let mut registry = Registry::new();
        registry.register(SlotIndex::new(1), move |_: &()| {
            std::thread::sleep(Duration::from_millis(200));
            counter.set(counter.get() + 1)
        });

        let t0 = start + secs(2.0);
        home.press(CENTER, t0, &cues, &registry, &());
        home.tick(t0 + secs(0.5), &cues);

        let t = t0 + secs(1.0);
        assert_eq!(
            home.press(EAST, t, &cues, &registry, &()),
            PressOutcome::Launched(SlotIndex::new(1))
        );
        // past the delay measured from the press, but not from the return
        let queued = home.press(EAST, t + Duration::from_millis(150), &cues, &registry, &());
        assert_eq!(queued, PressOutcome::Ignored);
        assert_eq!(runs.get(), 1);
    }

    #[test]
    fn test_unregistered_slot_is_rejected() {
        let start = Instant::now();
        let cues = RecordingCues::default();
        let (registry, runs) = counting_registry(1);
        let mut home = running_home(start, &cues);

        let t0 = start + secs(2.0);
        home.press(CENTER, t0, &cues, &registry, &());
        home.tick(t0 + secs(0.5), &cues);

        let outcome = home.press(SOUTH, t0 + secs(1.0), &cues, &registry, &());
        assert_eq!(outcome, PressOutcome::Rejected(SlotIndex::new(3)));
        assert_eq!(runs.get(), 0);
        assert_eq!(cues.played().last(), Some(&Cue::Reject));

        // rejection leaves no cooldown behind and the loop keeps going
        home.tick(t0 + secs(1.05), &cues);
        let outcome = home.press(EAST, t0 + secs(1.1), &cues, &registry, &());
        assert_eq!(outcome, PressOutcome::Launched(SlotIndex::new(1)));
    }

    #[test]
    fn test_hidden_ring_never_dispatches() {
        let start = Instant::now();
        let cues = RecordingCues::default();
        let (registry, runs) = counting_registry(1);
        let mut home = running_home(start, &cues);

        // open, settle, then close again: satellites sit at the hub mid-animation
        let t0 = start + secs(2.0);
        home.press(CENTER, t0, &cues, &registry, &());
        home.tick(t0 + secs(0.5), &cues);
        home.press(CENTER, t0 + secs(1.5), &cues, &registry, &());
        home.tick(t0 + secs(1.6), &cues);

        let sat = home.entities()[1].center;
        let outcome = home.press(sat, t0 + secs(1.6), &cues, &registry, &());
        assert_eq!(outcome, PressOutcome::Ignored);
        assert_eq!(runs.get(), 0);
    }

    #[test]
    fn test_main_wins_over_overlapping_satellite() {
        let start = Instant::now();
        let cues = RecordingCues::default();
        let (registry, runs) = counting_registry(1);
        let mut home = running_home(start, &cues);

        let t0 = start + secs(2.0);
        home.press(CENTER, t0, &cues, &registry, &());
        // satellites are still near the hub, overlapping the main button
        home.tick(t0 + secs(0.05), &cues);
        assert!(home.entities()[1].hit_test(Point::new(520.0, 500.0)));

        let outcome = home.press(Point::new(520.0, 500.0), t0 + secs(1.0), &cues, &registry, &());
        assert_eq!(outcome, PressOutcome::Toggled { expanded: false });
        assert_eq!(runs.get(), 0);
    }

    #[test]
    fn test_press_clears_hover_on_other_entities() {
        let start = Instant::now();
        let cues = RecordingCues::default();
        let registry: Registry<()> = Registry::new();
        let mut home = running_home(start, &cues);

        let t0 = start + secs(2.0);
        home.press(CENTER, t0, &cues, &registry, &());
        home.tick(t0 + secs(0.5), &cues);

        home.pointer_moved(EAST, t0 + secs(0.6));
        assert_eq!(home.entities()[1].hover_since(), Some(t0 + secs(0.6)));

        home.press(CENTER, t0 + secs(0.7), &cues, &registry, &());
        assert_eq!(home.entities()[1].hover_since(), None);
    }

    #[test]
    fn test_hover_ignores_hidden_satellites() {
        let start = Instant::now();
        let cues = RecordingCues::default();
        let mut home = running_home(start, &cues);

        home.pointer_moved(CENTER, start + secs(1.5));
        assert!(home.entities()[0].hover_since().is_some());
        assert!(home.entities()[1..].iter().all(|e| e.hover_since().is_none()));
    }

    #[test]
    fn test_rebuild_collapses_ring() {
        let start = Instant::now();
        let cues = RecordingCues::default();
        let registry: Registry<()> = Registry::new();
        let mut home = running_home(start, &cues);
        home.press(CENTER, start + secs(2.0), &cues, &registry, &());
        assert!(home.ring_expanded());

        let center = Point::new(100.0, 100.0);
        home.rebuild(
            layout::build(&LayoutConfig::default(), center),
            TimingConfig::default(),
        );
        assert!(!home.ring_expanded());
        assert_eq!(home.entities()[0].center, center);
        assert_eq!(home.phase(), Phase::Running);

        let outcome = home.press(center, start + secs(2.1), &cues, &registry, &());
        assert_eq!(outcome, PressOutcome::Toggled { expanded: true });
    }
}
