use std::time::Duration;

use crate::clock::Clock;
use crate::config::{ControllerConfig, TallyResetPolicy};
use crate::control_system::allocation::allocate;
use crate::control_system::display::DisplayCoordinator;
use crate::control_system::roads::{LightState, Road};
use crate::control_system::vehicle_counter::VehicleCounter;
use crate::hardware::{DistanceSensor, LightActuator, NumericDisplay};

/// Computes the wait-time vector at the moment `current`'s turn begins.
///
/// The current road shows its own green allocation. A road later in the
/// traversal order waits out the current road's green plus yellow, plus the
/// full turn of every road strictly between them. A road that already had its
/// turn waits for the rest of this cycle and then wraps into the next cycle
/// up to its own position; the next cycle's allocation is not known yet, so
/// the current cycle's vector stands in for it.
pub fn compute_wait_times(allocated: &[u32], current: usize, yellow_secs: u32) -> Vec<u32> {
    let num_roads = allocated.len();
    (0..num_roads)
        .map(|i| {
            if i == current {
                allocated[current]
            } else if i > current {
                let mut wait = allocated[current] + yellow_secs;
                for j in current + 1..i {
                    wait += allocated[j] + yellow_secs;
                }
                wait
            } else {
                let mut wait = allocated[current] + yellow_secs;
                for j in current + 1..num_roads {
                    wait += allocated[j] + yellow_secs;
                }
                for j in 0..i {
                    wait += allocated[j] + yellow_secs;
                }
                wait
            }
        })
        .collect()
}

/// Walks the roads in fixed order through RED -> YELLOW -> GREEN -> RED turns
/// while the vehicle counter keeps sampling and the displays track every
/// road's countdown.
///
/// The scheduler owns the road table; light phases and wait times are mutated
/// nowhere else. Timing is cooperative: the caller-supplied clock paces an
/// outer one-second loop and an inner sub-tick sensing loop, and nothing here
/// can block longer than one sub-tick.
pub struct PhaseScheduler<S, L, D, C> {
    config: ControllerConfig,
    roads: Vec<Road>,
    counter: VehicleCounter<S>,
    lights: L,
    displays: DisplayCoordinator<D>,
    clock: C,
    cycle_count: u64,
}

impl<S, L, D, C> PhaseScheduler<S, L, D, C>
where
    S: DistanceSensor,
    L: LightActuator,
    D: NumericDisplay,
    C: Clock,
{
    pub fn new(config: ControllerConfig, counter: VehicleCounter<S>, lights: L, display: D, clock: C) -> Self {
        let roads = Road::create_roads(config.num_roads);
        let displays =
            DisplayCoordinator::new(display, Duration::from_millis(config.display_refresh_ms));
        Self {
            config,
            roads,
            counter,
            lights,
            displays,
            clock,
            cycle_count: 0,
        }
    }

    pub fn roads(&self) -> &[Road] {
        &self.roads
    }

    /// Startup sequence: bring the displays up, hold everything red while the
    /// wiring settles, then sample traffic so the first cycle's allocation is
    /// demand-driven instead of a blind equal split.
    pub fn startup(&mut self) {
        log::info!("=== Traffic System Started ===");
        self.displays
            .init(&self.roads, self.config.display_brightness);
        self.all_red();
        self.idle_poll(Duration::from_millis(self.config.all_red_settle_ms));
        if self.config.startup_sample_ms > 0 {
            log::info!(
                "Sampling traffic for {} ms before the first cycle",
                self.config.startup_sample_ms
            );
            self.idle_poll(Duration::from_millis(self.config.startup_sample_ms));
        }
    }

    /// Runs the controller forever. There is no fatal condition in normal
    /// operation; a missed sensor reading is simply absent from its tick.
    pub fn run(&mut self) {
        self.startup();
        loop {
            self.run_cycle();
        }
    }

    /// One full pass: recompute the allocation from the standing tallies,
    /// then give every road its turn in fixed order.
    pub fn run_cycle(&mut self) {
        self.begin_cycle();
        self.all_red();
        self.idle_poll(Duration::from_millis(self.config.all_red_settle_ms));
        for current in 0..self.roads.len() {
            self.run_turn(current);
        }
        log::info!("========== CYCLE {} COMPLETE ==========", self.cycle_count);
    }

    /// Consumes the accumulated tallies into this cycle's green allocation.
    fn begin_cycle(&mut self) {
        self.cycle_count += 1;
        log::info!("========== TRAFFIC CYCLE {} ==========", self.cycle_count);

        let tallies: Vec<u32> = self.roads.iter().map(|r| r.vehicle_tally).collect();
        let counts: Vec<String> = self
            .roads
            .iter()
            .map(|r| format!("{}={}", r.id.letter(), r.vehicle_tally))
            .collect();
        log::info!("Vehicle counts: {}", counts.join(", "));

        let allocated = allocate(
            &tallies,
            self.config.green_pool_secs,
            self.config.min_green_secs,
            self.config.max_green_secs,
        );
        let shares: Vec<String> = self
            .roads
            .iter()
            .zip(&allocated)
            .map(|(r, secs)| format!("{}={}s", r.id.letter(), secs))
            .collect();
        log::info!("Green time allocated: {}", shares.join(", "));

        let granted: u32 = allocated.iter().sum();
        if tallies.iter().sum::<u32>() > 0 && granted != self.config.green_pool_secs {
            log::info!(
                "Clamping left {}s of the {}s pool unassigned",
                self.config.green_pool_secs.saturating_sub(granted),
                self.config.green_pool_secs
            );
        }

        for (road, secs) in self.roads.iter_mut().zip(&allocated) {
            road.allocated_green_secs = *secs;
            if self.config.tally_reset == TallyResetPolicy::EveryCycle {
                road.reset_tally();
            }
        }
    }

    /// One road's turn: recompute every wait time, warn with yellow, hold
    /// green for the allocated seconds, then fall back to red.
    fn run_turn(&mut self, current: usize) {
        let allocated: Vec<u32> = self.roads.iter().map(|r| r.allocated_green_secs).collect();
        let waits = compute_wait_times(&allocated, current, self.config.yellow_secs);
        for (road, wait) in self.roads.iter_mut().zip(&waits) {
            road.wait_time_secs = *wait;
        }

        let id = self.roads[current].id;
        log::info!("{}'s turn", id);

        let warning = self.roads[current].light_state.next();
        self.apply_phase(current, warning);
        log::info!("{}: YELLOW ({}s warning)", id, self.config.yellow_secs);
        self.countdown(self.config.yellow_secs);

        let floor = self.roads[current].light_state.next();
        self.apply_phase(current, floor);
        log::info!("{}: GREEN ({}s to pass)", id, allocated[current]);
        self.countdown(allocated[current]);

        let done = self.roads[current].light_state.next();
        self.apply_phase(current, done);
        log::info!("{}: GREEN -> RED", id);
        self.displays.render(&self.roads, self.clock.now());
        self.idle_poll(Duration::from_millis(self.config.turn_gap_ms));
    }

    /// Counts down whole seconds: render, let one second of sensing elapse,
    /// decrement every road's wait time by one.
    fn countdown(&mut self, seconds: u32) {
        for _ in 0..seconds {
            self.displays.render(&self.roads, self.clock.now());
            self.tick_second();
        }
    }

    /// One elapsed second, spent polling every road's sensor at the sub-tick
    /// granularity so arrivals are not missed while a light is held.
    fn tick_second(&mut self) {
        let deadline = self.clock.now() + Duration::from_secs(1);
        let sub_tick = Duration::from_millis(self.config.sub_tick_ms);
        loop {
            let now = self.clock.now();
            if now >= deadline {
                break;
            }
            self.counter.poll_all(&mut self.roads, now);
            self.displays.maybe_render(&self.roads, now);
            self.clock.sleep(sub_tick.min(deadline - now));
        }
        for road in self.roads.iter_mut() {
            road.wait_time_secs = road.wait_time_secs.saturating_sub(1);
        }
    }

    /// Sub-second all-red pause that keeps the sensing loop alive; wait times
    /// only move in the per-second countdown.
    fn idle_poll(&mut self, total: Duration) {
        let deadline = self.clock.now() + total;
        let sub_tick = Duration::from_millis(self.config.sub_tick_ms);
        loop {
            let now = self.clock.now();
            if now >= deadline {
                break;
            }
            self.counter.poll_all(&mut self.roads, now);
            self.displays.maybe_render(&self.roads, now);
            self.clock.sleep(sub_tick.min(deadline - now));
        }
    }

    /// Sets the current road's lamps and forces every other road to red. This
    /// is the only path that writes light states, which keeps the one-green
    /// safety property structural.
    fn apply_phase(&mut self, current: usize, state: LightState) {
        for (i, road) in self.roads.iter_mut().enumerate() {
            let next = if i == current { state } else { LightState::Red };
            road.light_state = next;
            self.lights.set_state(road.id, next);
        }
    }

    fn all_red(&mut self) {
        for road in self.roads.iter_mut() {
            road.light_state = LightState::Red;
            self.lights.set_state(road.id, LightState::Red);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::control_system::proximity::{DetectionWindow, ProximityDetector};
    use crate::control_system::roads::RoadId;
    use crate::hardware::{
        ConstantDistanceSensor, RecordingLightActuator, RecordingNumericDisplay,
    };

    #[test]
    fn wait_times_for_the_current_and_later_roads() {
        let allocated = [10, 15, 20, 12];
        let waits = compute_wait_times(&allocated, 1, 2);
        assert_eq!(waits[1], 15);
        // Next road: current's green + yellow.
        assert_eq!(waits[2], 17);
        // One road between: add its full turn.
        assert_eq!(waits[3], 17 + 22);
    }

    #[test]
    fn wait_times_for_passed_roads_wrap_into_the_next_cycle() {
        let allocated = [10, 15, 20, 12];
        // Road A already passed; it waits for B, C, D and wraps to the top.
        let waits = compute_wait_times(&allocated, 1, 2);
        assert_eq!(waits[0], (15 + 2) + (20 + 2) + (12 + 2));

        let waits = compute_wait_times(&allocated, 2, 2);
        assert_eq!(waits[0], (20 + 2) + (12 + 2));
        assert_eq!(waits[1], (20 + 2) + (12 + 2) + (10 + 2));
    }

    #[test]
    fn first_road_turn_covers_the_whole_vector() {
        let allocated = [10, 15];
        let waits = compute_wait_times(&allocated, 0, 2);
        assert_eq!(waits, vec![10, 12]);
    }

    fn quick_config(num_roads: usize) -> ControllerConfig {
        ControllerConfig {
            num_roads,
            green_pool_secs: 4,
            min_green_secs: 1,
            max_green_secs: 4,
            yellow_secs: 1,
            display_refresh_ms: 1000,
            startup_sample_ms: 0,
            all_red_settle_ms: 0,
            turn_gap_ms: 0,
            ..ControllerConfig::default()
        }
    }

    type TestScheduler = PhaseScheduler<
        ConstantDistanceSensor,
        RecordingLightActuator,
        RecordingNumericDisplay,
        ManualClock,
    >;

    fn quiet_scheduler(config: ControllerConfig) -> TestScheduler {
        let num_roads = config.num_roads;
        let detector = ProximityDetector::new(
            ConstantDistanceSensor::silent(),
            DetectionWindow::new(config.detection_min_cm, config.detection_max_cm),
        );
        let counter = VehicleCounter::new(detector, Duration::from_millis(config.debounce_ms));
        PhaseScheduler::new(
            config,
            counter,
            RecordingLightActuator::new(),
            RecordingNumericDisplay::new(num_roads),
            ManualClock::new(),
        )
    }

    #[test]
    fn at_most_one_road_is_ever_non_red() {
        let mut scheduler = quiet_scheduler(quick_config(4));
        scheduler.startup();
        scheduler.run_cycle();
        scheduler.run_cycle();

        let mut states = vec![LightState::Red; 4];
        for &(road, state) in &scheduler.lights.writes {
            states[road.0 as usize] = state;
            let active = states.iter().filter(|&&s| s != LightState::Red).count();
            assert!(active <= 1, "two roads held the floor at once: {:?}", states);
        }
        // Every turn passed through yellow and green exactly once per cycle.
        let greens = scheduler
            .lights
            .writes
            .iter()
            .filter(|(_, s)| *s == LightState::Green)
            .count();
        assert_eq!(greens, 8);
    }

    #[test]
    fn cycle_ends_with_every_road_red() {
        let mut scheduler = quiet_scheduler(quick_config(3));
        scheduler.run_cycle();
        assert!(scheduler
            .roads()
            .iter()
            .all(|r| r.light_state == LightState::Red));
    }

    #[test]
    fn zero_demand_cycle_allocates_the_equal_split() {
        let mut scheduler = quiet_scheduler(quick_config(4));
        scheduler.run_cycle();
        assert!(scheduler
            .roads()
            .iter()
            .all(|r| r.allocated_green_secs == 1));
    }

    #[test]
    fn countdown_decrements_by_one_per_second_until_the_turn_arrives() {
        let mut scheduler = quiet_scheduler(quick_config(2));
        scheduler.begin_cycle();
        scheduler.all_red();
        scheduler.run_turn(0);

        // Zero demand, pool 4, 2 roads: 2 s green each, 1 s yellow. Road B's
        // wait starts at 2 + 1 = 3 and must tick down 3, 2, 1, 0.
        let mut countdown = scheduler.displays.display().shown[1].clone();
        countdown.dedup();
        assert_eq!(countdown, vec![3, 2, 1, 0]);

        // Road B's wait hits zero exactly as its own turn is due.
        assert_eq!(scheduler.roads()[1].wait_time_secs, 0);
        scheduler.run_turn(1);
        assert_eq!(scheduler.roads()[1].light_state, LightState::Red);
    }

    #[test]
    fn tallies_reset_every_cycle_by_default() {
        let mut scheduler = quiet_scheduler(quick_config(2));
        scheduler.roads[0].vehicle_tally = 9;
        scheduler.begin_cycle();
        assert_eq!(scheduler.roads()[0].vehicle_tally, 0);
    }

    #[test]
    fn retained_tallies_survive_the_allocation() {
        let mut config = quick_config(2);
        config.tally_reset = TallyResetPolicy::Retain;
        let mut scheduler = quiet_scheduler(config);
        scheduler.roads[0].vehicle_tally = 9;
        scheduler.begin_cycle();
        assert_eq!(scheduler.roads()[0].vehicle_tally, 9);
        // Demand skews the whole pool to road A, clamped to the band.
        assert_eq!(scheduler.roads()[0].allocated_green_secs, 4);
        assert_eq!(scheduler.roads()[1].allocated_green_secs, 1);
    }

    /// Sensor that only ever sees traffic on one road.
    struct OneBusyRoad(RoadId);

    impl DistanceSensor for OneBusyRoad {
        fn measure(&mut self, road: RoadId) -> Option<f64> {
            if road == self.0 {
                Some(4.0)
            } else {
                Some(120.0)
            }
        }
    }

    #[test]
    fn sensing_keeps_running_while_lights_are_held() {
        let mut config = quick_config(2);
        config.tally_reset = TallyResetPolicy::Retain;
        let detector = ProximityDetector::new(
            OneBusyRoad(RoadId(0)),
            DetectionWindow::new(config.detection_min_cm, config.detection_max_cm),
        );
        let counter = VehicleCounter::new(detector, Duration::from_millis(config.debounce_ms));
        let mut scheduler = PhaseScheduler::new(
            config,
            counter,
            RecordingLightActuator::new(),
            RecordingNumericDisplay::new(2),
            ManualClock::new(),
        );

        scheduler.run_cycle();
        // A 300 ms debounce across a multi-second cycle counts repeatedly.
        assert!(scheduler.roads()[0].vehicle_tally >= 3);
        assert_eq!(scheduler.roads()[1].vehicle_tally, 0);

        // The standing tallies steer the next cycle's allocation.
        scheduler.begin_cycle();
        assert_eq!(scheduler.roads()[0].allocated_green_secs, 4);
        assert_eq!(scheduler.roads()[1].allocated_green_secs, 1);
    }
}
