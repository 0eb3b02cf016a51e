//! The fetch-execute simulation core.
//!
//! An attacker repeatedly tries to compromise machines on a small network
//! while a slow sysadmin reactively repairs whatever the intrusion-detection
//! system flags. The simulator owns a min-ordered event queue keyed by
//! simulation time, pops the chronologically earliest event each cycle,
//! dispatches it to one of five handlers, and lets the handlers schedule
//! follow-up events back into the queue until one of the end conditions is
//! reached.
//!
//! Determinism: all randomness flows through one seeded [`Decisions`]
//! generator consumed in a fixed order, and the queue's tie-break rule makes
//! pop order a strict total order, so a run is fully reproducible from its
//! configuration and seed. Cloning a `Simulator` deep-copies the queue and
//! the generator state; the two copies evolve independently.

use std::fmt;

use log::{debug, info};

use crate::error::{SimError, SimResult};
use crate::event::{attack_precedence, Action, ComputerId, Event};
use crate::queue::PriorityQueue;
use crate::random::Decisions;
use crate::time::SimTime;

/// Default cap on simulation time before a run is declared a draw.
pub const DEFAULT_MAX_TIME: u64 = 8_640_000_000;

/// Ticks between deploying an attack and executing it.
const EXECUTE_DELAY: u64 = 100;
/// Ticks before an attacking machine lines up its next attack.
const REDEPLOY_DELAY: u64 = 1_000;
/// Ticks between a detection and the sysadmin being notified.
const NOTIFY_DELAY: u64 = 100;
/// Every repair request pushes the sysadmin's availability this much
/// further out, serializing all repairs.
const REPAIR_BACKLOG_STEP: u64 = 10_000;

type Tiebreak = fn(&Event, u64, &Event, u64) -> bool;

// ── Configuration ─────────────────────────────────────────────────────

/// Simulation parameters.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of machines on the network. Must be at least 2.
    pub num_computers: usize,
    /// Chance an executed attack compromises its target, in percent.
    pub attack_probability: u32,
    /// Chance a boundary-crossing attack is noticed by the IDS, in percent.
    pub detect_probability: u32,
    /// The run is a draw once the clock passes this point.
    pub max_time: SimTime,
    /// Seed for the deterministic random generator.
    pub seed: u64,
    /// Print a protocol line to stdout for every scheduled event.
    pub echo_schedule: bool,
}

impl SimConfig {
    /// Configuration with the default time cap, seed 0, and echo off.
    pub fn new(num_computers: usize, attack_probability: u32, detect_probability: u32) -> Self {
        SimConfig {
            num_computers,
            attack_probability,
            detect_probability,
            max_time: SimTime::new(DEFAULT_MAX_TIME),
            seed: 0,
            echo_schedule: false,
        }
    }

    /// Replace the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Replace the time cap.
    pub fn with_max_time(mut self, ticks: u64) -> Self {
        self.max_time = SimTime::new(ticks);
        self
    }

    /// Enable or disable protocol-line echo.
    pub fn with_echo(mut self, on: bool) -> Self {
        self.echo_schedule = on;
        self
    }
}

// ── Outcomes ──────────────────────────────────────────────────────────

/// The three data-driven ways a run can end.
///
/// An empty event queue is the fourth terminal state, but it is a logic defect,
/// not an outcome, and surfaces as [`SimError::EmptyQueue`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndCondition {
    /// The attacker holds a majority of the network.
    NetworkConquered,
    /// Every infection has been repaired after at least one compromise.
    NetworkDefended,
    /// The clock passed `max_time` with no winner.
    TimedOut,
}

/// Result of one fetch: either the next event to process, or the end
/// condition that terminated the run.
enum Fetched {
    Event(Event),
    Ended(EndCondition),
}

// ── Schedule trace ────────────────────────────────────────────────────

/// A record of one scheduling action, captured at the moment the event is
/// enqueued (not when it executes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleRecord {
    pub action: Action,
    /// The time the event was scheduled *for*.
    pub time: SimTime,
    pub source: Option<ComputerId>,
    pub target: Option<ComputerId>,
}

impl ScheduleRecord {
    fn new(event: &Event, time: SimTime) -> Self {
        let (source, target) = match *event {
            Event::DeployAttack { source, target } | Event::ExecuteAttack { source, target } => {
                (source, Some(target))
            }
            Event::DeployRepair { target } | Event::ExecuteRepair { target } => {
                (None, Some(target))
            }
            Event::Notify { source } => (Some(source), None),
        };
        ScheduleRecord {
            action: event.action(),
            time,
            source,
            target,
        }
    }
}

/// Protocol rendering: `<ActionName>(<time>[, <source>][, <target>])`.
///
/// Attacks print source and target (a bootstrap source prints as `-1`),
/// repairs print only the target, notifications only the source.
impl fmt::Display for ScheduleRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = self.time.ticks();
        match self.action {
            Action::DeployAttack | Action::ExecuteAttack => {
                let source = self.source.map(|s| s as i64).unwrap_or(-1);
                let target = self.target.map(|s| s as i64).unwrap_or(-1);
                write!(f, "{}({}, {}, {})", self.action, t, source, target)
            }
            Action::DeployRepair | Action::ExecuteRepair => {
                let target = self.target.map(|s| s as i64).unwrap_or(-1);
                write!(f, "{}({}, {})", self.action, t, target)
            }
            Action::Notify => {
                let source = self.source.map(|s| s as i64).unwrap_or(-1);
                write!(f, "{}({}, {})", self.action, t, source)
            }
        }
    }
}

// ── Simulator ─────────────────────────────────────────────────────────

/// Top-level simulation driver.
///
/// Owns the event queue, the per-computer infection flags, the sysadmin's
/// backlog clock, and the random generator for its entire lifetime; no
/// other component mutates them. There are no resume semantics: once an
/// end condition is reached the simulator is done.
#[derive(Debug, Clone)]
pub struct Simulator {
    config: SimConfig,
    clock: SimTime,
    queue: PriorityQueue<Event, Tiebreak>,
    /// `computers[i]` is `true` while machine `i` is compromised.
    computers: Vec<bool>,
    /// When the sysadmin can next start a repair.
    admin_next_fix: SimTime,
    /// Guards `NetworkDefended` against firing before the first compromise.
    has_infected: bool,
    decisions: Decisions,
    trace: Vec<ScheduleRecord>,
    events_processed: u64,
}

impl Simulator {
    /// Validate the configuration and build a simulator with the attacker's
    /// initial deploy event already queued.
    pub fn new(config: SimConfig) -> SimResult<Self> {
        if config.num_computers < 2 {
            return Err(SimError::TooFewComputers(config.num_computers));
        }
        for percent in [config.attack_probability, config.detect_probability] {
            if percent > 100 {
                return Err(SimError::ProbabilityOutOfRange(percent));
            }
        }

        let decisions = Decisions::new(config.seed, config.num_computers);
        let mut sim = Simulator {
            computers: vec![false; config.num_computers],
            clock: SimTime::ZERO,
            queue: PriorityQueue::min_with(attack_precedence as Tiebreak),
            admin_next_fix: SimTime::ZERO,
            has_infected: false,
            decisions,
            trace: Vec::new(),
            events_processed: 0,
            config,
        };

        // The bootstrap attack comes from outside the network.
        let at = sim.after(REDEPLOY_DELAY);
        sim.schedule_deploy_attack(None, at);
        Ok(sim)
    }

    /// Current simulation time.
    pub fn clock(&self) -> SimTime {
        self.clock
    }

    /// Total events dispatched so far.
    pub fn events_processed(&self) -> u64 {
        self.events_processed
    }

    /// Number of currently compromised machines.
    pub fn infected_count(&self) -> usize {
        self.computers.iter().filter(|&&c| c).count()
    }

    /// Every scheduling action recorded so far, in enqueue order.
    pub fn trace(&self) -> &[ScheduleRecord] {
        &self.trace
    }

    /// Run the fetch-execute cycle to completion.
    pub fn run(&mut self) -> SimResult<EndCondition> {
        info!(
            "starting simulation: {} computers, {}% attack success, {}% detection, seed {}",
            self.config.num_computers,
            self.config.attack_probability,
            self.config.detect_probability,
            self.config.seed
        );
        loop {
            if let Some(end) = self.step()? {
                info!(
                    "simulation ended at {} after {} events: {:?}",
                    self.clock, self.events_processed, end
                );
                return Ok(end);
            }
        }
    }

    /// Advance by exactly one fetch-execute cycle.
    ///
    /// Returns `Ok(Some(end))` when a termination condition fired instead
    /// of an event, `Ok(None)` after a normal dispatch.
    pub fn step(&mut self) -> SimResult<Option<EndCondition>> {
        match self.fetch()? {
            Fetched::Ended(end) => Ok(Some(end)),
            Fetched::Event(event) => {
                debug!("dispatching {:?} at {}", event, self.clock);
                self.events_processed += 1;
                self.process(event);
                Ok(None)
            }
        }
    }

    /// The fetch half of the cycle: check the termination conditions in
    /// fixed priority order, then pop the earliest pending event and
    /// advance the clock to it.
    fn fetch(&mut self) -> SimResult<Fetched> {
        if self.queue.is_empty() {
            // The attacker's standing deploy event should keep the queue
            // populated forever; emptiness is a defect.
            return Err(SimError::EmptyQueue);
        }
        if self.infected_count() > (self.config.num_computers + 1) / 2 {
            return Ok(Fetched::Ended(EndCondition::NetworkConquered));
        }
        if self.infected_count() == 0 && self.has_infected {
            return Ok(Fetched::Ended(EndCondition::NetworkDefended));
        }

        let next = self.queue.pop()?;
        self.clock = SimTime::new(next.priority);
        if self.clock.is_after(self.config.max_time) {
            return Ok(Fetched::Ended(EndCondition::TimedOut));
        }
        Ok(Fetched::Event(next.content))
    }

    /// The execute half: dispatch purely on the event's tag.
    fn process(&mut self, event: Event) {
        match event {
            Event::DeployAttack { source, target } => self.process_deploy_attack(source, target),
            Event::ExecuteAttack { source, target } => self.process_execute_attack(source, target),
            Event::DeployRepair { target } => self.process_deploy_repair(target),
            Event::ExecuteRepair { target } => self.computers[target] = false,
            Event::Notify { source } => self.process_notify(source),
        }
    }

    // ── Event handlers ────────────────────────────────────────────

    fn process_deploy_attack(&mut self, source: Option<ComputerId>, target: ComputerId) {
        let still_attacking = match source {
            None => true,
            Some(src) => self.computers[src],
        };
        if !still_attacking {
            // The source was repaired in the meantime; the attack retires.
            return;
        }
        let execute_at = self.after(EXECUTE_DELAY);
        self.schedule(Event::ExecuteAttack { source, target }, execute_at);
        let redeploy_at = self.after(REDEPLOY_DELAY);
        self.schedule_deploy_attack(source, redeploy_at);
    }

    fn process_execute_attack(&mut self, source: Option<ComputerId>, target: ComputerId) {
        if !self.decisions.attempt(self.config.attack_probability) {
            return;
        }
        self.has_infected = true;
        if self.computers[target] {
            return;
        }
        self.computers[target] = true;
        // A fresh foothold starts attacking right away.
        self.schedule_deploy_attack(Some(target), self.clock);
        if self.detected_by_ids(source, target) {
            if let Some(src) = source {
                let at = self.after(NOTIFY_DELAY);
                self.schedule(Event::Notify { source: src }, at);
            }
            let at = self.after(NOTIFY_DELAY);
            self.schedule(Event::Notify { source: target }, at);
        }
    }

    fn process_deploy_repair(&mut self, target: ComputerId) {
        let at = self.after(EXECUTE_DELAY);
        self.schedule(Event::ExecuteRepair { target }, at);
    }

    fn process_notify(&mut self, source: ComputerId) {
        self.admin_next_fix = self
            .admin_next_fix
            .plus(REPAIR_BACKLOG_STEP)
            .expect("simulation time overflow");
        self.schedule(Event::DeployRepair { target: source }, self.admin_next_fix);
    }

    // ── Scheduling helpers ────────────────────────────────────────

    /// Record the protocol line, then insert the event into the queue.
    fn schedule(&mut self, event: Event, at: SimTime) {
        let record = ScheduleRecord::new(&event, at);
        if self.config.echo_schedule {
            println!("{}", record);
        }
        debug!("scheduled {}", record);
        self.trace.push(record);
        self.queue.push(event, at.ticks());
    }

    /// Deploy an attack from `source` against a random machine other than
    /// `source` itself.
    fn schedule_deploy_attack(&mut self, source: Option<ComputerId>, at: SimTime) {
        let target = self.decisions.random_computer(source);
        self.schedule(Event::DeployAttack { source, target }, at);
    }

    /// Whether the IDS notices an attack from `source` against `target`.
    ///
    /// The bootstrap attack (no source machine) is always visible to the
    /// IDS check. Otherwise detection is possible only when source and
    /// target sit on opposite halves of the index space; same-half traffic
    /// never crosses the IDS and consumes no randomness.
    fn detected_by_ids(&mut self, source: Option<ComputerId>, target: ComputerId) -> bool {
        match source {
            None => self.decisions.attempt(self.config.detect_probability),
            Some(src) => {
                let boundary = self.config.num_computers / 2;
                let crosses = (src >= boundary) != (target >= boundary);
                crosses && self.decisions.attempt(self.config.detect_probability)
            }
        }
    }

    fn after(&self, delay: u64) -> SimTime {
        self.clock.plus(delay).expect("simulation time overflow")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet(num: usize, attack: u32, detect: u32, seed: u64) -> Simulator {
        Simulator::new(SimConfig::new(num, attack, detect).with_seed(seed)).unwrap()
    }

    #[test]
    fn test_config_validation() {
        assert_eq!(
            Simulator::new(SimConfig::new(1, 50, 50)).unwrap_err(),
            SimError::TooFewComputers(1)
        );
        assert_eq!(
            Simulator::new(SimConfig::new(4, 101, 50)).unwrap_err(),
            SimError::ProbabilityOutOfRange(101)
        );
        assert_eq!(
            Simulator::new(SimConfig::new(4, 50, 200)).unwrap_err(),
            SimError::ProbabilityOutOfRange(200)
        );
    }

    #[test]
    fn test_bootstrap_deploy_is_queued() {
        let sim = quiet(4, 100, 0, 42);
        assert_eq!(sim.trace().len(), 1);
        let rec = sim.trace()[0];
        assert_eq!(rec.action, Action::DeployAttack);
        assert_eq!(rec.time, SimTime::new(1000));
        assert_eq!(rec.source, None);
        // Protocol line prints the bootstrap source as -1.
        let line = rec.to_string();
        assert!(line.starts_with("Deploy_Attack(1000, -1, "), "got {}", line);
    }

    #[test]
    fn test_attacker_wins_when_unopposed() {
        // Every attack succeeds, none is ever detected: infection must
        // spread past the majority threshold in bounded time.
        let mut sim = quiet(4, 100, 0, 42);
        let end = sim.run().unwrap();
        assert_eq!(end, EndCondition::NetworkConquered);
        assert!(sim.infected_count() > 2);
        assert!(sim.events_processed() < 100_000, "run should be short");
    }

    #[test]
    fn test_zero_success_ends_in_draw() {
        // No attack ever lands, so nothing is infected, `has_infected`
        // stays false, and the defended condition must not fire either.
        let mut sim = Simulator::new(
            SimConfig::new(4, 0, 0).with_seed(7).with_max_time(200_000),
        )
        .unwrap();
        let end = sim.run().unwrap();
        assert_eq!(end, EndCondition::TimedOut);
        assert_eq!(sim.infected_count(), 0);
        assert!(!sim.has_infected);
    }

    #[test]
    fn test_conquered_threshold() {
        // 4 computers: conquered strictly above (4 + 1) / 2 = 2 infected.
        let mut sim = quiet(4, 100, 0, 1);
        sim.computers = vec![true, true, false, false];
        assert_eq!(sim.step().unwrap(), None, "2 infected is not conquered yet");
        let mut sim = quiet(4, 100, 0, 1);
        sim.computers = vec![true, true, true, false];
        assert_eq!(sim.step().unwrap(), Some(EndCondition::NetworkConquered));
    }

    #[test]
    fn test_defended_requires_prior_infection() {
        let mut sim = quiet(4, 100, 0, 1);
        // Clean network, never infected: not defended, just a normal step.
        assert_eq!(sim.step().unwrap(), None);

        let mut sim = quiet(4, 100, 0, 1);
        sim.has_infected = true;
        assert_eq!(sim.step().unwrap(), Some(EndCondition::NetworkDefended));
    }

    #[test]
    fn test_empty_queue_is_fatal() {
        let mut sim = quiet(4, 100, 0, 1);
        sim.queue.pop().unwrap(); // drain the bootstrap event
        assert_eq!(sim.step().unwrap_err(), SimError::EmptyQueue);
    }

    #[test]
    fn test_repair_serialization() {
        // Two notifications in the same tick must yield repairs exactly
        // one backlog step apart, in processing order.
        let mut sim = quiet(6, 100, 100, 3);
        sim.process(Event::Notify { source: 2 });
        sim.process(Event::Notify { source: 5 });

        let repairs: Vec<&ScheduleRecord> = sim
            .trace()
            .iter()
            .filter(|r| r.action == Action::DeployRepair)
            .collect();
        assert_eq!(repairs.len(), 2);
        assert_eq!(repairs[0].target, Some(2));
        assert_eq!(repairs[1].target, Some(5));
        assert_eq!(
            repairs[1].time.ticks() - repairs[0].time.ticks(),
            10_000
        );
    }

    #[test]
    fn test_detection_never_crosses_same_half() {
        // numComputers = 10 splits at 5; machines 2 and 4 share a half,
        // so even 100% detection never fires.
        let mut sim = quiet(10, 100, 100, 9);
        for _ in 0..100 {
            assert!(!sim.detected_by_ids(Some(2), 4));
            assert!(!sim.detected_by_ids(Some(7), 9));
        }
    }

    #[test]
    fn test_detection_across_boundary() {
        let mut sim = quiet(10, 100, 100, 9);
        for _ in 0..100 {
            assert!(sim.detected_by_ids(Some(2), 7));
            assert!(sim.detected_by_ids(Some(8), 1));
        }
        let mut sim = quiet(10, 100, 0, 9);
        for _ in 0..100 {
            assert!(!sim.detected_by_ids(Some(2), 7));
        }
    }

    #[test]
    fn test_detection_bootstrap_matches_probability() {
        // With no source machine, detection is a plain Bernoulli draw.
        let mut sim = quiet(10, 100, 40, 123);
        let hits = (0..10_000)
            .filter(|_| sim.detected_by_ids(None, 1))
            .count();
        assert!((3_500..4_500).contains(&hits), "got {} of 10000", hits);
    }

    #[test]
    fn test_retired_attack_is_a_no_op() {
        let mut sim = quiet(4, 100, 0, 5);
        let before = sim.trace().len();
        // Source 1 is not infected, so its deploy event does nothing.
        sim.process(Event::DeployAttack {
            source: Some(1),
            target: 2,
        });
        assert_eq!(sim.trace().len(), before);
    }

    #[test]
    fn test_deploy_from_infected_schedules_followups() {
        let mut sim = quiet(4, 100, 0, 5);
        sim.computers[1] = true;
        sim.clock = SimTime::new(5_000);
        sim.process(Event::DeployAttack {
            source: Some(1),
            target: 2,
        });
        let tail: Vec<ScheduleRecord> = sim.trace().iter().rev().take(2).rev().copied().collect();
        // Execute at clock+100, then the next deploy at clock+1000.
        assert_eq!(tail[0].action, Action::ExecuteAttack);
        assert_eq!(tail[0].time, SimTime::new(5_100));
        assert_eq!(tail[0].target, Some(2));
        assert_eq!(tail[1].action, Action::DeployAttack);
        assert_eq!(tail[1].time, SimTime::new(6_000));
    }

    #[test]
    fn test_new_infection_deploys_immediately() {
        let mut sim = quiet(4, 100, 0, 5);
        sim.clock = SimTime::new(2_000);
        sim.process(Event::ExecuteAttack {
            source: None,
            target: 3,
        });
        assert!(sim.computers[3]);
        assert!(sim.has_infected);
        let last = *sim.trace().last().unwrap();
        assert_eq!(last.action, Action::DeployAttack);
        assert_eq!(last.source, Some(3));
        // The fresh foothold's first deploy lands at the current clock.
        assert_eq!(last.time, SimTime::new(2_000));
    }

    #[test]
    fn test_reinfection_does_not_redeploy() {
        let mut sim = quiet(4, 100, 0, 5);
        sim.computers[3] = true;
        let before = sim.trace().len();
        sim.process(Event::ExecuteAttack {
            source: Some(0),
            target: 3,
        });
        // Attack "succeeds" but the target was already infected.
        assert!(sim.has_infected);
        assert_eq!(sim.trace().len(), before);
    }

    #[test]
    fn test_execute_repair_disinfects() {
        let mut sim = quiet(4, 100, 0, 5);
        sim.computers[2] = true;
        sim.process(Event::ExecuteRepair { target: 2 });
        assert!(!sim.computers[2]);
    }

    #[test]
    fn test_same_tick_attack_precedes_repair() {
        let mut sim = quiet(4, 100, 0, 5);
        sim.queue.push(Event::DeployRepair { target: 1 }, 500);
        sim.queue.push(
            Event::ExecuteAttack {
                source: Some(0),
                target: 1,
            },
            500,
        );
        let first = sim.queue.pop().unwrap();
        assert_eq!(first.content.action(), Action::ExecuteAttack);
    }

    #[test]
    fn test_clone_runs_identically() {
        let sim = Simulator::new(
            SimConfig::new(6, 60, 40)
                .with_seed(2024)
                .with_max_time(1_000_000),
        )
        .unwrap();
        let mut a = sim.clone();
        let mut b = sim;
        let end_a = a.run().unwrap();
        let end_b = b.run().unwrap();
        assert_eq!(end_a, end_b);
        assert_eq!(a.trace(), b.trace());
        assert_eq!(a.events_processed(), b.events_processed());
    }

    #[test]
    fn test_same_seed_reproduces_trace() {
        let cfg = SimConfig::new(5, 70, 30).with_seed(99).with_max_time(1_000_000);
        let mut a = Simulator::new(cfg.clone()).unwrap();
        let mut b = Simulator::new(cfg).unwrap();
        assert_eq!(a.run().unwrap(), b.run().unwrap());
        assert_eq!(a.trace(), b.trace());
    }
}
