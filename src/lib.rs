//! # netsiege: deterministic attacker-vs-sysadmin network simulation
//!
//! A discrete-event simulation of an adversarial process on a network of
//! computers: an attacker repeatedly tries to compromise machines while a
//! (slow, comedic) sysadmin reactively repairs whatever the intrusion
//! detection system flags. No async, no threads, no wall-clock time. One
//! seeded RNG and a priority-ordered event queue drive everything, so every
//! run is reproducible from its configuration and seed.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────┐
//! │       Simulator          │ ← fetch-execute cycle, five handlers,
//! │  ┌────────────────────┐  │   termination conditions
//! │  │   PriorityQueue    │  │ ← facade over the heap
//! │  │  ┌──────────────┐  │  │
//! │  │  │     Heap     │  │  │ ← binary heap, pluggable tie-break
//! │  │  └──────────────┘  │  │
//! │  └────────────────────┘  │
//! │  ┌────────────────────┐  │
//! │  │      Events        │  │ ← closed five-variant sum type
//! │  └────────────────────┘  │
//! │  ┌────────────────────┐  │
//! │  │     Decisions      │  │ ← seeded ChaCha8 randomness
//! │  └────────────────────┘  │
//! └──────────────────────────┘
//! ```
//!
//! The [`Graph`] generator is an unrelated demo collaborator used only by
//! the `generate` binary.

pub mod error;
pub mod event;
pub mod graph;
pub mod heap;
pub mod queue;
pub mod random;
pub mod simulator;
pub mod time;

// Re-exports for convenience.
pub use error::{SimError, SimResult};
pub use event::{Action, ComputerId, Event};
pub use graph::Graph;
pub use heap::{Heap, PriorityContainer};
pub use queue::PriorityQueue;
pub use random::Decisions;
pub use simulator::{EndCondition, ScheduleRecord, SimConfig, Simulator, DEFAULT_MAX_TIME};
pub use time::SimTime;
