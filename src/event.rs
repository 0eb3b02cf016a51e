//! The five simulation events.
//!
//! Everything that happens in the simulated fight is one of five event
//! kinds, modeled as a closed sum type with per-variant fields so that a
//! variant can only carry the fields that are meaningful for it. Events
//! are plain values: the same logical action may be scheduled many times
//! with different fields.

use std::fmt;

/// Index of a computer on the simulated network, `0..num_computers`.
pub type ComputerId = usize;

// ── Action tag ────────────────────────────────────────────────────────

/// The tag of an [`Event`], ordered by same-instant precedence.
///
/// When two events land on the same tick, the higher-ranked action is
/// processed first: attacks resolve before repairs, and notifications go
/// last. The derived `Ord` follows declaration order, so keep the
/// variants sorted from lowest to highest precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Action {
    Notify,
    DeployRepair,
    ExecuteRepair,
    DeployAttack,
    ExecuteAttack,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Notify => "Notify",
            Action::DeployRepair => "Deploy_Repair",
            Action::ExecuteRepair => "Execute_Repair",
            Action::DeployAttack => "Deploy_Attack",
            Action::ExecuteAttack => "Execute_Attack",
        };
        write!(f, "{}", name)
    }
}

// ── Event ─────────────────────────────────────────────────────────────

/// A single simulation event.
///
/// `source: None` models the attacker's initial foothold: the very first
/// attack comes from outside the network, with no attacking computer.
/// Every other variant names only the machines it actually involves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// The attacker (or an infected machine) lines up an attack on `target`.
    DeployAttack {
        source: Option<ComputerId>,
        target: ComputerId,
    },
    /// A previously deployed attack goes off against `target`.
    ExecuteAttack {
        source: Option<ComputerId>,
        target: ComputerId,
    },
    /// The sysadmin gets around to starting a repair of `target`.
    DeployRepair { target: ComputerId },
    /// The repair of `target` completes.
    ExecuteRepair { target: ComputerId },
    /// The intrusion-detection system flags `source` for the sysadmin.
    Notify { source: ComputerId },
}

impl Event {
    /// The action tag of this event.
    pub fn action(&self) -> Action {
        match self {
            Event::DeployAttack { .. } => Action::DeployAttack,
            Event::ExecuteAttack { .. } => Action::ExecuteAttack,
            Event::DeployRepair { .. } => Action::DeployRepair,
            Event::ExecuteRepair { .. } => Action::ExecuteRepair,
            Event::Notify { .. } => Action::Notify,
        }
    }
}

/// Tie-break predicate for the event queue: among events scheduled for the
/// same tick, the higher-ranked [`Action`] pops first.
pub fn attack_precedence(a: &Event, _pa: u64, b: &Event, _pb: u64) -> bool {
    a.action() > b.action()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_precedence_order() {
        assert!(Action::ExecuteAttack > Action::DeployAttack);
        assert!(Action::DeployAttack > Action::ExecuteRepair);
        assert!(Action::ExecuteRepair > Action::DeployRepair);
        assert!(Action::DeployRepair > Action::Notify);
    }

    #[test]
    fn test_event_action_tags() {
        let e = Event::DeployAttack {
            source: None,
            target: 3,
        };
        assert_eq!(e.action(), Action::DeployAttack);
        assert_eq!(Event::Notify { source: 1 }.action(), Action::Notify);
        assert_eq!(
            Event::ExecuteRepair { target: 0 }.action(),
            Action::ExecuteRepair
        );
    }

    #[test]
    fn test_attack_precedence_tiebreak() {
        let attack = Event::ExecuteAttack {
            source: Some(0),
            target: 1,
        };
        let repair = Event::DeployRepair { target: 1 };
        assert!(attack_precedence(&attack, 100, &repair, 100));
        assert!(!attack_precedence(&repair, 100, &attack, 100));
    }

    #[test]
    fn test_action_display_names() {
        assert_eq!(Action::DeployAttack.to_string(), "Deploy_Attack");
        assert_eq!(Action::ExecuteRepair.to_string(), "Execute_Repair");
        assert_eq!(Action::Notify.to_string(), "Notify");
    }
}
