//! Recommendations and their justification text.

use rail_core::TrainId;
use rail_train::TrainStore;

use crate::{HoldReason, Plan, Policy};

/// Shown when the detector finds nothing to do.
pub const ALL_CLEAR: &str = "All clear. No conflicts predicted.";

/// The detector's output for one evaluation cycle.
///
/// Recreated on every cycle and never carried forward.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Recommendation {
    /// What to do, one sentence per plan.
    pub text:   String,
    /// Why.
    pub note:   String,
    /// Policy in force when the recommendation was made.
    pub policy: Policy,
    pub plans:  Vec<Plan>,
}

impl Recommendation {
    /// Hold `second` until `first` clears the crossover.
    pub fn crossover(first: TrainId, second: TrainId, trains: &TrainStore, policy: Policy) -> Self {
        let (a, b) = (trains.number(first), trains.number(second));
        Self {
            text: format!(
                "Potential conflict detected at mid crossover between {a} and {b}. \
                 Recommend holding {b} until {a} clears the corridor."
            ),
            note: "AI detected both trains approaching the same crossover. \
                   Holding one prevents collision."
                .to_owned(),
            policy,
            plans: vec![Plan::Hold { trains: vec![second], reason: HoldReason::Crossover }],
        }
    }

    /// Failure-driven plans, one sentence each, concatenated.
    pub fn for_failures(plans: Vec<Plan>, trains: &TrainStore, policy: Policy) -> Self {
        let text = plans
            .iter()
            .map(|plan| describe(plan, trains))
            .collect::<Vec<_>>()
            .join(" ");
        Self {
            text,
            note: format!(
                "Justification: minimize total delay using corridor bypasses where safe; \
                 respect priorities ({policy} policy)."
            ),
            policy,
            plans,
        }
    }
}

fn describe(plan: &Plan, trains: &TrainStore) -> String {
    match plan {
        Plan::Hold { trains: held, reason } => {
            format!("Hold {} {reason}.", numbers(held, trains))
        }
        Plan::Reroute { lead, via, corridor, holds } => {
            let holds = if holds.is_empty() { "none".to_owned() } else { numbers(holds, trains) };
            format!(
                "Reroute {} via {via} line through {corridor} corridor; hold {holds}.",
                trains.number(*lead)
            )
        }
    }
}

/// `"12001, 22177"`.
pub(crate) fn numbers(ids: &[TrainId], trains: &TrainStore) -> String {
    ids.iter()
        .map(|&id| trains.number(id))
        .collect::<Vec<_>>()
        .join(", ")
}
