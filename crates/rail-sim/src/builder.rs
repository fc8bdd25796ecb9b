//! Fluent builder for constructing a [`Sim`].

use log::debug;

use rail_core::{SimClock, SimConfig};
use rail_dispatch::Policy;
use rail_track::TrackLayout;
use rail_train::{Occupancy, Train, TrainError, TrainStore};

use crate::{standard_roster, AlertLog, Sim, SimError, SimResult};

/// Fluent builder for [`Sim`].
///
/// # Optional inputs (have defaults)
///
/// | Method             | Default                        |
/// |--------------------|--------------------------------|
/// | `.config(c)`       | `SimConfig::default()`         |
/// | `.layout(l)`       | `TrackLayout::standard()`      |
/// | `.train(t)`        | none; see `.standard_roster()` |
/// | `.policy(p)`       | `Policy::Aggressive`           |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new()
///     .config(config)
///     .standard_roster()
///     .build()?;
/// sim.run_steps(100, 200, &mut NoopObserver);
/// ```
#[derive(Default)]
pub struct SimBuilder {
    config: SimConfig,
    layout: Option<TrackLayout>,
    trains: Vec<Train>,
    policy: Policy,
}

impl SimBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: SimConfig) -> Self {
        self.config = config;
        self
    }

    pub fn layout(mut self, layout: TrackLayout) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Append one train to the roster.
    pub fn train(mut self, train: Train) -> Self {
        self.trains.push(train);
        self
    }

    pub fn trains(mut self, trains: impl IntoIterator<Item = Train>) -> Self {
        self.trains.extend(trains);
        self
    }

    /// Append the four reference trains.
    pub fn standard_roster(self) -> Self {
        self.trains(standard_roster())
    }

    pub fn policy(mut self, policy: Policy) -> Self {
        self.policy = policy;
        self
    }

    /// Validate inputs and return a ready-to-run [`Sim`] with its first
    /// recommendation already computed.
    ///
    /// Fails if the configuration is invalid, a train has a non-positive
    /// speed, sits outside the layout, repeats a train number, or shares a
    /// block with another train.
    pub fn build(self) -> SimResult<Sim> {
        self.config.validate()?;
        let layout = match self.layout {
            Some(l) => l,
            None => TrackLayout::standard()?,
        };

        // ── Roster ────────────────────────────────────────────────────────
        let mut trains = TrainStore::new();
        for train in self.trains {
            if !(train.speed_kmh.is_finite() && train.speed_kmh > 0.0) {
                return Err(TrainError::BadSpeed { number: train.number, speed_kmh: train.speed_kmh }.into());
            }
            if !(train.position >= layout.x0 && train.position <= layout.x1) {
                return Err(TrainError::OffLayout {
                    number:   train.number,
                    position: train.position,
                    x0:       layout.x0,
                    x1:       layout.x1,
                }
                .into());
            }
            trains.add(train)?;
        }

        if let Some(&(a, b, track, block)) = Occupancy::new(&layout, &trains).conflicts().first() {
            return Err(SimError::InitialConflict {
                first:  trains.number(a).to_owned(),
                second: trains.number(b).to_owned(),
                track,
                block,
            });
        }
        debug!("built simulation with {} trains", trains.len());

        let mut sim = Sim {
            alerts:         AlertLog::new(self.config.alert_capacity),
            config:         self.config,
            clock:          SimClock::new(),
            layout,
            trains,
            policy:         self.policy,
            recommendation: None,
        };
        sim.recompute_recommendation();
        Ok(sim)
    }
}
