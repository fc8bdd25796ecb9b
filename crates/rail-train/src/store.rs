//! The `TrainStore`: the roster, indexed by `TrainId`.

use rail_core::TrainId;

use crate::{Train, TrainError, TrainResult};

/// All trains of the simulation in roster order.
///
/// `TrainId(i)` is the `i`-th train added.  Roster order is the fixed
/// iteration order of every step and of every dispatcher scan.
#[derive(Clone, Debug, Default)]
pub struct TrainStore {
    trains: Vec<Train>,
}

impl TrainStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `train`, rejecting duplicate train numbers.
    pub fn add(&mut self, train: Train) -> TrainResult<TrainId> {
        if self.find(&train.number).is_some() {
            return Err(TrainError::DuplicateNumber(train.number));
        }
        let id = TrainId(self.trains.len() as u32);
        self.trains.push(train);
        Ok(id)
    }

    #[inline]
    pub fn get(&self, id: TrainId) -> Option<&Train> {
        self.trains.get(id.index())
    }

    #[inline]
    pub fn get_mut(&mut self, id: TrainId) -> Option<&mut Train> {
        self.trains.get_mut(id.index())
    }

    /// Look up a train by its public number.
    pub fn find(&self, number: &str) -> Option<TrainId> {
        self.trains
            .iter()
            .position(|t| t.number == number)
            .map(|i| TrainId(i as u32))
    }

    /// `(TrainId, &Train)` pairs in roster order.
    pub fn iter(&self) -> impl Iterator<Item = (TrainId, &Train)> + '_ {
        self.trains
            .iter()
            .enumerate()
            .map(|(i, t)| (TrainId(i as u32), t))
    }

    pub fn ids(&self) -> impl Iterator<Item = TrainId> + use<> {
        (0..self.trains.len() as u32).map(TrainId)
    }

    /// Public number of `id`, or `"?"` for an id outside the roster.
    pub fn number(&self, id: TrainId) -> &str {
        self.get(id).map_or("?", |t| t.number.as_str())
    }

    pub fn len(&self) -> usize {
        self.trains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trains.is_empty()
    }
}
