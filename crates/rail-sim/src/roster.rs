//! The reference roster.

use rail_core::{Direction, Priority, TrackId};
use rail_train::Train;

/// Four trains: two expresses on the main lines and two slower trains on
/// the first two platform loops.
pub fn standard_roster() -> Vec<Train> {
    vec![
        Train::new("12001", "12001 Shatabdi", Direction::Up, Priority::High, 130.0, 180.0)
            .with_dwell_secs(6),
        Train::new("19345", "19345 Express", Direction::Down, Priority::High, 130.0, 980.0)
            .with_dwell_secs(6),
        Train::new("22177", "22177 Superfast", Direction::Up, Priority::Medium, 80.0, 510.0)
            .on_track(TrackId::Mid1)
            .with_dwell_secs(5),
        Train::new("9F201", "9F201 Freight", Direction::Down, Priority::Medium, 80.0, 630.0)
            .on_track(TrackId::Mid2)
            .with_dwell_secs(5),
    ]
}
