//! Shot log entries.

use crate::models::clock::PeriodMark;
use crate::models::game::PlayerId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A field-goal attempt by one of our players.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ShotRecord {
    pub player_id: PlayerId,
    pub period: PeriodMark,
    pub made: bool,
    pub created_at: DateTime<Utc>,
}
