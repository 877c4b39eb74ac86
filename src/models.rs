use crate::archive::{MatchArchive, TrainingArchive, TrainingLog};
use crate::score::ScoreEngine;
use crate::shot_log::ShotLog;
use crate::stats::{Bucket, OutcomeCounts};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[default]
    Us,
    Them,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Us => Side::Them,
            Side::Them => Side::Us,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Side::Us => "us",
            Side::Them => "them",
        })
    }
}

/// One rung of the in-game point ladder. Ordinal only: `Forty` has no successor,
/// a point won from there closes the game instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum PointLabel {
    #[default]
    #[serde(rename = "0")]
    Love,
    #[serde(rename = "15")]
    Fifteen,
    #[serde(rename = "30")]
    Thirty,
    #[serde(rename = "40")]
    Forty,
}

impl PointLabel {
    pub fn next(self) -> Option<Self> {
        match self {
            PointLabel::Love => Some(PointLabel::Fifteen),
            PointLabel::Fifteen => Some(PointLabel::Thirty),
            PointLabel::Thirty => Some(PointLabel::Forty),
            PointLabel::Forty => None,
        }
    }

    pub fn prev(self) -> Option<Self> {
        match self {
            PointLabel::Love => None,
            PointLabel::Fifteen => Some(PointLabel::Love),
            PointLabel::Thirty => Some(PointLabel::Fifteen),
            PointLabel::Forty => Some(PointLabel::Thirty),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PointLabel::Love => "0",
            PointLabel::Fifteen => "15",
            PointLabel::Thirty => "30",
            PointLabel::Forty => "40",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct GameScore {
    pub us: PointLabel,
    pub them: PointLabel,
}

impl GameScore {
    pub fn get_mut(&mut self, side: Side) -> &mut PointLabel {
        match side {
            Side::Us => &mut self.us,
            Side::Them => &mut self.them,
        }
    }
}

/// Games won by each side, either in a closed set or in the set being played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SetScore {
    pub us: u32,
    pub them: u32,
}

impl SetScore {
    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Us => self.us,
            Side::Them => self.them,
        }
    }

    pub fn get_mut(&mut self, side: Side) -> &mut u32 {
        match side {
            Side::Us => &mut self.us,
            Side::Them => &mut self.them,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Score {
    pub sets: Vec<SetScore>,
    pub current_set: SetScore,
    pub points: GameScore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Winner,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShotType {
    Serve,
    Return,
    Baseline,
    Volley,
    Bandeja,
    Lob,
    Smash,
}

impl ShotType {
    pub fn as_str(self) -> &'static str {
        match self {
            ShotType::Serve => "serve",
            ShotType::Return => "return",
            ShotType::Baseline => "baseline",
            ShotType::Volley => "volley",
            ShotType::Bandeja => "bandeja",
            ShotType::Lob => "lob",
            ShotType::Smash => "smash",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hand {
    Forehand,
    Backhand,
}

impl Hand {
    pub fn as_str(self) -> &'static str {
        match self {
            Hand::Forehand => "forehand",
            Hand::Backhand => "backhand",
        }
    }
}

/// Court coordinates of the tap that recorded the shot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// A rally-ending shot. `shot_type` and `hand` are optional tags; untagged
/// events still count, under the `undefined` bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShotEvent {
    pub position: Position,
    pub outcome: Outcome,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shot_type: Option<ShotType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hand: Option<Hand>,
}

impl ShotEvent {
    pub fn new(position: Position, outcome: Outcome) -> Self {
        Self {
            position,
            outcome,
            shot_type: None,
            hand: None,
        }
    }

    pub fn with_shot_type(mut self, shot_type: ShotType) -> Self {
        self.shot_type = Some(shot_type);
        self
    }

    pub fn with_hand(mut self, hand: Hand) -> Self {
        self.hand = Some(hand);
        self
    }
}

pub const DEFAULT_US_NAME: &str = "Nosotros";
pub const DEFAULT_THEM_NAME: &str = "Ellos";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamNames {
    pub us: String,
    pub them: String,
}

impl Default for TeamNames {
    fn default() -> Self {
        Self {
            us: DEFAULT_US_NAME.to_string(),
            them: DEFAULT_THEM_NAME.to_string(),
        }
    }
}

/// A finished match. Everything in here was copied at archive time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub score: Score,
    pub shot_log: ShotLog,
    /// Absent on records written before names were archived with the match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_names: Option<TeamNames>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSession {
    pub id: Uuid,
    pub date: NaiveDate,
    pub start_time: DateTime<Utc>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    pub shot_log: ShotLog,
}

/// The whole persisted record. Loaded once at startup and rewritten after every
/// committed change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AppData {
    #[serde(default)]
    pub shot_log: ShotLog,
    #[serde(flatten)]
    pub engine: ScoreEngine,
    #[serde(default)]
    pub team_names: TeamNames,
    #[serde(default)]
    pub matches: MatchArchive,
    #[serde(default)]
    pub training_sessions: TrainingArchive,
    #[serde(flatten)]
    pub training: TrainingLog,
}

#[derive(Debug, Deserialize)]
pub struct ServeRequest {
    pub side: Side,
}

#[derive(Debug, Deserialize, Default)]
pub struct TrainingSaveRequest {
    #[serde(default)]
    pub duration_minutes: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub struct SetTally {
    pub us: u32,
    pub them: u32,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct LogSummary {
    pub total: usize,
    pub winners: u32,
    pub errors: u32,
    pub by_shot_type: BTreeMap<Bucket<ShotType>, OutcomeCounts>,
    pub by_hand: BTreeMap<Bucket<Hand>, OutcomeCounts>,
}

#[derive(Debug, Serialize)]
pub struct MatchReview {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub team_names: TeamNames,
    pub score: Score,
    pub sets_won: SetTally,
    pub summary: LogSummary,
}

/// One saved session as listed under its day. `elapsed_minutes` is the clock
/// time between start and end, next to whatever duration was entered by hand.
#[derive(Debug, Serialize)]
pub struct TrainingSessionReview {
    pub id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub duration_minutes: Option<u32>,
    pub elapsed_minutes: Option<i64>,
    pub shots: usize,
    pub summary: LogSummary,
}

#[derive(Debug, Serialize)]
pub struct TrainingDayReview {
    pub date: NaiveDate,
    pub sessions: Vec<TrainingSessionReview>,
    pub total_minutes: i64,
    pub summary: LogSummary,
    pub winners_ranked: Vec<(Bucket<ShotType>, u32)>,
    pub errors_ranked: Vec<(Bucket<ShotType>, u32)>,
}
