use crate::models::{Match, Score, ShotEvent, TeamNames, TrainingSession};
use crate::shot_log::ShotLog;
use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Finished matches, most recent first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct MatchArchive(Vec<Match>);

impl MatchArchive {
    /// Archives a copy of the given score and log. The caller owns clearing the
    /// live state; [`crate::Tracker::finish_match`] does both under one borrow.
    pub fn finish(
        &mut self,
        score: Score,
        shot_log: ShotLog,
        team_names: TeamNames,
        now: DateTime<Local>,
    ) -> &Match {
        let entry = Match {
            id: Uuid::new_v4(),
            timestamp: now.with_timezone(&Utc),
            score,
            shot_log,
            team_names: Some(team_names),
        };
        self.0.insert(0, entry);
        &self.0[0]
    }

    pub fn delete(&mut self, id: Uuid) -> bool {
        let before = self.0.len();
        self.0.retain(|entry| entry.id != id);
        self.0.len() != before
    }

    pub fn entries(&self) -> &[Match] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The practice log being recorded right now and when it was started.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingLog {
    #[serde(rename = "training_log", default)]
    pub shots: ShotLog,
    #[serde(rename = "training_start_time", default = "Utc::now")]
    pub start_time: DateTime<Utc>,
}

impl Default for TrainingLog {
    fn default() -> Self {
        Self::started_at(Utc::now())
    }
}

impl TrainingLog {
    pub fn started_at(start_time: DateTime<Utc>) -> Self {
        Self {
            shots: ShotLog::new(),
            start_time,
        }
    }

    pub fn append(&mut self, event: ShotEvent) {
        self.shots.append(event);
    }

    pub fn undo_last(&mut self) -> Option<ShotEvent> {
        self.shots.undo_last()
    }

    /// Throws the recorded shots away and starts a new session at `now`.
    pub fn clear(&mut self, now: DateTime<Local>) {
        self.shots.clear();
        self.start_time = now.with_timezone(&Utc);
    }

    /// Closes the active session. Returns `None` when nothing was recorded; the
    /// log is left untouched in that case.
    pub fn close(
        &mut self,
        duration_minutes: Option<u32>,
        now: DateTime<Local>,
    ) -> Option<TrainingSession> {
        if self.shots.is_empty() {
            return None;
        }

        let session = TrainingSession {
            id: Uuid::new_v4(),
            date: now.date_naive(),
            start_time: self.start_time,
            end_time: Some(now.with_timezone(&Utc)),
            duration_minutes,
            shot_log: self.shots.take(),
        };
        self.start_time = now.with_timezone(&Utc);
        Some(session)
    }
}

/// Saved practice sessions, most recent first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct TrainingArchive(Vec<TrainingSession>);

impl TrainingArchive {
    pub fn push_front(&mut self, session: TrainingSession) -> &TrainingSession {
        self.0.insert(0, session);
        &self.0[0]
    }

    pub fn delete(&mut self, id: Uuid) -> bool {
        let before = self.0.len();
        self.0.retain(|session| session.id != id);
        self.0.len() != before
    }

    pub fn entries(&self) -> &[TrainingSession] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sessions bucketed by calendar day, newest day first. Within a day the
    /// archive order is kept.
    pub fn by_date(&self) -> Vec<(NaiveDate, Vec<&TrainingSession>)> {
        let mut days: BTreeMap<NaiveDate, Vec<&TrainingSession>> = BTreeMap::new();
        for session in &self.0 {
            days.entry(session.date).or_default().push(session);
        }
        days.into_iter().rev().collect()
    }
}

/// Elapsed whole minutes of a closed session, `None` while it has no end.
pub fn session_minutes(session: &TrainingSession) -> Option<i64> {
    session
        .end_time
        .map(|end| (end - session.start_time).num_minutes())
}

/// Minutes spent across `sessions`. A non-zero manual duration wins over the
/// clock; a session with no end is measured up to `now`.
pub fn total_minutes(sessions: &[&TrainingSession], now: DateTime<Utc>) -> i64 {
    sessions
        .iter()
        .map(|session| match session.duration_minutes {
            Some(minutes) if minutes > 0 => i64::from(minutes),
            _ => (session.end_time.unwrap_or(now) - session.start_time).num_minutes(),
        })
        .sum()
}
