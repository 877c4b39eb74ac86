use crate::archive::{session_minutes, total_minutes, TrainingArchive};
use crate::models::{
    Hand, LogSummary, Match, MatchReview, Outcome, Score, SetTally, ShotEvent, ShotType, TeamNames,
    TrainingDayReview, TrainingSession, TrainingSessionReview,
};
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// Label used for events recorded without a tag.
pub const UNDEFINED_LABEL: &str = "undefined";

pub trait Tag: Copy + Ord {
    fn label(self) -> &'static str;
}

impl Tag for ShotType {
    fn label(self) -> &'static str {
        self.as_str()
    }
}

impl Tag for Hand {
    fn label(self) -> &'static str {
        self.as_str()
    }
}

/// Grouping key for tallies. Untagged events land in `Undefined` instead of
/// being dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Bucket<T> {
    Tagged(T),
    Undefined,
}

impl<T> From<Option<T>> for Bucket<T> {
    fn from(tag: Option<T>) -> Self {
        tag.map_or(Bucket::Undefined, Bucket::Tagged)
    }
}

impl<T: Tag> Bucket<T> {
    pub fn label(self) -> &'static str {
        match self {
            Bucket::Tagged(tag) => tag.label(),
            Bucket::Undefined => UNDEFINED_LABEL,
        }
    }
}

impl<T: Tag> Serialize for Bucket<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub struct OutcomeCounts {
    pub winners: u32,
    pub errors: u32,
}

impl OutcomeCounts {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Winner => self.winners = self.winners.saturating_add(1),
            Outcome::Error => self.errors = self.errors.saturating_add(1),
        }
    }
}

fn tally_by<'a, T, I, F>(events: I, key: F) -> BTreeMap<Bucket<T>, OutcomeCounts>
where
    T: Tag,
    I: IntoIterator<Item = &'a ShotEvent>,
    F: Fn(&ShotEvent) -> Option<T>,
{
    let mut counts: BTreeMap<Bucket<T>, OutcomeCounts> = BTreeMap::new();
    for event in events {
        counts
            .entry(Bucket::from(key(event)))
            .or_default()
            .record(event.outcome);
    }
    counts
}

pub fn aggregate<'a, I>(events: I) -> BTreeMap<Bucket<ShotType>, OutcomeCounts>
where
    I: IntoIterator<Item = &'a ShotEvent>,
{
    tally_by(events, |event| event.shot_type)
}

pub fn aggregate_by_hand<'a, I>(events: I) -> BTreeMap<Bucket<Hand>, OutcomeCounts>
where
    I: IntoIterator<Item = &'a ShotEvent>,
{
    tally_by(events, |event| event.hand)
}

pub fn summarize<'a, I>(events: I) -> LogSummary
where
    I: IntoIterator<Item = &'a ShotEvent>,
    I::IntoIter: Clone,
{
    let events = events.into_iter();
    let by_shot_type = aggregate(events.clone());
    let by_hand = aggregate_by_hand(events.clone());

    let mut overall = OutcomeCounts::default();
    let mut total = 0usize;
    for event in events {
        overall.record(event.outcome);
        total += 1;
    }

    LogSummary {
        total,
        winners: overall.winners,
        errors: overall.errors,
        by_shot_type,
        by_hand,
    }
}

/// Per-bucket counts for one outcome, largest first. Buckets with no hits for
/// that outcome are left out; ties keep key order.
pub fn ranked<T: Tag>(
    counts: &BTreeMap<Bucket<T>, OutcomeCounts>,
    outcome: Outcome,
) -> Vec<(Bucket<T>, u32)> {
    let mut ranked: Vec<(Bucket<T>, u32)> = counts
        .iter()
        .map(|(bucket, counts)| match outcome {
            Outcome::Winner => (*bucket, counts.winners),
            Outcome::Error => (*bucket, counts.errors),
        })
        .filter(|(_, count)| *count > 0)
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}

/// Sets won by each side. A match stopped mid-set also credits the set in
/// progress to a side on more than six games, or on six with the other side
/// below five.
pub fn sets_won(score: &Score) -> SetTally {
    let mut tally = SetTally::default();
    for set in &score.sets {
        if set.us > set.them {
            tally.us += 1;
        } else if set.them > set.us {
            tally.them += 1;
        }
    }

    let current = score.current_set;
    if current.us > 6 || (current.us == 6 && current.them < 5) {
        tally.us += 1;
    }
    if current.them > 6 || (current.them == 6 && current.us < 5) {
        tally.them += 1;
    }
    tally
}

/// `live_names` stands in for archived matches that carry no names of their own.
pub fn review_match(entry: &Match, live_names: &TeamNames) -> MatchReview {
    MatchReview {
        id: entry.id,
        timestamp: entry.timestamp,
        team_names: entry.team_names.clone().unwrap_or_else(|| live_names.clone()),
        score: entry.score.clone(),
        sets_won: sets_won(&entry.score),
        summary: summarize(entry.shot_log.iter()),
    }
}

pub fn review_training_session(session: &TrainingSession) -> TrainingSessionReview {
    TrainingSessionReview {
        id: session.id,
        start_time: session.start_time,
        end_time: session.end_time,
        duration_minutes: session.duration_minutes,
        elapsed_minutes: session_minutes(session),
        shots: session.shot_log.len(),
        summary: summarize(session.shot_log.iter()),
    }
}

pub fn review_training_days(
    archive: &TrainingArchive,
    now: DateTime<Utc>,
) -> Vec<TrainingDayReview> {
    archive
        .by_date()
        .into_iter()
        .map(|(date, sessions)| {
            let summary = summarize(sessions.iter().flat_map(|session| session.shot_log.iter()));
            TrainingDayReview {
                date,
                sessions: sessions.iter().copied().map(review_training_session).collect(),
                total_minutes: total_minutes(&sessions, now),
                winners_ranked: ranked(&summary.by_shot_type, Outcome::Winner),
                errors_ranked: ranked(&summary.by_shot_type, Outcome::Error),
                summary,
            }
        })
        .collect()
}
