use crate::models::{AppData, Match, ShotEvent, Side, TeamNames, TrainingSession};
use crate::score::PointResult;
use chrono::{DateTime, Local};
use tracing::{debug, info};
use uuid::Uuid;

/// Called after every committed change with the full state.
pub trait CommitHook: Send {
    fn on_commit(&mut self, data: &AppData);
}

/// Owns the live match, the practice log and both archives. Every operation
/// runs to completion on `&mut self` and then notifies the hook, if any.
pub struct Tracker {
    data: AppData,
    hook: Option<Box<dyn CommitHook>>,
}

impl Default for Tracker {
    fn default() -> Self {
        Self::new(AppData::default())
    }
}

impl Tracker {
    pub fn new(data: AppData) -> Self {
        Self { data, hook: None }
    }

    pub fn with_hook(mut self, hook: impl CommitHook + 'static) -> Self {
        self.hook = Some(Box::new(hook));
        self
    }

    /// Removes the hook so nothing is notified after this point. Dropping the
    /// returned hook lets a background writer finish its last write.
    pub fn detach_hook(&mut self) -> Option<Box<dyn CommitHook>> {
        self.hook.take()
    }

    pub fn data(&self) -> &AppData {
        &self.data
    }

    fn commit(&mut self) {
        if let Some(hook) = self.hook.as_mut() {
            hook.on_commit(&self.data);
        }
    }

    pub fn add_shot_event(&mut self, event: ShotEvent) {
        self.data.shot_log.append(event);
        debug!(total = self.data.shot_log.len(), "shot recorded");
        self.commit();
    }

    pub fn undo_last_shot_event(&mut self) {
        self.data.shot_log.undo_last();
        self.commit();
    }

    pub fn credit_point(&mut self, side: Side) -> PointResult {
        let result = self.data.engine.credit_point(side);
        self.commit();
        result
    }

    pub fn revert_point(&mut self, side: Side) {
        self.data.engine.revert_point(side);
        self.commit();
    }

    pub fn flip_serve(&mut self) {
        self.data.engine.flip_serve();
        self.commit();
    }

    pub fn set_serve(&mut self, side: Side) {
        self.data.engine.set_serve(side);
        self.commit();
    }

    pub fn set_team_names(&mut self, names: TeamNames) {
        self.data.team_names = names;
        self.commit();
    }

    pub fn finish_match(&mut self) -> &Match {
        self.finish_match_at(Local::now())
    }

    /// Archives the live score and shot log and starts a fresh match, all in one
    /// step.
    pub fn finish_match_at(&mut self, now: DateTime<Local>) -> &Match {
        let score = self.data.engine.take_score();
        let shot_log = self.data.shot_log.take();
        let team_names = self.data.team_names.clone();
        let shots = shot_log.len();
        let id = self.data.matches.finish(score, shot_log, team_names, now).id;
        info!(%id, shots, "match archived");
        self.commit();
        &self.data.matches.entries()[0]
    }

    /// Drops the live match without archiving it.
    pub fn reset_match(&mut self) {
        self.data.engine.reset();
        self.data.shot_log.clear();
        self.commit();
    }

    pub fn delete_match(&mut self, id: Uuid) -> bool {
        let removed = self.data.matches.delete(id);
        if removed {
            info!(%id, "match deleted");
        }
        self.commit();
        removed
    }

    pub fn add_training_shot_event(&mut self, event: ShotEvent) {
        self.data.training.append(event);
        debug!(total = self.data.training.shots.len(), "training shot recorded");
        self.commit();
    }

    pub fn undo_last_training_shot_event(&mut self) {
        self.data.training.undo_last();
        self.commit();
    }

    pub fn save_training_session(
        &mut self,
        duration_minutes: Option<u32>,
    ) -> Option<&TrainingSession> {
        self.save_training_session_at(duration_minutes, Local::now())
    }

    /// Requires at least one recorded shot. With an empty log nothing is saved,
    /// nothing is committed, and `None` comes back.
    pub fn save_training_session_at(
        &mut self,
        duration_minutes: Option<u32>,
        now: DateTime<Local>,
    ) -> Option<&TrainingSession> {
        let session = self.data.training.close(duration_minutes, now)?;
        info!(id = %session.id, shots = session.shot_log.len(), "training session saved");
        self.data.training_sessions.push_front(session);
        self.commit();
        self.data.training_sessions.entries().first()
    }

    pub fn clear_training_session(&mut self) {
        self.clear_training_session_at(Local::now());
    }

    pub fn clear_training_session_at(&mut self, now: DateTime<Local>) {
        self.data.training.clear(now);
        self.commit();
    }

    pub fn delete_training_session(&mut self, id: Uuid) -> bool {
        let removed = self.data.training_sessions.delete(id);
        if removed {
            info!(%id, "training session deleted");
        }
        self.commit();
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Outcome, PointLabel, Position, Score, SetScore, ShotType};
    use chrono::{TimeZone, Utc};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Recorder(Arc<Mutex<Vec<AppData>>>);

    impl CommitHook for Recorder {
        fn on_commit(&mut self, data: &AppData) {
            self.0.lock().unwrap().push(data.clone());
        }
    }

    impl Recorder {
        fn count(&self) -> usize {
            self.0.lock().unwrap().len()
        }

        fn last(&self) -> AppData {
            self.0.lock().unwrap().last().cloned().unwrap()
        }
    }

    fn shot(shot_type: ShotType) -> ShotEvent {
        ShotEvent::new(Position { x: 0.3, y: 0.6 }, Outcome::Winner).with_shot_type(shot_type)
    }

    fn noon() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn every_operation_notifies_the_hook() {
        let recorder = Recorder::default();
        let mut tracker = Tracker::default().with_hook(recorder.clone());

        tracker.add_shot_event(shot(ShotType::Volley));
        tracker.credit_point(Side::Us);
        tracker.revert_point(Side::Us);
        tracker.undo_last_shot_event();
        tracker.flip_serve();
        tracker.set_serve(Side::Us);
        tracker.set_team_names(TeamNames::default());
        tracker.add_training_shot_event(shot(ShotType::Lob));
        tracker.undo_last_training_shot_event();
        tracker.clear_training_session();
        tracker.reset_match();
        tracker.finish_match();
        tracker.delete_match(Uuid::new_v4());
        tracker.delete_training_session(Uuid::new_v4());

        assert_eq!(recorder.count(), 14);
        assert_eq!(&recorder.last(), tracker.data());
    }

    #[test]
    fn finish_match_archives_and_clears_in_one_step() {
        let recorder = Recorder::default();
        let mut tracker = Tracker::default().with_hook(recorder.clone());
        tracker.set_team_names(TeamNames {
            us: "Local".into(),
            them: "Visitante".into(),
        });
        tracker.add_shot_event(shot(ShotType::Smash));
        tracker.add_shot_event(shot(ShotType::Serve));
        tracker.credit_point(Side::Us);
        tracker.credit_point(Side::Them);

        let score_before = tracker.data().engine.score.clone();
        let log_before = tracker.data().shot_log.clone();

        let archived = tracker.finish_match_at(noon()).clone();
        assert_eq!(archived.score, score_before);
        assert_eq!(archived.shot_log, log_before);
        assert_eq!(archived.timestamp, noon().with_timezone(&Utc));
        assert_eq!(archived.team_names.as_ref().map(|names| names.us.as_str()), Some("Local"));

        let data = tracker.data();
        assert_eq!(data.matches.entries()[0], archived);
        assert_eq!(data.engine.score, Score::default());
        assert!(data.shot_log.is_empty());

        let committed = recorder.last();
        assert_eq!(committed.matches.len(), 1);
        assert!(committed.shot_log.is_empty());
    }

    #[test]
    fn archived_match_is_unaffected_by_later_play() {
        let mut tracker = Tracker::default();
        tracker.add_shot_event(shot(ShotType::Volley));
        tracker.credit_point(Side::Us);
        let id = tracker.finish_match().id;

        tracker.add_shot_event(shot(ShotType::Lob));
        tracker.credit_point(Side::Them);
        tracker.set_team_names(TeamNames {
            us: "Renamed".into(),
            them: "Too".into(),
        });

        let archived = tracker
            .data()
            .matches
            .entries()
            .iter()
            .find(|entry| entry.id == id)
            .unwrap();
        assert_eq!(archived.shot_log.len(), 1);
        assert_eq!(archived.score.points.us, PointLabel::Fifteen);
        assert_eq!(archived.score.points.them, PointLabel::Love);
        assert_eq!(archived.team_names, Some(TeamNames::default()));
    }

    #[test]
    fn reset_match_discards_without_archiving() {
        let mut tracker = Tracker::default();
        tracker.add_shot_event(shot(ShotType::Volley));
        tracker.credit_point(Side::Them);
        tracker.reset_match();

        assert!(tracker.data().matches.is_empty());
        assert!(tracker.data().shot_log.is_empty());
        assert_eq!(tracker.data().engine.score, Score::default());
    }

    #[test]
    fn score_and_shot_log_move_independently() {
        let mut tracker = Tracker::default();
        tracker.credit_point(Side::Us);
        assert!(tracker.data().shot_log.is_empty());

        tracker.add_shot_event(shot(ShotType::Return));
        tracker.undo_last_shot_event();
        tracker.undo_last_shot_event();
        assert!(tracker.data().shot_log.is_empty());
        assert_eq!(tracker.data().engine.score.points.us, PointLabel::Fifteen);
    }

    #[test]
    fn save_training_session_keeps_match_log_apart() {
        let mut tracker = Tracker::default();
        tracker.add_shot_event(shot(ShotType::Serve));
        for _ in 0..5 {
            tracker.add_training_shot_event(shot(ShotType::Bandeja));
        }

        let session = tracker.save_training_session_at(Some(30), noon()).cloned().unwrap();
        assert_eq!(session.shot_log.len(), 5);
        assert!(session.shot_log.iter().all(|event| event.shot_type == Some(ShotType::Bandeja)));
        assert_eq!(session.duration_minutes, Some(30));

        let data = tracker.data();
        assert!(data.training.shots.is_empty());
        assert_eq!(data.training.start_time, noon().with_timezone(&Utc));
        assert_eq!(data.training_sessions.entries()[0], session);
        assert_eq!(data.shot_log.len(), 1);
    }

    #[test]
    fn save_with_empty_training_log_does_nothing() {
        let recorder = Recorder::default();
        let mut tracker = Tracker::default().with_hook(recorder.clone());

        assert!(tracker.save_training_session(None).is_none());
        assert!(tracker.data().training_sessions.is_empty());
        assert_eq!(recorder.count(), 0);
    }

    #[test]
    fn detached_hook_sees_no_further_commits() {
        let recorder = Recorder::default();
        let mut tracker = Tracker::default().with_hook(recorder.clone());
        tracker.credit_point(Side::Us);

        assert!(tracker.detach_hook().is_some());
        tracker.credit_point(Side::Them);

        assert_eq!(recorder.count(), 1);
        assert!(tracker.detach_hook().is_none());
    }

    #[test]
    fn deletes_remove_by_identity() {
        let mut tracker = Tracker::default();
        let first = tracker.finish_match().id;
        let second = tracker.finish_match().id;
        tracker.add_training_shot_event(shot(ShotType::Lob));
        let session = tracker.save_training_session(None).unwrap().id;

        assert!(tracker.delete_match(first));
        assert!(!tracker.delete_match(first));
        assert_eq!(tracker.data().matches.entries()[0].id, second);
        assert_eq!(tracker.data().matches.len(), 1);

        assert!(tracker.delete_training_session(session));
        assert!(tracker.data().training_sessions.is_empty());
    }

    #[test]
    fn game_win_through_tracker_closes_set() {
        let mut tracker = Tracker::default();
        for _ in 0..5 {
            for _ in 0..4 {
                tracker.credit_point(Side::Us);
            }
            for _ in 0..4 {
                tracker.credit_point(Side::Them);
            }
        }
        assert_eq!(tracker.data().engine.score.current_set, SetScore { us: 5, them: 5 });

        for _ in 0..4 {
            tracker.credit_point(Side::Us);
        }
        for _ in 0..3 {
            tracker.credit_point(Side::Us);
        }
        assert_eq!(tracker.credit_point(Side::Us), PointResult::Set(SetScore { us: 7, them: 5 }));
        assert_eq!(tracker.data().engine.score.sets, vec![SetScore { us: 7, them: 5 }]);
    }
}
