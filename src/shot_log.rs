use crate::models::ShotEvent;
use serde::{Deserialize, Serialize};

/// Ordered shot events. Entries are only ever pushed on the end or popped off it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct ShotLog(Vec<ShotEvent>);

impl ShotLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, event: ShotEvent) {
        self.0.push(event);
    }

    /// Drops the most recent event. Does nothing on an empty log.
    pub fn undo_last(&mut self) -> Option<ShotEvent> {
        self.0.pop()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Empties the log and returns what it held.
    pub fn take(&mut self) -> ShotLog {
        std::mem::take(self)
    }

    pub fn events(&self) -> &[ShotEvent] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ShotEvent> {
        self.0.iter()
    }
}

impl From<Vec<ShotEvent>> for ShotLog {
    fn from(events: Vec<ShotEvent>) -> Self {
        Self(events)
    }
}

impl<'a> IntoIterator for &'a ShotLog {
    type Item = &'a ShotEvent;
    type IntoIter = std::slice::Iter<'a, ShotEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Hand, Outcome, Position, ShotType};

    fn shot(x: f64) -> ShotEvent {
        ShotEvent::new(Position { x, y: 0.5 }, Outcome::Winner)
            .with_shot_type(ShotType::Lob)
            .with_hand(Hand::Forehand)
    }

    #[test]
    fn append_keeps_order() {
        let mut log = ShotLog::new();
        log.append(shot(1.0));
        log.append(shot(2.0));
        log.append(shot(3.0));

        let xs: Vec<f64> = log.iter().map(|event| event.position.x).collect();
        assert_eq!(xs, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn undo_removes_only_the_last_event() {
        let mut log = ShotLog::new();
        log.append(shot(1.0));
        log.append(shot(2.0));

        assert_eq!(log.undo_last(), Some(shot(2.0)));
        assert_eq!(log.events(), &[shot(1.0)]);
    }

    #[test]
    fn undo_on_empty_log_is_a_no_op() {
        let mut log = ShotLog::new();
        assert_eq!(log.undo_last(), None);
        assert_eq!(log.undo_last(), None);
        assert!(log.is_empty());
    }

    #[test]
    fn take_leaves_an_empty_log() {
        let mut log = ShotLog::new();
        log.append(shot(1.0));
        let taken = log.take();

        assert_eq!(taken.len(), 1);
        assert!(log.is_empty());
    }

    #[test]
    fn serializes_as_a_plain_array() {
        let mut log = ShotLog::new();
        log.append(ShotEvent::new(Position { x: 0.25, y: 0.75 }, Outcome::Error));
        let json = serde_json::to_value(&log).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{ "position": { "x": 0.25, "y": 0.75 }, "outcome": "error" }])
        );
    }
}
