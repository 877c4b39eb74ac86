use crate::models::{GameScore, Score, SetScore, Side};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Games needed to take a set, with a two game margin. There is no tiebreak:
/// a set at 6-6 runs on until one side leads by two.
pub const GAMES_PER_SET: u32 = 6;
pub const SET_MARGIN: u32 = 2;

/// What a single credited point did to the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointResult {
    Point,
    Game,
    Set(SetScore),
}

/// Golden point scoring plus serve rotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ScoreEngine {
    #[serde(default)]
    pub score: Score,
    #[serde(default)]
    pub serving_side: Side,
}

impl ScoreEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    pub fn serving_side(&self) -> Side {
        self.serving_side
    }

    pub fn credit_point(&mut self, side: Side) -> PointResult {
        let points = self.score.points.get_mut(side);
        if let Some(next) = points.next() {
            *points = next;
            debug!(%side, points = next.as_str(), "point credited");
            return PointResult::Point;
        }

        self.score.points = GameScore::default();
        *self.score.current_set.get_mut(side) += 1;
        self.flip_serve();

        let won = self.score.current_set.get(side);
        let lost = self.score.current_set.get(side.opponent());
        if won >= GAMES_PER_SET && won >= lost + SET_MARGIN {
            let closed = self.score.current_set;
            self.score.sets.push(closed);
            self.score.current_set = SetScore::default();
            debug!(%side, us = closed.us, them = closed.them, "set closed");
            return PointResult::Set(closed);
        }

        let current = self.score.current_set;
        debug!(%side, us = current.us, them = current.them, "game won");
        PointResult::Game
    }

    /// Steps one side back down the ladder. Only the current game is touched: a
    /// point that already closed a game or set stays counted.
    pub fn revert_point(&mut self, side: Side) {
        let points = self.score.points.get_mut(side);
        if let Some(prev) = points.prev() {
            *points = prev;
        }
    }

    pub fn flip_serve(&mut self) {
        self.serving_side = self.serving_side.opponent();
    }

    pub fn set_serve(&mut self, side: Side) {
        self.serving_side = side;
    }

    /// Clears the score. Who serves next is left alone.
    pub fn reset(&mut self) {
        self.score = Score::default();
    }

    /// Hands out the current score and leaves a fresh one in its place.
    pub fn take_score(&mut self) -> Score {
        std::mem::take(&mut self.score)
    }
}
