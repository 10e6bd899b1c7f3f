use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::{Difficulty, GameMode, PitchType, Side};

/// Time resource for tracking simulation time
#[derive(Debug, Clone, Copy)]
pub struct Time {
    pub dt: f32,  // Delta time for this step
    pub now: f32, // Total simulated time
}

impl Time {
    pub fn new(dt: f32, now: f32) -> Self {
        Self { dt, now }
    }
}

impl Default for Time {
    fn default() -> Self {
        Self {
            dt: crate::Params::FIXED_DT,
            now: 0.0,
        }
    }
}

/// Game score tracking
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub left: u8,
    pub right: u8,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, side: Side) {
        match side {
            Side::Left => self.left = self.left.saturating_add(1),
            Side::Right => self.right = self.right.saturating_add(1),
        }
    }

    pub fn get(&self, side: Side) -> u8 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn has_winner(&self, win_score: u8) -> Option<Side> {
        if self.left >= win_score {
            Some(Side::Left)
        } else if self.right >= win_score {
            Some(Side::Right)
        } else {
            None
        }
    }
}

/// Rally bookkeeping for the stats layer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RallyStats {
    pub current: u32,
    pub longest: u32,
    pub total_hits: u32,
}

impl RallyStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a paddle return, returning the rally length so far
    pub fn hit(&mut self) -> u32 {
        self.current += 1;
        self.total_hits += 1;
        self.longest = self.longest.max(self.current);
        self.current
    }

    pub fn end_point(&mut self) {
        self.current = 0;
    }
}

/// Seedable random source shared by serves, pitches and AI error
pub struct GameRng(pub rand::rngs::StdRng);

impl GameRng {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::seed_from_u64(seed))
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(12345)
    }
}

/// Final result handed to the stats/achievement layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSummary {
    pub winner: Side,
    pub score: Score,
    pub longest_rally: u32,
    pub total_hits: u32,
    pub mode: GameMode,
    pub difficulty: Difficulty,
    pub quest_id: Option<String>,
    /// Simulated seconds from the opening countdown to the winning point
    pub duration_secs: f32,
}

/// Something the presentation layer reacts to (sound, particles, stats)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameEvent {
    WallHit {
        pos: Vec2,
    },
    PaddleHit {
        side: Side,
        impact: Vec2,
        speed: f32,
        rally: u32,
    },
    Score {
        scorer: Side,
        left: u8,
        right: u8,
    },
    PitchThrown {
        pitch: PitchType,
        server: Side,
    },
    MatchEnd(MatchSummary),
}

/// Events that occurred during this frame
#[derive(Debug, Clone, Default)]
pub struct Events {
    pub list: Vec<GameEvent>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.list.clear();
    }

    pub fn push(&mut self, event: GameEvent) {
        self.list.push(event);
    }

    pub fn ball_hit_wall(&self) -> bool {
        self.list
            .iter()
            .any(|e| matches!(e, GameEvent::WallHit { .. }))
    }

    pub fn ball_hit_paddle(&self) -> Option<Side> {
        self.list.iter().find_map(|e| match e {
            GameEvent::PaddleHit { side, .. } => Some(*side),
            _ => None,
        })
    }

    pub fn scored(&self) -> Option<Side> {
        self.list.iter().find_map(|e| match e {
            GameEvent::Score { scorer, .. } => Some(*scorer),
            _ => None,
        })
    }
}

/// Pending human inputs for the next step
#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    pub inputs: Vec<(Side, crate::Direction)>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.inputs.clear();
    }

    pub fn push_input(&mut self, side: Side, dir: crate::Direction) {
        self.inputs.push((side, dir));
    }
}

/// Recent ball positions for the renderer's trail effect. The effect style
/// lives on the ball (`Ball::trail`).
#[derive(Debug, Clone)]
pub struct Trail {
    points: VecDeque<Vec2>,
    capacity: usize,
}

impl Trail {
    pub fn new(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, pos: Vec2) {
        if self.capacity == 0 {
            return;
        }
        if self.points.len() == self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(pos);
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Oldest first
    pub fn points(&self) -> impl Iterator<Item = &Vec2> {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_increment() {
        let mut score = Score::new();
        score.increment(Side::Left);
        score.increment(Side::Left);
        score.increment(Side::Right);
        assert_eq!(score.left, 2);
        assert_eq!(score.right, 1);
        assert_eq!(score.get(Side::Left), 2);
    }

    #[test]
    fn test_score_has_winner() {
        let mut score = Score::new();
        for _ in 0..4 {
            score.increment(Side::Right);
        }
        assert_eq!(score.has_winner(5), None, "No winner below threshold");
        score.increment(Side::Right);
        assert_eq!(score.has_winner(5), Some(Side::Right));
    }

    #[test]
    fn test_rally_stats() {
        let mut rally = RallyStats::new();
        assert_eq!(rally.hit(), 1);
        assert_eq!(rally.hit(), 2);
        assert_eq!(rally.hit(), 3);
        rally.end_point();
        assert_eq!(rally.hit(), 1);
        assert_eq!(rally.longest, 3);
        assert_eq!(rally.total_hits, 4);
    }

    #[test]
    fn test_events_queries_and_clear() {
        let mut events = Events::new();
        events.push(GameEvent::WallHit { pos: Vec2::ZERO });
        events.push(GameEvent::Score {
            scorer: Side::Left,
            left: 1,
            right: 0,
        });

        assert!(events.ball_hit_wall());
        assert_eq!(events.scored(), Some(Side::Left));
        assert_eq!(events.ball_hit_paddle(), None);

        events.clear();
        assert!(!events.ball_hit_wall());
        assert_eq!(events.scored(), None);
    }

    #[test]
    fn test_event_json_is_tagged() {
        let event = GameEvent::Score {
            scorer: Side::Right,
            left: 0,
            right: 1,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "score");
        assert_eq!(json["scorer"], "right");
    }

    #[test]
    fn test_input_queue_push_input() {
        let mut queue = InputQueue::new();
        queue.push_input(Side::Left, crate::Direction::Up);
        queue.push_input(Side::Right, crate::Direction::Down);
        assert_eq!(queue.inputs.len(), 2);
        queue.clear();
        assert!(queue.inputs.is_empty());
    }

    #[test]
    fn test_trail_is_bounded() {
        let mut trail = Trail::new(3);
        for i in 0..5 {
            trail.push(Vec2::new(i as f32, 0.0));
        }
        assert_eq!(trail.len(), 3);
        let xs: Vec<f32> = trail.points().map(|p| p.x).collect();
        assert_eq!(xs, vec![2.0, 3.0, 4.0]);
        trail.clear();
        assert!(trail.is_empty());
    }
}
