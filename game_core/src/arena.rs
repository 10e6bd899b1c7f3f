//! Match driver.
//!
//! [`Arena`] owns everything a match needs (ECS world, resources, phase and
//! frame clock) and is advanced by the host's animation loop through
//! [`Arena::frame`]. Time only ever comes in from the caller.

use hecs::World;
use serde::{Deserialize, Serialize};

use crate::ai::AiController;
use crate::physics::{apply_paddle_modifiers, create_ball, create_paddle};
use crate::systems::{ai_paddle_count, current_ball, serve};
use crate::{
    step, ArenaTheme, Ball, Config, Difficulty, Direction, Events, GameEvent, GameMode, GameRng,
    MatchSummary, InputQueue, Paddle, PaddleSkin, Params, QuestModifiers, RallyStats, Score, Side,
    Time, Trail, TrailType,
};

/// Frame-rate cap for the render loop.
///
/// Frames arriving sooner than `MIN_FRAME_MS` after the last accepted one are
/// skipped. Accepted frames advance by the measured gap (capped at `MAX_DT`);
/// there is no catch-up.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds to simulate for a frame stamped `now_ms`, or `None` to skip it
    pub fn advance(&mut self, now_ms: f64) -> Option<f32> {
        let Some(last) = self.last_ms else {
            self.last_ms = Some(now_ms);
            return None;
        };

        let elapsed = now_ms - last;
        if elapsed < Params::MIN_FRAME_MS {
            return None;
        }
        self.last_ms = Some(now_ms);
        Some(((elapsed / 1000.0) as f32).min(Params::MAX_DT))
    }

    /// Forget the last timestamp so the next frame starts a fresh delta
    pub fn rebase(&mut self) {
        self.last_ms = None;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "camelCase")]
pub enum MatchPhase {
    /// Ball held at center until the timer runs out
    Countdown { remaining: f32 },
    Playing,
    Paused,
    /// Terminal: the loop stops requesting frames
    Victory { winner: Side },
}

impl MatchPhase {
    pub fn name(&self) -> &'static str {
        match self {
            MatchPhase::Countdown { .. } => "countdown",
            MatchPhase::Playing => "playing",
            MatchPhase::Paused => "paused",
            MatchPhase::Victory { .. } => "victory",
        }
    }
}

/// Everything the host page decides before a match starts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MatchSetup {
    pub mode: GameMode,
    pub difficulty: Difficulty,
    pub quest_id: Option<String>,
    pub modifiers: QuestModifiers,
    pub theme: ArenaTheme,
    pub left_skin: PaddleSkin,
    pub right_skin: PaddleSkin,
    pub trail: TrailType,
}

/// What one call to [`Arena::frame`] did
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameOutcome {
    /// False when the frame was skipped or the simulation is frozen
    pub advanced: bool,
    pub dt: f32,
    pub phase: MatchPhase,
}

/// Simulation context for one match
pub struct Arena {
    pub world: World,
    pub time: Time,
    pub config: Config,
    pub setup: MatchSetup,
    pub score: Score,
    pub rally: RallyStats,
    pub events: Events,
    pub input_queue: InputQueue,
    pub rng: GameRng,
    pub trail: Trail,
    pub clock: FrameClock,
    pub phase: MatchPhase,
    resume_phase: Option<MatchPhase>,
}

impl Arena {
    pub fn new(config: Config, mut setup: MatchSetup, seed: u64) -> Self {
        setup.modifiers = setup.modifiers.sanitized();
        let trail = Trail::new(Params::TRAIL_LENGTH);

        let mut arena = Self {
            world: World::new(),
            time: Time::new(0.0, 0.0),
            config,
            setup,
            score: Score::new(),
            rally: RallyStats::new(),
            events: Events::new(),
            input_queue: InputQueue::new(),
            rng: GameRng::new(seed),
            trail,
            clock: FrameClock::new(),
            phase: MatchPhase::Countdown {
                remaining: Params::COUNTDOWN_SECS,
            },
            resume_phase: None,
        };
        arena.populate();
        arena
    }

    /// Spawn paddles and ball and serve the opening point
    fn populate(&mut self) {
        let config = &self.config;
        let setup = &self.setup;

        for (side, skin) in [(Side::Left, setup.left_skin), (Side::Right, setup.right_skin)] {
            let paddle = apply_paddle_modifiers(
                create_paddle(config, side, skin),
                config,
                &setup.modifiers,
            );
            let ai = setup
                .mode
                .is_ai(side)
                .then(|| AiController::new(setup.difficulty));
            crate::spawn_paddle(&mut self.world, paddle, ai);
        }
        crate::spawn_ball(&mut self.world, create_ball(config, setup.trail));

        // Opening serve goes from the left paddle to the right
        serve(
            &mut self.world,
            &self.config,
            &self.setup.modifiers,
            Side::Left,
            &mut self.events,
            &mut self.rng,
        );
        log::info!(
            "Match ready: {:?} mode, {} AI paddle(s) on {:?}, first to {}",
            self.setup.mode,
            ai_paddle_count(&self.world),
            self.setup.difficulty,
            self.win_score()
        );
    }

    /// Start a new match with the same setup
    pub fn restart(&mut self) {
        self.world.clear();
        self.time = Time::new(0.0, 0.0);
        self.score = Score::new();
        self.rally = RallyStats::new();
        self.events.clear();
        self.input_queue.clear();
        self.trail.clear();
        self.clock.rebase();
        self.phase = MatchPhase::Countdown {
            remaining: Params::COUNTDOWN_SECS,
        };
        self.resume_phase = None;
        self.populate();
    }

    pub fn win_score(&self) -> u8 {
        self.config.win_score(&self.setup.modifiers)
    }

    /// Run one animation frame stamped `now_ms` with the current human input.
    ///
    /// Input for an AI-driven side is ignored.
    pub fn frame(&mut self, now_ms: f64, left: Direction, right: Direction) -> FrameOutcome {
        let skipped = |phase| FrameOutcome {
            advanced: false,
            dt: 0.0,
            phase,
        };

        if !self.is_running() {
            return skipped(self.phase);
        }
        let Some(dt) = self.clock.advance(now_ms) else {
            return skipped(self.phase);
        };

        match self.phase {
            MatchPhase::Paused | MatchPhase::Victory { .. } => return skipped(self.phase),
            MatchPhase::Countdown { remaining } => {
                self.events.clear();
                let remaining = remaining - dt;
                self.phase = if remaining <= 0.0 {
                    MatchPhase::Playing
                } else {
                    MatchPhase::Countdown { remaining }
                };
                self.time.now += dt;
            }
            MatchPhase::Playing => self.play(dt, left, right),
        }

        FrameOutcome {
            advanced: true,
            dt,
            phase: self.phase,
        }
    }

    fn play(&mut self, dt: f32, left: Direction, right: Direction) {
        for (side, dir) in [(Side::Left, left), (Side::Right, right)] {
            if !self.setup.mode.is_ai(side) {
                self.input_queue.push_input(side, dir);
            }
        }

        self.time.dt = dt;
        step(
            &mut self.world,
            &mut self.time,
            &self.config,
            &self.setup.modifiers,
            &mut self.score,
            &mut self.rally,
            &mut self.events,
            &mut self.input_queue,
            &mut self.rng,
        );

        if self.events.scored().is_none() {
            if let Some(ball) = self.ball() {
                self.trail.push(ball.pos);
            }
            return;
        }

        self.trail.clear();
        match self.score.has_winner(self.win_score()) {
            Some(winner) => {
                self.phase = MatchPhase::Victory { winner };
                let summary = self.summary(winner);
                log::info!(
                    "Match over: {:?} wins {} - {}, longest rally {}",
                    winner,
                    summary.score.left,
                    summary.score.right,
                    summary.longest_rally
                );
                self.events.push(GameEvent::MatchEnd(summary));
            }
            None => {
                self.phase = MatchPhase::Countdown {
                    remaining: Params::SERVE_DELAY_SECS,
                };
            }
        }
    }

    fn summary(&self, winner: Side) -> MatchSummary {
        MatchSummary {
            winner,
            score: self.score,
            longest_rally: self.rally.longest,
            total_hits: self.rally.total_hits,
            mode: self.setup.mode,
            difficulty: self.setup.difficulty,
            quest_id: self.setup.quest_id.clone(),
            duration_secs: self.time.now,
        }
    }

    /// Freeze the simulation; rendering may continue
    pub fn pause(&mut self) {
        if matches!(
            self.phase,
            MatchPhase::Playing | MatchPhase::Countdown { .. }
        ) {
            self.resume_phase = Some(self.phase);
            self.phase = MatchPhase::Paused;
            log::debug!("Paused");
        }
    }

    /// Unfreeze without simulating the time spent paused
    pub fn resume(&mut self) {
        if self.phase == MatchPhase::Paused {
            self.phase = self.resume_phase.take().unwrap_or(MatchPhase::Playing);
            self.clock.rebase();
            log::debug!("Resumed into {}", self.phase.name());
        }
    }

    /// False once the match is decided; the host should stop its loop
    pub fn is_running(&self) -> bool {
        !matches!(self.phase, MatchPhase::Victory { .. })
    }

    pub fn ball(&self) -> Option<Ball> {
        current_ball(&self.world)
    }

    pub fn paddle(&self, side: Side) -> Option<Paddle> {
        self.world
            .query::<&Paddle>()
            .iter()
            .find(|(_e, p)| p.side == side)
            .map(|(_e, p)| *p)
    }

    /// Take the events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events.list)
    }
}
