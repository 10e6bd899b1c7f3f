use game_core::ai::AiController;
use game_core::physics::{check_score, create_ball, create_paddle, reset_ball};
use game_core::*;
use glam::Vec2;
use hecs::World;

const DT: f32 = 1.0 / 60.0;

struct Sim {
    world: World,
    time: Time,
    config: Config,
    mods: QuestModifiers,
    score: Score,
    rally: RallyStats,
    events: Events,
    input_queue: InputQueue,
    rng: GameRng,
}

impl Sim {
    fn new(config: Config, left_ai: Option<Difficulty>, right_ai: Option<Difficulty>, seed: u64) -> Self {
        let mut world = World::new();
        spawn_paddle(
            &mut world,
            create_paddle(&config, Side::Left, PaddleSkin::Classic),
            left_ai.map(AiController::new),
        );
        spawn_paddle(
            &mut world,
            create_paddle(&config, Side::Right, PaddleSkin::Classic),
            right_ai.map(AiController::new),
        );
        Self {
            world,
            time: Time::new(DT, 0.0),
            config,
            mods: QuestModifiers::default(),
            score: Score::new(),
            rally: RallyStats::new(),
            events: Events::new(),
            input_queue: InputQueue::new(),
            rng: GameRng::new(seed),
        }
    }

    fn step(&mut self) {
        self.time.dt = DT;
        step(
            &mut self.world,
            &mut self.time,
            &self.config,
            &self.mods,
            &mut self.score,
            &mut self.rally,
            &mut self.events,
            &mut self.input_queue,
            &mut self.rng,
        );
    }

    fn ball(&self) -> Ball {
        *self.world.query::<&Ball>().iter().next().unwrap().1
    }

    fn paddles(&self) -> Vec<Paddle> {
        self.world.query::<&Paddle>().iter().map(|(_e, p)| *p).collect()
    }
}

#[test]
fn test_straight_serve_reaches_goal_without_wall_hit() {
    let config = Config {
        serve_angle_spread: 0.0,
        ..Config::new()
    };
    let mut sim = Sim::new(config, None, None, 1);

    // Park the right paddle at the top so the ball passes underneath
    for (_e, paddle) in sim.world.query_mut::<&mut Paddle>() {
        if paddle.side == Side::Right {
            paddle.y = paddle.height / 2.0;
        }
    }

    let served = reset_ball(
        &create_ball(&sim.config, TrailType::None),
        &sim.config,
        Side::Right,
        &sim.mods,
        None,
        &mut sim.rng,
    );
    assert_eq!(served.vel, Vec2::new(sim.config.ball_initial_speed, 0.0));
    spawn_ball(&mut sim.world, served);

    let mut scored_on = None;
    for frame in 0..200 {
        let before = sim.ball();
        sim.step();
        assert!(!sim.events.ball_hit_wall(), "No wall contact on a flat serve");
        if let Some(side) = sim.events.scored() {
            // The pre-serve position on this frame is what crossed the line
            let crossed = Ball {
                pos: before.pos + before.vel * DT,
                ..before
            };
            assert_eq!(check_score(&crossed, &sim.config), Some(Side::Left));
            scored_on = Some((frame, side));
            break;
        }
    }

    let (frame, side) = scored_on.expect("ball should leave the arena");
    assert_eq!(side, Side::Left);
    assert_eq!(sim.score.left, 1);
    // 400 units at 360 units/s is 66.7 frames
    assert!((65..=67).contains(&frame), "scored on frame {frame}");
}

#[test]
fn test_ai_rally_keeps_invariants() {
    let mut sim = Sim::new(
        Config::new(),
        Some(Difficulty::Hard),
        Some(Difficulty::Impossible),
        2024,
    );
    let first = reset_ball(
        &create_ball(&sim.config, TrailType::Sparkle),
        &sim.config,
        Side::Right,
        &sim.mods,
        None,
        &mut sim.rng,
    );
    spawn_ball(&mut sim.world, first);

    let (min_y, max_y) = sim.config.ball_y_bounds(sim.config.ball_radius);
    let mut hits = 0;
    for _ in 0..6000 {
        sim.step();
        let ball = sim.ball();
        assert!(ball.pos.y >= min_y && ball.pos.y <= max_y);
        assert!(ball.speed() <= sim.config.ball_max_speed + 1e-2);
        assert_eq!(ball.trail, TrailType::Sparkle, "Cosmetics pass through");
        for paddle in sim.paddles() {
            assert!(paddle.top() >= 0.0 && paddle.bottom() <= sim.config.arena_height);
        }
        if sim.events.ball_hit_paddle().is_some() {
            hits += 1;
            assert!(ball.pitch.is_none(), "Returned balls carry no pitch");
        }
    }

    assert!(hits > 10, "AI paddles should return the ball, got {hits}");
    assert_eq!(sim.rally.total_hits, hits);
}

#[test]
fn test_same_seed_same_match() {
    let run = || {
        let mut sim = Sim::new(
            Config::new(),
            Some(Difficulty::Medium),
            Some(Difficulty::Easy),
            77,
        );
        let ball = reset_ball(
            &create_ball(&sim.config, TrailType::None),
            &sim.config,
            Side::Left,
            &sim.mods,
            None,
            &mut sim.rng,
        );
        spawn_ball(&mut sim.world, ball);
        for _ in 0..3000 {
            sim.step();
        }
        (sim.score, sim.rally, sim.ball().pos)
    };
    assert_eq!(run(), run());
}

#[test]
fn test_arena_plays_full_match() {
    let setup = MatchSetup {
        mode: GameMode::Ai,
        difficulty: Difficulty::Impossible,
        modifiers: QuestModifiers {
            win_score: Some(2),
            ..QuestModifiers::default()
        },
        ..MatchSetup::default()
    };
    let mut arena = Arena::new(Config::new(), setup, 9);

    let mut now = 0.0;
    let mut scores = 0;
    let mut match_end = None;
    for _ in 0..60 * 120 {
        now += 1000.0 / 60.0;
        arena.frame(now, Direction::None, Direction::None);
        for event in arena.drain_events() {
            match event {
                GameEvent::Score { .. } => scores += 1,
                GameEvent::MatchEnd(summary) => match_end = Some(summary),
                _ => {}
            }
        }
        if !arena.is_running() {
            break;
        }
    }

    let summary = match_end.expect("match should finish");
    assert_eq!(summary.score.get(summary.winner), 2);
    assert!(summary.score.get(summary.winner.opposite()) < 2);
    assert_eq!(summary.difficulty, Difficulty::Impossible);
    // Opening countdown plus a serve delay after the first point
    assert!(summary.duration_secs > Params::COUNTDOWN_SECS + Params::SERVE_DELAY_SECS);
    assert_eq!(scores, (summary.score.left + summary.score.right) as usize);
    assert_eq!(
        arena.phase,
        MatchPhase::Victory {
            winner: summary.winner
        }
    );
}
