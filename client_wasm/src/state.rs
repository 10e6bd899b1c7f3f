//! Per-frame view of the match handed to the JavaScript renderer

use game_core::{
    get_pitch_info, Arena, ArenaTheme, MatchPhase, PaddleSkin, PitchInfo, Side, TrailType,
};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaddleView {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub skin: PaddleSkin,
}

/// Trail effect to draw behind the ball, oldest point first
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrailView {
    pub kind: TrailType,
    pub points: Vec<[f32; 2]>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BallView {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    /// Active trick serve, for the HUD banner
    pub pitch: Option<PitchInfo>,
}

/// Everything the renderer draws for one frame
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameView {
    pub phase: MatchPhase,
    pub theme: ArenaTheme,
    pub score_left: u8,
    pub score_right: u8,
    pub win_score: u8,
    pub rally: u32,
    pub ball: Option<BallView>,
    pub left: Option<PaddleView>,
    pub right: Option<PaddleView>,
    pub trail: TrailView,
}

impl FrameView {
    pub fn capture(arena: &Arena) -> Self {
        let ball = arena.ball();
        let paddle = |side: Side| {
            arena.paddle(side).map(|p| PaddleView {
                x: arena.config.paddle_x(side),
                y: p.y,
                width: arena.config.paddle_width,
                height: p.height,
                skin: p.skin,
            })
        };

        Self {
            phase: arena.phase,
            theme: arena.setup.theme,
            score_left: arena.score.left,
            score_right: arena.score.right,
            win_score: arena.win_score(),
            rally: arena.rally.current,
            ball: ball.map(|b| BallView {
                x: b.pos.x,
                y: b.pos.y,
                radius: b.radius,
                pitch: b.pitch.map(|p| get_pitch_info(p.pitch_type)),
            }),
            left: paddle(Side::Left),
            right: paddle(Side::Right),
            trail: TrailView {
                kind: ball.map(|b| b.trail).unwrap_or(arena.setup.trail),
                points: arena.trail.points().map(|p| [p.x, p.y]).collect(),
            },
        }
    }
}
