//! Headless driver: plays one full round at a fixed 60 Hz with an aim-bot
//! standing in for the mouse, then records the score.

use anyhow::{Context, Result};
use engine_core::{Vec2, Vec3};
use game::{FireResult, Game, GameConfig, GameEvent, HighScoreTable, ScoreSink};
use input::MoveIntents;

const STEP: f32 = 1.0 / 60.0;

/// Point a little above the nearest live target's feet, if any.
fn pick_target(game: &Game) -> Option<Vec3> {
    let eye = game.player().eye_position();
    let targets = game.targets();
    targets
        .live()
        .iter()
        .filter_map(|&e| targets.transform(e))
        .map(|t| t.position + Vec3::new(0.0, 1.0, 0.0))
        .filter(|p| p.x.abs() < targets.road().x_max)
        .min_by(|a, b| a.distance_squared(eye).total_cmp(&b.distance_squared(eye)))
}

/// Pointer motion that turns the current view onto `point`.
fn look_delta_towards(game: &Game, point: Vec3) -> Vec2 {
    let player = game.player();
    let d = point - player.eye_position();
    let yaw = (-d.x).atan2(-d.z);
    let pitch = (d.y / d.length()).asin();
    let sensitivity = player.tuning.look_sensitivity;
    Vec2::new(
        (player.yaw() - yaw) / sensitivity,
        (player.pitch() - pitch) / sensitivity,
    )
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("╔══════════════════════════════════════════════╗");
    println!("║                 HOLI RANGE                   ║");
    println!("╠══════════════════════════════════════════════╣");
    println!("║  Splash cars and pedestrians before time's   ║");
    println!("║  up. Cars take 3 hits, pedestrians take 2.   ║");
    println!("╚══════════════════════════════════════════════╝");

    let mut config = GameConfig::load_or_init();
    if let Some(arg) = std::env::args().nth(1) {
        config.default_character = arg
            .parse()
            .with_context(|| format!("character index must be a number, got {arg:?}"))?;
    }
    let mut scores = HighScoreTable::load(config.highscore_path.clone());

    let mut game = Game::new(config);
    game.set_captured(true);
    game.start_round();

    let mut shots = 0u32;
    let mut hits = 0u32;
    while !game.session().is_over() {
        let look = pick_target(&game)
            .map(|p| look_delta_towards(&game, p))
            .unwrap_or(Vec2::ZERO);
        game.frame(STEP, &MoveIntents::default(), look);

        if pick_target(&game).is_some() {
            match game.fire() {
                FireResult::Rejected => {}
                FireResult::Target { .. } => {
                    shots += 1;
                    hits += 1;
                }
                FireResult::Ground { .. } | FireResult::Nothing => shots += 1,
            }
        }

        let events: Vec<_> = game.drain_events().collect();
        for event in events {
            match event {
                GameEvent::TargetDestroyed { points, .. } => log::debug!("target destroyed (+{})", points),
                GameEvent::ReloadStarted { duration } => log::debug!("reloading for {:.1}s", duration),
                GameEvent::GameOver { score, character } => {
                    let name = &game.characters().get(character).name;
                    log::info!("{} finished with {} points ({}/{} shots landed)", name, score, hits, shots);
                }
                _ => {}
            }
        }
    }

    let score = game.session().score();
    let character = game.character_index();
    if scores.submit(character, score) {
        println!("New best for {}: {}", game.character().name, score);
    } else {
        println!("Score {} (best {})", score, scores.best(character));
    }

    for (i, (id, best)) in scores.leaderboard().into_iter().enumerate() {
        println!("{:>2}. {:<8} {}", i + 1, game.characters().get(id).name, best);
    }

    Ok(())
}
