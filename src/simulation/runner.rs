//! Simulation runner - match systems and the headless match loop

use bevy::prelude::*;
use rand::Rng;
use std::io::Write;

use crate::ai::has_possession;
use crate::constants::*;
use crate::events::{EventBus, GameEvent};
use crate::input::PlayerInput;
use crate::scoring::{MatchClock, award_goal};
use crate::world::GoalResult;

use super::app_builder::HeadlessAppBuilder;
use super::config::MatchConfig;
use super::metrics::{BatchSummary, MatchMetrics, MatchResult};
use super::parallel::{init_parallel, run_matches_parallel};
use super::step::{MatchState, step_frame};

/// Settings the match systems need at runtime
#[derive(Resource, Clone, Debug)]
pub struct MatchSetup {
    pub config: MatchConfig,
    pub seed: u64,
    /// Keep drained events in the bus history
    pub record_events: bool,
}

/// Goal detected by this frame's step, consumed by `handle_goal`
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct FrameGoal(pub GoalResult);

/// Fixed frame length actually simulated for `time`
fn frame_dt(time: &Time) -> f32 {
    time.delta_secs().clamp(0.0, MAX_FRAME_DT)
}

/// Log the match start and the opening kickoff
pub(super) fn start_match(setup: Res<MatchSetup>, mut bus: ResMut<EventBus>) {
    info!(
        "Match start: {:?} vs {:?}, {}s (seed: {})",
        setup.config.left, setup.config.right, setup.config.duration_secs, setup.seed
    );
    bus.emit(GameEvent::MatchStart {
        left: setup.config.left,
        right: setup.config.right,
        duration: setup.config.duration_secs,
        seed: setup.seed,
    });
    bus.emit(GameEvent::Kickoff);
}

/// Run one simulation frame
pub(super) fn advance_match(
    time: Res<Time>,
    clock: Res<MatchClock>,
    mut state: ResMut<MatchState>,
    mut input: ResMut<PlayerInput>,
    mut bus: ResMut<EventBus>,
    mut goal: ResMut<FrameGoal>,
) {
    let dt = frame_dt(&time);
    if clock.finished || dt <= 0.0 {
        goal.0 = GoalResult::None;
        return;
    }

    bus.update_time(clock.elapsed());
    let outcome = step_frame(&mut state, &mut input, dt);
    bus.emit_all(outcome.events);
    goal.0 = outcome.goal;
}

/// Credit a goal and restart from kickoff
pub(super) fn handle_goal(
    mut goal: ResMut<FrameGoal>,
    mut state: ResMut<MatchState>,
    mut bus: ResMut<EventBus>,
) {
    let result = std::mem::take(&mut goal.0);
    let Some(team) = award_goal(&mut state.teams, result) else {
        return;
    };
    let (score_left, score_right) = state.score();
    bus.emit(GameEvent::Goal {
        team,
        score_left,
        score_right,
    });
    state.kickoff();
    bus.emit(GameEvent::Kickoff);
}

/// Update metrics during simulation
pub(super) fn record_metrics(
    time: Res<Time>,
    clock: Res<MatchClock>,
    setup: Res<MatchSetup>,
    state: Res<MatchState>,
    mut bus: ResMut<EventBus>,
    mut metrics: ResMut<MatchMetrics>,
) {
    let dt = frame_dt(&time);
    if clock.finished || dt <= 0.0 {
        return;
    }
    metrics.elapsed += dt;
    metrics.time_since_score += dt;

    let mut kickoff = false;
    for event in bus.drain() {
        kickoff |= matches!(event.event, GameEvent::Kickoff);
        metrics.record_event(&event.event);
    }
    if !setup.record_events {
        bus.clear_history();
    }

    // Possession goes to whoever is touching the ball, closest first
    let holder = state
        .teams
        .iter()
        .zip(crate::player::TeamSide::BOTH)
        .flat_map(|(team, side)| team.players.iter().map(move |p| (side, p)))
        .filter(|(_, p)| has_possession(p, &state.ball))
        .min_by(|a, b| {
            let da = a.1.position.distance_squared(state.ball.position);
            let db = b.1.position.distance_squared(state.ball.position);
            da.total_cmp(&db)
        })
        .map(|(side, _)| side);
    if let Some(side) = holder {
        metrics.team_mut(side).possession_time += dt;
    }

    // Distance covered; kickoff teleports are not counted
    let positions = [state.teams[0].positions(), state.teams[1].positions()];
    if let (Some(last), false) = (metrics.last_positions, kickoff) {
        for (i, side) in crate::player::TeamSide::BOTH.into_iter().enumerate() {
            let covered: f32 = (0..2).map(|p| positions[i][p].distance(last[i][p])).sum();
            metrics.team_mut(side).distance_traveled += covered;
        }
    }
    metrics.last_positions = Some(positions);
}

/// Count the match clock down and end the match
pub(super) fn tick_match_clock(
    time: Res<Time>,
    mut clock: ResMut<MatchClock>,
    state: Res<MatchState>,
    mut bus: ResMut<EventBus>,
) {
    if !clock.tick(frame_dt(&time)) {
        return;
    }
    let (score_left, score_right) = state.score();
    info!("Match over: Left {} - Right {}", score_left, score_right);
    bus.update_time(clock.elapsed());
    bus.emit(GameEvent::MatchEnd {
        score_left,
        score_right,
        duration: clock.duration,
    });
}

/// Build the result from a finished (or running) match app
pub fn collect_result(world: &World) -> MatchResult {
    let setup = world.resource::<MatchSetup>();
    let state = world.resource::<MatchState>();
    let clock = world.resource::<MatchClock>();
    let metrics = world.resource::<MatchMetrics>();

    let (score_left, score_right) = state.score();
    let mut left = metrics.left.clone();
    let mut right = metrics.right.clone();
    left.finalize();
    right.finalize();

    let mut result = MatchResult {
        duration: clock.elapsed(),
        score_left,
        score_right,
        winner: String::new(),
        left_control: state.controllers[0].mode(),
        right_control: state.controllers[1].mode(),
        left,
        right,
        seed: setup.seed,
    };
    result.determine_winner();
    result
}

/// Update the app until the match clock runs out
pub fn run_to_full_time(app: &mut App, config: &MatchConfig) {
    // Each update simulates at most MAX_FRAME_DT; the first one may only prime the clock
    let step = config.frame_dt().min(MAX_FRAME_DT);
    let max_frames = (config.duration_secs / step).ceil() as u64 + 2;
    for _ in 0..=max_frames {
        app.update();
        if app.world().resource::<MatchClock>().finished {
            break;
        }
    }
}

/// Run a single match and return the result
pub fn run_match(config: &MatchConfig, seed: u64) -> MatchResult {
    let mut builder = HeadlessAppBuilder::new(config.clone(), seed).without_event_history();
    if config.parallel > 0 {
        builder = builder.with_minimal_threads();
    }
    let mut app = builder.build();
    run_to_full_time(&mut app, config);
    collect_result(app.world())
}

/// Seed for a run: the configured one or a random one
pub fn base_seed(config: &MatchConfig) -> u64 {
    config.seed.unwrap_or_else(|| rand::thread_rng().r#gen())
}

/// Run `config.matches` matches, sequentially or on the Rayon pool
pub fn run_batch(config: &MatchConfig) -> Vec<MatchResult> {
    let count = config.matches.max(1);
    let base_seed = base_seed(config);

    if config.parallel > 0 {
        if let Err(e) = init_parallel(config.parallel) {
            warn!("{}", e);
        }
        if !config.quiet {
            println!(
                "Running {} matches on {} threads: {:?} vs {:?}",
                count, config.parallel, config.left, config.right
            );
        }
        return run_matches_parallel(config, count, base_seed);
    }

    if !config.quiet {
        println!(
            "Running {} matches: {:?} vs {:?}",
            count, config.left, config.right
        );
    }
    let mut results = Vec::with_capacity(count as usize);
    for i in 0..count {
        if !config.quiet {
            print!("\rMatch {}/{}...", i + 1, count);
            std::io::stdout().flush().ok();
        }
        results.push(run_match(config, base_seed.wrapping_add(i as u64)));
    }
    if !config.quiet {
        println!("\rCompleted {} matches.", count);
    }
    results
}

/// Print the batch summary and write all results if an output file is set
pub fn report_batch(results: &[MatchResult], config: &MatchConfig) -> Result<(), String> {
    let summary = BatchSummary::from_results(results);
    println!("{}", summary.format_table());

    if let Some(output_file) = &config.output_file {
        let json = serde_json::to_string_pretty(results)
            .map_err(|e| format!("Failed to serialize results: {}", e))?;
        std::fs::write(output_file, json)
            .map_err(|e| format!("Failed to write {}: {}", output_file, e))?;
        println!("Results written to {}", output_file);
    }
    Ok(())
}

/// Print a single result as JSON, or write it to the output file
pub fn output_result(result: &MatchResult, config: &MatchConfig) -> Result<(), String> {
    let json = serde_json::to_string_pretty(result)
        .map_err(|e| format!("Failed to serialize result: {}", e))?;

    if let Some(output_file) = &config.output_file {
        std::fs::write(output_file, &json)
            .map_err(|e| format!("Failed to write {}: {}", output_file, e))?;
        println!("Results written to {}", output_file);
    } else {
        println!("{}", json);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::ControlMode;
    use crate::player::TeamSide;
    use crate::world::ObstacleLayout;

    fn short_config() -> MatchConfig {
        MatchConfig {
            duration_secs: 5.0,
            fps: 20.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_match_runs_to_time_limit() {
        let result = run_match(&short_config(), 7);
        assert!((result.duration - 5.0).abs() < 1e-3);
        assert_eq!(result.seed, 7);
        assert_eq!(result.left_control, ControlMode::Agent);
        assert!(["left", "right", "tie"].contains(&result.winner.as_str()));
        assert_eq!(result.left.goals, result.score_left);
        assert_eq!(result.right.goals, result.score_right);
    }

    #[test]
    fn test_same_seed_same_result() {
        let config = MatchConfig {
            obstacles: ObstacleLayout::Scattered { pairs: 2 },
            right: ControlMode::Legacy,
            ..short_config()
        };
        let a = run_match(&config, 11);
        let b = run_match(&config, 11);
        assert_eq!((a.score_left, a.score_right), (b.score_left, b.score_right));
        assert_eq!(a.left, b.left);
        assert_eq!(a.right, b.right);
    }

    #[test]
    fn test_players_move_during_match() {
        let result = run_match(&short_config(), 3);
        assert!(result.left.distance_traveled > 0.0);
        assert!(result.right.distance_traveled > 0.0);
    }

    #[test]
    fn test_goal_system_scores_and_resets() {
        let config = short_config();
        let mut state = MatchState::from_config(&config, 0);
        // Already in the left goal mouth, rolling deeper
        state.ball.reset(Vec2::new(-1.4, 10.0), Vec2::new(-8.0, 0.0));
        let mut app = HeadlessAppBuilder::new(config, 0).with_state(state).build();
        for _ in 0..4 {
            app.update();
        }

        let state = app.world().resource::<MatchState>();
        assert_eq!(state.score(), (0, 1));
        let bus = app.world().resource::<EventBus>();
        assert!(bus.history().any(|e| e.event
            == GameEvent::Goal {
                team: TeamSide::Right,
                score_left: 0,
                score_right: 1
            }));
        assert_eq!(app.world().resource::<MatchMetrics>().right.goals, 1);
    }

    #[test]
    fn test_match_end_emitted_once() {
        let mut app = HeadlessAppBuilder::new(
            MatchConfig {
                duration_secs: 1.0,
                ..short_config()
            },
            0,
        )
        .build();
        for _ in 0..40 {
            app.update();
        }
        let bus = app.world().resource::<EventBus>();
        let ends = bus
            .history()
            .filter(|e| matches!(e.event, GameEvent::MatchEnd { .. }))
            .count();
        assert_eq!(ends, 1);
        assert!(bus.history().next().is_some_and(|e| matches!(e.event, GameEvent::MatchStart { .. })));
    }

    #[test]
    fn test_batch_is_sequential_by_default() {
        let config = MatchConfig {
            duration_secs: 1.0,
            matches: 3,
            seed: Some(100),
            quiet: true,
            ..short_config()
        };
        let results = run_batch(&config);
        let seeds: Vec<u64> = results.iter().map(|r| r.seed).collect();
        assert_eq!(seeds, vec![100, 101, 102]);
    }
}
