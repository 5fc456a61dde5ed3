//! Headless App Builder
//!
//! Builds a headless Bevy app around one match. Used by the match runner,
//! the parallel batch runner and the scenario tests.

use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use std::time::Duration;

use crate::events::EventBus;
use crate::input::PlayerInput;
use crate::scoring::MatchClock;

use super::config::MatchConfig;
use super::metrics::MatchMetrics;
use super::runner::{FrameGoal, MatchSetup, advance_match, handle_goal, record_metrics, start_match, tick_match_clock};
use super::step::MatchState;

/// Builder for creating headless Bevy apps
pub struct HeadlessAppBuilder {
    config: MatchConfig,
    seed: u64,
    state: Option<MatchState>,
    minimal_threads: bool,
    record_events: bool,
    logging: bool,
}

impl HeadlessAppBuilder {
    pub fn new(config: MatchConfig, seed: u64) -> Self {
        Self {
            config,
            seed,
            state: None,
            minimal_threads: false,
            record_events: true,
            logging: false,
        }
    }

    /// Start from a hand-built match instead of the config's kickoff
    pub fn with_state(mut self, state: MatchState) -> Self {
        self.state = Some(state);
        self
    }

    /// Set the target FPS (default: config fps)
    pub fn with_fps(mut self, fps: f32) -> Self {
        self.config.fps = fps;
        self
    }

    /// Enable minimal thread mode (task pools = 1)
    ///
    /// Use this when running many apps in parallel to avoid hitting OS thread limits.
    pub fn with_minimal_threads(mut self) -> Self {
        self.minimal_threads = true;
        self
    }

    /// Install the log subscriber (binaries only, once per process)
    pub fn with_logging(mut self) -> Self {
        self.logging = true;
        self
    }

    /// Drop events instead of keeping a history (stats are still counted)
    pub fn without_event_history(mut self) -> Self {
        self.record_events = false;
        self
    }

    /// Build the app.
    ///
    /// Time advances by exactly one frame (`1 / fps`) per `app.update()`,
    /// so runs are deterministic for a given config and seed.
    pub fn build(self) -> App {
        let mut app = App::new();
        let frame = Duration::from_secs_f32(self.config.frame_dt());

        if self.minimal_threads {
            app.add_plugins(
                MinimalPlugins
                    .set(ScheduleRunnerPlugin::run_loop(frame))
                    .set(TaskPoolPlugin {
                        task_pool_options: TaskPoolOptions::with_num_threads(1),
                    }),
            );
        } else {
            app.add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(frame)));
        }
        if self.logging {
            app.add_plugins(LogPlugin::default());
        }
        app.insert_resource(TimeUpdateStrategy::ManualDuration(frame));

        let state = self
            .state
            .unwrap_or_else(|| MatchState::from_config(&self.config, self.seed));
        app.insert_resource(state);
        app.insert_resource(MatchClock::new(self.config.duration_secs));
        app.init_resource::<PlayerInput>();
        app.init_resource::<MatchMetrics>();
        app.init_resource::<FrameGoal>();
        app.insert_resource(EventBus::new());
        app.insert_resource(MatchSetup {
            config: self.config,
            seed: self.seed,
            record_events: self.record_events,
        });

        app.add_systems(Startup, start_match);
        app.add_systems(
            Update,
            (advance_match, handle_goal, record_metrics, tick_match_clock).chain(),
        );

        app
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_creates_app() {
        let app = HeadlessAppBuilder::new(MatchConfig::default(), 1).build();
        assert!(app.world().contains_resource::<MatchState>());
        assert!(app.world().contains_resource::<MatchClock>());
        assert!(app.world().contains_resource::<EventBus>());
    }

    #[test]
    fn test_minimal_threads_creates_app() {
        let app = HeadlessAppBuilder::new(MatchConfig::default(), 1)
            .with_minimal_threads()
            .build();
        assert!(app.world().contains_resource::<MatchMetrics>());
    }

    #[test]
    fn test_frames_advance_the_clock() {
        let config = MatchConfig {
            duration_secs: 60.0,
            ..Default::default()
        };
        let mut app = HeadlessAppBuilder::new(config, 1).with_fps(20.0).build();
        for _ in 0..21 {
            app.update();
        }
        let clock = app.world().resource::<MatchClock>();
        // 20 steps of 0.05s; the first update may only initialize time
        assert!(clock.elapsed() > 0.99 && clock.elapsed() < 1.06);
        assert!(!clock.finished);
    }
}
