//! Tunable constants for strikers
//!
//! All gameplay values are defined here. Units are metres, seconds and
//! metres/second. The agent thresholds are fixed, not tuned at runtime.

// =============================================================================
// FIELD
// =============================================================================

pub const FIELD_WIDTH: f32 = 40.0;
pub const FIELD_HEIGHT: f32 = 20.0;
pub const GOAL_HEIGHT: f32 = 6.0; // Height of the goal opening on each end wall
pub const GOAL_DEPTH: f32 = 2.0; // How far the goal box extends behind the wall

// =============================================================================
// BODIES
// =============================================================================

pub const BALL_RADIUS: f32 = 0.5;
pub const BALL_FRICTION: f32 = 0.98; // Velocity retained per frame
pub const BALL_STOP_SPEED: f32 = 0.1; // Below this the ball is snapped to rest
pub const PLAYER_RADIUS: f32 = 0.75;
pub const PLAYER_SPEED: f32 = 20.0;

// =============================================================================
// COLLISION
// =============================================================================

pub const WALL_RESTITUTION: f32 = 0.75;
pub const OBSTACLE_RESTITUTION: f32 = 0.75;
pub const PLAYER_RESTITUTION: f32 = 0.85;
pub const MIN_SEPARATION_SPEED: f32 = 2.0; // Ball always leaves a player at least this fast
pub const COINCIDENT_EPSILON: f32 = 0.001; // Centers closer than this use a fixed normal
pub const COLLISION_PASSES: usize = 3;
pub const MAX_FRAME_DT: f32 = 0.05;

// =============================================================================
// AGENT - GENERAL
// =============================================================================

pub const AI_REACTION_SPEED: f32 = 0.8;
pub const POSSESSION_MARGIN: f32 = 0.3; // Extra contact distance beyond touching radii
pub const ARRIVAL_TOLERANCE: f32 = 0.2; // Seek stops entirely inside this distance
pub const CHASE_SLOW_RADIUS: f32 = 2.0;
pub const SUPPORT_SLOW_RADIUS: f32 = 3.0;
pub const APPROACH_OFFSET: f32 = 1.5; // Stand this far behind the ball before pushing
pub const BEHIND_BALL_MARGIN: f32 = 0.5;
pub const DIRECT_CHASE_DISTANCE: f32 = 2.0;

// =============================================================================
// AGENT - SHOOTING
// =============================================================================

pub const SHOT_SAMPLES: usize = 9;
pub const SHOT_CLEARANCE: f32 = 1.5;
pub const SHOT_CENTER_BONUS: f32 = 2.0;
pub const GOOD_SHOT_ANGLE: f32 = 0.15; // ~8.6 degrees
pub const GOOD_SHOT_RANGE: f32 = 18.0;
pub const GREAT_SHOT_ANGLE: f32 = 0.30; // ~17 degrees
pub const GREAT_SHOT_RANGE: f32 = 12.0;
pub const SHOT_COOLDOWN: f32 = 2.0;
pub const SHOT_MIN_POSSESSION: f32 = 0.2;
pub const SHOT_SPEED_FACTOR: f32 = 1.5;
pub const SHOT_SPEED_MIN: f32 = 18.0;
pub const SHOT_SPEED_MAX: f32 = 30.0;

// =============================================================================
// AGENT - PASSING
// =============================================================================

pub const PASS_LANE_CLEARANCE: f32 = 2.5;
pub const PASS_MIN_DISTANCE: f32 = 4.0;
pub const PASS_MAX_DISTANCE: f32 = 25.0;
pub const PASS_PRESSURE_MIN_DISTANCE: f32 = 5.0;
pub const SUPPORT_AHEAD_MARGIN: f32 = 2.0;
pub const PRESSURE_RADIUS: f32 = 4.0;
pub const PASS_COOLDOWN: f32 = 1.5;
pub const PASS_MIN_POSSESSION: f32 = 0.3;
pub const PASS_SPEED_FACTOR: f32 = 1.2;
pub const PASS_SPEED_MIN: f32 = 12.0;
pub const PASS_SPEED_MAX: f32 = 25.0;

// =============================================================================
// AGENT - DRIBBLE
// =============================================================================

pub const DRIBBLE_ADVANCE: f32 = 3.0;
pub const DRIBBLE_WALL_MARGIN: f32 = 3.0;
pub const DRIBBLE_CENTER_PULL: f32 = 0.7; // Weight of field center-y in the dribble target

// =============================================================================
// AGENT - SUPPORT POSITIONING
// =============================================================================

pub const SUPPORT_GRID_MARGIN: f32 = 2.0;
pub const SUPPORT_GRID_STEP: f32 = 3.0;
pub const SUPPORT_ARRIVE_DISTANCE: f32 = 1.0;
pub const SUPPORT_DRIFT_SPEED: f32 = 0.5;
pub const RECEIVE_LANE_CLEARANCE: f32 = 2.0;
pub const LANE_CLEAR_SCORE: f32 = 5.0;
pub const LANE_BLOCKED_SCORE: f32 = -10.0;
pub const ADVANCE_WEIGHT: f32 = 8.0;
pub const SPREAD_DISTANCE: f32 = 6.0;
pub const SPREAD_WEIGHT: f32 = 3.0;
pub const REACH_DISTANCE: f32 = 20.0;
pub const REACH_BONUS: f32 = 2.0;
pub const REACH_PENALTY: f32 = 2.0;
pub const ALIGNMENT_WEIGHT: f32 = 3.0;
pub const SHOT_ANGLE_WEIGHT: f32 = 5.0;

// =============================================================================
// LEGACY AGENT
// =============================================================================

pub const LEGACY_ENGAGE_DISTANCE: f32 = 8.0;
pub const LEGACY_HOME_FRACTION: f32 = 0.25; // Home x as a fraction of field width from own wall
pub const LEGACY_TRACK_WEIGHT: f32 = 0.5;

// =============================================================================
// MATCH
// =============================================================================

pub const DEFAULT_MATCH_DURATION: f32 = 120.0;
pub const MATCH_DURATION_CHOICES: [f32; 4] = [60.0, 120.0, 180.0, 300.0];
pub const DEFAULT_SIM_FPS: f32 = 60.0;
pub const KICKOFF_DEPTH: f32 = 0.25; // Formation x as a fraction of width from own wall
pub const KICKOFF_SPREAD: f32 = 0.15; // Formation y offset from center as a fraction of height
