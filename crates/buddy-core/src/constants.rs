//! Default tuning parameters.
//!
//! These mirror the values the desktop host ships with. The engine never reads
//! them directly; they only seed `BattleConfig::default()`.

// --- Recovery ---

/// Seconds a downed hero stays down before a forced full recovery.
pub const RECOVERY_DURATION_SECS: f64 = 10.0;

/// Seconds between heal pulses while downed.
pub const HEAL_INTERVAL_SECS: f64 = 1.0;

/// Fraction of max hp restored per heal pulse.
pub const HP_REGEN_PERCENT: f64 = 0.2;

// --- Phases ---

/// Length of the clear-the-board beat after a task completes (seconds).
pub const RESOLVE_DURATION_SECS: f64 = 1.0;

/// Length of the victory celebration (seconds).
pub const VICTORY_DURATION_SECS: f64 = 3.0;

// --- Combat ---

/// Damage multiplier applied to `skill` hits.
pub const CRIT_MULTIPLIER: f64 = 2.0;

/// Damage reduction for the reserved `defend` action. Not used by damage math.
pub const DEFEND_DAMAGE_REDUCTION: f64 = 0.5;

/// Base attack of every hero before multipliers.
pub const HERO_BASE_ATTACK: f64 = 10.0;

/// Flat defense subtracted from every enemy hit on a hero.
pub const HERO_DEFENSE: f64 = 5.0;

/// Chance per tick that a fighting hero uses its skill.
pub const SKILL_CHANCE: f64 = 0.1;

/// Chance per tick that a hero idles while the work signal reports busy.
pub const BUSY_IDLE_CHANCE: f64 = 0.3;

/// Every resolved hit deals at least this much damage.
pub const MIN_DAMAGE: f64 = 1.0;

// --- Spawning ---

/// Enemies kept alive with no open tasks.
pub const BASE_ALIVE_COUNT: u32 = 1;

/// Extra enemies kept alive per open task.
pub const ALIVE_PER_TASK: u32 = 1;

/// Lower bound of the respawn delay (seconds).
pub const RESPAWN_DELAY_MIN_SECS: f64 = 1.0;

/// Upper bound of the respawn delay (seconds, exclusive).
pub const RESPAWN_DELAY_MAX_SECS: f64 = 3.0;

/// Template id of the default enemy.
pub const DEFAULT_ENEMY_TEMPLATE: &str = "orc";

/// Prefix of generated enemy instance ids (`enemy_1`, `enemy_2`, ...).
pub const ENEMY_ID_PREFIX: &str = "enemy_";
