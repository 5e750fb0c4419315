//! Database schema definitions for FitQuest.

/// Schema version tracking table.
pub const SCHEMA_VERSION_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL,
    applied_at TEXT NOT NULL
);
"#;

/// Current schema version.
pub const CURRENT_VERSION: i32 = 1;

/// SQL schema for creating all database tables.
pub const SCHEMA: &str = r#"
-- Team members (the user's squad, including the user themselves)
CREATE TABLE IF NOT EXISTS team_members (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    points INTEGER NOT NULL DEFAULT 0,
    achievements_json TEXT NOT NULL DEFAULT '[]',
    role TEXT,
    streak INTEGER NOT NULL DEFAULT 0,
    last_active TEXT,
    joined_at TEXT NOT NULL
);

-- Daily activity logs, one row per (user, calendar day)
CREATE TABLE IF NOT EXISTS daily_logs (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL,
    date TEXT NOT NULL,
    steps INTEGER,
    weight_lbs REAL,
    water_glasses INTEGER NOT NULL DEFAULT 0,
    points INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    UNIQUE(user_id, date)
);

CREATE INDEX IF NOT EXISTS idx_daily_logs_user_date
    ON daily_logs(user_id, date);

-- Cosmetic catalog: gear, backgrounds, badges
CREATE TABLE IF NOT EXISTS unlockable_items (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    description TEXT,
    item_type TEXT NOT NULL,
    gear_slot TEXT,
    req_points INTEGER NOT NULL DEFAULT 0,
    req_achievements_json TEXT NOT NULL DEFAULT '[]',
    unlocked INTEGER NOT NULL DEFAULT 0
);

-- Per-user avatar state
CREATE TABLE IF NOT EXISTS avatars (
    user_id TEXT PRIMARY KEY,
    gear_json TEXT NOT NULL,
    background TEXT NOT NULL,
    badge TEXT,
    colors_json TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- Challenges
CREATE TABLE IF NOT EXISTS challenges (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    description TEXT,
    kind TEXT NOT NULL,
    start_date TEXT NOT NULL,
    end_date TEXT NOT NULL,
    participants_json TEXT NOT NULL DEFAULT '[]',
    rules_json TEXT NOT NULL,
    created_at TEXT NOT NULL
);

-- Recipes shared within the team
CREATE TABLE IF NOT EXISTS recipes (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    meal_type TEXT NOT NULL,
    ingredients_json TEXT NOT NULL DEFAULT '[]',
    instructions TEXT,
    prep_minutes INTEGER,
    calories INTEGER,
    shared_by TEXT REFERENCES team_members(id),
    created_at TEXT NOT NULL
);
"#;
