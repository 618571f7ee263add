pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    email TEXT NOT NULL UNIQUE,
    username TEXT NOT NULL,
    password_hash TEXT NOT NULL,
    level INTEGER NOT NULL DEFAULT 1 CHECK (level BETWEEN 1 AND 1000),
    total_xp INTEGER NOT NULL DEFAULT 0 CHECK (total_xp >= 0),
    current_streak INTEGER NOT NULL DEFAULT 0,
    longest_streak INTEGER NOT NULL DEFAULT 0,
    discipline_score INTEGER NOT NULL DEFAULT 50,
    background_tokens INTEGER NOT NULL DEFAULT 10,
    country TEXT NOT NULL DEFAULT 'Unknown',
    last_completion_on TEXT,
    created_at TEXT NOT NULL,
    last_active TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS admins (
    id TEXT PRIMARY KEY,
    username TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    is_super_admin INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS tasks (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    title TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    skill_tree TEXT NOT NULL DEFAULT 'Mind',
    difficulty REAL NOT NULL,
    estimated_minutes REAL NOT NULL,
    xp_reward INTEGER NOT NULL CHECK (xp_reward >= 0),
    completed INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    completed_at TEXT
);

CREATE TABLE IF NOT EXISTS quests (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    quest_type TEXT NOT NULL CHECK (quest_type IN ('daily', 'weekly', 'monthly', 'beginner')),
    title TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    xp_reward INTEGER NOT NULL CHECK (xp_reward >= 0),
    category TEXT NOT NULL,
    difficulty TEXT NOT NULL,
    completed INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    expires_at TEXT,
    progress INTEGER NOT NULL DEFAULT 0,
    target INTEGER NOT NULL DEFAULT 1
);

CREATE TABLE IF NOT EXISTS global_quests (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    xp_reward INTEGER NOT NULL DEFAULT 0 CHECK (xp_reward >= 0),
    category TEXT NOT NULL DEFAULT 'productivity',
    difficulty TEXT NOT NULL DEFAULT 'medium',
    expires_at TEXT,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS focus_sessions (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    task_id TEXT,
    duration_minutes INTEGER NOT NULL CHECK (duration_minutes > 0),
    xp_reward INTEGER NOT NULL CHECK (xp_reward >= 0),
    completed INTEGER NOT NULL DEFAULT 0,
    started_at TEXT NOT NULL,
    completed_at TEXT
);

CREATE TABLE IF NOT EXISTS boss_challenges (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    challenge_text TEXT NOT NULL,
    difficulty INTEGER NOT NULL,
    xp_reward INTEGER NOT NULL CHECK (xp_reward >= 0),
    completed INTEGER NOT NULL DEFAULT 0,
    challenge_date TEXT NOT NULL,
    UNIQUE (user_id, challenge_date)
);

CREATE TABLE IF NOT EXISTS user_preferences (
    user_id TEXT PRIMARY KEY REFERENCES users(id) ON DELETE CASCADE,
    background TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS mode_items (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    mode TEXT NOT NULL,
    title TEXT NOT NULL,
    content TEXT NOT NULL DEFAULT '',
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_tasks_user ON tasks(user_id, created_at);
CREATE INDEX IF NOT EXISTS idx_quests_user_type ON quests(user_id, quest_type);
CREATE INDEX IF NOT EXISTS idx_users_total_xp ON users(total_xp);
CREATE INDEX IF NOT EXISTS idx_global_quests_created ON global_quests(created_at);
CREATE INDEX IF NOT EXISTS idx_focus_user ON focus_sessions(user_id, started_at);
CREATE INDEX IF NOT EXISTS idx_mode_items_user ON mode_items(user_id, mode, created_at);
"#;
