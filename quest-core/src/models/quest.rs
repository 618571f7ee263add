use chrono::{DateTime, Days, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum QuestType {
    Daily,
    Weekly,
    Monthly,
    Beginner,
}

impl QuestType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Beginner => "beginner",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "daily" => Some(Self::Daily),
            "weekly" => Some(Self::Weekly),
            "monthly" => Some(Self::Monthly),
            "beginner" => Some(Self::Beginner),
            _ => None,
        }
    }

    /// When a freshly seeded quest of this type stops being valid.
    ///
    /// Daily quests run until the next UTC midnight; beginner quests never expire.
    pub fn expires_at(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Self::Daily => now
                .date_naive()
                .checked_add_days(Days::new(1))
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|d| d.and_utc()),
            Self::Weekly => Some(now + Duration::days(7)),
            Self::Monthly => Some(now + Duration::days(30)),
            Self::Beginner => None,
        }
    }

    pub fn templates(&self) -> &'static [QuestTemplate] {
        match self {
            Self::Daily => DAILY_TEMPLATES,
            Self::Weekly => WEEKLY_TEMPLATES,
            Self::Monthly => MONTHLY_TEMPLATES,
            Self::Beginner => BEGINNER_TEMPLATES,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestTemplate {
    pub title: &'static str,
    pub description: &'static str,
    pub xp_reward: u64,
    pub category: &'static str,
    pub difficulty: &'static str,
}

const DAILY_TEMPLATES: &[QuestTemplate] = &[
    QuestTemplate {
        title: "Win the morning",
        description: "Complete 1 focused task",
        xp_reward: 80,
        category: "productivity",
        difficulty: "easy",
    },
    QuestTemplate {
        title: "Deep work burst",
        description: "Do 25 minutes of focus",
        xp_reward: 120,
        category: "discipline",
        difficulty: "medium",
    },
    QuestTemplate {
        title: "Health check",
        description: "Drink water and stretch",
        xp_reward: 60,
        category: "wellness",
        difficulty: "easy",
    },
];

const WEEKLY_TEMPLATES: &[QuestTemplate] = &[
    QuestTemplate {
        title: "Weekly conquest",
        description: "Complete 10 tasks",
        xp_reward: 500,
        category: "productivity",
        difficulty: "hard",
    },
    QuestTemplate {
        title: "Streak builder",
        description: "Maintain a 3-day streak",
        xp_reward: 350,
        category: "discipline",
        difficulty: "medium",
    },
];

const MONTHLY_TEMPLATES: &[QuestTemplate] = &[QuestTemplate {
    title: "Monthly mastery",
    description: "Complete 60 tasks",
    xp_reward: 2500,
    category: "productivity",
    difficulty: "legendary",
}];

const BEGINNER_TEMPLATES: &[QuestTemplate] = &[
    QuestTemplate {
        title: "First mission",
        description: "Create your first task",
        xp_reward: 100,
        category: "productivity",
        difficulty: "easy",
    },
    QuestTemplate {
        title: "First focus",
        description: "Start a focus session",
        xp_reward: 120,
        category: "discipline",
        difficulty: "easy",
    },
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quest {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(rename = "type")]
    pub quest_type: QuestType,
    pub title: String,
    pub description: String,
    pub xp_reward: u64,
    pub category: String,
    pub difficulty: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub progress: u32,
    pub target: u32,
}

impl Quest {
    pub fn from_template(
        user_id: Uuid,
        quest_type: QuestType,
        template: &QuestTemplate,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            quest_type,
            title: template.title.to_string(),
            description: template.description.to_string(),
            xp_reward: template.xp_reward,
            category: template.category.to_string(),
            difficulty: template.difficulty.to_string(),
            completed: false,
            created_at: now,
            expires_at: quest_type.expires_at(now),
            progress: 0,
            target: 1,
        }
    }
}
