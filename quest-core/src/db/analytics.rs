use std::collections::BTreeMap;

use anyhow::Result;
use chrono::{DateTime, Days, Duration, NaiveDate, Utc};
use rusqlite::{params, Connection};
use uuid::Uuid;

use super::{find_user, Database};
use crate::leveling::{active_streak, xp_for_next_level};
use crate::models::*;

/// Completed tasks as `(skill_tree, completed_at)`.
fn completed_tasks_since(
    conn: &Connection,
    user_id: Uuid,
    since: DateTime<Utc>,
) -> rusqlite::Result<Vec<(String, DateTime<Utc>)>> {
    let mut stmt = conn.prepare(
        "SELECT skill_tree, completed_at FROM tasks
         WHERE user_id = ?1 AND completed = 1 AND completed_at >= ?2",
    )?;
    let rows = stmt.query_map(params![user_id.to_string(), since], |r| {
        Ok((r.get(0)?, r.get(1)?))
    })?;
    rows.collect()
}

/// Completed focus sessions as `(duration_minutes, started_at)`.
fn completed_focus_since(
    conn: &Connection,
    user_id: Uuid,
    since: DateTime<Utc>,
) -> rusqlite::Result<Vec<(u64, DateTime<Utc>)>> {
    let mut stmt = conn.prepare(
        "SELECT duration_minutes, started_at FROM focus_sessions
         WHERE user_id = ?1 AND completed = 1 AND started_at >= ?2",
    )?;
    let rows = stmt.query_map(params![user_id.to_string(), since], |r| {
        Ok((r.get(0)?, r.get(1)?))
    })?;
    rows.collect()
}

/// Per-day activity for the `WEEK_DAYS` days ending on `today`, oldest first.
fn weekly_activity(
    today: NaiveDate,
    tasks: &[(String, DateTime<Utc>)],
    focus: &[(u64, DateTime<Utc>)],
) -> Vec<DayActivity> {
    (0..WEEK_DAYS)
        .rev()
        .filter_map(|back| today.checked_sub_days(Days::new(back as u64)))
        .map(|date| DayActivity {
            date,
            tasks: tasks.iter().filter(|(_, at)| at.date_naive() == date).count() as u64,
            focus_minutes: focus
                .iter()
                .filter(|(_, at)| at.date_naive() == date)
                .map(|(minutes, _)| minutes)
                .sum(),
        })
        .collect()
}

impl Database {
    /// Dashboard figures over the last `days` days (plus the current week).
    ///
    /// Returns `None` for an unknown user.
    pub fn dashboard_analytics(
        &self,
        user_id: Uuid,
        days: u32,
        now: DateTime<Utc>,
    ) -> Result<Option<DashboardAnalytics>> {
        let today = now.date_naive();
        let window_start = now - Duration::days(days as i64);
        let week_start = today
            .checked_sub_days(Days::new(WEEK_DAYS as u64 - 1))
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|d| d.and_utc())
            .unwrap_or(window_start);
        let earliest = window_start.min(week_start);

        self.with_connection(|conn| {
            let Some(user) = find_user(conn, user_id)? else {
                return Ok(None);
            };

            let tasks = completed_tasks_since(conn, user_id, earliest)?;
            let focus = completed_focus_since(conn, user_id, earliest)?;
            let pending_tasks: u64 = conn.query_row(
                "SELECT COUNT(*) FROM tasks WHERE user_id = ?1 AND completed = 0",
                [user_id.to_string()],
                |r| r.get(0),
            )?;

            let mut skill_breakdown = BTreeMap::new();
            let mut total_tasks = 0;
            for (skill, _) in tasks.iter().filter(|(_, at)| *at >= window_start) {
                *skill_breakdown.entry(skill.clone()).or_insert(0) += 1;
                total_tasks += 1;
            }
            let total_focus_time = focus
                .iter()
                .filter(|(_, at)| *at >= window_start)
                .map(|(minutes, _)| minutes)
                .sum();

            Ok(Some(DashboardAnalytics {
                total_tasks,
                pending_tasks,
                total_focus_time,
                current_level: user.level,
                current_xp: user.total_xp,
                next_level_xp: xp_for_next_level(user.level),
                discipline_score: user.discipline_score,
                current_streak: active_streak(user.last_completion_on, today, user.current_streak),
                longest_streak: user.longest_streak,
                skill_breakdown,
                weekly_data: weekly_activity(today, &tasks, &focus),
                window_days: days,
            }))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn week_is_oldest_first_and_bucketed_by_day() {
        let now = Utc.with_ymd_and_hms(2026, 4, 10, 15, 0, 0).unwrap();
        let today = now.date_naive();
        let yesterday = now - Duration::days(1);
        let tasks = vec![
            ("Mind".to_string(), now),
            ("Body".to_string(), yesterday),
            ("Body".to_string(), now - Duration::days(30)),
        ];
        let focus = vec![(25, now), (50, now - Duration::hours(1))];

        let week = weekly_activity(today, &tasks, &focus);
        assert_eq!(week.len(), 7);
        assert_eq!(week[0].date, today - Days::new(6));
        assert_eq!(week[6].date, today);
        assert_eq!(week[6].tasks, 1);
        assert_eq!(week[6].focus_minutes, 75);
        assert_eq!(week[5].tasks, 1);
        assert_eq!(week.iter().map(|d| d.tasks).sum::<u64>(), 2);
    }

    #[test]
    fn dashboard_reflects_the_user() {
        let db = Database::open_memory().unwrap();
        db.migrate().unwrap();
        let user = db
            .create_user(CreateUserInput {
                email: "stats@example.com".into(),
                username: "stats".into(),
                password_hash: "hash".into(),
            })
            .unwrap()
            .unwrap();
        db.create_task(
            user.id,
            CreateTaskInput {
                title: "pending".into(),
                description: String::new(),
                skill_tree: "Mind".into(),
                difficulty: 1.0,
                estimated_minutes: 10.0,
                xp_reward: 40,
            },
        )
        .unwrap();

        let dashboard = db
            .dashboard_analytics(user.id, 30, Utc::now())
            .unwrap()
            .unwrap();
        assert_eq!(dashboard.total_tasks, 0);
        assert_eq!(dashboard.pending_tasks, 1);
        assert_eq!(dashboard.current_level, 1);
        assert_eq!(dashboard.next_level_xp, 100);
        assert_eq!(dashboard.discipline_score, DEFAULT_DISCIPLINE_SCORE);
        assert_eq!(dashboard.weekly_data.len(), 7);
        assert_eq!(dashboard.window_days, 30);

        assert!(db
            .dashboard_analytics(Uuid::new_v4(), 30, Utc::now())
            .unwrap()
            .is_none());
    }
}
