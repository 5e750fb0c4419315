//! Unit tests for derived statistics.

use chrono::{Duration, NaiveDate};
use std::sync::Arc;
use uuid::Uuid;

use fitquest::points::ActivityInput;
use fitquest::stats::StatsService;
use fitquest::storage::Database;
use fitquest::team::TeamManager;
use fitquest::tracking::DailyLogStore;

struct Fixture {
    logs: DailyLogStore,
    team: TeamManager,
    stats: StatsService,
}

fn fixture() -> Fixture {
    let db = Arc::new(Database::open_in_memory().unwrap());
    Fixture {
        logs: DailyLogStore::new(Arc::clone(&db)),
        team: TeamManager::new(Arc::clone(&db)),
        stats: StatsService::new(db),
    }
}

fn d(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn steps(n: u32) -> ActivityInput {
    ActivityInput {
        steps: Some(n),
        weight_lbs: None,
        water_glasses: 0,
    }
}

#[test]
fn test_weekly_series_has_seven_slots_ending_today() {
    let f = fixture();
    let user = Uuid::new_v4();
    let today = d("2024-03-10");

    f.logs.upsert(user, today, &steps(3000)).unwrap();
    f.logs
        .upsert(user, today - Duration::days(2), &steps(5000))
        .unwrap();

    let series = f.stats.weekly_series(user, today).unwrap();

    assert_eq!(series.len(), 7);
    assert_eq!(series[0].date, today - Duration::days(6));
    assert_eq!(series[6].date, today);

    // Logged slots carry data, empty slots are zero-filled
    assert!(series[6].logged);
    assert_eq!(series[6].steps, 3000);
    assert!(series[4].logged);
    assert_eq!(series[4].steps, 5000);
    assert!(!series[5].logged);
    assert_eq!(series[5].points, 0);
}

#[test]
fn test_weekly_series_ignores_logs_outside_window() {
    let f = fixture();
    let user = Uuid::new_v4();
    let today = d("2024-03-10");

    f.logs
        .upsert(user, today - Duration::days(7), &steps(9000))
        .unwrap();

    let series = f.stats.weekly_series(user, today).unwrap();
    assert!(series.iter().all(|s| !s.logged));
}

#[test]
fn test_monthly_summary_totals() {
    let f = fixture();
    let user = Uuid::new_v4();
    let today = d("2024-03-31");

    // Three logged days: 6k, 12k, 12k steps
    f.logs.upsert(user, today, &steps(6000)).unwrap();
    f.logs
        .upsert(user, today - Duration::days(1), &steps(12_000))
        .unwrap();
    f.logs
        .upsert(user, today - Duration::days(2), &steps(12_000))
        .unwrap();
    // Outside the 30-day window
    f.logs
        .upsert(user, today - Duration::days(30), &steps(50_000))
        .unwrap();

    let summary = f.stats.monthly_summary(user, today).unwrap();

    assert_eq!(summary.total_steps, 30_000);
    assert_eq!(summary.avg_daily_steps, 1000);
    assert_eq!(summary.total_points, 30); // 6 + 12 + 12
    assert_eq!(summary.best_streak, 3);
}

#[test]
fn test_today_summary_streak_and_totals() {
    let f = fixture();
    let user = Uuid::new_v4();
    let today = d("2024-03-10");

    for offset in 0..4 {
        f.logs
            .upsert(user, today - Duration::days(offset), &steps(2000))
            .unwrap();
    }

    let summary = f.stats.today(user, today).unwrap();

    assert_eq!(summary.streak, 4);
    assert_eq!(summary.total_points, 8);
    assert!(summary.log.is_some());
}

#[test]
fn test_user_progress_prefers_roster_record() {
    let f = fixture();

    let member = f.team.add_member("Ava").unwrap();
    f.team.set_points(member.id, 777).unwrap();
    f.team.record_achievement(member.id, "first-steps").unwrap();

    let progress = f.stats.user_progress(member.id).unwrap();
    assert_eq!(progress.points, 777);
    assert!(progress.has_achievement("first-steps"));
}

#[test]
fn test_user_progress_falls_back_to_log_totals() {
    let f = fixture();
    let user = Uuid::new_v4(); // not on the roster

    f.logs.upsert(user, d("2024-03-01"), &steps(5000)).unwrap();

    let progress = f.stats.user_progress(user).unwrap();
    assert_eq!(progress.points, 5);
    assert!(progress.achievements.is_empty());
}
