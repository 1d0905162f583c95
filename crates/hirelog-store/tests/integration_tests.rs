//! Integration tests for hirelog-store
//!
//! These tests cover seeding from files and concurrent use of one store.

use chrono::{DateTime, Duration, TimeZone, Utc};
use hirelog_domain::{Application, ApplicationFilter, ApplicationRepository, Interview, InterviewType, Status};
use hirelog_store::{read_csv, save_snapshot, write_csv, ApplicationStore};
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

fn date(minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 3, 19, minute, 6).unwrap()
}

#[test]
fn test_store_without_snapshot_is_empty() {
    let store = ApplicationStore::from_snapshot(None).unwrap();
    assert_eq!(store.count().unwrap(), 0);
}

#[test]
fn test_snapshot_round_trip_drops_only_interviews() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("applications.json");

    let original = ApplicationStore::new();
    let mut accepted = Application::new(date(1), "Stripe", "Backend Engineer, Data", Status::Accepted);
    accepted.interviews = vec![Interview::new(date(30), InterviewType::TechCoding, Some(60))];
    original
        .insert(vec![
            Application::new(date(0), "Samsara", "Backend Engineer", Status::Pending),
            accepted,
        ])
        .unwrap();

    save_snapshot(&path, &original.to_snapshot()).unwrap();
    let reloaded = ApplicationStore::from_snapshot(Some(&path)).unwrap();

    let before = original.list(None).unwrap();
    let after = reloaded.list(None).unwrap();
    assert_eq!(before.len(), after.len());
    for (b, a) in before.iter().zip(after.iter()) {
        assert_eq!(b.date, a.date);
        assert_eq!(b.company, a.company);
        assert_eq!(b.position, a.position);
        assert_eq!(b.status, a.status);
        assert!(a.interviews.is_empty());
    }
}

#[test]
fn test_seeded_store_supports_interviews() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("seed.json");
    std::fs::write(
        &path,
        r#"[{"Company":"Samsara","Status":"Pending","Email":{"SentTime":"2025-10-03T19:02:06Z","Subject":"s","FullSender":"f","Domain":"d"}}]"#,
    )
    .unwrap();

    let store = ApplicationStore::from_snapshot(Some(&path)).unwrap();
    let updated = store
        .set_interviews(date(2), "Samsara", vec![Interview::new(date(40), InterviewType::RecruiterScreen, None)])
        .unwrap();

    assert_eq!(updated.interviews.len(), 1);
    assert_eq!(updated.interviews[0].duration_minutes, 15);
}

#[test]
fn test_csv_export_of_store_snapshot() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("applications.csv");

    let store = ApplicationStore::new();
    store
        .insert(vec![Application::new(date(0), "Samsara", "Backend Engineer", Status::Reject)])
        .unwrap();

    write_csv(&path, &store.to_snapshot()).unwrap();
    let rows = read_csv(&path).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].to_application(), store.list(None).unwrap()[0]);
}

#[test]
fn test_concurrent_readers_and_writers() {
    let store = Arc::new(ApplicationStore::new());
    let base = date(0);

    let writers: Vec<_> = (0..4)
        .map(|w| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..25 {
                    let at = base + Duration::minutes(w * 100 + i);
                    store
                        .insert(vec![Application::new(at, format!("Company{}", w), "", Status::Pending)])
                        .unwrap();
                }
            })
        })
        .collect();

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for _ in 0..50 {
                    let filter = ApplicationFilter {
                        company: Some("Company0".to_string()),
                        ..Default::default()
                    };
                    let listed = store.list(Some(&filter)).unwrap();
                    assert!(listed.iter().all(|a| a.company == "Company0"));
                }
            })
        })
        .collect();

    for handle in writers.into_iter().chain(readers) {
        handle.join().unwrap();
    }

    assert_eq!(store.count().unwrap(), 100);
}
