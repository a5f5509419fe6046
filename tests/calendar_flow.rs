mod common;

use common::{date, MockEvents, RecordingPrompt};
use kyomu::components::calendar::models::{Event, UploadFile, UploadResponse};
use kyomu::components::calendar::{CalendarController, CalendarHandle, Direction, UploadState};
use kyomu::utils::prompt::NoticeLevel;
use kyomu::utils::time::FixedClock;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

fn controller(
    events: &Arc<MockEvents>,
    prompt: &Arc<RecordingPrompt>,
    today: chrono::NaiveDate,
) -> CalendarController {
    CalendarController::new(
        events.clone(),
        prompt.clone(),
        Arc::new(FixedClock(today)),
    )
}

fn spreadsheet() -> UploadFile {
    UploadFile::new("2024_학사일정.xlsx", vec![0x50, 0x4b, 0x03, 0x04])
}

#[tokio::test]
async fn test_starts_on_today_with_no_events() {
    let events = Arc::new(MockEvents::default());
    let prompt = Arc::new(RecordingPrompt::default());
    let calendar = controller(&events, &prompt, date(2024, 3, 15));

    assert_eq!(calendar.anchor(), date(2024, 3, 15));
    assert!(calendar.events().is_empty());
    assert_eq!(calendar.upload_state(), UploadState::Idle);
    assert_eq!(events.fetches(), 0);
}

#[tokio::test]
async fn test_load_jumps_to_next_upcoming_event() {
    let events = Arc::new(MockEvents::with_events(vec![
        Event::new("개학식", "2024-01-10").with_id("a"),
        Event::new("체육대회", "2024-05-20").with_id("b"),
    ]));
    let prompt = Arc::new(RecordingPrompt::default());
    let mut calendar = controller(&events, &prompt, date(2024, 2, 1));
    calendar.set_anchor(date(2024, 3, 1));

    calendar.load().await.unwrap();

    assert_eq!(calendar.anchor(), date(2024, 5, 20));
    assert_eq!(calendar.events().len(), 2);
    assert_eq!(events.fetches(), 1);
}

#[tokio::test]
async fn test_load_keeps_anchor_when_month_has_events() {
    let events = Arc::new(MockEvents::with_events(vec![
        Event::new("졸업식", "2024-02-14").with_id("a"),
        Event::new("방학식", "2024-03-28").with_id("b"),
    ]));
    let prompt = Arc::new(RecordingPrompt::default());
    let mut calendar = controller(&events, &prompt, date(2024, 3, 2));

    calendar.load().await.unwrap();

    assert_eq!(calendar.anchor(), date(2024, 3, 2));
}

#[tokio::test]
async fn test_failed_load_keeps_previous_state() {
    let events = Arc::new(MockEvents::with_events(vec![
        Event::new("개학식", "2024-03-04").with_id("a"),
    ]));
    let prompt = Arc::new(RecordingPrompt::default());
    let mut calendar = controller(&events, &prompt, date(2024, 3, 1));
    calendar.load().await.unwrap();

    events.fail_fetch.store(true, Ordering::SeqCst);
    calendar.navigate(Direction::Next);
    let result = calendar.load().await;

    assert!(result.unwrap_err().is_transport());
    assert_eq!(calendar.events().len(), 1);
    assert_eq!(calendar.anchor(), date(2024, 4, 1));
    assert_eq!(prompt.levels(), vec![NoticeLevel::Failure]);
}

#[tokio::test]
async fn test_navigation_is_local() {
    let events = Arc::new(MockEvents::default());
    let prompt = Arc::new(RecordingPrompt::default());
    let mut calendar = controller(&events, &prompt, date(2024, 1, 31));

    assert_eq!(calendar.navigate(Direction::Prev), date(2023, 12, 1));
    assert_eq!(calendar.navigate(Direction::Next), date(2024, 1, 1));
    assert_eq!(calendar.navigate(Direction::Next), date(2024, 2, 1));
    assert_eq!(events.fetches(), 0);
}

#[tokio::test]
async fn test_upload_with_events_moves_anchor_without_refetch() {
    let events = Arc::new(MockEvents::default());
    *events.upload_response.lock().unwrap() = UploadResponse {
        message: Some("Uploaded 2 events".to_string()),
        events: Some(vec![
            Event::new("수학여행", "2024-06-10").with_id("x"),
            Event::new("개교기념일", "2024-04-01").with_id("y"),
        ]),
    };
    let prompt = Arc::new(RecordingPrompt::default());
    let mut calendar = controller(&events, &prompt, date(2024, 3, 1));

    calendar.select_file(spreadsheet());
    calendar.upload().await.unwrap();

    assert_eq!(calendar.anchor(), date(2024, 6, 10));
    assert_eq!(calendar.events().len(), 2);
    assert_eq!(events.uploads(), 1);
    assert_eq!(events.fetches(), 0);
    assert!(calendar.selected_file().is_none());
    assert_eq!(calendar.upload_state(), UploadState::Idle);
    assert_eq!(prompt.levels(), vec![NoticeLevel::Success]);
}

#[tokio::test]
async fn test_upload_without_events_fetches_once() {
    for returned in [None, Some(Vec::new())] {
        let events = Arc::new(MockEvents::with_events(vec![
            Event::new("개학식", "2024-03-04").with_id("a"),
        ]));
        *events.upload_response.lock().unwrap() = UploadResponse {
            message: Some("ok".to_string()),
            events: returned,
        };
        let prompt = Arc::new(RecordingPrompt::default());
        let mut calendar = controller(&events, &prompt, date(2024, 3, 1));

        calendar.select_file(spreadsheet());
        calendar.upload().await.unwrap();

        assert_eq!(events.fetches(), 1);
        assert_eq!(calendar.events().len(), 1);
    }
}

#[tokio::test]
async fn test_upload_without_selection_does_nothing() {
    let events = Arc::new(MockEvents::default());
    let prompt = Arc::new(RecordingPrompt::default());
    let mut calendar = controller(&events, &prompt, date(2024, 3, 1));

    calendar.upload().await.unwrap();

    assert_eq!(events.uploads(), 0);
    assert!(prompt.levels().is_empty());
}

#[tokio::test]
async fn test_failed_upload_keeps_state_and_clears_selection() {
    let events = Arc::new(MockEvents::default());
    events.fail_upload.store(true, Ordering::SeqCst);
    let prompt = Arc::new(RecordingPrompt::default());
    let mut calendar = controller(&events, &prompt, date(2024, 3, 1));

    calendar.select_file(spreadsheet());
    let result = calendar.upload().await;

    assert!(result.unwrap_err().is_transport());
    assert_eq!(calendar.anchor(), date(2024, 3, 1));
    assert!(calendar.events().is_empty());
    assert!(calendar.selected_file().is_none());
    assert_eq!(calendar.upload_state(), UploadState::Idle);
    assert_eq!(events.fetches(), 0);
    assert_eq!(prompt.levels(), vec![NoticeLevel::Failure]);
}

#[tokio::test]
async fn test_delete_without_id_never_asks_or_calls() {
    let events = Arc::new(MockEvents::with_events(vec![
        Event::new("legacy", "2024-03-04"),
        Event::new("synced", "2024-03-05").with_id("b"),
    ]));
    let prompt = Arc::new(RecordingPrompt::answering(&[true]));
    let mut calendar = controller(&events, &prompt, date(2024, 3, 1));
    calendar.load().await.unwrap();

    for id in [None, Some(""), Some("   ")] {
        let result = calendar.delete(id).await;
        assert!(result.unwrap_err().is_precondition());
    }

    assert_eq!(prompt.question_count(), 0);
    assert_eq!(events.deletes(), 0);
    assert_eq!(calendar.events().len(), 2);
}

#[tokio::test]
async fn test_declined_delete_is_a_no_op() {
    let events = Arc::new(MockEvents::with_events(vec![
        Event::new("회의", "2024-03-04").with_id("a"),
    ]));
    let prompt = Arc::new(RecordingPrompt::answering(&[false]));
    let mut calendar = controller(&events, &prompt, date(2024, 3, 1));
    calendar.load().await.unwrap();

    assert!(!calendar.delete(Some("a")).await.unwrap());
    assert_eq!(prompt.question_count(), 1);
    assert_eq!(events.deletes(), 0);
    assert_eq!(calendar.events().len(), 1);
}

#[tokio::test]
async fn test_confirmed_delete_removes_locally_without_refetch() {
    let events = Arc::new(MockEvents::with_events(vec![
        Event::new("회의", "2024-03-04").with_id("a"),
        Event::new("출장", "2024-03-05").with_id("b"),
    ]));
    let prompt = Arc::new(RecordingPrompt::answering(&[true]));
    let mut calendar = controller(&events, &prompt, date(2024, 3, 1));
    calendar.load().await.unwrap();

    assert!(calendar.delete(Some("a")).await.unwrap());

    assert_eq!(events.deletes(), 1);
    assert_eq!(events.fetches(), 1);
    let remaining: Vec<_> = calendar.events().iter().filter_map(|e| e.id()).collect();
    assert_eq!(remaining, vec!["b"]);
}

#[tokio::test]
async fn test_failed_delete_keeps_event() {
    let events = Arc::new(MockEvents::with_events(vec![
        Event::new("회의", "2024-03-04").with_id("a"),
    ]));
    events.fail_delete.store(true, Ordering::SeqCst);
    let prompt = Arc::new(RecordingPrompt::answering(&[true]));
    let mut calendar = controller(&events, &prompt, date(2024, 3, 1));
    calendar.load().await.unwrap();

    let result = calendar.delete(Some("a")).await;

    assert!(result.unwrap_err().is_transport());
    assert_eq!(calendar.events().len(), 1);
    assert_eq!(prompt.levels(), vec![NoticeLevel::Failure]);
}

#[tokio::test]
async fn test_handle_refuses_second_upload_in_flight() {
    let events = Arc::new(MockEvents::default());
    events.hold_upload.store(true, Ordering::SeqCst);
    *events.upload_response.lock().unwrap() = UploadResponse {
        message: None,
        events: Some(vec![Event::new("개학식", "2024-03-04").with_id("a")]),
    };
    let prompt = Arc::new(RecordingPrompt::default());
    let handle = CalendarHandle::new(controller(&events, &prompt, date(2024, 1, 1)));

    let first = tokio::spawn({
        let handle = handle.clone();
        async move { handle.upload(spreadsheet()).await }
    });
    events.upload_started.notified().await;
    assert_eq!(handle.upload_state(), UploadState::Uploading);

    let second = handle.upload(spreadsheet()).await;
    assert!(second.unwrap_err().is_precondition());
    // The refusal is shown, not just returned
    assert_eq!(prompt.levels(), vec![NoticeLevel::Failure]);

    events.release_upload.notify_one();
    let snapshot = tokio::time::timeout(Duration::from_secs(5), first)
        .await
        .unwrap()
        .unwrap()
        .unwrap();

    assert_eq!(snapshot.anchor, date(2024, 3, 4));
    assert_eq!(snapshot.upload_state, UploadState::Idle);
    assert_eq!(events.uploads(), 1);
    assert_eq!(handle.upload_state(), UploadState::Idle);

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_simultaneous_uploads_run_only_once() {
    let events = Arc::new(MockEvents::default());
    *events.upload_response.lock().unwrap() = UploadResponse {
        message: None,
        events: Some(vec![Event::new("개학식", "2024-03-04").with_id("a")]),
    };
    let prompt = Arc::new(RecordingPrompt::default());
    let handle = CalendarHandle::new(controller(&events, &prompt, date(2024, 1, 1)));

    let (first, second) = tokio::join!(handle.upload(spreadsheet()), handle.upload(spreadsheet()));

    assert!(first.is_ok());
    assert!(second.unwrap_err().is_precondition());
    assert_eq!(events.uploads(), 1);
    assert_eq!(
        prompt.levels(),
        vec![NoticeLevel::Failure, NoticeLevel::Success]
    );

    // The gate is free again once the first upload finished
    assert_eq!(handle.upload_state(), UploadState::Idle);
    handle.upload(spreadsheet()).await.unwrap();
    assert_eq!(events.uploads(), 2);

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_handle_snapshot_has_grid_for_anchor() {
    let events = Arc::new(MockEvents::with_events(vec![
        Event::new("개학식", "2024-03-04").with_id("a"),
    ]));
    let prompt = Arc::new(RecordingPrompt::default());
    let handle = CalendarHandle::new(controller(&events, &prompt, date(2024, 3, 15)));

    let snapshot = handle.load().await.unwrap();
    assert_eq!(snapshot.grid.month(), date(2024, 3, 1));
    assert_eq!(snapshot.grid.days().first().unwrap().date, date(2024, 2, 25));
    assert!(snapshot.grid.days().iter().any(|day| day.is_today));

    let snapshot = handle.navigate(Direction::Prev).await.unwrap();
    assert_eq!(snapshot.anchor, date(2024, 2, 1));

    let snapshot = handle.jump_to(date(2025, 1, 1)).await.unwrap();
    assert_eq!(snapshot.grid.month(), date(2025, 1, 1));

    handle.shutdown().await.unwrap();
}
