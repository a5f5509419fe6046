mod common;

use common::{MockBriefing, MockMemos, RecordingPrompt};
use kyomu::components::briefing::BriefingController;
use kyomu::components::memos::models::MemoItem;
use kyomu::components::memos::MemoController;
use kyomu::components::{BriefingHandle, MemoHandle};
use kyomu::utils::prompt::NoticeLevel;
use std::sync::atomic::Ordering;
use std::sync::Arc;

fn memos_with(items: Vec<MemoItem>) -> Arc<MockMemos> {
    let memos = MockMemos::default();
    *memos.saved.lock().unwrap() = items;
    Arc::new(memos)
}

#[tokio::test]
async fn test_memo_edits_save_the_whole_list() {
    let memos = memos_with(vec![MemoItem::new("학교운영위원회 자료")]);
    let prompt = Arc::new(RecordingPrompt::default());
    let mut controller = MemoController::new(memos.clone(), prompt.clone());
    controller.load().await.unwrap();
    assert!(!controller.is_saved());

    controller.add("급식 점검표 제출").await.unwrap();
    let id = controller.items()[1].id.clone();
    controller.set_checked(&id, true).await.unwrap();

    assert!(controller.is_saved());
    assert_eq!(memos.save_calls.load(Ordering::SeqCst), 2);
    let saved = memos.saved.lock().unwrap().clone();
    assert_eq!(saved.len(), 2);
    assert!(saved[1].checked);
    assert_eq!(saved, controller.items());
}

#[tokio::test]
async fn test_blank_memo_is_ignored() {
    let memos = memos_with(Vec::new());
    let prompt = Arc::new(RecordingPrompt::default());
    let mut controller = MemoController::new(memos.clone(), prompt.clone());

    controller.add(" \t ").await.unwrap();

    assert!(controller.items().is_empty());
    assert_eq!(memos.save_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_failed_save_restores_previous_list() {
    let first = MemoItem::new("교직원 회의");
    let memos = memos_with(vec![first.clone()]);
    let prompt = Arc::new(RecordingPrompt::default());
    let mut controller = MemoController::new(memos.clone(), prompt.clone());
    controller.load().await.unwrap();

    memos.fail_save.store(true, Ordering::SeqCst);
    assert!(controller.remove(&first.id).await.unwrap_err().is_transport());
    assert!(controller.add("새 메모").await.is_err());

    assert_eq!(controller.items(), &[first]);
    assert!(!controller.is_saved());
    assert_eq!(
        prompt.levels(),
        vec![NoticeLevel::Failure, NoticeLevel::Failure]
    );
}

#[tokio::test]
async fn test_unknown_memo_is_refused_without_saving() {
    let memos = memos_with(vec![MemoItem::new("a")]);
    let prompt = Arc::new(RecordingPrompt::default());
    let mut controller = MemoController::new(memos.clone(), prompt.clone());
    controller.load().await.unwrap();

    assert!(controller
        .set_checked("missing", true)
        .await
        .unwrap_err()
        .is_precondition());
    assert_eq!(memos.save_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_clear_asks_first() {
    let memos = memos_with(vec![MemoItem::new("a"), MemoItem::new("b")]);
    let prompt = Arc::new(RecordingPrompt::answering(&[false, true]));
    let handle = MemoHandle::new(MemoController::new(memos.clone(), prompt.clone()));
    handle.load().await.unwrap();

    assert!(!handle.clear().await.unwrap());
    assert_eq!(handle.list().await.unwrap().len(), 2);
    assert_eq!(memos.save_calls.load(Ordering::SeqCst), 0);

    assert!(handle.clear().await.unwrap());
    assert!(handle.list().await.unwrap().is_empty());
    assert!(memos.saved.lock().unwrap().is_empty());
    assert_eq!(prompt.question_count(), 2);

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_briefing_passes_force_flag() {
    let briefing = Arc::new(MockBriefing::default());
    *briefing.text.lock().unwrap() = "오늘은 교직원 연수가 있습니다.".to_string();
    let mut controller = BriefingController::new(briefing.clone());
    assert!(controller.text().is_none());

    let text = controller.fetch(false).await.unwrap();
    controller.fetch(true).await.unwrap();

    assert_eq!(text, "오늘은 교직원 연수가 있습니다.");
    assert_eq!(controller.text(), Some(text.as_str()));
    assert_eq!(*briefing.forced.lock().unwrap(), vec![false, true]);
}

#[tokio::test]
async fn test_briefing_failure_shows_fallback() {
    let briefing = Arc::new(MockBriefing::default());
    *briefing.text.lock().unwrap() = "server text".to_string();
    briefing.fail.store(true, Ordering::SeqCst);
    let handle = BriefingHandle::new(BriefingController::new(briefing.clone()));

    assert!(handle.fetch(false).await.unwrap_err().is_transport());

    let shown = handle.current().await.unwrap().unwrap();
    assert!(!shown.is_empty());
    assert_ne!(shown, "server text");

    handle.shutdown().await.unwrap();
}
