use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use paraday_core::service::processing::{ProcessingDraft, ProcessingSession};
use paraday_core::service::task_board::{TaskDraft, TaskPatch};
use paraday_core::workspace::load_project_files;
use paraday_core::{
    LifecycleError, ProcessingDecision, SourceFile, TaskBoard, TaskFlags, TaskStatus, TimeBucket,
    TransitionKind,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 7, 0, 0).unwrap()
}

fn project_board() -> TaskBoard {
    let files = [
        SourceFile::new(
            "home.md",
            "---\nid: home\narea: life\n---\n- [ ] Fix tap\n- [x] Pay rent\n- [ ] Clean garage\n",
        ),
        SourceFile::new("work.md", "---\nid: work\n---\n- [ ] Write report\n"),
    ];
    load_project_files(&files, now()).1
}

fn inbox_board(titles: &[&str]) -> TaskBoard {
    titles.iter().fold(TaskBoard::default(), |board, title| {
        let draft = TaskDraft {
            title: title.to_string(),
            ..TaskDraft::default()
        };
        board.create_task(draft, None, now()).unwrap().0
    })
}

#[test]
fn toggling_twice_restores_the_task() {
    let board = project_board();
    let once = board.toggle_completion("home::0", now()).unwrap();
    let task = once.get("home::0").unwrap();
    assert_eq!(task.status, TaskStatus::Done);
    assert_eq!(task.completed_at, Some(now()));

    let twice = once.toggle_completion("home::0", now()).unwrap();
    assert_eq!(twice, board);
}

#[test]
fn unchecking_a_done_task_returns_it_to_next() {
    let board = project_board();
    let reopened = board.toggle_completion("home::1", now()).unwrap();
    let task = reopened.get("home::1").unwrap();
    assert_eq!(task.status, TaskStatus::Next);
    assert!(task.completed_at.is_none());
}

#[test]
fn unknown_ids_leave_the_board_unchanged() {
    let board = project_board();
    assert_eq!(board.toggle_completion("nope", now()).unwrap(), board);
    assert_eq!(board.edit_task("nope", TaskPatch::default(), now()).unwrap(), board);
    assert_eq!(board.reorder_within_project("home", "home::0", "nope"), board);
}

#[test]
fn checking_a_cancelled_task_completes_it() {
    let board = inbox_board(&["Old idea"]);
    let patch = TaskPatch {
        status: Some(TaskStatus::Cancelled),
        ..TaskPatch::default()
    };
    let cancelled = board.edit_task("old-idea", patch, now()).unwrap();
    let done = cancelled.toggle_completion("old-idea", now()).unwrap();
    let task = done.get("old-idea").unwrap();
    assert_eq!(task.status, TaskStatus::Done);
    assert_eq!(task.completed_at, Some(now()));

    let reopened = done.toggle_completion("old-idea", now()).unwrap();
    assert_eq!(reopened.get("old-idea").unwrap().status, TaskStatus::Next);
}

#[test]
fn reopening_a_cancelled_task_by_hand_only_reaches_inbox() {
    let board = inbox_board(&["Old idea"]);
    let cancel = TaskPatch {
        status: Some(TaskStatus::Cancelled),
        ..TaskPatch::default()
    };
    let cancelled = board.edit_task("old-idea", cancel, now()).unwrap();
    let to_next = TaskPatch {
        status: Some(TaskStatus::Next),
        ..TaskPatch::default()
    };
    assert_eq!(
        cancelled.edit_task("old-idea", to_next, now()).unwrap_err(),
        LifecycleError::IllegalTransition {
            task_id: "old-idea".to_string(),
            from: TaskStatus::Cancelled,
            to: TaskStatus::Next,
            kind: TransitionKind::Manual,
        }
    );
}

#[test]
fn micro_commit_sets_five_minutes_and_quick_flag() {
    let board = inbox_board(&["Reply to Sam"]);
    let decision = ProcessingDecision {
        area: "work".to_string(),
        context: "phone".to_string(),
        time_bucket: TimeBucket::Micro,
        target: TaskStatus::Next,
    };
    let next = board.commit_processing("reply-to-sam", &decision, now()).unwrap();
    let task = next.get("reply-to-sam").unwrap();
    assert_eq!(task.status, TaskStatus::Next);
    assert_eq!(task.estimated_minutes, 5);
    assert_eq!(task.time_bucket, TimeBucket::Micro);
    assert!(task.flags.quick);
    assert_eq!(task.context, "phone");
    assert_eq!(task.area, "work");
}

#[test]
fn micro_commit_forces_quick_and_keeps_other_flags() {
    let board = inbox_board(&["Eat the frog"]);
    let flags = TaskFlags {
        frog: true,
        batchable: true,
        ..TaskFlags::default()
    };
    let patch = TaskPatch {
        flags: Some(flags),
        ..TaskPatch::default()
    };
    let flagged = board.edit_task("eat-the-frog", patch, now()).unwrap();

    let decision = ProcessingDraft {
        time_bucket: TimeBucket::Micro,
        ..ProcessingDraft::default()
    }
    .decide(TaskStatus::Next);
    let next = flagged
        .commit_processing("eat-the-frog", &decision, now())
        .unwrap();
    let task = next.get("eat-the-frog").unwrap();
    assert_eq!(
        task.flags,
        TaskFlags {
            quick: true,
            frog: true,
            batchable: true,
            ..TaskFlags::default()
        }
    );
}

#[test]
fn longer_commit_keeps_an_existing_quick_flag() {
    let board = inbox_board(&["Sort mail"]);
    let patch = TaskPatch {
        flags: Some(TaskFlags {
            quick: true,
            ..TaskFlags::default()
        }),
        ..TaskPatch::default()
    };
    let flagged = board.edit_task("sort-mail", patch, now()).unwrap();

    let decision = ProcessingDraft {
        time_bucket: TimeBucket::Long,
        ..ProcessingDraft::default()
    }
    .decide(TaskStatus::Someday);
    let next = flagged.commit_processing("sort-mail", &decision, now()).unwrap();
    let task = next.get("sort-mail").unwrap();
    assert!(task.flags.quick);
    assert_eq!(task.estimated_minutes, 90);
}

#[test]
fn committing_to_today_stamps_the_planned_date() {
    let board = inbox_board(&["Call dentist"]);
    let decision = ProcessingDraft::default().decide(TaskStatus::PlannedToday);
    let next = board.commit_processing("call-dentist", &decision, now()).unwrap();
    let task = next.get("call-dentist").unwrap();
    assert_eq!(task.planned_date, NaiveDate::from_ymd_opt(2024, 5, 1));
    assert_eq!(task.estimated_minutes, 20);
    assert!(!task.flags.quick);
}

#[test]
fn processing_commit_rejects_non_inbox_tasks_and_done_target() {
    let board = project_board();
    let decision = ProcessingDraft::default().decide(TaskStatus::Someday);
    assert!(board.commit_processing("home::0", &decision, now()).is_err());

    let inbox = inbox_board(&["Capture"]);
    let done = ProcessingDraft::default().decide(TaskStatus::Done);
    assert!(inbox.commit_processing("capture", &done, now()).is_err());
}

#[test]
fn session_walks_inbox_in_capture_order_and_skips() {
    let mut board = inbox_board(&["First", "Second", "Third"]);
    let mut session = ProcessingSession::new();
    assert_eq!(session.current(&board).unwrap().id, "first");

    session.skip(&board);
    assert_eq!(session.current(&board).unwrap().id, "second");

    let decision = ProcessingDraft::default().decide(TaskStatus::Next);
    board = session.commit(&board, &decision, now()).unwrap();
    assert_eq!(board.get("second").unwrap().status, TaskStatus::Next);
    assert_eq!(session.current(&board).unwrap().id, "third");

    board = session.commit(&board, &decision, now()).unwrap();
    assert!(session.is_finished(&board));
    assert_eq!(session.committed(), 2);
    assert_eq!(session.skipped(), 1);

    session.restart();
    assert_eq!(session.current(&board).unwrap().id, "first");
}

#[test]
fn created_tasks_get_unique_slugs_and_defaults() {
    let board = inbox_board(&["Buy stamps", "Buy stamps"]);
    let ids: Vec<&str> = board.tasks().iter().map(|task| task.id.as_str()).collect();
    assert_eq!(ids, vec!["buy-stamps", "buy-stamps-2"]);

    let task = board.get("buy-stamps").unwrap();
    assert_eq!(task.project_id, "inbox");
    assert_eq!(task.context, "desktop");
    assert_eq!(task.status, TaskStatus::Inbox);
    assert_eq!(task.estimated_minutes, 20);
}

#[test]
fn create_rejects_blank_title() {
    let board = TaskBoard::default();
    let blank = TaskDraft {
        title: "   ".to_string(),
        ..TaskDraft::default()
    };
    assert_eq!(
        board.create_task(blank, None, now()).unwrap_err(),
        LifecycleError::EmptyTitle
    );
}

#[test]
fn create_accepts_an_explicit_status_and_stamps_it() {
    let board = TaskBoard::default();
    let planned = TaskDraft {
        title: "Ship".to_string(),
        status: Some(TaskStatus::PlannedToday),
        ..TaskDraft::default()
    };
    let (board, id) = board.create_task(planned, None, now()).unwrap();
    let task = board.get(&id).unwrap();
    assert_eq!(task.status, TaskStatus::PlannedToday);
    assert_eq!(task.planned_date, NaiveDate::from_ymd_opt(2024, 5, 1));
    assert!(task.completed_at.is_none());
    assert!(!board.is_daily_priority(&id));

    let done = TaskDraft {
        title: "Already shipped".to_string(),
        status: Some(TaskStatus::Done),
        ..TaskDraft::default()
    };
    let (board, id) = board.create_task(done, None, now()).unwrap();
    let task = board.get(&id).unwrap();
    assert_eq!(task.status, TaskStatus::Done);
    assert_eq!(task.completed_at, Some(now()));
}

#[test]
fn manual_status_edits_keep_completion_in_step() {
    let board = project_board();
    let to_today = TaskPatch {
        status: Some(TaskStatus::PlannedToday),
        ..TaskPatch::default()
    };
    let planned = board.edit_task("home::0", to_today, now()).unwrap();
    assert_eq!(
        planned.get("home::0").unwrap().planned_date,
        NaiveDate::from_ymd_opt(2024, 5, 1)
    );

    let to_done = TaskPatch {
        status: Some(TaskStatus::Done),
        ..TaskPatch::default()
    };
    let done = planned.edit_task("home::0", to_done, now()).unwrap();
    assert_eq!(done.get("home::0").unwrap().completed_at, Some(now()));

    let back = TaskPatch {
        status: Some(TaskStatus::Next),
        ..TaskPatch::default()
    };
    let reopened = done.edit_task("home::0", back, now()).unwrap();
    let task = reopened.get("home::0").unwrap();
    assert_eq!(task.status, TaskStatus::Next);
    assert!(task.completed_at.is_none());
}

#[test]
fn edit_keeps_bucket_consistent_with_minutes() {
    let board = inbox_board(&["Plan trip"]);
    let patch = TaskPatch {
        estimated_minutes: Some(75),
        ..TaskPatch::default()
    };
    let edited = board.edit_task("plan-trip", patch, now()).unwrap();
    let task = edited.get("plan-trip").unwrap();
    assert_eq!(task.time_bucket, TimeBucket::Long);
    assert_eq!(task.estimated_minutes, 75);

    let zero = TaskPatch {
        estimated_minutes: Some(0),
        ..TaskPatch::default()
    };
    assert_eq!(
        edited.edit_task("plan-trip", zero, now()).unwrap_err(),
        LifecycleError::ZeroEstimate
    );
}

#[test]
fn reorder_within_project_keeps_other_projects_in_place() {
    let board = project_board();
    let reordered = board.reorder_within_project("home", "home::2", "home::0");
    let ids: Vec<&str> = reordered.tasks().iter().map(|task| task.id.as_str()).collect();
    assert_eq!(ids, vec!["home::2", "home::0", "home::1", "work::0"]);
}
