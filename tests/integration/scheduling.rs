//! Calendar scheduling integration tests.
//!
//! These tests drive a live session through the calendar views:
//! hour bucketing, overdue rollover, week and month anchoring, and
//! the mode/assignee/platform filters, all against injected dates.

use huddle::calendar::overdue::{is_overdue, overdue_days};
use huddle::calendar::view::AssigneeFilter;
use huddle::core::event::{EventDraft, EventType};
use huddle::core::task::TaskDraft;

use crate::fixtures::{date, today, BoardHarness};

/// Test: Morning board
/// Given tasks and a meeting around 9am, written in mixed time formats
/// When the day view renders
/// Then everything lands on its floor hour with tasks ahead of events
#[tokio::test]
async fn test_morning_board_buckets_by_hour() {
    let mut harness = BoardHarness::new();
    harness
        .task_at("prep agenda", today(), Some("09:00"))
        .await;
    harness
        .task_at("review inbox", today(), Some("9:45 AM"))
        .await;
    harness.meeting_at("standup", today(), "09:30").await;
    harness
        .task_at("afternoon focus", today(), Some("14:00"))
        .await;

    let filter = harness.schedule_filter();
    let day = harness.ws.day_view(&filter, today(), today());

    let nine = day.slot(9).expect("9:00 is inside the grid");
    assert_eq!(nine.items.len(), 3, "both tasks and the meeting share 9");
    assert!(nine.items[0].is_task());
    assert!(nine.items[1].is_task());
    assert_eq!(nine.items[2].title(), "standup");

    assert_eq!(day.slot(14).map(|s| s.items.len()), Some(1));
    assert!(day.unscheduled.is_empty());
}

/// Test: Three days overdue
/// Given an incomplete task dated last Sunday at 10:00
/// When today (Wednesday) renders
/// Then it rolls into today's 10:00 row, three days overdue, and it
/// leaves again the moment it completes
#[tokio::test]
async fn test_overdue_invoice_rolls_three_days() {
    let mut harness = BoardHarness::new();
    let sunday = date(2025, 6, 8);
    let invoice = harness.task_at("pay invoice", sunday, Some("10:00")).await;

    let filter = harness.schedule_filter();

    let today_view = harness.ws.day_view(&filter, today(), today());
    let ten = today_view.slot(10).unwrap();
    assert_eq!(ten.items.len(), 1);
    let rolled = ten.items[0].as_task().unwrap();
    assert!(is_overdue(rolled, today()));
    assert_eq!(overdue_days(rolled, today()), 3);

    // Days between the original date and today show nothing.
    let tuesday_view = harness.ws.day_view(&filter, date(2025, 6, 10), today());
    assert_eq!(tuesday_view.item_count(), 0);

    // The original date keeps its copy.
    let sunday_view = harness.ws.day_view(&filter, sunday, today());
    assert_eq!(sunday_view.slot(10).map(|s| s.items.len()), Some(1));

    harness.ws.toggle_task(invoice.id).await.unwrap();
    let today_after = harness.ws.day_view(&filter, today(), today());
    assert_eq!(
        today_after.item_count(),
        0,
        "completed tasks stop rolling over"
    );
    let sunday_after = harness.ws.day_view(&filter, sunday, today());
    assert_eq!(
        sunday_after.slot(10).map(|s| s.items.len()),
        Some(1),
        "the original date still shows the finished task"
    );
}

/// Test: Week anchoring
/// Given a task on Monday and a leftover from last week
/// When the week view renders for a Wednesday today
/// Then columns run Monday through Sunday and the leftover sits only
/// in today's column
#[tokio::test]
async fn test_week_anchors_to_today() {
    let mut harness = BoardHarness::new();
    harness
        .task_at("sprint planning", date(2025, 6, 9), Some("10:00"))
        .await;
    let leftover = harness
        .task_at("last friday leftover", date(2025, 6, 6), None)
        .await;

    let filter = harness.schedule_filter();
    let week = harness.ws.week_view(&filter, today());

    assert_eq!(week.len(), 7);
    assert_eq!(week[0].date, date(2025, 6, 9));
    assert_eq!(week[6].date, date(2025, 6, 15));

    assert_eq!(week[0].slot(10).map(|s| s.items.len()), Some(1));

    for day in &week {
        let leftover_here = day
            .unscheduled
            .iter()
            .any(|item| item.as_task().map(|t| t.id) == Some(leftover.id));
        assert_eq!(
            leftover_here,
            day.date == today(),
            "leftover belongs to today's column only, date {}",
            day.date
        );
    }
}

/// Test: Month cells for an overdue task
/// Given an overdue task inside the rendered month
/// When the month view renders
/// Then both its original cell and today's cell list it
#[tokio::test]
async fn test_month_keeps_both_cells_for_overdue() {
    let mut harness = BoardHarness::new();
    let overdue = harness
        .task_at("expired follow-up", date(2025, 6, 8), None)
        .await;

    let filter = harness.schedule_filter();
    let cells = harness.ws.month_view(&filter, today(), today());
    assert_eq!(cells.len(), 42);

    let holding = |cell: &huddle::calendar::bucket::MonthCell| {
        cell.items
            .iter()
            .any(|item| item.as_task().map(|t| t.id) == Some(overdue.id))
    };

    for cell in &cells {
        let expected = cell.date == date(2025, 6, 8) || cell.date == today();
        assert_eq!(holding(cell), expected, "cell {}", cell.date);
    }
}

/// Test: Content calendar split
/// Given a mixed board of tasks, a meeting, and content posts
/// When schedule and content modes render the same day
/// Then each mode sees only its own items and the platform filter
/// narrows content further
#[tokio::test]
async fn test_content_calendar_splits_from_schedule() {
    let mut harness = BoardHarness::new();
    harness.task_at("edit script", today(), Some("11:00")).await;
    harness.meeting_at("sponsor call", today(), "11:00").await;
    harness.content_post("launch video", today(), "youtube").await;
    harness.content_post("launch thread", today(), "twitter").await;

    let schedule = harness.schedule_filter();
    let day = harness.ws.day_view(&schedule, today(), today());
    assert_eq!(
        day.item_count(),
        2,
        "schedule mode keeps the task and the meeting only"
    );

    let all_content = harness.content_filter();
    let day = harness.ws.day_view(&all_content, today(), today());
    assert_eq!(day.item_count(), 2, "content mode sees both posts");
    assert_eq!(day.unscheduled.len(), 2, "untimed posts share the row");

    let mut youtube_only = harness.content_filter();
    youtube_only.platforms.insert("youtube".to_string());
    let day = harness.ws.day_view(&youtube_only, today(), today());
    assert_eq!(day.unscheduled.len(), 1);
    assert_eq!(day.unscheduled[0].title(), "launch video");
}

/// Test: Audience filters
/// Given tasks assigned to the viewer, owned-unassigned, and assigned
/// to a teammate
/// When Me / All / Member render the same day
/// Then tasks narrow per filter while the meeting always shows
#[tokio::test]
async fn test_me_and_member_filters() {
    let mut harness = BoardHarness::new();
    harness.task_at("assigned to me", today(), None).await;

    let mut owned = TaskDraft::new("owned, unassigned", harness.viewer);
    owned.start_date = Some(today());
    harness.ws.create_task(owned).await.unwrap();

    let (mut other_ws, teammate) = harness.join();
    let mut theirs = TaskDraft::new("teammate's work", teammate);
    theirs.assignee_id = Some(teammate);
    theirs.start_date = Some(today());
    other_ws.create_task(theirs).await.unwrap();

    harness.meeting_at("all hands", today(), "15:00").await;
    harness.ws.refresh().await.unwrap();

    let mut me = harness.schedule_filter();
    me.assignee = AssigneeFilter::Me;
    let day = harness.ws.day_view(&me, today(), today());
    assert_eq!(day.unscheduled.len(), 2);
    assert_eq!(
        day.slot(15).map(|s| s.items.len()),
        Some(1),
        "events ignore the audience filter"
    );

    let all = harness.schedule_filter();
    let day = harness.ws.day_view(&all, today(), today());
    assert_eq!(day.unscheduled.len(), 3);

    let mut one_member = harness.schedule_filter();
    one_member.assignee = AssigneeFilter::Member(teammate);
    let day = harness.ws.day_view(&one_member, today(), today());
    assert_eq!(day.unscheduled.len(), 1);
    assert_eq!(day.unscheduled[0].title(), "teammate's work");
}

/// Test: Unreadable times
/// Given tasks with missing, malformed, and off-window times
/// When the day view renders
/// Then missing and malformed share the unscheduled row, a pm time
/// normalizes onto the grid, and the off-window time renders nowhere
#[tokio::test]
async fn test_unreadable_times_share_the_unscheduled_row() {
    let mut harness = BoardHarness::new();
    harness.task_at("no time", today(), None).await;
    harness.task_at("someday", today(), Some("whenever")).await;
    harness.task_at("bad clock", today(), Some("25:30")).await;
    harness.task_at("wrap up", today(), Some("7:00 PM")).await;
    harness.task_at("dawn patrol", today(), Some("06:00")).await;

    let filter = harness.schedule_filter();
    let day = harness.ws.day_view(&filter, today(), today());

    assert_eq!(day.unscheduled.len(), 3);
    assert_eq!(
        day.slot(19).map(|s| s.items.len()),
        Some(1),
        "7:00 PM normalizes to the 19:00 row"
    );
    assert_eq!(day.item_count(), 4, "06:00 is outside the rendered window");

    let cells = harness.ws.month_view(&filter, today(), today());
    let today_cell = cells.iter().find(|c| c.date == today()).unwrap();
    assert_eq!(
        today_cell.items.len(),
        5,
        "the month cell's flat list still includes the 06:00 task"
    );
}

/// Test: Blocked tasks stay visible
/// Given a scheduled task blocked by an unfinished predecessor
/// When the day view renders
/// Then the task still occupies its hour row
#[tokio::test]
async fn test_blocked_task_still_renders() {
    let mut harness = BoardHarness::new();
    let gate = harness.backlog_task("vendor signature").await;
    let blocked = harness
        .task_at("announce partnership", today(), Some("09:00"))
        .await;
    harness.ws.set_blocker(blocked.id, Some(gate.id)).await.unwrap();

    let filter = harness.schedule_filter();
    let day = harness.ws.day_view(&filter, today(), today());
    assert_eq!(day.slot(9).map(|s| s.items.len()), Some(1));
}

/// Test: Subtasks stay off the calendar
/// Given a dated parent and a subtask that also carries a date and time
/// When the day, week, and month views render
/// Then only the parent appears
#[tokio::test]
async fn test_subtasks_never_reach_the_calendar() {
    let mut harness = BoardHarness::new();
    let parent = harness.task_at("film episode", today(), None).await;
    let sub = harness.ws.create_subtask(parent.id, "charge batteries").await.unwrap();
    harness.ws.move_task(sub.id, today(), Some(9)).await.unwrap();

    let filter = harness.schedule_filter();

    let day = harness.ws.day_view(&filter, today(), today());
    assert_eq!(day.item_count(), 1);
    assert!(day.slot(9).unwrap().items.is_empty());

    let week = harness.ws.week_view(&filter, today());
    let week_total: usize = week.iter().map(|d| d.item_count()).sum();
    assert_eq!(week_total, 1);

    let cells = harness.ws.month_view(&filter, today(), today());
    let month_total: usize = cells.iter().map(|c| c.items.len()).sum();
    assert_eq!(month_total, 1);
}

/// Test: Event drafts inherit workspace defaults
/// Given an event created without duration or color
/// When it lands on the calendar
/// Then the configured defaults filled it in
#[tokio::test]
async fn test_event_defaults_fill_in() {
    let mut harness = BoardHarness::new();
    let event = harness
        .ws
        .create_event(EventDraft::new("office hours", EventType::Call, today()))
        .await
        .unwrap();

    assert_eq!(event.duration_min, 60);
    assert_eq!(event.color, "#3b82f6");
    assert!(event.is_all_day());
}
