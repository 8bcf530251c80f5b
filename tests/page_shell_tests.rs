//! Page shell behaviour over the mock backend: notification panel, notification
//! navigation and session-expiry handling from a page.

mod common;

use anyhow::Result;
use chrono::{TimeZone, Utc};
use serde_json::json;

use common::MockBackend;
use complaint_desk::models::{Notification, NotificationType};
use complaint_desk::view::{self, Access, NotificationTarget, PageShell, ViewModel};

fn notification(id: u64, kind: NotificationType, related: Option<u64>) -> Notification {
    Notification {
        id,
        user_id: 1,
        title: "Update".into(),
        message: "Your complaint changed".into(),
        kind,
        related_id: related,
        is_read: false,
        created_at: None,
    }
}

#[tokio::test]
async fn notification_panel_uses_configured_limit() -> Result<()> {
    let mock = MockBackend::start().await;
    mock.on("GET", "/notifications", 200, json!({
        "data": [
            {"id": 1, "title": "<New> complaint", "message": "m", "type": "system", "related_id": 4, "is_read": false, "created_at": "2024-06-15T11:00:00Z"},
            {"id": 2, "title": "Exam week", "message": "m", "type": "announcement", "related_id": 5, "is_read": true, "created_at": "2024-06-10T11:00:00Z"}
        ],
        "unread_count": 12
    }));
    let (client, _) = mock.client();
    client.session().set_token("abc")?;
    let shell = PageShell::new(client, Access::Admin);

    let panel = shell.load_notifications().await?.expect("panel");
    assert_eq!(mock.last().query.as_deref(), Some("limit=20"));
    assert_eq!(panel.items.len(), 2);
    assert_eq!(panel.badge().as_deref(), Some("9+"));

    let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
    let mut vm = ViewModel::new();
    vm.insert(view::notification_list(&panel.items, now));
    let html = vm.get("notificationList").expect("slot");
    assert!(html.contains("&lt;New&gt; complaint"));
    assert!(html.contains("1 hour ago"));
    assert!(html.contains("campaign"));
    Ok(())
}

#[tokio::test]
async fn complaint_notification_marks_read_then_navigates() -> Result<()> {
    let mock = MockBackend::start().await;
    mock.on("PUT", "/notifications/3/read", 200, json!({"id": 3, "title": "t", "message": "m", "type": "complaint_update", "is_read": true}));
    let (client, nav) = mock.client();
    client.session().set_token("abc")?;
    let shell = PageShell::new(client, Access::Student);

    let target = shell.open_notification(&notification(3, NotificationType::ComplaintUpdate, Some(4))).await?;
    assert_eq!(target, NotificationTarget::Page("/student/complaint/4".into()));
    assert_eq!(nav.visits(), vec!["/student/complaint/4".to_string()]);
    let reqs = mock.requests();
    assert_eq!(reqs.len(), 1);
    assert_eq!(reqs[0].method, "PUT");
    Ok(())
}

#[tokio::test]
async fn announcement_notification_fetches_the_announcement() -> Result<()> {
    let mock = MockBackend::start().await;
    mock.on("PUT", "/notifications/8/read", 200, json!({"id": 8, "type": "announcement", "is_read": true}));
    mock.on("GET", "/announcements/5", 200, json!({"id": 5, "title": "Exam week", "content": "Library open late", "status": "published"}));
    let (client, nav) = mock.client();
    let shell = PageShell::new(client, Access::Admin);

    match shell.open_notification(&notification(8, NotificationType::Announcement, Some(5))).await? {
        NotificationTarget::Announcement(a) => assert_eq!(a.title, "Exam week"),
        other => panic!("expected announcement, got {:?}", other),
    }
    assert!(nav.visits().is_empty());
    Ok(())
}

#[tokio::test]
async fn failed_mark_read_does_not_block_navigation() -> Result<()> {
    let mock = MockBackend::start().await;
    mock.on("PUT", "/notifications/3/read", 500, json!({"error": "db down"}));
    let (client, nav) = mock.client();
    let shell = PageShell::new(client, Access::Admin);

    let target = shell.open_notification(&notification(3, NotificationType::System, Some(11))).await?;
    assert_eq!(target, NotificationTarget::Page("/admin/complaint/11".into()));
    assert_eq!(nav.last().as_deref(), Some("/admin/complaint/11"));

    let none = shell.open_notification(&notification(3, NotificationType::System, None)).await?;
    assert_eq!(none, NotificationTarget::Nothing);
    Ok(())
}

#[tokio::test]
async fn pending_badge_follows_stats_and_expiry_redirects_to_login() -> Result<()> {
    let mock = MockBackend::start().await;
    mock.on("GET", "/complaints/stats", 200, json!({"total": 9, "pending": 0, "in_process": 4, "completed": 5, "rejected": 0}));
    let (client, nav) = mock.client();
    client.session().set_token("abc")?;
    let shell = PageShell::new(client, Access::Admin);

    let pending = shell.pending_count().await?.expect("count");
    assert!(view::pending_badge(pending).is_none());

    mock.on("GET", "/complaints/stats", 401, json!({"error": "expired"}));
    assert!(shell.pending_count().await?.is_none());
    assert!(shell.client().session().get_token().is_none());
    assert_eq!(nav.visits(), vec!["/login".to_string()]);

    assert!(shell.guard().is_none());
    assert_eq!(nav.visits().len(), 2);
    Ok(())
}

#[tokio::test]
async fn expired_session_on_mark_read_stops_at_login() -> Result<()> {
    let mock = MockBackend::start().await;
    mock.on("PUT", "/notifications/3/read", 401, json!({"error": "Invalid token"}));
    mock.on("PUT", "/notifications/8/read", 401, json!({"error": "Invalid token"}));
    mock.on("GET", "/announcements/5", 200, json!({"id": 5, "title": "Exam week", "content": "c", "status": "published"}));
    let (client, nav) = mock.client();
    client.session().set_token("abc")?;
    let shell = PageShell::new(client, Access::Admin);

    let target = shell.open_notification(&notification(3, NotificationType::System, Some(11))).await?;
    assert_eq!(target, NotificationTarget::SessionExpired);
    assert_eq!(nav.visits(), vec!["/login".to_string()]);

    let target = shell.open_notification(&notification(8, NotificationType::Announcement, Some(5))).await?;
    assert_eq!(target, NotificationTarget::SessionExpired);
    assert_eq!(mock.request_count(), 2);
    assert!(mock.requests().iter().all(|r| r.method == "PUT"));
    Ok(())
}

#[tokio::test]
async fn expired_session_on_announcement_fetch_stops_at_login() -> Result<()> {
    let mock = MockBackend::start().await;
    mock.on("PUT", "/notifications/8/read", 200, json!({"id": 8, "type": "announcement", "is_read": true}));
    mock.on("GET", "/announcements/5", 401, json!({"error": "Invalid token"}));
    let (client, nav) = mock.client();
    client.session().set_token("abc")?;
    let shell = PageShell::new(client, Access::Student);

    let target = shell.open_notification(&notification(8, NotificationType::Announcement, Some(5))).await?;
    assert_eq!(target, NotificationTarget::SessionExpired);
    assert_eq!(nav.visits(), vec!["/login".to_string()]);
    Ok(())
}

#[tokio::test]
async fn failed_announcement_fetch_resolves_to_nothing() -> Result<()> {
    let mock = MockBackend::start().await;
    mock.on("PUT", "/notifications/8/read", 200, json!({"id": 8, "type": "announcement", "is_read": true}));
    mock.on("GET", "/announcements/5", 500, json!({"error": "db down"}));
    let (client, nav) = mock.client();
    client.session().set_token("abc")?;
    let shell = PageShell::new(client, Access::Admin);

    let target = shell.open_notification(&notification(8, NotificationType::Announcement, Some(5))).await?;
    assert_eq!(target, NotificationTarget::Nothing);
    assert!(nav.visits().is_empty());
    Ok(())
}

#[tokio::test]
async fn mark_all_read_from_the_panel() -> Result<()> {
    let mock = MockBackend::start().await;
    mock.on("PUT", "/notifications/read-all", 200, json!({"message": "All notifications marked as read"}));
    let (client, _) = mock.client();
    client.session().set_token("abc")?;
    let shell = PageShell::new(client, Access::Student);

    let ack = shell.mark_all_read().await?.expect("ack");
    assert_eq!(ack.message, "All notifications marked as read");
    let req = mock.last();
    assert_eq!(req.method, "PUT");
    assert_eq!(req.header("authorization"), Some("Bearer abc"));
    Ok(())
}
