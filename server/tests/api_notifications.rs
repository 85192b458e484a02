//! Integration tests per le notifiche admin
//!
//! Test per:
//! - GET /api/notifications
//! - PUT /api/notifications/{id}/read
//! - PUT /api/notifications/read-all

mod common;

#[cfg(test)]
mod notification_tests {
    use super::common::*;
    use axum::http::{StatusCode, header};
    use serde_json::Value;

    const FIXTURES: &[&str] = &["users", "orders", "notifications"];

    #[tokio::test]
    async fn test_list_notifications_with_unread_count() {
        let server = create_test_server(create_test_state(FIXTURES).await);

        let response = server
            .get("/api/notifications")
            .add_header(header::AUTHORIZATION, admin_bearer())
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["unreadCount"], 2);
        let ids: Vec<&str> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|n| n["_id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["N3", "N2", "N1"]);
    }

    #[tokio::test]
    async fn test_mark_one_notification_read() {
        let server = create_test_server(create_test_state(FIXTURES).await);

        let response = server
            .put("/api/notifications/N1/read")
            .add_header(header::AUTHORIZATION, admin_bearer())
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"]["_id"], "N1");
        assert_eq!(body["data"]["isRead"], true);

        let list: Value = server
            .get("/api/notifications")
            .add_header(header::AUTHORIZATION, admin_bearer())
            .await
            .json();
        assert_eq!(list["unreadCount"], 1);
    }

    #[tokio::test]
    async fn test_mark_unknown_notification_read() {
        let server = create_test_server(create_test_state(FIXTURES).await);

        let response = server
            .put("/api/notifications/N99/read")
            .add_header(header::AUTHORIZATION, admin_bearer())
            .await;

        response.assert_status_not_found();
        assert_eq!(response.json::<Value>()["message"], "Notification not found");
    }

    #[tokio::test]
    async fn test_mark_all_read_is_idempotent() {
        let state = create_test_state(FIXTURES).await;
        let server = create_test_server(state.clone());

        let find_n3 = |list: &Value| {
            list["data"]
                .as_array()
                .unwrap()
                .iter()
                .find(|n| n["_id"] == "N3")
                .cloned()
                .unwrap()
        };
        let before: Value = server
            .get("/api/notifications")
            .add_header(header::AUTHORIZATION, admin_bearer())
            .await
            .json();
        let n3_before = find_n3(&before);
        assert_eq!(n3_before["isRead"], true);

        for _ in 0..2 {
            let response = server
                .put("/api/notifications/read-all")
                .add_header(header::AUTHORIZATION, admin_bearer())
                .await;
            response.assert_status_ok();
            let body: Value = response.json();
            assert_eq!(body["message"], "All notifications marked as read");
        }

        let after: Value = server
            .get("/api/notifications")
            .add_header(header::AUTHORIZATION, admin_bearer())
            .await
            .json();
        assert_eq!(after["unreadCount"], 0);
        // N3 era già letta: stato e data di creazione invariati
        let n3_after = find_n3(&after);
        assert_eq!(n3_after["isRead"], n3_before["isRead"]);
        assert_eq!(n3_after["createdAt"], n3_before["createdAt"]);

        // a questo punto non resta nulla da aggiornare
        assert_eq!(state.notification.mark_all_read().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_notifications_are_admin_only() {
        let server = create_test_server(create_test_state(FIXTURES).await);

        server
            .get("/api/notifications")
            .add_header(header::AUTHORIZATION, alice_bearer())
            .await
            .assert_status(StatusCode::FORBIDDEN);

        server
            .put("/api/notifications/read-all")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }
}
