//! Integration tests per gli endpoints degli ordini
//!
//! Test per:
//! - GET /api/orders, GET /api/orders/{id}, POST /api/orders
//! - PUT /api/orders/{id}, PATCH /api/orders/{id}/status, DELETE /api/orders/{id}
//! - PUT /api/orders/assign-rider/{id}
//! - PUT /api/orders/verify-delivery/{id}
//!
//! Ogni test crea un database SQLite in memoria con migrations e fixtures.

mod common;

#[cfg(test)]
mod order_tests {
    use super::common::*;
    use axum::http::{StatusCode, header};
    use serde_json::{Value, json};

    const FIXTURES: &[&str] = &["users", "orders", "notifications"];

    /// Rilegge un ordine come farebbe il pannello admin
    async fn fetch_order(server: &axum_test::TestServer, id: &str) -> Value {
        let response = server
            .get(&format!("/api/orders/{}", id))
            .add_header(header::AUTHORIZATION, admin_bearer())
            .await;
        response.assert_status_ok();
        response.json::<Value>()
    }

    /// Documento completo pronto per il PUT, con lo stato cambiato
    fn with_status(mut order: Value, status: &str) -> Value {
        order["status"] = json!(status);
        order
    }

    // ============================================================
    // Test per GET /api/orders - list_orders
    // ============================================================

    #[tokio::test]
    async fn test_admin_lists_all_orders_newest_first() {
        let server = create_test_server(create_test_state(FIXTURES).await);

        let response = server
            .get("/api/orders")
            .add_header(header::AUTHORIZATION, admin_bearer())
            .await;

        response.assert_status_ok();
        let orders: Vec<Value> = response.json();
        let ids: Vec<&str> = orders.iter().map(|o| o["_id"].as_str().unwrap()).collect();
        assert_eq!(ids, vec!["O3", "O2", "O1"]);
    }

    #[tokio::test]
    async fn test_admin_filters_orders_by_user() {
        let server = create_test_server(create_test_state(FIXTURES).await);

        let response = server
            .get("/api/orders")
            .add_query_param("userid", "U2")
            .add_header(header::AUTHORIZATION, admin_bearer())
            .await;

        response.assert_status_ok();
        let orders: Vec<Value> = response.json();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0]["_id"], "O2");
        assert_eq!(orders[0]["products"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_user_sees_only_own_orders() {
        let server = create_test_server(create_test_state(FIXTURES).await);

        let response = server
            .get("/api/orders")
            .add_query_param("userid", "U2")
            .add_header(header::AUTHORIZATION, alice_bearer())
            .await;

        response.assert_status_ok();
        let orders: Vec<Value> = response.json();
        assert_eq!(orders.len(), 2);
        assert!(orders.iter().all(|o| o["userid"] == "U1"));
    }

    #[tokio::test]
    async fn test_list_orders_without_token() {
        let server = create_test_server(create_test_state(FIXTURES).await);

        let response = server.get("/api/orders").await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Unauthorized - No token provided");
    }

    #[tokio::test]
    async fn test_list_orders_with_invalid_token() {
        let server = create_test_server(create_test_state(FIXTURES).await);

        let response = server
            .get("/api/orders")
            .add_header(header::AUTHORIZATION, "Bearer not-a-jwt")
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    // ============================================================
    // Test per GET /api/orders/{id} - get_order
    // ============================================================

    #[tokio::test]
    async fn test_get_order_as_owner() {
        let server = create_test_server(create_test_state(FIXTURES).await);

        let response = server
            .get("/api/orders/O1")
            .add_header(header::AUTHORIZATION, alice_bearer())
            .await;

        response.assert_status_ok();
        let order: Value = response.json();
        assert_eq!(order["status"], "pending");
        assert_eq!(order["version"], 1);
        assert_eq!(order["products"][0]["productTitle"], "Organic Fertilizer 5kg");
    }

    #[tokio::test]
    async fn test_get_order_of_another_user_is_forbidden() {
        let server = create_test_server(create_test_state(FIXTURES).await);

        let response = server
            .get("/api/orders/O2")
            .add_header(header::AUTHORIZATION, alice_bearer())
            .await;

        response.assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_get_order_as_assigned_rider() {
        let server = create_test_server(create_test_state(FIXTURES).await);

        let response = server
            .get("/api/orders/O3")
            .add_header(header::AUTHORIZATION, rita_bearer())
            .await;

        response.assert_status_ok();
    }

    #[tokio::test]
    async fn test_get_order_not_found_and_bad_id() {
        let server = create_test_server(create_test_state(FIXTURES).await);

        let missing = server
            .get("/api/orders/O99")
            .add_header(header::AUTHORIZATION, admin_bearer())
            .await;
        missing.assert_status_not_found();
        assert_eq!(missing.json::<Value>()["message"], "Order not found");

        let malformed = server
            .get("/api/orders/not%20an%20id")
            .add_header(header::AUTHORIZATION, admin_bearer())
            .await;
        malformed.assert_status(StatusCode::BAD_REQUEST);
    }

    // ============================================================
    // Test per POST /api/orders - create_order
    // ============================================================

    #[tokio::test]
    async fn test_create_order_creates_notification() {
        let state = create_test_state(FIXTURES).await;
        let server = create_test_server(state.clone());

        let body = json!({
            "name": "Bob",
            "phoneNumber": "09170000004",
            "address": "4 Mabini Ave, Davao",
            "pincode": "8000",
            "email": "bob@shop.test",
            "amount": 240.0,
            "paymentId": "pay_010",
            "products": [{
                "productId": "P2",
                "productTitle": "Rice Seeds 1kg",
                "quantity": 2,
                "price": 120.0,
                "subTotal": 240.0
            }]
        });

        let response = server
            .post("/api/orders")
            .add_header(header::AUTHORIZATION, bob_bearer())
            .json(&body)
            .await;

        response.assert_status(StatusCode::CREATED);
        let order: Value = response.json();
        let order_id = order["_id"].as_str().unwrap().to_string();
        assert_eq!(order["userid"], "U2");
        assert_eq!(order["status"], "pending");
        assert_eq!(order["version"], 1);

        let notifications = server
            .get("/api/notifications")
            .add_header(header::AUTHORIZATION, admin_bearer())
            .await;
        let list: Value = notifications.json();
        assert_eq!(list["unreadCount"], 3);
        assert_eq!(list["data"][0]["orderId"], order_id.as_str());
        assert_eq!(list["data"][0]["type"], "new-order");
    }

    #[tokio::test]
    async fn test_create_order_without_products() {
        let server = create_test_server(create_test_state(FIXTURES).await);

        let body = json!({
            "name": "Bob",
            "phoneNumber": "09170000004",
            "address": "4 Mabini Ave, Davao",
            "pincode": "8000",
            "email": "bob@shop.test",
            "amount": 0.0,
            "products": []
        });

        let response = server
            .post("/api/orders")
            .add_header(header::AUTHORIZATION, bob_bearer())
            .json(&body)
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["message"], "Validation error");
    }

    // ============================================================
    // Test per PUT /api/orders/{id} - replace_order
    // ============================================================

    #[tokio::test]
    async fn test_replace_order_changes_status_and_bumps_version() {
        let server = create_test_server(create_test_state(FIXTURES).await);

        let order = fetch_order(&server, "O1").await;
        let response = server
            .put("/api/orders/O1")
            .add_header(header::AUTHORIZATION, admin_bearer())
            .json(&with_status(order, "confirm"))
            .await;

        response.assert_status_ok();
        let updated: Value = response.json();
        assert_eq!(updated["status"], "confirm");
        assert_eq!(updated["version"], 2);
        assert_eq!(updated["amount"], 500.0);
    }

    #[tokio::test]
    async fn test_replace_order_with_stale_version() {
        let server = create_test_server(create_test_state(FIXTURES).await);

        // Due admin leggono lo stesso ordine, il primo salva per primo
        let first = fetch_order(&server, "O1").await;
        let second = first.clone();

        server
            .put("/api/orders/O1")
            .add_header(header::AUTHORIZATION, admin_bearer())
            .json(&with_status(first, "confirm"))
            .await
            .assert_status_ok();

        let response = server
            .put("/api/orders/O1")
            .add_header(header::AUTHORIZATION, admin_bearer())
            .json(&with_status(second, "in-transit"))
            .await;

        response.assert_status(StatusCode::CONFLICT);
        let stored = fetch_order(&server, "O1").await;
        assert_eq!(stored["status"], "confirm");
    }

    #[tokio::test]
    async fn test_replace_order_without_version_last_write_wins() {
        let server = create_test_server(create_test_state(FIXTURES).await);

        let mut order = fetch_order(&server, "O2").await;
        order.as_object_mut().unwrap().remove("version");

        let response = server
            .put("/api/orders/O2")
            .add_header(header::AUTHORIZATION, admin_bearer())
            .json(&with_status(order, "in-transit"))
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["version"], 2);
    }

    #[tokio::test]
    async fn test_replace_delivered_order_is_accepted_by_default() {
        let server = create_test_server(create_test_state(FIXTURES).await);

        let order = fetch_order(&server, "O3").await;
        let response = server
            .put("/api/orders/O3")
            .add_header(header::AUTHORIZATION, admin_bearer())
            .json(&with_status(order, "pending"))
            .await;

        // Senza lock lato server il backend accetta la modifica
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["status"], "pending");
    }

    #[tokio::test]
    async fn test_replace_delivered_order_rejected_with_lock() {
        let server = create_test_server(create_locked_test_state(FIXTURES).await);

        let order = fetch_order(&server, "O3").await;
        let response = server
            .put("/api/orders/O3")
            .add_header(header::AUTHORIZATION, admin_bearer())
            .json(&with_status(order, "pending"))
            .await;

        response.assert_status(StatusCode::CONFLICT);
        assert_eq!(
            response.json::<Value>()["message"],
            "Cannot modify status of delivered orders"
        );
    }

    #[tokio::test]
    async fn test_replace_order_as_user_is_forbidden() {
        let server = create_test_server(create_test_state(FIXTURES).await);

        let order = fetch_order(&server, "O1").await;
        let response = server
            .put("/api/orders/O1")
            .add_header(header::AUTHORIZATION, alice_bearer())
            .json(&with_status(order, "delivered"))
            .await;

        response.assert_status(StatusCode::FORBIDDEN);
        assert_eq!(response.json::<Value>()["message"], "Admin access required");
    }

    #[tokio::test]
    async fn test_staff_with_admin_flag_can_replace() {
        let server = create_test_server(create_test_state(FIXTURES).await);

        let order = fetch_order(&server, "O1").await;
        let response = server
            .put("/api/orders/O1")
            .add_header(header::AUTHORIZATION, bearer("S1", "stella@shop.test"))
            .json(&with_status(order, "confirm"))
            .await;

        response.assert_status_ok();
    }

    // ============================================================
    // Test per PATCH /api/orders/{id}/status - update_order_status
    // ============================================================

    #[tokio::test]
    async fn test_patch_status() {
        let server = create_test_server(create_test_state(FIXTURES).await);

        let response = server
            .patch("/api/orders/O2/status")
            .add_header(header::AUTHORIZATION, admin_bearer())
            .json(&json!({ "status": "in-transit", "version": 1 }))
            .await;

        response.assert_status_ok();
        let order: Value = response.json();
        assert_eq!(order["status"], "in-transit");
        assert_eq!(order["version"], 2);
        assert_eq!(order["products"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_patch_status_stale_version() {
        let server = create_test_server(create_test_state(FIXTURES).await);

        let response = server
            .patch("/api/orders/O2/status")
            .add_header(header::AUTHORIZATION, admin_bearer())
            .json(&json!({ "status": "in-transit", "version": 7 }))
            .await;

        response.assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_patch_status_unknown_value() {
        let server = create_test_server(create_test_state(FIXTURES).await);

        let response = server
            .patch("/api/orders/O2/status")
            .add_header(header::AUTHORIZATION, admin_bearer())
            .json(&json!({ "status": "lost" }))
            .await;

        assert!(response.status_code().is_client_error());
    }

    // ============================================================
    // Test per PUT /api/orders/assign-rider/{id} - assign_rider
    // ============================================================

    #[tokio::test]
    async fn test_assign_rider_then_refetch() {
        let server = create_test_server(create_test_state(FIXTURES).await);

        let response = server
            .put("/api/orders/assign-rider/O2")
            .add_header(header::AUTHORIZATION, admin_bearer())
            .json(&json!({ "riderId": "R2" }))
            .await;

        response.assert_status_ok();
        let assigned: Value = response.json();
        assert_eq!(assigned["deliveryRider"], "R2");
        assert!(assigned["riderToken"].is_string());
        assert!(assigned["qr"].is_null());

        // Il pannello rilegge lista e dettaglio dopo l'assegnazione
        let list = server
            .get("/api/orders")
            .add_header(header::AUTHORIZATION, admin_bearer())
            .await;
        let orders: Vec<Value> = list.json();
        let o2 = orders.iter().find(|o| o["_id"] == "O2").unwrap();
        assert_eq!(o2["deliveryRider"], "R2");

        let detail = fetch_order(&server, "O2").await;
        assert_eq!(detail["deliveryRider"], "R2");
    }

    #[tokio::test]
    async fn test_assign_rider_missing_rider_id() {
        let server = create_test_server(create_test_state(FIXTURES).await);

        let response = server
            .put("/api/orders/assign-rider/O2")
            .add_header(header::AUTHORIZATION, admin_bearer())
            .json(&json!({}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["message"], "Rider ID is required");
    }

    #[tokio::test]
    async fn test_assign_rider_not_a_rider() {
        let server = create_test_server(create_test_state(FIXTURES).await);

        for rider_id in ["R99", "U1"] {
            let response = server
                .put("/api/orders/assign-rider/O2")
                .add_header(header::AUTHORIZATION, admin_bearer())
                .json(&json!({ "riderId": rider_id }))
                .await;

            response.assert_status_not_found();
            assert_eq!(response.json::<Value>()["message"], "Rider not found");
        }

        let order = fetch_order(&server, "O2").await;
        assert!(order["deliveryRider"].is_null());
    }

    #[tokio::test]
    async fn test_assign_rider_unknown_order() {
        let server = create_test_server(create_test_state(FIXTURES).await);

        let response = server
            .put("/api/orders/assign-rider/O99")
            .add_header(header::AUTHORIZATION, admin_bearer())
            .json(&json!({ "riderId": "R1" }))
            .await;

        response.assert_status_not_found();
        assert_eq!(response.json::<Value>()["message"], "Order not found");
    }

    // ============================================================
    // Test per PUT /api/orders/verify-delivery/{id} - verify_delivery
    // ============================================================

    #[tokio::test]
    async fn test_rider_confirms_delivery() {
        let server = create_test_server(create_test_state(FIXTURES).await);

        let assigned: Value = server
            .put("/api/orders/assign-rider/O2")
            .add_header(header::AUTHORIZATION, admin_bearer())
            .json(&json!({ "riderId": "R2" }))
            .await
            .json();
        let token = assigned["riderToken"].as_str().unwrap().to_string();

        // Un altro rider non può confermare
        server
            .put("/api/orders/verify-delivery/O2")
            .add_header(header::AUTHORIZATION, rita_bearer())
            .json(&json!({ "riderToken": token }))
            .await
            .assert_status(StatusCode::FORBIDDEN);

        let ravi = bearer("R2", "ravi@shop.test");
        let response = server
            .put("/api/orders/verify-delivery/O2")
            .add_header(header::AUTHORIZATION, ravi.clone())
            .json(&json!({ "riderToken": token }))
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["status"], "delivered");

        // Idempotente
        server
            .put("/api/orders/verify-delivery/O2")
            .add_header(header::AUTHORIZATION, ravi)
            .json(&json!({ "riderToken": token }))
            .await
            .assert_status_ok();
    }

    #[tokio::test]
    async fn test_verify_delivery_with_wrong_token() {
        let server = create_test_server(create_test_state(FIXTURES).await);

        server
            .put("/api/orders/assign-rider/O1")
            .add_header(header::AUTHORIZATION, admin_bearer())
            .json(&json!({ "riderId": "R1" }))
            .await
            .assert_status_ok();

        // Un token di sessione non è un token di consegna
        let response = server
            .put("/api/orders/verify-delivery/O1")
            .add_header(header::AUTHORIZATION, rita_bearer())
            .json(&json!({ "riderToken": create_test_jwt("R1", "rita@shop.test") }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["message"], "Invalid rider token");
    }

    // ============================================================
    // Test per DELETE /api/orders/{id} - delete_order
    // ============================================================

    #[tokio::test]
    async fn test_delete_order() {
        let server = create_test_server(create_test_state(FIXTURES).await);

        let response = server
            .delete("/api/orders/O1")
            .add_header(header::AUTHORIZATION, admin_bearer())
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["success"], true);

        server
            .delete("/api/orders/O1")
            .add_header(header::AUTHORIZATION, admin_bearer())
            .await
            .assert_status_not_found();
    }
}
