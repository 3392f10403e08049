//! Entity endpoints against a mock backend: bearer attachment, role-scoped
//! listings, partial updates and list decoding.

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use limpiar_api::types::{NewProperty, PropertyUpdate, UserUpdate};
use limpiar_api::{ApiError, BookingStatus, LimpiarClient, PaymentStatus, PropertyStatus, Role};

fn authed_client(server: &MockServer) -> LimpiarClient {
    LimpiarClient::with_base_url(server.uri()).with_token("tok-abc".into())
}

fn user_body(id: &str, name: &str, role: &str) -> serde_json::Value {
    json!({
        "_id": id,
        "fullName": name,
        "email": format!("{}@limpiar.online", id),
        "phoneNumber": "+15551230000",
        "role": role,
        "isVerified": true,
        "availability": false,
        "createdAt": "2024-03-01T12:00:00Z",
        "updatedAt": "2024-03-05T09:30:00Z"
    })
}

#[tokio::test]
async fn list_users_attaches_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .and(header("authorization", "Bearer tok-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            user_body("u1", "Ada Admin", "admin"),
            user_body("u2", "Lia Limpiadora", "limpiador"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let users = authed_client(&server).list_users().await.unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[1].role, Role::Limpiador);
}

#[tokio::test]
async fn unauthenticated_calls_fail_without_a_request() {
    let server = MockServer::start().await;
    let client = LimpiarClient::with_base_url(server.uri());
    let err = client.list_users().await.unwrap_err();
    assert!(matches!(err, ApiError::NotAuthenticated));
}

#[tokio::test]
async fn role_listing_uses_scoped_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/cleaning-businesses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            user_body("b1", "Sparkle Co", "cleaning-business"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let users = authed_client(&server)
        .list_users_by_role(Role::CleaningBusiness)
        .await
        .unwrap();
    assert_eq!(users[0].full_name, "Sparkle Co");
}

#[tokio::test]
async fn admin_role_listing_filters_the_full_list() {
    // No /users/admins endpoint exists; the client filters /users.
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            user_body("u1", "Ada Admin", "admin"),
            user_body("u2", "Pat Manager", "property-manager"),
        ])))
        .mount(&server)
        .await;

    let admins = authed_client(&server)
        .list_users_by_role(Role::Admin)
        .await
        .unwrap();
    assert_eq!(admins.len(), 1);
    assert_eq!(admins[0].full_name, "Ada Admin");
}

#[tokio::test]
async fn snake_case_roles_still_deserialize() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            user_body("u1", "Old Record", "property_manager"),
            user_body("u2", "Older Record", "cleaner"),
        ])))
        .mount(&server)
        .await;

    let users = authed_client(&server).list_users().await.unwrap();
    assert_eq!(users[0].role, Role::PropertyManager);
    assert_eq!(users[1].role, Role::Limpiador);
}

#[tokio::test]
async fn update_user_sends_only_set_fields() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/users/u1"))
        .and(body_json(json!({"availability": true})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(user_body("u1", "Ada Admin", "admin")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let update = UserUpdate {
        availability: Some(true),
        ..Default::default()
    };
    authed_client(&server).update_user("u1", &update).await.unwrap();
}

fn property_body(id: &str, status: &str) -> serde_json::Value {
    json!({
        "_id": id,
        "name": "Harbor Lofts",
        "address": "12 Dock St",
        "type": "residential",
        "subType": "apartment",
        "size": "12000 sqft",
        "propertyManagerId": "u2",
        "status": status,
        "createdAt": "2024-04-01T08:00:00Z",
        "updatedAt": "2024-04-02T08:00:00Z"
    })
}

#[tokio::test]
async fn property_create_update_delete_roundtrip() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/properties"))
        .and(body_json(json!({
            "name": "Harbor Lofts",
            "address": "12 Dock St",
            "type": "residential",
            "subType": "apartment",
            "size": "12000 sqft",
            "propertyManagerId": "u2"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(property_body("p1", "pending")))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/properties/p1"))
        .and(body_json(json!({"size": "14000 sqft"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(property_body("p1", "pending")))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/properties/p1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"message": "Property deleted"})),
        )
        .mount(&server)
        .await;

    let client = authed_client(&server);
    let created = client
        .create_property(&NewProperty {
            name: "Harbor Lofts".into(),
            address: "12 Dock St".into(),
            property_type: "residential".into(),
            sub_type: "apartment".into(),
            size: "12000 sqft".into(),
            property_manager_id: "u2".into(),
        })
        .await
        .unwrap();
    assert_eq!(created.status, PropertyStatus::Pending);

    client
        .update_property(
            "p1",
            &PropertyUpdate {
                size: Some("14000 sqft".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let deleted = client.delete_property("p1").await.unwrap();
    assert_eq!(deleted.message.as_deref(), Some("Property deleted"));
}

#[tokio::test]
async fn verify_property_creation_posts_both_ids() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/properties/verify-creation"))
        .and(body_json(json!({
            "propertyId": "p1",
            "propertyManagerId": "u2"
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"message": "Property verified"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    authed_client(&server)
        .verify_property_creation("p1", "u2")
        .await
        .unwrap();
}

#[tokio::test]
async fn payments_decode_statuses_and_payer() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/payments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "_id": "t1",
            "userId": {"fullName": "Pat Manager", "email": "pat@limpiar.online"},
            "amount": 249.5,
            "currency": "usd",
            "status": "succeeded",
            "paymentIntentId": "pi_123",
            "reference": "LMP-0042",
            "createdAt": "2024-05-01T10:00:00Z",
            "updatedAt": "2024-05-01T10:05:00Z"
        }])))
        .mount(&server)
        .await;

    let payments = authed_client(&server).list_payments().await.unwrap();
    assert_eq!(payments[0].status, PaymentStatus::Succeeded);
    assert_eq!(payments[0].payer.full_name, "Pat Manager");
}

#[tokio::test]
async fn bookings_decode_spaced_statuses() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bookings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "b1",
            "property": "Harbor Lofts",
            "cleaningBusiness": "Sparkle Co",
            "service": "Deep clean",
            "amount": "$250",
            "date": "2024-06-12",
            "time": "09:00",
            "status": "On Hold",
            "additionalNote": ""
        }, {
            "id": "b2",
            "property": "Dockside Offices",
            "service": "Routine",
            "amount": "$90",
            "date": "2024-06-14",
            "time": "14:00",
            "status": "Not Started"
        }])))
        .mount(&server)
        .await;

    let bookings = authed_client(&server).list_bookings().await.unwrap();
    assert_eq!(bookings[0].status, BookingStatus::OnHold);
    assert_eq!(bookings[1].status, BookingStatus::NotStarted);
    assert!(bookings[1].cleaning_business.is_none());
}
