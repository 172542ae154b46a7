//! HTTP surface tests: the full router over in-memory adapters and mock providers.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::NaiveDate;
use serde_json::{json, Value};
use tower::ServiceExt;

use yourtutor::adapters::auth::MockSessionValidator;
use yourtutor::adapters::clock::FixedClock;
use yourtutor::adapters::http::{api_router, AppState, RouterSettings};
use yourtutor::adapters::memory::{
    InMemoryBookingRepository, InMemoryFeedbackRepository, InMemoryInquiryRepository, InMemoryMessageRepository,
    InMemoryTutorProfileRepository, InMemoryUserDirectory,
};
use yourtutor::adapters::notification::RecordingNotifier;
use yourtutor::adapters::stripe::MockPaymentProvider;
use yourtutor::adapters::zoom::MockMeetingProvider;
use yourtutor::application::handlers::booking::{CheckoutSettings, FulfillmentSettings};
use yourtutor::domain::availability::{AvailabilitySchedule, AvailabilitySlot};
use yourtutor::domain::foundation::{AuthenticatedUser, Timestamp, UserId};
use yourtutor::domain::tutor::{ProfileDetails, TutorProfile, UserAccount};

fn user(id: &str) -> UserId {
    UserId::new(id).unwrap()
}

fn identity(id: &str, email: &str) -> AuthenticatedUser {
    AuthenticatedUser::new(user(id), email, None)
}

struct TestApp {
    router: Router,
    payments: MockPaymentProvider,
    notifier: RecordingNotifier,
}

async fn app() -> TestApp {
    let users = InMemoryUserDirectory::new();
    users
        .insert(UserAccount::approved_tutor(user("tutor-1"), "Tess", "tess@example.com"))
        .await;
    users
        .insert(UserAccount::student(user("student-1"), "Sam", "sam@example.com"))
        .await;
    users
        .insert(UserAccount::student(user("applicant-1"), "Ana", "ana@example.com"))
        .await;
    let mut admin = UserAccount::student(user("admin-1"), "Ada", "ada@example.com");
    admin.is_admin = true;
    users.insert(admin).await;

    let profiles = InMemoryTutorProfileRepository::new();
    let day = NaiveDate::from_ymd_opt(2030, 5, 6).unwrap();
    let schedule = AvailabilitySchedule::from_slots(vec![AvailabilitySlot::parse(day, "15:00", "16:00").unwrap()]).unwrap();
    let details = ProfileDetails {
        bio: "Organic chemistry".to_string(),
        hourly_rate: 30.0,
        subjects: vec!["Chemistry".to_string()],
        experience_years: None,
        teaching_style: None,
        is_online: true,
        is_in_person: false,
        qualifications: vec![],
    };
    profiles
        .insert(TutorProfile::new(user("tutor-1"), details, schedule).unwrap())
        .await;

    let payments = MockPaymentProvider::new();
    let notifier = RecordingNotifier::new();
    let state = AppState {
        bookings: Arc::new(InMemoryBookingRepository::new()),
        profiles: Arc::new(profiles.clone()),
        availability: Arc::new(profiles),
        users: Arc::new(users),
        feedback: Arc::new(InMemoryFeedbackRepository::new()),
        messages: Arc::new(InMemoryMessageRepository::new()),
        inquiries: Arc::new(InMemoryInquiryRepository::new()),
        payment_provider: Arc::new(payments.clone()),
        meeting_provider: Arc::new(MockMeetingProvider::new()),
        notifier: Arc::new(notifier.clone()),
        clock: Arc::new(FixedClock::at(
            Timestamp::parse_rfc3339("now", "2030-05-01T09:00:00Z").unwrap(),
        )),
        checkout: CheckoutSettings::new("https://app.yourtutor.test", "usd"),
        fulfillment: FulfillmentSettings::default(),
    };

    let validator = MockSessionValidator::new()
        .with_user("student-token", identity("student-1", "sam@example.com"))
        .with_user("tutor-token", identity("tutor-1", "tess@example.com"))
        .with_user("applicant-token", identity("applicant-1", "ana@example.com"))
        .with_user("admin-token", identity("admin-1", "ada@example.com"));

    let settings = RouterSettings {
        request_timeout: Duration::from_secs(5),
        cors_origins: vec![],
    };

    TestApp {
        router: api_router(state, Arc::new(validator), &settings),
        payments,
        notifier,
    }
}

async fn send(router: &Router, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

async fn webhook(router: &Router, signature: Option<&str>, payload: Value) -> StatusCode {
    let mut builder = Request::builder().method("POST").uri("/api/webhooks/stripe");
    if let Some(signature) = signature {
        builder = builder.header("stripe-signature", signature);
    }
    let request = builder.body(Body::from(payload.to_string())).unwrap();
    router.clone().oneshot(request).await.unwrap().status()
}

fn checkout_body() -> Value {
    json!({
        "tutorId": "tutor-1",
        "subject": "Chemistry",
        "sessionDate": "2030-05-06T15:00:00Z",
        "startTime": "15:00",
    })
}

#[tokio::test]
async fn health_is_public() {
    let app = app().await;
    let (status, _) = send(&app.router, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn protected_routes_require_a_caller() {
    let app = app().await;

    let (status, body) = send(&app.router, "GET", "/api/my-classes", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["code"].is_string());

    let (status, _) = send(&app.router, "GET", "/api/my-classes", Some("forged"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn checkout_then_webhook_lists_the_class_for_both_participants() {
    let app = app().await;

    let (status, checkout) = send(&app.router, "POST", "/api/checkout", Some("student-token"), Some(checkout_body())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(checkout["url"].as_str().unwrap().starts_with("https://checkout.stripe.com/"));
    assert_eq!(app.payments.checkout_requests()[0].unit_amount, 3000);

    let payload = json!({
        "id": "evt_1",
        "type": "checkout.session.completed",
        "data": { "object": {
            "id": checkout["sessionId"],
            "payment_status": "paid",
            "metadata": { "bookingId": checkout["bookingId"], "startTime": "15:00" }
        }}
    });
    assert_eq!(webhook(&app.router, Some("t=1,v1=abc"), payload).await, StatusCode::OK);
    assert_eq!(app.notifier.kinds(), vec!["booking_confirmed"]);

    let (status, student_view) = send(&app.router, "GET", "/api/my-classes", Some("student-token"), None).await;
    assert_eq!(status, StatusCode::OK);
    let class = &student_view["upcoming"][0];
    assert_eq!(class["status"], "scheduled");
    assert!(class["meeting"]["joinUrl"].is_string());
    assert!(class["meeting"].get("hostUrl").is_none());

    let (_, tutor_view) = send(&app.router, "GET", "/api/my-classes", Some("tutor-token"), None).await;
    assert!(tutor_view["upcoming"][0]["meeting"]["hostUrl"].is_string());

    let (_, slots) = send(&app.router, "GET", "/api/tutors/tutor-1/availability", None, None).await;
    assert_eq!(slots["slots"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn checkout_for_unpublished_slot_conflicts() {
    let app = app().await;
    let mut body = checkout_body();
    body["startTime"] = json!("09:00");
    body["sessionDate"] = json!("2030-05-06T09:00:00Z");

    let (status, error) = send(&app.router, "POST", "/api/checkout", Some("student-token"), Some(body)).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["code"], "SLOT_UNAVAILABLE");
    assert!(app.payments.checkout_requests().is_empty());
}

#[tokio::test]
async fn checkout_rejects_malformed_start_time() {
    let app = app().await;
    let mut body = checkout_body();
    body["startTime"] = json!("3pm");

    let (status, _) = send(&app.router, "POST", "/api/checkout", Some("student-token"), Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn webhook_without_signature_is_rejected() {
    let app = app().await;
    let status = webhook(&app.router, None, json!({ "type": "checkout.session.completed" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_webhook_event_is_acknowledged() {
    let app = app().await;
    let status = webhook(&app.router, Some("t=1,v1=abc"), json!({ "type": "invoice.paid", "data": { "object": {} } })).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn public_profile_hides_applicants() {
    let app = app().await;

    let (status, profile) = send(&app.router, "GET", "/api/tutors/tutor-1", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["name"], "Tess");
    assert_eq!(profile["availability"].as_array().unwrap().len(), 1);

    let (status, _) = send(&app.router, "GET", "/api/tutors/applicant-1", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn application_review_round_trip() {
    let app = app().await;
    let profile = json!({
        "bio": "Mechanics and thermodynamics",
        "hourlyRate": 25.0,
        "subjects": ["Physics"],
        "availability": [{ "date": "2030-05-07", "startTime": "10:00", "endTime": "11:00" }],
    });

    let (status, saved) = send(&app.router, "POST", "/api/tutor/profile", Some("applicant-token"), Some(profile)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(saved["tutorStatus"], "pending");

    let (status, _) = send(
        &app.router,
        "POST",
        "/api/admin/tutors/applicant-1/review",
        Some("student-token"),
        Some(json!({ "decision": "approve" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &app.router,
        "POST",
        "/api/admin/tutors/applicant-1/review",
        Some("admin-token"),
        Some(json!({ "decision": "approve" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(app.notifier.kinds().contains(&"tutor_status_changed"));

    let (status, _) = send(&app.router, "GET", "/api/tutors/applicant-1", None, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn messages_are_marked_read_when_the_conversation_is_opened() {
    let app = app().await;

    let (status, sent) = send(
        &app.router,
        "POST",
        "/api/messages",
        Some("student-token"),
        Some(json!({ "receiverId": "tutor-1", "text": "Can we cover titration?" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(sent["isRead"], false);

    let (_, unread) = send(&app.router, "GET", "/api/messages/unread-count", Some("tutor-token"), None).await;
    assert_eq!(unread["count"], 1);

    let (status, conversation) = send(&app.router, "GET", "/api/messages/student-1", Some("tutor-token"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(conversation["messages"].as_array().unwrap().len(), 1);

    let (_, unread) = send(&app.router, "GET", "/api/messages/unread-count", Some("tutor-token"), None).await;
    assert_eq!(unread["count"], 0);
}

#[tokio::test]
async fn empty_message_is_rejected() {
    let app = app().await;
    let (status, _) = send(
        &app.router,
        "POST",
        "/api/messages",
        Some("student-token"),
        Some(json!({ "receiverId": "tutor-1", "text": "   " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn contact_form_is_public_and_listed_for_admins() {
    let app = app().await;
    let inquiry = json!({
        "name": "Priya",
        "email": "Priya@Example.com",
        "message": "Do you offer GCSE chemistry tutoring?"
    });

    let (status, body) = send(&app.router, "POST", "/api/contact", None, Some(inquiry)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert!(app.notifier.kinds().contains(&"inquiry_received"));

    let (status, _) = send(&app.router, "GET", "/api/admin/inquiries", Some("student-token"), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&app.router, "GET", "/api/admin/inquiries?limit=10", Some("admin-token"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["inquiries"][0]["email"], "priya@example.com");
    assert!(body["inquiries"][0].get("subject").is_none());
}

#[tokio::test]
async fn contact_form_rejects_short_message() {
    let app = app().await;
    let inquiry = json!({ "name": "Priya", "email": "priya@example.com", "message": "Hello" });

    let (status, body) = send(&app.router, "POST", "/api/contact", None, Some(inquiry)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "message");
}
