//! End-to-end booking lifecycle over the in-memory adapters.
//!
//! Checkout creates a pending booking, the signed payment webhook fulfills it,
//! and the participants then see, reschedule and rate the class.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use yourtutor::adapters::clock::FixedClock;
use yourtutor::adapters::memory::{
    InMemoryBookingRepository, InMemoryFeedbackRepository, InMemoryTutorProfileRepository, InMemoryUserDirectory,
};
use yourtutor::adapters::notification::RecordingNotifier;
use yourtutor::adapters::stripe::MockPaymentProvider;
use yourtutor::adapters::zoom::MockMeetingProvider;
use yourtutor::application::handlers::booking::{
    CheckoutSettings, CreateCheckoutCommand, CreateCheckoutHandler, FulfillBookingHandler, FulfillmentOutcome,
    FulfillmentSettings, HandlePaymentWebhookCommand, HandlePaymentWebhookHandler, HandlePaymentWebhookResult,
    ListMyClassesHandler, ListMyClassesQuery, RequestRescheduleCommand, RequestRescheduleHandler,
    SubmitFeedbackCommand, SubmitFeedbackHandler, SubmitFeedbackResult,
};
use yourtutor::domain::availability::{AvailabilitySchedule, AvailabilitySlot};
use yourtutor::domain::booking::BookingStatus;
use yourtutor::domain::foundation::{AuthenticatedUser, BookingId, MarketplaceError, Timestamp, UserId};
use yourtutor::domain::tutor::{ProfileDetails, TutorProfile, UserAccount};
use yourtutor::ports::{AvailabilityStore, MeetingErrorKind, Notification};

const SESSION_AT: &str = "2030-05-06T15:00:00Z";

fn user(id: &str) -> UserId {
    UserId::new(id).unwrap()
}

fn session_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2030, 5, 6).unwrap()
}

struct Marketplace {
    bookings: InMemoryBookingRepository,
    profiles: InMemoryTutorProfileRepository,
    feedback: InMemoryFeedbackRepository,
    users: InMemoryUserDirectory,
    payments: MockPaymentProvider,
    meetings: MockMeetingProvider,
    notifier: RecordingNotifier,
    clock: FixedClock,
}

impl Marketplace {
    async fn new(meetings: MockMeetingProvider) -> Self {
        let users = InMemoryUserDirectory::new();
        users
            .insert(UserAccount::approved_tutor(user("tutor-1"), "Tess", "tess@example.com"))
            .await;
        users
            .insert(UserAccount::student(user("student-1"), "Sam", "sam@example.com"))
            .await;

        let profiles = InMemoryTutorProfileRepository::new();
        let schedule = AvailabilitySchedule::from_slots(vec![
            AvailabilitySlot::parse(session_day(), "15:00", "16:00").unwrap(),
            AvailabilitySlot::parse(session_day(), "17:00", "18:00").unwrap(),
        ])
        .unwrap();
        let details = ProfileDetails {
            bio: "Calculus and linear algebra".to_string(),
            hourly_rate: 42.5,
            subjects: vec!["Calculus".to_string()],
            experience_years: Some(6),
            teaching_style: None,
            is_online: true,
            is_in_person: false,
            qualifications: vec![],
        };
        profiles
            .insert(TutorProfile::new(user("tutor-1"), details, schedule).unwrap())
            .await;

        Self {
            bookings: InMemoryBookingRepository::new(),
            profiles,
            feedback: InMemoryFeedbackRepository::new(),
            users,
            payments: MockPaymentProvider::new(),
            meetings,
            notifier: RecordingNotifier::new(),
            clock: FixedClock::at(Timestamp::parse_rfc3339("now", "2030-05-01T09:00:00Z").unwrap()),
        }
    }

    fn checkout(&self) -> CreateCheckoutHandler {
        CreateCheckoutHandler::new(
            Arc::new(self.bookings.clone()),
            Arc::new(self.profiles.clone()),
            Arc::new(self.profiles.clone()),
            Arc::new(self.users.clone()),
            Arc::new(self.payments.clone()),
            CheckoutSettings::new("https://app.yourtutor.test/", "USD"),
        )
    }

    fn webhook(&self) -> HandlePaymentWebhookHandler {
        let fulfillment = FulfillBookingHandler::new(
            Arc::new(self.bookings.clone()),
            Arc::new(self.profiles.clone()),
            Arc::new(self.users.clone()),
            Arc::new(self.meetings.clone()),
            Arc::new(self.notifier.clone()),
            Arc::new(self.clock.clone()),
            FulfillmentSettings {
                meeting_timeout: Duration::from_secs(1),
                ..FulfillmentSettings::default()
            },
        );
        HandlePaymentWebhookHandler::new(Arc::new(self.payments.clone()), Arc::new(fulfillment))
    }

    async fn book(&self, start_time: &str, session_at: &str) -> Result<(BookingId, String), MarketplaceError> {
        let result = self
            .checkout()
            .handle(CreateCheckoutCommand {
                student: AuthenticatedUser::new(user("student-1"), "sam@example.com", Some("Sam".to_string())),
                tutor_id: user("tutor-1"),
                subject: "Calculus".to_string(),
                session_date: session_at.to_string(),
                start_time: start_time.to_string(),
            })
            .await?;
        Ok((result.booking_id, result.session_id))
    }
}

/// Body shaped like a provider `checkout.session.completed` delivery.
fn completed_payload(booking_id: &BookingId, session_id: &str, start_time: &str) -> Vec<u8> {
    serde_json::json!({
        "id": "evt_test_1",
        "type": "checkout.session.completed",
        "created": 1_893_488_400,
        "data": { "object": {
            "id": session_id,
            "payment_status": "paid",
            "metadata": {
                "bookingId": booking_id.to_string(),
                "studentId": "student-1",
                "tutorId": "tutor-1",
                "startTime": start_time,
            }
        }}
    })
    .to_string()
    .into_bytes()
}

fn delivery(payload: Vec<u8>) -> HandlePaymentWebhookCommand {
    HandlePaymentWebhookCommand {
        payload,
        signature: "t=1,v1=mock".to_string(),
    }
}

#[tokio::test]
async fn paid_checkout_schedules_the_class_and_consumes_the_slot() {
    let market = Marketplace::new(MockMeetingProvider::new()).await;

    let (booking_id, session_id) = market.book("15:00", SESSION_AT).await.unwrap();
    let request = &market.payments.checkout_requests()[0];
    assert_eq!(request.unit_amount, 4250);
    assert_eq!(request.currency, "usd");
    assert_eq!(
        market.bookings.get(&booking_id).await.unwrap().status,
        BookingStatus::PendingPayment
    );

    let result = market
        .webhook()
        .handle(delivery(completed_payload(&booking_id, &session_id, "15:00")))
        .await
        .unwrap();

    assert_eq!(
        result,
        HandlePaymentWebhookResult::Fulfillment(FulfillmentOutcome::Fulfilled {
            booking_id,
            slot_removed: true,
            meeting_attached: true,
            notified: true,
        })
    );

    let booking = market.bookings.get(&booking_id).await.unwrap();
    assert_eq!(booking.status, BookingStatus::Scheduled);
    assert!(booking.meeting.is_some());

    let remaining = market.profiles.list_slots(&user("tutor-1")).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].start_time.to_string(), "17:00");

    assert_eq!(market.notifier.kinds(), vec!["booking_confirmed"]);
    assert!(matches!(
        &market.notifier.sent()[0],
        Notification::BookingConfirmed { .. }
    ));

    let classes = ListMyClassesHandler::new(Arc::new(market.bookings.clone()), Arc::new(market.clock.clone()))
        .handle(ListMyClassesQuery { user: user("student-1") })
        .await
        .unwrap();
    assert_eq!(classes.upcoming.len(), 1);
    assert!(classes.past.is_empty());
}

#[tokio::test]
async fn redelivered_event_is_acknowledged_without_side_effects() {
    let market = Marketplace::new(MockMeetingProvider::new()).await;
    let (booking_id, session_id) = market.book("15:00", SESSION_AT).await.unwrap();
    let webhook = market.webhook();

    webhook
        .handle(delivery(completed_payload(&booking_id, &session_id, "15:00")))
        .await
        .unwrap();
    let again = webhook
        .handle(delivery(completed_payload(&booking_id, &session_id, "15:00")))
        .await
        .unwrap();

    assert_eq!(
        again,
        HandlePaymentWebhookResult::Fulfillment(FulfillmentOutcome::AlreadyProcessed { booking_id })
    );
    assert!(!again.requires_redelivery());
    assert_eq!(market.meetings.call_count(), 1);
    assert_eq!(market.notifier.sent().len(), 1);
}

#[tokio::test]
async fn concurrent_deliveries_provision_one_meeting() {
    let market = Marketplace::new(MockMeetingProvider::slow(Duration::from_millis(50))).await;
    let (booking_id, session_id) = market.book("15:00", SESSION_AT).await.unwrap();
    let webhook = market.webhook();

    let (first, second) = tokio::join!(
        webhook.handle(delivery(completed_payload(&booking_id, &session_id, "15:00"))),
        webhook.handle(delivery(completed_payload(&booking_id, &session_id, "15:00"))),
    );
    let outcomes = [first.unwrap(), second.unwrap()];

    let fulfilled = outcomes
        .iter()
        .filter(|o| matches!(o, HandlePaymentWebhookResult::Fulfillment(FulfillmentOutcome::Fulfilled { .. })))
        .count();
    assert_eq!(fulfilled, 1);
    assert_eq!(outcomes.iter().filter(|o| o.requires_redelivery()).count(), 1);
    assert_eq!(market.meetings.call_count(), 1);
    assert_eq!(market.notifier.sent().len(), 1);
}

#[tokio::test]
async fn meeting_outage_still_schedules_the_booking() {
    let market = Marketplace::new(MockMeetingProvider::failing(MeetingErrorKind::Provider)).await;
    let (booking_id, session_id) = market.book("15:00", SESSION_AT).await.unwrap();

    let result = market
        .webhook()
        .handle(delivery(completed_payload(&booking_id, &session_id, "15:00")))
        .await
        .unwrap();

    assert!(matches!(
        result,
        HandlePaymentWebhookResult::Fulfillment(FulfillmentOutcome::Fulfilled {
            meeting_attached: false,
            slot_removed: true,
            ..
        })
    ));
    let booking = market.bookings.get(&booking_id).await.unwrap();
    assert_eq!(booking.status, BookingStatus::Scheduled);
    assert!(booking.meeting.is_none());
}

#[tokio::test]
async fn consumed_slot_cannot_be_checked_out_again() {
    let market = Marketplace::new(MockMeetingProvider::new()).await;
    let (booking_id, session_id) = market.book("15:00", SESSION_AT).await.unwrap();
    market
        .webhook()
        .handle(delivery(completed_payload(&booking_id, &session_id, "15:00")))
        .await
        .unwrap();

    let err = market.book("15:00", SESSION_AT).await.unwrap_err();

    assert!(matches!(err, MarketplaceError::Conflict { .. }));
    assert_eq!(market.payments.checkout_requests().len(), 1);
}

#[tokio::test]
async fn scheduled_class_can_be_rated_once_but_not_after_reschedule_request() {
    let market = Marketplace::new(MockMeetingProvider::new()).await;
    let (first_id, first_session) = market.book("15:00", SESSION_AT).await.unwrap();
    let (second_id, second_session) = market.book("17:00", "2030-05-06T17:00:00Z").await.unwrap();
    let webhook = market.webhook();
    for (id, session, start) in [(&first_id, &first_session, "15:00"), (&second_id, &second_session, "17:00")] {
        webhook
            .handle(delivery(completed_payload(id, session, start)))
            .await
            .unwrap();
    }

    let feedback = SubmitFeedbackHandler::new(Arc::new(market.bookings.clone()), Arc::new(market.feedback.clone()));
    let rate = |booking_id: BookingId| SubmitFeedbackCommand {
        booking_id,
        submitter: user("student-1"),
        rating: 5,
        comment: Some("Clear explanations".to_string()),
    };

    assert!(matches!(
        feedback.handle(rate(first_id)).await.unwrap(),
        SubmitFeedbackResult::Submitted(_)
    ));
    assert_eq!(
        feedback.handle(rate(first_id)).await.unwrap(),
        SubmitFeedbackResult::AlreadySubmitted
    );
    assert_eq!(market.feedback.count().await, 1);

    let reschedule = RequestRescheduleHandler::new(
        Arc::new(market.bookings.clone()),
        Arc::new(market.users.clone()),
        Arc::new(market.notifier.clone()),
    );
    let booking = reschedule
        .handle(RequestRescheduleCommand {
            booking_id: second_id,
            requester: user("tutor-1"),
            reason: "Conference travel that week".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(booking.status, BookingStatus::RescheduleRequested);
    assert!(market.notifier.kinds().contains(&"reschedule_requested"));

    let err = feedback.handle(rate(second_id)).await.unwrap_err();
    assert!(matches!(err, MarketplaceError::InvalidState { .. }));
}
