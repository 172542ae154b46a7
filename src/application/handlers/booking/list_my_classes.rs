//! ListMyClassesHandler - Query handler for a participant's class list.

use std::sync::Arc;

use crate::domain::booking::Booking;
use crate::domain::foundation::{MarketplaceError, UserId};
use crate::ports::{BookingRepository, Clock};

#[derive(Debug, Clone)]
pub struct ListMyClassesQuery {
    pub user: UserId,
}

/// Classes split around "now".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MyClasses {
    /// Soonest first.
    pub upcoming: Vec<Booking>,
    /// Most recent first.
    pub past: Vec<Booking>,
}

pub struct ListMyClassesHandler {
    bookings: Arc<dyn BookingRepository>,
    clock: Arc<dyn Clock>,
}

impl ListMyClassesHandler {
    pub fn new(bookings: Arc<dyn BookingRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { bookings, clock }
    }

    pub async fn handle(&self, query: ListMyClassesQuery) -> Result<MyClasses, MarketplaceError> {
        let now = self.clock.now();
        let (mut past, mut upcoming): (Vec<_>, Vec<_>) = self
            .bookings
            .list_for_participant(&query.user)
            .await?
            .into_iter()
            .filter(|b| b.status.is_visible_to_participants())
            .partition(|b| b.is_past(&now));

        upcoming.sort_by_key(|b| b.session_date);
        past.sort_by(|a, b| b.session_date.cmp(&a.session_date));

        Ok(MyClasses { upcoming, past })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::clock::FixedClock;
    use crate::adapters::memory::InMemoryBookingRepository;
    use crate::domain::booking::BookingStatus;
    use crate::domain::foundation::{BookingId, Timestamp};

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn ts(s: &str) -> Timestamp {
        Timestamp::parse_rfc3339("t", s).unwrap()
    }

    async fn add(repo: &InMemoryBookingRepository, student: &str, at: &str, status: BookingStatus) -> Booking {
        let mut booking =
            Booking::create_pending(BookingId::new(), user(student), user("tutor-1"), "Algebra", ts(at)).unwrap();
        match status {
            BookingStatus::PendingPayment => {}
            BookingStatus::Scheduled => booking.confirm().unwrap(),
            BookingStatus::Completed => {
                booking.confirm().unwrap();
                booking.complete().unwrap();
            }
            BookingStatus::RescheduleRequested => {
                booking.confirm().unwrap();
                booking.request_reschedule(&user(student)).unwrap();
            }
            BookingStatus::Cancelled => booking.cancel().unwrap(),
        }
        repo.save(&booking).await.unwrap();
        booking
    }

    #[tokio::test]
    async fn splits_and_orders_visible_classes() {
        let repo = InMemoryBookingRepository::new();
        let later = add(&repo, "student-1", "2025-03-20T10:00:00Z", BookingStatus::Scheduled).await;
        let sooner = add(&repo, "student-1", "2025-03-12T10:00:00Z", BookingStatus::RescheduleRequested).await;
        let elapsed = add(&repo, "student-1", "2025-03-05T10:00:00Z", BookingStatus::Scheduled).await;
        let older = add(&repo, "student-1", "2025-03-01T10:00:00Z", BookingStatus::Completed).await;
        add(&repo, "student-1", "2025-03-15T10:00:00Z", BookingStatus::PendingPayment).await;
        add(&repo, "student-1", "2025-03-16T10:00:00Z", BookingStatus::Cancelled).await;
        add(&repo, "student-2", "2025-03-18T10:00:00Z", BookingStatus::Scheduled).await;

        let handler = ListMyClassesHandler::new(Arc::new(repo), Arc::new(FixedClock::at(ts("2025-03-10T00:00:00Z"))));
        let classes = handler
            .handle(ListMyClassesQuery { user: user("student-1") })
            .await
            .unwrap();

        let ids = |v: &[Booking]| v.iter().map(|b| b.id).collect::<Vec<_>>();
        assert_eq!(ids(&classes.upcoming), vec![sooner.id, later.id]);
        assert_eq!(ids(&classes.past), vec![elapsed.id, older.id]);
    }

    #[tokio::test]
    async fn tutor_sees_every_student() {
        let repo = InMemoryBookingRepository::new();
        add(&repo, "student-1", "2025-03-20T10:00:00Z", BookingStatus::Scheduled).await;
        add(&repo, "student-2", "2025-03-21T10:00:00Z", BookingStatus::Scheduled).await;

        let handler = ListMyClassesHandler::new(Arc::new(repo), Arc::new(FixedClock::at(ts("2025-03-10T00:00:00Z"))));
        let classes = handler.handle(ListMyClassesQuery { user: user("tutor-1") }).await.unwrap();

        assert_eq!(classes.upcoming.len(), 2);
        assert!(classes.past.is_empty());
    }
}
