//! ReviewTutorApplicationHandler - Admin approves or rejects an applicant.

use std::sync::Arc;

use crate::domain::foundation::{MarketplaceError, UserId};
use crate::domain::tutor::{ReviewDecision, UserAccount};
use crate::ports::{Contact, Notification, Notifier, UserDirectory};

#[derive(Debug, Clone)]
pub struct ReviewTutorApplicationCommand {
    pub admin: UserId,
    pub tutor_id: UserId,
    pub decision: ReviewDecision,
}

pub struct ReviewTutorApplicationHandler {
    users: Arc<dyn UserDirectory>,
    notifier: Arc<dyn Notifier>,
}

impl ReviewTutorApplicationHandler {
    pub fn new(users: Arc<dyn UserDirectory>, notifier: Arc<dyn Notifier>) -> Self {
        Self { users, notifier }
    }

    pub async fn handle(&self, cmd: ReviewTutorApplicationCommand) -> Result<UserAccount, MarketplaceError> {
        let is_admin = self
            .users
            .find_by_id(&cmd.admin)
            .await?
            .map(|a| a.is_admin)
            .unwrap_or(false);
        if !is_admin {
            return Err(MarketplaceError::forbidden("admin access required"));
        }

        let mut applicant = self
            .users
            .find_by_id(&cmd.tutor_id)
            .await?
            .ok_or_else(|| MarketplaceError::not_found("User", &cmd.tutor_id))?;

        applicant.apply_review(&cmd.decision)?;
        self.users.update(&applicant).await?;
        tracing::info!(
            tutor_id = %applicant.id,
            admin_id = %cmd.admin,
            status = %applicant.tutor_status,
            "Tutor application reviewed"
        );

        let notification = Notification::TutorStatusChanged {
            tutor: Contact::from(&applicant),
            status: applicant.tutor_status,
            reason: applicant.rejection_reason.clone(),
        };
        if let Err(err) = self.notifier.notify(notification).await {
            tracing::warn!(tutor_id = %applicant.id, error = %err, "Failed to notify tutor of review decision");
        }

        Ok(applicant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryUserDirectory;
    use crate::adapters::notification::RecordingNotifier;
    use crate::domain::tutor::{TutorStatus, UserRole};

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    async fn setup() -> (InMemoryUserDirectory, RecordingNotifier, ReviewTutorApplicationHandler) {
        let users = InMemoryUserDirectory::new();
        let mut admin = UserAccount::student(user("admin-1"), "Ada", "ada@example.com");
        admin.is_admin = true;
        users.insert(admin).await;

        let mut applicant = UserAccount::student(user("applicant"), "Ana", "ana@example.com");
        applicant.submit_application().unwrap();
        users.insert(applicant).await;

        let notifier = RecordingNotifier::new();
        let handler = ReviewTutorApplicationHandler::new(Arc::new(users.clone()), Arc::new(notifier.clone()));
        (users, notifier, handler)
    }

    fn cmd(admin: &str, decision: ReviewDecision) -> ReviewTutorApplicationCommand {
        ReviewTutorApplicationCommand {
            admin: user(admin),
            tutor_id: user("applicant"),
            decision,
        }
    }

    #[tokio::test]
    async fn approval_promotes_and_notifies() {
        let (users, notifier, handler) = setup().await;

        let account = handler.handle(cmd("admin-1", ReviewDecision::Approve)).await.unwrap();

        assert!(account.is_approved_tutor());
        assert_eq!(users.find_by_id(&user("applicant")).await.unwrap().unwrap().role, UserRole::Tutor);
        assert!(matches!(
            &notifier.sent()[0],
            Notification::TutorStatusChanged { status: TutorStatus::Approved, reason: None, .. }
        ));
    }

    #[tokio::test]
    async fn rejection_records_reason() {
        let (_, notifier, handler) = setup().await;

        let account = handler
            .handle(cmd(
                "admin-1",
                ReviewDecision::Reject {
                    reason: "Qualification documents are unreadable".to_string(),
                },
            ))
            .await
            .unwrap();

        assert_eq!(account.tutor_status, TutorStatus::Rejected);
        assert_eq!(account.role, UserRole::Student);
        assert!(matches!(
            &notifier.sent()[0],
            Notification::TutorStatusChanged { reason: Some(r), .. } if r.contains("unreadable")
        ));
    }

    #[tokio::test]
    async fn short_rejection_reason_is_invalid() {
        let (users, _, handler) = setup().await;

        let err = handler
            .handle(cmd("admin-1", ReviewDecision::Reject { reason: "nope".to_string() }))
            .await
            .unwrap_err();

        assert!(matches!(err, MarketplaceError::Validation(_)));
        assert_eq!(
            users.find_by_id(&user("applicant")).await.unwrap().unwrap().tutor_status,
            TutorStatus::Pending
        );
    }

    #[tokio::test]
    async fn non_admin_is_forbidden() {
        let (_, notifier, handler) = setup().await;
        let err = handler.handle(cmd("applicant", ReviewDecision::Approve)).await.unwrap_err();
        assert!(matches!(err, MarketplaceError::Forbidden(_)));
        assert!(notifier.sent().is_empty());
    }
}
