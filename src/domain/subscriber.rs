use chrono::{DateTime, Utc};

use crate::domain::subscriber_email::SubscriberEmail;
use crate::domain::subscriber_status::SubscriberStatus;

/// A row of the `subscribers` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriberRecord {
    pub id: i64,
    pub email: SubscriberEmail,
    /// `None` until the subscriber completes the double opt-in.
    pub confirmed_at: Option<DateTime<Utc>>,
    pub opted_out: bool,
}

impl SubscriberRecord {
    pub fn is_confirmed(&self) -> bool {
        self.confirmed_at.is_some()
    }

    pub fn status(&self) -> SubscriberStatus {
        SubscriberStatus::from_fields(self.is_confirmed(), self.opted_out)
    }
}
