use chrono::{DateTime, Utc};

use crate::domain::subscriber_email::SubscriberEmail;

/// Desired state of a subscriber, written as a whole by an upsert.
///
/// There is no `id`: storage assigns it on insert and leaves it untouched on update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriberUpdate {
    pub email: SubscriberEmail,
    pub confirmed_at: Option<DateTime<Utc>>,
    pub opted_out: bool,
}

impl SubscriberUpdate {
    pub fn new(
        email: SubscriberEmail,
        confirmed_at: Option<DateTime<Utc>>,
        opted_out: bool,
    ) -> SubscriberUpdate {
        SubscriberUpdate {
            email,
            confirmed_at,
            opted_out,
        }
    }

    /// State after the subscriber completed the double opt-in at `confirmed_at`.
    pub fn confirmed(email: SubscriberEmail, confirmed_at: DateTime<Utc>) -> SubscriberUpdate {
        SubscriberUpdate::new(email, Some(confirmed_at), false)
    }

    /// Opted out state, keeping whatever confirmation timestamp the caller knows about.
    pub fn opted_out(
        email: SubscriberEmail,
        confirmed_at: Option<DateTime<Utc>>,
    ) -> SubscriberUpdate {
        SubscriberUpdate::new(email, confirmed_at, true)
    }
}
