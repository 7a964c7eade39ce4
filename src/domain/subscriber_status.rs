/// Lifecycle stage of a subscriber, derived from its stored fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriberStatus {
    Pending,
    Confirmed,
    Unsubscribed,
}

impl SubscriberStatus {
    /// Opting out takes precedence over any confirmation timestamp.
    pub fn from_fields(is_confirmed: bool, opted_out: bool) -> SubscriberStatus {
        match (is_confirmed, opted_out) {
            (_, true) => SubscriberStatus::Unsubscribed,
            (true, false) => SubscriberStatus::Confirmed,
            (false, false) => SubscriberStatus::Pending,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, SubscriberStatus::Pending)
    }

    pub fn is_confirmed(&self) -> bool {
        matches!(self, SubscriberStatus::Confirmed)
    }

    pub fn is_unsubscribed(&self) -> bool {
        matches!(self, SubscriberStatus::Unsubscribed)
    }
}

impl AsRef<str> for SubscriberStatus {
    fn as_ref(&self) -> &str {
        match self {
            SubscriberStatus::Pending => "pending_confirmation",
            SubscriberStatus::Confirmed => "confirmed",
            SubscriberStatus::Unsubscribed => "unsubscribed",
        }
    }
}
