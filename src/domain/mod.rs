pub mod subscriber;
pub mod subscriber_email;
pub mod subscriber_status;
pub mod subscriber_update;

pub use subscriber::SubscriberRecord;
pub use subscriber_email::SubscriberEmail;
pub use subscriber_status::SubscriberStatus;
pub use subscriber_update::SubscriberUpdate;
