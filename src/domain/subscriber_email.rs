use std::fmt;
use validator::validate_email;

/// Email address of a subscriber, the business key of the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubscriberEmail(String);

impl SubscriberEmail {
    /// Surrounding whitespace is dropped before validating, inner content is kept as is.
    pub fn parse(email: String) -> Result<SubscriberEmail, String> {
        let email = email.trim();

        if email.is_empty() {
            return Err(String::from("subscriber email cannot be empty"));
        }

        if !validate_email(email) {
            return Err(format!("{} email is not valid", email));
        }

        Ok(Self(email.to_owned()))
    }
}

impl TryFrom<String> for SubscriberEmail {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        SubscriberEmail::parse(value)
    }
}

impl AsRef<str> for SubscriberEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubscriberEmail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
