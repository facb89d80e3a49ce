//! Newsletter

use thiserror::Error;

use crate::notifications::Notification;

/// Newsletter sign-up errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NewsletterError {
    /// Nothing was entered.
    #[error("Enter your email")]
    Empty,

    /// The address is not shaped like `local@domain.tld`.
    #[error("Invalid email address: {0}")]
    Invalid(String),
}

/// Sign up for the newsletter.
///
/// Nothing is stored; a valid address only produces the confirmation.
///
/// # Errors
///
/// Returns a [`NewsletterError`] if the address is empty or malformed.
pub fn subscribe(email: &str) -> Result<Notification, NewsletterError> {
    let email = email.trim();

    if email.is_empty() {
        return Err(NewsletterError::Empty);
    }

    if !is_plausible_email(email) {
        return Err(NewsletterError::Invalid(email.to_string()));
    }

    Ok(Notification::new(
        "Thank you for subscribing!",
        "You'll receive exclusive updates soon.",
    ))
}

fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') || email.chars().any(char::is_whitespace) {
        return false;
    }

    let mut labels = domain.split('.');

    labels.clone().count() >= 2 && labels.all(|label| !label.is_empty())
}
