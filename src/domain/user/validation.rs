//! User validation utilities

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Errors that can occur during user validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserValidationError {
    #[error("Name cannot be blank")]
    EmptyName,

    #[error("Name cannot contain whitespace")]
    NameContainsWhitespace,

    #[error("Name segment '{0}' must be one uppercase letter followed by lowercase letters")]
    InvalidNameSegment(String),

    #[error("Email cannot be blank")]
    EmptyEmail,

    #[error("Email exceeds maximum length of {0} characters")]
    EmailTooLong(usize),

    #[error("Email cannot contain whitespace")]
    EmailContainsWhitespace,

    #[error("Email must contain exactly one '@'")]
    MissingAtSign,

    #[error("Email local part must be at least {0} characters")]
    LocalPartTooShort(usize),

    #[error("Email domain '{0}' must contain a dot and end in a top-level domain of at least two letters")]
    InvalidDomain(String),

    #[error("Email '{0}' is not a valid address")]
    InvalidEmailFormat(String),
}

const MAX_EMAIL_LENGTH: usize = 254;
const MIN_LOCAL_PART_LENGTH: usize = 2;

static LOCAL_PART_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9._%+-]+$").unwrap());

/// Domain labels are alphanumeric with inner hyphens, the last label is an alphabetic TLD
static DOMAIN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?\.)+[A-Za-z]{2,}$").unwrap()
});

/// Validate a user's name
///
/// Rules:
/// - Cannot be blank
/// - No whitespace anywhere
/// - One or more hyphen-separated segments
/// - Each segment is an uppercase letter followed by one or more lowercase letters
pub fn validate_name(name: &str) -> Result<(), UserValidationError> {
    if name.trim().is_empty() {
        return Err(UserValidationError::EmptyName);
    }

    if name.chars().any(char::is_whitespace) {
        return Err(UserValidationError::NameContainsWhitespace);
    }

    for segment in name.split('-') {
        if !is_capitalized_word(segment) {
            return Err(UserValidationError::InvalidNameSegment(segment.to_string()));
        }
    }

    Ok(())
}

fn is_capitalized_word(segment: &str) -> bool {
    let mut chars = segment.chars();

    match chars.next() {
        Some(first) if first.is_uppercase() => {}
        _ => return false,
    }

    let rest = chars.as_str();
    !rest.is_empty() && rest.chars().all(char::is_lowercase)
}

/// Validate an email address
///
/// Rules:
/// - Cannot be blank, maximum 254 characters, no whitespace
/// - Exactly one '@'
/// - Local part of at least 2 characters from `A-Z a-z 0-9 . _ % + -`
/// - Domain with at least one dot and an alphabetic TLD of 2+ letters
pub fn validate_email(email: &str) -> Result<(), UserValidationError> {
    if email.trim().is_empty() {
        return Err(UserValidationError::EmptyEmail);
    }

    if email.len() > MAX_EMAIL_LENGTH {
        return Err(UserValidationError::EmailTooLong(MAX_EMAIL_LENGTH));
    }

    if email.chars().any(char::is_whitespace) {
        return Err(UserValidationError::EmailContainsWhitespace);
    }

    let (local, domain) = match email.split_once('@') {
        Some((local, domain)) if !domain.contains('@') => (local, domain),
        _ => return Err(UserValidationError::MissingAtSign),
    };

    if local.chars().count() < MIN_LOCAL_PART_LENGTH {
        return Err(UserValidationError::LocalPartTooShort(MIN_LOCAL_PART_LENGTH));
    }

    if !LOCAL_PART_PATTERN.is_match(local) {
        return Err(UserValidationError::InvalidEmailFormat(email.to_string()));
    }

    if !DOMAIN_PATTERN.is_match(domain) {
        return Err(UserValidationError::InvalidDomain(domain.to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Name tests
    #[test]
    fn test_valid_names() {
        assert!(validate_name("Jack").is_ok());
        assert!(validate_name("John").is_ok());
        assert!(validate_name("Anna-Maria").is_ok());
        assert!(validate_name("Zoë").is_ok());
        assert!(validate_name("Jean-Luc-Paul").is_ok());
    }

    #[test]
    fn test_blank_names() {
        assert_eq!(validate_name(""), Err(UserValidationError::EmptyName));
        assert_eq!(validate_name(" "), Err(UserValidationError::EmptyName));
        assert_eq!(validate_name("\t\n"), Err(UserValidationError::EmptyName));
    }

    #[test]
    fn test_name_with_space() {
        assert_eq!(
            validate_name("Firstname Lastname"),
            Err(UserValidationError::NameContainsWhitespace)
        );
        assert_eq!(
            validate_name(" Jack"),
            Err(UserValidationError::NameContainsWhitespace)
        );
    }

    #[test]
    fn test_lowercase_name() {
        assert_eq!(
            validate_name("name"),
            Err(UserValidationError::InvalidNameSegment("name".to_string()))
        );
        assert!(validate_name("jack16").is_err());
    }

    #[test]
    fn test_camel_case_name() {
        assert_eq!(
            validate_name("CamelCase"),
            Err(UserValidationError::InvalidNameSegment("CamelCase".to_string()))
        );
    }

    #[test]
    fn test_malformed_hyphenation() {
        assert_eq!(
            validate_name("Anna-maria"),
            Err(UserValidationError::InvalidNameSegment("maria".to_string()))
        );
        assert_eq!(
            validate_name("Anna-"),
            Err(UserValidationError::InvalidNameSegment(String::new()))
        );
        assert!(validate_name("-Anna").is_err());
        assert!(validate_name("Anna--Maria").is_err());
    }

    #[test]
    fn test_single_letter_and_digits() {
        assert!(validate_name("J").is_err());
        assert!(validate_name("Jack2").is_err());
        assert!(validate_name("JACK").is_err());
    }

    // Email tests
    #[test]
    fn test_valid_emails() {
        assert!(validate_email("email@gmail.at").is_ok());
        assert!(validate_email("email@mail.org.com").is_ok());
        assert!(validate_email("email@mail.com").is_ok());
        assert!(validate_email("jack6@mail.com").is_ok());
        assert!(validate_email("first.last+tag@sub-domain.example.io").is_ok());
    }

    #[test]
    fn test_blank_emails() {
        assert_eq!(validate_email(""), Err(UserValidationError::EmptyEmail));
        assert_eq!(validate_email(" "), Err(UserValidationError::EmptyEmail));
    }

    #[test]
    fn test_email_without_at() {
        assert_eq!(
            validate_email("email.without.at"),
            Err(UserValidationError::MissingAtSign)
        );
        assert_eq!(
            validate_email("a@b@mail.com"),
            Err(UserValidationError::MissingAtSign)
        );
    }

    #[test]
    fn test_email_without_dot_in_domain() {
        assert_eq!(
            validate_email("email@mail"),
            Err(UserValidationError::InvalidDomain("mail".to_string()))
        );
    }

    #[test]
    fn test_email_short_local_part() {
        assert_eq!(
            validate_email("@mail.com"),
            Err(UserValidationError::LocalPartTooShort(2))
        );
        assert_eq!(
            validate_email("a@short.org"),
            Err(UserValidationError::LocalPartTooShort(2))
        );
    }

    #[test]
    fn test_email_bad_domains() {
        assert!(validate_email("email@.com").is_err());
        assert!(validate_email("email@mail.").is_err());
        assert!(validate_email("email@mail.c").is_err());
        assert!(validate_email("email@mail.c0m").is_err());
        assert!(validate_email("email@-mail.com").is_err());
    }

    #[test]
    fn test_email_with_whitespace() {
        assert_eq!(
            validate_email("em ail@mail.com"),
            Err(UserValidationError::EmailContainsWhitespace)
        );
    }

    #[test]
    fn test_email_invalid_local_characters() {
        assert!(matches!(
            validate_email("em<ail@mail.com"),
            Err(UserValidationError::InvalidEmailFormat(_))
        ));
    }

    #[test]
    fn test_email_too_long() {
        let long_email = format!("{}@mail.com", "a".repeat(250));
        assert_eq!(
            validate_email(&long_email),
            Err(UserValidationError::EmailTooLong(254))
        );
    }
}
