//! Contact details inside `personal_info_example`
//!
//! Personal info is free text with fields separated by `|`, e.g.
//! `John Doe | john.doe@example.com | +1 555 010 2030 | San Francisco, CA`.
//! Fields that look like an email or phone number are checked for format.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref EMAIL_REGEX: Regex =
        Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap();
    static ref EMAIL_EXACT: Regex =
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$").unwrap();
    static ref PHONE_LIKE: Regex = Regex::new(r"^\+?[0-9][0-9 ().-]*$").unwrap();
}

/// Digit counts accepted for a phone number (E.164 allows at most 15)
const PHONE_DIGITS: std::ops::RangeInclusive<usize> = 7..=15;

/// A malformed contact field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactProblem {
    InvalidEmail(String),
    InvalidPhone(String),
}

fn fields(text: &str) -> impl Iterator<Item = &str> {
    text.split('|').map(str::trim).filter(|f| !f.is_empty())
}

fn is_phone_field(field: &str) -> bool {
    PHONE_LIKE.is_match(field)
}

fn phone_digits(field: &str) -> usize {
    field.chars().filter(char::is_ascii_digit).count()
}

/// True if the text contains a well-formed email address
pub fn has_email(text: &str) -> bool {
    EMAIL_REGEX.is_match(text)
}

/// True if some field is a phone number with a plausible digit count
pub fn has_phone(text: &str) -> bool {
    fields(text).any(|f| is_phone_field(f) && PHONE_DIGITS.contains(&phone_digits(f)))
}

/// Fields that look like contact details but are malformed
pub fn contact_problems(text: &str) -> Vec<ContactProblem> {
    fields(text)
        .filter_map(|field| {
            if field.contains('@') {
                (!EMAIL_EXACT.is_match(field))
                    .then(|| ContactProblem::InvalidEmail(field.to_string()))
            } else if is_phone_field(field) && phone_digits(field) >= 3 {
                (!PHONE_DIGITS.contains(&phone_digits(field)))
                    .then(|| ContactProblem::InvalidPhone(field.to_string()))
            } else {
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_formed_contact_line() {
        let line = "John Doe | john.doe@example.com | +1 555 010 2030 | github.com/johndoe | San Francisco, CA";
        assert!(has_email(line));
        assert!(has_phone(line));
        assert!(contact_problems(line).is_empty());
    }

    #[test]
    fn test_malformed_email() {
        let problems = contact_problems("Jane | jane.smith@example | +44 20 7946 0000");
        assert_eq!(
            problems,
            vec![ContactProblem::InvalidEmail("jane.smith@example".to_string())]
        );
    }

    #[test]
    fn test_phone_digit_count() {
        assert_eq!(
            contact_problems("Alex | +91 9876"),
            vec![ContactProblem::InvalidPhone("+91 9876".to_string())]
        );
        assert!(contact_problems("Alex | +91 98765 43210").is_empty());
        assert!(!has_phone("Alex | +91 9876"));
    }

    #[test]
    fn test_non_contact_fields_ignored() {
        // Years and short numbers are not phone numbers
        assert!(contact_problems("Class of 2019 | 42 | London, UK").is_empty());
        assert!(!has_email("no contact details here"));
    }
}
