// 📝 Registration Form Validator
// Runs the full rule battery on every submit attempt and reports all
// violations at once; nothing is transmitted anywhere.

use chrono::{Datelike, NaiveDate};
use regex::Regex;

// ============================================================================
// VIOLATION MESSAGES (fixed, user-facing)
// ============================================================================

pub const MSG_NAME_LETTERS: &str = "Name must contain only letters.";
pub const MSG_USERNAME_LETTERS: &str =
    "Username must contain only letters (no numbers or spaces).";
pub const MSG_DOB_REQUIRED: &str = "Date of birth is required.";
pub const MSG_UNDERAGE: &str = "You must be at least 18 years old to register.";
pub const MSG_PHONE_INVALID: &str = "Enter a valid phone number.";
pub const MSG_PASSWORD_WEAK: &str =
    "Password must include uppercase, lowercase, number, special character, and be at least 8 characters long.";
pub const MSG_PASSWORD_MISMATCH: &str = "Passwords do not match.";

const REPORT_HEADER: &str = "Please fix the following:";

const MIN_AGE_YEARS: i32 = 18;

/// Roles offered by the form's role selector; the first is the default.
pub fn available_roles() -> &'static [&'static str] {
    &["attendee", "speaker", "volunteer", "staff"]
}

// ============================================================================
// FORM
// ============================================================================

/// Current field values of the registration form. Each submit attempt is
/// evaluated from these values alone; there is no partial or retry state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationForm {
    pub name: String,
    pub username: String,
    /// Collected but not validated
    pub email: String,
    /// ISO date string (YYYY-MM-DD), as a date input produces
    pub date_of_birth: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
    pub role: String,
}

impl RegistrationForm {
    /// Resets every field to its empty/default state.
    pub fn clear(&mut self) {
        *self = RegistrationForm::default();
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
            && self.username.is_empty()
            && self.email.is_empty()
            && self.date_of_birth.is_empty()
            && self.phone.is_empty()
            && self.password.is_empty()
            && self.confirm_password.is_empty()
            && self.role == available_roles()[0]
    }
}

impl Default for RegistrationForm {
    fn default() -> Self {
        RegistrationForm {
            name: String::new(),
            username: String::new(),
            email: String::new(),
            date_of_birth: String::new(),
            phone: String::new(),
            password: String::new(),
            confirm_password: String::new(),
            role: available_roles()[0].to_string(),
        }
    }
}

// ============================================================================
// VIOLATIONS & OUTCOME
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: &'static str,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Terminal outcome of one submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Accepted { role: String },
    Rejected(Vec<ValidationError>),
}

impl SubmissionOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmissionOutcome::Accepted { .. })
    }

    /// The blocking notification text shown to the user.
    pub fn report(&self) -> String {
        match self {
            SubmissionOutcome::Accepted { role } => {
                format!("✅ You have successfully registered as a {}.", role)
            }
            SubmissionOutcome::Rejected(errors) => {
                let lines: Vec<&str> = errors.iter().map(|e| e.message).collect();
                format!("{}\n\n{}", REPORT_HEADER, lines.join("\n"))
            }
        }
    }
}

// ============================================================================
// AGE
// ============================================================================

/// Whole years between dob and today, subtracting one when the birthday has
/// not yet occurred this year (including the same-month, day-not-reached
/// case).
pub fn age_in_years(dob: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        age -= 1;
    }
    age
}

// ============================================================================
// VALIDATOR
// ============================================================================

pub struct RegistrationValidator {
    name_re: Regex,
    username_re: Regex,
    phone_re: Regex,
}

impl RegistrationValidator {
    pub fn new() -> Self {
        // Patterns are fixed and known-good; compile once per validator
        RegistrationValidator {
            name_re: Regex::new(r"^[A-Za-z\s]+$").unwrap(),
            username_re: Regex::new(r"^[A-Za-z]+$").unwrap(),
            phone_re: Regex::new(r"^\+?[0-9]{10,15}$").unwrap(),
        }
    }

    /// Applies every rule and collects all violations before reporting;
    /// rules are never short-circuited.
    pub fn validate(
        &self,
        form: &RegistrationForm,
        today: NaiveDate,
    ) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if !self.name_re.is_match(form.name.trim()) {
            errors.push(ValidationError {
                field: "name",
                message: MSG_NAME_LETTERS,
            });
        }

        if !self.username_re.is_match(form.username.trim()) {
            errors.push(ValidationError {
                field: "username",
                message: MSG_USERNAME_LETTERS,
            });
        }

        // Date inputs yield ISO dates; anything unparseable counts as absent
        let dob_input = form.date_of_birth.trim();
        if dob_input.is_empty() {
            errors.push(ValidationError {
                field: "date_of_birth",
                message: MSG_DOB_REQUIRED,
            });
        } else {
            match NaiveDate::parse_from_str(dob_input, "%Y-%m-%d") {
                Ok(dob) => {
                    if age_in_years(dob, today) < MIN_AGE_YEARS {
                        errors.push(ValidationError {
                            field: "date_of_birth",
                            message: MSG_UNDERAGE,
                        });
                    }
                }
                Err(_) => {
                    errors.push(ValidationError {
                        field: "date_of_birth",
                        message: MSG_DOB_REQUIRED,
                    });
                }
            }
        }

        if !self.phone_re.is_match(form.phone.trim()) {
            errors.push(ValidationError {
                field: "phone",
                message: MSG_PHONE_INVALID,
            });
        }

        if !password_is_strong(&form.password) {
            errors.push(ValidationError {
                field: "password",
                message: MSG_PASSWORD_WEAK,
            });
        }

        if form.password != form.confirm_password {
            errors.push(ValidationError {
                field: "confirm_password",
                message: MSG_PASSWORD_MISMATCH,
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// One full submit attempt: validate, and on acceptance clear every
    /// form field. Rejection leaves the form untouched for retry.
    pub fn submit(&self, form: &mut RegistrationForm, today: NaiveDate) -> SubmissionOutcome {
        match self.validate(form, today) {
            Ok(()) => {
                let role = form.role.clone();
                form.clear();
                SubmissionOutcome::Accepted { role }
            }
            Err(errors) => SubmissionOutcome::Rejected(errors),
        }
    }
}

impl Default for RegistrationValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// At least 8 characters with at least one lowercase, one uppercase, one
/// digit, and one special (non-alphanumeric) character.
fn password_is_strong(password: &str) -> bool {
    password.chars().count() >= 8
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| !c.is_ascii_alphanumeric())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn create_valid_form() -> RegistrationForm {
        RegistrationForm {
            name: "Jane Doe".to_string(),
            username: "janedoe".to_string(),
            email: "jane@example.com".to_string(),
            date_of_birth: "1990-04-12".to_string(),
            phone: "+12025550123".to_string(),
            password: "Abc12345!".to_string(),
            confirm_password: "Abc12345!".to_string(),
            role: "speaker".to_string(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 8, 26).unwrap()
    }

    fn messages(result: Result<(), Vec<ValidationError>>) -> Vec<&'static str> {
        result.unwrap_err().iter().map(|e| e.message).collect()
    }

    #[test]
    fn test_valid_form_passes_every_rule() {
        let validator = RegistrationValidator::new();
        assert!(validator.validate(&create_valid_form(), today()).is_ok());
    }

    #[test]
    fn test_name_with_digits_reports_letters_violation_once() {
        let validator = RegistrationValidator::new();
        let mut form = create_valid_form();
        form.name = "John123".to_string();

        let msgs = messages(validator.validate(&form, today()));
        assert_eq!(
            msgs.iter().filter(|m| **m == MSG_NAME_LETTERS).count(),
            1
        );
        assert_eq!(msgs.len(), 1);
    }

    #[test]
    fn test_name_allows_whitespace_but_username_does_not() {
        let validator = RegistrationValidator::new();
        let mut form = create_valid_form();
        form.name = "Mary Jane".to_string();
        form.username = "mary jane".to_string();

        let msgs = messages(validator.validate(&form, today()));
        assert_eq!(msgs, vec![MSG_USERNAME_LETTERS]);
    }

    #[test]
    fn test_empty_name_and_username_are_violations() {
        let validator = RegistrationValidator::new();
        let mut form = create_valid_form();
        form.name = "   ".to_string();
        form.username = String::new();

        let msgs = messages(validator.validate(&form, today()));
        assert!(msgs.contains(&MSG_NAME_LETTERS));
        assert!(msgs.contains(&MSG_USERNAME_LETTERS));
    }

    #[test]
    fn test_missing_dob_is_required() {
        let validator = RegistrationValidator::new();
        let mut form = create_valid_form();
        form.date_of_birth = String::new();

        let msgs = messages(validator.validate(&form, today()));
        assert_eq!(msgs, vec![MSG_DOB_REQUIRED]);
    }

    #[test]
    fn test_unparseable_dob_counts_as_missing() {
        let validator = RegistrationValidator::new();
        let mut form = create_valid_form();
        form.date_of_birth = "not-a-date".to_string();

        let msgs = messages(validator.validate(&form, today()));
        assert_eq!(msgs, vec![MSG_DOB_REQUIRED]);
    }

    #[test]
    fn test_day_before_18th_birthday_is_rejected() {
        let validator = RegistrationValidator::new();
        let mut form = create_valid_form();
        // 18th birthday is 2024-08-27, one day after "today"
        form.date_of_birth = "2006-08-27".to_string();

        let msgs = messages(validator.validate(&form, today()));
        assert_eq!(msgs, vec![MSG_UNDERAGE]);
    }

    #[test]
    fn test_exact_18th_birthday_is_accepted() {
        let validator = RegistrationValidator::new();
        let mut form = create_valid_form();
        form.date_of_birth = "2006-08-26".to_string();

        assert!(validator.validate(&form, today()).is_ok());
    }

    #[test]
    fn test_age_same_month_day_not_reached() {
        let dob = NaiveDate::from_ymd_opt(2000, 6, 15).unwrap();
        let before = NaiveDate::from_ymd_opt(2018, 6, 14).unwrap();
        let on = NaiveDate::from_ymd_opt(2018, 6, 15).unwrap();
        assert_eq!(age_in_years(dob, before), 17);
        assert_eq!(age_in_years(dob, on), 18);
    }

    #[test]
    fn test_age_earlier_month() {
        let dob = NaiveDate::from_ymd_opt(2000, 9, 1).unwrap();
        let today = NaiveDate::from_ymd_opt(2018, 8, 31).unwrap();
        assert_eq!(age_in_years(dob, today), 17);
    }

    #[test]
    fn test_phone_rules() {
        let validator = RegistrationValidator::new();

        let accepted = ["1234567890", "+1234567890", "+123456789012345"];
        for phone in accepted {
            let mut form = create_valid_form();
            form.phone = phone.to_string();
            assert!(
                validator.validate(&form, today()).is_ok(),
                "{} should be valid",
                phone
            );
        }

        let rejected = ["123456789", "1234567890123456", "12345abcde", "++1234567890", ""];
        for phone in rejected {
            let mut form = create_valid_form();
            form.phone = phone.to_string();
            let msgs = messages(validator.validate(&form, today()));
            assert_eq!(msgs, vec![MSG_PHONE_INVALID], "{} should be invalid", phone);
        }
    }

    #[test]
    fn test_strong_password_has_no_password_violations() {
        let validator = RegistrationValidator::new();
        let mut form = create_valid_form();
        form.password = "Abc12345!".to_string();
        form.confirm_password = "Abc12345!".to_string();

        assert!(validator.validate(&form, today()).is_ok());
    }

    #[test]
    fn test_password_strength_requirements() {
        assert!(password_is_strong("Abc12345!"));
        assert!(password_is_strong("Xy9#long enough"));
        // Underscore counts as special
        assert!(password_is_strong("Abc12345_"));

        assert!(!password_is_strong("Abc123!")); // 7 chars
        assert!(!password_is_strong("abc1234!")); // no uppercase
        assert!(!password_is_strong("ABC1234!")); // no lowercase
        assert!(!password_is_strong("Abcdefg!")); // no digit
        assert!(!password_is_strong("Abc12345")); // no special
        assert!(!password_is_strong("Ab1!")); // too short
    }

    #[test]
    fn test_weak_and_mismatched_passwords_report_both_violations() {
        let validator = RegistrationValidator::new();
        let mut form = create_valid_form();
        form.password = "abc".to_string();
        form.confirm_password = "xyz".to_string();

        let msgs = messages(validator.validate(&form, today()));
        assert!(msgs.contains(&MSG_PASSWORD_WEAK));
        assert!(msgs.contains(&MSG_PASSWORD_MISMATCH));
        assert_eq!(msgs.len(), 2);
    }

    #[test]
    fn test_violations_accumulate_across_all_fields() {
        let validator = RegistrationValidator::new();
        let form = RegistrationForm::default();

        let msgs = messages(validator.validate(&form, today()));
        // name, username, dob, phone, password all fail; the two empty
        // passwords match each other
        assert_eq!(msgs.len(), 5);
        assert!(!msgs.contains(&MSG_PASSWORD_MISMATCH));
    }

    #[test]
    fn test_rejected_report_lists_every_message_under_header() {
        let validator = RegistrationValidator::new();
        let mut form = create_valid_form();
        form.name = "John123".to_string();
        form.password = "abc".to_string();
        form.confirm_password = "xyz".to_string();

        let outcome = validator.submit(&mut form, today());
        assert!(!outcome.is_accepted());

        let report = outcome.report();
        assert!(report.starts_with("Please fix the following:\n\n"));
        assert!(report.contains(MSG_NAME_LETTERS));
        assert!(report.contains(MSG_PASSWORD_WEAK));
        assert!(report.contains(MSG_PASSWORD_MISMATCH));
        // Rejection never clears the form
        assert_eq!(form.name, "John123");
    }

    #[test]
    fn test_accepted_submission_names_role_and_clears_form() {
        let validator = RegistrationValidator::new();
        let mut form = create_valid_form();

        let outcome = validator.submit(&mut form, today());
        assert_eq!(
            outcome,
            SubmissionOutcome::Accepted {
                role: "speaker".to_string()
            }
        );
        assert_eq!(
            outcome.report(),
            "✅ You have successfully registered as a speaker."
        );
        assert!(form.is_empty());
    }

    #[test]
    fn test_each_attempt_is_independent() {
        let validator = RegistrationValidator::new();
        let mut form = create_valid_form();
        form.phone = "bad".to_string();

        let first = validator.submit(&mut form, today());
        assert!(!first.is_accepted());

        form.phone = "1234567890".to_string();
        let second = validator.submit(&mut form, today());
        assert!(second.is_accepted());
    }
}
