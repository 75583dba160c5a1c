//! Multi-step registration drafts and their validation rules.
//!
//! Each draft mirrors one registration form. Fields hold raw input strings;
//! validation runs per step when the user tries to advance, and the first
//! failing rule wins so the form shows a single message at a time.

use api::types::{Availability, RegistrationProfile, ServiceCategory};

/// Why a step refused to advance. `key()` maps to the translation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    FillRequiredFields,
    InvalidFullName,
    InvalidPhone,
    InvalidWhatsapp,
    InvalidExperience,
    InvalidEmail,
    WeakPassword,
    PasswordNotMatch,
    SelectCategory,
    SelectAvailability,
}

impl ValidationError {
    pub fn key(self) -> &'static str {
        match self {
            ValidationError::FillRequiredFields => "errors.fillRequiredFields",
            ValidationError::InvalidFullName => "errors.invalidFullName",
            ValidationError::InvalidPhone => "errors.invalidPhone",
            ValidationError::InvalidWhatsapp => "errors.invalidWhatsapp",
            ValidationError::InvalidExperience => "errors.invalidExperience",
            ValidationError::InvalidEmail => "errors.invalidEmail",
            ValidationError::WeakPassword => "errors.weakPassword",
            ValidationError::PasswordNotMatch => "errors.passwordNotMatch",
            ValidationError::SelectCategory => "errors.selectCategory",
            ValidationError::SelectAvailability => "errors.selectAvailability",
        }
    }
}

/// Step cursor shared by both wizards. Validation stays on the drafts; the
/// cursor only moves when the caller says the current step passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wizard {
    step: usize,
    steps: usize,
}

impl Wizard {
    pub fn new(steps: usize) -> Self {
        Self { step: 0, steps }
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn is_last(&self) -> bool {
        self.step + 1 >= self.steps
    }

    pub fn advance(&mut self) {
        if !self.is_last() {
            self.step += 1;
        }
    }

    /// Going back never validates and never loses entered data.
    pub fn back(&mut self) {
        self.step = self.step.saturating_sub(1);
    }
}

/// In-flight gate for the final submit. The first `try_begin` wins; any
/// further attempt before `finish` is refused, so a double click cannot
/// fire the request twice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Submission {
    in_flight: bool,
}

impl Submission {
    pub fn try_begin(&mut self) -> bool {
        if self.in_flight {
            return false;
        }
        self.in_flight = true;
        true
    }

    pub fn finish(&mut self) {
        self.in_flight = false;
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }
}

/// Three steps: personal info, specialty, availability.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkerDraft {
    pub full_name: String,
    pub phone: String,
    pub whatsapp: String,
    pub experience_years: String,
    pub category: Option<ServiceCategory>,
    pub availability: Option<Availability>,
}

impl WorkerDraft {
    pub const STEPS: usize = 3;

    pub fn validate_step(&self, step: usize) -> Result<(), ValidationError> {
        match step {
            0 => {
                let required = [&self.full_name, &self.phone, &self.experience_years];
                if required.iter().any(|f| f.trim().is_empty()) {
                    return Err(ValidationError::FillRequiredFields);
                }
                validate_full_name(&self.full_name)?;
                validate_phone(&self.phone).map_err(|_| ValidationError::InvalidPhone)?;
                if !self.whatsapp.trim().is_empty() {
                    validate_phone(&self.whatsapp)
                        .map_err(|_| ValidationError::InvalidWhatsapp)?;
                }
                validate_experience_years(&self.experience_years)?;
                Ok(())
            }
            1 => match self.category {
                Some(_) => Ok(()),
                None => Err(ValidationError::SelectCategory),
            },
            _ => match self.availability {
                Some(_) => Ok(()),
                None => Err(ValidationError::SelectAvailability),
            },
        }
    }

    /// Workers sign in with their phone number.
    pub fn login(&self) -> String {
        self.phone.trim().to_string()
    }

    /// Registration does not ask workers for a password; derive one they
    /// can use until account recovery hands them a real credential.
    pub fn provisional_password(&self) -> String {
        let digits: String = self.phone.chars().filter(|c| c.is_ascii_digit()).collect();
        format!("Bricol{digits}")
    }

    pub fn to_profile(&self) -> Result<RegistrationProfile, ValidationError> {
        for step in 0..Self::STEPS {
            self.validate_step(step)?;
        }
        let whatsapp = match self.whatsapp.trim() {
            "" => None,
            w => Some(w.to_string()),
        };
        let experience_years = self
            .experience_years
            .trim()
            .parse::<i32>()
            .map_err(|_| ValidationError::InvalidExperience)?;
        Ok(RegistrationProfile::Worker {
            full_name: self.full_name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            whatsapp,
            experience_years,
            category: self.category.ok_or(ValidationError::SelectCategory)?,
            availability: self
                .availability
                .ok_or(ValidationError::SelectAvailability)?,
        })
    }
}

/// Two steps: identity, then account and location.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerDraft {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
    pub city: String,
    pub address: String,
}

impl CustomerDraft {
    pub const STEPS: usize = 2;

    pub fn validate_step(&self, step: usize) -> Result<(), ValidationError> {
        match step {
            0 => {
                let required = [&self.full_name, &self.email, &self.phone];
                if required.iter().any(|f| f.trim().is_empty()) {
                    return Err(ValidationError::FillRequiredFields);
                }
                validate_full_name(&self.full_name)?;
                validate_email(&self.email)?;
                validate_phone(&self.phone).map_err(|_| ValidationError::InvalidPhone)?;
                Ok(())
            }
            _ => {
                let required = [
                    &self.password,
                    &self.confirm_password,
                    &self.city,
                    &self.address,
                ];
                if required.iter().any(|f| f.trim().is_empty()) {
                    return Err(ValidationError::FillRequiredFields);
                }
                if self.password.len() < 8 {
                    return Err(ValidationError::WeakPassword);
                }
                if self.password != self.confirm_password {
                    return Err(ValidationError::PasswordNotMatch);
                }
                Ok(())
            }
        }
    }

    pub fn login(&self) -> String {
        self.email.trim().to_string()
    }

    pub fn to_profile(&self) -> Result<RegistrationProfile, ValidationError> {
        for step in 0..Self::STEPS {
            self.validate_step(step)?;
        }
        Ok(RegistrationProfile::Customer {
            full_name: self.full_name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            city: self.city.trim().to_string(),
            address: self.address.trim().to_string(),
        })
    }
}

pub fn validate_full_name(name: &str) -> Result<(), ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::FillRequiredFields);
    }
    if trimmed.chars().all(|c| c.is_alphabetic() || c == ' ') {
        Ok(())
    } else {
        Err(ValidationError::InvalidFullName)
    }
}

/// Optional leading `+`, then 8 to 15 digits.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let trimmed = phone.trim();
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    if (8..=15).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::InvalidPhone)
    }
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let trimmed = email.trim();
    if trimmed.len() >= 3 && trimmed.contains('@') {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail)
    }
}

pub fn validate_experience_years(raw: &str) -> Result<(), ValidationError> {
    match raw.trim().parse::<i32>() {
        Ok(years) if (0..=30).contains(&years) => Ok(()),
        _ => Err(ValidationError::InvalidExperience),
    }
}

/// Input filters applied on every keystroke so the draft never holds
/// characters the validators would reject.
pub fn sanitize_name(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_alphabetic() || *c == ' ')
        .collect()
}

pub fn sanitize_phone(input: &str) -> String {
    let mut out = String::new();
    for (i, c) in input.chars().enumerate() {
        if c.is_ascii_digit() || (c == '+' && i == 0) {
            out.push(c);
        }
    }
    out
}

pub fn sanitize_digits(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_worker() -> WorkerDraft {
        WorkerDraft {
            full_name: "Hassan Alami".to_string(),
            phone: "0612345678".to_string(),
            whatsapp: String::new(),
            experience_years: "5".to_string(),
            category: Some(ServiceCategory::Plumbing),
            availability: Some(Availability::Weekends),
        }
    }

    #[test]
    fn empty_personal_info_asks_for_required_fields() {
        let draft = WorkerDraft::default();
        assert_eq!(
            draft.validate_step(0),
            Err(ValidationError::FillRequiredFields)
        );
    }

    #[test]
    fn bad_phone_is_reported_after_required_check() {
        let draft = WorkerDraft {
            phone: "123".to_string(),
            ..valid_worker()
        };
        assert_eq!(draft.validate_step(0), Err(ValidationError::InvalidPhone));
    }

    #[test]
    fn whatsapp_is_optional_but_validated_when_present() {
        let mut draft = valid_worker();
        assert!(draft.validate_step(0).is_ok());

        draft.whatsapp = "abc".to_string();
        assert_eq!(
            draft.validate_step(0),
            Err(ValidationError::InvalidWhatsapp)
        );

        draft.whatsapp = "+212612345678".to_string();
        assert!(draft.validate_step(0).is_ok());
    }

    #[test]
    fn experience_must_be_in_range() {
        let mut draft = valid_worker();
        draft.experience_years = "31".to_string();
        assert_eq!(
            draft.validate_step(0),
            Err(ValidationError::InvalidExperience)
        );
        draft.experience_years = "0".to_string();
        assert!(draft.validate_step(0).is_ok());
    }

    #[test]
    fn category_step_requires_a_selection() {
        let draft = WorkerDraft {
            category: None,
            ..valid_worker()
        };
        assert_eq!(draft.validate_step(1), Err(ValidationError::SelectCategory));
        assert!(valid_worker().validate_step(1).is_ok());
    }

    #[test]
    fn availability_step_requires_a_selection() {
        let draft = WorkerDraft {
            availability: None,
            ..valid_worker()
        };
        assert_eq!(
            draft.validate_step(2),
            Err(ValidationError::SelectAvailability)
        );
    }

    #[test]
    fn wizard_back_saturates_and_preserves_nothing_but_position() {
        let mut wizard = Wizard::new(WorkerDraft::STEPS);
        assert_eq!(wizard.step(), 0);
        wizard.back();
        assert_eq!(wizard.step(), 0);
        wizard.advance();
        wizard.advance();
        assert!(wizard.is_last());
        wizard.advance();
        assert_eq!(wizard.step(), 2);
        wizard.back();
        assert_eq!(wizard.step(), 1);
    }

    #[test]
    fn duplicate_submits_are_refused_while_in_flight() {
        let mut submission = Submission::default();
        assert!(submission.try_begin());
        assert!(submission.in_flight());
        // A second click while the request runs must not start another.
        assert!(!submission.try_begin());
        assert!(!submission.try_begin());
        submission.finish();
        assert!(!submission.in_flight());
        assert!(submission.try_begin());
    }

    #[test]
    fn going_back_keeps_the_draft_intact() {
        let mut wizard = Wizard::new(WorkerDraft::STEPS);
        let draft = valid_worker();
        wizard.advance();
        wizard.back();
        // The cursor moved, the selections did not.
        assert_eq!(draft.category, Some(ServiceCategory::Plumbing));
        assert_eq!(wizard.step(), 0);
    }

    #[test]
    fn worker_profile_carries_every_field() {
        let mut draft = valid_worker();
        draft.whatsapp = "0698765432".to_string();
        let profile = draft.to_profile().unwrap();
        match profile {
            RegistrationProfile::Worker {
                full_name,
                phone,
                whatsapp,
                experience_years,
                category,
                availability,
            } => {
                assert_eq!(full_name, "Hassan Alami");
                assert_eq!(phone, "0612345678");
                assert_eq!(whatsapp.as_deref(), Some("0698765432"));
                assert_eq!(experience_years, 5);
                assert_eq!(category, ServiceCategory::Plumbing);
                assert_eq!(availability, Availability::Weekends);
            }
            other => panic!("expected worker profile, got {other:?}"),
        }
    }

    #[test]
    fn worker_provisional_password_satisfies_account_rules() {
        let draft = valid_worker();
        let pw = draft.provisional_password();
        assert!(pw.len() >= 8);
        assert!(pw.chars().any(|c| c.is_uppercase()));
        assert!(pw.chars().any(|c| c.is_lowercase()));
        assert!(pw.chars().any(|c| c.is_numeric()));
    }

    fn valid_customer() -> CustomerDraft {
        CustomerDraft {
            full_name: "Salma Idrissi".to_string(),
            email: "salma@example.com".to_string(),
            phone: "0612345678".to_string(),
            password: "Passw0rd".to_string(),
            confirm_password: "Passw0rd".to_string(),
            city: "Casablanca".to_string(),
            address: "12 Rue des Fleurs".to_string(),
        }
    }

    #[test]
    fn customer_identity_step_validates_email() {
        let draft = CustomerDraft {
            email: "not-an-email".to_string(),
            ..valid_customer()
        };
        assert_eq!(draft.validate_step(0), Err(ValidationError::InvalidEmail));
        assert!(valid_customer().validate_step(0).is_ok());
    }

    #[test]
    fn customer_password_rules() {
        let mut draft = valid_customer();
        draft.password = "short".to_string();
        draft.confirm_password = "short".to_string();
        assert_eq!(draft.validate_step(1), Err(ValidationError::WeakPassword));

        draft.password = "Passw0rd".to_string();
        draft.confirm_password = "Different1".to_string();
        assert_eq!(
            draft.validate_step(1),
            Err(ValidationError::PasswordNotMatch)
        );
    }

    #[test]
    fn customer_profile_drops_credentials() {
        let profile = valid_customer().to_profile().unwrap();
        match profile {
            RegistrationProfile::Customer {
                full_name,
                phone,
                city,
                address,
            } => {
                assert_eq!(full_name, "Salma Idrissi");
                assert_eq!(phone, "0612345678");
                assert_eq!(city, "Casablanca");
                assert_eq!(address, "12 Rue des Fleurs");
            }
            other => panic!("expected customer profile, got {other:?}"),
        }
    }

    #[test]
    fn sanitizers_mirror_the_validators() {
        assert_eq!(sanitize_name("Hassan3 Alami!"), "Hassan Alami");
        assert_eq!(sanitize_phone("+212-612.345 678"), "+212612345678");
        assert_eq!(sanitize_phone("06+12"), "0612");
        assert_eq!(sanitize_digits("1a2b3"), "123");
    }

    #[test]
    fn full_name_accepts_non_ascii_letters() {
        assert!(validate_full_name("أحمد بناني").is_ok());
        assert!(validate_full_name("Aurélie Noël").is_ok());
        assert!(validate_full_name("x123").is_err());
    }
}
