/// Pure validation for the review submission form: a raw field set captured
/// from the inputs, a schema check, and either a finished `Review` or a map
/// of per-field messages. No UI types leak in here.
use crate::models::review::{Jurisdiction, Review};
use chrono::{Datelike, Local};
use std::collections::BTreeMap;

pub const MIN_YEAR: i32 = 1900;
pub const COMMENT_MIN_LEN: usize = 2;
pub const COMMENT_MAX_LEN: usize = 3000;

/// The six review fields, named as they appear in stored documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    State,
    Location,
    WorkplaceName,
    JobTitle,
    LastYearWorked,
    Comment,
}

impl Field {
    pub fn name(&self) -> &'static str {
        match self {
            Field::State => "state",
            Field::Location => "location",
            Field::WorkplaceName => "workplaceName",
            Field::JobTitle => "jobTitle",
            Field::LastYearWorked => "lastYearWorked",
            Field::Comment => "comment",
        }
    }
}

/// One human-readable message per offending field, in a stable order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors {
    by_field: BTreeMap<Field, String>,
}

impl ValidationErrors {
    fn push(&mut self, field: Field, message: impl Into<String>) {
        self.by_field.entry(field).or_insert_with(|| message.into());
    }

    pub fn message(&self, field: Field) -> Option<&str> {
        self.by_field.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.by_field.is_empty()
    }

    pub fn len(&self) -> usize {
        self.by_field.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.by_field.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

/// Raw text captured from the input surface, one entry per control.
/// `last_year_worked` stays text until validation coerces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewDraft {
    pub state: String,
    pub location: String,
    pub workplace_name: String,
    pub job_title: String,
    pub last_year_worked: String,
    pub comment: String,
}

impl ReviewDraft {
    /// Form defaults: empty everywhere, the current year pre-filled.
    pub fn with_defaults(current_year: i32) -> Self {
        ReviewDraft {
            state: String::new(),
            location: String::new(),
            workplace_name: String::new(),
            job_title: String::new(),
            last_year_worked: current_year.to_string(),
            comment: String::new(),
        }
    }
}

pub fn current_year() -> i32 {
    Local::now().year()
}

/// Validates against the wall clock's current year.
pub fn validate(draft: &ReviewDraft) -> Result<Review, ValidationErrors> {
    validate_at(draft, current_year())
}

/// Checks every field and reports every failure at once; a draft passes only
/// when all six constraints hold. Deterministic for a given draft and year.
pub fn validate_at(draft: &ReviewDraft, current_year: i32) -> Result<Review, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let state = Jurisdiction::from_code(&draft.state);
    if state.is_none() {
        errors.push(Field::State, "Please select a state");
    }

    if draft.workplace_name.is_empty() {
        errors.push(Field::WorkplaceName, "Workplace name is required");
    }

    if draft.job_title.chars().count() < 2 {
        errors.push(Field::JobTitle, "Job title is required");
    }

    // Non-numeric input fails the range check rather than crashing.
    let year = match draft.last_year_worked.trim().parse::<i32>() {
        Ok(y) if y > current_year => {
            errors.push(Field::LastYearWorked, "Year cannot be in the future");
            None
        }
        Ok(y) if y >= MIN_YEAR => Some(y),
        _ => {
            errors.push(Field::LastYearWorked, "Please enter a valid year");
            None
        }
    };

    let comment_len = draft.comment.chars().count();
    if comment_len < COMMENT_MIN_LEN {
        errors.push(Field::Comment, "Comment is required");
    } else if comment_len > COMMENT_MAX_LEN {
        errors.push(Field::Comment, "Comment must be 3000 characters or fewer");
    }

    match (state, year) {
        (Some(state), Some(last_year_worked)) if errors.is_empty() => Ok(Review {
            state,
            location: draft.location.clone(),
            workplace_name: draft.workplace_name.clone(),
            job_title: draft.job_title.clone(),
            last_year_worked,
            comment: draft.comment.clone(),
        }),
        _ => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_YEAR: i32 = 2026;

    fn valid_draft() -> ReviewDraft {
        ReviewDraft {
            state: "NSW".into(),
            location: "Sydney CBD".into(),
            workplace_name: "ABC Co".into(),
            job_title: "Engineer".into(),
            last_year_worked: "2022".into(),
            comment: "Good team.".into(),
        }
    }

    #[test]
    fn accepts_a_fully_valid_draft_with_coerced_year() {
        let review = validate_at(&valid_draft(), TEST_YEAR).unwrap();
        assert_eq!(review.state, Jurisdiction::NSW);
        assert_eq!(review.location, "Sydney CBD");
        assert_eq!(review.workplace_name, "ABC Co");
        assert_eq!(review.job_title, "Engineer");
        assert_eq!(review.last_year_worked, 2022);
        assert_eq!(review.comment, "Good team.");
    }

    #[test]
    fn empty_location_is_allowed() {
        let mut draft = valid_draft();
        draft.location = String::new();
        assert!(validate_at(&draft, TEST_YEAR).is_ok());
    }

    #[test]
    fn rejects_unknown_or_missing_state() {
        for code in ["", "NZ", "nsw"] {
            let mut draft = valid_draft();
            draft.state = code.into();
            let errors = validate_at(&draft, TEST_YEAR).unwrap_err();
            assert_eq!(errors.message(Field::State), Some("Please select a state"));
        }
    }

    #[test]
    fn rejects_empty_workplace_name() {
        let mut draft = valid_draft();
        draft.workplace_name = String::new();
        let errors = validate_at(&draft, TEST_YEAR).unwrap_err();
        assert_eq!(
            errors.message(Field::WorkplaceName),
            Some("Workplace name is required")
        );
    }

    #[test]
    fn rejects_one_character_job_title() {
        let mut draft = valid_draft();
        draft.job_title = "X".into();
        let errors = validate_at(&draft, TEST_YEAR).unwrap_err();
        assert_eq!(errors.message(Field::JobTitle), Some("Job title is required"));

        draft.job_title = "IT".into();
        assert!(validate_at(&draft, TEST_YEAR).is_ok());
    }

    #[test]
    fn year_boundaries() {
        let cases = [
            ("1899".to_string(), false),
            ("1900".to_string(), true),
            (TEST_YEAR.to_string(), true),
            ((TEST_YEAR + 1).to_string(), false),
        ];
        for (year, ok) in cases {
            let mut draft = valid_draft();
            draft.last_year_worked = year.clone();
            assert_eq!(
                validate_at(&draft, TEST_YEAR).is_ok(),
                ok,
                "year {} should be {}",
                year,
                if ok { "accepted" } else { "rejected" }
            );
        }
    }

    #[test]
    fn future_year_gets_its_own_message() {
        let mut draft = valid_draft();
        draft.last_year_worked = (TEST_YEAR + 1).to_string();
        let errors = validate_at(&draft, TEST_YEAR).unwrap_err();
        assert_eq!(
            errors.message(Field::LastYearWorked),
            Some("Year cannot be in the future")
        );
    }

    #[test]
    fn non_numeric_year_is_a_validation_failure() {
        for raw in ["", "soon", "20.22", "199O"] {
            let mut draft = valid_draft();
            draft.last_year_worked = raw.into();
            let errors = validate_at(&draft, TEST_YEAR).unwrap_err();
            assert_eq!(
                errors.message(Field::LastYearWorked),
                Some("Please enter a valid year")
            );
        }
    }

    #[test]
    fn comment_length_boundaries() {
        let cases = [(1, false), (2, true), (3000, true), (3001, false)];
        for (len, ok) in cases {
            let mut draft = valid_draft();
            draft.comment = "x".repeat(len);
            assert_eq!(
                validate_at(&draft, TEST_YEAR).is_ok(),
                ok,
                "comment of length {} should be {}",
                len,
                if ok { "accepted" } else { "rejected" }
            );
        }
    }

    #[test]
    fn reports_every_offending_field_at_once() {
        let draft = ReviewDraft::with_defaults(TEST_YEAR);
        let errors = validate_at(&draft, TEST_YEAR).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.message(Field::State).is_some());
        assert!(errors.message(Field::WorkplaceName).is_some());
        assert!(errors.message(Field::JobTitle).is_some());
        assert!(errors.message(Field::Comment).is_some());
        // defaults pre-fill the current year, which is valid
        assert!(errors.message(Field::LastYearWorked).is_none());
        assert!(errors.message(Field::Location).is_none());
    }

    #[test]
    fn validation_is_idempotent() {
        let mut draft = valid_draft();
        draft.state = "".into();
        draft.comment = "x".into();
        let first = validate_at(&draft, TEST_YEAR).unwrap_err();
        let second = validate_at(&draft, TEST_YEAR).unwrap_err();
        assert_eq!(first, second);

        let good = valid_draft();
        assert_eq!(
            validate_at(&good, TEST_YEAR).unwrap(),
            validate_at(&good, TEST_YEAR).unwrap()
        );
    }

    #[test]
    fn defaults_prefill_the_current_year() {
        let draft = ReviewDraft::with_defaults(TEST_YEAR);
        assert_eq!(draft.last_year_worked, "2026");
        assert_eq!(draft.workplace_name, "");
        assert_eq!(draft.comment, "");
    }
}
