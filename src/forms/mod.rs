//! Form drafts: locally edited copies of an entity, changed only through
//! [`FormMsg`] and turned into a payload at submit time.

pub mod project;
pub mod skill;
pub mod submit;

pub use project::ProjectDraft;
pub use skill::SkillDraft;
pub use submit::{SubmitPhase, SubmitRequest};

use thiserror::Error;

use crate::assets::SelectedFile;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("{0} must be a whole number")]
    NotANumber(&'static str),

    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
    },
}

/// How a field is edited and displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Choice,
    Toggle,
    File,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormMsg<F> {
    SetText(F, String),
    Cycle(F, bool),
    Toggle(F),
    SelectFile(SelectedFile),
    RemoveImage,
}

/// Shared surface of the project and skill drafts, used by the form modal.
pub trait Draft {
    type Field: Copy + PartialEq + 'static;

    const FIELDS: &'static [Self::Field];

    /// Title of the modal.
    fn title(&self) -> &'static str;

    fn label(field: Self::Field) -> &'static str;

    fn kind(field: Self::Field) -> FieldKind;

    fn required(field: Self::Field) -> bool;

    /// Current value as shown in the form.
    fn display(&self, field: Self::Field) -> String;

    fn apply(&mut self, msg: FormMsg<Self::Field>);

    fn is_new(&self) -> bool;

    fn icon(&self) -> &str;

    fn selected_file(&self) -> Option<&SelectedFile>;

    fn submit_request(&self) -> Result<SubmitRequest, FormError>;
}

/// Step through a fixed list of options, wrapping at both ends.
pub fn cycle<T: PartialEq + Clone>(options: &[T], current: &T, forward: bool) -> T {
    let len = options.len();
    let index = options.iter().position(|option| option == current);
    let next = match (index, forward) {
        (None, _) => 0,
        (Some(i), true) => (i + 1) % len,
        (Some(i), false) => (i + len - 1) % len,
    };
    options[next].clone()
}

/// Parse a number input; an empty input counts as zero.
pub fn parse_number(raw: &str, field: &'static str) -> Result<i64, FormError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0);
    }
    raw.parse().map_err(|_| FormError::NotANumber(field))
}

pub fn parse_in_range(raw: &str, field: &'static str, min: i64, max: i64) -> Result<i64, FormError> {
    let value = parse_number(raw, field)?;
    if value < min || value > max {
        return Err(FormError::OutOfRange { field, min, max });
    }
    Ok(value)
}

fn require(value: &str, field: &'static str) -> Result<String, FormError> {
    if value.trim().is_empty() {
        return Err(FormError::Required(field));
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_wraps_both_ways() {
        let options = [1, 2, 3];
        assert_eq!(cycle(&options, &3, true), 1);
        assert_eq!(cycle(&options, &1, false), 3);
        assert_eq!(cycle(&options, &2, true), 3);
        assert_eq!(cycle(&options, &9, true), 1);
    }

    #[test]
    fn empty_number_is_zero() {
        assert_eq!(parse_number("", "order"), Ok(0));
        assert_eq!(parse_number(" 12 ", "order"), Ok(12));
        assert_eq!(parse_number("1x", "order"), Err(FormError::NotANumber("order")));
    }

    #[test]
    fn range_bounds_are_inclusive() {
        assert_eq!(parse_in_range("0", "percentage", 0, 100), Ok(0));
        assert_eq!(parse_in_range("100", "percentage", 0, 100), Ok(100));
        assert!(parse_in_range("101", "percentage", 0, 100).is_err());
        assert!(parse_in_range("-1", "percentage", 0, 100).is_err());
    }
}
