use regex::Regex;
use std::sync::LazyLock;

pub type ValidationError = String;
pub type Validator = Box<dyn Fn(&str) -> Result<(), ValidationError> + Send + Sync>;

/// Run a list of validators against `value`, returning the first error.
pub fn run_validators(validators: &[Validator], value: &str) -> Result<(), String> {
    for validator in validators {
        validator(value)?;
    }
    Ok(())
}

/// Fails on the empty string only; whitespace counts as a value.
pub fn required(message: impl Into<String>) -> Validator {
    let message = message.into();
    Box::new(move |value: &str| {
        if value.is_empty() {
            Err(message.clone())
        } else {
            Ok(())
        }
    })
}

/// ASCII digits only, including the empty string.
pub static DIGITS_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]*$").expect("Invalid regex pattern"));

#[cfg(test)]
mod tests {
    use super::{DIGITS_ONLY, required, run_validators};

    #[test]
    fn first_failing_validator_wins() {
        let validators = vec![required("first"), required("second")];
        assert_eq!(run_validators(&validators, ""), Err("first".to_string()));
        assert_eq!(run_validators(&validators, " "), Ok(()));
    }

    #[test]
    fn digits_pattern_rejects_letters_and_non_ascii_digits() {
        assert!(DIGITS_ONLY.is_match(""));
        assert!(DIGITS_ONLY.is_match("1200"));
        assert!(!DIGITS_ONLY.is_match("12a"));
        assert!(!DIGITS_ONLY.is_match("१२"));
    }
}
