use std::{fmt::Display, sync::LazyLock};

use regex::Regex;

pub const USERNAME_MIN_LEN: usize = 2;
pub const USERNAME_MAX_LEN: usize = 20;

static RE_USERNAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^[A-Za-z0-9_]*$"#).expect("valid username regex"));

pub const REQUIRED: &str = "Expected string, received null";
pub const TOO_SHORT: &str = "Username must be at least 2 characters";
pub const TOO_LONG: &str = "Username must be no more than 20 characters";
pub const SPECIAL_CHARACTERS: &str = "Username must not contain special characters";

/// Messages for every rule a field failed, in rule order.
///
/// An empty list means the input was rejected before any field rule could run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<&'static str>);

impl FieldErrors {
    pub const FALLBACK: &'static str = "Invalid query parameters";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: &'static str) {
        self.0.push(message);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn messages(&self) -> &[&'static str] {
        &self.0
    }
}

impl Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0.is_empty() {
            true => write!(f, "{}", Self::FALLBACK),
            false => write!(f, "{}", self.0.join(", ")),
        }
    }
}

impl std::error::Error for FieldErrors {}

impl From<Vec<&'static str>> for FieldErrors {
    fn from(messages: Vec<&'static str>) -> Self {
        Self(messages)
    }
}

/// Checks a username against every rule and collects all failures.
pub fn validate_username(username: Option<String>) -> Result<String, FieldErrors> {
    let Some(username) = username else {
        return Err(FieldErrors(vec![REQUIRED]));
    };

    let mut errors = FieldErrors::new();
    let len = username.chars().count();

    if len < USERNAME_MIN_LEN {
        errors.push(TOO_SHORT);
    }
    if len > USERNAME_MAX_LEN {
        errors.push(TOO_LONG);
    }
    if !RE_USERNAME_CHARS.is_match(&username) {
        errors.push(SPECIAL_CHARACTERS);
    }

    match errors.is_empty() {
        true => Ok(username),
        false => Err(errors),
    }
}
