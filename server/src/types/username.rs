use std::{fmt::Display, str::FromStr};

use sqlx::{Sqlite, Type};
use validation::{FieldErrors, validate_username};

/// A username that satisfies the registration format rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Username {
    type Err = FieldErrors;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Username::try_from(s.to_string())
    }
}

impl TryFrom<String> for Username {
    type Error = FieldErrors;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Username::try_from(Some(value))
    }
}

impl TryFrom<Option<String>> for Username {
    type Error = FieldErrors;

    fn try_from(value: Option<String>) -> Result<Self, Self::Error> {
        validate_username(value).map(Self)
    }
}

impl Type<Sqlite> for Username {
    fn type_info() -> <Sqlite as sqlx::Database>::TypeInfo {
        <String as Type<Sqlite>>::type_info()
    }
}

impl<'q> sqlx::Encode<'q, Sqlite> for Username {
    fn encode_by_ref(
        &self,
        buf: &mut <Sqlite as sqlx::Database>::ArgumentBuffer<'q>,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<'q, Sqlite>>::encode_by_ref(&self.0, buf)
    }
}

impl Display for Username {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
