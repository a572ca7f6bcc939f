use std::fmt::{Debug, Display};

/// An error annotated with what the caller was doing when it happened.
pub struct Error<E> {
    context: String,
    source: E,
}

impl<E> Error<E> {
    pub fn new(context: impl Into<String>, source: E) -> Self {
        Self {
            context: context.into(),
            source,
        }
    }
}

impl<E: Display> Display for Error<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} :: {}", self.context, self.source)
    }
}

impl<E: Debug> Debug for Error<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} :: {:?}", self.context, self.source)
    }
}

impl<E> std::error::Error for Error<E>
where
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

pub trait Context<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T, Error<E>>;
}

impl<T, E> Context<T, E> for Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T, Error<E>> {
        self.map_err(|source| Error::new(context, source))
    }
}
