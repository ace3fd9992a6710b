use std::fmt;

/// A single-line text box.
///
/// Renders as `[value]`, or `[(placeholder)]` when empty. A trailing `!`
/// marks an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Input {
    value: String,
    placeholder: String,
    max_length: Option<usize>,
    has_error: bool,
}

impl Input {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    pub fn placeholder(
        mut self,
        placeholder: impl Into<String>,
    ) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Longer values are cut to `max_length` characters.
    pub fn max_length(
        mut self,
        max_length: usize,
    ) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn error(
        mut self,
        has_error: bool,
    ) -> Self {
        self.has_error = has_error;
        self
    }

    pub fn value(&self) -> String {
        match self.max_length {
            Some(max) => self.value.chars().take(max).collect(),
            None => self.value.clone(),
        }
    }
}

impl fmt::Display for Input {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let value = self.value();
        if value.is_empty() {
            write!(f, "[({})]", self.placeholder)?;
        } else {
            write!(f, "[{value}]")?;
        }
        if self.has_error {
            f.write_str("!")?;
        }
        Ok(())
    }
}
