use std::fmt;

/// Label, body and error text for one form row.
///
/// ```text
/// Plan *
///   [(Select a plan)] v
///   ! Select a plan.
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    label: String,
    required: bool,
    body: String,
    error: Option<String>,
}

impl FormField {
    pub fn new(
        label: impl Into<String>,
        body: impl fmt::Display,
    ) -> Self {
        Self {
            label: label.into(),
            required: false,
            body: body.to_string(),
            error: None,
        }
    }

    pub fn required(
        mut self,
        required: bool,
    ) -> Self {
        self.required = required;
        self
    }

    pub fn error(
        mut self,
        error: Option<&str>,
    ) -> Self {
        self.error = error.map(str::to_string);
        self
    }
}

impl fmt::Display for FormField {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(&self.label)?;
        if self.required {
            f.write_str(" *")?;
        }
        for line in self.body.lines() {
            write!(f, "\n  {line}")?;
        }
        if let Some(error) = &self.error {
            write!(f, "\n  ! {error}")?;
        }
        Ok(())
    }
}
