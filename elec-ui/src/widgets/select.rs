use std::fmt;

use elec_core::catalog::SelectOption;

/// A drop-down over typed options.
///
/// Renders the current choice (or the placeholder) on the first line, then
/// one line per option with its wire id; `*` marks the selected one.
#[derive(Debug, Clone)]
pub struct Select<T> {
    options: Vec<SelectOption<T>>,
    selected: Option<T>,
    placeholder: String,
    has_error: bool,
}

impl<T> Select<T>
where
    T: Copy + PartialEq + fmt::Display,
{
    pub fn new(options: Vec<SelectOption<T>>) -> Self {
        Self {
            options,
            selected: None,
            placeholder: String::new(),
            has_error: false,
        }
    }

    pub fn selected(
        mut self,
        selected: Option<T>,
    ) -> Self {
        self.selected = selected;
        self
    }

    pub fn placeholder(
        mut self,
        placeholder: impl Into<String>,
    ) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn error(
        mut self,
        has_error: bool,
    ) -> Self {
        self.has_error = has_error;
        self
    }

    fn selected_label(&self) -> Option<&str> {
        let selected = self.selected?;
        self.options
            .iter()
            .find(|option| option.value == selected)
            .map(|option| option.label.as_str())
    }
}

impl<T> fmt::Display for Select<T>
where
    T: Copy + PartialEq + fmt::Display,
{
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self.selected_label() {
            Some(label) => write!(f, "[{label}] v")?,
            None => write!(f, "[({})] v", self.placeholder)?,
        }
        if self.has_error {
            f.write_str("!")?;
        }
        for option in &self.options {
            let mark = if Some(option.value) == self.selected { '*' } else { ' ' };
            write!(f, "\n  {mark} {} ({})", option.label, option.value)?;
        }
        Ok(())
    }
}
