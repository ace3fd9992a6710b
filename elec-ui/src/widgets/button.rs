use std::fmt;

/// Renders as `< label >`, with `(disabled)` appended when inactive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    label: String,
    loading_label: Option<String>,
    disabled: bool,
    loading: bool,
}

impl Button {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            loading_label: None,
            disabled: false,
            loading: false,
        }
    }

    pub fn disabled(
        mut self,
        disabled: bool,
    ) -> Self {
        self.disabled = disabled;
        self
    }

    /// While loading the button is inactive and shows `loading_label`.
    pub fn loading(
        mut self,
        loading: bool,
        loading_label: impl Into<String>,
    ) -> Self {
        self.loading = loading;
        self.loading_label = Some(loading_label.into());
        self
    }

    pub fn is_enabled(&self) -> bool {
        !self.disabled && !self.loading
    }
}

impl fmt::Display for Button {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let label = match (&self.loading_label, self.loading) {
            (Some(loading_label), true) => loading_label,
            _ => &self.label,
        };
        write!(f, "< {label} >")?;
        if !self.is_enabled() {
            f.write_str(" (disabled)")?;
        }
        Ok(())
    }
}
