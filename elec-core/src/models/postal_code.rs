use std::fmt;

/// A Japanese postal code entered as two boxes: `first` (3 digits) and
/// `second` (4 digits). Either part may hold partial input while typing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostalCode {
    pub first: String,
    pub second: String,
}

impl PostalCode {
    pub fn new(
        first: impl Into<String>,
        second: impl Into<String>,
    ) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
        }
    }

    /// `true` when both parts are well-formed.
    pub fn is_complete(&self) -> bool {
        is_ascii_digits(&self.first, 3) && is_ascii_digits(&self.second, 4)
    }

    /// The hyphen-free 7-digit key sent to the area check, once complete.
    pub fn lookup_key(&self) -> Option<String> {
        self.is_complete()
            .then(|| format!("{}{}", self.first, self.second))
    }
}

fn is_ascii_digits(
    s: &str,
    len: usize,
) -> bool {
    s.len() == len && s.bytes().all(|b| b.is_ascii_digit())
}

impl fmt::Display for PostalCode {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}-{}", self.first, self.second)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn lookup_key_concatenates_complete_parts() {
        let code = PostalCode::new("123", "4567");

        assert_eq!(code.lookup_key().as_deref(), Some("1234567"));
        assert_eq!(code.to_string(), "123-4567");
    }

    #[test]
    fn partial_input_has_no_lookup_key() {
        assert_eq!(PostalCode::new("12", "4567").lookup_key(), None);
        assert_eq!(PostalCode::new("123", "456").lookup_key(), None);
        assert_eq!(PostalCode::default().lookup_key(), None);
    }

    #[test]
    fn non_ascii_digits_are_not_complete() {
        assert!(!PostalCode::new("12a", "4567").is_complete());
        assert!(!PostalCode::new("１２３", "4567").is_complete());
    }
}
