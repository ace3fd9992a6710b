use std::fmt;

use rust_decimal::Decimal;

use crate::{
    messages::Locale,
    models::{ContractCapacity, FormValues, Plan, PostalCode, PowerCompany},
};

/// The confirmation shown after a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionSummary {
    pub postal_code: PostalCode,
    pub power_company: PowerCompany,
    pub plan: Plan,
    pub contract_capacity: Option<ContractCapacity>,
    pub current_electric_bill: Decimal,
    pub locale: Locale,
}

impl SubmissionSummary {
    /// Returns `None` unless company, plan and bill are all present.
    pub fn from_values(
        values: &FormValues,
        locale: Locale,
    ) -> Option<Self> {
        Some(Self {
            postal_code: values.postal_code.clone(),
            power_company: values.power_company?,
            plan: values.plan?,
            contract_capacity: values.contract_capacity,
            current_electric_bill: values.current_electric_bill?,
            locale,
        })
    }

    /// Bill with thousands separators and the locale's currency suffix.
    pub fn formatted_bill(&self) -> String {
        format!(
            "{}{}",
            format_thousands(self.current_electric_bill),
            self.locale.messages().currency_suffix
        )
    }

    pub fn capacity_display(&self) -> String {
        self.contract_capacity
            .map(|c| c.to_string())
            .unwrap_or_else(|| self.locale.messages().no_capacity.to_string())
    }
}

impl fmt::Display for SubmissionSummary {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let m = self.locale.messages();
        writeln!(f, "{}", m.summary_title)?;
        writeln!(f)?;
        writeln!(f, "{}: {}", m.summary_postal_code, self.postal_code)?;
        writeln!(f, "{}: {}", m.summary_power_company, self.power_company)?;
        writeln!(f, "{}: {}", m.summary_plan, self.plan)?;
        writeln!(f, "{}: {}", m.summary_contract_capacity, self.capacity_display())?;
        write!(f, "{}: {}", m.summary_bill, self.formatted_bill())
    }
}

/// Formats a decimal with comma thousands separators, keeping any
/// significant fraction digits (`12000` → `"12,000"`, `1234.50` → `"1,234.5"`).
pub fn format_thousands(amount: Decimal) -> String {
    let text = amount.normalize().abs().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (text.as_str(), None),
    };

    let mut out = String::with_capacity(text.len() + int_part.len() / 3 + 1);
    if amount.is_sign_negative() && !amount.is_zero() {
        out.push('-');
    }
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac_part) = frac_part {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}
