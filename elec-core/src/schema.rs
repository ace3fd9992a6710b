//! Declarative validation of a [`FormValues`] snapshot.
//!
//! Field rules are independent of each other. The single cross-field rule
//! (contract capacity is required unless the plan is exempt) runs only once
//! the form is far enough along, see [`cross_field_applies`].

use std::{
    collections::{BTreeMap, btree_map},
    sync::LazyLock,
};

use regex::Regex;
use rust_decimal::Decimal;

use crate::{
    messages::{Locale, Messages},
    models::{Field, FormValues},
};

/// Smallest accepted monthly bill, inclusive.
pub const MIN_ELECTRIC_BILL: Decimal = Decimal::ONE_THOUSAND;

static POSTAL_CODE_FIRST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{3}$").expect("postal code regex is valid"));

static POSTAL_CODE_SECOND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}$").expect("postal code regex is valid"));

// Local part may not start with a dot and must end on a word character;
// the domain needs at least one dot and an alphabetic TLD.
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .expect("email regex is valid")
});

/// Field-level error messages keyed by field, in disclosure order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, &'static str>);

impl FieldErrors {
    pub fn get(
        &self,
        field: Field,
    ) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    pub fn contains(
        &self,
        field: Field,
    ) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, Field, &'static str> {
        self.0.iter()
    }

    fn insert(
        &mut self,
        field: Field,
        message: &'static str,
    ) {
        self.0.insert(field, message);
    }
}

pub fn is_valid_email(email: &str) -> bool {
    !email.starts_with('.') && !email.contains("..") && EMAIL.is_match(email)
}

/// Guard for the cross-field rule: company, plan and bill must all be
/// present before a missing capacity counts as an error.
pub fn cross_field_applies(values: &FormValues) -> bool {
    values.power_company.is_some() && values.plan.is_some() && values.current_electric_bill.is_some()
}

/// The capacity requirement itself, assuming the guard holds.
fn capacity_satisfied(values: &FormValues) -> bool {
    match values.plan {
        Some(plan) if plan.is_capacity_exempt() => true,
        _ => values.contract_capacity.is_some(),
    }
}

/// Validation rules bound to one locale's messages.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    messages: &'static Messages,
}

impl Schema {
    pub fn new(locale: Locale) -> Self {
        Self {
            messages: locale.messages(),
        }
    }

    /// Re-evaluates every rule against the snapshot.
    pub fn validate(
        &self,
        values: &FormValues,
    ) -> FieldErrors {
        let mut errors = FieldErrors::default();

        for field in Field::ALL {
            if let Some(message) = self.check_field(field, values) {
                errors.insert(field, message);
            }
        }

        if cross_field_applies(values) && !capacity_satisfied(values) {
            errors.insert(
                Field::ContractCapacity,
                self.messages.contract_capacity_required,
            );
        }

        errors
    }

    fn check_field(
        &self,
        field: Field,
        values: &FormValues,
    ) -> Option<&'static str> {
        let m = self.messages;
        match field {
            Field::PostalCodeFirst => (!POSTAL_CODE_FIRST.is_match(&values.postal_code.first))
                .then_some(m.postal_code_first_invalid),
            Field::PostalCodeSecond => (!POSTAL_CODE_SECOND.is_match(&values.postal_code.second))
                .then_some(m.postal_code_second_invalid),
            Field::PowerCompany => values
                .power_company
                .is_none()
                .then_some(m.power_company_required),
            Field::Plan => values.plan.is_none().then_some(m.plan_required),
            // Typed values are always catalog members; presence is the
            // cross-field rule's concern.
            Field::ContractCapacity => None,
            Field::CurrentElectricBill => match values.current_electric_bill {
                Some(bill) if bill >= MIN_ELECTRIC_BILL => None,
                _ => Some(m.electric_bill_invalid),
            },
            Field::Email => (!is_valid_email(&values.email)).then_some(m.email_invalid),
        }
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::new(Locale::default())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{ContractCapacity, Plan, PostalCode, PowerCompany};

    fn complete_tokyo() -> FormValues {
        FormValues {
            postal_code: PostalCode::new("123", "4567"),
            power_company: Some(PowerCompany::TokyoElectric),
            plan: Some(Plan::TokyoJuryouB),
            contract_capacity: Some(ContractCapacity::Ampere(30)),
            current_electric_bill: Some(dec!(12000)),
            email: "test@example.com".to_string(),
        }
    }

    // =========================================================================
    // field rules
    // =========================================================================

    #[test]
    fn complete_values_pass() {
        assert!(Schema::default().validate(&complete_tokyo()).is_empty());
    }

    #[test]
    fn empty_form_reports_every_required_field() {
        let errors = Schema::default().validate(&FormValues::default());

        let fields: Vec<Field> = errors.iter().map(|(f, _)| *f).collect();
        assert_eq!(
            fields,
            vec![
                Field::PostalCodeFirst,
                Field::PostalCodeSecond,
                Field::PowerCompany,
                Field::Plan,
                Field::CurrentElectricBill,
                Field::Email,
            ]
        );
    }

    #[test]
    fn postal_code_parts_need_exact_digit_counts() {
        let mut values = complete_tokyo();
        values.postal_code = PostalCode::new("12", "45678");

        let errors = Schema::default().validate(&values);

        assert_eq!(errors.get(Field::PostalCodeFirst), Some("Enter 3 digits."));
        assert_eq!(errors.get(Field::PostalCodeSecond), Some("Enter 4 digits."));
    }

    #[test]
    fn bill_boundary_is_inclusive() {
        let mut values = complete_tokyo();

        values.current_electric_bill = Some(dec!(999));
        assert!(Schema::default().validate(&values).contains(Field::CurrentElectricBill));

        values.current_electric_bill = Some(dec!(1000));
        assert!(Schema::default().validate(&values).is_empty());
    }

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("test@example.com"));
        assert!(is_valid_email("first.last+tag@mail.example.co.jp"));
        assert!(!is_valid_email("test@example"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email(".test@example.com"));
        assert!(!is_valid_email("te..st@example.com"));
        assert!(!is_valid_email("test.@example.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn messages_follow_locale() {
        let errors = Schema::new(Locale::Ja).validate(&FormValues::default());

        assert_eq!(
            errors.get(Field::Email),
            Some("メールアドレスを正しく入力してください。")
        );
    }

    // =========================================================================
    // cross-field rule
    // =========================================================================

    #[test]
    fn missing_capacity_is_reported_on_the_capacity_field() {
        let mut values = complete_tokyo();
        values.contract_capacity = None;

        let errors = Schema::default().validate(&values);

        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get(Field::ContractCapacity),
            Some("Select a contract capacity.")
        );
    }

    #[test]
    fn exempt_plan_needs_no_capacity() {
        let mut values = complete_tokyo();
        values.postal_code = PostalCode::new("567", "8901");
        values.power_company = Some(PowerCompany::KansaiElectric);
        values.plan = Some(Plan::KansaiJuryouA);
        values.contract_capacity = None;

        assert!(Schema::default().validate(&values).is_empty());
    }

    #[test]
    fn cross_field_rule_waits_for_the_bill() {
        let mut values = complete_tokyo();
        values.contract_capacity = None;
        values.current_electric_bill = None;

        assert!(!cross_field_applies(&values));
        assert!(!Schema::default().validate(&values).contains(Field::ContractCapacity));
    }
}
