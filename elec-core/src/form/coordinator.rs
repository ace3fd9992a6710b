use std::collections::BTreeSet;

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::{
    area_check::{AreaCheckOutcome, AreaCheckTicket},
    summary::SubmissionSummary,
    transitions::FormEvent,
};
use crate::{
    catalog::{self, SelectOption},
    messages::{Locale, Messages},
    models::{ContractCapacity, Field, FormValues, Plan, PostalCode, PowerCompany, ServiceArea},
    schema::{FieldErrors, Schema},
};

/// Reasons a submission is refused. The form is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("a submission is already in progress")]
    InProgress,

    #[error("{0}")]
    Area(String),

    #[error("{0}")]
    Company(&'static str),

    #[error("the postal code is outside the service area")]
    OutOfService,

    #[error("the service area has not been resolved yet")]
    AreaPending,

    #[error("{} field(s) are invalid", .0.len())]
    Invalid(Vec<Field>),
}

/// Everything the coordinator tracks. Read-only outside [`ElectricForm`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub values: FormValues,
    pub current_area: Option<ServiceArea>,
    pub area_error: Option<String>,
    pub company_error: Option<&'static str>,
    /// The latest area check still in flight, if any.
    pub pending_area_check: Option<AreaCheckTicket>,
    pub is_submitting: bool,
    /// Result of the latest full-schema validation.
    pub errors: FieldErrors,
    /// Fields the user has edited since they were last reset.
    pub touched: BTreeSet<Field>,
}

/// The progressive-disclosure form state machine.
///
/// Every setter records the new value, runs the cascade the change implies,
/// and re-validates the whole snapshot. Postal code edits return an
/// [`AreaCheckTicket`] when a lookup is due; the caller runs it and hands the
/// outcome back through [`ElectricForm::apply_area_check`].
#[derive(Debug, Clone)]
pub struct ElectricForm {
    state: FormState,
    schema: Schema,
    locale: Locale,
    /// Tickets issued so far. Survives `reset` so old outcomes stay stale.
    issued_checks: u64,
}

impl ElectricForm {
    pub fn new(locale: Locale) -> Self {
        let mut form = Self {
            state: FormState::default(),
            schema: Schema::new(locale),
            locale,
            issued_checks: 0,
        };
        form.revalidate();
        form
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn values(&self) -> &FormValues {
        &self.state.values
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn messages(&self) -> &'static Messages {
        self.locale.messages()
    }

    // ─── postal code ─────────────────────────────────────────────────────────

    pub fn set_postal_code_first(
        &mut self,
        first: &str,
    ) -> Option<AreaCheckTicket> {
        self.state.values.postal_code.first = first.to_string();
        self.state.touched.insert(Field::PostalCodeFirst);
        self.postal_code_changed()
    }

    pub fn set_postal_code_second(
        &mut self,
        second: &str,
    ) -> Option<AreaCheckTicket> {
        self.state.values.postal_code.second = second.to_string();
        self.state.touched.insert(Field::PostalCodeSecond);
        self.postal_code_changed()
    }

    pub fn set_postal_code(
        &mut self,
        first: &str,
        second: &str,
    ) -> Option<AreaCheckTicket> {
        self.state.values.postal_code = PostalCode::new(first, second);
        self.state.touched.insert(Field::PostalCodeFirst);
        self.state.touched.insert(Field::PostalCodeSecond);
        self.postal_code_changed()
    }

    fn postal_code_changed(&mut self) -> Option<AreaCheckTicket> {
        self.revalidate();

        match self.state.values.postal_code.lookup_key() {
            Some(key) => {
                debug!(postal_code = %key, "postal code complete, area check due");
                self.issued_checks += 1;
                let ticket = AreaCheckTicket::new(key, self.issued_checks);
                self.state.pending_area_check = Some(ticket.clone());
                Some(ticket)
            }
            None => {
                // Still typing: forget the area but leave downstream fields alone.
                self.state.current_area = None;
                self.state.area_error = None;
                self.state.pending_area_check = None;
                None
            }
        }
    }

    /// Applies a finished area check.
    ///
    /// Returns `false` and changes nothing unless the ticket is the latest one
    /// issued and still in flight. A check superseded by a later edit stays
    /// stale even when the postal code has since returned to the same value.
    pub fn apply_area_check(
        &mut self,
        outcome: AreaCheckOutcome,
    ) -> bool {
        let AreaCheckOutcome { ticket, result } = outcome;

        if self.state.pending_area_check.as_ref() != Some(&ticket) {
            warn!(
                issued_for = ticket.postal_code(),
                sequence = ticket.sequence(),
                latest = self.issued_checks,
                "discarding stale area check"
            );
            return false;
        }
        self.state.pending_area_check = None;

        match result {
            Ok(response) => {
                if self.state.current_area != Some(response.area) {
                    self.apply_event(FormEvent::AreaChanged);
                }
                self.state.current_area = Some(response.area);

                if response.is_valid {
                    self.state.area_error = None;
                } else {
                    let message = if response.message.is_empty() {
                        self.messages().out_of_service_area.to_string()
                    } else {
                        response.message
                    };
                    self.state.area_error = Some(message);
                    self.apply_event(FormEvent::AreaOutOfService);
                }
                debug!(area = %response.area, "area resolved");
            }
            Err(error) => {
                warn!(%error, postal_code = ticket.postal_code(), "area check failed");
                self.state.area_error = Some(self.messages().area_check_failed.to_string());
            }
        }

        self.revalidate();
        true
    }

    // ─── selects ─────────────────────────────────────────────────────────────

    pub fn select_power_company(
        &mut self,
        company: Option<PowerCompany>,
    ) {
        self.state.values.power_company = company;
        self.state.touched.insert(Field::PowerCompany);

        match company {
            Some(company) if company.is_out_of_scope() => {
                self.state.company_error = Some(self.messages().out_of_simulation_scope);
                self.apply_event(FormEvent::CompanyOutOfScope);
            }
            Some(_) => self.state.company_error = None,
            None => {}
        }

        debug!(company = ?company, "power company changed");
        self.revalidate();
    }

    pub fn select_plan(
        &mut self,
        plan: Option<Plan>,
    ) {
        self.state.values.plan = plan;
        self.state.touched.insert(Field::Plan);
        self.apply_event(FormEvent::PlanChanged);

        debug!(plan = ?plan, "plan changed");
        self.revalidate();
    }

    pub fn select_contract_capacity(
        &mut self,
        capacity: Option<ContractCapacity>,
    ) {
        self.state.values.contract_capacity = capacity;
        self.state.touched.insert(Field::ContractCapacity);
        self.revalidate();
    }

    // ─── free-form inputs ────────────────────────────────────────────────────

    pub fn set_current_electric_bill(
        &mut self,
        bill: Option<Decimal>,
    ) {
        self.state.values.current_electric_bill = bill;
        self.state.touched.insert(Field::CurrentElectricBill);
        self.revalidate();
    }

    pub fn set_email(
        &mut self,
        email: &str,
    ) {
        self.state.values.email = email.trim().to_string();
        self.state.touched.insert(Field::Email);
        self.revalidate();
    }

    /// Marks every field as touched so all pending errors become visible.
    pub fn touch_all(&mut self) {
        self.state.touched.extend(Field::ALL);
    }

    /// Back to the pristine form.
    pub fn reset(&mut self) {
        self.state = FormState::default();
        self.revalidate();
    }

    // ─── derived reads ───────────────────────────────────────────────────────

    pub fn available_companies(&self) -> Vec<SelectOption<PowerCompany>> {
        catalog::companies_for(self.state.current_area)
    }

    pub fn available_plans(&self) -> Vec<SelectOption<Plan>> {
        if self.state.company_error.is_some() {
            return Vec::new();
        }
        catalog::plans_for(self.state.values.power_company)
    }

    pub fn available_capacities(&self) -> Vec<SelectOption<ContractCapacity>> {
        catalog::capacity_options_for(self.state.values.plan)
    }

    pub fn is_capacity_required(&self) -> bool {
        catalog::capacity_required(self.state.values.plan)
    }

    /// The error to show next to `field`, if the user has touched it.
    pub fn field_error(
        &self,
        field: Field,
    ) -> Option<&'static str> {
        if self.state.touched.contains(&field) {
            self.state.errors.get(field)
        } else {
            None
        }
    }

    pub fn is_valid(&self) -> bool {
        self.state.errors.is_empty()
    }

    // ─── submission ──────────────────────────────────────────────────────────

    /// The submit guard. `Ok(())` means the submit control is enabled.
    pub fn check_submittable(&self) -> Result<(), SubmitError> {
        let state = &self.state;

        if state.is_submitting {
            return Err(SubmitError::InProgress);
        }
        if let Some(message) = &state.area_error {
            return Err(SubmitError::Area(message.clone()));
        }
        if let Some(message) = state.company_error {
            return Err(SubmitError::Company(message));
        }
        match state.current_area {
            Some(ServiceArea::OutOfService) => return Err(SubmitError::OutOfService),
            None => return Err(SubmitError::AreaPending),
            Some(_) if state.pending_area_check.is_some() => {
                return Err(SubmitError::AreaPending);
            }
            Some(_) => {}
        }
        if !state.errors.is_empty() {
            return Err(SubmitError::Invalid(
                state.errors.iter().map(|(field, _)| *field).collect(),
            ));
        }
        Ok(())
    }

    pub fn can_submit(&self) -> bool {
        self.check_submittable().is_ok()
    }

    /// Submits the form and returns the confirmation summary.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError`] when the submit guard does not hold; the form
    /// state is not modified in that case.
    pub fn submit(&mut self) -> Result<SubmissionSummary, SubmitError> {
        self.check_submittable()?;

        self.state.is_submitting = true;
        let summary = SubmissionSummary::from_values(&self.state.values, self.locale);
        self.state.is_submitting = false;

        let summary = summary.ok_or_else(|| SubmitError::Invalid(vec![Field::Plan]))?;
        info!(
            postal_code = %summary.postal_code,
            company = %summary.power_company,
            plan = %summary.plan,
            "simulation submitted"
        );
        Ok(summary)
    }

    // ─── internals ───────────────────────────────────────────────────────────

    fn apply_event(
        &mut self,
        event: FormEvent,
    ) {
        for &field in event.resets() {
            self.clear_field(field);
        }
        if event.clears_company_error() {
            self.state.company_error = None;
        }
        debug!(?event, cleared = ?event.resets(), "cascade reset");
    }

    fn clear_field(
        &mut self,
        field: Field,
    ) {
        let values = &mut self.state.values;
        match field {
            Field::PostalCodeFirst => values.postal_code.first.clear(),
            Field::PostalCodeSecond => values.postal_code.second.clear(),
            Field::PowerCompany => values.power_company = None,
            Field::Plan => values.plan = None,
            Field::ContractCapacity => values.contract_capacity = None,
            Field::CurrentElectricBill => values.current_electric_bill = None,
            Field::Email => values.email.clear(),
        }
        self.state.touched.remove(&field);
    }

    fn revalidate(&mut self) {
        self.state.errors = self.schema.validate(&self.state.values);
    }
}

impl Default for ElectricForm {
    fn default() -> Self {
        Self::new(Locale::default())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::area::{AreaCheckError, resolve};

    /// Completes an area check synchronously with the in-process resolver.
    fn resolve_ticket(
        form: &mut ElectricForm,
        ticket: Option<AreaCheckTicket>,
    ) -> bool {
        let ticket = ticket.expect("postal code should be complete");
        let result = Ok(resolve(ticket.postal_code(), form.locale()));
        form.apply_area_check(AreaCheckOutcome { ticket, result })
    }

    fn tokyo_form_with_capacity() -> ElectricForm {
        let mut form = ElectricForm::default();
        let ticket = form.set_postal_code("123", "4567");
        resolve_ticket(&mut form, ticket);
        form.select_power_company(Some(PowerCompany::TokyoElectric));
        form.select_plan(Some(Plan::TokyoJuryouB));
        form.select_contract_capacity(Some(ContractCapacity::Ampere(30)));
        form
    }

    // =========================================================================
    // postal code
    // =========================================================================

    #[test]
    fn incomplete_postal_code_issues_no_ticket() {
        let mut form = ElectricForm::default();

        assert_eq!(form.set_postal_code_first("123"), None);
        assert_eq!(form.state().current_area, None);
    }

    #[test]
    fn completing_second_part_issues_ticket_for_full_key() {
        let mut form = ElectricForm::default();
        form.set_postal_code_first("123");

        let ticket = form.set_postal_code_second("4567").unwrap();

        assert_eq!(ticket.postal_code(), "1234567");
    }

    #[test]
    fn resolved_area_unlocks_companies() {
        let mut form = ElectricForm::default();
        let ticket = form.set_postal_code("123", "4567");

        assert!(resolve_ticket(&mut form, ticket));

        assert_eq!(form.state().current_area, Some(ServiceArea::Tokyo));
        assert_eq!(form.available_companies().len(), 2);
        assert_eq!(form.state().area_error, None);
    }

    #[test]
    fn changing_area_cascades_downstream_reset() {
        let mut form = tokyo_form_with_capacity();

        let ticket = form.set_postal_code_first("567");
        resolve_ticket(&mut form, ticket);

        let values = form.values();
        assert_eq!(form.state().current_area, Some(ServiceArea::Kansai));
        assert_eq!(values.power_company, None);
        assert_eq!(values.plan, None);
        assert_eq!(values.contract_capacity, None);
        assert_eq!(form.state().company_error, None);
        assert_eq!(form.field_error(Field::PowerCompany), None);
        assert_eq!(form.field_error(Field::ContractCapacity), None);
    }

    #[test]
    fn reconfirming_same_area_keeps_selections() {
        let mut form = tokyo_form_with_capacity();

        let ticket = form.set_postal_code_second("9999");
        resolve_ticket(&mut form, ticket);

        assert_eq!(form.values().power_company, Some(PowerCompany::TokyoElectric));
        assert_eq!(form.values().contract_capacity, Some(ContractCapacity::Ampere(30)));
    }

    #[test]
    fn out_of_service_sets_area_error_and_clears_downstream() {
        let mut form = tokyo_form_with_capacity();

        let ticket = form.set_postal_code_first("987");
        resolve_ticket(&mut form, ticket);

        assert_eq!(form.state().current_area, Some(ServiceArea::OutOfService));
        assert_eq!(
            form.state().area_error.as_deref(),
            Some("Service area not supported.")
        );
        assert_eq!(form.values().power_company, None);
        assert!(form.available_companies().is_empty());
    }

    #[test]
    fn partial_postal_code_forgets_area_without_cascade() {
        let mut form = tokyo_form_with_capacity();

        assert_eq!(form.set_postal_code_second("45"), None);

        assert_eq!(form.state().current_area, None);
        assert_eq!(form.state().area_error, None);
        assert_eq!(form.values().plan, Some(Plan::TokyoJuryouB));
    }

    #[test]
    fn transport_failure_reports_generic_error_and_keeps_area() {
        let mut form = tokyo_form_with_capacity();
        let ticket = form.set_postal_code_second("0000").unwrap();

        let applied = form.apply_area_check(AreaCheckOutcome {
            ticket,
            result: Err(AreaCheckError::Transport("connection refused".to_string())),
        });

        assert!(applied);
        assert_eq!(form.state().area_error.as_deref(), Some("Area check failed."));
        assert_eq!(form.state().current_area, Some(ServiceArea::Tokyo));
        assert!(!form.can_submit());
    }

    #[test]
    fn stale_outcome_is_discarded() {
        let mut form = ElectricForm::default();
        let stale = form.set_postal_code("987", "6543").unwrap();
        let fresh = form.set_postal_code("123", "4567");
        resolve_ticket(&mut form, fresh);

        let applied = form.apply_area_check(AreaCheckOutcome {
            result: Ok(resolve(stale.postal_code(), Locale::En)),
            ticket: stale,
        });

        assert!(!applied);
        assert_eq!(form.state().current_area, Some(ServiceArea::Tokyo));
        assert_eq!(form.state().area_error, None);
    }

    #[test]
    fn superseded_ticket_for_same_code_is_discarded() {
        let mut form = ElectricForm::default();
        let first = form.set_postal_code("123", "4567").unwrap();
        form.set_postal_code("567", "8901");
        let latest = form.set_postal_code("123", "4567");

        assert!(resolve_ticket(&mut form, latest));
        let applied = form.apply_area_check(AreaCheckOutcome {
            ticket: first,
            result: Err(AreaCheckError::Transport("timed out".to_string())),
        });

        assert!(!applied);
        assert_eq!(form.state().current_area, Some(ServiceArea::Tokyo));
        assert_eq!(form.state().area_error, None);
    }

    #[test]
    fn outcome_is_applied_only_once() {
        let mut form = ElectricForm::default();
        let ticket = form.set_postal_code("123", "4567").unwrap();

        assert!(resolve_ticket(&mut form, Some(ticket.clone())));
        assert!(!resolve_ticket(&mut form, Some(ticket)));
    }

    #[test]
    fn reset_keeps_earlier_tickets_stale() {
        let mut form = ElectricForm::default();
        let before = form.set_postal_code("123", "4567").unwrap();
        form.reset();
        let after = form.set_postal_code("123", "4567").unwrap();

        assert!(after.sequence() > before.sequence());
        assert!(!resolve_ticket(&mut form, Some(before)));
        assert!(resolve_ticket(&mut form, Some(after)));
    }

    // =========================================================================
    // company and plan
    // =========================================================================

    #[test]
    fn other_company_sets_scope_error_and_clears_plan() {
        let mut form = tokyo_form_with_capacity();

        form.select_power_company(Some(PowerCompany::Other));

        assert_eq!(form.state().company_error, Some("Out of simulation scope."));
        assert_eq!(form.values().plan, None);
        assert_eq!(form.values().contract_capacity, None);
        assert!(form.available_plans().is_empty());
    }

    #[test]
    fn real_company_after_other_clears_scope_error() {
        let mut form = tokyo_form_with_capacity();
        form.select_power_company(Some(PowerCompany::Other));

        form.select_power_company(Some(PowerCompany::TokyoElectric));

        assert_eq!(form.state().company_error, None);
        assert_eq!(form.available_plans().len(), 2);
    }

    #[test]
    fn plan_change_always_clears_capacity() {
        let mut form = tokyo_form_with_capacity();
        form.set_current_electric_bill(Some(dec!(5000)));

        form.select_plan(Some(Plan::TokyoJuryouC));

        assert_eq!(form.values().contract_capacity, None);
        assert!(form.is_capacity_required());
        // Cross-field error exists but is hidden until the field is touched.
        assert!(form.state().errors.contains(Field::ContractCapacity));
        assert_eq!(form.field_error(Field::ContractCapacity), None);
    }

    #[test]
    fn exempt_plan_offers_no_capacities() {
        let mut form = ElectricForm::default();
        let ticket = form.set_postal_code("567", "8901");
        resolve_ticket(&mut form, ticket);
        form.select_power_company(Some(PowerCompany::KansaiElectric));

        form.select_plan(Some(Plan::KansaiJuryouA));

        assert!(!form.is_capacity_required());
        assert!(form.available_capacities().is_empty());
    }

    // =========================================================================
    // errors and submission
    // =========================================================================

    #[test]
    fn untouched_fields_show_no_errors() {
        let form = ElectricForm::default();

        assert!(!form.is_valid());
        assert_eq!(form.field_error(Field::Email), None);
    }

    #[test]
    fn touched_field_shows_error() {
        let mut form = ElectricForm::default();

        form.set_email("not-an-email");

        assert_eq!(
            form.field_error(Field::Email),
            Some("Enter a valid email address.")
        );
    }

    #[test]
    fn touch_all_reveals_pending_errors() {
        let mut form = ElectricForm::default();

        form.touch_all();

        assert_eq!(form.field_error(Field::PostalCodeFirst), Some("Enter 3 digits."));
    }

    #[test]
    fn submit_lists_invalid_fields() {
        let mut form = tokyo_form_with_capacity();

        let err = form.submit().unwrap_err();

        assert_eq!(
            err,
            SubmitError::Invalid(vec![Field::CurrentElectricBill, Field::Email])
        );
        assert!(!form.state().is_submitting);
    }

    #[test]
    fn submit_produces_summary_and_clears_flag() {
        let mut form = tokyo_form_with_capacity();
        form.set_current_electric_bill(Some(dec!(12000)));
        form.set_email("test@example.com");

        let summary = form.submit().unwrap();

        assert_eq!(summary.postal_code.to_string(), "123-4567");
        assert_eq!(summary.formatted_bill(), "12,000 yen");
        assert!(!form.state().is_submitting);
    }

    #[test]
    fn submit_is_blocked_while_area_is_pending() {
        let mut form = tokyo_form_with_capacity();
        form.set_current_electric_bill(Some(dec!(12000)));
        form.set_email("test@example.com");

        // New postal code in the same area, check not yet completed.
        form.set_postal_code_second("0001");

        assert_eq!(form.submit().unwrap_err(), SubmitError::AreaPending);
    }

    #[test]
    fn reset_returns_to_pristine_state() {
        let mut form = tokyo_form_with_capacity();

        form.reset();

        assert_eq!(form.values(), &FormValues::default());
        assert_eq!(form.state().current_area, None);
        assert!(form.state().touched.is_empty());
    }
}
