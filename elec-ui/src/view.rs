//! Text rendering of the whole form with progressive disclosure.
//!
//! Sections appear as the user gets far enough for them to matter:
//! * the usage section only once the postal code resolves to a supported area,
//! * the plan once a company is chosen and that company is in scope,
//! * the capacity only when the chosen plan requires one,
//! * bill, email and the submit button once a plan is chosen.

use std::fmt;

use elec_core::{ElectricForm, Field, Messages};

use crate::{
    utils::opt_amount_display,
    widgets::{Button, FormField, Input, Select},
};

pub struct FormView<'a> {
    form: &'a ElectricForm,
}

impl<'a> FormView<'a> {
    pub fn new(form: &'a ElectricForm) -> Self {
        Self { form }
    }

    pub fn shows_usage_section(&self) -> bool {
        self.form
            .state()
            .current_area
            .is_some_and(|area| area.is_supported())
    }

    pub fn shows_plan(&self) -> bool {
        let state = self.form.state();
        self.shows_usage_section()
            && state.values.power_company.is_some()
            && state.company_error.is_none()
    }

    pub fn shows_capacity(&self) -> bool {
        self.shows_plan() && self.form.is_capacity_required()
    }

    pub fn shows_bill_and_email(&self) -> bool {
        self.shows_usage_section() && self.form.values().plan.is_some()
    }

    pub fn submit_button(&self) -> Button {
        let m = self.form.messages();
        Button::new(m.submit_label)
            .disabled(!self.form.can_submit())
            .loading(self.form.state().is_submitting, m.submitting_label)
    }

    fn postal_code_field(
        &self,
        m: &Messages,
    ) -> FormField {
        let state = self.form.state();
        let first_error = self.form.field_error(Field::PostalCodeFirst);
        let second_error = self.form.field_error(Field::PostalCodeSecond);

        let first = Input::new(state.values.postal_code.first.as_str())
            .placeholder("123")
            .max_length(3)
            .error(first_error.is_some());
        let second = Input::new(state.values.postal_code.second.as_str())
            .placeholder("4567")
            .max_length(4)
            .error(second_error.is_some());

        let error = first_error
            .or(second_error)
            .or(state.area_error.as_deref());

        FormField::new(m.postal_code_label, format!("{first} - {second}"))
            .required(true)
            .error(error)
    }

    fn power_company_field(
        &self,
        m: &Messages,
    ) -> FormField {
        let state = self.form.state();
        let error = state
            .company_error
            .or_else(|| self.form.field_error(Field::PowerCompany));

        let select = Select::new(self.form.available_companies())
            .selected(state.values.power_company)
            .placeholder(m.power_company_placeholder)
            .error(error.is_some());

        FormField::new(m.power_company_label, select)
            .required(true)
            .error(error)
    }

    fn plan_field(
        &self,
        m: &Messages,
    ) -> FormField {
        let error = self.form.field_error(Field::Plan);
        let select = Select::new(self.form.available_plans())
            .selected(self.form.values().plan)
            .placeholder(m.plan_placeholder)
            .error(error.is_some());

        FormField::new(m.plan_label, select)
            .required(true)
            .error(error)
    }

    fn capacity_field(
        &self,
        m: &Messages,
    ) -> FormField {
        let error = self.form.field_error(Field::ContractCapacity);
        let select = Select::new(self.form.available_capacities())
            .selected(self.form.values().contract_capacity)
            .placeholder(m.contract_capacity_placeholder)
            .error(error.is_some());

        FormField::new(m.contract_capacity_label, select)
            .required(true)
            .error(error)
    }

    fn bill_field(
        &self,
        m: &Messages,
    ) -> FormField {
        let error = self.form.field_error(Field::CurrentElectricBill);
        let input = Input::new(opt_amount_display(self.form.values().current_electric_bill))
            .placeholder("10,000")
            .error(error.is_some());

        FormField::new(m.bill_label, format!("{input}{}", m.currency_suffix))
            .required(true)
            .error(error)
    }

    fn email_field(
        &self,
        m: &Messages,
    ) -> FormField {
        let error = self.form.field_error(Field::Email);
        let input = Input::new(self.form.values().email.as_str())
            .placeholder("example@example.com")
            .error(error.is_some());

        FormField::new(m.email_label, input)
            .required(true)
            .error(error)
    }
}

impl fmt::Display for FormView<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let m = self.form.messages();

        writeln!(f, "{}", m.title)?;
        write!(f, "\n## {}\n{}\n", m.postal_code_section, self.postal_code_field(m))?;

        if self.shows_usage_section() {
            write!(f, "\n## {}\n{}\n", m.usage_section, self.power_company_field(m))?;
            if self.shows_plan() {
                writeln!(f, "{}", self.plan_field(m))?;
            }
            if self.shows_capacity() {
                writeln!(f, "{}", self.capacity_field(m))?;
            }
        }

        if self.shows_bill_and_email() {
            write!(f, "\n## {}\n{}\n", m.bill_section, self.bill_field(m))?;
            write!(f, "\n## {}\n{}\n", m.user_section, self.email_field(m))?;
            write!(f, "\n{}", self.submit_button())?;
        }
        Ok(())
    }
}
