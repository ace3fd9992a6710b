use std::sync::Arc;

use super::{ElectricForm, area_check::AreaCheckTicket};
use crate::area::AreaChecker;

/// An [`ElectricForm`] paired with the checker that resolves its postal codes.
///
/// Postal code edits await the area check before returning, which is what an
/// interactive front end wants. Callers that need overlapping checks can use
/// [`AreaCheckTicket::run`] and [`ElectricForm::apply_area_check`] directly.
pub struct FormSession {
    form: ElectricForm,
    checker: Arc<dyn AreaChecker>,
}

impl FormSession {
    pub fn new(
        form: ElectricForm,
        checker: Arc<dyn AreaChecker>,
    ) -> Self {
        Self { form, checker }
    }

    pub fn form(&self) -> &ElectricForm {
        &self.form
    }

    /// Direct access for the synchronous transitions (selects, bill, email,
    /// submit).
    pub fn form_mut(&mut self) -> &mut ElectricForm {
        &mut self.form
    }

    pub fn checker(&self) -> Arc<dyn AreaChecker> {
        Arc::clone(&self.checker)
    }

    /// Returns `true` when an area check ran and was applied.
    pub async fn set_postal_code(
        &mut self,
        first: &str,
        second: &str,
    ) -> bool {
        let ticket = self.form.set_postal_code(first, second);
        self.resolve(ticket).await
    }

    pub async fn set_postal_code_first(
        &mut self,
        first: &str,
    ) -> bool {
        let ticket = self.form.set_postal_code_first(first);
        self.resolve(ticket).await
    }

    pub async fn set_postal_code_second(
        &mut self,
        second: &str,
    ) -> bool {
        let ticket = self.form.set_postal_code_second(second);
        self.resolve(ticket).await
    }

    async fn resolve(
        &mut self,
        ticket: Option<AreaCheckTicket>,
    ) -> bool {
        let Some(ticket) = ticket else {
            return false;
        };
        let outcome = ticket.run(self.checker.as_ref()).await;
        self.form.apply_area_check(outcome)
    }
}
