//! Static option tables for the dependent select fields.
//!
//! Each function is a total lookup keyed on the upstream field; an unset or
//! dead-end upstream value yields no options.

use crate::models::{AMPERE_STEPS, ContractCapacity, KVA_MAX, KVA_MIN, Plan, PowerCompany, ServiceArea};

/// One entry of a select control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption<T> {
    pub value: T,
    pub label: String,
}

impl<T> SelectOption<T> {
    fn new(
        value: T,
        label: impl Into<String>,
    ) -> Self {
        Self {
            value,
            label: label.into(),
        }
    }
}

const TOKYO_COMPANIES: &[(PowerCompany, &str)] = &[
    (PowerCompany::TokyoElectric, "東京電力"),
    (PowerCompany::Other, "その他"),
];

const KANSAI_COMPANIES: &[(PowerCompany, &str)] = &[
    (PowerCompany::KansaiElectric, "関西電力"),
    (PowerCompany::Other, "その他"),
];

const TOKYO_PLANS: &[(Plan, &str)] = &[
    (Plan::TokyoJuryouB, "従量電灯B"),
    (Plan::TokyoJuryouC, "従量電灯C"),
];

const KANSAI_PLANS: &[(Plan, &str)] = &[
    (Plan::KansaiJuryouA, "従量電灯A"),
    (Plan::KansaiJuryouB, "従量電灯B"),
];

fn options<T: Copy>(table: &[(T, &str)]) -> Vec<SelectOption<T>> {
    table
        .iter()
        .map(|&(value, label)| SelectOption::new(value, label))
        .collect()
}

pub fn companies_for(area: Option<ServiceArea>) -> Vec<SelectOption<PowerCompany>> {
    match area {
        Some(ServiceArea::Tokyo) => options(TOKYO_COMPANIES),
        Some(ServiceArea::Kansai) => options(KANSAI_COMPANIES),
        Some(ServiceArea::OutOfService) | None => Vec::new(),
    }
}

pub fn plans_for(company: Option<PowerCompany>) -> Vec<SelectOption<Plan>> {
    match company {
        Some(PowerCompany::TokyoElectric) => options(TOKYO_PLANS),
        Some(PowerCompany::KansaiElectric) => options(KANSAI_PLANS),
        Some(PowerCompany::Other) | None => Vec::new(),
    }
}

/// Capacity steps for a plan, in ascending order.
pub fn capacities_for(plan: Option<Plan>) -> Vec<ContractCapacity> {
    match plan {
        Some(Plan::TokyoJuryouB) => AMPERE_STEPS
            .iter()
            .map(|&amps| ContractCapacity::Ampere(amps))
            .collect(),
        Some(Plan::TokyoJuryouC | Plan::KansaiJuryouB) => (KVA_MIN..=KVA_MAX)
            .map(ContractCapacity::Kva)
            .collect(),
        Some(Plan::KansaiJuryouA) | None => Vec::new(),
    }
}

pub fn capacity_options_for(plan: Option<Plan>) -> Vec<SelectOption<ContractCapacity>> {
    capacities_for(plan)
        .into_iter()
        .map(|capacity| SelectOption::new(capacity, capacity.to_string()))
        .collect()
}

/// `false` for the capacity-exempt plan and for an unset plan.
pub fn capacity_required(plan: Option<Plan>) -> bool {
    plan.is_some_and(|plan| !plan.is_capacity_exempt())
}

/// `true` when `capacity` is one of the steps offered on `plan`.
pub fn capacity_offered(
    plan: Option<Plan>,
    capacity: ContractCapacity,
) -> bool {
    capacities_for(plan).contains(&capacity)
}
