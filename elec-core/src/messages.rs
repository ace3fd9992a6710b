//! User-facing text for every locale the form ships with.
//!
//! All strings are `'static` so errors and labels can be stored in form
//! state without allocation.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::models::ParseValueError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ja,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ja => "ja",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "en" => Some(Self::En),
            "ja" => Some(Self::Ja),
            _ => None,
        }
    }

    pub fn messages(&self) -> &'static Messages {
        match self {
            Self::En => &EN,
            Self::Ja => &JA,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ParseValueError::new("locale", s))
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct Messages {
    // Field validation
    pub postal_code_first_invalid: &'static str,
    pub postal_code_second_invalid: &'static str,
    pub power_company_required: &'static str,
    pub plan_required: &'static str,
    pub contract_capacity_required: &'static str,
    pub electric_bill_invalid: &'static str,
    pub email_invalid: &'static str,

    // Area and company checks
    pub out_of_service_area: &'static str,
    pub area_check_failed: &'static str,
    pub postal_code_missing: &'static str,
    pub out_of_simulation_scope: &'static str,

    // Form layout
    pub title: &'static str,
    pub postal_code_section: &'static str,
    pub postal_code_label: &'static str,
    pub usage_section: &'static str,
    pub power_company_label: &'static str,
    pub power_company_placeholder: &'static str,
    pub plan_label: &'static str,
    pub plan_placeholder: &'static str,
    pub contract_capacity_label: &'static str,
    pub contract_capacity_placeholder: &'static str,
    pub bill_section: &'static str,
    pub bill_label: &'static str,
    pub user_section: &'static str,
    pub email_label: &'static str,
    pub submit_label: &'static str,
    pub submitting_label: &'static str,

    // Submission summary
    pub summary_title: &'static str,
    pub summary_postal_code: &'static str,
    pub summary_power_company: &'static str,
    pub summary_plan: &'static str,
    pub summary_contract_capacity: &'static str,
    pub summary_bill: &'static str,
    pub no_capacity: &'static str,
    pub currency_suffix: &'static str,
}

static EN: Messages = Messages {
    postal_code_first_invalid: "Enter 3 digits.",
    postal_code_second_invalid: "Enter 4 digits.",
    power_company_required: "Select a power company.",
    plan_required: "Select a plan.",
    contract_capacity_required: "Select a contract capacity.",
    electric_bill_invalid: "Enter a valid electric bill amount.",
    email_invalid: "Enter a valid email address.",

    out_of_service_area: "Service area not supported.",
    area_check_failed: "Area check failed.",
    postal_code_missing: "Postal code is required.",
    out_of_simulation_scope: "Out of simulation scope.",

    title: "Quick savings simulation from your electric bill",
    postal_code_section: "Enter your postal code",
    postal_code_label: "Postal code where electricity is used",
    usage_section: "Tell us about your electricity usage",
    power_company_label: "Power company",
    power_company_placeholder: "Select a power company",
    plan_label: "Plan",
    plan_placeholder: "Select a plan",
    contract_capacity_label: "Contract capacity",
    contract_capacity_placeholder: "Select a contract capacity",
    bill_section: "Tell us about your current usage",
    bill_label: "Last month's electric bill",
    user_section: "Enter your details",
    email_label: "Email address",
    submit_label: "See results",
    submitting_label: "Simulating...",

    summary_title: "Simulation complete!",
    summary_postal_code: "Postal code",
    summary_power_company: "Power company",
    summary_plan: "Plan",
    summary_contract_capacity: "Contract capacity",
    summary_bill: "Current electric bill",
    no_capacity: "none",
    currency_suffix: " yen",
};

static JA: Messages = Messages {
    postal_code_first_invalid: "3桁の数字で入力してください",
    postal_code_second_invalid: "4桁の数字で入力してください",
    power_company_required: "電力会社を選択してください",
    plan_required: "プランを選択してください",
    contract_capacity_required: "契約容量を選択してください",
    electric_bill_invalid: "電気代を正しく入力してください。",
    email_invalid: "メールアドレスを正しく入力してください。",

    out_of_service_area: "サービスエリア対象外です。",
    area_check_failed: "エリアチェックに失敗しました",
    postal_code_missing: "郵便番号が必要です",
    out_of_simulation_scope: "シミュレーション対象外です。",

    title: "電気代からかんたんシミュレーション",
    postal_code_section: "郵便番号をご入力ください",
    postal_code_label: "電気を使用する場所の郵便番号",
    usage_section: "電気のご使用状況について教えてください",
    power_company_label: "電力会社",
    power_company_placeholder: "電力会社を選択してください",
    plan_label: "プラン",
    plan_placeholder: "プランを選択してください",
    contract_capacity_label: "契約容量",
    contract_capacity_placeholder: "契約容量を選択してください",
    bill_section: "現在の電気の使用状況について教えてください",
    bill_label: "先月の電気代は？",
    user_section: "ユーザー情報をご入力ください",
    email_label: "メールアドレス",
    submit_label: "結果を見る",
    submitting_label: "シミュレーション中...",

    summary_title: "シミュレーション完了！",
    summary_postal_code: "郵便番号",
    summary_power_company: "電力会社",
    summary_plan: "プラン",
    summary_contract_capacity: "契約容量",
    summary_bill: "現在の電気代",
    no_capacity: "なし",
    currency_suffix: "円",
};
