//! Partial salary profile updates.
//!
//! An operator submits any subset of pay fields. Present scalars overwrite
//! the stored value, present line-item arrays replace the stored list
//! wholesale, and a single individual-leave entry may be set.

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{PayrollError, PayrollResult};
use crate::models::lenient::{self, parse_decimal};
use crate::models::{
    DatedLineItem, LineItem, MAX_AMOUNT, MAX_LEAVE_DAYS, PayMonth, SalaryProfile,
};

/// A partial update to a [`SalaryProfile`].
///
/// Absent fields leave the profile untouched. Only the net salary override
/// treats an explicit `null` as a clear; for every other field `null` and
/// malformed values are treated as absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SalaryUpdate {
    /// New monthly base salary.
    #[serde(deserialize_with = "lenient::optional_decimal")]
    pub salary_in_hand_per_month: Option<Decimal>,
    /// New basic pay.
    #[serde(deserialize_with = "lenient::optional_decimal")]
    pub basic_pay: Option<Decimal>,
    /// New recorded CTC.
    #[serde(deserialize_with = "lenient::optional_decimal")]
    pub current_ctc: Option<Decimal>,
    /// New fixed allowances.
    #[serde(deserialize_with = "lenient::optional_decimal")]
    pub fixed_allowances: Option<Decimal>,
    /// New incentive.
    #[serde(deserialize_with = "lenient::optional_decimal")]
    pub incentive: Option<Decimal>,
    /// Employer PF amount.
    #[serde(deserialize_with = "lenient::optional_decimal")]
    pub employer_pf: Option<Decimal>,
    /// Employer health insurance amount.
    #[serde(deserialize_with = "lenient::optional_decimal")]
    pub employer_health_insurance: Option<Decimal>,
    /// Employee PF amount.
    #[serde(deserialize_with = "lenient::optional_decimal")]
    pub employee_pf: Option<Decimal>,
    /// Employee health insurance amount.
    #[serde(deserialize_with = "lenient::optional_decimal")]
    pub employee_health_insurance: Option<Decimal>,
    /// Net salary override; `Some(None)` clears it.
    #[serde(deserialize_with = "lenient::patch_decimal")]
    pub manual_net_salary_override: Option<Option<Decimal>>,
    /// Informational configured flag.
    #[serde(deserialize_with = "optional_bool")]
    pub salary_details_configured: Option<bool>,
    /// Replacement deduction list.
    #[serde(deserialize_with = "replacement_items")]
    pub other_deductions: Option<Vec<DatedLineItem>>,
    /// Replacement reimbursement list.
    #[serde(deserialize_with = "replacement_items")]
    pub reimbursements: Option<Vec<DatedLineItem>>,
    /// Replacement allowance list.
    #[serde(deserialize_with = "replacement_items")]
    pub allowances: Option<Vec<LineItem>>,
    /// Raw `{ "<month>-<year>": leaves }` mutation of the individual ledger.
    pub individual_paid_leave: Option<Value>,
}

fn optional_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?.as_bool())
}

/// Reads a replacement array. Every entry is kept; entries that cannot be
/// read as an item (non-objects, wrongly typed titles) become an empty
/// zero-amount item. Item amounts are coerced by the item types themselves.
fn replacement_items<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::de::DeserializeOwned + Default,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(Some(
            items
                .into_iter()
                .map(|item| serde_json::from_value(item).unwrap_or_default())
                .collect(),
        )),
        _ => Ok(None),
    }
}

impl SalaryUpdate {
    /// Rejects amounts no payroll could carry.
    ///
    /// Every submitted monetary value must lie within `±MAX_AMOUNT` and an
    /// individual-leave count within `MAX_LEAVE_DAYS`. The error names the
    /// offending field; nothing is applied when it fails.
    pub fn validate(&self) -> PayrollResult<()> {
        let scalars = [
            ("salaryInHandPerMonth", self.salary_in_hand_per_month),
            ("basicPay", self.basic_pay),
            ("currentCtc", self.current_ctc),
            ("fixedAllowances", self.fixed_allowances),
            ("incentive", self.incentive),
            ("employerPf", self.employer_pf),
            ("employerHealthInsurance", self.employer_health_insurance),
            ("employeePf", self.employee_pf),
            ("employeeHealthInsurance", self.employee_health_insurance),
            ("manualNetSalaryOverride", self.manual_net_salary_override.flatten()),
        ];
        for (field, value) in scalars {
            if let Some(value) = value {
                check_amount(field, value)?;
            }
        }

        let items = self
            .other_deductions
            .iter()
            .flatten()
            .map(|item| ("otherDeductions", item.amount))
            .chain(
                self.reimbursements
                    .iter()
                    .flatten()
                    .map(|item| ("reimbursements", item.amount)),
            )
            .chain(
                self.allowances
                    .iter()
                    .flatten()
                    .map(|item| ("allowances", item.amount)),
            );
        for (field, amount) in items {
            check_amount(field, amount)?;
        }

        let oversized_leave = self
            .individual_paid_leave
            .as_ref()
            .and_then(parse_leave_mutation)
            .filter(|(_, leaves)| *leaves > MAX_LEAVE_DAYS);
        if let Some((_, leaves)) = oversized_leave {
            return Err(PayrollError::validation(
                "individualPaidLeave",
                format!("{} exceeds {} days", leaves, MAX_LEAVE_DAYS),
            ));
        }
        Ok(())
    }
}

fn check_amount(field: &str, value: Decimal) -> PayrollResult<()> {
    if value.abs() > MAX_AMOUNT {
        return Err(PayrollError::validation(
            field,
            format!("{} exceeds the limit of {}", value, MAX_AMOUNT),
        ));
    }
    Ok(())
}

/// Interprets an individual-leave mutation.
///
/// Returns the month and leave count only for an object with exactly one
/// entry whose key is a valid month-year and whose value is a non-negative
/// number.
pub fn parse_leave_mutation(value: &Value) -> Option<(PayMonth, Decimal)> {
    let entries = value.as_object()?;
    if entries.len() != 1 {
        return None;
    }
    let (key, leaves) = entries.iter().next()?;
    let month = key.parse::<PayMonth>().ok()?;
    let leaves = parse_decimal(leaves).filter(|v| *v >= Decimal::ZERO)?;
    Some((month, leaves))
}

/// Applies `update` to `profile` and returns the names of the fields that
/// were written.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{SalaryUpdate, apply_salary_update};
/// use payroll_engine::models::SalaryProfile;
/// use rust_decimal::Decimal;
///
/// let mut profile = SalaryProfile {
///     manual_net_salary_override: Some(Decimal::from(5000)),
///     ..SalaryProfile::default()
/// };
/// let update: SalaryUpdate = serde_json::from_str(
///     r#"{"incentive": "750", "manualNetSalaryOverride": null}"#,
/// ).unwrap();
///
/// let applied = apply_salary_update(&mut profile, update);
/// assert_eq!(profile.incentive, Decimal::from(750));
/// assert_eq!(profile.manual_net_salary_override, None);
/// assert_eq!(applied, vec!["incentive", "manualNetSalaryOverride"]);
/// ```
pub fn apply_salary_update(profile: &mut SalaryProfile, update: SalaryUpdate) -> Vec<&'static str> {
    let mut applied = Vec::new();

    macro_rules! set {
        ($field:ident, $name:literal) => {
            if let Some(value) = update.$field {
                profile.$field = value;
                applied.push($name);
            }
        };
        ($field:ident, $name:literal, optional) => {
            if let Some(value) = update.$field {
                profile.$field = Some(value);
                applied.push($name);
            }
        };
    }

    set!(salary_in_hand_per_month, "salaryInHandPerMonth");
    set!(basic_pay, "basicPay");
    set!(current_ctc, "currentCtc");
    set!(fixed_allowances, "fixedAllowances");
    set!(incentive, "incentive");
    set!(employer_pf, "employerPf", optional);
    set!(employer_health_insurance, "employerHealthInsurance", optional);
    set!(employee_pf, "employeePf", optional);
    set!(employee_health_insurance, "employeeHealthInsurance", optional);
    set!(manual_net_salary_override, "manualNetSalaryOverride");
    set!(salary_details_configured, "salaryDetailsConfigured");
    set!(other_deductions, "otherDeductions");
    set!(reimbursements, "reimbursements");
    set!(allowances, "allowances");

    if let Some((month, leaves)) = update
        .individual_paid_leave
        .as_ref()
        .and_then(parse_leave_mutation)
    {
        profile.individual_paid_leaves.set(month, leaves);
        applied.push("individualPaidLeave");
    }

    applied
}
