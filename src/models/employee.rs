//! Employee model and pay configuration.
//!
//! An [`Employee`] belongs to exactly one company and carries one
//! [`SalaryProfile`]. Every numeric pay field reads leniently: absent,
//! `null` or malformed values become zero (or `None` for nullable fields)
//! so old documents never break a payroll run.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::LeaveLedger;
use super::lenient;

/// Largest magnitude a single monetary field may carry (10^12).
///
/// Submitted values above it are rejected; stored values above it are
/// capped before calculation.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

fn cap(amount: Decimal) -> Decimal {
    amount.clamp(-MAX_AMOUNT, MAX_AMOUNT)
}

/// Identifier of the company (tenant) that owns a record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompanyId(String);

impl CompanyId {
    /// Creates a company id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CompanyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Role of an account within a company.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Field employee who records visits and is paid through payroll.
    #[default]
    User,
    /// Company administrator.
    Admin,
    /// Platform operator.
    SuperAdmin,
}

impl Role {
    /// Returns true for operational (non-administrative) employees.
    pub fn is_operational(&self) -> bool {
        matches!(self, Role::User)
    }
}

/// A dated pay adjustment such as a deduction or reimbursement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatedLineItem {
    /// Free-form label.
    #[serde(default)]
    pub title: String,
    /// Non-negative amount.
    #[serde(default, deserialize_with = "lenient::amount")]
    pub amount: Decimal,
    /// Date the item relates to, if known.
    #[serde(default, deserialize_with = "lenient::date")]
    pub date: Option<NaiveDate>,
}

/// An undated recurring allowance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Free-form label.
    #[serde(default)]
    pub title: String,
    /// Non-negative amount.
    #[serde(default, deserialize_with = "lenient::amount")]
    pub amount: Decimal,
}

/// Pay configuration for one employee.
///
/// Statutory contribution amounts are nullable: `None` means "derive from
/// the configured percentage of the monthly base salary".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SalaryProfile {
    /// Monthly base salary ("salary in hand").
    #[serde(deserialize_with = "lenient::decimal")]
    pub salary_in_hand_per_month: Decimal,
    /// Basic pay component.
    #[serde(deserialize_with = "lenient::decimal")]
    pub basic_pay: Decimal,
    /// Cost to company as last recorded by an operator.
    #[serde(deserialize_with = "lenient::decimal")]
    pub current_ctc: Decimal,
    /// Fixed monthly allowances.
    #[serde(deserialize_with = "lenient::decimal")]
    pub fixed_allowances: Decimal,
    /// Monthly incentive.
    #[serde(deserialize_with = "lenient::decimal")]
    pub incentive: Decimal,
    /// Explicit employer provident-fund amount.
    #[serde(deserialize_with = "lenient::optional_decimal")]
    pub employer_pf: Option<Decimal>,
    /// Explicit employer health-insurance amount.
    #[serde(deserialize_with = "lenient::optional_decimal")]
    pub employer_health_insurance: Option<Decimal>,
    /// Explicit employee provident-fund amount.
    #[serde(deserialize_with = "lenient::optional_decimal")]
    pub employee_pf: Option<Decimal>,
    /// Explicit employee health-insurance amount.
    #[serde(deserialize_with = "lenient::optional_decimal")]
    pub employee_health_insurance: Option<Decimal>,
    /// Ad-hoc deductions.
    pub other_deductions: Vec<DatedLineItem>,
    /// Expense reimbursements.
    pub reimbursements: Vec<DatedLineItem>,
    /// Additional allowances.
    pub allowances: Vec<LineItem>,
    /// Company-wide leaves applied in bulk, keyed by month.
    pub monthly_leaves: LeaveLedger,
    /// Paid leaves granted to this employee, keyed by month.
    pub individual_paid_leaves: LeaveLedger,
    /// When present and non-negative, replaces the computed net salary.
    #[serde(deserialize_with = "lenient::optional_decimal")]
    pub manual_net_salary_override: Option<Decimal>,
    /// Informational flag set once an operator has filled in pay details.
    pub salary_details_configured: bool,
}

impl SalaryProfile {
    /// Sum of all allowance line items.
    pub fn total_allowances(&self) -> Decimal {
        self.allowances.iter().map(|item| item.amount).sum()
    }

    /// Sum of all other-deduction line items.
    pub fn total_other_deductions(&self) -> Decimal {
        self.other_deductions.iter().map(|item| item.amount).sum()
    }

    /// Sum of all reimbursement line items.
    pub fn total_reimbursements(&self) -> Decimal {
        self.reimbursements.iter().map(|item| item.amount).sum()
    }

    /// Returns the override if it is set and non-negative.
    pub fn effective_override(&self) -> Option<Decimal> {
        self.manual_net_salary_override
            .filter(|value| *value >= Decimal::ZERO)
    }

    /// Returns a copy with every monetary field capped to `±MAX_AMOUNT`.
    ///
    /// Ledgers are already bounded by [`LeaveLedger::set`].
    pub fn within_limits(&self) -> SalaryProfile {
        SalaryProfile {
            salary_in_hand_per_month: cap(self.salary_in_hand_per_month),
            basic_pay: cap(self.basic_pay),
            current_ctc: cap(self.current_ctc),
            fixed_allowances: cap(self.fixed_allowances),
            incentive: cap(self.incentive),
            employer_pf: self.employer_pf.map(cap),
            employer_health_insurance: self.employer_health_insurance.map(cap),
            employee_pf: self.employee_pf.map(cap),
            employee_health_insurance: self.employee_health_insurance.map(cap),
            other_deductions: self
                .other_deductions
                .iter()
                .map(|item| DatedLineItem {
                    amount: cap(item.amount),
                    ..item.clone()
                })
                .collect(),
            reimbursements: self
                .reimbursements
                .iter()
                .map(|item| DatedLineItem {
                    amount: cap(item.amount),
                    ..item.clone()
                })
                .collect(),
            allowances: self
                .allowances
                .iter()
                .map(|item| LineItem {
                    amount: cap(item.amount),
                    ..item.clone()
                })
                .collect(),
            manual_net_salary_override: self.manual_net_salary_override.map(cap),
            ..self.clone()
        }
    }
}

/// An employee profile as stored for a company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Document id.
    pub id: String,
    /// Owning company.
    pub company_id: CompanyId,
    /// Company-assigned employee code.
    #[serde(default)]
    pub employee_code: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Login identity; visits reference the employee by this value.
    pub email: String,
    /// Account role.
    #[serde(default)]
    pub role: Role,
    /// Occupation label (display only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,
    /// District label (display only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    /// Work location label (display only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Pay configuration.
    #[serde(flatten)]
    pub salary: SalaryProfile,
}

impl Employee {
    /// Returns true if `email` is this employee's login identity.
    ///
    /// Login identities compare case-insensitively.
    pub fn has_login(&self, email: &str) -> bool {
        self.email.eq_ignore_ascii_case(email)
    }
}
