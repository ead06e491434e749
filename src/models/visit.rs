//! Visit model.
//!
//! A visit is opened at check-in and completed exactly once at check-out.
//! Only completed visits feed attendance.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::CompanyId;
use super::lenient;

/// Lifecycle state of a visit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisitStatus {
    /// Checked in, not yet checked out.
    #[default]
    Active,
    /// Checked out.
    Completed,
}

/// A geotagged position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees.
    #[serde(default)]
    pub latitude: f64,
    /// Longitude in degrees.
    #[serde(default)]
    pub longitude: f64,
    /// Reverse-geocoded address, if captured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Check-in sub-record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckIn {
    /// When the employee checked in.
    #[serde(deserialize_with = "lenient::timestamp")]
    pub time: Option<DateTime<Utc>>,
    /// Where the employee checked in.
    pub location: Option<GeoPoint>,
    /// Occupation context.
    pub occupation: Option<String>,
    /// State context.
    pub state: Option<String>,
    /// District context.
    pub district: Option<String>,
    /// Office context.
    pub office: Option<String>,
    /// Odometer reading of the employee's bike.
    #[serde(deserialize_with = "lenient::optional_decimal")]
    pub bike_meter_reading: Option<Decimal>,
    /// References to uploaded photos.
    pub photos: Vec<String>,
}

/// Check-out sub-record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckOut {
    /// When the employee checked out.
    #[serde(deserialize_with = "lenient::timestamp")]
    pub time: Option<DateTime<Utc>>,
    /// Where the employee checked out.
    pub location: Option<GeoPoint>,
    /// Odometer reading of the employee's bike.
    #[serde(deserialize_with = "lenient::optional_decimal")]
    pub bike_meter_reading: Option<Decimal>,
    /// References to uploaded photos.
    pub photos: Vec<String>,
}

/// A single attendance visit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visit {
    /// Document id.
    pub id: String,
    /// Owning company.
    pub company_id: CompanyId,
    /// Login identity of the employee.
    pub employee_email: String,
    /// Lifecycle state.
    #[serde(default)]
    pub status: VisitStatus,
    /// Check-in details.
    #[serde(default)]
    pub check_in: CheckIn,
    /// Check-out details, present once completed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_out: Option<CheckOut>,
}

impl Visit {
    /// Opens a new active visit.
    pub fn open(
        id: impl Into<String>,
        company_id: CompanyId,
        employee_email: impl Into<String>,
        check_in: CheckIn,
    ) -> Self {
        Self {
            id: id.into(),
            company_id,
            employee_email: employee_email.into(),
            status: VisitStatus::Active,
            check_in,
            check_out: None,
        }
    }

    /// Completes an active visit with its check-out record.
    ///
    /// Returns false, leaving the visit untouched, if it was already
    /// completed.
    pub fn complete(&mut self, check_out: CheckOut) -> bool {
        if self.status == VisitStatus::Completed {
            return false;
        }
        self.check_out = Some(check_out);
        self.status = VisitStatus::Completed;
        true
    }

    /// Check-in timestamp, if recorded.
    pub fn checked_in_at(&self) -> Option<DateTime<Utc>> {
        self.check_in.time
    }

    /// Visit duration in minutes, with sub-minute precision.
    ///
    /// Zero when either timestamp is missing or the checkout precedes the
    /// check-in.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::{CheckIn, CheckOut, CompanyId, Visit};
    /// use chrono::{Duration, TimeZone, Utc};
    /// use rust_decimal::Decimal;
    ///
    /// let start = Utc.with_ymd_and_hms(2024, 6, 3, 9, 0, 0).unwrap();
    /// let mut visit = Visit::open(
    ///     "v1",
    ///     CompanyId::new("acme"),
    ///     "asha@acme.test",
    ///     CheckIn { time: Some(start), ..CheckIn::default() },
    /// );
    /// visit.complete(CheckOut {
    ///     time: Some(start + Duration::seconds(150)),
    ///     ..CheckOut::default()
    /// });
    /// assert_eq!(visit.duration_minutes(), Decimal::new(25, 1));
    /// ```
    pub fn duration_minutes(&self) -> Decimal {
        let checked_out_at = self.check_out.as_ref().and_then(|out| out.time);
        match (self.check_in.time, checked_out_at) {
            (Some(start), Some(end)) if end > start => {
                Decimal::from((end - start).num_milliseconds()) / Decimal::from(60_000)
            }
            _ => Decimal::ZERO,
        }
    }
}
