//! Integration tests for the payroll engine HTTP API.
//!
//! This test suite drives the router end to end:
//! - Visit check-in/check-out feeding attendance
//! - Monthly salary report and the report filter
//! - Salary profile updates (scalars, override, replacement arrays, leave)
//! - Bulk leave broadcasts
//! - Company scoping
//! - Error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use std::sync::Arc;
use tower::ServiceExt;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::ConfigLoader;
use payroll_engine::models::{CompanyId, Employee, Role, SalaryProfile};
use payroll_engine::store::{EmployeeStore, InMemoryStore};

// =============================================================================
// Test Helpers
// =============================================================================

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Reads a decimal field serialized as a string.
fn field(value: &Value, key: &str) -> Decimal {
    decimal(value[key].as_str().unwrap_or_else(|| panic!("{} missing in {}", key, value)))
}

fn employee(id: &str, company: &str, email: &str, role: Role, base: &str) -> Employee {
    Employee {
        id: id.to_string(),
        company_id: CompanyId::new(company),
        employee_code: id.to_uppercase(),
        name: id.to_string(),
        email: email.to_string(),
        role,
        occupation: Some("Field Officer".to_string()),
        district: None,
        location: None,
        salary: SalaryProfile {
            salary_in_hand_per_month: decimal(base),
            ..SalaryProfile::default()
        },
    }
}

/// Builds a router over a store seeded with two companies.
async fn create_router_for_test() -> Router {
    let store = Arc::new(InMemoryStore::new());
    for e in [
        employee("emp_001", "acme", "asha@acme.test", Role::User, "30000"),
        employee("emp_002", "acme", "ravi@acme.test", Role::User, "26000"),
        employee("adm_001", "acme", "boss@acme.test", Role::Admin, "90000"),
        employee("emp_101", "globex", "lee@globex.test", Role::User, "40000"),
    ] {
        store.save_employee(e).await.unwrap();
    }
    create_router(AppState::in_memory(ConfigLoader::default(), store))
}

async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    company: Option<&str>,
    email: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(company) = company {
        builder = builder.header("X-Company-Id", company);
    }
    if let Some(email) = email {
        builder = builder.header("X-User-Email", email);
    }
    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

    (status, json)
}

async fn report(router: &Router, company: &str, month: u32, year: i32) -> (StatusCode, Value) {
    send(
        router,
        "GET",
        &format!("/api/admin/employees-salary-info?month={}&year={}", month, year),
        Some(company),
        None,
        None,
    )
    .await
}

async fn visit(router: &Router, company: &str, email: &str, check_in: &str, check_out: &str) {
    let (status, _) = send(
        router,
        "POST",
        "/api/visits/check-in",
        Some(company),
        Some(email),
        Some(json!({
            "time": check_in,
            "location": {"latitude": 12.97, "longitude": 77.59},
            "district": "Bengaluru Urban"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        router,
        "PUT",
        "/api/visits/check-out",
        Some(company),
        Some(email),
        Some(json!({"time": check_out})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "completed");
}

fn find<'a>(report: &'a Value, id: &str) -> Option<&'a Value> {
    report
        .as_array()
        .unwrap()
        .iter()
        .find(|entry| entry["id"] == id)
}

// =============================================================================
// SECTION 1: Attendance through visits
// =============================================================================

#[tokio::test]
async fn test_att_001_six_and_two_and_a_half_minute_visits() {
    let router = create_router_for_test().await;
    visit(&router, "acme", "asha@acme.test", "2024-06-03T09:00:00Z", "2024-06-03T09:06:00Z").await;
    visit(&router, "acme", "asha@acme.test", "2024-06-04T09:00:00Z", "2024-06-04T09:02:30Z").await;

    let (status, body) = report(&router, "acme", 6, 2024).await;
    assert_eq!(status, StatusCode::OK);

    let asha = find(&body, "emp_001").expect("asha is on the report");
    let attendance = &asha["calculated"]["attendance"];
    assert_eq!(attendance["fullDays"], 1);
    assert_eq!(attendance["halfDays"], 1);
    assert_eq!(field(attendance, "actualWorkingDays"), decimal("1.5"));
    assert_eq!(field(attendance, "paidDays"), decimal("1.5"));
}

#[tokio::test]
async fn test_att_002_one_minute_visit_earns_nothing() {
    let router = create_router_for_test().await;
    visit(&router, "acme", "asha@acme.test", "2024-06-03T09:00:00Z", "2024-06-03T09:01:00Z").await;

    let (_, body) = report(&router, "acme", 6, 2024).await;
    assert!(find(&body, "emp_001").is_none());
}

#[tokio::test]
async fn test_att_003_visits_in_other_months_are_ignored() {
    let router = create_router_for_test().await;
    visit(&router, "acme", "asha@acme.test", "2024-05-31T09:00:00Z", "2024-05-31T10:00:00Z").await;
    visit(&router, "acme", "asha@acme.test", "2024-07-01T09:00:00Z", "2024-07-01T10:00:00Z").await;

    let (_, body) = report(&router, "acme", 6, 2024).await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_att_004_active_visit_does_not_count() {
    let router = create_router_for_test().await;
    let (status, body) = send(
        &router,
        "POST",
        "/api/visits/check-in",
        Some("acme"),
        Some("asha@acme.test"),
        Some(json!({"time": "2024-06-03T09:00:00Z"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "active");

    let (_, body) = report(&router, "acme", 6, 2024).await;
    assert!(find(&body, "emp_001").is_none());
}

// =============================================================================
// SECTION 2: Monthly report
// =============================================================================

#[tokio::test]
async fn test_rep_001_idle_employees_are_excluded() {
    let router = create_router_for_test().await;
    let (status, body) = report(&router, "acme", 6, 2024).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_rep_002_bulk_leaves_pay_the_full_base() {
    let router = create_router_for_test().await;
    let (status, _) = send(
        &router,
        "PUT",
        "/api/admin/salaries/update-monthly-leaves",
        Some("acme"),
        None,
        Some(json!({"month": 6, "year": 2024, "leaves": 26})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = report(&router, "acme", 6, 2024).await;
    let asha = find(&body, "emp_001").expect("asha is on the report");
    let calculated = &asha["calculated"];

    assert_eq!(field(&calculated["attendance"], "paidDays"), decimal("26"));
    assert_eq!(field(calculated, "attendanceAdjustedSalary"), decimal("30000"));
    assert_eq!(field(calculated, "grossSalary"), decimal("30000"));
    assert_eq!(calculated["monthYear"], "6-2024");
    assert_eq!(calculated["totalDaysInMonth"], 30);
    // 30000 − 12% PF − 0.75% health insurance
    assert_eq!(field(calculated, "netSalary"), decimal("26175"));
    // 30000 + 12% PF + 3.25% health insurance
    assert_eq!(field(calculated, "calculatedCtc"), decimal("34575"));
    // Admins are never on the report.
    assert!(find(&body, "adm_001").is_none());
}

#[tokio::test]
async fn test_rep_003_report_merges_profile_fields() {
    let router = create_router_for_test().await;
    send(
        &router,
        "PUT",
        "/api/admin/employees-salary-info/emp_002",
        Some("acme"),
        None,
        Some(json!({"incentive": 1000})),
    )
    .await;

    let (_, body) = report(&router, "acme", 6, 2024).await;
    let ravi = find(&body, "emp_002").expect("incentive makes ravi relevant");
    assert_eq!(ravi["email"], "ravi@acme.test");
    assert_eq!(ravi["occupation"], "Field Officer");
    assert_eq!(ravi["salaryInHandPerMonth"], "26000");
    assert_eq!(field(&ravi["calculated"], "grossSalary"), decimal("1000"));
}

#[tokio::test]
async fn test_rep_004_invalid_query_returns_400() {
    let router = create_router_for_test().await;
    for uri in [
        "/api/admin/employees-salary-info",
        "/api/admin/employees-salary-info?month=6",
        "/api/admin/employees-salary-info?month=0&year=2024",
        "/api/admin/employees-salary-info?month=6&year=abc",
    ] {
        let (status, body) = send(&router, "GET", uri, Some("acme"), None, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "for {}", uri);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }
}

#[tokio::test]
async fn test_rep_005_detail_ignores_filter() {
    let router = create_router_for_test().await;
    let (status, body) = send(
        &router,
        "GET",
        "/api/admin/employees-salary-info/emp_002?month=6&year=2024",
        Some("acme"),
        None,
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "emp_002");
    assert_eq!(field(&body["calculated"]["attendance"], "paidDays"), Decimal::ZERO);
}

// =============================================================================
// SECTION 3: Salary profile updates
// =============================================================================

#[tokio::test]
async fn test_upd_001_override_forces_net_salary() {
    let router = create_router_for_test().await;
    visit(&router, "acme", "asha@acme.test", "2024-06-03T09:00:00Z", "2024-06-03T17:00:00Z").await;

    let (status, body) = send(
        &router,
        "PUT",
        "/api/admin/employees-salary-info/emp_001",
        Some("acme"),
        None,
        Some(json!({"manualNetSalaryOverride": 5000})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["manualNetSalaryOverride"], "5000");

    let (_, body) = report(&router, "acme", 6, 2024).await;
    let calculated = &find(&body, "emp_001").unwrap()["calculated"];
    assert_eq!(field(calculated, "netSalary"), decimal("5000"));
    assert_eq!(calculated["overrideApplied"], true);
    assert_ne!(field(calculated, "computedNetSalary"), decimal("5000"));

    // Clearing the override restores the computed figure.
    send(
        &router,
        "PUT",
        "/api/admin/employees-salary-info/emp_001",
        Some("acme"),
        None,
        Some(json!({"manualNetSalaryOverride": null})),
    )
    .await;
    let (_, body) = report(&router, "acme", 6, 2024).await;
    let calculated = &find(&body, "emp_001").unwrap()["calculated"];
    assert_eq!(calculated["overrideApplied"], false);
    assert_eq!(
        field(calculated, "netSalary"),
        field(calculated, "computedNetSalary")
    );
}

#[tokio::test]
async fn test_upd_002_override_alone_puts_employee_on_report() {
    let router = create_router_for_test().await;
    send(
        &router,
        "PUT",
        "/api/admin/employees-salary-info/emp_002",
        Some("acme"),
        None,
        Some(json!({"manualNetSalaryOverride": 0})),
    )
    .await;

    let (_, body) = report(&router, "acme", 6, 2024).await;
    let ravi = find(&body, "emp_002").expect("override makes ravi relevant");
    assert_eq!(field(&ravi["calculated"], "netSalary"), Decimal::ZERO);
}

#[tokio::test]
async fn test_upd_003_arrays_round_trip_exactly() {
    let router = create_router_for_test().await;
    let first = json!({
        "otherDeductions": [
            {"title": "Advance", "amount": 1000, "date": "2024-06-01"},
            {"title": "Uniform", "amount": 250, "date": "2024-06-02"}
        ],
        "reimbursements": [{"title": "Fuel", "amount": "400", "date": "2024-06-03"}],
        "allowances": [{"title": "Phone", "amount": 300}]
    });
    send(
        &router,
        "PUT",
        "/api/admin/employees-salary-info/emp_001",
        Some("acme"),
        None,
        Some(first),
    )
    .await;

    let (status, body) = send(
        &router,
        "PUT",
        "/api/admin/employees-salary-info/emp_001",
        Some("acme"),
        None,
        Some(json!({
            "otherDeductions": [{"title": "Canteen", "amount": "-20", "date": "2024-06-10"}],
            "allowances": []
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, fetched) = send(
        &router,
        "GET",
        "/api/admin/employees-salary-info/emp_001?month=6&year=2024",
        Some("acme"),
        None,
        None,
    )
    .await;
    assert_eq!(fetched["otherDeductions"], body["otherDeductions"]);
    assert_eq!(
        fetched["otherDeductions"],
        json!([{"title": "Canteen", "amount": "0", "date": "2024-06-10"}])
    );
    assert_eq!(fetched["allowances"], json!([]));
    // Not resubmitted, so kept from the first update.
    assert_eq!(
        fetched["reimbursements"],
        json!([{"title": "Fuel", "amount": "400", "date": "2024-06-03"}])
    );
}

#[tokio::test]
async fn test_upd_004_individual_leave_adds_paid_days() {
    let router = create_router_for_test().await;
    let (_, body) = send(
        &router,
        "PUT",
        "/api/admin/employees-salary-info/emp_001",
        Some("acme"),
        None,
        Some(json!({"individualPaidLeave": {"06-2024": 1.5}})),
    )
    .await;
    assert_eq!(body["individualPaidLeaves"]["6-2024"], "1.5");

    let (_, body) = report(&router, "acme", 6, 2024).await;
    let attendance = &find(&body, "emp_001").unwrap()["calculated"]["attendance"];
    assert_eq!(field(attendance, "individualPaidLeaves"), decimal("1.5"));
    assert_eq!(field(attendance, "paidDays"), decimal("1.5"));
}

#[tokio::test]
async fn test_upd_005_unknown_employee_returns_404() {
    let router = create_router_for_test().await;
    let (status, body) = send(
        &router,
        "PUT",
        "/api/admin/employees-salary-info/emp_999",
        Some("acme"),
        None,
        Some(json!({"incentive": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "EMPLOYEE_NOT_FOUND");
}

#[tokio::test]
async fn test_upd_006_oversized_amount_is_rejected_and_report_survives() {
    let router = create_router_for_test().await;
    visit(&router, "acme", "asha@acme.test", "2024-06-03T09:00:00Z", "2024-06-03T17:00:00Z").await;

    let (status, body) = send(
        &router,
        "PUT",
        "/api/admin/employees-salary-info/emp_001",
        Some("acme"),
        None,
        Some(json!({"salaryInHandPerMonth": "79228162514264337593543950335"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, body) = report(&router, "acme", 6, 2024).await;
    assert_eq!(status, StatusCode::OK);
    let asha = find(&body, "emp_001").unwrap();
    assert_eq!(field(asha, "salaryInHandPerMonth"), decimal("30000"));
}

#[tokio::test]
async fn test_upd_007_malformed_override_keeps_stored_value() {
    let router = create_router_for_test().await;
    send(
        &router,
        "PUT",
        "/api/admin/employees-salary-info/emp_001",
        Some("acme"),
        None,
        Some(json!({"manualNetSalaryOverride": 5000})),
    )
    .await;

    let (status, body) = send(
        &router,
        "PUT",
        "/api/admin/employees-salary-info/emp_001",
        Some("acme"),
        None,
        Some(json!({"manualNetSalaryOverride": "abc"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["manualNetSalaryOverride"], "5000");
}

#[tokio::test]
async fn test_upd_008_null_statutory_amount_keeps_stored_value() {
    let router = create_router_for_test().await;
    send(
        &router,
        "PUT",
        "/api/admin/employees-salary-info/emp_001",
        Some("acme"),
        None,
        Some(json!({"employeePf": 1800})),
    )
    .await;

    let (status, body) = send(
        &router,
        "PUT",
        "/api/admin/employees-salary-info/emp_001",
        Some("acme"),
        None,
        Some(json!({"employeePf": null})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["employeePf"], "1800");
}

// =============================================================================
// SECTION 4: Bulk leave
// =============================================================================

#[tokio::test]
async fn test_blk_001_counts_operational_employees() {
    let router = create_router_for_test().await;
    let (status, body) = send(
        &router,
        "PUT",
        "/api/admin/salaries/update-monthly-leaves",
        Some("acme"),
        None,
        Some(json!({"month": "6", "year": "2024", "leaves": "2.5"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["modifiedCount"], 2);
    assert_eq!(body["monthYear"], "6-2024");
    assert!(body["message"].as_str().unwrap().contains("2 employees"));
}

#[tokio::test]
async fn test_blk_002_applying_twice_equals_once() {
    let router = create_router_for_test().await;
    let request = json!({"month": 6, "year": 2024, "leaves": 4});
    let uri = "/api/admin/salaries/update-monthly-leaves";

    send(&router, "PUT", uri, Some("acme"), None, Some(request.clone())).await;
    let (_, once) = report(&router, "acme", 6, 2024).await;
    send(&router, "PUT", uri, Some("acme"), None, Some(request)).await;
    let (_, twice) = report(&router, "acme", 6, 2024).await;

    assert_eq!(once, twice);
    let asha = find(&twice, "emp_001").unwrap();
    assert_eq!(asha["monthlyLeaves"], json!({"6-2024": "4"}));
}

#[tokio::test]
async fn test_blk_003_last_write_wins() {
    let router = create_router_for_test().await;
    let uri = "/api/admin/salaries/update-monthly-leaves";
    send(&router, "PUT", uri, Some("acme"), None, Some(json!({"month": 6, "year": 2024, "leaves": 4}))).await;
    send(&router, "PUT", uri, Some("acme"), None, Some(json!({"month": 6, "year": 2024, "leaves": 1}))).await;

    let (_, body) = report(&router, "acme", 6, 2024).await;
    let attendance = &find(&body, "emp_002").unwrap()["calculated"]["attendance"];
    assert_eq!(field(attendance, "bulkMonthlyLeaves"), decimal("1"));
}

#[tokio::test]
async fn test_blk_004_invalid_input_touches_nothing() {
    let router = create_router_for_test().await;
    let uri = "/api/admin/salaries/update-monthly-leaves";
    for body in [
        json!({"month": 13, "year": 2024, "leaves": 1}),
        json!({"month": 6, "year": 1969, "leaves": 1}),
        json!({"month": 6, "year": 2024, "leaves": -1}),
        json!({"month": 6, "year": 2024, "leaves": "many"}),
        json!({"year": 2024, "leaves": 1}),
    ] {
        let (status, error) = send(&router, "PUT", uri, Some("acme"), None, Some(body.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "for {}", body);
        assert_eq!(error["code"], "VALIDATION_ERROR");
    }

    let (_, body) = report(&router, "acme", 6, 2024).await;
    assert!(body.as_array().unwrap().is_empty());
}

// =============================================================================
// SECTION 5: Company scoping
// =============================================================================

#[tokio::test]
async fn test_scp_001_cross_tenant_report_is_empty() {
    let router = create_router_for_test().await;
    send(
        &router,
        "PUT",
        "/api/admin/salaries/update-monthly-leaves",
        Some("acme"),
        None,
        Some(json!({"month": 6, "year": 2024, "leaves": 26})),
    )
    .await;

    let (status, body) = report(&router, "initech", 6, 2024).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());

    // Globex employees were not touched by acme's broadcast.
    let (_, body) = report(&router, "globex", 6, 2024).await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_scp_002_cross_tenant_update_returns_404() {
    let router = create_router_for_test().await;
    let (status, _) = send(
        &router,
        "PUT",
        "/api/admin/employees-salary-info/emp_001",
        Some("globex"),
        None,
        Some(json!({"manualNetSalaryOverride": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &router,
        "GET",
        "/api/admin/employees-salary-info/emp_001?month=6&year=2024",
        Some("globex"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_scp_003_visits_do_not_leak_across_companies() {
    let router = create_router_for_test().await;
    // Same login recorded under another company.
    visit(&router, "globex", "asha@acme.test", "2024-06-03T09:00:00Z", "2024-06-03T17:00:00Z").await;

    let (_, body) = report(&router, "acme", 6, 2024).await;
    assert!(find(&body, "emp_001").is_none());
}

#[tokio::test]
async fn test_scp_004_missing_scope_returns_401() {
    let router = create_router_for_test().await;
    let (status, body) = send(
        &router,
        "PUT",
        "/api/admin/salaries/update-monthly-leaves",
        None,
        None,
        Some(json!({"month": 6, "year": 2024, "leaves": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "MISSING_COMPANY_SCOPE");
}

// =============================================================================
// SECTION 6: Visit lifecycle
// =============================================================================

#[tokio::test]
async fn test_vis_001_check_out_never_reopens() {
    let router = create_router_for_test().await;
    visit(&router, "acme", "asha@acme.test", "2024-06-03T09:00:00Z", "2024-06-03T09:10:00Z").await;

    let (status, body) = send(
        &router,
        "PUT",
        "/api/visits/check-out",
        Some("acme"),
        Some("asha@acme.test"),
        Some(json!({"time": "2024-06-03T18:00:00Z"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "NO_ACTIVE_VISIT");

    // The completed visit kept its original checkout.
    let (_, body) = report(&router, "acme", 6, 2024).await;
    let hours = field(
        &find(&body, "emp_001").unwrap()["calculated"]["attendance"],
        "totalActualWorkingHours",
    );
    assert_eq!(hours, decimal("0.17"));
}

#[tokio::test]
async fn test_vis_002_check_in_defaults_time() {
    let router = create_router_for_test().await;
    let (status, body) = send(
        &router,
        "POST",
        "/api/visits/check-in",
        Some("acme"),
        Some("asha@acme.test"),
        Some(json!({"office": "HQ", "bikeMeterReading": "1200.5"})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(body["checkIn"]["time"].is_string());
    assert_eq!(body["checkIn"]["bikeMeterReading"], "1200.5");
    assert_eq!(body["companyId"], "acme");
}
