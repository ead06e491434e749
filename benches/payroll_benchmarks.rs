//! Performance benchmarks for the payroll engine.
//!
//! This benchmark suite covers the monthly payroll run:
//! - Single employee calculation from a month of visits
//! - Monthly report over 100 and 1000 employees
//! - The salary info endpoint end to end through the router
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;
use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use payroll_engine::api::{AppState, create_router};
use payroll_engine::calculation::{build_monthly_report, calculate_employee};
use payroll_engine::config::ConfigLoader;
use payroll_engine::models::{
    CheckIn, CheckOut, CompanyId, Employee, PayMonth, Role, SalaryProfile, Visit,
};
use payroll_engine::store::{EmployeeStore, InMemoryStore, VisitStore};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

fn june() -> PayMonth {
    PayMonth::new(6, 2024).unwrap()
}

/// Creates an operational employee with a typical salary profile.
fn create_employee(index: usize) -> Employee {
    Employee {
        id: format!("emp_{:04}", index),
        company_id: CompanyId::new("acme"),
        employee_code: format!("E-{:04}", index),
        name: format!("Employee {}", index),
        email: format!("emp{}@acme.test", index),
        role: Role::User,
        occupation: None,
        district: None,
        location: None,
        salary: SalaryProfile {
            salary_in_hand_per_month: Decimal::from(20_000 + (index as i64 % 50) * 500),
            fixed_allowances: Decimal::from(1_500),
            incentive: Decimal::from(index as i64 % 3 * 250),
            ..SalaryProfile::default()
        },
    }
}

/// Creates one completed visit per working day in June 2024, with durations
/// varying between 3 and 45 minutes.
fn create_visits_for(employee: &Employee) -> Vec<Visit> {
    (1..=26)
        .map(|day| {
            let start = Utc
                .with_ymd_and_hms(2024, 6, day, 9, 0, 0)
                .single()
                .unwrap();
            let minutes = 3 + (day as i64 * 7) % 43;
            let mut visit = Visit::open(
                format!("{}_{}", employee.id, day),
                employee.company_id.clone(),
                employee.email.clone(),
                CheckIn {
                    time: Some(start),
                    ..CheckIn::default()
                },
            );
            visit.complete(CheckOut {
                time: Some(start + Duration::minutes(minutes)),
                ..CheckOut::default()
            });
            visit
        })
        .collect()
}

fn create_company(size: usize) -> (Vec<Employee>, Vec<Visit>) {
    let employees: Vec<Employee> = (0..size).map(create_employee).collect();
    let visits = employees.iter().flat_map(create_visits_for).collect();
    (employees, visits)
}

fn bench_single_employee(c: &mut Criterion) {
    let config = ConfigLoader::default();
    let employee = create_employee(1);
    let visits = create_visits_for(&employee);

    c.bench_function("single_employee_month", |b| {
        b.iter(|| {
            black_box(calculate_employee(
                black_box(&employee),
                visits.iter(),
                june(),
                &config,
            ))
        })
    });
}

fn bench_monthly_report(c: &mut Criterion) {
    let config = ConfigLoader::default();
    let mut group = c.benchmark_group("monthly_report");

    for size in [100usize, 1000] {
        let (employees, visits) = create_company(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(build_monthly_report(&employees, &visits, june(), &config)))
        });
    }

    group.finish();
}

fn bench_salary_info_endpoint(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = Arc::new(InMemoryStore::new());
    let (employees, visits) = create_company(100);
    rt.block_on(async {
        for employee in employees {
            store.save_employee(employee).await.unwrap();
        }
        for visit in visits {
            store.insert_visit(visit).await.unwrap();
        }
    });
    let router = create_router(AppState::in_memory(ConfigLoader::default(), store));

    c.bench_function("salary_info_endpoint_100", |b| {
        b.to_async(&rt).iter(|| async {
            let request = Request::builder()
                .method("GET")
                .uri("/api/admin/employees-salary-info?month=6&year=2024")
                .header("X-Company-Id", "acme")
                .body(Body::empty())
                .unwrap();
            let response = router.clone().oneshot(request).await.unwrap();
            black_box(response)
        })
    });
}

criterion_group!(
    benches,
    bench_single_employee,
    bench_monthly_report,
    bench_salary_info_endpoint
);
criterion_main!(benches);
