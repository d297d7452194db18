//! PDF export gate behaviour against an in-memory usage log

mod common;

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use common::mock_repos::{FailingUsageRepository, MockUsageRepository};
use roomvibe_core::{PdfExportGate, UsageError};
use roomvibe_types::{Plan, PlanLimits, Quota, UsageMonth, UserId};

const USER: UserId = UserId(42);

fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
}

fn month(s: &str) -> UsageMonth {
    UsageMonth::parse(s).unwrap()
}

fn limited(limit: u32) -> PlanLimits {
    PlanLimits {
        pdf_monthly_limit: Quota::Limited(limit),
        ..*PlanLimits::for_plan(Plan::Designer)
    }
}

fn gate(repo: &MockUsageRepository) -> PdfExportGate<MockUsageRepository> {
    PdfExportGate::new(Arc::new(repo.clone()))
}

// ============================================================================
// Status
// ============================================================================

#[tokio::test]
async fn test_status_with_quota_left() {
    let repo = MockUsageRepository::new();
    repo.seed(USER, &month("2025-03"), 4);

    let status = gate(&repo)
        .status_at(USER, &limited(5), at(2025, 3, 14))
        .await
        .unwrap();

    assert!(status.can_export);
    assert!(status.pdf_enabled);
    assert_eq!(status.current_count, 4);
    assert_eq!(status.monthly_limit, Quota::Limited(5));
    assert_eq!(status.remaining, Quota::Limited(1));
    assert_eq!(status.current_month, month("2025-03"));
}

#[tokio::test]
async fn test_status_for_plan_without_pdf() {
    let repo = MockUsageRepository::new();
    let status = gate(&repo)
        .status_at(USER, PlanLimits::for_plan(Plan::Artist), at(2025, 3, 1))
        .await
        .unwrap();

    assert!(!status.can_export);
    assert!(!status.pdf_enabled);
    assert_eq!(status.current_count, 0);
}

#[tokio::test]
async fn test_status_unlimited() {
    let repo = MockUsageRepository::new();
    repo.seed(USER, &month("2025-03"), 250);

    let status = gate(&repo)
        .status_at(USER, PlanLimits::for_plan(Plan::AllAccess), at(2025, 3, 31))
        .await
        .unwrap();

    assert!(status.can_export);
    assert_eq!(status.current_count, 250);
    assert_eq!(status.monthly_limit, Quota::Unlimited);
    assert_eq!(status.remaining, Quota::Unlimited);
}

#[tokio::test]
async fn test_status_json_shape() {
    let repo = MockUsageRepository::new();
    let status = gate(&repo)
        .status_at(USER, PlanLimits::for_plan(Plan::Designer), at(2025, 1, 2))
        .await
        .unwrap();

    let json = serde_json::to_value(&status).unwrap();
    assert_eq!(json["canExport"], true);
    assert_eq!(json["monthlyLimit"], "unlimited");
    assert_eq!(json["remaining"], "unlimited");
    assert_eq!(json["currentMonth"], "2025-01");
}

// ============================================================================
// Commit
// ============================================================================

#[tokio::test]
async fn test_commit_last_export_of_the_month() {
    let repo = MockUsageRepository::new();
    repo.seed(USER, &month("2025-03"), 4);
    let gate = gate(&repo);

    let receipt = gate
        .commit_at(USER, &limited(5), at(2025, 3, 14))
        .await
        .unwrap();
    assert_eq!(receipt.current_count, 5);
    assert_eq!(receipt.remaining, Quota::Limited(0));

    let err = gate
        .commit_at(USER, &limited(5), at(2025, 3, 15))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        UsageError::QuotaExceeded {
            current: 5,
            limit: 5
        }
    ));
    assert_eq!(repo.stored(USER, &month("2025-03")), 5);
}

#[tokio::test]
async fn test_commit_not_entitled_writes_nothing() {
    let repo = MockUsageRepository::new();
    let err = gate(&repo)
        .commit_at(USER, PlanLimits::for_plan(Plan::User), at(2025, 3, 1))
        .await
        .unwrap_err();

    assert!(matches!(err, UsageError::NotEntitled));
    assert!(!err.is_internal());
    assert_eq!(repo.stored(USER, &month("2025-03")), 0);
    assert_eq!(repo.count_queries(), 0);
}

#[tokio::test]
async fn test_zero_quota_rejects_first_export() {
    let repo = MockUsageRepository::new();
    let err = gate(&repo)
        .commit_at(USER, &limited(0), at(2025, 3, 1))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        UsageError::QuotaExceeded {
            current: 0,
            limit: 0
        }
    ));
}

#[tokio::test]
async fn test_unlimited_skips_precount() {
    let repo = MockUsageRepository::new();
    repo.seed(USER, &month("2025-03"), 1_000);

    let receipt = gate(&repo)
        .commit_at(USER, PlanLimits::for_plan(Plan::Designer), at(2025, 3, 9))
        .await
        .unwrap();

    assert_eq!(receipt.current_count, 1_001);
    assert_eq!(receipt.monthly_limit, Quota::Unlimited);
    // only the post-insert recount
    assert_eq!(repo.count_queries(), 1);
}

#[tokio::test]
async fn test_count_is_monotonic_within_a_month() {
    let repo = MockUsageRepository::new();
    let gate = gate(&repo);
    let limits = PlanLimits::for_plan(Plan::Gallery);
    let now = at(2025, 6, 10);

    let mut last = 0;
    for _ in 0..20 {
        let receipt = gate.commit_at(USER, limits, now).await.unwrap();
        assert_eq!(receipt.current_count, last + 1);
        last = receipt.current_count;
    }

    let err = gate.commit_at(USER, limits, now).await.unwrap_err();
    assert!(matches!(err, UsageError::QuotaExceeded { current: 20, limit: 20 }));
}

#[tokio::test]
async fn test_new_month_starts_from_zero() {
    let repo = MockUsageRepository::new();
    repo.seed(USER, &month("2025-01"), 20);
    let gate = gate(&repo);
    let limits = PlanLimits::for_plan(Plan::Gallery);

    let january = gate.status_at(USER, limits, at(2025, 1, 31)).await.unwrap();
    assert!(!january.can_export);

    let february = gate.commit_at(USER, limits, at(2025, 2, 1)).await.unwrap();
    assert_eq!(february.current_count, 1);
    assert_eq!(february.remaining, Quota::Limited(19));
    assert_eq!(february.current_month, month("2025-02"));
}

#[tokio::test]
async fn test_users_are_counted_separately() {
    let repo = MockUsageRepository::new();
    repo.seed(UserId(1), &month("2025-03"), 5);

    let status = gate(&repo)
        .status_at(UserId(2), &limited(5), at(2025, 3, 3))
        .await
        .unwrap();
    assert_eq!(status.current_count, 0);
    assert!(status.can_export);
}

#[tokio::test]
async fn test_database_failure_is_internal() {
    let gate = PdfExportGate::new(Arc::new(FailingUsageRepository));

    let err = gate
        .commit_at(USER, &limited(5), at(2025, 3, 1))
        .await
        .unwrap_err();
    assert!(matches!(err, UsageError::Database(_)));
    assert!(err.is_internal());

    let err = gate
        .status_at(USER, &limited(5), at(2025, 3, 1))
        .await
        .unwrap_err();
    assert!(err.is_internal());
}
