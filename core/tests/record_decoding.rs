//! Record decoding: backend documents, snapshot files, and report config.
//!
//! Documents come from a schemaless store: any field may be missing, null,
//! or hold a value the catalog does not know. None of that may fail.

use chrono::NaiveDate;
use clinic_core::{
    sample::SampleGenerator, Category, CustomerGrade, CustomerVisitRecord, PaymentMethod, PaymentStatus, RecordSnapshot,
    ReportConfig, ReportPeriod, VisitSource,
};
use std::io::Write;

const FULL_DOC: &str = r#"{
    "id": "c9XfQ2",
    "name": "김서연",
    "phone": "010-1234-5678",
    "category": "수술",
    "procedure": "코성형",
    "visitSource": "지인 소개",
    "paymentMethod": "카드",
    "paymentStatus": "완납",
    "amount": 3500000,
    "date": "2024-03-15",
    "appointmentTime": "14:30",
    "staffId": "D01",
    "staffName": "김도현",
    "staffPosition": "원장",
    "grade": "VIP",
    "memo": "재수술 상담 희망",
    "beforeImage": "https://img.example/before.jpg",
    "afterImage": "https://img.example/after.jpg",
    "createdBy": "desk@clinic.example"
}"#;

#[test]
fn full_document_decodes_every_field() {
    let r = CustomerVisitRecord::from_json(FULL_DOC).unwrap();

    assert_eq!(r.id.as_deref(), Some("c9XfQ2"));
    assert_eq!(r.category, Some(Category::Surgery));
    assert_eq!(r.visit_source, Some(VisitSource::AcquaintanceReferral));
    assert_eq!(r.payment_method, Some(PaymentMethod::Card));
    assert_eq!(r.payment_status, Some(PaymentStatus::PaidInFull));
    assert_eq!(r.amount, Some(3_500_000));
    assert_eq!(r.date, NaiveDate::from_ymd_opt(2024, 3, 15));
    assert_eq!(r.grade.as_deref(), Some("VIP"));
    assert_eq!(r.customer_grade(), Some(CustomerGrade::Vip));
    assert_eq!(r.appointment_time.as_deref(), Some("14:30"));
}

/// Descriptive fields survive a decode → encode → decode cycle unchanged.
#[test]
fn descriptive_fields_round_trip() {
    let original = CustomerVisitRecord::from_json(FULL_DOC).unwrap();

    let encoded = serde_json::to_string(&original).unwrap();
    let decoded = CustomerVisitRecord::from_json(&encoded).unwrap();

    assert_eq!(decoded, original);
    assert!(encoded.contains("\"beforeImage\""), "camelCase keys expected: {encoded}");
    assert!(encoded.contains("\"date\":\"2024-03-15\""), "date wire form: {encoded}");
    assert!(encoded.contains("\"category\":\"수술\""), "label wire form: {encoded}");
}

/// Grades are kept as written, including tiers outside the catalog.
#[test]
fn grades_round_trip_verbatim() {
    for grade in ["Standard", "VIP", "Gold"] {
        let doc = format!(r#"{{"grade":"{grade}"}}"#);
        let r = CustomerVisitRecord::from_json(&doc).unwrap();
        assert_eq!(serde_json::to_string(&r).unwrap(), doc, "grade {grade}");
    }

    let standard = CustomerVisitRecord::from_json(r#"{"grade":"Standard"}"#).unwrap();
    assert_eq!(standard.customer_grade(), Some(CustomerGrade::Standard));
    let gold = CustomerVisitRecord::from_json(r#"{"grade":"Gold"}"#).unwrap();
    assert_eq!(gold.customer_grade(), None);
}

#[test]
fn unknown_labels_decode_as_absent() {
    let _ = env_logger::builder().is_test(true).try_init();

    let r = CustomerVisitRecord::from_json(
        r#"{ "category": "성형", "visitSource": "TV", "paymentStatus": "pending", "grade": 3 }"#,
    )
    .unwrap();

    assert_eq!(r.category, None);
    assert_eq!(r.visit_source, None);
    assert_eq!(r.payment_status, None);
    assert_eq!(r.grade.as_deref(), Some("3"));
    assert_eq!(r.customer_grade(), None);
}

#[test]
fn lenient_amounts() {
    let amount = |doc: &str| CustomerVisitRecord::from_json(doc).unwrap().amount;

    assert_eq!(amount(r#"{ "amount": "150000" }"#), Some(150_000));
    assert_eq!(amount(r#"{ "amount": "12000원" }"#), Some(12_000));
    assert_eq!(amount(r#"{ "amount": 99.9 }"#), Some(99));
    assert_eq!(amount(r#"{ "amount": -50000 }"#), Some(-50_000));
    assert_eq!(amount(r#"{ "amount": "" }"#), None);
    assert_eq!(amount(r#"{ "amount": null }"#), None);
    assert_eq!(amount(r#"{ "amount": [1] }"#), None);
    assert_eq!(amount(r#"{}"#), None);
}

#[test]
fn bad_dates_and_extra_fields_are_ignored() {
    let r = CustomerVisitRecord::from_json(
        r#"{ "date": "15/03/2024", "createdAt": { "seconds": 1710460800 }, "phone": 1012345678 }"#,
    )
    .unwrap();

    assert_eq!(r.date, None);
    assert_eq!(r.phone.as_deref(), Some("1012345678"));
}

#[test]
fn iso_timestamps_keep_their_calendar_day() {
    let r = CustomerVisitRecord::from_json(r#"{ "date": "2024-03-15T09:30:00.000Z" }"#).unwrap();
    assert_eq!(r.date, NaiveDate::from_ymd_opt(2024, 3, 15));
}

// ── Snapshots ────────────────────────────────────────────────────────────────

#[test]
fn snapshot_accepts_bare_array_and_wrapped_object() {
    let bare = RecordSnapshot::from_json(&format!("[{FULL_DOC}, {{}}]")).unwrap();
    assert_eq!(bare.records.len(), 2);
    assert_eq!(bare.exported_at, None);

    let wrapped = RecordSnapshot::from_json(&format!(
        r#"{{ "exportedAt": "2024-03-16T00:00:00Z", "records": [{FULL_DOC}] }}"#
    ))
    .unwrap();
    assert_eq!(wrapped.records.len(), 1);
    assert_eq!(wrapped.exported_at.as_deref(), Some("2024-03-16T00:00:00Z"));
}

/// An exported snapshot reloads as the same records.
#[test]
fn exported_snapshot_reloads_unchanged() {
    let reference = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
    let snapshot = RecordSnapshot {
        exported_at: Some("2024-03-31T12:00:00+09:00".to_string()),
        records: SampleGenerator::new(7).generate(25, reference, 30),
    };

    let json = snapshot.to_json().unwrap();

    assert!(json.contains("\"exportedAt\""), "wrapped form expected: {json}");
    assert_eq!(RecordSnapshot::from_json(&json).unwrap(), snapshot);
}

#[test]
fn snapshot_rejects_non_record_json() {
    assert!(RecordSnapshot::from_json("42").is_err());
    assert!(RecordSnapshot::from_json("not json").is_err());
}

#[test]
fn snapshot_loads_from_file() {
    let path = std::env::temp_dir().join(format!("clinic-snapshot-{}.json", std::process::id()));
    let mut file = std::fs::File::create(&path).unwrap();
    write!(file, "[{FULL_DOC}]").unwrap();
    drop(file);

    let snapshot = RecordSnapshot::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(snapshot.records.len(), 1);
    assert_eq!(snapshot.records[0].name.as_deref(), Some("김서연"));
}

#[test]
fn missing_snapshot_file_reports_its_path() {
    let err = RecordSnapshot::load("/definitely/not/here.json").unwrap_err();
    assert!(err.to_string().contains("/definitely/not/here.json"), "got: {err}");
}

// ── Config ───────────────────────────────────────────────────────────────────

#[test]
fn report_config_loads_from_file() {
    let path = std::env::temp_dir().join(format!("clinic-config-{}.json", std::process::id()));
    std::fs::write(&path, r#"{ "dailyWindowDays": 14, "defaultPeriod": "day" }"#).unwrap();

    let config = ReportConfig::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(config.daily_window_days, 14);
    assert_eq!(config.default_period, ReportPeriod::Day);
}
