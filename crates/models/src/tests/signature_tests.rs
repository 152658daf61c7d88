use chrono::{Duration, TimeZone, Utc};
use sea_orm::prelude::DateTimeWithTimeZone;
use uuid::Uuid;

use crate::challan;
use crate::emission_report;
use crate::status::{ChallanStatus, EmissionClassification};

fn report() -> emission_report::Model {
    let at: DateTimeWithTimeZone = Utc.with_ymd_and_hms(2024, 3, 1, 10, 30, 0).unwrap().into();
    emission_report::Model {
        id: Uuid::new_v4(),
        device_id: Uuid::new_v4(),
        officer_id: None,
        vehicle_plate: "LEA-1234".into(),
        sound_level_db: 96.4,
        co_level: Some(1.2),
        co2_level: None,
        hc_level: None,
        nox_level: Some(0.05),
        classification: EmissionClassification::Violation,
        measured_at: at,
        digital_signature: String::new(),
        created_at: at,
    }
}

fn challan_row() -> challan::Model {
    let at: DateTimeWithTimeZone = Utc.with_ymd_and_hms(2024, 3, 1, 11, 0, 0).unwrap().into();
    challan::Model {
        id: Uuid::new_v4(),
        challan_number: "CH-20240301-ABC123".into(),
        officer_id: Uuid::new_v4(),
        accused_id: Uuid::new_v4(),
        vehicle_id: Uuid::new_v4(),
        violation_id: Uuid::new_v4(),
        emission_report_id: None,
        penalty_amount: 2000,
        location: None,
        evidence_path: None,
        status: ChallanStatus::Unpaid,
        issued_at: at,
        due_date: at + Duration::days(14),
        paid_at: None,
        digital_signature: String::new(),
        created_at: at,
        updated_at: at,
    }
}

#[test]
fn emission_signature_recomputes_identically() {
    let mut r = report();
    r.digital_signature = r.compute_signature();
    assert_eq!(r.digital_signature, r.clone().compute_signature());
}

#[test]
fn emission_signature_detects_tampered_reading() {
    let r = report();
    let original = r.compute_signature();
    let mut tampered = r.clone();
    tampered.sound_level_db = 80.0;
    assert_ne!(original, tampered.compute_signature());
}

#[test]
fn emission_signature_detects_sub_hundredth_change() {
    let r = report();
    let mut nudged = r.clone();
    nudged.sound_level_db = 96.4 - 0.008;
    assert_ne!(r.compute_signature(), nudged.compute_signature());
    let mut gas = r.clone();
    gas.nox_level = Some(0.051);
    assert_ne!(r.compute_signature(), gas.compute_signature());
}

#[test]
fn emission_signature_covers_classification() {
    let r = report();
    let mut flipped = r.clone();
    flipped.classification = EmissionClassification::Compliant;
    assert_ne!(r.compute_signature(), flipped.compute_signature());
}

#[test]
fn emission_signature_ignores_offset_of_same_instant() {
    let r = report();
    let mut shifted = r.clone();
    let pkt = chrono::FixedOffset::east_opt(5 * 3600).unwrap();
    shifted.measured_at = r.measured_at.with_timezone(&pkt);
    assert_eq!(r.compute_signature(), shifted.compute_signature());
}

#[test]
fn challan_signature_covers_penalty() {
    let c = challan_row();
    let mut changed = c.clone();
    changed.penalty_amount = 1;
    assert_ne!(c.compute_signature(), changed.compute_signature());
}

#[test]
fn challan_status_change_keeps_signature() {
    let c = challan_row();
    let mut paid = c.clone();
    paid.status = ChallanStatus::Paid;
    assert_eq!(c.compute_signature(), paid.compute_signature());
}

#[test]
fn overdue_only_when_unpaid_and_past_due() {
    let c = challan_row();
    let after_due = c.due_date + Duration::days(1);
    assert!(c.is_overdue(after_due));
    assert!(!c.is_overdue(c.issued_at));
    let mut disputed = c.clone();
    disputed.status = ChallanStatus::Disputed;
    assert!(!disputed.is_overdue(after_due));
}

#[test]
fn document_numbers_are_zero_padded() {
    assert_eq!(crate::fir::format_number("lhr01", 2024, 7), "FIR-LHR01-2024-0007");
    assert_eq!(crate::court_case::format_number(2024, 42), "CASE-2024-00042");
}
