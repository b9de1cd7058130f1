//! Seeded sample datasets for demos, the report runner, and tests.
//!
//! Generated records only use catalog values, and every procedure belongs
//! to its record's category. Refund records carry negative amounts, the way
//! the front desk enters them.

use crate::{
    catalog::{Bucket, Category, CustomerGrade, PaymentMethod, PaymentStatus, VisitSource},
    name_generator::NameGenerator,
    record::CustomerVisitRecord,
    rng::{RngBank, SampleRng, StreamSlot},
    types::Amount,
};
use chrono::{Days, NaiveDate};

/// Amounts are rounded to this unit (KRW).
const AMOUNT_UNIT: Amount = 10_000;

const STAFF: &[(&str, &str, &str)] = &[
    ("D01", "김도현", "원장"),
    ("D02", "이수진", "부원장"),
    ("C01", "박지민", "상담실장"),
    ("N01", "최유나", "간호사"),
    ("S01", "정하늘", "피부관리사"),
];

pub struct SampleGenerator {
    identity: SampleRng,
    service: SampleRng,
    payment: SampleRng,
    schedule: SampleRng,
}

impl SampleGenerator {
    pub fn new(seed: u64) -> Self {
        let bank = RngBank::new(seed);
        Self {
            identity: bank.for_stream(StreamSlot::Identity),
            service: bank.for_stream(StreamSlot::Service),
            payment: bank.for_stream(StreamSlot::Payment),
            schedule: bank.for_stream(StreamSlot::Schedule),
        }
    }

    /// `count` records dated within `[reference - (span_days - 1), reference]`.
    pub fn generate(&mut self, count: usize, reference: NaiveDate, span_days: u64) -> Vec<CustomerVisitRecord> {
        let records: Vec<_> = (0..count)
            .map(|_| self.next_record(reference, span_days.max(1)))
            .collect();
        log::debug!(
            "Generated {} sample records ending {reference} over {span_days} days",
            records.len()
        );
        records
    }

    fn next_record(&mut self, reference: NaiveDate, span_days: u64) -> CustomerVisitRecord {
        // ── Identity ───────────────────────────────
        let mut id_bytes = [0u8; 16];
        id_bytes[..8].copy_from_slice(&self.identity.next_u64().to_le_bytes());
        id_bytes[8..].copy_from_slice(&self.identity.next_u64().to_le_bytes());
        let id = uuid::Builder::from_random_bytes(id_bytes).into_uuid();
        let name = NameGenerator::generate_full_name(&mut self.identity);
        let phone = NameGenerator::generate_mobile(&mut self.identity);
        let grade = *self.identity.pick_weighted(
            CustomerGrade::ALL,
            &[0.80, 0.15, 0.05],
        );

        // ── Service ────────────────────────────────
        let category = *self
            .service
            .pick_weighted(Category::ALL, &[0.25, 0.35, 0.20, 0.20]);
        let procedure = *self.service.pick(category.procedures());
        let visit_source = *self
            .service
            .pick_weighted(VisitSource::ALL, &[0.35, 0.15, 0.20, 0.20, 0.10]);
        let (staff_id, staff_name, staff_position) = *self.service.pick(STAFF);

        // ── Payment ────────────────────────────────
        let payment_method = *self.payment.pick(PaymentMethod::ALL);
        let payment_status = *self
            .payment
            .pick_weighted(PaymentStatus::ALL, &[0.60, 0.20, 0.12, 0.08]);
        let charge = self.charge_for(category);
        let amount = if payment_status == PaymentStatus::Refunded { -charge } else { charge };

        // ── Schedule ───────────────────────────────
        let back = self.schedule.next_u64_below(span_days);
        let date = reference.checked_sub_days(Days::new(back)).unwrap_or(reference);
        let slot = self.schedule.next_u64_below(18); // 10:00 .. 18:30
        let appointment_time = format!("{:02}:{:02}", 10 + slot / 2, (slot % 2) * 30);

        CustomerVisitRecord {
            id: Some(id.to_string()),
            name: Some(name),
            phone: Some(phone),
            category: Some(category),
            procedure: Some(procedure.to_string()),
            visit_source: Some(visit_source),
            payment_method: Some(payment_method),
            payment_status: Some(payment_status),
            amount: Some(amount),
            date: Some(date),
            appointment_time: Some(appointment_time),
            staff_id: Some(staff_id.to_string()),
            staff_name: Some(staff_name.to_string()),
            staff_position: Some(staff_position.to_string()),
            grade: Some(grade.label().to_string()),
            memo: None,
            before_image: None,
            after_image: None,
            created_by: Some("sample-generator".to_string()),
            updated_by: None,
        }
    }

    /// Typical ticket size per category, in whole units.
    fn charge_for(&mut self, category: Category) -> Amount {
        let (min_units, max_units) = match category {
            Category::Surgery       => (150, 600),
            Category::SkinProcedure => (10, 80),
            Category::Consultation  => (0, 3),
            Category::Care          => (5, 30),
        };
        let span = (max_units - min_units + 1) as u64;
        (min_units + self.payment.next_u64_below(span) as Amount) * AMOUNT_UNIT
    }
}
