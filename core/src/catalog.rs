//! Closed enumerations the clinic classifies records by.
//!
//! RULE: Each enum lists its variants in `ALL` in display order.
//! Bucketed reports iterate `ALL`, so reordering a list reorders every chart.
//! Wire labels are the strings the dashboard backend stores.

use crate::error::{ClinicError, ClinicResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Common surface of every catalog enum.
pub trait Bucket: Sized + Copy + Eq + 'static {
    /// Human-readable name of the enumeration, used in error messages.
    const KIND: &'static str;

    /// Every variant, in display order.
    const ALL: &'static [Self];

    /// The stored wire label.
    fn label(&self) -> &'static str;

    /// Look a variant up by wire label. Exact match only.
    fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.label() == label)
    }

    /// Like `from_label`, but an unknown label is an error.
    fn parse_label(label: &str) -> ClinicResult<Self> {
        Self::from_label(label).ok_or_else(|| ClinicError::UnknownLabel {
            kind: Self::KIND,
            label: label.to_string(),
        })
    }
}

// ── Category ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "수술", alias = "surgery", alias = "Surgery")]
    Surgery,
    #[serde(rename = "피부시술", alias = "skin_procedure", alias = "Skin Procedure")]
    SkinProcedure,
    #[serde(rename = "상담", alias = "consultation", alias = "Consultation")]
    Consultation,
    #[serde(rename = "관리", alias = "care", alias = "Care")]
    Care,
}

impl Bucket for Category {
    const KIND: &'static str = "category";
    const ALL: &'static [Self] = &[
        Self::Surgery,
        Self::SkinProcedure,
        Self::Consultation,
        Self::Care,
    ];

    fn label(&self) -> &'static str {
        match self {
            Self::Surgery       => "수술",
            Self::SkinProcedure => "피부시술",
            Self::Consultation  => "상담",
            Self::Care          => "관리",
        }
    }
}

impl Category {
    /// The fixed procedure list offered under this category, in menu order.
    pub fn procedures(&self) -> &'static [&'static str] {
        match self {
            Self::Surgery => &[
                "눈매교정", "코성형", "안면윤곽", "지방흡입",
                "가슴성형", "눈밑지방재배치", "이마거상", "안면거상",
            ],
            Self::SkinProcedure => &[
                "보톡스", "필러", "레이저토닝", "울쎄라",
                "써마지", "스킨부스터", "PRP", "물광주사",
            ],
            Self::Consultation => &[
                "눈성형상담", "코성형상담", "윤곽상담",
                "피부상담", "체형상담", "종합상담",
            ],
            Self::Care => &[
                "리프팅관리", "재생관리", "미백관리",
                "모공관리", "여드름관리", "탄력관리",
            ],
        }
    }

    /// The category whose procedure list contains `procedure`, if any.
    pub fn for_procedure(procedure: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.procedures().iter().any(|p| *p == procedure))
    }
}

// ── Visit source ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisitSource {
    #[serde(rename = "인터넷", alias = "internet")]
    Internet,
    #[serde(rename = "외부 소개", alias = "external_referral")]
    ExternalReferral,
    #[serde(rename = "지인 소개", alias = "acquaintance_referral")]
    AcquaintanceReferral,
    #[serde(rename = "기존", alias = "existing")]
    Existing,
    #[serde(rename = "회원권", alias = "membership")]
    Membership,
}

impl Bucket for VisitSource {
    const KIND: &'static str = "visit source";
    const ALL: &'static [Self] = &[
        Self::Internet,
        Self::ExternalReferral,
        Self::AcquaintanceReferral,
        Self::Existing,
        Self::Membership,
    ];

    fn label(&self) -> &'static str {
        match self {
            Self::Internet             => "인터넷",
            Self::ExternalReferral     => "외부 소개",
            Self::AcquaintanceReferral => "지인 소개",
            Self::Existing             => "기존",
            Self::Membership           => "회원권",
        }
    }
}

// ── Payment ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "카드", alias = "card")]
    Card,
    #[serde(rename = "계좌이체", alias = "bank_transfer")]
    BankTransfer,
    #[serde(rename = "현금", alias = "cash")]
    Cash,
}

impl Bucket for PaymentMethod {
    const KIND: &'static str = "payment method";
    const ALL: &'static [Self] = &[Self::Card, Self::BankTransfer, Self::Cash];

    fn label(&self) -> &'static str {
        match self {
            Self::Card         => "카드",
            Self::BankTransfer => "계좌이체",
            Self::Cash         => "현금",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentStatus {
    #[serde(rename = "완납", alias = "paid_in_full", alias = "Paid-in-full")]
    PaidInFull,
    #[serde(rename = "예약금", alias = "deposit", alias = "Deposit")]
    Deposit,
    #[serde(rename = "잔금", alias = "balance_due", alias = "Balance-due")]
    BalanceDue,
    #[serde(rename = "환불", alias = "refunded", alias = "Refunded")]
    Refunded,
}

impl Bucket for PaymentStatus {
    const KIND: &'static str = "payment status";
    const ALL: &'static [Self] = &[
        Self::PaidInFull,
        Self::Deposit,
        Self::BalanceDue,
        Self::Refunded,
    ];

    fn label(&self) -> &'static str {
        match self {
            Self::PaidInFull => "완납",
            Self::Deposit    => "예약금",
            Self::BalanceDue => "잔금",
            Self::Refunded   => "환불",
        }
    }
}

// ── Customer grade ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CustomerGrade {
    #[serde(rename = "Standard", alias = "standard")]
    Standard,
    #[serde(rename = "VIP", alias = "vip")]
    Vip,
    #[serde(rename = "VVIP", alias = "vvip")]
    Vvip,
}

impl Bucket for CustomerGrade {
    const KIND: &'static str = "customer grade";
    const ALL: &'static [Self] = &[Self::Standard, Self::Vip, Self::Vvip];

    fn label(&self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::Vip      => "VIP",
            Self::Vvip     => "VVIP",
        }
    }
}

macro_rules! display_as_label {
    ($($ty:ty),*) => {$(
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(self.label())
            }
        }
    )*};
}

display_as_label!(Category, VisitSource, PaymentMethod, PaymentStatus, CustomerGrade);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip_through_from_label() {
        for c in Category::ALL {
            assert_eq!(Category::from_label(c.label()), Some(*c));
        }
        for s in VisitSource::ALL {
            assert_eq!(VisitSource::from_label(s.label()), Some(*s));
        }
        for s in PaymentStatus::ALL {
            assert_eq!(PaymentStatus::from_label(s.label()), Some(*s));
        }
    }

    #[test]
    fn serde_uses_wire_labels() {
        let json = serde_json::to_string(&VisitSource::ExternalReferral).unwrap();
        assert_eq!(json, "\"외부 소개\"");
        let parsed: PaymentStatus = serde_json::from_str("\"refunded\"").unwrap();
        assert_eq!(parsed, PaymentStatus::Refunded);
    }

    #[test]
    fn english_display_labels_are_accepted() {
        let parsed: PaymentStatus = serde_json::from_str("\"Paid-in-full\"").unwrap();
        assert_eq!(parsed, PaymentStatus::PaidInFull);
        let parsed: PaymentStatus = serde_json::from_str("\"Balance-due\"").unwrap();
        assert_eq!(parsed, PaymentStatus::BalanceDue);
        let parsed: Category = serde_json::from_str("\"Skin Procedure\"").unwrap();
        assert_eq!(parsed, Category::SkinProcedure);
        let grade = serde_json::to_string(&CustomerGrade::Standard).unwrap();
        assert_eq!(grade, "\"Standard\"");
    }

    #[test]
    fn unknown_label_is_an_error_only_when_asked() {
        assert_eq!(Category::from_label("성형"), None);
        let err = Category::parse_label("성형").unwrap_err();
        assert!(err.to_string().contains("category"), "got: {err}");
    }

    #[test]
    fn every_procedure_maps_back_to_its_category() {
        for c in Category::ALL {
            for p in c.procedures() {
                assert_eq!(Category::for_procedure(p), Some(*c), "procedure {p}");
            }
        }
    }
}
