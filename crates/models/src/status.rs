//! Lifecycle states stored as string columns, with their allowed transitions.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum ChallanStatus {
    #[sea_orm(string_value = "Unpaid")]
    Unpaid,
    #[sea_orm(string_value = "Paid")]
    Paid,
    #[sea_orm(string_value = "Disputed")]
    Disputed,
    #[sea_orm(string_value = "Cancelled")]
    Cancelled,
}

impl ChallanStatus {
    pub fn can_transition_to(self, next: ChallanStatus) -> bool {
        use ChallanStatus::*;
        matches!(
            (self, next),
            (Unpaid, Paid) | (Unpaid, Disputed) | (Unpaid, Cancelled)
                | (Disputed, Unpaid) | (Disputed, Paid) | (Disputed, Cancelled)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(24))")]
pub enum FirStatus {
    #[sea_orm(string_value = "Filed")]
    Filed,
    #[sea_orm(string_value = "UnderInvestigation")]
    UnderInvestigation,
    #[sea_orm(string_value = "ForwardedToCourt")]
    ForwardedToCourt,
    #[sea_orm(string_value = "Closed")]
    Closed,
}

impl FirStatus {
    pub fn can_transition_to(self, next: FirStatus) -> bool {
        use FirStatus::*;
        matches!(
            (self, next),
            (Filed, UnderInvestigation) | (Filed, ForwardedToCourt) | (Filed, Closed)
                | (UnderInvestigation, ForwardedToCourt) | (UnderInvestigation, Closed)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum CaseStatus {
    #[sea_orm(string_value = "Pending")]
    Pending,
    #[sea_orm(string_value = "Hearing")]
    Hearing,
    #[sea_orm(string_value = "Decided")]
    Decided,
    #[sea_orm(string_value = "Dismissed")]
    Dismissed,
}

impl CaseStatus {
    /// Re-scheduling a hearing keeps the case in `Hearing`.
    pub fn can_transition_to(self, next: CaseStatus) -> bool {
        use CaseStatus::*;
        matches!(
            (self, next),
            (Pending, Hearing) | (Pending, Dismissed)
                | (Hearing, Hearing) | (Hearing, Decided) | (Hearing, Dismissed)
        )
    }

    pub fn is_closed(self) -> bool {
        matches!(self, CaseStatus::Decided | CaseStatus::Dismissed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum EmissionClassification {
    #[sea_orm(string_value = "Compliant")]
    Compliant,
    #[sea_orm(string_value = "Violation")]
    Violation,
}

impl EmissionClassification {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Compliant => "Compliant",
            Self::Violation => "Violation",
        }
    }

    /// Readings strictly above the limit are violations.
    pub fn classify(sound_level_db: f64, limit_db: f64) -> Self {
        if sound_level_db > limit_db { Self::Violation } else { Self::Compliant }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum OtpPurpose {
    #[sea_orm(string_value = "PasswordReset")]
    PasswordReset,
    #[sea_orm(string_value = "StatusLookup")]
    StatusLookup,
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::Iterable;

    #[test]
    fn challan_paid_and_cancelled_are_terminal() {
        for next in ChallanStatus::iter() {
            assert!(!ChallanStatus::Paid.can_transition_to(next));
            assert!(!ChallanStatus::Cancelled.can_transition_to(next));
        }
        assert!(ChallanStatus::Unpaid.can_transition_to(ChallanStatus::Disputed));
        assert!(ChallanStatus::Disputed.can_transition_to(ChallanStatus::Unpaid));
        assert!(!ChallanStatus::Unpaid.can_transition_to(ChallanStatus::Unpaid));
    }

    #[test]
    fn fir_cannot_reopen() {
        assert!(!FirStatus::Closed.can_transition_to(FirStatus::Filed));
        assert!(!FirStatus::ForwardedToCourt.can_transition_to(FirStatus::UnderInvestigation));
        assert!(FirStatus::Filed.can_transition_to(FirStatus::ForwardedToCourt));
    }

    #[test]
    fn case_hearing_can_be_rescheduled_but_not_after_verdict() {
        assert!(CaseStatus::Hearing.can_transition_to(CaseStatus::Hearing));
        assert!(!CaseStatus::Decided.can_transition_to(CaseStatus::Hearing));
        assert!(!CaseStatus::Pending.can_transition_to(CaseStatus::Decided));
        assert!(CaseStatus::Dismissed.is_closed());
    }

    #[test]
    fn classification_threshold_is_exclusive() {
        assert_eq!(EmissionClassification::classify(85.0, 85.0), EmissionClassification::Compliant);
        assert_eq!(EmissionClassification::classify(85.1, 85.0), EmissionClassification::Violation);
    }

    #[test]
    fn statuses_serialize_as_names() {
        assert_eq!(serde_json::to_string(&ChallanStatus::Unpaid).unwrap(), "\"Unpaid\"");
        let s: FirStatus = serde_json::from_str("\"UnderInvestigation\"").unwrap();
        assert_eq!(s, FirStatus::UnderInvestigation);
    }
}
