use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use models::status::CaseStatus;
use models::{case_statement, court_case};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCaseInput {
    pub fir_id: Uuid,
    pub court_id: Uuid,
    #[serde(default)]
    pub judge_id: Option<Uuid>,
    pub case_type: String,
    #[serde(default)]
    pub hearing_date: Option<DateTimeWithTimeZone>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleHearingInput {
    pub hearing_date: DateTimeWithTimeZone,
    /// Judge to assign when the case has none yet.
    #[serde(default)]
    pub judge_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddStatementInput {
    pub statement_by: String,
    pub statement_text: String,
    #[serde(default)]
    pub statement_date: Option<DateTimeWithTimeZone>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordVerdictInput {
    pub verdict: String,
    /// Close the case as `Dismissed` instead of `Decided`.
    #[serde(default)]
    pub dismissed: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CaseFilter {
    pub court_id: Option<Uuid>,
    pub judge_id: Option<Uuid>,
    pub status: Option<CaseStatus>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CaseDetail {
    #[serde(flatten)]
    pub case: court_case::Model,
    pub statements: Vec<case_statement::Model>,
}
