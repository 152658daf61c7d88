use sea_orm::entity::prelude::*;
use uuid::Uuid;
use serde::{Deserialize, Serialize};

use crate::status::CaseStatus;
use crate::{court, fir, judge};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "court_case")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub case_number: String,
    pub fir_id: Uuid,
    pub court_id: Uuid,
    pub judge_id: Option<Uuid>,
    pub case_type: String,
    pub status: CaseStatus,
    pub hearing_date: Option<DateTimeWithTimeZone>,
    #[sea_orm(column_type = "Text", nullable)]
    pub verdict: Option<String>,
    pub verdict_date: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Fir,
    Court,
    Judge,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Fir => Entity::belongs_to(fir::Entity).from(Column::FirId).to(fir::Column::Id).into(),
            Relation::Court => Entity::belongs_to(court::Entity).from(Column::CourtId).to(court::Column::Id).into(),
            Relation::Judge => Entity::belongs_to(judge::Entity).from(Column::JudgeId).to(judge::Column::Id).into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// `CASE-{YYYY}-{NNNNN}`
pub fn format_number(year: i32, seq: u64) -> String {
    format!("CASE-{}-{:05}", year, seq)
}
