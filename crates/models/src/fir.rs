use sea_orm::entity::prelude::*;
use uuid::Uuid;
use serde::{Deserialize, Serialize};

use crate::status::FirStatus;
use crate::{challan, police_officer, police_station};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "fir")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub fir_number: String,
    pub station_id: Uuid,
    pub challan_id: Uuid,
    pub informant_officer_id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub investigation_report: Option<String>,
    pub status: FirStatus,
    pub filed_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Station,
    Challan,
    Informant,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Station => Entity::belongs_to(police_station::Entity).from(Column::StationId).to(police_station::Column::Id).into(),
            Relation::Challan => Entity::belongs_to(challan::Entity).from(Column::ChallanId).to(challan::Column::Id).into(),
            Relation::Informant => Entity::belongs_to(police_officer::Entity).from(Column::InformantOfficerId).to(police_officer::Column::Id).into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// `FIR-{STATION}-{YYYY}-{NNNN}`
pub fn format_number(station_code: &str, year: i32, seq: u64) -> String {
    format!("FIR-{}-{}-{:04}", station_code.to_uppercase(), year, seq)
}
