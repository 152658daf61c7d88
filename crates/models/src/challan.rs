use sea_orm::entity::prelude::*;
use uuid::Uuid;
use serde::{Deserialize, Serialize};

use crate::status::ChallanStatus;
use crate::{accused, emission_report, police_officer, vehicle, violation};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "challan")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub challan_number: String,
    pub officer_id: Uuid,
    pub accused_id: Uuid,
    pub vehicle_id: Uuid,
    pub violation_id: Uuid,
    pub emission_report_id: Option<Uuid>,
    pub penalty_amount: i64,
    pub location: Option<String>,
    pub evidence_path: Option<String>,
    pub status: ChallanStatus,
    pub issued_at: DateTimeWithTimeZone,
    pub due_date: DateTimeWithTimeZone,
    pub paid_at: Option<DateTimeWithTimeZone>,
    pub digital_signature: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Officer,
    Accused,
    Vehicle,
    Violation,
    EmissionReport,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Officer => Entity::belongs_to(police_officer::Entity).from(Column::OfficerId).to(police_officer::Column::Id).into(),
            Relation::Accused => Entity::belongs_to(accused::Entity).from(Column::AccusedId).to(accused::Column::Id).into(),
            Relation::Vehicle => Entity::belongs_to(vehicle::Entity).from(Column::VehicleId).to(vehicle::Column::Id).into(),
            Relation::Violation => Entity::belongs_to(violation::Entity).from(Column::ViolationId).to(violation::Column::Id).into(),
            Relation::EmissionReport => Entity::belongs_to(emission_report::Entity).from(Column::EmissionReportId).to(emission_report::Column::Id).into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn signed_fields(&self) -> Vec<String> {
        vec![
            self.challan_number.clone(),
            self.officer_id.to_string(),
            self.accused_id.to_string(),
            self.vehicle_id.to_string(),
            self.violation_id.to_string(),
            self.emission_report_id.map(|id| id.to_string()).unwrap_or_default(),
            self.penalty_amount.to_string(),
            self.issued_at.timestamp().to_string(),
        ]
    }

    pub fn compute_signature(&self) -> String {
        let fields = self.signed_fields();
        let refs: Vec<&str> = fields.iter().map(String::as_str).collect();
        common::crypto::digest_fields(&refs)
    }

    /// Unpaid past its due date. Never stored; derived on read.
    pub fn is_overdue(&self, now: DateTimeWithTimeZone) -> bool {
        self.status == ChallanStatus::Unpaid && self.due_date < now
    }
}
