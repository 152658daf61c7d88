use sea_orm::entity::prelude::*;
use uuid::Uuid;
use serde::{Deserialize, Serialize};

use crate::status::EmissionClassification;
use crate::{iot_device, police_officer};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "emission_report")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub device_id: Uuid,
    pub officer_id: Option<Uuid>,
    pub vehicle_plate: String,
    pub sound_level_db: f64,
    pub co_level: Option<f64>,
    pub co2_level: Option<f64>,
    pub hc_level: Option<f64>,
    pub nox_level: Option<f64>,
    pub classification: EmissionClassification,
    pub measured_at: DateTimeWithTimeZone,
    pub digital_signature: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Device,
    Officer,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Device => Entity::belongs_to(iot_device::Entity).from(Column::DeviceId).to(iot_device::Column::Id).into(),
            Relation::Officer => Entity::belongs_to(police_officer::Entity).from(Column::OfficerId).to(police_officer::Column::Id).into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Canonical field values covered by the digital signature, in order.
    pub fn signed_fields(&self) -> Vec<String> {
        use common::crypto::canonical_f64;
        vec![
            self.id.to_string(),
            self.device_id.to_string(),
            self.vehicle_plate.clone(),
            canonical_f64(Some(self.sound_level_db)),
            canonical_f64(self.co_level),
            canonical_f64(self.co2_level),
            canonical_f64(self.hc_level),
            canonical_f64(self.nox_level),
            self.classification.as_str().to_string(),
            self.measured_at.timestamp().to_string(),
        ]
    }

    pub fn compute_signature(&self) -> String {
        let fields = self.signed_fields();
        let refs: Vec<&str> = fields.iter().map(String::as_str).collect();
        common::crypto::digest_fields(&refs)
    }
}
