use sea_orm::{entity::prelude::*, ConnectionTrait};
use uuid::Uuid;
use serde::{Deserialize, Serialize};

use crate::accused;
use crate::errors;
use crate::validation::normalize_plate;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vehicle")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub plate_number: String,
    pub make: Option<String>,
    pub color: Option<String>,
    pub chassis_number: Option<String>,
    pub engine_number: Option<String>,
    pub registration_year: Option<i32>,
    pub owner_id: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Owner }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Owner => Entity::belongs_to(accused::Entity).from(Column::OwnerId).to(accused::Column::Id).into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn find_by_plate<C: ConnectionTrait>(db: &C, plate: &str) -> Result<Option<Model>, errors::ModelError> {
    let Some(norm) = normalize_plate(plate) else { return Ok(None) };
    Ok(Entity::find().filter(Column::PlateNumber.eq(norm)).one(db).await?)
}
