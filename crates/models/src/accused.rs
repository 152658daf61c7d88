use sea_orm::{entity::prelude::*, ConnectionTrait};
use uuid::Uuid;
use serde::{Deserialize, Serialize};

use crate::errors;
use crate::validation::normalize_cnic;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "accused")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub full_name: String,
    pub cnic: String,
    pub address: Option<String>,
    pub contact_number: Option<String>,
    pub email: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { panic!("no relations defined here") }
}

impl ActiveModelBehavior for ActiveModel {}

/// Lookup by CNIC in any accepted spelling.
pub async fn find_by_cnic<C: ConnectionTrait>(db: &C, cnic: &str) -> Result<Option<Model>, errors::ModelError> {
    let Some(norm) = normalize_cnic(cnic) else { return Ok(None) };
    Ok(Entity::find().filter(Column::Cnic.eq(norm)).one(db).await?)
}
