use sea_orm::entity::prelude::*;
use uuid::Uuid;
use serde::{Deserialize, Serialize};

use crate::{court_case, user};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "case_statement")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub case_id: Uuid,
    pub statement_by: String,
    #[sea_orm(column_type = "Text")]
    pub statement_text: String,
    pub statement_date: DateTimeWithTimeZone,
    pub recorded_by: Option<Uuid>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Case,
    RecordedBy,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Case => Entity::belongs_to(court_case::Entity).from(Column::CaseId).to(court_case::Column::Id).into(),
            Relation::RecordedBy => Entity::belongs_to(user::Entity).from(Column::RecordedBy).to(user::Column::Id).into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}
