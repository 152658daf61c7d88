use sea_orm::{entity::prelude::*, ConnectionTrait, Iterable, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum RoleName {
    #[sea_orm(string_value = "Admin")]
    Admin,
    #[sea_orm(string_value = "StationChief")]
    StationChief,
    #[sea_orm(string_value = "Officer")]
    Officer,
    #[sea_orm(string_value = "Judge")]
    Judge,
}

impl RoleName {
    pub fn as_str(self) -> &'static str {
        match self {
            RoleName::Admin => "Admin",
            RoleName::StationChief => "StationChief",
            RoleName::Officer => "Officer",
            RoleName::Judge => "Judge",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            RoleName::Admin => "System administrator",
            RoleName::StationChief => "Station house officer; files FIRs",
            RoleName::Officer => "Field officer; records emissions and issues challans",
            RoleName::Judge => "Adjudicates court cases",
        }
    }

    /// Police roles are the ones backed by a `police_officer` row.
    pub fn is_police(self) -> bool {
        matches!(self, RoleName::Officer | RoleName::StationChief)
    }
}

impl std::str::FromStr for RoleName {
    type Err = errors::ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| errors::ModelError::Validation(format!("unknown role: {s}")))
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "role")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: RoleName,
    pub description: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { panic!("no relations defined here") }
}

impl ActiveModelBehavior for ActiveModel {}

/// Insert any missing roles; returns every role row.
pub async fn ensure_all<C: ConnectionTrait>(db: &C) -> Result<Vec<Model>, errors::ModelError> {
    let existing = Entity::find().all(db).await?;
    let mut out = existing.clone();
    for name in RoleName::iter() {
        if existing.iter().any(|r| r.name == name) {
            continue;
        }
        let am = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name),
            description: Set(name.description().to_string()),
        };
        out.push(am.insert(db).await?);
    }
    Ok(out)
}

pub async fn find_by_name<C: ConnectionTrait>(db: &C, name: RoleName) -> Result<Option<Model>, errors::ModelError> {
    Ok(Entity::find().filter(Column::Name.eq(name)).one(db).await?)
}
