use anyhow::Result;
use sea_orm::{ActiveModelTrait, EntityTrait, IntoActiveModel, Set};
use uuid::Uuid;

use super::setup_test_db;
use crate::errors::ModelError;
use crate::role::{self, RoleName};
use crate::{court, police_station, user, user_credentials, violation};

fn unique(prefix: &str) -> String {
    format!("{}{}", prefix, &Uuid::new_v4().simple().to_string()[..8])
}

/// Test role seeding is idempotent
#[tokio::test]
async fn test_roles_seed_idempotent() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let first = role::ensure_all(&db).await?;
    let second = role::ensure_all(&db).await?;
    assert!(first.len() >= 4);
    assert_eq!(first.len(), second.len());
    assert!(role::find_by_name(&db, RoleName::Judge).await?.is_some());
    Ok(())
}

/// Test user + credentials lifecycle
#[tokio::test]
async fn test_user_and_credentials_crud() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };
    role::ensure_all(&db).await?;
    let officer_role = role::find_by_name(&db, RoleName::Officer).await?.expect("role");

    let username = unique("crud_");
    let email = format!("{}@police.gov.pk", username);
    let u = user::create(&db, officer_role.id, &username, &email, "Crud User").await?;
    assert!(u.is_active);

    let found = user::find_by_login(&db, &email.to_uppercase()).await?;
    assert_eq!(found.map(|f| f.id), Some(u.id));

    let c1 = user_credentials::upsert_password(&db, u.id, "hash-one".into(), "argon2").await?;
    let c2 = user_credentials::upsert_password(&db, u.id, "hash-two".into(), "argon2").await?;
    assert_eq!(c1.id, c2.id);
    assert_eq!(c2.password_hash, "hash-two");

    let mut am: user::ActiveModel = u.clone().into();
    am.is_active = Set(false);
    let updated = am.update(&db).await?;
    assert!(!updated.is_active);

    user::Entity::delete_by_id(u.id).exec(&db).await?;
    assert!(user_credentials::find_for_user(&db, u.id).await?.is_none());
    Ok(())
}

/// Test directory entity validation and insert
#[tokio::test]
async fn test_station_court_violation_create() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let code = unique("S").to_uppercase();
    let station = police_station::build(Uuid::new_v4(), &police_station::NewPoliceStation {
        name: "Model Town".into(),
        station_code: code.clone(),
        district: "Lahore".into(),
        province: "Punjab".into(),
        address: None,
        contact_number: None,
    })?
    .into_active_model()
    .reset_all()
    .insert(&db)
    .await?;
    assert_eq!(station.station_code, code);

    let court = court::build(Uuid::new_v4(), &court::NewCourt {
        name: "Civil Court".into(),
        court_type: "Magistrate".into(),
        district: "Lahore".into(),
        address: None,
    })?
    .into_active_model()
    .reset_all()
    .insert(&db)
    .await?;

    let v = violation::build(Uuid::new_v4(), &violation::NewViolation {
        violation_type: unique("Pressure horn "),
        description: "Use of pressure horn".into(),
        penalty_amount: 2000,
        section_of_law: "MVO 1965 s.113".into(),
        is_cognizable: false,
        noise_threshold_db: Some(85.0),
    })?
    .into_active_model()
    .reset_all()
    .insert(&db)
    .await?;
    assert_eq!(v.penalty_amount, 2000);

    let bad = violation::build(Uuid::new_v4(), &violation::NewViolation {
        violation_type: String::new(),
        description: String::new(),
        penalty_amount: 0,
        section_of_law: "x".into(),
        is_cognizable: false,
        noise_threshold_db: None,
    });
    match bad {
        Err(ModelError::Fields(errs)) => assert_eq!(errs.len(), 3),
        other => panic!("expected field errors, got {:?}", other.map(|m| m.id)),
    }

    violation::Entity::delete_by_id(v.id).exec(&db).await?;
    court::Entity::delete_by_id(court.id).exec(&db).await?;
    police_station::Entity::delete_by_id(station.id).exec(&db).await?;
    Ok(())
}
