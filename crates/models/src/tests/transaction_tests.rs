use anyhow::Result;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, Set, TransactionTrait};
use uuid::Uuid;

use super::setup_test_db;
use crate::{accused, vehicle};

fn accused_am(id: Uuid, cnic: &str) -> accused::ActiveModel {
    accused::ActiveModel {
        id: Set(id),
        full_name: Set("Tx Accused".into()),
        cnic: Set(cnic.to_string()),
        address: Set(None),
        contact_number: Set(None),
        email: Set(None),
        created_at: Set(Utc::now().into()),
    }
}

fn random_cnic() -> String {
    let digits: String = Uuid::new_v4().as_u128().to_string().chars().take(13).collect();
    crate::validation::normalize_cnic(&digits).expect("13 digits")
}

/// Accused and vehicle written in one transaction are both visible after commit
#[tokio::test]
async fn test_transaction_commit() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let accused_id = Uuid::new_v4();
    let vehicle_id = Uuid::new_v4();
    let plate = format!("TX-{}", &Uuid::new_v4().simple().to_string()[..6]).to_uppercase();

    let txn = db.begin().await?;
    accused_am(accused_id, &random_cnic()).insert(&txn).await?;
    vehicle::ActiveModel {
        id: Set(vehicle_id),
        plate_number: Set(plate.clone()),
        make: Set(None),
        color: Set(None),
        chassis_number: Set(None),
        engine_number: Set(None),
        registration_year: Set(None),
        owner_id: Set(Some(accused_id)),
        created_at: Set(Utc::now().into()),
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;

    let v = vehicle::find_by_plate(&db, &plate.to_lowercase()).await?.expect("vehicle");
    assert_eq!(v.owner_id, Some(accused_id));

    vehicle::Entity::delete_by_id(vehicle_id).exec(&db).await?;
    accused::Entity::delete_by_id(accused_id).exec(&db).await?;
    Ok(())
}

/// Rolled back inserts leave nothing behind
#[tokio::test]
async fn test_transaction_rollback() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let accused_id = Uuid::new_v4();
    let cnic = random_cnic();
    let txn = db.begin().await?;
    accused_am(accused_id, &cnic).insert(&txn).await?;
    txn.rollback().await?;

    assert!(accused::Entity::find_by_id(accused_id).one(&db).await?.is_none());
    assert!(accused::find_by_cnic(&db, &cnic).await?.is_none());
    Ok(())
}
