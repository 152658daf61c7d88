#![cfg(test)]
use std::sync::Arc;

use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tokio::sync::OnceCell;

use models::db::{connect_with_config, DatabaseConfig};

// Ensure migrations run only once across the entire test process
static MIGRATED: OnceCell<bool> = OnceCell::const_new();

fn test_config() -> DatabaseConfig {
    DatabaseConfig { min_connections: 1, max_connections: 10, connect_timeout_secs: 5, acquire_timeout_secs: 10, ..Default::default() }
}

/// Migrated connection, or `None` when `SKIP_DB_TESTS` is set or no
/// database is reachable.
pub async fn get_db() -> Option<DatabaseConnection> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let migrated = *MIGRATED
        .get_or_init(|| async {
            let db = match connect_with_config(&test_config()).await {
                Ok(db) => db,
                Err(e) => {
                    eprintln!("skip: cannot connect to db: {e}");
                    return false;
                }
            };
            if let Err(e) = migration::Migrator::up(&db, None).await {
                eprintln!("skip: migrate up failed: {e}");
                return false;
            }
            true
        })
        .await;
    if !migrated {
        return None;
    }
    // fresh connection for the current test's runtime
    connect_with_config(&test_config()).await.ok()
}

pub mod fixtures {
    use super::*;

    use chrono::{Duration, Utc};
    use uuid::Uuid;

    use models::{court, iot_device, judge, police_officer, police_station, violation};

    use crate::challan::domain::{AccusedInput, CreateChallanInput, VehicleInput};
    use crate::challan::{ChallanPolicy, ChallanService};
    use crate::emission::domain::CreateEmissionReportInput;
    use crate::repo::memory::InMemoryRepository;

    pub const STATION_CODE: &str = "LHR-GULBERG";
    pub const PENALTY: i64 = 2000;
    pub const PASSWORD: &str = "s3cret-pass";
    /// Address recorded for every accused created by [`issue_challan`].
    pub const DRIVER_EMAIL: &str = "driver@example.com";

    /// Ids of the reference rows every workflow test starts from.
    #[derive(Debug, Clone, Copy)]
    pub struct Seeded {
        pub station_id: Uuid,
        pub officer_id: Uuid,
        pub officer_user_id: Uuid,
        pub device_id: Uuid,
        /// Non-cognizable, fined at [`PENALTY`].
        pub violation_id: Uuid,
        pub cognizable_violation_id: Uuid,
        pub court_id: Uuid,
        pub judge_id: Uuid,
        pub judge_user_id: Uuid,
    }

    pub fn new_station(code: &str) -> police_station::NewPoliceStation {
        police_station::NewPoliceStation {
            name: format!("{code} Police Station"),
            station_code: code.into(),
            district: "Lahore".into(),
            province: "Punjab".into(),
            address: None,
            contact_number: None,
        }
    }

    /// Badge and CNIC are derived from the username so officers in one
    /// repository don't collide.
    pub fn new_officer(station_id: Uuid, username: &str) -> police_officer::NewPoliceOfficer {
        let n: u32 = username.bytes().map(u32::from).sum();
        police_officer::NewPoliceOfficer {
            station_id,
            badge_number: format!("B-{n}"),
            full_name: format!("Officer {username}"),
            cnic: format!("35202-{n:07}-1"),
            rank: "ASI".into(),
            contact_number: None,
            is_investigation_officer: true,
            username: username.into(),
            email: format!("{username}@police.example.com"),
            password: PASSWORD.into(),
            role: None,
        }
    }

    pub fn new_device(station_id: Option<Uuid>, serial: &str) -> iot_device::NewIotDevice {
        iot_device::NewIotDevice {
            station_id,
            device_name: format!("Meter {serial}"),
            serial_number: serial.into(),
            device_type: "sound-meter".into(),
            calibrated_until: Some((Utc::now() + Duration::days(180)).into()),
        }
    }

    pub fn new_violation(kind: &str, cognizable: bool) -> violation::NewViolation {
        violation::NewViolation {
            violation_type: kind.into(),
            description: format!("{kind} above permitted level"),
            penalty_amount: PENALTY,
            section_of_law: "MVO 1965 s.115".into(),
            is_cognizable: cognizable,
            noise_threshold_db: Some(85.0),
        }
    }

    pub fn new_court() -> court::NewCourt {
        court::NewCourt { name: "Civil Court Lahore".into(), court_type: "Civil".into(), district: "Lahore".into(), address: None }
    }

    pub fn new_judge(court_id: Uuid, username: &str) -> judge::NewJudge {
        let n: u32 = username.bytes().map(u32::from).sum();
        judge::NewJudge {
            court_id,
            full_name: format!("Judge {username}"),
            cnic: format!("35201-{n:07}-2"),
            designation: "Civil Judge".into(),
            username: username.into(),
            email: format!("{username}@courts.example.com"),
            password: PASSWORD.into(),
        }
    }

    /// Insert a court directly and return its id.
    pub fn insert_court(repo: &Arc<InMemoryRepository>, name: &str) -> Uuid {
        let input = court::NewCourt { name: name.into(), ..new_court() };
        let row = court::build(Uuid::new_v4(), &input).expect("court fixture");
        let id = row.id;
        repo.put_court(row);
        id
    }

    /// Station, officer, device, two violations, a court and a judge.
    pub fn seed(repo: &Arc<InMemoryRepository>) -> Seeded {
        let station = police_station::build(Uuid::new_v4(), &new_station(STATION_CODE)).expect("station fixture");
        let officer_user_id = Uuid::new_v4();
        let officer = police_officer::build(Uuid::new_v4(), officer_user_id, &new_officer(station.id, "seed.officer"))
            .expect("officer fixture");
        let device = iot_device::build(Uuid::new_v4(), &new_device(Some(station.id), "SN-SEED-1")).expect("device fixture");
        let minor = violation::build(Uuid::new_v4(), &new_violation("Pressure horn", false)).expect("violation fixture");
        let major = violation::build(Uuid::new_v4(), &new_violation("Modified silencer", true)).expect("violation fixture");
        let court_id = insert_court(repo, "Civil Court Lahore");
        let judge_user_id = Uuid::new_v4();
        let judge = judge::build(Uuid::new_v4(), judge_user_id, &new_judge(court_id, "seed.judge")).expect("judge fixture");

        let seeded = Seeded {
            station_id: station.id,
            officer_id: officer.id,
            officer_user_id,
            device_id: device.id,
            violation_id: minor.id,
            cognizable_violation_id: major.id,
            court_id,
            judge_id: judge.id,
            judge_user_id,
        };
        repo.put_station(station);
        repo.put_officer(officer);
        repo.put_device(device);
        repo.put_violation(minor);
        repo.put_violation(major);
        repo.put_judge(judge);
        seeded
    }

    pub fn reading(device_id: Uuid, plate: &str, sound_level_db: f64) -> CreateEmissionReportInput {
        CreateEmissionReportInput {
            device_id,
            vehicle_plate: plate.into(),
            sound_level_db,
            co_level: None,
            co2_level: None,
            hc_level: None,
            nox_level: None,
            measured_at: None,
        }
    }

    /// Issue a challan as the seeded officer with a fresh vehicle and accused.
    pub async fn issue_challan(repo: &Arc<InMemoryRepository>, s: &Seeded, violation_id: Uuid, plate: &str) -> models::challan::Model {
        issue_challan_with_email(repo, s, violation_id, plate, Some(DRIVER_EMAIL)).await
    }

    pub async fn issue_challan_with_email(
        repo: &Arc<InMemoryRepository>,
        s: &Seeded,
        violation_id: Uuid,
        plate: &str,
        email: Option<&str>,
    ) -> models::challan::Model {
        let cnic = format!("{:013}", Uuid::new_v4().as_u128() % 10_000_000_000_000);
        let input = CreateChallanInput {
            violation_id,
            vehicle_id: None,
            vehicle_input: Some(VehicleInput {
                plate_number: plate.into(),
                make: None,
                color: None,
                chassis_number: None,
                engine_number: None,
                registration_year: None,
            }),
            accused_id: None,
            accused_input: Some(AccusedInput {
                full_name: "Test Driver".into(),
                cnic,
                address: None,
                contact_number: None,
                email: email.map(str::to_string),
            }),
            emission_report_id: None,
            location: Some("Canal Road".into()),
            evidence_path: None,
        };
        ChallanService::new(repo.clone(), ChallanPolicy::default())
            .create(s.officer_user_id, input)
            .await
            .expect("challan fixture")
            .challan
    }
}
