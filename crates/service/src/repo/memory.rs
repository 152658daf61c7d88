//! In-memory implementation of every workflow repository.
//!
//! Mirrors the relational constraints that matter to the services: unique
//! keys surface as `Conflict`, restricted deletes refuse while referenced,
//! and multi-row writes apply all-or-nothing.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{Datelike, Utc};
use sea_orm::prelude::DateTimeWithTimeZone;
use uuid::Uuid;

use models::role::RoleName;
use models::validation::normalize_email;
use models::status::OtpPurpose;
use models::{
    accused, case_statement, challan, court, court_case, emission_report, fir, iot_device, judge, otp_token,
    police_officer, police_station, vehicle, violation,
};

use crate::auth::domain::{AuthUser, Credentials, NewAccount};
use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;
use crate::case::domain::CaseFilter;
use crate::case::CaseRepository;
use crate::challan::domain::ChallanFilter;
use crate::challan::repository::{ChallanIssue, ChallanRepository};
use crate::directory::DirectoryRepository;
use crate::emission::domain::EmissionFilter;
use crate::emission::EmissionRepository;
use crate::errors::ServiceError;
use crate::fir::domain::FirFilter;
use crate::fir::FirRepository;
use crate::lookup::RecordLookup;
use crate::otp::OtpRepository;
use crate::pagination::{Page, Pagination};
use crate::public::PublicRepository;

#[derive(Default)]
struct State {
    accounts: HashMap<Uuid, (NewAccount, Credentials)>,
    disabled: HashSet<Uuid>,
    stations: HashMap<Uuid, police_station::Model>,
    officers: HashMap<Uuid, police_officer::Model>,
    devices: HashMap<Uuid, iot_device::Model>,
    violations: HashMap<Uuid, violation::Model>,
    courts: HashMap<Uuid, court::Model>,
    judges: HashMap<Uuid, judge::Model>,
    accused: HashMap<Uuid, accused::Model>,
    vehicles: HashMap<Uuid, vehicle::Model>,
    reports: HashMap<Uuid, emission_report::Model>,
    challans: HashMap<Uuid, challan::Model>,
    firs: HashMap<Uuid, fir::Model>,
    cases: HashMap<Uuid, court_case::Model>,
    statements: Vec<case_statement::Model>,
    otps: Vec<otp_token::Model>,
    fail_next_write: bool,
}

impl State {
    fn check_write(&mut self) -> Result<(), ServiceError> {
        if std::mem::take(&mut self.fail_next_write) {
            return Err(ServiceError::Db("simulated write failure".into()));
        }
        Ok(())
    }

    fn check_account(&self, account: &NewAccount) -> Result<(), ServiceError> {
        let taken = self
            .accounts
            .values()
            .any(|(a, _)| a.username == account.username || a.email.eq_ignore_ascii_case(&account.email));
        if taken { Err(conflict()) } else { Ok(()) }
    }
}

fn conflict() -> ServiceError { ServiceError::Conflict("record already exists".into()) }

fn in_use() -> ServiceError { ServiceError::Conflict("record is still referenced by other records".into()) }

fn missing(entity: &str) -> ServiceError { ServiceError::not_found(entity) }

/// Sort newest first by the given timestamp, then page.
fn newest_first<T, K: Ord>(mut rows: Vec<T>, key: impl Fn(&T) -> K, page: Pagination) -> Page<T> {
    rows.sort_by(|a, b| key(b).cmp(&key(a)));
    Page::from_vec(rows, page)
}

#[derive(Default)]
pub struct InMemoryRepository {
    state: Mutex<State>,
}

impl InMemoryRepository {
    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn put_station(&self, row: police_station::Model) { self.state().stations.insert(row.id, row); }
    pub fn put_officer(&self, row: police_officer::Model) { self.state().officers.insert(row.id, row); }
    pub fn put_device(&self, row: iot_device::Model) { self.state().devices.insert(row.id, row); }
    pub fn put_violation(&self, row: violation::Model) { self.state().violations.insert(row.id, row); }
    pub fn put_court(&self, row: court::Model) { self.state().courts.insert(row.id, row); }
    pub fn put_judge(&self, row: judge::Model) { self.state().judges.insert(row.id, row); }

    /// Role of a login account created through the directory, if it exists.
    pub fn account_role(&self, user_id: Uuid) -> Option<RoleName> {
        self.state().accounts.get(&user_id).map(|(a, _)| a.role)
    }

    pub fn set_account_active(&self, user_id: Uuid, active: bool) {
        let mut s = self.state();
        if active { s.disabled.remove(&user_id); } else { s.disabled.insert(user_id); }
    }

    pub fn vehicle_count(&self) -> usize { self.state().vehicles.len() }
    pub fn accused_count(&self) -> usize { self.state().accused.len() }

    /// Make the next write fail without applying anything.
    pub fn fail_next_write(&self) { self.state().fail_next_write = true; }

    pub fn set_device_active(&self, id: Uuid, active: bool) {
        if let Some(d) = self.state().devices.get_mut(&id) { d.is_active = active; }
    }

    pub fn set_judge_active(&self, id: Uuid, active: bool) {
        if let Some(j) = self.state().judges.get_mut(&id) { j.is_active = active; }
    }

    /// Edit a stored report in place, bypassing the service.
    pub fn tamper_report(&self, id: Uuid, f: impl FnOnce(&mut emission_report::Model)) {
        if let Some(r) = self.state().reports.get_mut(&id) { f(r); }
    }

    pub fn tamper_challan(&self, id: Uuid, f: impl FnOnce(&mut challan::Model)) {
        if let Some(c) = self.state().challans.get_mut(&id) { f(c); }
    }

    pub fn tamper_fir(&self, id: Uuid, f: impl FnOnce(&mut fir::Model)) {
        if let Some(x) = self.state().firs.get_mut(&id) { f(x); }
    }
}

#[async_trait]
impl RecordLookup for InMemoryRepository {
    async fn officer(&self, id: Uuid) -> Result<Option<police_officer::Model>, ServiceError> {
        Ok(self.state().officers.get(&id).cloned())
    }

    async fn officer_by_user(&self, user_id: Uuid) -> Result<Option<police_officer::Model>, ServiceError> {
        Ok(self.state().officers.values().find(|o| o.user_id == user_id).cloned())
    }

    async fn station(&self, id: Uuid) -> Result<Option<police_station::Model>, ServiceError> {
        Ok(self.state().stations.get(&id).cloned())
    }

    async fn device(&self, id: Uuid) -> Result<Option<iot_device::Model>, ServiceError> {
        Ok(self.state().devices.get(&id).cloned())
    }

    async fn violation(&self, id: Uuid) -> Result<Option<violation::Model>, ServiceError> {
        Ok(self.state().violations.get(&id).cloned())
    }

    async fn court(&self, id: Uuid) -> Result<Option<court::Model>, ServiceError> {
        Ok(self.state().courts.get(&id).cloned())
    }

    async fn judge(&self, id: Uuid) -> Result<Option<judge::Model>, ServiceError> {
        Ok(self.state().judges.get(&id).cloned())
    }

    async fn judge_by_user(&self, user_id: Uuid) -> Result<Option<judge::Model>, ServiceError> {
        Ok(self.state().judges.values().find(|j| j.user_id == user_id).cloned())
    }

    async fn accused(&self, id: Uuid) -> Result<Option<accused::Model>, ServiceError> {
        Ok(self.state().accused.get(&id).cloned())
    }

    async fn accused_by_cnic(&self, cnic: &str) -> Result<Option<accused::Model>, ServiceError> {
        Ok(self.state().accused.values().find(|a| a.cnic == cnic).cloned())
    }

    async fn vehicle(&self, id: Uuid) -> Result<Option<vehicle::Model>, ServiceError> {
        Ok(self.state().vehicles.get(&id).cloned())
    }

    async fn vehicle_by_plate(&self, plate: &str) -> Result<Option<vehicle::Model>, ServiceError> {
        Ok(self.state().vehicles.values().find(|v| v.plate_number == plate).cloned())
    }

    async fn emission_report(&self, id: Uuid) -> Result<Option<emission_report::Model>, ServiceError> {
        Ok(self.state().reports.get(&id).cloned())
    }

    async fn challan(&self, id: Uuid) -> Result<Option<challan::Model>, ServiceError> {
        Ok(self.state().challans.get(&id).cloned())
    }

    async fn challan_for_report(&self, report_id: Uuid) -> Result<Option<challan::Model>, ServiceError> {
        Ok(self.state().challans.values().find(|c| c.emission_report_id == Some(report_id)).cloned())
    }

    async fn fir(&self, id: Uuid) -> Result<Option<fir::Model>, ServiceError> {
        Ok(self.state().firs.get(&id).cloned())
    }

    async fn fir_for_challan(&self, challan_id: Uuid) -> Result<Option<fir::Model>, ServiceError> {
        Ok(self.state().firs.values().find(|f| f.challan_id == challan_id).cloned())
    }

    async fn court_case(&self, id: Uuid) -> Result<Option<court_case::Model>, ServiceError> {
        Ok(self.state().cases.get(&id).cloned())
    }

    async fn case_for_fir(&self, fir_id: Uuid) -> Result<Option<court_case::Model>, ServiceError> {
        Ok(self.state().cases.values().find(|c| c.fir_id == fir_id).cloned())
    }
}

#[async_trait]
impl DirectoryRepository for InMemoryRepository {
    async fn insert_station(&self, row: police_station::Model) -> Result<police_station::Model, ServiceError> {
        let mut s = self.state();
        s.check_write()?;
        if s.stations.values().any(|x| x.station_code == row.station_code) {
            return Err(conflict());
        }
        s.stations.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update_station(&self, row: police_station::Model) -> Result<police_station::Model, ServiceError> {
        let mut s = self.state();
        s.check_write()?;
        let slot = s.stations.get_mut(&row.id).ok_or_else(|| missing("police station"))?;
        *slot = row.clone();
        Ok(row)
    }

    async fn delete_station(&self, id: Uuid) -> Result<bool, ServiceError> {
        let mut s = self.state();
        if s.officers.values().any(|o| o.station_id == id) || s.firs.values().any(|f| f.station_id == id) {
            return Err(in_use());
        }
        for d in s.devices.values_mut().filter(|d| d.station_id == Some(id)) {
            d.station_id = None;
        }
        Ok(s.stations.remove(&id).is_some())
    }

    async fn list_stations(&self, page: Pagination) -> Result<Page<police_station::Model>, ServiceError> {
        let rows = self.state().stations.values().cloned().collect();
        Ok(newest_first(rows, |r: &police_station::Model| r.created_at, page))
    }

    async fn insert_officer(&self, account: NewAccount, credentials: Credentials, row: police_officer::Model) -> Result<police_officer::Model, ServiceError> {
        let mut s = self.state();
        s.check_write()?;
        s.check_account(&account)?;
        if s.officers.values().any(|o| o.badge_number == row.badge_number || o.cnic == row.cnic) {
            return Err(conflict());
        }
        s.accounts.insert(account.id, (account, credentials));
        s.officers.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update_officer(&self, row: police_officer::Model) -> Result<police_officer::Model, ServiceError> {
        let mut s = self.state();
        s.check_write()?;
        let slot = s.officers.get_mut(&row.id).ok_or_else(|| missing("police officer"))?;
        *slot = row.clone();
        Ok(row)
    }

    async fn delete_officer(&self, id: Uuid) -> Result<bool, ServiceError> {
        let mut s = self.state();
        let referenced = s.challans.values().any(|c| c.officer_id == id)
            || s.firs.values().any(|f| f.informant_officer_id == id);
        if referenced {
            return Err(in_use());
        }
        let Some(row) = s.officers.remove(&id) else { return Ok(false) };
        for r in s.reports.values_mut().filter(|r| r.officer_id == Some(id)) {
            r.officer_id = None;
        }
        s.accounts.remove(&row.user_id);
        Ok(true)
    }

    async fn list_officers(&self, station_id: Option<Uuid>, page: Pagination) -> Result<Page<police_officer::Model>, ServiceError> {
        let rows = self
            .state()
            .officers
            .values()
            .filter(|o| station_id.map_or(true, |s| o.station_id == s))
            .cloned()
            .collect();
        Ok(newest_first(rows, |r: &police_officer::Model| r.created_at, page))
    }

    async fn insert_device(&self, row: iot_device::Model) -> Result<iot_device::Model, ServiceError> {
        let mut s = self.state();
        s.check_write()?;
        if s.devices.values().any(|d| d.serial_number == row.serial_number) {
            return Err(conflict());
        }
        s.devices.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update_device(&self, row: iot_device::Model) -> Result<iot_device::Model, ServiceError> {
        let mut s = self.state();
        s.check_write()?;
        let slot = s.devices.get_mut(&row.id).ok_or_else(|| missing("IoT device"))?;
        *slot = row.clone();
        Ok(row)
    }

    async fn delete_device(&self, id: Uuid) -> Result<bool, ServiceError> {
        let mut s = self.state();
        if s.reports.values().any(|r| r.device_id == id) {
            return Err(in_use());
        }
        Ok(s.devices.remove(&id).is_some())
    }

    async fn list_devices(&self, station_id: Option<Uuid>, page: Pagination) -> Result<Page<iot_device::Model>, ServiceError> {
        let rows = self
            .state()
            .devices
            .values()
            .filter(|d| station_id.map_or(true, |s| d.station_id == Some(s)))
            .cloned()
            .collect();
        Ok(newest_first(rows, |r: &iot_device::Model| r.created_at, page))
    }

    async fn insert_violation(&self, row: violation::Model) -> Result<violation::Model, ServiceError> {
        let mut s = self.state();
        s.check_write()?;
        if s.violations.values().any(|v| v.violation_type == row.violation_type) {
            return Err(conflict());
        }
        s.violations.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update_violation(&self, row: violation::Model) -> Result<violation::Model, ServiceError> {
        let mut s = self.state();
        s.check_write()?;
        let slot = s.violations.get_mut(&row.id).ok_or_else(|| missing("violation"))?;
        *slot = row.clone();
        Ok(row)
    }

    async fn delete_violation(&self, id: Uuid) -> Result<bool, ServiceError> {
        let mut s = self.state();
        if s.challans.values().any(|c| c.violation_id == id) {
            return Err(in_use());
        }
        Ok(s.violations.remove(&id).is_some())
    }

    async fn list_violations(&self, page: Pagination) -> Result<Page<violation::Model>, ServiceError> {
        let rows = self.state().violations.values().cloned().collect();
        Ok(newest_first(rows, |r: &violation::Model| r.created_at, page))
    }

    async fn insert_court(&self, row: court::Model) -> Result<court::Model, ServiceError> {
        let mut s = self.state();
        s.check_write()?;
        s.courts.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update_court(&self, row: court::Model) -> Result<court::Model, ServiceError> {
        let mut s = self.state();
        s.check_write()?;
        let slot = s.courts.get_mut(&row.id).ok_or_else(|| missing("court"))?;
        *slot = row.clone();
        Ok(row)
    }

    async fn delete_court(&self, id: Uuid) -> Result<bool, ServiceError> {
        let mut s = self.state();
        if s.judges.values().any(|j| j.court_id == id) || s.cases.values().any(|c| c.court_id == id) {
            return Err(in_use());
        }
        Ok(s.courts.remove(&id).is_some())
    }

    async fn list_courts(&self, page: Pagination) -> Result<Page<court::Model>, ServiceError> {
        let rows = self.state().courts.values().cloned().collect();
        Ok(newest_first(rows, |r: &court::Model| r.created_at, page))
    }

    async fn insert_judge(&self, account: NewAccount, credentials: Credentials, row: judge::Model) -> Result<judge::Model, ServiceError> {
        let mut s = self.state();
        s.check_write()?;
        s.check_account(&account)?;
        if s.judges.values().any(|j| j.cnic == row.cnic) {
            return Err(conflict());
        }
        s.accounts.insert(account.id, (account, credentials));
        s.judges.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update_judge(&self, row: judge::Model) -> Result<judge::Model, ServiceError> {
        let mut s = self.state();
        s.check_write()?;
        let slot = s.judges.get_mut(&row.id).ok_or_else(|| missing("judge"))?;
        *slot = row.clone();
        Ok(row)
    }

    async fn delete_judge(&self, id: Uuid) -> Result<bool, ServiceError> {
        let mut s = self.state();
        let Some(row) = s.judges.remove(&id) else { return Ok(false) };
        for c in s.cases.values_mut().filter(|c| c.judge_id == Some(id)) {
            c.judge_id = None;
        }
        s.accounts.remove(&row.user_id);
        Ok(true)
    }

    async fn list_judges(&self, court_id: Option<Uuid>, page: Pagination) -> Result<Page<judge::Model>, ServiceError> {
        let rows = self
            .state()
            .judges
            .values()
            .filter(|j| court_id.map_or(true, |c| j.court_id == c))
            .cloned()
            .collect();
        Ok(newest_first(rows, |r: &judge::Model| r.created_at, page))
    }
}

#[async_trait]
impl EmissionRepository for InMemoryRepository {
    async fn insert_report(&self, row: emission_report::Model) -> Result<emission_report::Model, ServiceError> {
        let mut s = self.state();
        s.check_write()?;
        s.reports.insert(row.id, row.clone());
        Ok(row)
    }

    async fn list_reports(&self, filter: &EmissionFilter, page: Pagination) -> Result<Page<emission_report::Model>, ServiceError> {
        let rows = self
            .state()
            .reports
            .values()
            .filter(|r| filter.device_id.map_or(true, |d| r.device_id == d))
            .filter(|r| filter.vehicle_plate.as_deref().map_or(true, |p| r.vehicle_plate == p))
            .filter(|r| filter.classification.map_or(true, |c| r.classification == c))
            .cloned()
            .collect();
        Ok(newest_first(rows, |r: &emission_report::Model| r.measured_at, page))
    }
}

#[async_trait]
impl ChallanRepository for InMemoryRepository {
    async fn issue_challan(&self, issue: ChallanIssue) -> Result<challan::Model, ServiceError> {
        let mut s = self.state();
        s.check_write()?;
        let c = &issue.challan;
        let duplicate = s.challans.values().any(|x| {
            x.challan_number == c.challan_number || (c.emission_report_id.is_some() && x.emission_report_id == c.emission_report_id)
        });
        let dup_accused = issue.new_accused.as_ref().is_some_and(|a| s.accused.values().any(|x| x.cnic == a.cnic));
        let dup_vehicle = issue.new_vehicle.as_ref().is_some_and(|v| s.vehicles.values().any(|x| x.plate_number == v.plate_number));
        if duplicate || dup_accused || dup_vehicle {
            return Err(conflict());
        }
        if let Some(a) = issue.new_accused {
            s.accused.insert(a.id, a);
        }
        if let Some(v) = issue.new_vehicle {
            s.vehicles.insert(v.id, v);
        }
        s.challans.insert(issue.challan.id, issue.challan.clone());
        Ok(issue.challan)
    }

    async fn update_challan(&self, row: challan::Model) -> Result<challan::Model, ServiceError> {
        let mut s = self.state();
        s.check_write()?;
        let slot = s.challans.get_mut(&row.id).ok_or_else(|| missing("challan"))?;
        *slot = row.clone();
        Ok(row)
    }

    async fn list_challans(&self, filter: &ChallanFilter, page: Pagination) -> Result<Page<challan::Model>, ServiceError> {
        let s = self.state();
        let vehicle_id = match filter.vehicle_plate.as_deref() {
            Some(p) => match s.vehicles.values().find(|v| v.plate_number == p) {
                Some(v) => Some(v.id),
                None => return Ok(Page::new(Vec::new(), page, 0)),
            },
            None => None,
        };
        let accused_id = match filter.cnic.as_deref() {
            Some(cnic) => match s.accused.values().find(|a| a.cnic == cnic) {
                Some(a) => Some(a.id),
                None => return Ok(Page::new(Vec::new(), page, 0)),
            },
            None => None,
        };
        let rows = s
            .challans
            .values()
            .filter(|c| filter.officer_id.map_or(true, |o| c.officer_id == o))
            .filter(|c| {
                filter.station_id.map_or(true, |st| s.officers.get(&c.officer_id).is_some_and(|o| o.station_id == st))
            })
            .filter(|c| filter.status.map_or(true, |st| c.status == st))
            .filter(|c| vehicle_id.map_or(true, |v| c.vehicle_id == v))
            .filter(|c| accused_id.map_or(true, |a| c.accused_id == a))
            .cloned()
            .collect();
        Ok(newest_first(rows, |r: &challan::Model| r.issued_at, page))
    }
}

#[async_trait]
impl FirRepository for InMemoryRepository {
    async fn count_station_firs(&self, station_id: Uuid, year: i32) -> Result<u64, ServiceError> {
        let s = self.state();
        Ok(s.firs.values().filter(|f| f.station_id == station_id && f.filed_at.year() == year).count() as u64)
    }

    async fn insert_fir(&self, row: fir::Model) -> Result<fir::Model, ServiceError> {
        let mut s = self.state();
        s.check_write()?;
        if s.firs.values().any(|f| f.challan_id == row.challan_id || f.fir_number == row.fir_number) {
            return Err(conflict());
        }
        s.firs.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update_fir(&self, row: fir::Model) -> Result<fir::Model, ServiceError> {
        let mut s = self.state();
        s.check_write()?;
        let slot = s.firs.get_mut(&row.id).ok_or_else(|| missing("FIR"))?;
        *slot = row.clone();
        Ok(row)
    }

    async fn list_firs(&self, filter: &FirFilter, page: Pagination) -> Result<Page<fir::Model>, ServiceError> {
        let rows = self
            .state()
            .firs
            .values()
            .filter(|f| filter.station_id.map_or(true, |st| f.station_id == st))
            .filter(|f| filter.status.map_or(true, |st| f.status == st))
            .cloned()
            .collect();
        Ok(newest_first(rows, |r: &fir::Model| r.filed_at, page))
    }
}

#[async_trait]
impl CaseRepository for InMemoryRepository {
    async fn count_cases_in_year(&self, year: i32) -> Result<u64, ServiceError> {
        Ok(self.state().cases.values().filter(|c| c.created_at.year() == year).count() as u64)
    }

    async fn open_case(&self, case: court_case::Model, forwarded_fir: fir::Model) -> Result<court_case::Model, ServiceError> {
        let mut s = self.state();
        s.check_write()?;
        if s.cases.values().any(|c| c.fir_id == case.fir_id || c.case_number == case.case_number) {
            return Err(conflict());
        }
        if !s.firs.contains_key(&forwarded_fir.id) {
            return Err(missing("FIR"));
        }
        s.firs.insert(forwarded_fir.id, forwarded_fir);
        s.cases.insert(case.id, case.clone());
        Ok(case)
    }

    async fn update_case(&self, row: court_case::Model) -> Result<court_case::Model, ServiceError> {
        let mut s = self.state();
        s.check_write()?;
        let slot = s.cases.get_mut(&row.id).ok_or_else(|| missing("case"))?;
        *slot = row.clone();
        Ok(row)
    }

    async fn insert_statement(&self, row: case_statement::Model) -> Result<case_statement::Model, ServiceError> {
        let mut s = self.state();
        s.check_write()?;
        s.statements.push(row.clone());
        Ok(row)
    }

    async fn statements(&self, case_id: Uuid) -> Result<Vec<case_statement::Model>, ServiceError> {
        let mut rows: Vec<_> = self.state().statements.iter().filter(|st| st.case_id == case_id).cloned().collect();
        rows.sort_by_key(|st| st.statement_date);
        Ok(rows)
    }

    async fn list_cases(&self, filter: &CaseFilter, page: Pagination) -> Result<Page<court_case::Model>, ServiceError> {
        let rows = self
            .state()
            .cases
            .values()
            .filter(|c| filter.court_id.map_or(true, |x| c.court_id == x))
            .filter(|c| filter.judge_id.map_or(true, |x| c.judge_id == Some(x)))
            .filter(|c| filter.status.map_or(true, |x| c.status == x))
            .cloned()
            .collect();
        Ok(newest_first(rows, |r: &court_case::Model| r.created_at, page))
    }
}

#[async_trait]
impl PublicRepository for InMemoryRepository {
    async fn challans_for_accused(&self, accused_id: Uuid) -> Result<Vec<challan::Model>, ServiceError> {
        let mut rows: Vec<_> = self.state().challans.values().filter(|c| c.accused_id == accused_id).cloned().collect();
        rows.sort_by(|a, b| b.issued_at.cmp(&a.issued_at));
        Ok(rows)
    }

    async fn firs_for_challans(&self, challan_ids: &[Uuid]) -> Result<Vec<fir::Model>, ServiceError> {
        Ok(self.state().firs.values().filter(|f| challan_ids.contains(&f.challan_id)).cloned().collect())
    }

    async fn cases_for_firs(&self, fir_ids: &[Uuid]) -> Result<Vec<court_case::Model>, ServiceError> {
        Ok(self.state().cases.values().filter(|c| fir_ids.contains(&c.fir_id)).cloned().collect())
    }
}

#[async_trait]
impl OtpRepository for InMemoryRepository {
    async fn invalidate_otps(&self, email: &str, purpose: OtpPurpose) -> Result<(), ServiceError> {
        let now: DateTimeWithTimeZone = Utc::now().into();
        for t in self.state().otps.iter_mut().filter(|t| t.email == email && t.purpose == purpose && t.consumed_at.is_none()) {
            t.consumed_at = Some(now);
        }
        Ok(())
    }

    async fn insert_otp(&self, token: otp_token::Model) -> Result<otp_token::Model, ServiceError> {
        let mut s = self.state();
        s.check_write()?;
        s.otps.push(token.clone());
        Ok(token)
    }

    async fn latest_otp(&self, email: &str, purpose: OtpPurpose) -> Result<Option<otp_token::Model>, ServiceError> {
        Ok(self
            .state()
            .otps
            .iter()
            .filter(|t| t.email == email && t.purpose == purpose && t.consumed_at.is_none())
            .max_by_key(|t| t.created_at)
            .cloned())
    }

    async fn save_otp(&self, token: otp_token::Model) -> Result<otp_token::Model, ServiceError> {
        let mut s = self.state();
        let slot = s.otps.iter_mut().find(|t| t.id == token.id).ok_or_else(|| missing("otp"))?;
        *slot = token.clone();
        Ok(token)
    }
}

impl State {
    fn auth_user(&self, account: &NewAccount) -> AuthUser {
        AuthUser {
            id: account.id,
            username: account.username.clone(),
            email: account.email.clone(),
            full_name: account.full_name.clone(),
            role: account.role,
            is_active: !self.disabled.contains(&account.id),
        }
    }
}

/// Lets the same store back login, so accounts created through the
/// directory can sign in.
#[async_trait]
impl AuthRepository for InMemoryRepository {
    async fn find_user_by_login(&self, login: &str) -> Result<Option<AuthUser>, AuthError> {
        let s = self.state();
        let key = login.trim();
        let found = if key.contains('@') {
            let email = normalize_email(key);
            s.accounts.values().find(|(a, _)| a.email == email)
        } else {
            s.accounts.values().find(|(a, _)| a.username == key)
        };
        Ok(found.map(|(a, _)| s.auth_user(a)))
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<AuthUser>, AuthError> {
        let s = self.state();
        Ok(s.accounts.get(&id).map(|(a, _)| s.auth_user(a)))
    }

    async fn login_taken(&self, username: &str, email: &str) -> Result<bool, AuthError> {
        let email = normalize_email(email);
        Ok(self.state().accounts.values().any(|(a, _)| a.username == username.trim() || a.email == email))
    }

    async fn create_user(&self, account: &NewAccount, credentials: Credentials) -> Result<AuthUser, AuthError> {
        let account = NewAccount {
            username: account.username.trim().to_string(),
            email: normalize_email(&account.email),
            full_name: account.full_name.trim().to_string(),
            ..account.clone()
        };
        let mut s = self.state();
        s.check_write()?;
        s.check_account(&account)?;
        let user = s.auth_user(&account);
        s.accounts.insert(account.id, (account, Credentials { user_id: user.id, ..credentials }));
        Ok(user)
    }

    async fn get_credentials(&self, user_id: Uuid) -> Result<Option<Credentials>, AuthError> {
        Ok(self.state().accounts.get(&user_id).map(|(_, c)| c.clone()))
    }

    async fn upsert_password(&self, user_id: Uuid, password_hash: String, password_algorithm: String) -> Result<Credentials, AuthError> {
        let mut s = self.state();
        let (_, creds) = s.accounts.get_mut(&user_id).ok_or(AuthError::NotFound)?;
        *creds = Credentials { user_id, password_hash, password_algorithm };
        Ok(creds.clone())
    }

    async fn record_login(&self, _user_id: Uuid) -> Result<(), AuthError> { Ok(()) }

    async fn ensure_roles(&self) -> Result<(), AuthError> { Ok(()) }

    async fn count_users_with_role(&self, role: RoleName) -> Result<u64, AuthError> {
        Ok(self.state().accounts.values().filter(|(a, _)| a.role == role).count() as u64)
    }
}
