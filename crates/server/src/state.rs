use std::sync::Arc;

use configs::AppConfig;
use service::auth::repository::AuthRepository;
use service::auth::service::{AuthService, AuthSettings};
use service::case::{CaseRepository, CaseService};
use service::challan::{ChallanPolicy, ChallanRepository, ChallanService};
use service::directory::{DirectoryRepository, DirectoryService};
use service::emission::{EmissionPolicy, EmissionRepository, EmissionService};
use service::fir::{FirRepository, FirService};
use service::mailer::Mailer;
use service::otp::{OtpPolicy, OtpRepository, OtpService};
use service::public::{PublicRepository, PublicService};

/// Services shared by every handler. Repositories are trait objects so the
/// same router runs against PostgreSQL or the in-memory store.
#[derive(Clone)]
pub struct ServerState {
    pub auth: Arc<AuthService<dyn AuthRepository>>,
    pub directory: Arc<DirectoryService<dyn DirectoryRepository>>,
    pub emissions: Arc<EmissionService<dyn EmissionRepository>>,
    pub challans: Arc<ChallanService<dyn ChallanRepository>>,
    pub firs: Arc<FirService<dyn FirRepository>>,
    pub cases: Arc<CaseService<dyn CaseRepository>>,
    pub public: Arc<PublicService<dyn PublicRepository>>,
}

impl ServerState {
    /// Wire services over one workflow store and one account store.
    pub fn new<W>(workflow: Arc<W>, accounts: Arc<dyn AuthRepository>, mailer: Arc<dyn Mailer>, cfg: &AppConfig) -> Self
    where
        W: DirectoryRepository
            + EmissionRepository
            + ChallanRepository
            + FirRepository
            + CaseRepository
            + PublicRepository
            + OtpRepository
            + 'static,
    {
        let otp_repo: Arc<dyn OtpRepository> = workflow.clone();
        let otp = Arc::new(OtpService::new(otp_repo, mailer, OtpPolicy::from(&cfg.otp)));

        let directory: Arc<dyn DirectoryRepository> = workflow.clone();
        let emissions: Arc<dyn EmissionRepository> = workflow.clone();
        let challans: Arc<dyn ChallanRepository> = workflow.clone();
        let firs: Arc<dyn FirRepository> = workflow.clone();
        let cases: Arc<dyn CaseRepository> = workflow.clone();
        let public: Arc<dyn PublicRepository> = workflow;

        Self {
            auth: Arc::new(AuthService::new(accounts, otp.clone(), AuthSettings::from(&cfg.auth))),
            directory: Arc::new(DirectoryService::new(directory)),
            emissions: Arc::new(EmissionService::new(emissions, EmissionPolicy::from(&cfg.enforcement))),
            challans: Arc::new(ChallanService::new(challans, ChallanPolicy::from(&cfg.enforcement))),
            firs: Arc::new(FirService::new(firs)),
            cases: Arc::new(CaseService::new(cases)),
            public: Arc::new(PublicService::new(public, otp)),
        }
    }
}
