use std::sync::Arc;

use chrono::{Datelike, Utc};
use sea_orm::prelude::DateTimeWithTimeZone;
use tracing::{info, instrument};
use uuid::Uuid;

use models::status::{CaseStatus, FirStatus};
use models::validation::FieldErrors;
use models::{case_statement, court_case, judge};

use super::domain::{AddStatementInput, CaseDetail, CaseFilter, CreateCaseInput, RecordVerdictInput, ScheduleHearingInput};
use super::repository::CaseRepository;
use crate::errors::ServiceError;
use crate::lookup::found;
use crate::pagination::{Page, Pagination};

pub struct CaseService<R: CaseRepository + ?Sized> {
    repo: Arc<R>,
}

fn ensure_future(field: &str, at: DateTimeWithTimeZone) -> Result<(), ServiceError> {
    let now: DateTimeWithTimeZone = Utc::now().into();
    if at <= now {
        return Err(ServiceError::field(field, "date must be in the future"));
    }
    Ok(())
}

impl<R: CaseRepository + ?Sized> CaseService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Open a case for an FIR and forward the FIR to court atomically.
    #[instrument(skip(self, input), fields(fir_id = %input.fir_id, court_id = %input.court_id))]
    pub async fn create(&self, input: CreateCaseInput) -> Result<court_case::Model, ServiceError> {
        let mut errs = FieldErrors::new();
        errs.required("case_type", &input.case_type).max_len("case_type", &input.case_type, 64);
        errs.finish()?;
        if let Some(at) = input.hearing_date {
            ensure_future("hearing_date", at)?;
        }

        let mut fir = found(self.repo.fir(input.fir_id).await?, "FIR")?;
        if fir.status == FirStatus::Closed {
            return Err(ServiceError::Validation("FIR is closed".into()));
        }
        if self.repo.case_for_fir(fir.id).await?.is_some() {
            return Err(ServiceError::Conflict("a case already exists for this FIR".into()));
        }
        let court = found(self.repo.court(input.court_id).await?, "court")?;
        if let Some(judge_id) = input.judge_id {
            self.judge_at_court(judge_id, court.id).await?;
        }

        let now = Utc::now();
        let now_tz: DateTimeWithTimeZone = now.into();
        let seq = self.repo.count_cases_in_year(now.year()).await? + 1;
        let row = court_case::Model {
            id: Uuid::new_v4(),
            case_number: court_case::format_number(now.year(), seq),
            fir_id: fir.id,
            court_id: court.id,
            judge_id: input.judge_id,
            case_type: input.case_type.trim().to_string(),
            status: if input.hearing_date.is_some() { CaseStatus::Hearing } else { CaseStatus::Pending },
            hearing_date: input.hearing_date,
            verdict: None,
            verdict_date: None,
            created_at: now_tz,
            updated_at: now_tz,
        };
        fir.status = FirStatus::ForwardedToCourt;
        fir.updated_at = now_tz;

        let saved = self.repo.open_case(row, fir).await?;
        info!(case_id = %saved.id, number = %saved.case_number, "case_opened");
        Ok(saved)
    }

    pub async fn get(&self, id: Uuid) -> Result<CaseDetail, ServiceError> {
        let case = found(self.repo.court_case(id).await?, "case")?;
        let statements = self.repo.statements(case.id).await?;
        Ok(CaseDetail { case, statements })
    }

    pub async fn list(&self, filter: CaseFilter, page: Pagination) -> Result<Page<court_case::Model>, ServiceError> {
        self.repo.list_cases(&filter, page).await
    }

    /// Set the hearing date. An unassigned case is given to `judge_id`, or
    /// to the acting judge when none is named.
    #[instrument(skip(self, input))]
    pub async fn schedule_hearing(&self, user_id: Uuid, id: Uuid, input: ScheduleHearingInput) -> Result<court_case::Model, ServiceError> {
        ensure_future("hearing_date", input.hearing_date)?;
        let mut row = found(self.repo.court_case(id).await?, "case")?;
        let acting = self.acting_judge(user_id, &row).await?;
        if !row.status.can_transition_to(CaseStatus::Hearing) {
            return Err(ServiceError::Validation(format!("cannot schedule a hearing for a {:?} case", row.status)));
        }
        match (row.judge_id, input.judge_id) {
            (Some(assigned), Some(requested)) if assigned != requested => {
                return Err(ServiceError::field("judge_id", "case already has an assigned judge"));
            }
            (Some(_), _) => {}
            (None, requested) => {
                let assignee = match requested {
                    Some(judge_id) => self.judge_at_court(judge_id, row.court_id).await?.id,
                    None => acting.id,
                };
                row.judge_id = Some(assignee);
            }
        }
        row.status = CaseStatus::Hearing;
        row.hearing_date = Some(input.hearing_date);
        row.updated_at = Utc::now().into();
        let saved = self.repo.update_case(row).await?;
        info!(case_id = %saved.id, judge_id = ?saved.judge_id, "hearing_scheduled");
        Ok(saved)
    }

    #[instrument(skip(self, input))]
    pub async fn add_statement(&self, recorded_by: Uuid, id: Uuid, input: AddStatementInput) -> Result<case_statement::Model, ServiceError> {
        let mut errs = FieldErrors::new();
        errs.required("statement_by", &input.statement_by)
            .max_len("statement_by", &input.statement_by, 128)
            .required("statement_text", &input.statement_text);
        errs.finish()?;

        let case = found(self.repo.court_case(id).await?, "case")?;
        self.acting_judge(recorded_by, &case).await?;
        if case.status.is_closed() {
            return Err(ServiceError::Validation("statements cannot be added to a closed case".into()));
        }
        let row = case_statement::Model {
            id: Uuid::new_v4(),
            case_id: case.id,
            statement_by: input.statement_by.trim().to_string(),
            statement_text: input.statement_text.trim().to_string(),
            statement_date: input.statement_date.unwrap_or_else(|| Utc::now().into()),
            recorded_by: Some(recorded_by),
        };
        self.repo.insert_statement(row).await
    }

    /// Only the assigned judge may close a case; an unassigned case is
    /// taken by the judge of its court who closes it.
    #[instrument(skip(self, input), fields(dismissed = input.dismissed))]
    pub async fn record_verdict(&self, user_id: Uuid, id: Uuid, input: RecordVerdictInput) -> Result<court_case::Model, ServiceError> {
        let mut errs = FieldErrors::new();
        errs.required("verdict", &input.verdict);
        errs.finish()?;

        let mut row = found(self.repo.court_case(id).await?, "case")?;
        let judge = self.acting_judge(user_id, &row).await?;
        let next = if input.dismissed { CaseStatus::Dismissed } else { CaseStatus::Decided };
        if !row.status.can_transition_to(next) {
            return Err(ServiceError::Validation(format!("case cannot move from {:?} to {:?}", row.status, next)));
        }
        let now: DateTimeWithTimeZone = Utc::now().into();
        row.judge_id = Some(judge.id);
        row.status = next;
        row.verdict = Some(input.verdict.trim().to_string());
        row.verdict_date = Some(now);
        row.updated_at = now;
        let saved = self.repo.update_case(row).await?;
        info!(case_id = %saved.id, status = ?saved.status, "verdict_recorded");
        Ok(saved)
    }

    async fn judge_at_court(&self, judge_id: Uuid, court_id: Uuid) -> Result<judge::Model, ServiceError> {
        let judge = found(self.repo.judge(judge_id).await?, "judge")?;
        if judge.court_id != court_id {
            return Err(ServiceError::field("judge_id", "judge does not sit at this court"));
        }
        if !judge.is_active {
            return Err(ServiceError::field("judge_id", "judge is not active"));
        }
        Ok(judge)
    }

    /// The assigned judge, or while none is assigned any active judge of
    /// the case's court.
    async fn acting_judge(&self, user_id: Uuid, case: &court_case::Model) -> Result<judge::Model, ServiceError> {
        let judge = self.repo.judge_by_user(user_id).await?
            .ok_or_else(|| ServiceError::Forbidden("only judges can act on cases".into()))?;
        let allowed = match case.judge_id {
            Some(assigned) => assigned == judge.id,
            None => judge.court_id == case.court_id && judge.is_active,
        };
        if !allowed {
            return Err(ServiceError::Forbidden("only the judge assigned to this case can act on it".into()));
        }
        Ok(judge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use crate::fir::{domain::CreateFirInput, FirService};
    use crate::lookup::RecordLookup;
    use crate::repo::memory::InMemoryRepository;
    use crate::test_support::fixtures::{self, Seeded};

    struct Ctx {
        svc: CaseService<InMemoryRepository>,
        repo: Arc<InMemoryRepository>,
        s: Seeded,
    }

    fn setup() -> Ctx {
        let repo = Arc::new(InMemoryRepository::default());
        let s = fixtures::seed(&repo);
        Ctx { svc: CaseService::new(repo.clone()), repo, s }
    }

    async fn filed_fir(ctx: &Ctx, plate: &str) -> models::fir::Model {
        let c = fixtures::issue_challan(&ctx.repo, &ctx.s, ctx.s.cognizable_violation_id, plate).await;
        FirService::new(ctx.repo.clone())
            .create(ctx.s.officer_user_id, CreateFirInput { challan_id: c.id, description: "noise".into() })
            .await
            .unwrap()
    }

    fn input(ctx: &Ctx, fir_id: Uuid) -> CreateCaseInput {
        CreateCaseInput { fir_id, court_id: ctx.s.court_id, judge_id: Some(ctx.s.judge_id), case_type: "Criminal".into(), hearing_date: None }
    }

    fn later(days: i64) -> DateTimeWithTimeZone {
        (Utc::now() + Duration::days(days)).into()
    }

    fn hearing(at: DateTimeWithTimeZone) -> ScheduleHearingInput {
        ScheduleHearingInput { hearing_date: at, judge_id: None }
    }

    /// A second judge at `court_id`; returns (judge id, user id).
    fn extra_judge(ctx: &Ctx, court_id: Uuid, username: &str) -> (Uuid, Uuid) {
        let user_id = Uuid::new_v4();
        let row = judge::build(Uuid::new_v4(), user_id, &fixtures::new_judge(court_id, username)).unwrap();
        let id = row.id;
        ctx.repo.put_judge(row);
        (id, user_id)
    }

    #[tokio::test]
    async fn opening_a_case_forwards_the_fir() {
        let ctx = setup();
        let fir = filed_fir(&ctx, "CASE-A1").await;
        let case = ctx.svc.create(input(&ctx, fir.id)).await.unwrap();
        assert_eq!(case.case_number, format!("CASE-{}-00001", Utc::now().year()));
        assert_eq!(case.status, CaseStatus::Pending);
        assert_eq!(ctx.repo.fir(fir.id).await.unwrap().unwrap().status, FirStatus::ForwardedToCourt);

        let again = ctx.svc.create(input(&ctx, fir.id)).await;
        assert!(matches!(again, Err(ServiceError::Conflict(_))));
    }

    #[tokio::test]
    async fn closed_fir_cannot_open_case() {
        let ctx = setup();
        let fir = filed_fir(&ctx, "CASE-B1").await;
        ctx.repo.tamper_fir(fir.id, |f| f.status = FirStatus::Closed);
        assert!(matches!(ctx.svc.create(input(&ctx, fir.id)).await, Err(ServiceError::Validation(_))));
    }

    #[tokio::test]
    async fn judge_must_sit_at_court_and_be_active() {
        let ctx = setup();
        let fir = filed_fir(&ctx, "CASE-C1").await;
        let other_court = fixtures::insert_court(&ctx.repo, "Sessions Court");
        let wrong = ctx.svc.create(CreateCaseInput { court_id: other_court, ..input(&ctx, fir.id) }).await;
        assert!(matches!(wrong, Err(ServiceError::Fields(_))));

        ctx.repo.set_judge_active(ctx.s.judge_id, false);
        let inactive = ctx.svc.create(input(&ctx, fir.id)).await;
        assert!(matches!(inactive, Err(ServiceError::Fields(_))));
        assert_eq!(ctx.repo.fir(fir.id).await.unwrap().unwrap().status, FirStatus::Filed);
    }

    #[tokio::test]
    async fn hearing_statements_and_verdict() {
        let ctx = setup();
        let fir = filed_fir(&ctx, "CASE-D1").await;
        let case = ctx.svc.create(input(&ctx, fir.id)).await.unwrap();

        let past = ctx.svc.schedule_hearing(ctx.s.judge_user_id, case.id, hearing(later(-1))).await;
        assert!(matches!(past, Err(ServiceError::Fields(_))));
        let heard = ctx.svc.schedule_hearing(ctx.s.judge_user_id, case.id, hearing(later(7))).await.unwrap();
        assert_eq!(heard.status, CaseStatus::Hearing);

        ctx.svc
            .add_statement(ctx.s.judge_user_id, case.id, AddStatementInput { statement_by: "Complainant".into(), statement_text: "Horn used at night".into(), statement_date: None })
            .await
            .unwrap();

        let stranger = ctx.svc.record_verdict(ctx.s.officer_user_id, case.id, RecordVerdictInput { verdict: "Guilty".into(), dismissed: false }).await;
        assert!(matches!(stranger, Err(ServiceError::Forbidden(_))));

        let decided = ctx.svc
            .record_verdict(ctx.s.judge_user_id, case.id, RecordVerdictInput { verdict: "Guilty; fine upheld".into(), dismissed: false })
            .await
            .unwrap();
        assert_eq!(decided.status, CaseStatus::Decided);
        assert!(decided.verdict_date.is_some());

        let late = ctx.svc
            .add_statement(ctx.s.judge_user_id, case.id, AddStatementInput { statement_by: "Defence".into(), statement_text: "late".into(), statement_date: None })
            .await;
        assert!(matches!(late, Err(ServiceError::Validation(_))));

        let detail = ctx.svc.get(case.id).await.unwrap();
        assert_eq!(detail.statements.len(), 1);
    }

    #[tokio::test]
    async fn pending_case_can_be_dismissed_but_not_decided() {
        let ctx = setup();
        let fir = filed_fir(&ctx, "CASE-E1").await;
        let case = ctx.svc.create(input(&ctx, fir.id)).await.unwrap();
        let decided = ctx.svc.record_verdict(ctx.s.judge_user_id, case.id, RecordVerdictInput { verdict: "x".into(), dismissed: false }).await;
        assert!(matches!(decided, Err(ServiceError::Validation(_))));
        let dismissed = ctx.svc.record_verdict(ctx.s.judge_user_id, case.id, RecordVerdictInput { verdict: "No evidence".into(), dismissed: true }).await.unwrap();
        assert_eq!(dismissed.status, CaseStatus::Dismissed);

        let listed = ctx.svc.list(CaseFilter { judge_id: Some(ctx.s.judge_id), ..Default::default() }, Pagination::default()).await.unwrap();
        assert_eq!(listed.total, 1);
    }

    #[tokio::test]
    async fn unassigned_case_is_taken_by_a_judge_of_its_court() {
        let ctx = setup();
        let fir = filed_fir(&ctx, "CASE-F1").await;
        let case = ctx.svc.create(CreateCaseInput { judge_id: None, ..input(&ctx, fir.id) }).await.unwrap();
        assert!(case.judge_id.is_none());

        let other_court = fixtures::insert_court(&ctx.repo, "Sessions Court");
        let (_, outsider_user) = extra_judge(&ctx, other_court, "outside.judge");
        let outsider = ctx.svc.schedule_hearing(outsider_user, case.id, hearing(later(3))).await;
        assert!(matches!(outsider, Err(ServiceError::Forbidden(_))));

        let heard = ctx.svc.schedule_hearing(ctx.s.judge_user_id, case.id, hearing(later(3))).await.unwrap();
        assert_eq!(heard.judge_id, Some(ctx.s.judge_id));

        let (_, colleague_user) = extra_judge(&ctx, ctx.s.court_id, "colleague.judge");
        let statement = AddStatementInput { statement_by: "Witness".into(), statement_text: "Heard the horn".into(), statement_date: None };
        let taken = ctx.svc.add_statement(colleague_user, case.id, statement.clone()).await;
        assert!(matches!(taken, Err(ServiceError::Forbidden(_))));
        let rescheduled = ctx.svc.schedule_hearing(colleague_user, case.id, hearing(later(5))).await;
        assert!(matches!(rescheduled, Err(ServiceError::Forbidden(_))));
        ctx.svc.add_statement(ctx.s.judge_user_id, case.id, statement).await.unwrap();

        let decided = ctx.svc
            .record_verdict(ctx.s.judge_user_id, case.id, RecordVerdictInput { verdict: "Guilty".into(), dismissed: false })
            .await
            .unwrap();
        assert_eq!(decided.status, CaseStatus::Decided);
    }

    #[tokio::test]
    async fn hearing_can_name_the_assigned_judge() {
        let ctx = setup();
        let fir = filed_fir(&ctx, "CASE-G1").await;
        let case = ctx.svc.create(CreateCaseInput { judge_id: None, ..input(&ctx, fir.id) }).await.unwrap();
        let (colleague_id, colleague_user) = extra_judge(&ctx, ctx.s.court_id, "named.judge");

        let other_court = fixtures::insert_court(&ctx.repo, "Sessions Court");
        let (outsider_id, _) = extra_judge(&ctx, other_court, "far.judge");
        let wrong = ctx.svc
            .schedule_hearing(ctx.s.judge_user_id, case.id, ScheduleHearingInput { hearing_date: later(2), judge_id: Some(outsider_id) })
            .await;
        assert!(matches!(wrong, Err(ServiceError::Fields(_))));

        let heard = ctx.svc
            .schedule_hearing(ctx.s.judge_user_id, case.id, ScheduleHearingInput { hearing_date: later(2), judge_id: Some(colleague_id) })
            .await
            .unwrap();
        assert_eq!(heard.judge_id, Some(colleague_id));

        let not_assigned = ctx.svc
            .record_verdict(ctx.s.judge_user_id, case.id, RecordVerdictInput { verdict: "x".into(), dismissed: true })
            .await;
        assert!(matches!(not_assigned, Err(ServiceError::Forbidden(_))));
        let dismissed = ctx.svc
            .record_verdict(colleague_user, case.id, RecordVerdictInput { verdict: "Withdrawn".into(), dismissed: true })
            .await
            .unwrap();
        assert_eq!(dismissed.status, CaseStatus::Dismissed);
    }
}
