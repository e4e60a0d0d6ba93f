//! Planning operations over the store
//!
//! Every public method is one read-modify-write step against the store and
//! returns an [`Envelope`]. Methods hold a store-wide lock for their whole
//! body, so two operations never interleave their read and write.

use crate::clock::{Clock, SystemClock};
use crate::config::PreviewConfig;
use crate::error::ApiError;
use crate::id_factory::IdFactory;
use crate::notify::{LogNotifier, Notifier};
use crate::operation::Operation;
use chrono::{DateTime, Utc};
use parking_lot::{Mutex, MutexGuard};
use preview_model::{
    Envelope, Extra, Field, IdPrefix, NinetyDayPlan, Project, ProjectId, ProjectStatus, ProposalDocument,
    RaciEntry, Reply, UseCase, UseCaseCreated, UseCaseDraft, UseCaseId, UserIdentity, ValueRecord,
    Vision, DEMO_USER_EMAIL,
};
use preview_store::Store;
use std::sync::Arc;

/// Base of generated proposal links
pub const PROPOSAL_URL_BASE: &str = "https://docs.google.com/document/d/mock-proposal-";

/// The planning operations, bound to one store
#[derive(Debug)]
pub struct PreviewApi {
    store: Store,
    clock: Arc<dyn Clock>,
    ids: IdFactory,
    notifier: Arc<dyn Notifier>,
    user: UserIdentity,
    txn: Mutex<()>,
}

impl PreviewApi {
    /// Create with system clock, random ids, log notifications and the demo user
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self {
            store,
            clock: Arc::new(SystemClock),
            ids: IdFactory::from_entropy(),
            notifier: Arc::new(LogNotifier),
            user: UserIdentity {
                email: DEMO_USER_EMAIL.to_string(),
            },
            txn: Mutex::new(()),
        }
    }

    /// Open the configured store and apply config settings
    ///
    /// # Errors
    /// `ApiError::Store` if the store cannot be opened.
    pub fn from_config(config: &PreviewConfig) -> Result<Self, ApiError> {
        let mut api = Self::new(config.open_store()?).with_user_email(config.user_email.clone());
        if let Some(seed) = config.id_seed {
            api = api.with_id_factory(IdFactory::seeded(seed));
        }
        Ok(api)
    }

    /// With clock
    #[inline]
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// With id factory
    #[inline]
    #[must_use]
    pub fn with_id_factory(mut self, ids: IdFactory) -> Self {
        self.ids = ids;
        self
    }

    /// With notifier
    #[inline]
    #[must_use]
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// With current user email
    #[inline]
    #[must_use]
    pub fn with_user_email(mut self, email: impl Into<String>) -> Self {
        self.user = UserIdentity {
            email: email.into(),
        };
        self
    }

    /// Underlying store
    #[inline]
    #[must_use]
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Run an enumerated operation
    ///
    /// # Errors
    /// Returns the handler's execution failure.
    pub fn execute(&self, op: Operation) -> Result<Envelope<Reply>, ApiError> {
        if op.is_mutation() {
            tracing::info!(op = op.name(), "executing mutation");
        } else {
            tracing::debug!(op = op.name(), "executing read");
        }
        Ok(match op {
            Operation::GetUserProjects => self.get_user_projects()?.map(Reply::Projects),
            Operation::GetProject { project_id } => {
                self.get_project(&project_id)?.map(Reply::Project)
            }
            Operation::CreateProject { customer_name } => {
                self.create_project(&customer_name)?.map(Reply::Project)
            }
            Operation::UpdateProjectStatus { project_id, status } => self
                .update_project_status(&project_id, status)?
                .without_data(),
            Operation::GetVision { project_id } => self.get_vision(&project_id)?.map(Reply::Vision),
            Operation::SaveVision(vision) => self.save_vision(vision)?.without_data(),
            Operation::GetUsecases { project_id } => {
                self.get_use_cases(&project_id)?.map(Reply::UseCases)
            }
            Operation::AddUsecase(draft) => self.add_use_case(draft)?.map(Reply::UseCaseCreated),
            Operation::GetNinetyDayPlan {
                usecase_id,
                project_id,
            } => self
                .get_ninety_day_plan(&usecase_id, &project_id)?
                .map(Reply::Plan),
            Operation::SaveNinetyDayPlan(plan) => self.save_ninety_day_plan(plan)?.without_data(),
            Operation::GetRaciEntries { project_id } => {
                self.get_raci_entries(&project_id)?.map(Reply::RaciEntries)
            }
            Operation::SaveRaciEntries {
                project_id,
                entries,
            } => self.save_raci_entries(&project_id, entries)?.without_data(),
            Operation::GetValues { project_id } => self.get_values(&project_id)?.map(Reply::Values),
            Operation::SaveValue(value) => self.save_value(value)?.without_data(),
            Operation::GenerateProposal { project_id } => {
                self.generate_proposal(&project_id).map(Reply::Document)
            }
            Operation::InitializeSheets => self.initialize()?.without_data(),
            Operation::GetCurrentUser => self.current_user().map(Reply::User),
        })
    }

    /// All projects
    ///
    /// # Errors
    /// `ApiError::Store` if the store cannot be read or written.
    pub fn get_user_projects(&self) -> Result<Envelope<Vec<Project>>, ApiError> {
        let _txn = self.lock();
        Ok(Envelope::ok(self.store.projects()?))
    }

    /// One project, or a "Project not found" failure
    ///
    /// # Errors
    /// `ApiError::Store` if the store cannot be read or written.
    pub fn get_project(&self, project_id: &ProjectId) -> Result<Envelope<Project>, ApiError> {
        let _txn = self.lock();
        let project = self
            .store
            .projects()?
            .into_iter()
            .find(|p| p.project_id == *project_id);
        Ok(project.map_or_else(Envelope::project_not_found, Envelope::ok))
    }

    /// Create a draft project owned by the current user, listed first
    ///
    /// # Errors
    /// - `ApiError::IdSpaceExhausted` if no project id is free today
    /// - `ApiError::Store` on persistence failure
    pub fn create_project(&self, customer_name: &str) -> Result<Envelope<Project>, ApiError> {
        let _txn = self.lock();
        let mut projects = self.store.projects()?;
        let now = self.now();
        let project_id = self.ids.next_id(IdPrefix::Project, now.date_naive(), |candidate| {
            projects.iter().any(|p| p.project_id.as_str() == candidate)
        })?;

        let project = Project {
            project_id: ProjectId::from(project_id),
            customer_name: customer_name.into(),
            created_date: now.into(),
            updated_date: now.into(),
            creator_email: self.user.email.as_str().into(),
            editor_emails: self.user.email.as_str().into(),
            status: ProjectStatus::Draft.into(),
            extra: Extra::new(),
        };
        projects.insert(0, project.clone());
        self.store.save_projects(&projects)?;

        tracing::info!(project_id = %project.project_id, customer = customer_name, "project created");
        Ok(Envelope::ok(project))
    }

    /// Set a project's status and refresh its update time
    ///
    /// # Errors
    /// `ApiError::Store` if the store cannot be read or written.
    pub fn update_project_status(
        &self,
        project_id: &ProjectId,
        status: Field,
    ) -> Result<Envelope<()>, ApiError> {
        let _txn = self.lock();
        let mut projects = self.store.projects()?;
        let Some(project) = projects.iter_mut().find(|p| p.project_id == *project_id) else {
            return Ok(Envelope::project_not_found());
        };
        project.status = status;
        project.updated_date = self.now().into();
        tracing::info!(%project_id, status = ?project.status(), "project status updated");
        self.store.save_projects(&projects)?;
        Ok(Envelope::message("Status updated"))
    }

    /// Vision of a project, `None` if never saved
    ///
    /// # Errors
    /// `ApiError::Store` if the store cannot be read or written.
    pub fn get_vision(&self, project_id: &ProjectId) -> Result<Envelope<Option<Vision>>, ApiError> {
        let _txn = self.lock();
        Ok(Envelope::ok(self.store.visions()?.remove(project_id)))
    }

    /// Upsert a vision and refresh the parent project's update time
    ///
    /// The project list is only rewritten when the parent exists.
    ///
    /// # Errors
    /// `ApiError::Store` if the store cannot be read or written.
    pub fn save_vision(&self, vision: Vision) -> Result<Envelope<()>, ApiError> {
        let _txn = self.lock();
        let project_id = vision.project_id.clone();
        let mut visions = self.store.visions()?;
        visions.insert(project_id.clone(), vision);
        self.store.save_visions(&visions)?;

        let mut projects = self.store.projects()?;
        if let Some(project) = projects.iter_mut().find(|p| p.project_id == project_id) {
            project.updated_date = self.now().into();
            self.store.save_projects(&projects)?;
        }

        tracing::info!(%project_id, "vision saved");
        Ok(Envelope::message("Vision saved"))
    }

    /// Use cases of a project, empty if none
    ///
    /// # Errors
    /// `ApiError::Store` if the store cannot be read or written.
    pub fn get_use_cases(&self, project_id: &ProjectId) -> Result<Envelope<Vec<UseCase>>, ApiError> {
        let _txn = self.lock();
        let use_cases = self.store.use_cases()?.remove(project_id).unwrap_or_default();
        Ok(Envelope::ok(use_cases))
    }

    /// Append a use case under a fresh id
    ///
    /// # Errors
    /// - `ApiError::IdSpaceExhausted` if no use case id is free today
    /// - `ApiError::Store` on persistence failure
    pub fn add_use_case(&self, draft: UseCaseDraft) -> Result<Envelope<UseCaseCreated>, ApiError> {
        let _txn = self.lock();
        let mut use_cases = self.store.use_cases()?;
        let date = self.now().date_naive();
        let usecase_id = self.ids.next_id(IdPrefix::UseCase, date, |candidate| {
            use_cases
                .values()
                .flatten()
                .any(|uc| uc.usecase_id.as_str() == candidate)
        })?;
        let usecase_id = UseCaseId::from(usecase_id);

        let project_id = draft.project_id.clone();
        use_cases
            .entry(project_id.clone())
            .or_default()
            .push(draft.into_use_case(usecase_id.clone()));
        self.store.save_use_cases(&use_cases)?;

        tracing::info!(%project_id, %usecase_id, "use case added");
        Ok(Envelope::ok(UseCaseCreated { usecase_id }))
    }

    /// 90-day plan of a use case, `None` if never saved
    ///
    /// `project_id` is accepted for call compatibility and not used.
    ///
    /// # Errors
    /// `ApiError::Store` if the store cannot be read or written.
    pub fn get_ninety_day_plan(
        &self,
        usecase_id: &UseCaseId,
        project_id: &ProjectId,
    ) -> Result<Envelope<Option<NinetyDayPlan>>, ApiError> {
        let _txn = self.lock();
        tracing::trace!(%usecase_id, %project_id, "plan lookup");
        Ok(Envelope::ok(self.store.plans()?.remove(usecase_id)))
    }

    /// Upsert a 90-day plan by use case id
    ///
    /// # Errors
    /// `ApiError::Store` if the store cannot be read or written.
    pub fn save_ninety_day_plan(&self, plan: NinetyDayPlan) -> Result<Envelope<()>, ApiError> {
        let _txn = self.lock();
        let usecase_id = plan.usecase_id.clone();
        let mut plans = self.store.plans()?;
        plans.insert(usecase_id.clone(), plan);
        self.store.save_plans(&plans)?;

        tracing::info!(%usecase_id, "90-day plan saved");
        Ok(Envelope::message("90-day plan saved"))
    }

    /// RACI entries of a project, empty if none
    ///
    /// # Errors
    /// `ApiError::Store` if the store cannot be read or written.
    pub fn get_raci_entries(
        &self,
        project_id: &ProjectId,
    ) -> Result<Envelope<Vec<RaciEntry>>, ApiError> {
        let _txn = self.lock();
        let entries = self.store.raci()?.remove(project_id).unwrap_or_default();
        Ok(Envelope::ok(entries))
    }

    /// Replace the whole RACI list of a project
    ///
    /// # Errors
    /// `ApiError::Store` if the store cannot be read or written.
    pub fn save_raci_entries(
        &self,
        project_id: &ProjectId,
        entries: Vec<RaciEntry>,
    ) -> Result<Envelope<()>, ApiError> {
        let _txn = self.lock();
        let count = entries.len();
        let mut raci = self.store.raci()?;
        raci.insert(project_id.clone(), entries);
        self.store.save_raci(&raci)?;

        tracing::info!(%project_id, count, "RACI entries saved");
        Ok(Envelope::message("RACI entries saved"))
    }

    /// Value records of a project, empty if none
    ///
    /// # Errors
    /// `ApiError::Store` if the store cannot be read or written.
    pub fn get_values(&self, project_id: &ProjectId) -> Result<Envelope<Vec<ValueRecord>>, ApiError> {
        let _txn = self.lock();
        let values = self.store.values()?.remove(project_id).unwrap_or_default();
        Ok(Envelope::ok(values))
    }

    /// Replace the project's record for the same use case, or append
    ///
    /// # Errors
    /// `ApiError::Store` if the store cannot be read or written.
    pub fn save_value(&self, value: ValueRecord) -> Result<Envelope<()>, ApiError> {
        let _txn = self.lock();
        let mut values = self.store.values()?;
        let (project_id, usecase_id) = (value.project_id.clone(), value.usecase_id.clone());
        let list = values.entry(project_id.clone()).or_default();
        match list.iter_mut().find(|v| v.usecase_id == usecase_id) {
            Some(existing) => *existing = value,
            None => list.push(value),
        }
        self.store.save_values(&values)?;

        tracing::info!(%project_id, %usecase_id, "value saved");
        Ok(Envelope::message("Value saved"))
    }

    /// Produce a proposal link and tell the user; nothing is stored
    #[must_use]
    pub fn generate_proposal(&self, project_id: &ProjectId) -> Envelope<ProposalDocument> {
        let document_url = format!("{PROPOSAL_URL_BASE}{project_id}");
        self.notifier.notify(&format!(
            "[Preview] Proposal generated.\n\
             A real deployment would create a document here.\n\n\
             Preview URL: {document_url}"
        ));
        tracing::info!(%project_id, %document_url, "proposal generated");
        Envelope::ok(ProposalDocument { document_url })
    }

    /// Wipe the store and reseed
    ///
    /// # Errors
    /// `ApiError::Store` if the store cannot be read or written.
    pub fn initialize(&self) -> Result<Envelope<()>, ApiError> {
        let _txn = self.lock();
        self.store.reset()?;
        Ok(Envelope::message("Storage initialized"))
    }

    /// The configured user
    #[must_use]
    pub fn current_user(&self) -> Envelope<UserIdentity> {
        Envelope::ok(self.user.clone())
    }

    fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.txn.lock()
    }
}
