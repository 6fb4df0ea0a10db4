//! Onboarding phase controller
//!
//! Entry -> Commitment -> Workspace. Entry awaits the team service; the
//! other transitions are synchronous. Workspace is terminal and owns the
//! workspace store.

use std::time::Duration;

use chrono::Utc;
use hackos_core::validation::{
    validate_commitment, validate_create_team, validate_join_team, CommitmentErrors,
    CommitmentForm, CreateTeamErrors, CreateTeamForm, JoinTeamErrors, JoinTeamForm,
};
use hackos_core::{
    create_hackathon_context, join_hackathon_context, CreateContextParams, HackathonContext,
    JoinContextParams, NoteRepository, WorkspaceStore,
};
use hackos_net::{with_timeout, CreateTeamPayload, InviteCode, JoinTeamPayload, TeamService};
use tracing::{info, warn};

use crate::config::AppConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnboardingPhase {
    Entry,
    Commitment,
    Workspace,
}

impl std::fmt::Display for OnboardingPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OnboardingPhase::Entry => write!(f, "entry"),
            OnboardingPhase::Commitment => write!(f, "commitment"),
            OnboardingPhase::Workspace => write!(f, "workspace"),
        }
    }
}

fn join_messages(messages: Vec<(&'static str, &'static str)>) -> String {
    messages
        .into_iter()
        .map(|(_, msg)| msg)
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, thiserror::Error)]
pub enum OnboardingError {
    #[error("{}", join_messages(.0.messages()))]
    InvalidCreate(CreateTeamErrors),

    #[error("{}", join_messages(.0.messages()))]
    InvalidJoin(JoinTeamErrors),

    #[error("{}", join_messages(.0.messages()))]
    InvalidCommitment(CommitmentErrors),

    #[error(transparent)]
    Remote(#[from] hackos_net::Error),

    #[error("Not available during {actual} (expected {expected})")]
    WrongPhase {
        expected: OnboardingPhase,
        actual: OnboardingPhase,
    },

    #[error(transparent)]
    Core(#[from] hackos_core::Error),
}

/// Knobs for the entry step
#[derive(Debug, Clone, PartialEq)]
pub struct EntrySettings {
    pub request_timeout: Duration,
    /// Joiners get no schedule or timezone from the service
    pub join_timezone: String,
    pub join_duration: chrono::Duration,
}

impl EntrySettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            request_timeout: config.request_timeout(),
            join_timezone: config.workspace.default_timezone.clone(),
            join_duration: config.default_duration(),
        }
    }
}

pub struct OnboardingController<S: TeamService, R: NoteRepository> {
    service: S,
    settings: EntrySettings,
    /// Handed to the store on entering the workspace
    repo: Option<R>,
    pending: Option<HackathonContext>,
    store: Option<WorkspaceStore<R>>,
}

impl<S: TeamService, R: NoteRepository> OnboardingController<S, R> {
    pub fn new(service: S, repo: R, settings: EntrySettings) -> Self {
        Self {
            service,
            settings,
            repo: Some(repo),
            pending: None,
            store: None,
        }
    }

    pub fn phase(&self) -> OnboardingPhase {
        if self.store.is_some() {
            OnboardingPhase::Workspace
        } else if self.pending.is_some() {
            OnboardingPhase::Commitment
        } else {
            OnboardingPhase::Entry
        }
    }

    fn require(&self, expected: OnboardingPhase) -> Result<(), OnboardingError> {
        let actual = self.phase();
        if actual != expected {
            return Err(OnboardingError::WrongPhase { expected, actual });
        }
        Ok(())
    }

    /// Context held while the user decides on a commitment
    pub fn pending_context(&self) -> Option<&HackathonContext> {
        self.pending.as_ref()
    }

    pub fn into_store(self) -> Option<WorkspaceStore<R>> {
        self.store
    }

    /// Validate the form, create the team remotely, move to Commitment.
    ///
    /// Nothing changes on any failure; the form can be resubmitted.
    pub async fn create_team(
        &mut self,
        form: &CreateTeamForm,
    ) -> Result<&HackathonContext, OnboardingError> {
        self.require(OnboardingPhase::Entry)?;
        let valid = validate_create_team(form).map_err(OnboardingError::InvalidCreate)?;

        let payload = CreateTeamPayload {
            team_name: valid.team_name.clone(),
            hackathon_name: valid.hackathon_name.clone(),
            start_time: valid.start_time,
            end_time: valid.end_time,
            timezone: valid.timezone.clone(),
            team_size: valid.team_size,
        };
        let response = with_timeout(
            self.settings.request_timeout,
            self.service.create_team(payload),
        )
        .await
        .inspect_err(|e| warn!(error = %e, "Create team failed"))?;

        let context = create_hackathon_context(CreateContextParams {
            team_id: response.id,
            team_name: response.team_name,
            hackathon_name: response.hackathon_name,
            start_time: valid.start_time,
            end_time: valid.end_time,
            timezone: valid.timezone,
            invite_code: response.invite_code.to_string(),
            user_name: valid.user_name,
        });
        info!(team_id = %context.team_id, "Team created, entering commitment");
        Ok(self.pending.insert(context))
    }

    /// Validate the form, join remotely by invite code, move to Commitment
    pub async fn join_team(
        &mut self,
        form: &JoinTeamForm,
    ) -> Result<&HackathonContext, OnboardingError> {
        self.require(OnboardingPhase::Entry)?;
        let valid = validate_join_team(form).map_err(OnboardingError::InvalidJoin)?;
        let invite_code = InviteCode::parse(&valid.invite_code)?;

        let response = with_timeout(
            self.settings.request_timeout,
            self.service.join_team(JoinTeamPayload {
                invite_code: invite_code.clone(),
            }),
        )
        .await
        .inspect_err(|e| warn!(error = %e, "Join team failed"))?;

        let context = join_hackathon_context(JoinContextParams {
            team_name: response.team_name,
            hackathon_name: response.hackathon_name,
            team_id: response.team_id,
            invite_code: invite_code.to_string(),
            user_name: valid.user_name,
            timezone: self.settings.join_timezone.clone(),
            starts_at: Utc::now(),
            duration: self.settings.join_duration,
        });
        info!(
            team_id = %context.team_id,
            member_count = response.member_count,
            "Joined team, entering commitment"
        );
        Ok(self.pending.insert(context))
    }

    /// Save a commitment and enter the workspace.
    ///
    /// Field errors keep the controller in Commitment with nothing stored.
    pub fn submit_commitment(
        &mut self,
        form: &CommitmentForm,
    ) -> Result<&mut WorkspaceStore<R>, OnboardingError> {
        self.require(OnboardingPhase::Commitment)?;
        let commitment = validate_commitment(form).map_err(OnboardingError::InvalidCommitment)?;

        let store = self.enter_workspace()?;
        store.save_commitment(commitment)?;
        Ok(store)
    }

    /// Enter the workspace without a commitment
    pub fn skip_commitment(&mut self) -> Result<&mut WorkspaceStore<R>, OnboardingError> {
        self.require(OnboardingPhase::Commitment)?;

        let store = self.enter_workspace()?;
        store.skip_commitment()?;
        Ok(store)
    }

    fn enter_workspace(&mut self) -> Result<&mut WorkspaceStore<R>, OnboardingError> {
        let actual = self.phase();
        let wrong_phase = || OnboardingError::WrongPhase {
            expected: OnboardingPhase::Commitment,
            actual,
        };
        let (Some(context), Some(repo)) = (self.pending.as_ref(), self.repo.as_ref()) else {
            return Err(wrong_phase());
        };

        // Context and repo stay put until nothing else can fail
        WorkspaceStore::<R>::validate_context(context)?;
        let notes = repo.load_notes()?;

        let (Some(context), Some(repo)) = (self.pending.take(), self.repo.take()) else {
            return Err(wrong_phase());
        };
        let store = WorkspaceStore::with_notes(context, repo, notes);
        info!(team_id = %store.context().team_id, "Entering workspace");
        Ok(self.store.insert(store))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hackos_core::{Database, OnboardingState, QuickNote, NO_COMMITMENT_ROLE};
    use hackos_net::{MockLatency, MockTeamService};
    use std::cell::Cell;

    fn fast_service() -> MockTeamService {
        MockTeamService::new(MockLatency {
            create: Duration::from_millis(100),
            slow_create: Duration::from_secs(30),
            join: Duration::from_millis(100),
        })
    }

    fn controller() -> OnboardingController<MockTeamService, Database> {
        OnboardingController::new(
            fast_service(),
            Database::open_in_memory().unwrap(),
            EntrySettings::from_config(&AppConfig::default()),
        )
    }

    fn create_form(team_name: &str) -> CreateTeamForm {
        let start = Utc::now();
        CreateTeamForm {
            user_name: "Alex Chen".to_string(),
            team_name: team_name.to_string(),
            hackathon_name: "TreeHacks".to_string(),
            start_time: Some(start),
            end_time: Some(start + chrono::Duration::hours(36)),
            timezone: "America/Los_Angeles".to_string(),
            team_size: Some(4),
        }
    }

    fn join_form(code: &str) -> JoinTeamForm {
        JoinTeamForm {
            user_name: "Jordan Kim".to_string(),
            invite_code: code.to_string(),
        }
    }

    fn commitment_form() -> CommitmentForm {
        CommitmentForm {
            role: "Frontend Lead".to_string(),
            deliverables: "Landing page and demo flow".to_string(),
            responsibility_share: 40,
            accepted: true,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_create_then_commit() {
        let mut ctl = controller();
        assert_eq!(ctl.phase(), OnboardingPhase::Entry);

        let ctx = ctl.create_team(&create_form("Quantum Quokkas")).await.unwrap();
        assert!(ctx.is_owner);
        assert_eq!(ctx.team_name, "Quantum Quokkas");
        assert_eq!(ctx.invite_code.len(), 6);
        assert_eq!(ctl.phase(), OnboardingPhase::Commitment);

        let store = ctl.submit_commitment(&commitment_form()).unwrap();
        assert_eq!(store.current_user().role.as_deref(), Some("Frontend Lead"));
        assert_eq!(
            store.context().onboarding_state,
            OnboardingState::OnboardingComplete
        );
        assert_eq!(ctl.phase(), OnboardingPhase::Workspace);
    }

    #[tokio::test(start_paused = true)]
    async fn test_join_then_skip() {
        let mut ctl = controller();

        let ctx = ctl.join_team(&join_form("xk42pq")).await.unwrap();
        assert!(!ctx.is_owner);
        assert_eq!(ctx.team_name, "Team XK42PQ");
        assert_eq!(ctx.invite_code, "XK42PQ");
        assert_eq!(ctx.timezone, "UTC");
        assert_eq!(ctx.total_duration(), chrono::Duration::hours(36));

        let store = ctl.skip_commitment().unwrap();
        let me = store.current_user();
        assert_eq!(me.role.as_deref(), Some(NO_COMMITMENT_ROLE));
        assert!(me.commitment.is_none());
        assert!(store.current_user_committed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_remote_failure_stays_in_entry() {
        let mut ctl = controller();

        let err = ctl.join_team(&join_form("000000")).await.unwrap_err();
        assert!(matches!(
            err,
            OnboardingError::Remote(hackos_net::Error::InvalidCode)
        ));
        assert_eq!(ctl.phase(), OnboardingPhase::Entry);
        assert!(ctl.pending_context().is_none());

        let err = ctl.create_team(&create_form("error team")).await.unwrap_err();
        assert!(matches!(err, OnboardingError::Remote(hackos_net::Error::Server(_))));
        assert_eq!(ctl.phase(), OnboardingPhase::Entry);

        // Retry succeeds
        ctl.join_team(&join_form("ABC123")).await.unwrap();
        assert_eq!(ctl.phase(), OnboardingPhase::Commitment);
    }

    #[tokio::test(start_paused = true)]
    async fn test_request_timeout() {
        let mut ctl = controller();

        let err = ctl.create_team(&create_form("slow team")).await.unwrap_err();
        assert!(matches!(
            err,
            OnboardingError::Remote(hackos_net::Error::Timeout(_))
        ));
        assert_eq!(ctl.phase(), OnboardingPhase::Entry);
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_form_never_calls_service() {
        let mut ctl = controller();
        let started = tokio::time::Instant::now();

        let err = ctl.join_team(&join_form("abc")).await.unwrap_err();
        match err {
            OnboardingError::InvalidJoin(errors) => assert!(errors.invite_code.is_some()),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_commitment_stays_in_commitment() {
        let mut ctl = controller();
        ctl.join_team(&join_form("xk42pq")).await.unwrap();

        let mut form = commitment_form();
        form.accepted = false;
        form.role = "  ".to_string();

        match ctl.submit_commitment(&form) {
            Err(OnboardingError::InvalidCommitment(errors)) => {
                assert!(errors.role.is_some());
                assert!(errors.accepted.is_some());
            }
            _ => panic!("expected field errors"),
        }
        assert_eq!(ctl.phase(), OnboardingPhase::Commitment);
        let pending = ctl.pending_context().unwrap();
        assert!(pending.current_user().unwrap().role.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_wrong_phase() {
        let mut ctl = controller();
        assert!(matches!(
            ctl.skip_commitment(),
            Err(OnboardingError::WrongPhase {
                expected: OnboardingPhase::Commitment,
                actual: OnboardingPhase::Entry,
            })
        ));

        ctl.join_team(&join_form("xk42pq")).await.unwrap();
        assert!(ctl.join_team(&join_form("xk42pq")).await.is_err());
        ctl.skip_commitment().unwrap();
        assert!(ctl.submit_commitment(&commitment_form()).is_err());
        assert!(ctl.into_store().is_some());
    }

    /// Fails the first `load_notes` call, then behaves like an empty repository
    struct FlakyRepo {
        failures_left: Cell<u32>,
    }

    impl NoteRepository for FlakyRepo {
        fn load_notes(&self) -> hackos_core::Result<Vec<QuickNote>> {
            let left = self.failures_left.get();
            if left > 0 {
                self.failures_left.set(left - 1);
                return Err(hackos_core::Error::InvalidOperation("disk busy".to_string()));
            }
            Ok(Vec::new())
        }

        fn save_notes(&self, _notes: &[QuickNote]) -> hackos_core::Result<()> {
            Ok(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_store_failure_keeps_commitment_step_retryable() {
        let mut ctl = OnboardingController::new(
            fast_service(),
            FlakyRepo {
                failures_left: Cell::new(1),
            },
            EntrySettings::from_config(&AppConfig::default()),
        );
        ctl.join_team(&join_form("xk42pq")).await.unwrap();

        match ctl.skip_commitment() {
            Err(OnboardingError::Core(e)) => assert!(e.to_string().contains("disk busy")),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("expected the note load to fail"),
        }
        assert_eq!(ctl.phase(), OnboardingPhase::Commitment);
        let pending = ctl.pending_context().unwrap();
        assert_eq!(pending.invite_code, "XK42PQ");
        assert!(pending.current_user().unwrap().role.is_none());

        let store = ctl.skip_commitment().unwrap();
        assert_eq!(store.context().invite_code, "XK42PQ");
        assert_eq!(
            store.current_user().role.as_deref(),
            Some(NO_COMMITMENT_ROLE)
        );
        assert_eq!(ctl.phase(), OnboardingPhase::Workspace);
    }
}
