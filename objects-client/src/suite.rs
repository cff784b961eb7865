//! The ordered CRUD scenario run against the objects API.
//!
//! Six cases run one after another on a single client. The create case stores
//! the server-assigned id in [`SuiteState`]; every later case reads it.

use std::fmt::Display;
use std::time::{Duration, Instant};

use objects_shared::object::ObjectBody;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::api::{ApiError, ObjectsApi};
use crate::config::Config;
use crate::expect;
use crate::expect::AssertionError;
use crate::fixtures::{FixtureError, Fixtures, load_fixtures};

#[derive(Debug, thiserror::Error)]
pub enum CaseError {
    #[error(transparent)]
    Fixture(#[from] FixtureError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Assertion(#[from] AssertionError),

    #[error("No object id available; the create case did not produce one")]
    MissingObjectId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    AddObject,
    RetrieveAdded,
    UpdateObject,
    RetrieveUpdated,
    DeleteObject,
    WrongUrl,
}

impl Case {
    /// Declared execution order.
    pub const ALL: [Case; 6] = [
        Case::AddObject,
        Case::RetrieveAdded,
        Case::UpdateObject,
        Case::RetrieveUpdated,
        Case::DeleteObject,
        Case::WrongUrl,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Case::AddObject => "Add a new object",
            Case::RetrieveAdded => "Retrieve newly added object",
            Case::UpdateObject => "Update the object",
            Case::RetrieveUpdated => "Retrieve updated object",
            Case::DeleteObject => "Delete the object",
            Case::WrongUrl => "wrong url",
        }
    }
}

/// State carried between cases.
#[derive(Debug, Clone, Default)]
pub struct SuiteState {
    /// `id` from the create response, exactly as the server sent it
    pub object_id: Option<Value>,
}

impl SuiteState {
    fn id(&self) -> Result<&Value, CaseError> {
        self.object_id.as_ref().ok_or(CaseError::MissingObjectId)
    }

    /// The id as it appears in a URL path segment.
    pub fn id_segment(&self) -> Result<String, CaseError> {
        Ok(match self.id()? {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Passed,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct CaseOutcome {
    pub case: Case,
    pub outcome: Outcome,
    pub elapsed: Duration,
}

#[derive(Debug, Clone, Default)]
pub struct SuiteReport {
    pub outcomes: Vec<CaseOutcome>,
}

impl SuiteReport {
    pub fn passed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.outcome == Outcome::Passed)
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.passed()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    pub fn outcome(&self, case: Case) -> Option<&Outcome> {
        self.outcomes
            .iter()
            .find(|o| o.case == case)
            .map(|o| &o.outcome)
    }
}

impl Display for SuiteReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "RESTful API Automation")?;
        for o in &self.outcomes {
            let ms = o.elapsed.as_millis();
            match &o.outcome {
                Outcome::Passed => writeln!(f, "  PASS  {} ({}ms)", o.case.title(), ms)?,
                Outcome::Failed(msg) => {
                    writeln!(f, "  FAIL  {} ({}ms)", o.case.title(), ms)?;
                    writeln!(f, "        {}", msg)?;
                }
            }
        }
        write!(f, "{} passed, {} failed", self.passed(), self.failed())
    }
}

pub struct Suite {
    api: ObjectsApi,
    config: Config,
    fixtures: Fixtures,
}

impl Suite {
    pub fn new(config: Config, fixtures: Fixtures) -> Result<Self, ApiError> {
        let api = ObjectsApi::from_config(&config)?;
        Ok(Self {
            api,
            config,
            fixtures,
        })
    }

    /// Load the fixture sheet named by `config` and build the suite.
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let fixtures = load_fixtures(&config.fixture_path, &config.sheet_name)?;
        if fixtures.is_empty() {
            warn!("Fixture sheet '{}' has no data rows", config.sheet_name);
        } else {
            debug!("{} fixture rows available", fixtures.len());
        }
        Ok(Self::new(config, fixtures)?)
    }

    /// Run every case in order. A failing case is recorded and the run moves
    /// on with whatever state it left behind.
    pub async fn run(&self) -> SuiteReport {
        let mut state = SuiteState::default();
        let mut report = SuiteReport::default();
        info!("Running {} cases against {}", Case::ALL.len(), self.api.api_url());

        for case in Case::ALL {
            let started = Instant::now();
            let outcome = match self.run_case(case, &mut state).await {
                Ok(()) => {
                    info!("✓ {}", case.title());
                    Outcome::Passed
                }
                Err(e) => {
                    error!("✗ {}: {}", case.title(), e);
                    Outcome::Failed(e.to_string())
                }
            };
            report.outcomes.push(CaseOutcome {
                case,
                outcome,
                elapsed: started.elapsed(),
            });
        }

        report
    }

    pub async fn run_case(&self, case: Case, state: &mut SuiteState) -> Result<(), CaseError> {
        match case {
            Case::AddObject => self.add_object(state).await,
            Case::RetrieveAdded => self.retrieve(state, "Object retrieved").await,
            Case::UpdateObject => self.update_object(state).await,
            Case::RetrieveUpdated => self.retrieve(state, "Updated object retrieved").await,
            Case::DeleteObject => self.delete_object(state).await,
            Case::WrongUrl => self.wrong_url(state).await,
        }
    }

    async fn add_object(&self, state: &mut SuiteState) -> Result<(), CaseError> {
        let data = self.fixtures.row(self.config.create_row)?;
        debug!("Creating object from fixture row {}: {}", self.config.create_row, data);
        let res = self.api.create(&ObjectBody::from_fixture(&data)).await?;

        let body = res.json()?;
        state.object_id = body.get("id").cloned();
        info!("{}", body);

        expect::status_to_be(&res, 200)?;
        expect::to_be_defined("id", state.object_id.as_ref())?;
        expect::to_be(&body, "name", data.name.as_ref())?;
        expect::to_be(&body, "data.Year", data.year.as_ref())?;
        expect::to_be(&body, "data.Price", data.price.as_ref())?;
        expect::to_be(&body, "data.CPUModel", data.cpu_model.as_ref())?;
        expect::to_be(&body, "data.Capacity", data.capacity.as_ref())?;
        info!("Object added with ID: {}", state.id_segment()?);
        Ok(())
    }

    async fn retrieve(&self, state: &SuiteState, label: &str) -> Result<(), CaseError> {
        let res = self.api.get(&state.id_segment()?).await?;
        let body = res.json()?;

        expect::status_to_be(&res, 200)?;
        expect::to_be(&body, "id", Some(state.id()?))?;
        info!("{}: {}", label, body);
        Ok(())
    }

    async fn update_object(&self, state: &SuiteState) -> Result<(), CaseError> {
        let data = self.fixtures.row(self.config.update_row)?;
        let updated = data.with_price(self.config.updated_price.as_str());

        let res = self
            .api
            .update(&state.id_segment()?, &ObjectBody::from_fixture(&updated))
            .await?;
        let body = res.json()?;

        expect::status_to_be(&res, 200)?;
        expect::to_be(&body, "id", Some(state.id()?))?;
        expect::to_be(&body, "name", updated.name.as_ref())?;
        expect::to_be(&body, "data.Price", updated.price.as_ref())?;
        info!("Object updated: {}", body);
        Ok(())
    }

    async fn delete_object(&self, state: &SuiteState) -> Result<(), CaseError> {
        let id = state.id_segment()?;
        let res = self.api.delete(&id).await?;
        let body = res.json()?;

        expect::status_to_be(&res, 200)?;
        expect::to_contain(&body, "message", "deleted")?;
        info!("Object with ID {} deleted.", id);
        Ok(())
    }

    async fn wrong_url(&self, state: &SuiteState) -> Result<(), CaseError> {
        let url = self.config.wrong_object_url(&state.id_segment()?);
        let res = self.api.get_url(&url).await?;
        let body = res.json()?;

        expect::status_to_be(&res, 404)?;
        info!("404 Error Verified - Response: {}", body);
        Ok(())
    }
}
