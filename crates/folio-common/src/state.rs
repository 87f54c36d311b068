//! In-process site state: the loaded portfolio snapshot plus the single open edit session.
//!
//! Readers take an `Arc<Portfolio>` snapshot and never block on edits. Saving a
//! session persists the section, then reloads every section so the snapshot
//! reflects storage. Across processes the last writer wins.

use std::sync::Arc;

use schemars::JsonSchema;
use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tracing::info;

use crate::content::{self, *};
use crate::content_store::ContentStore;
use crate::editor::{Applied, EditOp, EditSession};
use crate::error::CommonError;
use crate::section::{Section, SectionValue};

/// One value per section.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub hero: HeroData,
    pub about: AboutData,
    pub education: Vec<EducationItem>,
    pub certificates: Vec<Certificate>,
    pub skills: Vec<SkillCategory>,
    pub experience: Vec<ExperienceItem>,
    pub activities: Vec<Activity>,
    pub projects: Vec<ProjectItem>,
    pub blog: Vec<BlogPost>,
    pub events: Vec<EventItem>,
    pub contact: ContactData,
    pub theme: ThemeColors,
    pub menu: Vec<MenuItem>,
}

impl Default for Portfolio {
    fn default() -> Self {
        Self {
            hero: content::seed_hero(),
            about: content::seed_about(),
            education: content::seed_education(),
            certificates: content::seed_certificates(),
            skills: content::seed_skills(),
            experience: content::seed_experience(),
            activities: content::seed_activities(),
            projects: content::seed_projects(),
            blog: content::seed_blog(),
            events: content::seed_events(),
            contact: content::seed_contact(),
            theme: content::seed_theme(),
            menu: content::seed_menu(),
        }
    }
}

impl Portfolio {
    pub fn get(&self, section: Section) -> SectionValue {
        match section {
            Section::Hero => SectionValue::Hero(self.hero.clone()),
            Section::About => SectionValue::About(self.about.clone()),
            Section::Education => SectionValue::Education(self.education.clone()),
            Section::Certificates => SectionValue::Certificates(self.certificates.clone()),
            Section::Skills => SectionValue::Skills(self.skills.clone()),
            Section::Experience => SectionValue::Experience(self.experience.clone()),
            Section::Activities => SectionValue::Activities(self.activities.clone()),
            Section::Projects => SectionValue::Projects(self.projects.clone()),
            Section::Blog => SectionValue::Blog(self.blog.clone()),
            Section::Events => SectionValue::Events(self.events.clone()),
            Section::Contact => SectionValue::Contact(self.contact.clone()),
            Section::Theme => SectionValue::Theme(self.theme.clone()),
            Section::Menu => SectionValue::Menu(self.menu.clone()),
        }
    }

    pub fn replace(&mut self, value: SectionValue) {
        match value {
            SectionValue::Hero(v) => self.hero = v,
            SectionValue::About(v) => self.about = v,
            SectionValue::Education(v) => self.education = v,
            SectionValue::Certificates(v) => self.certificates = v,
            SectionValue::Skills(v) => self.skills = v,
            SectionValue::Experience(v) => self.experience = v,
            SectionValue::Activities(v) => self.activities = v,
            SectionValue::Projects(v) => self.projects = v,
            SectionValue::Blog(v) => self.blog = v,
            SectionValue::Events(v) => self.events = v,
            SectionValue::Contact(v) => self.contact = v,
            SectionValue::Theme(v) => self.theme = v,
            SectionValue::Menu(v) => self.menu = v,
        }
    }

    /// Published posts in stored order.
    pub fn published_posts(&self) -> impl Iterator<Item = &BlogPost> {
        self.blog.iter().filter(|post| post.is_published)
    }
}

pub struct SiteState {
    store: ContentStore,
    portfolio: RwLock<Arc<Portfolio>>,
    session: Mutex<Option<EditSession>>,
}

impl SiteState {
    /// Empty state holding seed content; call [`SiteState::load_all`] to read storage.
    pub fn new(store: ContentStore) -> Self {
        Self {
            store,
            portfolio: RwLock::new(Arc::new(Portfolio::default())),
            session: Mutex::new(None),
        }
    }

    /// Build and load in one step.
    pub async fn open(store: ContentStore) -> Self {
        let state = Self::new(store);
        state.load_all().await;
        state
    }

    pub fn store(&self) -> &ContentStore {
        &self.store
    }

    /// Read every section in fixed order, one at a time, and swap in the new snapshot.
    pub async fn load_all(&self) -> Arc<Portfolio> {
        let mut next = Portfolio::default();
        for section in Section::ALL {
            next.replace(self.load_section(section).await);
        }
        let next = Arc::new(next);
        *self.portfolio.write().await = next.clone();
        info!(backend = self.store.backend_kind(), "portfolio loaded");
        next
    }

    pub async fn snapshot(&self) -> Arc<Portfolio> {
        self.portfolio.read().await.clone()
    }

    /// Open a session on `section`, discarding any session already open.
    pub async fn begin_edit(&self, section: Section) -> SectionValue {
        let current = self.snapshot().await.get(section);
        let session = EditSession::open(current);
        let scratch = session.scratch().clone();
        if let Some(previous) = self.session.lock().await.replace(session) {
            info!(section = %previous.section(), "discarded open edit session");
        }
        info!(%section, "edit session opened");
        scratch
    }

    pub async fn active_section(&self) -> Option<Section> {
        self.session.lock().await.as_ref().map(EditSession::section)
    }

    pub async fn apply_edit(&self, op: EditOp) -> Result<Applied, CommonError> {
        self.apply_edit_to(None, op).await
    }

    /// Like [`SiteState::apply_edit`], but refuses with `SectionMismatch` when
    /// `expected` names a section other than the open session's.
    pub async fn apply_edit_to(
        &self,
        expected: Option<Section>,
        op: EditOp,
    ) -> Result<Applied, CommonError> {
        let mut guard = self.session.lock().await;
        let session = guard.as_mut().ok_or(CommonError::NoActiveSession)?;
        ensure_section(session, expected)?;
        session.apply(op)
    }

    pub async fn scratch(&self) -> Result<SectionValue, CommonError> {
        let guard = self.session.lock().await;
        guard
            .as_ref()
            .map(|session| session.scratch().clone())
            .ok_or(CommonError::NoActiveSession)
    }

    /// Validate, persist, reload everything, then close the session.
    ///
    /// A validation failure keeps the session open so the caller can fix the scratch.
    pub async fn save_edit(&self) -> Result<Section, CommonError> {
        self.save_edit_to(None).await
    }

    /// Save only if the open session is on `expected` (when given). A mismatch
    /// leaves both the session and storage untouched.
    pub async fn save_edit_to(&self, expected: Option<Section>) -> Result<Section, CommonError> {
        let mut guard = self.session.lock().await;
        let session = guard.as_ref().ok_or(CommonError::NoActiveSession)?;
        ensure_section(session, expected)?;
        let value = session.scratch().clone();
        value.validate()?;

        let section = value.section();
        self.persist(&value).await;
        self.load_all().await;
        *guard = None;
        info!(%section, "edit session saved");
        Ok(section)
    }

    /// Drop the open session without touching storage. Returns the section it was on.
    pub async fn cancel_edit(&self) -> Option<Section> {
        let section = self.session.lock().await.take().map(|s| s.section());
        if let Some(section) = section {
            info!(%section, "edit session cancelled");
        }
        section
    }

    async fn load_section(&self, section: Section) -> SectionValue {
        let key = section.storage_key();
        let store = &self.store;
        match section {
            Section::Hero => SectionValue::Hero(store.get(key, content::seed_hero()).await),
            Section::About => SectionValue::About(store.get(key, content::seed_about()).await),
            Section::Education => {
                SectionValue::Education(store.get(key, content::seed_education()).await)
            }
            Section::Certificates => {
                SectionValue::Certificates(store.get(key, content::seed_certificates()).await)
            }
            Section::Skills => SectionValue::Skills(store.get(key, content::seed_skills()).await),
            Section::Experience => {
                SectionValue::Experience(store.get(key, content::seed_experience()).await)
            }
            Section::Activities => {
                SectionValue::Activities(store.get(key, content::seed_activities()).await)
            }
            Section::Projects => {
                SectionValue::Projects(store.get(key, content::seed_projects()).await)
            }
            Section::Blog => SectionValue::Blog(store.get(key, content::seed_blog()).await),
            Section::Events => SectionValue::Events(store.get(key, content::seed_events()).await),
            Section::Contact => {
                SectionValue::Contact(store.get(key, content::seed_contact()).await)
            }
            Section::Theme => SectionValue::Theme(store.get(key, content::seed_theme()).await),
            Section::Menu => SectionValue::Menu(store.get(key, content::seed_menu()).await),
        }
    }

    async fn persist(&self, value: &SectionValue) {
        let key = value.section().storage_key();
        let store = &self.store;
        match value {
            SectionValue::Hero(v) => store.set(key, v).await,
            SectionValue::About(v) => store.set(key, v).await,
            SectionValue::Education(v) => store.set(key, v).await,
            SectionValue::Certificates(v) => store.set(key, v).await,
            SectionValue::Skills(v) => store.set(key, v).await,
            SectionValue::Experience(v) => store.set(key, v).await,
            SectionValue::Activities(v) => store.set(key, v).await,
            SectionValue::Projects(v) => store.set(key, v).await,
            SectionValue::Blog(v) => store.set(key, v).await,
            SectionValue::Events(v) => store.set(key, v).await,
            SectionValue::Contact(v) => store.set(key, v).await,
            SectionValue::Theme(v) => store.set(key, v).await,
            SectionValue::Menu(v) => store.set(key, v).await,
        }
    }
}

fn ensure_section(session: &EditSession, expected: Option<Section>) -> Result<(), CommonError> {
    match expected {
        Some(expected) if expected != session.section() => Err(CommonError::SectionMismatch {
            expected: expected.name().to_string(),
            found: session.section().name().to_string(),
        }),
        _ => Ok(()),
    }
}
