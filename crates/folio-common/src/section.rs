//! Section registry: one variant per persisted collection.
//!
//! Each section knows its storage key, display label and seed value, and
//! [`SectionValue`] carries the typed content so every consumer matches
//! exhaustively.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::content::{self, *};
use crate::error::CommonError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Hero,
    About,
    Education,
    Certificates,
    Skills,
    Experience,
    Activities,
    Projects,
    Blog,
    Events,
    Contact,
    Theme,
    Menu,
}

impl Section {
    /// Load order used when refreshing every section.
    pub const ALL: [Section; 13] = [
        Section::Hero,
        Section::About,
        Section::Education,
        Section::Certificates,
        Section::Skills,
        Section::Experience,
        Section::Activities,
        Section::Projects,
        Section::Blog,
        Section::Events,
        Section::Contact,
        Section::Theme,
        Section::Menu,
    ];

    pub fn storage_key(self) -> &'static str {
        match self {
            Section::Hero => "portfolio-hero",
            Section::About => "portfolio-about",
            Section::Education => "portfolio-education",
            Section::Certificates => "portfolio-certificates",
            Section::Skills => "portfolio-skills",
            Section::Experience => "portfolio-experience",
            Section::Activities => "portfolio-activities",
            Section::Projects => "portfolio-projects",
            Section::Blog => "portfolio-blog",
            Section::Events => "portfolio-events",
            Section::Contact => "portfolio-contact",
            Section::Theme => "portfolio-theme",
            Section::Menu => "portfolio-menu",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Section::Hero => "hero",
            Section::About => "about",
            Section::Education => "education",
            Section::Certificates => "certificates",
            Section::Skills => "skills",
            Section::Experience => "experience",
            Section::Activities => "activities",
            Section::Projects => "projects",
            Section::Blog => "blog",
            Section::Events => "events",
            Section::Contact => "contact",
            Section::Theme => "theme",
            Section::Menu => "menu",
        }
    }

    /// Admin panel button label.
    pub fn label(self) -> &'static str {
        match self {
            Section::Hero => "Edit Hero",
            Section::About => "Edit About",
            Section::Education => "Manage Education",
            Section::Certificates => "Manage Certificates",
            Section::Skills => "Update Skills",
            Section::Experience => "Manage Experience",
            Section::Activities => "Manage Activities",
            Section::Projects => "Manage Projects",
            Section::Blog => "Manage Blog",
            Section::Events => "Manage Events",
            Section::Contact => "Edit Contact",
            Section::Theme => "Customize Theme",
            Section::Menu => "Manage Menu",
        }
    }

    /// Singleton sections are edited field by field; the rest are id-keyed lists.
    pub fn is_list(self) -> bool {
        !matches!(
            self,
            Section::Hero | Section::About | Section::Contact | Section::Theme
        )
    }

    pub fn default_value(self) -> SectionValue {
        match self {
            Section::Hero => SectionValue::Hero(content::seed_hero()),
            Section::About => SectionValue::About(content::seed_about()),
            Section::Education => SectionValue::Education(content::seed_education()),
            Section::Certificates => SectionValue::Certificates(content::seed_certificates()),
            Section::Skills => SectionValue::Skills(content::seed_skills()),
            Section::Experience => SectionValue::Experience(content::seed_experience()),
            Section::Activities => SectionValue::Activities(content::seed_activities()),
            Section::Projects => SectionValue::Projects(content::seed_projects()),
            Section::Blog => SectionValue::Blog(content::seed_blog()),
            Section::Events => SectionValue::Events(content::seed_events()),
            Section::Contact => SectionValue::Contact(content::seed_contact()),
            Section::Theme => SectionValue::Theme(content::seed_theme()),
            Section::Menu => SectionValue::Menu(content::seed_menu()),
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Section {
    type Err = CommonError;

    /// Accepts the section name or its storage key, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Section::ALL
            .into_iter()
            .find(|section| section.name() == wanted || section.storage_key() == wanted)
            .ok_or_else(|| CommonError::UnknownSection(s.to_string()))
    }
}

/// Typed content of one section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "section", content = "value", rename_all = "snake_case")]
pub enum SectionValue {
    Hero(HeroData),
    About(AboutData),
    Education(Vec<EducationItem>),
    Certificates(Vec<Certificate>),
    Skills(Vec<SkillCategory>),
    Experience(Vec<ExperienceItem>),
    Activities(Vec<Activity>),
    Projects(Vec<ProjectItem>),
    Blog(Vec<BlogPost>),
    Events(Vec<EventItem>),
    Contact(ContactData),
    Theme(ThemeColors),
    Menu(Vec<MenuItem>),
}

impl SectionValue {
    pub fn section(&self) -> Section {
        match self {
            SectionValue::Hero(_) => Section::Hero,
            SectionValue::About(_) => Section::About,
            SectionValue::Education(_) => Section::Education,
            SectionValue::Certificates(_) => Section::Certificates,
            SectionValue::Skills(_) => Section::Skills,
            SectionValue::Experience(_) => Section::Experience,
            SectionValue::Activities(_) => Section::Activities,
            SectionValue::Projects(_) => Section::Projects,
            SectionValue::Blog(_) => Section::Blog,
            SectionValue::Events(_) => Section::Events,
            SectionValue::Contact(_) => Section::Contact,
            SectionValue::Theme(_) => Section::Theme,
            SectionValue::Menu(_) => Section::Menu,
        }
    }

    /// The bare JSON stored under the section's key (no variant tag).
    pub fn to_json(&self) -> serde_json::Value {
        let value = match self {
            SectionValue::Hero(v) => serde_json::to_value(v),
            SectionValue::About(v) => serde_json::to_value(v),
            SectionValue::Education(v) => serde_json::to_value(v),
            SectionValue::Certificates(v) => serde_json::to_value(v),
            SectionValue::Skills(v) => serde_json::to_value(v),
            SectionValue::Experience(v) => serde_json::to_value(v),
            SectionValue::Activities(v) => serde_json::to_value(v),
            SectionValue::Projects(v) => serde_json::to_value(v),
            SectionValue::Blog(v) => serde_json::to_value(v),
            SectionValue::Events(v) => serde_json::to_value(v),
            SectionValue::Contact(v) => serde_json::to_value(v),
            SectionValue::Theme(v) => serde_json::to_value(v),
            SectionValue::Menu(v) => serde_json::to_value(v),
        };
        value.unwrap_or(serde_json::Value::Null)
    }

    /// JSON text exactly as [`ContentStore::set`](crate::content_store::ContentStore::set) writes it.
    pub fn to_json_string(&self) -> String {
        let text = match self {
            SectionValue::Hero(v) => serde_json::to_string(v),
            SectionValue::About(v) => serde_json::to_string(v),
            SectionValue::Education(v) => serde_json::to_string(v),
            SectionValue::Certificates(v) => serde_json::to_string(v),
            SectionValue::Skills(v) => serde_json::to_string(v),
            SectionValue::Experience(v) => serde_json::to_string(v),
            SectionValue::Activities(v) => serde_json::to_string(v),
            SectionValue::Projects(v) => serde_json::to_string(v),
            SectionValue::Blog(v) => serde_json::to_string(v),
            SectionValue::Events(v) => serde_json::to_string(v),
            SectionValue::Contact(v) => serde_json::to_string(v),
            SectionValue::Theme(v) => serde_json::to_string(v),
            SectionValue::Menu(v) => serde_json::to_string(v),
        };
        text.unwrap_or_default()
    }

    /// Fingerprint of this value. Equal to the stored fingerprint when the
    /// value was written by this crate and has not changed since.
    pub fn fingerprint(&self) -> String {
        crate::content_store::fingerprint_of(&self.to_json_string())
    }

    /// Parse bare section JSON (as stored) into the typed value for `section`.
    pub fn from_json(section: Section, json: serde_json::Value) -> Result<Self, CommonError> {
        fn parse<T: serde::de::DeserializeOwned>(
            section: Section,
            json: serde_json::Value,
        ) -> Result<T, CommonError> {
            serde_json::from_value(json).map_err(|e| CommonError::InvalidValue {
                field: section.name().to_string(),
                message: e.to_string(),
            })
        }

        Ok(match section {
            Section::Hero => SectionValue::Hero(parse(section, json)?),
            Section::About => SectionValue::About(parse(section, json)?),
            Section::Education => SectionValue::Education(parse(section, json)?),
            Section::Certificates => SectionValue::Certificates(parse(section, json)?),
            Section::Skills => SectionValue::Skills(parse(section, json)?),
            Section::Experience => SectionValue::Experience(parse(section, json)?),
            Section::Activities => SectionValue::Activities(parse(section, json)?),
            Section::Projects => SectionValue::Projects(parse(section, json)?),
            Section::Blog => SectionValue::Blog(parse(section, json)?),
            Section::Events => SectionValue::Events(parse(section, json)?),
            Section::Contact => SectionValue::Contact(parse(section, json)?),
            Section::Theme => SectionValue::Theme(parse(section, json)?),
            Section::Menu => SectionValue::Menu(parse(section, json)?),
        })
    }

    /// Reject values whose records cannot be addressed by id.
    ///
    /// Only identity is checked. URLs, emails and colors are accepted as given.
    pub fn validate(&self) -> Result<(), CommonError> {
        let section = self.section();
        let result = match self {
            SectionValue::Hero(hero) => unique_ids(hero.social_links.iter().map(|l| l.id.as_str())),
            SectionValue::About(_) | SectionValue::Contact(_) | SectionValue::Theme(_) => Ok(()),
            SectionValue::Education(items) => unique_ids(items.iter().map(|i| i.id.as_str())),
            SectionValue::Certificates(items) => unique_ids(items.iter().map(|i| i.id.as_str())),
            SectionValue::Skills(categories) => {
                unique_ids(categories.iter().map(|c| c.id.as_str())).and_then(|_| {
                    categories.iter().try_for_each(|c| {
                        unique_ids(c.skills.iter().map(|s| s.id.as_str()))
                            .map_err(|m| format!("category {}: {m}", c.id))
                    })
                })
            }
            SectionValue::Experience(items) => unique_ids(items.iter().map(|i| i.id.as_str())),
            SectionValue::Activities(items) => unique_ids(items.iter().map(|i| i.id.as_str())),
            SectionValue::Projects(items) => unique_ids(items.iter().map(|i| i.id.as_str())),
            SectionValue::Blog(items) => unique_ids(items.iter().map(|i| i.id.as_str())),
            SectionValue::Events(items) => unique_ids(items.iter().map(|i| i.id.as_str())),
            SectionValue::Menu(items) => unique_ids(items.iter().map(|i| i.id.as_str())),
        };
        result.map_err(|message| CommonError::Validation {
            section: section.name().to_string(),
            message,
        })
    }
}

fn unique_ids<'a>(ids: impl Iterator<Item = &'a str>) -> Result<(), String> {
    let mut seen = HashSet::new();
    for id in ids {
        if id.trim().is_empty() {
            return Err("record with empty id".to_string());
        }
        if !seen.insert(id) {
            return Err(format!("duplicate id {id}"));
        }
    }
    Ok(())
}
