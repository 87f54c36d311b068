/// Edit sessions over a scratch copy of one section.
///
/// A session clones the section's current value. Operations mutate only the clone:
/// singleton sections take field replacement, list sections take id-keyed
/// add/update/delete (linear scan by id). A failed operation leaves the scratch
/// untouched. Committing is the caller's job (see `state::SiteState::save_edit`);
/// dropping the session discards it.
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::content::*;
use crate::error::CommonError;
use crate::ids::new_record_id;
use crate::section::{Section, SectionValue};

/// One mutation of the scratch value. Field names use the persisted camelCase layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditOp {
    /// Replace the whole scratch with bare section JSON.
    Replace { value: Value },
    /// Singleton sections: replace one field.
    SetField { field: String, value: Value },
    /// List sections: append a blank record with a fresh id.
    AddItem,
    /// List sections: replace one field of the record with `id`.
    UpdateItem { id: String, field: String, value: Value },
    /// List sections: remove the record with `id`.
    DeleteItem { id: String },
    SetSocialUrl { id: String, url: String },
    RenameCategory { category_id: String, title: String },
    AddSkill { category_id: String },
    RenameSkill { category_id: String, skill_id: String, name: String },
    DeleteSkill { category_id: String, skill_id: String },
    /// Image payload is a URL or a data URI.
    AddImage { id: String, image: String },
    DeleteImage { id: String, index: usize },
    AddVideo { id: String },
    SetVideo { id: String, index: usize, url: String },
    DeleteVideo { id: String, index: usize },
}

impl EditOp {
    pub fn name(&self) -> &'static str {
        match self {
            EditOp::Replace { .. } => "replace",
            EditOp::SetField { .. } => "set_field",
            EditOp::AddItem => "add_item",
            EditOp::UpdateItem { .. } => "update_item",
            EditOp::DeleteItem { .. } => "delete_item",
            EditOp::SetSocialUrl { .. } => "set_social_url",
            EditOp::RenameCategory { .. } => "rename_category",
            EditOp::AddSkill { .. } => "add_skill",
            EditOp::RenameSkill { .. } => "rename_skill",
            EditOp::DeleteSkill { .. } => "delete_skill",
            EditOp::AddImage { .. } => "add_image",
            EditOp::DeleteImage { .. } => "delete_image",
            EditOp::AddVideo { .. } => "add_video",
            EditOp::SetVideo { .. } => "set_video",
            EditOp::DeleteVideo { .. } => "delete_video",
        }
    }
}

/// Result of a successful operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Applied {
    /// Id assigned by `add_item` / `add_skill`.
    pub created_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct EditSession {
    original: SectionValue,
    scratch: SectionValue,
}

impl EditSession {
    pub fn open(current: SectionValue) -> Self {
        Self {
            scratch: current.clone(),
            original: current,
        }
    }

    pub fn section(&self) -> Section {
        self.scratch.section()
    }

    pub fn scratch(&self) -> &SectionValue {
        &self.scratch
    }

    pub fn is_dirty(&self) -> bool {
        self.scratch != self.original
    }

    pub fn apply(&mut self, op: EditOp) -> Result<Applied, CommonError> {
        let mut next = self.scratch.clone();
        let created_id = apply_to(&mut next, op)?;
        self.scratch = next;
        Ok(Applied { created_id })
    }

    pub fn into_value(self) -> SectionValue {
        self.scratch
    }
}

// --- record traits ---

trait Keyed {
    fn id(&self) -> &str;
}

/// Records the editor can create from nothing.
trait Blank: Keyed + Sized {
    fn blank(id: String, existing: usize) -> Self;
}

/// Records carrying image and (optionally) video lists.
trait MediaRecord {
    fn images(&mut self) -> &mut Vec<String>;
    fn videos(&mut self) -> Option<&mut Vec<String>>;
}

macro_rules! keyed {
    ($($ty:ty),* $(,)?) => {
        $(impl Keyed for $ty {
            fn id(&self) -> &str {
                &self.id
            }
        })*
    };
}

keyed!(
    EducationItem,
    Certificate,
    SkillCategory,
    SkillItem,
    ExperienceItem,
    Activity,
    ProjectItem,
    BlogPost,
    EventItem,
    MenuItem,
);

impl Blank for EducationItem {
    fn blank(id: String, _: usize) -> Self {
        Self { id, ..Default::default() }
    }
}

impl Blank for Certificate {
    fn blank(id: String, _: usize) -> Self {
        Self { id, ..Default::default() }
    }
}

impl Blank for ExperienceItem {
    fn blank(id: String, _: usize) -> Self {
        Self {
            id,
            icon_name: ExperienceIcon::ContentWriter,
            ..Default::default()
        }
    }
}

impl Blank for Activity {
    fn blank(id: String, _: usize) -> Self {
        Self {
            id,
            icon_name: ActivityIcon::Extracurricular,
            ..Default::default()
        }
    }
}

impl Blank for ProjectItem {
    fn blank(id: String, _: usize) -> Self {
        Self {
            id,
            title: "New Project".to_string(),
            ..Default::default()
        }
    }
}

impl Blank for BlogPost {
    fn blank(id: String, _: usize) -> Self {
        Self {
            id,
            title: "New Post".to_string(),
            is_published: false,
            ..Default::default()
        }
    }
}

impl Blank for EventItem {
    fn blank(id: String, existing: usize) -> Self {
        Self {
            id,
            title: "New Event".to_string(),
            order: existing as i64 + 1,
            ..Default::default()
        }
    }
}

impl Blank for MenuItem {
    fn blank(id: String, existing: usize) -> Self {
        Self {
            id,
            label: "New Link".to_string(),
            link: "#".to_string(),
            is_route: false,
            order: existing as i64 + 1,
        }
    }
}

impl MediaRecord for ProjectItem {
    fn images(&mut self) -> &mut Vec<String> {
        &mut self.images
    }
    fn videos(&mut self) -> Option<&mut Vec<String>> {
        Some(&mut self.videos)
    }
}

impl MediaRecord for BlogPost {
    fn images(&mut self) -> &mut Vec<String> {
        &mut self.images
    }
    fn videos(&mut self) -> Option<&mut Vec<String>> {
        Some(&mut self.videos)
    }
}

impl MediaRecord for EventItem {
    fn images(&mut self) -> &mut Vec<String> {
        &mut self.images
    }
    fn videos(&mut self) -> Option<&mut Vec<String>> {
        None
    }
}

// --- dispatch ---

fn apply_to(value: &mut SectionValue, op: EditOp) -> Result<Option<String>, CommonError> {
    let section = value.section();
    let op_name = op.name();
    let unsupported = || CommonError::UnsupportedOp {
        section: section.name().to_string(),
        op: op_name.to_string(),
    };

    match op {
        EditOp::Replace { value: json } => {
            *value = SectionValue::from_json(section, json)?;
            Ok(None)
        }
        EditOp::SetField { field, value: v } => {
            match value {
                SectionValue::Hero(hero) => *hero = replace_field(section, &*hero, &field, v)?,
                SectionValue::About(about) => *about = replace_field(section, &*about, &field, v)?,
                SectionValue::Contact(contact) => {
                    *contact = replace_field(section, &*contact, &field, v)?
                }
                SectionValue::Theme(theme) => *theme = replace_field(section, &*theme, &field, v)?,
                _ => return Err(unsupported()),
            }
            Ok(None)
        }
        EditOp::AddItem => match value {
            SectionValue::Education(items) => Ok(Some(add_blank(items))),
            SectionValue::Certificates(items) => Ok(Some(add_blank(items))),
            SectionValue::Experience(items) => Ok(Some(add_blank(items))),
            SectionValue::Activities(items) => Ok(Some(add_blank(items))),
            SectionValue::Projects(items) => Ok(Some(add_blank(items))),
            SectionValue::Blog(items) => Ok(Some(add_blank(items))),
            SectionValue::Events(items) => Ok(Some(add_blank(items))),
            SectionValue::Menu(items) => Ok(Some(add_blank(items))),
            _ => Err(unsupported()),
        },
        EditOp::UpdateItem { id, field, value: v } => {
            match value {
                SectionValue::Education(items) => update_item(section, items, &id, &field, v)?,
                SectionValue::Certificates(items) => update_item(section, items, &id, &field, v)?,
                SectionValue::Skills(items) => update_item(section, items, &id, &field, v)?,
                SectionValue::Experience(items) => update_item(section, items, &id, &field, v)?,
                SectionValue::Activities(items) => update_item(section, items, &id, &field, v)?,
                SectionValue::Projects(items) => update_item(section, items, &id, &field, v)?,
                SectionValue::Blog(items) => update_item(section, items, &id, &field, v)?,
                SectionValue::Events(items) => update_item(section, items, &id, &field, v)?,
                SectionValue::Menu(items) => update_item(section, items, &id, &field, v)?,
                _ => return Err(unsupported()),
            }
            Ok(None)
        }
        EditOp::DeleteItem { id } => {
            match value {
                SectionValue::Education(items) => delete_item(section, items, &id)?,
                SectionValue::Certificates(items) => delete_item(section, items, &id)?,
                SectionValue::Skills(items) => delete_item(section, items, &id)?,
                SectionValue::Experience(items) => delete_item(section, items, &id)?,
                SectionValue::Activities(items) => delete_item(section, items, &id)?,
                SectionValue::Projects(items) => delete_item(section, items, &id)?,
                SectionValue::Blog(items) => delete_item(section, items, &id)?,
                SectionValue::Events(items) => delete_item(section, items, &id)?,
                SectionValue::Menu(items) => delete_item(section, items, &id)?,
                _ => return Err(unsupported()),
            }
            Ok(None)
        }
        EditOp::SetSocialUrl { id, url } => {
            let SectionValue::Hero(hero) = value else {
                return Err(unsupported());
            };
            let link = hero
                .social_links
                .iter_mut()
                .find(|l| l.id == id)
                .ok_or_else(|| unknown_item(section, &id))?;
            link.url = url;
            Ok(None)
        }
        EditOp::RenameCategory { category_id, title } => {
            let SectionValue::Skills(categories) = value else {
                return Err(unsupported());
            };
            find_mut(section, categories, &category_id)?.title = title;
            Ok(None)
        }
        EditOp::AddSkill { category_id } => {
            let SectionValue::Skills(categories) = value else {
                return Err(unsupported());
            };
            let category = find_mut(section, categories, &category_id)?;
            let id = new_record_id(category.skills.iter().map(|s| s.id.as_str()));
            category.skills.push(SkillItem {
                id: id.clone(),
                name: "New Skill".to_string(),
            });
            Ok(Some(id))
        }
        EditOp::RenameSkill {
            category_id,
            skill_id,
            name,
        } => {
            let SectionValue::Skills(categories) = value else {
                return Err(unsupported());
            };
            let category = find_mut(section, categories, &category_id)?;
            find_mut(section, &mut category.skills, &skill_id)?.name = name;
            Ok(None)
        }
        EditOp::DeleteSkill {
            category_id,
            skill_id,
        } => {
            let SectionValue::Skills(categories) = value else {
                return Err(unsupported());
            };
            let category = find_mut(section, categories, &category_id)?;
            delete_item(section, &mut category.skills, &skill_id)?;
            Ok(None)
        }
        EditOp::AddImage { id, image } => {
            with_media(value, &id, unsupported, |record| {
                record.images().push(image);
                Ok(())
            })?;
            Ok(None)
        }
        EditOp::DeleteImage { id, index } => {
            with_media(value, &id, unsupported, |record| {
                remove_at(record.images(), "images", index)
            })?;
            Ok(None)
        }
        EditOp::AddVideo { id } => {
            with_media(value, &id, unsupported, |record| {
                record.videos().ok_or_else(unsupported)?.push(String::new());
                Ok(())
            })?;
            Ok(None)
        }
        EditOp::SetVideo { id, index, url } => {
            with_media(value, &id, unsupported, |record| {
                let videos = record.videos().ok_or_else(unsupported)?;
                let len = videos.len();
                let slot = videos.get_mut(index).ok_or(CommonError::IndexOutOfRange {
                    field: "videos".to_string(),
                    index,
                    len,
                })?;
                *slot = url;
                Ok(())
            })?;
            Ok(None)
        }
        EditOp::DeleteVideo { id, index } => {
            with_media(value, &id, unsupported, |record| {
                remove_at(record.videos().ok_or_else(unsupported)?, "videos", index)
            })?;
            Ok(None)
        }
    }
}

fn with_media(
    value: &mut SectionValue,
    id: &str,
    unsupported: impl Fn() -> CommonError,
    f: impl FnOnce(&mut dyn MediaRecord) -> Result<(), CommonError>,
) -> Result<(), CommonError> {
    let section = value.section();
    let record: &mut dyn MediaRecord = match value {
        SectionValue::Projects(items) => find_mut(section, items, id)?,
        SectionValue::Blog(items) => find_mut(section, items, id)?,
        SectionValue::Events(items) => find_mut(section, items, id)?,
        _ => return Err(unsupported()),
    };
    f(record)
}

fn unknown_item(section: Section, id: &str) -> CommonError {
    CommonError::UnknownItem {
        section: section.name().to_string(),
        id: id.to_string(),
    }
}

fn find_mut<'a, T: Keyed>(
    section: Section,
    items: &'a mut [T],
    id: &str,
) -> Result<&'a mut T, CommonError> {
    items
        .iter_mut()
        .find(|item| item.id() == id)
        .ok_or_else(|| unknown_item(section, id))
}

fn add_blank<T: Blank>(items: &mut Vec<T>) -> String {
    let id = new_record_id(items.iter().map(Keyed::id));
    items.push(T::blank(id.clone(), items.len()));
    id
}

fn update_item<T>(
    section: Section,
    items: &mut [T],
    id: &str,
    field: &str,
    value: Value,
) -> Result<(), CommonError>
where
    T: Keyed + Serialize + DeserializeOwned,
{
    let record = find_mut(section, items, id)?;
    *record = replace_field(section, &*record, field, value)?;
    Ok(())
}

/// Removes exactly the first record with `id`.
fn delete_item<T: Keyed>(section: Section, items: &mut Vec<T>, id: &str) -> Result<(), CommonError> {
    let index = items
        .iter()
        .position(|item| item.id() == id)
        .ok_or_else(|| unknown_item(section, id))?;
    items.remove(index);
    Ok(())
}

fn remove_at(list: &mut Vec<String>, field: &str, index: usize) -> Result<(), CommonError> {
    if index >= list.len() {
        return Err(CommonError::IndexOutOfRange {
            field: field.to_string(),
            index,
            len: list.len(),
        });
    }
    list.remove(index);
    Ok(())
}

/// Replace one top-level field by round-tripping the record through JSON, so the
/// record's own serde shape decides what is accepted.
fn replace_field<T>(section: Section, record: &T, field: &str, value: Value) -> Result<T, CommonError>
where
    T: Serialize + DeserializeOwned,
{
    let invalid = |message: String| CommonError::InvalidValue {
        field: field.to_string(),
        message,
    };
    if field == "id" {
        return Err(invalid("ids are assigned on creation and cannot change".to_string()));
    }

    let mut json = serde_json::to_value(record).map_err(|e| invalid(e.to_string()))?;
    let Some(object) = json.as_object_mut() else {
        return Err(invalid("record is not an object".to_string()));
    };
    if !object.contains_key(field) {
        return Err(CommonError::UnknownField {
            section: section.name().to_string(),
            field: field.to_string(),
        });
    }

    let value = if field == "order" {
        Value::from(coerce_order(&value))
    } else {
        value
    };
    object.insert(field.to_string(), value);
    serde_json::from_value(json).map_err(|e| invalid(e.to_string()))
}

/// Order fields take any integer, or the leading integer of a string; anything else is 0.
fn coerce_order(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
            .unwrap_or(0),
        Value::String(s) => leading_int(s).unwrap_or(0),
        _ => 0,
    }
}

fn leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn session(section: Section) -> EditSession {
        EditSession::open(section.default_value())
    }

    fn menu(s: &EditSession) -> &Vec<MenuItem> {
        match s.scratch() {
            SectionValue::Menu(items) => items,
            other => panic!("expected menu, got {other:?}"),
        }
    }

    #[test]
    fn add_item_assigns_fresh_ids() {
        let mut s = session(Section::Menu);
        let before: Vec<String> = menu(&s).iter().map(|m| m.id.clone()).collect();
        let first = s.apply(EditOp::AddItem).unwrap().created_id.unwrap();
        let second = s.apply(EditOp::AddItem).unwrap().created_id.unwrap();
        assert!(!before.contains(&first));
        assert_ne!(first, second);

        let items = menu(&s);
        let added = items.iter().find(|m| m.id == first).unwrap();
        assert_eq!(added.label, "New Link");
        assert_eq!(added.link, "#");
        assert_eq!(added.order, 12);
        assert!(s.is_dirty());
    }

    #[test]
    fn blank_defaults_follow_section() {
        let mut s = session(Section::Events);
        let id = s.apply(EditOp::AddItem).unwrap().created_id.unwrap();
        let SectionValue::Events(events) = s.scratch() else { unreachable!() };
        let event = events.iter().find(|e| e.id == id).unwrap();
        assert_eq!(event.title, "New Event");
        assert_eq!(event.order, 2);

        let mut s = session(Section::Blog);
        s.apply(EditOp::AddItem).unwrap();
        let SectionValue::Blog(posts) = s.scratch() else { unreachable!() };
        assert_eq!(posts[1].title, "New Post");
        assert!(!posts[1].is_published);
    }

    #[test]
    fn delete_removes_exactly_one_record() {
        let mut s = session(Section::Menu);
        let before = menu(&s).clone();
        s.apply(EditOp::DeleteItem { id: "6".to_string() }).unwrap();
        let after = menu(&s);
        assert_eq!(after.len(), before.len() - 1);
        let expected: Vec<&MenuItem> = before.iter().filter(|m| m.id != "6").collect();
        assert_eq!(after.iter().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn unknown_item_leaves_scratch_unchanged() {
        let mut s = session(Section::Certificates);
        let err = s.apply(EditOp::DeleteItem { id: "404".to_string() }).unwrap_err();
        assert!(matches!(err, CommonError::UnknownItem { .. }));
        assert!(!s.is_dirty());
    }

    #[test]
    fn update_item_replaces_a_single_field() {
        let mut s = session(Section::Education);
        s.apply(EditOp::UpdateItem {
            id: "2".to_string(),
            field: "campusImage".to_string(),
            value: json!("data:image/png;base64,AAAA"),
        })
        .unwrap();
        let SectionValue::Education(items) = s.scratch() else { unreachable!() };
        assert_eq!(items[1].campus_image, "data:image/png;base64,AAAA");
        assert_eq!(items[1].institution, "A.B.C.D College");
        assert_eq!(items[0], crate::content::seed_education()[0]);
    }

    #[test]
    fn update_rejects_bad_fields_and_types() {
        let mut s = session(Section::Menu);
        let unknown = s.apply(EditOp::UpdateItem {
            id: "1".to_string(),
            field: "colour".to_string(),
            value: json!("x"),
        });
        assert!(matches!(unknown, Err(CommonError::UnknownField { .. })));

        let wrong_type = s.apply(EditOp::UpdateItem {
            id: "1".to_string(),
            field: "isRoute".to_string(),
            value: json!("yes"),
        });
        assert!(matches!(wrong_type, Err(CommonError::InvalidValue { .. })));

        let id_change = s.apply(EditOp::UpdateItem {
            id: "1".to_string(),
            field: "id".to_string(),
            value: json!("99"),
        });
        assert!(matches!(id_change, Err(CommonError::InvalidValue { .. })));
        assert!(!s.is_dirty());
    }

    #[test]
    fn order_values_are_coerced() {
        let mut s = session(Section::Menu);
        for (input, expected) in [
            (json!(7), 7),
            (json!("12abc"), 12),
            (json!(" -3"), -3),
            (json!("abc"), 0),
            (json!(4.9), 4),
            (json!(null), 0),
        ] {
            s.apply(EditOp::UpdateItem {
                id: "1".to_string(),
                field: "order".to_string(),
                value: input.clone(),
            })
            .unwrap();
            assert_eq!(menu(&s)[0].order, expected, "input {input}");
        }
    }

    #[test]
    fn singleton_fields_and_social_links() {
        let mut s = session(Section::Hero);
        s.apply(EditOp::SetField {
            field: "tagline".to_string(),
            value: json!("Builder"),
        })
        .unwrap();
        s.apply(EditOp::SetSocialUrl {
            id: "5".to_string(),
            url: "https://github.com/me".to_string(),
        })
        .unwrap();
        let SectionValue::Hero(hero) = s.scratch() else { unreachable!() };
        assert_eq!(hero.tagline, "Builder");
        assert_eq!(hero.social_links[4].url, "https://github.com/me");
        assert_eq!(hero.social_links[0].url, "#");

        let err = s.apply(EditOp::AddItem).unwrap_err();
        assert!(matches!(err, CommonError::UnsupportedOp { .. }));
    }

    #[test]
    fn theme_accepts_any_color_text() {
        let mut s = session(Section::Theme);
        s.apply(EditOp::SetField {
            field: "bgMid".to_string(),
            value: json!("not a color"),
        })
        .unwrap();
        let SectionValue::Theme(theme) = s.scratch() else { unreachable!() };
        assert_eq!(theme.bg_mid, "not a color");
    }

    #[test]
    fn skill_operations() {
        let mut s = session(Section::Skills);
        assert!(matches!(
            s.apply(EditOp::AddItem),
            Err(CommonError::UnsupportedOp { .. })
        ));
        let id = s
            .apply(EditOp::AddSkill {
                category_id: "3".to_string(),
            })
            .unwrap()
            .created_id
            .unwrap();
        s.apply(EditOp::RenameSkill {
            category_id: "3".to_string(),
            skill_id: id.clone(),
            name: "Figma".to_string(),
        })
        .unwrap();
        s.apply(EditOp::DeleteSkill {
            category_id: "3".to_string(),
            skill_id: "s11".to_string(),
        })
        .unwrap();
        s.apply(EditOp::RenameCategory {
            category_id: "3".to_string(),
            title: "Design".to_string(),
        })
        .unwrap();

        let SectionValue::Skills(categories) = s.scratch() else { unreachable!() };
        let design = &categories[2];
        assert_eq!(design.title, "Design");
        let names: Vec<&str> = design.skills.iter().map(|k| k.name.as_str()).collect();
        assert_eq!(names, vec!["Photoshop", "Illustrator", "Figma"]);
    }

    #[test]
    fn media_operations() {
        let mut s = session(Section::Blog);
        s.apply(EditOp::AddImage {
            id: "1".to_string(),
            image: "data:image/png;base64,AA==".to_string(),
        })
        .unwrap();
        s.apply(EditOp::DeleteImage { id: "1".to_string(), index: 0 }).unwrap();
        s.apply(EditOp::AddVideo { id: "1".to_string() }).unwrap();
        s.apply(EditOp::SetVideo {
            id: "1".to_string(),
            index: 1,
            url: "https://video.example/2".to_string(),
        })
        .unwrap();
        s.apply(EditOp::DeleteVideo { id: "1".to_string(), index: 0 }).unwrap();

        let SectionValue::Blog(posts) = s.scratch() else { unreachable!() };
        assert_eq!(posts[0].images, vec!["data:image/png;base64,AA==".to_string()]);
        assert_eq!(posts[0].videos, vec!["https://video.example/2".to_string()]);

        let out_of_range = s.apply(EditOp::DeleteImage { id: "1".to_string(), index: 5 });
        assert!(matches!(out_of_range, Err(CommonError::IndexOutOfRange { .. })));
    }

    #[test]
    fn events_have_no_videos() {
        let mut s = session(Section::Events);
        let err = s.apply(EditOp::AddVideo { id: "1".to_string() }).unwrap_err();
        assert!(matches!(err, CommonError::UnsupportedOp { .. }));
        let err = s
            .apply(EditOp::AddImage {
                id: "1".to_string(),
                image: "x".to_string(),
            })
            .and_then(|_| s.apply(EditOp::AddImage { id: "missing".to_string(), image: "y".to_string() }))
            .unwrap_err();
        assert!(matches!(err, CommonError::UnknownItem { .. }));
    }

    #[test]
    fn replace_swaps_whole_scratch() {
        let mut s = session(Section::About);
        s.apply(EditOp::Replace {
            value: json!({"content": "line one\nline two"}),
        })
        .unwrap();
        assert_eq!(
            s.clone().into_value(),
            SectionValue::About(AboutData {
                content: "line one\nline two".to_string()
            })
        );
        let err = s.apply(EditOp::Replace { value: json!([1, 2]) }).unwrap_err();
        assert!(matches!(err, CommonError::InvalidValue { .. }));
    }

    #[test]
    fn ops_deserialize_from_tagged_json() {
        let op: EditOp = serde_json::from_value(json!({
            "op": "update_item", "id": "1", "field": "label", "value": "Start"
        }))
        .unwrap();
        assert_eq!(op.name(), "update_item");
        let op: EditOp = serde_json::from_value(json!({"op": "add_item"})).unwrap();
        assert_eq!(op, EditOp::AddItem);
    }
}
