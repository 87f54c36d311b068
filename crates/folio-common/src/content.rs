//! Portfolio content records and their seed values.
//!
//! Field names serialize in camelCase; that is the persisted layout under each
//! storage key.

use std::cmp::Ordering;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum SocialPlatform {
    LinkedIn,
    Twitter,
    Facebook,
    Instagram,
    GitHub,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SocialLink {
    pub id: String,
    pub name: SocialPlatform,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HeroData {
    pub name: String,
    /// URL or data URI.
    pub profile_photo: String,
    pub tagline: String,
    pub social_links: Vec<SocialLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AboutData {
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EducationItem {
    pub id: String,
    pub institution: String,
    pub degree: String,
    pub duration: String,
    pub logo: String,
    pub campus_image: String,
    pub link: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SkillItem {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum SkillIcon {
    #[default]
    DataAnalytics,
    ProductivityTools,
    DesignTools,
    WebsiteDeveloper,
    VideoEditing,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SkillCategory {
    pub id: String,
    pub title: String,
    pub icon_name: SkillIcon,
    pub skills: Vec<SkillItem>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum ExperienceIcon {
    #[default]
    ContentWriter,
    Projects,
    Capstone,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceItem {
    pub id: String,
    pub title: String,
    pub company: String,
    pub duration: String,
    pub icon_name: ExperienceIcon,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Certificate {
    pub id: String,
    pub title: String,
    pub issuer: String,
    pub image: String,
    pub link: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum ActivityIcon {
    #[default]
    Extracurricular,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    pub title: String,
    pub organization: String,
    pub duration: String,
    pub icon_name: ActivityIcon,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ProjectItem {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Data URIs or external URLs.
    pub images: Vec<String>,
    pub videos: Vec<String>,
    pub link: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EventItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub caption: String,
    pub order: i64,
    pub images: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: String,
    pub title: String,
    pub content: String,
    pub is_published: bool,
    pub images: Vec<String>,
    pub videos: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ContactData {
    pub description: String,
    pub email: String,
    pub phone: String,
}

/// Six hex colors: three accents plus a three-stop background gradient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ThemeColors {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub bg_start: String,
    pub bg_mid: String,
    pub bg_end: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub label: String,
    /// `#<anchor>` for in-page targets, `#/<page>` for page routes.
    pub link: String,
    pub is_route: bool,
    pub order: i64,
}

impl BlogPost {
    /// First `chars` characters of the body followed by "...".
    pub fn teaser(&self, chars: usize) -> String {
        let head: String = self.content.chars().take(chars).collect();
        format!("{head}...")
    }
}

/// Ids are epoch-millisecond strings, so two numeric ids compare as numbers.
/// Anything else falls back to string order, with numeric ids first.
fn compare_ids(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

/// Menu entries in display order: ascending `order`, ties by id.
pub fn menu_in_display_order(items: &[MenuItem]) -> Vec<&MenuItem> {
    let mut sorted: Vec<&MenuItem> = items.iter().collect();
    sorted.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| compare_ids(&a.id, &b.id)));
    sorted
}

/// Events in display order: descending `order`, ties by id.
pub fn events_in_display_order(items: &[EventItem]) -> Vec<&EventItem> {
    let mut sorted: Vec<&EventItem> = items.iter().collect();
    sorted.sort_by(|a, b| b.order.cmp(&a.order).then_with(|| compare_ids(&a.id, &b.id)));
    sorted
}

// --- Seed content ---

fn s(v: &str) -> String {
    v.to_string()
}

pub fn seed_hero() -> HeroData {
    let links = [
        ("1", SocialPlatform::LinkedIn),
        ("2", SocialPlatform::Twitter),
        ("3", SocialPlatform::Facebook),
        ("4", SocialPlatform::Instagram),
        ("5", SocialPlatform::GitHub),
    ];
    HeroData {
        name: s("Nishan Rahman"),
        profile_photo: s("https://i.ibb.co/6yvGMZ5/Nishan-Rahman.jpg"),
        tagline: s("Data Analyst | Tech Explorer | AI Agent Development"),
        social_links: links
            .into_iter()
            .map(|(id, name)| SocialLink {
                id: s(id),
                name,
                url: s("#"),
            })
            .collect(),
    }
}

pub fn seed_about() -> AboutData {
    AboutData {
        content: s("I'm a Management Studies student at the University of Rajshahi with strong skills in Data Analytics, Visualization, and AI tools. Passionate about solving business problems with data-driven solutions and modern productivity tools."),
    }
}

pub fn seed_education() -> Vec<EducationItem> {
    const RU_LOGO: &str = "https://i.ibb.co/sW2nJcZ/RU-logo.png";
    const RU_CAMPUS: &str = "https://i.ibb.co/3YYsK61/RU-Campus.jpg";
    const COLLEGE_LOGO: &str = "https://i.ibb.co/hZKM2LV/ABCD-College-Logo.png";
    const COLLEGE_CAMPUS: &str = "https://i.ibb.co/dDq0sR2/ABCD-College-Campus.jpg";
    vec![
        EducationItem {
            id: s("1"),
            institution: s("University of Rajshahi"),
            degree: s("BBA in Management Studies"),
            duration: s("September 2023 - Present"),
            logo: s(RU_LOGO),
            campus_image: s(RU_CAMPUS),
            link: s("#"),
        },
        EducationItem {
            id: s("2"),
            institution: s("A.B.C.D College"),
            degree: s("Higher Secondary Certificate"),
            duration: s("2020-2022"),
            logo: s(COLLEGE_LOGO),
            campus_image: s(COLLEGE_CAMPUS),
            link: s("#"),
        },
        EducationItem {
            id: s("3"),
            institution: s("Shishutala Asim Kumar Secondary School"),
            degree: s("Secondary School Certificate"),
            duration: s("2018-2020"),
            logo: s(COLLEGE_LOGO),
            campus_image: s(COLLEGE_CAMPUS),
            link: s("#"),
        },
    ]
}

pub fn seed_certificates() -> Vec<Certificate> {
    const BADGE: &str = "https://i.ibb.co/yQj9mJd/Google-Data-Analytics.png";
    [
        ("1", "Google Data Analytics", "Google"),
        ("2", "Technical Support Fundamentals", "Google"),
        ("3", "Mastering Supervision", "Alison"),
    ]
    .into_iter()
    .map(|(id, title, issuer)| Certificate {
        id: s(id),
        title: s(title),
        issuer: s(issuer),
        image: s(BADGE),
        link: s("#"),
    })
    .collect()
}

pub fn seed_skills() -> Vec<SkillCategory> {
    let groups: [(&str, &str, SkillIcon, &[&str]); 5] = [
        (
            "1",
            "Data Analytics & Visualization",
            SkillIcon::DataAnalytics,
            &["Excel", "Google Sheets", "Tableau", "Power BI", "R", "Python", "SQL"],
        ),
        (
            "2",
            "Productivity Tools",
            SkillIcon::ProductivityTools,
            &["Microsoft 365", "Google Docs", "Zoom"],
        ),
        (
            "3",
            "Design Tools",
            SkillIcon::DesignTools,
            &["Canva", "Photoshop", "Illustrator"],
        ),
        (
            "4",
            "Website Developer",
            SkillIcon::WebsiteDeveloper,
            &["HTML", "CSS", "Java Script", "GitHub", "Wordpress"],
        ),
        (
            "5",
            "Video Editing",
            SkillIcon::VideoEditing,
            &["AfterEffects", "Kinemaster", "CapCut"],
        ),
    ];

    let mut next_skill = 0;
    groups
        .into_iter()
        .map(|(id, title, icon_name, names)| SkillCategory {
            id: s(id),
            title: s(title),
            icon_name,
            skills: names
                .iter()
                .map(|name| {
                    next_skill += 1;
                    SkillItem {
                        id: format!("s{next_skill}"),
                        name: s(name),
                    }
                })
                .collect(),
        })
        .collect()
}

pub fn seed_experience() -> Vec<ExperienceItem> {
    vec![
        ExperienceItem {
            id: s("1"),
            title: s("Content Writer"),
            company: s("USA-based Company"),
            duration: s("3 months (May-July 2024)"),
            icon_name: ExperienceIcon::ContentWriter,
            description: s("Created engaging content for various digital platforms"),
        },
        ExperienceItem {
            id: s("2"),
            title: s("Google Data Analytics Projects"),
            company: s("Self-paced Learning"),
            duration: s("50+ hands-on projects"),
            icon_name: ExperienceIcon::Projects,
            description: s("Google Sheets, Tableau, BigQuery, R Programming"),
        },
        ExperienceItem {
            id: s("3"),
            title: s("Google Data Analytics Capstone"),
            company: s("Google Certificate Program"),
            duration: s("Completed Case Study"),
            icon_name: ExperienceIcon::Capstone,
            description: s("End-to-end data analysis project demonstrating full data analytics lifecycle"),
        },
    ]
}

pub fn seed_activities() -> Vec<Activity> {
    [
        ("1", "Chief of IT and Administration", "Hult Prize RU 2025 - 2026"),
        ("2", "Deputy Director of Documentation", "Rajshahi University Career Club"),
        ("3", "Volunteer", "Hult Prize RU 2024-25"),
    ]
    .into_iter()
    .map(|(id, title, organization)| Activity {
        id: s(id),
        title: s(title),
        organization: s(organization),
        duration: String::new(),
        icon_name: ActivityIcon::Extracurricular,
    })
    .collect()
}

pub fn seed_projects() -> Vec<ProjectItem> {
    Vec::new()
}

pub fn seed_blog() -> Vec<BlogPost> {
    vec![BlogPost {
        id: s("1"),
        title: s("My First Blog Post"),
        content: s("This is the content of my first blog post. It talks about technology and data."),
        is_published: true,
        images: vec![s("https://i.ibb.co/yQj9mJd/Google-Data-Analytics.png")],
        videos: vec![s("https://www.youtube.com/watch?v=dQw4w9WgXcQ")],
    }]
}

pub fn seed_events() -> Vec<EventItem> {
    vec![EventItem {
        id: s("1"),
        title: s("Hult Prize OnCampus Launch"),
        description: s("Launched the Hult Prize competition at Rajshahi University, kicking off a season of innovation and social entrepreneurship."),
        caption: s("Team Hult Prize RU 2025"),
        order: 1,
        images: vec![
            s("https://i.ibb.co/3YYsK61/RU-Campus.jpg"),
            s("https://i.ibb.co/dDq0sR2/ABCD-College-Campus.jpg"),
        ],
    }]
}

pub fn seed_contact() -> ContactData {
    ContactData {
        description: s("Feel free to reach out for collaborations, opportunities, or just to connect. I'm always open to discussing data analytics, AI, and innovative solutions."),
        email: s("mdnishanrahman0@gmail.com"),
        phone: s("+880 1601944455"),
    }
}

pub fn seed_theme() -> ThemeColors {
    ThemeColors {
        primary: s("#664dff"),
        secondary: s("#3b71de"),
        accent: s("#a363f2"),
        bg_start: s("#f3f0ff"),
        bg_mid: s("#eef5ff"),
        bg_end: s("#f8f0ff"),
    }
}

pub fn seed_menu() -> Vec<MenuItem> {
    [
        ("1", "Home", "#/", true, 1),
        ("2", "About", "#about", false, 2),
        ("11", "Projects", "#/projects", true, 3),
        ("6", "Experience", "#/experience", true, 4),
        ("3", "Education", "#/education", true, 5),
        ("4", "Certificates", "#/certificates", true, 6),
        ("5", "Skills", "#/skills", true, 7),
        ("7", "Activities", "#/activities", true, 8),
        ("9", "Blog", "#/blog", true, 9),
        ("10", "Events", "#/events", true, 10),
        ("8", "Contact", "#contact", false, 11),
    ]
    .into_iter()
    .map(|(id, label, link, is_route, order)| MenuItem {
        id: s(id),
        label: s(label),
        link: s(link),
        is_route,
        order,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persisted_layout_uses_camel_case() {
        let json = serde_json::to_value(seed_hero()).unwrap();
        assert!(json.get("profilePhoto").is_some());
        assert!(json.get("socialLinks").is_some());
        assert_eq!(json["socialLinks"][4]["name"], "GitHub");

        let menu = serde_json::to_value(&seed_menu()[0]).unwrap();
        assert_eq!(menu["isRoute"], true);

        let theme = serde_json::to_value(seed_theme()).unwrap();
        assert_eq!(theme["bgStart"], "#f3f0ff");
    }

    #[test]
    fn seed_skill_ids_are_sequential_across_categories() {
        let skills = seed_skills();
        assert_eq!(skills.len(), 5);
        assert_eq!(skills[0].skills[0].id, "s1");
        assert_eq!(skills[0].skills[6].id, "s7");
        assert_eq!(skills[1].skills[0].id, "s8");
        assert_eq!(skills[4].skills[2].id, "s21");
    }

    #[test]
    fn menu_sorts_by_order_then_id() {
        let mut items = seed_menu();
        items.push(MenuItem {
            id: "0".to_string(),
            label: "Tied".to_string(),
            link: "#x".to_string(),
            is_route: false,
            order: 2,
        });
        let labels: Vec<&str> = menu_in_display_order(&items)
            .iter()
            .map(|m| m.label.as_str())
            .collect();
        assert_eq!(&labels[..4], &["Home", "Tied", "About", "Projects"]);
        assert_eq!(labels.last(), Some(&"Contact"));
    }

    #[test]
    fn events_sort_descending_with_id_tiebreak() {
        let event = |id: &str, order| EventItem {
            id: id.to_string(),
            order,
            ..Default::default()
        };
        let items = vec![event("b", 1), event("c", 3), event("a", 1)];
        let ids: Vec<&str> = events_in_display_order(&items)
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn numeric_ids_break_ties_numerically() {
        let event = |id: &str| EventItem {
            id: id.to_string(),
            order: 1,
            ..Default::default()
        };
        let items = vec![event("10"), event("x"), event("9"), event("1700000000000")];
        let ids: Vec<&str> = events_in_display_order(&items)
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ids, vec!["9", "10", "1700000000000", "x"]);
    }

    #[test]
    fn teaser_truncates_on_characters() {
        let post = BlogPost {
            content: "héllo wörld".to_string(),
            ..Default::default()
        };
        assert_eq!(post.teaser(5), "héllo...");
        assert_eq!(post.teaser(100), "héllo wörld...");
    }
}
