//! Server-side HTML for the portfolio layouts.
//!
//! Every piece of stored text goes through [`escape`]; long-form fields keep their
//! line breaks as `<br />`.

use folio_common::content::{self, *};
use folio_common::router::{menu_href, Page, ADMIN_ANCHOR};
use folio_common::section::Section;
use folio_common::state::Portfolio;

/// Admin panel buttons, in panel order.
const ADMIN_SECTIONS: [Section; 13] = [
    Section::Hero,
    Section::About,
    Section::Menu,
    Section::Projects,
    Section::Experience,
    Section::Education,
    Section::Certificates,
    Section::Skills,
    Section::Activities,
    Section::Blog,
    Section::Events,
    Section::Contact,
    Section::Theme,
];

const TEASER_CHARS: usize = 100;

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escaped text with newlines as `<br />`.
pub fn multiline(text: &str) -> String {
    escape(text).replace("\r\n", "\n").replace('\n', "<br />")
}

/// Full document for `page`.
pub fn render_page(portfolio: &Portfolio, page: Page, year: i32) -> String {
    let body = match page {
        Page::Home => home(portfolio),
        Page::Projects => projects(&portfolio.projects),
        Page::Education => education(&portfolio.education),
        Page::Certificates => certificates(&portfolio.certificates),
        Page::Skills => skills(&portfolio.skills),
        Page::Experience => experience(&portfolio.experience),
        Page::Activities => activities(&portfolio.activities),
        Page::Events => events(&portfolio.events),
        Page::Blog => blog(portfolio),
    };
    // Shown on every request that resolves to Home, including unknown paths.
    // Paths carry no fragment, so `/#admin` cannot be told apart from `/`.
    let floating = if page == Page::Home {
        r##"<a class="fab" href="#contact" aria-label="Contact">&#9993;</a>"##
    } else {
        ""
    };

    document(
        &portfolio.hero.name,
        &format!(
            "{}\n<main>\n{body}\n</main>\n{}\n{floating}",
            header(&portfolio.menu),
            footer(&portfolio.hero.name, year)
        ),
    )
}

/// Plain editor for one section: the scratch JSON in a textarea.
pub fn render_editor(section: Section, scratch_json: &str) -> String {
    let body = format!(
        r#"<main>
<section id="editor">
<h2>Editing: {label}</h2>
<form method="post" action="/admin/edit/save">
<input type="hidden" name="section" value="{name}" />
<textarea name="value" rows="30" cols="100">{json}</textarea>
<div class="actions">
<button type="submit">Save &amp; Close</button>
</div>
</form>
<form method="post" action="/admin/edit/cancel">
<button type="submit">Cancel</button>
</form>
</section>
</main>"#,
        label = escape(section.label()),
        name = section.name(),
        json = escape(scratch_json),
    );
    document(section.label(), &body)
}

fn document(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8" />
<meta name="viewport" content="width=device-width, initial-scale=1" />
<title>{}</title>
<link rel="stylesheet" href="/theme.css" />
</head>
<body>
{body}
</body>
</html>
"#,
        escape(title)
    )
}

fn section_title(title: &str) -> String {
    format!("<h2 class=\"section-title\">{}</h2>", escape(title))
}

fn header(menu: &[MenuItem]) -> String {
    let links: String = content::menu_in_display_order(menu)
        .into_iter()
        .map(|item| {
            format!(
                "<li><a href=\"{}\">{}</a></li>",
                escape(&menu_href(item)),
                escape(&item.label)
            )
        })
        .collect();
    format!(
        "<header>\n<nav>\n<ul>{links}</ul>\n<a href=\"/#{ADMIN_ANCHOR}\">Admin</a>\n</nav>\n</header>"
    )
}

fn footer(name: &str, year: i32) -> String {
    format!(
        "<footer><p>&copy; {year} {}. All rights reserved.</p></footer>",
        escape(name)
    )
}

fn image(src: &str, alt: &str) -> String {
    format!("<img src=\"{}\" alt=\"{}\" />", escape(src), escape(alt))
}

fn external_link(href: &str, text: &str) -> String {
    format!(
        "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
        escape(href),
        escape(text)
    )
}

fn video_list(videos: &[String]) -> String {
    if videos.is_empty() {
        return String::new();
    }
    let links: String = videos
        .iter()
        .map(|v| format!("<li>{}</li>", external_link(v, v)))
        .collect();
    format!("<div class=\"videos\"><h4>Related Videos:</h4><ul>{links}</ul></div>")
}

fn gallery(images: &[String], alt: &str) -> String {
    if images.is_empty() {
        return String::new();
    }
    let imgs: String = images.iter().map(|src| image(src, alt)).collect();
    format!("<div class=\"gallery\">{imgs}</div>")
}

// --- home ---

fn home(p: &Portfolio) -> String {
    [
        hero(&p.hero),
        about(&p.about),
        admin_panel(&p.contact),
        blog_teasers(p),
        contact(&p.contact),
    ]
    .join("\n")
}

fn hero(hero: &HeroData) -> String {
    let socials: String = hero
        .social_links
        .iter()
        .map(|link| external_link(&link.url, &format!("{:?}", link.name)))
        .collect();
    format!(
        "<section id=\"home\">\n{}\n<h1>{}</h1>\n<p class=\"tagline\">{}</p>\n<a class=\"cta\" href=\"#contact\">Contact Me</a>\n<div class=\"socials\">{socials}</div>\n</section>",
        image(&hero.profile_photo, &hero.name),
        escape(&hero.name),
        escape(&hero.tagline),
    )
}

fn about(about: &AboutData) -> String {
    format!(
        "<section id=\"about\">\n{}\n<p>{}</p>\n</section>",
        section_title("About Me"),
        multiline(&about.content)
    )
}

fn admin_panel(contact: &ContactData) -> String {
    let buttons: String = ADMIN_SECTIONS
        .iter()
        .map(|section| {
            format!(
                "<a class=\"admin-button\" href=\"/admin/edit/{}\">{}</a>",
                section.name(),
                escape(section.label())
            )
        })
        .collect();
    format!(
        "<section id=\"{ADMIN_ANCHOR}\">\n<h3>Admin Panel</h3>\n<p>Manage your portfolio content</p>\n<p class=\"login\">Logged in as: {}</p>\n<div class=\"admin-grid\">{buttons}</div>\n</section>",
        escape(&contact.email)
    )
}

fn blog_teasers(p: &Portfolio) -> String {
    let cards: String = p
        .published_posts()
        .map(|post| {
            let cover = post
                .images
                .first()
                .map(|src| image(src, &post.title))
                .unwrap_or_default();
            format!(
                "<article>{cover}<h3>{}</h3><p>{}</p><a href=\"{}\">Read More &rarr;</a></article>",
                escape(&post.title),
                escape(&post.teaser(TEASER_CHARS)),
                Page::Blog.path()
            )
        })
        .collect();
    format!("<section id=\"blog\">\n{}\n{cards}\n</section>", section_title("Blog"))
}

fn contact(contact: &ContactData) -> String {
    format!(
        r#"<section id="contact">
{}
<div class="contact-card"><h4>Phone</h4><p>{}</p></div>
<div class="contact-card"><h4>Email</h4><p>{}</p></div>
<p>{}</p>
<form class="contact-form">
<label>Name <input type="text" name="name" placeholder="Your name" /></label>
<label>Email <input type="email" name="email" placeholder="your.email@example.com" /></label>
<label>Message <textarea name="message" rows="4" placeholder="Your message..."></textarea></label>
<button type="submit">Send Message</button>
</form>
</section>"#,
        section_title("Get In Touch"),
        escape(&contact.phone),
        escape(&contact.email),
        multiline(&contact.description),
    )
}

// --- pages ---

fn page_section(id: &str, title: &str, inner: String) -> String {
    format!(
        "<section id=\"{id}\">\n{}\n{inner}\n</section>",
        section_title(title)
    )
}

fn projects(items: &[ProjectItem]) -> String {
    if items.is_empty() {
        return page_section(
            "projects",
            "Projects",
            "<p class=\"empty\">No projects added yet. Add some from the admin panel!</p>".to_string(),
        );
    }
    let cards: String = items
        .iter()
        .map(|project| {
            let link = if project.link.is_empty() {
                String::new()
            } else {
                external_link(&project.link, "View Project")
            };
            format!(
                "<article>{}<h3>{}</h3>{link}<div>{}</div>{}</article>",
                gallery(&project.images, &project.title),
                escape(&project.title),
                multiline(&project.description),
                video_list(&project.videos),
            )
        })
        .collect();
    page_section("projects", "Projects", cards)
}

fn education(items: &[EducationItem]) -> String {
    let cards: String = items
        .iter()
        .map(|item| {
            format!(
                "<article>{}<h3>{} {}</h3><p class=\"degree\">{}</p><p class=\"duration\">{}</p>{}</article>",
                image(&item.logo, &format!("{} logo", item.institution)),
                escape(&item.institution),
                external_link(&item.link, "Visit"),
                escape(&item.degree),
                escape(&item.duration),
                image(&item.campus_image, &format!("{} campus", item.institution)),
            )
        })
        .collect();
    page_section("education", "Education", cards)
}

fn certificates(items: &[Certificate]) -> String {
    let cards: String = items
        .iter()
        .map(|cert| {
            format!(
                "<article>{}<h3>{}</h3><p>{}</p>{}</article>",
                image(&cert.image, &cert.title),
                escape(&cert.title),
                escape(&cert.issuer),
                external_link(&cert.link, "Verify"),
            )
        })
        .collect();
    page_section("certificates", "Certificates", cards)
}

fn skills(categories: &[SkillCategory]) -> String {
    let cards: String = categories
        .iter()
        .map(|category| {
            let chips: String = category
                .skills
                .iter()
                .map(|skill| format!("<span class=\"chip\">{}</span>", escape(&skill.name)))
                .collect();
            format!(
                "<article data-icon=\"{:?}\"><h3>{}</h3><div class=\"chips\">{chips}</div></article>",
                category.icon_name,
                escape(&category.title),
            )
        })
        .collect();
    page_section("skills", "Skills", cards)
}

fn experience(items: &[ExperienceItem]) -> String {
    let cards: String = items
        .iter()
        .map(|item| {
            format!(
                "<article data-icon=\"{:?}\"><h3>{}</h3><p class=\"company\">{}</p><p class=\"duration\">{}</p><p>{}</p></article>",
                item.icon_name,
                escape(&item.title),
                escape(&item.company),
                escape(&item.duration),
                multiline(&item.description),
            )
        })
        .collect();
    page_section("experience", "Work Experience & Projects", cards)
}

fn activities(items: &[Activity]) -> String {
    let cards: String = items
        .iter()
        .map(|item| {
            format!(
                "<article><h3>{}</h3><p class=\"organization\">{}</p></article>",
                escape(&item.title),
                escape(&item.organization),
            )
        })
        .collect();
    page_section("activities", "Extracurricular Activities", cards)
}

fn events(items: &[EventItem]) -> String {
    let cards: String = content::events_in_display_order(items)
        .into_iter()
        .map(|event| {
            format!(
                "<article>{}<h3>{}</h3><p class=\"caption\">{}</p><div>{}</div></article>",
                gallery(&event.images, &event.title),
                escape(&event.title),
                escape(&event.caption),
                multiline(&event.description),
            )
        })
        .collect();
    page_section("events", "Events & Feed", cards)
}

fn blog(p: &Portfolio) -> String {
    let posts: String = p
        .published_posts()
        .map(|post| {
            let cover = post
                .images
                .first()
                .map(|src| image(src, &post.title))
                .unwrap_or_default();
            format!(
                "<article>{cover}<h3>{}</h3><p>{}</p>{}</article>",
                escape(&post.title),
                multiline(&post.content),
                video_list(&post.videos),
            )
        })
        .collect();
    page_section("blog", "Blog", posts)
}
