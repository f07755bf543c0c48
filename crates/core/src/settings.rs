//! Site settings section registry and server-side defaults.
//!
//! Settings rows are `(section, data)` pairs where `data` is free-form
//! JSON edited from the dashboard. The section list is closed: unknown
//! sections are rejected at the API boundary. Defaults are returned
//! whenever a section has no stored row, so a fresh database renders a
//! usable site.

use serde_json::{json, Map, Value};

/// Valid settings sections.
pub const SETTINGS_SECTIONS: &[&str] =
    &["hero", "stats", "features", "cta", "profile", "site", "portfolio"];

/// Check whether a section name is known.
pub fn is_valid_section(section: &str) -> bool {
    SETTINGS_SECTIONS.contains(&section)
}

/// Validate a section name, returning a human-readable error message
/// suitable for a 400 response.
pub fn validate_section(section: &str) -> Result<(), String> {
    if is_valid_section(section) {
        Ok(())
    } else {
        Err(format!(
            "Unknown settings section '{section}'. Valid sections: {}",
            SETTINGS_SECTIONS.join(", ")
        ))
    }
}

/// Default value for a single section. Unknown sections get an empty
/// object (callers are expected to validate first).
pub fn default_section(section: &str) -> Value {
    match section {
        "hero" => json!({
            "badge": "Documentation & Tutorials",
            "title": "Personal",
            "titleHighlight": "Dev",
            "titleSuffix": "Docs",
            "description": "A collection of documentation, tutorials, and code snippets. \
                Sharing knowledge and best practices for modern web development.",
            "primaryButtonText": "Explore Blog",
            "secondaryButtonText": "About Me"
        }),
        "stats" => json!({
            "showStats": true,
            "stat1Label": "Articles",
            "stat2Label": "Topics",
            "stat2Value": "10+",
            "stat3Label": "Learning",
            "stat3Value": "∞"
        }),
        "features" => json!([
            {
                "icon": "Code",
                "title": "Code Documentation",
                "description": "Well-structured code examples with syntax highlighting for multiple languages."
            },
            {
                "icon": "BookOpen",
                "title": "In-depth Tutorials",
                "description": "Step-by-step guides to help you master new technologies and concepts."
            },
            {
                "icon": "Zap",
                "title": "Best Practices",
                "description": "Learn industry-standard patterns and practices for clean, maintainable code."
            }
        ]),
        "cta" => json!({
            "title": "Want to manage your documentation?",
            "description": "Access the dashboard to create, edit, and manage your blog posts.",
            "buttonText": "Go to Dashboard"
        }),
        "profile" => json!({
            "name": "Developer",
            "role": "Full Stack Developer",
            "location": "Indonesia",
            "bio": "A passionate developer who loves building web applications and sharing \
                knowledge through documentation and tutorials.",
            "skills": [
                { "category": "Frontend", "items": ["React", "Vue.js", "TypeScript", "Next.js", "CSS/SCSS"] },
                { "category": "Backend", "items": ["Node.js", "Python", "PostgreSQL", "MongoDB", "REST APIs"] },
                { "category": "Tools", "items": ["Git", "Docker", "VS Code", "Figma", "Linux"] }
            ]
        }),
        "site" => json!({
            "logoText": "DevDocs",
            "footerDescription": "Personal blog for documentation, tutorials, and code snippets. \
                Sharing knowledge one post at a time.",
            "aboutBlogTitle": "About This Blog",
            "aboutBlogDescription": "This blog serves as my personal documentation hub where I \
                share tutorials, code snippets, and insights about web development."
        }),
        "portfolio" => json!({
            "title": "My Portfolio",
            "subtitle": "A showcase of my recent projects and work",
            "projects": []
        }),
        _ => json!({}),
    }
}

/// The full default settings map, keyed by section name.
pub fn default_settings() -> Map<String, Value> {
    SETTINGS_SECTIONS
        .iter()
        .map(|s| (s.to_string(), default_section(s)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_registered_sections_are_valid() {
        for section in SETTINGS_SECTIONS {
            assert!(is_valid_section(section));
            assert!(validate_section(section).is_ok());
        }
    }

    #[test]
    fn unknown_section_is_rejected() {
        assert!(!is_valid_section("social"));
        assert!(validate_section("nonsense").is_err());
    }

    #[test]
    fn defaults_cover_every_section() {
        let defaults = default_settings();
        assert_eq!(defaults.len(), SETTINGS_SECTIONS.len());
        for section in SETTINGS_SECTIONS {
            assert!(!defaults[*section].is_null());
        }
    }

    #[test]
    fn hero_default_has_expected_fields() {
        let hero = default_section("hero");
        assert!(hero["title"].is_string());
        assert!(hero["description"].is_string());
    }
}
