use crate::foundation::error::{MotionError, MotionResult};

/// A case study reachable at `/work/{slug}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Project {
    pub slug: &'static str,
    pub title: &'static str,
    pub category: &'static str,
    pub year: &'static str,
    pub client: &'static str,
    pub overview: &'static str,
    pub results: &'static [&'static str],
}

pub static PROJECTS: &[Project] = &[
    Project {
        slug: "meridian",
        title: "Meridian",
        category: "Brand Architecture",
        year: "2025",
        client: "Meridian Capital Partners",
        overview: "A comprehensive brand system for a global investment firm seeking to establish \
                   digital authority in a traditionally conservative industry.",
        results: &[
            "Brand recognition increased 340% within first quarter",
            "Website engagement time doubled",
            "Inquiries from target demographic increased 280%",
        ],
    },
    Project {
        slug: "vantage",
        title: "Vantage",
        category: "Digital Platform",
        year: "2025",
        client: "Vantage Properties",
        overview: "End-to-end platform design for a luxury real estate firm requiring immersive \
                   property experiences with uncompromising performance.",
        results: &[
            "Page load time reduced to under 2 seconds",
            "Property inquiry conversion rate tripled",
            "Awwwards Site of the Day recognition",
        ],
    },
    Project {
        slug: "axiom",
        title: "Axiom",
        category: "Strategic Identity",
        year: "2024",
        client: "Axiom Consulting",
        overview: "Brand evolution for a technology consultancy undergoing strategic repositioning \
                   from generalist to specialist.",
        results: &[
            "Average project value increased 60%",
            "Client retention improved to 94%",
            "Industry awards: 3 major recognitions",
        ],
    },
];

pub fn find_project(slug: &str) -> MotionResult<&'static Project> {
    PROJECTS
        .iter()
        .find(|p| p.slug == slug)
        .ok_or_else(|| MotionError::route(format!("unknown project '{slug}'")))
}

/// One entry of the full-screen navigation overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct NavItem {
    pub href: &'static str,
    pub label: &'static str,
    pub manifesto: &'static str,
    pub index: &'static str,
}

pub static NAV_ITEMS: &[NavItem] = &[
    NavItem {
        href: "/",
        label: "Origin",
        manifesto: "Return to Beginning",
        index: "00",
    },
    NavItem {
        href: "/work",
        label: "Work",
        manifesto: "Build Digital Authority",
        index: "01",
    },
    NavItem {
        href: "/services",
        label: "Services",
        manifesto: "Design With Intent",
        index: "02",
    },
    NavItem {
        href: "/about",
        label: "About",
        manifesto: "Understand Our Method",
        index: "03",
    },
    NavItem {
        href: "/contact",
        label: "Contact",
        manifesto: "Scale With Precision",
        index: "04",
    },
];

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum Route {
    Home,
    About,
    Services,
    Work,
    Project { project: &'static Project },
    Contact,
    NotFound { path: String },
}

/// Strip query, fragment and trailing slashes. Always starts with `/`.
pub fn normalize_path(path: &str) -> String {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let trimmed = path[..end].trim().trim_end_matches('/');
    let trimmed = trimmed.trim_start_matches('/');
    format!("/{trimmed}")
}

impl Route {
    /// Resolve a location. Unknown paths and slugs become [`Route::NotFound`] rather than errors.
    pub fn parse(path: &str) -> Self {
        let path = normalize_path(path);
        let mut segments = path.split('/').filter(|s| !s.is_empty());
        match (segments.next(), segments.next(), segments.next()) {
            (None, _, _) => Self::Home,
            (Some("about"), None, _) => Self::About,
            (Some("services"), None, _) => Self::Services,
            (Some("work"), None, _) => Self::Work,
            (Some("contact"), None, _) => Self::Contact,
            (Some("work"), Some(slug), None) => match find_project(slug) {
                Ok(project) => Self::Project { project },
                Err(err) => {
                    tracing::debug!(%err, "rendering not-found");
                    Self::NotFound { path }
                }
            },
            _ => Self::NotFound { path },
        }
    }

    /// Canonical path, used as the transition key.
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::About => "/about".to_string(),
            Self::Services => "/services".to_string(),
            Self::Work => "/work".to_string(),
            Self::Project { project } => format!("/work/{}", project.slug),
            Self::Contact => "/contact".to_string(),
            Self::NotFound { path } => path.clone(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Index of the navigation item this route highlights.
    pub fn nav_index(&self) -> Option<usize> {
        let path = self.path();
        NAV_ITEMS.iter().position(|item| item.href == path)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/site/routes.rs"]
mod tests;
