//! Static page content. Read-only for the lifetime of the page; only counts matter to the
//! motion core.

use crate::layout::orbit::Orbiting;

/// A named capability shown on the skills orbit.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Skill {
    /// Display name; also the orbit key.
    pub name: String,
    /// Grouping ("frontend", "ecommerce", ...).
    pub category: String,
    /// One-line description.
    #[serde(default)]
    pub description: String,
    /// Style key for the badge color.
    #[serde(default)]
    pub color: String,
    /// Icon reference.
    #[serde(default)]
    pub icon: String,
    /// Orbit ring index.
    #[serde(default)]
    pub ring: usize,
}

impl Orbiting for Skill {
    fn orbit_key(&self) -> &str {
        &self.name
    }

    fn orbit_ring(&self) -> usize {
        self.ring
    }
}

/// A gallery project.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Project {
    /// Card title.
    pub title: String,
    /// Short summary.
    #[serde(default)]
    pub description: String,
    /// Technology tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Live site or repository.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Preview image reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// A work-history entry.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Experience {
    /// Job title.
    pub role: String,
    /// Employer.
    pub company: String,
    /// Free-form period ("2022 - Present").
    pub period: String,
    /// Notable achievements.
    #[serde(default)]
    pub highlights: Vec<String>,
}

/// A client quote.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Testimonial {
    /// Who said it.
    pub author: String,
    /// Their title and company.
    #[serde(default)]
    pub role: String,
    /// The quote.
    pub quote: String,
    /// 1..=5.
    #[serde(default = "default_rating")]
    pub rating: u8,
}

fn default_rating() -> u8 {
    5
}

/// An offered service.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Service {
    /// Service name.
    pub title: String,
    /// What it covers.
    #[serde(default)]
    pub description: String,
    /// Icon reference.
    #[serde(default)]
    pub icon: String,
}

/// Document metadata (title, description, social cards).
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PageMetadata {
    /// Document title.
    pub title: String,
    /// Meta description.
    pub description: String,
    /// Meta keywords.
    pub keywords: Vec<String>,
    /// Page author.
    pub author: String,
    /// Open Graph title, if different from `title`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_title: Option<String>,
    /// Twitter card type ("summary_large_image").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter_card: Option<String>,
}
