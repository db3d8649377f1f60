use std::{fmt::Display, str::FromStr};

use serde::{Serialize, Deserialize};


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Committee {
    #[serde(rename = "ga-beginner")]
    GaBeginner,
    #[serde(rename = "eco-intermediate")]
    EcoIntermediate,
    #[serde(rename = "sc-advanced")]
    ScAdvanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommitteeLevel {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitteeDescriptor {
    pub slug: &'static str,
    pub level: CommitteeLevel,
    pub name: &'static str,
    pub blurb: &'static str,
    pub resources_href: &'static str,
}

static GA_BEGINNER: CommitteeDescriptor = CommitteeDescriptor {
    slug: "ga-beginner",
    level: CommitteeLevel::Beginner,
    name: "General Assembly — Foundational",
    blurb: "Perfect for first-time delegates. Focus on procedure basics, speaking, and simple draft resolutions.",
    resources_href: "/resources/ga-beginner",
};

static ECO_INTERMEDIATE: CommitteeDescriptor = CommitteeDescriptor {
    slug: "eco-intermediate",
    level: CommitteeLevel::Intermediate,
    name: "ECOSOC — Economic & Social",
    blurb: "For delegates with some experience. Emphasis on bloc building, amendments, and moderated caucuses.",
    resources_href: "/resources/eco-intermediate",
};

static SC_ADVANCED: CommitteeDescriptor = CommitteeDescriptor {
    slug: "sc-advanced",
    level: CommitteeLevel::Advanced,
    name: "Security Council — Crisis & Strategy",
    blurb: "For experienced delegates. Faster pace, operative detail, and real-time directives/crisis updates.",
    resources_href: "/resources/sc-advanced",
};

impl Committee {
    pub const ALL: [Committee; 3] = [Committee::GaBeginner, Committee::EcoIntermediate, Committee::ScAdvanced];

    pub fn descriptor(&self) -> &'static CommitteeDescriptor {
        match self {
            Committee::GaBeginner => &GA_BEGINNER,
            Committee::EcoIntermediate => &ECO_INTERMEDIATE,
            Committee::ScAdvanced => &SC_ADVANCED,
        }
    }

    pub fn slug(&self) -> &'static str {
        self.descriptor().slug
    }

    pub fn from_slug(slug: &str) -> Option<Committee> {
        Self::ALL.into_iter().find(|c| c.slug() == slug)
    }
}

impl Default for Committee {
    fn default() -> Self {
        Committee::GaBeginner
    }
}

impl Display for Committee {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCommitteeSlug(pub String);

impl Display for UnknownCommitteeSlug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unknown committee {}", self.0)
    }
}

impl std::error::Error for UnknownCommitteeSlug {}

impl FromStr for Committee {
    type Err = UnknownCommitteeSlug;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Committee::from_slug(s).ok_or_else(|| UnknownCommitteeSlug(s.to_string()))
    }
}

/// Maps a free-text committee label onto one of the three committees.
///
/// Canonical slugs are returned as is (after trimming and lower-casing).
/// Everything else goes through ordered substring rules where the first
/// match wins:
///
/// 1. `security` → `sc-advanced`
/// 2. `ecosoc` or `economic` → `eco-intermediate`
/// 3. `general` or `ga` → `ga-beginner`
///
/// Anything left over, including an absent label, falls back to
/// `ga-beginner`. Note that the rules never look at the level words, so
/// `"ga-advanced"` ends up in the beginner committee.
pub fn resolve_committee(raw: Option<&str>) -> Committee {
    let normalized = raw.unwrap_or("").trim().to_lowercase();

    if let Some(committee) = Committee::from_slug(&normalized) {
        return committee;
    }

    if normalized.contains("security") {
        Committee::ScAdvanced
    }
    else if normalized.contains("ecosoc") || normalized.contains("economic") {
        Committee::EcoIntermediate
    }
    else if normalized.contains("general") || normalized.contains("ga") {
        Committee::GaBeginner
    }
    else {
        Committee::default()
    }
}

/// Normalizes a committee label for storage. Blank input stays unassigned.
pub fn committee_slug_for_entry(raw: Option<&str>) -> Option<String> {
    match raw.map(str::trim) {
        Some(v) if !v.is_empty() => Some(resolve_committee(Some(v)).slug().to_string()),
        _ => None
    }
}
