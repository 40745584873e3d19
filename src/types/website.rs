//! JSON shapes consumed by the personal website.
//!
//! Field order is part of the output contract: serde serializes struct
//! fields in declaration order.

use serde::{Deserialize, Serialize};

use crate::types::records::{Contact, Publication};

/// One role held at a multi-position company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebsitePosition {
    pub title: String,
    pub period: String,
    pub achievements: Vec<String>,
}

/// A company entry on the website.
///
/// A company with more than one distinct (position, period) pair uses the
/// multi-position shape; otherwise the flat single-position shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WebsiteExperience {
    MultiPosition {
        company: String,
        location: String,
        positions: Vec<WebsitePosition>,
    },
    SinglePosition {
        company: String,
        position: String,
        location: String,
        period: String,
        achievements: Vec<String>,
    },
}

impl WebsiteExperience {
    pub fn company(&self) -> &str {
        match self {
            WebsiteExperience::MultiPosition { company, .. }
            | WebsiteExperience::SinglePosition { company, .. } => company,
        }
    }

    pub fn location(&self) -> &str {
        match self {
            WebsiteExperience::MultiPosition { location, .. }
            | WebsiteExperience::SinglePosition { location, .. } => location,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebsiteSkill {
    pub icon: String,
    pub title: String,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebsitePublication {
    pub authors: String,
    pub title: String,
    pub venue: String,
    pub year: i64,
    pub url: String,
}

impl From<&Publication> for WebsitePublication {
    fn from(p: &Publication) -> Self {
        Self {
            authors: p.authors.clone(),
            title: p.title.clone(),
            venue: p.venue.clone(),
            year: p.year,
            url: p.url.clone(),
        }
    }
}

/// The public subset of [`Contact`]; location, website and github are never published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebsiteContact {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub linkedin: String,
    pub scholar: String,
}

impl From<&Contact> for WebsiteContact {
    fn from(c: &Contact) -> Self {
        Self {
            name: c.name.clone(),
            email: c.email.clone(),
            phone: c.phone.clone(),
            linkedin: c.linkedin.clone(),
            scholar: c.scholar.clone(),
        }
    }
}
