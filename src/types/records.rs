use serde::{Deserialize, Serialize};

/// Default icon identifier for a skill row without one.
pub const DEFAULT_SKILL_ICON: &str = "Code";

/// A row that carries a raw pipe-separated tag column.
pub trait Tagged {
    fn tags(&self) -> &str;
}

/// A row that carries an integer presentation weight; higher sorts first.
pub trait Weighted {
    fn weight(&self) -> i64;
}

/// Contact information. Exactly one per run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub linkedin: String,
    pub scholar: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub github: String,
}

/// One variant of the professional summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub variant: String,
    pub text: String,
}

/// A single achievement row from `experiences.csv`.
///
/// The job context (company, location, position, period) is repeated on
/// every row belonging to the same job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceRow {
    pub company: String,
    pub location: String,
    pub position: String,
    pub period: String,
    pub achievement_group: String,
    pub achievement_text: String,
    pub papers: i64,
    pub patents: i64,
    pub tags: String,
    pub weight: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillRow {
    pub category: String,
    pub skill: String,
    pub tags: String,
    pub icon: String,
    pub weight: i64,
}

/// Education entry. Never filtered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    pub institution: String,
    pub location: String,
    pub degree: String,
    pub period: String,
    pub description: String,
    pub tags: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patent {
    pub authors: String,
    pub title: String,
    pub reference: String,
    pub url: String,
    pub year: i64,
    pub tags: String,
    pub weight: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publication {
    pub authors: String,
    pub title: String,
    pub venue: String,
    pub year: i64,
    pub url: String,
    pub tags: String,
    pub weight: i64,
}

macro_rules! impl_tagged_weighted {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Tagged for $ty {
                fn tags(&self) -> &str {
                    &self.tags
                }
            }

            impl Weighted for $ty {
                fn weight(&self) -> i64 {
                    self.weight
                }
            }
        )*
    };
}

impl_tagged_weighted!(ExperienceRow, SkillRow, Patent, Publication);

impl Tagged for Education {
    fn tags(&self) -> &str {
        &self.tags
    }
}

impl<T: Weighted> Weighted for &T {
    fn weight(&self) -> i64 {
        (**self).weight()
    }
}
