use std::path::{Path, PathBuf};

use crate::loader::{CvDataLoader, LoadError};
use crate::render::output::{write_json, GeneratedFile};
use crate::render::RenderError;
use crate::selection::{filter_by_tags, group_experiences_by_company, group_skills, sort_by_weight};
use crate::types::grouped::GroupedSkill;
use crate::types::website::{
    WebsiteContact, WebsiteExperience, WebsitePublication, WebsiteSkill,
};

pub const EXPERIENCES_JSON: &str = "experiences.json";
pub const SKILLS_JSON: &str = "skills.json";
pub const PUBLICATIONS_JSON: &str = "publications.json";
pub const CONTACT_JSON: &str = "contact.json";

/// Website shape of grouped skills: the category becomes the card title.
pub fn website_skills(grouped: &[GroupedSkill]) -> Vec<WebsiteSkill> {
    grouped
        .iter()
        .map(|g| WebsiteSkill {
            icon: g.icon.clone(),
            title: g.category.clone(),
            skills: g.skills.clone(),
        })
        .collect()
}

/// Writes the JSON documents read by the personal website.
#[derive(Debug, Clone)]
pub struct WebsiteGenerator {
    loader: CvDataLoader,
    output_dir: PathBuf,
}

impl WebsiteGenerator {
    pub fn new(loader: CvDataLoader, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            loader,
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn experiences<S: AsRef<str>>(
        &self,
        tags: &[S],
    ) -> Result<Vec<WebsiteExperience>, LoadError> {
        let rows = filter_by_tags(self.loader.load_experiences()?, tags);
        Ok(group_experiences_by_company(&rows))
    }

    pub fn skills<S: AsRef<str>>(&self, tags: &[S]) -> Result<Vec<WebsiteSkill>, LoadError> {
        let rows = filter_by_tags(self.loader.load_skills()?, tags);
        Ok(website_skills(&group_skills(&rows)))
    }

    pub fn publications<S: AsRef<str>>(
        &self,
        tags: &[S],
    ) -> Result<Vec<WebsitePublication>, LoadError> {
        let mut rows = filter_by_tags(self.loader.load_publications()?, tags);
        sort_by_weight(&mut rows);
        Ok(rows.iter().map(WebsitePublication::from).collect())
    }

    pub fn contact(&self) -> Result<WebsiteContact, LoadError> {
        Ok(WebsiteContact::from(&self.loader.load_contact()?))
    }

    /// Generate all four documents, in a fixed order.
    ///
    /// Every document is built before any file is written, so a load error
    /// leaves the output directory untouched.
    pub fn generate_all<S: AsRef<str>>(
        &self,
        tags: &[S],
    ) -> Result<Vec<GeneratedFile>, RenderError> {
        let experiences = self.experiences(tags)?;
        let skills = self.skills(tags)?;
        let publications = self.publications(tags)?;
        let contact = self.contact()?;

        Ok(vec![
            write_json(&self.output_dir.join(EXPERIENCES_JSON), &experiences)?,
            write_json(&self.output_dir.join(SKILLS_JSON), &skills)?,
            write_json(&self.output_dir.join(PUBLICATIONS_JSON), &publications)?,
            write_json(&self.output_dir.join(CONTACT_JSON), &contact)?,
        ])
    }
}
