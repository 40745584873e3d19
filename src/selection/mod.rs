pub mod filters;
pub mod grouping;

use tracing::debug;

use crate::loader::{CvDataLoader, LoadError};
use crate::types::grouped::CvData;
pub use filters::{collect_all_tags, exclude_by_tags, filter_by_tags, get_all_tags};
pub use grouping::{
    group_experiences, group_experiences_by_company, group_skills, sort_by_weight,
};

/// Load, filter and group everything a LaTeX render needs.
///
/// Contact and education are never filtered. An empty `tags` list keeps
/// every row.
pub fn assemble_cv_data<S: AsRef<str>>(
    loader: &CvDataLoader,
    tags: &[S],
    summary_variant: &str,
) -> Result<CvData, LoadError> {
    // 0. Unfiltered sections
    let contact = loader.load_contact()?;
    let summary = loader.load_summary(summary_variant)?;
    let education = loader.load_education()?;

    // 1. Filtering Phase
    let experience_rows = filter_by_tags(loader.load_experiences()?, tags);
    let skill_rows = filter_by_tags(loader.load_skills()?, tags);
    let mut patents = filter_by_tags(loader.load_patents()?, tags);
    let mut publications = filter_by_tags(loader.load_publications()?, tags);

    // 2. Grouping Phase
    let experiences = group_experiences(&experience_rows);
    let skills = group_skills(&skill_rows);

    // 3. Ordering Phase
    sort_by_weight(&mut patents);
    sort_by_weight(&mut publications);

    debug!(
        experience_rows = experience_rows.len(),
        jobs = experiences.len(),
        skill_categories = skills.len(),
        patents = patents.len(),
        publications = publications.len(),
        "assembled cv data"
    );

    Ok(CvData {
        contact,
        summary,
        experiences,
        skills,
        education,
        patents,
        publications,
    })
}
