//! LaTeX rendering.
//!
//! The output is a fragment that relies on macros defined by the surrounding
//! document class (`\resumeSubheading`, `\resumeItem`, ...). This module only
//! supplies escaped field values to those macros.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::loader::CvDataLoader;
use crate::render::output::{write_versioned, GeneratedFile};
use crate::render::RenderError;
use crate::selection::assemble_cv_data;
use crate::types::grouped::{CvData, GroupedExperience, GroupedSkill};
use crate::types::records::{Contact, Education, Patent, Publication};
use crate::types::website::WebsiteExperience;

pub const DEFAULT_TEMPLATE_NAME: &str = "resume.tex.tmpl";

/// Template used when no template file exists.
pub const BUILTIN_TEMPLATE: &str = "\
%-------------------------
% Generated by cv-builder
%-------------------------

{{contact}}
{{summary}}
{{experience}}
{{skills}}
{{education}}
{{patents}}
{{publications}}";

/// Escape LaTeX special characters in free text.
///
/// Single pass over the input: the replacement for one character is never
/// rescanned, so the backslashes introduced for `~`, `^` or `\` itself are
/// never escaped again.
pub fn escape_latex(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str(r"\textbackslash{}"),
            '&' => out.push_str(r"\&"),
            '%' => out.push_str(r"\%"),
            '$' => out.push_str(r"\$"),
            '#' => out.push_str(r"\#"),
            '_' => out.push_str(r"\_"),
            '{' => out.push_str(r"\{"),
            '}' => out.push_str(r"\}"),
            '~' => out.push_str(r"\textasciitilde{}"),
            '^' => out.push_str(r"\textasciicircum{}"),
            _ => out.push(ch),
        }
    }
    out
}

/// Typographic dash for date ranges: `"2020 - 2023"` becomes `"2020 -- 2023"`.
///
/// Also repairs the mojibake left by a UTF-8 en-dash decoded as cp1252.
pub fn format_period(period: &str) -> String {
    period.replace(" - ", " -- ").replace("â€“", "--")
}

fn period(text: &str) -> String {
    escape_latex(&format_period(text))
}

fn item_list(out: &mut String, indent: &str, body: impl FnOnce(&mut String)) {
    out.push_str(&format!("{indent}\\resumeItemListStart\n"));
    body(out);
    out.push_str(&format!("{indent}\\resumeItemListEnd\n"));
}

fn push_items<'a>(out: &mut String, indent: &str, items: impl IntoIterator<Item = &'a str>) {
    for item in items {
        out.push_str(&format!("{indent}\\resumeItem{{{}}}\n", escape_latex(item)));
    }
}

fn section_header(out: &mut String, banner: &str, title: &str) {
    out.push_str(&format!("%-----------{banner}-----------------\n"));
    out.push_str(&format!("\\section{{{title}}}\n"));
}

pub fn render_contact(contact: &Contact) -> String {
    let mut out = format!(
        "\\resumeHeading{{{}}}{{{}}}{{{}}}{{{}}}{{{}}}\n",
        escape_latex(&contact.name),
        escape_latex(&contact.email),
        escape_latex(&contact.phone),
        escape_latex(&contact.linkedin),
        escape_latex(&contact.scholar),
    );
    if !(contact.location.is_empty() && contact.website.is_empty() && contact.github.is_empty()) {
        out.push_str(&format!(
            "\\resumeHeadingExtras{{{}}}{{{}}}{{{}}}\n",
            escape_latex(&contact.location),
            escape_latex(&contact.website),
            escape_latex(&contact.github),
        ));
    }
    out
}

pub fn render_summary(summary: &str) -> String {
    if summary.trim().is_empty() {
        return String::new();
    }
    let mut out = String::new();
    section_header(&mut out, "SUMMARY", "Summary");
    out.push_str(&format!("  \\resumeSummary{{{}}}\n", escape_latex(summary.trim())));
    out
}

fn render_job(out: &mut String, job: &GroupedExperience) {
    out.push_str("    \\resumeSubheading\n");
    out.push_str(&format!(
        "      {{{}}}{{{}}}\n",
        escape_latex(&job.company),
        escape_latex(&job.location)
    ));
    out.push_str(&format!(
        "      {{{}}}{{{}}}\n",
        escape_latex(&job.position),
        period(&job.period)
    ));

    if job.achievements.is_empty() {
        return;
    }

    item_list(out, "      ", |out| {
        if job.achievement_groups.is_empty() {
            push_items(out, "        ", job.achievements.iter().map(String::as_str));
            return;
        }
        push_items(out, "        ", job.ungrouped_achievements());
        for (label, items) in job.achievement_groups.iter() {
            out.push_str(&format!("        \\resumeItemGroup{{{}}}\n", escape_latex(label)));
            push_items(out, "        ", items.iter().map(String::as_str));
        }
    });
}

pub fn render_experience(experiences: &[GroupedExperience]) -> String {
    if experiences.is_empty() {
        return String::new();
    }
    let mut out = String::new();
    section_header(&mut out, "EXPERIENCE", "Experience");
    out.push_str("  \\resumeSubHeadingListStart\n");
    for job in experiences {
        render_job(&mut out, job);
    }
    out.push_str("  \\resumeSubHeadingListEnd\n");
    out
}

/// Render company-first experience entries, as produced by the markup extractor.
pub fn render_company_experiences(experiences: &[WebsiteExperience]) -> String {
    let mut out = String::new();
    section_header(&mut out, "EXPERIENCE", "Experience");
    out.push_str("  \\resumeSubHeadingListStart\n");
    for exp in experiences {
        out.push_str("    \\resumeSubheading\n");
        match exp {
            WebsiteExperience::SinglePosition {
                company,
                position,
                location,
                period: dates,
                achievements,
            } => {
                out.push_str(&format!(
                    "      {{{}}}{{{}}}\n",
                    escape_latex(company),
                    escape_latex(location)
                ));
                out.push_str(&format!("      {{{}}}{{{}}}\n", escape_latex(position), period(dates)));
                if !achievements.is_empty() {
                    item_list(&mut out, "      ", |out| {
                        push_items(out, "        ", achievements.iter().map(String::as_str))
                    });
                }
            }
            WebsiteExperience::MultiPosition {
                company,
                location,
                positions,
            } => {
                out.push_str(&format!(
                    "      {{{}}}{{{}}}\n",
                    escape_latex(company),
                    escape_latex(location)
                ));
                out.push_str("      {}{}\n");
                for pos in positions {
                    out.push_str("    \\resumeSubSubheading\n");
                    out.push_str(&format!(
                        "      {{{}}}{{{}}}\n",
                        escape_latex(&pos.title),
                        period(&pos.period)
                    ));
                    if !pos.achievements.is_empty() {
                        item_list(&mut out, "      ", |out| {
                            push_items(out, "        ", pos.achievements.iter().map(String::as_str))
                        });
                    }
                }
            }
        }
    }
    out.push_str("  \\resumeSubHeadingListEnd\n");
    out
}

pub fn render_skills(skills: &[GroupedSkill]) -> String {
    if skills.is_empty() {
        return String::new();
    }
    let mut out = String::new();
    section_header(&mut out, "SKILLS", "Skills");
    out.push_str("  \\resumeSkillListStart\n");
    for group in skills {
        let names: Vec<String> = group.skills.iter().map(|s| escape_latex(s)).collect();
        out.push_str(&format!(
            "    \\resumeSkill{{{}}}{{{}}}\n",
            escape_latex(&group.category),
            names.join(", ")
        ));
    }
    out.push_str("  \\resumeSkillListEnd\n");
    out
}

pub fn render_education(education: &[Education]) -> String {
    if education.is_empty() {
        return String::new();
    }
    let mut out = String::new();
    section_header(&mut out, "EDUCATION", "Education");
    out.push_str("  \\resumeSubHeadingListStart\n");
    for edu in education {
        out.push_str("    \\resumeSubheading\n");
        out.push_str(&format!(
            "      {{{}}}{{{}}}\n",
            escape_latex(&edu.institution),
            escape_latex(&edu.location)
        ));
        out.push_str(&format!(
            "      {{{}}}{{{}}}\n",
            escape_latex(&edu.degree),
            period(&edu.period)
        ));
        if !edu.description.trim().is_empty() {
            item_list(&mut out, "      ", |out| {
                push_items(out, "        ", [edu.description.trim()])
            });
        }
    }
    out.push_str("  \\resumeSubHeadingListEnd\n");
    out
}

pub fn render_patents(patents: &[Patent]) -> String {
    if patents.is_empty() {
        return String::new();
    }
    let mut out = String::new();
    section_header(&mut out, "PATENTS", "Patents");
    out.push_str("  \\resumeSubHeadingListStart\n");
    for p in patents {
        out.push_str(&format!(
            "    \\resumePatent{{{}}}{{{}}}{{{}}}{{{}}}{{{}}}\n",
            escape_latex(&p.authors),
            escape_latex(&p.title),
            escape_latex(&p.reference),
            p.year,
            escape_latex(&p.url),
        ));
    }
    out.push_str("  \\resumeSubHeadingListEnd\n");
    out
}

pub fn render_publications(publications: &[Publication]) -> String {
    if publications.is_empty() {
        return String::new();
    }
    let mut out = String::new();
    section_header(&mut out, "PUBLICATIONS", "Publications");
    out.push_str("  \\resumeSubHeadingListStart\n");
    for p in publications {
        out.push_str(&format!(
            "    \\resumePublication{{{}}}{{{}}}{{{}}}{{{}}}{{{}}}\n",
            escape_latex(&p.authors),
            escape_latex(&p.title),
            escape_latex(&p.venue),
            p.year,
            escape_latex(&p.url),
        ));
    }
    out.push_str("  \\resumeSubHeadingListEnd\n");
    out
}

/// A document skeleton with `{{section}}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatexTemplate {
    source: String,
}

impl LatexTemplate {
    pub const PLACEHOLDERS: [&'static str; 7] = [
        "contact",
        "summary",
        "experience",
        "skills",
        "education",
        "patents",
        "publications",
    ];

    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    pub fn builtin() -> Self {
        Self::new(BUILTIN_TEMPLATE)
    }

    /// Read `path`, or fall back to the built-in template if it does not exist.
    pub fn load_or_builtin(path: &Path) -> Result<Self, RenderError> {
        if !path.exists() {
            debug!(path = %path.display(), "template not found, using built-in");
            return Ok(Self::builtin());
        }
        let source = fs::read_to_string(path).map_err(|source| RenderError::Template {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(source))
    }

    pub fn render(&self, cv: &CvData) -> String {
        let sections = [
            render_contact(&cv.contact),
            render_summary(&cv.summary),
            render_experience(&cv.experiences),
            render_skills(&cv.skills),
            render_education(&cv.education),
            render_patents(&cv.patents),
            render_publications(&cv.publications),
        ];

        let mut out = self.source.clone();
        for (name, body) in Self::PLACEHOLDERS.iter().zip(sections) {
            out = out.replace(&format!("{{{{{name}}}}}"), &body);
        }
        out
    }
}

/// Renders a tag-filtered CV from a data directory to LaTeX.
#[derive(Debug, Clone)]
pub struct LatexGenerator {
    loader: CvDataLoader,
    template_path: PathBuf,
}

impl LatexGenerator {
    pub fn new(loader: CvDataLoader, template_dir: &Path, template_name: &str) -> Self {
        Self {
            loader,
            template_path: template_dir.join(template_name),
        }
    }

    pub fn template_path(&self) -> &Path {
        &self.template_path
    }

    pub fn generate<S: AsRef<str>>(
        &self,
        tags: &[S],
        summary_variant: &str,
    ) -> Result<String, RenderError> {
        let cv = assemble_cv_data(&self.loader, tags, summary_variant)?;
        let template = LatexTemplate::load_or_builtin(&self.template_path)?;
        Ok(template.render(&cv))
    }

    pub fn generate_to_file<S: AsRef<str>>(
        &self,
        output_path: &Path,
        tags: &[S],
        summary_variant: &str,
    ) -> Result<GeneratedFile, RenderError> {
        let content = self.generate(tags, summary_variant)?;
        write_versioned(output_path, content.as_bytes())
    }
}
