use cv_builder::render::latex::{
    render_company_experiences, render_contact, render_education, render_experience,
    render_patents, render_skills, render_summary,
};
use cv_builder::render::{escape_latex, format_period, LatexTemplate};
use cv_builder::types::{
    AchievementGroups, Contact, CvData, Education, GroupedExperience, GroupedSkill,
    WebsiteExperience, WebsitePosition,
};

fn contact() -> Contact {
    Contact {
        name: "Ada Lovelace".to_string(),
        email: "ada@example.org".to_string(),
        phone: "+44 1234".to_string(),
        linkedin: "linkedin.com/in/ada".to_string(),
        scholar: "scholar/ada".to_string(),
        location: String::new(),
        website: String::new(),
        github: String::new(),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn escape_latex_handles_every_special_character() {
    assert_eq!(escape_latex("50% & $5_{x}"), r"50\% \& \$5\_\{x\}");
    assert_eq!(escape_latex("C# #1"), r"C\# \#1");
    assert_eq!(escape_latex("plain text"), "plain text");
}

#[test]
fn escape_latex_never_rescans_its_own_output() {
    assert_eq!(
        escape_latex(r"a\b~c^d"),
        r"a\textbackslash{}b\textasciitilde{}c\textasciicircum{}d"
    );
    assert_eq!(escape_latex(r"\{"), r"\textbackslash{}\{");
}

#[test]
fn format_period_uses_typographic_dashes() {
    assert_eq!(format_period("2020 - 2023"), "2020 -- 2023");
    assert_eq!(format_period("2020â€“2023"), "2020--2023");
    assert_eq!(format_period("2021"), "2021");
}

#[test]
fn contact_extras_line_only_when_present() {
    assert_eq!(
        render_contact(&contact()),
        "\\resumeHeading{Ada Lovelace}{ada@example.org}{+44 1234}{linkedin.com/in/ada}{scholar/ada}\n"
    );

    let mut with_extras = contact();
    with_extras.github = "github.com/ada_l".to_string();
    let out = render_contact(&with_extras);
    assert!(out.ends_with("\\resumeHeadingExtras{}{}{github.com/ada\\_l}\n"));
}

#[test]
fn empty_sections_render_nothing() {
    assert_eq!(render_summary("   "), "");
    assert_eq!(render_experience(&[]), "");
    assert_eq!(render_skills(&[]), "");
    assert_eq!(render_education(&[]), "");
    assert_eq!(render_patents(&[]), "");
}

#[test]
fn experience_lists_ungrouped_items_before_labelled_groups() {
    let mut groups = AchievementGroups::new();
    groups.push("Leadership", "Mentored juniors");

    let job = GroupedExperience {
        company: "Acme & Co".to_string(),
        location: "Zurich".to_string(),
        position: "Engineer".to_string(),
        period: "2020 - 2022".to_string(),
        achievements: strings(&["Mentored juniors", "Cut costs by 10%"]),
        achievement_groups: groups,
    };

    let expected = "\
%-----------EXPERIENCE-----------------
\\section{Experience}
  \\resumeSubHeadingListStart
    \\resumeSubheading
      {Acme \\& Co}{Zurich}
      {Engineer}{2020 -- 2022}
      \\resumeItemListStart
        \\resumeItem{Cut costs by 10\\%}
        \\resumeItemGroup{Leadership}
        \\resumeItem{Mentored juniors}
      \\resumeItemListEnd
  \\resumeSubHeadingListEnd
";
    assert_eq!(render_experience(&[job]), expected);
}

#[test]
fn job_without_achievements_has_no_item_list() {
    let job = GroupedExperience {
        company: "Acme".to_string(),
        location: "Zurich".to_string(),
        position: "Engineer".to_string(),
        period: "2020".to_string(),
        achievements: Vec::new(),
        achievement_groups: AchievementGroups::new(),
    };
    assert!(!render_experience(&[job]).contains("resumeItemListStart"));
}

#[test]
fn skills_join_names_with_commas() {
    let skills = vec![GroupedSkill {
        category: "Languages".to_string(),
        icon: "Code".to_string(),
        skills: strings(&["C#", "Rust"]),
    }];
    assert!(render_skills(&skills).contains("    \\resumeSkill{Languages}{C\\#, Rust}\n"));
}

#[test]
fn education_description_becomes_single_item() {
    let education = vec![Education {
        institution: "ETH".to_string(),
        location: "Zurich".to_string(),
        degree: "MSc".to_string(),
        period: "2016 - 2018".to_string(),
        description: "  Thesis on control  ".to_string(),
        tags: String::new(),
    }];
    let out = render_education(&education);
    assert!(out.contains("      {MSc}{2016 -- 2018}\n"));
    assert!(out.contains("        \\resumeItem{Thesis on control}\n"));
}

#[test]
fn company_experiences_render_sub_headings_per_position() {
    let entries = vec![
        WebsiteExperience::MultiPosition {
            company: "Sony".to_string(),
            location: "Tokyo".to_string(),
            positions: vec![
                WebsitePosition {
                    title: "Researcher".to_string(),
                    period: "2019 - 2021".to_string(),
                    achievements: strings(&["Published"]),
                },
                WebsitePosition {
                    title: "Lead".to_string(),
                    period: "2021 - Present".to_string(),
                    achievements: Vec::new(),
                },
            ],
        },
        WebsiteExperience::SinglePosition {
            company: "Solo".to_string(),
            position: "Engineer".to_string(),
            location: "Bern".to_string(),
            period: "2017".to_string(),
            achievements: strings(&["Built"]),
        },
    ];

    let expected = "\
%-----------EXPERIENCE-----------------
\\section{Experience}
  \\resumeSubHeadingListStart
    \\resumeSubheading
      {Sony}{Tokyo}
      {}{}
    \\resumeSubSubheading
      {Researcher}{2019 -- 2021}
      \\resumeItemListStart
        \\resumeItem{Published}
      \\resumeItemListEnd
    \\resumeSubSubheading
      {Lead}{2021 -- Present}
    \\resumeSubheading
      {Solo}{Bern}
      {Engineer}{2017}
      \\resumeItemListStart
        \\resumeItem{Built}
      \\resumeItemListEnd
  \\resumeSubHeadingListEnd
";
    assert_eq!(render_company_experiences(&entries), expected);
}

#[test]
fn template_substitutes_known_placeholders_only() {
    let cv = CvData {
        contact: contact(),
        summary: "Builds engines".to_string(),
        experiences: Vec::new(),
        skills: Vec::new(),
        education: Vec::new(),
        patents: Vec::new(),
        publications: Vec::new(),
    };

    let template = LatexTemplate::new("\\begin{document}\n{{summary}}{{experience}}{{unknown}}\n\\end{document}\n");
    let out = template.render(&cv);

    assert_eq!(
        out,
        "\\begin{document}\n\
         %-----------SUMMARY-----------------\n\
         \\section{Summary}\n  \\resumeSummary{Builds engines}\n\
         {{unknown}}\n\\end{document}\n"
    );
}

#[test]
fn builtin_template_mentions_every_placeholder() {
    let cv = CvData {
        contact: contact(),
        summary: String::new(),
        experiences: Vec::new(),
        skills: Vec::new(),
        education: Vec::new(),
        patents: Vec::new(),
        publications: Vec::new(),
    };
    let out = LatexTemplate::builtin().render(&cv);

    assert!(!out.contains("{{"));
    assert!(out.contains("\\resumeHeading{Ada Lovelace}"));
    assert!(!out.contains("\\section"));
}
