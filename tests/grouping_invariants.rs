use cv_builder::selection::{
    filter_by_tags, group_experiences, group_experiences_by_company, group_skills,
    sort_by_weight,
};
use cv_builder::types::{ExperienceRow, Patent, SkillRow, WebsiteExperience};

fn make_exp(company: &str, position: &str, period: &str, text: &str, weight: i64) -> ExperienceRow {
    ExperienceRow {
        company: company.to_string(),
        location: "Zurich".to_string(),
        position: position.to_string(),
        period: period.to_string(),
        achievement_group: String::new(),
        achievement_text: text.to_string(),
        papers: 0,
        patents: 0,
        tags: String::new(),
        weight,
    }
}

fn make_skill(category: &str, skill: &str, icon: &str, weight: i64) -> SkillRow {
    SkillRow {
        category: category.to_string(),
        skill: skill.to_string(),
        tags: String::new(),
        icon: icon.to_string(),
        weight,
    }
}

#[test]
fn achievements_sort_by_weight_descending_and_stable_on_ties() {
    let rows = vec![
        make_exp("Acme", "Engineer", "2020 - 2022", "w3-first", 3),
        make_exp("Acme", "Engineer", "2020 - 2022", "w1", 1),
        make_exp("Acme", "Engineer", "2020 - 2022", "w3-second", 3),
        make_exp("Acme", "Engineer", "2020 - 2022", "w2", 2),
    ];

    let grouped = group_experiences(&rows);
    assert_eq!(grouped.len(), 1);
    assert_eq!(
        grouped[0].achievements,
        vec!["w3-first", "w3-second", "w2", "w1"]
    );
}

#[test]
fn jobs_keep_first_seen_order_not_alphabetical() {
    let rows = vec![
        make_exp("Zeta", "Lead", "2022 - Present", "z1", 1),
        make_exp("Alpha", "Intern", "2018 - 2019", "a1", 1),
        make_exp("Zeta", "Lead", "2022 - Present", "z2", 5),
        make_exp("Mid", "Engineer", "2019 - 2022", "m1", 1),
    ];

    let grouped = group_experiences(&rows);
    let companies: Vec<&str> = grouped.iter().map(|g| g.company.as_str()).collect();
    assert_eq!(companies, vec!["Zeta", "Alpha", "Mid"]);
    assert_eq!(grouped[0].achievements, vec!["z2", "z1"]);
}

#[test]
fn grouping_key_includes_position_and_period() {
    let rows = vec![
        make_exp("Acme", "Engineer", "2018 - 2020", "e1", 1),
        make_exp("Acme", "Senior Engineer", "2020 - 2023", "s1", 1),
        make_exp("Acme", "Engineer", "2018 - 2020", "e2", 1),
    ];

    let grouped = group_experiences(&rows);
    assert_eq!(grouped.len(), 2);
    assert_eq!(grouped[0].position, "Engineer");
    assert_eq!(grouped[0].achievements, vec!["e1", "e2"]);
    assert_eq!(grouped[1].position, "Senior Engineer");
}

#[test]
fn flattening_groups_reproduces_every_achievement_exactly_once() {
    let mut rows = Vec::new();
    for (i, company) in ["A", "B", "A", "C", "B", "A"].iter().enumerate() {
        rows.push(make_exp(company, "Role", "2020", &format!("ach-{i}"), (i % 3) as i64));
    }

    let grouped = group_experiences(&rows);
    let mut flattened: Vec<String> = grouped.into_iter().flat_map(|g| g.achievements).collect();
    let mut expected: Vec<String> = rows.iter().map(|r| r.achievement_text.clone()).collect();
    flattened.sort();
    expected.sort();
    assert_eq!(flattened, expected);
}

#[test]
fn subgroup_labels_populate_both_views() {
    let mut rows = vec![
        make_exp("Acme", "Engineer", "2020", "plain", 5),
        make_exp("Acme", "Engineer", "2020", "lead-low", 1),
        make_exp("Acme", "Engineer", "2020", "research-1", 4),
        make_exp("Acme", "Engineer", "2020", "lead-high", 3),
    ];
    rows[1].achievement_group = "Leadership".to_string();
    rows[2].achievement_group = "Research".to_string();
    rows[3].achievement_group = "Leadership".to_string();

    let grouped = group_experiences(&rows);
    let job = &grouped[0];

    assert_eq!(job.achievements, vec!["plain", "research-1", "lead-high", "lead-low"]);
    assert_eq!(job.achievement_groups.labels().collect::<Vec<_>>(), vec!["Research", "Leadership"]);
    assert_eq!(job.achievement_groups.get("Leadership").unwrap(), ["lead-high", "lead-low"]);
    assert_eq!(job.achievement_groups.get("Research").unwrap(), ["research-1"]);
    assert_eq!(job.ungrouped_achievements(), vec!["plain"]);

    let json = serde_json::to_string(&job.achievement_groups).unwrap();
    assert_eq!(json, r#"{"Research":["research-1"],"Leadership":["lead-high","lead-low"]}"#);
}

#[test]
fn skills_group_by_category_sorted_by_weight() {
    let rows = vec![
        make_skill("Languages", "Python", "Code", 5),
        make_skill("Languages", "Go", "Code", 9),
        make_skill("Tools", "Docker", "Wrench", 1),
    ];

    let grouped = group_skills(&rows);
    assert_eq!(grouped.len(), 2);
    assert_eq!(grouped[0].category, "Languages");
    assert_eq!(grouped[0].skills, vec!["Go", "Python"]);
    assert_eq!(grouped[1].category, "Tools");
    assert_eq!(grouped[1].skills, vec!["Docker"]);
    assert_eq!(grouped[1].icon, "Wrench");
}

#[test]
fn skill_icon_comes_from_first_row_of_category() {
    let rows = vec![
        make_skill("Languages", "Python", "Terminal", 1),
        make_skill("Languages", "Go", "Code", 9),
    ];

    let grouped = group_skills(&rows);
    assert_eq!(grouped[0].icon, "Terminal");
    assert_eq!(grouped[0].skills, vec!["Go", "Python"]);
}

#[test]
fn skill_icon_ignores_highest_weight_row_and_weight_changes() {
    let mut rows = vec![
        make_skill("Tools", "Make", "Hammer", 1),
        make_skill("Tools", "Docker", "Container", 7),
        make_skill("Tools", "Git", "Branch", 3),
    ];

    let grouped = group_skills(&rows);
    assert_eq!(grouped[0].skills, vec!["Docker", "Git", "Make"]);
    assert_eq!(grouped[0].icon, "Hammer");

    rows[0].weight = 10;
    rows[1].weight = 0;
    let regrouped = group_skills(&rows);
    assert_eq!(regrouped[0].skills, vec!["Make", "Git", "Docker"]);
    assert_eq!(regrouped[0].icon, "Hammer");
}

#[test]
fn filtered_grouping_drops_unmatched_rows_before_grouping() {
    let mut rows = vec![
        make_exp("Acme", "Engineer", "2020", "ml-bullet", 1),
        make_exp("Acme", "Engineer", "2020", "hw-bullet", 2),
        make_exp("Other", "Engineer", "2019", "hw-only-job", 1),
    ];
    rows[0].tags = "ml".to_string();
    rows[1].tags = "hardware".to_string();
    rows[2].tags = "hardware".to_string();

    let grouped = group_experiences(&filter_by_tags(rows, &["ml"]));
    assert_eq!(grouped.len(), 1);
    assert_eq!(grouped[0].achievements, vec!["ml-bullet"]);
}

#[test]
fn company_with_two_positions_becomes_multi_position_entry() {
    let rows = vec![
        make_exp("Sony", "Researcher", "2019 - 2021", "r1", 1),
        make_exp("Sony", "Senior Researcher", "2021 - Present", "s1", 1),
        make_exp("Sony", "Researcher", "2019 - 2021", "r2", 4),
        make_exp("Solo", "Engineer", "2017 - 2019", "e1", 1),
    ];

    let entries = group_experiences_by_company(&rows);
    assert_eq!(entries.len(), 2);

    match &entries[0] {
        WebsiteExperience::MultiPosition {
            company,
            location,
            positions,
        } => {
            assert_eq!(company, "Sony");
            assert_eq!(location, "Zurich");
            assert_eq!(positions.len(), 2);
            assert_eq!(positions[0].title, "Researcher");
            assert_eq!(positions[0].achievements, vec!["r2", "r1"]);
            assert_eq!(positions[1].title, "Senior Researcher");
        }
        other => panic!("expected multi-position entry, got {other:?}"),
    }

    let json = serde_json::to_value(&entries[1]).unwrap();
    assert!(json.get("positions").is_none());
    assert_eq!(json["position"], "Engineer");
    assert_eq!(json["period"], "2017 - 2019");
}

#[test]
fn same_position_with_different_period_counts_as_distinct() {
    let rows = vec![
        make_exp("Acme", "Engineer", "2015 - 2016", "first stint", 1),
        make_exp("Acme", "Engineer", "2018 - 2020", "second stint", 1),
    ];

    let entries = group_experiences_by_company(&rows);
    match &entries[0] {
        WebsiteExperience::MultiPosition { positions, .. } => assert_eq!(positions.len(), 2),
        other => panic!("expected multi-position entry, got {other:?}"),
    }
}

#[test]
fn sort_by_weight_is_stable_for_flat_lists() {
    let make = |title: &str, weight: i64| Patent {
        authors: "X".to_string(),
        title: title.to_string(),
        reference: "US1".to_string(),
        url: "u".to_string(),
        year: 2020,
        tags: String::new(),
        weight,
    };
    let mut patents = vec![make("a", 1), make("b", 2), make("c", 1), make("d", 2)];
    sort_by_weight(&mut patents);

    let order: Vec<&str> = patents.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(order, vec!["b", "d", "a", "c"]);
}
