//! Collapse flat rows into hierarchical records.
//!
//! All groupings keep keys in first-seen order and sort members by weight,
//! descending. Sorting is stable: rows of equal weight keep their CSV order.

use std::cmp::Reverse;

use crate::types::grouped::{AchievementGroups, GroupedExperience, GroupedSkill};
use crate::types::records::{ExperienceRow, SkillRow, Weighted};
use crate::types::website::{WebsiteExperience, WebsitePosition};

/// Partition `rows` by `key`, preserving the order in which keys first appear.
fn partition_by<'a, T, K, I, F>(rows: I, key: F) -> Vec<(K, Vec<&'a T>)>
where
    T: 'a,
    K: PartialEq,
    I: IntoIterator<Item = &'a T>,
    F: Fn(&T) -> K,
{
    let mut groups: Vec<(K, Vec<&'a T>)> = Vec::new();
    for row in rows {
        let k = key(row);
        match groups.iter_mut().find(|(existing, _)| *existing == k) {
            Some((_, members)) => members.push(row),
            None => groups.push((k, vec![row])),
        }
    }
    groups
}

/// Stable sort by weight, highest first.
pub fn sort_by_weight<T: Weighted>(rows: &mut [T]) {
    rows.sort_by_key(|row| Reverse(row.weight()));
}

/// Group experience rows by (company, location, position, period).
pub fn group_experiences(rows: &[ExperienceRow]) -> Vec<GroupedExperience> {
    partition_by(rows, |r| {
        (
            r.company.clone(),
            r.location.clone(),
            r.position.clone(),
            r.period.clone(),
        )
    })
    .into_iter()
    .map(|((company, location, position, period), mut members)| {
        sort_by_weight(&mut members);

        let mut achievement_groups = AchievementGroups::new();
        for row in &members {
            let label = row.achievement_group.trim();
            if !label.is_empty() {
                achievement_groups.push(label, row.achievement_text.clone());
            }
        }

        GroupedExperience {
            company,
            location,
            position,
            period,
            achievements: members
                .iter()
                .map(|r| r.achievement_text.clone())
                .collect(),
            achievement_groups,
        }
    })
    .collect()
}

/// Group skill rows by category.
///
/// The icon comes from the first row of the category in input order, not
/// from the highest-weight row, so reordering weights never changes a
/// category's icon. Rows that disagree on the icon are not reconciled.
pub fn group_skills(rows: &[SkillRow]) -> Vec<GroupedSkill> {
    partition_by(rows, |r| r.category.clone())
        .into_iter()
        .map(|(category, mut members)| {
            let icon = members[0].icon.clone();
            sort_by_weight(&mut members);
            GroupedSkill {
                category,
                icon,
                skills: members.iter().map(|r| r.skill.clone()).collect(),
            }
        })
        .collect()
}

/// Group experience rows company-first for the website.
///
/// A company with more than one distinct (position, period) pair becomes a
/// multi-position entry whose location is that of the company's first row;
/// otherwise a single-position entry built from its highest-weight row.
pub fn group_experiences_by_company(rows: &[ExperienceRow]) -> Vec<WebsiteExperience> {
    partition_by(rows, |r| r.company.clone())
        .into_iter()
        .map(|(company, members)| {
            let positions = partition_by(members.iter().copied(), |r| {
                (r.position.clone(), r.period.clone())
            });

            if positions.len() > 1 {
                let location = members[0].location.clone();
                let positions = positions
                    .into_iter()
                    .map(|((title, period), mut pos_rows)| {
                        sort_by_weight(&mut pos_rows);
                        WebsitePosition {
                            title,
                            period,
                            achievements: pos_rows
                                .iter()
                                .map(|r| r.achievement_text.clone())
                                .collect(),
                        }
                    })
                    .collect();

                WebsiteExperience::MultiPosition {
                    company,
                    location,
                    positions,
                }
            } else {
                let mut sorted = members;
                sort_by_weight(&mut sorted);
                let top = sorted[0];
                WebsiteExperience::SinglePosition {
                    company,
                    position: top.position.clone(),
                    location: top.location.clone(),
                    period: top.period.clone(),
                    achievements: sorted.iter().map(|r| r.achievement_text.clone()).collect(),
                }
            }
        })
        .collect()
}
