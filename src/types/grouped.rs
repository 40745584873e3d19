use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::types::records::{Contact, Education, Patent, Publication};

/// Achievement subgroups of one job, keyed by label in order of first appearance.
///
/// Serializes as a JSON object whose key order is the insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AchievementGroups {
    entries: Vec<(String, Vec<String>)>,
}

impl AchievementGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `text` to the group named `label`, creating the group on first use.
    pub fn push(&mut self, label: &str, text: impl Into<String>) {
        match self.entries.iter_mut().find(|(l, _)| l == label) {
            Some((_, items)) => items.push(text.into()),
            None => self.entries.push((label.to_string(), vec![text.into()])),
        }
    }

    pub fn get(&self, label: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, items)| items.as_slice())
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(l, _)| l.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(l, items)| (l.as_str(), items.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for AchievementGroups {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, items) in &self.entries {
            map.serialize_entry(label, items)?;
        }
        map.end()
    }
}

/// One job with its achievements collapsed from flat rows.
///
/// `achievements` holds every achievement of the job, weight-descending.
/// Labelled achievements additionally appear under their label in
/// `achievement_groups`; the two views are not deduplicated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupedExperience {
    pub company: String,
    pub location: String,
    pub position: String,
    pub period: String,
    pub achievements: Vec<String>,
    pub achievement_groups: AchievementGroups,
}

impl GroupedExperience {
    /// Achievements without a subgroup label, in flat-list order.
    pub fn ungrouped_achievements(&self) -> Vec<&str> {
        // Multiset difference: each grouped text consumes one flat occurrence.
        let mut pending: Vec<&str> = self
            .achievement_groups
            .iter()
            .flat_map(|(_, items)| items.iter().map(String::as_str))
            .collect();

        self.achievements
            .iter()
            .map(String::as_str)
            .filter(|text| match pending.iter().position(|p| p == text) {
                Some(idx) => {
                    pending.swap_remove(idx);
                    false
                }
                None => true,
            })
            .collect()
    }
}

/// Skills of one category, weight-descending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupedSkill {
    pub category: String,
    pub icon: String,
    pub skills: Vec<String>,
}

/// Everything one generator run needs. Built once, read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CvData {
    pub contact: Contact,
    pub summary: String,
    pub experiences: Vec<GroupedExperience>,
    pub skills: Vec<GroupedSkill>,
    pub education: Vec<Education>,
    pub patents: Vec<Patent>,
    pub publications: Vec<Publication>,
}
