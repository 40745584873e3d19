use std::collections::{BTreeMap, BTreeSet};

use crate::loader::{CvDataLoader, LoadError};
use crate::types::records::Tagged;
use crate::types::tags::{normalize_wanted, parse_tags, ALWAYS_TAG};

/// Keep rows matching ANY wanted tag, plus rows tagged `always`.
///
/// An empty `wanted` list disables filtering and returns `rows` unchanged.
/// A row with no tags never matches a non-empty filter.
pub fn filter_by_tags<T: Tagged, S: AsRef<str>>(rows: Vec<T>, wanted: &[S]) -> Vec<T> {
    if wanted.is_empty() {
        return rows;
    }

    let wanted = normalize_wanted(wanted);
    rows.into_iter()
        .filter(|row| {
            let tags = parse_tags(row.tags());
            tags.contains(ALWAYS_TAG) || !tags.is_disjoint(&wanted)
        })
        .collect()
}

/// Drop rows carrying ANY of `excluded`. `always` grants no exemption here.
pub fn exclude_by_tags<T: Tagged, S: AsRef<str>>(rows: Vec<T>, excluded: &[S]) -> Vec<T> {
    if excluded.is_empty() {
        return rows;
    }

    let excluded = normalize_wanted(excluded);
    rows.into_iter()
        .filter(|row| parse_tags(row.tags()).is_disjoint(&excluded))
        .collect()
}

/// Union of all tags used by `rows`.
pub fn get_all_tags<T: Tagged>(rows: &[T]) -> BTreeSet<String> {
    rows.iter().flat_map(|row| parse_tags(row.tags())).collect()
}

/// Tags used per filterable section, keyed by section name.
///
/// Sections whose source file is missing are skipped; any other load error
/// is returned.
pub fn collect_all_tags(
    loader: &CvDataLoader,
) -> Result<BTreeMap<String, BTreeSet<String>>, LoadError> {
    fn section<T: Tagged>(
        out: &mut BTreeMap<String, BTreeSet<String>>,
        name: &str,
        rows: Result<Vec<T>, LoadError>,
    ) -> Result<(), LoadError> {
        match rows {
            Ok(rows) => {
                out.insert(name.to_string(), get_all_tags(&rows));
                Ok(())
            }
            Err(LoadError::MissingSource { .. }) => Ok(()),
            Err(e) => Err(e),
        }
    }

    let mut by_section = BTreeMap::new();
    section(&mut by_section, "experiences", loader.load_experiences())?;
    section(&mut by_section, "skills", loader.load_skills())?;
    section(&mut by_section, "patents", loader.load_patents())?;
    section(&mut by_section, "publications", loader.load_publications())?;
    Ok(by_section)
}
