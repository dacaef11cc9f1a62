use std::collections::HashMap;

use crate::models::{LanguageShare, Repository};

pub const MAX_LANGUAGES: usize = 5;

/// Rank repository languages by how many repositories use them.
///
/// Percentages are taken against every repository, including those with no
/// detected language, so they can sum to less than 100. Equal counts keep
/// the order in which the languages were first seen.
pub fn rank_languages(repos: &[Repository]) -> Vec<LanguageShare> {
    if repos.is_empty() {
        return Vec::new();
    }

    let mut counts: Vec<(&str, u64)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for language in repos.iter().filter_map(|r| r.language.as_deref()) {
        match index.get(language) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(language, counts.len());
                counts.push((language, 1));
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));

    let total = repos.len() as f64;
    counts
        .into_iter()
        .take(MAX_LANGUAGES)
        .map(|(name, count)| LanguageShare {
            name: name.to_string(),
            count,
            percentage: (count as f64 / total * 100.0).round() as u32,
        })
        .collect()
}
