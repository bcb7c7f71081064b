use rand::{distributions::Alphanumeric, seq::SliceRandom, Rng};

use super::model::GitSource;

const NUMERIC_PREFIX: &str = "comp";
const MAX_BASE_LENGTH: usize = 58;
const SUFFIX_LENGTH: usize = 4;

const FALLBACK_NOUNS: &[&str] = &[
    "anchor", "badger", "beacon", "bridge", "canyon", "cedar", "comet", "compass", "delta",
    "ember", "falcon", "fjord", "garden", "glacier", "harbor", "heron", "island", "jasper",
    "kettle", "lantern", "maple", "meadow", "nebula", "orchard", "otter", "pebble", "prairie",
    "quartz", "raven", "river", "saddle", "summit", "thicket", "timber", "tundra", "valley",
    "willow", "zephyr",
];

/// Derives the raw component name for a git source: the repository name, prefixed
/// with the context when the component does not live at the repository root.
pub fn raw_component_name(git_source: &GitSource) -> String {
    let url = git_source.url.as_str();
    if url.is_empty() {
        return String::new();
    }
    let url = url.strip_suffix('/').unwrap_or(url);
    let last_element = url.rsplit('/').next().unwrap_or(url);
    let repo_name = last_element.split(".git").next().unwrap_or(last_element);

    match git_source.context.as_deref() {
        Some(context) if !matches!(context, "" | "." | "./") => format!("{context}-{repo_name}"),
        _ => repo_name.to_string(),
    }
}

/// Turns a raw name into a component name that is a valid cluster identifier:
/// at most 63 lowercase alphanumeric characters or '-', starting with a letter,
/// ending with an alphanumeric character and carrying a random 4 character suffix.
pub fn sanitize_component_name(name: &str) -> String {
    let filtered: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect();
    let mut base = filtered.trim_matches('-').to_string();
    if base.is_empty() {
        base = random_noun();
    }
    if base.starts_with(|c: char| c.is_ascii_digit()) {
        base = format!("{NUMERIC_PREFIX}-{base}");
    }
    base.make_ascii_lowercase();
    base.truncate(MAX_BASE_LENGTH);
    let base = base.trim_end_matches('-');

    format!("{}-{}", base, random_string(SUFFIX_LENGTH))
}

fn random_string(length: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(|c| char::from(c).to_ascii_lowercase())
        .collect()
}

fn random_noun() -> String {
    FALLBACK_NOUNS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or("component")
        .to_string()
}
