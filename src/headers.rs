//! Canonical column naming for raw header records.
//!
//! Raw header cells arrive trimmed-or-not, mixed-case, and frequently
//! duplicated. [`normalize_headers`] turns them into stable lowercase
//! identifiers, filling blanks positionally and suffixing repeats so that
//! the output never contains the same name twice. Headerless tables get
//! positional names from [`synthesize_headers`].

use std::collections::HashMap;

/// Normalizes a raw header record into unique column identifiers, one per
/// input field, preserving order.
///
/// Per field: trim, substitute `col_<position>` for blanks, lowercase, and
/// fold spaces and hyphens into underscores. The first occurrence of a name
/// is emitted as-is; repeat occurrences get `_1`, `_2`, ... suffixes. A
/// suffixed name that would itself collide with an already-emitted name is
/// bumped until it is free, so the output is always duplicate-free.
pub fn normalize_headers(record: &[String]) -> Vec<String> {
    let mut counters: HashMap<String, usize> = HashMap::new();
    let mut names = Vec::with_capacity(record.len());
    for (idx, raw) in record.iter().enumerate() {
        let base = canonical_name(raw, idx);
        let unique = match counters.get(&base).copied() {
            None => base,
            Some(repeats) => {
                let mut next = repeats + 1;
                let mut candidate = format!("{base}_{next}");
                while counters.contains_key(&candidate) {
                    next += 1;
                    candidate = format!("{base}_{next}");
                }
                counters.insert(base, next);
                candidate
            }
        };
        counters.entry(unique.clone()).or_insert(0);
        names.push(unique);
    }
    names
}

/// Positional `col_1 .. col_n` names for tables without a header row.
pub fn synthesize_headers(count: usize) -> Vec<String> {
    (1..=count).map(|idx| format!("col_{idx}")).collect()
}

fn canonical_name(raw: &str, idx: usize) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return format!("col_{}", idx + 1);
    }
    trimmed
        .to_lowercase()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            other => other,
        })
        .collect()
}
