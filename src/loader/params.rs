//! Flat transport parameters to source groups
//!
//! Form-style parameters name each sample with
//! `sources[<name>][jsonDefs][<index>][<input|output>]`. All pairs of one
//! name form a group; indices `0..=max` are materialised and a missing index
//! becomes a pair with both sides absent.

use crate::error::{Error, Result};
use crate::types::{SamplePair, SourceGroup};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

/// Highest pair index accepted for one group
pub const MAX_PAIR_INDEX: usize = 1024;

static PARAM_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^sources\[([A-Za-z0-9]+)\]\[jsonDefs\]\[([0-9]+)\]\[(input|output)\]$")
        .expect("parameter pattern is valid")
});

/// Build source groups from flat key/value parameters
///
/// Keys that do not follow the naming pattern are ignored. Groups come back
/// sorted by name.
pub fn digest_params<I, K, V>(params: I) -> Result<Vec<SourceGroup>>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<String>,
{
    let mut sources: BTreeMap<String, BTreeMap<usize, (Option<String>, Option<String>)>> =
        BTreeMap::new();

    for (key, value) in params {
        let key = key.as_ref();
        let Some(captures) = PARAM_PATTERN.captures(key) else {
            if key.starts_with("sources[") {
                tracing::debug!(param = key, "Ignoring unrecognised source parameter");
            }
            continue;
        };

        let name = &captures[1];
        let index: usize = captures[2]
            .parse()
            .map_err(|e| Error::invalid_param(key, format!("Bad pair index: {e}")))?;
        if index > MAX_PAIR_INDEX {
            return Err(Error::invalid_param(
                key,
                format!("Pair index exceeds {MAX_PAIR_INDEX}"),
            ));
        }

        let slot = sources
            .entry(name.to_string())
            .or_default()
            .entry(index)
            .or_default();
        match &captures[3] {
            "input" => slot.0 = Some(value.into()),
            _ => slot.1 = Some(value.into()),
        }
    }

    let groups: Vec<SourceGroup> = sources
        .into_iter()
        .map(|(name, mut pairs)| {
            let max = pairs.keys().next_back().copied().unwrap_or(0);
            let mut group = SourceGroup::new(name);
            for index in 0..=max {
                let (input, output) = pairs.remove(&index).unwrap_or_default();
                group.push(SamplePair::from_options(input, output));
            }
            group
        })
        .collect();

    tracing::debug!(groups = groups.len(), "Digested source parameters");
    Ok(groups)
}
