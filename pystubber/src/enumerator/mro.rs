//! C3 linearization over classes whose ancestry is only partly known.

use anyhow::{bail, Result};

/// Method resolution order of `class` given the linearizations of its bases.
///
/// `object` is implicit and never appears. A base whose ancestry is unknown
/// (defined outside the module) is passed as a single-element list.
pub fn linearize(class: &str, bases: &[Vec<String>]) -> Result<Vec<String>> {
    let mut sequences: Vec<Vec<String>> = bases.iter().filter(|l| !l.is_empty()).cloned().collect();
    sequences.push(bases.iter().filter_map(|l| l.first().cloned()).collect());

    let mut out = vec![class.to_string()];
    loop {
        sequences.retain(|s| !s.is_empty());
        if sequences.is_empty() {
            return Ok(out);
        }
        let head = sequences
            .iter()
            .map(|s| &s[0])
            .find(|candidate| !sequences.iter().any(|s| s[1..].contains(*candidate)))
            .cloned();
        let Some(head) = head else {
            bail!("cannot create a consistent method resolution order for `{class}`");
        };
        for sequence in &mut sequences {
            if sequence[0] == head {
                sequence.remove(0);
            }
        }
        out.push(head);
    }
}

/// Depth-first, left-to-right ancestry without duplicates.
///
/// Used when the hierarchy has no consistent C3 order.
pub fn depth_first(class: &str, bases: &[Vec<String>]) -> Vec<String> {
    let mut out = vec![class.to_string()];
    for name in bases.iter().flatten() {
        if !out.contains(name) {
            out.push(name.clone());
        }
    }
    out
}
