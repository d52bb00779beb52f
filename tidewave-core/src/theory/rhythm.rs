//! Euclidean and polyrhythmic drum bodies

use crate::types::REST;

/// Spread `hits` onsets as evenly as possible over `steps` slots
/// (Bjorklund). `true` marks an onset. The first slot is always an onset
/// when there is at least one.
pub fn bjorklund(hits: usize, steps: usize) -> Vec<bool> {
    if hits >= steps {
        return vec![true; steps];
    }
    if hits == 0 {
        return vec![false; steps];
    }

    // Pair onset groups with rest groups until at most one remainder group
    // is left, then read the groups out in order.
    let mut heads: Vec<Vec<bool>> = vec![vec![true]; hits];
    let mut tails: Vec<Vec<bool>> = vec![vec![false]; steps - hits];

    while tails.len() > 1 {
        let paired = heads.len().min(tails.len());
        let spare_heads = heads.split_off(paired);
        let spare_tails = tails.split_off(paired);
        for (head, tail) in heads.iter_mut().zip(tails) {
            head.extend(tail);
        }
        tails = if spare_heads.is_empty() { spare_tails } else { spare_heads };
    }

    heads.into_iter().chain(tails).flatten().collect()
}

/// Mini-notation body placing `sound` on a Euclidean rhythm rotated left by
/// `rotation` steps, e.g. `bd ~ ~ bd ~ ~ bd ~` for (3, 8)
pub fn euclidean_body(hits: usize, steps: usize, rotation: usize, sound: &str) -> String {
    let mut pattern = bjorklund(hits, steps);
    if !pattern.is_empty() {
        let len = pattern.len();
        pattern.rotate_left(rotation % len);
    }
    pattern
        .iter()
        .map(|hit| if *hit { sound } else { REST })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Kick against clap, `a` against `b` per cycle
pub fn polyrhythm_body(a: usize, b: usize) -> String {
    format!("[bd*{}, cp*{}]", a, b)
}
