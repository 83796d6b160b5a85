//! Query surface (§4.5): epoch-instant lookup by binary search, and
//! civil-time lookup with gap/fold disambiguation.

use crate::error::{Error, Result};
use crate::model::{ActiveTransition, Ambiguity};

fn local_window_start(t: &ActiveTransition) -> i64 {
    if t.start_instant == i64::MIN {
        i64::MIN
    } else {
        t.start_instant + t.total_offset() as i64
    }
}

fn local_window_until(t: &ActiveTransition) -> i64 {
    if t.until_instant == i64::MAX {
        i64::MAX
    } else {
        t.until_instant + t.total_offset() as i64
    }
}

/// Find the transition in effect at `epoch_seconds`, by bisection over
/// `transitions` (sorted ascending, contiguous; the builder's output
/// invariant). Grounded on the same two-pointer/bisect idea as the teacher's
/// TZif offset lookup.
pub fn info_for_epoch(transitions: &[ActiveTransition], epoch_seconds: i64) -> Result<ActiveTransition> {
    let mut lo = 0usize;
    let mut hi = transitions.len();
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if transitions[mid].until_instant <= epoch_seconds {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    match transitions.get(lo) {
        Some(t) if t.start_instant <= epoch_seconds => Ok(t.clone()),
        _ => Err(Error::OutOfRange),
    }
}

/// Resolve a civil (local) time against `transitions`, returning the
/// three-outcome result (§4.5): exactly one transition claims the wall time
/// (`Unambiguous`), two claim it (`Fold`, a repeated wall-clock reading after
/// falling back), or none claim it (`Gap`, a skipped wall-clock reading after
/// springing forward).
pub fn info_for_local(transitions: &[ActiveTransition], local_seconds: i64) -> Result<Ambiguity> {
    let mut matches: Vec<usize> = Vec::new();
    for (i, t) in transitions.iter().enumerate() {
        if local_seconds >= local_window_start(t) && local_seconds < local_window_until(t) {
            matches.push(i);
        }
    }

    match matches.as_slice() {
        [] => {
            for pair in transitions.windows(2) {
                let before_until = local_window_until(&pair[0]);
                let after_start = local_window_start(&pair[1]);
                if local_seconds >= before_until && local_seconds < after_start {
                    let mut before = pair[0].clone();
                    let mut after = pair[1].clone();
                    before.fold = 0;
                    after.fold = 1;
                    return Ok(Ambiguity::Gap(before, after));
                }
            }
            Err(Error::OutOfRange)
        }
        [i] => {
            let mut t = transitions[*i].clone();
            t.fold = 0;
            Ok(Ambiguity::Unambiguous(t))
        }
        [i, j] => {
            let mut earlier = transitions[*i].clone();
            let mut later = transitions[*j].clone();
            earlier.fold = 0;
            later.fold = 1;
            Ok(Ambiguity::Fold(earlier, later))
        }
        _ => Err(Error::InconsistentRuleSet),
    }
}

/// Pick one side of an ambiguous civil-time resolution using the `fold`
/// disambiguator: `0` selects the earlier/first occurrence for a fold, or
/// the pre-gap offset for a gap; `1` selects the later/second occurrence, or
/// the post-gap offset.
pub fn resolve(ambiguity: Ambiguity, fold: u8) -> ActiveTransition {
    match ambiguity {
        Ambiguity::Unambiguous(t) => t,
        Ambiguity::Fold(earlier, later) => {
            if fold == 0 {
                earlier
            } else {
                later
            }
        }
        Ambiguity::Gap(before, after) => {
            if fold == 0 {
                before
            } else {
                after
            }
        }
    }
}
