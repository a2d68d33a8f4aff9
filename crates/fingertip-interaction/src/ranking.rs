//! Candidate ranking shared by the hover and select passes.
//!
//! Candidates compare by normal distance, then tangent distance, each
//! with a tolerance band; inside both bands an optional
//! [`TiebreakerPolicy`] decides, then the touchables' own scores. The
//! band comparison is not transitive, so among candidates tied on every
//! criterion the outcome follows registry order.

use std::cmp::Ordering;

use fingertip_types::TouchableId;

use crate::touchable::Touchable;

/// Compares `a` and `b`, treating values within `threshold` as equal.
#[inline]
pub fn compare_within(a: f32, b: f32, threshold: f32) -> Ordering {
    if (a - b).abs() <= threshold {
        Ordering::Equal
    } else if a < b {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}

/// Host-supplied tie-break consulted before tiebreaker scores.
pub trait TiebreakerPolicy: Send + Sync {
    /// `Greater` prefers `a`, `Less` prefers `b`, `Equal`/`None` defers to scores.
    fn compare(&self, a: &Touchable, b: &Touchable) -> Option<Ordering>;
}

/// A candidate with the distances it was ranked by.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedCandidate {
    pub id: TouchableId,
    pub normal_distance: f32,
    pub tangent_distance: f32,
}

/// Returns true when `candidate` should replace `best`.
pub fn outranks(
    candidate: &Touchable,
    candidate_rank: &RankedCandidate,
    best: &Touchable,
    best_rank: &RankedCandidate,
    policy: Option<&dyn TiebreakerPolicy>,
) -> bool {
    let band = candidate
        .close_distance_threshold()
        .max(best.close_distance_threshold());

    match compare_within(candidate_rank.normal_distance, best_rank.normal_distance, band) {
        Ordering::Less => return true,
        Ordering::Greater => return false,
        Ordering::Equal => {}
    }
    match compare_within(candidate_rank.tangent_distance, best_rank.tangent_distance, band) {
        Ordering::Less => return true,
        Ordering::Greater => return false,
        Ordering::Equal => {}
    }
    if let Some(policy) = policy {
        match policy.compare(candidate, best) {
            Some(Ordering::Greater) => return true,
            Some(Ordering::Less) => return false,
            _ => {}
        }
    }
    candidate.tiebreaker_score() > best.tiebreaker_score()
}

/// Running best of a resolution pass.
pub struct CandidateRanking<'a> {
    best: Option<(&'a Touchable, RankedCandidate)>,
    policy: Option<&'a dyn TiebreakerPolicy>,
}

impl<'a> CandidateRanking<'a> {
    pub fn new(policy: Option<&'a dyn TiebreakerPolicy>) -> Self {
        Self { best: None, policy }
    }

    /// Offers a candidate; returns true if it became the best so far.
    pub fn consider(&mut self, touchable: &'a Touchable, normal_distance: f32, tangent_distance: f32) -> bool {
        let rank = RankedCandidate {
            id: touchable.id(),
            normal_distance,
            tangent_distance,
        };
        let replace = match &self.best {
            None => true,
            Some((best, best_rank)) => outranks(touchable, &rank, best, best_rank, self.policy),
        };
        if replace {
            self.best = Some((touchable, rank));
        }
        replace
    }

    /// The winning candidate, if any.
    pub fn best(&self) -> Option<RankedCandidate> {
        self.best.map(|(_, rank)| rank)
    }
}
