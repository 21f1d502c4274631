//! Positional boundary scoring.
//!
//! A reference line and a prediction line are compared only over the region
//! both agree on: the longest common prefix of their base strings, further
//! cut at the last reference boundary inside that prefix. Every character
//! offset `1..=cutoff` is one binary decision (boundary or not), tallied into
//! a confusion matrix.

use std::collections::BTreeSet;
use std::ops::AddAssign;

use serde::Serialize;

use crate::boundary::{extract, BoundaryLine};

/// Confusion-matrix counts over candidate boundary positions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Confusion {
    pub true_positives: u64,
    pub false_positives: u64,
    pub false_negatives: u64,
    pub true_negatives: u64,
    /// Candidate positions considered; always the sum of the four counts.
    pub positions: u64,
}

impl AddAssign for Confusion {
    fn add_assign(&mut self, other: Self) {
        self.true_positives += other.true_positives;
        self.false_positives += other.false_positives;
        self.false_negatives += other.false_negatives;
        self.true_negatives += other.true_negatives;
        self.positions += other.positions;
    }
}

/// Result of comparing one reference/prediction pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    Compared(Confusion),
    /// The base strings differ at the first character (or both are empty).
    BaseMismatch,
    /// No reference boundary falls within the common prefix; nothing to score.
    NoReferenceBoundary,
}

/// Number of leading characters shared by `a` and `b`.
pub fn common_prefix_len(a: &str, b: &str) -> usize {
    a.chars().zip(b.chars()).take_while(|(x, y)| x == y).count()
}

/// Compare two extracted lines.
pub fn compare(reference: &BoundaryLine, prediction: &BoundaryLine) -> LineOutcome {
    let prefix_len = common_prefix_len(&reference.base, &prediction.base);
    if prefix_len == 0 {
        return LineOutcome::BaseMismatch;
    }

    let reference_in_prefix = reference.boundaries_up_to(prefix_len);
    let Some(&cutoff) = reference_in_prefix.last() else {
        return LineOutcome::NoReferenceBoundary;
    };

    let predicted: BTreeSet<usize> = prediction.boundaries_up_to(cutoff);
    let true_positives = reference_in_prefix.intersection(&predicted).count() as u64;
    let false_positives = predicted.difference(&reference_in_prefix).count() as u64;
    let false_negatives = reference_in_prefix.difference(&predicted).count() as u64;
    let positions = cutoff as u64;

    LineOutcome::Compared(Confusion {
        true_positives,
        false_positives,
        false_negatives,
        true_negatives: positions - true_positives - false_positives - false_negatives,
        positions,
    })
}

/// Compare two raw dissection lines.
pub fn compare_lines(reference: &str, prediction: &str) -> LineOutcome {
    compare(&extract(reference), &extract(prediction))
}

/// `num / den`, or NaN when the denominator is zero.
fn ratio(num: u64, den: u64) -> f64 {
    if den == 0 {
        f64::NAN
    } else {
        num as f64 / den as f64
    }
}

/// Corpus-level metrics. Undefined values are NaN (serialized as `null`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CorpusMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub accuracy: f64,
    pub false_positive_rate: f64,
}

impl CorpusMetrics {
    pub fn from_confusion(c: &Confusion) -> Self {
        let tp = c.true_positives;
        let fp = c.false_positives;
        let fn_ = c.false_negatives;
        let tn = c.true_negatives;
        Self {
            precision: ratio(tp, tp + fp),
            recall: ratio(tp, tp + fn_),
            f1: ratio(2 * tp, 2 * tp + fp + fn_),
            accuracy: ratio(tp + tn, c.positions),
            false_positive_rate: ratio(fp, fp + tn),
        }
    }
}

/// A pair excluded from scoring because the base strings disagree from the
/// first character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MismatchedPair {
    /// 1-based pair index.
    pub line: usize,
    pub reference: String,
    pub prediction: String,
}

/// Aggregated outcome of a scoring run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreReport {
    pub lines_read: usize,
    pub lines_compared: usize,
    pub base_mismatch_lines: usize,
    pub lines_without_reference_boundary: usize,
    pub confusion: Confusion,
    pub metrics: CorpusMetrics,
    pub mismatches: Vec<MismatchedPair>,
}

/// Accumulates line comparisons into corpus totals.
#[derive(Debug, Clone, Default)]
pub struct Scorer {
    lines_read: usize,
    lines_compared: usize,
    lines_without_reference_boundary: usize,
    confusion: Confusion,
    mismatches: Vec<MismatchedPair>,
}

impl Scorer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare one pair and fold it into the totals.
    pub fn push(&mut self, reference: &str, prediction: &str) -> LineOutcome {
        self.lines_read += 1;
        let outcome = compare_lines(reference, prediction);
        match outcome {
            LineOutcome::Compared(confusion) => {
                self.lines_compared += 1;
                self.confusion += confusion;
            }
            LineOutcome::BaseMismatch => {
                log::warn!("Base mismatch on line {}, excluded from metrics", self.lines_read);
                self.mismatches.push(MismatchedPair {
                    line: self.lines_read,
                    reference: reference.to_string(),
                    prediction: prediction.to_string(),
                });
            }
            LineOutcome::NoReferenceBoundary => {
                log::debug!(
                    "Line {} has no reference boundary in the common prefix",
                    self.lines_read
                );
                self.lines_without_reference_boundary += 1;
            }
        }
        outcome
    }

    pub fn finish(self) -> ScoreReport {
        ScoreReport {
            lines_read: self.lines_read,
            lines_compared: self.lines_compared,
            base_mismatch_lines: self.mismatches.len(),
            lines_without_reference_boundary: self.lines_without_reference_boundary,
            metrics: CorpusMetrics::from_confusion(&self.confusion),
            confusion: self.confusion,
            mismatches: self.mismatches,
        }
    }
}

/// Score paired lines; pairing stops at the shorter input.
pub fn score_lines<G, T>(reference: G, prediction: T) -> ScoreReport
where
    G: IntoIterator,
    G::Item: AsRef<str>,
    T: IntoIterator,
    T::Item: AsRef<str>,
{
    let mut scorer = Scorer::new();
    for (g, t) in reference.into_iter().zip(prediction) {
        scorer.push(g.as_ref(), t.as_ref());
    }
    scorer.finish()
}
