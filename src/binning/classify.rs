/// Label reserved for objects whose measurement is missing (NaN).
pub const UNCLASSIFIED: u32 = 0;

/// Bin membership of every object for one classification.
///
/// `hits` is row-major, `num_objects x num_bins`. Each row has at most one
/// `true`; rows of NaN-valued objects are all `false`.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationResult {
    num_objects: usize,
    num_bins: usize,
    hits: Vec<bool>,
    missing: Vec<bool>,
    counts: Vec<usize>,
    percentages: Vec<f64>,
}

/// Tests every value against every half-open interval `(edges[b], edges[b + 1]]`.
///
/// A value equal to an edge lands in the bin that edge closes, so a value
/// equal to the first finite edge is unclassified unless a low catch bin
/// exists. NaN compares false everywhere and stays unclassified.
pub fn classify(values: &[f64], edges: &[f64]) -> ClassificationResult {
    let num_bins = edges.len().saturating_sub(1);
    let mut hits = vec![false; values.len() * num_bins];
    let mut counts = vec![0usize; num_bins];

    for (row, &value) in hits.chunks_mut(num_bins.max(1)).zip(values) {
        for (b, window) in edges.windows(2).enumerate() {
            if value > window[0] && value <= window[1] {
                row[b] = true;
                counts[b] += 1;
            }
        }
    }

    let num_objects = values.len();
    let missing = values.iter().map(|v| v.is_nan()).collect();
    let percentages = counts
        .iter()
        .map(|&count| {
            if num_objects > 0 {
                100.0 * count as f64 / num_objects as f64
            } else {
                0.0
            }
        })
        .collect();

    ClassificationResult {
        num_objects,
        num_bins,
        hits,
        missing,
        counts,
        percentages,
    }
}

impl ClassificationResult {
    pub fn num_objects(&self) -> usize {
        self.num_objects
    }

    pub fn num_bins(&self) -> usize {
        self.num_bins
    }

    /// Membership of object `o` in every bin.
    pub fn row(&self, o: usize) -> &[bool] {
        &self.hits[o * self.num_bins..(o + 1) * self.num_bins]
    }

    pub fn is_member(&self, o: usize, b: usize) -> bool {
        self.hits[o * self.num_bins + b]
    }

    /// Membership of every object in bin `b`, as the 0/1 column recorded per object.
    pub fn column(&self, b: usize) -> Vec<u8> {
        (0..self.num_objects)
            .map(|o| u8::from(self.is_member(o, b)))
            .collect()
    }

    /// Objects per bin.
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Percentage of all objects per bin. NaN-valued objects count toward
    /// the total; an empty object set reports 0 for every bin.
    pub fn percentages(&self) -> &[f64] {
        &self.percentages
    }

    /// Number of objects that landed in some bin.
    pub fn classified(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Per-object color index for the class image: `sum(b * hit) + 1`.
    ///
    /// An object with a value outside every bin sums to 0 and so shares
    /// label 1 with the first bin. Only NaN-valued objects get `UNCLASSIFIED`.
    pub fn object_labels(&self) -> Vec<u32> {
        (0..self.num_objects)
            .map(|o| {
                if self.missing[o] {
                    return UNCLASSIFIED;
                }
                let bin_sum: usize = self
                    .row(o)
                    .iter()
                    .enumerate()
                    .filter(|&(_, &hit)| hit)
                    .map(|(b, _)| b)
                    .sum();
                bin_sum as u32 + 1
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_open_intervals() {
        let edges = [0.0, 5.0, 10.0];
        let result = classify(&[5.0, 10.0, 0.0, -1.0, 11.0, 2.5], &edges);

        assert_eq!(result.row(0), &[true, false]);
        assert_eq!(result.row(1), &[false, true]);
        assert_eq!(result.row(2), &[false, false]);
        assert_eq!(result.row(3), &[false, false]);
        assert_eq!(result.row(4), &[false, false]);
        assert_eq!(result.row(5), &[true, false]);
        assert_eq!(result.counts(), &[2, 1]);
    }

    #[test]
    fn nan_rows_are_empty_but_counted_in_total() {
        let result = classify(&[f64::NAN, 1.0, 7.0, f64::NAN], &[0.0, 5.0, 10.0]);

        assert_eq!(result.row(0), &[false, false]);
        assert_eq!(result.row(3), &[false, false]);
        assert_eq!(result.counts(), &[1, 1]);
        assert_eq!(result.percentages(), &[25.0, 25.0]);
        assert_eq!(result.object_labels(), vec![UNCLASSIFIED, 1, 2, UNCLASSIFIED]);
    }

    #[test]
    fn out_of_range_values_take_the_first_label() {
        let result = classify(&[-1.0, f64::NAN, 3.0, 0.0, 12.0, 7.0], &[0.0, 5.0, 10.0]);

        assert_eq!(result.counts(), &[1, 1]);
        assert_eq!(result.object_labels(), vec![1, UNCLASSIFIED, 1, 1, 1, 2]);
    }

    #[test]
    fn empty_object_set_reports_zero_percent() {
        let result = classify(&[], &[0.0, 1.0, 2.0]);
        assert_eq!(result.num_objects(), 0);
        assert_eq!(result.counts(), &[0, 0]);
        assert_eq!(result.percentages(), &[0.0, 0.0]);
    }

    #[test]
    fn column_is_zero_one() {
        let result = classify(&[0.5, 1.5, 0.7], &[0.0, 1.0, 2.0]);
        assert_eq!(result.column(0), vec![1, 0, 1]);
        assert_eq!(result.column(1), vec![0, 1, 0]);
    }
}
