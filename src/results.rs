use derive_new::new;

/// Adjusted p-values of one family, in input order
///
/// `valid[i]` is false when `pvalues[i]` could not be read as a p-value;
/// the matching `adjusted[i]` is then NaN.
#[derive(Debug, Clone, new)]
pub struct AdjustedPValues {
    pub pvalues: Vec<f64>,
    pub adjusted: Vec<f64>,
    pub valid: Vec<bool>,
}
impl AdjustedPValues {
    pub fn len(&self) -> usize {
        self.adjusted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjusted.is_empty()
    }

    /// Adjusted p-value at `index`, or `None` if that slot was invalid
    pub fn get(&self, index: usize) -> Option<f64> {
        select_valid(&self.adjusted, &self.valid, index)
    }

    pub fn num_valid(&self) -> usize {
        self.valid.iter().filter(|v| **v).count()
    }

    /// Hypotheses rejected at significance level `alpha`
    pub fn rejected(&self, alpha: f64) -> Vec<bool> {
        rejections(&self.adjusted, &self.valid, alpha)
    }

    pub fn into_adjusted(self) -> Vec<f64> {
        self.adjusted
    }

    pub fn pprint(&self) {
        println!("Index\tPValue\tAdjusted\tValid");
        for i in 0..self.len() {
            println!(
                "{}\t{}\t{}\t{}",
                i, self.pvalues[i], self.adjusted[i], self.valid[i]
            );
        }
    }
}

/// Result of a weighted FDCR adjustment
///
/// Every vector has one more entry than the input family. The last entry is
/// the weighted Simes family statistic with the intersection cost.
#[derive(Debug, Clone, new)]
pub struct FdcrResults {
    pub pvalues: Vec<f64>,
    pub costs: Vec<f64>,
    pub adjusted: Vec<f64>,
    pub valid: Vec<bool>,
}
impl FdcrResults {
    pub fn len(&self) -> usize {
        self.adjusted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjusted.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        select_valid(&self.adjusted, &self.valid, index)
    }

    pub fn num_valid(&self) -> usize {
        self.valid.iter().filter(|v| **v).count()
    }

    /// Adjusted p-values of the input hypotheses, without the family statistic
    pub fn hypotheses(&self) -> &[f64] {
        &self.adjusted[..self.simes_index()]
    }

    /// Unadjusted weighted Simes statistic, `None` when it is undefined
    pub fn simes(&self) -> Option<f64> {
        select_valid(&self.pvalues, &self.valid, self.simes_index())
    }

    /// Adjusted p-value of the family (intersection) hypothesis
    pub fn adjusted_simes(&self) -> Option<f64> {
        self.get(self.simes_index())
    }

    pub fn rejected(&self, alpha: f64) -> Vec<bool> {
        rejections(&self.adjusted, &self.valid, alpha)
    }

    pub fn into_adjusted(self) -> Vec<f64> {
        self.adjusted
    }

    pub fn pprint(&self) {
        println!("Index\tPValue\tCost\tAdjusted\tValid");
        for i in 0..self.len() {
            let index = if i == self.simes_index() {
                "simes".to_string()
            } else {
                i.to_string()
            };
            println!(
                "{}\t{}\t{}\t{}\t{}",
                index, self.pvalues[i], self.costs[i], self.adjusted[i], self.valid[i]
            );
        }
    }

    fn simes_index(&self) -> usize {
        self.adjusted.len().saturating_sub(1)
    }
}

fn select_valid(values: &[f64], valid: &[bool], index: usize) -> Option<f64> {
    match valid.get(index) {
        Some(true) => values.get(index).copied(),
        _ => None,
    }
}

fn rejections(adjusted: &[f64], valid: &[bool], alpha: f64) -> Vec<bool> {
    adjusted
        .iter()
        .zip(valid.iter())
        .map(|(a, v)| *v && *a <= alpha)
        .collect()
}
