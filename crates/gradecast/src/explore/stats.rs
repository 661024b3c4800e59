//! Small descriptive statistics helpers.

/// Count, mean, sample standard deviation and range of one column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnSummary {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (`n - 1`); `0.0` for a single value.
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

impl ColumnSummary {
    /// Summarise `values`. All fields are NaN for an empty slice.
    pub fn of(values: &[f64]) -> Self {
        let count = values.len();
        if count == 0 {
            return Self {
                count,
                mean: f64::NAN,
                std: f64::NAN,
                min: f64::NAN,
                max: f64::NAN,
            };
        }
        let n = count as f64;
        let mean = values.iter().sum::<f64>() / n;
        let std = if count > 1 {
            (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0)).sqrt()
        } else {
            0.0
        };
        Self {
            count,
            mean,
            std,
            min: values.iter().copied().fold(f64::INFINITY, f64::min),
            max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        }
    }
}

/// Pearson correlation coefficient.
///
/// `None` if the slices differ in length, hold fewer than two values, or
/// either has zero variance.
pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }
    let n = x.len() as f64;
    let mx = x.iter().sum::<f64>() / n;
    let my = y.iter().sum::<f64>() / n;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (&a, &b) in x.iter().zip(y) {
        let (dx, dy) = (a - mx, b - my);
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx == 0.0 || syy == 0.0 {
        return None;
    }
    Some((sxy / (sxx.sqrt() * syy.sqrt())).clamp(-1.0, 1.0))
}

/// Bin count from Sturges' rule: `ceil(log2(n)) + 1`.
pub fn sturges_bins(n: usize) -> usize {
    if n <= 1 {
        return 1;
    }
    (n as f64).log2().ceil() as usize + 1
}

/// Equal-width histogram.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    edges: Vec<f64>,
    counts: Vec<usize>,
}

impl Histogram {
    pub(crate) fn empty() -> Self {
        Self {
            edges: vec![0.0],
            counts: Vec::new(),
        }
    }

    /// Bin `values` into `bins` equal-width bins spanning their range.
    ///
    /// The last bin is closed on the right. A constant column is spread over
    /// `[v - 0.5, v + 0.5]`. NaN and infinite values are skipped. Returns
    /// `None` for zero bins or no finite values.
    pub fn equal_width(values: &[f64], bins: usize) -> Option<Self> {
        let finite = || values.iter().copied().filter(|v| v.is_finite());
        if bins == 0 || finite().next().is_none() {
            return None;
        }
        let mut lo = finite().fold(f64::INFINITY, f64::min);
        let mut hi = finite().fold(f64::NEG_INFINITY, f64::max);
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }
        let width = (hi - lo) / bins as f64;

        let mut edges: Vec<f64> = (0..bins).map(|i| lo + width * i as f64).collect();
        edges.push(hi);

        let mut counts = vec![0; bins];
        for v in finite() {
            let idx = (((v - lo) / width) as usize).min(bins - 1);
            counts[idx] += 1;
        }
        Some(Self { edges, counts })
    }

    /// Bin boundaries (`counts().len() + 1` entries).
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// `(lower, upper, count)` per bin.
    pub fn bins(&self) -> impl Iterator<Item = (f64, f64, usize)> + '_ {
        self.edges
            .windows(2)
            .zip(&self.counts)
            .map(|(w, &c)| (w[0], w[1], c))
    }
}
