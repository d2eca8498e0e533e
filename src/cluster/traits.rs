use crate::error::Result;

/// Capability set for clusterable values.
///
/// K-means only needs four operations from its element type: a zero value,
/// addition, division by a positive count (to average a group), and a squared
/// distance. Anything providing these can be clustered, whether it is a
/// scalar, a dense vector, or a richer feature record.
///
/// # Contract
///
/// - [`zero`](Element::zero) is the identity of [`add`](Element::add), and it
///   must also behave as the origin under
///   [`squared_distance`](Element::squared_distance): an empty cluster's
///   centroid becomes the zero value, and subsequent assignment passes measure
///   distances to it.
/// - `add` is associative; group sums are folded in input order.
/// - `squared_distance` is non-negative and zero for identical values.
pub trait Element: Clone {
    /// The additive identity.
    fn zero() -> Self;

    /// Sum of `self` and `other`.
    fn add(&self, other: &Self) -> Self;

    /// `self` divided by a positive count.
    fn div(&self, count: usize) -> Self;

    /// Squared distance to `other`.
    fn squared_distance(&self, other: &Self) -> f32;
}

impl Element for f32 {
    fn zero() -> Self {
        0.0
    }

    fn add(&self, other: &Self) -> Self {
        self + other
    }

    fn div(&self, count: usize) -> Self {
        self / count as f32
    }

    fn squared_distance(&self, other: &Self) -> f32 {
        let d = self - other;
        d * d
    }
}

/// Dense feature vectors.
///
/// The zero value is the empty vector. To keep it usable as an additive
/// identity and as the origin, `add` and `squared_distance` treat coordinates
/// past either operand's length as `0.0`. Vectors of equal dimensionality
/// behave exactly as elementwise sum and squared Euclidean distance.
impl Element for Vec<f32> {
    fn zero() -> Self {
        Vec::new()
    }

    fn add(&self, other: &Self) -> Self {
        let n = self.len().max(other.len());
        (0..n)
            .map(|i| {
                self.get(i).copied().unwrap_or(0.0) + other.get(i).copied().unwrap_or(0.0)
            })
            .collect()
    }

    fn div(&self, count: usize) -> Self {
        self.iter().map(|x| x / count as f32).collect()
    }

    fn squared_distance(&self, other: &Self) -> f32 {
        let n = self.len().max(other.len());
        (0..n)
            .map(|i| {
                let d = self.get(i).copied().unwrap_or(0.0)
                    - other.get(i).copied().unwrap_or(0.0);
                d * d
            })
            .sum()
    }
}

/// Common interface for hard clustering algorithms (one label per point).
pub trait Clustering {
    /// Fit the model (if needed) and return one cluster label per input point.
    fn fit_predict(&self, data: &[Vec<f32>]) -> Result<Vec<usize>>;

    /// The configured number of clusters (if applicable).
    fn n_clusters(&self) -> usize;
}
