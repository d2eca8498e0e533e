//! K-means: Lloyd's iterative assign-then-average clustering.
//!
//! # The Algorithm (Lloyd, 1982)
//!
//! K-means partitions n elements into k clusters by alternating two steps
//! until the centroids stop moving or an iteration cap is reached:
//!
//! 1. **Assign**: each element joins the cluster of its nearest centroid
//!    (squared distance, ties to the lowest centroid index).
//! 2. **Update**: each centroid moves to the mean of its members. A cluster
//!    that received no members collapses to the element type's zero value and
//!    is kept, not re-seeded.
//!
//! Centroids are seeded by sampling k elements uniformly at random, with
//! replacement, from the input. This is the only source of non-determinism;
//! pass a seed via [`Kmeans::with_seed`] for reproducible runs.
//!
//! ## Convergence
//!
//! After every update the total movement is computed as the sum over all k
//! centroids of the squared distance between the old and new position, paired
//! by index. When a converge distance is configured and the movement drops to
//! or below its square, fitting stops early.
//!
//! ## Complexity
//!
//! - **Time**: O(iterations · n · k) distance evaluations.
//! - **Space**: O(k) beyond the caller's assignment buffer.
//!
//! ## Limitations
//!
//! - Sensitive to the random seeding; poor seeds can yield empty clusters.
//! - Assumes roughly spherical clusters of similar size.
//!
//! ## References
//!
//! Lloyd (1982). "Least Squares Quantization in PCM." IEEE Trans. Inf. Theory.
//! MacQueen (1967). "Some Methods for Classification and Analysis of
//! Multivariate Observations." Berkeley Symp. on Math. Statist. and Prob.

use super::traits::{Clustering, Element};
use crate::error::{Error, Result};
use rand::prelude::*;

/// K-means clustering configuration.
///
/// Fitting consumes nothing: [`Kmeans::fit`] borrows the input elements and a
/// caller-owned assignment buffer, and returns a [`KmeansFit`] holding the
/// learned centroids.
#[derive(Debug, Clone)]
pub struct Kmeans {
    /// Number of clusters (k). Must be greater than 1.
    n_clusters: usize,
    /// Upper bound on refinement passes.
    max_iter: usize,
    /// Optional early-stop threshold on total centroid movement.
    converge_distance: Option<f32>,
    /// Optional RNG seed for reproducible seeding.
    seed: Option<u64>,
}

impl Kmeans {
    /// Default cap on refinement passes.
    pub const DEFAULT_MAX_ITER: usize = 300;

    /// Create a new k-means configuration with `n_clusters` clusters.
    ///
    /// `n_clusters` must be greater than 1; this is checked at fit time.
    pub fn new(n_clusters: usize) -> Self {
        Self {
            n_clusters,
            max_iter: Self::DEFAULT_MAX_ITER,
            converge_distance: None,
            seed: None,
        }
    }

    /// Set the maximum number of refinement passes.
    ///
    /// Zero is allowed: the fit then returns the randomly seeded centroids
    /// unrefined, with assignments computed against them.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Stop early once total centroid movement in a pass is at most
    /// `converge_distance` squared.
    pub fn with_converge_distance(mut self, converge_distance: f32) -> Self {
        self.converge_distance = Some(converge_distance);
        self
    }

    /// Set the RNG seed used for centroid seeding.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Run the full fit and return the learned model.
    ///
    /// `assignments` must have the same length as `elements`; it is filled in
    /// place so that `assignments[i]` is the cluster index of `elements[i]`,
    /// always in `[0, n_clusters)`. The buffer is kept consistent with the
    /// returned centroids: a final assignment pass runs against the centroids
    /// as returned, even when convergence stopped the loop right after an
    /// update.
    ///
    /// Empty input is not an error: the returned model has no centroids and
    /// the (necessarily empty) buffer is untouched.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidParameter`] if `n_clusters <= 1`.
    /// - [`Error::AssignmentLengthMismatch`] if the buffer length differs
    ///   from the input length.
    pub fn fit<T: Element>(
        &self,
        elements: &[T],
        assignments: &mut [usize],
    ) -> Result<KmeansFit<T>> {
        if self.n_clusters <= 1 {
            return Err(Error::InvalidParameter {
                name: "n_clusters",
                message: "k-means requires k > 1",
            });
        }

        if assignments.len() != elements.len() {
            return Err(Error::AssignmentLengthMismatch {
                expected: elements.len(),
                found: assignments.len(),
            });
        }

        if elements.is_empty() {
            return Ok(KmeansFit {
                centroids: Vec::new(),
            });
        }

        let k = self.n_clusters;
        let converge_sq = self.converge_distance.map(|d| d * d);

        let mut rng: Box<dyn RngCore> = match self.seed {
            Some(s) => Box::new(StdRng::seed_from_u64(s)),
            None => Box::new(rand::rng()),
        };

        // Seed centroids: k independent draws with replacement over the whole
        // input, last element included.
        let mut centroids: Vec<T> = (0..k)
            .map(|_| elements[rng.random_range(0..elements.len())].clone())
            .collect();

        for _ in 0..self.max_iter {
            // Assignment pass. Membership is accumulated as a running sum and
            // count per cluster; addition is associative, so this equals
            // summing each group after the fact.
            let mut sums: Vec<T> = vec![T::zero(); k];
            let mut counts: Vec<usize> = vec![0; k];

            for (slot, element) in assignments.iter_mut().zip(elements) {
                let index = nearest_index(element, &centroids);
                *slot = index;
                sums[index] = sums[index].add(element);
                counts[index] += 1;
            }

            // Update pass: average each cluster; empty clusters collapse to
            // the zero value.
            let new_centroids: Vec<T> = sums
                .into_iter()
                .zip(counts)
                .map(|(sum, count)| if count > 0 { sum.div(count) } else { T::zero() })
                .collect();

            // Movement is paired by index, not by nearest match.
            let moved: f32 = centroids
                .iter()
                .zip(&new_centroids)
                .map(|(old, new)| old.squared_distance(new))
                .sum();

            centroids = new_centroids;

            if let Some(limit) = converge_sq {
                if moved <= limit {
                    break;
                }
            }
        }

        // Sync the buffer with the centroids actually returned.
        for (slot, element) in assignments.iter_mut().zip(elements) {
            *slot = nearest_index(element, &centroids);
        }

        Ok(KmeansFit { centroids })
    }
}

impl Clustering for Kmeans {
    fn fit_predict(&self, data: &[Vec<f32>]) -> Result<Vec<usize>> {
        let mut assignments = vec![0; data.len()];
        self.fit(data, &mut assignments)?;
        Ok(assignments)
    }

    fn n_clusters(&self) -> usize {
        self.n_clusters
    }
}

/// A fitted k-means model.
///
/// Only produced by [`Kmeans::fit`], so holding a value of this type is proof
/// that fitting completed. The centroids never change after the fit.
#[derive(Debug, Clone)]
pub struct KmeansFit<T> {
    centroids: Vec<T>,
}

impl<T: Element> KmeansFit<T> {
    /// The learned centroids, in cluster-index order.
    ///
    /// Exactly `n_clusters` long, except after fitting empty input, where it
    /// is empty.
    pub fn centroids(&self) -> &[T] {
        &self.centroids
    }

    /// The centroid nearest to `element` under squared distance.
    ///
    /// Ties resolve to the lowest cluster index, matching the assignment
    /// step. Returns `None` only when the model was fitted on empty input.
    pub fn find_centroid(&self, element: &T) -> Option<&T> {
        if self.centroids.is_empty() {
            return None;
        }
        Some(&self.centroids[nearest_index(element, &self.centroids)])
    }

    /// Index of the centroid nearest to `element`, with the same tie-break
    /// rule as [`find_centroid`](KmeansFit::find_centroid).
    ///
    /// Returns `None` only when the model was fitted on empty input.
    pub fn nearest_index(&self, element: &T) -> Option<usize> {
        if self.centroids.is_empty() {
            return None;
        }
        Some(nearest_index(element, &self.centroids))
    }
}

/// Linear scan for the nearest centroid.
///
/// Starts from the largest finite distance so the first centroid always
/// replaces it; strict comparison keeps ties on the lowest index.
fn nearest_index<T: Element>(element: &T, centroids: &[T]) -> usize {
    let mut nearest_distance = f32::MAX;
    let mut min_index = 0;

    for (index, centroid) in centroids.iter().enumerate() {
        let distance = element.squared_distance(centroid);
        if distance < nearest_distance {
            min_index = index;
            nearest_distance = distance;
        }
    }

    min_index
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;

    fn one_dimensional() -> Vec<f32> {
        vec![0.0, 0.0, 0.0, 10.0, 10.0, 11.0]
    }

    #[test]
    fn test_kmeans_two_clusters_2d() {
        let data = vec![
            vec![0.0, 0.0],
            vec![0.1, 0.0],
            vec![0.0, 0.1],
            vec![10.0, 10.0],
            vec![10.1, 10.0],
            vec![10.0, 10.1],
        ];

        let labels = Kmeans::new(2).with_seed(42).fit_predict(&data).unwrap();

        assert_eq!(labels.len(), 6);
        assert_eq!(labels[0], labels[1]);
        assert_eq!(labels[1], labels[2]);
        assert_eq!(labels[3], labels[4]);
        assert_eq!(labels[4], labels[5]);
        assert_ne!(labels[0], labels[3]);
    }

    #[test]
    fn test_kmeans_centroid_count() {
        let data: Vec<Vec<f32>> = (0..20).map(|i| vec![i as f32, 0.0]).collect();
        let mut assignments = vec![0; data.len()];

        for k in 2..6 {
            let fit = Kmeans::new(k)
                .with_seed(7)
                .fit(&data, &mut assignments)
                .unwrap();
            assert_eq!(fit.centroids().len(), k);
            for &label in &assignments {
                assert!(label < k);
            }
        }
    }

    #[test]
    fn test_kmeans_empty_input() {
        let data: Vec<Vec<f32>> = vec![];
        let mut assignments: Vec<usize> = vec![];

        let fit = Kmeans::new(3).fit(&data, &mut assignments).unwrap();
        assert!(fit.centroids().is_empty());
        assert!(fit.find_centroid(&vec![1.0, 2.0]).is_none());

        let labels = Kmeans::new(3).fit_predict(&data).unwrap();
        assert!(labels.is_empty());
    }

    #[test]
    fn test_kmeans_invalid_k() {
        let data = vec![vec![0.0], vec![1.0]];
        let mut assignments = vec![0; 2];

        for k in [0, 1] {
            let err = Kmeans::new(k).fit(&data, &mut assignments).unwrap_err();
            assert!(matches!(err, Error::InvalidParameter { .. }));
        }
    }

    #[test]
    fn test_kmeans_buffer_length_mismatch() {
        let data = vec![vec![0.0], vec![1.0], vec![2.0]];
        let mut assignments = vec![0; 2];

        let err = Kmeans::new(2).fit(&data, &mut assignments).unwrap_err();
        assert!(matches!(
            err,
            Error::AssignmentLengthMismatch {
                expected: 3,
                found: 2
            }
        ));
    }

    #[test]
    fn test_kmeans_max_iter_zero_keeps_initial_sample() {
        let data: Vec<f32> = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let mut assignments = vec![0; data.len()];

        let fit = Kmeans::new(3)
            .with_seed(99)
            .with_max_iter(0)
            .fit(&data, &mut assignments)
            .unwrap();

        // Replay the seeding draws: the unrefined centroids must match them.
        let mut rng = StdRng::seed_from_u64(99);
        let expected: Vec<f32> = (0..3)
            .map(|_| data[rng.random_range(0..data.len())])
            .collect();
        assert_eq!(fit.centroids(), expected.as_slice());

        // The buffer is still consistent with the returned centroids.
        for (element, &label) in data.iter().zip(&assignments) {
            assert_eq!(label, fit.nearest_index(element).unwrap());
        }
    }

    #[test]
    fn test_kmeans_deterministic_with_seed() {
        let data: Vec<Vec<f32>> = (0..30)
            .map(|i| vec![(i % 7) as f32, (i % 3) as f32])
            .collect();

        let model = Kmeans::new(3).with_seed(1234);
        let mut a1 = vec![0; data.len()];
        let mut a2 = vec![0; data.len()];
        let fit1 = model.fit(&data, &mut a1).unwrap();
        let fit2 = model.fit(&data, &mut a2).unwrap();

        assert_eq!(fit1.centroids(), fit2.centroids());
        assert_eq!(a1, a2);
    }

    #[test]
    fn test_kmeans_one_dimensional_split() {
        let data = one_dimensional();

        // The split is stable across seeds given enough iterations.
        for seed in [0u64, 1, 2, 42, 1000] {
            let mut assignments = vec![0; data.len()];
            let fit = Kmeans::new(2)
                .with_seed(seed)
                .with_max_iter(50)
                .fit(&data, &mut assignments)
                .unwrap();

            let mut centroids = fit.centroids().to_vec();
            centroids.sort_by(|a, b| a.partial_cmp(b).unwrap());
            assert!((centroids[0] - 0.0).abs() < 1e-4, "seed {seed}");
            assert!((centroids[1] - 31.0 / 3.0).abs() < 1e-4, "seed {seed}");

            assert_eq!(assignments[0], assignments[1]);
            assert_eq!(assignments[1], assignments[2]);
            assert_eq!(assignments[3], assignments[4]);
            assert_eq!(assignments[4], assignments[5]);
            assert_ne!(assignments[0], assignments[3]);
        }
    }

    #[test]
    fn test_kmeans_repeated_element_leaves_empty_cluster_at_zero() {
        let data: Vec<f32> = vec![7.5; 10];
        let mut assignments = vec![0; data.len()];

        let fit = Kmeans::new(2)
            .with_seed(5)
            .with_max_iter(10)
            .fit(&data, &mut assignments)
            .unwrap();

        // Every element ties between the two identical seeds and goes to
        // cluster 0; cluster 1 empties out and collapses to zero.
        assert_eq!(fit.centroids(), &[7.5, 0.0]);
        assert!(assignments.iter().all(|&l| l == 0));
    }

    #[test]
    fn test_kmeans_converge_distance_zero() {
        let data = one_dimensional();
        let mut assignments = vec![0; data.len()];

        // Stable singleton clusters stop the loop long before the cap; the
        // result matches the uncapped run exactly.
        let fit = Kmeans::new(2)
            .with_seed(42)
            .with_converge_distance(0.0)
            .with_max_iter(usize::MAX)
            .fit(&data, &mut assignments)
            .unwrap();

        let mut centroids = fit.centroids().to_vec();
        centroids.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert!((centroids[0] - 0.0).abs() < 1e-4);
        assert!((centroids[1] - 31.0 / 3.0).abs() < 1e-4);
    }

    #[test]
    fn test_find_centroid_nearest_and_tie_break() {
        let fit = KmeansFit {
            centroids: vec![vec![0.0, 0.0], vec![10.0, 0.0], vec![10.0, 0.0]],
        };

        assert_eq!(fit.find_centroid(&vec![1.0, 1.0]).unwrap(), &vec![0.0, 0.0]);
        // Equidistant from centroids 1 and 2: lowest index wins.
        assert_eq!(fit.nearest_index(&vec![9.0, 0.0]).unwrap(), 1);
        // Exactly between centroids 0 and 1: lowest index wins.
        assert_eq!(fit.nearest_index(&vec![5.0, 0.0]).unwrap(), 0);
    }

    #[test]
    fn test_kmeans_generic_over_scalars() {
        let data: Vec<f32> = vec![-5.0, -5.1, -4.9, 5.0, 5.1, 4.9];
        let mut assignments = vec![0; data.len()];

        let fit = Kmeans::new(2)
            .with_seed(3)
            .with_max_iter(50)
            .fit(&data, &mut assignments)
            .unwrap();

        let mut centroids = fit.centroids().to_vec();
        centroids.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert!((centroids[0] + 5.0).abs() < 0.2);
        assert!((centroids[1] - 5.0).abs() < 0.2);

        assert_eq!(fit.find_centroid(&-4.0).copied(), Some(centroids[0]));
    }
}
