//! K-means clustering for grouping similar items.
//!
//! This module implements the classic k-means algorithm over any type
//! implementing the [`Element`] capability trait.
//!
//! ## K-means
//!
//! The classic algorithm: assign each item to the nearest centroid, then
//! update centroids to the mean of their items. Repeat.
//!
//! **Objective**: Minimize within-cluster sum of squares:
//!
//! ```text
//! J = Σ_k Σ_{x ∈ C_k} ||x - μ_k||²
//! ```
//!
//! **Assumptions**:
//! - Clusters are roughly spherical
//! - Clusters have similar sizes
//! - You know k in advance
//!
//! **When to use**: Fast initial exploration, or when you need hard assignments
//! and can accept the spherical assumption.
//!
//! ## Generic elements
//!
//! Unlike a fixed `Vec<f32>` API, the algorithm here is generic over
//! [`Element`]: anything with a zero value, addition, division by a count,
//! and a squared-distance function can be clustered. Implementations for
//! `f32` and `Vec<f32>` are provided.
//!
//! ## Usage
//!
//! ```rust
//! use lloyd::cluster::{Clustering, Kmeans};
//!
//! let data = vec![
//!     vec![0.0, 0.0],
//!     vec![0.1, 0.1],
//!     vec![10.0, 10.0],
//!     vec![10.1, 10.1],
//! ];
//!
//! // Hard clustering with K-means
//! let labels = Kmeans::new(2).with_seed(42).fit_predict(&data).unwrap();
//! assert_eq!(labels[0], labels[1]);  // First two together
//! assert_ne!(labels[0], labels[2]);  // Separate from last two
//!
//! // Keeping the fitted model around for classifying new points
//! let mut assignments = vec![0; data.len()];
//! let model = Kmeans::new(2).with_seed(42).fit(&data, &mut assignments).unwrap();
//! let nearest = model.find_centroid(&vec![9.8, 10.3]).unwrap();
//! assert!(nearest[0] > 5.0);
//! ```

mod kmeans;
mod traits;

pub use kmeans::{Kmeans, KmeansFit};
pub use traits::{Clustering, Element};
