//! Generic k-means clustering primitives.
//!
//! `lloyd` is a small library implementing k-means clustering (Lloyd's
//! algorithm) over any element type that provides a zero value, addition,
//! division by a count, and a squared-distance function.
//!
//! The primary public API is under [`cluster`], which provides:
//! - [`cluster::Kmeans`]: the clustering configuration (random seeding, Lloyd iterations)
//! - [`cluster::KmeansFit`]: the fitted model, exposing centroids and nearest-centroid lookup
//! - [`cluster::Element`]: the capability trait clusterable types implement

#![forbid(unsafe_code)]

pub mod cluster;
pub mod error;

pub use cluster::{Clustering, Element, Kmeans, KmeansFit};
pub use error::{Error, Result};
