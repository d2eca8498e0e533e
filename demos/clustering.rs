//! K-means on a simple 2D dataset, then classifying new points.

use lloyd::{Clustering, Kmeans};

fn main() {
    // Three well-separated clusters in 2D.
    let data: Vec<Vec<f32>> = vec![
        // Cluster A (near origin)
        vec![0.0, 0.0],
        vec![0.1, 0.2],
        vec![0.2, 0.1],
        vec![-0.1, 0.1],
        // Cluster B (near (5, 5))
        vec![5.0, 5.0],
        vec![5.1, 4.9],
        vec![4.9, 5.1],
        vec![5.2, 5.2],
        // Cluster C (near (10, 0))
        vec![10.0, 0.0],
        vec![10.1, 0.1],
        vec![9.9, -0.1],
        vec![10.2, 0.2],
    ];

    // --- K-means (k=3), labels only ---
    let kmeans = Kmeans::new(3).with_seed(42);
    let labels = kmeans.fit_predict(&data).unwrap();
    println!("=== K-means (k=3) ===");
    for (i, label) in labels.iter().enumerate() {
        println!("  point {:2} ({:5.1}, {:5.1}) => cluster {}", i, data[i][0], data[i][1], label);
    }

    // --- Keeping the model for classification ---
    let mut assignments = vec![0; data.len()];
    let fit = kmeans.fit(&data, &mut assignments).unwrap();
    println!("\n=== Centroids ===");
    for (i, centroid) in fit.centroids().iter().enumerate() {
        println!("  cluster {} => ({:5.2}, {:5.2})", i, centroid[0], centroid[1]);
    }

    let queries = vec![vec![0.3, -0.2], vec![4.8, 5.3], vec![9.7, 0.4]];
    println!("\n=== Nearest centroid for new points ===");
    for query in &queries {
        let nearest = fit.find_centroid(query).unwrap();
        println!(
            "  ({:5.1}, {:5.1}) => ({:5.2}, {:5.2})",
            query[0], query[1], nearest[0], nearest[1]
        );
    }
}
