//! Cosine similarity for the two vector shapes the engine scores with.

use super::matrix::SparseVector;

/// Cosine similarity between two users' interaction vectors
///
/// The dot product only runs over items both users touched, while each magnitude
/// covers the user's whole vector. Users with no shared item score 0.
pub fn sparse_cosine(a: &SparseVector, b: &SparseVector) -> f64 {
    let (smaller, larger) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    let mut shared = 0usize;
    let mut dot = 0.0;
    for (item_id, weight) in smaller.iter() {
        if larger.contains(item_id) {
            shared += 1;
            dot += weight * larger.get(item_id);
        }
    }

    if shared == 0 {
        return 0.0;
    }

    let magnitude_a = a.magnitude();
    let magnitude_b = b.magnitude();
    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        return 0.0;
    }

    dot / (magnitude_a * magnitude_b)
}

/// Standard cosine similarity between two dense vectors of equal length
pub fn dense_cosine(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());

    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}
