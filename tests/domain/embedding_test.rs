use docrag::domain::Embedding;

const EPSILON: f32 = 1e-6;

#[test]
fn given_identical_vectors_when_computing_similarity_then_returns_one() {
    let a = Embedding::new(vec![0.3, 0.4, 0.5]);

    assert!((a.cosine_similarity(&a.clone()) - 1.0).abs() < EPSILON);
    assert!(a.cosine_distance(&a.clone()).abs() < EPSILON);
}

#[test]
fn given_orthogonal_vectors_when_computing_distance_then_returns_one() {
    let a = Embedding::new(vec![1.0, 0.0]);
    let b = Embedding::new(vec![0.0, 1.0]);

    assert!(a.cosine_similarity(&b).abs() < EPSILON);
    assert!((a.cosine_distance(&b) - 1.0).abs() < EPSILON);
}

#[test]
fn given_opposite_vectors_when_computing_distance_then_returns_two() {
    let a = Embedding::new(vec![1.0, 2.0]);
    let b = Embedding::new(vec![-1.0, -2.0]);

    assert!((a.cosine_distance(&b) - 2.0).abs() < EPSILON);
}

#[test]
fn given_scaled_vector_when_computing_similarity_then_magnitude_is_ignored() {
    let a = Embedding::new(vec![1.0, 1.0]);
    let b = Embedding::new(vec![10.0, 10.0]);

    assert!((a.cosine_similarity(&b) - 1.0).abs() < EPSILON);
}

#[test]
fn given_mismatched_lengths_when_computing_similarity_then_returns_zero() {
    let a = Embedding::new(vec![1.0, 0.0]);
    let b = Embedding::new(vec![1.0, 0.0, 0.0]);

    assert_eq!(a.cosine_similarity(&b), 0.0);
}

#[test]
fn given_zero_vector_when_computing_similarity_then_returns_zero() {
    let a = Embedding::new(vec![0.0, 0.0]);
    let b = Embedding::new(vec![1.0, 0.0]);

    assert_eq!(a.cosine_similarity(&b), 0.0);
    assert_eq!(b.dimensions(), 2);
}
