// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Vector math property tests: symmetry, edge-case fallbacks, dimension
//! checks, and top-K ranking behavior.

use embed_node::vector::{
    cosine_similarity, euclidean_distance, find_similar, normalize_vector, VectorError,
};

#[test]
fn test_cosine_symmetry() {
    let a = vec![0.3, -1.2, 4.5, 0.0];
    let b = vec![2.0, 0.7, -0.5, 3.3];

    let ab = cosine_similarity(&a, &b).unwrap();
    let ba = cosine_similarity(&b, &a).unwrap();
    assert_eq!(ab, ba);
}

#[test]
fn test_cosine_self_similarity_is_one() {
    let v = vec![0.1, 2.5, -3.0, 7.7];
    let similarity = cosine_similarity(&v, &v).unwrap();
    assert!((similarity - 1.0).abs() < 1e-6);
}

#[test]
fn test_cosine_zero_vector_returns_zero() {
    let zero = vec![0.0; 4];
    let v = vec![1.0, 2.0, 3.0, 4.0];

    assert_eq!(cosine_similarity(&zero, &v).unwrap(), 0.0);
    assert_eq!(cosine_similarity(&v, &zero).unwrap(), 0.0);
    assert_eq!(cosine_similarity(&zero, &zero).unwrap(), 0.0);
}

#[test]
fn test_cosine_orthogonal_and_parallel() {
    assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).unwrap(), 0.0);
    assert_eq!(cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]).unwrap(), 1.0);
}

#[test]
fn test_dimension_mismatch_is_an_error() {
    let a = vec![1.0, 2.0];
    let b = vec![1.0, 2.0, 3.0];

    assert_eq!(
        cosine_similarity(&a, &b),
        Err(VectorError::DimensionMismatch { left: 2, right: 3 })
    );
    assert_eq!(
        euclidean_distance(&a, &b),
        Err(VectorError::DimensionMismatch { left: 2, right: 3 })
    );
}

#[test]
fn test_euclidean_identity_and_symmetry() {
    let a = vec![1.5, -2.0, 0.25];
    let b = vec![-0.5, 4.0, 2.25];

    assert_eq!(euclidean_distance(&a, &a).unwrap(), 0.0);
    assert_eq!(
        euclidean_distance(&a, &b).unwrap(),
        euclidean_distance(&b, &a).unwrap()
    );
    assert!(euclidean_distance(&a, &b).unwrap() >= 0.0);
}

#[test]
fn test_euclidean_three_four_five_triangle() {
    assert_eq!(euclidean_distance(&[0.0, 0.0], &[3.0, 4.0]).unwrap(), 5.0);
}

#[test]
fn test_normalize_produces_unit_norm() {
    let v = vec![3.0, -4.0, 12.0];
    let normalized = normalize_vector(&v);

    let norm = normalized.iter().map(|x| x * x).sum::<f32>().sqrt();
    assert!((norm - 1.0).abs() < 1e-6);
}

#[test]
fn test_normalize_zero_vector_unchanged() {
    let zero = vec![0.0; 5];
    assert_eq!(normalize_vector(&zero), zero);
}

#[test]
fn test_normalize_does_not_mutate_input() {
    let v = vec![3.0, 4.0];
    let _ = normalize_vector(&v);
    assert_eq!(v, vec![3.0, 4.0]);
}

#[test]
fn test_find_similar_result_length_is_clamped() {
    let candidates = vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![0.5, 0.5]];

    assert_eq!(find_similar(&[1.0, 0.0], &candidates, 2).unwrap().len(), 2);
    assert_eq!(find_similar(&[1.0, 0.0], &candidates, 10).unwrap().len(), 3);
    assert!(find_similar(&[1.0, 0.0], &candidates, 0).unwrap().is_empty());
}

#[test]
fn test_find_similar_sorted_descending() {
    let candidates = vec![
        vec![0.0, 1.0],
        vec![1.0, 0.0],
        vec![0.7, 0.7],
        vec![-1.0, 0.0],
    ];
    let results = find_similar(&[1.0, 0.0], &candidates, 4).unwrap();

    for pair in results.windows(2) {
        assert!(pair[0].similarity >= pair[1].similarity);
    }
    assert_eq!(results[0].index, 1);
    assert_eq!(results[3].index, 3);
}

#[test]
fn test_find_similar_concrete_scenario() {
    let candidates = vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![0.9, 0.1]];
    let results = find_similar(&[1.0, 0.0], &candidates, 2).unwrap();

    let indices: Vec<usize> = results.iter().map(|r| r.index).collect();
    assert_eq!(indices, vec![0, 2]);
}

#[test]
fn test_find_similar_ties_keep_input_order() {
    // Two identical candidates tie exactly; stable sort keeps index order
    let candidates = vec![vec![0.5, 0.5], vec![1.0, 0.0], vec![0.5, 0.5]];
    let results = find_similar(&[0.5, 0.5], &candidates, 3).unwrap();

    assert_eq!(results[0].index, 0);
    assert_eq!(results[1].index, 2);
    assert_eq!(results[2].index, 1);
}

#[test]
fn test_find_similar_candidate_mismatch_fails_whole_call() {
    let candidates = vec![vec![1.0, 0.0], vec![1.0, 0.0, 0.0]];
    let result = find_similar(&[1.0, 0.0], &candidates, 5);

    assert_eq!(
        result,
        Err(VectorError::DimensionMismatch { left: 2, right: 3 })
    );
}
