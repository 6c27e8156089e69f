//! Tests for batch k-nearest-neighbor queries.

mod common;

use ball_tree::{metric, BallTree, Euclidean, Hamming, Manhattan, RowMajor};
use common::{data_gen, search};
use test_case::test_case;

/// Sorted copies of one result row.
fn sorted_row(hits: &ball_tree::Neighbors, q: usize) -> (Vec<usize>, Vec<f64>) {
    let (indices, distances) = hits.row(q);
    let (mut indices, mut distances) = (indices.to_vec(), distances.to_vec());
    indices.sort_unstable();
    distances.sort_by(f64::total_cmp);
    (indices, distances)
}

#[test]
fn three_nearest_of_a_corner() {
    let tree = BallTree::build(data_gen::gen_tiny_data(), Euclidean, 2, Some(42)).unwrap();
    let queries = RowMajor::from_rows(vec![vec![0.0, 0.0]]).unwrap();

    let hits = tree.query(&queries, 3).unwrap();
    let (indices, distances) = sorted_row(&hits, 0);
    assert_eq!(indices, vec![0, 1, 2]);
    assert_eq!(distances, vec![0.0, 1.0, 1.0]);
}

#[test]
fn manhattan_ties_at_the_center() {
    let tree = BallTree::build(data_gen::gen_tiny_data(), Manhattan, 2, Some(42)).unwrap();
    let queries = RowMajor::from_rows(vec![vec![0.5, 0.5]]).unwrap();

    let hits = tree.query(&queries, 4).unwrap();
    let (indices, distances) = sorted_row(&hits, 0);
    assert_eq!(indices, vec![0, 1, 2, 3]);
    assert_eq!(distances, vec![1.0, 1.0, 1.0, 1.0]);
}

#[test]
fn three_nearest_on_a_line() {
    let tree = BallTree::build(data_gen::gen_line_data(8), Euclidean, 2, Some(42)).unwrap();
    let queries = RowMajor::from_rows(vec![vec![3.2]]).unwrap();

    let hits = tree.query(&queries, 3).unwrap();
    let (indices, _) = sorted_row(&hits, 0);
    assert_eq!(indices, vec![2, 3, 4]);
}

#[test]
fn hamming_prefixes() {
    let data = RowMajor::from_rows(vec![
        vec![0.0, 0.0, 0.0],
        vec![1.0, 0.0, 0.0],
        vec![1.0, 1.0, 0.0],
        vec![1.0, 1.0, 1.0],
    ])
    .unwrap();
    let tree = BallTree::build(data, Hamming, 2, Some(42)).unwrap();
    let queries = RowMajor::from_rows(vec![vec![0.0, 0.0, 0.0]]).unwrap();

    let hits = tree.query(&queries, 2).unwrap();
    let (indices, distances) = sorted_row(&hits, 0);
    assert_eq!(indices, vec![0, 1]);
    assert_eq!(distances, vec![0.0, 1.0]);
}

#[test_case("euclidean")]
#[test_case("manhattan")]
#[test_case("hamming")]
fn k_equals_cardinality(name: &str) {
    let data = data_gen::gen_tiny_data();
    let n = data.cardinality();
    let tree = BallTree::build(data, metric::from_name(name), 2, Some(42)).unwrap();
    let queries = RowMajor::from_rows(vec![vec![0.3, -0.7], vec![5.0, 5.0]]).unwrap();

    let hits = tree.query(&queries, n).unwrap();
    for q in 0..queries.cardinality() {
        let (indices, _) = sorted_row(&hits, q);
        assert_eq!(indices, (0..n).collect::<Vec<_>>());
    }
    search::check_knn(&tree, &queries, n);
}

#[test_case("euclidean")]
#[test_case("manhattan")]
#[test_case("hamming")]
fn matches_the_linear_scan(name: &str) {
    let (data, queries) = if name == "hamming" {
        (
            data_gen::gen_categorical_data(300, 8, 7),
            data_gen::gen_categorical_data(20, 8, 11),
        )
    } else {
        (
            data_gen::gen_random_data(300, 8, 7),
            data_gen::gen_random_data(20, 8, 11),
        )
    };
    let tree = BallTree::build(data, metric::from_name(name), 10, Some(42)).unwrap();

    for k in [1, 4, 17, 300] {
        search::check_knn(&tree, &queries, k);
    }
}

#[test]
fn each_point_finds_itself() {
    let data = data_gen::gen_random_data(200, 6, 13);
    let queries = data.clone();
    let tree = BallTree::build(data, Euclidean, 8, Some(42)).unwrap();

    let hits = tree.query(&queries, 1).unwrap();
    for q in 0..queries.cardinality() {
        let (indices, distances) = hits.row(q);
        assert_eq!(indices[0], q);
        assert!(distances[0].abs() < f64::EPSILON);
    }
}

#[test]
fn rows_come_back_heap_ordered() {
    let data = data_gen::gen_random_data(150, 5, 17);
    let queries = data_gen::gen_random_data(25, 5, 19);
    let tree = BallTree::build(data, Euclidean, 6, Some(42)).unwrap();

    let hits = tree.query(&queries, 9).unwrap();
    for q in 0..queries.cardinality() {
        let (_, distances) = hits.row(q);
        assert!(distances.iter().all(|&d| d <= distances[0]));
    }
}

#[test]
fn growing_k_keeps_the_closer_hits() {
    let data = data_gen::gen_random_data(120, 4, 23);
    let queries = data_gen::gen_random_data(10, 4, 29);
    let tree = BallTree::build(data, Euclidean, 5, Some(42)).unwrap();

    let small = tree.query(&queries, 3).unwrap();
    let large = tree.query(&queries, 11).unwrap();
    for q in 0..queries.cardinality() {
        let (_, small_distances) = sorted_row(&small, q);
        let (_, large_distances) = sorted_row(&large, q);
        for (s, l) in small_distances.iter().zip(large_distances.iter()) {
            assert!((s - l).abs() <= 1e-12);
        }
    }
}

#[test]
fn parallel_matches_serial() {
    let data = data_gen::gen_random_data(250, 7, 31);
    let queries = data_gen::gen_random_data(40, 7, 37);
    let tree = BallTree::build(data, Euclidean, 8, Some(42)).unwrap();

    let serial = tree.query(&queries, 6).unwrap();
    let parallel = tree.par_query(&queries, 6).unwrap();
    assert_eq!(serial.indices(), parallel.indices());
    assert_eq!(serial.distances(), parallel.distances());
}

#[test]
fn identical_points_all_at_distance_zero() {
    let tree = BallTree::build(data_gen::gen_identical_data(100, 3), Manhattan, 4, Some(42)).unwrap();
    let queries = RowMajor::from_rows(vec![vec![3.5, 3.5, 3.5]]).unwrap();

    let hits = tree.query(&queries, 60).unwrap();
    let (_, distances) = hits.row(0);
    assert!(distances.iter().all(|&d| d.abs() < 1e-12));
}

#[test]
fn rejects_a_bad_k() {
    let tree = BallTree::build(data_gen::gen_tiny_data(), Euclidean, 2, Some(42)).unwrap();
    let queries = RowMajor::from_rows(vec![vec![0.0, 0.0]]).unwrap();

    assert!(tree.query(&queries, 0).is_err());
    assert!(tree.query(&queries, 6).is_err());
    assert!(tree.query(&queries, 5).is_ok());
}

#[test]
fn rejects_a_dimensionality_mismatch() {
    let tree = BallTree::build(data_gen::gen_tiny_data(), Euclidean, 2, Some(42)).unwrap();
    let queries = RowMajor::from_rows(vec![vec![0.0, 0.0, 0.0]]).unwrap();

    assert!(tree.query(&queries, 1).is_err());
    assert!(tree.par_query(&queries, 1).is_err());
}

#[test]
fn unknown_metric_names_fall_back_to_euclidean() {
    use ball_tree::Metric;
    assert_eq!(metric::from_name("cosine").name(), "euclidean");
    assert_eq!(metric::from_name("Manhattan").name(), "manhattan");
    assert_eq!(metric::from_name("HAMMING").name(), "hamming");
}
