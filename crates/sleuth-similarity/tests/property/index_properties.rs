//! Property tests for sleuth-similarity.

use std::cmp::Ordering;

use proptest::prelude::*;

use sleuth_core::config::IndexConfig;
use sleuth_similarity::math::cosine_similarity;
use sleuth_similarity::SimilarityIndex;

fn vectors(dims: usize) -> impl Strategy<Value = Vec<Vec<f32>>> {
    prop::collection::vec(prop::collection::vec(-10.0f32..10.0, dims), 1..40)
}

fn build(vecs: &[Vec<f32>]) -> SimilarityIndex {
    let ids = (0..vecs.len()).map(|i| format!("n{i:02}")).collect();
    SimilarityIndex::build(ids, vecs.to_vec(), &IndexConfig::default()).unwrap()
}

proptest! {
    #[test]
    fn scores_are_bounded_and_sorted(
        vecs in vectors(4),
        query in prop::collection::vec(-10.0f32..10.0, 4),
        top_k in 1usize..50,
    ) {
        let hits = build(&vecs).search(&query, top_k).unwrap();
        prop_assert!(hits.len() <= top_k.min(vecs.len()));
        for hit in &hits {
            prop_assert!((-1.0..=1.0).contains(&hit.score));
        }
        for pair in hits.windows(2) {
            let order = pair[0].score.total_cmp(&pair[1].score);
            prop_assert!(
                order == Ordering::Greater
                    || (order == Ordering::Equal && pair[0].node_id < pair[1].node_id)
            );
        }
    }

    #[test]
    fn top_hit_is_a_true_maximum(
        vecs in vectors(3),
        query in prop::collection::vec(0.1f32..10.0, 3),
    ) {
        let hits = build(&vecs).search(&query, 1).unwrap();
        let best = vecs
            .iter()
            .map(|v| cosine_similarity(v, &query))
            .fold(f32::MIN, f32::max);
        if let Some(hit) = hits.first() {
            prop_assert!((hit.score - best).abs() < 1e-4);
        }
    }

    #[test]
    fn self_query_scores_near_one(vecs in vectors(5), pick in any::<prop::sample::Index>()) {
        let i = pick.index(vecs.len());
        let v = &vecs[i];
        prop_assume!(v.iter().any(|x| x.abs() > 1e-3));
        let hits = build(&vecs).search(v, vecs.len()).unwrap();
        let own = hits.iter().find(|h| h.node_id == format!("n{i:02}")).unwrap();
        prop_assert!((own.score - 1.0).abs() < 1e-4);
    }
}
