use std::collections::HashSet;

use proptest::prelude::*;
use sieve_core::models::{Hit, LexicalHit, Metadata, NamespaceTable, Source, TagEntry, VectorHit};
use sieve_retrieval::{fuse, FusionWeights, NamespaceRouter};

fn vector_list() -> impl Strategy<Value = Vec<Hit>> {
    prop::collection::vec(("[a-h]", 0.0f64..1.0), 0..12).prop_map(|hits| {
        hits.into_iter()
            .map(|(id, score)| {
                Hit::from(VectorHit {
                    id,
                    score,
                    partition: "p".into(),
                    metadata: Metadata::new(),
                })
            })
            .collect()
    })
}

fn lexical_list() -> impl Strategy<Value = Vec<Hit>> {
    prop::collection::vec(("[a-h]", 0.01f64..20.0), 0..12).prop_map(|hits| {
        hits.into_iter()
            .map(|(id, score)| {
                Hit::from(LexicalHit {
                    id,
                    score,
                    partition: "p".into(),
                    text: String::new(),
                })
            })
            .collect()
    })
}

fn router() -> NamespaceRouter {
    NamespaceRouter::new(NamespaceTable::new(vec![
        TagEntry::new("alpha", &[], &["abc", "abd"]),
        TagEntry::new("beta", &[], &["bcd"]),
        TagEntry::new("gamma-policy", &[], &["cde", "abc"]),
        TagEntry::new("delta", &[], &["def"]),
        TagEntry::new("epsilon", &[], &[]),
    ]))
}

proptest! {
    #[test]
    fn fused_output_is_bounded_descending_and_unique(
        vectors in vector_list(),
        lexicals in lexical_list(),
        top_k in 0usize..8,
    ) {
        let out = fuse(&[vectors, lexicals], &FusionWeights::default(), top_k);
        prop_assert!(out.len() <= top_k);
        for pair in out.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
        let ids: HashSet<_> = out.iter().map(|r| r.id.as_str()).collect();
        prop_assert_eq!(ids.len(), out.len());
    }

    #[test]
    fn ids_in_both_lists_carry_both_sources(
        vectors in vector_list(),
        lexicals in lexical_list(),
    ) {
        let top_k = 32;
        let v_ids: HashSet<String> = vectors.iter().map(|h| h.id().to_string()).collect();
        let l_ids: HashSet<String> = lexicals.iter().map(|h| h.id().to_string()).collect();
        let out = fuse(&[vectors, lexicals], &FusionWeights::default(), top_k);
        for r in &out {
            prop_assert_eq!(r.sources.contains(&Source::Vector), v_ids.contains(&r.id));
            prop_assert_eq!(r.sources.contains(&Source::Lexical), l_ids.contains(&r.id));
        }
    }

    #[test]
    fn fusion_is_deterministic(vectors in vector_list(), lexicals in lexical_list()) {
        let lists = [vectors, lexicals];
        let a = fuse(&lists, &FusionWeights::default(), 6);
        let b = fuse(&lists, &FusionWeights::default(), 6);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn router_selects_within_bounds(
        query in "[a-f ]{0,40}",
        min in 0usize..7,
        max in 0usize..7,
    ) {
        let r = router();
        let selected = r.select(&query, min, max);
        let tags = r.table().len();
        let lo = min.max(1).min(tags);
        let hi = max.max(min.max(1));
        prop_assert!(selected.len() >= lo);
        prop_assert!(selected.len() <= hi);
        let unique: HashSet<_> = selected.iter().collect();
        prop_assert_eq!(unique.len(), selected.len());
    }
}
