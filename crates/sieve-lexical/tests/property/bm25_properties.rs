use proptest::prelude::*;
use sieve_lexical::{Bm25Index, Bm25Params, StopwordSet, Tokenizer};

fn corpus_strategy() -> impl Strategy<Value = Vec<Vec<String>>> {
    prop::collection::vec(
        prop::collection::vec("[a-f]{3,5}", 3..12),
        1..20,
    )
}

proptest! {
    #[test]
    fn scores_align_with_corpus(corpus in corpus_strategy(), query in prop::collection::vec("[a-f]{3,5}", 0..5)) {
        let idx = Bm25Index::build(&corpus, Bm25Params::default());
        prop_assert_eq!(idx.scores(&query).len(), corpus.len());
    }

    #[test]
    fn top_n_is_bounded_positive_and_descending(corpus in corpus_strategy(), query in prop::collection::vec("[a-f]{3,5}", 1..5), n in 0usize..10) {
        let idx = Bm25Index::build(&corpus, Bm25Params::default());
        let top = idx.top_n(&query, n);
        prop_assert!(top.len() <= n);
        prop_assert!(top.iter().all(|(_, s)| *s > 0.0));
        for pair in top.windows(2) {
            prop_assert!(pair[0].1 >= pair[1].1);
        }
    }

    #[test]
    fn documents_containing_a_query_term_score_positive(corpus in corpus_strategy(), pick in any::<prop::sample::Index>()) {
        let idx = Bm25Index::build(&corpus, Bm25Params::default());
        let doc = pick.index(corpus.len());
        let query = vec![corpus[doc][0].clone()];
        prop_assert!(idx.scores(&query)[doc] > 0.0);
    }

    #[test]
    fn tokens_are_never_short_or_numeric(text in "[ a-zA-Z0-9.,!?()]{0,120}") {
        let tok = Tokenizer::new(StopwordSet::english());
        for t in tok.tokenize(&text) {
            prop_assert!(t.chars().count() > 2);
            prop_assert!(!t.chars().all(|c| c.is_numeric()));
            prop_assert_eq!(t.to_lowercase(), t.clone());
        }
    }
}
