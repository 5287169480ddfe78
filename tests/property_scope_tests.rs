use chapter_charts::core::{EntityCatalog, ScopeTable, SeriesDatum, filter_by_scope};
use proptest::prelude::*;

fn any_series() -> impl Strategy<Value = Vec<SeriesDatum>> {
    let codes: Vec<String> = EntityCatalog::codes()
        .map(|code| code.as_str().to_owned())
        .chain(["BR".to_owned(), "CN".to_owned()])
        .collect();
    prop::collection::vec(
        (
            prop::sample::select(codes),
            prop::collection::vec(0.0f64..100.0, 0..4),
        ),
        0..16,
    )
    .prop_map(|entries| {
        entries
            .into_iter()
            .map(|(code, data)| SeriesDatum::for_entity(code.as_str(), data))
            .collect()
    })
}

proptest! {
    #[test]
    fn narrower_scopes_never_show_more(series in any_series()) {
        let chain = ["spain", "europe", "world", "all"];
        for pair in chain.windows(2) {
            let narrow = filter_by_scope(&series, pair[0]);
            let wide = filter_by_scope(&series, pair[1]);
            prop_assert!(narrow.len() <= wide.len());
            let contained = narrow.iter().all(|datum| wide.contains(datum));
            prop_assert!(contained);
        }
    }

    #[test]
    fn filtering_preserves_relative_order(series in any_series(), scope in "[a-z]{0,8}") {
        let filtered = ScopeTable::standard().filter_by_scope(&series, &scope);
        let mut cursor = series.iter();
        for datum in &filtered {
            prop_assert!(cursor.any(|candidate| candidate == datum));
        }
    }

    #[test]
    fn unrecognized_scopes_match_all(series in any_series(), scope in "[A-Z]{1,6}") {
        prop_assert_eq!(filter_by_scope(&series, &scope), filter_by_scope(&series, "all"));
    }

    #[test]
    fn filtering_twice_is_stable(
        series in any_series(),
        scope in prop::sample::select(vec!["spain", "europe", "world", "all"]),
    ) {
        let once = filter_by_scope(&series, scope);
        prop_assert_eq!(filter_by_scope(&once, scope), once.clone());
    }
}
