use chrono::Utc;
use proptest::prelude::*;
use tooldebt::core::data::{InventoryFilters, Tool};
use tooldebt::utils::pagination::{page_count, paginate};
use tooldebt::utils::search::SearchEngine;
use tooldebt::{Dataset, Persona};

fn enterprise_tools() -> Vec<Tool> {
    Dataset::bundled()
        .unwrap()
        .tools(Persona::Enterprise, Utc::now())
}

fn filters_strategy() -> impl Strategy<Value = InventoryFilters> {
    let categories = SearchEngine::categories(&enterprise_tools());
    (
        prop::option::of(prop::sample::select(categories)),
        prop::option::of(prop::sample::select(vec!["sec", "cloud", "ID", "a", "zzz"])),
        prop::option::of(0.0..150_000.0f64),
        prop::option::of(0.0..400_000.0f64),
    )
        .prop_map(|(category, search, min_cost, max_cost)| InventoryFilters {
            category,
            search: search.map(str::to_string),
            min_cost,
            max_cost,
        })
}

fn satisfies(tool: &Tool, filters: &InventoryFilters) -> bool {
    let category = filters.category.as_ref().is_none_or(|c| &tool.category == c);
    let search = filters.search.as_ref().is_none_or(|s| {
        let term = s.to_lowercase();
        [&tool.name, &tool.vendor, &tool.category]
            .iter()
            .any(|field| field.to_lowercase().contains(&term))
    });
    let min = filters.min_cost.is_none_or(|m| tool.annual_cost_usd >= m);
    let max = filters.max_cost.is_none_or(|m| tool.annual_cost_usd <= m);
    category && search && min && max
}

proptest! {
    #[test]
    fn pages_cover_items_exactly_once(len in 0usize..60, page_size in 1usize..12) {
        let items: Vec<usize> = (0..len).collect();
        let pages = page_count(len, page_size);

        let mut seen = Vec::new();
        for page in 1..=pages {
            let slice = paginate(&items, page, page_size);
            prop_assert!(!slice.is_empty());
            prop_assert!(slice.len() <= page_size);
            seen.extend(slice);
        }
        prop_assert_eq!(seen, items.clone());
        prop_assert!(paginate(&items, pages + 1, page_size).is_empty());
    }

    #[test]
    fn filters_are_conjunctive(filters in filters_strategy()) {
        let tools = enterprise_tools();
        let matched = SearchEngine::filter(tools.clone(), &filters);
        let expected: Vec<&Tool> = tools.iter().filter(|t| satisfies(t, &filters)).collect();

        prop_assert_eq!(matched.len(), expected.len());
        for (got, want) in matched.iter().zip(expected) {
            prop_assert_eq!(&got.id, &want.id);
        }
    }
}
