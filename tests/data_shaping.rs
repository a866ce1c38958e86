//! End-to-end data shaping: wire envelopes through normalisation, hierarchy
//! reconstruction, search filtering and the view-state store.

use grocery_admin::domain::category::Category;
use grocery_admin::domain::hierarchy::{build_forest, filter_categories};
use grocery_admin::domain::types::CategoryId;
use grocery_admin::models::category::ApiCategory;
use grocery_admin::models::envelope::ApiEnvelope;
use grocery_admin::viewstate::{CategoryStore, CategoryViewState, ExpandedNodes};

fn parse_collection(fixture: &str) -> Vec<Category> {
    let envelope: ApiEnvelope<Vec<ApiCategory>> = serde_json::from_str(fixture).unwrap();
    envelope
        .into_data()
        .unwrap()
        .into_iter()
        .map(|record| record.try_into().unwrap())
        .collect()
}

const CODED_FIXTURE: &str = r#"{
    "errorCode": 0,
    "errorMessage": null,
    "data": [
        {"id": 1, "categoryName": "Produce", "shortDescription": "Fruit and veg"},
        {"id": "2", "name": "Bakery", "shortDescription": "Breads and pastry"},
        {"id": 3, "categoryName": "Citrus", "shortDescription": "Oranges and lemons",
         "isSubCategory": true, "parentCategoryIds": ["1"]},
        {"id": 4, "name": "Sourdough", "shortDescription": "Slow-fermented loaves",
         "isSubCategory": true, "parentCategoryIds": [2, "1"]}
    ]
}"#;

const FLAGGED_FIXTURE: &str = r#"{
    "success": true,
    "message": "ok",
    "data": [
        {"id": 1, "name": "Produce", "shortDescription": "Fruit and veg"},
        {"id": 2, "name": "Citrus", "shortDescription": "Oranges and lemons",
         "isSubCategory": true, "parentCategoryIds": [1]}
    ]
}"#;

#[test]
fn both_envelope_shapes_yield_the_same_domain_records() {
    let coded = parse_collection(CODED_FIXTURE);
    let flagged = parse_collection(FLAGGED_FIXTURE);

    assert_eq!(coded.len(), 4);
    assert_eq!(flagged.len(), 2);
    assert_eq!(coded[0].name, flagged[0].name);
    assert_eq!(coded[0].id, flagged[0].id);
}

#[test]
fn mixed_id_encodings_group_into_one_forest() {
    let categories = parse_collection(CODED_FIXTURE);
    let forest = build_forest(&categories);

    assert_eq!(forest.len(), 2);

    let produce = forest.children_of(CategoryId::new(1).unwrap()).unwrap();
    let names: Vec<&str> = produce.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Citrus", "Sourdough"]);

    let bakery = forest.children_of(CategoryId::new(2).unwrap()).unwrap();
    assert_eq!(bakery.len(), 1);
    assert_eq!(bakery[0].name.as_str(), "Sourdough");
}

#[test]
fn search_then_group_stays_a_subset() {
    let categories = parse_collection(CODED_FIXTURE);

    let visible = filter_categories(&categories, "bread");
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].name.as_str(), "Bakery");

    let forest = build_forest(&visible);
    assert_eq!(forest.len(), 1);
    assert!(
        forest
            .children_of(CategoryId::new(2).unwrap())
            .unwrap()
            .is_empty()
    );
}

#[test]
fn reload_replaces_the_store_and_prunes_expansion() {
    let store = CategoryStore::new();
    let mut expanded = ExpandedNodes::default();

    store.begin_load();
    store.finish_load(Ok(parse_collection(CODED_FIXTURE)));
    expanded.toggle(CategoryId::new(1).unwrap());
    expanded.toggle(CategoryId::new(4).unwrap());

    store.begin_load();
    store.finish_load(Ok(parse_collection(FLAGGED_FIXTURE)));

    let loaded = store.loaded().unwrap();
    expanded.prune(&loaded);

    assert_eq!(loaded.len(), 2);
    assert!(expanded.contains(CategoryId::new(1).unwrap()));
    assert!(!expanded.contains(CategoryId::new(4).unwrap()));
}

#[test]
fn rejecting_envelope_surfaces_the_server_message() {
    let envelope: ApiEnvelope<Vec<ApiCategory>> =
        serde_json::from_str(r#"{"errorCode": 12, "errorMessage": "hub offline"}"#).unwrap();
    let err = envelope.into_data().unwrap_err();
    assert_eq!(err.to_string(), "hub offline");
}

#[test]
fn failed_reload_keeps_an_error_state_without_data() {
    let store = CategoryStore::new();
    store.begin_load();
    store.finish_load(Err("network unavailable".to_string()));

    assert!(store.loaded().is_none());
    assert!(matches!(store.snapshot(), CategoryViewState::Error(_)));
}
