//! Reconstruction of the two-level category hierarchy from the flat list
//! returned by the remote API, plus the pure search filter applied on top.

use std::collections::HashMap;

use crate::domain::category::Category;
use crate::domain::types::CategoryId;

/// One root category together with its sub-categories, both in stable
/// input order.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryGroup {
    pub parent: Category,
    pub children: Vec<Category>,
}

/// The grouped view over one flat category collection.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CategoryForest {
    groups: Vec<CategoryGroup>,
}

impl CategoryForest {
    pub fn groups(&self) -> &[CategoryGroup] {
        &self.groups
    }

    pub fn children_of(&self, parent_id: CategoryId) -> Option<&[Category]> {
        self.groups
            .iter()
            .find(|g| g.parent.id == parent_id)
            .map(|g| g.children.as_slice())
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Partitions a flat category collection into root categories and their
/// sub-categories.
///
/// Roots keep input order; each sub-category is appended to every parent it
/// references, again in input order. A sub-category referencing an unknown
/// parent id is dropped from that grouping. The input is never mutated and
/// the same input always yields the same forest.
pub fn build_forest(categories: &[Category]) -> CategoryForest {
    let mut groups: Vec<CategoryGroup> = categories
        .iter()
        .filter(|c| !c.is_sub())
        .map(|c| CategoryGroup {
            parent: c.clone(),
            children: Vec::new(),
        })
        .collect();

    let index: HashMap<CategoryId, usize> = groups
        .iter()
        .enumerate()
        .map(|(position, group)| (group.parent.id, position))
        .collect();

    for sub in categories.iter().filter(|c| c.is_sub()) {
        for parent_id in sub.parents.parent_ids() {
            if let Some(&position) = index.get(parent_id) {
                groups[position].children.push(sub.clone());
            }
        }
    }

    CategoryForest { groups }
}

/// Retains exactly the records whose name, short description or long
/// description contains `term` case-insensitively. An empty or
/// whitespace-only term keeps the whole collection.
pub fn filter_categories(categories: &[Category], term: &str) -> Vec<Category> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return categories.to_vec();
    }
    categories
        .iter()
        .filter(|c| matches_search(c, &needle))
        .cloned()
        .collect()
}

fn matches_search(category: &Category, needle: &str) -> bool {
    category.name.as_str().to_lowercase().contains(needle)
        || category
            .short_description
            .as_str()
            .to_lowercase()
            .contains(needle)
        || category
            .long_description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category::ParentLinks;
    use crate::domain::types::{CategoryName, ShortDescription};

    fn root(id: i64, name: &str) -> Category {
        Category {
            id: CategoryId::new(id).unwrap(),
            name: CategoryName::new(name).unwrap(),
            short_description: ShortDescription::new(format!("{name} aisle")).unwrap(),
            long_description: None,
            cover_image: None,
            parents: ParentLinks::Root,
            created_at: None,
            updated_at: None,
        }
    }

    fn sub(id: i64, name: &str, parent_ids: &[i64]) -> Category {
        let parents = parent_ids
            .iter()
            .map(|&p| CategoryId::new(p).unwrap())
            .collect();
        Category {
            parents: ParentLinks::new(true, parents).unwrap(),
            ..root(id, name)
        }
    }

    #[test]
    fn groups_subs_under_their_parent() {
        let flat = vec![root(1, "Produce"), sub(2, "Citrus", &[1])];

        let forest = build_forest(&flat);

        assert_eq!(forest.len(), 1);
        let children = forest.children_of(CategoryId::new(1).unwrap()).unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].id, 2);
    }

    #[test]
    fn reconstruction_is_idempotent() {
        let flat = vec![
            root(1, "Produce"),
            root(2, "Bakery"),
            sub(3, "Citrus", &[1]),
            sub(4, "Sourdough", &[2]),
        ];

        assert_eq!(build_forest(&flat), build_forest(&flat));
    }

    #[test]
    fn membership_is_exactly_once_regardless_of_ordering() {
        let forward = vec![root(1, "Produce"), sub(2, "Citrus", &[1])];
        let reversed = vec![sub(2, "Citrus", &[1]), root(1, "Produce")];

        for flat in [forward, reversed] {
            let forest = build_forest(&flat);
            let children = forest.children_of(CategoryId::new(1).unwrap()).unwrap();
            assert_eq!(children.iter().filter(|c| c.id == 2).count(), 1);
        }
    }

    #[test]
    fn sub_with_multiple_parents_appears_under_each() {
        let flat = vec![
            root(1, "Produce"),
            root(2, "Organic"),
            sub(3, "Citrus", &[1, 2]),
        ];

        let forest = build_forest(&flat);

        for parent in [1, 2] {
            let children = forest.children_of(CategoryId::new(parent).unwrap()).unwrap();
            assert_eq!(children.len(), 1);
            assert_eq!(children[0].id, 3);
        }
    }

    #[test]
    fn orphan_sub_is_dropped_silently() {
        let flat = vec![root(1, "Produce"), sub(2, "Ghost", &[99])];

        let forest = build_forest(&flat);

        assert_eq!(forest.len(), 1);
        assert!(
            forest
                .children_of(CategoryId::new(1).unwrap())
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn parents_keep_input_order() {
        let flat = vec![root(5, "Bakery"), root(2, "Produce"), root(9, "Dairy")];

        let forest = build_forest(&flat);
        let order: Vec<i64> = forest.groups().iter().map(|g| g.parent.id.get()).collect();

        assert_eq!(order, vec![5, 2, 9]);
    }

    #[test]
    fn filter_is_a_strict_subset_and_case_insensitive() {
        let flat = vec![root(1, "Produce"), root(2, "Bakery"), sub(3, "CITRUS", &[1])];

        let filtered = filter_categories(&flat, "citrus");

        assert_eq!(filtered.len(), 1);
        for c in &filtered {
            let needle = "citrus";
            assert!(
                c.name.as_str().to_lowercase().contains(needle)
                    || c.short_description.as_str().to_lowercase().contains(needle)
            );
        }
    }

    #[test]
    fn filter_matches_descriptions_too() {
        let mut bakery = root(2, "Bakery");
        bakery.long_description = Some("Fresh rye and wheat loaves".to_string());
        let flat = vec![root(1, "Produce"), bakery];

        let filtered = filter_categories(&flat, "RYE");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 2);
    }

    #[test]
    fn blank_filter_keeps_everything() {
        let flat = vec![root(1, "Produce"), root(2, "Bakery")];
        assert_eq!(filter_categories(&flat, "  ").len(), 2);
    }
}
