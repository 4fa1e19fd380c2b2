use matplan_shopping::{
    AggregatedIngredient, CategoryRule, CategoryTable, CustomItem, ShoppingItem, ShoppingList,
    categorize, shopping_items,
};

fn line(name: &str, total_quantity: f64, unit: &str) -> AggregatedIngredient {
    AggregatedIngredient {
        name: name.to_string(),
        total_quantity,
        unit: unit.to_string(),
    }
}

fn aggregated() -> Vec<AggregatedIngredient> {
    vec![
        line("Diskmedel", 1.0, "st"),
        line("Krossade tomater", 800.0, "g"),
        line("Lök", 3.0, "st"),
        line("Mjölk", 5.0, "dl"),
        line("Nötfärs", 500.0, "g"),
        line("Salt", 1.0, "tsk"),
    ]
}

fn names(items: &[ShoppingItem]) -> Vec<&str> {
    items.iter().map(|i| i.name.as_str()).collect()
}

#[test]
fn test_substring_keyword_assigns_category() {
    let table = CategoryTable::new(vec![CategoryRule::new("Produce", &["tomat"])], "Other").unwrap();

    let list = categorize(&table, shopping_items(&[line("Krossade tomater", 800.0, "g")], &[]));

    assert_eq!(names(list.get("Produce").unwrap()), vec!["Krossade tomater"]);
    assert!(list.get("Other").is_none());
}

#[test]
fn test_groups_follow_table_order_with_fallback_last() {
    let table = CategoryTable::default();

    let list = categorize(&table, shopping_items(&aggregated(), &[]));

    let groups: Vec<&str> = list.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(
        groups,
        vec!["Produce", "Meat & Fish", "Dairy & Eggs", "Spices & Sauces", "Other"]
    );
    assert_eq!(names(list.get("Produce").unwrap()), vec!["Krossade tomater", "Lök"]);
    assert_eq!(names(list.get("Other").unwrap()), vec!["Diskmedel"]);
    assert!(list.get("Dry Goods").is_none(), "empty groups are left out");
}

#[test]
fn test_every_item_lands_in_exactly_one_group() {
    let table = CategoryTable::default();
    let custom = vec![
        CustomItem {
            id: "c1".to_string(),
            name: "Hushållspapper".to_string(),
        },
        CustomItem {
            id: "c2".to_string(),
            name: "   ".to_string(),
        },
    ];
    let items = shopping_items(&aggregated(), &custom);
    let count = items.len();

    let list = categorize(&table, items);

    assert_eq!(list.item_count(), count);
    let mut ids: Vec<&str> = list
        .iter()
        .flat_map(|g| g.items.iter().map(|i| i.id.as_str()))
        .collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), count);
    assert!(list.get("Other").unwrap().iter().any(|i| i.id == "c2"));
}

#[test]
fn test_categorize_is_deterministic() {
    let table = CategoryTable::default();

    let first = categorize(&table, shopping_items(&aggregated(), &[]));
    let second = categorize(&table, shopping_items(&aggregated(), &[]));

    assert_eq!(first, second);
}

#[test]
fn test_custom_items_keep_their_identity() {
    let table = CategoryTable::default();
    let mut list = ShoppingList::default();
    let id = list.add_custom("Bananer").unwrap();

    let built = list.build(&table, &aggregated());

    let produce = built.get("Produce").unwrap();
    let banana = produce.iter().find(|i| i.id == id).unwrap();
    assert!(banana.is_custom);
    assert_eq!(banana.quantity, None);
    let onion = produce.iter().find(|i| i.name == "Lök").unwrap();
    assert_eq!(onion.id, "ingredient:lök");
    assert!(!onion.is_custom);

    assert!(list.remove_custom(&id));
    let rebuilt = list.build(&table, &aggregated());
    assert_eq!(rebuilt.item_count(), aggregated().len());
}

#[test]
fn test_checked_state_survives_rebuild() {
    let table = CategoryTable::default();
    let mut list = ShoppingList::default();
    list.toggle_checked("ingredient:nötfärs");

    let built = list.build(&table, &aggregated());

    let meat = built.get("Meat & Fish").unwrap();
    assert!(meat[0].checked);
    assert!(
        built
            .iter()
            .flat_map(|g| g.items.iter())
            .filter(|i| i.checked)
            .count()
            == 1
    );
}

#[test]
fn test_serializes_as_ordered_groups() {
    let table = CategoryTable::default();

    let list = categorize(&table, shopping_items(&[line("Lök", 1.0, "st")], &[]));

    let json = serde_json::to_value(&list).unwrap();
    assert_eq!(json[0]["name"], "Produce");
    assert_eq!(json[0]["items"][0]["isCustom"], false);
    assert_eq!(json[0]["items"][0]["quantity"], 1.0);
}
