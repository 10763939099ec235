use pantry_match::{
    Engine, EngineConfig, InventoryProduct, MatchType, RecipeIngredient, approximate_availability,
    evaluate, normalize,
};

fn engine() -> Engine {
    Engine::new(EngineConfig::default()).expect("default engine")
}

fn pantry() -> Vec<InventoryProduct> {
    vec![
        InventoryProduct::new("101", "Kirkland Signature Unsalted Butter, 4 ct").with_category("Dairy"),
        InventoryProduct::new("102", "Great Value Large White Eggs, 12 count").with_category("Eggs"),
        InventoryProduct::new("103", "Green Onion Bunch").with_category("Produce"),
        InventoryProduct::new("104", "Country Crock Margarine").with_category("Dairy"),
        InventoryProduct::new("105", "King Arthur All-Purpose Flour 5 lb").with_category("Baking"),
        InventoryProduct::new("106", "Organic Whole Milk, 1 gallon").with_category("Dairy"),
        InventoryProduct::new("107", "Fresh Coriander").with_category("Produce"),
        InventoryProduct::new("108", "Domino Granulated Sugar").with_category("Baking"),
        InventoryProduct::new("109", "Oat Milk Barista Edition").with_category("Dairy"),
        InventoryProduct::new("110", "Garbanzo Beans, 15 oz can").with_category("Canned Goods"),
    ]
}

#[test]
fn identical_requests_give_identical_json() {
    let engine = engine();
    let inventory = pantry();

    for name in ["butter", "scallions", "milk", "chickpeas", "2 cups sugar", "coriander leaves"] {
        let ingredient = RecipeIngredient::new(name);
        let first = engine.match_ingredient(&ingredient, &inventory, Some("h1"));
        let second = engine.match_ingredient(&ingredient, &inventory, Some("h1"));
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap(),
            "non-deterministic output for {name:?}"
        );
    }
}

#[test]
fn inventory_order_does_not_change_ranking() {
    let engine = engine();
    let inventory = pantry();
    let mut rotated = inventory.clone();
    rotated.rotate_left(4);
    let mut reversed = inventory.clone();
    reversed.reverse();

    for name in ["butter", "milk", "flour", "eggs"] {
        let ingredient = RecipeIngredient::new(name);
        let base = engine.match_ingredient(&ingredient, &inventory, None);
        assert_eq!(base, engine.match_ingredient(&ingredient, &rotated, None));
        assert_eq!(base, engine.match_ingredient(&ingredient, &reversed, None));
    }
}

#[test]
fn butter_ranks_every_tier() {
    let engine = engine();
    let matches = engine.match_ingredient(&RecipeIngredient::new("Butter"), &pantry(), None);

    let ids: Vec<&str> = matches.iter().map(|m| m.product_id.as_str()).collect();
    let tiers: Vec<MatchType> = matches.iter().map(|m| m.match_type).collect();

    assert_eq!(ids[0], "101");
    assert_eq!(tiers[0], MatchType::Partial);
    assert!(tiers.contains(&MatchType::Category));
    assert!(!ids.contains(&"103"));
    for pair in matches.windows(2) {
        assert!(pair[0].confidence >= pair[1].confidence);
    }
}

#[test]
fn aggregator_and_approximation_agree_on_strong_matches() {
    let engine = engine();
    let ingredients: Vec<RecipeIngredient> = [
        "scallions",
        "garbanzo beans",
        "coriander leaves",
        "saffron",
        "chickpeas",
    ]
    .into_iter()
    .map(RecipeIngredient::new)
    .collect();

    let (matches, report) = engine.check_recipe(&ingredients, &pantry(), None);

    for ingredient in &ingredients {
        let best = matches[&ingredient.name].first().map(|m| m.confidence);
        assert!(
            best.is_none_or(|c| c >= 90 || c <= 10),
            "{} has a mid-range best match",
            ingredient.name
        );
    }
    assert_eq!(approximate_availability(&ingredients, &matches), report);
    assert_eq!(evaluate(&ingredients, &matches), report);
    assert_eq!(report.missing_ingredients, vec!["saffron"]);
}

#[test]
fn normalization_is_idempotent_over_inventory_names() {
    for product in pantry() {
        let once = normalize(&product.product_name);
        assert_eq!(normalize(once.as_str()), once, "{}", product.product_name);
    }
}
