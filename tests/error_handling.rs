use std::io::Write;

use pantry_match::{
    ConfigLoadError, Engine, EngineConfig, EngineError, InventoryProduct, NormalizerConfig,
    RecipeIngredient, TaxonomyError, TaxonomyTable, TaxonomyYamlConfig,
};
use tempfile::NamedTempFile;

fn engine_with_taxonomy(json: &str) -> Engine {
    let table = TaxonomyTable::from_json_str(json, NormalizerConfig::default())
        .expect("taxonomy should parse");
    Engine::with_taxonomy(EngineConfig::default(), table)
}

#[test]
fn unknown_terms_and_empty_inventory_are_not_errors() {
    let engine = Engine::new(EngineConfig::default()).expect("engine");
    let inventory = vec![InventoryProduct::new("1", "Butter")];

    assert!(
        engine
            .match_ingredient(&RecipeIngredient::new("unobtainium"), &inventory, None)
            .is_empty()
    );
    assert!(
        engine
            .match_ingredient(&RecipeIngredient::new("butter"), &[], None)
            .is_empty()
    );
    assert!(
        engine
            .match_ingredient(&RecipeIngredient::new(""), &inventory, None)
            .is_empty()
    );
}

#[test]
fn empty_taxonomy_degrades_to_exact_and_partial() {
    let engine = Engine::with_taxonomy(
        EngineConfig::default(),
        TaxonomyTable::empty(NormalizerConfig::default()),
    );
    let inventory = vec![
        InventoryProduct::new("1", "Green Onion Bunch"),
        InventoryProduct::new("2", "Scallions"),
        InventoryProduct::new("3", "Margarine").with_category("dairy"),
    ];

    let matches = engine.match_ingredient(&RecipeIngredient::new("scallion"), &inventory, None);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].product_id, "2");
}

#[test]
fn malformed_taxonomy_entries_are_skipped() {
    let engine = engine_with_taxonomy(
        r#"{
            "entries": [
                {"term": ""},
                {"term": "of the"},
                {"term": "butter", "category": "  ", "substitutes": ["", "butter", "ghee"]}
            ],
            "equivalency_groups": [[], ["tofu"]]
        }"#,
    );

    let stats = engine.taxonomy().stats();
    assert_eq!(stats.entries, 1);
    assert_eq!(stats.rejected_entries, 4);

    let inventory = vec![
        InventoryProduct::new("1", "Ghee").with_category("dairy"),
        InventoryProduct::new("2", "Salted Butter"),
    ];
    let matches = engine.match_ingredient(&RecipeIngredient::new("butter"), &inventory, None);
    let ids: Vec<&str> = matches.iter().map(|m| m.product_id.as_str()).collect();
    assert_eq!(ids, ["2", "1"]);
}

#[test]
fn unparseable_taxonomy_is_a_load_error() {
    let result = TaxonomyTable::from_json_str("[1, 2, 3]", NormalizerConfig::default());
    assert!(matches!(result, Err(TaxonomyError::Json(_))));

    let result = TaxonomyTable::from_yaml_str("entries: {term: 3", NormalizerConfig::default());
    assert!(matches!(result, Err(TaxonomyError::Yaml(_))));
}

#[test]
fn invalid_engine_config_is_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"version: \"1.0\"\nnormalizer:\n  version: 0\n")
        .unwrap();

    let err = Engine::from_config_file(file.path()).unwrap_err();
    assert!(matches!(
        err,
        EngineError::Config(ConfigLoadError::Validation(_))
    ));
}

#[test]
fn unsupported_taxonomy_extension_is_rejected() {
    let config = EngineConfig {
        taxonomy: TaxonomyYamlConfig {
            path: Some("taxonomy.csv".into()),
            refresh_secs: None,
        },
        ..EngineConfig::default()
    };

    let err = Engine::new(config).unwrap_err();
    assert!(matches!(
        err,
        EngineError::Taxonomy(TaxonomyError::UnsupportedFormat(_))
    ));
}
