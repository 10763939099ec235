//! Fixed word tables used by the normalizer: stopwords, irregular plurals and
//! words that look plural but must not be singularized.
//!
//! All tables are sorted so lookups can use binary search; the unit tests
//! below keep them that way.

/// Articles, connectives and units of measure/packaging.
static STOPWORDS: &[&str] = &[
    "a", "about", "an", "and", "approximately", "bag", "bottle", "box", "bunch", "c", "can",
    "carton", "container", "count", "ct", "cup", "dash", "dozen", "each", "fl", "for", "g",
    "gal", "gallon", "gram", "handful", "jar", "kg", "kilogram", "l", "large", "lb", "lbs",
    "liter", "litre", "medium", "mg", "milliliter", "ml", "of", "or", "ounce", "oz", "pack",
    "package", "piece", "pinch", "pint", "pkg", "pkt", "pound", "pt", "qt", "quart", "small",
    "some", "t", "tablespoon", "tbs", "tbsp", "teaspoon", "the", "to", "tsp", "with",
];

/// Irregular plural → singular.
static IRREGULAR_PLURALS: &[(&str, &str)] = &[
    ("brownies", "brownie"),
    ("calves", "calf"),
    ("cookies", "cookie"),
    ("geese", "goose"),
    ("halves", "half"),
    ("knives", "knife"),
    ("leaves", "leaf"),
    ("loaves", "loaf"),
    ("mice", "mouse"),
    ("smoothies", "smoothie"),
    ("teeth", "tooth"),
    ("veggies", "veggie"),
    ("wolves", "wolf"),
];

/// Words that end in "s" but are already singular (or have no singular).
static INVARIANT: &[&str] = &[
    "asparagus", "bass", "citrus", "couscous", "grits", "hummus", "molasses",
    "octopus", "series", "species", "swiss",
];

/// Suffixes where the plural adds "es" rather than "s".
const ES_SUFFIXES: &[&str] = &["sses", "ches", "shes", "xes", "oes"];

pub(crate) fn is_stopword(token: &str) -> bool {
    STOPWORDS.binary_search(&token).is_ok()
}

/// Strip a plural suffix from a single token.
///
/// The result is a fixed point: `singularize(singularize(t)) == singularize(t)`.
pub(crate) fn singularize(token: &str) -> String {
    if let Ok(idx) = IRREGULAR_PLURALS.binary_search_by(|(plural, _)| plural.cmp(&token)) {
        return IRREGULAR_PLURALS[idx].1.to_string();
    }
    if INVARIANT.binary_search(&token).is_ok() || token.chars().count() <= 3 {
        return token.to_string();
    }

    if token.len() > 4 && token.ends_with("ies") {
        return format!("{}y", &token[..token.len() - 3]);
    }
    if token.len() > 4 && ES_SUFFIXES.iter().any(|suffix| token.ends_with(suffix)) {
        return token[..token.len() - 2].to_string();
    }
    if token.ends_with('s')
        && !token.ends_with("ss")
        && !token.ends_with("us")
        && !token.ends_with("is")
    {
        return token[..token.len() - 1].to_string();
    }

    token.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_are_sorted() {
        assert!(STOPWORDS.windows(2).all(|w| w[0] < w[1]));
        assert!(INVARIANT.windows(2).all(|w| w[0] < w[1]));
        assert!(IRREGULAR_PLURALS.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn regular_plurals() {
        assert_eq!(singularize("eggs"), "egg");
        assert_eq!(singularize("apples"), "apple");
        assert_eq!(singularize("scallions"), "scallion");
        assert_eq!(singularize("cheeses"), "cheese");
        assert_eq!(singularize("tomatoes"), "tomato");
        assert_eq!(singularize("peaches"), "peach");
        assert_eq!(singularize("radishes"), "radish");
        assert_eq!(singularize("boxes"), "box");
        assert_eq!(singularize("glasses"), "glass");
        assert_eq!(singularize("berries"), "berry");
        assert_eq!(singularize("pies"), "pie");
    }

    #[test]
    fn irregular_and_invariant_words() {
        assert_eq!(singularize("leaves"), "leaf");
        assert_eq!(singularize("cookies"), "cookie");
        assert_eq!(singularize("molasses"), "molasses");
        assert_eq!(singularize("hummus"), "hummus");
        assert_eq!(singularize("swiss"), "swiss");
        assert_eq!(singularize("gas"), "gas");
    }

    #[test]
    fn singularize_is_a_fixed_point() {
        for word in [
            "eggs", "berries", "glasses", "tomatoes", "leaves", "octopus", "oats", "lentils",
            "anchovies", "cookies", "dishes", "sauces", "bass",
        ] {
            let once = singularize(word);
            assert_eq!(singularize(&once), once, "{word}");
        }
    }
}
