use evolve_core::{CATEGORY_RULES, Category, categorize_basic};

fn in_range_amount(rule: &evolve_core::CategoryRule) -> f64 {
    match rule.amount_range {
        Some(r) => match (r.min, r.max) {
            (Some(min), Some(max)) => (min + max) / 2.0,
            (Some(min), None) => min,
            (None, Some(max)) => max,
            (None, None) => 100.0,
        },
        None => 100.0,
    }
}

/// A keyword never lands later in the table than its own rule.
#[test]
fn test_every_keyword_hits_its_rule_or_an_earlier_one() {
    for (idx, rule) in CATEGORY_RULES.iter().enumerate() {
        for kw in rule.keywords {
            let got = categorize_basic(kw, in_range_amount(rule));
            let got_idx = CATEGORY_RULES
                .iter()
                .position(|r| r.category == got)
                .unwrap_or_else(|| panic!("{kw:?} fell through to {got}"));
            assert!(got_idx <= idx, "{kw:?} went to {got}, after {}", rule.category);
        }
    }
}

#[test]
fn test_uppercase_keywords_match() {
    assert_eq!(categorize_basic("MONTHLY MORTGAGE", 2000.0), Category::Housing);
    assert_eq!(categorize_basic("Venmo", 25.0), Category::Transfers);
    assert_eq!(categorize_basic("University Tuition", 4000.0), Category::Education);
}
