//! `lyra categories` -- list routing categories.

use comfy_table::{Table, presets::UTF8_FULL};

use lyra_core::LexicalClassifier;

/// Build the category table.
pub fn categories_table(classifier: &LexicalClassifier) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Category", "Route", "Rules", "Description", "Examples"]);

    for cat in classifier.table().categories() {
        table.add_row(vec![
            cat.id.clone(),
            cat.route.clone(),
            cat.rules.len().to_string(),
            cat.description.clone(),
            cat.examples.join("\n"),
        ]);
    }
    table
}

/// Print the category table plus the decision thresholds.
pub fn categories_list(classifier: &LexicalClassifier) {
    println!("{}", categories_table(classifier));

    let policy = classifier.policy();
    println!("confidence floor: {}", policy.confidence_floor);
    if let Some(ref redirect) = policy.managed_redirect {
        println!(
            "managed project redirect: {} -> {}",
            redirect.from, redirect.to
        );
    }
}
