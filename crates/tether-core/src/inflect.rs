//! Naming conventions for tables, class names and foreign keys
//!
//! English inflection covers the regular suffix rules plus a small table of
//! irregular and uncountable nouns. Only the last `_` segment of a name is
//! inflected, so `dog_house` pluralizes to `dog_houses`.

use convert_case::{Case, Casing};

const IRREGULAR: &[(&str, &str)] = &[
    ("person", "people"),
    ("child", "children"),
    ("man", "men"),
    ("woman", "women"),
    ("mouse", "mice"),
    ("goose", "geese"),
    ("foot", "feet"),
    ("tooth", "teeth"),
    ("ox", "oxen"),
];

const UNCOUNTABLE: &[&str] = &[
    "deer",
    "equipment",
    "fish",
    "information",
    "money",
    "news",
    "rice",
    "series",
    "sheep",
    "species",
];

fn split_last(word: &str) -> (&str, &str) {
    match word.rfind('_') {
        Some(idx) => word.split_at(idx + 1),
        None => ("", word),
    }
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

fn pluralize_word(word: &str) -> String {
    let lower = word.to_ascii_lowercase();
    if lower.is_empty() || UNCOUNTABLE.contains(&lower.as_str()) {
        return word.to_string();
    }
    if let Some((_, plural)) = IRREGULAR.iter().find(|(s, _)| *s == lower) {
        return (*plural).to_string();
    }

    let stem_char = |n: usize| lower.chars().rev().nth(n);

    if lower.ends_with('y') && stem_char(1).is_some_and(|c| !is_vowel(c)) {
        return format!("{}ies", &word[..word.len() - 1]);
    }
    if ["s", "x", "z", "ch", "sh"].iter().any(|s| lower.ends_with(s)) {
        return format!("{}es", word);
    }
    if lower.ends_with("fe") && stem_char(2) != Some('f') {
        return format!("{}ves", &word[..word.len() - 2]);
    }
    if lower.ends_with("lf") || lower.ends_with("rf") {
        return format!("{}ves", &word[..word.len() - 1]);
    }
    format!("{}s", word)
}

fn singularize_word(word: &str) -> String {
    let lower = word.to_ascii_lowercase();
    if lower.is_empty() || UNCOUNTABLE.contains(&lower.as_str()) {
        return word.to_string();
    }
    if let Some((singular, _)) = IRREGULAR.iter().find(|(_, p)| *p == lower) {
        return (*singular).to_string();
    }

    if lower.len() > 3 && lower.ends_with("ies") {
        return format!("{}y", &word[..word.len() - 3]);
    }
    if lower.len() > 3 && lower.ends_with("ves") {
        let stem = &word[..word.len() - 3];
        return if stem.ends_with('l') || stem.ends_with('r') {
            format!("{}f", stem)
        } else {
            format!("{}fe", stem)
        };
    }
    if ["sses", "shes", "ches", "xes", "zzes"]
        .iter()
        .any(|s| lower.ends_with(s))
    {
        return word[..word.len() - 2].to_string();
    }
    if lower.ends_with("ss") || lower.ends_with("us") {
        return word.to_string();
    }
    if lower.len() > 1 && lower.ends_with('s') {
        return word[..word.len() - 1].to_string();
    }
    word.to_string()
}

/// Pluralize the last segment of a snake_case name
pub fn pluralize(name: &str) -> String {
    let (prefix, last) = split_last(name);
    format!("{}{}", prefix, pluralize_word(last))
}

/// Singularize the last segment of a snake_case name
pub fn singularize(name: &str) -> String {
    let (prefix, last) = split_last(name);
    format!("{}{}", prefix, singularize_word(last))
}

/// Default table name for a model type: `DogHouse` -> `dog_houses`
pub fn tableize(type_name: &str) -> String {
    pluralize(&type_name.to_case(Case::Snake))
}

/// Default class name for a relationship: `residents` -> `Resident`
pub fn classify(relation_name: &str) -> String {
    singularize(&relation_name.to_case(Case::Snake)).to_case(Case::Pascal)
}

/// Default belongs-to foreign key: `owner` -> `owner_id`
pub fn belongs_to_foreign_key(relation_name: &str) -> String {
    format!("{}_id", relation_name)
}

/// Default has-many foreign key: `House` -> `house_id`
///
/// The owning type name is lower-cased wholesale, so `DogHouse` yields
/// `doghouse_id` rather than `dog_house_id`.
pub fn has_many_foreign_key(owner_type_name: &str) -> String {
    format!("{}_id", owner_type_name).to_lowercase()
}
