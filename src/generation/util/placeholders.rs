use std::collections::BTreeSet;

use regex::Regex;

lazy_static! {
    static ref IMAGE_PLACEHOLDER: Regex = Regex::new(r"<\|image_(\d+)\|>").unwrap();
}

/// 1-based image slots referenced by `<img><|image_N|></img>` markers in a prompt.
pub fn referenced_image_slots(prompt: &str) -> BTreeSet<usize> {
    IMAGE_PLACEHOLDER
        .captures_iter(prompt)
        .filter_map(|captures| captures[1].parse().ok())
        .collect()
}
