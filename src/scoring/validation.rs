use crate::inventory::types::{AnswerScale, Item, ResponseSet};

/// Validate a response set against the item bank before scoring.
/// Returns all validation errors at once (not just the first).
///
/// A response set passes only when every item is answered, every answer is
/// inside the ordinal range, and no answer references an unknown item.
pub fn validate_responses(
    responses: &ResponseSet,
    items: &[Item],
    scale: AnswerScale,
) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    for item in items {
        match responses.get(&item.id) {
            None => errors.push(format!("item {}: no answer recorded", item.id)),
            Some(&value) if !scale.contains(value) => errors.push(format!(
                "item {}: answer {} outside range 1-{}",
                item.id,
                value,
                scale.max()
            )),
            Some(_) => {}
        }
    }

    for id in responses.keys() {
        if !items.iter().any(|item| item.id == *id) {
            errors.push(format!("answer references unknown item {}", id));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
