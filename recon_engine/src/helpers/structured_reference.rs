/// Normalizes a structured payment reference by stripping the `/` and `+` separators that banks
/// insert for readability, e.g. `+++123/4567/89012+++` and `123456789012` compare equal after
/// normalization.
pub fn normalize_structured_reference(reference: &str) -> String {
    reference.chars().filter(|c| *c != '/' && *c != '+').collect()
}
