/// Generates a new record identifier (UUID v4).
#[must_use]
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
