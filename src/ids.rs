use uuid::Uuid;

/// Fresh id for an exercise or plan day. Callers may rely on uniqueness only,
/// never on ordering or an embedded timestamp.
pub fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}
