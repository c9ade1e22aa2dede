/**
 * Task Model
 *
 * A task is one unit of work on the board: a store-assigned identifier, a
 * creation timestamp stamped once at write time, and an opaque field set
 * supplied by the caller (title, status, column, and whatever else clients
 * agree on).
 */

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use uuid::Uuid;

/// One task on the board.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    /// Unique identifier, assigned by the store on creation and immutable
    /// afterwards
    pub id: Uuid,
    /// Creation timestamp, set exactly once and never touched by updates
    pub created_at: DateTime<Utc>,
    /// Caller-supplied fields, not interpreted by the server
    pub fields: Map<String, Value>,
}

impl Task {
    /// JSON form used on the wire: `{"id": ..., "timestamp": ..., ...fields}`.
    ///
    /// The reserved keys win over anything in the field set; the mutation
    /// service strips them on the way in, so a collision here would indicate
    /// a bug upstream.
    pub fn to_json(&self) -> Value {
        let mut object = Map::with_capacity(self.fields.len() + 2);
        for (key, value) in &self.fields {
            object.insert(key.clone(), value.clone());
        }
        object.insert("id".to_string(), Value::String(self.id.to_string()));
        object.insert(
            "timestamp".to_string(),
            Value::String(self.created_at.to_rfc3339()),
        );
        Value::Object(object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_json_merges_fields_with_identity() {
        let mut fields = Map::new();
        fields.insert("title".into(), json!("Write spec"));
        fields.insert("status".into(), json!("todo"));

        let task = Task {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            fields,
        };
        let value = task.to_json();

        assert_eq!(value["title"], json!("Write spec"));
        assert_eq!(value["status"], json!("todo"));
        assert_eq!(value["id"], json!(task.id.to_string()));
        assert_eq!(value["timestamp"], json!(task.created_at.to_rfc3339()));
    }

    #[test]
    fn test_to_json_identity_wins_over_payload() {
        let mut fields = Map::new();
        fields.insert("id".into(), json!("spoofed"));

        let task = Task {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            fields,
        };
        assert_eq!(task.to_json()["id"], json!(task.id.to_string()));
    }
}
