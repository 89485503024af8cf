// In-memory normalized cache for GraphQL results
use serde_json::{Map, Value};
use std::collections::HashMap;

const REF_KEY: &str = "__ref";

/// Query results keyed by operation and variables. Objects carrying both
/// `__typename` and `id` are stored once under `Typename:id` and referenced
/// from every result that contains them, so a newer response for the same
/// entity is visible through older queries too.
///
/// No eviction and no expiry; the cache lives as long as its client.
#[derive(Debug, Default)]
pub struct InMemoryCache {
    entities: HashMap<String, Value>,
    queries: HashMap<String, Value>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// serde_json keeps object keys sorted, so equal variables give equal keys
    pub fn query_key(operation: &str, variables: &Value) -> String {
        format!("{}({})", operation, variables)
    }

    pub fn write_query(&mut self, key: String, data: &Value) {
        let normalized = self.normalize(data);
        self.queries.insert(key, normalized);
    }

    pub fn read_query(&self, key: &str) -> Option<Value> {
        self.queries.get(key).map(|value| self.resolve(value))
    }

    pub fn entity(&self, id: &str) -> Option<&Value> {
        self.entities.get(id)
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    fn normalize(&mut self, value: &Value) -> Value {
        match value {
            Value::Array(items) => Value::Array(items.iter().map(|item| self.normalize(item)).collect()),
            Value::Object(map) => {
                let fields: Map<String, Value> = map
                    .iter()
                    .map(|(key, field)| (key.clone(), self.normalize(field)))
                    .collect();

                match entity_id(&fields) {
                    Some(id) => {
                        self.merge_entity(&id, fields);
                        let mut reference = Map::new();
                        reference.insert(REF_KEY.to_string(), Value::String(id));
                        Value::Object(reference)
                    }
                    None => Value::Object(fields),
                }
            }
            other => other.clone(),
        }
    }

    fn merge_entity(&mut self, id: &str, fields: Map<String, Value>) {
        match self.entities.get_mut(id).and_then(Value::as_object_mut) {
            Some(existing) => existing.extend(fields),
            None => {
                self.entities.insert(id.to_string(), Value::Object(fields));
            }
        }
    }

    fn resolve(&self, value: &Value) -> Value {
        match value {
            Value::Array(items) => Value::Array(items.iter().map(|item| self.resolve(item)).collect()),
            Value::Object(map) => match map.get(REF_KEY).and_then(Value::as_str) {
                Some(id) if map.len() == 1 => self
                    .entities
                    .get(id)
                    .map(|entity| self.resolve(entity))
                    .unwrap_or(Value::Null),
                _ => Value::Object(
                    map.iter()
                        .map(|(key, field)| (key.clone(), self.resolve(field)))
                        .collect(),
                ),
            },
            other => other.clone(),
        }
    }
}

fn entity_id(fields: &Map<String, Value>) -> Option<String> {
    let typename = fields.get("__typename")?.as_str()?;
    let id = match fields.get("id")? {
        Value::String(id) => id.clone(),
        Value::Number(id) => id.to_string(),
        _ => return None,
    };
    Some(format!("{}:{}", typename, id))
}
