//! Output shapes that a completion is constrained to.
//!
//! Providers disagree on the schema dialect: OpenAI and Ollama take standard
//! JSON Schema, Gemini takes its own OpenAPI subset with upper-case type
//! names. A [`Schema`] is declared once and rendered per provider.

use serde_json::{json, Map, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    String {
        description: Option<String>,
    },
    Array {
        items: Box<Schema>,
        description: Option<String>,
    },
    Object {
        /// Ordered so that rendered schemas list fields in declaration order.
        properties: Vec<(String, Schema)>,
        required: Vec<String>,
    },
}

impl Schema {
    pub fn string() -> Self {
        Schema::String { description: None }
    }

    pub fn described_string(description: &str) -> Self {
        Schema::String {
            description: Some(description.to_string()),
        }
    }

    pub fn array_of(items: Schema) -> Self {
        Schema::Array {
            items: Box::new(items),
            description: None,
        }
    }

    pub fn described_array_of(items: Schema, description: &str) -> Self {
        Schema::Array {
            items: Box::new(items),
            description: Some(description.to_string()),
        }
    }

    /// Object whose every property is required.
    pub fn object(properties: Vec<(&str, Schema)>) -> Self {
        let required = properties.iter().map(|(name, _)| name.to_string()).collect();
        Schema::Object {
            properties: properties
                .into_iter()
                .map(|(name, schema)| (name.to_string(), schema))
                .collect(),
            required,
        }
    }

    /// Standard JSON Schema, as accepted by OpenAI and Ollama.
    pub fn to_json_schema(&self) -> Value {
        self.render(Dialect::JsonSchema)
    }

    /// Gemini `responseSchema` dialect.
    pub fn to_gemini(&self) -> Value {
        self.render(Dialect::Gemini)
    }

    fn render(&self, dialect: Dialect) -> Value {
        let mut out = Map::new();
        match self {
            Schema::String { description } => {
                out.insert("type".into(), json!(dialect.type_name("string")));
                if let Some(d) = description {
                    out.insert("description".into(), json!(d));
                }
            }
            Schema::Array { items, description } => {
                out.insert("type".into(), json!(dialect.type_name("array")));
                out.insert("items".into(), items.render(dialect));
                if let Some(d) = description {
                    out.insert("description".into(), json!(d));
                }
            }
            Schema::Object {
                properties,
                required,
            } => {
                out.insert("type".into(), json!(dialect.type_name("object")));
                let props: Map<String, Value> = properties
                    .iter()
                    .map(|(name, schema)| (name.clone(), schema.render(dialect)))
                    .collect();
                out.insert("properties".into(), Value::Object(props));
                out.insert("required".into(), json!(required));
                match dialect {
                    // Strict structured outputs reject objects that allow extra keys
                    Dialect::JsonSchema => {
                        out.insert("additionalProperties".into(), json!(false));
                    }
                    Dialect::Gemini => {
                        let order: Vec<&str> =
                            properties.iter().map(|(name, _)| name.as_str()).collect();
                        out.insert("propertyOrdering".into(), json!(order));
                    }
                }
            }
        }
        Value::Object(out)
    }
}

#[derive(Debug, Clone, Copy)]
enum Dialect {
    JsonSchema,
    Gemini,
}

impl Dialect {
    fn type_name(self, name: &str) -> String {
        match self {
            Dialect::JsonSchema => name.to_string(),
            Dialect::Gemini => name.to_uppercase(),
        }
    }
}

/// Shape of a strategic briefing: four required fields.
pub fn briefing_schema() -> Schema {
    Schema::object(vec![
        ("title", Schema::described_string("عنوان جذاب للتقرير")),
        ("summary", Schema::described_string("ملخص تنفيذي شامل")),
        (
            "keyPoints",
            Schema::described_array_of(Schema::string(), "أهم النقاط والتحليلات"),
        ),
        ("outlook", Schema::described_string("توقعات مستقبلية مختصرة")),
    ])
}

/// Shape of a market ticker: array of `{symbol, price, change}`.
pub fn quotes_schema() -> Schema {
    Schema::array_of(Schema::object(vec![
        ("symbol", Schema::string()),
        ("price", Schema::string()),
        ("change", Schema::string()),
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_briefing_schema_requires_all_fields() {
        let schema = briefing_schema().to_json_schema();
        assert_eq!(
            schema["required"],
            json!(["title", "summary", "keyPoints", "outlook"])
        );
        assert_eq!(schema["properties"]["keyPoints"]["type"], "array");
        assert_eq!(schema["properties"]["keyPoints"]["items"]["type"], "string");
        assert_eq!(schema["additionalProperties"], false);
    }

    #[test]
    fn test_gemini_dialect_uses_upper_case_types() {
        let schema = quotes_schema().to_gemini();
        assert_eq!(schema["type"], "ARRAY");
        assert_eq!(schema["items"]["type"], "OBJECT");
        assert_eq!(schema["items"]["properties"]["symbol"]["type"], "STRING");
        assert_eq!(
            schema["items"]["propertyOrdering"],
            json!(["symbol", "price", "change"])
        );
        assert!(schema["items"].get("additionalProperties").is_none());
    }

    #[test]
    fn test_descriptions_are_rendered() {
        let schema = briefing_schema().to_gemini();
        assert_eq!(
            schema["properties"]["outlook"]["description"],
            "توقعات مستقبلية مختصرة"
        );
        assert!(Schema::string().to_json_schema().get("description").is_none());
    }
}
