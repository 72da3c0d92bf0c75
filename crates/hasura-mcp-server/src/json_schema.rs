/// Macro to generate a JSON schema from a type
#[macro_export]
macro_rules! schema_from_type {
    ($type:ty) => {{
        // Draft-07 keeps the schema readable by MCP clients that reject newer drafts
        let settings = schemars::generate::SchemaSettings::draft07();
        let generator = settings.into_generator();
        let schema = generator.into_root_schema_for::<$type>();
        #[allow(clippy::panic)]
        let schema = match serde_json::to_value(schema) {
            Ok(serde_json::Value::Object(schema)) => schema,
            _ => panic!("Failed to generate schema for {}", stringify!($type)),
        };
        schema
    }};
}

#[cfg(test)]
mod tests {
    use schemars::JsonSchema;
    use serde::Deserialize;

    #[derive(JsonSchema, Deserialize)]
    struct TestInput {
        #[allow(dead_code)]
        table_name: String,
    }

    #[test]
    fn schema_from_type() {
        let schema = schema_from_type!(TestInput);

        assert_eq!(
            serde_json::to_value(&schema).unwrap(),
            serde_json::json!({
                "$schema": "http://json-schema.org/draft-07/schema#",
                "title": "TestInput",
                "type": "object",
                "properties": {
                    "table_name": {
                        "type": "string"
                    }
                },
                "required": ["table_name"]
            })
        );
    }
}
