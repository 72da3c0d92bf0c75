pub mod errors;
pub mod graphql;
pub mod introspection;
pub mod json_schema;
pub mod mutation;
pub mod resource;
pub mod schema_cache;
pub mod server;
pub mod server_handler;
mod tools;

#[cfg(test)]
mod test_fixtures;
