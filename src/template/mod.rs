mod filters;
mod renderer;
mod schema;

pub use renderer::{normalize, render, Renderer};
pub use schema::{
    infer_schema, loop_sources, template_variables, Items, Property, Schema, VarType,
    SCHEMA_DIALECT,
};
