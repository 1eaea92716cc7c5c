//! Prompt rendering for flows.
//!
//! - **Template**: `{variable}` substitution with inline and raw modes
//! - **Variables**: conversion of a validated input record into template variables
//!
//! # Template Syntax
//!
//! ```text
//! Product: {productDescription:raw}
//! Target audience: {targetAudience}
//! ```
//!
//! Use `{{` to escape and render a literal `{`.

mod template;
mod variables;

pub use template::{
    Placeholder, Substitution, TemplateError, placeholders, render_template, vars,
};
pub use variables::template_vars;
