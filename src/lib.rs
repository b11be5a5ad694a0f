//! # fieldsift
//!
//! Declarative field validation and sanitization for parameter maps.
//!
//! A schema maps field names to ordered lists of rule tokens such as
//! `"required"`, `"minLength:3"`, `"array:int"`, or
//! `"string|no-sanitize"`. Running a [`Pipeline`] over a parameter map
//! checks every declared field against its rules in order, applies the
//! matching sanitizer after each passing rule, and returns a map of
//! the cleaned, passing fields. The first broken rule aborts the run.
//!
//! ## Quick start
//!
//! ```
//! use fieldsift::{Pipeline, Schema};
//! use serde_json::json;
//!
//! let mut schema = Schema::new();
//! schema.insert("age".into(), vec!["required".into(), "int".into()]);
//! schema.insert("email".into(), vec!["email".into()]);
//!
//! let params = json!({"age": "30", "email": " a@b.com "})
//!     .as_object()
//!     .cloned()
//!     .unwrap();
//!
//! let cleaned = Pipeline::new().run(params, &schema).unwrap();
//! assert_eq!(cleaned["age"], json!(30));
//! assert_eq!(cleaned["email"], json!("a@b.com"));
//! ```
//!
//! Fields that are absent and not `required` are skipped without
//! touching a single rule; failed rules report the field, the rule
//! code, and the violated bound:
//!
//! ```
//! use fieldsift::{Pipeline, Schema};
//!
//! let mut schema = Schema::new();
//! schema.insert("age".into(), vec!["required".into()]);
//!
//! let error = Pipeline::new()
//!     .run(Default::default(), &schema)
//!     .unwrap_err();
//! assert_eq!(error.field(), Some("age"));
//! assert_eq!(error.code, "required");
//! ```
//!
//! ## Extending the rule vocabulary
//!
//! Rules dispatch by name through a [`Registry`]; registering a
//! validator (and optionally a sanitizer) under a new name makes it
//! available to every schema run through that pipeline. See
//! [`Registry`] for an example.

pub mod error;
pub mod pipeline;
pub mod prelude;
pub mod registry;
pub mod sanitizers;
pub mod token;
pub mod validators;

pub use error::{SchemaError, ValidationError};
pub use pipeline::Pipeline;
pub use registry::{Registry, SanitizerFn, ValidatorFn};
pub use token::RuleToken;

/// The candidate data for one pipeline run: field name to JSON value.
///
/// Passed to [`Pipeline::run`] by value as the run's working set;
/// sanitizers produce replacement values the runner writes back before
/// the next rule reads the field.
pub type Params = serde_json::Map<String, serde_json::Value>;

/// Field name to ordered rule-token list.
///
/// Declaration order is execution order, for fields and for the rules
/// within each field. Deserializable, so schemas can live in JSON or
/// TOML configuration.
pub type Schema = indexmap::IndexMap<String, Vec<String>>;
