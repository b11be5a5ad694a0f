//! Prelude module for convenient imports.
//!
//! ```
//! use fieldsift::prelude::*;
//! use serde_json::json;
//!
//! let mut schema = Schema::new();
//! schema.insert("age".into(), vec!["required".into(), "int".into()]);
//!
//! let params = json!({"age": "30"}).as_object().cloned().unwrap();
//! let cleaned = Pipeline::new().run(params, &schema).unwrap();
//! assert_eq!(cleaned["age"], json!(30));
//! ```

pub use crate::error::{SchemaError, ValidationError};
pub use crate::pipeline::Pipeline;
pub use crate::registry::{Registry, SanitizerFn, ValidatorFn};
pub use crate::token::RuleToken;
pub use crate::{Params, Schema};
