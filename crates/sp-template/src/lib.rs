//! sp-template - Directive template engine for sqlproof
//!
//! SQL templates carry their parameters inside comments, so a template is
//! still runnable SQL on its own:
//!
//! ```sql
//! SELECT * FROM users
//! /*BEGIN*/
//! WHERE
//!   /*IF status != null*/ status = /*status*/'active' /*END*/
//! /*END*/
//! ```
//!
//! [`render`] resolves the block directives, substitutes placeholders and
//! normalizes whitespace. The [`inference`] module recovers a parameter
//! skeleton from the same text without evaluating it.

mod directive;

pub mod blocks;
pub mod condition;
pub mod inference;
pub mod placeholder;
pub mod render;

pub use condition::evaluate;
pub use inference::{guess_params, infer_predicate_names, infer_skeleton, truthy_variants, Variant};
pub use render::render;
