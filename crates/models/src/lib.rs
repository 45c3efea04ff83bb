//! Record types of the price desk and their validation rules.
//! - `Record`: one priced service entry as stored on disk and served over HTTP.
//! - `Price`/`OnSale`: the two mutable fields, each a validated value type.
//! - `RecordPatch`: a validated partial update.

pub mod errors;
pub mod price;
pub mod record;
pub mod patch;

pub use errors::ModelError;
pub use patch::RecordPatch;
pub use price::Price;
pub use record::{OnSale, Record};
