pub mod banner;
pub mod controller;
pub mod form;
pub mod format;
pub mod gateway;
pub mod store;
pub mod view;

pub use banner::Banner;
pub use controller::{Confirm, DeleteOutcome, DirectoryController, ViewPhase};
pub use form::{FormError, FormFields, FormMode, FormSession};
pub use gateway::{ApiGateway, HttpGateway};
pub use store::{CollectionStore, LoadStatus};
pub use view::{DirectoryView, EmployeeRow, ListBody};

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;
