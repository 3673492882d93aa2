pub mod store;
pub use store::{LastModifiedError, MailmanStore};
