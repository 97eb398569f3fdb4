pub mod expense_api;
pub mod util;

// Re-export the client for cleaner imports
pub use expense_api::{AuthSession, ExpenseApiClient};
