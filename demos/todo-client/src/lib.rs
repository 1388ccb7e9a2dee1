//! ToDo clients generated at build time from `todo.yml`.
//!
//! - [`ToDoServiceSyncClient`]: methods declared with a return type, each
//!   taking the matching result callback and an error callback
//! - [`ToDoServiceClient`]: methods declared with their callbacks
//!
//! ```rust,no_run
//! use restling_core::{ErrorCallback, MultipleResult, ReqwestTransport};
//! use todo_client::{ToDo, ToDoServiceSyncClient};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ToDoServiceSyncClient::new("http://localhost:8080", ReqwestTransport::builder().build()?);
//!
//! client
//!     .get_current_to_dos(
//!         MultipleResult::new(|todos: Vec<ToDo>| println!("{todos:?}")),
//!         ErrorCallback::new(|status, status_text, body| eprintln!("{status} {status_text}: {body}")),
//!     )
//!     .await?;
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};

/// A task of the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToDo {
    /// The identifier.
    pub id: u32,
    /// What to do.
    pub title: String,
    /// Whether it is done.
    #[serde(default)]
    pub done: bool,
}

#[allow(clippy::pedantic)]
mod generated {
    use super::ToDo;

    include!(concat!(env!("OUT_DIR"), "/todo_client.rs"));
}

pub use self::generated::{ToDoServiceClient, ToDoServiceSyncClient};
