pub mod client;
pub mod error;
pub mod session;
pub mod types;

pub use client::VenueClient;
pub use error::{QuoteError, VenueError};
pub use session::VenueSession;
pub use types::{DynamicVenueResponse, StaticVenueResponse};
