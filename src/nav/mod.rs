//! Client navigation: route table, session snapshot and access guard.
//!
//! ARCHITECTURE
//! ============
//! Everything here is synchronous and free of I/O. The HTTP layer feeds it a
//! request's cookie jar through [`session::CookieSessionReader`] and turns
//! the resulting [`router::Navigation`] into a response.

pub mod access;
pub mod guard;
pub mod router;
pub mod session;
pub mod table;

pub use access::AccessTag;
pub use guard::{AccessGuard, Decision, GuardOutcome, NavigationRequest, Next};
pub use router::{MAX_REDIRECTS, Navigation, NavigationError, Navigator};
pub use session::{CookieSessionReader, Session, SessionReader, User};
pub use table::{RouteDefinition, RouteMatch, RouteTable, RouteTableError, ViewRef};
