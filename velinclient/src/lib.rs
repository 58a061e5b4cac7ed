//! Client-side navigation, routing and connectivity for Velin
//!
//! This crate holds the pieces of the web client that decide what is on
//! screen: the location ([`Navigator`]), the route table and its gates
//! ([`resolve`]), connectivity tracking ([`NetworkMonitor`]) and incoming
//! share link handling ([`ShareLinkResolver`]).

pub mod navigation;
pub mod network;
pub mod router;
pub mod share_link;

pub use navigation::{NavigationBridge, Navigator};
pub use network::NetworkMonitor;
pub use router::{is_public, match_route, normalize_path, resolve, Page, RouteOutcome};
pub use share_link::ShareLinkResolver;
