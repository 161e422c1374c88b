//! Google Drive and Places clients for Homebase.
//!
//! - [`DriveClient`] downloads an uploaded profile document by file id.
//! - [`PlacesClient`] turns a recommended place into a map link, a photo
//!   and the commute from the user's home. Every field degrades on its own;
//!   a lookup never fails as a whole.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod drive;
mod places;

pub use drive::DriveClient;
pub use places::{PlaceInfo, PlacesClient};
