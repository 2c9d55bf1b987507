//! Presentation contracts for the attendee grid.
//!
//! The browser fetches the full collection once, shuffles it once per page
//! load, and pages through fixed-size slices without ever re-fetching.
//! These modules are the reference semantics for that behavior: a uniform
//! copy-shuffle, a 1-indexed pager with boundary-disabled navigation, and
//! the card view-model derivation.

pub mod card;
pub mod pager;
pub mod shuffle;

pub use card::{classify_link, Card, SocialIcon, SocialLink, PLACEHOLDER_PHOTO};
pub use pager::{Pager, PAGE_SIZE};
pub use shuffle::{shuffled, shuffled_with};
