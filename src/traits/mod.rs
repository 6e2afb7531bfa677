//! Trait definitions for slick records that carry attachments.

mod attachable;

pub use attachable::Attachable;
