//! Repositories for document store operations
//!
//! A [`DocumentCollection`] is the storage seam: one implementation per
//! backend. The service and booking repositories sit on top of it and own the
//! domain rules (which fields an update touches, how filters are built).

pub mod bookings;
pub mod collection;
pub mod memory;
pub mod postgres;
pub mod services;

pub use bookings::BookingRepository;
pub use collection::{
    DeleteResult, Document, DocumentCollection, Filter, ID_FIELD, InsertOneResult, UpdateResult,
};
pub use memory::MemoryCollection;
pub use postgres::PgCollection;
pub use services::ServiceRepository;

/// Collection holding service listings
pub const SERVICES: &str = "services";
/// Collection holding bookings
pub const BOOKINGS: &str = "bookings";
