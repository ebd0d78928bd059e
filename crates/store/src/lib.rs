pub mod memory;
pub mod reservations;
pub mod timeblocks;

pub mod mock;

pub use memory::MemoryStore;
pub use reservations::ReservationStore;
pub use timeblocks::TimeBlockStore;
