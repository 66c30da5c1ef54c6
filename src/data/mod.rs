pub mod catalog;
pub mod room;
pub mod validate;

pub use catalog::{builtin_catalog, normalize_room_id, CatalogError, RoomCatalog, FINISH_ROOM};
pub use room::{BoostStrategy, Difficulty, MoveQuality, Room};
