//! Avatar customization: equipped cosmetics and colors.

pub mod manager;
pub mod types;

pub use manager::AvatarManager;
pub use types::{
    Avatar, AvatarColors, AvatarError, ColorUpdate, GearLoadout, UnequipTarget,
    DEFAULT_PRIMARY_COLOR,
};
