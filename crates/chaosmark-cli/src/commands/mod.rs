pub mod embed;
pub mod extract;
pub mod inspect;
pub mod verify;
