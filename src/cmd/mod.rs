pub mod hit;
pub mod inspect;
pub mod replay;
