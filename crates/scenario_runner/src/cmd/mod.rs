pub mod inspect;
pub mod replay;
