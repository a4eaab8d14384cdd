pub mod card;
pub mod set;
pub mod value;
