mod layout;
mod parts;
mod view;

pub use layout::*;
pub use parts::*;
pub use view::*;
