mod delay;
mod gesture;
mod import;
mod key_combo;
mod led;
mod print;
mod rem;
mod repeat;
mod type_string;

pub use delay::{DefaultDelay, Delay};
pub use gesture::{Swipe, Tap};
pub use import::Import;
pub use key_combo::KeyCombo;
pub use led::Led;
pub use print::Print;
pub use rem::Rem;
pub use repeat::Repeat;
pub use type_string::TypeString;
