pub mod work;
pub use work::*;

pub mod chapter;
pub use chapter::*;

pub mod page;
pub use page::*;

pub mod library;
pub use library::*;

pub mod history;
pub use history::*;
