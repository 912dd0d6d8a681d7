pub mod aircraft;
pub mod airport;
pub mod board;
pub mod charter;
pub mod macros;
pub mod route;
pub mod template;
pub mod time;

pub use aircraft::*;
pub use airport::*;
pub use board::*;
pub use charter::*;
pub use route::*;
pub use template::*;
pub use time::*;
