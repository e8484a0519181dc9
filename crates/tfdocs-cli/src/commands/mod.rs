//! Command implementations for the tfdocs CLI
//!
//! Each command lives in its own submodule.

mod list;
mod recent;
mod reload;
mod search;
mod show;
mod url;

pub use list::execute as list;
pub use recent::execute as recent;
pub use reload::execute as reload;
pub use search::execute as search;
pub use show::execute as show;
pub use url::execute as url;
