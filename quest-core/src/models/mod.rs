mod admin;
mod analytics;
mod boss;
mod focus;
mod global_quest;
mod mode_item;
mod preferences;
mod quest;
mod stats;
mod task;
mod user;

pub use admin::*;
pub use analytics::*;
pub use boss::*;
pub use focus::*;
pub use global_quest::*;
pub use mode_item::*;
pub use preferences::*;
pub use quest::*;
pub use stats::*;
pub use task::*;
pub use user::*;
