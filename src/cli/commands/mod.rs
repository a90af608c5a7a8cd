mod history;
mod stock;
mod user;

pub use history::cmd_history;
pub use stock::{cmd_stock_list, cmd_stock_receive};
pub use user::{cmd_user_add, cmd_user_list};
