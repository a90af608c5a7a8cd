pub mod auth_service;
pub use auth_service::{AuthError, AuthService};

pub mod auth_service_impl;
pub use auth_service_impl::SeaOrmAuthService;

pub mod stock_service;
pub use stock_service::{ActionResult, StockError, StockService};

pub mod stock_service_impl;
pub use stock_service_impl::SeaOrmStockService;
