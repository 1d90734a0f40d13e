//! Business logic services for the spare-parts inventory system

pub mod auth;
pub mod dashboard;
pub mod need_analysis;
pub mod notification;
pub mod settings;
pub mod spare_part;
pub mod stock_movement;

pub use auth::AuthService;
pub use dashboard::DashboardService;
pub use need_analysis::NeedAnalysisService;
pub use notification::NotificationService;
pub use settings::SettingsService;
pub use spare_part::SparePartService;
pub use stock_movement::StockMovementService;
