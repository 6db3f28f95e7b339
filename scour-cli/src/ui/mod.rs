pub mod bar_chart;
mod confirm;
mod footer;
mod header;
mod help;
mod layout;
mod log_view;
mod progress;
mod theme;

pub use confirm::ConfirmRunView;
pub use footer::Footer;
pub use header::Header;
pub use help::HelpView;
pub use layout::AppLayout;
pub use log_view::LogView;
pub use progress::ProgressView;
pub use theme::Theme;
