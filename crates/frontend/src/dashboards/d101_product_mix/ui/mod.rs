pub mod dashboard;

pub use dashboard::ProductMixDashboard;
