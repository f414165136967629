pub mod dashboards;
pub mod domain;
pub mod system;
