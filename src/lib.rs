pub mod config;
pub mod domain {
    pub mod order;
    pub mod response;
}
pub mod error;
pub mod gateways;
pub mod items;
