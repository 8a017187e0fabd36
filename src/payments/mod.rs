pub mod account;
pub mod config;
pub mod envelope;
pub mod error;
pub mod order_id;
pub mod payment;
pub mod service;
pub mod signing;
pub mod token;
pub mod transport;
pub mod types;

pub use account::AccountService;
pub use config::{ConnectionConfig, TokenConfig};
pub use error::{GatewayError, GatewayResult};
pub use order_id::{find_unused_order_id, OrderIdGenerator};
pub use payment::PaymentService;
pub use service::{Gateway, GatewayService};
pub use token::{ClientCardInfo, TokenService};
pub use transport::GatewayHttpClient;
