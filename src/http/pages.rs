//! Static HTML pages served by the portal.

/// Wallet connect page (`/`).
pub const CONNECT: &str = include_str!("../../templates/connect.html");

/// Landing page linking every form (`/welcome`).
pub const WELCOME: &str = include_str!("../../templates/index.html");

pub const REGISTER: &str = include_str!("../../templates/register.html");
pub const TRANSFER: &str = include_str!("../../templates/transfer.html");
pub const DELIVER: &str = include_str!("../../templates/deliver.html");
pub const PRODUCT: &str = include_str!("../../templates/product.html");
pub const HISTORY: &str = include_str!("../../templates/history.html");

/// Shared stylesheet (`/static/portal.css`).
pub const STYLESHEET: &str = include_str!("../../templates/portal.css");
