//! 类型定义模块

mod computer_account;
mod target;

pub use computer_account::{
    ATTR_ADMIN_PASSWORD, ATTR_ADMIN_PASSWORD_EXPIRATION, ATTR_NAME, ComputerAccount,
    LAPS_ATTRIBUTES, NO_EXPIRATION_TIMESTAMP, no_expiration,
};
pub use target::DirectoryTarget;
