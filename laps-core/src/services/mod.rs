//! 服务层模块

mod computer_account_service;

pub use computer_account_service::{
    ComputerAccountService, computer_by_name_filter, laps_enabled_filter,
};
