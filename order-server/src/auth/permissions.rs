//! Permission Definitions
//!
//! Reading halls, tables, menu and orders only needs a valid token.
//! Writes are split by module; `settings:manage` is held by admins only.

pub const TABLES_MANAGE: &str = "tables:manage";
pub const MENU_MANAGE: &str = "menu:manage";
pub const ORDERS_WRITE: &str = "orders:write";
pub const PAYMENTS_CAPTURE: &str = "payments:capture";
pub const REPORTS_VIEW: &str = "reports:view";
pub const SETTINGS_MANAGE: &str = "settings:manage";

pub const ALL_PERMISSIONS: &[&str] = &[
    TABLES_MANAGE,
    MENU_MANAGE,
    ORDERS_WRITE,
    PAYMENTS_CAPTURE,
    REPORTS_VIEW,
    SETTINGS_MANAGE,
];

pub const DEFAULT_ADMIN_PERMISSIONS: &[&str] = &["all"];

pub const DEFAULT_MANAGER_PERMISSIONS: &[&str] = &[
    TABLES_MANAGE,
    MENU_MANAGE,
    ORDERS_WRITE,
    PAYMENTS_CAPTURE,
    REPORTS_VIEW,
];

pub const DEFAULT_WAITER_PERMISSIONS: &[&str] = &[ORDERS_WRITE];

pub const DEFAULT_CASHIER_PERMISSIONS: &[&str] = &[ORDERS_WRITE, PAYMENTS_CAPTURE];

/// Default permissions for a role name; unknown roles get none
pub fn get_default_permissions(role_name: &str) -> Vec<String> {
    let defaults: &[&str] = match role_name {
        "admin" => DEFAULT_ADMIN_PERMISSIONS,
        "manager" => DEFAULT_MANAGER_PERMISSIONS,
        "waiter" => DEFAULT_WAITER_PERMISSIONS,
        "cashier" => DEFAULT_CASHIER_PERMISSIONS,
        _ => &[],
    };
    defaults.iter().map(|s| s.to_string()).collect()
}

pub fn is_valid_permission(permission: &str) -> bool {
    ALL_PERMISSIONS.contains(&permission) || permission == "all" || permission.ends_with(":*")
}
