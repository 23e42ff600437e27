//! Account endpoint paths, relative to the configured base URL.

pub const LOGIN: &str = "/Account/login";
pub const LOGIN_GOOGLE: &str = "/Account/login/google";
pub const REFRESH_TOKEN: &str = "/Account/refresh-token";
pub const LOGOUT: &str = "/Account/logout";
pub const REGISTER_USER: &str = "/Account/register-user";
pub const REGISTER_SERVICE_PROVIDER: &str = "/Account/register-service-provider";
pub const FORGET_PASSWORD: &str = "/Account/forget-password";
pub const RESET_PASSWORD: &str = "/Account/reset-password";
pub const CHANGE_PASSWORD: &str = "/Account/change-password";
pub const VERIFY_OTP: &str = "/Account/verify-otp";
pub const RESEND_OTP: &str = "/Account/resend-otp";
