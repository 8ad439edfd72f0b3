//! Response message and sentinel constants.

/// Biography sentinel written when an account is banned.
pub const BANNED_USER_STATUS: &str = "This account has been suspended for violating the Terms of Service.";

pub const USER_BANNED_SUCCESSFULLY: &str = "User roles updated successfully";
pub const USER_LOGOUT_SUCCESSFULLY: &str = "User logged out successfully";
pub const PASSWORD_CHANGE_EMAIL_SENT_SUCCESSFULLY: &str = "Password reset email sent successfully";
pub const PASSWORD_UPDATED_SUCCESSFULLY: &str = "Password updated successfully";
pub const TWO_FACTOR_CODE_EMAIL_SENT_SUCCESSFULLY: &str = "Two-factor code email sent successfully";
pub const LOCATION_DIFFERENCE_EMAIL_SENT_SUCCESSFULLY: &str =
    "Location difference email sent successfully";
pub const REGISTRATION_SUCCESSFUL: &str = "User registered successfully";
pub const AGREED_TO_TERMS_SUCCESSFULLY: &str = "Terms and conditions agreement recorded";

/// Default subscription label for accounts without a paid plan.
pub const FREE_SUBSCRIPTION: &str = "Free";
