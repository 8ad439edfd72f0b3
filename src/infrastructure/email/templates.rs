//! Email subjects and HTML body templates.
//!
//! Bodies are fixed HTML documents populated by positional formatting.
//! Parameters are inserted verbatim, matching the observed behavior of the
//! notification emails.

use crate::domain::{Transaction, UserLocation};

pub const RESET_PASSWORD_SUBJECT: &str = "FXIB Reset Password";
pub const TWO_FACTOR_SUBJECT: &str = "FXIB - Two Authentication 6-digit Code";
pub const LOCATION_DIFFERENCE_SUBJECT: &str = "FXIB - Login from a different location!";
pub const REGISTRATION_SUCCESS_SUBJECT: &str = "FXIB - Successful Registration";
pub const SUBSCRIPTION_SUCCESS_SUBJECT: &str = "FXIB - Subscription Successful!";
pub const USER_BAN_SUBJECT: &str = "FXIB - Account suspended";
pub const USER_UNBAN_SUBJECT: &str = "FXIB - Account no longer suspended.";

/// Report emails carry the reporting username in the subject.
pub fn report_subject(username: &str) -> String {
    format!("Customer Support Report - {}", username)
}

fn wrap(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{}</title>
</head>
<body>
{}
</body>
</html>"#,
        title, body
    )
}

pub fn reset_password_body(username: &str, raw_token: &str, frontend_base_url: &str) -> String {
    wrap(
        "Password Reset",
        &format!(
            r#"    <h1>Hello {},</h1>
    <p>We received a request to reset your password. To reset your password, please click the link below:</p>
    <p><a href="{}/reset-password-update?token={}">Reset My Password</a></p>
    <p>If you did not request a password reset, you can ignore this email.</p>
    <p>Thank you,</p>
    <p>FXIB</p>"#,
            username, frontend_base_url, raw_token
        ),
    )
}

pub fn two_factor_body(username: &str, code: i32) -> String {
    wrap(
        "Authentication Code",
        &format!(
            r#"    <h1>Hello {},</h1>
    <p>Your authentication code is: <strong>{}</strong></p>
    <p>If you did not try to login recently, please change your password.</p>
    <p>Thank you,</p>
    <p>FXIB</p>"#,
            username, code
        ),
    )
}

fn location_list(location: &UserLocation) -> String {
    format!(
        r#"    <ul>
        <li>Continent: {}</li>
        <li><img src="{}" alt="Country Flag" width=16 height=10> Country: {}</li>
        <li>City: {}</li>
        <li>IP Address: {}</li>
    </ul>"#,
        location.continent, location.country_flag_url, location.country, location.city, location.ip
    )
}

pub fn location_difference_body(
    username: &str,
    current: &UserLocation,
    original: &UserLocation,
) -> String {
    wrap(
        "Login from a different location!",
        &format!(
            r#"    <h1>Hello {},</h1>
    <p>If you have knowledge of someone else logging into your account from a different location, please take action immediately. Here are the details of the unauthorized login:
{}
    </p>
    <p>Your registration was made at this location:
{}
    </p>
    <p>If you are aware of this login, you can ignore this message.</p>
    <p>You can change your location from the settings.</p>
    <p>Thank you,</p>
    <p>FXIB</p>"#,
            username,
            location_list(current),
            location_list(original)
        ),
    )
}

pub fn registration_success_body(username: &str) -> String {
    wrap(
        "Successful Registration",
        &format!(
            r#"    <h1>Hello {},</h1>
    <p>Congratulations! You have successfully registered with FXIB.</p>
    <p>Thank you for choosing FXIB!</p>"#,
            username
        ),
    )
}

pub fn subscription_success_body(username: &str, transaction: &Transaction) -> String {
    wrap(
        "Subscription Successful!",
        &format!(
            r#"    <h1>Hello {},</h1>
    <p>Thank you for subscribing to FXIB services. Your subscription details are as follows:
    <ul>
        <li>Billing Date: {}</li>
        <li>Duration: {}</li>
        <li>End of Billing Date: {}</li>
        <li>Amount: {}</li>
        <li>Card: {}</li>
        <li>Status: {}</li>
        <li>Receipt: {}</li>
        <li>Description: {}</li>
    </ul>
    </p>
    <p>If you have any questions or concerns, please contact our support team.</p>
    <p>Thank you for choosing FXIB!</p>"#,
            username,
            transaction.billing_date,
            transaction.duration,
            transaction.end_of_billing_date,
            transaction.amount,
            transaction.card,
            transaction.status,
            transaction.receipt.as_deref().unwrap_or(""),
            transaction.description.as_deref().unwrap_or("")
        ),
    )
}

pub fn user_ban_body(username: &str, ban_date: &str) -> String {
    wrap(
        "Information:",
        &format!(
            r#"    <h1>Hello {},</h1>
    <p>We regret to inform you that your account has been banned from FXIB services.</p>
    <p>Details of the ban are as follows:
    <ul>
        <li>Ban Date: {}</li>
        <li>Reason: Violating Terms of Service</li>
    </ul>
    </p>
    <p>If you believe this ban is a mistake or have any concerns, please contact our support team.</p>
    <p>Thank you for your understanding.</p>
    <p>Sincerely,<br>FXIB Team</p>"#,
            username, ban_date
        ),
    )
}

pub fn user_unban_body(username: &str, unban_date: &str) -> String {
    wrap(
        "Information:",
        &format!(
            r#"    <h1>Hello {},</h1>
    <p>We are pleased to inform you that your account has been unbanned from FXIB services.</p>
    <p>The details of the unbanning are as follows:
    <ul>
        <li>Unban Date: {}</li>
    </ul>
    </p>
    <p>If you have any questions or concerns, please contact our support team.</p>
    <p>Thank you for your understanding and cooperation.</p>
    <p>Sincerely,<br>FXIB Team</p>"#,
            username, unban_date
        ),
    )
}

pub fn inquiry_body(title: &str, content: &str, date: &str, sender_email: &str) -> String {
    wrap(
        title,
        &format!(
            r#"    <p>{}</p>
    <p>Sent on: {} by {}</p>"#,
            content, date, sender_email
        ),
    )
}

pub fn report_body(
    title: &str,
    date: &str,
    username: &str,
    content: &str,
    img_url: &str,
) -> String {
    wrap(
        title,
        &format!(
            r#"    <p>Sent on: {} by {}</p>

    <!-- Report Content -->
    <div>
        <h2>Report Content:</h2>
        <p>{}</p>
    </div>

    <!-- Image -->
    <div>
         <p>Image url: {}</p>
    </div>"#,
            date, username, content, img_url
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_location() -> UserLocation {
        UserLocation {
            continent: "Europe".to_string(),
            country: "Bulgaria".to_string(),
            country_flag_url: "https://flags.example/bg.png".to_string(),
            city: "Sofia".to_string(),
            ip: "10.0.0.1".to_string(),
        }
    }

    #[test]
    fn test_reset_password_body_contains_link_with_token() {
        let body = reset_password_body("alice", "raw-token-123", "http://localhost:3000");
        assert!(body.contains("Hello alice"));
        assert!(body.contains("http://localhost:3000/reset-password-update?token=raw-token-123"));
    }

    #[test]
    fn test_two_factor_body_contains_code() {
        let body = two_factor_body("bob", 426_913);
        assert!(body.contains("<strong>426913</strong>"));
    }

    #[test]
    fn test_location_difference_body_lists_both_locations() {
        let mut current = test_location();
        current.city = "Berlin".to_string();
        let body = location_difference_body("carol", &current, &test_location());
        assert!(body.contains("City: Berlin"));
        assert!(body.contains("City: Sofia"));
    }

    #[test]
    fn test_report_subject_carries_username() {
        assert_eq!(report_subject("dave"), "Customer Support Report - dave");
    }
}
