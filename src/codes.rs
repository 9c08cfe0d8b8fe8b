//! Application-level response codes and their default user-facing messages.
//!
//! The server message always wins; the table below is only consulted when
//! the server sent an empty message.

pub const SUCCESS: &str = "C0000";

pub const BAD_REQUEST: &str = "C0001";
pub const AUTH_FAILED: &str = "C0002";
pub const FORBIDDEN: &str = "C0003";
pub const NOT_FOUND: &str = "C0004";
pub const INTERNAL_ERROR: &str = "C0005";
pub const DATABASE_ERROR: &str = "C0006";

pub mod user {
    pub const DUPLICATE_LOGIN_ID: &str = "L0001";
    pub const INVALID_LOGIN: &str = "L0002";
    pub const USER_NOT_FOUND: &str = "L0003";
}

pub mod product {
    pub const NOT_FOUND: &str = "P0001";
    pub const ALREADY_DELETED: &str = "P0002";
    pub const IMAGE_UPLOAD_FAILED: &str = "P0003";
}

pub mod coupon {
    pub const TEMPLATE_NOT_FOUND: &str = "CP0001";
    pub const ALREADY_ISSUED: &str = "CP0002";
    pub const NOT_ISSUE_PERIOD: &str = "CP0003";
    pub const COUPON_NOT_FOUND: &str = "CP0004";
    pub const ALREADY_USED: &str = "CP0005";
    pub const CANNOT_USE: &str = "CP0006";
    pub const ALREADY_RECEIVED: &str = "CP1004";
    pub const CANNOT_DELETE_ISSUED: &str = "CP1008";
    pub const SOLD_OUT: &str = "CP1009";
}

pub mod order {
    pub const NOT_FOUND: &str = "O0001";
    pub const ALREADY_CANCELLED: &str = "O0002";
    pub const CANNOT_CANCEL: &str = "O0003";
    pub const PAYMENT_FAILED: &str = "O0004";
}

pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred.";
pub const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired. Please log in again.";
pub const NETWORK_ERROR_MESSAGE: &str = "Please check your network connection.";
pub const REQUEST_ERROR_MESSAGE: &str = "An error occurred while processing the request.";
pub const ADMIN_REQUIRED_MESSAGE: &str = "Administrator permission is required.";

pub fn is_success(code: &str) -> bool {
    code == SUCCESS
}

pub fn is_auth_error(code: &str) -> bool {
    code == AUTH_FAILED
}

pub fn is_token_refresh_needed(code: &str) -> bool {
    code == AUTH_FAILED
}

/// Default message for a known code.
pub fn default_message(code: &str) -> Option<&'static str> {
    let message = match code {
        BAD_REQUEST => "The request was invalid.",
        AUTH_FAILED => "Authentication failed.",
        FORBIDDEN => "You do not have permission to access this resource.",
        NOT_FOUND => "The requested resource could not be found.",
        INTERNAL_ERROR => "An internal server error occurred.",
        DATABASE_ERROR => "A database error occurred.",

        user::DUPLICATE_LOGIN_ID => "This login ID is already in use.",
        user::INVALID_LOGIN => "The login information is incorrect.",
        user::USER_NOT_FOUND => "The user could not be found.",

        product::NOT_FOUND => "The product could not be found.",
        product::ALREADY_DELETED => "The product has already been deleted.",
        product::IMAGE_UPLOAD_FAILED => "Uploading the product image failed.",

        coupon::TEMPLATE_NOT_FOUND => "The coupon template could not be found.",
        coupon::ALREADY_ISSUED => "The coupon has already been issued.",
        coupon::NOT_ISSUE_PERIOD => "The coupon is not in its issue period.",
        coupon::COUPON_NOT_FOUND => "The coupon could not be found.",
        coupon::ALREADY_USED => "The coupon has already been used.",
        coupon::CANNOT_USE => "The coupon cannot be used.",
        coupon::ALREADY_RECEIVED => "You have already received this coupon.",
        coupon::CANNOT_DELETE_ISSUED => "A template with issued coupons cannot be deleted.",
        coupon::SOLD_OUT => "All coupons have been claimed.",

        order::NOT_FOUND => "The order could not be found.",
        order::ALREADY_CANCELLED => "The order has already been cancelled.",
        order::CANNOT_CANCEL => "The order can no longer be cancelled.",
        order::PAYMENT_FAILED => "Payment processing failed.",

        _ => return None,
    };
    Some(message)
}

/// Message to show for a failed response: the server's own message when
/// present, else the mapped default for the code, else a generic message.
pub fn error_message(code: Option<&str>, server_message: Option<&str>) -> String {
    if let Some(message) = server_message.filter(|m| !m.trim().is_empty()) {
        return message.to_string();
    }
    code.and_then(default_message)
        .unwrap_or(UNKNOWN_ERROR_MESSAGE)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_takes_precedence() {
        assert_eq!(
            error_message(Some(coupon::SOLD_OUT), Some("Gone in 60 seconds")),
            "Gone in 60 seconds"
        );
    }

    #[test]
    fn test_falls_back_to_code_table_then_generic() {
        assert_eq!(
            error_message(Some(order::CANNOT_CANCEL), Some("  ")),
            "The order can no longer be cancelled."
        );
        assert_eq!(error_message(Some("X9999"), None), UNKNOWN_ERROR_MESSAGE);
        assert_eq!(error_message(None, None), UNKNOWN_ERROR_MESSAGE);
    }

    #[test]
    fn test_refresh_trigger_is_only_auth_failed() {
        assert!(is_token_refresh_needed(AUTH_FAILED));
        assert!(!is_token_refresh_needed(FORBIDDEN));
        assert!(is_auth_error(AUTH_FAILED));
        assert!(is_success(SUCCESS));
    }
}
