//! Explicit request validation.
//!
//! Each request type gets one `validate_*` function that enumerates its
//! rules in declaration order and fails on the first violation with a
//! `"<field>: <message>"` BadRequest. Services call these at the top of
//! every operation, before touching the database.

use crate::error::ApiError;
use crate::services::addresses::{CreateAddressRequest, UpdateAddressRequest};
use crate::services::auth::LoginUserRequest;
use crate::services::contacts::{CreateContactRequest, UpdateContactRequest};
use crate::services::users::{RegisterUserRequest, UpdateUserRequest};

/// Reject a missing or blank value, returning the trimmed-checked input
pub fn required<'a>(field: &str, value: Option<&'a str>) -> Result<&'a str, ApiError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(violation(field, "must not be blank")),
    }
}

/// Enforce a maximum length (in characters) on a present value
pub fn max_length(field: &str, value: Option<&str>, max: usize) -> Result<(), ApiError> {
    if let Some(v) = value {
        if v.chars().count() > max {
            return Err(violation(
                field,
                &format!("size must be between 0 and {}", max),
            ));
        }
    }
    Ok(())
}

/// Basic email shape check on a present, non-empty value
pub fn email_format(field: &str, value: Option<&str>) -> Result<(), ApiError> {
    let Some(email) = value else { return Ok(()) };
    if email.is_empty() {
        return Ok(());
    }

    let well_formed = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && domain.contains('.'),
        None => false,
    };
    if !well_formed {
        return Err(violation(field, "must be a well-formed email address"));
    }
    Ok(())
}

fn violation(field: &str, message: &str) -> ApiError {
    ApiError::bad_request(format!("{}: {}", field, message))
}

pub fn validate_register(request: &RegisterUserRequest) -> Result<(), ApiError> {
    required("username", request.username.as_deref())?;
    max_length("username", request.username.as_deref(), 100)?;
    required("password", request.password.as_deref())?;
    max_length("password", request.password.as_deref(), 100)?;
    required("name", request.name.as_deref())?;
    max_length("name", request.name.as_deref(), 100)?;
    Ok(())
}

pub fn validate_login(request: &LoginUserRequest) -> Result<(), ApiError> {
    required("username", request.username.as_deref())?;
    max_length("username", request.username.as_deref(), 100)?;
    required("password", request.password.as_deref())?;
    max_length("password", request.password.as_deref(), 100)?;
    Ok(())
}

pub fn validate_update_user(request: &UpdateUserRequest) -> Result<(), ApiError> {
    max_length("name", request.name.as_deref(), 100)?;
    max_length("password", request.password.as_deref(), 100)?;
    Ok(())
}

pub fn validate_create_contact(request: &CreateContactRequest) -> Result<(), ApiError> {
    required("firstName", request.first_name.as_deref())?;
    max_length("firstName", request.first_name.as_deref(), 100)?;
    max_length("lastName", request.last_name.as_deref(), 100)?;
    max_length("phone", request.phone.as_deref(), 100)?;
    max_length("email", request.email.as_deref(), 100)?;
    email_format("email", request.email.as_deref())?;
    Ok(())
}

pub fn validate_update_contact(request: &UpdateContactRequest) -> Result<(), ApiError> {
    max_length("firstName", request.first_name.as_deref(), 100)?;
    max_length("lastName", request.last_name.as_deref(), 100)?;
    max_length("phone", request.phone.as_deref(), 100)?;
    max_length("email", request.email.as_deref(), 100)?;
    email_format("email", request.email.as_deref())?;
    Ok(())
}

pub fn validate_create_address(request: &CreateAddressRequest) -> Result<(), ApiError> {
    max_length("street", request.street.as_deref(), 200)?;
    max_length("city", request.city.as_deref(), 100)?;
    max_length("province", request.province.as_deref(), 100)?;
    required("country", request.country.as_deref())?;
    max_length("country", request.country.as_deref(), 100)?;
    max_length("postalCode", request.postal_code.as_deref(), 10)?;
    Ok(())
}

pub fn validate_update_address(request: &UpdateAddressRequest) -> Result<(), ApiError> {
    max_length("street", request.street.as_deref(), 200)?;
    max_length("city", request.city.as_deref(), 100)?;
    max_length("province", request.province.as_deref(), 100)?;
    required("country", request.country.as_deref())?;
    max_length("country", request.country.as_deref(), 100)?;
    max_length("postalCode", request.postal_code.as_deref(), 10)?;
    Ok(())
}

pub fn validate_search_paging(page: i64, size: i64) -> Result<(), ApiError> {
    if page < 0 {
        return Err(violation("page", "must be greater than or equal to 0"));
    }
    if size < 1 {
        return Err(violation("size", "must be greater than or equal to 1"));
    }
    Ok(())
}
