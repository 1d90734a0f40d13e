//! Validation rules for spare parts, stock movements, and accounts
//!
//! Pure helpers used by the backend before anything is written. Limits
//! mirror the database column constraints.

use rust_decimal::Decimal;

// ============================================================================
// Spare Part Validations
// ============================================================================

/// Part codes are 3-20 characters: uppercase letters, digits, and dashes.
pub fn validate_part_code(code: &str) -> Result<(), &'static str> {
    if code.len() < 3 {
        return Err("Part code must be at least 3 characters");
    }
    if code.len() > 20 {
        return Err("Part code must be at most 20 characters");
    }
    if !code
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '-')
    {
        return Err("Part code must be uppercase alphanumeric or dashes");
    }
    Ok(())
}

pub fn validate_part_name(name: &str) -> Result<(), &'static str> {
    if name.len() < 3 {
        return Err("Part name must be at least 3 characters");
    }
    if name.len() > 200 {
        return Err("Part name must be at most 200 characters");
    }
    Ok(())
}

pub fn validate_category(category: &str) -> Result<(), &'static str> {
    if category.len() < 2 {
        return Err("Category must be at least 2 characters");
    }
    if category.len() > 100 {
        return Err("Category must be at most 100 characters");
    }
    Ok(())
}

pub fn validate_price(price: Decimal) -> Result<(), &'static str> {
    if price < Decimal::ZERO {
        return Err("Price cannot be negative");
    }
    if price > Decimal::from(999_999_999u32) {
        return Err("Price is too large");
    }
    Ok(())
}

pub fn validate_current_stock(stock: i32) -> Result<(), &'static str> {
    if stock < 0 {
        return Err("Stock cannot be negative");
    }
    Ok(())
}

/// Minimum stock doubles as the safety-stock value, so zero is not allowed.
pub fn validate_minimum_stock(minimum: i32) -> Result<(), &'static str> {
    if minimum < 1 {
        return Err("Minimum stock must be at least 1");
    }
    Ok(())
}

pub fn validate_lead_time(days: i32) -> Result<(), &'static str> {
    if days < 1 {
        return Err("Lead time must be at least 1 day");
    }
    if days > 365 {
        return Err("Lead time must be at most 365 days");
    }
    Ok(())
}

// ============================================================================
// Stock Movement Validations
// ============================================================================

pub fn validate_movement_quantity(quantity: i32) -> Result<(), &'static str> {
    if quantity <= 0 {
        return Err("Quantity must be greater than zero");
    }
    Ok(())
}

pub fn validate_unit_price(price: Decimal) -> Result<(), &'static str> {
    if price < Decimal::ZERO {
        return Err("Unit price cannot be negative");
    }
    Ok(())
}

// ============================================================================
// Account Validations
// ============================================================================

/// Usernames are 3-50 characters: letters, digits, and underscores.
pub fn validate_username(username: &str) -> Result<(), &'static str> {
    if username.len() < 3 {
        return Err("Username must be at least 3 characters");
    }
    if username.len() > 50 {
        return Err("Username must be at most 50 characters");
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err("Username must be alphanumeric or underscores");
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.len() < 6 {
        return Err("Password must be at least 6 characters");
    }
    if password.len() > 100 {
        return Err("Password must be at most 100 characters");
    }
    Ok(())
}
