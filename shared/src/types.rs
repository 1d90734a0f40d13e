//! Common types used across the application

use serde::{Deserialize, Serialize};

/// Application roles.
///
/// `Admin` manages everything, `Gudang` (warehouse staff) records stock and
/// maintains parts, `Pimpinan` (management) has read access to reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Gudang,
    Pimpinan,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Gudang => "gudang",
            UserRole::Pimpinan => "pimpinan",
        }
    }

    /// Parse the role string stored in the database / token claims.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "admin" => Some(UserRole::Admin),
            "gudang" => Some(UserRole::Gudang),
            "pimpinan" => Some(UserRole::Pimpinan),
            _ => None,
        }
    }
}

/// Pagination parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 50,
        }
    }
}

impl Pagination {
    /// Row offset for a SQL `LIMIT/OFFSET` query.
    pub fn offset(&self) -> i64 {
        (self.page.saturating_sub(1) as i64) * self.per_page as i64
    }
}

/// Paginated response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub page: u32,
    pub per_page: u32,
    pub total_items: u64,
    pub total_pages: u32,
}

impl PaginationMeta {
    pub fn new(pagination: &Pagination, total_items: u64) -> Self {
        let per_page = pagination.per_page.max(1);
        Self {
            page: pagination.page,
            per_page,
            total_items,
            total_pages: total_items.div_ceil(per_page as u64) as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips() {
        for role in [UserRole::Admin, UserRole::Gudang, UserRole::Pimpinan] {
            assert_eq!(UserRole::parse(role.as_str()), Some(role));
        }
        assert_eq!(UserRole::parse("superuser"), None);
    }

    #[test]
    fn pagination_offset() {
        let p = Pagination { page: 1, per_page: 50 };
        assert_eq!(p.offset(), 0);
        let p = Pagination { page: 3, per_page: 20 };
        assert_eq!(p.offset(), 40);
        // Page 0 is treated as page 1.
        let p = Pagination { page: 0, per_page: 20 };
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn pagination_meta_rounds_pages_up() {
        let p = Pagination { page: 1, per_page: 50 };
        assert_eq!(PaginationMeta::new(&p, 0).total_pages, 0);
        assert_eq!(PaginationMeta::new(&p, 50).total_pages, 1);
        assert_eq!(PaginationMeta::new(&p, 51).total_pages, 2);
    }
}
