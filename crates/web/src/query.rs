//! Shared query parameter types for page handlers.

use mimamori_core::pagination::UserListQuery;
use serde::Deserialize;

/// `?notice=` left by a post/redirect/get cycle.
#[derive(Debug, Default, Deserialize)]
pub struct FlashParams {
    pub notice: Option<String>,
}

/// Query parameters for `GET /users`.
///
/// Kept separate from [`UserListQuery`] because the search form submits
/// empty strings for untouched fields.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserListParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
    pub hospital_id: Option<String>,
    pub notice: Option<String>,
}

impl UserListParams {
    /// Backend query; unparseable paging values fall back to defaults.
    pub fn to_query(&self, default_limit: u32) -> UserListQuery {
        UserListQuery {
            page: self.page.as_deref().and_then(|p| p.trim().parse().ok()),
            limit: self.limit.as_deref().and_then(|l| l.trim().parse().ok()),
            search: self.search.clone(),
            hospital_id: self.hospital_id.clone(),
        }
        .normalized(default_limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_and_garbage_paging_fall_back() {
        let params = UserListParams {
            page: Some(String::new()),
            limit: Some("many".into()),
            search: Some("".into()),
            ..Default::default()
        };
        let q = params.to_query(20);
        assert_eq!(q.page, Some(1));
        assert_eq!(q.limit, Some(20));
        assert_eq!(q.search, None);
    }

    #[test]
    fn explicit_values_pass_through() {
        let params = UserListParams {
            page: Some("3".into()),
            limit: Some("50".into()),
            search: Some("山田".into()),
            hospital_id: Some("h1".into()),
            notice: None,
        };
        let q = params.to_query(20);
        assert_eq!(q.page, Some(3));
        assert_eq!(q.limit, Some(50));
        assert_eq!(q.search.as_deref(), Some("山田"));
        assert_eq!(q.hospital_id.as_deref(), Some("h1"));
    }
}
